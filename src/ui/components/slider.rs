use crate::models::ConditionField;
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

pub struct SliderWidget<'a> {
    title: &'a str,
    value: f64,
    unit: &'a str,
    min: f64,
    max: f64,
    precision: usize,
    color: Color,
    focused: bool,
}

impl<'a> SliderWidget<'a> {
    pub fn new(title: &'a str, value: f64, unit: &'a str) -> Self {
        Self {
            title,
            value,
            unit,
            min: 0.0,
            max: 100.0,
            precision: 0,
            color: Theme::FG,
            focused: false,
        }
    }

    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    fn ratio(&self) -> f64 {
        if self.max <= self.min {
            return 0.0;
        }
        ((self.value - self.min) / (self.max - self.min)).clamp(0.0, 1.0)
    }
}

impl Widget for SliderWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 3 || area.width < 10 {
            return;
        }

        let border_style = if self.focused {
            Theme::border_focused()
        } else {
            Theme::border()
        };

        let block = Block::default()
            .title(self.title)
            .borders(Borders::ALL)
            .border_style(border_style);

        let inner = block.inner(area);
        block.render(area, buf);

        let value_str = format!("{:.prec$}{}", self.value, self.unit, prec = self.precision);
        let range_str = format!(
            "  ({:.prec$}-{:.prec$})",
            self.min,
            self.max,
            prec = self.precision
        );
        let value_style = if self.focused {
            Theme::highlight()
        } else {
            Style::default().fg(self.color)
        };

        let mut spans = Vec::new();
        if self.focused {
            spans.push(Span::styled("◀ ", Theme::nav_key()));
        }
        spans.push(Span::styled(value_str, value_style));
        if self.focused {
            spans.push(Span::styled(" ▶", Theme::nav_key()));
        }
        spans.push(Span::styled(range_str, Theme::dim()));
        Paragraph::new(Line::from(spans)).render(inner, buf);

        // Render bar if space allows
        if inner.height >= 2 {
            let bar_area = Rect {
                x: inner.x,
                y: inner.y + 1,
                width: inner.width,
                height: 1,
            };

            let filled = (bar_area.width as f64 * self.ratio()) as u16;

            for x in bar_area.x..bar_area.x + bar_area.width {
                let ch = if x < bar_area.x + filled {
                    '█'
                } else {
                    '░'
                };
                buf[(x, bar_area.y)].set_char(ch).set_fg(self.color);
            }
        }
    }
}

/// Slider for one advisor form field, colored by the value's agronomic band.
pub fn condition_slider(field: ConditionField, value: f64, focused: bool) -> SliderWidget<'static> {
    let (min, max) = field.range();
    let color = match field {
        ConditionField::Temperature => Theme::temp_color(value),
        ConditionField::Humidity => Theme::moisture_color(value, 80.0, 50.0),
        ConditionField::Ph => Theme::ph_color(value),
        ConditionField::Rainfall => Theme::moisture_color(value, 200.0, 100.0),
    };

    SliderWidget::new(field.label(), value, field.unit())
        .range(min, max)
        .precision(field.precision())
        .color(color)
        .focused(focused)
}
