use crate::models::{ConditionField, Conditions, Recommendation};
use crate::ui::components::condition_slider;
use crate::ui::{nav_bar, Theme};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

pub struct AdvisorScreen<'a> {
    pub conditions: &'a Conditions,
    pub focused_field: ConditionField,
    pub recommendation: Option<&'a Recommendation>,
    pub stale: bool,
    pub status_message: Option<&'a str>,
}

impl<'a> AdvisorScreen<'a> {
    pub fn new(conditions: &'a Conditions) -> Self {
        Self {
            conditions,
            focused_field: ConditionField::Temperature,
            recommendation: None,
            stale: false,
            status_message: None,
        }
    }

    pub fn with_focus(mut self, field: ConditionField) -> Self {
        self.focused_field = field;
        self
    }

    pub fn with_recommendation(mut self, rec: Option<&'a Recommendation>, stale: bool) -> Self {
        self.recommendation = rec;
        self.stale = stale;
        self
    }

    pub fn with_status(mut self, status: Option<&'a str>) -> Self {
        self.status_message = status;
        self
    }
}

impl Widget for AdvisorScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Length(8), // Form (2 rows of sliders)
                Constraint::Min(6),    // Result
                Constraint::Length(1), // Status message
                Constraint::Length(1), // Nav
            ])
            .split(area);

        self.render_header(chunks[0], buf);
        self.render_form(chunks[1], buf);
        self.render_result(chunks[2], buf);

        if let Some(msg) = self.status_message {
            Paragraph::new(Span::styled(msg, Theme::dim())).render(chunks[3], buf);
        }

        let nav = nav_bar(&[
            ("↑↓", "Field"),
            ("←→", "Adjust"),
            ("PgUp/PgDn", "×10"),
            ("Enter", "Predict"),
            ("r", "Reset"),
            ("1-3", "Screens"),
            ("q", "Quit"),
        ]);
        Paragraph::new(nav).render(chunks[4], buf);
    }
}

impl AdvisorScreen<'_> {
    fn render_header(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(Span::styled("GrowWise - Smart Crop Advisory System", Theme::title()))
            .borders(Borders::BOTTOM)
            .border_style(Theme::border());

        let para = Paragraph::new(Span::styled("Enter Field Conditions", Theme::dim())).block(block);
        para.render(area, buf);
    }

    fn render_form(&self, area: Rect, buf: &mut Buffer) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        // Temperature and pH on the left, humidity and rainfall on the right
        let layout = [
            (columns[0], [ConditionField::Temperature, ConditionField::Ph]),
            (columns[1], [ConditionField::Humidity, ConditionField::Rainfall]),
        ];

        for (column, fields) in layout {
            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(4), Constraint::Length(4)])
                .split(column);

            for (row, field) in rows.iter().zip(fields) {
                let focused = field == self.focused_field;
                condition_slider(field, self.conditions.get(field), focused).render(*row, buf);
            }
        }
    }

    fn render_result(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title("Recommendation")
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        let rec = match self.recommendation {
            Some(r) => r,
            None => {
                let para = Paragraph::new(Span::styled(
                    "Press Enter to predict the best crop",
                    Theme::dim(),
                ));
                para.render(inner, buf);
                return;
            }
        };

        let mut lines = vec![
            Line::from(vec![
                Span::styled("Recommended Crop: ", Theme::dim()),
                Span::styled(rec.display_crop(), Theme::highlight()),
            ]),
            Line::from(vec![
                Span::styled("Fertilizer Advice: ", Theme::dim()),
                Span::styled(rec.advice.as_str(), Theme::success()),
            ]),
            Line::from(vec![
                Span::styled("Conditions: ", Theme::dim()),
                Span::styled(
                    format!(
                        "{:.0}°C, {:.0}% humidity, pH {:.1}, {:.0} mm rain",
                        rec.conditions.temperature,
                        rec.conditions.humidity,
                        rec.conditions.ph,
                        rec.conditions.rainfall
                    ),
                    Theme::normal(),
                ),
            ]),
        ];

        if self.stale {
            lines.push(Line::from(vec![]));
            lines.push(Line::from(vec![Span::styled(
                "Conditions changed since this prediction - press Enter to update",
                Theme::warning(),
            )]));
        }

        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }
}
