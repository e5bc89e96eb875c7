use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

pub struct InputWidget<'a> {
    label: &'a str,
    value: &'a str,
    placeholder: &'a str,
    focused: bool,
}

impl<'a> InputWidget<'a> {
    pub fn new(label: &'a str, value: &'a str) -> Self {
        Self {
            label,
            value,
            placeholder: "",
            focused: false,
        }
    }

    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = placeholder;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Tail of the value that fits in `width` columns, leaving room for the cursor.
    fn visible_tail(&self, width: usize) -> &'a str {
        let max = width.saturating_sub(1);
        let len = self.value.chars().count();
        if len <= max {
            return self.value;
        }
        let skip = len - max;
        match self.value.char_indices().nth(skip) {
            Some((idx, _)) => &self.value[idx..],
            None => "",
        }
    }
}

impl Widget for InputWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            Theme::border_focused()
        } else {
            Theme::border()
        };

        let block = Block::default()
            .title(self.label)
            .borders(Borders::ALL)
            .border_style(border_style);

        let inner = block.inner(area);
        block.render(area, buf);

        let line = if self.value.is_empty() && !self.focused {
            Line::from(Span::styled(self.placeholder, Theme::dim()))
        } else if self.focused {
            // Show cursor
            let visible = self.visible_tail(inner.width as usize);
            let mut spans = vec![Span::raw(visible), Span::styled(" ", Theme::selected())];
            if self.value.is_empty() {
                spans.push(Span::styled(self.placeholder, Theme::dim()));
            }
            Line::from(spans)
        } else {
            Line::from(Span::raw(self.visible_tail(inner.width as usize + 1)))
        };

        Paragraph::new(line).render(inner, buf);
    }
}
