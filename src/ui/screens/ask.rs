use crate::models::ChatExchange;
use crate::ui::components::InputWidget;
use crate::ui::{nav_bar, Theme};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

pub struct AskScreen<'a> {
    pub input: &'a str,
    pub history: &'a [ChatExchange],
}

impl<'a> AskScreen<'a> {
    pub fn new(input: &'a str, history: &'a [ChatExchange]) -> Self {
        Self { input, history }
    }
}

impl Widget for AskScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title
                Constraint::Length(3), // Input
                Constraint::Min(6),    // Transcript
                Constraint::Length(1), // Nav
            ])
            .split(area);

        let title = Line::from(vec![
            Span::styled("Ask Farming Questions", Theme::title()),
            Span::styled(" - rule-based assistant", Theme::dim()),
        ]);
        Paragraph::new(title).render(chunks[0], buf);

        InputWidget::new("Type your question here", self.input)
            .placeholder("e.g. which crops suit acidic soil?")
            .focused(true)
            .render(chunks[1], buf);

        self.render_transcript(chunks[2], buf);

        let nav = nav_bar(&[("Enter", "Ask"), ("Esc", "Back"), ("Ctrl+C", "Quit")]);
        Paragraph::new(nav).render(chunks[3], buf);
    }
}

impl AskScreen<'_> {
    fn render_transcript(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title("Conversation")
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        if self.history.is_empty() {
            let para = Paragraph::new(Span::styled(
                "Ask about rainfall, humidity, soil pH or temperature",
                Theme::dim(),
            ));
            para.render(inner, buf);
            return;
        }

        let mut lines = Vec::new();
        for exchange in self.history {
            lines.push(Line::from(vec![
                Span::styled(exchange.asked_at.format("%H:%M ").to_string(), Theme::dim()),
                Span::styled("You: ", Theme::header()),
                Span::styled(exchange.query.as_str(), Theme::normal()),
            ]));

            let style = if exchange.answered_by_rule() {
                Theme::success()
            } else {
                Theme::warning()
            };
            lines.push(Line::from(vec![
                Span::styled("      Bot: ", Theme::highlight()),
                Span::styled(exchange.response.as_str(), style),
            ]));
            lines.push(Line::from(vec![]));
        }

        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .render(inner, buf);
    }
}
