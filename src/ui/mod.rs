pub mod components;
pub mod screens;
pub mod theme;

pub use theme::Theme;

use ratatui::text::{Line, Span};

/// Bottom navigation bar: `[key]Label` pairs.
pub fn nav_bar(entries: &[(&str, &str)]) -> Line<'static> {
    let spans: Vec<Span<'static>> = entries
        .iter()
        .flat_map(|(key, label)| {
            [
                Span::styled(format!("[{}]", key), Theme::nav_key()),
                Span::styled(format!("{} ", label), Theme::nav_label()),
            ]
        })
        .collect();
    Line::from(spans)
}
