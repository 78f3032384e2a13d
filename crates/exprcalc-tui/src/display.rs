//! Expression input and result panels.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::styles::ColorTheme;

/// What the result panel currently shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ResultLine {
    #[default]
    Empty,
    /// Waiting for the presenter.
    Pending,
    Value(String),
    Error(String),
}

/// Render the expression being typed, with a trailing cursor.
pub fn render_input(frame: &mut Frame, area: Rect, input: &str, theme: &ColorTheme) {
    let text = Line::from(vec![
        Span::styled("> ", theme.muted_style()),
        Span::raw(input.to_string()),
        Span::styled("_", theme.header_style()),
    ]);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Expression ")
        .border_style(theme.border_style());
    frame.render_widget(Paragraph::new(text).block(block), area);
}

/// Render the result panel.
pub fn render_result(frame: &mut Frame, area: Rect, result: &ResultLine, theme: &ColorTheme) {
    let span = match result {
        ResultLine::Empty => Span::raw(""),
        ResultLine::Pending => Span::styled("...", theme.muted_style()),
        ResultLine::Value(v) => Span::styled(v.clone(), theme.result_style()),
        ResultLine::Error(e) => Span::styled(e.clone(), theme.error_style()),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Result ")
        .border_style(theme.border_style());
    frame.render_widget(Paragraph::new(Line::from(span)).block(block), area);
}
