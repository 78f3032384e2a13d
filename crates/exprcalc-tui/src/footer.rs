//! TUI footer panel.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::styles::ColorTheme;

/// Render the footer panel with keyboard shortcuts.
pub fn render_footer(frame: &mut Frame, area: Rect, theme: &ColorTheme) {
    let keys = theme.key_style();
    let text = vec![Line::from(vec![
        Span::styled("Enter/=", keys),
        Span::raw(": evaluate | "),
        Span::styled("Backspace", keys),
        Span::raw(": delete | "),
        Span::styled("Ctrl+U", keys),
        Span::raw(": clear | "),
        Span::styled("\u{2191}\u{2193}", keys),
        Span::raw(": history | "),
        Span::styled("Esc", keys),
        Span::raw(": quit"),
    ])];

    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(theme.border_style());
    let paragraph = Paragraph::new(text).block(block);
    frame.render_widget(paragraph, area);
}
