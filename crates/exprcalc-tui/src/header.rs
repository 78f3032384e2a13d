//! TUI header panel.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::styles::ColorTheme;

/// Render the header panel.
pub fn render_header(frame: &mut Frame, area: Rect, evaluations: u64, theme: &ColorTheme) {
    let text = vec![Line::from(vec![
        Span::styled("exprcalc", theme.header_style()),
        Span::raw(format!(" | evaluations: {evaluations}")),
    ])];

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(theme.border_style());

    let paragraph = Paragraph::new(text).block(block);
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    #[test]
    fn render_header_shows_count() {
        let backend = TestBackend::new(60, 3);
        let mut terminal = Terminal::new(backend).unwrap();
        let buf = terminal
            .draw(|frame| {
                let area = frame.area();
                render_header(frame, area, 7, &ColorTheme::default());
            })
            .unwrap();

        let content: String = (0..buf.area.width)
            .map(|x| buf.buffer[(x, 0)].symbol().to_string())
            .collect();
        assert!(content.contains("exprcalc"));
        assert!(content.contains("evaluations: 7"));
    }
}
