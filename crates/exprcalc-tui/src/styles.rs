//! TUI styles and color themes.

use ratatui::style::{Color, Modifier, Style};

/// Color theme for the TUI.
#[derive(Debug, Clone, Copy)]
pub struct ColorTheme {
    pub primary: Color,
    pub success: Color,
    pub error: Color,
    pub warning: Color,
    pub muted: Color,
    pub border: Color,
}

impl Default for ColorTheme {
    fn default() -> Self {
        Self {
            primary: Color::Cyan,
            success: Color::Green,
            error: Color::Red,
            warning: Color::Yellow,
            muted: Color::DarkGray,
            border: Color::Gray,
        }
    }
}

impl ColorTheme {
    #[must_use]
    pub fn header_style(&self) -> Style {
        Style::default()
            .fg(self.primary)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn key_style(&self) -> Style {
        Style::default().fg(self.warning)
    }

    #[must_use]
    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.muted)
    }

    /// Style for a computed value.
    #[must_use]
    pub fn result_style(&self) -> Style {
        Style::default()
            .fg(self.success)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error)
    }

    #[must_use]
    pub fn warning_style(&self) -> Style {
        Style::default().fg(self.warning)
    }

    #[must_use]
    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_theme_distinguishes_outcomes() {
        let theme = ColorTheme::default();
        assert_ne!(theme.result_style(), theme.error_style());
        assert_eq!(theme.result_style().fg, Some(Color::Green));
        assert_eq!(theme.error_style().fg, Some(Color::Red));
    }
}
