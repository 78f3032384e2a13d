//! Scrollable evaluation history.

use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, List, ListItem};
use ratatui::Frame;

use crate::styles::ColorTheme;

/// Prefix of a submitted expression line.
pub const INPUT_PREFIX: &str = "> ";
/// Prefix of a computed value line.
pub const RESULT_PREFIX: &str = "= ";
pub const ERROR_PREFIX: &str = "[ERROR] ";
pub const WARN_PREFIX: &str = "[WARN] ";
/// Prefix of a forwarded log line.
pub const LOG_PREFIX: &str = "[LOG] ";

/// Most lines kept in the history.
pub const HISTORY_LIMIT: usize = 500;

/// Scroll state for the history panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryScroll {
    /// First visible line.
    pub offset: usize,
    /// Follow new lines.
    pub follow: bool,
}

impl HistoryScroll {
    #[must_use]
    pub fn new() -> Self {
        Self {
            offset: 0,
            follow: true,
        }
    }

    /// A line was appended; `total` is the new length.
    pub fn on_append(&mut self, total: usize) {
        if self.follow {
            self.offset = total.saturating_sub(1);
        }
    }

    /// The oldest line was evicted.
    pub fn on_evict(&mut self) {
        self.offset = self.offset.saturating_sub(1);
    }

    pub fn up(&mut self, lines: usize) {
        self.follow = false;
        self.offset = self.offset.saturating_sub(lines);
    }

    /// Scrolling back to the last line resumes following.
    pub fn down(&mut self, lines: usize, total: usize) {
        let last = total.saturating_sub(1);
        self.offset = (self.offset + lines).min(last);
        if self.offset >= last {
            self.follow = true;
        }
    }

    pub fn home(&mut self) {
        self.follow = false;
        self.offset = 0;
    }

    pub fn end(&mut self, total: usize) {
        self.follow = true;
        self.offset = total.saturating_sub(1);
    }
}

impl Default for HistoryScroll {
    fn default() -> Self {
        Self::new()
    }
}

/// Render the history panel starting at `offset`.
pub fn render_history(
    frame: &mut Frame,
    area: Rect,
    lines: &[String],
    offset: usize,
    theme: &ColorTheme,
) {
    let visible_height = usize::from(area.height.saturating_sub(2));
    let total = lines.len();
    // Keep the last page full when following the tail.
    let start = offset.min(total.saturating_sub(visible_height));

    let items: Vec<ListItem> = lines
        .iter()
        .skip(start)
        .take(visible_height)
        .map(|line| {
            let style = if line.starts_with(ERROR_PREFIX) {
                theme.error_style()
            } else if line.starts_with(WARN_PREFIX) || line.starts_with(LOG_PREFIX) {
                theme.warning_style()
            } else if line.starts_with(RESULT_PREFIX) {
                theme.result_style()
            } else {
                theme.muted_style()
            };
            ListItem::new(Line::raw(line.as_str())).style(style)
        })
        .collect();

    let title = if total > visible_height {
        let pct = (start * 100) / total.saturating_sub(visible_height).max(1);
        format!(" History ({pct}%) ")
    } else {
        " History ".to_string()
    };

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(theme.border_style()),
    );

    frame.render_widget(list, area);
}
