//! Log sink that feeds the history panel.
//!
//! While the TUI owns the terminal, anything written to stderr would land on
//! top of the alternate screen. The application installs its tracing writer
//! with a [`LogForwarder`] instead, and each formatted event becomes a
//! [`TuiMessage::Log`].

use std::io;

use crossbeam_channel::Sender;

use crate::history::LOG_PREFIX;
use crate::messages::TuiMessage;

/// `io::Write` sink turning formatted log output into history lines.
#[derive(Debug, Clone)]
pub struct LogForwarder {
    tx: Sender<TuiMessage>,
}

impl LogForwarder {
    #[must_use]
    pub fn new(tx: Sender<TuiMessage>) -> Self {
        Self { tx }
    }
}

impl io::Write for LogForwarder {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let text = String::from_utf8_lossy(buf);
        for line in text.lines().map(str::trim_end).filter(|l| !l.is_empty()) {
            // A closed channel means the TUI is gone; drop the line.
            let _ = self.tx.try_send(TuiMessage::Log(format!("{LOG_PREFIX}{line}")));
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
