//! CLI output formatting.

use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;

use exprcalc_core::OutcomeModel;

use crate::view::ViewEvent;

/// How results are rendered on stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// One rendered line and the stream it belongs on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    Stdout(String),
    Stderr(String),
}

#[derive(Serialize)]
struct JsonLine<'a> {
    expression: &'a str,
    #[serde(flatten)]
    outcome: &'a OutcomeModel,
}

/// Render the view command produced for `expression`.
///
/// Text mode prints the bare display value on stdout and the handled error
/// message on stderr. JSON mode prints every outcome on stdout. A restart
/// has no outcome and is always reported on stderr.
#[must_use]
pub fn render_event(expression: &str, event: &ViewEvent, format: OutputFormat) -> Rendered {
    let Some(outcome) = event.outcome() else {
        return Rendered::Stderr(format!(
            "evaluation of '{expression}' failed unexpectedly"
        ));
    };
    match format {
        OutputFormat::Json => Rendered::Stdout(format_json(expression, &outcome)),
        OutputFormat::Text if outcome.is_success() => {
            Rendered::Stdout(outcome.display().to_string())
        }
        OutputFormat::Text => Rendered::Stderr(outcome.display().to_string()),
    }
}

/// Format an outcome as a single JSON object.
#[must_use]
pub fn format_json(expression: &str, outcome: &OutcomeModel) -> String {
    let line = JsonLine {
        expression,
        outcome,
    };
    // Serializing plain strings cannot fail.
    serde_json::to_string(&line).unwrap_or_default()
}

/// Write result lines to a file, one per line.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be created or written.
pub fn write_to_file(path: impl AsRef<Path>, lines: &[String]) -> io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    for line in lines {
        writeln!(file, "{line}")?;
    }
    Ok(())
}
