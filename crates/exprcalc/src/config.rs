//! Application configuration from CLI flags and environment.

use std::time::Duration;

use clap::Parser;

use exprcalc_core::constants::DEFAULT_PRECISION;
use exprcalc_core::{CalcError, CalcOptions};

/// exprcalc: evaluate arithmetic expressions.
#[derive(Parser, Debug)]
#[command(name = "exprcalc", version, about)]
pub struct AppConfig {
    /// Expressions to evaluate. Read from stdin, one per line, when omitted.
    pub expressions: Vec<String>,

    /// Launch the interactive TUI.
    #[arg(long)]
    pub tui: bool,

    /// Print one JSON object per expression.
    #[arg(long)]
    pub json: bool,

    /// Quiet mode (no diagnostics on stderr, exit code only).
    #[arg(short, long)]
    pub quiet: bool,

    /// Also write result lines to this file.
    #[arg(short, long)]
    pub output: Option<String>,

    /// Computation threads (0 = one per core).
    #[arg(long, default_value = "0", env = "EXPRCALC_THREADS")]
    pub threads: usize,

    /// Maximum fractional digits in results.
    #[arg(long, default_value_t = DEFAULT_PRECISION, env = "EXPRCALC_PRECISION")]
    pub precision: usize,

    /// Per-expression timeout (e.g., "500ms", "5s", "1m").
    #[arg(long, default_value = "5s")]
    pub timeout: String,

    /// Generate shell completion.
    #[arg(long, value_enum)]
    pub completion: Option<clap_complete::Shell>,
}

impl AppConfig {
    /// Parse CLI arguments.
    #[must_use]
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Parse the timeout flag.
    pub fn timeout_duration(&self) -> Result<Duration, CalcError> {
        parse_duration(&self.timeout)
            .ok_or_else(|| CalcError::Config(format!("invalid timeout '{}'", self.timeout)))
    }

    /// Calculator options, clamped to supported values.
    #[must_use]
    pub fn calc_options(&self) -> CalcOptions {
        CalcOptions {
            precision: self.precision,
        }
        .normalize()
    }
}

/// Parse a duration string like "500ms", "30s", "5m", "1h". Bare numbers are seconds.
fn parse_duration(s: &str) -> Option<Duration> {
    let s = s.trim();
    if let Some(ms) = s.strip_suffix("ms") {
        let n: u64 = ms.parse().ok()?;
        Some(Duration::from_millis(n))
    } else if let Some(secs) = s.strip_suffix('s') {
        let n: u64 = secs.parse().ok()?;
        Some(Duration::from_secs(n))
    } else if let Some(mins) = s.strip_suffix('m') {
        let n: u64 = mins.parse().ok()?;
        Some(Duration::from_secs(n.checked_mul(60)?))
    } else if let Some(hours) = s.strip_suffix('h') {
        let n: u64 = hours.parse().ok()?;
        Some(Duration::from_secs(n.checked_mul(3600)?))
    } else {
        let n: u64 = s.parse().ok()?;
        Some(Duration::from_secs(n))
    }
}
