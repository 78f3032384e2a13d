//! Application entry point and dispatch.

use std::io::{self, BufRead, IsTerminal};
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, warn};

use exprcalc_cli::output::{render_event, write_to_file, OutputFormat, Rendered};
use exprcalc_cli::{ui, CliSession, Evaluation, ViewEvent};
use exprcalc_core::constants::exit_codes;
use exprcalc_core::{ArithmeticCalculator, CalcError, CancellationToken, SyntaxValidator};
use exprcalc_orchestration::{AppSchedulers, EvaluateExpression, SchedulerProvider};
use exprcalc_tui::TuiApp;

use crate::config::AppConfig;
use crate::errors::{evaluation_code, worst};
use crate::logging;
use crate::version::full_version;

/// Run the application and return the process exit code.
pub fn run(config: &AppConfig) -> Result<i32> {
    // Handle shell completion
    if let Some(shell) = config.completion {
        let mut cmd = <AppConfig as clap::CommandFactory>::command();
        exprcalc_cli::completion::generate_completion(&mut cmd, shell, &mut io::stdout());
        return Ok(exit_codes::SUCCESS);
    }

    if config.tui {
        return run_tui(config);
    }

    // Logs go to stderr so stdout carries only results.
    logging::init(io::stderr, !ui::is_color_disabled());
    debug!(version = %full_version(), "starting");

    let expressions = if config.expressions.is_empty() && !io::stdin().is_terminal() {
        read_expressions(io::stdin().lock())?
    } else {
        config.expressions.clone()
    };
    run_cli(config, &expressions)
}

fn run_cli(config: &AppConfig, expressions: &[String]) -> Result<i32> {
    if expressions.is_empty() {
        return Err(CalcError::Config(
            "no expressions given; pass them as arguments, pipe them on stdin, or use --tui"
                .into(),
        )
        .into());
    }

    let timeout = config.timeout_duration()?;
    let cancel = CancellationToken::new();
    ctrlc_handler(cancel.clone());

    let session = CliSession::new(config.threads, config.calc_options(), timeout, cancel)?;
    let format = if config.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };

    let mut code = exit_codes::SUCCESS;
    let mut results = Vec::new();
    for expression in expressions {
        let evaluation = session.evaluate(expression);
        code = worst(code, evaluation_code(&evaluation));

        match evaluation {
            Evaluation::Event(event) => {
                match render_event(expression, &event, format) {
                    Rendered::Stdout(line) => {
                        if format == OutputFormat::Json {
                            println!("{line}");
                        } else {
                            ui::print_value(&line);
                        }
                        results.push(line);
                    }
                    Rendered::Stderr(line) if !config.quiet => {
                        if event == ViewEvent::Restart {
                            ui::print_error(&line);
                        } else {
                            ui::print_failure(&line);
                        }
                    }
                    Rendered::Stderr(_) => {}
                }
            }
            Evaluation::TimedOut => {
                if !config.quiet {
                    ui::print_error(&format!(
                        "evaluation of '{expression}' timed out after {}",
                        config.timeout
                    ));
                }
            }
            Evaluation::Canceled => {
                warn!("interrupted, skipping remaining expressions");
                break;
            }
        }
    }

    // Write to file if requested
    if let Some(ref path) = config.output {
        write_to_file(path, &results).with_context(|| format!("writing results to {path}"))?;
    }

    Ok(code)
}

fn run_tui(config: &AppConfig) -> Result<i32> {
    let schedulers = Arc::new(AppSchedulers::new(config.threads)?);
    let provider = Arc::clone(&schedulers) as Arc<dyn SchedulerProvider>;
    let eval = Arc::new(EvaluateExpression::new(
        Arc::new(ArithmeticCalculator::with_options(config.calc_options())),
        Arc::new(SyntaxValidator::new()),
        Arc::clone(&provider),
    ));

    let mut app = TuiApp::new(eval, provider, Arc::clone(schedulers.main_loop()));
    let forwarder = app.log_forwarder();
    logging::init(move || forwarder.clone(), false);
    debug!(version = %full_version(), "starting TUI");

    app.run().map_err(|e| anyhow::anyhow!("TUI error: {e}"))?;

    Ok(exit_codes::SUCCESS)
}

/// Read one expression per non-blank line.
fn read_expressions(input: impl BufRead) -> Result<Vec<String>> {
    let mut expressions = Vec::new();
    for line in input.lines() {
        let line = line.context("reading expressions from stdin")?;
        if !line.trim().is_empty() {
            expressions.push(line);
        }
    }
    Ok(expressions)
}

fn ctrlc_handler(cancel: CancellationToken) {
    if let Err(e) = ctrlc::set_handler(move || cancel.cancel()) {
        warn!(error = %e, "could not install Ctrl+C handler");
    }
}
