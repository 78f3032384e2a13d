//! exprcalc: arithmetic expression calculator.

use exprcalc_cli::ui;
use exprcalc_lib::{app, config, errors};

fn main() {
    let config = config::AppConfig::parse();
    let code = match app::run(&config) {
        Ok(code) => code,
        Err(err) => {
            ui::print_error(&format!("{err:#}"));
            errors::exit_code(&err)
        }
    };
    std::process::exit(code);
}
