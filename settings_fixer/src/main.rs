use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, info};

use settings_fixer::cli::Cli;
use settings_fixer::errors::display_error;
use settings_fixer::fixer;
use settings_fixer::tracing_init::init_tracing;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_file.as_deref());
    info!(args = ?std::env::args(), "claude-settings-fixer started");

    let options = cli.fix_options();
    match fixer::run(&options, std::io::stdin().lock(), std::io::stdout().lock()) {
        Ok(outcome) => {
            info!(?outcome, "finished");
            ExitCode::SUCCESS
        }
        Err(e) => {
            debug!(error = ?e, "fix failed");
            display_error(&e, cli.verbose);
            ExitCode::FAILURE
        }
    }
}
