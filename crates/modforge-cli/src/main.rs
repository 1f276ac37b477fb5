//! `modforge`: scaffold a Node.js module from a handful of answers.
//!
//! Exit status is 0 on success, 2 for bad input, 3 when something looked up
//! does not exist, 4 for configuration problems and 1 for everything else.

use std::io::IsTerminal as _;
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, instrument};

use crate::{
    cli::{Cli, Commands},
    config::AppConfig,
    error::{CliError, CliResult},
    logging::init_logging,
    output::OutputManager,
};

mod cli;
mod collector;
mod commands;
mod config;
mod error;
mod logging;
mod output;

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env is the normal case.
    dotenvy::dotenv().ok();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // Also the path for --help and --version, which exit 0.
        Err(e) => {
            e.print().ok();
            return ExitCode::from(u8::try_from(e.exit_code()).unwrap_or(1));
        }
    };

    if let Err(e) = init_logging(&cli.global) {
        eprintln!("modforge: {e}");
        return ExitCode::FAILURE;
    }
    debug!(global = ?cli.global, "arguments parsed");

    let verbose = cli.global.verbose > 0;
    let config = match AppConfig::load(cli.global.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            let err = CliError::config("Failed to load configuration", e);
            return report(&err, verbose, !cli.global.no_color);
        }
    };

    let output = OutputManager::new(&cli.global, &config);
    let color = output.supports_color();

    match dispatch(cli, config, output).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report(&err, verbose, color),
    }
}

#[instrument(skip_all, name = "command")]
async fn dispatch(cli: Cli, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let Cli { command, global } = cli;
    match command {
        Commands::New(args) => commands::new::execute(args, global, config, output).await,
        Commands::Init(args) => commands::init::execute(args, global, output),
        Commands::Completions(args) => commands::completions::execute(args),
        Commands::Config(args) => commands::config::execute(args, global, config, output),
    }
}

/// Print `err` to stderr and turn it into the process exit status.
fn report(err: &CliError, verbose: bool, color: bool) -> ExitCode {
    err.log();
    eprint!("{}", err.render(verbose, color && std::io::stderr().is_terminal()));
    ExitCode::from(err.exit_code())
}
