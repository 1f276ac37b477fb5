//! Tracing subscriber setup.
//!
//! The library crates only emit events and spans; this is the one place a
//! subscriber is installed. Events go to stderr so stdout stays clean for
//! command output such as `completions` and `config get`.
//!
//! `-q` keeps errors only, no flag keeps warnings, and each `-v` adds a level
//! up to trace. A set `RUST_LOG` replaces the computed filter entirely.

use std::io::IsTerminal as _;

use tracing_subscriber::{EnvFilter, filter::LevelFilter};

use crate::cli::GlobalArgs;

/// Crates whose events pass the verbosity filter.
const CRATES: [&str; 3] = ["modforge", "modforge_core", "modforge_adapters"];

pub fn init_logging(args: &GlobalArgs) -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(from_env) => from_env,
        Err(_) => EnvFilter::try_new(directives(level_for(args)))?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(!args.no_color && std::io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .try_init()
        .map_err(|e| anyhow::anyhow!("tracing subscriber already set: {e}"))
}

fn level_for(args: &GlobalArgs) -> LevelFilter {
    if args.quiet {
        return LevelFilter::ERROR;
    }
    [LevelFilter::WARN, LevelFilter::INFO, LevelFilter::DEBUG]
        .get(usize::from(args.verbose))
        .copied()
        .unwrap_or(LevelFilter::TRACE)
}

/// `crate=level` for each of our crates; dependencies stay silent.
fn directives(level: LevelFilter) -> String {
    let level = level.to_string().to_lowercase();
    CRATES
        .map(|krate| format!("{krate}={level}"))
        .join(",")
}
