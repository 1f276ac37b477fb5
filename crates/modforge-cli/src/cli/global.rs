//! Flags shared by every subcommand, flattened into [`super::Cli`].

use std::path::PathBuf;

use clap::{ArgAction, Args, builder::FalseyValueParser};

#[derive(Debug, Clone, Default, Args)]
pub struct GlobalArgs {
    /// More log output: -v info, -vv debug, -vvv trace
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only print errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Plain output without ANSI colours
    ///
    /// Any `NO_COLOR` value other than a false-ish one (`0`, `false`, `no`,
    /// `off`) turns colours off, see <https://no-color.org>.
    #[arg(
        long,
        global = true,
        env = "NO_COLOR",
        value_parser = FalseyValueParser::new()
    )]
    pub no_color: bool,

    /// Read configuration from FILE instead of the per-user location
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}
