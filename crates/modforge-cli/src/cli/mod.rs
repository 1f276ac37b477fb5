//! Command line surface of `modforge`, declared with clap's derive API.
//!
//! Parsed values are handed to `commands::*` untouched; turning them into
//! answers happens in the collector.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use modforge_core::domain::Language;

pub mod global;
pub use global::GlobalArgs;

#[derive(Debug, Parser)]
#[command(
    name    = "modforge",
    bin_name = "modforge",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Scaffold a Node.js module",
    long_about = "Modforge asks a few questions and writes a ready-to-publish \
                  Node.js module: package.json with up-to-date dependency \
                  ranges, lint and test setup, optional Babel build and CI.",
    after_help = "EXAMPLES:\n\
        \x20 modforge new                       # interactive, current directory\n\
        \x20 modforge new node-left-pad --yes --username octocat\n\
        \x20 modforge new . --lang babel --experimental --no-travis --no-repo --yes\n\
        \x20 modforge completions bash > /usr/share/bash-completion/completions/modforge",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Scaffold a module into a directory.
    #[command(
        visible_alias = "n",
        about = "Scaffold a new module",
        after_help = "EXAMPLES:\n\
            \x20 modforge new\n\
            \x20 modforge new my-lib --lang js --username octocat --yes\n\
            \x20 modforge new my-lib --lang babel-node4 --offline --skip-install --yes\n\
            \x20 modforge new my-lib --dry-run --yes --no-travis --no-repo"
    )]
    New(NewArgs),

    /// Initialise a Modforge configuration file.
    #[command(
        about = "Write a default config file",
        after_help = "EXAMPLES:\n\
            \x20 modforge init\n\
            \x20 modforge init --force"
    )]
    Init(InitArgs),

    /// Print a completion script to stdout.
    #[command(
        about = "Print a shell completion script",
        after_help = "EXAMPLES:\n\
            \x20 modforge completions bash > ~/.local/share/bash-completion/completions/modforge\n\
            \x20 modforge completions zsh  > ~/.zfunc/_modforge\n\
            \x20 modforge completions fish > ~/.config/fish/completions/modforge.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the Modforge configuration.
    #[command(
        about = "Inspect the configuration",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 modforge config get defaults.username\n\
            \x20 modforge config list\n\
            \x20 modforge config path"
    )]
    Config(ConfigCommands),
}

/// Arguments for `modforge new`.
///
/// Every answer has a flag. Flags win over configured defaults; with
/// `--yes` nothing is prompted and unanswered questions take their default.
#[derive(Debug, Default, Args)]
pub struct NewArgs {
    /// Destination directory, created if missing.
    #[arg(value_name = "DIR", default_value = ".", help = "Destination directory")]
    pub dir: PathBuf,

    /// Module name; normalised to kebab-case.
    #[arg(short = 'n', long = "name", value_name = "NAME", help = "Module name")]
    pub name: Option<String>,

    #[arg(
        short = 'd',
        long = "description",
        value_name = "TEXT",
        help = "One-line description"
    )]
    pub description: Option<String>,

    #[arg(short = 'a', long = "author", value_name = "NAME", help = "Author name")]
    pub author: Option<String>,

    #[arg(
        short = 'l',
        long = "lang",
        value_name = "LANGUAGE",
        value_enum,
        help = "Source language"
    )]
    pub language: Option<LanguageArg>,

    /// Enable stage-0 syntax (Babel only).
    #[arg(long = "experimental", help = "Enable experimental syntax (Babel only)")]
    pub experimental: bool,

    /// Publish `src/` alongside `lib/` (Babel only).
    #[arg(long = "publish-source", help = "Publish the source directory (Babel only)")]
    pub publish_source: bool,

    /// Commit the compiled `lib/` directory (Babel only).
    #[arg(
        long = "checkin-compiled",
        help = "Check the compiled output into git (Babel only)"
    )]
    pub checkin_compiled: bool,

    #[arg(long = "no-travis", help = "Do not set up Travis CI")]
    pub no_travis: bool,

    #[arg(long = "no-repo", help = "Do not add a repository field")]
    pub no_repo: bool,

    /// GitHub username; needed for Travis CI or the repository field.
    #[arg(short = 'u', long = "username", value_name = "LOGIN", help = "GitHub username")]
    pub username: Option<String>,

    /// Answer every question with its flag, configured or built-in default.
    #[arg(short = 'y', long = "yes", help = "Do not prompt; use flags and defaults")]
    pub yes: bool,

    /// Use the built-in version table instead of the npm registry.
    #[arg(long = "offline", help = "Do not contact the npm registry or GitHub")]
    pub offline: bool,

    /// Print the files that would be written and stop.
    #[arg(long = "dry-run", help = "Show what would be written without writing")]
    pub dry_run: bool,

    /// Do not run `npm install` afterwards.
    #[arg(long = "skip-install", help = "Skip npm install")]
    pub skip_install: bool,

    /// Template override directory.
    #[arg(long = "templates", value_name = "DIR", help = "Template override directory")]
    pub templates: Option<PathBuf>,

    /// npm registry base URL.
    #[arg(long = "registry", value_name = "URL", help = "npm registry URL")]
    pub registry: Option<String>,
}

/// `--lang` values; the names match the answers of the interactive prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LanguageArg {
    /// Plain JavaScript.
    #[value(name = "js", alias = "javascript")]
    Js,
    /// ES2015+ compiled with Babel.
    #[value(name = "babel")]
    Babel,
    /// ES2015+ compiled with Babel for Node 4.
    #[value(name = "babel-node4")]
    BabelNode4,
}

impl From<LanguageArg> for Language {
    fn from(arg: LanguageArg) -> Self {
        match arg {
            LanguageArg::Js => Language::Plain,
            LanguageArg::Babel => Language::Compiled,
            LanguageArg::BabelNode4 => Language::CompiledLegacyRuntime,
        }
    }
}

/// Arguments for `modforge init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    #[arg(short = 'f', long = "force", help = "Replace an existing config file")]
    pub force: bool,
}

/// Arguments for `modforge completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    #[arg(value_enum, help = "Shell to write the script for")]
    pub shell: Shell,
}

/// Shells clap_complete can write a script for.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

/// Subcommands for `modforge config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print one value, addressed as `section.key`.
    Get {
        /// Dotted key path, e.g. `defaults.username`.
        key: String,
    },
    /// Dump the effective configuration as TOML.
    List,
    /// Print the path to the configuration file.
    Path,
}
