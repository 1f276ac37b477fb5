//! Terminal output for the commands.
//!
//! Everything goes to stdout through a [`console::Term`]. With `--quiet` all of
//! it is dropped; errors are printed separately by `main`.

use std::io::{self, IsTerminal as _};
use std::time::Duration;

use console::Term;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::{OwoColorize, Style};

use crate::cli::GlobalArgs;
use crate::config::AppConfig;

/// Kind of status line, each with its own mark and colour.
#[derive(Debug, Clone, Copy)]
enum Tone {
    Success,
    Warning,
    Info,
}

impl Tone {
    fn mark(self) -> &'static str {
        match self {
            Tone::Success => "\u{2713}",
            Tone::Warning => "!",
            Tone::Info => "\u{203a}",
        }
    }

    fn style(self) -> Style {
        let base = Style::new().bold();
        match self {
            Tone::Success => base.green(),
            Tone::Warning => base.yellow(),
            Tone::Info => base.blue(),
        }
    }
}

pub struct OutputManager {
    quiet: bool,
    no_color: bool,
    /// Spinners only make sense on a terminal.
    interactive: bool,
    term: Term,
}

impl OutputManager {
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        Self {
            quiet: args.quiet,
            no_color: args.no_color || config.output.no_color,
            interactive: io::stdout().is_terminal(),
            term: Term::stdout(),
        }
    }

    pub fn print(&self, msg: &str) -> io::Result<()> {
        self.emit(msg)
    }

    pub fn success(&self, msg: &str) -> io::Result<()> {
        self.status(Tone::Success, msg)
    }

    pub fn warning(&self, msg: &str) -> io::Result<()> {
        self.status(Tone::Warning, msg)
    }

    pub fn info(&self, msg: &str) -> io::Result<()> {
        self.status(Tone::Info, msg)
    }

    pub fn header(&self, text: &str) -> io::Result<()> {
        self.emit(&self.paint(text, Style::new().cyan().bold()))
    }

    /// A ticking spinner, or a hidden bar when nobody would see it.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.quiet || !self.interactive {
            return ProgressBar::hidden();
        }
        let style = ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        let bar = ProgressBar::new_spinner()
            .with_style(style)
            .with_message(msg.to_owned());
        bar.enable_steady_tick(Duration::from_millis(100));
        bar
    }

    pub fn supports_color(&self) -> bool {
        !self.no_color
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    fn status(&self, tone: Tone, msg: &str) -> io::Result<()> {
        self.emit(&format!("{} {msg}", self.paint(tone.mark(), tone.style())))
    }

    fn paint(&self, text: &str, style: Style) -> String {
        if self.no_color {
            text.to_owned()
        } else {
            text.style(style).to_string()
        }
    }

    fn emit(&self, line: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager(quiet: bool, no_color: bool) -> OutputManager {
        let args = GlobalArgs {
            quiet,
            no_color,
            ..GlobalArgs::default()
        };
        OutputManager::new(&args, &AppConfig::default())
    }

    #[test]
    fn quiet_drops_every_line() {
        let out = manager(true, true);
        assert!(out.is_quiet());
        assert!(out.print("hello").is_ok());
        assert!(out.success("done").is_ok());
        assert!(out.spinner("resolving").is_hidden());
    }

    #[test]
    fn plain_paint_is_untouched() {
        assert_eq!(manager(false, true).paint("x", Tone::Warning.style()), "x");
        assert_ne!(manager(false, false).paint("x", Tone::Warning.style()), "x");
    }

    #[test]
    fn config_can_turn_colour_off() {
        assert!(manager(false, false).supports_color());

        let mut config = AppConfig::default();
        config.output.no_color = true;
        assert!(!OutputManager::new(&GlobalArgs::default(), &config).supports_color());
    }
}
