//! Answer collection.
//!
//! Each question starts from a suggestion built from, in order: the flag,
//! the configured default, then a derived default (directory name, git user
//! name, GitHub lookup). With `--yes` the suggestions are the answers;
//! otherwise they become prompt defaults.

use std::path::Path;

use tracing::{debug, instrument};

use modforge_core::{
    application::IdentityService,
    domain::{AnswerRecord, DEFAULT_DESCRIPTION, Language, ModuleName},
};

use crate::{
    cli::NewArgs,
    config::AppConfig,
    error::{CliError, CliResult},
};

/// Starting point for every question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestions {
    pub name: Option<String>,
    pub description: String,
    pub author: String,
    pub language: Language,
    pub experimental: bool,
    pub publish_source: bool,
    pub checkin_compiled: bool,
    pub use_travis_ci: bool,
    pub add_repo: bool,
    /// Flag or configured value; looked up lazily otherwise.
    pub username: Option<String>,
}

impl Suggestions {
    /// Suggestions that need no I/O beyond the destination path.
    pub fn from_sources(args: &NewArgs, config: &AppConfig, destination: &Path) -> CliResult<Self> {
        let language = match (args.language, config.defaults.language.as_deref()) {
            (Some(flag), _) => flag.into(),
            (None, Some(configured)) => configured.parse().map_err(|e| {
                CliError::config(format!("defaults.language = '{configured}'"), e)
            })?,
            (None, None) => Language::default(),
        };

        let name = args.name.clone().or_else(|| {
            std::path::absolute(destination)
                .ok()
                .and_then(|dir| ModuleName::suggest_from_dir(&dir))
                .map(|name| name.as_str().to_string())
        });

        Ok(Self {
            name,
            description: args
                .description
                .clone()
                .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
            author: args
                .author
                .clone()
                .or_else(|| config.defaults.author.clone())
                .unwrap_or_default(),
            language,
            experimental: args.experimental,
            publish_source: args.publish_source,
            checkin_compiled: args.checkin_compiled,
            use_travis_ci: !args.no_travis && config.defaults.use_travis_ci,
            add_repo: !args.no_repo && config.defaults.add_repo,
            username: args
                .username
                .clone()
                .or_else(|| config.defaults.username.clone())
                .filter(|u| !u.trim().is_empty()),
        })
    }

    pub fn needs_username(&self) -> bool {
        self.use_travis_ci || self.add_repo
    }

    /// Fill the identity-backed suggestions.
    ///
    /// The GitHub lookup only runs when a username is needed and none was
    /// given; `lookup_username` is false for offline runs.
    pub async fn with_identity(mut self, identity: &IdentityService, lookup_username: bool) -> Self {
        if self.author.is_empty() {
            if let Some(author) = identity.default_author().await {
                self.author = author;
            }
        }
        if self.username.is_none() && self.needs_username() && lookup_username {
            let found = identity.default_username().await;
            self.username = (!found.is_empty()).then_some(found);
        }
        self
    }

    /// Build the record from the suggestions as they stand.
    pub fn into_answers(self) -> CliResult<AnswerRecord> {
        let name = self.name.ok_or_else(|| CliError::InvalidInput {
            message: "no module name could be derived from the directory; pass --name".into(),
        })?;

        let mut builder = AnswerRecord::builder()
            .name(&name)?
            .description(self.description)
            .author(self.author)
            .language(self.language)
            .experimental(self.experimental)
            .publish_source(self.publish_source)
            .checkin_compiled(self.checkin_compiled)
            .use_travis_ci(self.use_travis_ci)
            .add_repo(self.add_repo);
        if let Some(username) = self.username {
            builder = builder.username(username);
        }
        Ok(builder.build()?)
    }
}

/// Outcome of collection.
#[derive(Debug)]
pub struct Collected {
    pub answers: AnswerRecord,
    /// The username was typed at a prompt.
    pub prompted_username: bool,
}

/// Collect the answers for `modforge new`.
#[instrument(skip_all, fields(destination = %destination.display()))]
pub async fn collect(
    args: &NewArgs,
    config: &AppConfig,
    identity: &IdentityService,
    destination: &Path,
) -> CliResult<Collected> {
    let lookup_username = !(args.offline || config.registry.offline);
    let suggestions = Suggestions::from_sources(args, config, destination)?
        .with_identity(identity, lookup_username)
        .await;
    debug!(?suggestions, "answer suggestions");

    if args.yes {
        return Ok(Collected {
            answers: suggestions.into_answers()?,
            prompted_username: false,
        });
    }

    prompt::ask(suggestions)
}

#[cfg(feature = "interactive")]
mod prompt {
    use dialoguer::{Confirm, Input, Select, theme::ColorfulTheme};

    use modforge_core::domain::{GithubUsername, Language, ModuleName};

    use super::{Collected, Suggestions};
    use crate::error::CliResult;

    /// Prompt in the fixed question order, starting from `s`.
    pub(super) fn ask(mut s: Suggestions) -> CliResult<Collected> {
        let theme = ColorfulTheme::default();

        let mut name = Input::<String>::with_theme(&theme).with_prompt("Module name");
        if let Some(default) = s.name.take() {
            name = name.default(default);
        }
        s.name = Some(
            name.validate_with(|input: &String| -> Result<(), String> {
                ModuleName::parse(input).map(|_| ()).map_err(|e| e.to_string())
            })
            .interact_text()?,
        );

        s.description = Input::with_theme(&theme)
            .with_prompt("Description")
            .default(s.description)
            .interact_text()?;

        s.author = Input::with_theme(&theme)
            .with_prompt("Author's name")
            .default(s.author)
            .allow_empty(true)
            .interact_text()?;

        let labels: Vec<&str> = Language::ALL.iter().map(|l| l.label()).collect();
        let current = Language::ALL
            .iter()
            .position(|l| *l == s.language)
            .unwrap_or_default();
        s.language = Language::ALL[Select::with_theme(&theme)
            .with_prompt("Language")
            .items(&labels)
            .default(current)
            .interact()?];

        if s.language.is_compiled() {
            s.experimental = confirm(&theme, "Enable experimental syntax (stage-0)?", s.experimental)?;
            s.publish_source = confirm(&theme, "Publish the source directory?", s.publish_source)?;
            s.checkin_compiled =
                confirm(&theme, "Check the compiled output into git?", s.checkin_compiled)?;
        }

        s.use_travis_ci = confirm(&theme, "Use Travis CI?", s.use_travis_ci)?;
        s.add_repo = confirm(&theme, "Add a repository field?", s.add_repo)?;

        let mut prompted_username = false;
        if s.needs_username() {
            let mut input = Input::<String>::with_theme(&theme).with_prompt("GitHub username");
            if let Some(default) = s.username.take() {
                input = input.default(default);
            }
            s.username = Some(
                input
                    .validate_with(|input: &String| -> Result<(), String> {
                        GithubUsername::parse(input)
                            .map(|_| ())
                            .map_err(|e| e.to_string())
                    })
                    .interact_text()?,
            );
            prompted_username = true;
        }

        Ok(Collected {
            answers: s.into_answers()?,
            prompted_username,
        })
    }

    fn confirm(theme: &ColorfulTheme, prompt: &str, default: bool) -> CliResult<bool> {
        Ok(Confirm::with_theme(theme)
            .with_prompt(prompt)
            .default(default)
            .interact()?)
    }
}

#[cfg(not(feature = "interactive"))]
mod prompt {
    use super::{Collected, Suggestions};
    use crate::error::{CliError, CliResult};

    pub(super) fn ask(_suggestions: Suggestions) -> CliResult<Collected> {
        Err(CliError::FeatureNotAvailable {
            feature: "interactive",
        })
    }
}
