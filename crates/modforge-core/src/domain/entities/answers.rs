//! The `AnswerRecord` aggregate and its typestate builder.
//!
//! An `AnswerRecord` is the finalized set of choices the collector gathered.
//! Once one exists it is valid: the compiled-only options only exist inside
//! [`Dialect::Compiled`], and the username is present exactly when Travis CI
//! or the repository link asked for it.
//!
//! # Typestate builder
//!
//! The builder starts in `NoName` and only offers `build()` once a module
//! name has been parsed. Cross-field rules (the username gate) are checked
//! by `build()`.
//!
//! # Domain purity
//!
//! This module must not import `tracing`.

use std::fmt;

use crate::domain::{
    error::DomainError,
    value_objects::{GithubUsername, Language, ModuleName, Runtime},
};

/// Description used when the collector got an empty answer.
pub const DEFAULT_DESCRIPTION: &str = "Out of the league!";

// ── Dialect ───────────────────────────────────────────────────────────────────

/// Options that only make sense when a compile step exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CompiledOptions {
    /// Enable stage-0 proposals.
    pub experimental: bool,
    /// Ship `src/` in the published package.
    pub publish_source: bool,
    /// Commit the compiled `lib/` output.
    pub checkin_compiled: bool,
}

/// Language dialect with its dialect-specific options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    Plain,
    Compiled {
        runtime: Runtime,
        options: CompiledOptions,
    },
}

impl Dialect {
    pub const fn language(&self) -> Language {
        match self {
            Self::Plain => Language::Plain,
            Self::Compiled { runtime, .. } => runtime.language(),
        }
    }

    pub const fn is_compiled(&self) -> bool {
        matches!(self, Self::Compiled { .. })
    }
}

// ── Aggregate root ────────────────────────────────────────────────────────────

/// A validated set of scaffolding answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerRecord {
    name: ModuleName,
    description: String,
    author: String,
    dialect: Dialect,
    use_travis_ci: bool,
    add_repo: bool,
    username: Option<GithubUsername>,
}

impl AnswerRecord {
    pub fn builder() -> AnswerRecordBuilder<NoName> {
        AnswerRecordBuilder::new()
    }

    pub fn name(&self) -> &ModuleName {
        &self.name
    }
    pub fn description(&self) -> &str {
        &self.description
    }
    pub fn author(&self) -> &str {
        &self.author
    }
    pub const fn dialect(&self) -> Dialect {
        self.dialect
    }
    pub const fn language(&self) -> Language {
        self.dialect.language()
    }
    pub const fn use_travis_ci(&self) -> bool {
        self.use_travis_ci
    }
    pub const fn add_repo(&self) -> bool {
        self.add_repo
    }
    pub fn username(&self) -> Option<&GithubUsername> {
        self.username.as_ref()
    }

    pub const fn compiled_options(&self) -> Option<CompiledOptions> {
        match self.dialect {
            Dialect::Compiled { options, .. } => Some(options),
            Dialect::Plain => None,
        }
    }

    /// Whether either gate asks for a GitHub username.
    pub const fn needs_username(&self) -> bool {
        self.use_travis_ci || self.add_repo
    }

    /// `https://github.com/<username>/<name>` when a repository is wanted.
    pub fn repository_url(&self) -> Option<String> {
        match (&self.username, self.add_repo) {
            (Some(username), true) => Some(format!("https://github.com/{}/{}", username, self.name)),
            _ => None,
        }
    }

    /// Re-check cross-field invariants.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.needs_username() && self.username.is_none() {
            return Err(DomainError::MissingRequiredField { field: "username" });
        }
        Ok(())
    }
}

impl fmt::Display for AnswerRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.language())?;
        if let Some(username) = &self.username {
            write!(f, " by @{username}")?;
        }
        Ok(())
    }
}

// ── Typestate markers ─────────────────────────────────────────────────────────

/// Marker: the module name has not been set.
pub struct NoName;
/// Marker: the module name has been parsed.
pub struct HasName(ModuleName);

// ── Builder ───────────────────────────────────────────────────────────────────

/// Typestate builder for [`AnswerRecord`].
///
/// Defaults match the interactive prompts: plain JavaScript, Travis CI on,
/// repository link on, all compiled options off.
pub struct AnswerRecordBuilder<N> {
    name: N,
    description: Option<String>,
    author: Option<String>,
    language: Language,
    options: CompiledOptions,
    use_travis_ci: bool,
    add_repo: bool,
    username: Option<String>,
}

impl AnswerRecordBuilder<NoName> {
    pub fn new() -> Self {
        Self {
            name: NoName,
            description: None,
            author: None,
            language: Language::default(),
            options: CompiledOptions::default(),
            use_travis_ci: true,
            add_repo: true,
            username: None,
        }
    }

    /// Parse and set the module name.
    pub fn name(self, raw: &str) -> Result<AnswerRecordBuilder<HasName>, DomainError> {
        let name = ModuleName::parse(raw)?;
        Ok(AnswerRecordBuilder {
            name: HasName(name),
            description: self.description,
            author: self.author,
            language: self.language,
            options: self.options,
            use_travis_ci: self.use_travis_ci,
            add_repo: self.add_repo,
            username: self.username,
        })
    }
}

impl Default for AnswerRecordBuilder<NoName> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> AnswerRecordBuilder<N> {
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    /// Ignored unless the language is compiled.
    pub fn experimental(mut self, on: bool) -> Self {
        self.options.experimental = on;
        self
    }

    /// Ignored unless the language is compiled.
    pub fn publish_source(mut self, on: bool) -> Self {
        self.options.publish_source = on;
        self
    }

    /// Ignored unless the language is compiled.
    pub fn checkin_compiled(mut self, on: bool) -> Self {
        self.options.checkin_compiled = on;
        self
    }

    pub fn use_travis_ci(mut self, on: bool) -> Self {
        self.use_travis_ci = on;
        self
    }

    pub fn add_repo(mut self, on: bool) -> Self {
        self.add_repo = on;
        self
    }

    /// Raw username; parsed by `build()` only when a gate needs it.
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }
}

impl AnswerRecordBuilder<HasName> {
    /// Finalize the record.
    ///
    /// # Errors
    ///
    /// - `MissingRequiredField` when Travis CI or the repository link is on
    ///   and no username (or an empty one) was given
    /// - `InvalidUsername` when the username fails validation
    pub fn build(self) -> Result<AnswerRecord, DomainError> {
        let HasName(name) = self.name;

        let description = match self.description {
            Some(d) if !d.trim().is_empty() => d.trim().to_string(),
            _ => DEFAULT_DESCRIPTION.to_string(),
        };

        let dialect = match self.language.runtime() {
            None => Dialect::Plain,
            Some(runtime) => Dialect::Compiled {
                runtime,
                options: self.options,
            },
        };

        let needs_username = self.use_travis_ci || self.add_repo;
        let username = if needs_username {
            match self.username.as_deref() {
                Some(raw) if !raw.trim().is_empty() => Some(GithubUsername::parse(raw)?),
                _ => return Err(DomainError::MissingRequiredField { field: "username" }),
            }
        } else {
            None
        };

        let record = AnswerRecord {
            name,
            description,
            author: self.author.unwrap_or_default().trim().to_string(),
            dialect,
            use_travis_ci: self.use_travis_ci,
            add_repo: self.add_repo,
            username,
        };

        record.validate()?;
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> AnswerRecordBuilder<HasName> {
        AnswerRecord::builder().name("my-lib").unwrap()
    }

    #[test]
    fn defaults_match_prompts() {
        let record = base().username("octocat").build().unwrap();
        assert_eq!(record.name().as_str(), "my-lib");
        assert_eq!(record.description(), DEFAULT_DESCRIPTION);
        assert_eq!(record.language(), Language::Plain);
        assert_eq!(record.dialect(), Dialect::Plain);
        assert!(record.use_travis_ci());
        assert!(record.add_repo());
        assert_eq!(record.compiled_options(), None);
    }

    #[test]
    fn padded_username_fails_like_its_trimmed_form() {
        let err = base().username(" a").build().unwrap_err();
        assert!(matches!(err, DomainError::InvalidUsername { .. }));
        assert_eq!(
            GithubUsername::parse(" a").is_ok(),
            base().username(" a").build().is_ok()
        );
    }

    #[test]
    fn empty_description_becomes_placeholder() {
        let record = base()
            .description("   ")
            .username("octocat")
            .build()
            .unwrap();
        assert_eq!(record.description(), DEFAULT_DESCRIPTION);
    }

    #[test]
    fn username_required_when_a_gate_is_on() {
        let err = base().build().unwrap_err();
        assert_eq!(err, DomainError::MissingRequiredField { field: "username" });

        let err = base().use_travis_ci(false).username("").build().unwrap_err();
        assert_eq!(err, DomainError::MissingRequiredField { field: "username" });
    }

    #[test]
    fn invalid_username_is_rejected() {
        let err = base().username("_octocat").build().unwrap_err();
        assert!(matches!(err, DomainError::InvalidUsername { .. }));
    }

    #[test]
    fn username_dropped_without_gates() {
        let record = base()
            .use_travis_ci(false)
            .add_repo(false)
            .username("octocat")
            .build()
            .unwrap();
        assert_eq!(record.username(), None);
        assert_eq!(record.repository_url(), None);
    }

    #[test]
    fn compiled_options_only_exist_for_compiled() {
        let plain = base()
            .experimental(true)
            .username("octocat")
            .build()
            .unwrap();
        assert_eq!(plain.compiled_options(), None);

        let compiled = base()
            .language(Language::CompiledLegacyRuntime)
            .experimental(true)
            .username("octocat")
            .build()
            .unwrap();
        assert_eq!(
            compiled.dialect(),
            Dialect::Compiled {
                runtime: Runtime::Node4,
                options: CompiledOptions {
                    experimental: true,
                    ..CompiledOptions::default()
                },
            }
        );
        assert_eq!(compiled.language(), Language::CompiledLegacyRuntime);
    }

    #[test]
    fn repository_url_uses_username_and_name() {
        let record = base().username("octocat").build().unwrap();
        assert_eq!(
            record.repository_url().as_deref(),
            Some("https://github.com/octocat/my-lib")
        );

        let travis_only = base().add_repo(false).username("octocat").build().unwrap();
        assert_eq!(travis_only.repository_url(), None);
        assert!(travis_only.username().is_some());
    }

    #[test]
    fn name_is_normalized_by_builder() {
        let record = AnswerRecord::builder()
            .name("My Cool Lib")
            .unwrap()
            .username("octocat")
            .build()
            .unwrap();
        assert_eq!(record.name().as_str(), "my-cool-lib");
        assert!(AnswerRecord::builder().name("!!!").is_err());
    }
}
