//! Template identity and placeholder rendering.
//!
//! Templates are opaque text. The only dynamic feature is `{{KEY}}`
//! substitution, where `KEY` is an uppercase identifier. There are no
//! conditionals and no loops; branching happens in the file rule table.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::domain::entities::answers::AnswerRecord;
use crate::domain::error::DomainError;

// ============================================================================
// Template Identity
// ============================================================================

/// Every template the synthesizer can ask a store for.
///
/// The file name is the lookup key in both the embedded store and a
/// directory override. A leading `_` marks a file that goes through
/// placeholder substitution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TemplateName {
    Package,
    PackageCompiled,
    Eslintrc,
    EslintrcCompiled,
    TestEslintrc,
    Babelrc,
    Gitignore,
    Npmignore,
    Readme,
    TravisYml,
    IndexJs,
    TestJs,
}

impl TemplateName {
    pub const ALL: [Self; 12] = [
        Self::Package,
        Self::PackageCompiled,
        Self::Eslintrc,
        Self::EslintrcCompiled,
        Self::TestEslintrc,
        Self::Babelrc,
        Self::Gitignore,
        Self::Npmignore,
        Self::Readme,
        Self::TravisYml,
        Self::IndexJs,
        Self::TestJs,
    ];

    pub const fn file_name(&self) -> &'static str {
        match self {
            Self::Package => "_package.json",
            Self::PackageCompiled => "_package.babel.json",
            Self::Eslintrc => "_.eslintrc.json",
            Self::EslintrcCompiled => "_.eslintrc.babel.json",
            Self::TestEslintrc => "_test.eslintrc.json",
            Self::Babelrc => "_.babelrc",
            Self::Gitignore => "_.gitignore",
            Self::Npmignore => "_.npmignore",
            Self::Readme => "_README.md",
            Self::TravisYml => ".travis.yml",
            Self::IndexJs => "index.js",
            Self::TestJs => "test.js",
        }
    }

    pub fn from_file_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.file_name() == name)
    }
}

impl fmt::Display for TemplateName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

// ============================================================================
// Render Context
// ============================================================================

/// Context for template rendering.
///
/// ## Built-in Variables
///
/// | Variable | Example | Present |
/// |----------|---------|---------|
/// | `NAME` | "left-pad" | always |
/// | `NAME_CAMEL` | "leftPad" | always |
/// | `DESCRIPTION` | "Out of the league!" | always |
/// | `AUTHOR` | "Mona Lisa" | always |
/// | `YEAR` | "2026" | always |
/// | `USERNAME` | "octocat" | when a username was collected |
/// | `REPOSITORY` | "octocat/left-pad" | when `add_repo` |
/// | `TRAVIS_BADGE` | markdown badge or "" | always |
/// | `BABEL_PRESETS` | `["es2015"]` | always (JSON) |
/// | `GITIGNORE_BUILD` | "lib/" or "" | always |
/// | `NPMIGNORE_SOURCE` | "src/" or "" | always |
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderContext {
    variables: BTreeMap<String, String>,
    /// Keys whose values are already JSON and must not be escaped again.
    json_values: BTreeSet<String>,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the standard context for a finalized answer record.
    pub fn for_answers(answers: &AnswerRecord, year: i32) -> Self {
        let name = answers.name();
        let mut ctx = Self::new()
            .with_variable("NAME", name.as_str())
            .with_variable("NAME_CAMEL", name.camel())
            .with_variable("DESCRIPTION", answers.description())
            .with_variable("AUTHOR", answers.author())
            .with_variable("YEAR", year.to_string())
            .with_variable("TRAVIS_BADGE", travis_badge(answers))
            .with_json_variable(
                "BABEL_PRESETS",
                serde_json::Value::from(crate::domain::rules::babel_presets(answers)).to_string(),
            );

        if let Some(username) = answers.username() {
            ctx = ctx.with_variable("USERNAME", username.as_str());
            if answers.add_repo() {
                ctx = ctx.with_variable("REPOSITORY", format!("{}/{}", username, name));
            }
        }

        let compiled = answers.compiled_options();
        let gitignore_build = match compiled {
            Some(opts) if !opts.checkin_compiled => "lib/",
            _ => "",
        };
        let npmignore_source = match compiled {
            Some(opts) if !opts.publish_source => "src/",
            _ => "",
        };

        ctx.with_variable("GITIGNORE_BUILD", gitignore_build)
            .with_variable("NPMIGNORE_SOURCE", npmignore_source)
    }

    /// Add or override a variable.
    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        self.json_values.remove(&key);
        self.variables.insert(key, value.into());
        self
    }

    /// Add a variable whose value is a JSON fragment.
    pub fn with_json_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        self.json_values.insert(key.clone());
        self.variables.insert(key, value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }

    /// Copy of this context with every plain value escaped for use inside a
    /// JSON string literal. JSON fragments are kept as they are.
    pub fn json_escaped(&self) -> Self {
        let variables = self
            .variables
            .iter()
            .map(|(k, v)| {
                let value = if self.json_values.contains(k) {
                    v.clone()
                } else {
                    escape_json_string(v)
                };
                (k.clone(), value)
            })
            .collect();

        Self {
            variables,
            json_values: self.json_values.clone(),
        }
    }

    /// Substitute every `{{KEY}}` in `source`.
    ///
    /// # Errors
    ///
    /// `TemplateFieldMissing` when a well-formed key has no value. Brace
    /// pairs around anything that is not a key are left untouched.
    pub fn render(&self, template: TemplateName, source: &str) -> Result<String, DomainError> {
        let mut out = String::with_capacity(source.len());
        let mut rest = source;

        while let Some(start) = rest.find("{{") {
            out.push_str(&rest[..start]);
            let after_open = &rest[start + 2..];

            let Some(end) = after_open.find("}}") else {
                out.push_str(&rest[start..]);
                return Ok(out);
            };

            let key = &after_open[..end];
            if is_placeholder_key(key) {
                let value = self
                    .get(key)
                    .ok_or_else(|| DomainError::TemplateFieldMissing {
                        template: template.file_name().to_string(),
                        field: key.to_string(),
                    })?;
                out.push_str(value);
                rest = &after_open[end + 2..];
            } else {
                // Step one brace so `{{{NAME}}}` still finds the inner key.
                out.push('{');
                rest = &rest[start + 1..];
            }
        }

        out.push_str(rest);
        Ok(out)
    }
}

fn is_placeholder_key(key: &str) -> bool {
    let mut chars = key.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_uppercase())
        && chars.all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}

fn escape_json_string(value: &str) -> String {
    let quoted = serde_json::Value::String(value.to_string()).to_string();
    quoted[1..quoted.len() - 1].to_string()
}

fn travis_badge(answers: &AnswerRecord) -> String {
    match answers.username() {
        Some(username) if answers.use_travis_ci() => {
            let slug = format!("{}/{}", username, answers.name());
            format!(
                "[![Build Status](https://travis-ci.org/{slug}.svg?branch=master)](https://travis-ci.org/{slug})"
            )
        }
        _ => String::new(),
    }
}

// ============================================================================
// String Case Helpers
// ============================================================================

/// Split a string into lowercase words based on casing and separators.
///
/// ## Word Boundary Detection
///
/// 1. **Explicit separators:** `_`, `-`, whitespace
/// 2. **Case transition (camelCase):** `aB` splits between `a` and `B`
/// 3. **Acronym boundary:** `HTTPRequest` splits between `P` and `R`
pub(crate) fn split_words(input: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '_' || c == '-' || c.is_whitespace() {
            if !current.is_empty() {
                words.push(current.to_lowercase());
                current.clear();
            }
            continue;
        }

        if let Some(&next) = chars.peek() {
            let camel_break = c.is_lowercase() && next.is_uppercase();
            // `lib2go` is three words, as lodash's kebabCase has it.
            let digit_break = c.is_ascii_digit() != next.is_ascii_digit();
            let acronym_break = c.is_uppercase()
                && next.is_uppercase()
                && chars.clone().nth(1).is_some_and(|n| n.is_lowercase());

            if camel_break || acronym_break || digit_break {
                current.push(c);
                words.push(current.to_lowercase());
                current.clear();
                continue;
            }
        }

        current.push(c);
    }

    if !current.is_empty() {
        words.push(current.to_lowercase());
    }

    words
}
