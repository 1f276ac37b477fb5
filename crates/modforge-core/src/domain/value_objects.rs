//! Domain value objects: Language, Runtime, ModuleName, GithubUsername.
//!
//! # Design
//!
//! These are pure value types with equality-by-value and no identity.
//! Parsing is the only place where invalid input can be rejected; once a
//! value exists it is valid. Which files and packages a language implies
//! lives in `rules.rs`.

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::entities::template::split_words;
use crate::domain::error::DomainError;

// ── Language ─────────────────────────────────────────────────────────────────

/// The language dialect of the generated module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    /// Plain JavaScript, no build step.
    #[default]
    #[serde(rename = "js", alias = "plain")]
    Plain,
    /// Babel-compiled JavaScript targeting current runtimes.
    #[serde(rename = "babel", alias = "compiled")]
    Compiled,
    /// Babel-compiled JavaScript targeting the Node 4 runtime.
    #[serde(rename = "babel-node4", alias = "compiled-legacy-runtime")]
    CompiledLegacyRuntime,
}

impl Language {
    pub const ALL: [Self; 3] = [Self::Plain, Self::Compiled, Self::CompiledLegacyRuntime];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Plain => "js",
            Self::Compiled => "babel",
            Self::CompiledLegacyRuntime => "babel-node4",
        }
    }

    /// Human readable label used by the interactive language picker.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Plain => "JavaScript",
            Self::Compiled => "JavaScript (Babel)",
            Self::CompiledLegacyRuntime => "JavaScript (Babel for Node 4)",
        }
    }

    pub const fn is_compiled(self) -> bool {
        !matches!(self, Self::Plain)
    }

    /// Runtime targeted by the compiler, `None` for plain JavaScript.
    pub const fn runtime(self) -> Option<Runtime> {
        match self {
            Self::Plain => None,
            Self::Compiled => Some(Runtime::Modern),
            Self::CompiledLegacyRuntime => Some(Runtime::Node4),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "js" | "plain" | "javascript" => Ok(Self::Plain),
            "babel" | "compiled" => Ok(Self::Compiled),
            "babel-node4" | "compiled-legacy-runtime" => Ok(Self::CompiledLegacyRuntime),
            other => Err(DomainError::UnknownLanguage(other.to_string())),
        }
    }
}

// ── Runtime ──────────────────────────────────────────────────────────────────

/// Runtime the Babel preset compiles for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Runtime {
    Modern,
    Node4,
}

impl Runtime {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Modern => "modern",
            Self::Node4 => "node4",
        }
    }

    /// Language that selects this runtime.
    pub const fn language(self) -> Language {
        match self {
            Self::Modern => Language::Compiled,
            Self::Node4 => Language::CompiledLegacyRuntime,
        }
    }
}

impl fmt::Display for Runtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── ModuleName ───────────────────────────────────────────────────────────────

/// A package name normalized to kebab case.
///
/// Invariant: non-empty, lowercase alphanumeric tokens joined by `-`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ModuleName(String);

impl ModuleName {
    /// Normalize `raw` to kebab case.
    ///
    /// Any character that is not a letter or digit separates words, and
    /// camelCase and letter/digit boundaries split too: `"My Lib"`, `"myLib"`
    /// and `"my_lib"` all become `"my-lib"`, `"lib2go"` becomes `"lib-2-go"`.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let cleaned: String = raw
            .chars()
            .map(|c| if c.is_alphanumeric() { c } else { ' ' })
            .collect();
        let kebab = split_words(&cleaned).join("-");

        if kebab.is_empty() {
            return Err(DomainError::InvalidModuleName {
                name: raw.to_string(),
                reason: "name is empty after normalization".into(),
            });
        }

        Ok(Self(kebab))
    }

    /// Suggested name for a project living in `dir`.
    ///
    /// Uses the directory's final component with a leading `node-` removed,
    /// so `~/code/node-left-pad` suggests `left-pad`.
    pub fn suggest_from_dir(dir: &Path) -> Option<Self> {
        let base = dir.file_name()?.to_str()?;
        let base = base.strip_prefix("node-").unwrap_or(base);
        Self::parse(base).ok()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// camelCase form, suitable as a JavaScript identifier in READMEs.
    pub fn camel(&self) -> String {
        let mut parts = self.0.split('-');
        let mut out = parts.next().unwrap_or_default().to_string();
        for part in parts {
            let mut chars = part.chars();
            if let Some(first) = chars.next() {
                out.extend(first.to_uppercase());
                out.push_str(chars.as_str());
            }
        }
        out
    }
}

impl fmt::Display for ModuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ModuleName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// ── GithubUsername ───────────────────────────────────────────────────────────

// `A-z` is deliberately the raw ASCII range, so `[ \ ] ^ _ `` are accepted.
static USERNAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-z, _]{2,15}$").expect("username pattern compiles"));

/// A GitHub username accepted by the answer collector.
///
/// Invariant: 2-15 characters from ASCII `A..=z`, comma, underscore or
/// space, not starting with `_`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct GithubUsername(String);

impl GithubUsername {
    /// Surrounding whitespace is dropped before the rule is checked, so a
    /// prompt and the answer builder judge the same string.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let candidate = raw.trim();
        if candidate.starts_with('_') || !USERNAME_PATTERN.is_match(candidate) {
            return Err(DomainError::InvalidUsername {
                username: raw.to_string(),
            });
        }
        Ok(Self(candidate.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GithubUsername {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for GithubUsername {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
