//! User configuration: default answers, registry and template settings.
//!
//! Sources are layered with the `config` crate, later ones winning:
//! built-in defaults, the TOML file, then `MODFORGE_<SECTION>__<KEY>`
//! environment variables. Command line flags are applied on top of the
//! loaded value by the commands themselves.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use modforge_adapters::registry::DEFAULT_REGISTRY_URL;

pub const ENV_PREFIX: &str = "MODFORGE";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Default answers for new modules.
    pub defaults: Defaults,
    /// Version lookup settings.
    pub registry: RegistryConfig,
    /// Template settings.
    pub templates: TemplateConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub author: Option<String>,
    /// Remembered after each interactive run.
    pub username: Option<String>,
    pub language: Option<String>,
    pub use_travis_ci: bool,
    pub add_repo: bool,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            author: None,
            username: None,
            language: None,
            use_travis_ci: true,
            add_repo: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    pub url: String,
    pub offline: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_REGISTRY_URL.to_string(),
            offline: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

impl AppConfig {
    /// Load configuration: defaults, then the TOML file, then environment.
    ///
    /// An explicit `config_file` must exist; the default location is optional.
    pub fn load(config_file: Option<&Path>) -> anyhow::Result<Self> {
        let path = config_file
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::config_path);
        debug!(path = %path.display(), "loading configuration");

        let config = config::Config::builder()
            .add_source(config::Config::try_from(&Self::default())?)
            .add_source(
                config::File::from(path.as_path())
                    .format(config::FileFormat::Toml)
                    .required(config_file.is_some()),
            )
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Per-user config file, or `.modforge.toml` when the platform has no
    /// notion of a home directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "modforge", "modforge")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".modforge.toml"))
    }

    /// Value of a dotted key, rendered for display.
    pub fn get(&self, key: &str) -> Option<String> {
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        Some(match key {
            "defaults.author" => text(&self.defaults.author),
            "defaults.username" => text(&self.defaults.username),
            "defaults.language" => text(&self.defaults.language),
            "defaults.use_travis_ci" => self.defaults.use_travis_ci.to_string(),
            "defaults.add_repo" => self.defaults.add_repo.to_string(),
            "registry.url" => self.registry.url.clone(),
            "registry.offline" => self.registry.offline.to_string(),
            "templates.dir" => self
                .templates
                .dir
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
            "output.no_color" => self.output.no_color.to_string(),
            _ => return None,
        })
    }

    /// Record `username` as `defaults.username` in the file at `path`.
    ///
    /// Other keys in the file are left as they are.
    pub fn remember_username(path: &Path, username: &str) -> anyhow::Result<()> {
        let mut document: toml::Table = match std::fs::read_to_string(path) {
            Ok(text) => toml::from_str(&text)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => toml::Table::new(),
            Err(e) => return Err(e.into()),
        };

        let defaults = document
            .entry("defaults")
            .or_insert(toml::Value::Table(toml::Table::new()));
        let Some(defaults) = defaults.as_table_mut() else {
            anyhow::bail!("'defaults' in {} is not a table", path.display());
        };
        defaults.insert("username".into(), toml::Value::String(username.into()));

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, toml::to_string_pretty(&document)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_enable_travis_and_repo() {
        let cfg = AppConfig::default();
        assert!(cfg.defaults.use_travis_ci);
        assert!(cfg.defaults.add_repo);
        assert_eq!(cfg.registry.url, DEFAULT_REGISTRY_URL);
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[defaults]\nauthor = \"Mona Lisa\"\nuse_travis_ci = false\n\n[registry]\noffline = true\n",
        )
        .unwrap();

        let cfg = AppConfig::load(Some(path.as_path())).unwrap();
        assert_eq!(cfg.defaults.author.as_deref(), Some("Mona Lisa"));
        assert!(!cfg.defaults.use_travis_ci);
        assert!(cfg.defaults.add_repo);
        assert!(cfg.registry.offline);
        assert_eq!(cfg.registry.url, DEFAULT_REGISTRY_URL);
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(AppConfig::load(Some(dir.path().join("absent.toml").as_path())).is_err());
    }

    #[test]
    fn get_known_and_unknown_keys() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.get("defaults.add_repo").as_deref(), Some("true"));
        assert_eq!(cfg.get("defaults.username").as_deref(), Some(""));
        assert_eq!(cfg.get("does.not.exist"), None);
    }

    #[test]
    fn remembered_username_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        AppConfig::remember_username(&path, "octocat").unwrap();

        std::fs::write(
            &path,
            format!(
                "{}\n[output]\nno_color = true\n",
                std::fs::read_to_string(&path).unwrap()
            ),
        )
        .unwrap();
        AppConfig::remember_username(&path, "hubot").unwrap();

        let cfg = AppConfig::load(Some(path.as_path())).unwrap();
        assert_eq!(cfg.defaults.username.as_deref(), Some("hubot"));
        assert!(cfg.output.no_color);
    }
}
