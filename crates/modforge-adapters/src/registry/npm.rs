//! npm registry client.

use async_trait::async_trait;
use semver::Version;
use serde::Deserialize;
use tracing::{debug, instrument};

use modforge_core::{application::ports::VersionResolver, error::ModforgeResult};

use super::{
    RegistryError,
    http::{check_response, client},
};

/// Public npm registry.
pub const DEFAULT_REGISTRY_URL: &str = "https://registry.npmjs.org";

/// Resolves packages to a caret range on their `latest` dist-tag.
#[derive(Debug, Clone)]
pub struct NpmRegistry {
    http: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct LatestManifest {
    version: String,
}

impl NpmRegistry {
    pub fn new() -> Result<Self, RegistryError> {
        Self::with_base_url(DEFAULT_REGISTRY_URL)
    }

    /// Client against a mirror or private registry.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, RegistryError> {
        Ok(Self {
            http: client()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn latest_url(&self, package: &str) -> String {
        format!("{}/{}/latest", self.base_url, urlencoding::encode(package))
    }

    /// Version published under the `latest` dist-tag.
    pub async fn latest_version(&self, package: &str) -> Result<Version, RegistryError> {
        let resp = check_response(self.http.get(self.latest_url(package)).send().await?).await?;
        let manifest: LatestManifest = resp.json().await?;
        parse_version(&manifest.version)
    }
}

fn parse_version(raw: &str) -> Result<Version, RegistryError> {
    Version::parse(raw.trim()).map_err(|e| RegistryError::Parse(format!("version '{raw}': {e}")))
}

/// The range recorded in `package.json`.
pub fn caret_range(version: &Version) -> String {
    format!("^{version}")
}

#[async_trait]
impl VersionResolver for NpmRegistry {
    #[instrument(skip(self), fields(registry = %self.base_url))]
    async fn resolve(&self, package: &str) -> ModforgeResult<String> {
        let version = self
            .latest_version(package)
            .await
            .map_err(|e| e.into_resolution(package))?;
        debug!(%version, "latest version");
        Ok(caret_range(&version))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_url_encodes_the_package_name() {
        let registry = NpmRegistry::with_base_url("https://npm.example.com/").unwrap();
        assert_eq!(registry.base_url(), "https://npm.example.com");
        assert_eq!(
            registry.latest_url("babel-preset-es2015"),
            "https://npm.example.com/babel-preset-es2015/latest"
        );
        assert_eq!(
            registry.latest_url("@scope/pkg"),
            "https://npm.example.com/%40scope%2Fpkg/latest"
        );
    }

    #[test]
    fn caret_range_keeps_prerelease() {
        assert_eq!(caret_range(&parse_version("6.9.2").unwrap()), "^6.9.2");
        assert_eq!(
            caret_range(&parse_version("1.0.0-beta.1").unwrap()),
            "^1.0.0-beta.1"
        );
    }

    #[test]
    fn garbage_version_is_a_parse_error() {
        assert!(matches!(
            parse_version("latest"),
            Err(RegistryError::Parse(_))
        ));
    }

    #[test]
    fn failures_map_to_dependency_resolution() {
        use modforge_core::{application::ApplicationError, error::ModforgeError};

        let err = RegistryError::Api {
            status: 404,
            message: "Not Found".into(),
        }
        .into_resolution("left-pad");
        assert!(matches!(
            err,
            ModforgeError::Application(ApplicationError::DependencyResolution { ref package, ref reason })
                if package == "left-pad" && reason.contains("404")
        ));
    }
}
