//! Identity from the local git config and the GitHub user search.

use async_trait::async_trait;
use serde::Deserialize;
use tokio::process::Command;
use tracing::{debug, instrument};

use modforge_core::{
    application::{ApplicationError, ports::IdentityProvider},
    error::ModforgeResult,
};

use crate::registry::{RegistryError, check_response, client};

pub const GITHUB_API_URL: &str = "https://api.github.com";

/// Reads `user.name` and `user.email` with `git config`.
#[derive(Debug, Clone)]
pub struct GitIdentity {
    http: reqwest::Client,
    api_url: String,
}

#[derive(Debug, Deserialize)]
struct UserSearch {
    items: Vec<UserHit>,
}

#[derive(Debug, Deserialize)]
struct UserHit {
    login: String,
}

impl GitIdentity {
    pub fn new() -> Result<Self, RegistryError> {
        Self::with_api_url(GITHUB_API_URL)
    }

    pub fn with_api_url(api_url: impl Into<String>) -> Result<Self, RegistryError> {
        Ok(Self {
            http: client()?,
            api_url: api_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn search_url(&self, email: &str) -> String {
        format!(
            "{}/search/users?q={}+in:email",
            self.api_url,
            urlencoding::encode(email)
        )
    }

    async fn search_login(&self, email: &str) -> Result<Option<String>, RegistryError> {
        let resp = self
            .http
            .get(self.search_url(email))
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .send()
            .await?;
        let search: UserSearch = check_response(resp).await?.json().await?;
        Ok(search.items.into_iter().next().map(|hit| hit.login))
    }
}

/// `git config --get <key>`; `None` when git is missing or the key unset.
async fn git_config(key: &str) -> Option<String> {
    let output = Command::new("git")
        .args(["config", "--get", key])
        .output()
        .await
        .ok()?;
    if !output.status.success() {
        debug!(key, "git config key not set");
        return None;
    }
    let value = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!value.is_empty()).then_some(value)
}

fn lookup_failed(reason: impl Into<String>) -> ApplicationError {
    ApplicationError::IdentityLookup {
        reason: reason.into(),
    }
}

#[async_trait]
impl IdentityProvider for GitIdentity {
    async fn git_name(&self) -> Option<String> {
        git_config("user.name").await
    }

    #[instrument(skip(self))]
    async fn github_username(&self) -> ModforgeResult<String> {
        let email = git_config("user.email")
            .await
            .ok_or_else(|| lookup_failed("git user.email is not set"))?;

        let login = self
            .search_login(&email)
            .await
            .map_err(|e| lookup_failed(e.to_string()))?
            .ok_or_else(|| lookup_failed(format!("no GitHub user with email {email}")))?;

        debug!(%login, "GitHub user found");
        Ok(login)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_url_encodes_the_email() {
        let identity = GitIdentity::with_api_url("https://gh.example.com/").unwrap();
        assert_eq!(
            identity.search_url("mona+work@example.com"),
            "https://gh.example.com/search/users?q=mona%2Bwork%40example.com+in:email"
        );
    }

    #[test]
    fn first_search_hit_wins() {
        let search: UserSearch = serde_json::from_str(
            r#"{"total_count": 2, "items": [{"login": "mona", "id": 1}, {"login": "other"}]}"#,
        )
        .unwrap();
        assert_eq!(search.items[0].login, "mona");
    }
}
