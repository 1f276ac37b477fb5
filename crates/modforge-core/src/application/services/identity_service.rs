//! Identity defaults for the answer collector.

use tracing::{instrument, warn};

use crate::application::ports::IdentityProvider;

pub struct IdentityService {
    provider: Box<dyn IdentityProvider>,
}

impl IdentityService {
    pub fn new(provider: Box<dyn IdentityProvider>) -> Self {
        Self { provider }
    }

    /// Default author: the git user name, if configured.
    pub async fn default_author(&self) -> Option<String> {
        self.provider
            .git_name()
            .await
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
    }

    /// Default GitHub username.
    ///
    /// Never fails: any lookup error is logged and yields `""`.
    #[instrument(skip(self))]
    pub async fn default_username(&self) -> String {
        match self.provider.github_username().await {
            Ok(username) => username,
            Err(e) => {
                warn!(error = %e, "GitHub username lookup failed");
                String::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{ApplicationError, ports::MockIdentityProvider};

    #[tokio::test]
    async fn username_lookup_failure_degrades_to_empty() {
        let mut provider = MockIdentityProvider::new();
        provider.expect_github_username().returning(|| {
            Err(ApplicationError::IdentityLookup {
                reason: "no network".into(),
            }
            .into())
        });

        let service = IdentityService::new(Box::new(provider));
        assert_eq!(service.default_username().await, "");
    }

    #[tokio::test]
    async fn username_lookup_success_is_returned() {
        let mut provider = MockIdentityProvider::new();
        provider
            .expect_github_username()
            .returning(|| Ok("octocat".to_string()));

        let service = IdentityService::new(Box::new(provider));
        assert_eq!(service.default_username().await, "octocat");
    }

    #[tokio::test]
    async fn blank_git_name_is_no_default() {
        let mut provider = MockIdentityProvider::new();
        provider
            .expect_git_name()
            .returning(|| Some("   ".to_string()));

        let service = IdentityService::new(Box::new(provider));
        assert_eq!(service.default_author().await, None);
    }
}
