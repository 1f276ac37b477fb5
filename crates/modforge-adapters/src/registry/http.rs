//! Shared HTTP helpers for registry and identity clients.
//!
//! Centralizes client construction and status-code checks (429 rate limiting
//! with `Retry-After` parsing, non-success to [`RegistryError::Api`]).

use std::time::Duration;

use super::RegistryError;

const USER_AGENT: &str = concat!("modforge/", env!("CARGO_PKG_VERSION"));
const TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client with the modforge user agent and request timeout.
pub(crate) fn client() -> Result<reqwest::Client, RegistryError> {
    Ok(reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(TIMEOUT)
        .build()?)
}

/// Check an HTTP response for common error conditions.
///
/// Returns the response unchanged on success.
pub(crate) async fn check_response(
    resp: reqwest::Response,
) -> Result<reqwest::Response, RegistryError> {
    if resp.status() == 429 {
        return Err(RegistryError::RateLimited {
            retry_after_secs: parse_retry_after(&resp),
        });
    }
    if !resp.status().is_success() {
        return Err(RegistryError::Api {
            status: resp.status().as_u16(),
            message: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}

/// `Retry-After` in seconds, 60 when absent or unparseable.
fn parse_retry_after(resp: &reqwest::Response) -> u64 {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, retry_after: Option<&str>) -> reqwest::Response {
        let mut builder = ::http::Response::builder().status(status);
        if let Some(value) = retry_after {
            builder = builder.header("Retry-After", value);
        }
        reqwest::Response::from(builder.body("not found").unwrap())
    }

    #[tokio::test]
    async fn rate_limit_reads_retry_after() {
        let err = check_response(response(429, Some("30"))).await.unwrap_err();
        assert!(matches!(
            err,
            RegistryError::RateLimited {
                retry_after_secs: 30
            }
        ));

        let err = check_response(response(429, None)).await.unwrap_err();
        assert!(matches!(
            err,
            RegistryError::RateLimited {
                retry_after_secs: 60
            }
        ));
    }

    #[tokio::test]
    async fn non_success_is_an_api_error() {
        let err = check_response(response(404, None)).await.unwrap_err();
        assert!(matches!(err, RegistryError::Api { status: 404, ref message } if message == "not found"));
    }

    #[tokio::test]
    async fn success_passes_through() {
        assert!(check_response(response(200, None)).await.is_ok());
    }
}
