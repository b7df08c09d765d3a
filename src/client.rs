//! Backlog API client.
//!
//! Low-level HTTP client that derives the space base URL, carries the API
//! key, and issues raw GET requests. Entity-specific operations live next
//! to their model types and funnel through [`BacklogClient::fetch`].

use std::env;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Response};
use serde_json::Value;
use url::Url;

use crate::error::{BacklogError, Result};

const USER_AGENT: &str = concat!("backlog-api/", env!("CARGO_PKG_VERSION"));

/// Hosting region of a Backlog space.
///
/// Each region maps to a fixed hostname suffix; the set is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpaceRegion {
    /// `backlog.jp`
    Jp,
    /// `backlog.com`
    Com,
    /// `backlogtool.com`
    Tool,
}

impl SpaceRegion {
    /// The hostname suffix for this region.
    pub fn domain(self) -> &'static str {
        match self {
            SpaceRegion::Jp => "backlog.jp",
            SpaceRegion::Com => "backlog.com",
            SpaceRegion::Tool => "backlogtool.com",
        }
    }
}

impl FromStr for SpaceRegion {
    type Err = BacklogError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "jp" => Ok(SpaceRegion::Jp),
            "com" => Ok(SpaceRegion::Com),
            "tool" => Ok(SpaceRegion::Tool),
            other => Err(BacklogError::InvalidConfig(format!(
                "space region must be one of 'jp', 'com', 'tool', got '{other}'"
            ))),
        }
    }
}

impl fmt::Display for SpaceRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SpaceRegion::Jp => "jp",
            SpaceRegion::Com => "com",
            SpaceRegion::Tool => "tool",
        })
    }
}

/// Low-level Backlog API client.
///
/// Holds the immutable base URL and API key. Every operation issues at
/// most one GET request; there is no caching, no retry, and no shared
/// mutable state, so clones are safe to use from concurrent tasks.
///
/// This struct is cheaply cloneable; clones reference the same underlying
/// connection pool.
///
/// # Example
///
/// ```no_run
/// use backlog_api::{BacklogClient, SpaceRegion};
///
/// # fn example() -> backlog_api::Result<()> {
/// // Create from environment variables
/// let client = BacklogClient::from_env()?;
///
/// // Or configure manually
/// let client = BacklogClient::new("your-space", SpaceRegion::Jp, "your-api-key")?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct BacklogClient {
    http: Client,
    base_url: Arc<Url>,
    api_key: String,
}

impl fmt::Debug for BacklogClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BacklogClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl BacklogClient {
    /// Create a client from environment variables.
    ///
    /// Uses `BACKLOG_SPACE_KEY` and `BACKLOG_API_KEY`, plus optionally
    /// `BACKLOG_SPACE_REGION` (one of `jp`, `com`, `tool`; defaults to
    /// `jp`).
    ///
    /// # Errors
    ///
    /// Returns [`BacklogError::InvalidConfig`] if a required variable is
    /// not set or the region is not in the fixed set.
    pub fn from_env() -> Result<Self> {
        let space_key = env::var("BACKLOG_SPACE_KEY").map_err(|_| {
            BacklogError::InvalidConfig(
                "BACKLOG_SPACE_KEY environment variable not set".to_string(),
            )
        })?;
        let api_key = env::var("BACKLOG_API_KEY").map_err(|_| {
            BacklogError::InvalidConfig(
                "BACKLOG_API_KEY environment variable not set".to_string(),
            )
        })?;
        let region = match env::var("BACKLOG_SPACE_REGION") {
            Ok(value) => value.parse()?,
            Err(_) => SpaceRegion::Jp,
        };

        Self::new(&space_key, region, &api_key)
    }

    /// Create a new client for the given space.
    ///
    /// The base URL becomes `https://<space_key>.<region-domain>/api/v2/`
    /// and is immutable afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`BacklogError::InvalidConfig`] if `space_key` or
    /// `api_key` is empty.
    pub fn new(space_key: &str, region: SpaceRegion, api_key: &str) -> Result<Self> {
        if space_key.is_empty() {
            return Err(BacklogError::InvalidConfig(
                "space_key must not be empty".to_string(),
            ));
        }
        let base_url = format!("https://{space_key}.{}/api/v2/", region.domain());
        Self::with_base_url(&base_url, api_key)
    }

    /// Create a client against an explicit base URL.
    ///
    /// Useful for tests and API gateways; [`BacklogClient::new`] is the
    /// normal entry point.
    ///
    /// # Errors
    ///
    /// Returns an error if `api_key` is empty or the URL is invalid.
    pub fn with_base_url(base_url: &str, api_key: &str) -> Result<Self> {
        if api_key.is_empty() {
            return Err(BacklogError::InvalidConfig(
                "api_key must not be empty".to_string(),
            ));
        }

        // Ensure base URL ends with / so Url::join keeps the path prefix
        let base_url_str = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let base_url = Url::parse(&base_url_str)?;

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .timeout(Duration::from_secs(300))
            .build()
            .map_err(BacklogError::Http)?;

        Ok(Self {
            http,
            base_url: Arc::new(base_url),
            api_key: api_key.to_string(),
        })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Issue a GET request and parse the response body as JSON.
    ///
    /// The query carries the operation parameters followed by
    /// `apiKey=<api_key>`. Transport failures surface unmodified; a
    /// non-2xx status maps to [`BacklogError::Api`].
    #[tracing::instrument(skip(self))]
    pub async fn fetch(&self, path: &str, params: &[(&str, &str)]) -> Result<Value> {
        let url = self.base_url.join(path)?;

        let mut query: Vec<(&str, &str)> = params.to_vec();
        query.push(("apiKey", self.api_key.as_str()));

        let response = self
            .http
            .get(url)
            .query(&query)
            .send()
            .await
            .map_err(BacklogError::Http)?;
        let response = Self::check_response(response).await?;

        let body = response.text().await.map_err(BacklogError::Http)?;
        let value = serde_json::from_str(&body)?;
        Ok(value)
    }

    /// Check response status and convert errors.
    async fn check_response(response: Response) -> Result<Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let message = Self::extract_error_message(response, status).await;
        Err(BacklogError::Api {
            message,
            status_code: Some(status.as_u16()),
        })
    }

    /// Extract error message from a failed response.
    ///
    /// Backlog error bodies look like `{"errors": [{"message": "..."}]}`.
    async fn extract_error_message(response: Response, status: reqwest::StatusCode) -> String {
        let body = match response.text().await {
            Ok(b) => b,
            Err(_) => return format!("HTTP {status}"),
        };

        if let Ok(json) = serde_json::from_str::<Value>(&body) {
            if let Some(msg) = json
                .get("errors")
                .and_then(|e| e.get(0))
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
            {
                return msg.to_string();
            }
        }

        if body.is_empty() {
            format!("HTTP {status}")
        } else {
            body
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_debug_hides_api_key() {
        let client = BacklogClient::new("test", SpaceRegion::Jp, "secret-key").unwrap();
        let debug = format!("{:?}", client);
        assert!(debug.contains("BacklogClient"));
        assert!(debug.contains("base_url"));
        assert!(!debug.contains("secret-key"));
    }

    #[test]
    fn test_base_url_per_region() {
        let jp = BacklogClient::new("test", SpaceRegion::Jp, "key").unwrap();
        assert_eq!(jp.base_url().as_str(), "https://test.backlog.jp/api/v2/");

        let com = BacklogClient::new("test", SpaceRegion::Com, "key").unwrap();
        assert_eq!(com.base_url().as_str(), "https://test.backlog.com/api/v2/");

        let tool = BacklogClient::new("test", SpaceRegion::Tool, "key").unwrap();
        assert_eq!(
            tool.base_url().as_str(),
            "https://test.backlogtool.com/api/v2/"
        );
    }

    #[test]
    fn test_empty_space_key_rejected() {
        let err = BacklogClient::new("", SpaceRegion::Jp, "key").unwrap_err();
        assert!(matches!(err, BacklogError::InvalidConfig(_)));
    }

    #[test]
    fn test_empty_api_key_rejected() {
        let err = BacklogClient::new("test", SpaceRegion::Jp, "").unwrap_err();
        assert!(matches!(err, BacklogError::InvalidConfig(_)));
    }

    #[test]
    fn test_region_parsing() {
        assert_eq!("jp".parse::<SpaceRegion>().unwrap(), SpaceRegion::Jp);
        assert_eq!("com".parse::<SpaceRegion>().unwrap(), SpaceRegion::Com);
        assert_eq!("tool".parse::<SpaceRegion>().unwrap(), SpaceRegion::Tool);
        assert!("eu".parse::<SpaceRegion>().is_err());
        assert!("".parse::<SpaceRegion>().is_err());
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let c1 = BacklogClient::with_base_url("http://localhost:8080/api/v2", "key").unwrap();
        let c2 = BacklogClient::with_base_url("http://localhost:8080/api/v2/", "key").unwrap();
        assert_eq!(c1.base_url().as_str(), c2.base_url().as_str());
    }
}
