//! HTTP client shared by every dashboard source.
//!
//! Wraps `reqwest` with credential handling and the source-failure taxonomy.
//! [`DashboardClient::fetch`] is the only place a request is sent; typed
//! operations for each endpoint live next to the code that consumes them.

use std::time::Duration;

use folio_core::AppConfig;
use reqwest::header::{HeaderValue, ACCEPT, COOKIE};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::endpoint::{Endpoint, Origin};
use crate::error::{ClientError, SourceError, SourceResult};

const DEFAULT_USER_AGENT: &str = "folio/0.1 (dashboard-analytics)";
const DEFAULT_PUBLISHED_POSTS_LIMIT: u32 = 10;

/// Client for the dashboard backend.
///
/// Holds two bases: the configurable API base used for identity and projects,
/// and the dashboard origin the fixed analytics paths resolve against. Use
/// [`DashboardClient::new`] in production or [`DashboardClient::with_base_urls`]
/// to point both at a mock server in tests.
pub struct DashboardClient {
    client: Client,
    api_base: Url,
    app_origin: Url,
    session_cookie: Option<HeaderValue>,
    published_posts_limit: u32,
}

impl DashboardClient {
    /// Creates a client from application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the `reqwest::Client` cannot be built, a
    /// base URL does not parse, or the session cookie is not a valid header.
    pub fn new(config: &AppConfig) -> Result<Self, ClientError> {
        let mut client = Self::build(
            &config.api_base_url,
            &config.app_origin,
            config.request_timeout_secs,
            &config.user_agent,
        )?;
        if let Some(cookie) = &config.session_cookie {
            client = client.with_session_cookie(cookie)?;
        }
        Ok(client.with_published_posts_limit(config.published_posts_limit))
    }

    /// Creates a client with explicit bases and no credentials.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the `reqwest::Client` cannot be built or a
    /// base URL does not parse.
    pub fn with_base_urls(
        api_base: &str,
        app_origin: &str,
        timeout_secs: u64,
    ) -> Result<Self, ClientError> {
        Self::build(api_base, app_origin, timeout_secs, DEFAULT_USER_AGENT)
    }

    /// Attaches a session cookie sent with every request.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidSessionCookie`] if the value contains
    /// characters not allowed in a header.
    pub fn with_session_cookie(mut self, cookie: &str) -> Result<Self, ClientError> {
        let mut value =
            HeaderValue::from_str(cookie).map_err(|_| ClientError::InvalidSessionCookie)?;
        value.set_sensitive(true);
        self.session_cookie = Some(value);
        Ok(self)
    }

    #[must_use]
    pub fn with_published_posts_limit(mut self, limit: u32) -> Self {
        self.published_posts_limit = limit;
        self
    }

    #[must_use]
    pub fn published_posts_limit(&self) -> u32 {
        self.published_posts_limit
    }

    fn build(
        api_base: &str,
        app_origin: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            api_base: parse_base(api_base)?,
            app_origin: parse_base(app_origin)?,
            session_cookie: None,
            published_posts_limit: DEFAULT_PUBLISHED_POSTS_LIMIT,
        })
    }

    /// Resolves an endpoint against its base, appending any query parameters.
    #[must_use]
    pub fn url_for(&self, endpoint: Endpoint) -> Url {
        let base = match endpoint.origin() {
            Origin::ApiBase => &self.api_base,
            Origin::App => &self.app_origin,
        };
        // Bases always end in '/', so joining a relative path keeps any
        // prefix segment of the base.
        let mut url = base
            .join(endpoint.path().trim_start_matches('/'))
            .unwrap_or_else(|_| base.clone());
        let query = endpoint.query();
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in &query {
                pairs.append_pair(k, v);
            }
        }
        url
    }

    /// Fetches one endpoint and validates its envelope.
    ///
    /// Every failure is logged with its [`crate::FailureKind`] and returned as
    /// a [`SourceError`]; no error escapes as a panic or an unconverted
    /// transport error.
    ///
    /// # Errors
    ///
    /// - [`SourceError::Transport`] on network failure or timeout.
    /// - [`SourceError::HttpStatus`] on a non-2xx status.
    /// - [`SourceError::Deserialize`] if the body is not valid JSON.
    /// - [`SourceError::Unsuccessful`] if the `success` flag is false-ish,
    ///   or absent on an endpoint that requires it.
    pub async fn fetch(&self, endpoint: Endpoint) -> SourceResult<Value> {
        let result = self.request_json(endpoint).await;
        if let Err(e) = &result {
            tracing::debug!(
                source = endpoint.name(),
                kind = %e.kind(),
                error = %e,
                "source fetch failed"
            );
        }
        result
    }

    async fn request_json(&self, endpoint: Endpoint) -> SourceResult<Value> {
        let url = self.url_for(endpoint);
        let mut request = self
            .client
            .get(url.clone())
            .header(ACCEPT, "application/json");
        if let Some(cookie) = &self.session_cookie {
            request = request.header(COOKIE, cookie.clone());
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        let value: Value =
            serde_json::from_str(&body).map_err(|e| SourceError::Deserialize {
                context: endpoint.name().to_string(),
                source: e,
            })?;
        Self::check_success(endpoint, &value)?;
        Ok(value)
    }

    /// Checks the top-level `"success"` flag against the endpoint's contract.
    fn check_success(endpoint: Endpoint, body: &Value) -> SourceResult<()> {
        match body.get("success") {
            Some(flag) if is_truthy(flag) => Ok(()),
            Some(_) => {
                let reason = body
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or("success flag is false")
                    .to_string();
                Err(SourceError::Unsuccessful {
                    context: endpoint.name().to_string(),
                    reason,
                })
            }
            None if endpoint.requires_success_flag() => Err(SourceError::Unsuccessful {
                context: endpoint.name().to_string(),
                reason: "success flag is missing".to_string(),
            }),
            None => Ok(()),
        }
    }
}

/// Deserializes a JSON fragment into a typed payload, tagging failures with
/// the endpoint name.
pub(crate) fn decode<T: DeserializeOwned>(endpoint: Endpoint, value: Value) -> SourceResult<T> {
    serde_json::from_value(value).map_err(|e| SourceError::Deserialize {
        context: endpoint.name().to_string(),
        source: e,
    })
}

/// Loose truthiness for envelope flags: `true`, non-zero numbers, non-empty
/// strings, and any array or object.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Normalises a base URL so it ends with exactly one slash.
fn parse_base(raw: &str) -> Result<Url, ClientError> {
    let normalised = format!("{}/", raw.trim_end_matches('/'));
    Url::parse(&normalised).map_err(|e| ClientError::InvalidBaseUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
