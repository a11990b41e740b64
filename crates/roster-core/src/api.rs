//! Users endpoint adapter.
//!
//! One GET per call, no caching, no retry. Any transport, status or decode
//! failure becomes a `FetchError`.

use std::time::Duration;

use tracing::{info, warn};
use url::Url;

use crate::config::Config;
use crate::error::FetchError;
use crate::users::User;

/// HTTP client for the users endpoint.
///
/// Cloning is cheap; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct UsersClient {
    http: reqwest::Client,
    url: Url,
}

impl UsersClient {
    /// Creates a client for `url` with an optional per-request timeout.
    ///
    /// # Errors
    /// Returns `FetchError::InvalidUrl` for anything but an http(s) URL, or
    /// `FetchError::Client` if the HTTP client cannot be built.
    pub fn new(url: &str, timeout: Option<Duration>) -> Result<Self, FetchError> {
        let url = parse_url(url)?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(FetchError::Client)?;

        Ok(Self { http, url })
    }

    /// Creates a client from the endpoint and timeout in `config`.
    ///
    /// # Errors
    /// See [`UsersClient::new`].
    pub fn from_config(config: &Config) -> Result<Self, FetchError> {
        Self::new(&config.users_url, config.request_timeout())
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Fetches the full user list.
    ///
    /// # Errors
    /// Returns a `FetchError` when the request fails, the status is not 2xx,
    /// or the body is not a JSON array of users.
    pub async fn fetch_users(&self) -> Result<Vec<User>, FetchError> {
        info!(url = %self.url, "fetching users");

        let result = self.fetch_inner().await;
        match &result {
            Ok(users) => info!(count = users.len(), "fetched users"),
            Err(err) => warn!(error = %err, "failed to fetch users"),
        }
        result
    }

    async fn fetch_inner(&self) -> Result<Vec<User>, FetchError> {
        let response = self.http.get(self.url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

fn parse_url(raw: &str) -> Result<Url, FetchError> {
    let invalid = |reason: String| FetchError::InvalidUrl {
        url: raw.to_string(),
        reason,
    };

    let url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(invalid(format!("unsupported scheme '{other}'"))),
    }
}
