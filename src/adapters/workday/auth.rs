//! OAuth2 token acquisition
//!
//! The tenant issues short-lived bearer tokens in exchange for a long-lived
//! refresh token. [`WorkdayConnector`] performs that exchange and hands the
//! resulting token to the transport layer; refreshing mid-batch is not
//! needed at the batch sizes this tool targets.

use crate::config::WorkdayConfig;
use crate::domain::{AbacusError, Result, WorkdayError};
use secrecy::ExposeSecret;
use serde::Deserialize;
use std::time::Duration;

use super::transport::with_retry;

/// Token endpoint response body
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Access-token generator for one tenant
pub struct WorkdayConnector {
    config: WorkdayConfig,
    base_uri: String,
    client: reqwest::Client,
    access_token: Option<String>,
}

impl WorkdayConnector {
    /// Create a connector from tenant configuration
    pub fn new(config: WorkdayConfig) -> Result<Self> {
        let client = reqwest::ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                AbacusError::Configuration(format!("Failed to build HTTP client: {e}"))
            })?;

        let base_uri = config.base_uri();
        Ok(Self {
            config,
            base_uri,
            client,
            access_token: None,
        })
    }

    /// Base URI of the tenant
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    /// Tenant name
    pub fn tenant(&self) -> &str {
        &self.config.tenant
    }

    /// Point the connector at an explicit base URI instead of the
    /// configured tenant host (testing, reverse proxies)
    pub fn with_base_uri(mut self, base_uri: impl Into<String>) -> Self {
        self.base_uri = base_uri.into();
        self
    }

    /// Exchange the refresh token for an access token
    ///
    /// 5xx responses from the token endpoint are retried with the
    /// configured policy; any other failure propagates immediately.
    pub async fn acquire_token(&mut self) -> Result<()> {
        let refresh_url = format!("{}/ccx/oauth2/{}/token", self.base_uri, self.config.tenant);

        let retry = &self.config.retry;
        let token = with_retry(retry.max_attempts, retry.delay_ms, || async {
            let params = [
                // constant value, required by the grant
                ("grant_type", "refresh_token"),
                (
                    "refresh_token",
                    self.config.refresh_token.expose_secret().as_ref(),
                ),
                ("client_id", self.config.client_id.as_str()),
                (
                    "client_secret",
                    self.config.client_secret.expose_secret().as_ref(),
                ),
            ];

            let response = self
                .client
                .post(&refresh_url)
                .form(&params)
                .send()
                .await
                .map_err(|e| {
                    AbacusError::Workday(WorkdayError::ConnectionFailed(e.to_string()))
                })?;

            let status = response.status();
            if status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                return Err(AbacusError::Workday(WorkdayError::ServerError {
                    status: status.as_u16(),
                    message: body,
                }));
            }
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(AbacusError::Workday(WorkdayError::AuthenticationFailed(
                    format!("token endpoint returned {status}: {body}"),
                )));
            }

            let tokens: TokenResponse = response.json().await.map_err(|e| {
                AbacusError::Workday(WorkdayError::InvalidResponse(e.to_string()))
            })?;
            Ok(tokens.access_token)
        })
        .await?;

        tracing::info!(tenant = %self.config.tenant, "Acquired Workday access token");
        self.access_token = Some(token);
        Ok(())
    }

    /// Whether a token has been acquired
    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }

    /// The current bearer token
    ///
    /// # Errors
    ///
    /// Returns an authentication error if `acquire_token` has not succeeded.
    pub fn access_token(&self) -> Result<&str> {
        self.access_token.as_deref().ok_or_else(|| {
            AbacusError::Authentication(
                "Access token is missing, acquire a token first".to_string(),
            )
        })
    }
}
