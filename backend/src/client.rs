//! HTTP client for the staking metadata service.

use std::time::Duration;

use tonstake_types::TonAddress;

use crate::error::BackendError;
use crate::state::{self, BackendStakingState, RawStakingState};

/// Configuration for [`BackendClient`].
#[derive(Clone, Debug)]
pub struct BackendConfig {
    /// Base URL of the backend, e.g. `https://api.example.org`.
    pub base_url: String,
    /// Client identifier sent as the `X-Client-Id` header.
    pub client_id: String,
    /// Nominator pool addresses this build is willing to route funds to.
    pub allowed_pools: Vec<TonAddress>,
}

/// HTTP client for the staking metadata backend.
///
/// Wraps `reqwest::Client` with the service's base URL and applies the
/// trust-gate validation to every response before returning it.
#[derive(Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    config: BackendConfig,
}

impl BackendClient {
    pub fn new(config: BackendConfig) -> Result<Self, BackendError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| BackendError::Transport(format!("failed to create HTTP client: {e}")))?;
        Ok(Self { http, config })
    }

    /// The configured base URL.
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Fetch and validate the staking state for one account address.
    ///
    /// `view_only` marks requests made on behalf of watch-only accounts so
    /// the backend can skip per-account side effects.
    pub async fn fetch_staking_state(
        &self,
        address: &TonAddress,
        view_only: bool,
    ) -> Result<BackendStakingState, BackendError> {
        let url = format!("{}/staking/state/{}", self.config.base_url, address);
        let mut request = self
            .http
            .get(&url)
            .header("X-Client-Id", &self.config.client_id);
        if view_only {
            request = request.query(&[("view_only", "true")]);
        }

        let response = request
            .send()
            .await
            .map_err(|e| BackendError::Transport(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(BackendError::Transport(format!(
                "backend returned HTTP {}",
                response.status()
            )));
        }

        let raw: RawStakingState = response
            .json()
            .await
            .map_err(|e| BackendError::Malformed(format!("invalid JSON response: {e}")))?;

        state::validate(raw, &self.config.allowed_pools)
    }
}
