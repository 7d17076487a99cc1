//! Configuration types.

use std::time::Duration;

use crate::error::ConfigError;

/// Conversation engine pacing.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Delay before each bot response ("typing" interval). Paces the
    /// dialogue; not a network artifact. Tests set this to zero.
    pub pacing_delay: Duration,
    /// Delay between the result message and the restart invitation.
    pub followup_delay: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            pacing_delay: Duration::from_secs(1),
            followup_delay: Duration::from_secs(1),
        }
    }
}

impl EngineConfig {
    /// Zero-delay configuration for tests.
    pub fn immediate() -> Self {
        Self {
            pacing_delay: Duration::ZERO,
            followup_delay: Duration::ZERO,
        }
    }
}

/// Prediction endpoint configuration.
#[derive(Debug, Clone)]
pub struct PredictConfig {
    /// Full URL of the prediction endpoint.
    pub endpoint: String,
    /// Per-request timeout for the remote call.
    pub request_timeout: Duration,
}

impl Default for PredictConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:5000/predict".to_string(),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl PredictConfig {
    /// Load from environment, falling back to defaults.
    ///
    /// - `LOAN_CHAT_ENDPOINT` — prediction endpoint URL.
    /// - `LOAN_CHAT_TIMEOUT_SECS` — request timeout in seconds.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(endpoint) = std::env::var("LOAN_CHAT_ENDPOINT") {
            config.endpoint = endpoint;
        }

        if let Ok(raw) = std::env::var("LOAN_CHAT_TIMEOUT_SECS") {
            let secs: u64 = raw.parse().map_err(|_| ConfigError::InvalidValue {
                key: "LOAN_CHAT_TIMEOUT_SECS".to_string(),
                message: format!("expected an integer number of seconds, got {raw:?}"),
            })?;
            config.request_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// Base URL of the prediction service (endpoint with its path stripped),
    /// used for the health probe.
    pub fn base_url(&self) -> String {
        match self.endpoint.rfind('/') {
            // Don't strip the scheme's "//".
            Some(idx) if idx > self.endpoint.find("://").map_or(0, |s| s + 2) => {
                self.endpoint[..idx].to_string()
            }
            _ => self.endpoint.clone(),
        }
    }
}
