//! Prediction service client.
//!
//! The endpoint is an opaque request/response boundary: one JSON POST with
//! the seven application fields, answered with a `loan_status` string. The
//! engine talks to it through the [`PredictClient`] trait so tests can stub
//! the whole service out.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::PredictConfig;
use crate::error::RemoteError;
use crate::flow::LoanApplication;

/// Fallback when a failed response carries no `error` field.
const GENERIC_FAILURE: &str = "Failed to get prediction";

/// Prediction result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    /// Compared by exact string equality to `"Approved"`.
    pub loan_status: String,
    /// Optional model confidence, when the backend reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approval_confidence: Option<f64>,
}

impl Prediction {
    pub fn is_approved(&self) -> bool {
        self.loan_status == "Approved"
    }
}

/// Error body shape for non-success responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Abstraction over the remote prediction endpoint.
#[async_trait]
pub trait PredictClient: Send + Sync {
    async fn predict(&self, application: &LoanApplication) -> Result<Prediction, RemoteError>;
}

/// HTTP client for the prediction service.
pub struct HttpPredictClient {
    config: PredictConfig,
    client: reqwest::Client,
}

impl HttpPredictClient {
    pub fn new(config: PredictConfig) -> Result<Self, RemoteError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| RemoteError::Transport(e.to_string()))?;
        Ok(Self { config, client })
    }

    /// Probe the service's `/health` endpoint. Advisory only — the dialogue
    /// still runs if the service comes up later.
    pub async fn health_check(&self) -> Result<(), RemoteError> {
        let url = format!("{}/health", self.config.base_url());
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| RemoteError::Transport(e.to_string()))?;
        if !resp.status().is_success() {
            return Err(RemoteError::Rejected {
                status: resp.status().as_u16(),
                message: GENERIC_FAILURE.to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl PredictClient for HttpPredictClient {
    async fn predict(&self, application: &LoanApplication) -> Result<Prediction, RemoteError> {
        let resp = self
            .client
            .post(&self.config.endpoint)
            .json(application)
            .send()
            .await
            .map_err(|e| RemoteError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            // Pull the server's message out of the error body when present.
            let message = resp
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.error)
                .unwrap_or_else(|| GENERIC_FAILURE.to_string());
            return Err(RemoteError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let prediction: Prediction = resp
            .json()
            .await
            .map_err(|e| RemoteError::InvalidResponse(e.to_string()))?;

        tracing::debug!(
            loan_status = %prediction.loan_status,
            confidence = ?prediction.approval_confidence,
            "Prediction received"
        );
        Ok(prediction)
    }
}
