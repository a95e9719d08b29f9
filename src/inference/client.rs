//! HTTP client for the hosted prediction endpoint.

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use crate::model::PredictionInput;

/// Client for the remote inference API.
pub struct InferenceClient {
    client: Client,
    config: InferenceConfig,
}

/// Configuration for the inference client.
#[derive(Debug, Clone)]
pub struct InferenceConfig {
    /// Base URL of the hosted model (e.g. "https://mal-nutrition-fastapi.onrender.com")
    pub base_url: String,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
    /// Whether to call the remote service at all
    pub enabled: bool,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://mal-nutrition-fastapi.onrender.com".to_string(),
            request_timeout_ms: 10_000,
            enabled: true,
        }
    }
}

/// Response body from the remote model. Every field is optional and
/// untrusted; normalization happens in the resolution layer.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RemotePrediction {
    #[serde(default)]
    pub probability: Option<f64>,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub risk_category: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl InferenceClient {
    /// Create a new client with the given configuration.
    pub fn new(config: InferenceConfig) -> Result<Self, InferenceError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(InferenceError::Request)?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &InferenceConfig {
        &self.config
    }

    /// Check if the remote service responds at all.
    ///
    /// Also doubles as a wake-up ping for deployments that sleep when
    /// idle; callers may fire it ahead of the first prediction.
    pub async fn wake(&self) -> Result<(), InferenceError> {
        let url = format!("{}/?wake=1", self.config.base_url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(classify_error)?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(InferenceError::Unavailable)
        }
    }

    /// POST the prediction input to the remote model.
    ///
    /// A single attempt, no retry: the caller degrades to the heuristic
    /// fallback on any error.
    pub async fn predict(
        &self,
        input: &PredictionInput,
    ) -> Result<RemotePrediction, InferenceError> {
        if !self.config.enabled {
            return Err(InferenceError::Disabled);
        }

        let url = format!("{}/predict", self.config.base_url);

        let response = self
            .client
            .post(&url)
            .json(input)
            .send()
            .await
            .map_err(classify_error)?;

        if response.status().is_success() {
            response.json().await.map_err(InferenceError::Request)
        } else {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            Err(InferenceError::Api {
                status: status.as_u16(),
                message: text,
            })
        }
    }
}

fn classify_error(e: reqwest::Error) -> InferenceError {
    if e.is_timeout() {
        InferenceError::Timeout
    } else if e.is_connect() {
        InferenceError::Unavailable
    } else {
        InferenceError::Request(e)
    }
}

/// Errors from the remote inference call.
#[derive(Error, Debug)]
pub enum InferenceError {
    #[error("inference service unavailable")]
    Unavailable,

    #[error("inference disabled by configuration")]
    Disabled,

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("inference API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("request timeout")]
    Timeout,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = InferenceConfig::default();
        assert_eq!(config.base_url, "https://mal-nutrition-fastapi.onrender.com");
        assert!(config.enabled);
    }

    #[test]
    fn test_remote_prediction_tolerates_empty_body() {
        let parsed: RemotePrediction = serde_json::from_str("{}").unwrap();
        assert!(parsed.probability.is_none());
        assert!(parsed.confidence.is_none());
        assert!(parsed.risk_category.is_none());
        assert!(parsed.notes.is_none());
    }

    #[test]
    fn test_remote_prediction_parses_partial_body() {
        let parsed: RemotePrediction =
            serde_json::from_str(r#"{"probability": 0.82, "risk_category": "High"}"#).unwrap();
        assert_eq!(parsed.probability, Some(0.82));
        assert_eq!(parsed.risk_category.as_deref(), Some("High"));
    }
}
