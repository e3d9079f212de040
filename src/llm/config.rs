//! Generation backend settings, validated once at construction.

use std::env;
use std::fmt;
use std::time::Duration;

use reqwest::Url;
use tracing::warn;

use crate::error::ConfigError;

/// Azure OpenAI REST API version used when none is configured.
pub const DEFAULT_API_VERSION: &str = "2024-06-01";

/// Default timeout for a single generation request (2 minutes).
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Environment variable to override the default timeout.
pub const TIMEOUT_ENV_VAR: &str = "GITSCRIBE_TIMEOUT";

/// Immutable connection settings for the generation backend.
///
/// Every field is mandatory; [`GenerationConfig::new`] rejects blank values
/// so misconfiguration surfaces before any request is made.
#[derive(Clone)]
pub struct GenerationConfig {
    endpoint: Url,
    api_key: String,
    deployment: String,
    model_id: String,
    api_version: String,
    timeout: Duration,
}

impl GenerationConfig {
    pub fn new(
        endpoint: &str,
        api_key: &str,
        deployment: &str,
        model_id: &str,
    ) -> Result<Self, ConfigError> {
        let endpoint = require("endpoint", endpoint)?;
        let api_key = require("api key", api_key)?;
        let deployment = require("deployment", deployment)?;
        let model_id = require("model id", model_id)?;

        let url = Url::parse(&endpoint).map_err(|e| ConfigError::InvalidEndpoint {
            endpoint: endpoint.clone(),
            reason: e.to_string(),
        })?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::InvalidEndpoint {
                endpoint,
                reason: format!("unsupported scheme '{}'", url.scheme()),
            });
        }

        Ok(Self {
            endpoint: url,
            api_key,
            deployment,
            model_id,
            api_version: DEFAULT_API_VERSION.to_string(),
            timeout: get_timeout(),
        })
    }

    /// Use a specific REST API version. Blank values are rejected.
    pub fn with_api_version(mut self, api_version: &str) -> Result<Self, ConfigError> {
        self.api_version = require("api version", api_version)?;
        Ok(self)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn deployment(&self) -> &str {
        &self.deployment
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Full chat-completions URL for the configured deployment.
    pub fn completions_url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            self.endpoint.as_str().trim_end_matches('/'),
            self.deployment,
            self.api_version
        )
    }
}

impl fmt::Debug for GenerationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerationConfig")
            .field("endpoint", &self.endpoint.as_str())
            .field("api_key", &"<redacted>")
            .field("deployment", &self.deployment)
            .field("model_id", &self.model_id)
            .field("api_version", &self.api_version)
            .field("timeout", &self.timeout)
            .finish()
    }
}

fn require(field: &'static str, value: &str) -> Result<String, ConfigError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ConfigError::MissingField(field));
    }
    Ok(value.to_string())
}

/// Get the configured timeout duration.
///
/// Reads from GITSCRIBE_TIMEOUT (seconds) if set, otherwise uses the default
/// of 120 seconds. Invalid values log a warning and fall back to the default.
fn get_timeout() -> Duration {
    match env::var(TIMEOUT_ENV_VAR) {
        Ok(v) if !v.is_empty() => match v.parse::<u64>() {
            Ok(secs) if secs > 0 => Duration::from_secs(secs),
            _ => {
                warn!(
                    "Invalid {} value '{}', using default {}s",
                    TIMEOUT_ENV_VAR, v, DEFAULT_TIMEOUT_SECS
                );
                Duration::from_secs(DEFAULT_TIMEOUT_SECS)
            }
        },
        _ => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
    }
}
