//! Raw configuration data types
//!
//! [`FileConfig`] is the merged, unvalidated shape shared by TOML files,
//! environment variables and CLI flags. [`FileConfig::into_api_config`]
//! turns it into the immutable [`ApiConfig`] the transport uses.

use featurebase_application::{ApiConfig, DEFAULT_BASE_URL};
use reqwest::header::HeaderValue;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error(
        "API key is required. Provide via --api-key argument or FEATUREBASE_API_KEY environment variable"
    )]
    MissingApiKey,

    #[error("API key contains characters that cannot be sent in an HTTP header")]
    InvalidApiKey,

    #[error("{field} must be an http:// or https:// URL, got '{value}'")]
    InvalidUrl { field: &'static str, value: String },
}

/// Raw configuration (TOML keys, `FEATUREBASE_*` variables, CLI flags)
///
/// ```toml
/// api_key = "fb_..."
/// base_url = "https://do.featurebase.app/v2"
/// org_url = "https://feedback.example.com"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Public organization origin used by slug resolution and similarity search
    #[serde(skip_serializing_if = "Option::is_none")]
    pub org_url: Option<String>,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: Some(DEFAULT_BASE_URL.to_string()),
            org_url: None,
        }
    }
}

impl FileConfig {
    /// A config with every field unset, used for CLI overrides.
    pub fn empty() -> Self {
        Self {
            api_key: None,
            base_url: None,
            org_url: None,
        }
    }

    /// Validate and convert into the runtime [`ApiConfig`].
    pub fn into_api_config(self) -> Result<ApiConfig, ConfigValidationError> {
        let api_key = self
            .api_key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or(ConfigValidationError::MissingApiKey)?;
        if HeaderValue::from_str(&api_key).is_err() {
            return Err(ConfigValidationError::InvalidApiKey);
        }

        let mut config = ApiConfig::new(api_key);
        if let Some(base_url) = non_empty(self.base_url) {
            config = config.with_base_url(validate_url("base_url", base_url)?);
        }
        if let Some(org_url) = non_empty(self.org_url) {
            config = config.with_org_url(validate_url("org_url", org_url)?);
        }
        Ok(config)
    }

    /// Copy with the API key masked, for display.
    pub fn redacted(&self) -> Self {
        Self {
            api_key: self.api_key.as_ref().map(|_| "<redacted>".to_string()),
            ..self.clone()
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn validate_url(field: &'static str, value: String) -> Result<String, ConfigValidationError> {
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(value)
    } else {
        Err(ConfigValidationError::InvalidUrl { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_api_key() {
        let err = FileConfig::default().into_api_config().unwrap_err();
        assert_eq!(err, ConfigValidationError::MissingApiKey);
        assert!(err.to_string().contains("--api-key"));
        assert!(err.to_string().contains("FEATUREBASE_API_KEY"));
    }

    #[test]
    fn test_blank_api_key_is_missing() {
        let config = FileConfig {
            api_key: Some("   ".to_string()),
            ..FileConfig::default()
        };
        assert_eq!(
            config.into_api_config().unwrap_err(),
            ConfigValidationError::MissingApiKey
        );
    }

    #[test]
    fn test_api_key_with_control_characters_is_rejected() {
        let config = FileConfig {
            api_key: Some("fb\u{7f}key".to_string()),
            ..FileConfig::default()
        };
        assert_eq!(
            config.into_api_config().unwrap_err(),
            ConfigValidationError::InvalidApiKey
        );
    }

    #[test]
    fn test_into_api_config() {
        let config = FileConfig {
            api_key: Some("key".to_string()),
            base_url: Some("http://localhost:9000/v2/".to_string()),
            org_url: Some("https://feedback.example.com".to_string()),
        }
        .into_api_config()
        .unwrap();

        assert_eq!(config.api_key(), "key");
        assert_eq!(config.base_url(), "http://localhost:9000/v2");
        assert_eq!(config.org_url(), Some("https://feedback.example.com"));
    }

    #[test]
    fn test_default_base_url() {
        let config = FileConfig {
            api_key: Some("key".to_string()),
            ..FileConfig::default()
        }
        .into_api_config()
        .unwrap();
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.org_url(), None);
    }

    #[test]
    fn test_invalid_url() {
        let err = FileConfig {
            api_key: Some("key".to_string()),
            base_url: None,
            org_url: Some("feedback.example.com".to_string()),
        }
        .into_api_config()
        .unwrap_err();
        assert_eq!(
            err,
            ConfigValidationError::InvalidUrl {
                field: "org_url",
                value: "feedback.example.com".to_string(),
            }
        );
    }

    #[test]
    fn test_redacted() {
        let config = FileConfig {
            api_key: Some("secret".to_string()),
            ..FileConfig::default()
        };
        let redacted = config.redacted();
        assert_eq!(redacted.api_key.as_deref(), Some("<redacted>"));
        assert_eq!(redacted.base_url, config.base_url);
    }
}
