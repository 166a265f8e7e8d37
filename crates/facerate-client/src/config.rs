//! FaceRate client configuration.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{FaceRateError, FaceRateResult};

/// Default upload route of the scoring website.
pub const DEFAULT_ENDPOINT: &str = "https://www.face-score.com/upload";

/// Default multipart field name carrying the image.
pub const DEFAULT_UPLOAD_FIELD: &str = "file";

/// Strategy used to pull values out of the response HTML.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParserKind {
    /// Plain substring scan (`MarkerParser`).
    #[default]
    Marker,
    /// Pattern match tolerant of nested tags (`RegexParser`).
    Regex,
}

impl ParserKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParserKind::Marker => "marker",
            ParserKind::Regex => "regex",
        }
    }
}

impl fmt::Display for ParserKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ParserKind {
    type Err = FaceRateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "marker" => Ok(ParserKind::Marker),
            "regex" => Ok(ParserKind::Regex),
            other => Err(FaceRateError::config_error(format!("Unknown parser: {}", other))),
        }
    }
}

/// FaceRate client configuration.
#[derive(Debug, Clone)]
pub struct FaceRateConfig {
    /// Submission URL
    pub endpoint: String,
    /// Multipart field name for the image
    pub upload_field: String,
    /// Request timeout (whole request, including body)
    pub timeout: Duration,
    /// Connect timeout
    pub connect_timeout: Duration,
    /// Response extraction strategy
    pub parser: ParserKind,
}

impl Default for FaceRateConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            upload_field: DEFAULT_UPLOAD_FIELD.to_string(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            parser: ParserKind::Marker,
        }
    }
}

impl FaceRateConfig {
    /// Create config from environment variables.
    ///
    /// Unset or unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        Self {
            endpoint: std::env::var("FACERATE_ENDPOINT")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            upload_field: std::env::var("FACERATE_UPLOAD_FIELD")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_UPLOAD_FIELD.to_string()),
            timeout: Duration::from_secs(
                std::env::var("FACERATE_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(30),
            ),
            connect_timeout: Duration::from_secs(
                std::env::var("FACERATE_CONNECT_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(10),
            ),
            parser: std::env::var("FACERATE_PARSER")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or_default(),
        }
    }

    /// Point the config at another endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Override the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Select the response parser.
    pub fn with_parser(mut self, parser: ParserKind) -> Self {
        self.parser = parser;
        self
    }

    /// Check the endpoint and timeouts, returning the parsed endpoint.
    pub fn validate(&self) -> FaceRateResult<Url> {
        let url = Url::parse(&self.endpoint).map_err(|e| {
            FaceRateError::config_error(format!("Invalid endpoint '{}': {}", self.endpoint, e))
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(FaceRateError::config_error(format!(
                "Endpoint must be http(s), got '{}'",
                url.scheme()
            )));
        }

        if self.upload_field.trim().is_empty() {
            return Err(FaceRateError::config_error("Upload field name cannot be empty"));
        }

        if self.timeout.is_zero() || self.connect_timeout.is_zero() {
            return Err(FaceRateError::config_error("Timeouts must be greater than zero"));
        }

        Ok(url)
    }
}
