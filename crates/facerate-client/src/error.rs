//! FaceRate client error types.

use facerate_models::ScoreField;
use thiserror::Error;

/// Result type for FaceRate operations.
pub type FaceRateResult<T> = Result<T, FaceRateError>;

/// Errors that can occur while scoring an image.
#[derive(Debug, Error)]
pub enum FaceRateError {
    /// No response was received (connection refused, DNS, timeout, ...).
    #[error("Transport error: {0}")]
    Transport(String),

    /// A response was received but its status is not a success.
    #[error("Remote service returned HTTP {status}")]
    RemoteService { status: u16, body: Option<String> },

    /// The response was successful but a field could not be extracted.
    #[error("Failed to parse {field}: {reason}")]
    Parse { field: ScoreField, reason: String },

    #[error("Image is empty")]
    EmptyImage,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl FaceRateError {
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    pub fn remote_service(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        Self::RemoteService {
            status,
            body: if body.is_empty() { None } else { Some(body) },
        }
    }

    pub fn parse(field: ScoreField, reason: impl Into<String>) -> Self {
        Self::Parse {
            field,
            reason: reason.into(),
        }
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    /// True if the service could not be reached.
    pub fn is_transport(&self) -> bool {
        matches!(self, FaceRateError::Transport(_))
    }

    /// True if the service answered with a failure status.
    pub fn is_remote(&self) -> bool {
        matches!(self, FaceRateError::RemoteService { .. })
    }

    /// True if the service answered but the content was unexpected.
    pub fn is_parse(&self) -> bool {
        matches!(self, FaceRateError::Parse { .. })
    }

    /// Field that failed to parse, if this is a parse error.
    pub fn parse_field(&self) -> Option<ScoreField> {
        match self {
            FaceRateError::Parse { field, .. } => Some(*field),
            _ => None,
        }
    }

    /// HTTP status returned by the service, if any.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            FaceRateError::RemoteService { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Short label used for metrics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            FaceRateError::Transport(_) => "transport",
            FaceRateError::RemoteService { .. } => "remote_service",
            FaceRateError::Parse { .. } => "parse",
            FaceRateError::EmptyImage => "empty_image",
            FaceRateError::Io(_) => "io",
            FaceRateError::ConfigError(_) => "config",
        }
    }
}

impl From<reqwest::Error> for FaceRateError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Transport(format!("request timed out: {}", e))
        } else if e.is_connect() {
            Self::Transport(format!("connection failed: {}", e))
        } else {
            Self::Transport(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_service_empty_body_is_none() {
        let err = FaceRateError::remote_service(502, "");
        assert!(matches!(err, FaceRateError::RemoteService { status: 502, body: None }));
        assert_eq!(err.http_status(), Some(502));
        assert!(err.is_remote());
    }

    #[test]
    fn test_remote_service_keeps_body() {
        let err = FaceRateError::remote_service(500, "oops");
        match err {
            FaceRateError::RemoteService { body, .. } => assert_eq!(body.as_deref(), Some("oops")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_field() {
        let err = FaceRateError::parse(ScoreField::TopPercentile, "marker not found");
        assert!(err.is_parse());
        assert_eq!(err.parse_field(), Some(ScoreField::TopPercentile));
        assert_eq!(err.to_string(), "Failed to parse top_percentile: marker not found");
        assert_eq!(err.http_status(), None);
    }

    #[test]
    fn test_kinds() {
        assert_eq!(FaceRateError::transport("refused").kind(), "transport");
        assert_eq!(FaceRateError::EmptyImage.kind(), "empty_image");
        assert_eq!(FaceRateError::config_error("bad").kind(), "config");
        assert!(FaceRateError::transport("refused").is_transport());
    }
}
