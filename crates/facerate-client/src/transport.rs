//! Outbound transport for image submissions.
//!
//! [`ScoreTransport`] is the single seam between the client and the network:
//! submit one upload, get back a status and body. [`HttpTransport`] is the
//! reqwest implementation used in production.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use tracing::debug;
use url::Url;

use crate::config::FaceRateConfig;
use crate::error::{FaceRateError, FaceRateResult};

/// One image ready to be sent.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub content_type: String,
}

impl ImageUpload {
    pub fn new(bytes: Vec<u8>, file_name: impl Into<String>, content_type: impl Into<String>) -> Self {
        Self {
            bytes,
            file_name: file_name.into(),
            content_type: content_type.into(),
        }
    }
}

/// Raw response from the scoring service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// True for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Submits an image and returns whatever the service answered.
///
/// Implementations return `Err` only when no response was received.
#[async_trait]
pub trait ScoreTransport: Send + Sync {
    async fn submit(&self, upload: ImageUpload) -> FaceRateResult<TransportResponse>;
}

/// Multipart POST over reqwest.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: Client,
    endpoint: Url,
    upload_field: String,
}

impl HttpTransport {
    /// Build a transport with the configured endpoint and timeouts.
    pub fn new(config: &FaceRateConfig) -> FaceRateResult<Self> {
        let endpoint = config.validate()?;

        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(concat!("facerate-client/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FaceRateError::config_error(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            endpoint,
            upload_field: config.upload_field.clone(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl ScoreTransport for HttpTransport {
    async fn submit(&self, upload: ImageUpload) -> FaceRateResult<TransportResponse> {
        let size = upload.bytes.len();
        let part = Part::bytes(upload.bytes)
            .file_name(upload.file_name)
            .mime_str(&upload.content_type)
            .map_err(|e| {
                FaceRateError::config_error(format!(
                    "Invalid content type '{}': {}",
                    upload.content_type, e
                ))
            })?;
        let form = Form::new().part(self.upload_field.clone(), part);

        debug!(endpoint = %self.endpoint, bytes = size, "Submitting image");

        let response = self
            .http
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        let body = if status.is_success() {
            response.text().await?
        } else {
            response.text().await.unwrap_or_default()
        };

        debug!(status = status.as_u16(), body_len = body.len(), "Received response");

        Ok(TransportResponse::new(status.as_u16(), body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_success_range() {
        assert!(TransportResponse::new(200, "").is_success());
        assert!(TransportResponse::new(204, "").is_success());
        assert!(!TransportResponse::new(302, "").is_success());
        assert!(!TransportResponse::new(404, "").is_success());
        assert!(!TransportResponse::new(503, "").is_success());
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = FaceRateConfig::default().with_endpoint("::nope::");
        assert!(matches!(HttpTransport::new(&config), Err(FaceRateError::ConfigError(_))));
    }

    #[tokio::test]
    async fn test_invalid_content_type_is_config_error() {
        let config = FaceRateConfig::default().with_endpoint("http://127.0.0.1:9/upload");
        let transport = HttpTransport::new(&config).unwrap();

        let upload = ImageUpload::new(vec![1, 2, 3], "image.jpg", "not a mime type");
        let err = transport.submit(upload).await.unwrap_err();

        assert!(matches!(err, FaceRateError::ConfigError(_)), "got {err:?}");
    }

    #[test]
    fn test_new_keeps_endpoint() {
        let config = FaceRateConfig::default().with_endpoint("http://127.0.0.1:8080/upload");
        let transport = HttpTransport::new(&config).unwrap();
        assert_eq!(transport.endpoint().as_str(), "http://127.0.0.1:8080/upload");
    }
}
