//! Face score client.
//!
//! One call is one upload: the image is posted to the scoring service, the
//! HTML fragment that comes back is handed to the configured
//! [`ResponseParser`], and the score and percentile are returned. There is
//! no cache and no retry.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use facerate_models::{ImageSource, ScoreResult, DEFAULT_CONTENT_TYPE, DEFAULT_FILE_NAME};
use tracing::{debug, info_span, warn, Instrument};

use crate::config::FaceRateConfig;
use crate::error::{FaceRateError, FaceRateResult};
use crate::metrics::{duration_ms, record_request, OUTCOME_OK};
use crate::parser::{parser_for, ResponseParser};
use crate::transport::{HttpTransport, ImageUpload, ScoreTransport};

/// Scores face images through the remote service.
#[derive(Clone)]
pub struct ScoreClient {
    transport: Arc<dyn ScoreTransport>,
    parser: Arc<dyn ResponseParser>,
}

impl ScoreClient {
    /// Create a client with the HTTP transport and the configured parser.
    pub fn new(config: &FaceRateConfig) -> FaceRateResult<Self> {
        let transport = HttpTransport::new(config)?;
        Ok(Self {
            transport: Arc::new(transport),
            parser: Arc::from(parser_for(config.parser)),
        })
    }

    /// Create from environment variables.
    pub fn from_env() -> FaceRateResult<Self> {
        Self::new(&FaceRateConfig::from_env())
    }

    /// Create a client over any transport and parser.
    pub fn with_parts(transport: Arc<dyn ScoreTransport>, parser: Arc<dyn ResponseParser>) -> Self {
        Self { transport, parser }
    }

    /// Create a client over a custom transport, using the default parser.
    pub fn with_transport(transport: Arc<dyn ScoreTransport>) -> Self {
        Self::with_parts(transport, Arc::from(parser_for(Default::default())))
    }

    /// Score an encoded image.
    pub async fn get_score(&self, image: impl Into<Vec<u8>>) -> FaceRateResult<ScoreResult> {
        let upload = ImageUpload::new(image.into(), DEFAULT_FILE_NAME, DEFAULT_CONTENT_TYPE);
        self.submit(upload).await
    }

    /// Read an image file and score it.
    pub async fn get_score_from_path(&self, path: impl AsRef<Path>) -> FaceRateResult<ScoreResult> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let source = ImageSource::from(path);
        let upload = ImageUpload::new(bytes, source.file_name(), source.content_type());
        self.submit(upload).await
    }

    /// Score either kind of image input.
    pub async fn get_score_from_source(&self, source: ImageSource) -> FaceRateResult<ScoreResult> {
        match source {
            ImageSource::Bytes(bytes) => self.get_score(bytes).await,
            ImageSource::Path(path) => self.get_score_from_path(path).await,
        }
    }

    async fn submit(&self, upload: ImageUpload) -> FaceRateResult<ScoreResult> {
        if upload.bytes.is_empty() {
            return Err(FaceRateError::EmptyImage);
        }

        let span = info_span!(
            "facerate_request",
            file_name = %upload.file_name,
            bytes = upload.bytes.len(),
            parser = self.parser.name()
        );

        let start = Instant::now();
        let result = self.score_upload(upload).instrument(span).await;
        let latency_ms = duration_ms(start.elapsed());

        match &result {
            Ok(_) => record_request(OUTCOME_OK, latency_ms),
            Err(e) => record_request(e.kind(), latency_ms),
        }

        result
    }

    async fn score_upload(&self, upload: ImageUpload) -> FaceRateResult<ScoreResult> {
        let response = self.transport.submit(upload).await.inspect_err(|e| {
            warn!("Scoring request failed: {}", e);
        })?;

        if !response.is_success() {
            warn!(status = response.status, "Scoring service returned an error status");
            return Err(FaceRateError::remote_service(response.status, response.body));
        }

        let result = self.parser.parse(&response.body).inspect_err(|e| {
            warn!(body_len = response.body.len(), "Unexpected scoring response: {}", e);
        })?;

        debug!(
            score = result.score(),
            top = result.top_percentile(),
            "Scored image"
        );

        Ok(result)
    }
}

impl std::fmt::Debug for ScoreClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScoreClient")
            .field("parser", &self.parser.name())
            .finish_non_exhaustive()
    }
}
