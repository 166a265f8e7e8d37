//! Client for the face-score.com scoring service.
//!
//! This crate provides:
//! - Image upload (bytes or file path) as a multipart POST
//! - Score and "TOP n%" extraction from the returned HTML fragment
//! - Pluggable transport and response parser for testing
//! - Tracing spans and request metrics
//!
//! ```no_run
//! # async fn run() -> facerate_client::FaceRateResult<()> {
//! use facerate_client::{FaceRateConfig, ScoreClient};
//!
//! let client = ScoreClient::new(&FaceRateConfig::from_env())?;
//! let result = client.get_score_from_path("portrait.jpg").await?;
//! println!("{}", result.to_json().unwrap_or_default());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod metrics;
pub mod parser;
pub mod transport;

pub use client::ScoreClient;
pub use config::{FaceRateConfig, ParserKind, DEFAULT_ENDPOINT, DEFAULT_UPLOAD_FIELD};
pub use error::{FaceRateError, FaceRateResult};
pub use parser::{parser_for, MarkerParser, RegexParser, ResponseParser, SCORE_MARKER, TOP_MARKER};
pub use transport::{HttpTransport, ImageUpload, ScoreTransport, TransportResponse};

pub use facerate_models::{ImageSource, ScoreField, ScoreResult};
