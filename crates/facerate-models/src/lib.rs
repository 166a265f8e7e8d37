//! Shared data models for the FaceRate client.
//!
//! This crate provides Serde-serializable types for:
//! - Face score results (score + "TOP n%" percentile)
//! - Image inputs (raw bytes or a local file path)

pub mod image;
pub mod score;

// Re-export common types
pub use image::{ImageSource, DEFAULT_CONTENT_TYPE, DEFAULT_FILE_NAME};
pub use score::{InvalidScoreError, ScoreField, ScoreResult};
