//! Face score result types.
//!
//! A [`ScoreResult`] is only ever built from two finite numbers. The remote
//! service reports the percentile as a label such as `TOP 20%`; the model
//! stores just the number (`20.0`).

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fields extracted from a scoring response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ScoreField {
    /// The face score value.
    Score,
    /// The "TOP n%" percentile rank.
    TopPercentile,
}

impl ScoreField {
    /// All extracted fields, in extraction order.
    pub const ALL: &'static [ScoreField] = &[ScoreField::Score, ScoreField::TopPercentile];

    /// Returns the field name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreField::Score => "score",
            ScoreField::TopPercentile => "top_percentile",
        }
    }
}

impl fmt::Display for ScoreField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A value that cannot be stored in a [`ScoreResult`].
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{field} must be a finite number, got {value}")]
pub struct InvalidScoreError {
    pub field: ScoreField,
    pub value: f64,
}

/// Score and percentile rank returned for one image.
///
/// Serialized as `{"score": 82.5, "top": 20.0}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(try_from = "RawScoreResult")]
pub struct ScoreResult {
    score: f64,
    #[serde(rename = "top")]
    top_percentile: f64,
}

impl ScoreResult {
    /// Create a result, rejecting NaN and infinite values.
    pub fn new(score: f64, top_percentile: f64) -> Result<Self, InvalidScoreError> {
        if !score.is_finite() {
            return Err(InvalidScoreError {
                field: ScoreField::Score,
                value: score,
            });
        }
        if !top_percentile.is_finite() {
            return Err(InvalidScoreError {
                field: ScoreField::TopPercentile,
                value: top_percentile,
            });
        }
        Ok(Self {
            score,
            top_percentile,
        })
    }

    /// Face score (observed range roughly 0-100).
    pub fn score(&self) -> f64 {
        self.score
    }

    /// Percentile rank, e.g. `20.0` for "TOP 20%".
    pub fn top_percentile(&self) -> f64 {
        self.top_percentile
    }

    /// Get a field by name.
    pub fn get(&self, field: ScoreField) -> f64 {
        match field {
            ScoreField::Score => self.score,
            ScoreField::TopPercentile => self.top_percentile,
        }
    }

    /// Serialize as a JSON object with `score` and `top` keys.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl fmt::Display for ScoreResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "score {} (TOP {}%)", self.score, self.top_percentile)
    }
}

#[derive(Deserialize)]
struct RawScoreResult {
    score: f64,
    top: f64,
}

impl TryFrom<RawScoreResult> for ScoreResult {
    type Error = InvalidScoreError;

    fn try_from(raw: RawScoreResult) -> Result<Self, Self::Error> {
        ScoreResult::new(raw.score, raw.top)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_keeps_values() {
        let result = ScoreResult::new(82.5, 20.0).unwrap();
        assert_eq!(result.score(), 82.5);
        assert_eq!(result.top_percentile(), 20.0);
        assert_eq!(result.get(ScoreField::Score), 82.5);
        assert_eq!(result.get(ScoreField::TopPercentile), 20.0);
    }

    #[test]
    fn test_new_rejects_non_finite() {
        let err = ScoreResult::new(f64::NAN, 20.0).unwrap_err();
        assert_eq!(err.field, ScoreField::Score);

        let err = ScoreResult::new(50.0, f64::INFINITY).unwrap_err();
        assert_eq!(err.field, ScoreField::TopPercentile);
    }

    #[test]
    fn test_json_uses_top_key() {
        let result = ScoreResult::new(82.5, 20.0).unwrap();
        let value: serde_json::Value = serde_json::from_str(&result.to_json().unwrap()).unwrap();
        assert_eq!(value["score"], 82.5);
        assert_eq!(value["top"], 20.0);
        assert!(value.get("top_percentile").is_none());
    }

    #[test]
    fn test_deserialize_from_json() {
        let result: ScoreResult = serde_json::from_str(r#"{"score": 41.0, "top": 65.5}"#).unwrap();
        assert_eq!(result, ScoreResult::new(41.0, 65.5).unwrap());

        assert!(serde_json::from_str::<ScoreResult>(r#"{"score": 41.0}"#).is_err());
    }

    #[test]
    fn test_field_display() {
        assert_eq!(ScoreField::Score.to_string(), "score");
        assert_eq!(ScoreField::TopPercentile.to_string(), "top_percentile");
    }

    #[test]
    fn test_result_display() {
        let result = ScoreResult::new(55.0, 30.0).unwrap();
        assert_eq!(result.to_string(), "score 55 (TOP 30%)");
    }
}
