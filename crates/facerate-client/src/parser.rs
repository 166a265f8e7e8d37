//! Score extraction from the service's HTML response.
//!
//! The service does not expose a structured API. Its result page is an HTML
//! fragment in which the score sits inside an element tagged
//! `facescore-text10` and the percentile label (`TOP 20%`) inside one tagged
//! `facescore-text12`. Both parsers locate those markers by text search, so
//! any markup change on the remote side surfaces as a parse error.

use std::sync::LazyLock;

use facerate_models::{ScoreField, ScoreResult};
use regex::{Regex, RegexBuilder};

use crate::config::ParserKind;
use crate::error::{FaceRateError, FaceRateResult};

/// Class marker of the element holding the score.
pub const SCORE_MARKER: &str = "facescore-text10";

/// Class marker of the element holding the "TOP n%" label.
pub const TOP_MARKER: &str = "facescore-text12";

/// Prefix of the percentile label.
pub const TOP_PREFIX: &str = "TOP";

/// Extracts a [`ScoreResult`] from a response body.
pub trait ResponseParser: Send + Sync {
    /// Parser name, for logs.
    fn name(&self) -> &'static str;

    /// Extract both fields, failing with [`FaceRateError::Parse`].
    fn parse(&self, body: &str) -> FaceRateResult<ScoreResult>;
}

/// Build the parser selected in config.
pub fn parser_for(kind: ParserKind) -> Box<dyn ResponseParser> {
    match kind {
        ParserKind::Marker => Box::new(MarkerParser::default()),
        ParserKind::Regex => Box::new(RegexParser::default()),
    }
}

// =============================================================================
// Marker scan
// =============================================================================

/// Finds each marker, then reads the text between the next `>` and `<`.
#[derive(Debug, Clone)]
pub struct MarkerParser {
    score_marker: String,
    top_marker: String,
}

impl Default for MarkerParser {
    fn default() -> Self {
        Self::new(SCORE_MARKER, TOP_MARKER)
    }
}

impl MarkerParser {
    pub fn new(score_marker: impl Into<String>, top_marker: impl Into<String>) -> Self {
        Self {
            score_marker: score_marker.into(),
            top_marker: top_marker.into(),
        }
    }

    /// Text content directly following the tag that contains `marker`.
    fn element_text<'a>(body: &'a str, marker: &str, field: ScoreField) -> FaceRateResult<&'a str> {
        let start = body
            .find(marker)
            .ok_or_else(|| FaceRateError::parse(field, format!("marker '{}' not found", marker)))?;

        let rest = &body[start + marker.len()..];
        let open_end = rest
            .find('>')
            .ok_or_else(|| FaceRateError::parse(field, "unterminated tag after marker"))?;

        let content = &rest[open_end + 1..];
        let text = match content.find('<') {
            Some(end) => &content[..end],
            None => content,
        };

        Ok(text.trim())
    }
}

impl ResponseParser for MarkerParser {
    fn name(&self) -> &'static str {
        "marker"
    }

    fn parse(&self, body: &str) -> FaceRateResult<ScoreResult> {
        let score_text = Self::element_text(body, &self.score_marker, ScoreField::Score)?;
        let score = parse_number(score_text, ScoreField::Score)?;

        let top_text = Self::element_text(body, &self.top_marker, ScoreField::TopPercentile)?;
        let top = parse_top_label(top_text)?;

        build_result(score, top)
    }
}

// =============================================================================
// Regex scan
// =============================================================================

/// Matches the marker, any nested opening tags, then the number.
///
/// Tolerates `<span>` wrappers, extra whitespace, and lowercase `top`.
#[derive(Debug, Clone)]
pub struct RegexParser {
    score_marker: String,
    top_marker: String,
    score_re: Regex,
    top_re: Regex,
}

// Markers are escaped before compilation, so the default patterns always build.
static DEFAULT_REGEX_PARSER: LazyLock<RegexParser> =
    LazyLock::new(|| RegexParser::new(SCORE_MARKER, TOP_MARKER).unwrap());

impl Default for RegexParser {
    fn default() -> Self {
        DEFAULT_REGEX_PARSER.clone()
    }
}

impl RegexParser {
    pub fn new(score_marker: &str, top_marker: &str) -> FaceRateResult<Self> {
        // Opening tags only: a closing tag ends the element, so the value
        // is never taken from a sibling.
        const NESTED_TAGS: &str = r"[^>]*>\s*(?:<[^/>][^>]*>\s*)*";

        let score_re = Self::compile(&format!(
            r"{}{}([+-]?\d+(?:\.\d+)?)\s*<",
            regex::escape(score_marker),
            NESTED_TAGS
        ))?;
        let top_re = Self::compile(&format!(
            r"{}{}{}\s*(\d+(?:\.\d+)?)\s*%",
            regex::escape(top_marker),
            NESTED_TAGS,
            TOP_PREFIX
        ))?;

        Ok(Self {
            score_marker: score_marker.to_string(),
            top_marker: top_marker.to_string(),
            score_re,
            top_re,
        })
    }

    fn compile(pattern: &str) -> FaceRateResult<Regex> {
        RegexBuilder::new(pattern)
            .case_insensitive(true)
            .dot_matches_new_line(true)
            .build()
            .map_err(|e| FaceRateError::config_error(format!("Invalid marker pattern: {}", e)))
    }

    fn capture(
        re: &Regex,
        body: &str,
        marker: &str,
        field: ScoreField,
    ) -> FaceRateResult<f64> {
        if !body.to_ascii_lowercase().contains(&marker.to_ascii_lowercase()) {
            return Err(FaceRateError::parse(field, format!("marker '{}' not found", marker)));
        }

        let text = re
            .captures(body)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str())
            .ok_or_else(|| FaceRateError::parse(field, "no numeric value after marker"))?;

        parse_number(text, field)
    }
}

impl ResponseParser for RegexParser {
    fn name(&self) -> &'static str {
        "regex"
    }

    fn parse(&self, body: &str) -> FaceRateResult<ScoreResult> {
        let score = Self::capture(&self.score_re, body, &self.score_marker, ScoreField::Score)?;
        let top = Self::capture(&self.top_re, body, &self.top_marker, ScoreField::TopPercentile)?;
        build_result(score, top)
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn parse_number(text: &str, field: ScoreField) -> FaceRateResult<f64> {
    let value: f64 = text
        .trim()
        .parse()
        .map_err(|_| FaceRateError::parse(field, format!("'{}' is not a number", text)))?;

    if !value.is_finite() {
        return Err(FaceRateError::parse(field, format!("'{}' is not a finite number", text)));
    }

    Ok(value)
}

/// Parse a label of the form `TOP <number>%`.
fn parse_top_label(text: &str) -> FaceRateResult<f64> {
    let field = ScoreField::TopPercentile;

    let rest = text
        .get(..TOP_PREFIX.len())
        .filter(|p| p.eq_ignore_ascii_case(TOP_PREFIX))
        .map(|_| &text[TOP_PREFIX.len()..])
        .ok_or_else(|| FaceRateError::parse(field, format!("expected 'TOP <n>%', got '{}'", text)))?;

    let number = rest
        .trim()
        .strip_suffix('%')
        .ok_or_else(|| FaceRateError::parse(field, format!("missing '%' in '{}'", text)))?;

    parse_number(number, field)
}

fn build_result(score: f64, top: f64) -> FaceRateResult<ScoreResult> {
    ScoreResult::new(score, top).map_err(|e| FaceRateError::parse(e.field, e.to_string()))
}
