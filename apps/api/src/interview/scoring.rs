//! Score extraction — reads the overall score off the model's critique.
//!
//! Only the first line is searched and the first run of digits wins. Anything
//! else falls back to `DEFAULT_SCORE`.
//! Scores are not clamped, so `150` on the first line is recorded as 150.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

pub const DEFAULT_SCORE: i64 = 75;

/// Scores at or above this mark the candidate as selected.
pub const SELECTION_THRESHOLD: i64 = 70;

/// Outcome of reading a score from feedback text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExtractedScore {
    pub score: i64,
    /// True when no usable number was found and `DEFAULT_SCORE` was used.
    pub fallback: bool,
}

fn digit_run() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\d+").expect("static digit pattern"))
}

pub fn extract_score(feedback: &str) -> ExtractedScore {
    let first_line = feedback.lines().next().unwrap_or("");

    // A digit run too long for i64 is treated like no digits at all.
    match digit_run()
        .find(first_line)
        .and_then(|m| m.as_str().parse::<i64>().ok())
    {
        Some(score) => ExtractedScore {
            score,
            fallback: false,
        },
        None => ExtractedScore {
            score: DEFAULT_SCORE,
            fallback: true,
        },
    }
}

pub fn is_selected(score: i64) -> bool {
    score >= SELECTION_THRESHOLD
}
