//! Question extraction — pulls the numbered list out of the model's reply.

use std::sync::OnceLock;

use regex::Regex;

/// Matches `<number>. <text>` anywhere on a line, so `**1. ...` markdown still counts.
fn numbered_item() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\d+\.[ \t]+(.*)").expect("static question pattern"))
}

/// Returns the list items in the order they appear in `text`.
///
/// Lines without a numbered item are ignored and an empty result is not an
/// error: the caller shows an empty question list instead. Numbers are not
/// used for ordering or validated against the requested count.
pub fn extract_questions(text: &str) -> Vec<String> {
    text.lines()
        .filter_map(|line| numbered_item().captures(line))
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|q| !q.is_empty())
        .collect()
}
