//! SVG rendering for the dashboard chart and the skills graph.
//!
//! Output is a self-contained `<svg>` string the browser can drop into the page.

pub mod bar_chart;
pub mod graph;

pub const SVG_CONTENT_TYPE: &str = "image/svg+xml";

/// Escapes text for use in SVG element content and attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Wraps pre-rendered elements in an `<svg>` root of the given size.
pub fn document(width: u32, height: u32, body: &str) -> String {
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}" font-family="sans-serif">{body}</svg>"#
    )
}
