//! Selection-rate bar chart, one bar per gender group.

use crate::fairness::analyzer::{FairnessReport, Verdict};
use crate::render::{document, escape};

const WIDTH: u32 = 560;
const HEIGHT: u32 = 320;
const MARGIN_LEFT: f64 = 48.0;
const MARGIN_BOTTOM: f64 = 48.0;
const MARGIN_TOP: f64 = 20.0;

const FAIR_COLOR: &str = "#4c78a8";
const FLAGGED_COLOR: &str = "#e45756";

/// Renders selection rates on a fixed 0–1 axis. Flagged groups are drawn in red.
pub fn render_selection_rates(report: &FairnessReport) -> String {
    let plot_width = WIDTH as f64 - MARGIN_LEFT - 16.0;
    let plot_height = HEIGHT as f64 - MARGIN_TOP - MARGIN_BOTTOM;
    let baseline = MARGIN_TOP + plot_height;

    let mut body = String::new();

    // y axis with ticks at 0, 0.25, 0.5, 0.75, 1
    for i in 0..=4 {
        let value = i as f64 * 0.25;
        let y = baseline - value * plot_height;
        body.push_str(&format!(
            r##"<line x1="{MARGIN_LEFT}" y1="{y:.1}" x2="{:.1}" y2="{y:.1}" stroke="#ddd"/><text x="{:.1}" y="{:.1}" font-size="11" text-anchor="end">{value:.2}</text>"##,
            MARGIN_LEFT + plot_width,
            MARGIN_LEFT - 6.0,
            y + 4.0
        ));
    }

    if report.groups.is_empty() {
        body.push_str(&format!(
            r#"<text x="{:.1}" y="{:.1}" font-size="14" text-anchor="middle">No results recorded yet</text>"#,
            MARGIN_LEFT + plot_width / 2.0,
            MARGIN_TOP + plot_height / 2.0
        ));
        return document(WIDTH, HEIGHT, &body);
    }

    let slot = plot_width / report.groups.len() as f64;
    let bar_width = slot * 0.6;

    for (i, group) in report.groups.iter().enumerate() {
        let x = MARGIN_LEFT + slot * i as f64 + (slot - bar_width) / 2.0;
        let bar_height = group.selection_rate.clamp(0.0, 1.0) * plot_height;
        let color = match group.verdict {
            Verdict::Fair => FAIR_COLOR,
            Verdict::PotentialBias => FLAGGED_COLOR,
        };
        let label = escape(&group.group);
        body.push_str(&format!(
            r#"<rect x="{x:.1}" y="{:.1}" width="{bar_width:.1}" height="{bar_height:.1}" fill="{color}"><title>{label}: {:.2}</title></rect>"#,
            baseline - bar_height,
            group.selection_rate
        ));
        body.push_str(&format!(
            r#"<text x="{:.1}" y="{:.1}" font-size="12" text-anchor="middle">{label}</text>"#,
            x + bar_width / 2.0,
            baseline + 18.0
        ));
    }

    body.push_str(&format!(
        r#"<line x1="{MARGIN_LEFT}" y1="{baseline:.1}" x2="{:.1}" y2="{baseline:.1}" stroke="black"/>"#,
        MARGIN_LEFT + plot_width
    ));

    document(WIDTH, HEIGHT, &body)
}
