//! Skills graph drawing: nodes evenly spaced on a circle, labels centered on them.

use std::f64::consts::PI;

use crate::render::{document, escape};
use crate::skills::graph::SkillsGraph;

const SIZE: u32 = 480;
const NODE_RADIUS: f64 = 42.0;
const NODE_COLOR: &str = "skyblue";

pub fn render_skills_graph(graph: &SkillsGraph) -> String {
    let nodes = graph.nodes();
    let center = SIZE as f64 / 2.0;
    let ring = if nodes.len() > 1 {
        center - NODE_RADIUS - 8.0
    } else {
        0.0
    };

    // Start at the top and go clockwise.
    let positions: Vec<(f64, f64)> = (0..nodes.len())
        .map(|i| {
            let angle = 2.0 * PI * i as f64 / nodes.len() as f64 - PI / 2.0;
            (center + ring * angle.cos(), center + ring * angle.sin())
        })
        .collect();

    let position_of = |label: &str| {
        nodes
            .iter()
            .position(|n| n == label)
            .map(|i| positions[i])
    };

    let mut body = String::new();

    for edge in graph.edges() {
        if let (Some((x1, y1)), Some((x2, y2))) =
            (position_of(&edge.source), position_of(&edge.target))
        {
            body.push_str(&format!(
                r#"<line x1="{x1:.1}" y1="{y1:.1}" x2="{x2:.1}" y2="{y2:.1}" stroke="gray"/>"#
            ));
        }
    }

    for (label, (x, y)) in nodes.iter().zip(&positions) {
        let label = escape(label);
        body.push_str(&format!(
            r#"<circle cx="{x:.1}" cy="{y:.1}" r="{NODE_RADIUS}" fill="{NODE_COLOR}"/><text x="{x:.1}" y="{:.1}" font-size="10" text-anchor="middle">{label}</text>"#,
            y + 3.5
        ));
    }

    document(SIZE, SIZE, &body)
}
