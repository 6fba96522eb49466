//! Axum route handlers for the skills graph.

use axum::{extract::rejection::JsonRejection, http::header, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::AppError;
use crate::render::graph::render_skills_graph;
use crate::render::SVG_CONTENT_TYPE;
use crate::skills::graph::{build_skills_graph, SkillEdge, SkillsOutcome};

#[derive(Debug, Deserialize)]
pub struct SkillsRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct SkillsResponse {
    pub found: bool,
    pub skills: Vec<String>,
    pub edges: Vec<SkillEdge>,
    pub message: String,
}

/// POST /api/v1/skills/graph
pub async fn handle_skills_graph(
    payload: Result<Json<SkillsRequest>, JsonRejection>,
) -> Result<Json<SkillsResponse>, AppError> {
    let Json(request) = payload?;
    let response = match build_skills_graph(&request.text) {
        SkillsOutcome::Found(graph) => {
            debug!(
                "Skills graph: {} nodes, {} edges",
                graph.node_count(),
                graph.edge_count()
            );
            SkillsResponse {
                found: true,
                message: format!("Detected {} related skills in the resume", graph.node_count()),
                skills: graph.nodes(),
                edges: graph.edges(),
            }
        }
        SkillsOutcome::NoSkillsFound => SkillsResponse {
            found: false,
            skills: vec![],
            edges: vec![],
            message: "No recognizable skills found in the resume.".to_string(),
        },
    };
    Ok(Json(response))
}

/// POST /api/v1/skills/graph.svg
pub async fn handle_skills_graph_svg(
    payload: Result<Json<SkillsRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(request) = payload?;
    match build_skills_graph(&request.text) {
        SkillsOutcome::Found(graph) => Ok((
            [(header::CONTENT_TYPE, SVG_CONTENT_TYPE)],
            render_skills_graph(&graph),
        )),
        SkillsOutcome::NoSkillsFound => Err(AppError::NoSkillsFound),
    }
}
