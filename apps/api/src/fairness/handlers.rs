//! Axum route handlers for the fairness dashboard.

use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
    Json,
};
use serde::Serialize;

use crate::errors::AppError;
use crate::fairness::analyzer::{analyze, FairnessReport};
use crate::fairness::recorder::load_all;
use crate::fairness::store::ResultRecord;
use crate::render::bar_chart::render_selection_rates;
use crate::render::SVG_CONTENT_TYPE;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub candidates: Vec<ResultRecord>,
    pub fairness: FairnessReport,
}

/// GET /api/v1/fairness
///
/// Every recorded candidate plus the per-group AIR table.
pub async fn handle_dashboard(
    State(state): State<AppState>,
) -> Result<Json<DashboardResponse>, AppError> {
    let candidates = load_all(&state.store).await?;
    let fairness = analyze(&candidates);
    Ok(Json(DashboardResponse {
        candidates,
        fairness,
    }))
}

/// GET /api/v1/fairness/chart.svg
pub async fn handle_selection_chart(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let candidates = load_all(&state.store).await?;
    let svg = render_selection_rates(&analyze(&candidates));
    Ok(([(header::CONTENT_TYPE, SVG_CONTENT_TYPE)], svg))
}
