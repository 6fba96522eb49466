//! Axum route handlers for the interview flow.
//!
//! A failed model call returns an error before the session is touched, so the
//! user can simply click the same action again.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::fairness::analyzer::{analyze, FairnessReport};
use crate::fairness::recorder;
use crate::fairness::store::ResultRecord;
use crate::interview::answers::build_scoring_prompt;
use crate::interview::prompts::{question_prompt, QUESTION_SYSTEM, SCORING_SYSTEM};
use crate::interview::questions::extract_questions;
use crate::interview::scoring::{extract_score, ExtractedScore};
use crate::interview::session::{validate_profile, InterviewSession};
use crate::llm_client::prompts::{QUESTION_MAX_TOKENS, SCORING_MAX_TOKENS, TEMPERATURE};
use crate::llm_client::{ChatMessage, ChatRequest};
use crate::models::candidate::CandidateProfile;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub session: InterviewSession,
    pub requested: i64,
    pub generated: usize,
    /// Set when the model reply contained no numbered questions.
    pub warning: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SubmitAnswersRequest {
    pub answers: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub feedback: String,
    pub score: ExtractedScore,
    pub record: ResultRecord,
    pub candidates: Vec<ResultRecord>,
    pub fairness: FairnessReport,
    pub session: InterviewSession,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/interview/session
pub async fn handle_get_session(State(state): State<AppState>) -> Json<InterviewSession> {
    Json(state.session.lock().await.clone())
}

/// POST /api/v1/interview/questions
///
/// Generates questions from the resume and role, replacing the current session.
pub async fn handle_generate(
    State(state): State<AppState>,
    payload: Result<Json<CandidateProfile>, JsonRejection>,
) -> Result<Json<GenerateResponse>, AppError> {
    let llm = state.llm()?;
    let Json(profile) = payload?;
    validate_profile(&profile)?;

    let request = ChatRequest {
        model: state.model.clone(),
        messages: vec![
            ChatMessage::system(QUESTION_SYSTEM),
            ChatMessage::user(question_prompt(
                &profile.job_role,
                &profile.resume_text,
                profile.question_count,
            )),
        ],
        temperature: TEMPERATURE,
        max_tokens: QUESTION_MAX_TOKENS,
    };

    let text = llm.chat(&request).await?;
    let questions = extract_questions(&text);

    let requested = profile.question_count;
    let generated = questions.len();
    let warning = if questions.is_empty() {
        warn!("Model reply contained no numbered questions");
        Some("The model did not return a numbered list of questions. Try generating again.".to_string())
    } else {
        None
    };
    info!("Generated {generated}/{requested} questions for role '{}'", profile.job_role);

    let mut session = state.session.lock().await;
    session.start(profile, questions);

    Ok(Json(GenerateResponse {
        session: session.clone(),
        requested,
        generated,
        warning,
    }))
}

/// PUT /api/v1/interview/answers
pub async fn handle_submit_answers(
    State(state): State<AppState>,
    payload: Result<Json<SubmitAnswersRequest>, JsonRejection>,
) -> Result<Json<InterviewSession>, AppError> {
    let Json(request) = payload?;
    let mut session = state.session.lock().await;
    session.submit_answers(request.answers)?;
    Ok(Json(session.clone()))
}

/// POST /api/v1/interview/analyze
///
/// Scores the submitted answers, appends the result row and returns the
/// refreshed fairness report.
pub async fn handle_analyze(
    State(state): State<AppState>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let llm = state.llm()?;

    let (session_id, revision, profile, prompt) = {
        let session = state.session.lock().await;
        let (profile, exchanges) = session.ready_for_scoring()?;
        (
            session.id,
            session.revision,
            profile.clone(),
            build_scoring_prompt(exchanges),
        )
    };

    let request = ChatRequest {
        model: state.model.clone(),
        messages: vec![
            ChatMessage::system(SCORING_SYSTEM),
            ChatMessage::user(prompt),
        ],
        temperature: TEMPERATURE,
        max_tokens: SCORING_MAX_TOKENS,
    };

    let feedback = llm.chat(&request).await?;
    let score = extract_score(&feedback);
    if score.fallback {
        warn!("No score on the first feedback line; using default {}", score.score);
    }

    let mut session = state.session.lock().await;
    if session.id != session_id {
        return Err(AppError::SessionState(
            "Questions were regenerated while scoring; analyze the new session instead".to_string(),
        ));
    }
    if session.revision != revision {
        return Err(AppError::SessionState(
            "Answers were resubmitted while scoring; analyze again to score them".to_string(),
        ));
    }

    let (record, candidates) = recorder::record(&state.store, &profile, score.score).await?;
    let fairness = analyze(&candidates);
    for group in fairness.flagged_groups() {
        warn!("{}", group.message);
    }
    session.complete(score.score, feedback.clone());

    info!(
        "Scored candidate '{}': {} (selected={})",
        record.name, record.score, record.selected
    );

    Ok(Json(AnalyzeResponse {
        feedback,
        score,
        record,
        candidates,
        fairness,
        session: session.clone(),
    }))
}
