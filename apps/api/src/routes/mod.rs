pub mod health;
pub mod ui;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::fairness::handlers as fairness;
use crate::interview::handlers as interview;
use crate::skills::handlers as skills;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(ui::index_handler))
        .route("/health", get(health::health_handler))
        // Interview
        .route("/api/v1/interview/session", get(interview::handle_get_session))
        .route("/api/v1/interview/questions", post(interview::handle_generate))
        .route("/api/v1/interview/answers", put(interview::handle_submit_answers))
        .route("/api/v1/interview/analyze", post(interview::handle_analyze))
        // Fairness dashboard
        .route("/api/v1/fairness", get(fairness::handle_dashboard))
        .route("/api/v1/fairness/chart.svg", get(fairness::handle_selection_chart))
        // Skills graph
        .route("/api/v1/skills/graph", post(skills::handle_skills_graph))
        .route("/api/v1/skills/graph.svg", post(skills::handle_skills_graph_svg))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use serde_json::{json, Value};
    use tempfile::TempDir;
    use tokio::sync::Notify;
    use tower::ServiceExt;

    use super::*;
    use crate::fairness::store::ResultStore;
    use crate::llm_client::{ChatModel, ChatRequest, LlmError};
    use crate::models::candidate::{CandidateProfile, Experience, Gender};

    /// Replays canned replies in order and remembers every request it saw.
    #[derive(Default)]
    struct ScriptedModel {
        replies: Mutex<VecDeque<Result<String, LlmError>>>,
        requests: Mutex<Vec<ChatRequest>>,
    }

    impl ScriptedModel {
        fn new(replies: Vec<Result<String, LlmError>>) -> Arc<Self> {
            Arc::new(Self {
                replies: Mutex::new(replies.into()),
                requests: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl ChatModel for ScriptedModel {
        async fn chat(&self, request: &ChatRequest) -> Result<String, LlmError> {
            self.requests.lock().unwrap().push(request.clone());
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(LlmError::EmptyContent))
        }
    }

    struct Harness {
        state: AppState,
        model: Arc<ScriptedModel>,
        dir: TempDir,
    }

    /// Holds each call until released, so tests can change the session mid-call.
    #[derive(Default)]
    struct GatedModel {
        entered: Notify,
        release: Notify,
    }

    #[async_trait]
    impl ChatModel for GatedModel {
        async fn chat(&self, _request: &ChatRequest) -> Result<String, LlmError> {
            self.entered.notify_one();
            self.release.notified().await;
            Ok("Score: 95/100\nExcellent.".to_string())
        }
    }

    fn state_with(llm: Arc<dyn ChatModel>, dir: &TempDir) -> AppState {
        AppState::new(
            Some(llm),
            "llama-3.1-8b-instant".to_string(),
            ResultStore::new(dir.path().join("results.csv")),
        )
    }

    fn harness(replies: Vec<Result<String, LlmError>>) -> Harness {
        let dir = tempfile::tempdir().unwrap();
        let model = ScriptedModel::new(replies);
        let state = state_with(model.clone(), &dir);
        Harness { state, model, dir }
    }

    async fn send(state: &AppState, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let (status, bytes) = send_raw(state, method, uri, body).await;
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    async fn send_raw(
        state: &AppState,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Vec<u8>) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(b) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(b.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = build_router(state.clone()).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    fn profile() -> Value {
        json!({
            "name": "Asha",
            "gender": "Female",
            "experience": "Junior",
            "job_role": "Data Analyst",
            "resume_text": "5 years Python and SQL experience",
            "question_count": 3
        })
    }

    fn candidate() -> CandidateProfile {
        serde_json::from_value(profile()).unwrap()
    }

    fn questions() -> Vec<String> {
        vec!["First?".to_string(), "Second?".to_string()]
    }

    const THREE_QUESTIONS: &str = "Here are the questions:\n\
        1. How would you clean a messy SQL table?\n\
        2. Describe a Python script you wrote for analysis.\n\
        3. How do you explain findings to stakeholders?";

    #[tokio::test]
    async fn test_end_to_end_interview_records_selected_row() {
        let h = harness(vec![
            Ok(THREE_QUESTIONS.to_string()),
            Ok("Score: 82/100\nClear and practical answers.".to_string()),
        ]);

        let (status, body) = send(&h.state, Method::POST, "/api/v1/interview/questions", Some(profile())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["generated"], 3);
        assert_eq!(body["session"]["stage"], "questions_generated");
        assert_eq!(
            body["session"]["exchanges"][0]["question"],
            "How would you clean a messy SQL table?"
        );

        let (status, body) = send(
            &h.state,
            Method::PUT,
            "/api/v1/interview/answers",
            Some(json!({"answers": ["Dedupe and cast types", "A pandas ETL job", ""]})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["stage"], "answers_collected");

        let (status, body) = send(&h.state, Method::POST, "/api/v1/interview/analyze", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["score"]["score"], 82);
        assert_eq!(body["score"]["fallback"], false);
        assert_eq!(body["record"]["Selected"], 1);
        assert_eq!(body["candidates"].as_array().unwrap().len(), 1);
        assert_eq!(body["fairness"]["adverse_impact_ratios"]["Female"], 1.0);
        assert_eq!(body["session"]["stage"], "scored");

        let csv = std::fs::read_to_string(h.dir.path().join("results.csv")).unwrap();
        assert_eq!(
            csv,
            "Name,Gender,Experience,Job Role,Score,Selected\nAsha,Female,Junior,Data Analyst,82,1\n"
        );

        let requests = h.model.requests.lock().unwrap();
        assert_eq!(requests[0].max_tokens, 700);
        assert_eq!(requests[1].max_tokens, 1000);
        assert!(requests[1].messages[1].content.contains("Q3: How do you explain findings to stakeholders?\nAnswer: \n"));
    }

    #[tokio::test]
    async fn test_generate_requires_resume_and_role() {
        let h = harness(vec![]);
        let mut p = profile();
        p["resume_text"] = json!("");
        let (status, body) = send(&h.state, Method::POST, "/api/v1/interview/questions", Some(p)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert!(h.model.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_api_key_blocks_only_model_routes() {
        let dir = tempfile::tempdir().unwrap();
        let state = AppState::new(
            None,
            "llama-3.1-8b-instant".to_string(),
            ResultStore::new(dir.path().join("results.csv")),
        );

        let (status, body) = send(&state, Method::POST, "/api/v1/interview/questions", Some(profile())).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"]["code"], "CONFIGURATION_ERROR");

        let (status, _) = send(&state, Method::GET, "/api/v1/fairness", None).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = send(&state, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_model_failure_leaves_session_unchanged() {
        let h = harness(vec![
            Ok(THREE_QUESTIONS.to_string()),
            Err(LlmError::RateLimited("too many requests".to_string())),
        ]);
        send(&h.state, Method::POST, "/api/v1/interview/questions", Some(profile())).await;
        send(&h.state, Method::PUT, "/api/v1/interview/answers", Some(json!({"answers": ["a"]}))).await;

        let (status, body) = send(&h.state, Method::POST, "/api/v1/interview/analyze", None).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["code"], "MODEL_REQUEST_ERROR");
        assert!(body["error"]["message"].as_str().unwrap().contains("too many requests"));

        let (_, session) = send(&h.state, Method::GET, "/api/v1/interview/session", None).await;
        assert_eq!(session["stage"], "answers_collected");
        assert_eq!(session["exchanges"][0]["answer"], "a");
        assert!(!h.dir.path().join("results.csv").exists());
    }

    #[tokio::test]
    async fn test_unparseable_reply_yields_empty_question_list() {
        let h = harness(vec![Ok("Sorry, I can only chat about cooking.".to_string())]);
        let (status, body) = send(&h.state, Method::POST, "/api/v1/interview/questions", Some(profile())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["generated"], 0);
        assert!(body["warning"].is_string());
        assert!(body["session"]["exchanges"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_feedback_without_score_uses_default() {
        let h = harness(vec![
            Ok(THREE_QUESTIONS.to_string()),
            Ok("Overall decent answers.\nScore: 40".to_string()),
        ]);
        send(&h.state, Method::POST, "/api/v1/interview/questions", Some(profile())).await;
        send(&h.state, Method::PUT, "/api/v1/interview/answers", Some(json!({"answers": []}))).await;
        let (status, body) = send(&h.state, Method::POST, "/api/v1/interview/analyze", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["score"]["score"], 75);
        assert_eq!(body["score"]["fallback"], true);
        assert_eq!(body["record"]["Selected"], 1);
    }

    #[tokio::test]
    async fn test_analyze_before_answers_is_conflict() {
        let h = harness(vec![Ok(THREE_QUESTIONS.to_string())]);
        send(&h.state, Method::POST, "/api/v1/interview/questions", Some(profile())).await;
        let (status, body) = send(&h.state, Method::POST, "/api/v1/interview/analyze", None).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["code"], "SESSION_STATE");
    }

    #[tokio::test]
    async fn test_repeated_analysis_appends_two_rows() {
        let h = harness(vec![
            Ok(THREE_QUESTIONS.to_string()),
            Ok("60/100".to_string()),
            Ok("90/100".to_string()),
        ]);
        send(&h.state, Method::POST, "/api/v1/interview/questions", Some(profile())).await;
        send(&h.state, Method::PUT, "/api/v1/interview/answers", Some(json!({"answers": ["x"]}))).await;
        send(&h.state, Method::POST, "/api/v1/interview/analyze", None).await;
        let (_, body) = send(&h.state, Method::POST, "/api/v1/interview/analyze", None).await;
        assert_eq!(body["candidates"].as_array().unwrap().len(), 2);

        let (_, dashboard) = send(&h.state, Method::GET, "/api/v1/fairness", None).await;
        assert_eq!(dashboard["candidates"][0]["Score"], 60);
        assert_eq!(dashboard["candidates"][1]["Score"], 90);
        assert_eq!(dashboard["fairness"]["selection_rates"]["Female"], 0.5);
    }

    #[tokio::test]
    async fn test_skills_graph_routes() {
        let h = harness(vec![]);
        let (status, body) = send(
            &h.state,
            Method::POST,
            "/api/v1/skills/graph",
            Some(json!({"text": "Python, SQL and Python again"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["skills"], json!(["Python", "SQL"]));
        assert_eq!(body["edges"], json!([{"source": "Python", "target": "SQL"}]));

        let (status, body) = send(
            &h.state,
            Method::POST,
            "/api/v1/skills/graph",
            Some(json!({"text": "Great at teamwork"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["found"], false);

        let (status, svg) = send_raw(
            &h.state,
            Method::POST,
            "/api/v1/skills/graph.svg",
            Some(json!({"text": "React and CSS"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(String::from_utf8(svg).unwrap().starts_with("<svg"));

        let (status, body) = send(
            &h.state,
            Method::POST,
            "/api/v1/skills/graph.svg",
            Some(json!({"text": ""})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NO_SKILLS_FOUND");
    }

    #[tokio::test]
    async fn test_index_and_chart_render() {
        let h = harness(vec![]);
        let (status, html) = send_raw(&h.state, Method::GET, "/", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(String::from_utf8(html).unwrap().contains("<html"));

        let (status, svg) = send_raw(&h.state, Method::GET, "/api/v1/fairness/chart.svg", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(String::from_utf8(svg).unwrap().contains("No results recorded yet"));
    }

    #[tokio::test]
    async fn test_empty_question_list_cannot_be_answered_or_scored() {
        let h = harness(vec![
            Ok("Sorry, I can only chat about cooking.".to_string()),
            Ok("Score: 88/100".to_string()),
        ]);
        send(&h.state, Method::POST, "/api/v1/interview/questions", Some(profile())).await;

        let (status, body) = send(&h.state, Method::PUT, "/api/v1/interview/answers", Some(json!({"answers": []}))).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["code"], "SESSION_STATE");

        let (status, body) = send(&h.state, Method::POST, "/api/v1/interview/analyze", None).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["code"], "SESSION_STATE");

        assert_eq!(h.model.requests.lock().unwrap().len(), 1);
        assert!(!h.dir.path().join("results.csv").exists());
    }

    #[tokio::test]
    async fn test_bad_profile_bodies_are_validation_errors() {
        let h = harness(vec![]);
        let mut too_many = profile();
        too_many["question_count"] = json!(300);
        let mut negative = profile();
        negative["question_count"] = json!(-1);
        let mut no_role = profile();
        no_role.as_object_mut().unwrap().remove("job_role");
        let mut bad_gender = profile();
        bad_gender["gender"] = json!("Robot");

        for body in [too_many, negative, no_role, bad_gender] {
            let (status, body) = send(&h.state, Method::POST, "/api/v1/interview/questions", Some(body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        }
        assert!(h.model.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_json_is_validation_error() {
        let h = harness(vec![]);
        for uri in ["/api/v1/interview/questions", "/api/v1/skills/graph"] {
            let request = Request::builder()
                .method(Method::POST)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{\"job_role\": "))
                .unwrap();
            let response = build_router(h.state.clone()).oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
            let body: Value = serde_json::from_slice(&bytes).unwrap();
            assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        }

        let (status, body) = send(&h.state, Method::PUT, "/api/v1/interview/answers", Some(json!({"answers": "yes"}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    /// Starts an analysis against a gated model and waits until the model is called.
    async fn analysis_in_flight(
        model: &Arc<GatedModel>,
        state: &AppState,
    ) -> tokio::task::JoinHandle<(StatusCode, Value)> {
        {
            let mut session = state.session.lock().await;
            session.start(candidate(), questions());
            session.submit_answers(vec!["old answer".to_string()]).unwrap();
        }
        let in_flight = state.clone();
        let handle = tokio::spawn(async move {
            send(&in_flight, Method::POST, "/api/v1/interview/analyze", None).await
        });
        model.entered.notified().await;
        handle
    }

    #[tokio::test]
    async fn test_regenerate_during_scoring_discards_the_score() {
        let dir = tempfile::tempdir().unwrap();
        let model = Arc::new(GatedModel::default());
        let state = state_with(model.clone(), &dir);

        let analysis = analysis_in_flight(&model, &state).await;
        let mut fresh = candidate();
        fresh.gender = Gender::Male;
        fresh.experience = Experience::Senior;
        state.session.lock().await.start(fresh, vec!["New?".to_string()]);
        model.release.notify_one();

        let (status, body) = analysis.await.unwrap();
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["code"], "SESSION_STATE");

        let (_, session) = send(&state, Method::GET, "/api/v1/interview/session", None).await;
        assert_eq!(session["stage"], "questions_generated");
        assert!(session["score"].is_null());
        assert!(!dir.path().join("results.csv").exists());
    }

    #[tokio::test]
    async fn test_resubmit_during_scoring_discards_the_score() {
        let dir = tempfile::tempdir().unwrap();
        let model = Arc::new(GatedModel::default());
        let state = state_with(model.clone(), &dir);

        let analysis = analysis_in_flight(&model, &state).await;
        let (status, _) = send(
            &state,
            Method::PUT,
            "/api/v1/interview/answers",
            Some(json!({"answers": ["new answer"]})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        model.release.notify_one();

        let (status, body) = analysis.await.unwrap();
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["code"], "SESSION_STATE");

        let (_, session) = send(&state, Method::GET, "/api/v1/interview/session", None).await;
        assert_eq!(session["stage"], "answers_collected");
        assert_eq!(session["exchanges"][0]["answer"], "new answer");
        assert!(session["score"].is_null());
        assert!(!dir.path().join("results.csv").exists());
    }
}
