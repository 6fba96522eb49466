use std::sync::Arc;

use tokio::sync::Mutex;

use crate::errors::AppError;
use crate::fairness::store::ResultStore;
use crate::interview::session::InterviewSession;
use crate::llm_client::ChatModel;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// `None` when no API key is configured. Only model-backed routes care.
    pub llm: Option<Arc<dyn ChatModel>>,
    pub model: String,
    pub store: ResultStore,
    /// The one interview session this single-user server keeps.
    pub session: Arc<Mutex<InterviewSession>>,
}

impl AppState {
    pub fn new(llm: Option<Arc<dyn ChatModel>>, model: String, store: ResultStore) -> Self {
        Self {
            llm,
            model,
            store,
            session: Arc::new(Mutex::new(InterviewSession::default())),
        }
    }

    pub fn llm(&self) -> Result<&Arc<dyn ChatModel>, AppError> {
        self.llm.as_ref().ok_or_else(|| {
            AppError::Configuration(
                "GROQ_API_KEY is not set; question generation and scoring are unavailable"
                    .to_string(),
            )
        })
    }
}
