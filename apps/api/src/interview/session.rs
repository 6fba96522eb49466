//! Interview session — the single in-memory session and its lifecycle.
//!
//! `Idle → QuestionsGenerated → AnswersCollected → Scored`. Generating again from
//! any stage starts over with fresh questions. Questions and answers are stored
//! as one sequence of pairs, so they can never drift out of alignment.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::candidate::{CandidateProfile, MAX_QUESTIONS, MIN_QUESTIONS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStage {
    Idle,
    QuestionsGenerated,
    AnswersCollected,
    Scored,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exchange {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct InterviewSession {
    pub id: Uuid,
    pub stage: SessionStage,
    pub profile: Option<CandidateProfile>,
    pub exchanges: Vec<Exchange>,
    /// Bumped on every accepted answer submission within this session.
    pub revision: u64,
    pub score: Option<i64>,
    pub feedback: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl Default for InterviewSession {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4(),
            stage: SessionStage::Idle,
            profile: None,
            exchanges: Vec::new(),
            revision: 0,
            score: None,
            feedback: None,
            updated_at: Utc::now(),
        }
    }
}

/// Checks the form before any model call is made.
pub fn validate_profile(profile: &CandidateProfile) -> Result<(), AppError> {
    if profile.resume_text.trim().is_empty() || profile.job_role.trim().is_empty() {
        return Err(AppError::Validation(
            "Please fill out job role and resume.".to_string(),
        ));
    }
    if !(MIN_QUESTIONS..=MAX_QUESTIONS).contains(&profile.question_count) {
        return Err(AppError::Validation(format!(
            "question_count must be between {MIN_QUESTIONS} and {MAX_QUESTIONS}"
        )));
    }
    Ok(())
}

impl InterviewSession {
    /// Replaces the whole session with freshly generated questions.
    pub fn start(&mut self, profile: CandidateProfile, questions: Vec<String>) {
        *self = Self {
            stage: SessionStage::QuestionsGenerated,
            profile: Some(profile),
            exchanges: questions
                .into_iter()
                .map(|question| Exchange {
                    question,
                    answer: String::new(),
                })
                .collect(),
            ..Self::default()
        };
    }

    /// Stores answers index-aligned with the questions.
    ///
    /// Fewer answers than questions leaves the rest empty; more is rejected.
    /// Resubmitting after scoring clears the previous score.
    pub fn submit_answers(&mut self, answers: Vec<String>) -> Result<(), AppError> {
        if self.stage == SessionStage::Idle {
            return Err(AppError::SessionState(
                "Generate interview questions before submitting answers".to_string(),
            ));
        }
        if self.exchanges.is_empty() {
            return Err(no_questions());
        }
        if answers.len() > self.exchanges.len() {
            return Err(AppError::Validation(format!(
                "Received {} answers for {} questions",
                answers.len(),
                self.exchanges.len()
            )));
        }

        let mut answers = answers.into_iter();
        for exchange in &mut self.exchanges {
            exchange.answer = answers.next().unwrap_or_default();
        }
        self.stage = SessionStage::AnswersCollected;
        self.revision += 1;
        self.score = None;
        self.feedback = None;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Returns what the scoring call needs, or an error if answers are not in yet.
    pub fn ready_for_scoring(&self) -> Result<(&CandidateProfile, &[Exchange]), AppError> {
        if self.stage != SessionStage::Idle && self.exchanges.is_empty() {
            return Err(no_questions());
        }
        match (self.stage, &self.profile) {
            (SessionStage::AnswersCollected | SessionStage::Scored, Some(profile)) => {
                Ok((profile, &self.exchanges))
            }
            _ => Err(AppError::SessionState(
                "Submit answers before requesting analysis".to_string(),
            )),
        }
    }

    pub fn complete(&mut self, score: i64, feedback: String) {
        self.stage = SessionStage::Scored;
        self.score = Some(score);
        self.feedback = Some(feedback);
        self.updated_at = Utc::now();
    }
}

fn no_questions() -> AppError {
    AppError::SessionState("No questions to answer; generate questions again".to_string())
}
