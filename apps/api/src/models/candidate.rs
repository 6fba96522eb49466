use serde::{Deserialize, Serialize};

/// Gender options offered on the candidate form.
///
/// Serialized with the exact labels written to the results file, so the
/// fairness groups read back as the same strings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    #[default]
    #[serde(rename = "Prefer not to say")]
    PreferNotToSay,
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn label(self) -> &'static str {
        match self {
            Gender::PreferNotToSay => "Prefer not to say",
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Experience {
    #[default]
    Fresher,
    Junior,
    #[serde(rename = "Mid-level")]
    MidLevel,
    Senior,
}

impl Experience {
    pub fn label(self) -> &'static str {
        match self {
            Experience::Fresher => "Fresher",
            Experience::Junior => "Junior",
            Experience::MidLevel => "Mid-level",
            Experience::Senior => "Senior",
        }
    }
}

pub const MIN_QUESTIONS: i64 = 3;
pub const MAX_QUESTIONS: i64 = 10;
pub const DEFAULT_QUESTIONS: i64 = 5;

fn default_question_count() -> i64 {
    DEFAULT_QUESTIONS
}

/// Everything the candidate form submits before questions are generated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateProfile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub gender: Gender,
    #[serde(default)]
    pub experience: Experience,
    #[serde(default)]
    pub job_role: String,
    #[serde(default)]
    pub resume_text: String,
    /// Range-checked by `validate_profile`, not by the parser.
    #[serde(default = "default_question_count")]
    pub question_count: i64,
}
