// All model prompt text for the interview flow.

pub const QUESTION_SYSTEM: &str = "You are a professional interviewer.";

/// Question generation prompt template.
/// Replace: {job_role}, {resume_text}, {question_count}
pub const QUESTION_PROMPT_TEMPLATE: &str = "You are an expert interviewer for {job_role}.
Candidate's resume: {resume_text}.
Generate {question_count} clear, skill-focused, adaptive questions
based on their skills and job role.
Only list the questions numbered 1 to {question_count}.";

pub const SCORING_SYSTEM: &str = "You are an expert HR and technical interviewer.";

/// Leads the batched scoring prompt built by `answers::build_scoring_prompt`.
pub const SCORING_INSTRUCTION: &str =
    "Analyze the following answers and score them (0–100). Give overall feedback:";

pub fn question_prompt(job_role: &str, resume_text: &str, question_count: i64) -> String {
    QUESTION_PROMPT_TEMPLATE
        .replace("{job_role}", job_role)
        .replace("{resume_text}", resume_text)
        .replace("{question_count}", &question_count.to_string())
}
