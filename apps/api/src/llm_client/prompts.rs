// Shared sampling settings for every model call in the interview flow.
// The prompt text itself lives in interview/prompts.rs next to its callers.

pub const TEMPERATURE: f32 = 0.7;

/// Token budget for the numbered question list.
pub const QUESTION_MAX_TOKENS: u32 = 700;

/// Token budget for the batched answer critique.
pub const SCORING_MAX_TOKENS: u32 = 1000;
