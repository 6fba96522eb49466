// Interview flow: question generation, answer collection and scoring.
// All model calls go through llm_client.

pub mod answers;
pub mod handlers;
pub mod prompts;
pub mod questions;
pub mod scoring;
pub mod session;
