//! Answer aggregation — one scoring prompt covering every exchange.

use crate::interview::prompts::SCORING_INSTRUCTION;
use crate::interview::session::Exchange;

/// Builds the batched scoring prompt.
///
/// Exchanges are 1-indexed in their original order. Unanswered questions are
/// kept with an empty `Answer:` line so they are scored as given.
pub fn build_scoring_prompt(exchanges: &[Exchange]) -> String {
    let mut prompt = String::from(SCORING_INSTRUCTION);
    prompt.push('\n');
    for (i, exchange) in exchanges.iter().enumerate() {
        prompt.push_str(&format!(
            "Q{}: {}\nAnswer: {}\n\n",
            i + 1,
            exchange.question,
            exchange.answer
        ));
    }
    prompt
}
