// Fairness pipeline: persisted result rows, adverse-impact analysis and the dashboard.

pub mod analyzer;
pub mod handlers;
pub mod recorder;
pub mod store;
