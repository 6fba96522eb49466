// Skills graph: keyword extraction from resume text and its routes.

pub mod graph;
pub mod handlers;
