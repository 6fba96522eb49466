//! Skills graph — keyword skills found in resume text, all connected to each other.
//!
//! This is a co-occurrence picture, nothing more: every distinct skill found is
//! joined to every other one, with no weights and no direction.

use std::sync::OnceLock;

use regex::Regex;
use rustworkx_core::petgraph::graph::{NodeIndex, UnGraph};
use serde::Serialize;

/// Recognized skills, in their display spelling.
pub const SKILL_VOCABULARY: &[&str] = &[
    "Python",
    "Java",
    "SQL",
    "HTML",
    "CSS",
    "React",
    "C++",
    "Machine Learning",
    "Data Analysis",
    "AI",
    "Spring Boot",
];

fn skill_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        let alternation = SKILL_VOCABULARY
            .iter()
            .map(|s| regex::escape(s))
            .collect::<Vec<_>>()
            .join("|");
        Regex::new(&format!("(?i)(?:{alternation})")).expect("static skill pattern")
    })
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// A match only counts as a whole word: "Java" inside "JavaScript" does not.
/// Checked by hand because `C++` ends in a non-word character, where `\b` misfires.
fn stands_alone(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
}

/// Returns distinct skills in order of first occurrence, using vocabulary spelling.
pub fn extract_skills(text: &str) -> Vec<&'static str> {
    let mut found: Vec<&'static str> = Vec::new();
    for m in skill_pattern().find_iter(text) {
        if !stands_alone(text, m.start(), m.end()) {
            continue;
        }
        let Some(&skill) = SKILL_VOCABULARY
            .iter()
            .find(|s| s.eq_ignore_ascii_case(m.as_str()))
        else {
            continue;
        };
        if !found.contains(&skill) {
            found.push(skill);
        }
    }
    found
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillEdge {
    pub source: String,
    pub target: String,
}

/// Complete undirected graph over the skills found in one text.
#[derive(Debug, Clone)]
pub struct SkillsGraph {
    graph: UnGraph<String, ()>,
}

impl SkillsGraph {
    fn complete(skills: &[&str]) -> Self {
        let mut graph = UnGraph::<String, ()>::with_capacity(
            skills.len(),
            skills.len() * skills.len().saturating_sub(1) / 2,
        );
        let nodes: Vec<NodeIndex> = skills
            .iter()
            .map(|s| graph.add_node(s.to_string()))
            .collect();
        for (i, &a) in nodes.iter().enumerate() {
            for &b in &nodes[i + 1..] {
                graph.add_edge(a, b, ());
            }
        }
        Self { graph }
    }

    pub fn nodes(&self) -> Vec<String> {
        self.graph
            .node_indices()
            .map(|i| self.graph[i].clone())
            .collect()
    }

    pub fn edges(&self) -> Vec<SkillEdge> {
        self.graph
            .edge_indices()
            .filter_map(|e| self.graph.edge_endpoints(e))
            .map(|(a, b)| SkillEdge {
                source: self.graph[a].clone(),
                target: self.graph[b].clone(),
            })
            .collect()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

/// Result of scanning a text for skills.
#[derive(Debug, Clone)]
pub enum SkillsOutcome {
    Found(SkillsGraph),
    NoSkillsFound,
}

pub fn build_skills_graph(text: &str) -> SkillsOutcome {
    let skills = extract_skills(text);
    if skills.is_empty() {
        SkillsOutcome::NoSkillsFound
    } else {
        SkillsOutcome::Found(SkillsGraph::complete(&skills))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn found(text: &str) -> SkillsGraph {
        match build_skills_graph(text) {
            SkillsOutcome::Found(g) => g,
            SkillsOutcome::NoSkillsFound => panic!("expected skills in {text:?}"),
        }
    }

    #[test]
    fn test_duplicates_collapse_to_one_node() {
        let graph = found("Python, SQL and Python again");
        assert_eq!(graph.nodes(), vec!["Python", "SQL"]);
        assert_eq!(
            graph.edges(),
            vec![SkillEdge {
                source: "Python".to_string(),
                target: "SQL".to_string()
            }]
        );
    }

    #[test]
    fn test_case_insensitive_with_canonical_spelling() {
        assert_eq!(
            extract_skills("python, PYTHON, machine learning"),
            vec!["Python", "Machine Learning"]
        );
    }

    #[test]
    fn test_no_keywords_is_explicit_outcome() {
        assert!(matches!(
            build_skills_graph("Excellent communicator and team player"),
            SkillsOutcome::NoSkillsFound
        ));
        assert!(matches!(build_skills_graph(""), SkillsOutcome::NoSkillsFound));
    }

    #[test]
    fn test_partial_words_do_not_match() {
        assert!(extract_skills("JavaScript and SQLite and PAID work").is_empty());
    }

    #[test]
    fn test_cpp_followed_by_punctuation_matches() {
        assert_eq!(extract_skills("C++, Java."), vec!["C++", "Java"]);
    }

    #[test]
    fn test_graph_is_complete() {
        let graph = found("Python SQL React AI");
        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 6);
    }

    #[test]
    fn test_single_skill_has_no_edges() {
        let graph = found("Spring Boot");
        assert_eq!(graph.nodes(), vec!["Spring Boot"]);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_first_occurrence_order() {
        assert_eq!(
            extract_skills("SQL first, then Data Analysis, then sql again, then HTML/CSS"),
            vec!["SQL", "Data Analysis", "HTML", "CSS"]
        );
    }
}
