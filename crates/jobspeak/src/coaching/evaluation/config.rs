use serde::{Deserialize, Serialize};

/// Product-tuned constants for the four-part answer rubric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RubricConfig {
    /// Ceiling for each of clarity, structure, metrics and relevance.
    pub criterion_cap: u8,
    pub ideal_words: (usize, usize),
    pub acceptable_words: (usize, usize),
    pub minimum_words: usize,
    pub relevance_baseline: u8,
    pub strong_overlap: f32,
    pub partial_overlap: f32,
    /// Single-sentence answers shorter than this lose structure points.
    pub fragment_word_limit: usize,
    pub fragment_penalty: u8,
}

impl Default for RubricConfig {
    fn default() -> Self {
        Self {
            criterion_cap: 25,
            ideal_words: (15, 300),
            acceptable_words: (10, 400),
            minimum_words: 5,
            relevance_baseline: 15,
            strong_overlap: 0.3,
            partial_overlap: 0.2,
            fragment_word_limit: 25,
            fragment_penalty: 5,
        }
    }
}
