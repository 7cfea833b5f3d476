use crate::config::{CoachingConfig, DEFAULT_RECENT_WINDOW};
use serde::{Deserialize, Serialize};

/// Relevance weights, pool sizing and mock-interview quotas for question selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorConfig {
    pub exact_role: u32,
    pub wildcard_role: u32,
    pub exact_seniority: u32,
    pub wildcard_seniority: u32,
    pub focus_area: u32,
    /// Candidates considered for shuffling, as a multiple of the requested count.
    pub pool_multiplier: usize,
    pub behavioral_quota: usize,
    pub role_specific_quota: usize,
    pub focus_quota: usize,
    /// History length the HTTP and CLI layers keep before asking the selector
    /// (see `SelectionRequest::retain_recent`).
    pub recent_window: usize,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            exact_role: 10,
            wildcard_role: 1,
            exact_seniority: 5,
            wildcard_seniority: 1,
            focus_area: 8,
            pool_multiplier: 3,
            behavioral_quota: 2,
            role_specific_quota: 2,
            focus_quota: 1,
            recent_window: DEFAULT_RECENT_WINDOW,
        }
    }
}

impl From<&CoachingConfig> for SelectorConfig {
    fn from(config: &CoachingConfig) -> Self {
        Self {
            recent_window: config.recent_window,
            ..Self::default()
        }
    }
}
