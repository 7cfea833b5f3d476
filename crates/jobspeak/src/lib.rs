//! Interview-practice coaching: personalised question selection, rule-based
//! answer scoring, content-safe rewrites, and session summaries.

pub mod coaching;
pub mod config;
pub mod error;
pub mod telemetry;

pub use coaching::{evaluate_and_enrich, select_questions, summarize, AnswerFeedback, Coach};
