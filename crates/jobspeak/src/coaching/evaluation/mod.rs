mod bullets;
mod config;
mod insights;
pub(crate) mod rules;
mod signals;

pub use config::RubricConfig;
pub use insights::{overall_insights, AverageScores, OverallInsights};
pub use signals::{
    hire_likelihood, hiring_manager_heard, improve_next, what_worked, HireLikelihood,
};

use serde::{Deserialize, Serialize};

/// Stateless scorer that applies the rubric configuration to one answer.
#[derive(Debug, Clone, Default)]
pub struct AnswerEvaluator {
    config: RubricConfig,
}

impl AnswerEvaluator {
    pub fn new(config: RubricConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RubricConfig {
        &self.config
    }

    pub fn evaluate(&self, question_text: &str, answer_text: &str) -> AttemptEvaluation {
        if answer_text.trim().is_empty() {
            return AttemptEvaluation::empty();
        }

        let (feedback, signals) = rules::score_answer(question_text, answer_text, &self.config);
        let bullets = bullets::feedback_bullets(&feedback, &signals, &self.config);

        AttemptEvaluation {
            score: feedback.total(),
            feedback,
            bullets,
        }
    }
}

/// Scores `answer_text` against `question_text` with the default rubric.
pub fn evaluate(question_text: &str, answer_text: &str) -> AttemptEvaluation {
    AnswerEvaluator::default().evaluate(question_text, answer_text)
}

/// Per-criterion breakdown; each part is capped at the rubric's criterion cap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RubricScores {
    pub clarity: u8,
    pub structure: u8,
    pub metrics: u8,
    pub relevance: u8,
}

impl RubricScores {
    /// Sum of the four parts, never above 100 even when the parts arrive from a
    /// caller or a rubric with a larger criterion cap.
    pub fn total(&self) -> u8 {
        let sum = u16::from(self.clarity)
            + u16::from(self.structure)
            + u16::from(self.metrics)
            + u16::from(self.relevance);
        sum.min(100) as u8
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptEvaluation {
    pub score: u8,
    pub feedback: RubricScores,
    pub bullets: Vec<String>,
}

impl AttemptEvaluation {
    fn empty() -> Self {
        Self {
            score: 0,
            feedback: RubricScores::default(),
            bullets: vec![
                "No answer provided".to_string(),
                "Use the STAR format: describe the Situation, your Task, the Action you took, and the Result".to_string(),
            ],
        }
    }
}
