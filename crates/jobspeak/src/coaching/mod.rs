//! Interview coaching core: question selection, answer scoring and enrichment,
//! and session summaries. Everything here is synchronous and never fails on
//! user input; degraded input yields degraded (but well-formed) output.

pub mod bank;
pub mod classifier;
pub mod evaluation;
pub mod router;
pub mod safety;
pub mod seed;
pub mod selector;
pub mod summary;
pub mod vocabulary;

use crate::config::CoachingConfig;
use bank::{QuestionBank, QuestionBankError};
use chrono::NaiveDate;
use evaluation::{AnswerEvaluator, AttemptEvaluation, HireLikelihood};
use safety::ContentAnalysis;
use selector::{QuestionSelector, SelectionRequest, SelectionResult, SelectorConfig};
use serde::Serialize;
use std::sync::Arc;
use summary::{Attempt, SessionSummary, SessionType};
use vocabulary::{StarRewrite, VocabInput, VocabularySuggestion};

/// Everything produced for one submitted answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerFeedback {
    #[serde(flatten)]
    pub evaluation: AttemptEvaluation,
    pub vocabulary_suggestions: Vec<String>,
    pub clearer_rewrite: String,
    pub role_vocabulary: Vec<VocabularySuggestion>,
    pub star_rewrite: StarRewrite,
    pub what_worked: Vec<String>,
    pub improve_next: Vec<String>,
    pub hiring_manager_heard: String,
    pub hire_likelihood: HireLikelihood,
    pub content_analysis: ContentAnalysis,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub problematic_quote: Option<String>,
}

impl Attempt {
    /// Shapes a scored answer the way the caller would persist it.
    pub fn from_feedback(
        question_id: impl Into<String>,
        question_text: impl Into<String>,
        answer_text: impl Into<String>,
        feedback: &AnswerFeedback,
    ) -> Self {
        let vocabulary = feedback
            .star_rewrite
            .vocab
            .iter()
            .chain(&feedback.role_vocabulary)
            .map(VocabInput::from)
            .collect();

        Self {
            question_id: question_id.into(),
            question_text: question_text.into(),
            answer_text: answer_text.into(),
            score: Some(feedback.evaluation.score),
            feedback: Some(feedback.evaluation.feedback),
            bullets: feedback.evaluation.bullets.clone(),
            vocabulary,
            clearer_rewrite: feedback.clearer_rewrite.clone(),
            what_worked: feedback.what_worked.clone(),
            improve_next: feedback.improve_next.clone(),
            hiring_manager_heard: Some(feedback.hiring_manager_heard.clone()),
        }
    }
}

/// Bundles the selector and evaluator behind the three coaching entry points.
#[derive(Debug, Clone, Default)]
pub struct Coach {
    selector: QuestionSelector,
    evaluator: AnswerEvaluator,
}

impl Coach {
    pub fn new(selector: QuestionSelector, evaluator: AnswerEvaluator) -> Self {
        Self {
            selector,
            evaluator,
        }
    }

    /// Uses the configured question bank file, or the embedded bank.
    pub fn from_config(config: &CoachingConfig) -> Result<Self, QuestionBankError> {
        let bank = match &config.question_bank {
            Some(path) => {
                let bank = QuestionBank::from_path(path)?;
                tracing::info!(path = %path.display(), questions = bank.len(), "loaded question bank");
                Arc::new(bank)
            }
            None => QuestionBank::standard(),
        };
        Ok(Self::new(
            QuestionSelector::new(bank, SelectorConfig::from(config)),
            AnswerEvaluator::default(),
        ))
    }

    pub fn selector(&self) -> &QuestionSelector {
        &self.selector
    }

    pub fn select_questions(&self, request: &SelectionRequest) -> SelectionResult {
        self.selector.select(request)
    }

    pub fn select_questions_at(&self, request: &SelectionRequest, today: NaiveDate) -> SelectionResult {
        self.selector.select_at(request, today)
    }

    pub fn evaluate_and_enrich(&self, question_text: &str, answer_text: &str) -> AnswerFeedback {
        let evaluation = self.evaluator.evaluate(question_text, answer_text);
        let content_analysis = safety::analyze(answer_text);
        let problematic_quote = safety::extract_problematic_quote(answer_text, &content_analysis);

        let clearer_rewrite =
            vocabulary::generate_clearer_rewrite(question_text, answer_text, evaluation.score);
        let role_vocabulary = vocabulary::generate_role_vocabulary(question_text, answer_text);
        let star_rewrite = vocabulary::generate_star_rewrite(
            question_text,
            answer_text,
            &evaluation.feedback,
            Some(role_vocabulary.as_slice()),
        );
        let hire_likelihood = evaluation::hire_likelihood(
            evaluation.score,
            &evaluation.feedback,
            answer_text,
            &clearer_rewrite,
        );

        if content_analysis.has_inappropriate_content {
            tracing::debug!(
                categories = ?content_analysis.categories(),
                "answer contains inappropriate content"
            );
        }

        AnswerFeedback {
            vocabulary_suggestions: vocabulary::generate_vocabulary_suggestions(answer_text),
            what_worked: evaluation::what_worked(&evaluation.feedback),
            improve_next: evaluation::improve_next(question_text, answer_text),
            hiring_manager_heard: evaluation::hiring_manager_heard(evaluation.score, answer_text)
                .to_string(),
            evaluation,
            clearer_rewrite,
            role_vocabulary,
            star_rewrite,
            hire_likelihood,
            content_analysis,
            problematic_quote,
        }
    }

    pub fn summarize(&self, attempts: &[Attempt], session_type: SessionType) -> SessionSummary {
        summary::summarize(attempts, session_type)
    }
}

/// Selection against the embedded bank, rotating on today's UTC date when the
/// request has no session id.
pub fn select_questions(request: &SelectionRequest) -> SelectionResult {
    QuestionSelector::default().select(request)
}

pub fn evaluate_and_enrich(question_text: &str, answer_text: &str) -> AnswerFeedback {
    Coach::default().evaluate_and_enrich(question_text, answer_text)
}

pub fn summarize(attempts: &[Attempt]) -> SessionSummary {
    summary::summarize(attempts, SessionType::Practice)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feedback_carries_all_enrichments() {
        let feedback = evaluate_and_enrich(
            "Tell me about a time you improved a process.",
            "Our release process took two days. I automated the checklist and the test runs. \
             As a result we cut release time by 75% and shipped weekly.",
        );
        assert!(feedback.evaluation.score > 0);
        assert_eq!(feedback.star_rewrite.vocab.len(), 2);
        assert_eq!(feedback.improve_next.len(), 3);
        assert!(feedback.content_analysis.is_clean());
        assert_eq!(feedback.problematic_quote, None);
        assert_eq!(feedback.star_rewrite.vocab[..], feedback.role_vocabulary[..2]);
    }

    #[test]
    fn empty_answers_still_get_two_words() {
        let feedback = evaluate_and_enrich("Why do you want this role?", "");
        assert_eq!(feedback.evaluation.score, 0);
        assert_eq!(feedback.star_rewrite.vocab.len(), 2);
        assert!(feedback.clearer_rewrite.contains("STAR format"));
    }

    #[test]
    fn attempts_built_from_feedback_feed_the_summary() {
        let question = "Describe a conflict with a coworker.";
        let answer = "We disagreed about scope. I set up a call and we agreed on a smaller first release.";
        let feedback = evaluate_and_enrich(question, answer);
        let attempt = Attempt::from_feedback("q1", question, answer, &feedback);
        assert_eq!(attempt.score, Some(feedback.evaluation.score));
        assert!(attempt.vocabulary.len() >= 2);

        let summary = summarize(&[attempt]);
        assert!(summary.completed);
        assert_eq!(summary.overall_score, feedback.evaluation.score);
        assert_eq!(summary.per_question[0].stronger_example.vocab.len(), 2);
    }

    #[test]
    fn configured_bank_path_must_exist() {
        let config = CoachingConfig {
            question_bank: Some("/definitely/not/here.json".into()),
            ..CoachingConfig::default()
        };
        assert!(matches!(
            Coach::from_config(&config),
            Err(QuestionBankError::Io(_))
        ));
    }
}
