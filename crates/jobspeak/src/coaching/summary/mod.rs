//! Session-level aggregation of scored attempts.

mod per_question;

pub use per_question::{QuestionBreakdown, StrongerExample};

use super::evaluation::{overall_insights, AverageScores, RubricScores};
use super::vocabulary::VocabInput;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

const QUESTION_PREVIEW_CHARS: usize = 60;

const RISK_DETAILS: [&str; 5] = [
    "Focus on adding more concrete examples and measurable outcomes to strengthen your answers.",
    "Work on connecting your actions directly to business results or team impact.",
    "Practice explaining your decision-making process more clearly to show how you think.",
    "Try to include specific numbers or percentages to make your achievements more tangible.",
    "Strengthen your responses by clearly stating what changed as a result of your work.",
];

/// One submitted answer as persisted by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Attempt {
    #[serde(alias = "question_id")]
    pub question_id: String,
    #[serde(alias = "question_text")]
    pub question_text: String,
    #[serde(alias = "answer_text", alias = "transcript")]
    pub answer_text: String,
    pub score: Option<u8>,
    pub feedback: Option<RubricScores>,
    pub bullets: Vec<String>,
    pub vocabulary: Vec<VocabInput>,
    #[serde(alias = "clearer_rewrite")]
    pub clearer_rewrite: String,
    #[serde(alias = "what_worked")]
    pub what_worked: Vec<String>,
    #[serde(alias = "improve_next")]
    pub improve_next: Vec<String>,
    #[serde(alias = "hiring_manager_heard")]
    pub hiring_manager_heard: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionType {
    #[default]
    Practice,
    Mock,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    StrongRecommend,
    RecommendWithReservations,
    NotRecommendedYet,
}

impl Recommendation {
    pub fn for_score(overall_score: u8) -> Self {
        match overall_score {
            80.. => Recommendation::StrongRecommend,
            60..=79 => Recommendation::RecommendWithReservations,
            _ => Recommendation::NotRecommendedYet,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Recommendation::StrongRecommend => {
                "Strong performance! You demonstrated excellent interview skills."
            }
            Recommendation::RecommendWithReservations => {
                "Good effort! With some refinement, you'll be interview-ready."
            }
            Recommendation::NotRecommendedYet => {
                "Keep practicing! Focus on the areas for improvement below."
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryBullet {
    pub question: String,
    pub score: u8,
    pub feedback: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSummary {
    pub session_type: SessionType,
    pub attempt_count: usize,
    pub overall_score: u8,
    pub completed: bool,
    pub recommendation: Recommendation,
    pub recommendation_message: String,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub avg_scores: AverageScores,
    pub strongest_area: String,
    pub biggest_risk: String,
    pub biggest_risk_detail: String,
    pub hiring_manager_heard: String,
    /// First sentence of the best-scoring attempt's rewrite.
    pub improved_example: String,
    pub bullets: Vec<SummaryBullet>,
    #[serde(rename = "perQuestion")]
    pub per_question: Vec<QuestionBreakdown>,
}

/// Aggregates an ordered list of attempts. Vocabulary uniqueness is scoped to this
/// call; concurrent summaries for different sessions share nothing.
pub fn summarize(attempts: &[Attempt], session_type: SessionType) -> SessionSummary {
    if attempts.is_empty() {
        return empty_summary(session_type);
    }

    let scores: Vec<u8> = attempts.iter().filter_map(|attempt| attempt.score).collect();
    let overall_score = mean_score(&scores);
    let recommendation = Recommendation::for_score(overall_score);

    let insights = overall_insights(attempts.iter().filter_map(|attempt| attempt.feedback.as_ref()));
    let biggest_risk = insights
        .weaknesses
        .first()
        .cloned()
        .unwrap_or_else(|| "No major risks identified".to_string());

    let bullets = attempts
        .iter()
        .enumerate()
        .map(|(index, attempt)| {
            let preview: String = attempt
                .question_text
                .chars()
                .take(QUESTION_PREVIEW_CHARS)
                .collect();
            SummaryBullet {
                question: format!("Q{}: {preview}...", index + 1),
                score: attempt.score.unwrap_or(0),
                feedback: attempt
                    .bullets
                    .first()
                    .cloned()
                    .unwrap_or_else(|| "No feedback available".to_string()),
            }
        })
        .collect();

    let per_question = per_question::breakdown(attempts);
    tracing::debug!(
        attempts = attempts.len(),
        scored = scores.len(),
        overall_score,
        "summarized session"
    );

    SessionSummary {
        session_type,
        attempt_count: attempts.len(),
        overall_score,
        completed: !scores.is_empty(),
        recommendation,
        recommendation_message: recommendation.message().to_string(),
        strongest_area: strongest_area(insights.strengths.first().map(String::as_str)).to_string(),
        biggest_risk_detail: risk_detail(&insights.weaknesses, overall_score).to_string(),
        biggest_risk,
        strengths: insights.strengths,
        weaknesses: insights.weaknesses,
        avg_scores: insights.avg_scores,
        hiring_manager_heard: latest_interpretation(attempts),
        improved_example: improved_example(attempts),
        bullets,
        per_question,
    }
}

/// Keeps the latest attempt per question among non-empty answers, capped at
/// `limit` most recent questions, returned oldest first. Input is chronological.
pub fn latest_attempts(attempts: &[Attempt], limit: usize) -> Vec<Attempt> {
    let mut seen = HashSet::new();
    let mut kept: Vec<Attempt> = attempts
        .iter()
        .enumerate()
        .rev()
        .filter(|(_, attempt)| !attempt.answer_text.trim().is_empty())
        .filter(|(index, attempt)| {
            let key = match attempt.question_id.trim() {
                "" => format!("#{index}"),
                id => id.to_string(),
            };
            seen.insert(key)
        })
        .map(|(_, attempt)| attempt.clone())
        .take(limit)
        .collect();
    kept.reverse();
    kept
}

fn empty_summary(session_type: SessionType) -> SessionSummary {
    let recommendation = Recommendation::NotRecommendedYet;
    SessionSummary {
        session_type,
        attempt_count: 0,
        overall_score: 0,
        completed: false,
        recommendation,
        recommendation_message: recommendation.message().to_string(),
        strengths: vec!["Complete the session to get insights".to_string()],
        weaknesses: vec!["No attempts recorded".to_string()],
        avg_scores: AverageScores::default(),
        strongest_area: "N/A".to_string(),
        biggest_risk: "No major risks identified".to_string(),
        biggest_risk_detail: "Continue practicing to refine your interview technique.".to_string(),
        hiring_manager_heard: DEFAULT_INTERPRETATION.to_string(),
        improved_example: String::new(),
        bullets: Vec::new(),
        per_question: Vec::new(),
    }
}

const DEFAULT_INTERPRETATION: &str = "Keep practicing to build stronger interview responses.";

fn mean_score(scores: &[u8]) -> u8 {
    if scores.is_empty() {
        return 0;
    }
    let sum: u32 = scores.iter().map(|score| u32::from(*score)).sum();
    (f64::from(sum) / scores.len() as f64).round() as u8
}

fn strongest_area(first_strength: Option<&str>) -> &'static str {
    let Some(strength) = first_strength else {
        return "N/A";
    };
    let strength = strength.to_lowercase();
    let has = |cues: &[&str]| cues.iter().any(|cue| strength.contains(cue));
    if has(&["clear", "articulate"]) {
        "Clarity"
    } else if has(&["structure", "organized"]) {
        "Structure"
    } else if has(&["metric", "quantif", "number"]) {
        "Detail"
    } else if has(&["relevant", "address"]) {
        "Relevance"
    } else if has(&["confiden"]) {
        "Confidence"
    } else {
        "Communication"
    }
}

fn risk_detail(weaknesses: &[String], overall_score: u8) -> &'static str {
    if weaknesses.is_empty() {
        return "Continue practicing to refine your interview technique.";
    }
    RISK_DETAILS[usize::from(overall_score / 20) % RISK_DETAILS.len()]
}

fn latest_interpretation(attempts: &[Attempt]) -> String {
    attempts
        .last()
        .and_then(|attempt| attempt.hiring_manager_heard.as_deref())
        .map(str::trim)
        .filter(|heard| !heard.is_empty())
        .unwrap_or(DEFAULT_INTERPRETATION)
        .to_string()
}

fn improved_example(attempts: &[Attempt]) -> String {
    // Earliest attempt wins ties.
    let mut best: Option<&Attempt> = None;
    for attempt in attempts {
        let score = attempt.score.unwrap_or(0);
        if best.map_or(true, |current| score > current.score.unwrap_or(0)) {
            best = Some(attempt);
        }
    }

    best.and_then(|attempt| {
        attempt
            .clearer_rewrite
            .split(['.', '!', '?'])
            .map(str::trim)
            .find(|sentence| !sentence.is_empty())
    })
    .map(|sentence| format!("{sentence}."))
    .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scored(id: &str, score: u8) -> Attempt {
        Attempt {
            question_id: id.to_string(),
            question_text: format!("Question {id}"),
            answer_text: format!("Answer for {id}"),
            score: Some(score),
            ..Attempt::default()
        }
    }

    #[test]
    fn mean_is_rounded_and_mapped_to_a_tier() {
        let attempts = [scored("a", 75), scored("b", 82), scored("c", 45)];
        let summary = summarize(&attempts, SessionType::Mock);
        assert_eq!(summary.overall_score, 67);
        assert_eq!(summary.recommendation, Recommendation::RecommendWithReservations);
        assert!(summary.completed);
        assert_eq!(summary.bullets[1].question, "Q2: Question b...");
        assert_eq!(summary.bullets[1].feedback, "No feedback available");
        assert_eq!(summary.per_question.len(), 3);
        assert_eq!(summary.biggest_risk_detail, RISK_DETAILS[3]);
    }

    #[test]
    fn empty_session_is_not_completed() {
        let summary = summarize(&[], SessionType::Practice);
        assert_eq!(summary.overall_score, 0);
        assert!(!summary.completed);
        assert_eq!(summary.strengths, vec!["Complete the session to get insights"]);
        assert_eq!(summary.weaknesses, vec!["No attempts recorded"]);
    }

    #[test]
    fn unscored_attempts_do_not_complete_a_session() {
        let attempts = [Attempt {
            score: None,
            ..scored("a", 0)
        }];
        let summary = summarize(&attempts, SessionType::Practice);
        assert!(!summary.completed);
        assert_eq!(summary.overall_score, 0);
        assert_eq!(summary.per_question.len(), 1);
    }

    #[test]
    fn tiers_have_inclusive_lower_bounds() {
        assert_eq!(Recommendation::for_score(80), Recommendation::StrongRecommend);
        assert_eq!(Recommendation::for_score(60), Recommendation::RecommendWithReservations);
        assert_eq!(Recommendation::for_score(59), Recommendation::NotRecommendedYet);
    }

    #[test]
    fn best_attempt_supplies_the_improved_example() {
        let attempts = [
            Attempt {
                clearer_rewrite: "First rewrite. More.".to_string(),
                ..scored("a", 70)
            },
            Attempt {
                clearer_rewrite: "Best rewrite! Then more.".to_string(),
                hiring_manager_heard: Some("Solid answer.".to_string()),
                ..scored("b", 90)
            },
        ];
        let summary = summarize(&attempts, SessionType::Mock);
        assert_eq!(summary.improved_example, "Best rewrite.");
        assert_eq!(summary.hiring_manager_heard, "Solid answer.");
    }

    #[test]
    fn strongest_area_follows_the_first_strength() {
        assert_eq!(strongest_area(Some("Clear and articulate communication")), "Clarity");
        assert_eq!(
            strongest_area(Some("Strong use of quantifiable results and metrics")),
            "Detail"
        );
        assert_eq!(strongest_area(None), "N/A");
    }

    #[test]
    fn latest_attempt_per_question_is_kept() {
        let attempts = vec![
            scored("q1", 40),
            scored("q2", 50),
            Attempt {
                answer_text: "   ".to_string(),
                ..scored("q3", 0)
            },
            scored("q1", 90),
        ];
        let kept = latest_attempts(&attempts, 5);
        let view: Vec<(&str, Option<u8>)> = kept
            .iter()
            .map(|attempt| (attempt.question_id.as_str(), attempt.score))
            .collect();
        assert_eq!(view, vec![("q2", Some(50)), ("q1", Some(90))]);

        assert_eq!(latest_attempts(&attempts, 1).len(), 1);
    }

    #[test]
    fn attempts_accept_snake_case_fields() {
        let attempt: Attempt = serde_json::from_str(
            r#"{"question_id":"q7","question_text":"Why us?","answer_text":"Because.","score":64,"vocabulary":["Align",{"word":"Mentor"}]}"#,
        )
        .expect("attempt parses");
        assert_eq!(attempt.question_id, "q7");
        assert_eq!(attempt.score, Some(64));
        assert_eq!(attempt.vocabulary.len(), 2);
    }
}
