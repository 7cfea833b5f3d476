use super::RubricScores;
use serde::Serialize;

const STRENGTH_THRESHOLD: f32 = 18.0;
const WEAKNESS_THRESHOLD: f32 = 15.0;
const MAX_ITEMS: usize = 3;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct AverageScores {
    pub clarity: f32,
    pub structure: f32,
    pub metrics: f32,
    pub relevance: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverallInsights {
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub avg_scores: AverageScores,
}

/// Aggregates rubric breakdowns into at most three strengths and weaknesses.
pub fn overall_insights<'a, I>(breakdowns: I) -> OverallInsights
where
    I: IntoIterator<Item = &'a RubricScores>,
{
    let mut totals = AverageScores::default();
    let mut counted = 0u32;
    for scores in breakdowns {
        totals.clarity += f32::from(scores.clarity);
        totals.structure += f32::from(scores.structure);
        totals.metrics += f32::from(scores.metrics);
        totals.relevance += f32::from(scores.relevance);
        counted += 1;
    }

    if counted == 0 {
        return OverallInsights {
            strengths: vec!["Complete more questions to get insights".to_string()],
            weaknesses: vec!["No attempts yet".to_string()],
            avg_scores: AverageScores::default(),
        };
    }

    let n = counted as f32;
    let avg = AverageScores {
        clarity: totals.clarity / n,
        structure: totals.structure / n,
        metrics: totals.metrics / n,
        relevance: totals.relevance / n,
    };

    let criteria = [
        (
            avg.clarity,
            "Clear and articulate communication",
            "Work on clarity and conciseness",
        ),
        (
            avg.structure,
            "Well-structured responses using STAR format",
            "Practice using STAR format (Situation, Task, Action, Result)",
        ),
        (
            avg.metrics,
            "Strong use of quantifiable results and metrics",
            "Include more specific numbers and measurable outcomes",
        ),
        (
            avg.relevance,
            "Answers directly address questions",
            "Ensure answers directly address the question",
        ),
    ];

    let mut strengths: Vec<String> = criteria
        .iter()
        .filter(|(value, _, _)| *value >= STRENGTH_THRESHOLD)
        .map(|(_, strength, _)| strength.to_string())
        .take(MAX_ITEMS)
        .collect();
    let mut weaknesses: Vec<String> = criteria
        .iter()
        .filter(|(value, _, _)| *value < WEAKNESS_THRESHOLD)
        .map(|(_, _, weakness)| weakness.to_string())
        .take(MAX_ITEMS)
        .collect();

    if strengths.is_empty() {
        strengths.push("Keep practicing to identify your strengths".to_string());
    }
    if weaknesses.is_empty() {
        weaknesses.push("Continue refining your answers for even better results".to_string());
    }

    OverallInsights {
        strengths,
        weaknesses,
        avg_scores: avg,
    }
}
