use super::rules::{has_digits, terminator_count, word_count};
use super::RubricScores;
use crate::coaching::{safety, seed};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static HEADLINE_METRIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+%|\d+x|by \d+").expect("headline metric pattern"));
static REWRITE_METRIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+%|\d+x").expect("rewrite metric pattern"));

const IMPROVE_NEXT_POOL: [&str; 7] = [
    "Try briefly explaining why you made that decision before describing what you did.",
    "Focus on one clear outcome so the listener can easily follow your impact.",
    "Add a short result at the end to show what changed because of your actions.",
    "Tighten the story by removing extra setup and getting to the action sooner.",
    "Connect your actions directly to a business or team outcome.",
    "End with one sentence that clearly states what improved as a result.",
    "Explain your thinking out loud so the interviewer understands how you approach problems.",
];

/// One or two plain-English observations about what landed well.
pub fn what_worked(scores: &RubricScores) -> Vec<String> {
    let mut signals = Vec::new();
    if scores.clarity >= 20 {
        signals.push("You spoke clearly and made your main point easy to understand.");
    }
    if scores.structure >= 20 {
        signals.push("Your answer had a clear flow from start to finish.");
    }
    if scores.metrics >= 15 {
        signals.push("You used a specific number that proved your success.");
    }
    if scores.relevance >= 20 {
        signals.push("You answered exactly what I asked without getting sidetracked.");
    }
    if signals.is_empty() {
        signals.push("You gave a genuine answer that felt honest.");
    }
    signals.truncate(2);
    signals.into_iter().map(str::to_string).collect()
}

/// Three tips from a fixed pool, chosen by a seed derived from the attempt text.
pub fn improve_next(question_text: &str, answer_text: &str) -> Vec<String> {
    let seed = seed::seed_for(&format!("{question_text}\u{1f}{answer_text}"));
    seed::sample_indices(IMPROVE_NEXT_POOL.len(), 3, seed)
        .into_iter()
        .map(|index| IMPROVE_NEXT_POOL[index].to_string())
        .collect()
}

/// How a hiring manager would likely read the answer.
pub fn hiring_manager_heard(score: u8, answer_text: &str) -> &'static str {
    if answer_text.trim().is_empty() {
        return "The candidate didn't provide enough information for me to assess their capabilities.";
    }

    let has_metrics = HEADLINE_METRIC.is_match(answer_text);
    match score {
        80.. if has_metrics => {
            "This person gets it. They focused on results and shared a clear win. I'd definitely want to interview them."
        }
        80.. => {
            "Good communication style, but I'm hungry for the hard numbers. Still, they seem competent enough to move forward."
        }
        60..=79 if !has_metrics => {
            "They prefer talking about effort rather than impact. I need to know if they can actually deliver results, so I'm hesitant."
        }
        60..=79 => {
            "The answer was a bit messy, but the core skills seem to be there. I'd need to dig deeper to be sure."
        }
        40..=59 if word_count(answer_text) < 20 => {
            "Ideally, I need more than a few words to judge their skill. This felt rushed or unprepared."
        }
        40..=59 => {
            "This feels like someone who understands the basics but hasn't had real ownership yet. I'd pass for a senior role."
        }
        _ => "Not enough here to tell if they can do the job. I'd pass and keep looking for a stronger candidate.",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HireLikelihood {
    pub hire_likelihood: u8,
    pub hire_likelihood_after_rewrite: u8,
    pub why: Vec<String>,
}

const LIKELIHOOD_FLOOR: i32 = 5;
const LIKELIHOOD_CEILING: i32 = 95;

/// Before/after estimate of how likely the answer is to advance the candidate.
pub fn hire_likelihood(
    score: u8,
    scores: &RubricScores,
    answer_text: &str,
    rewrite_text: &str,
) -> HireLikelihood {
    let mut before = i32::from(score);
    if word_count(answer_text) < 30 {
        before -= 15;
    }
    if !has_digits(answer_text) {
        before -= 20;
    }
    if scores.structure < 15 {
        before -= 10;
    }
    if scores.clarity < 15 {
        before -= 10;
    }
    if scores.metrics >= 20 {
        before += 10;
    }
    if scores.structure >= 20 {
        before += 10;
    }
    if terminator_count(answer_text) >= 3 {
        before += 5;
    }
    let before = before.clamp(LIKELIHOOD_FLOOR, LIKELIHOOD_CEILING);

    let has_star = terminator_count(rewrite_text) >= 3;
    let has_metrics = REWRITE_METRIC.is_match(rewrite_text);
    let is_professional = !safety::is_flagged(rewrite_text);
    let is_specific = word_count(rewrite_text) >= 50;

    let mut after = before;
    for (present, lift) in [
        (has_star, 15),
        (has_metrics, 15),
        (is_professional, 10),
        (is_specific, 10),
    ] {
        if present {
            after += lift;
        }
    }
    let after = after.min(LIKELIHOOD_CEILING);

    let mut why = Vec::new();
    if has_star {
        why.push("Added STAR structure (Situation, Task, Action, Result) makes impact clear");
    }
    if has_metrics {
        why.push("Included quantifiable outcomes shows results-orientation");
    }
    if !has_star && !has_metrics {
        why.push("Original answer lacked structure and metrics, limiting evaluability");
        why.push("Rewrite provides clearer narrative but needs your specific numbers");
    }
    why.truncate(2);

    HireLikelihood {
        hire_likelihood: before as u8,
        hire_likelihood_after_rewrite: after as u8,
        why: why.into_iter().map(str::to_string).collect(),
    }
}
