use super::Attempt;
use crate::coaching::safety;
use crate::coaching::vocabulary::rewrite::{contains_word, present_words};
use crate::coaching::vocabulary::{strip_html, VocabLedger, VocabularySuggestion};
use serde::Serialize;

const VOCAB_PER_QUESTION: usize = 2;
const MIN_EXAMPLE_CHARS: usize = 50;
const TRANSCRIPT_PREFIX_CHARS: usize = 50;
const MIN_PREFIX_CHARS: usize = 10;

const POSITIVE_INTROS: [&str; 5] = [
    "You effectively demonstrated",
    "It was great to hear",
    "You successfully highlighted",
    "The answer clearly showed",
    "You did a good job explaining",
];

const IMPROVEMENT_INTROS: [&str; 5] = [
    "Consider enhancing this by",
    "Try to focus more on",
    "It would be impactful to",
    "Work on clarifying",
    "Strengthen your answer by",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StrongerExample {
    pub text: String,
    pub vocab: Vec<VocabularySuggestion>,
    pub underlined_words: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionBreakdown {
    pub question_id: String,
    pub question_text: String,
    /// The user's own transcript, never the rewrite.
    pub your_answer: String,
    pub score: u8,
    pub what_worked: Vec<String>,
    pub improve_next: Vec<String>,
    pub stronger_example: StrongerExample,
}

#[derive(Debug, Clone, Copy)]
enum Tone {
    Positive,
    Improvement,
}

/// Builds one breakdown per attempt, threading a single vocabulary ledger so no
/// word is featured twice in the session.
pub(crate) fn breakdown(attempts: &[Attempt]) -> Vec<QuestionBreakdown> {
    let mut ledger = VocabLedger::new();
    attempts
        .iter()
        .enumerate()
        .map(|(index, attempt)| {
            let vocab = ledger.pick(&attempt.vocabulary, VOCAB_PER_QUESTION);
            let stronger_example = stronger_example(attempt, vocab);
            QuestionBreakdown {
                question_id: if attempt.question_id.trim().is_empty() {
                    format!("q{}", index + 1)
                } else {
                    attempt.question_id.clone()
                },
                question_text: attempt.question_text.clone(),
                your_answer: attempt.answer_text.clone(),
                score: attempt.score.unwrap_or(0),
                what_worked: vary(&attempt.what_worked, index, Tone::Positive),
                improve_next: vary(&attempt.improve_next, index, Tone::Improvement),
                stronger_example,
            }
        })
        .collect()
}

fn stronger_example(attempt: &Attempt, vocab: Vec<VocabularySuggestion>) -> StrongerExample {
    let mut text = strip_html(attempt.clearer_rewrite.trim());

    if needs_regeneration(&text, &attempt.answer_text) {
        tracing::debug!(
            question_id = %attempt.question_id,
            stored_chars = text.chars().count(),
            "regenerating stronger example"
        );
        text = professional_example(&attempt.question_text).to_string();
    }

    let missing = vocab.iter().any(|item| !contains_word(&text, &item.word));
    if missing {
        if let [first, second, ..] = vocab.as_slice() {
            text.push_str(&format!(
                " I made sure to {} and to {} throughout the process.",
                vocab_clause(first),
                vocab_clause(second)
            ));
        }
    }

    let underlined_words = present_words(&text, &vocab);
    StrongerExample {
        text,
        vocab,
        underlined_words,
    }
}

fn needs_regeneration(text: &str, answer_text: &str) -> bool {
    let answer = answer_text.trim();
    let prefix: String = answer.chars().take(TRANSCRIPT_PREFIX_CHARS).collect();
    let contaminated = prefix.chars().count() > MIN_PREFIX_CHARS && text.contains(prefix.as_str());

    text.chars().count() < MIN_EXAMPLE_CHARS
        || safety::is_flagged(text)
        || contaminated
        || (!answer.is_empty() && text == answer)
}

fn vocab_clause(item: &VocabularySuggestion) -> String {
    let word = item.word.to_lowercase();
    if item.is_verb() {
        format!("{word} the approach")
    } else {
        format!("keep {word} at the center of the plan")
    }
}

/// Clean example answer chosen by the shape of the question.
fn professional_example(question_text: &str) -> &'static str {
    let q = question_text.to_lowercase();
    let any = |cues: &[&str]| cues.iter().any(|cue| q.contains(cue));

    if any(&["conflict", "disagreement", "difficult"]) {
        "I encountered a situation where team members had differing views on the approach. I facilitated a discussion to understand each perspective, then worked to align everyone on a shared goal. By maintaining open communication and focusing on the outcome, we resolved the issue collaboratively and delivered successfully."
    } else if any(&["failure", "mistake", "didn't go well"]) {
        "I faced a challenge where my initial approach didn't yield the expected results. I took time to assess what went wrong, gathered feedback, and adjusted my strategy. This experience taught me to validate assumptions early and remain adaptable when circumstances change."
    } else if any(&["lead", "team"]) {
        "I led a cross-functional initiative where clear direction was essential. I worked to articulate the vision, empower team members to own their areas, and maintain alignment through regular check-ins. The team delivered the project on time while building stronger collaboration habits."
    } else if any(&["pressure", "deadline", "tight timeline"]) {
        "I managed a high-pressure situation with competing priorities. I prioritized the most critical tasks, communicated transparently with stakeholders, and focused the team on incremental progress. By staying organized and maintaining clear communication, we met the deadline successfully."
    } else if any(&["why", "hire you", "fit"]) {
        "I bring a combination of technical expertise and collaborative leadership. I've consistently delivered results by focusing on clear communication, strategic thinking, and empowering teams. My approach emphasizes both execution and building sustainable processes that drive long-term success."
    } else {
        "I approached this challenge by first understanding the core requirements and constraints. I collaborated with stakeholders to align on priorities, then executed systematically while maintaining clear communication. The outcome demonstrated both technical capability and effective teamwork."
    }
}

/// Rotates an intro onto the first bullet so consecutive questions read differently.
fn vary(bullets: &[String], index: usize, tone: Tone) -> Vec<String> {
    let Some((first, rest)) = bullets.split_first() else {
        return vec![match tone {
            Tone::Positive => "Good effort on this answer.".to_string(),
            Tone::Improvement => "Try to structure your answer more clearly.".to_string(),
        }];
    };

    let pool = match tone {
        Tone::Positive => &POSITIVE_INTROS,
        Tone::Improvement => &IMPROVEMENT_INTROS,
    };
    let prefix = pool[index % pool.len()];

    let mut chars = first.chars();
    let lowered: String = match chars.next() {
        Some(c) => c.to_lowercase().chain(chars).collect(),
        None => String::new(),
    };

    let mut varied = Vec::with_capacity(bullets.len());
    varied.push(format!("{prefix} {lowered}"));
    varied.extend(rest.iter().cloned());
    varied
}
