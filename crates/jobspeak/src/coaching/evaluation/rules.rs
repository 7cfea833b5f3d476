use super::config::RubricConfig;
use super::RubricScores;
use once_cell::sync::Lazy;
use regex::Regex;

static FILLERS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:um|uh|like|you know|basically|actually)\b").expect("filler pattern")
});
static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s]").expect("non-word pattern"));

const STAR_CUES: [(&str, &[&str]); 4] = [
    (
        "situation",
        &["situation", "when", "where", "context", "background", "at the time"],
    ),
    (
        "task",
        &["task", "challenge", "problem", "goal", "needed to", "had to"],
    ),
    (
        "action",
        &["i did", "i took", "i implemented", "i created", "i worked", "my approach"],
    ),
    (
        "result",
        &["result", "outcome", "achieved", "improved", "increased", "decreased", "successfully"],
    ),
];

const OUTCOME_VERBS: &[&str] = &[
    "increased", "decreased", "reduced", "improved", "grew", "saved", "generated", "delivered",
    "completed", "achieved",
];
const SPECIFICITY_CUES: &[&str] = &["for example", "specifically", "such as", "including"];

/// Raw observations about an answer, shared by scoring and feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct AnswerSignals {
    pub word_count: usize,
    pub sentence_count: usize,
    pub filler_count: usize,
    pub star_components: usize,
    pub has_digits: bool,
}

pub(crate) fn score_answer(
    question: &str,
    answer: &str,
    config: &RubricConfig,
) -> (RubricScores, AnswerSignals) {
    let lower = answer.to_lowercase();
    let signals = AnswerSignals {
        word_count: word_count(answer),
        sentence_count: sentence_count(answer),
        filler_count: FILLERS.find_iter(answer).count(),
        star_components: STAR_CUES
            .iter()
            .filter(|(_, cues)| cues.iter().any(|cue| lower.contains(cue)))
            .count(),
        has_digits: has_digits(answer),
    };

    let scores = RubricScores {
        clarity: clarity(&signals, config),
        structure: structure(&signals, config),
        metrics: metrics(&lower, &signals, config),
        relevance: relevance(question, &lower, config),
    };

    (scores, signals)
}

fn clarity(signals: &AnswerSignals, config: &RubricConfig) -> u8 {
    let words = signals.word_count;
    let mut score: u8 = if (config.ideal_words.0..=config.ideal_words.1).contains(&words) {
        15
    } else if (config.acceptable_words.0..=config.acceptable_words.1).contains(&words) {
        10
    } else if words >= config.minimum_words {
        5
    } else {
        0
    };

    score += match signals.sentence_count {
        0 => 0,
        1 => 3,
        _ => 5,
    };

    score += match signals.filler_count {
        0 => 5,
        1 | 2 => 3,
        _ => 0,
    };

    score.min(config.criterion_cap)
}

fn structure(signals: &AnswerSignals, config: &RubricConfig) -> u8 {
    let mut score = 5 * signals.star_components as u8;
    if signals.star_components >= 3 {
        score += 5;
    }
    if signals.sentence_count <= 1 && signals.word_count < config.fragment_word_limit {
        score = score.saturating_sub(config.fragment_penalty);
    }
    score.min(config.criterion_cap)
}

fn metrics(lower: &str, signals: &AnswerSignals, config: &RubricConfig) -> u8 {
    let mut score = 0;
    if signals.has_digits {
        score += 10;
    }
    if lower.contains('%') || lower.contains("percent") {
        score += 5;
    }
    if OUTCOME_VERBS.iter().any(|verb| lower.contains(verb)) {
        score += 5;
    }
    if SPECIFICITY_CUES.iter().any(|cue| lower.contains(cue)) {
        score += 5;
    }
    score.min(config.criterion_cap)
}

fn relevance(question: &str, lower_answer: &str, config: &RubricConfig) -> u8 {
    let question = NON_WORD.replace_all(&question.to_lowercase(), "").into_owned();
    let key_terms: Vec<&str> = question
        .split_whitespace()
        .filter(|word| word.chars().count() > 4)
        .collect();

    let addressed = key_terms
        .iter()
        .filter(|term| lower_answer.contains(*term))
        .count();
    let ratio = addressed as f32 / key_terms.len().max(1) as f32;

    let bonus = if ratio >= config.strong_overlap {
        10
    } else if ratio >= config.partial_overlap {
        5
    } else {
        0
    };

    config.relevance_baseline.saturating_add(bonus).min(config.criterion_cap)
}

pub(crate) fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

pub(crate) fn sentence_count(text: &str) -> usize {
    crate::coaching::safety::sentences(text).count()
}

pub(crate) fn has_digits(text: &str) -> bool {
    text.chars().any(|c| c.is_ascii_digit())
}

/// Count of `.`, `!` and `?` marks, a rough measure of how developed a story is.
pub(crate) fn terminator_count(text: &str) -> usize {
    text.chars().filter(|c| matches!(c, '.' | '!' | '?')).count()
}
