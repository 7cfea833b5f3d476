//! Answer rewrites: weak-word substitution, severity-scaled clean-up, and the
//! context-aware STAR rewrite used in mock interviews.

use super::{capitalize, generate_role_vocabulary, VocabLedger, VocabularySuggestion, WEAK_WORDS};
use crate::coaching::evaluation::rules::has_digits;
use crate::coaching::evaluation::RubricScores;
use crate::coaching::safety::{self, ContentCategory};
use crate::coaching::seed;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::Serialize;
use std::collections::HashMap;

const EMPTY_ANSWER_REWRITE: &str = "Provide a structured answer using the STAR format: describe the Situation, your Task, the Actions you took, and the Results you achieved. Include specific metrics where possible.";

const NEUTRAL_REWRITE: &str = "In a previous role, I faced a challenge that needed a calm, structured response. I assessed the situation, agreed on a plan with my team, and followed through on it. As a result, we resolved the issue and improved how we handle similar situations.";

const METRIC_PLACEHOLDER: &str = " This resulted in a X% improvement in key metrics.";

// Longest phrases first so "worked on" wins over any single-word overlap.
static WEAK_WORD_ALTERNATION: Lazy<Regex> = Lazy::new(|| {
    let mut phrases: Vec<&str> = WEAK_WORDS.iter().map(|(weak, _)| *weak).collect();
    phrases.sort_by_key(|phrase| std::cmp::Reverse(phrase.len()));
    let alternation = phrases
        .iter()
        .map(|phrase| regex::escape(phrase).replace(' ', r"\s+"))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)\b(?:{alternation})\b")).expect("weak word alternation")
});

static STRONGER: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    WEAK_WORDS
        .iter()
        .map(|(weak, strong)| (*weak, strong[0]))
        .collect()
});

static LEADING_I: Lazy<Regex> = Lazy::new(|| Regex::new(r"^I ").expect("leading I pattern"));

/// How heavily an answer is reworked, chosen from its score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RewriteLevel {
    Minimal,
    Moderate,
    Substantial,
}

impl RewriteLevel {
    pub fn for_score(score: u8) -> Self {
        match score {
            80.. => RewriteLevel::Minimal,
            60..=79 => RewriteLevel::Moderate,
            _ => RewriteLevel::Substantial,
        }
    }
}

/// Replaces each weak word with its first stronger synonym in a single pass,
/// so replacements are never themselves rewritten.
pub fn substitute_weak_words(text: &str) -> String {
    WEAK_WORD_ALTERNATION
        .replace_all(text, |caps: &Captures<'_>| {
            let found = &caps[0];
            let key = found
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
                .to_lowercase();
            let replacement = STRONGER.get(key.as_str()).copied().unwrap_or(found);
            if found.starts_with(|c: char| c.is_uppercase()) {
                capitalize(replacement)
            } else {
                replacement.to_string()
            }
        })
        .into_owned()
}

/// Score-scaled rewrite that never echoes content the safety detector flags.
pub fn generate_clearer_rewrite(_question_text: &str, answer_text: &str, score: u8) -> String {
    if answer_text.trim().is_empty() {
        return EMPTY_ANSWER_REWRITE.to_string();
    }

    let flagged_terms = safety::flagged_terms(answer_text);
    let source = if flagged_terms.is_empty() {
        answer_text.to_string()
    } else {
        tracing::debug!(terms = flagged_terms.len(), "redacting flagged sentences before rewrite");
        safety::redact(answer_text)
    };

    let rewritten = enhance(&source, RewriteLevel::for_score(score));

    let lower = rewritten.to_lowercase();
    if safety::is_flagged(&rewritten) || flagged_terms.iter().any(|term| lower.contains(term)) {
        return NEUTRAL_REWRITE.to_string();
    }
    rewritten
}

fn enhance(answer_text: &str, level: RewriteLevel) -> String {
    let mut enhanced = substitute_weak_words(answer_text);

    if level == RewriteLevel::Substantial {
        if safety::sentences(&enhanced).count() == 1 {
            let core = enhanced.trim().trim_end_matches(['.', '!', '?']);
            return format!(
                "[Situation] {core}. [Task] I was responsible for addressing this challenge. \
                 [Action] I implemented a solution by analyzing the problem and taking targeted steps. \
                 [Result] This led to measurable improvements in efficiency and outcomes."
            );
        }
        if !has_digits(&enhanced) {
            enhanced.push_str(METRIC_PLACEHOLDER);
        }
    }

    if level != RewriteLevel::Minimal {
        enhanced = enhanced.replace(". I ", ". Subsequently, I ");
        enhanced = LEADING_I
            .replace(&enhanced, "In this situation, I ")
            .into_owned();
    }

    enhanced.trim().to_string()
}

/// Story shape inferred from the question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextType {
    Conflict,
    Failure,
    Weakness,
    Leadership,
    Challenge,
}

const CONTEXT_CUES: [(ContextType, &[&str]); 4] = [
    (
        ContextType::Conflict,
        &["disagree", "conflict", "argue", "difficult", "persuade", "convince", "opinion"],
    ),
    (
        ContextType::Failure,
        &["fail", "mistake", "error", "wrong", "regret", "lesson"],
    ),
    (
        ContextType::Weakness,
        &["weakness", "improve", "negative feedback"],
    ),
    (
        ContextType::Leadership,
        &["lead", "manage", "team", "mentor", "style"],
    ),
];

impl ContextType {
    pub fn detect(question_text: &str) -> Self {
        let lower = question_text.to_lowercase();
        CONTEXT_CUES
            .iter()
            .find(|(_, cues)| cues.iter().any(|cue| lower.contains(cue)))
            .map(|(context, _)| *context)
            .unwrap_or(ContextType::Challenge)
    }

    fn neutral_context(self) -> &'static str {
        match self {
            ContextType::Conflict => "there was a disagreement on the team strategy",
            ContextType::Failure => "I encountered an unexpected issue with the deliverables",
            ContextType::Leadership => "the team needed clear direction to move forward",
            ContextType::Weakness => "I realized I needed to improve my workflow efficiency",
            ContextType::Challenge => {
                "I encountered a complex challenge that required immediate attention"
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Professionalism {
    pub flagged: bool,
    pub reasons: Vec<ContentCategory>,
    /// The user's own words were swapped for a neutral context line.
    pub replaced: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StarRewrite {
    pub text: String,
    pub context_type: ContextType,
    pub vocab: Vec<VocabularySuggestion>,
    pub underlined_words: Vec<String>,
    pub hire_probability_estimate: u8,
    pub professionalism: Professionalism,
}

const CONTEXT_CHAR_LIMIT: usize = 80;

/// Rewrites the answer as a STAR story woven around the user's own opening line.
/// `forced_vocab` pins the two featured words so they match what the client shows.
pub fn generate_star_rewrite(
    question_text: &str,
    answer_text: &str,
    scores: &RubricScores,
    forced_vocab: Option<&[VocabularySuggestion]>,
) -> StarRewrite {
    let analysis = safety::analyze(answer_text);
    let context_type = ContextType::detect(question_text);
    let seed = seed::seed_for(&format!("{question_text}\u{1f}{answer_text}"));

    let vocab = match forced_vocab {
        Some(forced) if forced.len() >= 2 => forced[..2].to_vec(),
        _ => {
            let generated = generate_role_vocabulary(question_text, answer_text);
            if generated.len() >= 2 {
                generated.into_iter().take(2).collect()
            } else {
                VocabLedger::new().pick(&[], 2)
            }
        }
    };

    let user_context = if analysis.is_clean() {
        opening_line(answer_text)
    } else {
        None
    };
    let replaced = user_context.is_none() && !answer_text.trim().is_empty();
    let context = user_context.unwrap_or_else(|| context_type.neutral_context().to_string());
    let opening = capitalize(&context);
    let inline = lowercase_first(&context);

    let (v1, v2) = (&vocab[0], &vocab[1]);
    let action = action_phrase(v1, seed);
    let result = result_phrase(v2, seed.rotate_left(7));

    let text = match context_type {
        ContextType::Conflict => format!(
            "In a past situation, I disagreed with a colleague on the best approach. {opening}, but we hit a wall. \
             I knew we needed alignment, so I asked questions to understand their perspective. \
             I {action} to bridge the gap. We found a compromise that worked for everyone. \
             This choice {result} and kept the relationship professional."
        ),
        ContextType::Failure => format!(
            "I once made a mistake where I missed a key detail. {opening}. \
             I took immediate ownership rather than making excuses. \
             I communicated the issue and {action} to fix it. \
             I also documented the error to prevent recurrence. \
             This experience taught me to stay accountable, and it {result}."
        ),
        ContextType::Leadership => format!(
            "I noticed the team was facing a blocked workflow. {opening}. \
             I stepped in to provide clear direction while giving them space to own the work. \
             I {action} so everyone felt supported. By checking in regularly, I {result}. \
             The team delivered the project successfully and morale remained high."
        ),
        ContextType::Weakness => format!(
            "I used to struggle with taking on too much. {opening}. \
             I realized I needed a better system, so I started prioritizing my day differently. \
             I {action} to stay organized. This shift {result} with my stakeholders. \
             It was a lesson learned in sustainable working."
        ),
        ContextType::Challenge => format!(
            "In a previous role, {inline}. I assessed the situation and noticed a clear friction point. \
             I knew I needed to act, so I {action} to hit the ground running. \
             I broke the problem down and {result}. \
             By staying focused on the goal, I drove a strong, measurable result."
        ),
    };

    let underlined_words = present_words(&text, &vocab);

    let mut hire_probability_estimate: u8 = 92;
    if scores.metrics >= 15 {
        hire_probability_estimate += 3;
    }
    if scores.structure >= 20 {
        hire_probability_estimate += 3;
    }

    StarRewrite {
        text,
        context_type,
        vocab,
        underlined_words,
        hire_probability_estimate: hire_probability_estimate.min(99),
        professionalism: Professionalism {
            flagged: analysis.has_inappropriate_content,
            reasons: analysis.categories(),
            replaced,
        },
    }
}

/// First sentence longer than ten characters, capped, with weak words upgraded.
fn opening_line(answer_text: &str) -> Option<String> {
    let sentence = safety::sentences(answer_text).find(|sentence| sentence.chars().count() > 10)?;
    let capped: String = sentence.chars().take(CONTEXT_CHAR_LIMIT).collect();
    Some(substitute_weak_words(capped.trim()))
}

fn lowercase_first(text: &str) -> String {
    // "I" stays capitalised mid-sentence.
    if text.starts_with("I ") || text.starts_with("I'") {
        return text.to_string();
    }
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn action_phrase(vocab: &VocabularySuggestion, seed: u32) -> String {
    let w = vocab.word.to_lowercase();
    let templates = if vocab.is_verb() {
        [
            format!("took steps to {w} the situation"),
            format!("worked diligently to {w} the process"),
            format!("made a plan to {w} the core issues"),
        ]
    } else {
        [
            format!("focused heavily on {w}"),
            format!("made {w} a top priority"),
            format!("ensured {w} was central to my plan"),
        ]
    };
    templates[seed as usize % templates.len()].clone()
}

fn result_phrase(vocab: &VocabularySuggestion, seed: u32) -> String {
    let w = vocab.word.to_lowercase();
    let templates = if vocab.is_verb() {
        [
            format!("enabled us to {w} effectively"),
            format!("allowed the team to {w} without friction"),
            format!("empowered us to {w} faster"),
        ]
    } else {
        [
            format!("improved our overall {w}"),
            format!("demonstrated the value of {w}"),
            format!("significantly strengthened our {w}"),
        ]
    };
    templates[seed as usize % templates.len()].clone()
}

/// Vocabulary words that occur as whole words in `text`, case-insensitively.
pub(crate) fn present_words(text: &str, vocab: &[VocabularySuggestion]) -> Vec<String> {
    vocab
        .iter()
        .filter(|item| contains_word(text, &item.word))
        .map(|item| item.word.clone())
        .collect()
}

pub(crate) fn contains_word(text: &str, word: &str) -> bool {
    let word = word.trim();
    if word.is_empty() {
        return false;
    }
    Regex::new(&format!(r"(?i)\b{}\b", regex::escape(word)))
        .map(|pattern| pattern.is_match(text))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coaching::vocabulary::lexicon;

    #[test]
    fn substitution_is_single_pass_and_keeps_capitals() {
        assert_eq!(
            substitute_weak_words("Helped with a lot of things and worked on the fix."),
            "Spearheaded with significantly of initiatives and led the resolve."
        );
        // "fix" -> "resolve" must not cascade into anything else.
        assert_eq!(substitute_weak_words("fix"), "resolve");
        assert_eq!(substitute_weak_words("goodness"), "goodness");
    }

    #[test]
    fn rewrite_levels_follow_score() {
        let answer = "I helped the team ship. I did the testing.";
        assert_eq!(
            generate_clearer_rewrite("q", answer, 90),
            "I spearheaded the team ship. I executed the testing."
        );
        assert_eq!(
            generate_clearer_rewrite("q", answer, 70),
            "In this situation, I spearheaded the team ship. Subsequently, I executed the testing."
        );
        let substantial = generate_clearer_rewrite("q", answer, 30);
        assert!(substantial.ends_with("This resulted in a X% improvement in key metrics."));
    }

    #[test]
    fn one_sentence_answers_get_a_star_skeleton() {
        let rewrite = generate_clearer_rewrite("q", "I fixed the build.", 20);
        assert!(rewrite.starts_with("[Situation] I fixed the build. [Task]"));
        assert!(rewrite.contains("[Result]"));
    }

    #[test]
    fn empty_answer_gets_star_advice() {
        assert!(generate_clearer_rewrite("q", "", 0).contains("STAR format"));
    }

    #[test]
    fn flagged_content_never_survives_the_rewrite() {
        let answer = "My manager was a total idiot. I wanted to punch him. Then we shipped 2 releases.";
        let rewrite = generate_clearer_rewrite("q", answer, 50).to_lowercase();
        for term in safety::flagged_terms(answer) {
            assert!(!rewrite.contains(&term), "{term} leaked into {rewrite}");
        }
        assert!(rewrite.contains("shipped 2 releases"));
    }

    #[test]
    fn star_rewrite_uses_context_and_underlines_both_words() {
        let rewrite = generate_star_rewrite(
            "Tell me about a time you disagreed with a coworker.",
            "My coworker wanted to skip testing before launch. We talked it through.",
            &RubricScores::default(),
            None,
        );
        assert_eq!(rewrite.context_type, ContextType::Conflict);
        assert!(rewrite
            .text
            .contains("approach. My coworker wanted to skip testing before launch, but"));
        assert_eq!(rewrite.vocab.len(), 2);
        assert_eq!(rewrite.underlined_words.len(), 2);
        assert_eq!(rewrite.hire_probability_estimate, 92);
        assert!(!rewrite.professionalism.flagged);
        assert!(!rewrite.text.contains('<'));
    }

    #[test]
    fn unsafe_answers_get_neutral_context() {
        let rewrite = generate_star_rewrite(
            "Describe a mistake you made.",
            "I screwed up and my boss is a moron.",
            &RubricScores {
                clarity: 10,
                structure: 20,
                metrics: 15,
                relevance: 15,
            },
            None,
        );
        assert_eq!(rewrite.context_type, ContextType::Failure);
        assert!(rewrite.professionalism.flagged);
        assert!(rewrite.professionalism.replaced);
        assert!(rewrite
            .text
            .contains("I encountered an unexpected issue with the deliverables"));
        assert!(!rewrite.text.to_lowercase().contains("moron"));
        assert_eq!(rewrite.hire_probability_estimate, 98);
    }

    #[test]
    fn forced_vocab_is_respected() {
        let forced: Vec<VocabularySuggestion> = ["efficiency", "align"]
            .iter()
            .filter_map(|word| lexicon::lookup(word))
            .map(VocabularySuggestion::from_entry)
            .collect();
        let rewrite = generate_star_rewrite("Why this role?", "", &RubricScores::default(), Some(&forced));
        assert_eq!(rewrite.vocab, forced);
        assert_eq!(rewrite.underlined_words, vec!["Efficiency", "Align"]);
        assert!(!rewrite.professionalism.replaced);
    }
}
