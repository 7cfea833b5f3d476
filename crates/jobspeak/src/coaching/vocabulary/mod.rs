pub mod lexicon;
pub mod rewrite;

pub use lexicon::{LexiconEntry, SkillCategory};
pub use rewrite::{
    generate_clearer_rewrite, generate_star_rewrite, ContextType, Professionalism, RewriteLevel,
    StarRewrite,
};

use crate::coaching::seed;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

static HTML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"</?[^>]+(>|$)").expect("html tag pattern"));

pub(crate) const WEAK_WORDS: &[(&str, [&str; 4])] = &[
    ("helped", ["spearheaded", "facilitated", "orchestrated", "coordinated"]),
    ("did", ["executed", "implemented", "delivered", "accomplished"]),
    ("made", ["created", "developed", "established", "built"]),
    ("worked on", ["led", "drove", "championed", "managed"]),
    ("good", ["effective", "successful", "impactful", "valuable"]),
    ("bad", ["challenging", "problematic", "inefficient", "suboptimal"]),
    ("a lot", ["significantly", "substantially", "considerably", "extensively"]),
    ("very", ["extremely", "highly", "remarkably", "exceptionally"]),
    ("things", ["initiatives", "projects", "solutions", "deliverables"]),
    ("stuff", ["components", "elements", "features", "aspects"]),
    ("got", ["achieved", "obtained", "secured", "attained"]),
    ("used", ["leveraged", "utilized", "employed", "applied"]),
    ("big", ["substantial", "significant", "major", "considerable"]),
    ("small", ["minor", "incremental", "targeted", "focused"]),
    ("problem", ["challenge", "obstacle", "issue", "bottleneck"]),
    ("fix", ["resolve", "address", "remediate", "optimize"]),
];

static WEAK_WORD_PATTERNS: Lazy<Vec<(&'static str, &'static str, Regex)>> = Lazy::new(|| {
    WEAK_WORDS
        .iter()
        .map(|(weak, strong)| {
            let pattern = format!(r"(?i)\b{}\b", weak.replace(' ', r"\s+"));
            (*weak, strong[0], Regex::new(&pattern).expect("weak word pattern"))
        })
        .collect()
});

const MAX_SUGGESTIONS: usize = 6;
const MIN_SUGGESTIONS: usize = 3;
const GENERIC_SUGGESTIONS: [&str; 5] = [
    "Use quantifiable metrics (e.g., 'increased by 40%', 'reduced from 5s to 1s')",
    "Replace passive voice with active voice (e.g., 'I led' instead of 'was led by')",
    "Add specific technical terms relevant to your role",
    "Use power verbs: 'orchestrated', 'architected', 'pioneered'",
    "Include business impact terms: 'revenue', 'efficiency', 'scalability'",
];

/// Canonical vocabulary item handed to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularySuggestion {
    pub word: String,
    pub pos: String,
    pub definition: String,
    pub example: String,
    /// Slash-delimited IPA or empty.
    pub ipa: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub why_it_helps: Option<String>,
}

impl VocabularySuggestion {
    pub fn from_entry(entry: &LexiconEntry) -> Self {
        Self {
            word: capitalize(entry.word),
            pos: entry.pos.to_string(),
            definition: entry.definition.to_string(),
            example: strip_html(entry.example),
            ipa: entry.ipa.to_string(),
            why_it_helps: Some(entry.why_it_helps.to_string()),
        }
    }

    /// Only an explicit verb reads as one; unknown parts of speech are treated
    /// as nouns.
    pub fn is_verb(&self) -> bool {
        self.pos
            .split(|c: char| !c.is_alphabetic())
            .any(|part| part.eq_ignore_ascii_case("verb"))
    }
}

/// Caller-supplied vocabulary as it arrives over the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VocabInput {
    Plain(String),
    Enriched(VocabRecord),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabRecord {
    pub word: String,
    #[serde(default)]
    pub pos: Option<String>,
    #[serde(default)]
    pub definition: Option<String>,
    #[serde(default)]
    pub example: Option<String>,
    #[serde(default, alias = "phonetic")]
    pub ipa: Option<String>,
}

impl VocabInput {
    /// The word with markup and surrounding whitespace removed; may be empty.
    pub fn word(&self) -> String {
        let raw = match self {
            VocabInput::Plain(word) => word,
            VocabInput::Enriched(record) => &record.word,
        };
        strip_html(raw).trim().to_string()
    }

    /// Resolves against the lexicon. Lexicon data wins over caller data.
    pub fn normalize(&self) -> VocabularySuggestion {
        let word = self.word();
        let entry = lexicon::lookup(&word);
        let (pos, definition, example, ipa) = match self {
            VocabInput::Plain(_) => (None, None, None, None),
            VocabInput::Enriched(record) => (
                record.pos.clone(),
                record.definition.clone(),
                record.example.clone(),
                record.ipa.clone(),
            ),
        };

        let ipa = entry
            .map(|entry| entry.ipa.to_string())
            .or(ipa)
            .filter(|ipa| is_valid_ipa(ipa))
            .unwrap_or_default();
        let pos = entry
            .map(|entry| entry.pos.to_string())
            .or(pos)
            .filter(|pos| !pos.trim().is_empty())
            .unwrap_or_else(|| "word".to_string());
        let definition = entry
            .map(|entry| entry.definition.to_string())
            .or(definition)
            .filter(|definition| !definition.trim().is_empty())
            .unwrap_or_else(|| "Definition not available".to_string());
        let example = entry
            .map(|entry| entry.example.to_string())
            .or(example)
            .map(|example| strip_html(&example))
            .unwrap_or_default();

        VocabularySuggestion {
            word,
            pos,
            definition,
            example,
            ipa,
            why_it_helps: entry.map(|entry| entry.why_it_helps.to_string()),
        }
    }
}

impl From<&VocabularySuggestion> for VocabInput {
    fn from(value: &VocabularySuggestion) -> Self {
        VocabInput::Enriched(VocabRecord {
            word: value.word.clone(),
            pos: Some(value.pos.clone()),
            definition: Some(value.definition.clone()),
            example: Some(value.example.clone()),
            ipa: Some(value.ipa.clone()),
        })
    }
}

/// `true` for `""` or a non-empty `/.../` transcription.
pub fn is_valid_ipa(ipa: &str) -> bool {
    ipa.is_empty()
        || (ipa.chars().count() > 2
            && ipa.starts_with('/')
            && ipa.ends_with('/')
            && !ipa[1..ipa.len() - 1].contains('/'))
}

pub fn strip_html(text: &str) -> String {
    HTML_TAG.replace_all(text, "").into_owned()
}

/// "Replace 'x' → 'y'" hints for weak words in the answer, padded with generic tips.
pub fn generate_vocabulary_suggestions(answer_text: &str) -> Vec<String> {
    if answer_text.trim().is_empty() {
        return vec![
            "Use action verbs like 'spearheaded', 'implemented', 'optimized'".to_string(),
            "Replace vague terms with specific metrics and outcomes".to_string(),
        ];
    }

    let mut suggestions: Vec<String> = WEAK_WORD_PATTERNS
        .iter()
        .filter(|(_, _, pattern)| pattern.is_match(answer_text))
        .take(MAX_SUGGESTIONS)
        .map(|(weak, strong, pattern)| {
            let example = pattern.replacen(answer_text, 1, *strong);
            let snippet: String = example.chars().take(60).collect();
            format!("Replace '{weak}' → '{strong}' (e.g., \"{snippet}...\")")
        })
        .collect();

    for generic in GENERIC_SUGGESTIONS {
        if suggestions.len() >= MIN_SUGGESTIONS {
            break;
        }
        suggestions.push(generic.to_string());
    }

    suggestions
}

/// Five to eight skill words fitted to the question and answer, in seeded order.
pub fn generate_role_vocabulary(question_text: &str, answer_text: &str) -> Vec<VocabularySuggestion> {
    let category = SkillCategory::detect(question_text, answer_text);
    let seed = seed::seed_for(&format!("{question_text}\u{1f}{answer_text}"));
    let count = 5 + (seed % 4) as usize;

    let mut items = lexicon_items(category.words(), &[]);
    seed::shuffle(&mut items, seed);
    if items.len() < count {
        let mut extra = lexicon_items(category.companion().words(), &items);
        seed::shuffle(&mut extra, seed.rotate_left(11));
        items.extend(extra);
    }
    items.truncate(count);
    items
}

fn lexicon_items(words: &[&str], taken: &[VocabularySuggestion]) -> Vec<VocabularySuggestion> {
    words
        .iter()
        .filter(|word| !taken.iter().any(|item| item.word.eq_ignore_ascii_case(word)))
        .filter_map(|word| lexicon::lookup(word))
        .map(VocabularySuggestion::from_entry)
        .collect()
}

/// Session-wide record of which words have already been handed out.
#[derive(Debug, Default, Clone)]
pub struct VocabLedger {
    used: HashSet<String>,
}

impl VocabLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.used.contains(&word.trim().to_lowercase())
    }

    fn claim(&mut self, word: &str) -> bool {
        self.used.insert(word.trim().to_lowercase())
    }

    /// Exactly `count` items: unused candidates first, then the generic fallback
    /// words, then the last-resort pair. Uniqueness yields to the count only once
    /// every source is exhausted.
    pub fn pick(&mut self, candidates: &[VocabInput], count: usize) -> Vec<VocabularySuggestion> {
        let mut picked: Vec<VocabularySuggestion> = Vec::with_capacity(count);

        for candidate in candidates {
            if picked.len() >= count {
                break;
            }
            let word = candidate.word();
            if !word.is_empty() && self.claim(&word) {
                picked.push(candidate.normalize());
            }
        }

        for word in lexicon::FALLBACK_WORDS {
            if picked.len() >= count {
                break;
            }
            if lexicon::lookup(word).is_some() && self.claim(word) {
                picked.push(VocabInput::Plain((*word).to_string()).normalize());
            }
        }

        for entry in &lexicon::LAST_RESORT {
            if picked.len() >= count {
                break;
            }
            if self.claim(entry.word) {
                picked.push(VocabularySuggestion::from_entry(entry));
            }
        }

        if picked.len() < count {
            let missing = count - picked.len();
            tracing::debug!(
                missing,
                "vocabulary sources exhausted; repeating last-resort words"
            );
            picked.extend(
                lexicon::LAST_RESORT
                    .iter()
                    .cycle()
                    .take(missing)
                    .map(VocabularySuggestion::from_entry),
            );
        }

        picked
    }
}

pub(crate) fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggestions_name_weak_words_and_pad_to_three() {
        let suggestions = generate_vocabulary_suggestions("I helped the team with a lot of stuff.");
        assert_eq!(suggestions.len(), 3);
        assert!(suggestions[0].starts_with("Replace 'helped' → 'spearheaded'"));
        assert!(suggestions[0].contains("I spearheaded the team"));

        let padded = generate_vocabulary_suggestions("We shipped the release in March.");
        assert_eq!(padded.len(), 3);
        assert_eq!(padded[0], GENERIC_SUGGESTIONS[0]);

        assert_eq!(generate_vocabulary_suggestions("  ").len(), 2);
    }

    #[test]
    fn role_vocabulary_is_sized_and_stable() {
        let first = generate_role_vocabulary("Tell me about a conflict", "We disagreed on scope.");
        assert!((5..=8).contains(&first.len()));
        assert_eq!(
            first,
            generate_role_vocabulary("Tell me about a conflict", "We disagreed on scope.")
        );
        for item in &first {
            assert!(!item.example.contains('<'));
            assert!(is_valid_ipa(&item.ipa));
        }
    }

    #[test]
    fn role_vocabulary_spans_five_to_eight_distinct_words() {
        let mut sizes = HashSet::new();
        for n in 0..40 {
            let items = generate_role_vocabulary("How do you fix a bug?", &format!("Answer {n}."));
            let unique: HashSet<String> = items.iter().map(|i| i.word.to_lowercase()).collect();
            assert_eq!(unique.len(), items.len());
            sizes.insert(items.len());
        }
        assert!(sizes.iter().all(|size| (5..=8).contains(size)));
        assert!(sizes.contains(&8));
    }

    #[test]
    fn normalize_prefers_lexicon_and_drops_bad_ipa() {
        let plain = VocabInput::Plain("optimize".to_string()).normalize();
        assert_eq!(plain.ipa, "/ˈɒptɪmaɪz/");
        assert_eq!(plain.example, "I optimized the workflow to save time.");

        let unknown: VocabInput = serde_json::from_str(
            r#"{"word":"Grit","phonetic":"grit","example":"<b>Grit</b> matters"}"#,
        )
        .expect("record parses");
        let normalized = unknown.normalize();
        assert_eq!(normalized.ipa, "");
        assert_eq!(normalized.pos, "word");
        assert_eq!(normalized.definition, "Definition not available");
        assert_eq!(normalized.example, "Grit matters");
        assert!(!normalized.is_verb());
    }

    #[test]
    fn markup_is_stripped_from_caller_words() {
        let tagged = VocabInput::Plain("  <b>Grit</b> ".to_string());
        assert_eq!(tagged.word(), "Grit");
        assert_eq!(tagged.normalize().word, "Grit");

        let mut ledger = VocabLedger::new();
        let picked = ledger.pick(
            &[
                VocabInput::Plain("<i></i>".to_string()),
                tagged,
                VocabInput::Plain("grit".to_string()),
            ],
            2,
        );
        assert_eq!(picked[0].word, "Grit");
        assert_ne!(picked[1].word.to_lowercase(), "grit");
        assert!(picked.iter().all(|item| !item.word.contains('<')));
    }

    #[test]
    fn ipa_validation() {
        assert!(is_valid_ipa(""));
        assert!(is_valid_ipa("/ɡaɪd/"));
        assert!(!is_valid_ipa("/"));
        assert!(!is_valid_ipa("//"));
        assert!(!is_valid_ipa("gaid"));
        assert!(!is_valid_ipa("/a/b/"));
    }

    #[test]
    fn ledger_skips_used_words_and_always_fills() {
        let mut ledger = VocabLedger::new();
        let candidates = vec![
            VocabInput::Plain("Align".to_string()),
            VocabInput::Plain("align".to_string()),
            VocabInput::Plain("Mentor".to_string()),
        ];
        let first = ledger.pick(&candidates, 2);
        assert_eq!(
            first.iter().map(|v| v.word.as_str()).collect::<Vec<_>>(),
            vec!["Align", "Mentor"]
        );

        let second = ledger.pick(&candidates, 2);
        assert_eq!(
            second.iter().map(|v| v.word.as_str()).collect::<Vec<_>>(),
            vec!["Articulate", "Quantify"]
        );

        for _ in 0..40 {
            assert_eq!(ledger.pick(&[], 2).len(), 2);
        }
    }
}
