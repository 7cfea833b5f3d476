//! Pattern-based screening of free text for profanity, sexual content, and threats.

use once_cell::sync::Lazy;
use regex::{Regex, RegexSet};
use serde::Serialize;

const QUOTE_LIMIT: usize = 100;

const PROFANITY_PATTERNS: &[&str] = &[
    r"\bf+u+c+k+",
    r"\bs+h+i+t+",
    r"\bd+a+m+n+",
    r"\bh+e+l+l+(?:s|ish)?\b",
    r"\ba+s+s+h+o+l+e+",
    r"\bb+i+t+c+h+",
    r"\bc+r+a+p+(?:s|py)?\b",
    r"\bp+i+s+s+(?:ed|es|ing)?\b",
    r"\bc+u+n+t+",
    r"\bd+i+c+k+s?\b",
    r"\bc+o+c+k+s?\b",
    r"\bstupid\b",
    r"\bidiot\b",
    r"\bmoron\b",
    r"\bdumb\b",
    r"\bloser\b",
    r"\bsucks\b",
    r"\bshut\s+up\b",
];

const SEXUAL_PATTERNS: &[&str] = &[
    r"\bsex\b",
    r"\bsexy\b",
    r"\bporn",
    r"\bnaked\b",
    r"\bnude\b",
    r"\bbreast",
    r"\bgenitals?\b",
    r"\berotic\b",
    r"\bmasturbat",
    r"\borgasm",
    r"\bviagra\b",
    r"\bprostitut",
    r"\bstrip\s+club\b",
    r"\bsexual\s+harass",
    r"\binappropriate\s+touch",
];

// "hit", "shoot", "attack" and "destroy" are everyday business verbs ("hit our
// targets"), so they only count when aimed at a person.
const THREAT_PATTERNS: &[&str] = &[
    r"\bkill\b",
    r"\bmurder\b",
    r"\bpunch\b",
    r"\bhit\s+(?:him|her|them|me|you|someone|somebody|people|my\s+(?:boss|manager|coworker|colleague))\b",
    r"\bbeat\s+up\b",
    r"\bslap\b",
    r"\bstab\b",
    r"\bshoot\s+(?:him|her|them|me|you|someone|somebody|people)\b",
    r"\battack(?:ed)?\s+(?:him|her|them|me|you|someone|somebody|people)\b",
    r"\bharm\b",
    r"\bhurt\b",
    r"\bdestroy\s+(?:him|her|them|you|someone|somebody|people)\b",
    r"\bthreaten",
    r"\bviolence\b",
    r"\bwanted\s+to\s+(?:punch|hit|kill)\b",
    r"\bi\s+hate\b",
    r"\bhate\s+them\b",
];

struct PatternGroup {
    set: RegexSet,
    each: Vec<Regex>,
}

impl PatternGroup {
    fn compile(patterns: &[&str]) -> Self {
        let insensitive: Vec<String> = patterns.iter().map(|p| format!("(?i){p}")).collect();
        Self {
            set: RegexSet::new(&insensitive).unwrap_or_else(|_| RegexSet::empty()),
            each: insensitive
                .iter()
                .filter_map(|pattern| Regex::new(pattern).ok())
                .collect(),
        }
    }

    fn is_match(&self, text: &str) -> bool {
        self.set.is_match(text)
    }

    fn matched_terms(&self, text: &str, out: &mut Vec<String>) {
        for regex in &self.each {
            for found in regex.find_iter(text) {
                let term = found.as_str().to_lowercase();
                if !out.contains(&term) {
                    out.push(term);
                }
            }
        }
    }
}

static PROFANITY: Lazy<PatternGroup> = Lazy::new(|| PatternGroup::compile(PROFANITY_PATTERNS));
static SEXUAL: Lazy<PatternGroup> = Lazy::new(|| PatternGroup::compile(SEXUAL_PATTERNS));
static THREATS: Lazy<PatternGroup> = Lazy::new(|| PatternGroup::compile(THREAT_PATTERNS));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentCategory {
    Profanity,
    Sexual,
    Threats,
}

impl ContentCategory {
    pub fn label(self) -> &'static str {
        match self {
            ContentCategory::Profanity => "profanity",
            ContentCategory::Sexual => "sexual content",
            ContentCategory::Threats => "threatening language",
        }
    }

    /// Neutral stand-in used when an offending sentence must not be echoed back.
    pub fn paraphrase(self) -> &'static str {
        match self {
            ContentCategory::Profanity => "I was frustrated with how the situation was unfolding",
            ContentCategory::Sexual => "there was a sensitive situation that required discretion",
            ContentCategory::Threats => {
                "I felt strongly about the conflict and chose to step back before responding"
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentAnalysis {
    pub profanity_detected: bool,
    pub sexual_content_detected: bool,
    pub threats_detected: bool,
    pub has_inappropriate_content: bool,
}

impl ContentAnalysis {
    pub fn categories(&self) -> Vec<ContentCategory> {
        let mut categories = Vec::new();
        if self.profanity_detected {
            categories.push(ContentCategory::Profanity);
        }
        if self.sexual_content_detected {
            categories.push(ContentCategory::Sexual);
        }
        if self.threats_detected {
            categories.push(ContentCategory::Threats);
        }
        categories
    }

    pub fn is_clean(&self) -> bool {
        !self.has_inappropriate_content
    }
}

pub fn analyze(text: &str) -> ContentAnalysis {
    let profanity_detected = PROFANITY.is_match(text);
    let sexual_content_detected = SEXUAL.is_match(text);
    let threats_detected = THREATS.is_match(text);

    ContentAnalysis {
        profanity_detected,
        sexual_content_detected,
        threats_detected,
        has_inappropriate_content: profanity_detected || sexual_content_detected || threats_detected,
    }
}

pub fn is_flagged(text: &str) -> bool {
    analyze(text).has_inappropriate_content
}

/// Every lowercased span the detectors matched, in discovery order.
pub fn flagged_terms(text: &str) -> Vec<String> {
    let mut terms = Vec::new();
    PROFANITY.matched_terms(text, &mut terms);
    SEXUAL.matched_terms(text, &mut terms);
    THREATS.matched_terms(text, &mut terms);
    terms
}

/// First offending sentence (capped at 100 chars) or `None` for clean text.
pub fn extract_problematic_quote(text: &str, analysis: &ContentAnalysis) -> Option<String> {
    if analysis.is_clean() {
        return None;
    }

    let quote = sentences(text)
        .find(|sentence| is_flagged(sentence))
        .unwrap_or(text);
    Some(truncate_quote(quote))
}

/// Replaces each flagged sentence with the paraphrase of its first category.
/// Clean sentences are kept verbatim, joined back with ". ".
pub fn redact(text: &str) -> String {
    let analysis = analyze(text);
    if analysis.is_clean() {
        return text.to_string();
    }

    let mut parts: Vec<String> = Vec::new();
    for sentence in sentences(text) {
        let verdict = analyze(sentence);
        match verdict.categories().first() {
            Some(category) => {
                let paraphrase = category.paraphrase();
                if parts.last().map(String::as_str) != Some(paraphrase) {
                    parts.push(paraphrase.to_string());
                }
            }
            None => parts.push(sentence.to_string()),
        }
    }

    let mut joined = parts.join(". ");
    if !joined.is_empty() {
        joined.push('.');
    }
    joined
}

pub(crate) fn sentences(text: &str) -> impl Iterator<Item = &str> {
    text.split(['.', '!', '?'])
        .map(str::trim)
        .filter(|sentence| !sentence.is_empty())
}

fn truncate_quote(text: &str) -> String {
    if text.chars().count() > QUOTE_LIMIT {
        let head: String = text.chars().take(QUOTE_LIMIT).collect();
        format!("{head}...")
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_stretched_profanity() {
        let analysis = analyze("That meeting was fuuuuck awful");
        assert!(analysis.profanity_detected);
        assert!(analysis.has_inappropriate_content);
        assert!(!analysis.threats_detected);
    }

    #[test]
    fn ordinary_business_language_is_clean() {
        for text in [
            "Hello team, we hit our quarterly targets and shot past the forecast.",
            "I led an attack on our backlog and reduced open bugs by 40%.",
            "The assessment covered class design and cockpit software.",
        ] {
            assert!(analyze(text).is_clean(), "flagged: {text}");
        }
    }

    #[test]
    fn flags_threats_and_sexual_content_independently() {
        let threat = analyze("Honestly I wanted to punch my manager.");
        assert!(threat.threats_detected);
        assert!(!threat.sexual_content_detected);

        let sexual = analyze("He kept telling sexy jokes at the strip club.");
        assert!(sexual.sexual_content_detected);
        assert_eq!(sexual.categories(), vec![ContentCategory::Sexual]);
    }

    #[test]
    fn quote_is_first_offending_sentence() {
        let text = "We shipped on time. My coworker was an idiot about it! Then we moved on.";
        let quote = extract_problematic_quote(text, &analyze(text));
        assert_eq!(quote.as_deref(), Some("My coworker was an idiot about it"));
        assert_eq!(extract_problematic_quote("All good.", &analyze("All good.")), None);
    }

    #[test]
    fn long_quotes_are_truncated() {
        let text = format!("This is damn {}", "long ".repeat(40));
        let quote = extract_problematic_quote(&text, &analyze(&text)).expect("flagged");
        assert_eq!(quote.chars().count(), QUOTE_LIMIT + 3);
        assert!(quote.ends_with("..."));
    }

    #[test]
    fn redaction_removes_every_flagged_term() {
        let text = "My boss was a moron. I wanted to hit him. We delivered in 3 weeks.";
        let terms = flagged_terms(text);
        assert!(terms.contains(&"moron".to_string()));

        let redacted = redact(text);
        assert!(analyze(&redacted).is_clean());
        assert!(redacted.contains("We delivered in 3 weeks"));
        for term in terms {
            assert!(!redacted.to_lowercase().contains(&term));
        }
    }
}
