/// A hire-grade word with pronunciation and usage. Examples mark the word with `<u>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexiconEntry {
    pub word: &'static str,
    pub pos: &'static str,
    pub ipa: &'static str,
    pub definition: &'static str,
    pub example: &'static str,
    pub why_it_helps: &'static str,
}

const fn entry(
    word: &'static str,
    pos: &'static str,
    ipa: &'static str,
    definition: &'static str,
    example: &'static str,
    why_it_helps: &'static str,
) -> LexiconEntry {
    LexiconEntry {
        word,
        pos,
        ipa,
        definition,
        example,
        why_it_helps,
    }
}

pub const LEXICON: &[LexiconEntry] = &[
    // communication
    entry("articulate", "verb", "/ɑːrˈtɪkjʊleɪt/", "To express an idea clearly", "I <u>articulated</u> the risks to the stakeholders.", "Shows clarity of thought"),
    entry("align", "verb", "/əˈlaɪn/", "To bring into agreement", "I worked to <u>align</u> the team on the new goals.", "Crucial for teamwork"),
    entry("negotiate", "verb", "/nɪˈɡoʊʃieɪt/", "To find a compromise", "I <u>negotiated</u> a deadline extension.", "Demonstrates conflict resolution"),
    entry("facilitate", "verb", "/fəˈsɪlɪteɪt/", "To make a process easier", "I <u>facilitated</u> the design workshop.", "Signals leadership"),
    entry("advocate", "verb", "/ˈædvəkeɪt/", "To support a cause or person", "I <u>advocated</u> for the user's needs.", "Shows empathy and conviction"),
    entry("clarify", "verb", "/ˈklærɪfaɪ/", "To make less confusing", "I asked questions to <u>clarify</u> the requirements.", "Prevents costly mistakes"),
    entry("mediate", "verb", "/ˈmiːdieɪt/", "To intervene in a dispute", "I helped <u>mediate</u> the disagreement.", "Shows emotional intelligence"),
    // execution
    entry("prioritize", "verb", "/praɪˈɔːrɪtaɪz/", "To determine what is most important", "I <u>prioritized</u> the critical bugs first.", "Shows time management"),
    entry("execute", "verb", "/ˈɛksɪkjuːt/", "To carry out a plan", "I <u>executed</u> the launch strategy.", "Focuses on results"),
    entry("coordinate", "verb", "/koʊˈɔːrdɪneɪt/", "To organize diverse elements", "I <u>coordinated</u> the cross-team effort.", "Shows organizational skill"),
    entry("drive", "verb", "/draɪv/", "To propel or carry along", "I helped <u>drive</u> the project to completion.", "Demonstrates energy and ownership"),
    entry("implement", "verb", "/ˈɪmplɪmɛnt/", "To put into effect", "We <u>implemented</u> a new testing protocol.", "Shows technical capability"),
    entry("spearhead", "verb", "/ˈspɪrhɛd/", "To lead an initiative from the front", "I <u>spearheaded</u> the migration initiative.", "Strong leadership word"),
    // problem solving
    entry("diagnose", "verb", "/ˌdaɪəɡˈnoʊs/", "To identify the nature of a problem", "I <u>diagnosed</u> the root cause of the latency.", "Shows analytical depth"),
    entry("troubleshoot", "verb", "/ˈtrʌbəlʃuːt/", "To trace and correct faults", "I <u>troubleshot</u> the connection failures.", "Demonstrates persistence"),
    entry("investigate", "verb", "/ɪnˈvɛstɪɡeɪt/", "To observe or study by close examination", "I <u>investigated</u> the discrepancy in data.", "Shows thoroughness"),
    entry("resolve", "verb", "/rɪˈzɒlv/", "To find a solution", "I <u>resolved</u> the conflict by finding common ground.", "Focuses on outcomes"),
    entry("assess", "verb", "/əˈsɛs/", "To estimate the nature or quality", "I <u>assessed</u> the impact of the delay.", "Shows strategic thinking"),
    // leadership
    entry("mentor", "verb", "/ˈmɛntɔːr/", "To advise and train", "I <u>mentored</u> two junior engineers.", "Shows investment in others"),
    entry("empower", "verb", "/ɪmˈpaʊər/", "To give power or authority", "I <u>empowered</u> the team to make decisions.", "Good management style"),
    entry("influence", "verb", "/ˈɪnfluəns/", "To have an effect on", "I used data to <u>influence</u> the roadmap.", "Critical for senior roles"),
    entry("guide", "verb", "/ɡaɪd/", "To show the way", "I <u>guided</u> the new hires through onboarding.", "Shows supportiveness"),
    entry("motivate", "verb", "/ˈmoʊtɪveɪt/", "To provide a motive", "I tried to <u>motivate</u> the team during the crunch.", "Emotional intelligence"),
    // efficiency
    entry("optimize", "verb", "/ˈɒptɪmaɪz/", "To make as effective as possible", "I <u>optimized</u> the workflow to save time.", "Results oriented"),
    entry("streamline", "verb", "/ˈstriːmlaɪn/", "To make simpler or more efficient", "I <u>streamlined</u> the approval process.", "Process improvement focus"),
    entry("accelerate", "verb", "/ækˈsɛləreɪt/", "To move faster", "We <u>accelerated</u> the release schedule.", "Shows speed of execution"),
    entry("enhance", "verb", "/ɪnˈhɑːns/", "To improve the quality", "I <u>enhanced</u> the user documentation.", "Commitment to quality"),
    entry("quantify", "verb", "/ˈkwɑːntɪfaɪ/", "To express or measure the amount of something", "I <u>quantified</u> the impact by tracking time saved each week.", "Shows data-driven thinking"),
    // strategy and analysis
    entry("synthesize", "verb", "/ˈsɪnθəsaɪz/", "To combine elements into a coherent whole", "I <u>synthesized</u> feedback from multiple teams.", "Shows analytical thinking"),
    entry("validate", "verb", "/ˈvælɪdeɪt/", "To check or prove the validity", "I <u>validated</u> the assumptions with user research.", "Shows rigor"),
    entry("initiate", "verb", "/ɪˈnɪʃieɪt/", "To cause a process to begin", "I <u>initiated</u> the code review process.", "Shows proactivity"),
    entry("collaborate", "verb", "/kəˈlæbəreɪt/", "To work jointly with others", "I <u>collaborated</u> with the design team.", "Teamwork focus"),
    entry("innovate", "verb", "/ˈɪnəveɪt/", "To introduce new methods or ideas", "We <u>innovated</u> on the user experience.", "Shows creativity"),
    entry("adapt", "verb", "/əˈdæpt/", "To adjust to new conditions", "I <u>adapted</u> our plan when priorities shifted.", "Shows flexibility"),
    // impact and outcomes
    entry("impact", "noun", "/ˈɪmpækt/", "The effect or influence of something", "The <u>impact</u> was measurable in user satisfaction.", "Results-oriented"),
    entry("efficiency", "noun", "/ɪˈfɪʃənsi/", "The state of achieving maximum productivity", "I improved team <u>efficiency</u> by 30%.", "Shows optimization mindset"),
    entry("resolution", "noun", "/ˌrɛzəˈluːʃən/", "The action of solving a problem", "The <u>resolution</u> came from better communication.", "Problem-solving focus"),
    entry("alignment", "noun", "/əˈlaɪnmənt/", "Agreement or cooperation", "We achieved <u>alignment</u> on priorities.", "Shows collaboration"),
    entry("decision", "noun", "/dɪˈsɪʒən/", "A conclusion reached after consideration", "I made the <u>decision</u> to pivot the strategy.", "Shows ownership"),
    entry("strategy", "noun", "/ˈstrætədʒi/", "A plan of action designed to achieve a goal", "Our <u>strategy</u> focused on user retention.", "Strategic thinking"),
    entry("mentorship", "noun", "/ˈmɛntɔːrʃɪp/", "The guidance provided by a mentor", "I provided <u>mentorship</u> to junior developers.", "Leadership quality"),
    entry("scalability", "noun", "/ˌskeɪləˈbɪləti/", "Ability to handle growth", "I focused on <u>scalability</u>.", "System design focus"),
    entry("initiative", "noun", "/ɪˈnɪʃətɪv/", "Power or opportunity to act", "I took <u>initiative</u>.", "Self-starter"),
    entry("empathy", "noun", "/ˈɛmpəθi/", "Understanding others' feelings", "I led with <u>empathy</u>.", "Emotional intelligence"),
    entry("transparency", "noun", "/trænsˈpærənsi/", "Openness and accountability", "I valued <u>transparency</u>.", "Builds trust"),
];

/// Generic words tried, in order, when an answer's own vocabulary is used up.
pub const FALLBACK_WORDS: &[&str] = &[
    "Articulate", "Quantify", "Clarify", "Synthesize", "Prioritize", "Validate", "Streamline",
    "Optimize", "Facilitate", "Collaborate", "Initiate", "Execute", "Innovate", "Mentorship",
    "Strategy", "Impact", "Efficiency", "Resolution", "Alignment", "Decision", "Advocate",
    "Mediate", "Align", "Assess", "Diagnose",
];

/// Last resort so a question never ends up with fewer than two words.
pub static LAST_RESORT: [LexiconEntry; 2] = [
    entry("Practice", "noun", "/ˈpræktɪs/", "Repeated exercise to build a skill", "Regular <u>practice</u> made my answers sharper.", "Shows commitment to growth"),
    entry("Result", "noun", "/rɪˈzʌlt/", "The outcome produced by an action", "The <u>result</u> was a faster release cycle.", "Keeps the story outcome-focused"),
];

pub fn lookup(word: &str) -> Option<&'static LexiconEntry> {
    let needle = word.trim();
    LEXICON
        .iter()
        .chain(LAST_RESORT.iter())
        .find(|entry| entry.word.eq_ignore_ascii_case(needle))
}

/// Keyword-detected skill theme of a question and answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillCategory {
    Communication,
    Execution,
    ProblemSolving,
    Leadership,
    Efficiency,
    General,
}

const CATEGORY_CUES: [(SkillCategory, &[&str]); 5] = [
    (
        SkillCategory::Communication,
        &["conflict", "disagree", "argue", "persuade", "team", "people"],
    ),
    (
        SkillCategory::Execution,
        &["execute", "ship", "deliver", "plan", "manage"],
    ),
    (
        SkillCategory::ProblemSolving,
        &["fail", "mistake", "error", "bug", "fix", "solve"],
    ),
    (
        SkillCategory::Leadership,
        &["lead", "mentor", "grow", "guide", "strategic"],
    ),
    (
        SkillCategory::Efficiency,
        &["fast", "slow", "efficient", "scale", "optimize"],
    ),
];

impl SkillCategory {
    pub fn detect(question_text: &str, answer_text: &str) -> Self {
        let combined = format!("{question_text} {answer_text}").to_lowercase();
        CATEGORY_CUES
            .iter()
            .find(|(_, cues)| cues.iter().any(|cue| combined.contains(cue)))
            .map(|(category, _)| *category)
            .unwrap_or(SkillCategory::General)
    }

    /// Second source of words when a theme runs short.
    pub fn companion(self) -> Self {
        match self {
            SkillCategory::Execution => SkillCategory::Communication,
            _ => SkillCategory::Execution,
        }
    }

    pub fn words(self) -> &'static [&'static str] {
        match self {
            SkillCategory::Communication => {
                &["articulate", "align", "facilitate", "clarify", "advocate", "mediate"]
            }
            SkillCategory::Execution => {
                &["prioritize", "execute", "coordinate", "drive", "implement", "spearhead"]
            }
            SkillCategory::ProblemSolving => {
                &["diagnose", "troubleshoot", "investigate", "resolve", "assess"]
            }
            SkillCategory::Leadership => {
                &["mentor", "empower", "influence", "guide", "motivate", "initiative"]
            }
            SkillCategory::Efficiency => {
                &["optimize", "streamline", "accelerate", "enhance", "scalability"]
            }
            SkillCategory::General => &["prioritize", "facilitate", "resolve", "collaborate", "adapt"],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_category_and_fallback_word_is_in_the_lexicon() {
        let categories = [
            SkillCategory::Communication,
            SkillCategory::Execution,
            SkillCategory::ProblemSolving,
            SkillCategory::Leadership,
            SkillCategory::Efficiency,
            SkillCategory::General,
        ];
        for word in categories
            .iter()
            .flat_map(|category| category.words().iter())
            .chain(FALLBACK_WORDS.iter())
        {
            assert!(lookup(word).is_some(), "missing lexicon entry for {word}");
        }
    }

    #[test]
    fn lexicon_words_are_unique_and_ipa_is_slash_delimited() {
        let mut seen = HashSet::new();
        for entry in LEXICON.iter().chain(LAST_RESORT.iter()) {
            assert!(seen.insert(entry.word.to_lowercase()), "duplicate {}", entry.word);
            assert!(entry.ipa.starts_with('/') && entry.ipa.ends_with('/'));
            assert!(entry.example.contains("<u>"));
        }
    }

    #[test]
    fn detects_first_matching_category() {
        assert_eq!(
            SkillCategory::detect("Tell me about a conflict", "we fixed a bug"),
            SkillCategory::Communication
        );
        assert_eq!(
            SkillCategory::detect("Describe a failure", ""),
            SkillCategory::ProblemSolving
        );
        assert_eq!(SkillCategory::detect("Why us?", "I admire you"), SkillCategory::General);
    }
}
