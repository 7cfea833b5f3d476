use super::classifier::{RoleFamily, SeniorityLevel};
use once_cell::sync::Lazy;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashSet;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

const EMBEDDED_BANK: &str = include_str!("../../data/question_bank.json");
const WILDCARD: &str = "all";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Behavioral,
    RoleSpecific,
    Leadership,
    Communication,
    Situational,
    Storytelling,
    Technical,
}

impl Category {
    pub fn tag(self) -> &'static str {
        match self {
            Category::Behavioral => "behavioral",
            Category::RoleSpecific => "role_specific",
            Category::Leadership => "leadership",
            Category::Communication => "communication",
            Category::Situational => "situational",
            Category::Storytelling => "storytelling",
            Category::Technical => "technical",
        }
    }

    /// Matches caller-supplied focus areas such as `"Role specific"` or `"leadership"`.
    pub fn matches_focus(self, focus: &str) -> bool {
        let normalized: String = focus
            .trim()
            .chars()
            .map(|c| match c {
                ' ' | '-' => '_',
                other => other.to_ascii_lowercase(),
            })
            .collect();
        normalized == self.tag()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    #[serde(alias = "normal")]
    Medium,
    Hard,
}

/// How a tag dimension of a record relates to a classified value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudienceMatch {
    Exact,
    Wildcard,
}

/// A tag set that may also carry the `"all"` wildcard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Audience<T> {
    tags: Vec<T>,
    wildcard: bool,
}

impl<T: PartialEq> Audience<T> {
    pub fn all() -> Self {
        Self {
            tags: Vec::new(),
            wildcard: true,
        }
    }

    pub fn only(tags: Vec<T>) -> Self {
        Self {
            tags,
            wildcard: false,
        }
    }

    pub fn admits(&self, value: &T) -> Option<AudienceMatch> {
        if self.tags.contains(value) {
            Some(AudienceMatch::Exact)
        } else if self.wildcard {
            Some(AudienceMatch::Wildcard)
        } else {
            None
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty() && !self.wildcard
    }

    pub fn tags(&self) -> &[T] {
        &self.tags
    }
}

impl<'de, T> Deserialize<'de> for Audience<T>
where
    T: FromStr + PartialEq,
    T::Err: fmt::Display,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Vec::<String>::deserialize(deserializer)?;
        let mut audience = Audience::only(Vec::with_capacity(raw.len()));
        for tag in raw {
            if tag.trim().eq_ignore_ascii_case(WILDCARD) {
                audience.wildcard = true;
                continue;
            }
            let parsed = tag.parse::<T>().map_err(D::Error::custom)?;
            if !audience.tags.contains(&parsed) {
                audience.tags.push(parsed);
            }
        }
        Ok(audience)
    }
}

impl<T: fmt::Display> Serialize for Audience<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tags: Vec<String> = self.tags.iter().map(ToString::to_string).collect();
        if self.wildcard {
            tags.push(WILDCARD.to_string());
        }
        tags.serialize(serializer)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub id: String,
    pub category: Category,
    pub difficulty: Difficulty,
    pub role_families: Audience<RoleFamily>,
    pub seniority_levels: Audience<SeniorityLevel>,
    pub prompt: String,
    #[serde(default)]
    pub hint: String,
    #[serde(default)]
    pub competencies: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum QuestionBankError {
    #[error("question bank is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("unable to read question bank: {0}")]
    Io(#[from] std::io::Error),
    #[error("duplicate question id '{0}'")]
    DuplicateId(String),
    #[error("question '{id}' has an empty {field} tag set")]
    EmptyTagSet { id: String, field: &'static str },
}

static STANDARD: Lazy<Arc<QuestionBank>> = Lazy::new(|| {
    match QuestionBank::from_json(EMBEDDED_BANK) {
        Ok(bank) => Arc::new(bank),
        Err(err) => {
            tracing::error!(error = %err, "embedded question bank rejected; serving an empty bank");
            Arc::new(QuestionBank::default())
        }
    }
});

/// Read-only, validated collection of interview questions.
#[derive(Debug, Clone, Default)]
pub struct QuestionBank {
    records: Vec<QuestionRecord>,
}

impl QuestionBank {
    /// The bank shipped with the crate, parsed once per process.
    pub fn standard() -> Arc<QuestionBank> {
        Arc::clone(&STANDARD)
    }

    pub fn from_records(records: Vec<QuestionRecord>) -> Result<Self, QuestionBankError> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.id.as_str()) {
                return Err(QuestionBankError::DuplicateId(record.id.clone()));
            }
            if record.role_families.is_empty() {
                return Err(QuestionBankError::EmptyTagSet {
                    id: record.id.clone(),
                    field: "role_families",
                });
            }
            if record.seniority_levels.is_empty() {
                return Err(QuestionBankError::EmptyTagSet {
                    id: record.id.clone(),
                    field: "seniority_levels",
                });
            }
        }
        Ok(Self { records })
    }

    pub fn from_json(raw: &str) -> Result<Self, QuestionBankError> {
        Self::from_records(serde_json::from_str(raw)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, QuestionBankError> {
        Self::from_records(serde_json::from_reader(reader)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, QuestionBankError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn records(&self) -> &[QuestionRecord] {
        &self.records
    }

    pub fn get(&self, id: &str) -> Option<&QuestionRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_json(id: &str, roles: &str) -> String {
        format!(
            r#"{{"id":"{id}","category":"behavioral","difficulty":"normal",
                "role_families":{roles},"seniority_levels":["all"],
                "prompt":"Tell me about {{job_title}}."}}"#
        )
    }

    #[test]
    fn embedded_bank_loads_and_is_valid() {
        let bank = QuestionBank::standard();
        assert_eq!(bank.len(), 61);
        let first = bank.get("behav_001").expect("first question present");
        assert_eq!(first.category, Category::Behavioral);
        assert_eq!(
            first.role_families.admits(&RoleFamily::Finance),
            Some(AudienceMatch::Wildcard)
        );
    }

    #[test]
    fn exact_tags_take_precedence_over_wildcard() {
        let audience: Audience<RoleFamily> =
            serde_json::from_str(r#"["marketing", "all"]"#).expect("audience parses");
        assert_eq!(
            audience.admits(&RoleFamily::Marketing),
            Some(AudienceMatch::Exact)
        );
        assert_eq!(
            audience.admits(&RoleFamily::SalesCs),
            Some(AudienceMatch::Wildcard)
        );

        let narrow: Audience<SeniorityLevel> =
            serde_json::from_str(r#"["mid", "senior"]"#).expect("audience parses");
        assert_eq!(narrow.admits(&SeniorityLevel::Entry), None);
        assert_eq!(
            narrow.admits(&SeniorityLevel::MidLevel),
            Some(AudienceMatch::Exact)
        );
    }

    #[test]
    fn rejects_duplicate_ids() {
        let raw = format!(
            "[{},{}]",
            record_json("q1", r#"["all"]"#),
            record_json("q1", r#"["all"]"#)
        );
        let err = QuestionBank::from_json(&raw).expect_err("duplicate ids rejected");
        assert!(matches!(err, QuestionBankError::DuplicateId(id) if id == "q1"));
    }

    #[test]
    fn rejects_empty_tag_sets_and_unknown_tags() {
        let empty = format!("[{}]", record_json("q1", "[]"));
        let err = QuestionBank::from_json(&empty).expect_err("empty tags rejected");
        assert!(matches!(
            err,
            QuestionBankError::EmptyTagSet {
                field: "role_families",
                ..
            }
        ));

        let unknown = format!("[{}]", record_json("q1", r#"["astronaut"]"#));
        let err = QuestionBank::from_json(&unknown).expect_err("unknown tag rejected");
        assert!(matches!(err, QuestionBankError::Parse(_)));
    }

    #[test]
    fn focus_areas_match_loosely() {
        assert!(Category::RoleSpecific.matches_focus("Role specific"));
        assert!(Category::RoleSpecific.matches_focus("role-specific"));
        assert!(!Category::Leadership.matches_focus("lead"));
    }
}
