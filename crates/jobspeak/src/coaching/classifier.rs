use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Coarse occupational category used to filter and rank bank questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleFamily {
    ProductProject,
    SoftwareDataIt,
    BusinessOps,
    SalesCs,
    Marketing,
    Finance,
    HrPeople,
    Healthcare,
    Education,
    LegalCompliance,
    DesignCreative,
    LeadershipExec,
    TradesFieldLogistics,
    StudentEarlyCareer,
    /// Fallback when nothing in the title or seniority points anywhere specific.
    General,
}

impl RoleFamily {
    pub fn ordered() -> [RoleFamily; 15] {
        [
            RoleFamily::ProductProject,
            RoleFamily::SoftwareDataIt,
            RoleFamily::BusinessOps,
            RoleFamily::SalesCs,
            RoleFamily::Marketing,
            RoleFamily::Finance,
            RoleFamily::HrPeople,
            RoleFamily::Healthcare,
            RoleFamily::Education,
            RoleFamily::LegalCompliance,
            RoleFamily::DesignCreative,
            RoleFamily::LeadershipExec,
            RoleFamily::TradesFieldLogistics,
            RoleFamily::StudentEarlyCareer,
            RoleFamily::General,
        ]
    }

    pub fn tag(self) -> &'static str {
        match self {
            RoleFamily::ProductProject => "product_project",
            RoleFamily::SoftwareDataIt => "software_data_it",
            RoleFamily::BusinessOps => "business_ops",
            RoleFamily::SalesCs => "sales_cs",
            RoleFamily::Marketing => "marketing",
            RoleFamily::Finance => "finance",
            RoleFamily::HrPeople => "hr_people",
            RoleFamily::Healthcare => "healthcare",
            RoleFamily::Education => "education",
            RoleFamily::LegalCompliance => "legal_compliance",
            RoleFamily::DesignCreative => "design_creative",
            RoleFamily::LeadershipExec => "leadership_exec",
            RoleFamily::TradesFieldLogistics => "trades_field_logistics",
            RoleFamily::StudentEarlyCareer => "student_early_career",
            RoleFamily::General => "general",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RoleFamily::ProductProject => "Product/Project",
            RoleFamily::SoftwareDataIt => "Software/Data/IT",
            RoleFamily::BusinessOps => "Business/Ops",
            RoleFamily::SalesCs => "Sales/CS",
            RoleFamily::Marketing => "Marketing",
            RoleFamily::Finance => "Finance",
            RoleFamily::HrPeople => "HR/People",
            RoleFamily::Healthcare => "Healthcare",
            RoleFamily::Education => "Education",
            RoleFamily::LegalCompliance => "Legal/Compliance",
            RoleFamily::DesignCreative => "Design/Creative",
            RoleFamily::LeadershipExec => "Leadership/Exec",
            RoleFamily::TradesFieldLogistics => "Trades/Field/Logistics",
            RoleFamily::StudentEarlyCareer => "Student/Early Career",
            RoleFamily::General => "General",
        }
    }
}

impl fmt::Display for RoleFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for RoleFamily {
    type Err = UnknownTag;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let needle = value.trim().to_ascii_lowercase();
        RoleFamily::ordered()
            .into_iter()
            .find(|family| family.tag() == needle)
            .ok_or(UnknownTag(needle))
    }
}

/// Seniority bucket derived from free-text seniority input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SeniorityLevel {
    #[serde(rename = "entry")]
    Entry,
    #[default]
    #[serde(rename = "mid-level", alias = "mid")]
    MidLevel,
    #[serde(rename = "senior")]
    Senior,
    #[serde(rename = "executive")]
    Executive,
}

impl SeniorityLevel {
    pub fn tag(self) -> &'static str {
        match self {
            SeniorityLevel::Entry => "entry",
            SeniorityLevel::MidLevel => "mid-level",
            SeniorityLevel::Senior => "senior",
            SeniorityLevel::Executive => "executive",
        }
    }
}

impl fmt::Display for SeniorityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for SeniorityLevel {
    type Err = UnknownTag;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "entry" => Ok(SeniorityLevel::Entry),
            "mid" | "mid-level" => Ok(SeniorityLevel::MidLevel),
            "senior" => Ok(SeniorityLevel::Senior),
            "executive" => Ok(SeniorityLevel::Executive),
            other => Err(UnknownTag(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown tag '{0}'")]
pub struct UnknownTag(pub String);

/// Result of mapping a job title and seniority string onto the closed tag sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleProfile {
    pub role_family: RoleFamily,
    pub seniority_level: SeniorityLevel,
}

const KNOWN_TITLES: &[(&str, RoleFamily)] = &[
    ("product manager", RoleFamily::ProductProject),
    ("project manager", RoleFamily::ProductProject),
    ("program manager", RoleFamily::ProductProject),
    ("product owner", RoleFamily::ProductProject),
    ("scrum master", RoleFamily::ProductProject),
    ("software engineer", RoleFamily::SoftwareDataIt),
    ("developer", RoleFamily::SoftwareDataIt),
    ("programmer", RoleFamily::SoftwareDataIt),
    ("data scientist", RoleFamily::SoftwareDataIt),
    ("data analyst", RoleFamily::SoftwareDataIt),
    ("data engineer", RoleFamily::SoftwareDataIt),
    ("devops engineer", RoleFamily::SoftwareDataIt),
    ("qa engineer", RoleFamily::SoftwareDataIt),
    ("it specialist", RoleFamily::SoftwareDataIt),
    ("systems administrator", RoleFamily::SoftwareDataIt),
    ("network engineer", RoleFamily::SoftwareDataIt),
    ("business analyst", RoleFamily::BusinessOps),
    ("operations manager", RoleFamily::BusinessOps),
    ("operations analyst", RoleFamily::BusinessOps),
    ("strategy consultant", RoleFamily::BusinessOps),
    ("management consultant", RoleFamily::BusinessOps),
    ("account executive", RoleFamily::SalesCs),
    ("sales representative", RoleFamily::SalesCs),
    ("sales manager", RoleFamily::SalesCs),
    ("customer success manager", RoleFamily::SalesCs),
    ("account manager", RoleFamily::SalesCs),
    ("marketing manager", RoleFamily::Marketing),
    ("content marketer", RoleFamily::Marketing),
    ("digital marketer", RoleFamily::Marketing),
    ("growth marketer", RoleFamily::Marketing),
    ("brand manager", RoleFamily::Marketing),
    ("financial analyst", RoleFamily::Finance),
    ("accountant", RoleFamily::Finance),
    ("controller", RoleFamily::Finance),
    ("investment banker", RoleFamily::Finance),
    ("hr manager", RoleFamily::HrPeople),
    ("recruiter", RoleFamily::HrPeople),
    ("talent acquisition", RoleFamily::HrPeople),
    ("people operations", RoleFamily::HrPeople),
    ("nurse", RoleFamily::Healthcare),
    ("doctor", RoleFamily::Healthcare),
    ("physician", RoleFamily::Healthcare),
    ("medical assistant", RoleFamily::Healthcare),
    ("healthcare administrator", RoleFamily::Healthcare),
    ("teacher", RoleFamily::Education),
    ("professor", RoleFamily::Education),
    ("instructor", RoleFamily::Education),
    ("tutor", RoleFamily::Education),
    ("lawyer", RoleFamily::LegalCompliance),
    ("attorney", RoleFamily::LegalCompliance),
    ("paralegal", RoleFamily::LegalCompliance),
    ("compliance officer", RoleFamily::LegalCompliance),
    ("ux designer", RoleFamily::DesignCreative),
    ("ui designer", RoleFamily::DesignCreative),
    ("graphic designer", RoleFamily::DesignCreative),
    ("creative director", RoleFamily::DesignCreative),
    ("designer", RoleFamily::DesignCreative),
    ("head of", RoleFamily::LeadershipExec),
    ("director", RoleFamily::LeadershipExec),
    ("electrician", RoleFamily::TradesFieldLogistics),
    ("plumber", RoleFamily::TradesFieldLogistics),
    ("mechanic", RoleFamily::TradesFieldLogistics),
    ("logistics coordinator", RoleFamily::TradesFieldLogistics),
    ("supply chain manager", RoleFamily::TradesFieldLogistics),
    ("intern", RoleFamily::StudentEarlyCareer),
    ("student", RoleFamily::StudentEarlyCareer),
    ("graduate", RoleFamily::StudentEarlyCareer),
];

// Short keywords are matched as whole words so "it" does not fire on "auditor".
const KEYWORD_RULES: &[(&[&str], RoleFamily)] = &[
    (
        &["product", "project", "program", "scrum", "agile"],
        RoleFamily::ProductProject,
    ),
    (
        &[
            "engineer", "developer", "programmer", "software", "data", "devops", "sre", "qa",
            "it", "tech",
        ],
        RoleFamily::SoftwareDataIt,
    ),
    (
        &[
            "business",
            "operations",
            "ops",
            "strategy",
            "consultant",
            "analyst",
        ],
        RoleFamily::BusinessOps,
    ),
    (
        &["sales", "account", "bdr", "sdr", "customer success", "cs"],
        RoleFamily::SalesCs,
    ),
    (
        &["marketing", "growth", "brand", "content", "digital"],
        RoleFamily::Marketing,
    ),
    (
        &["finance", "financial", "accountant", "cfo", "controller"],
        RoleFamily::Finance,
    ),
    (
        &["hr", "human resources", "recruiter", "talent", "people"],
        RoleFamily::HrPeople,
    ),
    (
        &[
            "nurse",
            "doctor",
            "physician",
            "medical",
            "healthcare",
            "clinical",
        ],
        RoleFamily::Healthcare,
    ),
    (
        &["teacher", "professor", "instructor", "education", "tutor"],
        RoleFamily::Education,
    ),
    (
        &["lawyer", "attorney", "legal", "compliance", "paralegal"],
        RoleFamily::LegalCompliance,
    ),
    (
        &["designer", "design", "ux", "ui", "creative", "graphic"],
        RoleFamily::DesignCreative,
    ),
    (
        &[
            "ceo",
            "cto",
            "coo",
            "vp",
            "vice president",
            "director",
            "head of",
            "chief",
            "executive",
        ],
        RoleFamily::LeadershipExec,
    ),
    (
        &[
            "electrician",
            "plumber",
            "mechanic",
            "logistics",
            "supply chain",
            "warehouse",
            "driver",
        ],
        RoleFamily::TradesFieldLogistics,
    ),
    (
        &["intern", "student", "graduate", "entry level", "junior"],
        RoleFamily::StudentEarlyCareer,
    ),
];

const LEADERSHIP_SENIORITY_CUES: &[&str] = &["director", "vp", "head", "chief", "executive"];

/// Maps free text onto a role family and seniority level. Never fails.
pub fn classify(job_title: &str, seniority: &str) -> RoleProfile {
    RoleProfile {
        role_family: role_family_for(job_title, seniority),
        seniority_level: seniority_level_for(seniority),
    }
}

pub fn role_family_for(job_title: &str, seniority: &str) -> RoleFamily {
    let title = normalize(job_title);
    let seniority = normalize(seniority);

    if title.is_empty() {
        if contains_any_word(&seniority, &["senior", "lead", "principal"]) {
            return RoleFamily::LeadershipExec;
        }
        return RoleFamily::General;
    }

    if let Some((_, family)) = KNOWN_TITLES
        .iter()
        .find(|(known, _)| contains_phrase(&title, known))
    {
        return *family;
    }

    if let Some((_, family)) = KEYWORD_RULES
        .iter()
        .find(|(keywords, _)| contains_any_word(&title, keywords))
    {
        return *family;
    }

    if contains_any_word(&seniority, LEADERSHIP_SENIORITY_CUES) {
        return RoleFamily::LeadershipExec;
    }

    RoleFamily::General
}

pub fn seniority_level_for(seniority: &str) -> SeniorityLevel {
    let lower = normalize(seniority);

    if contains_any_word(&lower, &["entry", "junior", "associate", "intern"]) {
        SeniorityLevel::Entry
    } else if contains_any_word(&lower, &["senior", "lead", "staff", "principal"]) {
        SeniorityLevel::Senior
    } else if contains_any_word(&lower, LEADERSHIP_SENIORITY_CUES) {
        SeniorityLevel::Executive
    } else {
        SeniorityLevel::MidLevel
    }
}

/// Lowercases and collapses everything that is not alphanumeric into single spaces,
/// padded on both ends so phrase lookups can anchor on word boundaries.
fn normalize(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 2);
    out.push(' ');
    for word in raw
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
    {
        out.push_str(&word.to_lowercase());
        out.push(' ');
    }
    if out.len() == 1 {
        out.clear();
    }
    out
}

fn contains_phrase(normalized: &str, phrase: &str) -> bool {
    normalized.contains(&format!(" {phrase} "))
}

fn contains_any_word(normalized: &str, words: &[&str]) -> bool {
    words
        .iter()
        .any(|word| normalized.contains(&format!(" {word} ")))
}
