//! Personalised, anti-repeat question selection.
//!
//! Records are filtered by the caller's classified role family and seniority,
//! ranked by relevance, and the top of the ranking is shuffled with a seed derived
//! from the user and the rotation key (session id, or the UTC date when no session
//! is given). The same inputs always produce the same questions in the same order.

mod config;

pub use config::SelectorConfig;

use super::bank::{AudienceMatch, Category, Difficulty, QuestionBank, QuestionRecord};
use super::classifier::{self, RoleFamily, SeniorityLevel};
use super::seed;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

const DEFAULT_JOB_TITLE: &str = "professional";
const DEFAULT_INDUSTRY: &str = "your field";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewerPersona {
    pub name: &'static str,
    pub title: &'static str,
    pub avatar_url: Option<&'static str>,
    pub voice_id: &'static str,
    pub language_code: &'static str,
}

pub const DEFAULT_INTERVIEWER: InterviewerPersona = InterviewerPersona {
    name: "Sarah Jenkins",
    title: "Lead Technical Recruiter",
    avatar_url: None,
    voice_id: "en-US-Studio-O",
    language_code: "en-US",
};

/// Session presets offered to clients.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionMode {
    #[default]
    Practice,
    MockShort,
    MockLong,
}

impl SessionMode {
    pub fn question_count(self) -> usize {
        match self {
            SessionMode::Practice => 4,
            SessionMode::MockShort => 5,
            SessionMode::MockLong => 10,
        }
    }

    /// Mock interviews fill category quotas before the shuffled remainder.
    pub fn includes_breakdown(self) -> bool {
        !matches!(self, SessionMode::Practice)
    }

    pub fn apply(self, request: &mut SelectionRequest) {
        request.count = self.question_count();
        request.include_breakdown = self.includes_breakdown();
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SelectionRequest {
    pub user_key: String,
    pub count: usize,
    pub job_title: String,
    pub industry: String,
    pub seniority: String,
    pub focus_areas: Vec<String>,
    /// Most recent first.
    pub asked_question_ids: Vec<String>,
    pub session_id: Option<String>,
    pub include_breakdown: bool,
}

impl Default for SelectionRequest {
    fn default() -> Self {
        Self {
            user_key: String::new(),
            count: SessionMode::Practice.question_count(),
            job_title: String::new(),
            industry: String::new(),
            seniority: String::new(),
            focus_areas: Vec::new(),
            asked_question_ids: Vec::new(),
            session_id: None,
            include_breakdown: false,
        }
    }
}

impl SelectionRequest {
    pub fn new(user_key: impl Into<String>, mode: SessionMode) -> Self {
        let mut request = Self {
            user_key: user_key.into(),
            ..Self::default()
        };
        mode.apply(&mut request);
        request
    }

    /// Keeps only the `window` most recently asked ids. Callers apply this when
    /// they build the history; the selector itself avoids every id it is given.
    pub fn retain_recent(&mut self, window: usize) {
        self.asked_question_ids.truncate(window);
    }

    /// Session id when present, otherwise the UTC calendar date.
    pub fn rotation_key(&self, today: NaiveDate) -> String {
        match self.session_id.as_deref().map(str::trim) {
            Some(session) if !session.is_empty() => session.to_string(),
            _ => today.format("%Y-%m-%d").to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedQuestion {
    pub id: String,
    pub prompt: String,
    pub hint: String,
    pub category: Category,
    pub difficulty: Difficulty,
    pub competencies: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionMetadata {
    pub role_family: RoleFamily,
    pub seniority_level: SeniorityLevel,
    /// Size of the pool that was ranked: fresh records, or every match when
    /// too few were fresh.
    pub total_candidates: usize,
    pub fresh_candidates: usize,
    pub rotation_key: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionResult {
    pub interviewer: InterviewerPersona,
    pub questions: Vec<SelectedQuestion>,
    pub metadata: SelectionMetadata,
}

impl SelectionResult {
    pub fn question_ids(&self) -> Vec<&str> {
        self.questions.iter().map(|q| q.id.as_str()).collect()
    }
}

#[derive(Debug, Clone, Copy)]
struct Candidate<'a> {
    record: &'a QuestionRecord,
    relevance: u32,
}

/// Selects questions from a shared, read-only bank.
#[derive(Debug, Clone)]
pub struct QuestionSelector {
    bank: Arc<QuestionBank>,
    config: SelectorConfig,
}

impl Default for QuestionSelector {
    fn default() -> Self {
        Self::new(QuestionBank::standard(), SelectorConfig::default())
    }
}

impl QuestionSelector {
    pub fn new(bank: Arc<QuestionBank>, config: SelectorConfig) -> Self {
        Self { bank, config }
    }

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    pub fn config(&self) -> &SelectorConfig {
        &self.config
    }

    /// Rotates on today's UTC date when the request carries no session id.
    pub fn select(&self, request: &SelectionRequest) -> SelectionResult {
        self.select_at(request, Utc::now().date_naive())
    }

    pub fn select_at(&self, request: &SelectionRequest, today: NaiveDate) -> SelectionResult {
        let profile = classifier::classify(&request.job_title, &request.seniority);
        tracing::debug!(
            job_title = %request.job_title,
            role_family = %profile.role_family,
            seniority_level = %profile.seniority_level,
            "classified selection request"
        );

        let matching: Vec<Candidate<'_>> = self
            .bank
            .records()
            .iter()
            .filter_map(|record| {
                let role = record.role_families.admits(&profile.role_family)?;
                let seniority = record.seniority_levels.admits(&profile.seniority_level)?;
                Some(Candidate {
                    record,
                    relevance: self.relevance(record, role, seniority, &request.focus_areas),
                })
            })
            .collect();

        let recent: HashSet<&str> = request
            .asked_question_ids
            .iter()
            .map(|id| id.trim())
            .collect();
        let fresh: Vec<Candidate<'_>> = matching
            .iter()
            .copied()
            .filter(|candidate| !recent.contains(candidate.record.id.as_str()))
            .collect();
        let fresh_candidates = fresh.len();

        let mut candidates = if fresh_candidates >= request.count {
            fresh
        } else {
            tracing::debug!(
                fresh = fresh_candidates,
                total = matching.len(),
                requested = request.count,
                "too few fresh questions; allowing repeats"
            );
            matching
        };
        let total_candidates = candidates.len();

        // Stable: equal relevance keeps bank order.
        candidates.sort_by(|a, b| b.relevance.cmp(&a.relevance));
        candidates.truncate(request.count.saturating_mul(self.config.pool_multiplier));

        let rotation_key = request.rotation_key(today);
        seed::shuffle(
            &mut candidates,
            seed::rotation_seed(&request.user_key, &rotation_key),
        );

        let selected = if request.include_breakdown {
            self.compose_breakdown(&candidates, &request.focus_areas, request.count)
        } else {
            candidates.into_iter().take(request.count).collect()
        };

        let questions = selected
            .into_iter()
            .map(|candidate| SelectedQuestion {
                id: candidate.record.id.clone(),
                prompt: interpolate(&candidate.record.prompt, &request.job_title, &request.industry),
                hint: candidate.record.hint.clone(),
                category: candidate.record.category,
                difficulty: candidate.record.difficulty,
                competencies: candidate.record.competencies.clone(),
            })
            .collect();

        SelectionResult {
            interviewer: DEFAULT_INTERVIEWER,
            questions,
            metadata: SelectionMetadata {
                role_family: profile.role_family,
                seniority_level: profile.seniority_level,
                total_candidates,
                fresh_candidates,
                rotation_key,
            },
        }
    }

    fn relevance(
        &self,
        record: &QuestionRecord,
        role: AudienceMatch,
        seniority: AudienceMatch,
        focus_areas: &[String],
    ) -> u32 {
        let mut score = match role {
            AudienceMatch::Exact => self.config.exact_role,
            AudienceMatch::Wildcard => self.config.wildcard_role,
        };
        score += match seniority {
            AudienceMatch::Exact => self.config.exact_seniority,
            AudienceMatch::Wildcard => self.config.wildcard_seniority,
        };
        if in_focus(record, focus_areas) {
            score += self.config.focus_area;
        }
        score
    }

    fn compose_breakdown<'a>(
        &self,
        shuffled: &[Candidate<'a>],
        focus_areas: &[String],
        count: usize,
    ) -> Vec<Candidate<'a>> {
        let mut quota = Quota::new(shuffled);
        quota.claim(self.config.behavioral_quota, |record| {
            record.category == Category::Behavioral
        });
        quota.claim(self.config.role_specific_quota, |record| {
            record.category == Category::RoleSpecific
        });
        if !focus_areas.is_empty() {
            quota.claim(self.config.focus_quota, |record| in_focus(record, focus_areas));
        }
        quota.claim(usize::MAX, |_| true);
        quota.finish(count)
    }
}

/// Claims shuffled candidates category by category without picking any twice.
struct Quota<'s, 'a> {
    shuffled: &'s [Candidate<'a>],
    claimed: Vec<bool>,
    order: Vec<usize>,
}

impl<'s, 'a> Quota<'s, 'a> {
    fn new(shuffled: &'s [Candidate<'a>]) -> Self {
        Self {
            shuffled,
            claimed: vec![false; shuffled.len()],
            order: Vec::with_capacity(shuffled.len()),
        }
    }

    fn claim(&mut self, limit: usize, wanted: impl Fn(&QuestionRecord) -> bool) {
        let mut taken = 0;
        for (index, candidate) in self.shuffled.iter().enumerate() {
            if taken >= limit {
                break;
            }
            if !self.claimed[index] && wanted(candidate.record) {
                self.claimed[index] = true;
                self.order.push(index);
                taken += 1;
            }
        }
    }

    fn finish(self, count: usize) -> Vec<Candidate<'a>> {
        self.order
            .into_iter()
            .take(count)
            .map(|index| self.shuffled[index])
            .collect()
    }
}

fn in_focus(record: &QuestionRecord, focus_areas: &[String]) -> bool {
    focus_areas
        .iter()
        .any(|focus| record.category.matches_focus(focus))
}

fn interpolate(prompt: &str, job_title: &str, industry: &str) -> String {
    let job_title = Some(job_title.trim())
        .filter(|title| !title.is_empty())
        .unwrap_or(DEFAULT_JOB_TITLE);
    let industry = Some(industry.trim())
        .filter(|industry| !industry.is_empty())
        .unwrap_or(DEFAULT_INDUSTRY);
    prompt
        .replace("{job_title}", job_title)
        .replace("{industry}", industry)
}
