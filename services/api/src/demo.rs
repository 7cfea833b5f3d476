use crate::infra::parse_date;
use chrono::{NaiveDate, Utc};
use clap::Args;
use jobspeak::coaching::selector::{SelectionRequest, SelectionResult, SessionMode};
use jobspeak::coaching::summary::{Attempt, SessionSummary, SessionType};
use jobspeak::config::AppConfig;
use jobspeak::error::AppError;
use jobspeak::telemetry;
use jobspeak::{AnswerFeedback, Coach};
use serde::Serialize;

const SCRIPTED_ANSWERS: [&str; 5] = [
    "I have spent six years in product roles, most recently owning a payments roadmap. \
     I like turning messy customer feedback into a clear plan. Last year my team shipped \
     a checkout redesign that lifted conversion by 12%.",
    "Our engineering lead wanted to delay the launch while sales wanted it early. \
     I set up a session to compare the risks and we agreed to a phased rollout. \
     The first phase went out on time and we avoided a support spike.",
    "I did a lot of stuff on the project and it was good.",
    "I missed a dependency on the data team, which pushed our release by a week. \
     I told my manager right away, rebuilt the plan, and added a dependency review to kickoff. \
     We have not slipped for that reason since.",
    "Honestly my last manager was an idiot and I wanted to punch him. \
     In the end we still delivered 3 releases that quarter.",
];

#[derive(Args, Debug)]
pub(crate) struct QuestionsArgs {
    /// Stable user identifier used for rotation
    #[arg(long, default_value = "demo-user")]
    pub(crate) user_key: String,
    /// Job title used for role classification
    #[arg(long, default_value = "")]
    pub(crate) job_title: String,
    /// Seniority text (entry, mid-level, senior, executive, ...)
    #[arg(long, default_value = "mid-level")]
    pub(crate) seniority: String,
    /// Industry interpolated into prompts
    #[arg(long, default_value = "")]
    pub(crate) industry: String,
    /// Rotate per session instead of per UTC day
    #[arg(long)]
    pub(crate) session_id: Option<String>,
    /// Session preset: practice, mock-short or mock-long
    #[arg(long, value_parser = parse_mode, default_value = "practice")]
    pub(crate) mode: SessionMode,
    /// Override the preset's question count
    #[arg(long)]
    pub(crate) count: Option<usize>,
    /// Question categories to favour (repeatable)
    #[arg(long)]
    pub(crate) focus: Vec<String>,
    /// Recently asked question ids, most recent first (repeatable)
    #[arg(long)]
    pub(crate) asked: Vec<String>,
    /// Rotation date (YYYY-MM-DD); defaults to today in UTC
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Print JSON instead of a readable listing
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// Interview question text
    #[arg(long)]
    pub(crate) question: String,
    /// Candidate answer text
    #[arg(long, default_value = "")]
    pub(crate) answer: String,
    /// Print JSON instead of a readable report
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Job title for the scripted candidate
    #[arg(long, default_value = "Product Manager")]
    pub(crate) job_title: String,
    /// Seniority for the scripted candidate
    #[arg(long, default_value = "senior")]
    pub(crate) seniority: String,
    /// Session id that scopes question rotation
    #[arg(long, default_value = "demo-session")]
    pub(crate) session_id: String,
    /// Print the final summary as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

fn parse_mode(raw: &str) -> Result<SessionMode, String> {
    match raw.trim().to_ascii_lowercase().replace('-', "_").as_str() {
        "practice" => Ok(SessionMode::Practice),
        "mock_short" | "short" => Ok(SessionMode::MockShort),
        "mock_long" | "long" => Ok(SessionMode::MockLong),
        other => Err(format!(
            "unknown mode '{other}' (expected practice, mock-short or mock-long)"
        )),
    }
}

fn coach() -> Result<Coach, AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    Ok(Coach::from_config(&config.coaching)?)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    let rendered = serde_json::to_string_pretty(value).map_err(std::io::Error::other)?;
    println!("{rendered}");
    Ok(())
}

pub(crate) fn run_questions(args: QuestionsArgs) -> Result<(), AppError> {
    let QuestionsArgs {
        user_key,
        job_title,
        seniority,
        industry,
        session_id,
        mode,
        count,
        focus,
        asked,
        today,
        json,
    } = args;

    let mut request = SelectionRequest::new(user_key, mode);
    if let Some(count) = count {
        request.count = count;
    }
    request.job_title = job_title;
    request.seniority = seniority;
    request.industry = industry;
    request.session_id = session_id;
    request.focus_areas = focus;
    request.asked_question_ids = asked;

    let coach = coach()?;
    request.retain_recent(coach.selector().config().recent_window);
    let today = today.unwrap_or_else(|| Utc::now().date_naive());
    let result = coach.select_questions_at(&request, today);
    if json {
        return print_json(&result);
    }
    render_selection(&result);
    Ok(())
}

pub(crate) fn run_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let feedback = coach()?.evaluate_and_enrich(&args.question, &args.answer);
    if args.json {
        return print_json(&feedback);
    }
    render_feedback(&feedback);
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let coach = coach()?;
    let mut request = SelectionRequest::new("demo-user", SessionMode::MockShort);
    request.job_title = args.job_title;
    request.seniority = args.seniority;
    request.session_id = Some(args.session_id);

    println!("Mock interview demo");
    let selection = coach.select_questions(&request);
    render_selection(&selection);

    let attempts = scripted_attempts(&coach, &selection);
    for (attempt, question) in attempts.iter().zip(&selection.questions) {
        println!(
            "\n{} scored {}/100",
            question.id,
            attempt.score.unwrap_or(0)
        );
        if let Some(first) = attempt.bullets.first() {
            println!("  - {first}");
        }
    }

    let summary = coach.summarize(&attempts, SessionType::Mock);
    if args.json {
        return print_json(&summary);
    }
    render_summary(&summary);
    Ok(())
}

/// Answers each selected question with the next scripted answer.
fn scripted_attempts(coach: &Coach, selection: &SelectionResult) -> Vec<Attempt> {
    selection
        .questions
        .iter()
        .zip(SCRIPTED_ANSWERS.iter().cycle())
        .map(|(question, answer)| {
            let feedback = coach.evaluate_and_enrich(&question.prompt, answer);
            Attempt::from_feedback(&question.id, &question.prompt, *answer, &feedback)
        })
        .collect()
}

fn render_selection(result: &SelectionResult) {
    println!(
        "Interviewer: {} ({})",
        result.interviewer.name, result.interviewer.title
    );
    println!(
        "Role family {} | seniority {} | {} candidates ({} fresh) | rotation key {}",
        result.metadata.role_family,
        result.metadata.seniority_level,
        result.metadata.total_candidates,
        result.metadata.fresh_candidates,
        result.metadata.rotation_key
    );
    for (index, question) in result.questions.iter().enumerate() {
        println!(
            "{}. [{} / {:?}] {}",
            index + 1,
            question.category.tag(),
            question.difficulty,
            question.prompt
        );
        if !question.hint.is_empty() {
            println!("   hint: {}", question.hint);
        }
    }
}

fn render_feedback(feedback: &AnswerFeedback) {
    let scores = &feedback.evaluation.feedback;
    println!("Score {}/100", feedback.evaluation.score);
    println!(
        "  clarity {} | structure {} | metrics {} | relevance {}",
        scores.clarity, scores.structure, scores.metrics, scores.relevance
    );
    for bullet in &feedback.evaluation.bullets {
        println!("  - {bullet}");
    }
    if let Some(quote) = &feedback.problematic_quote {
        println!("Flagged: \"{quote}\"");
    }
    println!("\nHiring manager heard: {}", feedback.hiring_manager_heard);
    println!(
        "Hire likelihood {}% -> {}% after rewrite",
        feedback.hire_likelihood.hire_likelihood,
        feedback.hire_likelihood.hire_likelihood_after_rewrite
    );
    println!("\nClearer rewrite:\n  {}", feedback.clearer_rewrite);
    println!("\nSTAR rewrite:\n  {}", feedback.star_rewrite.text);
    println!("\nVocabulary:");
    for item in &feedback.star_rewrite.vocab {
        println!("  - {} {} ({}): {}", item.word, item.ipa, item.pos, item.definition);
    }
    for suggestion in &feedback.vocabulary_suggestions {
        println!("  * {suggestion}");
    }
}

fn render_summary(summary: &SessionSummary) {
    println!(
        "\nOverall {}/100 | {:?} | {}",
        summary.overall_score, summary.recommendation, summary.recommendation_message
    );
    println!("Strongest area: {}", summary.strongest_area);
    println!("Biggest risk: {} {}", summary.biggest_risk, summary.biggest_risk_detail);
    for entry in &summary.per_question {
        println!("\n{} ({}): {}", entry.question_id, entry.score, entry.question_text);
        println!("  stronger: {}", entry.stronger_example.text);
        println!("  words: {}", entry.stronger_example.underlined_words.join(", "));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn modes_parse_with_either_separator() {
        assert_eq!(parse_mode("mock-long"), Ok(SessionMode::MockLong));
        assert_eq!(parse_mode("MOCK_SHORT"), Ok(SessionMode::MockShort));
        assert!(parse_mode("marathon").is_err());
    }

    #[test]
    fn scripted_session_summarises_without_repeating_words() {
        let coach = Coach::default();
        let mut request = SelectionRequest::new("demo-user", SessionMode::MockShort);
        request.job_title = "Product Manager".to_string();
        request.seniority = "senior".to_string();
        request.session_id = Some("demo-session".to_string());

        let selection = coach.select_questions(&request);
        let attempts = scripted_attempts(&coach, &selection);
        assert_eq!(attempts.len(), selection.questions.len());

        let summary = coach.summarize(&attempts, SessionType::Mock);
        assert!(summary.completed);
        let mut seen = HashSet::new();
        for entry in &summary.per_question {
            assert_eq!(entry.stronger_example.vocab.len(), 2);
            for item in &entry.stronger_example.vocab {
                assert!(seen.insert(item.word.to_lowercase()));
            }
            assert!(!entry.stronger_example.text.to_lowercase().contains("idiot"));
        }
    }
}
