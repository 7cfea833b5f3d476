use super::selector::{SelectionRequest, SelectionResult, SessionMode};
use super::summary::{self, Attempt, SessionSummary, SessionType};
use super::{AnswerFeedback, Coach};
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SelectQuestionsBody {
    #[serde(flatten)]
    request: SelectionRequest,
    /// Overrides `count` and `includeBreakdown` with a session preset.
    #[serde(default)]
    mode: Option<SessionMode>,
    /// Rotation date used when no session id is given; defaults to today (UTC).
    #[serde(default)]
    today: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct EvaluateAnswerBody {
    #[serde(alias = "question_text")]
    question_text: String,
    #[serde(default, alias = "answer_text")]
    answer_text: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SessionSummaryBody {
    #[serde(default)]
    attempts: Vec<Attempt>,
    #[serde(default, alias = "session_type")]
    session_type: SessionType,
    /// Mock sessions keep the latest answer per question, capped at this many.
    #[serde(default, alias = "total_questions")]
    total_questions: Option<usize>,
}

/// JSON endpoints for the three coaching entry points.
pub fn coaching_router(coach: Arc<Coach>) -> Router {
    Router::new()
        .route("/api/v1/questions/select", post(select_questions_handler))
        .route("/api/v1/answers/evaluate", post(evaluate_answer_handler))
        .route("/api/v1/sessions/summary", post(session_summary_handler))
        .with_state(coach)
}

async fn select_questions_handler(
    State(coach): State<Arc<Coach>>,
    Json(body): Json<SelectQuestionsBody>,
) -> Json<SelectionResult> {
    let SelectQuestionsBody {
        mut request,
        mode,
        today,
    } = body;
    if let Some(mode) = mode {
        mode.apply(&mut request);
    }
    request.retain_recent(coach.selector().config().recent_window);

    let result = match today {
        Some(today) => coach.select_questions_at(&request, today),
        None => coach.select_questions(&request),
    };
    Json(result)
}

async fn evaluate_answer_handler(
    State(coach): State<Arc<Coach>>,
    Json(body): Json<EvaluateAnswerBody>,
) -> Json<AnswerFeedback> {
    Json(coach.evaluate_and_enrich(&body.question_text, &body.answer_text))
}

async fn session_summary_handler(
    State(coach): State<Arc<Coach>>,
    Json(body): Json<SessionSummaryBody>,
) -> Json<SessionSummary> {
    let attempts = match body.session_type {
        SessionType::Mock => {
            let limit = body
                .total_questions
                .unwrap_or_else(|| SessionMode::MockLong.question_count());
            summary::latest_attempts(&body.attempts, limit)
        }
        SessionType::Practice => body.attempts,
    };
    Json(coach.summarize(&attempts, body.session_type))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use axum::response::Response;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn router() -> Router {
        coaching_router(Arc::new(Coach::default()))
    }

    fn post_json(uri: &str, payload: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string()))
            .expect("request builds")
    }

    async fn read_json_body(response: Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        serde_json::from_slice(&body).expect("json payload")
    }

    #[tokio::test]
    async fn select_applies_mode_and_is_repeatable() {
        let payload = json!({
            "userKey": "user-42",
            "jobTitle": "Software Engineer",
            "seniority": "senior",
            "mode": "mock_short",
            "today": "2025-06-01"
        });

        let first = router()
            .oneshot(post_json("/api/v1/questions/select", payload.clone()))
            .await
            .expect("route executes");
        assert_eq!(first.status(), StatusCode::OK);
        let first = read_json_body(first).await;
        assert_eq!(first["questions"].as_array().map(Vec::len), Some(5));
        assert_eq!(first["metadata"]["roleFamily"], "software_data_it");
        assert_eq!(first["metadata"]["rotationKey"], "2025-06-01");
        assert_eq!(first["interviewer"]["name"], "Sarah Jenkins");

        let second = router()
            .oneshot(post_json("/api/v1/questions/select", payload))
            .await
            .expect("route executes");
        assert_eq!(read_json_body(second).await["questions"], first["questions"]);
    }

    #[tokio::test]
    async fn recently_asked_questions_are_not_served_again() {
        let mut payload = json!({
            "userKey": "user-42",
            "jobTitle": "Software Engineer",
            "sessionId": "s1",
            "today": "2025-06-01"
        });
        let first = router()
            .oneshot(post_json("/api/v1/questions/select", payload.clone()))
            .await
            .expect("route executes");
        let first = read_json_body(first).await;
        let mut asked: Vec<Value> = first["questions"]
            .as_array()
            .expect("questions array")
            .iter()
            .map(|question| question["id"].clone())
            .collect();
        asked.extend((0..30).map(|n| json!(format!("older-{n}"))));
        payload["askedQuestionIds"] = Value::Array(asked.clone());

        let second = router()
            .oneshot(post_json("/api/v1/questions/select", payload))
            .await
            .expect("route executes");
        let second = read_json_body(second).await;
        for question in second["questions"].as_array().expect("questions array") {
            assert!(!asked.contains(&question["id"]), "repeated {}", question["id"]);
        }
    }

    #[tokio::test]
    async fn evaluate_returns_flattened_feedback() {
        let response = router()
            .oneshot(post_json(
                "/api/v1/answers/evaluate",
                json!({ "questionText": "Tell me about yourself.", "answerText": "" }),
            ))
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::OK);
        let payload = read_json_body(response).await;
        assert_eq!(payload["score"], 0);
        assert_eq!(payload["starRewrite"]["vocab"].as_array().map(Vec::len), Some(2));
        assert_eq!(payload["contentAnalysis"]["hasInappropriateContent"], false);
    }

    #[tokio::test]
    async fn summary_of_nothing_is_incomplete() {
        let response = router()
            .oneshot(post_json("/api/v1/sessions/summary", json!({ "attempts": [] })))
            .await
            .expect("route executes");
        let payload = read_json_body(response).await;
        assert_eq!(payload["overall_score"], 0);
        assert_eq!(payload["completed"], false);
        assert_eq!(payload["recommendation"], "not_recommended_yet");
    }

    #[tokio::test]
    async fn mock_summary_keeps_latest_answer_per_question() {
        let payload = json!({
            "sessionType": "mock",
            "totalQuestions": 5,
            "attempts": [
                { "question_id": "q1", "question_text": "Why us?", "answer_text": "First try.", "score": 40 },
                { "question_id": "q1", "question_text": "Why us?", "answer_text": "Second try.", "score": 80 }
            ]
        });
        let response = router()
            .oneshot(post_json("/api/v1/sessions/summary", payload))
            .await
            .expect("route executes");
        let payload = read_json_body(response).await;
        assert_eq!(payload["overall_score"], 80);
        assert_eq!(payload["perQuestion"].as_array().map(Vec::len), Some(1));
        assert_eq!(payload["perQuestion"][0]["yourAnswer"], "Second try.");
    }

    #[tokio::test]
    async fn malformed_json_is_rejected() {
        let request = Request::post("/api/v1/answers/evaluate")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .expect("request builds");
        let response = router().oneshot(request).await.expect("route executes");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
