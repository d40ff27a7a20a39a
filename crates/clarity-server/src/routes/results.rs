use axum::Json;
use serde::Serialize;

use crate::session::RequestSession;

#[derive(Debug, Serialize)]
pub struct SessionResults {
    /// Fraction of evaluated answers that were correct
    score: f64,
    correct_answers: usize,
    total_questions: usize,
    feedback: &'static str,
}

/// Running tally for the caller's session
pub async fn results(session: RequestSession) -> Json<SessionResults> {
    let (correct, total) = session.tally();

    #[allow(clippy::cast_precision_loss)]
    let score = if total == 0 { 0.0 } else { correct as f64 / total as f64 };

    Json(SessionResults {
        score,
        correct_answers: correct,
        total_questions: total,
        feedback: feedback(total, score),
    })
}

fn feedback(total: usize, score: f64) -> &'static str {
    match (total, score) {
        (0, _) => "No answers evaluated yet",
        (_, s) if s >= 0.75 => "Great job!",
        (_, s) if s >= 0.5 => "Good effort, review the prompts you missed",
        _ => "Keep practicing",
    }
}
