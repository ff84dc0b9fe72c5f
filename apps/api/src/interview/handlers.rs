use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::cv;
use crate::errors::AppError;
use crate::interview::evaluation::{evaluate_answer, evaluate_interview, AnswerEvaluation};
use crate::interview::generator::{generate_cv_questions, generate_questions};
use crate::interview::validate_setup;
use crate::models::interview::{EvaluationRow, InterviewRow, QuestionRow, STATUS_COMPLETED};
use crate::state::AppState;
use crate::store::interviews::{update_interview_status, InterviewStore};
use crate::store::users::UserStore;
use crate::store::{evaluations, questions};

#[derive(Debug, Serialize)]
pub struct InterviewDetail {
    pub interview: InterviewRow,
    pub questions: Vec<QuestionRow>,
}

/// Multipart fields of the interview setup form. The optional `cv` part is
/// handled separately since it carries bytes, not text.
#[derive(Debug, Default)]
struct SetupForm {
    user_id: Option<i64>,
    question_count: Option<i32>,
    difficulty: Option<String>,
    topic: Option<String>,
    cv_filename: Option<String>,
    cv_bytes: Option<bytes::Bytes>,
}

fn bad_field(name: &str) -> AppError {
    AppError::Validation(format!("Invalid value for field '{name}'"))
}

async fn read_setup_form(mut multipart: Multipart) -> Result<SetupForm, AppError> {
    let mut form = SetupForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "user_id" => {
                let text = field.text().await.map_err(|_| bad_field("user_id"))?;
                form.user_id = Some(text.trim().parse().map_err(|_| bad_field("user_id"))?);
            }
            "question_count" => {
                let text = field
                    .text()
                    .await
                    .map_err(|_| bad_field("question_count"))?;
                form.question_count =
                    Some(text.trim().parse().map_err(|_| bad_field("question_count"))?);
            }
            "difficulty" => {
                form.difficulty = Some(
                    field
                        .text()
                        .await
                        .map_err(|_| bad_field("difficulty"))?
                        .trim()
                        .to_string(),
                );
            }
            "topic" => {
                let text = field.text().await.map_err(|_| bad_field("topic"))?;
                let text = text.trim().to_string();
                if !text.is_empty() {
                    form.topic = Some(text);
                }
            }
            "cv" => {
                form.cv_filename = field.file_name().map(str::to_string);
                form.cv_bytes = Some(field.bytes().await.map_err(|_| bad_field("cv"))?);
            }
            // Unknown fields are ignored, matching a lenient form boundary
            _ => {}
        }
    }

    Ok(form)
}

/// POST /api/v1/interviews
///
/// Creates an interview: validates the setup, optionally extracts and
/// analyzes an uploaded CV, generates the questions, and stores everything.
pub async fn handle_create_interview(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<InterviewDetail>), AppError> {
    let form = read_setup_form(multipart).await?;

    let user_id = form
        .user_id
        .ok_or_else(|| AppError::Validation("Missing field 'user_id'".to_string()))?;
    let question_count = form
        .question_count
        .ok_or_else(|| AppError::Validation("Missing field 'question_count'".to_string()))?;
    let difficulty = form
        .difficulty
        .ok_or_else(|| AppError::Validation("Missing field 'difficulty'".to_string()))?;

    validate_setup(question_count, &difficulty)?;
    state
        .db
        .get_user_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {user_id} not found")))?;

    // CV path: validate, persist to the upload dir, extract, analyze.
    let mut cv_filename = None;
    let mut cv_analysis = None;
    if let Some(data) = form.cv_bytes {
        let original_name = form.cv_filename.as_deref().unwrap_or("cv.pdf");
        cv::validate_upload(original_name, data.len(), state.config.max_upload_bytes)?;

        let (stored_name, path) =
            cv::save_upload(&state.config.upload_dir, original_name, data).await?;
        let cv_text = cv::extract_text_from_pdf(&path).await?;
        let analysis = cv::analyze_cv(state.llm.as_ref(), &cv_text).await?;

        info!("Analyzed CV {stored_name} for user {user_id}");
        cv_filename = Some(stored_name);
        cv_analysis = Some(analysis);
    }

    let generated = match &cv_analysis {
        Some(analysis) => {
            generate_cv_questions(
                state.llm.as_ref(),
                analysis,
                question_count as usize,
                &difficulty,
            )
            .await?
        }
        None => {
            generate_questions(
                state.llm.as_ref(),
                question_count as usize,
                &difficulty,
                form.topic.as_deref(),
            )
            .await?
        }
    };

    if generated.is_empty() {
        return Err(AppError::Llm(
            "The model returned no parseable questions".to_string(),
        ));
    }

    let interview_id = state
        .db
        .create_interview(
            user_id,
            cv_filename.as_deref(),
            cv_analysis.as_deref(),
            question_count,
            &difficulty,
        )
        .await?;

    for (i, question_text) in generated.iter().enumerate() {
        questions::add_question(&state.db, interview_id, question_text, i as i32 + 1).await?;
    }

    let interview = state
        .db
        .get_interview(interview_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Interview {interview_id} not found")))?;
    let question_rows = questions::get_interview_questions(&state.db, interview_id).await?;

    info!(
        "Created interview {interview_id} for user {user_id} with {} questions",
        question_rows.len()
    );
    Ok((
        StatusCode::CREATED,
        Json(InterviewDetail {
            interview,
            questions: question_rows,
        }),
    ))
}

#[derive(Debug, Deserialize)]
pub struct UserIdQuery {
    pub user_id: i64,
}

/// GET /api/v1/interviews?user_id=
pub async fn handle_list_interviews(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<InterviewRow>>, AppError> {
    let rows = state.db.get_user_interviews(params.user_id).await?;
    Ok(Json(rows))
}

/// GET /api/v1/interviews/:id
pub async fn handle_get_interview(
    State(state): State<AppState>,
    Path(interview_id): Path<i64>,
) -> Result<Json<InterviewDetail>, AppError> {
    let interview = state
        .db
        .get_interview(interview_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Interview {interview_id} not found")))?;
    let question_rows = questions::get_interview_questions(&state.db, interview_id).await?;

    Ok(Json(InterviewDetail {
        interview,
        questions: question_rows,
    }))
}

#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    pub answer_text: String,
}

#[derive(Debug, Serialize)]
pub struct AnswerResponse {
    pub question_id: i64,
    pub evaluation: AnswerEvaluation,
}

/// POST /api/v1/questions/:id/answer
///
/// Stores the answer, then returns the per-answer evaluation. A failed
/// evaluation still stores the answer and surfaces the error as feedback.
pub async fn handle_answer_question(
    State(state): State<AppState>,
    Path(question_id): Path<i64>,
    Json(req): Json<AnswerRequest>,
) -> Result<Json<AnswerResponse>, AppError> {
    let answer = req.answer_text.trim();
    if answer.is_empty() {
        return Err(AppError::Validation("Answer must not be empty".to_string()));
    }

    let question = questions::get_question(&state.db, question_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Question {question_id} not found")))?;

    questions::update_question_answer(&state.db, question_id, answer).await?;
    let evaluation = evaluate_answer(state.llm.as_ref(), &question.question_text, answer).await;

    Ok(Json(AnswerResponse {
        question_id,
        evaluation,
    }))
}

#[derive(Debug, Serialize)]
pub struct CompleteResponse {
    pub interview_id: i64,
    pub evaluation_id: Option<i64>,
    pub overall_score: f64,
    pub evaluation_text: String,
    pub success: bool,
}

/// Rejects a second completion: it would re-run the evaluation, insert a
/// duplicate evaluations row, and re-stamp `completed_at`.
fn ensure_not_completed(interview: &InterviewRow) -> Result<(), AppError> {
    if interview.status == STATUS_COMPLETED {
        return Err(AppError::Conflict(format!(
            "Interview {} is already completed",
            interview.id
        )));
    }
    Ok(())
}

/// POST /api/v1/interviews/:id/complete
///
/// Evaluates the answered transcript. On success the evaluation is stored
/// and the interview is marked completed with its score; a remote failure
/// is reported as text without changing the interview status.
pub async fn handle_complete_interview(
    State(state): State<AppState>,
    Path(interview_id): Path<i64>,
) -> Result<Json<CompleteResponse>, AppError> {
    let interview = state
        .db
        .get_interview(interview_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Interview {interview_id} not found")))?;
    ensure_not_completed(&interview)?;

    let question_rows = questions::get_interview_questions(&state.db, interview_id).await?;
    let transcript: Vec<(String, String)> = question_rows
        .into_iter()
        .filter_map(|q| q.answer_text.map(|a| (q.question_text, a)))
        .collect();

    if transcript.is_empty() {
        return Err(AppError::Validation(
            "No answered questions to evaluate".to_string(),
        ));
    }

    let result = evaluate_interview(state.llm.as_ref(), &transcript).await;

    let evaluation_id = if result.success {
        let id = evaluations::create_evaluation(
            &state.db,
            interview_id,
            &result.evaluation_text,
            result.overall_score,
            &result.evaluation_text,
        )
        .await?;
        update_interview_status(
            &state.db,
            interview_id,
            STATUS_COMPLETED,
            Some(result.overall_score),
        )
        .await?;
        info!(
            "Interview {interview_id} completed with score {:.1}",
            result.overall_score
        );
        Some(id)
    } else {
        None
    };

    Ok(Json(CompleteResponse {
        interview_id,
        evaluation_id,
        overall_score: result.overall_score,
        evaluation_text: result.evaluation_text,
        success: result.success,
    }))
}

/// GET /api/v1/interviews/:id/evaluation
pub async fn handle_get_evaluation(
    State(state): State<AppState>,
    Path(interview_id): Path<i64>,
) -> Result<Json<EvaluationRow>, AppError> {
    let row = evaluations::get_interview_evaluation(&state.db, interview_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("No evaluation for interview {interview_id}"))
        })?;
    Ok(Json(row))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::interview::STATUS_IN_PROGRESS;
    use chrono::Utc;

    fn interview_with_status(status: &str) -> InterviewRow {
        InterviewRow {
            id: 1,
            user_id: 1,
            cv_filename: None,
            cv_analysis: None,
            question_count: 5,
            difficulty_level: "medium".to_string(),
            status: status.to_string(),
            score: None,
            created_at: Utc::now(),
            completed_at: None,
        }
    }

    #[test]
    fn test_completing_twice_is_a_conflict() {
        let completed = interview_with_status(STATUS_COMPLETED);
        assert!(matches!(
            ensure_not_completed(&completed),
            Err(AppError::Conflict(_))
        ));
    }

    #[test]
    fn test_in_progress_interview_can_complete() {
        let in_progress = interview_with_status(STATUS_IN_PROGRESS);
        assert!(ensure_not_completed(&in_progress).is_ok());
    }
}
