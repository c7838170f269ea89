// src/handlers/status.rs

use axum::{Json, extract::State, response::IntoResponse};
use sqlx::PgPool;
use validator::Validate;

use crate::{
    error::AppError,
    models::exam_status::{ExamStatus, UpdateStatusRequest},
};

const STATUS_COLUMNS: &str = "id, student_id, exam_session_id, token, status, created_at";

/// Sets a student's completion status for a session.
///
/// Finds the first record for the (student, session) pair and updates it
/// in place, or inserts a new one. Repeated calls with the same inputs
/// converge to the same stored state.
pub async fn update_status(
    State(pool): State<PgPool>,
    Json(payload): Json<UpdateStatusRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    // Both references must resolve before anything is written.
    let student: Option<i64> = sqlx::query_scalar("SELECT id FROM students WHERE id = $1")
        .bind(payload.student_id)
        .fetch_optional(&pool)
        .await?;
    if student.is_none() {
        return Err(AppError::BadRequest(
            "The selected student_id is invalid".to_string(),
        ));
    }

    let session: Option<i64> = sqlx::query_scalar("SELECT id FROM exam_sessions WHERE id = $1")
        .bind(payload.exam_session_id)
        .fetch_optional(&pool)
        .await?;
    if session.is_none() {
        return Err(AppError::BadRequest(
            "The selected exam_session_id is invalid".to_string(),
        ));
    }

    let existing: Option<i64> = sqlx::query_scalar(
        r#"
        SELECT id FROM exam_statuses
        WHERE student_id = $1 AND exam_session_id = $2
        ORDER BY id
        LIMIT 1
        "#,
    )
    .bind(payload.student_id)
    .bind(payload.exam_session_id)
    .fetch_optional(&pool)
    .await?;

    let exam_status = match existing {
        Some(id) => sqlx::query_as::<_, ExamStatus>(&format!(
            "UPDATE exam_statuses SET status = $1 WHERE id = $2 RETURNING {}",
            STATUS_COLUMNS
        ))
        .bind(&payload.status)
        .bind(id)
        .fetch_one(&pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update exam status {}: {:?}", id, e);
            AppError::InternalServerError(e.to_string())
        })?,
        None => sqlx::query_as::<_, ExamStatus>(&format!(
            r#"
            INSERT INTO exam_statuses (student_id, exam_session_id, status)
            VALUES ($1, $2, $3)
            RETURNING {}
            "#,
            STATUS_COLUMNS
        ))
        .bind(payload.student_id)
        .bind(payload.exam_session_id)
        .bind(&payload.status)
        .fetch_one(&pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create exam status: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?,
    };

    Ok(Json(serde_json::json!({
        "message": "Status updated successfully.",
        "status": exam_status,
    })))
}
