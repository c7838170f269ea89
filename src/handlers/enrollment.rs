// src/handlers/enrollment.rs

use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Redirect},
};
use sqlx::PgPool;
use validator::Validate;

use crate::{
    error::AppError,
    handlers::exam_session::find_session,
    models::{
        exam::Exam,
        exam_group::StoreEnrollmentRequest,
        student::{Student, StudentWithClassroom},
    },
};

/// Form data for enrolling students: the session, its exam, and the exam's
/// classroom students that are not yet enrolled for this (exam, session)
/// pair.
pub async fn create_form(
    State(pool): State<PgPool>,
    Path(session_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let exam_session = find_session(&pool, session_id).await?;

    let exam = sqlx::query_as::<_, Exam>(
        "SELECT id, title, classroom_id, lesson_id, created_at FROM exams WHERE id = $1",
    )
    .bind(exam_session.exam_id)
    .fetch_optional(&pool)
    .await?
    .ok_or(AppError::NotFound("Exam not found".to_string()))?;

    let enrolled: Vec<i64> = sqlx::query_scalar(
        "SELECT student_id FROM exam_groups WHERE exam_id = $1 AND exam_session_id = $2",
    )
    .bind(exam.id)
    .bind(exam_session.id)
    .fetch_all(&pool)
    .await?;

    let students = sqlx::query_as::<_, StudentWithClassroom>(
        r#"
        SELECT st.id, st.name, st.classroom_id, c.title AS classroom_title
        FROM students st
        JOIN classrooms c ON c.id = st.classroom_id
        WHERE st.classroom_id = $1
          AND st.id <> ALL($2)
        ORDER BY st.name
        "#,
    )
    .bind(exam.classroom_id)
    .bind(&enrolled)
    .fetch_all(&pool)
    .await?;

    Ok(Json(serde_json::json!({
        "exam": exam,
        "exam_session": exam_session,
        "students": students,
    })))
}

/// Enrolls a batch of students into a session.
///
/// Each student gets an exam_group row and a companion exam_status row
/// carrying a snapshot of the session's current token. The batch runs in
/// one transaction: an unknown student id aborts it and nothing commits.
pub async fn store(
    State(pool): State<PgPool>,
    Path(session_id): Path<i64>,
    Json(payload): Json<StoreEnrollmentRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let exam_session = find_session(&pool, session_id).await?;

    let mut tx = pool.begin().await?;

    for student_id in &payload.student_id {
        let student = sqlx::query_as::<_, Student>(
            "SELECT id, name, classroom_id, created_at FROM students WHERE id = $1",
        )
        .bind(student_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Student {} not found", student_id)))?;

        sqlx::query(
            r#"
            INSERT INTO exam_groups (exam_id, exam_session_id, student_id)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(exam_session.exam_id)
        .bind(exam_session.id)
        .bind(student.id)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to enroll student {}: {:?}", student.id, e);
            AppError::InternalServerError(e.to_string())
        })?;

        // Token snapshot, not a live link: regenerating the session token
        // later leaves this row unchanged.
        sqlx::query(
            r#"
            INSERT INTO exam_statuses (student_id, exam_session_id, token)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(student.id)
        .bind(exam_session.id)
        .bind(&exam_session.token)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create exam status for student {}: {:?}", student.id, e);
            AppError::InternalServerError(e.to_string())
        })?;
    }

    tx.commit().await.map_err(|e| {
        tracing::error!("Failed to commit enrollment batch: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok(Redirect::to(&format!(
        "/api/exam-sessions/{}",
        exam_session.id
    )))
}

/// Removes one enrollment from a session, then the first matching status
/// row for that (student, session) pair. A missing status row is not an
/// error.
pub async fn destroy(
    State(pool): State<PgPool>,
    Path((session_id, group_id)): Path<(i64, i64)>,
) -> Result<impl IntoResponse, AppError> {
    let student_id: i64 = sqlx::query_scalar(
        "DELETE FROM exam_groups WHERE id = $1 AND exam_session_id = $2 RETURNING student_id",
    )
    .bind(group_id)
    .bind(session_id)
    .fetch_optional(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to delete exam group {}: {:?}", group_id, e);
        AppError::InternalServerError(e.to_string())
    })?
    .ok_or(AppError::NotFound("Exam group not found".to_string()))?;

    let status_id: Option<i64> = sqlx::query_scalar(
        r#"
        SELECT id FROM exam_statuses
        WHERE student_id = $1 AND exam_session_id = $2
        ORDER BY id
        LIMIT 1
        "#,
    )
    .bind(student_id)
    .bind(session_id)
    .fetch_optional(&pool)
    .await?;

    if let Some(status_id) = status_id {
        sqlx::query("DELETE FROM exam_statuses WHERE id = $1")
            .bind(status_id)
            .execute(&pool)
            .await?;
    }

    Ok(Redirect::to(&format!("/api/exam-sessions/{}", session_id)))
}
