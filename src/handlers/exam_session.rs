// src/handlers/exam_session.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect},
};
use sqlx::PgPool;
use validator::Validate;

use crate::{
    config::{PAGE_SIZE, TOKEN_LENGTH},
    error::AppError,
    models::{
        exam::Exam,
        exam_group::EnrolledGroup,
        exam_session::{
            CreateExamSessionRequest, ExamSession, ExamSessionListItem, ListParams, PageParams,
            UpdateExamSessionRequest,
        },
        pagination::Paginated,
    },
    utils::{time, token},
};

/// Session columns joined with exam, classroom and lesson data plus the
/// enrolled-group count. Shared by the listing and the detail view.
const SESSION_WITH_RELATIONS: &str = r#"
    SELECT
        s.id, s.title, s.exam_id, s.start_time, s.end_time, s.token, s.created_at,
        e.title AS exam_title,
        e.classroom_id, c.title AS classroom_title,
        e.lesson_id, l.title AS lesson_title,
        (SELECT COUNT(*) FROM exam_groups g WHERE g.exam_session_id = s.id) AS exam_groups_count
    FROM exam_sessions s
    JOIN exams e ON e.id = s.exam_id
    JOIN classrooms c ON c.id = e.classroom_id
    JOIN lessons l ON l.id = e.lesson_id
"#;

/// Lists sessions, newest first, optionally filtered by a title substring.
/// Paginated at 5 per page; the filter is carried into the page links.
pub async fn list(
    State(pool): State<PgPool>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, AppError> {
    let page = params.page.unwrap_or(1).max(1);
    let search_pattern = params.q.as_ref().map(|q| format!("%{}%", q));

    let total: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM exam_sessions WHERE ($1::TEXT IS NULL OR title LIKE $1)",
    )
    .bind(&search_pattern)
    .fetch_one(&pool)
    .await?;

    let sessions = sqlx::query_as::<_, ExamSessionListItem>(&format!(
        r#"{}
        WHERE ($1::TEXT IS NULL OR s.title LIKE $1)
        ORDER BY s.created_at DESC, s.id DESC
        LIMIT $2 OFFSET $3
        "#,
        SESSION_WITH_RELATIONS
    ))
    .bind(&search_pattern)
    .bind(PAGE_SIZE)
    .bind((page - 1) * PAGE_SIZE)
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to list exam sessions: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    // Keep the filter attached to the pagination links.
    let extra: Vec<(&str, String)> = params.q.iter().map(|q| ("q", q.clone())).collect();

    Ok(Json(Paginated::new(
        sessions,
        total,
        page,
        PAGE_SIZE,
        "/api/exam-sessions",
        &extra,
    )))
}

/// Form data for creating a session: every exam that can be scheduled.
pub async fn create_form(State(pool): State<PgPool>) -> Result<impl IntoResponse, AppError> {
    let exams = all_exams(&pool).await?;

    Ok(Json(serde_json::json!({ "exams": exams })))
}

/// Creates a session. Start/end times are persisted exactly as submitted;
/// only the update path normalizes them.
pub async fn store(
    State(pool): State<PgPool>,
    Json(payload): Json<CreateExamSessionRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    sqlx::query(
        r#"
        INSERT INTO exam_sessions (title, exam_id, start_time, end_time, token)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(&payload.title)
    .bind(payload.exam_id)
    .bind(&payload.start_time)
    .bind(&payload.end_time)
    .bind(&payload.token)
    .execute(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to create exam session: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok(Redirect::to("/api/exam-sessions"))
}

/// Session detail: the session with its relations attached plus a page of
/// enrolled groups with student and classroom data.
pub async fn show(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
    Query(params): Query<PageParams>,
) -> Result<impl IntoResponse, AppError> {
    let exam_session = sqlx::query_as::<_, ExamSessionListItem>(&format!(
        "{} WHERE s.id = $1",
        SESSION_WITH_RELATIONS
    ))
    .bind(id)
    .fetch_optional(&pool)
    .await?
    .ok_or(AppError::NotFound("Exam session not found".to_string()))?;

    let page = params.page.unwrap_or(1).max(1);

    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM exam_groups WHERE exam_session_id = $1")
        .bind(id)
        .fetch_one(&pool)
        .await?;

    let groups = sqlx::query_as::<_, EnrolledGroup>(
        r#"
        SELECT
            g.id, g.exam_id, g.exam_session_id, g.student_id,
            st.name AS student_name,
            c.title AS classroom_title
        FROM exam_groups g
        JOIN students st ON st.id = g.student_id
        JOIN classrooms c ON c.id = st.classroom_id
        WHERE g.exam_session_id = $1
        ORDER BY g.id
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(id)
    .bind(PAGE_SIZE)
    .bind((page - 1) * PAGE_SIZE)
    .fetch_all(&pool)
    .await?;

    let base_path = format!("/api/exam-sessions/{}", id);

    Ok(Json(serde_json::json!({
        "exam_session": exam_session,
        "exam_groups": Paginated::new(groups, total, page, PAGE_SIZE, &base_path, &[]),
    })))
}

/// Form data for editing a session: the bare row plus every exam.
pub async fn edit_form(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let exam_session = find_session(&pool, id).await?;
    let exams = all_exams(&pool).await?;

    Ok(Json(serde_json::json!({
        "exam_session": exam_session,
        "exams": exams,
    })))
}

/// Updates a session. Unlike creation, start/end times are parsed from
/// free-form input and stored normalized.
pub async fn update(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateExamSessionRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let start_time = time::normalize(&payload.start_time).ok_or_else(|| {
        AppError::BadRequest(format!("Unrecognized start_time: {}", payload.start_time))
    })?;
    let end_time = time::normalize(&payload.end_time).ok_or_else(|| {
        AppError::BadRequest(format!("Unrecognized end_time: {}", payload.end_time))
    })?;

    let result = sqlx::query(
        r#"
        UPDATE exam_sessions
        SET title = $1, exam_id = $2, start_time = $3, end_time = $4
        WHERE id = $5
        "#,
    )
    .bind(&payload.title)
    .bind(payload.exam_id)
    .bind(&start_time)
    .bind(&end_time)
    .bind(id)
    .execute(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to update exam session: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Exam session not found".to_string()));
    }

    Ok(Redirect::to("/api/exam-sessions"))
}

/// Deletes a session. Dependent enrollment and status rows are left to the
/// storage layer's cascade rules.
pub async fn destroy(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let result = sqlx::query("DELETE FROM exam_sessions WHERE id = $1")
        .bind(id)
        .execute(&pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to delete exam session: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Exam session not found".to_string()));
    }

    Ok(Redirect::to("/api/exam-sessions"))
}

/// Replaces the session token with a fresh 6-character value.
/// No mutation happens for an unknown session id.
pub async fn generate_token(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let new_token = token::generate(TOKEN_LENGTH);

    let result = sqlx::query("UPDATE exam_sessions SET token = $1 WHERE id = $2")
        .bind(&new_token)
        .bind(id)
        .execute(&pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to regenerate session token: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Exam session not found".to_string()));
    }

    Ok(StatusCode::OK)
}

/// Fetches one bare session row or signals not-found.
pub(crate) async fn find_session(pool: &PgPool, id: i64) -> Result<ExamSession, AppError> {
    sqlx::query_as::<_, ExamSession>(
        r#"
        SELECT id, title, exam_id, start_time, end_time, token, created_at
        FROM exam_sessions
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or(AppError::NotFound("Exam session not found".to_string()))
}

async fn all_exams(pool: &PgPool) -> Result<Vec<Exam>, AppError> {
    let exams = sqlx::query_as::<_, Exam>(
        "SELECT id, title, classroom_id, lesson_id, created_at FROM exams ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    Ok(exams)
}
