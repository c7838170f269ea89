// src/models/exam_session.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Represents the 'exam_sessions' table in the database.
///
/// `start_time` and `end_time` are stored as text: the create path persists
/// whatever the caller submitted, while the update path writes the
/// normalized `%Y-%m-%d %H:%M:%S` form. The two may therefore differ in
/// layout for the same session over its lifetime.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ExamSession {
    pub id: i64,
    pub title: String,
    pub exam_id: i64,
    pub start_time: String,
    pub end_time: String,

    /// Access token, at most 6 characters. Regenerable on demand and not
    /// guaranteed unique across sessions.
    pub token: String,

    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Session row with exam, classroom and lesson data attached, plus the
/// number of enrolled groups. One row of the listing and the detail view.
#[derive(Debug, Serialize, FromRow)]
pub struct ExamSessionListItem {
    pub id: i64,
    pub title: String,
    pub exam_id: i64,
    pub start_time: String,
    pub end_time: String,
    pub token: String,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,

    pub exam_title: String,
    pub classroom_id: i64,
    pub classroom_title: String,
    pub lesson_id: i64,
    pub lesson_title: String,

    pub exam_groups_count: i64,
}

/// Query parameters for listing sessions.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    /// Free-text filter matched against the session title.
    pub q: Option<String>,
    pub page: Option<i64>,
}

/// Query parameters carrying only a page number (detail sub-list).
#[derive(Debug, Deserialize)]
pub struct PageParams {
    pub page: Option<i64>,
}

/// DTO for creating a session. Times are persisted exactly as given.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateExamSessionRequest {
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,

    pub exam_id: i64,

    #[validate(length(min = 1, message = "start_time is required"))]
    pub start_time: String,

    #[validate(length(min = 1, message = "end_time is required"))]
    pub end_time: String,

    #[validate(length(min = 1, max = 6, message = "token must be 1 to 6 characters"))]
    pub token: String,
}

/// DTO for updating a session. The token is not editable here; it only
/// changes through regeneration.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateExamSessionRequest {
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,

    pub exam_id: i64,

    #[validate(length(min = 1, message = "start_time is required"))]
    pub start_time: String,

    #[validate(length(min = 1, message = "end_time is required"))]
    pub end_time: String,
}
