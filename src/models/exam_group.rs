// src/models/exam_group.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Represents the 'exam_groups' table in the database.
/// One row enrolls one student into one exam session. The pair
/// (exam_session_id, student_id) carries no uniqueness constraint, so the
/// same student can appear twice in a session.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ExamGroup {
    pub id: i64,
    pub exam_id: i64,
    pub exam_session_id: i64,
    pub student_id: i64,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Enrollment row with student and classroom data attached.
/// One row of the paginated sub-list on the session detail view.
#[derive(Debug, Serialize, FromRow)]
pub struct EnrolledGroup {
    pub id: i64,
    pub exam_id: i64,
    pub exam_session_id: i64,
    pub student_id: i64,
    pub student_name: String,
    pub classroom_title: String,
}

/// DTO for bulk enrollment: the list of students to add to a session.
#[derive(Debug, Deserialize, Validate)]
pub struct StoreEnrollmentRequest {
    #[validate(length(min = 1, message = "student_id is required"))]
    pub student_id: Vec<i64>,
}
