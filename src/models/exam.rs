// src/models/exam.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Represents the 'exams' table in the database.
/// An exam belongs to one classroom and one lesson; sessions are scheduled
/// against it.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Exam {
    pub id: i64,
    pub title: String,
    pub classroom_id: i64,
    pub lesson_id: i64,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}
