// src/models/student.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Represents the 'students' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub classroom_id: i64,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Student row with the classroom title attached.
/// Used by the enrollment candidate listing.
#[derive(Debug, Serialize, FromRow)]
pub struct StudentWithClassroom {
    pub id: i64,
    pub name: String,
    pub classroom_id: i64,
    pub classroom_title: String,
}
