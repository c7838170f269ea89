// src/models/exam_status.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Represents the 'exam_statuses' table in the database.
/// Tracks one student's completion state for one session, independent of
/// the enrollment row.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ExamStatus {
    pub id: i64,
    pub student_id: i64,
    pub exam_session_id: i64,

    /// Snapshot of the session token at enrollment time. Regenerating the
    /// session token does not touch this copy. Rows created through the
    /// status endpoint have no snapshot.
    pub token: Option<String>,

    /// One of 'pending', 'completed' or 'failed'.
    pub status: String,

    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// DTO for the status upsert endpoint.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateStatusRequest {
    pub student_id: i64,
    pub exam_session_id: i64,
    #[validate(custom(function = validate_status))]
    pub status: String,
}

fn validate_status(status: &str) -> Result<(), validator::ValidationError> {
    match status {
        "pending" | "completed" | "failed" => Ok(()),
        _ => Err(validator::ValidationError::new(
            "status_must_be_pending_completed_or_failed",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_known_statuses() {
        for status in ["pending", "completed", "failed"] {
            let req = UpdateStatusRequest {
                student_id: 1,
                exam_session_id: 1,
                status: status.to_string(),
            };
            assert!(req.validate().is_ok());
        }
    }

    #[test]
    fn rejects_unknown_status() {
        let req = UpdateStatusRequest {
            student_id: 1,
            exam_session_id: 1,
            status: "done".to_string(),
        };
        assert!(req.validate().is_err());
    }
}
