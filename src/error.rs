use std::path::PathBuf;

use thiserror::Error;

use crate::models::CourseId;

#[derive(Error, Debug)]
pub enum GradeSourceError {
    #[error("no grade data available for course {0}")]
    Unavailable(CourseId),

    #[error("grade lookup failed for course {course_id}: {reason}")]
    Failed { course_id: CourseId, reason: String },
}

#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("failed to read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid grade row in {}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}
