//! On-disk snapshot of what the Canvas data-access layer returned after login.
//!
//! A data directory holds `courses.json` (required), `assignments.json`,
//! `grades.csv`, `submissions.json` and `user.json`. Missing optional files
//! load as empty.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::assignments::AssignmentCache;
use crate::error::{GradeSourceError, SnapshotError};
use crate::grades::GradeSource;
use crate::models::{Course, CourseId, GradeInfo, Submission, User};

pub const COURSES_FILE: &str = "courses.json";
pub const ASSIGNMENTS_FILE: &str = "assignments.json";
pub const GRADES_FILE: &str = "grades.csv";
pub const SUBMISSIONS_FILE: &str = "submissions.json";
pub const USER_FILE: &str = "user.json";

#[derive(Debug)]
pub struct Snapshot {
    pub user: Option<User>,
    pub courses: Vec<Course>,
    pub assignments: AssignmentCache,
    pub grades: SnapshotGrades,
}

/// Grade collaborator backed by the snapshot's grade rows and submissions.
#[derive(Debug, Default)]
pub struct SnapshotGrades {
    grades: HashMap<CourseId, GradeInfo>,
    submissions: HashMap<CourseId, Vec<Submission>>,
}

impl SnapshotGrades {
    pub fn new(
        grades: HashMap<CourseId, GradeInfo>,
        submissions: HashMap<CourseId, Vec<Submission>>,
    ) -> Self {
        Self {
            grades,
            submissions,
        }
    }
}

impl GradeSource for SnapshotGrades {
    fn course_grade(&self, course_id: CourseId) -> Result<Option<GradeInfo>, GradeSourceError> {
        Ok(self.grades.get(&course_id).cloned())
    }

    fn submissions(&self, course_id: CourseId) -> Result<Vec<Submission>, GradeSourceError> {
        Ok(self.submissions.get(&course_id).cloned().unwrap_or_default())
    }
}

pub fn load_snapshot(dir: &Path) -> Result<Snapshot, SnapshotError> {
    let courses: Vec<Course> = read_json(&dir.join(COURSES_FILE))?;
    let assignments: AssignmentCache = read_optional_json(&dir.join(ASSIGNMENTS_FILE))?;
    let submissions = read_optional_json(&dir.join(SUBMISSIONS_FILE))?;
    let user = read_optional_json(&dir.join(USER_FILE))?;

    let grades_path = dir.join(GRADES_FILE);
    let grades = if grades_path.exists() {
        import_grades(&grades_path)?
    } else {
        HashMap::new()
    };

    log::info!(
        "loaded {} courses, {} assignment lists, {} grade rows from {}",
        courses.len(),
        assignments.len(),
        grades.len(),
        dir.display()
    );

    Ok(Snapshot {
        user,
        courses,
        assignments,
        grades: SnapshotGrades::new(grades, submissions),
    })
}

/// Read `course_id,current_score,current_grade,final_score,final_grade` rows.
/// Empty cells are absent values; a later row for the same course wins.
pub fn import_grades(path: &Path) -> Result<HashMap<CourseId, GradeInfo>, SnapshotError> {
    #[derive(Deserialize)]
    struct GradeRow {
        course_id: CourseId,
        current_score: Option<f64>,
        current_grade: Option<String>,
        final_score: Option<f64>,
        final_grade: Option<String>,
    }

    let csv_error = |source: csv::Error| SnapshotError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::Reader::from_path(path).map_err(csv_error)?;
    let mut grades = HashMap::new();

    for result in reader.deserialize::<GradeRow>() {
        let row = result.map_err(csv_error)?;
        grades.insert(
            row.course_id,
            GradeInfo {
                current_score: row.current_score,
                current_grade: row.current_grade.filter(|grade| !grade.is_empty()),
                final_score: row.final_score,
                final_grade: row.final_grade.filter(|grade| !grade.is_empty()),
            },
        );
    }

    Ok(grades)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, SnapshotError> {
    let raw = fs::read_to_string(path).map_err(|source| SnapshotError::Io {
        path: PathBuf::from(path),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| SnapshotError::Json {
        path: PathBuf::from(path),
        source,
    })
}

fn read_optional_json<T: DeserializeOwned + Default>(path: &Path) -> Result<T, SnapshotError> {
    if path.exists() {
        read_json(path)
    } else {
        log::debug!("{} not present, using empty default", path.display());
        Ok(T::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, contents: &str) {
        fs::write(dir.path().join(name), contents).unwrap();
    }

    #[test]
    fn loads_a_full_snapshot() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            COURSES_FILE,
            r#"[{"id": 101, "name": "Biology"}, {"id": 202, "name": "Calculus"}]"#,
        );
        write(
            &dir,
            ASSIGNMENTS_FILE,
            r#"{"101": [{"id": 1, "name": "Cell Lab", "due_at": "2026-10-20T23:59:00Z",
                         "points_possible": 20, "has_submitted_submissions": true}],
                "202": [{"id": 2, "name": "Limits", "due_at": null}]}"#,
        );
        write(
            &dir,
            GRADES_FILE,
            "course_id,current_score,current_grade,final_score,final_grade\n\
             101,88.5,B+,80.0,B-\n\
             202,,,,\n",
        );
        write(&dir, USER_FILE, r#"{"id": 7, "name": "Sam Rivera"}"#);

        let snapshot = load_snapshot(dir.path()).unwrap();
        assert_eq!(snapshot.courses.len(), 2);
        assert_eq!(snapshot.user.map(|u| u.name), Some("Sam Rivera".to_string()));
        assert!(snapshot.assignments[&101][0].has_submitted_submissions);
        assert!(snapshot.assignments[&202][0].due_at.is_none());

        let biology = snapshot.grades.course_grade(101).unwrap().unwrap();
        assert_eq!(biology.current_score, Some(88.5));
        assert_eq!(biology.current_grade.as_deref(), Some("B+"));
        let calculus = snapshot.grades.course_grade(202).unwrap().unwrap();
        assert_eq!(calculus.current_score, None);
        assert_eq!(calculus.current_grade, None);
        assert!(snapshot.grades.course_grade(303).unwrap().is_none());
    }

    #[test]
    fn optional_files_default_to_empty() {
        let dir = TempDir::new().unwrap();
        write(&dir, COURSES_FILE, r#"[{"id": 1, "name": "Art"}]"#);

        let snapshot = load_snapshot(dir.path()).unwrap();
        assert!(snapshot.user.is_none());
        assert!(snapshot.assignments.is_empty());
        assert!(snapshot.grades.course_grade(1).unwrap().is_none());
        assert!(snapshot.grades.submissions(1).unwrap().is_empty());
    }

    #[test]
    fn missing_courses_file_is_an_io_error() {
        let dir = TempDir::new().unwrap();
        let err = load_snapshot(dir.path()).unwrap_err();
        assert!(matches!(err, SnapshotError::Io { .. }));
        assert!(err.to_string().contains(COURSES_FILE));
    }

    #[test]
    fn malformed_json_names_the_file() {
        let dir = TempDir::new().unwrap();
        write(&dir, COURSES_FILE, "[{\"id\": \"not a number\"}]");
        let err = load_snapshot(dir.path()).unwrap_err();
        assert!(matches!(err, SnapshotError::Json { .. }));
    }

    #[test]
    fn bad_grade_rows_are_rejected() {
        let dir = TempDir::new().unwrap();
        write(&dir, COURSES_FILE, "[]");
        write(
            &dir,
            GRADES_FILE,
            "course_id,current_score,current_grade,final_score,final_grade\nabc,1,A,1,A\n",
        );
        let err = load_snapshot(dir.path()).unwrap_err();
        assert!(matches!(err, SnapshotError::Csv { .. }));
    }
}
