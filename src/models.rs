use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;

pub type CourseId = u64;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Course {
    pub id: CourseId,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Assignment {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub due_at: Option<String>,
    #[serde(default)]
    pub points_possible: Option<f64>,
    #[serde(default)]
    pub has_submitted_submissions: bool,
}

impl Assignment {
    /// Parsed due date, or `None` when absent or malformed.
    ///
    /// Accepts RFC 3339 (`2026-10-18T23:59:00Z`) and offset-less timestamps,
    /// which are read as UTC.
    pub fn due_date(&self) -> Option<DateTime<Utc>> {
        let raw = self.due_at.as_deref()?.trim();
        if raw.is_empty() {
            return None;
        }
        if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
            return Some(parsed.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
            .ok()
            .map(|naive| naive.and_utc())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GradeInfo {
    #[serde(default)]
    pub current_score: Option<f64>,
    #[serde(default)]
    pub current_grade: Option<String>,
    #[serde(default)]
    pub final_score: Option<f64>,
    #[serde(default)]
    pub final_grade: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Submission {
    pub assignment_id: u64,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub grade: Option<String>,
    #[serde(default)]
    pub assignment: Option<SubmissionAssignment>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubmissionAssignment {
    #[serde(default)]
    pub points_possible: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: u64,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Assignments,
    Grades,
    Courses,
    Help,
    Unknown,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimeWindow {
    pub label: &'static str,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    /// Half-open membership test: `start < instant <= end`.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start < instant && instant <= self.end
    }
}

#[derive(Debug, Clone)]
pub struct AssignmentMatch {
    pub name: String,
    pub course_name: String,
    pub days_until: i64,
    pub due_date: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct GradeRecord {
    pub course_name: String,
    pub score: f64,
    pub letter: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn assignment(due_at: Option<&str>) -> Assignment {
        Assignment {
            id: 1,
            name: "Lab Report".to_string(),
            due_at: due_at.map(str::to_string),
            points_possible: Some(10.0),
            has_submitted_submissions: false,
        }
    }

    #[test]
    fn parses_canvas_zulu_timestamps() {
        let due = assignment(Some("2026-10-18T23:59:00Z")).due_date();
        assert_eq!(due, Some(Utc.with_ymd_and_hms(2026, 10, 18, 23, 59, 0).unwrap()));
    }

    #[test]
    fn offset_timestamps_are_normalized_to_utc() {
        let due = assignment(Some("2026-10-18T18:00:00-05:00")).due_date();
        assert_eq!(due, Some(Utc.with_ymd_and_hms(2026, 10, 18, 23, 0, 0).unwrap()));
    }

    #[test]
    fn naive_timestamps_are_read_as_utc() {
        let due = assignment(Some("2026-10-18T08:30:00")).due_date();
        assert_eq!(due, Some(Utc.with_ymd_and_hms(2026, 10, 18, 8, 30, 0).unwrap()));
    }

    #[test]
    fn missing_or_malformed_due_dates_are_none() {
        assert!(assignment(None).due_date().is_none());
        assert!(assignment(Some("")).due_date().is_none());
        assert!(assignment(Some("next friday")).due_date().is_none());
    }

    #[test]
    fn window_excludes_start_and_includes_end() {
        let start = Utc.with_ymd_and_hms(2026, 10, 17, 12, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap();
        let window = TimeWindow {
            label: "today",
            start,
            end,
        };
        assert!(!window.contains(start));
        assert!(window.contains(end));
    }
}
