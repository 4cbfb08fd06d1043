use chrono::{DateTime, Utc};

use crate::assignments::{collect_assignments, AssignmentCache};
use crate::config::ChatConfig;
use crate::courses::{describe_courses, match_course};
use crate::grades::{GradeAggregator, GradeSource};
use crate::intent::classify;
use crate::models::{Course, Intent};
use crate::respond::{format_assignments, format_grades, FALLBACK_TEXT, HELP_TEXT};
use crate::timeframe::extract_timeframe;

/// Answers free-text questions over a post-login snapshot of the student's
/// courses and assignments. Grades are looked up through `S` per query.
pub struct ChatBot<S> {
    source: S,
    courses: Vec<Course>,
    assignments: AssignmentCache,
    config: ChatConfig,
}

impl<S: GradeSource> ChatBot<S> {
    pub fn new(source: S, courses: Vec<Course>, assignments: AssignmentCache) -> Self {
        Self::with_config(source, courses, assignments, ChatConfig::default())
    }

    pub fn with_config(
        source: S,
        courses: Vec<Course>,
        assignments: AssignmentCache,
        config: ChatConfig,
    ) -> Self {
        Self {
            source,
            courses,
            assignments,
            config,
        }
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn assignments(&self) -> &AssignmentCache {
        &self.assignments
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    pub fn grades(&self) -> GradeAggregator<'_, S> {
        GradeAggregator::new(&self.source, &self.courses, &self.config)
    }

    pub fn process_query(&self, query: &str) -> String {
        self.process_query_at(query, Utc::now())
    }

    /// Answer `query` as of `now`. Every time computation in the answer uses
    /// this one instant.
    pub fn process_query_at(&self, query: &str, now: DateTime<Utc>) -> String {
        let query = query.to_lowercase();
        match classify(&query) {
            Intent::Assignments => self.answer_assignments(&query, now),
            Intent::Grades => self.answer_grades(&query),
            Intent::Courses => describe_courses(&query, &self.courses),
            Intent::Help => HELP_TEXT.to_string(),
            Intent::Unknown => FALLBACK_TEXT.to_string(),
        }
    }

    fn answer_assignments(&self, query: &str, now: DateTime<Utc>) -> String {
        let window = extract_timeframe(query, now);
        let course = match_course(query, &self.courses);
        log::debug!(
            "assignment query window={} course={:?}",
            window.label,
            course.map(|c| c.id)
        );
        let matches = collect_assignments(&self.courses, &self.assignments, course, &window, now);
        format_assignments(&matches, &window, course, self.config.list_limit)
    }

    fn answer_grades(&self, query: &str) -> String {
        let course = match_course(query, &self.courses);
        let report = self.grades().answer(query, course);
        format_grades(&report)
    }
}
