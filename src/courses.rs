use std::fmt::Write;

use crate::models::Course;

/// Resolve a course reference inside a lower-cased query.
///
/// A course matches when its whole lower-cased name, or any word of the name
/// longer than three characters, occurs in the query. Courses are tried in
/// list order and the first match wins, so two courses sharing a word (say
/// "Organic Chemistry" and "Chemistry Lab") resolve to whichever is listed
/// first. Courses with a blank name never match.
pub fn match_course<'a>(query: &str, courses: &'a [Course]) -> Option<&'a Course> {
    courses.iter().find(|course| {
        let name = course.name.trim().to_lowercase();
        if name.is_empty() {
            return false;
        }
        query.contains(name.as_str())
            || name
                .split_whitespace()
                .filter(|word| word.chars().count() > 3)
                .any(|word| query.contains(word))
    })
}

pub fn describe_courses(query: &str, courses: &[Course]) -> String {
    if query.contains("how many") || query.contains("list") {
        let mut output = String::new();
        let _ = writeln!(output, "You're enrolled in {} courses:", courses.len());
        let _ = writeln!(output);
        for course in courses {
            let _ = writeln!(output, "- {}", course.name);
        }
        output
    } else {
        format!(
            "You're currently taking {} courses. Ask me about specific courses or your grades to learn more!",
            courses.len()
        )
    }
}
