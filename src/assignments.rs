use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::models::{Assignment, AssignmentMatch, Course, CourseId, TimeWindow};

pub type AssignmentCache = HashMap<CourseId, Vec<Assignment>>;

/// Assignments due inside `window`, sorted by due date.
///
/// With `course` set only that course's cache entry is scanned. Assignments
/// without a parsable due date are skipped.
pub fn collect_assignments(
    courses: &[Course],
    cache: &AssignmentCache,
    course: Option<&Course>,
    window: &TimeWindow,
    now: DateTime<Utc>,
) -> Vec<AssignmentMatch> {
    let mut matches = Vec::new();

    for current in courses {
        if course.is_some_and(|wanted| wanted.id != current.id) {
            continue;
        }

        for assignment in cache.get(&current.id).map(Vec::as_slice).unwrap_or_default() {
            let Some(due_date) = assignment.due_date() else {
                if assignment.due_at.is_some() {
                    log::debug!(
                        "skipping assignment {} with unparsable due date {:?}",
                        assignment.id,
                        assignment.due_at
                    );
                }
                continue;
            };

            if due_date <= now || !window.contains(due_date) {
                continue;
            }

            matches.push(AssignmentMatch {
                name: assignment.name.clone(),
                course_name: current.name.clone(),
                days_until: (due_date - now).num_days(),
                due_date,
            });
        }
    }

    matches.sort_by_key(|m| m.due_date);
    matches
}

/// Every future-dated assignment across all courses, soonest first.
pub fn upcoming_assignments(
    courses: &[Course],
    cache: &AssignmentCache,
    now: DateTime<Utc>,
) -> Vec<AssignmentMatch> {
    let mut matches: Vec<AssignmentMatch> = courses
        .iter()
        .flat_map(move |course| {
            cache
                .get(&course.id)
                .map(Vec::as_slice)
                .unwrap_or_default()
                .iter()
                .filter_map(move |assignment| {
                    let due_date = assignment.due_date().filter(|due| *due > now)?;
                    Some(AssignmentMatch {
                        name: assignment.name.clone(),
                        course_name: course.name.clone(),
                        days_until: (due_date - now).num_days(),
                        due_date,
                    })
                })
        })
        .collect();
    matches.sort_by_key(|m| m.due_date);
    matches
}

const STOP_WORDS: &[&str] = &[
    "a", "about", "all", "am", "an", "and", "any", "are", "at", "be", "do", "does", "for",
    "from", "have", "i", "in", "is", "it", "me", "my", "of", "on", "or", "show", "that", "the",
    "there", "this", "to", "what", "when", "which", "with",
];

/// Lower-cased alphanumeric words of `query` with stop words removed.
pub fn search_keywords(query: &str) -> Vec<String> {
    query
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty() && !STOP_WORDS.contains(word))
        .map(str::to_string)
        .collect()
}

/// `(assignment name, course name)` pairs whose name contains any keyword.
///
/// An empty keyword list matches everything. At most `limit` results.
pub fn search_assignments<'a>(
    courses: &'a [Course],
    cache: &'a AssignmentCache,
    keywords: &[String],
    limit: usize,
) -> Vec<(&'a str, &'a str)> {
    courses
        .iter()
        .flat_map(move |course| {
            cache
                .get(&course.id)
                .map(Vec::as_slice)
                .unwrap_or_default()
                .iter()
                .map(move |assignment| (assignment, course))
        })
        .filter(|(assignment, _)| {
            let name = assignment.name.to_lowercase();
            keywords.is_empty() || keywords.iter().any(|k| name.contains(k.as_str()))
        })
        .take(limit)
        .map(|(assignment, course)| (assignment.name.as_str(), course.name.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    use crate::timeframe::extract_timeframe;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 17, 12, 0, 0).unwrap()
    }

    fn due_in(hours: i64) -> Option<String> {
        Some((now() + Duration::hours(hours)).to_rfc3339())
    }

    fn assignment(id: u64, name: &str, due_at: Option<String>) -> Assignment {
        Assignment {
            id,
            name: name.to_string(),
            due_at,
            points_possible: Some(100.0),
            has_submitted_submissions: false,
        }
    }

    fn fixture() -> (Vec<Course>, AssignmentCache) {
        let courses = vec![
            Course {
                id: 1,
                name: "Biology".to_string(),
            },
            Course {
                id: 2,
                name: "Calculus".to_string(),
            },
        ];
        let mut cache = AssignmentCache::new();
        cache.insert(
            1,
            vec![
                assignment(10, "Cell Lab", due_in(26)),
                assignment(11, "Reading Quiz", due_in(5)),
                assignment(12, "Field Notes", None),
                assignment(13, "Broken", Some("sometime soon".to_string())),
            ],
        );
        cache.insert(
            2,
            vec![
                assignment(20, "Problem Set 4", due_in(72)),
                assignment(21, "Past Quiz", due_in(-3)),
                assignment(22, "Final Project", due_in(24 * 20)),
            ],
        );
        (courses, cache)
    }

    #[test]
    fn upcoming_window_collects_across_courses_in_due_order() {
        let (courses, cache) = fixture();
        let window = extract_timeframe("anything due", now());
        let found = collect_assignments(&courses, &cache, None, &window, now());
        let names: Vec<&str> = found.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Reading Quiz", "Cell Lab", "Problem Set 4"]);
        assert_eq!(found[2].course_name, "Calculus");
        assert_eq!(found[2].days_until, 3);
    }

    #[test]
    fn tomorrow_excludes_assignments_due_today() {
        let (courses, cache) = fixture();
        let window = extract_timeframe("tomorrow", now());
        let found = collect_assignments(&courses, &cache, Some(&courses[0]), &window, now());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Cell Lab");
        assert_eq!(found[0].days_until, 1);
    }

    #[test]
    fn specific_course_limits_the_scan() {
        let (courses, cache) = fixture();
        let window = extract_timeframe("this week", now());
        let found = collect_assignments(&courses, &cache, Some(&courses[1]), &window, now());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Problem Set 4");
    }

    #[test]
    fn undated_and_unparsable_assignments_never_match() {
        let (courses, cache) = fixture();
        let window = extract_timeframe("", now());
        let found = collect_assignments(&courses, &cache, None, &window, now());
        assert!(found.iter().all(|m| m.name != "Field Notes" && m.name != "Broken"));
    }

    #[test]
    fn window_end_is_inclusive() {
        let courses = vec![Course {
            id: 5,
            name: "Physics".to_string(),
        }];
        let mut cache = AssignmentCache::new();
        cache.insert(5, vec![assignment(1, "Edge", due_in(24))]);
        let window = extract_timeframe("today", now());
        let found = collect_assignments(&courses, &cache, None, &window, now());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].days_until, 1);
    }

    #[test]
    fn missing_cache_entries_yield_nothing() {
        let (courses, _) = fixture();
        let window = extract_timeframe("", now());
        let found = collect_assignments(&courses, &AssignmentCache::new(), None, &window, now());
        assert!(found.is_empty());
    }

    #[test]
    fn upcoming_ignores_window_bounds() {
        let (courses, cache) = fixture();
        let found = upcoming_assignments(&courses, &cache, now());
        assert_eq!(found.len(), 4);
        assert_eq!(found.last().map(|m| m.name.as_str()), Some("Final Project"));
    }

    #[test]
    fn keywords_drop_stop_words_and_punctuation() {
        assert_eq!(search_keywords("Show me the Lab reports!"), vec!["lab", "reports"]);
        assert!(search_keywords("what is it?").is_empty());
    }

    #[test]
    fn search_matches_name_substrings() {
        let (courses, cache) = fixture();
        let hits = search_assignments(&courses, &cache, &search_keywords("quiz"), 10);
        assert_eq!(hits, vec![("Reading Quiz", "Biology"), ("Past Quiz", "Calculus")]);
    }

    #[test]
    fn empty_search_lists_everything_up_to_limit() {
        let (courses, cache) = fixture();
        let hits = search_assignments(&courses, &cache, &[], 3);
        assert_eq!(hits.len(), 3);
    }
}
