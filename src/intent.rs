use crate::models::Intent;

const ASSIGNMENT_KEYWORDS: &[&str] = &[
    "assignment",
    "homework",
    "hw",
    "due",
    "deadline",
    "submit",
    "turn in",
    "work on",
];
const GRADE_KEYWORDS: &[&str] = &[
    "grade", "score", "percent", "graded", "passing", "failing", "gpa", "doing",
];
const COURSE_KEYWORDS: &[&str] = &["course", "class", "taking", "enrolled"];
const HELP_KEYWORDS: &[&str] = &["help", "can you", "what can", "how do"];

const UPCOMING_HINTS: &[&str] = &["next", "upcoming", "soon"];
const PERFORMANCE_HINTS: &[&str] = &["doing", "performance"];

/// Number of keywords from `keywords` that occur in the query.
fn keyword_hits(query: &str, keywords: &[&str]) -> usize {
    keywords.iter().filter(|keyword| query.contains(*keyword)).count()
}

fn mentions_any(query: &str, words: &[&str]) -> bool {
    words.iter().any(|word| query.contains(word))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeywordCounts {
    pub assignments: usize,
    pub grades: usize,
    pub courses: usize,
    pub help: usize,
}

impl KeywordCounts {
    pub fn tally(query: &str) -> Self {
        Self {
            assignments: keyword_hits(query, ASSIGNMENT_KEYWORDS),
            grades: keyword_hits(query, GRADE_KEYWORDS),
            courses: keyword_hits(query, COURSE_KEYWORDS),
            help: keyword_hits(query, HELP_KEYWORDS),
        }
    }
}

type Rule = fn(&str, &KeywordCounts) -> bool;

fn asks_for_help(_: &str, counts: &KeywordCounts) -> bool {
    counts.help > 0
}

fn grades_dominate(_: &str, counts: &KeywordCounts) -> bool {
    counts.grades > counts.assignments && counts.grades > counts.courses
}

fn assignments_outweigh_courses(_: &str, counts: &KeywordCounts) -> bool {
    counts.assignments > counts.courses
}

fn mentions_courses(_: &str, counts: &KeywordCounts) -> bool {
    counts.courses > 0
}

fn hints_upcoming(query: &str, _: &KeywordCounts) -> bool {
    mentions_any(query, UPCOMING_HINTS)
}

fn hints_performance(query: &str, _: &KeywordCounts) -> bool {
    mentions_any(query, PERFORMANCE_HINTS)
}

/// Evaluated top to bottom; the first rule that fires decides the intent.
const RULES: &[(Rule, Intent)] = &[
    (asks_for_help, Intent::Help),
    (grades_dominate, Intent::Grades),
    (assignments_outweigh_courses, Intent::Assignments),
    (mentions_courses, Intent::Courses),
    (hints_upcoming, Intent::Assignments),
    (hints_performance, Intent::Grades),
];

/// Classify a lower-cased query.
pub fn classify(query: &str) -> Intent {
    let counts = KeywordCounts::tally(query);
    let intent = RULES
        .iter()
        .find(|(rule, _)| rule(query, &counts))
        .map(|(_, intent)| *intent)
        .unwrap_or(Intent::Unknown);
    log::debug!("classified query as {intent:?} from {counts:?}");
    intent
}
