use std::fmt::Write;

use crate::grades::{GradeReport, SubmissionLine, SubmissionScore};
use crate::models::{AssignmentMatch, Course, GradeRecord, TimeWindow};

pub const HELP_TEXT: &str = "I can help you with:

- Assignments - \"What's due this week?\" or \"Show assignments for Math\"
- Grades - \"What's my grade in Biology?\" or \"What's my lowest grade?\"
- Courses - \"What courses am I taking?\"

Try asking me something!";

pub const FALLBACK_TEXT: &str = "I'm not sure what you're asking about. Try asking me about your assignments, grades, or courses. For example: 'What assignments are due this week?' or 'What's my grade in Math?'";

/// `today`, `tomorrow` or `in N days`.
pub fn due_phrase(days_until: i64) -> String {
    match days_until {
        0 => "today".to_string(),
        1 => "tomorrow".to_string(),
        days => format!("in {days} days"),
    }
}

pub fn format_assignments(
    matches: &[AssignmentMatch],
    window: &TimeWindow,
    course: Option<&Course>,
    list_limit: usize,
) -> String {
    let timeframe = window.label;

    match matches {
        [] => match course {
            Some(course) => format!(
                "Great news! You don't have any assignments due in {} {timeframe}. You're all caught up!",
                course.name
            ),
            None => format!("You don't have any assignments due {timeframe}. Enjoy your free time!"),
        },
        [only] => format!(
            "You have 1 assignment {timeframe}: {} in {}, due {}.",
            only.name,
            only.course_name,
            due_phrase(only.days_until)
        ),
        _ => {
            let mut output = String::new();
            let _ = writeln!(output, "You have {} assignments {timeframe}:", matches.len());
            let _ = writeln!(output);
            for item in matches.iter().take(list_limit) {
                let _ = writeln!(
                    output,
                    "- {} ({}) - due {}",
                    item.name,
                    item.course_name,
                    due_phrase(item.days_until)
                );
            }
            if matches.len() > list_limit {
                let _ = writeln!(output);
                let _ = write!(
                    output,
                    "...and {} more. Check the upcoming assignments list for the full list!",
                    matches.len() - list_limit
                );
            }
            output
        }
    }
}

fn score_with_letter(grade: &GradeRecord) -> String {
    if grade.letter.is_empty() {
        format!("{:.1}%", grade.score)
    } else {
        format!("{:.1}% ({})", grade.score, grade.letter)
    }
}

pub fn format_grades(report: &GradeReport) -> String {
    match report {
        GradeReport::Course {
            course_name,
            grade: Some(grade),
        } => format!(
            "Your current grade in {course_name} is {}.",
            score_with_letter(grade)
        ),
        GradeReport::Course {
            course_name,
            grade: None,
        } => format!("I don't have grade information available for {course_name} yet."),
        GradeReport::Lowest(None) => {
            "I don't have enough grade information yet to determine your lowest grade.".to_string()
        }
        GradeReport::Lowest(Some(grade)) => format!(
            "Your lowest grade is in {} with {}. You might want to focus some extra effort there!",
            grade.course_name,
            score_with_letter(grade)
        ),
        GradeReport::Highest(None) => {
            "I don't have enough grade information yet to determine your highest grade.".to_string()
        }
        GradeReport::Highest(Some(grade)) => format!(
            "Your highest grade is in {} with {}. Great work!",
            grade.course_name,
            score_with_letter(grade)
        ),
        GradeReport::Passing { graded: 0, .. } => {
            "I don't have enough grade information yet to check your passing status.".to_string()
        }
        GradeReport::Passing { graded, failing } => match failing.as_slice() {
            [] => format!(
                "Good news! You're passing all {graded} of your courses. Keep up the great work!"
            ),
            [course] => format!(
                "You're currently not passing {} ({:.1}%). Consider talking to your professor or getting some tutoring help.",
                course.course_name, course.score
            ),
            _ => {
                let listed: Vec<String> = failing
                    .iter()
                    .map(|course| format!("{} ({:.1}%)", course.course_name, course.score))
                    .collect();
                format!(
                    "You're currently not passing {} courses: {}. I recommend reaching out to your professors for help!",
                    failing.len(),
                    listed.join(", ")
                )
            }
        },
        GradeReport::Overview { grades, average } => {
            let Some(average) = average.filter(|_| !grades.is_empty()) else {
                return "I don't have grade information available yet. Grades will appear here once your assignments are graded.".to_string();
            };
            let mut output = String::new();
            let _ = writeln!(output, "Here's your grade overview:");
            let _ = writeln!(output);
            for grade in grades {
                let _ = writeln!(output, "- {}: {}", grade.course_name, score_with_letter(grade));
            }
            let _ = writeln!(output);
            let _ = write!(output, "Your average across all courses is {average:.1}%.");
            output
        }
    }
}

/// Course code used in the dashboard: text before the first `-`, or the
/// first 15 characters of the name.
pub fn course_code(course_name: &str) -> String {
    match course_name.split_once('-') {
        Some((code, _)) => code.trim().to_string(),
        None => course_name.chars().take(15).collect(),
    }
}

pub fn format_upcoming_digest(upcoming: &[AssignmentMatch], limit: usize) -> Vec<String> {
    if upcoming.is_empty() {
        return vec!["No upcoming assignments".to_string()];
    }
    upcoming
        .iter()
        .take(limit)
        .flat_map(|item| {
            [
                format!("{} - {}", course_code(&item.course_name), item.name),
                format!("(Due in {} days)", item.days_until),
                String::new(),
            ]
        })
        .collect()
}

pub fn format_grade_digest(grades: &[(&Course, Option<GradeRecord>)]) -> Vec<String> {
    if grades.is_empty() {
        return vec!["No grades available".to_string()];
    }
    grades
        .iter()
        .map(|(course, grade)| match grade {
            Some(grade) => format!("{} - {:.1}% {}", course.name, grade.score, grade.letter)
                .trim_end()
                .to_string(),
            None => format!("{} - No grade yet", course.name),
        })
        .collect()
}

pub fn format_search_results(hits: &[(&str, &str)]) -> String {
    if hits.is_empty() {
        return "No assignments found".to_string();
    }
    hits.iter()
        .map(|(assignment, course)| format!("* {assignment} ({course})"))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_breakdown(course_name: &str, lines: &[SubmissionLine]) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "Grades - {course_name}");
    if lines.is_empty() {
        let _ = writeln!(output, "No graded assignments found.");
        return output;
    }
    for line in lines {
        let detail = match &line.score {
            SubmissionScore::Points {
                score,
                possible,
                percent,
            } => format!("{score}/{possible} ({percent:.1}%)"),
            SubmissionScore::Letter(grade) => grade.clone(),
            SubmissionScore::Ungraded => "Not graded yet".to_string(),
        };
        let _ = writeln!(output, "  * {}: {detail}", line.assignment_name);
    }
    output
}
