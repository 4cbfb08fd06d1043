use std::thread;

use crate::assignments::AssignmentCache;
use crate::config::ChatConfig;
use crate::error::GradeSourceError;
use crate::models::{Course, CourseId, GradeInfo, GradeRecord, Submission};

/// Data-access collaborator for per-course grade lookups.
///
/// Implementations may block on I/O. `Ok(None)` and `Err(_)` are both read as
/// "no grade yet" by the aggregator.
pub trait GradeSource: Sync {
    fn course_grade(&self, course_id: CourseId) -> Result<Option<GradeInfo>, GradeSourceError>;

    fn submissions(&self, _course_id: CourseId) -> Result<Vec<Submission>, GradeSourceError> {
        Ok(Vec::new())
    }
}

#[derive(Debug, Clone)]
pub enum GradeReport {
    /// The query named a course; `grade` is `None` when it has no score yet.
    Course {
        course_name: String,
        grade: Option<GradeRecord>,
    },
    Lowest(Option<GradeRecord>),
    Highest(Option<GradeRecord>),
    Passing {
        graded: usize,
        failing: Vec<GradeRecord>,
    },
    Overview {
        grades: Vec<GradeRecord>,
        average: Option<f64>,
    },
}

pub struct GradeAggregator<'a, S: GradeSource + ?Sized> {
    source: &'a S,
    courses: &'a [Course],
    config: &'a ChatConfig,
}

impl<'a, S: GradeSource + ?Sized> GradeAggregator<'a, S> {
    pub fn new(source: &'a S, courses: &'a [Course], config: &'a ChatConfig) -> Self {
        Self {
            source,
            courses,
            config,
        }
    }

    /// Pick a report for a lower-cased query. A resolved course takes priority
    /// over the comparative keywords.
    pub fn answer(&self, query: &str, course: Option<&Course>) -> GradeReport {
        if let Some(course) = course {
            return GradeReport::Course {
                course_name: course.name.clone(),
                grade: self.grade_for(course),
            };
        }

        if query.contains("lowest") || query.contains("worst") {
            GradeReport::Lowest(self.lowest())
        } else if query.contains("highest") || query.contains("best") {
            GradeReport::Highest(self.highest())
        } else if query.contains("passing") || query.contains("failing") {
            let grades = self.collect_all_grades();
            let failing = self.failing(&grades);
            GradeReport::Passing {
                graded: grades.len(),
                failing,
            }
        } else {
            let grades = self.collect_all_grades();
            let average = average_score(&grades);
            GradeReport::Overview { grades, average }
        }
    }

    pub fn grade_for(&self, course: &Course) -> Option<GradeRecord> {
        record(course, self.fetch(course))
    }

    /// Every course paired with its grade (or `None`), in course-list order.
    pub fn course_grades(&self) -> Vec<(&'a Course, Option<GradeRecord>)> {
        self.courses
            .iter()
            .zip(self.fetch_all())
            .map(|(course, info)| (course, record(course, info)))
            .collect()
    }

    /// Graded courses only, in course-list order.
    pub fn collect_all_grades(&self) -> Vec<GradeRecord> {
        self.course_grades()
            .into_iter()
            .filter_map(|(_, grade)| grade)
            .collect()
    }

    pub fn lowest(&self) -> Option<GradeRecord> {
        pick_first(self.collect_all_grades(), |candidate, best| candidate < best)
    }

    pub fn highest(&self) -> Option<GradeRecord> {
        pick_first(self.collect_all_grades(), |candidate, best| candidate > best)
    }

    pub fn failing(&self, grades: &[GradeRecord]) -> Vec<GradeRecord> {
        grades
            .iter()
            .filter(|grade| grade.score < self.config.passing_threshold)
            .cloned()
            .collect()
    }

    fn fetch(&self, course: &Course) -> Option<GradeInfo> {
        match self.source.course_grade(course.id) {
            Ok(info) => info,
            Err(err) => {
                log::warn!("treating {} as ungraded: {err}", course.name);
                None
            }
        }
    }

    /// One lookup per course. With a concurrency limit above one, lookups run
    /// in scoped threads a chunk at a time; results keep course-list order.
    fn fetch_all(&self) -> Vec<Option<GradeInfo>> {
        let limit = self.config.grade_fetch_concurrency.max(1);
        if limit == 1 {
            return self.courses.iter().map(|course| self.fetch(course)).collect();
        }

        let mut results = Vec::with_capacity(self.courses.len());
        for chunk in self.courses.chunks(limit) {
            let fetched: Vec<Option<GradeInfo>> = thread::scope(|scope| {
                let handles: Vec<_> = chunk
                    .iter()
                    .map(|course| scope.spawn(move || self.fetch(course)))
                    .collect();
                handles
                    .into_iter()
                    .map(|handle| {
                        handle.join().unwrap_or_else(|_| {
                            log::warn!("grade lookup thread panicked");
                            None
                        })
                    })
                    .collect()
            });
            results.extend(fetched);
        }
        results
    }
}

fn record(course: &Course, info: Option<GradeInfo>) -> Option<GradeRecord> {
    let info = info?;
    Some(GradeRecord {
        course_name: course.name.clone(),
        score: info.current_score?,
        letter: info.current_grade.unwrap_or_default(),
    })
}

/// First record whose score beats every earlier one, so ties keep list order.
fn pick_first(
    grades: Vec<GradeRecord>,
    beats: impl Fn(f64, f64) -> bool,
) -> Option<GradeRecord> {
    grades.into_iter().reduce(|best, candidate| {
        if beats(candidate.score, best.score) {
            candidate
        } else {
            best
        }
    })
}

pub fn average_score(grades: &[GradeRecord]) -> Option<f64> {
    if grades.is_empty() {
        return None;
    }
    Some(grades.iter().map(|grade| grade.score).sum::<f64>() / grades.len() as f64)
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionScore {
    Points { score: f64, possible: f64, percent: f64 },
    Letter(String),
    Ungraded,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionLine {
    pub assignment_name: String,
    pub score: SubmissionScore,
}

/// Per-assignment breakdown of a course's submissions.
///
/// Assignment names come from the cache; unknown ids fall back to
/// `Assignment <id>`. A failed lookup reads as no submissions.
pub fn submission_breakdown<S: GradeSource + ?Sized>(
    source: &S,
    course_id: CourseId,
    cache: &AssignmentCache,
) -> Vec<SubmissionLine> {
    let submissions = source.submissions(course_id).unwrap_or_else(|err| {
        log::warn!("no submissions for course {course_id}: {err}");
        Vec::new()
    });
    let assignments = cache.get(&course_id).map(Vec::as_slice).unwrap_or_default();

    submissions
        .into_iter()
        .map(|submission| {
            let assignment_name = assignments
                .iter()
                .find(|assignment| assignment.id == submission.assignment_id)
                .map(|assignment| assignment.name.clone())
                .unwrap_or_else(|| format!("Assignment {}", submission.assignment_id));
            let possible = submission
                .assignment
                .as_ref()
                .and_then(|assignment| assignment.points_possible);

            let score = match (submission.score, possible, submission.grade) {
                (Some(score), Some(possible), _) if possible > 0.0 => SubmissionScore::Points {
                    score,
                    possible,
                    percent: score / possible * 100.0,
                },
                (_, _, Some(grade)) if !grade.is_empty() => SubmissionScore::Letter(grade),
                _ => SubmissionScore::Ungraded,
            };
            SubmissionLine {
                assignment_name,
                score,
            }
        })
        .collect()
}
