use serde::{Deserialize, Serialize};

use super::domain::{ApplicantRecord, Course};
use super::evaluation::rules::{self, ExamGate};

/// Alternative course the applicant qualifies for, surfaced when the desired
/// course rejected them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseMatch {
    pub course_name: String,
    pub minimum_average: u8,
    pub qualifying_exam: Option<String>,
}

impl From<&Course> for CourseMatch {
    fn from(course: &Course) -> Self {
        Self {
            course_name: course.name.clone(),
            minimum_average: course.minimum_average,
            qualifying_exam: course.qualifying_exam.clone(),
        }
    }
}

/// Search one catalog snapshot for courses the applicant qualifies for.
///
/// A course is a candidate iff its required subjects are a subset of the
/// applicant's marksheet, the applicant's truncated average meets the course
/// minimum, and the exam gate passes for that course. Results come back
/// ascending by minimum average so the closest fit surfaces first, with ties
/// broken by course name for determinism. An empty result is a valid outcome,
/// not an error.
pub fn search(record: &ApplicantRecord, catalog: &[Course]) -> Vec<CourseMatch> {
    let student_average = rules::truncated_average(&record.subject_marks);

    let mut matches: Vec<CourseMatch> = catalog
        .iter()
        .filter(|course| {
            rules::covers_required_subjects(&course.required_subjects, &record.subject_marks)
        })
        .filter(|course| student_average >= course.minimum_average)
        .filter(|course| {
            matches!(
                rules::exam_gate(course, &record.qualifying_exam_results),
                ExamGate::Satisfied
            )
        })
        .map(CourseMatch::from)
        .collect();

    matches.sort_by(|a, b| {
        a.minimum_average
            .cmp(&b.minimum_average)
            .then_with(|| a.course_name.cmp(&b.course_name))
    });

    matches
}
