mod policy;
pub(crate) mod rules;

pub use policy::{AdmissionVerdict, RejectionReason};

use serde::{Deserialize, Serialize};

use super::domain::{ApplicantRecord, Course};
use policy::decide_verdict;

/// Evaluation output pairing the verdict with the average it was decided on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationOutcome {
    pub verdict: AdmissionVerdict,
    pub student_average: u8,
}

/// Evaluate one applicant against the desired course.
///
/// Pure over its inputs: identical record and course snapshot always yield
/// the identical outcome. `course` is `None` when the catalog lookup missed,
/// which short-circuits to a course-not-found rejection before any other gate.
pub fn evaluate(record: &ApplicantRecord, course: Option<&Course>) -> EvaluationOutcome {
    let student_average = rules::truncated_average(&record.subject_marks);

    let verdict = match course {
        None => AdmissionVerdict::Rejected {
            reason: RejectionReason::CourseNotFound {
                course: record.desired_course.clone(),
            },
        },
        Some(course) => decide_verdict(
            course,
            rules::exam_gate(course, &record.qualifying_exam_results),
            student_average,
        ),
    };

    EvaluationOutcome {
        verdict,
        student_average,
    }
}
