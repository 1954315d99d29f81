use serde::{Deserialize, Serialize};

use super::super::domain::Course;
use super::rules::ExamGate;

/// Outcome of evaluating one applicant against one course.
///
/// Rejections are business outcomes, not errors: callers branch on the reason
/// code rather than catching anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AdmissionVerdict {
    Admitted,
    Rejected { reason: RejectionReason },
}

impl AdmissionVerdict {
    pub const fn is_admitted(&self) -> bool {
        matches!(self, AdmissionVerdict::Admitted)
    }

    pub const fn status_label(&self) -> &'static str {
        match self {
            AdmissionVerdict::Admitted => "admitted",
            AdmissionVerdict::Rejected { .. } => "rejected",
        }
    }

    pub const fn reason_code(&self) -> &'static str {
        match self {
            AdmissionVerdict::Admitted => "ADMITTED",
            AdmissionVerdict::Rejected { reason } => reason.code(),
        }
    }

    pub fn summary(&self) -> String {
        match self {
            AdmissionVerdict::Admitted => "applicant admitted".to_string(),
            AdmissionVerdict::Rejected { reason } => reason.summary(),
        }
    }
}

/// Enumerates rejection causes so downstream consumers can issue precise
/// notices and decide whether alternatives are worth searching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RejectionReason {
    CourseNotFound { course: String },
    ExamNotAttempted { exam: String },
    ExamNotPassed { exam: String },
    BelowThreshold { minimum_average: u8, student_average: u8 },
}

impl RejectionReason {
    pub const fn code(&self) -> &'static str {
        match self {
            RejectionReason::CourseNotFound { .. } => "COURSE_NOT_FOUND",
            RejectionReason::ExamNotAttempted { .. } => "EXAM_NOT_ATTEMPTED",
            RejectionReason::ExamNotPassed { .. } => "EXAM_NOT_PASSED",
            RejectionReason::BelowThreshold { .. } => "BELOW_THRESHOLD",
        }
    }

    pub fn summary(&self) -> String {
        match self {
            RejectionReason::CourseNotFound { course } => {
                format!("course '{course}' not found in catalog")
            }
            RejectionReason::ExamNotAttempted { exam } => {
                format!("no result recorded for required exam {exam}")
            }
            RejectionReason::ExamNotPassed { exam } => {
                format!("required exam {exam} not passed")
            }
            RejectionReason::BelowThreshold {
                minimum_average,
                student_average,
            } => format!(
                "average {student_average} below course minimum {minimum_average}"
            ),
        }
    }
}

/// Ordered short-circuit gates for one course: exam prerequisite first, then
/// the average threshold. Course existence is decided before this is called.
pub(crate) fn decide_verdict(
    course: &Course,
    gate: ExamGate,
    student_average: u8,
) -> AdmissionVerdict {
    match gate {
        ExamGate::NotAttempted { exam } => {
            return AdmissionVerdict::Rejected {
                reason: RejectionReason::ExamNotAttempted { exam },
            }
        }
        ExamGate::NotPassed { exam } => {
            return AdmissionVerdict::Rejected {
                reason: RejectionReason::ExamNotPassed { exam },
            }
        }
        ExamGate::Satisfied => {}
    }

    if student_average < course.minimum_average {
        return AdmissionVerdict::Rejected {
            reason: RejectionReason::BelowThreshold {
                minimum_average: course.minimum_average,
                student_average,
            },
        };
    }

    AdmissionVerdict::Admitted
}
