use std::collections::{BTreeMap, BTreeSet};

use super::super::domain::Course;

/// Result of checking a course's qualifying-exam prerequisite against the
/// applicant's exam results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ExamGate {
    Satisfied,
    NotAttempted { exam: String },
    NotPassed { exam: String },
}

/// Apply the exam gate. Courses without an exam prerequisite pass
/// unconditionally; otherwise the applicant needs a passing result for the
/// named exam.
pub(crate) fn exam_gate(course: &Course, results: &BTreeMap<String, bool>) -> ExamGate {
    match &course.qualifying_exam {
        None => ExamGate::Satisfied,
        Some(exam) => match results.get(exam) {
            Some(true) => ExamGate::Satisfied,
            Some(false) => ExamGate::NotPassed { exam: exam.clone() },
            None => ExamGate::NotAttempted { exam: exam.clone() },
        },
    }
}

/// Integer mean of all marks, truncating toward zero. Reproduced exactly so
/// eligibility stays deterministic across evaluator and recommendation paths.
pub(crate) fn truncated_average(marks: &BTreeMap<String, u8>) -> u8 {
    if marks.is_empty() {
        return 0;
    }
    let sum: u32 = marks.values().map(|mark| u32::from(*mark)).sum();
    (sum / marks.len() as u32) as u8
}

/// Subset containment: every subject the course requires must appear in the
/// applicant's marksheet.
pub(crate) fn covers_required_subjects(
    required: &BTreeSet<String>,
    marks: &BTreeMap<String, u8>,
) -> bool {
    required.iter().all(|subject| marks.contains_key(subject))
}
