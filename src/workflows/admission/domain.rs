use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Raw submission as received from the transport layer, prior to validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicantSubmission {
    pub name: String,
    pub age: u8,
    pub gender: String,
    pub subject_marks: BTreeMap<String, u8>,
    #[serde(default)]
    pub qualifying_exam_results: Option<BTreeMap<String, bool>>,
    pub desired_course: String,
}

/// Validated, normalized applicant data consumed by the eligibility engine.
///
/// Constructed once per request by the intake guard and immutable afterwards:
/// the name is uppercased, subject and exam keys are normalized, and marks are
/// known to sit inside [0,100].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicantRecord {
    pub name: String,
    pub age: u8,
    pub gender: Gender,
    pub subject_marks: BTreeMap<String, u8>,
    pub qualifying_exam_results: BTreeMap<String, bool>,
    pub desired_course: String,
}

/// Enumerated gender categories accepted during intake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    /// Case-insensitive parse used by the intake guard before a submission
    /// becomes a record.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "MALE" => Some(Gender::Male),
            "FEMALE" => Some(Gender::Female),
            "OTHER" => Some(Gender::Other),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Gender::Male => "MALE",
            Gender::Female => "FEMALE",
            Gender::Other => "OTHER",
        }
    }
}

/// Catalog entry describing the admission requirements of one course.
///
/// Courses are owned by catalog administration and read-only to the engine.
/// `qualifying_exam` is `None` when the course has no exam prerequisite; the
/// external "NONE"/"NA" sentinel is translated at the catalog boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub name: String,
    pub required_subjects: BTreeSet<String>,
    pub qualifying_exam: Option<String>,
    pub minimum_average: u8,
}

/// Canonical form for subject, exam, and course names: trimmed, inner
/// whitespace collapsed, uppercased.
pub fn normalize_token(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}
