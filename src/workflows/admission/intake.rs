use std::collections::BTreeMap;

use super::domain::{normalize_token, ApplicantRecord, ApplicantSubmission, Gender};

/// Validation errors raised by the intake guard.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("applicant name must be letters and spaces, at most {max_length} characters")]
    InvalidName { max_length: usize },
    #[error("applicant age {age} outside accepted range {min}..={max}")]
    InvalidAge { age: u8, min: u8, max: u8 },
    #[error("gender '{0}' is not a recognized category")]
    InvalidGender(String),
    #[error("marksheet must contain exactly {expected} subjects, found {found}")]
    WrongSubjectCount { expected: usize, found: usize },
    #[error("mark {mark} for subject '{subject}' outside 0..=100")]
    MarkOutOfRange { subject: String, mark: u8 },
    #[error("subject '{0}' appears more than once after normalization")]
    DuplicateSubject(String),
    #[error("exam '{0}' appears more than once after normalization")]
    DuplicateExam(String),
    #[error("desired course must not be empty")]
    MissingDesiredCourse,
}

const DEFAULT_SUBJECT_COUNT: usize = 6;
const DEFAULT_MIN_AGE: u8 = 17;
const DEFAULT_MAX_AGE: u8 = 25;
const DEFAULT_MAX_NAME_LENGTH: usize = 50;

/// Policy dials backing intake validation. The marksheet cardinality is a
/// configuration parameter rather than a hard constant so catalogs with a
/// different subject domain can reuse the guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntakePolicy {
    pub subject_count: usize,
    pub min_age: u8,
    pub max_age: u8,
    pub max_name_length: usize,
}

impl Default for IntakePolicy {
    fn default() -> Self {
        Self {
            subject_count: DEFAULT_SUBJECT_COUNT,
            min_age: DEFAULT_MIN_AGE,
            max_age: DEFAULT_MAX_AGE,
            max_name_length: DEFAULT_MAX_NAME_LENGTH,
        }
    }
}

/// Guard responsible for producing `ApplicantRecord` instances.
#[derive(Debug, Clone, Default)]
pub struct IntakeGuard {
    policy: IntakePolicy,
}

impl IntakeGuard {
    pub fn with_policy(policy: IntakePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &IntakePolicy {
        &self.policy
    }

    /// Convert an inbound submission into a validated applicant record.
    pub fn record_from_submission(
        &self,
        submission: ApplicantSubmission,
    ) -> Result<ApplicantRecord, ValidationError> {
        let name = self.validate_name(&submission.name)?;

        if submission.age < self.policy.min_age || submission.age > self.policy.max_age {
            return Err(ValidationError::InvalidAge {
                age: submission.age,
                min: self.policy.min_age,
                max: self.policy.max_age,
            });
        }

        let gender = Gender::parse(&submission.gender)
            .ok_or_else(|| ValidationError::InvalidGender(submission.gender.clone()))?;

        if submission.subject_marks.len() != self.policy.subject_count {
            return Err(ValidationError::WrongSubjectCount {
                expected: self.policy.subject_count,
                found: submission.subject_marks.len(),
            });
        }

        let mut subject_marks = BTreeMap::new();
        for (subject, mark) in submission.subject_marks {
            if mark > 100 {
                return Err(ValidationError::MarkOutOfRange { subject, mark });
            }
            let normalized = normalize_token(&subject);
            if subject_marks.insert(normalized.clone(), mark).is_some() {
                return Err(ValidationError::DuplicateSubject(normalized));
            }
        }

        let mut qualifying_exam_results = BTreeMap::new();
        for (exam, passed) in submission.qualifying_exam_results.unwrap_or_default() {
            let normalized = normalize_token(&exam);
            if qualifying_exam_results
                .insert(normalized.clone(), passed)
                .is_some()
            {
                return Err(ValidationError::DuplicateExam(normalized));
            }
        }

        let desired_course = normalize_token(&submission.desired_course);
        if desired_course.is_empty() {
            return Err(ValidationError::MissingDesiredCourse);
        }

        Ok(ApplicantRecord {
            name,
            age: submission.age,
            gender,
            subject_marks,
            qualifying_exam_results,
            desired_course,
        })
    }

    fn validate_name(&self, raw: &str) -> Result<String, ValidationError> {
        let normalized = normalize_token(raw);
        let max_length = self.policy.max_name_length;

        let mut chars = normalized.chars();
        let starts_with_letter = chars.next().is_some_and(|c| c.is_ascii_uppercase());
        let rest_valid = normalized
            .chars()
            .all(|c| c.is_ascii_uppercase() || c == ' ');

        if !starts_with_letter || !rest_valid || normalized.len() > max_length {
            return Err(ValidationError::InvalidName { max_length });
        }

        Ok(normalized)
    }
}
