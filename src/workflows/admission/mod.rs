//! Admission eligibility workflow: intake validation, per-course eligibility
//! evaluation, alternative-course recommendation, and decision recording.

pub mod catalog;
pub mod domain;
pub mod evaluation;
pub mod intake;
pub mod recommendation;
pub mod recorder;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use catalog::{
    CatalogError, CatalogImportError, CatalogRepository, CsvCatalogImporter, InMemoryCatalog,
};
pub use domain::{ApplicantRecord, ApplicantSubmission, Course, Gender};
pub use evaluation::{AdmissionVerdict, EvaluationOutcome, RejectionReason};
pub use intake::{IntakeGuard, IntakePolicy, ValidationError};
pub use recommendation::CourseMatch;
pub use recorder::{
    Decision, DecisionId, DecisionRecorder, DecisionView, MemoryRecorder, RecordedDecision,
    RecorderError,
};
pub use router::admission_router;
pub use service::{AdmissionService, AdmissionServiceError};
