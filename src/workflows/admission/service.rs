use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use super::catalog::{CatalogError, CatalogRepository};
use super::domain::ApplicantSubmission;
use super::evaluation::{self, AdmissionVerdict, RejectionReason};
use super::intake::{IntakeGuard, IntakePolicy, ValidationError};
use super::recommendation;
use super::recorder::{
    Decision, DecisionId, DecisionRecorder, RecordedDecision, RecorderError,
};

/// Service composing the intake guard, catalog, evaluation, recommendation
/// search, and decision recorder into the one-shot admission flow.
pub struct AdmissionService<C, R> {
    guard: IntakeGuard,
    catalog: Arc<C>,
    recorder: Arc<R>,
}

impl<C, R> AdmissionService<C, R>
where
    C: CatalogRepository + 'static,
    R: DecisionRecorder + 'static,
{
    pub fn new(catalog: Arc<C>, recorder: Arc<R>) -> Self {
        Self::with_policy(catalog, recorder, IntakePolicy::default())
    }

    pub fn with_policy(catalog: Arc<C>, recorder: Arc<R>, policy: IntakePolicy) -> Self {
        Self {
            guard: IntakeGuard::with_policy(policy),
            catalog,
            recorder,
        }
    }

    /// Run one submission through validation, eligibility, recommendation,
    /// and recording. The recorder write is the only side effect; nothing is
    /// persisted for submissions that fail validation or hit an
    /// infrastructure fault beforehand.
    pub fn decide(
        &self,
        submission: ApplicantSubmission,
    ) -> Result<RecordedDecision, AdmissionServiceError> {
        let record = self.guard.record_from_submission(submission)?;

        let desired = self.catalog.course(&record.desired_course)?;
        let outcome = evaluation::evaluate(&record, desired.as_ref());

        // One catalog snapshot, taken only when alternatives are worth
        // searching: a missing course means the applicant picked a name the
        // catalog does not know, so no recommendation query runs.
        let recommendations = match &outcome.verdict {
            AdmissionVerdict::Rejected { reason }
                if !matches!(reason, RejectionReason::CourseNotFound { .. }) =>
            {
                let snapshot = self.catalog.all_courses()?;
                recommendation::search(&record, &snapshot)
            }
            _ => Vec::new(),
        };

        let decision = Decision {
            applicant_name: record.name.clone(),
            desired_course: record.desired_course.clone(),
            verdict: outcome.verdict,
            student_average: outcome.student_average,
            recommendations,
            decided_at: Utc::now(),
        };

        let recorded = self.recorder.record(decision)?;

        info!(
            decision_id = %recorded.decision_id.0,
            applicant = %recorded.decision.applicant_name,
            course = %recorded.decision.desired_course,
            reason = recorded.decision.reason_code(),
            "admission decision recorded"
        );

        Ok(recorded)
    }

    /// Fetch a previously recorded decision for API read-back.
    pub fn get(&self, id: &DecisionId) -> Result<RecordedDecision, AdmissionServiceError> {
        let recorded = self.recorder.fetch(id)?.ok_or(RecorderError::NotFound)?;
        Ok(recorded)
    }
}

/// Error raised by the admission service. Validation failures are business
/// errors surfaced to the submitter; catalog and recorder failures are
/// infrastructure faults, kept distinct from any rejection verdict.
#[derive(Debug, thiserror::Error)]
pub enum AdmissionServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Recorder(#[from] RecorderError),
}
