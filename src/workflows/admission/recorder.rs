use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::evaluation::AdmissionVerdict;
use super::recommendation::CourseMatch;

/// Identifier wrapper for recorded decisions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DecisionId(pub String);

/// The assembled decision for one applicant submission. This record, not any
/// intermediate value, is the unit handed to the recorder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub applicant_name: String,
    pub desired_course: String,
    pub verdict: AdmissionVerdict,
    pub student_average: u8,
    pub recommendations: Vec<CourseMatch>,
    pub decided_at: DateTime<Utc>,
}

impl Decision {
    pub fn reason_code(&self) -> &'static str {
        self.verdict.reason_code()
    }
}

/// A decision after the recorder accepted it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedDecision {
    pub decision_id: DecisionId,
    pub decision: Decision,
}

impl RecordedDecision {
    /// Sanitized representation exposed through the API.
    pub fn view(&self) -> DecisionView {
        DecisionView {
            decision_id: self.decision_id.clone(),
            applicant_name: self.decision.applicant_name.clone(),
            desired_course: self.decision.desired_course.clone(),
            status: self.decision.verdict.status_label(),
            reason_code: self.decision.reason_code(),
            rationale: self.decision.verdict.summary(),
            student_average: self.decision.student_average,
            recommendations: self.decision.recommendations.clone(),
        }
    }
}

/// Persistence abstraction for final decisions. `record` is the single
/// externally visible commit point of a request; it is called exactly once
/// per completed decision and never for partially evaluated requests.
pub trait DecisionRecorder: Send + Sync {
    fn record(&self, decision: Decision) -> Result<RecordedDecision, RecorderError>;
    fn fetch(&self, id: &DecisionId) -> Result<Option<RecordedDecision>, RecorderError>;
}

/// Error enumeration for recorder failures.
#[derive(Debug, thiserror::Error)]
pub enum RecorderError {
    #[error("decision not found")]
    NotFound,
    #[error("decision store unavailable: {0}")]
    Unavailable(String),
}

/// Flattened decision payload for API responses and CLI rendering.
#[derive(Debug, Clone, Serialize)]
pub struct DecisionView {
    pub decision_id: DecisionId,
    pub applicant_name: String,
    pub desired_course: String,
    pub status: &'static str,
    pub reason_code: &'static str,
    pub rationale: String,
    pub student_average: u8,
    pub recommendations: Vec<CourseMatch>,
}

/// In-process recorder assigning sequential identifiers.
#[derive(Debug, Default)]
pub struct MemoryRecorder {
    sequence: AtomicU64,
    decisions: Mutex<HashMap<DecisionId, RecordedDecision>>,
}

impl DecisionRecorder for MemoryRecorder {
    fn record(&self, decision: Decision) -> Result<RecordedDecision, RecorderError> {
        let id = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        let decision_id = DecisionId(format!("dec-{id:06}"));
        let recorded = RecordedDecision {
            decision_id: decision_id.clone(),
            decision,
        };

        let mut guard = self
            .decisions
            .lock()
            .map_err(|_| RecorderError::Unavailable("recorder mutex poisoned".to_string()))?;
        guard.insert(decision_id, recorded.clone());

        Ok(recorded)
    }

    fn fetch(&self, id: &DecisionId) -> Result<Option<RecordedDecision>, RecorderError> {
        let guard = self
            .decisions
            .lock()
            .map_err(|_| RecorderError::Unavailable("recorder mutex poisoned".to_string()))?;
        Ok(guard.get(id).cloned())
    }
}
