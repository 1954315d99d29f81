use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::workflows::admission::catalog::{
    CatalogError, CatalogRepository, InMemoryCatalog,
};
use crate::workflows::admission::domain::{ApplicantRecord, ApplicantSubmission, Course, Gender};
use crate::workflows::admission::recorder::{
    Decision, DecisionId, DecisionRecorder, MemoryRecorder, RecordedDecision, RecorderError,
};
use crate::workflows::admission::{admission_router, AdmissionService};

pub(super) fn marks_averaging_73() -> BTreeMap<String, u8> {
    [
        ("ENGLISH", 70),
        ("PHYSICS", 80),
        ("CHEMISTRY", 90),
        ("MATHS", 60),
        ("BIOLOGY", 75),
        ("COMPUTER SCIENCE", 65),
    ]
    .into_iter()
    .map(|(subject, mark)| (subject.to_string(), mark))
    .collect()
}

pub(super) fn flat_marks(mark: u8) -> BTreeMap<String, u8> {
    [
        "ENGLISH",
        "PHYSICS",
        "CHEMISTRY",
        "MATHS",
        "BIOLOGY",
        "COMPUTER SCIENCE",
    ]
    .into_iter()
    .map(|subject| (subject.to_string(), mark))
    .collect()
}

pub(super) fn course(
    name: &str,
    subjects: &[&str],
    exam: Option<&str>,
    minimum_average: u8,
) -> Course {
    Course {
        name: name.to_string(),
        required_subjects: subjects.iter().map(|s| s.to_string()).collect(),
        qualifying_exam: exam.map(str::to_string),
        minimum_average,
    }
}

pub(super) fn catalog() -> InMemoryCatalog {
    InMemoryCatalog::from_courses([
        course("BUSINESS", &["ENGLISH", "MATHS"], None, 70),
        course("ENGINEERING", &["PHYSICS", "CHEMISTRY", "MATHS"], Some("CET"), 75),
        course("ARTS", &["ENGLISH"], None, 55),
        course("SCIENCE", &["PHYSICS", "CHEMISTRY"], None, 58),
        course("ASTRONOMY", &["PHYSICS", "ASTROPHYSICS"], None, 40),
        course("LAW", &["ENGLISH"], Some("CLAT"), 40),
    ])
    .expect("test catalog is well formed")
}

pub(super) fn submission() -> ApplicantSubmission {
    ApplicantSubmission {
        name: "asha rao".to_string(),
        age: 18,
        gender: "FEMALE".to_string(),
        subject_marks: marks_averaging_73(),
        qualifying_exam_results: Some(
            [("CET".to_string(), true)].into_iter().collect(),
        ),
        desired_course: "BUSINESS".to_string(),
    }
}

pub(super) fn record_with_marks(
    marks: BTreeMap<String, u8>,
    desired_course: &str,
) -> ApplicantRecord {
    ApplicantRecord {
        name: "ASHA RAO".to_string(),
        age: 18,
        gender: Gender::Female,
        subject_marks: marks,
        qualifying_exam_results: BTreeMap::new(),
        desired_course: desired_course.to_string(),
    }
}

pub(super) fn build_service() -> (
    AdmissionService<InMemoryCatalog, MemoryRecorder>,
    Arc<InMemoryCatalog>,
    Arc<MemoryRecorder>,
) {
    let catalog = Arc::new(catalog());
    let recorder = Arc::new(MemoryRecorder::default());
    let service = AdmissionService::new(catalog.clone(), recorder.clone());
    (service, catalog, recorder)
}

/// Catalog wrapper counting snapshot reads so tests can assert when the
/// recommendation search runs.
pub(super) struct CountingCatalog {
    inner: InMemoryCatalog,
    snapshots: AtomicUsize,
}

impl CountingCatalog {
    pub(super) fn new(inner: InMemoryCatalog) -> Self {
        Self {
            inner,
            snapshots: AtomicUsize::new(0),
        }
    }

    pub(super) fn snapshot_reads(&self) -> usize {
        self.snapshots.load(Ordering::Relaxed)
    }
}

impl CatalogRepository for CountingCatalog {
    fn course(&self, name: &str) -> Result<Option<Course>, CatalogError> {
        self.inner.course(name)
    }

    fn all_courses(&self) -> Result<Vec<Course>, CatalogError> {
        self.snapshots.fetch_add(1, Ordering::Relaxed);
        self.inner.all_courses()
    }
}

pub(super) struct UnavailableCatalog;

impl CatalogRepository for UnavailableCatalog {
    fn course(&self, _name: &str) -> Result<Option<Course>, CatalogError> {
        Err(CatalogError::Unavailable("catalog offline".to_string()))
    }

    fn all_courses(&self) -> Result<Vec<Course>, CatalogError> {
        Err(CatalogError::Unavailable("catalog offline".to_string()))
    }
}

pub(super) struct UnavailableRecorder;

impl DecisionRecorder for UnavailableRecorder {
    fn record(&self, _decision: Decision) -> Result<RecordedDecision, RecorderError> {
        Err(RecorderError::Unavailable("decision store offline".to_string()))
    }

    fn fetch(&self, _id: &DecisionId) -> Result<Option<RecordedDecision>, RecorderError> {
        Err(RecorderError::Unavailable("decision store offline".to_string()))
    }
}

pub(super) fn admission_router_with_service(
    service: AdmissionService<InMemoryCatalog, MemoryRecorder>,
) -> axum::Router {
    admission_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
