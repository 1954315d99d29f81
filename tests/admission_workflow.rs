//! Integration specifications for the admission decision workflow.
//!
//! Scenarios run end-to-end through the public service facade and HTTP router
//! so intake validation, eligibility gates, recommendation ranking, and
//! decision recording are exercised without reaching into private modules.

mod common {
    use std::collections::BTreeMap;
    use std::sync::Arc;

    use admission_engine::workflows::admission::{
        AdmissionService, ApplicantSubmission, CsvCatalogImporter, InMemoryCatalog, MemoryRecorder,
    };

    pub(super) const CATALOG_CSV: &str = "\
NAME,REQUIRED_SUBJECTS,QUALIFY_EXAM,MIN_AVERAGE
BUSINESS,ENGLISH|MATHS,NONE,70
ENGINEERING,PHYSICS|CHEMISTRY|MATHS,CET,75
ARTS,ENGLISH,NONE,55
SCIENCE,PHYSICS|CHEMISTRY,NONE,58
";

    pub(super) fn catalog() -> InMemoryCatalog {
        CsvCatalogImporter::from_reader(CATALOG_CSV.as_bytes()).expect("catalog imports")
    }

    pub(super) fn marks(values: [(&str, u8); 6]) -> BTreeMap<String, u8> {
        values
            .into_iter()
            .map(|(subject, mark)| (subject.to_string(), mark))
            .collect()
    }

    pub(super) fn submission() -> ApplicantSubmission {
        ApplicantSubmission {
            name: "Ravi Kumar".to_string(),
            age: 19,
            gender: "male".to_string(),
            subject_marks: marks([
                ("ENGLISH", 70),
                ("PHYSICS", 80),
                ("CHEMISTRY", 90),
                ("MATHS", 60),
                ("BIOLOGY", 75),
                ("COMPUTER SCIENCE", 65),
            ]),
            qualifying_exam_results: None,
            desired_course: "business".to_string(),
        }
    }

    pub(super) fn build_service() -> (
        AdmissionService<InMemoryCatalog, MemoryRecorder>,
        Arc<MemoryRecorder>,
    ) {
        let recorder = Arc::new(MemoryRecorder::default());
        let service = AdmissionService::new(Arc::new(catalog()), recorder.clone());
        (service, recorder)
    }
}

use std::sync::Arc;

use admission_engine::workflows::admission::{
    admission_router, AdmissionServiceError, DecisionRecorder, ValidationError,
};
use axum::http::StatusCode;
use serde_json::Value;
use tower::ServiceExt;

#[test]
fn admits_qualified_applicant_and_records_the_decision() {
    let (service, recorder) = common::build_service();

    let recorded = service
        .decide(common::submission())
        .expect("decision succeeds");

    assert!(recorded.decision.verdict.is_admitted());
    assert_eq!(recorded.decision.applicant_name, "RAVI KUMAR");
    assert_eq!(recorded.decision.desired_course, "BUSINESS");
    assert_eq!(recorded.decision.student_average, 73);

    let stored = recorder
        .fetch(&recorded.decision_id)
        .expect("fetch succeeds")
        .expect("decision persisted");
    assert_eq!(stored.decision.reason_code(), "ADMITTED");
}

#[test]
fn rejected_applicant_receives_ranked_alternatives() {
    let (service, _) = common::build_service();

    let mut submission = common::submission();
    submission.subject_marks = common::marks([
        ("ENGLISH", 60),
        ("PHYSICS", 60),
        ("CHEMISTRY", 60),
        ("MATHS", 60),
        ("BIOLOGY", 60),
        ("COMPUTER SCIENCE", 60),
    ]);
    submission.desired_course = "ENGINEERING".to_string();
    submission.qualifying_exam_results = Some([("CET".to_string(), true)].into_iter().collect());

    let recorded = service.decide(submission).expect("decision succeeds");

    assert_eq!(recorded.decision.reason_code(), "BELOW_THRESHOLD");
    let names: Vec<_> = recorded
        .decision
        .recommendations
        .iter()
        .map(|candidate| candidate.course_name.as_str())
        .collect();
    assert_eq!(names, vec!["ARTS", "SCIENCE"]);
}

#[test]
fn invalid_submission_never_reaches_the_recorder() {
    let (service, recorder) = common::build_service();

    let mut submission = common::submission();
    submission.age = 30;

    match service.decide(submission) {
        Err(AdmissionServiceError::Validation(ValidationError::InvalidAge { .. })) => {}
        other => panic!("expected validation error, got {other:?}"),
    }

    let probe = admission_engine::workflows::admission::DecisionId("dec-000001".to_string());
    assert!(recorder
        .fetch(&probe)
        .expect("fetch succeeds")
        .is_none());
}

#[tokio::test]
async fn http_round_trip_decides_and_reads_back() {
    let (service, _) = common::build_service();
    let router = admission_router(Arc::new(service));

    let response = router
        .clone()
        .oneshot(
            axum::http::Request::post("/api/v1/admissions/decisions")
                .header(axum::http::header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(
                    serde_json::to_vec(&common::submission()).unwrap(),
                ))
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    let payload: Value = serde_json::from_slice(&body).expect("json payload");

    let decision_id = payload
        .get("decision_id")
        .and_then(Value::as_str)
        .expect("decision id present")
        .to_string();
    assert_eq!(payload.get("status"), Some(&Value::from("admitted")));

    let response = router
        .oneshot(
            axum::http::Request::get(format!("/api/v1/admissions/decisions/{decision_id}"))
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
}
