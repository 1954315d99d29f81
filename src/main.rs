use admission_engine::config::AppConfig;
use admission_engine::error::AppError;
use admission_engine::telemetry;
use admission_engine::workflows::admission::{
    admission_router, AdmissionService, ApplicantSubmission, CsvCatalogImporter, DecisionView,
    InMemoryCatalog, MemoryRecorder,
};
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use clap::{Args, Parser, Subcommand};
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::json;
use std::fs::File;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
struct AppState {
    readiness: Arc<AtomicBool>,
    metrics: PrometheusHandle,
}

#[derive(Parser, Debug)]
#[command(
    name = "Admission Engine",
    about = "Decide admission eligibility and recommend alternative courses",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Decide one applicant submission from the command line
    Decide(DecideArgs),
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
    /// Course catalog CSV (falls back to APP_CATALOG_PATH, then the built-in catalog)
    #[arg(long)]
    catalog: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct DecideArgs {
    /// Applicant submission as a JSON file
    #[arg(long)]
    applicant: PathBuf,
    /// Course catalog CSV (defaults to the built-in catalog)
    #[arg(long)]
    catalog: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => run_server(args).await,
        Command::Decide(args) => run_decide(args),
    }
}

fn load_catalog(path: Option<PathBuf>) -> Result<InMemoryCatalog, AppError> {
    match path {
        Some(path) => Ok(CsvCatalogImporter::from_path(path)?),
        None => Ok(InMemoryCatalog::standard()),
    }
}

async fn run_server(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let catalog_path = args.catalog.take().or_else(|| config.catalog_path.clone());
    let catalog = Arc::new(load_catalog(catalog_path)?);
    info!(courses = catalog.len(), "course catalog loaded");

    let recorder = Arc::new(MemoryRecorder::default());
    let service = Arc::new(AdmissionService::new(catalog, recorder));

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let state = AppState {
        readiness: readiness_flag.clone(),
        metrics: prometheus_handle,
    };

    let app = Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .with_state(state)
        .merge(admission_router(service))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "admission engine ready");

    axum::serve(listener, app).await?;
    Ok(())
}

fn run_decide(args: DecideArgs) -> Result<(), AppError> {
    let DecideArgs { applicant, catalog } = args;

    let file = File::open(applicant)?;
    let submission: ApplicantSubmission = serde_json::from_reader(file)?;

    let catalog = Arc::new(load_catalog(catalog)?);
    let recorder = Arc::new(MemoryRecorder::default());
    let service = AdmissionService::new(catalog, recorder);

    let recorded = service.decide(submission)?;
    render_decision(&recorded.view());

    Ok(())
}

fn render_decision(view: &DecisionView) {
    println!("Admission decision {}", view.decision_id.0);
    println!(
        "Applicant {} applied for {}",
        view.applicant_name, view.desired_course
    );
    println!(
        "Outcome: {} ({}) - {}",
        view.status, view.reason_code, view.rationale
    );
    println!("Average marks: {}", view.student_average);

    if view.recommendations.is_empty() {
        println!("Alternative courses: none");
    } else {
        println!("Alternative courses");
        for candidate in &view.recommendations {
            let exam_note = match &candidate.qualifying_exam {
                Some(exam) => format!(", requires {exam}"),
                None => String::new(),
            };
            println!(
                "- {} (minimum average {}{})",
                candidate.course_name, candidate.minimum_average, exam_note
            );
        }
    }
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
