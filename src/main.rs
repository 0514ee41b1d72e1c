use std::io::Read;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use clap::{Args, Parser, Subcommand};
use compliant_ats::config::AppConfig;
use compliant_ats::error::AppError;
use compliant_ats::telemetry;
use compliant_ats::workflows::recruiting::{
    recruiting_router, CandidateSubmission, OpenAiClient, RecruitingService,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

#[derive(Clone)]
struct AppState {
    readiness: Arc<AtomicBool>,
    metrics: PrometheusHandle,
}

#[derive(Parser, Debug)]
#[command(
    name = "Compliant ATS",
    about = "Rank candidates and draft compliance-screened feedback from the command line",
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
    /// Rank a CSV roster of candidates against a job description
    Rank(RankArgs),
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Args, Debug)]
struct RankArgs {
    /// Path to a UTF-8 job description file
    #[arg(long)]
    job_description: PathBuf,
    /// CSV roster with `name,resume` columns
    #[arg(long)]
    candidates: PathBuf,
    /// Print only the first N rows
    #[arg(long)]
    top: Option<usize>,
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
        Command::Rank(args) => {
            // The gateway blocks on its own runtime; keep it off async workers.
            tokio::task::spawn_blocking(move || run_rank(args)).await?
        }
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

    let client = Arc::new(OpenAiClient::from_config(&config.openai)?);
    let service = Arc::new(RecruitingService::new(client.clone(), client));

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
        .merge(recruiting_router(service))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "compliant ATS service ready");

    axum::serve(listener, app).await?;
    Ok(())
}

#[derive(Debug, Deserialize)]
struct RosterRow {
    name: String,
    resume: String,
}

fn read_roster<R: Read>(reader: R) -> Result<Vec<CandidateSubmission>, AppError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut candidates = Vec::new();
    for row in csv_reader.deserialize::<RosterRow>() {
        let row = row?;
        candidates.push(CandidateSubmission {
            name: row.name,
            resume_text: row.resume,
        });
    }
    Ok(candidates)
}

fn run_rank(args: RankArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry).ok();

    let job_description = std::fs::read_to_string(&args.job_description)?;
    let roster = std::fs::File::open(&args.candidates)?;
    let candidates = read_roster(roster)?;

    let client = Arc::new(OpenAiClient::from_config(&config.openai)?);
    let service = RecruitingService::new(client.clone(), client);
    let ranking = service.rank(&job_description, &candidates)?;

    println!("Candidate ranking ({} scored)", ranking.candidates.len());
    let limit = args.top.unwrap_or(usize::MAX);
    for entry in ranking.entries().into_iter().take(limit) {
        println!(
            "{:>3}. {:<30} fit {:>6.2}%",
            entry.position, entry.name, entry.score_percent
        );
    }

    if !ranking.skipped.is_empty() {
        println!("\nSkipped candidates");
        for skipped in &ranking.skipped {
            println!("- {}: {}", skipped.name, skipped.reason);
        }
    }

    Ok(())
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
