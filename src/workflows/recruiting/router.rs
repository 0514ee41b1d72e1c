use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::{CandidateRanking, CandidateSubmission, RankingEntryView, SkippedCandidate};
use super::feedback::FeedbackDraft;
use super::gateway::{EmbeddingGateway, GenerationGateway};
use super::screening::ComplianceVerdict;
use super::service::{RecruitingService, RecruitingServiceError};

/// Router builder exposing the recruiting workflow over HTTP. Generated
/// feedback is only ever returned alongside its compliance verdict and a
/// review flag; there is no send or export endpoint.
pub fn recruiting_router<E, G>(service: Arc<RecruitingService<E, G>>) -> Router
where
    E: EmbeddingGateway + 'static,
    G: GenerationGateway + 'static,
{
    Router::new()
        .route("/api/v1/recruiting/rankings", post(rank_handler::<E, G>))
        .route("/api/v1/recruiting/fit-score", post(fit_score_handler::<E, G>))
        .route("/api/v1/recruiting/screenings", post(screen_handler::<E, G>))
        .route(
            "/api/v1/recruiting/feedback/recruiter",
            post(recruiter_feedback_handler::<E, G>),
        )
        .route(
            "/api/v1/recruiting/feedback/applicant",
            post(applicant_feedback_handler::<E, G>),
        )
        .route("/api/v1/recruiting/rewrites", post(rewrite_handler::<E, G>))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct RankRequest {
    pub job_description: String,
    pub candidates: Vec<CandidateSubmission>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PairRequest {
    pub job_description: String,
    pub resume_text: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ScreenRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct RankingResponse {
    pub generated_at: DateTime<Utc>,
    pub entries: Vec<RankingEntryView>,
    pub skipped: Vec<SkippedCandidate>,
}

impl From<CandidateRanking> for RankingResponse {
    fn from(ranking: CandidateRanking) -> Self {
        Self {
            generated_at: ranking.generated_at,
            entries: ranking.entries(),
            skipped: ranking.skipped,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ScreenResponse {
    pub verdict: ComplianceVerdict,
    pub sanitized: String,
}

/// The draft plus the operator contract: non-compliant or failed drafts are
/// flagged for review, and nothing is auto-sent.
#[derive(Debug, Serialize)]
pub(crate) struct FeedbackResponse {
    #[serde(flatten)]
    pub draft: FeedbackDraft,
    pub requires_human_review: bool,
}

pub(crate) async fn rank_handler<E, G>(
    State(service): State<Arc<RecruitingService<E, G>>>,
    Json(request): Json<RankRequest>,
) -> Response
where
    E: EmbeddingGateway + 'static,
    G: GenerationGateway + 'static,
{
    run_blocking(move || {
        service
            .rank(&request.job_description, &request.candidates)
            .map(|ranking| Json(RankingResponse::from(ranking)).into_response())
    })
    .await
}

pub(crate) async fn fit_score_handler<E, G>(
    State(service): State<Arc<RecruitingService<E, G>>>,
    Json(request): Json<PairRequest>,
) -> Response
where
    E: EmbeddingGateway + 'static,
    G: GenerationGateway + 'static,
{
    run_blocking(move || {
        service
            .fit_score(&request.job_description, &request.resume_text)
            .map(|score| {
                Json(json!({
                    "score": score,
                    "score_percent": score * 100.0,
                }))
                .into_response()
            })
    })
    .await
}

pub(crate) async fn screen_handler<E, G>(
    State(service): State<Arc<RecruitingService<E, G>>>,
    Json(request): Json<ScreenRequest>,
) -> Response
where
    E: EmbeddingGateway + 'static,
    G: GenerationGateway + 'static,
{
    let verdict = service.screen(&request.text);
    let sanitized = service.sanitize(&request.text);
    Json(ScreenResponse { verdict, sanitized }).into_response()
}

pub(crate) async fn recruiter_feedback_handler<E, G>(
    State(service): State<Arc<RecruitingService<E, G>>>,
    Json(request): Json<PairRequest>,
) -> Response
where
    E: EmbeddingGateway + 'static,
    G: GenerationGateway + 'static,
{
    run_blocking(move || {
        service
            .recruiter_feedback(&request.job_description, &request.resume_text)
            .map(|draft| {
                let requires_human_review = draft.requires_human_review();
                Json(FeedbackResponse {
                    draft,
                    requires_human_review,
                })
                .into_response()
            })
    })
    .await
}

pub(crate) async fn applicant_feedback_handler<E, G>(
    State(service): State<Arc<RecruitingService<E, G>>>,
    Json(request): Json<PairRequest>,
) -> Response
where
    E: EmbeddingGateway + 'static,
    G: GenerationGateway + 'static,
{
    run_blocking(move || {
        service
            .applicant_feedback(&request.job_description, &request.resume_text)
            .map(|feedback| Json(json!({ "feedback": feedback })).into_response())
    })
    .await
}

pub(crate) async fn rewrite_handler<E, G>(
    State(service): State<Arc<RecruitingService<E, G>>>,
    Json(request): Json<PairRequest>,
) -> Response
where
    E: EmbeddingGateway + 'static,
    G: GenerationGateway + 'static,
{
    run_blocking(move || {
        service
            .rewrite_resume(&request.job_description, &request.resume_text)
            .map(|rewrite| Json(json!({ "rewrite": rewrite })).into_response())
    })
    .await
}

/// Gateway calls block on their own runtime, so service work runs on the
/// blocking pool rather than a worker thread.
async fn run_blocking<F>(work: F) -> Response
where
    F: FnOnce() -> Result<Response, RecruitingServiceError> + Send + 'static,
{
    match tokio::task::spawn_blocking(work).await {
        Ok(Ok(response)) => response,
        Ok(Err(err)) => service_error_response(err),
        Err(join_err) => {
            let payload = json!({ "error": format!("request task failed: {join_err}") });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}

fn service_error_response(err: RecruitingServiceError) -> Response {
    let status = match &err {
        RecruitingServiceError::EmptyJobDescription
        | RecruitingServiceError::EmptyResume
        | RecruitingServiceError::NoCandidates => StatusCode::UNPROCESSABLE_ENTITY,
        RecruitingServiceError::Ranking(_) | RecruitingServiceError::Gateway(_) => {
            StatusCode::BAD_GATEWAY
        }
    };

    let payload = json!({ "error": err.to_string() });
    (status, Json(payload)).into_response()
}
