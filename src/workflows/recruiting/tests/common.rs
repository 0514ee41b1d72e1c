use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::workflows::recruiting::domain::CandidateSubmission;
use crate::workflows::recruiting::gateway::{
    CompletionRequest, EmbeddingGateway, GatewayError, GenerationGateway,
};
use crate::workflows::recruiting::service::RecruitingService;

pub(super) const JOB_DESCRIPTION: &str =
    "CFO with CPA certification and corporate finance leadership";

/// Rejection email free of prohibited terms. Wording matters: the screener
/// matches raw substrings, so even "the" (contains "he") would flag it.
pub(super) const COMPLIANT_EMAIL: &str = "Thank you for applying. Candidacy requires AWS \
Solutions Architect certification and 5 years of Kubernetes operations. Best regards, Recruiting.";

/// Draft violating only low-severity personal-characteristic terms.
pub(super) const SOFT_SKILL_DRAFT: &str = "We want a team player with more enthusiasm.";

/// Draft violating high-severity protected-trait terms.
pub(super) const PROTECTED_TRAIT_DRAFT: &str = "Your age and family plans were considered.";

pub(super) fn candidate(name: &str, resume_text: &str) -> CandidateSubmission {
    CandidateSubmission {
        name: name.to_string(),
        resume_text: resume_text.to_string(),
    }
}

/// Three candidates whose keyword vectors rank strong, partial, unrelated
/// against [`JOB_DESCRIPTION`].
pub(super) fn finance_pool() -> Vec<CandidateSubmission> {
    vec![
        candidate("Avery", "CPA with corporate finance and audit background"),
        candidate("Blake", "Kubernetes platform operations and Go tooling"),
        candidate("Casey", "CPA bookkeeping services"),
    ]
}

pub(super) fn build_service<E, G>(
    embeddings: Arc<E>,
    generation: Arc<G>,
) -> RecruitingService<E, G>
where
    E: EmbeddingGateway,
    G: GenerationGateway,
{
    RecruitingService::new(embeddings, generation)
}

/// Deterministic embeddings: one dimension per keyword, valued by occurrence
/// count in the lower-cased text.
const KEYWORDS: [&str; 4] = ["cpa", "finance", "kubernetes", "graduate"];

#[derive(Default)]
pub(super) struct KeywordEmbeddings {
    calls: AtomicU32,
}

impl KeywordEmbeddings {
    pub(super) fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

impl EmbeddingGateway for KeywordEmbeddings {
    fn embed(&self, text: &str) -> Result<Vec<f32>, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let lower = text.to_lowercase();
        Ok(KEYWORDS
            .iter()
            .map(|keyword| lower.matches(keyword).count() as f32)
            .collect())
    }
}

/// Fails for any text containing "unreadable"; otherwise delegates to the
/// keyword vectors.
#[derive(Default)]
pub(super) struct FlakyEmbeddings {
    inner: KeywordEmbeddings,
}

impl EmbeddingGateway for FlakyEmbeddings {
    fn embed(&self, text: &str) -> Result<Vec<f32>, GatewayError> {
        if text.contains("unreadable") {
            return Err(GatewayError::Transport("document rejected".to_string()));
        }
        self.inner.embed(text)
    }
}

#[derive(Default)]
pub(super) struct FailingEmbeddings {
    calls: AtomicU32,
}

impl FailingEmbeddings {
    pub(super) fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

impl EmbeddingGateway for FailingEmbeddings {
    fn embed(&self, _text: &str) -> Result<Vec<f32>, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(GatewayError::Transport("embedding service offline".to_string()))
    }
}

/// Records every submitted text and returns a unit vector.
#[derive(Default)]
pub(super) struct RecordingEmbeddings {
    texts: Mutex<Vec<String>>,
}

impl RecordingEmbeddings {
    pub(super) fn texts(&self) -> Vec<String> {
        self.texts.lock().expect("embeddings mutex poisoned").clone()
    }
}

impl EmbeddingGateway for RecordingEmbeddings {
    fn embed(&self, text: &str) -> Result<Vec<f32>, GatewayError> {
        self.texts
            .lock()
            .expect("embeddings mutex poisoned")
            .push(text.to_string());
        Ok(vec![1.0])
    }
}

/// Replays canned completions in order; the final response repeats once the
/// script runs out, so unbounded retry loops stay observable.
pub(super) struct ScriptedGenerator {
    responses: Mutex<VecDeque<String>>,
    calls: AtomicU32,
}

impl ScriptedGenerator {
    pub(super) fn new(responses: &[&str]) -> Self {
        assert!(!responses.is_empty(), "script needs at least one response");
        Self {
            responses: Mutex::new(responses.iter().map(|s| s.to_string()).collect()),
            calls: AtomicU32::new(0),
        }
    }

    pub(super) fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

impl GenerationGateway for ScriptedGenerator {
    fn complete(&self, _request: &CompletionRequest) -> Result<String, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut queue = self.responses.lock().expect("script mutex poisoned");
        if queue.len() > 1 {
            Ok(queue.pop_front().expect("non-empty script"))
        } else {
            Ok(queue.front().cloned().expect("non-empty script"))
        }
    }
}

/// Scripted generator that also captures each request for prompt assertions.
pub(super) struct RecordingGenerator {
    inner: ScriptedGenerator,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl RecordingGenerator {
    pub(super) fn new(responses: &[&str]) -> Self {
        Self {
            inner: ScriptedGenerator::new(responses),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(super) fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().expect("request mutex poisoned").clone()
    }
}

impl GenerationGateway for RecordingGenerator {
    fn complete(&self, request: &CompletionRequest) -> Result<String, GatewayError> {
        self.requests
            .lock()
            .expect("request mutex poisoned")
            .push(request.clone());
        self.inner.complete(request)
    }
}

#[derive(Default)]
pub(super) struct FailingGenerator {
    calls: AtomicU32,
}

impl FailingGenerator {
    pub(super) fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

impl GenerationGateway for FailingGenerator {
    fn complete(&self, _request: &CompletionRequest) -> Result<String, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(GatewayError::Transport("completion service offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
