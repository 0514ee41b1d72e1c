//! Recruiting workflow: semantic candidate ranking plus compliance-screened
//! feedback drafting.
//!
//! The screener is a pure function of a static prohibited-term lexicon; the
//! feedback generator wraps it in a bounded regenerate-on-violation loop. All
//! external language services sit behind the gateway traits so the workflow can
//! be exercised hermetically.

pub mod advisor;
pub mod domain;
pub mod feedback;
pub mod gateway;
pub mod intake;
pub(crate) mod prompts;
pub mod ranking;
pub mod router;
pub mod screening;
pub mod service;

#[cfg(test)]
mod tests;

pub use advisor::ResumeAdvisor;
pub use domain::{
    CandidateRanking, CandidateSubmission, RankedCandidate, RankingEntryView, SkippedCandidate,
};
pub use feedback::{FeedbackDraft, FeedbackGenerator, FeedbackOutcome, DEFAULT_MAX_RETRIES};
pub use gateway::{
    CompletionRequest, EmbeddingGateway, GatewayError, GenerationGateway, OpenAiClient,
};
pub use intake::{
    intake_candidates, is_cleaning_error, DocumentCleaner, DocumentFormat, IntakeError,
    IntakeWarning, ResumeFile, TextExtractor, CLEANING_ERROR_MARKER,
};
pub use ranking::{cosine_similarity, CandidateRanker, RankingError};
pub use router::recruiting_router;
pub use screening::{ComplianceScreener, ComplianceVerdict, Severity, TermLexicon};
pub use service::{RecruitingService, RecruitingServiceError};
