use std::sync::Arc;

use super::advisor::ResumeAdvisor;
use super::domain::{CandidateRanking, CandidateSubmission};
use super::feedback::{FeedbackDraft, FeedbackGenerator};
use super::gateway::{EmbeddingGateway, GatewayError, GenerationGateway};
use super::ranking::{CandidateRanker, RankingError};
use super::screening::{ComplianceScreener, ComplianceVerdict};

/// Facade composing the ranker, screener, feedback generator, and advisor.
///
/// The service holds only gateway handles and the static lexicon. Every call
/// carries its own job description and candidate pool and returns an owned
/// result, so independent sessions cannot share or leak ranking state.
/// Degenerate input is rejected before any external call is made.
pub struct RecruitingService<E, G> {
    ranker: CandidateRanker<Arc<E>>,
    screener: ComplianceScreener,
    generator: FeedbackGenerator<Arc<G>>,
    advisor: ResumeAdvisor<Arc<G>>,
}

impl<E, G> RecruitingService<E, G>
where
    E: EmbeddingGateway,
    G: GenerationGateway,
{
    pub fn new(embeddings: Arc<E>, generation: Arc<G>) -> Self {
        let screener = ComplianceScreener::default();
        Self {
            ranker: CandidateRanker::new(embeddings),
            generator: FeedbackGenerator::new(generation.clone(), screener.clone()),
            advisor: ResumeAdvisor::new(generation),
            screener,
        }
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.generator = self.generator.with_max_retries(max_retries);
        self
    }

    /// Rank a candidate pool against a job description. Candidates with blank
    /// resume text are dropped up front; at least one usable candidate and a
    /// non-blank job description are required before any embedding call.
    pub fn rank(
        &self,
        job_description: &str,
        candidates: &[CandidateSubmission],
    ) -> Result<CandidateRanking, RecruitingServiceError> {
        if job_description.trim().is_empty() {
            return Err(RecruitingServiceError::EmptyJobDescription);
        }

        let usable: Vec<CandidateSubmission> = candidates
            .iter()
            .filter(|candidate| !candidate.resume_text.trim().is_empty())
            .cloned()
            .collect();
        if usable.is_empty() {
            return Err(RecruitingServiceError::NoCandidates);
        }

        Ok(self.ranker.rank(job_description, &usable)?)
    }

    /// Single-pair fit score for the applicant-facing view.
    pub fn fit_score(
        &self,
        job_description: &str,
        resume_text: &str,
    ) -> Result<f32, RecruitingServiceError> {
        self.validate_pair(job_description, resume_text)?;
        Ok(self.ranker.fit_score(job_description, resume_text)?)
    }

    /// Screen arbitrary text against the prohibited-term lexicon.
    pub fn screen(&self, text: &str) -> ComplianceVerdict {
        self.screener.check(text)
    }

    /// Best-effort line-level redaction; see [`ComplianceScreener::sanitize`].
    pub fn sanitize(&self, text: &str) -> String {
        self.screener.sanitize(text)
    }

    /// Draft compliance-screened rejection feedback for recruiter review. The
    /// draft always carries its verdict; callers must surface non-compliant
    /// and failed drafts as needing human attention.
    pub fn recruiter_feedback(
        &self,
        job_description: &str,
        resume_text: &str,
    ) -> Result<FeedbackDraft, RecruitingServiceError> {
        self.validate_pair(job_description, resume_text)?;
        Ok(self.generator.recruiter_feedback(job_description, resume_text))
    }

    /// Unscreened improvement suggestions for the applicant's own use.
    pub fn applicant_feedback(
        &self,
        job_description: &str,
        resume_text: &str,
    ) -> Result<String, RecruitingServiceError> {
        self.validate_pair(job_description, resume_text)?;
        Ok(self.advisor.applicant_feedback(job_description, resume_text)?)
    }

    /// Rewrite draft aligned to the job description, for the applicant.
    pub fn rewrite_resume(
        &self,
        job_description: &str,
        resume_text: &str,
    ) -> Result<String, RecruitingServiceError> {
        self.validate_pair(job_description, resume_text)?;
        Ok(self.advisor.rewrite_resume(job_description, resume_text)?)
    }

    fn validate_pair(
        &self,
        job_description: &str,
        resume_text: &str,
    ) -> Result<(), RecruitingServiceError> {
        if job_description.trim().is_empty() {
            return Err(RecruitingServiceError::EmptyJobDescription);
        }
        if resume_text.trim().is_empty() {
            return Err(RecruitingServiceError::EmptyResume);
        }
        Ok(())
    }
}

/// Error raised by the recruiting facade.
#[derive(Debug, thiserror::Error)]
pub enum RecruitingServiceError {
    #[error("job description must not be blank")]
    EmptyJobDescription,
    #[error("resume text must not be blank")]
    EmptyResume,
    #[error("at least one candidate with resume text is required")]
    NoCandidates,
    #[error(transparent)]
    Ranking(#[from] RankingError),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}
