use std::cmp::Ordering;

use chrono::Utc;
use tracing::warn;

use super::domain::{CandidateRanking, CandidateSubmission, RankedCandidate, SkippedCandidate};
use super::gateway::{EmbeddingGateway, GatewayError};

/// Cosine similarity between two vectors: dot(a, b) / (|a| * |b|), in [-1, 1].
/// Returns 0.0 when either vector has zero magnitude or the lengths differ, so
/// degenerate documents sink to the bottom of a ranking instead of producing
/// NaN.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    for (&x, &y) in a.iter().zip(b.iter()) {
        dot += f64::from(x) * f64::from(y);
        norm_a += f64::from(x) * f64::from(x);
        norm_b += f64::from(y) * f64::from(y);
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    (dot / (norm_a.sqrt() * norm_b.sqrt())) as f32
}

/// Embedding models are trained on flat text; collapse line breaks before
/// submission.
pub(crate) fn normalize_for_embedding(text: &str) -> String {
    text.replace(['\r', '\n'], " ")
}

#[derive(Debug, thiserror::Error)]
pub enum RankingError {
    /// Without a job-description vector no candidate can be scored, so this
    /// aborts the run. Per-candidate failures are skip-and-warn instead.
    #[error("failed to embed job description: {0}")]
    JobDescription(#[source] GatewayError),
}

/// Scores a candidate pool against one job description.
pub struct CandidateRanker<E> {
    embeddings: E,
}

impl<E: EmbeddingGateway> CandidateRanker<E> {
    pub fn new(embeddings: E) -> Self {
        Self { embeddings }
    }

    /// Embed the job description once, score every candidate against it, and
    /// return the pool sorted descending by score (stable on ties). Candidates
    /// whose embedding call fails are reported in `skipped` and the run
    /// continues.
    pub fn rank(
        &self,
        job_description: &str,
        candidates: &[CandidateSubmission],
    ) -> Result<CandidateRanking, RankingError> {
        let jd_vector = self
            .embeddings
            .embed(&normalize_for_embedding(job_description))
            .map_err(RankingError::JobDescription)?;

        let mut ranked = Vec::with_capacity(candidates.len());
        let mut skipped = Vec::new();

        for candidate in candidates {
            match self
                .embeddings
                .embed(&normalize_for_embedding(&candidate.resume_text))
            {
                Ok(embedding) => {
                    let score = cosine_similarity(&jd_vector, &embedding);
                    ranked.push(RankedCandidate {
                        name: candidate.name.clone(),
                        resume_text: candidate.resume_text.clone(),
                        embedding,
                        score,
                    });
                }
                Err(err) => {
                    warn!(candidate = %candidate.name, error = %err,
                        "skipping candidate after failed embedding call");
                    skipped.push(SkippedCandidate {
                        name: candidate.name.clone(),
                        reason: err.to_string(),
                    });
                }
            }
        }

        // sort_by is stable: ties keep submission order.
        ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

        Ok(CandidateRanking {
            job_description: job_description.to_string(),
            candidates: ranked,
            skipped,
            generated_at: Utc::now(),
        })
    }

    /// Single-pair fit score for the applicant-facing view.
    pub fn fit_score(&self, job_description: &str, resume_text: &str) -> Result<f32, GatewayError> {
        let jd_vector = self
            .embeddings
            .embed(&normalize_for_embedding(job_description))?;
        let resume_vector = self.embeddings.embed(&normalize_for_embedding(resume_text))?;
        Ok(cosine_similarity(&jd_vector, &resume_vector))
    }
}
