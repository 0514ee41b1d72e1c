use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Candidate material accepted into a ranking run. Produced by document intake
/// (or supplied directly) after extraction and cleaning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateSubmission {
    pub name: String,
    pub resume_text: String,
}

/// Candidate scored against the active job description. The embedding is
/// computed once per run; the score is cosine similarity in [-1, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedCandidate {
    pub name: String,
    pub resume_text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub embedding: Vec<f32>,
    pub score: f32,
}

impl RankedCandidate {
    /// Fit score expressed as a percentage for display.
    pub fn score_percent(&self) -> f32 {
        self.score * 100.0
    }
}

/// Candidate left out of a ranking run after a failed embedding call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedCandidate {
    pub name: String,
    pub reason: String,
}

/// Result of one ranking run: descending by score, stable on ties so equal
/// scores keep their original submission order. Owned by the request that
/// produced it and never shared across sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateRanking {
    pub job_description: String,
    pub candidates: Vec<RankedCandidate>,
    pub skipped: Vec<SkippedCandidate>,
    pub generated_at: DateTime<Utc>,
}

impl CandidateRanking {
    /// Leaderboard view without resume bodies or raw vectors.
    pub fn entries(&self) -> Vec<RankingEntryView> {
        self.candidates
            .iter()
            .enumerate()
            .map(|(index, candidate)| RankingEntryView {
                position: index + 1,
                name: candidate.name.clone(),
                score: candidate.score,
                score_percent: candidate.score_percent(),
            })
            .collect()
    }
}

/// Display row for API responses and the CLI table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingEntryView {
    pub position: usize,
    pub name: String,
    pub score: f32,
    pub score_percent: f32,
}
