//! Applicant-tracking core with legal-compliance screening.
//!
//! The crate ranks candidate resumes against a job description by embedding
//! similarity and drafts rejection feedback that is gated by a rule-based
//! prohibited-term screener before a human ever sees it. External language
//! services (generation, embeddings, document extraction) sit behind gateway
//! traits under [`workflows::recruiting`].

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
