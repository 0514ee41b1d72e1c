//! Resume document intake: format detection, the extraction contract, and the
//! LLM-backed cleaning pass that tags resume sections.

use tracing::warn;

use super::domain::CandidateSubmission;
use super::gateway::{CompletionRequest, GenerationGateway};
use super::prompts;

/// Resume file formats the pipeline accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
}

impl DocumentFormat {
    pub fn from_file_name(name: &str) -> Result<Self, IntakeError> {
        let extension = name
            .rsplit('.')
            .next()
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match extension.as_str() {
            "pdf" => Ok(Self::Pdf),
            "docx" => Ok(Self::Docx),
            _ => Err(IntakeError::UnsupportedFormat {
                file: name.to_string(),
                extension,
            }),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error("unsupported file format '{extension}' for {file} (expected pdf or docx)")]
    UnsupportedFormat { file: String, extension: String },
    #[error("failed to parse {file}: {detail}")]
    Parse { file: String, detail: String },
}

/// External text-extraction collaborator. Concrete PDF/DOCX parsing stays
/// outside this crate; implementations report corrupt input as
/// [`IntakeError::Parse`].
pub trait TextExtractor: Send + Sync {
    fn extract(
        &self,
        file_name: &str,
        bytes: &[u8],
        format: DocumentFormat,
    ) -> Result<String, IntakeError>;
}

/// A resume file awaiting intake.
#[derive(Debug, Clone)]
pub struct ResumeFile {
    pub file_name: String,
    pub candidate_name: String,
    pub bytes: Vec<u8>,
}

/// Per-file warning from a batch intake run.
#[derive(Debug, Clone, PartialEq)]
pub struct IntakeWarning {
    pub file_name: String,
    pub reason: String,
}

/// Batch intake with partial-failure semantics: a file that fails format
/// detection or extraction is skipped and reported, never aborts the batch.
pub fn intake_candidates<X: TextExtractor>(
    extractor: &X,
    files: &[ResumeFile],
) -> (Vec<CandidateSubmission>, Vec<IntakeWarning>) {
    let mut accepted = Vec::new();
    let mut warnings = Vec::new();

    for file in files {
        let outcome = DocumentFormat::from_file_name(&file.file_name)
            .and_then(|format| extractor.extract(&file.file_name, &file.bytes, format));

        match outcome {
            Ok(text) => accepted.push(CandidateSubmission {
                name: file.candidate_name.clone(),
                resume_text: text,
            }),
            Err(err) => {
                warn!(file = %file.file_name, error = %err, "skipping resume file");
                warnings.push(IntakeWarning {
                    file_name: file.file_name.clone(),
                    reason: err.to_string(),
                });
            }
        }
    }

    (accepted, warnings)
}

/// Prefix marking an in-band cleaning failure.
pub const CLEANING_ERROR_MARKER: &str = "[cleaning-error]";

/// LLM-backed resume cleaner applying the `[SUMMARY]`/`[SKILLS]`/
/// `[EXPERIENCE]`/`[EDUCATION]` section tags at temperature 0.
///
/// Transport failures are reported in-band: the returned string starts with
/// [`CLEANING_ERROR_MARKER`] rather than an `Err`. Callers must test the
/// result with [`is_cleaning_error`] before using it.
pub struct DocumentCleaner<G> {
    gateway: G,
}

impl<G: GenerationGateway> DocumentCleaner<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    pub fn clean(&self, raw_text: &str) -> String {
        let request = CompletionRequest {
            system_prompt: prompts::CLEANING_SYSTEM_PROMPT.to_string(),
            user_prompt: raw_text.to_string(),
            temperature: prompts::CLEANING_TEMPERATURE,
            max_tokens: prompts::MAX_OUTPUT_TOKENS,
        };

        match self.gateway.complete(&request) {
            Ok(text) => text,
            Err(err) => {
                warn!(error = %err, "resume cleaning failed");
                format!("{CLEANING_ERROR_MARKER} {err}")
            }
        }
    }
}

/// Whether a cleaned string is actually an in-band failure report.
pub fn is_cleaning_error(cleaned: &str) -> bool {
    cleaned.starts_with(CLEANING_ERROR_MARKER)
}
