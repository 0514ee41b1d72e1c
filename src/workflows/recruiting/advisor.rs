use super::gateway::{CompletionRequest, GatewayError, GenerationGateway};
use super::prompts;

/// Self-help wrappers for applicants: improvement feedback and a resume
/// rewrite draft. No compliance screening and no retries; this output is
/// coaching for the candidate, not a hiring-decision artifact, and it must
/// never be used for rejection communications.
pub struct ResumeAdvisor<G> {
    gateway: G,
}

impl<G: GenerationGateway> ResumeAdvisor<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    /// Actionable improvement suggestions for the applicant's own use.
    pub fn applicant_feedback(
        &self,
        job_description: &str,
        resume_text: &str,
    ) -> Result<String, GatewayError> {
        self.gateway.complete(&CompletionRequest {
            system_prompt: prompts::APPLICANT_SYSTEM_PROMPT.to_string(),
            user_prompt: prompts::applicant_user_prompt(job_description, resume_text),
            temperature: prompts::APPLICANT_FEEDBACK_TEMPERATURE,
            max_tokens: prompts::MAX_OUTPUT_TOKENS,
        })
    }

    /// Rewrite the resume for better alignment while staying truthful.
    pub fn rewrite_resume(
        &self,
        job_description: &str,
        resume_text: &str,
    ) -> Result<String, GatewayError> {
        self.gateway.complete(&CompletionRequest {
            system_prompt: prompts::REWRITE_SYSTEM_PROMPT.to_string(),
            user_prompt: prompts::rewrite_user_prompt(job_description, resume_text),
            temperature: prompts::REWRITE_TEMPERATURE,
            max_tokens: prompts::MAX_OUTPUT_TOKENS,
        })
    }
}
