use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use super::gateway::{CompletionRequest, GenerationGateway};
use super::prompts;
use super::screening::{ComplianceScreener, ComplianceVerdict};

/// Default number of regeneration attempts after the first draft.
pub const DEFAULT_MAX_RETRIES: u32 = 2;

/// Terminal state of one feedback-generation invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum FeedbackOutcome {
    /// Draft passed screening. The verdict is the passing check of exactly
    /// this text.
    Accepted {
        text: String,
        verdict: ComplianceVerdict,
    },
    /// Retries exhausted. The last draft and its failing verdict are surfaced
    /// so a human can correct it; nothing is silently dropped.
    Exhausted {
        text: String,
        verdict: ComplianceVerdict,
    },
    /// The generation call itself failed. Transport failures are terminal and
    /// never retried; only compliance failures drive the retry loop.
    TransportFailed { error: String },
}

/// One invocation's result. A new draft is a new value; nothing mutates it
/// after creation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedbackDraft {
    pub outcome: FeedbackOutcome,
    /// Generation calls actually made; never exceeds max retries + 1.
    pub attempts_used: u32,
    pub generated_at: DateTime<Utc>,
}

impl FeedbackDraft {
    pub fn text(&self) -> Option<&str> {
        match &self.outcome {
            FeedbackOutcome::Accepted { text, .. } | FeedbackOutcome::Exhausted { text, .. } => {
                Some(text)
            }
            FeedbackOutcome::TransportFailed { .. } => None,
        }
    }

    pub fn verdict(&self) -> Option<&ComplianceVerdict> {
        match &self.outcome {
            FeedbackOutcome::Accepted { verdict, .. }
            | FeedbackOutcome::Exhausted { verdict, .. } => Some(verdict),
            FeedbackOutcome::TransportFailed { .. } => None,
        }
    }

    pub fn is_compliant(&self) -> bool {
        matches!(self.outcome, FeedbackOutcome::Accepted { .. })
    }

    /// Anything short of a clean acceptance needs a human decision before the
    /// draft moves anywhere.
    pub fn requires_human_review(&self) -> bool {
        !self.is_compliant()
    }

    pub fn terminal_error(&self) -> Option<&str> {
        match &self.outcome {
            FeedbackOutcome::TransportFailed { error } => Some(error),
            _ => None,
        }
    }
}

/// Orchestrates prompt construction, generation, screening, and the bounded
/// regenerate-on-violation loop. Attempts are strictly sequential: each retry
/// prompt depends on the violations of the attempt before it.
pub struct FeedbackGenerator<G> {
    gateway: G,
    screener: ComplianceScreener,
    max_retries: u32,
}

impl<G: GenerationGateway> FeedbackGenerator<G> {
    pub fn new(gateway: G, screener: ComplianceScreener) -> Self {
        Self {
            gateway,
            screener,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Draft a rejection email for recruiter review. Non-compliant drafts are
    /// regenerated with a corrective clause naming the exact violating terms,
    /// accumulating across retries, until the draft passes or attempts run
    /// out.
    pub fn recruiter_feedback(&self, job_description: &str, resume_text: &str) -> FeedbackDraft {
        let mut system_prompt = prompts::RECRUITER_SYSTEM_PROMPT.to_string();
        let user_prompt = prompts::recruiter_user_prompt(job_description, resume_text);

        let mut attempts = 0u32;
        loop {
            attempts += 1;
            let request = CompletionRequest {
                system_prompt: system_prompt.clone(),
                user_prompt: user_prompt.clone(),
                temperature: prompts::RECRUITER_FEEDBACK_TEMPERATURE,
                max_tokens: prompts::MAX_OUTPUT_TOKENS,
            };

            let text = match self.gateway.complete(&request) {
                Ok(text) => text,
                Err(err) => {
                    warn!(attempt = attempts, error = %err,
                        "recruiter feedback generation failed");
                    return FeedbackDraft {
                        outcome: FeedbackOutcome::TransportFailed {
                            error: err.to_string(),
                        },
                        attempts_used: attempts,
                        generated_at: Utc::now(),
                    };
                }
            };

            let verdict = self.screener.check(&text);
            if verdict.compliant {
                info!(attempt = attempts, "recruiter feedback draft accepted");
                return FeedbackDraft {
                    outcome: FeedbackOutcome::Accepted { text, verdict },
                    attempts_used: attempts,
                    generated_at: Utc::now(),
                };
            }

            if attempts > self.max_retries {
                warn!(
                    attempts,
                    severity = verdict.severity.label(),
                    "retries exhausted; draft needs human correction"
                );
                return FeedbackDraft {
                    outcome: FeedbackOutcome::Exhausted { text, verdict },
                    attempts_used: attempts,
                    generated_at: Utc::now(),
                };
            }

            info!(attempt = attempts, violations = ?verdict.violations,
                "draft failed compliance screen; regenerating");
            system_prompt.push_str(&prompts::corrective_clause(&verdict.violations));
        }
    }
}
