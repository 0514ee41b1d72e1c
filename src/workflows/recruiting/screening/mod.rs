//! Rule-based compliance screening for generated recruiter feedback.

mod lexicon;

pub use lexicon::TermLexicon;

use std::collections::BTreeSet;

use serde::Serialize;

/// Severity tier of a verdict, driving the recommended human action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    None,
    Low,
    High,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::None => "none",
            Severity::Low => "low",
            Severity::High => "high",
        }
    }

    fn recommendation(&self) -> &'static str {
        match self {
            Severity::None => RECOMMENDATION_PASS,
            Severity::Low => RECOMMENDATION_REVIEW,
            Severity::High => RECOMMENDATION_REGENERATE,
        }
    }
}

pub const RECOMMENDATION_PASS: &str = "Feedback passed compliance check.";
pub const RECOMMENDATION_REVIEW: &str =
    "Review feedback for soft skills language. Consider focusing only on technical qualifications.";
pub const RECOMMENDATION_REGENERATE: &str = "CRITICAL: Feedback contains prohibited discriminatory \
language. Do not send. Regenerate with stricter constraints.";

/// Marker substituted for redacted lines by [`ComplianceScreener::sanitize`].
pub const REDACTED_LINE_MARKER: &str = "<!-- line removed for compliance -->";

/// Outcome of one screening pass. A pure function of the input text and the
/// static lexicon, recomputed on every call and never cached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComplianceVerdict {
    pub compliant: bool,
    /// Matched prohibited terms, lower-cased and deduplicated.
    pub violations: BTreeSet<String>,
    pub severity: Severity,
    pub recommendation: &'static str,
}

/// Screens text for prohibited protected-characteristic and soft-skill
/// language. Performs no I/O.
#[derive(Debug, Clone, Default)]
pub struct ComplianceScreener {
    lexicon: TermLexicon,
}

impl ComplianceScreener {
    pub fn new(lexicon: TermLexicon) -> Self {
        Self { lexicon }
    }

    pub fn check(&self, text: &str) -> ComplianceVerdict {
        let lower = text.to_lowercase();

        let mut violations = BTreeSet::new();
        for term in self.lexicon.terms() {
            if lower.contains(term) && !self.lexicon.is_excused(term, &lower) {
                violations.insert(term.to_string());
            }
        }

        let severity = if violations.is_empty() {
            Severity::None
        } else if violations
            .iter()
            .any(|term| self.lexicon.is_high_severity(term))
        {
            Severity::High
        } else {
            Severity::Low
        };

        ComplianceVerdict {
            compliant: violations.is_empty(),
            violations,
            severity,
            recommendation: severity.recommendation(),
        }
    }

    /// Best-effort line-level redaction: any line containing a prohibited term
    /// (allow-list ignored) is replaced with [`REDACTED_LINE_MARKER`].
    /// Heuristic only: the output still needs a full [`check`](Self::check)
    /// and human review before it goes anywhere.
    pub fn sanitize(&self, text: &str) -> String {
        text.split('\n')
            .map(|line| {
                if self.lexicon.matches_line(&line.to_lowercase()) {
                    REDACTED_LINE_MARKER
                } else {
                    line
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
