//! Free-text reply interpretation.
//!
//! The remote classifier answers in unstructured prose such as
//! `"Confidence: 92.3% sexual"`. This module turns that text into a
//! structured [`Verdict`], or recognizes it as a service-reported
//! failure. The parsing is heuristic by construction and isolated behind
//! this one interface, so a future upstream returning structured data
//! could replace it without touching the workflow.

use crate::verdict::{Label, Verdict};
use regex::Regex;

/// Literal marker a reply uses to report a service-level failure. The
/// marker is case-sensitive; the rest of the reply handling is not.
const SERVICE_ERROR_MARKER: &str = "Error:";

/// Confidence assumed when a reply carries no recognizable confidence
/// figure: maximally uncertain, not an error.
pub const DEFAULT_CONFIDENCE_PERCENT: f64 = 50.0;

/// What a reply text turned out to be.
#[derive(Debug, Clone, PartialEq)]
pub enum Interpretation {
    /// The reply parsed into a structured verdict.
    Classified(Verdict),
    /// The reply reported a service-level failure. The contained text is
    /// the full reply, surfaced verbatim to the user.
    ServiceError(String),
}

/// Parses raw classifier replies into structured verdicts.
///
/// The confidence pattern is compiled once per interpreter; construction
/// is cheap enough to do per workflow.
pub struct ResponseInterpreter {
    confidence: Regex,
}

impl Default for ResponseInterpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseInterpreter {
    /// Creates an interpreter with the confidence pattern compiled.
    pub fn new() -> Self {
        // Matches "Confidence:" followed by a decimal number, as in
        // "Confidence: 92.3%". The trailing percent sign is not part of
        // the capture.
        let confidence =
            Regex::new(r"(?i)Confidence:\s*(\d+(?:\.\d+)?)").expect("Invalid confidence pattern");
        Self { confidence }
    }

    /// Interprets a raw reply.
    ///
    /// A reply beginning with the literal `"Error:"` marker is a
    /// service-reported failure and is never classified. Everything else
    /// yields a verdict, however little the text resembles one; absent
    /// signals fall back to the safe label and an even-odds confidence.
    pub fn interpret(&self, raw: &str) -> Interpretation {
        if raw.starts_with(SERVICE_ERROR_MARKER) {
            return Interpretation::ServiceError(raw.to_string());
        }

        let lower = raw.to_lowercase();
        // The service vocabulary always pairs "sexual" with "non-sexual";
        // without the negative check every safe reply would read as a
        // positive hit, since "non-sexual" contains "sexual".
        let explicit = lower.contains("sexual") && !lower.contains("non-sexual");
        let label = if explicit { Label::Explicit } else { Label::Safe };

        let confidence = self
            .confidence
            .captures(raw)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse::<f64>().ok())
            .unwrap_or(DEFAULT_CONFIDENCE_PERCENT);

        Interpretation::Classified(Verdict::new(label, confidence, raw))
    }
}
