//! Structured classification verdicts.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Binary content-safety label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    /// The image is safe.
    Safe,
    /// The image contains explicit content.
    Explicit,
}

impl Label {
    /// Returns the lowercase identifier for this label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Safe => "safe",
            Label::Explicit => "explicit",
        }
    }

    /// Returns the display headline for this label.
    pub fn headline(&self) -> &'static str {
        match self {
            Label::Safe => "Safe Content",
            Label::Explicit => "Explicit Content",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A structured verdict built from the remote classifier's reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    /// The chosen label.
    pub label: Label,
    /// Confidence in the chosen label, in percent, clamped to [0, 100].
    pub confidence_percent: f64,
    /// Probability that the image is safe.
    pub safe_probability: f64,
    /// Probability that the image is explicit.
    pub explicit_probability: f64,
    /// The reply text exactly as received, kept for display and
    /// debugging.
    pub raw_text: String,
}

impl Verdict {
    /// Creates a verdict for `label` with the given confidence.
    ///
    /// The confidence always describes the chosen label, never a fixed
    /// class; the probability pair is derived from it so the two values
    /// sum to one.
    pub fn new(label: Label, confidence_percent: f64, raw_text: impl Into<String>) -> Self {
        let confidence_percent = confidence_percent.clamp(0.0, 100.0);
        let chosen = confidence_percent / 100.0;
        let (safe_probability, explicit_probability) = match label {
            Label::Safe => (chosen, 1.0 - chosen),
            Label::Explicit => (1.0 - chosen, chosen),
        };
        Self {
            label,
            confidence_percent,
            safe_probability,
            explicit_probability,
            raw_text: raw_text.into(),
        }
    }

    /// Returns true if the verdict is explicit.
    pub fn is_explicit(&self) -> bool {
        self.label == Label::Explicit
    }

    /// Returns the display text for the verdict.
    ///
    /// This is the reply text exactly as received; nothing is redacted.
    pub fn clean_text(&self) -> &str {
        &self.raw_text
    }
}
