//! Transient outcome notifications.
//!
//! The workflow renders nothing itself; failures surface as notices
//! handed to a [`NotificationSink`]. Sinks are fire-and-forget: the
//! workflow never observes delivery, and a sink that fails to render has
//! only itself to tell.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Severity of a notice.
///
/// The workflow only ever emits errors; successes surface through state,
/// not notices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// A failure the user should see.
    Error,
}

impl Severity {
    /// Returns the lowercase identifier for this severity.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A transient notification for the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notice {
    /// Message text shown to the user.
    pub message: String,
    /// Severity of the notice.
    pub severity: Severity,
    /// How long the notice stays visible before dismissing itself.
    pub auto_close: Duration,
}

impl Notice {
    /// Creates an error notice with the given auto-dismiss interval.
    pub fn error(message: impl Into<String>, auto_close: Duration) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Error,
            auto_close,
        }
    }
}

/// Capability for displaying notices.
///
/// Implementations decide how a notice renders; a UI might toast it
/// while a test records it.
pub trait NotificationSink: Send + Sync {
    /// Displays a notice.
    fn notify(&self, notice: Notice);
}
