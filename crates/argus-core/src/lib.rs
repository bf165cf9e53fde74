//! Argus core: the image content-safety classification workflow.
//!
//! This crate drives one image from selection to verdict: intake accepts
//! a picked or dropped image, the workflow walks a timed progress
//! sequence, the remote classifier (a capability the embedder supplies)
//! answers with free text, and the interpreter turns that text into a
//! structured verdict.
//!
//! ## Features
//!
//! - File-picker and drag-and-drop image intake with eager previews
//! - A fixed, timed progress sequence walked before the remote call
//! - Heuristic interpretation of the service's free-text replies
//! - Error routing that distinguishes service-reported failures, which
//!   keep the selection, from transport failures, which reset everything
//! - Supersession of stale in-flight classifications on clear or
//!   reselect
//!
//! ## Architecture
//!
//! ```text
//! Select/Drop → Workflow → Stages (timed) → Remote Classifier
//!                                                  │
//!                          ┌───────────────────────┴──────────┐
//!                          │ reply text                       │ transport error
//!                          ▼                                  ▼
//!                     Interpreter                     Notice + full reset
//!                          │
//!             ┌────────────┴────────────┐
//!             │ verdict                 │ "Error:" reply
//!             ▼                         ▼
//!         Succeeded             Notice + image kept
//! ```
//!
//! ## Usage
//!
//! ```
//! use argus_core::{Interpretation, Label, ResponseInterpreter};
//!
//! let interpreter = ResponseInterpreter::new();
//! match interpreter.interpret("Confidence: 92.3% sexual") {
//!     Interpretation::Classified(verdict) => {
//!         assert_eq!(verdict.label, Label::Explicit);
//!         assert!((verdict.explicit_probability - 0.923).abs() < 1e-9);
//!     }
//!     Interpretation::ServiceError(text) => panic!("unexpected error: {}", text),
//! }
//! ```

pub mod intake;
pub mod interpreter;
pub mod notify;
pub mod remote;
pub mod stage;
pub mod verdict;
pub mod workflow;

pub use intake::{
    detect_image_format, payload_from_file, DropOutcome, DroppedItem, FileSource, ImagePayload,
    InputToken, IntakeError,
};
pub use interpreter::{Interpretation, ResponseInterpreter, DEFAULT_CONFIDENCE_PERCENT};
pub use notify::{Notice, NotificationSink, Severity};
pub use remote::{RemoteClassifier, TransportError};
pub use stage::{default_stages, Stage};
pub use verdict::{Label, Verdict};
pub use workflow::{ClassifyOutcome, OnStateChange, Workflow, WorkflowConfig, WorkflowState};
