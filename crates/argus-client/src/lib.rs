//! HTTP client for the hosted Argus classification backend.
//!
//! Implements [`argus_core::RemoteClassifier`] against a hosted inference
//! space: upload the image, submit the job, collect the server-sent
//! result. Wire-level failures fold into the core transport taxonomy;
//! reply text, including `"Error:"`-prefixed service failures, passes
//! through untouched for the interpreter to judge.
//!
//! ## Usage
//!
//! ```no_run
//! use argus_client::SpaceClient;
//! use argus_core::Workflow;
//! use std::sync::Arc;
//!
//! # fn main() -> argus_client::Result<()> {
//! let client = SpaceClient::for_space("acme/image-screen")?;
//! let _workflow = Workflow::new(Arc::new(client));
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod space;

pub use error::{ClientError, Result};
pub use space::{space_base_url, SpaceClient, DEFAULT_ENDPOINT};
