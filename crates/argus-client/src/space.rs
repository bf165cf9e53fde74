//! Client for hosted inference spaces.
//!
//! The classification backend is a hosted space exposing a named
//! inference endpoint over an HTTP API. One classification is three
//! steps:
//!
//! 1. upload the image (`POST /gradio_api/upload`), receiving a
//!    server-side file path,
//! 2. submit the job (`POST /gradio_api/call/{endpoint}`), receiving an
//!    event id,
//! 3. collect the result (`GET /gradio_api/call/{endpoint}/{event_id}`),
//!    a server-sent-event body whose `complete` event carries the reply
//!    text.
//!
//! The client makes one attempt per call and never retries; service-level
//! failures arrive as ordinary `"Error:"`-prefixed reply text and are the
//! interpreter's concern, not this module's.

use crate::error::{ClientError, Result};
use argus_core::{ImagePayload, RemoteClassifier, TransportError};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;

/// Default inference endpoint name on the space.
pub const DEFAULT_ENDPOINT: &str = "classify";

/// Per-request deadline for each protocol step.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Deserialize)]
struct CallReply {
    event_id: String,
}

/// Client for one hosted inference space.
#[derive(Debug, Clone)]
pub struct SpaceClient {
    http: reqwest::Client,
    base_url: String,
    endpoint: String,
}

impl SpaceClient {
    /// Creates a client for a space identified as `owner/name`.
    pub fn for_space(space_id: &str) -> Result<Self> {
        Self::with_base_url(space_base_url(space_id))
    }

    /// Creates a client against an explicit base URL.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
        })
    }

    /// Sets the inference endpoint name. A leading slash is tolerated.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into().trim_start_matches('/').to_string();
        self
    }

    /// Returns the base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Runs one full classification round trip.
    pub async fn classify_image(&self, image: &ImagePayload) -> Result<String> {
        let file_path = self.upload(image).await?;
        let event_id = self.submit(&file_path).await?;
        let reply = self.collect(&event_id).await?;
        tracing::debug!(chars = reply.len(), "received reply text");
        Ok(reply)
    }

    /// Uploads the image bytes, returning the server-side file path.
    async fn upload(&self, image: &ImagePayload) -> Result<String> {
        let file_name = image
            .file_name
            .clone()
            .unwrap_or_else(|| "image".to_string());
        let part = reqwest::multipart::Part::bytes(image.bytes.clone())
            .file_name(file_name)
            .mime_str(&image.media_type)?;
        let form = reqwest::multipart::Form::new().part("files", part);

        let url = format!("{}/gradio_api/upload", self.base_url);
        tracing::debug!(%url, bytes = image.bytes.len(), "uploading image");
        let response = self
            .http
            .post(&url)
            .multipart(form)
            .send()
            .await?
            .error_for_status()?;

        let paths: Vec<String> = response.json().await?;
        paths
            .into_iter()
            .next()
            .ok_or_else(|| ClientError::Protocol("upload reply contained no file path".to_string()))
    }

    /// Submits the inference job, returning its event id.
    async fn submit(&self, file_path: &str) -> Result<String> {
        let url = format!("{}/gradio_api/call/{}", self.base_url, self.endpoint);
        let body = json!({
            "data": [{
                "path": file_path,
                "meta": { "_type": "gradio.FileData" },
            }]
        });

        tracing::debug!(%url, "submitting inference job");
        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        let reply: CallReply = response.json().await?;
        Ok(reply.event_id)
    }

    /// Collects the job result, returning the reply text.
    ///
    /// The server holds the connection open and closes it after the
    /// terminal event, so reading the whole body is the poll.
    async fn collect(&self, event_id: &str) -> Result<String> {
        let url = format!(
            "{}/gradio_api/call/{}/{}",
            self.base_url, self.endpoint, event_id
        );
        tracing::debug!(%url, "collecting result");
        let body = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        parse_event_stream(&body)
    }
}

#[async_trait]
impl RemoteClassifier for SpaceClient {
    async fn classify(&self, image: &ImagePayload) -> std::result::Result<String, TransportError> {
        self.classify_image(image).await.map_err(TransportError::from)
    }
}

/// Resolves a space id (`owner/name`) to its hosted base URL.
///
/// Hosting folds the id into a subdomain: lowercased, with `/`, `_`, and
/// `.` all mapped to `-`.
pub fn space_base_url(space_id: &str) -> String {
    let subdomain: String = space_id
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            '/' | '_' | '.' => '-',
            other => other,
        })
        .collect();
    format!("https://{}.hf.space", subdomain)
}

/// Walks a server-sent-event body and returns the `complete` event's
/// reply text.
///
/// The body is `event:`/`data:` line pairs. Progress events
/// (`generating`, `heartbeat`) are skipped; an `error` event fails the
/// job with its data as the message; a stream that ends without a
/// terminal event is a protocol error.
fn parse_event_stream(body: &str) -> Result<String> {
    let mut current_event = "";
    for line in body.lines() {
        if let Some(name) = line.strip_prefix("event:") {
            current_event = name.trim();
        } else if let Some(data) = line.strip_prefix("data:") {
            let data = data.trim();
            match current_event {
                "complete" => return reply_from_data(data),
                "error" => {
                    let message = if data.is_empty() || data == "null" {
                        "unknown error".to_string()
                    } else {
                        data.trim_matches('"').to_string()
                    };
                    return Err(ClientError::JobFailed(message));
                }
                _ => {}
            }
        }
    }
    Err(ClientError::Protocol(
        "stream ended without a complete event".to_string(),
    ))
}

/// Extracts the reply text from a `complete` event's data payload, a
/// JSON array whose first element is the text.
fn reply_from_data(data: &str) -> Result<String> {
    let value: Value = serde_json::from_str(data)?;
    value
        .as_array()
        .and_then(|items| items.first())
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| ClientError::Protocol("complete event carried no reply text".to_string()))
}
