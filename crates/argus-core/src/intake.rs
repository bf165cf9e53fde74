//! Image intake: file-picker and drag-and-drop selection.
//!
//! Intake turns whatever the embedding surface hands us into an
//! [`ImagePayload`] the workflow can own. The picker path accepts any
//! readable file; only the drop path checks the declared media type,
//! because drop targets receive arbitrary items the user happened to be
//! dragging.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while taking in an image.
#[derive(Error, Debug)]
pub enum IntakeError {
    /// No file was offered, or the offered file was empty.
    #[error("no usable image was selected")]
    InvalidInput,
    /// The file could not be read from disk.
    #[error("failed to read image file: {0}")]
    Io(#[from] std::io::Error),
}

/// An image selected for classification.
///
/// Holds the opaque image bytes together with display metadata. The
/// payload is replaced wholesale on every new selection and discarded on
/// clear; nothing in it persists across attempts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImagePayload {
    /// Raw image bytes, passed untouched to the remote classifier.
    pub bytes: Vec<u8>,
    /// Declared MIME type (e.g. "image/png").
    pub media_type: String,
    /// Original file name, when the source carried one.
    pub file_name: Option<String>,
    /// Display-only data URI, built eagerly at intake so it stays valid
    /// after the originating handle is gone.
    pub preview: String,
}

impl ImagePayload {
    /// Creates a payload from raw bytes and a declared MIME type.
    pub fn new(bytes: Vec<u8>, media_type: impl Into<String>) -> Self {
        use base64::{engine::general_purpose::STANDARD, Engine};

        let media_type = media_type.into();
        let preview = format!("data:{};base64,{}", media_type, STANDARD.encode(&bytes));
        Self {
            bytes,
            media_type,
            file_name: None,
            preview,
        }
    }

    /// Sets the original file name.
    pub fn with_file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = Some(name.into());
        self
    }

    /// Returns true if the payload holds no image data.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// A file offered through the file-picker path.
///
/// The picker does not filter by type; whatever the user picked arrives
/// here. A missing media type is filled in by sniffing the bytes.
#[derive(Debug, Clone, Default)]
pub struct FileSource {
    /// File name as reported by the picker, if any.
    pub name: Option<String>,
    /// Declared MIME type, if the picker reported one.
    pub media_type: Option<String>,
    /// The file's contents.
    pub bytes: Vec<u8>,
}

impl FileSource {
    /// Creates a source from in-memory bytes.
    pub fn new(bytes: Vec<u8>) -> Self {
        Self {
            name: None,
            media_type: None,
            bytes,
        }
    }

    /// Sets the file name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the declared MIME type.
    pub fn with_media_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = Some(media_type.into());
        self
    }

    /// Reads a source from a file on disk.
    ///
    /// The media type is left to byte sniffing, which covers the formats
    /// the classification service accepts.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, IntakeError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string);
        Ok(Self {
            name,
            media_type: None,
            bytes,
        })
    }
}

/// An item offered through drag-and-drop.
///
/// Drop events carry a declared media type per item; the workflow accepts
/// the drop only when that type is an image type.
#[derive(Debug, Clone)]
pub struct DroppedItem {
    /// Declared MIME type of the dragged item.
    pub media_type: String,
    /// Item name, if the drag source carried one.
    pub name: Option<String>,
    /// The item's contents.
    pub bytes: Vec<u8>,
}

impl DroppedItem {
    /// Creates a dropped item with a declared MIME type.
    pub fn new(media_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            media_type: media_type.into(),
            name: None,
            bytes,
        }
    }

    /// Sets the item name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Returns true if the declared media type is an image type.
    pub fn is_image(&self) -> bool {
        self.media_type.starts_with("image/")
    }
}

/// Outcome of offering a dropped item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// The item was an image and is now the selected payload.
    Accepted,
    /// The item's declared type was not an image; nothing changed and no
    /// notice was shown.
    Ignored,
}

/// Identity token for the file-selection control.
///
/// File inputs do not re-fire a change event when the same file is picked
/// twice in a row; remounting the control under a fresh token forces the
/// next selection through. The workflow regenerates the token on clear
/// and on transport-error resets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InputToken(u64);

impl InputToken {
    pub(crate) fn initial() -> Self {
        InputToken(0)
    }

    pub(crate) fn next(self) -> Self {
        InputToken(self.0.wrapping_add(1))
    }
}

/// Builds a payload from a file-picker selection.
///
/// Declines with [`IntakeError::InvalidInput`] when no file was offered
/// or the file is empty; the selection simply does not happen and no
/// notice is shown. A source without a declared media type is sniffed;
/// unrecognizable bytes fall back to a generic binary type rather than
/// being rejected, since the picker path imposes no type filter.
pub fn payload_from_file(source: Option<FileSource>) -> Result<ImagePayload, IntakeError> {
    let source = source.ok_or(IntakeError::InvalidInput)?;
    if source.bytes.is_empty() {
        return Err(IntakeError::InvalidInput);
    }
    let media_type = source
        .media_type
        .or_else(|| detect_image_format(&source.bytes).map(str::to_string))
        .unwrap_or_else(|| "application/octet-stream".to_string());
    let mut payload = ImagePayload::new(source.bytes, media_type);
    if let Some(name) = source.name {
        payload = payload.with_file_name(name);
    }
    Ok(payload)
}

/// Builds a payload from an accepted drop.
pub(crate) fn payload_from_drop(item: DroppedItem) -> ImagePayload {
    let mut payload = ImagePayload::new(item.bytes, item.media_type);
    if let Some(name) = item.name {
        payload = payload.with_file_name(name);
    }
    payload
}

/// Detects an image MIME type from magic bytes.
pub fn detect_image_format(data: &[u8]) -> Option<&'static str> {
    if data.len() < 4 {
        return None;
    }

    // JPEG: FF D8 FF
    if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
        return Some("image/jpeg");
    }

    // PNG: 89 50 4E 47 0D 0A 1A 0A
    if data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]) {
        return Some("image/png");
    }

    // GIF: GIF87a or GIF89a
    if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
        return Some("image/gif");
    }

    // WebP: RIFF....WEBP
    if data.len() >= 12 && data.starts_with(b"RIFF") && &data[8..12] == b"WEBP" {
        return Some("image/webp");
    }

    None
}
