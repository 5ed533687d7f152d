// SPDX-License-Identifier: GPL-3.0-only

//! Shared types for camera providers

use gstreamer::buffer::{MappedBuffer, Readable};
use std::os::fd::OwnedFd;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// Frame data storage - either pre-copied bytes or zero-copy GStreamer buffer
///
/// The `Mapped` variant keeps the GStreamer buffer mapped and alive until all
/// references are dropped.
#[derive(Clone)]
pub enum FrameData {
    /// Pre-copied bytes (still image sources, tests)
    Copied(Arc<[u8]>),
    /// Zero-copy mapped GStreamer buffer
    Mapped(Arc<MappedBuffer<Readable>>),
}

impl FrameData {
    /// Create FrameData from a mapped GStreamer buffer (zero-copy)
    pub fn from_mapped_buffer(buffer: MappedBuffer<Readable>) -> Self {
        FrameData::Mapped(Arc::new(buffer))
    }

    pub fn len(&self) -> usize {
        match self {
            FrameData::Copied(data) => data.len(),
            FrameData::Mapped(buf) => buf.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for FrameData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FrameData::Copied(data) => write!(f, "FrameData::Copied({} bytes)", data.len()),
            FrameData::Mapped(buf) => write!(f, "FrameData::Mapped({} bytes)", buf.len()),
        }
    }
}

impl AsRef<[u8]> for FrameData {
    fn as_ref(&self) -> &[u8] {
        match self {
            FrameData::Copied(data) => data.as_ref(),
            FrameData::Mapped(buf) => buf.as_slice(),
        }
    }
}

impl std::ops::Deref for FrameData {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.as_ref()
    }
}

/// A single RGBA video frame
///
/// Rows are `stride` bytes apart; `stride >= width * 4`.
#[derive(Debug, Clone)]
pub struct CameraFrame {
    pub width: u32,
    pub height: u32,
    pub stride: u32,
    pub data: FrameData,
    pub captured_at: Instant,
}

impl CameraFrame {
    /// Wrap tightly packed RGBA bytes
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self {
            width,
            height,
            stride: width * 4,
            data: FrameData::Copied(Arc::from(pixels.into_boxed_slice())),
            captured_at: Instant::now(),
        }
    }

    /// Whether the frame carries any pixels
    pub fn has_pixels(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Bytes of one row without stride padding
    pub fn row_bytes(&self) -> usize {
        self.width as usize * 4
    }
}

/// Receiver for frames from a running stream
pub type FrameReceiver = futures::channel::mpsc::Receiver<CameraFrame>;

/// Sender for frames from a running stream
pub type FrameSender = futures::channel::mpsc::Sender<CameraFrame>;

static NEXT_GRANT_ID: AtomicU64 = AtomicU64::new(1);

/// Permission to open a camera stream, handed out by a provider
///
/// Cheap to clone so it can travel inside UI messages. The stream itself is
/// opened from the grant by the same provider.
#[derive(Debug, Clone)]
pub struct StreamGrant {
    /// Unique per grant; keys the frame subscription
    pub id: u64,
    /// Human readable camera label
    pub label: String,
    /// PipeWire remote handed out by the camera portal, if access went through it
    pub remote: Option<Arc<OwnedFd>>,
}

impl StreamGrant {
    pub fn new(label: impl Into<String>, remote: Option<OwnedFd>) -> Self {
        Self {
            id: NEXT_GRANT_ID.fetch_add(1, Ordering::Relaxed),
            label: label.into(),
            remote: remote.map(Arc::new),
        }
    }
}

/// Keeps an opened stream running; dropping it stops frame delivery
pub trait ActiveStream: Send {
    /// Short description for logs
    fn describe(&self) -> String;
}

/// Category of a media access failure
///
/// Mirrors the error names web camera APIs report so messages stay familiar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaErrorKind {
    /// The user or the system policy refused access
    NotAllowed,
    /// No camera is present
    NotFound,
    /// A camera exists but could not be read (busy, pipeline failure)
    NotReadable,
    /// The request was aborted before an answer arrived
    Abort,
    /// The capture mechanism itself is missing
    NotSupported,
}

impl MediaErrorKind {
    /// Error name as shown to the user
    pub fn name(&self) -> &'static str {
        match self {
            MediaErrorKind::NotAllowed => "NotAllowedError",
            MediaErrorKind::NotFound => "NotFoundError",
            MediaErrorKind::NotReadable => "NotReadableError",
            MediaErrorKind::Abort => "AbortError",
            MediaErrorKind::NotSupported => "NotSupportedError",
        }
    }
}

/// Error returned when camera access or stream setup fails
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaAccessError {
    pub kind: MediaErrorKind,
    pub message: String,
}

impl MediaAccessError {
    pub fn new(kind: MediaErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// The error name, e.g. `NotAllowedError`
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }
}

impl std::fmt::Display for MediaAccessError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.name(), self.message)
    }
}

impl std::error::Error for MediaAccessError {}

pub type MediaResult<T> = Result<T, MediaAccessError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rgba_stride() {
        let frame = CameraFrame::from_rgba(4, 2, vec![0u8; 4 * 2 * 4]);
        assert_eq!(frame.stride, 16);
        assert_eq!(frame.row_bytes(), 16);
        assert!(frame.has_pixels());
    }

    #[test]
    fn test_zero_sized_frame_has_no_pixels() {
        let frame = CameraFrame::from_rgba(0, 480, Vec::new());
        assert!(!frame.has_pixels());
    }

    #[test]
    fn test_grant_ids_are_unique() {
        let a = StreamGrant::new("a", None);
        let b = StreamGrant::new("b", None);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_error_display_includes_name() {
        let err = MediaAccessError::new(MediaErrorKind::NotReadable, "device busy");
        assert_eq!(err.to_string(), "NotReadableError: device busy");
    }
}
