// SPDX-License-Identifier: GPL-3.0-only

//! Error types for the selfie application

use crate::backends::camera::MediaAccessError;
use std::fmt;

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Main application error type
#[derive(Debug, Clone)]
pub enum AppError {
    /// Camera-related errors
    Camera(CameraError),
    /// Photo capture errors
    Photo(PhotoError),
    /// Storage/filesystem errors
    Storage(String),
    /// Generic error with message
    Other(String),
}

/// Camera-specific errors
///
/// Both variants end the session: the view shows the error and offers no retry.
#[derive(Debug, Clone)]
pub enum CameraError {
    /// The provider has no camera capture capability at all
    Unsupported,
    /// Access was requested but denied or failed
    Access(MediaAccessError),
}

/// Photo capture errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhotoError {
    /// The video surface has not produced a frame with nonzero dimensions yet
    NoFrameAvailable,
    /// Frame data does not cover the reported dimensions
    CaptureFailed(String),
    /// PNG encoding failed
    EncodingFailed(String),
    /// Nothing has been captured, so there is nothing to download
    NothingToSave,
    /// Writing the file failed
    SaveFailed(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Camera(e) => write!(f, "Camera error: {}", e),
            AppError::Photo(e) => write!(f, "Photo error: {}", e),
            AppError::Storage(msg) => write!(f, "Storage error: {}", msg),
            AppError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl fmt::Display for CameraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CameraError::Unsupported => write!(f, "Camera capture is not supported"),
            CameraError::Access(e) => write!(f, "Camera access failed: {}", e),
        }
    }
}

impl fmt::Display for PhotoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhotoError::NoFrameAvailable => write!(f, "No frame available for capture"),
            PhotoError::CaptureFailed(msg) => write!(f, "Capture failed: {}", msg),
            PhotoError::EncodingFailed(msg) => write!(f, "Encoding failed: {}", msg),
            PhotoError::NothingToSave => write!(f, "No photo has been captured"),
            PhotoError::SaveFailed(msg) => write!(f, "Save failed: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}
impl std::error::Error for CameraError {}
impl std::error::Error for PhotoError {}

impl From<CameraError> for AppError {
    fn from(err: CameraError) -> Self {
        AppError::Camera(err)
    }
}

impl From<PhotoError> for AppError {
    fn from(err: PhotoError) -> Self {
        AppError::Photo(err)
    }
}

impl From<MediaAccessError> for CameraError {
    fn from(err: MediaAccessError) -> Self {
        CameraError::Access(err)
    }
}

impl From<MediaAccessError> for AppError {
    fn from(err: MediaAccessError) -> Self {
        AppError::Camera(CameraError::Access(err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Storage(err.to_string())
    }
}

impl From<std::io::Error> for PhotoError {
    fn from(err: std::io::Error) -> Self {
        PhotoError::SaveFailed(err.to_string())
    }
}

impl From<image::ImageError> for PhotoError {
    fn from(err: image::ImageError) -> Self {
        PhotoError::EncodingFailed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::camera::MediaErrorKind;

    #[test]
    fn test_access_error_keeps_name() {
        let err: AppError = MediaAccessError::new(MediaErrorKind::NotAllowed, "denied").into();
        assert!(err.to_string().contains("NotAllowedError"));
    }

    #[test]
    fn test_io_error_becomes_save_failure() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let err: PhotoError = io.into();
        assert!(matches!(err, PhotoError::SaveFailed(msg) if msg.contains("read-only")));
    }
}
