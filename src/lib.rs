// SPDX-License-Identifier: GPL-3.0-only

//! Selfie - a selfie camera for the COSMIC desktop environment
//!
//! Shows a live camera preview, takes a still photo from it and lets the
//! user delete or save that photo.
//!
//! # Architecture
//!
//! - [`app`]: Application, UI and the camera view state machine
//! - [`backends`]: Camera providers (PipeWire via the camera portal, still image)
//! - [`pipelines`]: Frame to PNG snapshot
//! - [`config`]: User configuration handling
//! - [`storage`]: Download locations and writing photos to disk
//!
//! # Example
//!
//! ```ignore
//! // GUI:      selfie
//! // Headless: selfie snap --output photo.png
//! ```

pub mod app;
pub mod backends;
pub mod config;
pub mod constants;
pub mod errors;
pub mod i18n;
pub mod pipelines;
pub mod storage;

// Re-export commonly used types
pub use app::camera_view::{CameraView, Phase, ViewMode};
pub use app::{AppModel, Message};
pub use backends::camera::{CameraProvider, MediaAccessError, MediaErrorKind, StreamGrant};
pub use config::Config;
pub use errors::{AppError, CameraError, PhotoError};
pub use pipelines::photo::Snapshot;
