// SPDX-License-Identifier: GPL-3.0-only

//! Camera provider abstraction
//!
//! The view never talks to a camera directly. It asks an injected
//! [`CameraProvider`] whether capture is possible, requests access, and opens
//! the granted stream.
//!
//! ```text
//! ┌─────────────────────┐
//! │   UI Layer (App)    │
//! └──────────┬──────────┘
//!            │
//!            ▼
//! ┌─────────────────────┐
//! │ CameraProvider Trait│  ← probe, request access, open stream
//! └──────────┬──────────┘
//!            │
//!      ┌─────┴──────┐
//!      ▼            ▼
//! ┌────────┐  ┌───────────┐
//! │PipeWire│  │Still image│
//! └────────┘  └───────────┘
//! ```

pub mod pipewire;
pub mod still_image;
pub mod types;

pub use pipewire::PipeWireProvider;
pub use still_image::StillImageProvider;
pub use types::*;

use futures::future::BoxFuture;
use std::path::PathBuf;
use std::sync::Arc;

/// Source of camera streams
pub trait CameraProvider: Send + Sync {
    /// Name used in logs
    fn name(&self) -> &str;

    /// Capability probe: can this provider capture at all?
    fn is_supported(&self) -> bool;

    /// Ask for permission to use the camera
    ///
    /// Resolves once the user (or the system) has answered. The request
    /// cannot be cancelled.
    fn request_access(&self) -> BoxFuture<'static, MediaResult<StreamGrant>>;

    /// Start delivering frames for a granted stream
    ///
    /// Frames are pushed into `frames` until the returned handle is dropped.
    fn open_stream(
        &self,
        grant: &StreamGrant,
        frames: FrameSender,
    ) -> MediaResult<Box<dyn ActiveStream>>;
}

/// Pick the provider for this run: a still image when a source file is
/// given, the system camera otherwise
pub fn provider_for(source: Option<PathBuf>) -> Arc<dyn CameraProvider> {
    match source {
        Some(path) => Arc::new(StillImageProvider::new(path)),
        None => Arc::new(PipeWireProvider::new()),
    }
}
