// SPDX-License-Identifier: GPL-3.0-only

//! Camera lifecycle handlers
//!
//! Mounting, the permission answer, incoming frames and stream failures.

use crate::app::camera_view::MountOutcome;
use crate::app::state::{AppModel, Message};
use crate::backends::camera::{CameraFrame, MediaAccessError, StreamGrant};
use crate::pipelines::photo::capture;
use cosmic::Task;
use cosmic::widget::image::Handle;
use std::sync::Arc;
use tracing::{debug, info, warn};

impl AppModel {
    /// Probe the provider and request camera access
    pub(crate) fn mount_camera(&mut self) -> Task<cosmic::Action<Message>> {
        match self.camera.mount(self.provider.as_ref()) {
            Ok(MountOutcome::PermissionRequested) => Task::perform(
                self.provider.request_access(),
                |result| cosmic::Action::App(Message::PermissionResolved(result)),
            ),
            Ok(MountOutcome::Unsupported) => Task::none(),
            Err(err) => {
                warn!(error = %err, "Camera already mounted");
                Task::none()
            }
        }
    }

    pub(crate) fn handle_permission_resolved(
        &mut self,
        result: Result<StreamGrant, MediaAccessError>,
    ) -> Task<cosmic::Action<Message>> {
        let outcome = match result {
            Ok(grant) => {
                info!(camera = %grant.label, "Camera access granted");
                self.camera.permission_granted(grant)
            }
            Err(err) => self.camera.permission_denied(err),
        };
        if let Err(err) = outcome {
            warn!(error = %err, "Permission answer ignored");
        }
        Task::none()
    }

    pub(crate) fn handle_camera_frame(
        &mut self,
        frame: Arc<CameraFrame>,
    ) -> Task<cosmic::Action<Message>> {
        if !self.camera.video().is_playing() {
            return Task::none();
        }

        match capture::draw_frame(&frame) {
            Ok(mut canvas) => {
                if self.config.mirror_preview {
                    image::imageops::flip_horizontal_in_place(&mut canvas);
                }
                let (width, height) = canvas.dimensions();
                self.preview = Some(Handle::from_rgba(width, height, canvas.into_raw()));
            }
            Err(err) => {
                debug!(error = %err, "Skipping unusable preview frame");
                return Task::none();
            }
        }

        if self.camera.frame_received(frame) {
            info!("Preview visible");
        }
        Task::none()
    }

    pub(crate) fn handle_stream_failed(
        &mut self,
        err: MediaAccessError,
    ) -> Task<cosmic::Action<Message>> {
        if let Err(e) = self.camera.stream_failed(err) {
            debug!(error = %e, "Stream failure after the view already stopped");
        }
        self.preview = None;
        Task::none()
    }

    /// Start prompt tapped
    pub(crate) fn handle_start_camera(&mut self) -> Task<cosmic::Action<Message>> {
        if let Err(err) = self.camera.start_pressed() {
            debug!(error = %err, "Start ignored");
        }
        Task::none()
    }
}
