// SPDX-License-Identifier: GPL-3.0-only

//! Message update handling
//!
//! The main `update()` function acts as a dispatcher; the handlers live in
//! the `handlers` submodules organized by functional domain.
//!
//! # Handler Modules
//!
//! - `handlers::camera`: Mounting, permission, stream frames, start prompt
//! - `handlers::capture`: Take, delete and download photo, notices
//! - `handlers::system`: URLs, context drawer, settings

use crate::app::state::{AppModel, Message};
use cosmic::Task;

impl AppModel {
    /// Main message handler - routes messages to appropriate handler methods.
    pub fn update(&mut self, message: Message) -> Task<cosmic::Action<Message>> {
        match message {
            // ===== UI Navigation =====
            Message::LaunchUrl(url) => self.handle_launch_url(url),
            Message::ToggleContextPage(page) => self.handle_toggle_context_page(page),

            // ===== Camera =====
            Message::PermissionResolved(result) => self.handle_permission_resolved(result),
            Message::CameraFrame(frame) => self.handle_camera_frame(frame),
            Message::StreamFailed(err) => self.handle_stream_failed(err),
            Message::StartCamera => self.handle_start_camera(),

            // ===== Capture =====
            Message::TakePhoto => self.handle_take_photo(),
            Message::DeletePhoto => self.handle_delete_photo(),
            Message::DownloadPhoto => self.handle_download_photo(),
            Message::DownloadPathChosen(png, path) => {
                self.handle_download_path_chosen(png, path)
            }
            Message::PhotoSaved(result) => self.handle_photo_saved(result),
            Message::ClearNotice(generation) => self.handle_clear_notice(generation),

            // ===== Settings =====
            Message::UpdateConfig(config) => self.handle_update_config(config),
            Message::ToggleMirrorPreview => self.handle_toggle_mirror_preview(),
            Message::ToggleAutoplay => self.handle_toggle_autoplay(),
            Message::SetAppTheme(index) => self.handle_set_app_theme(index),
        }
    }
}
