// SPDX-License-Identifier: GPL-3.0-only

//! Capture operations handlers
//!
//! Handles taking, deleting and downloading the photo, plus transient notices.

use crate::app::camera_view::TransitionError;
use crate::app::state::{AppModel, Message, Notice};
use crate::constants::{photo, ui};
use crate::errors::PhotoError;
use crate::fl;
use crate::storage;
use cosmic::Task;
use cosmic::cosmic_config::CosmicConfigEntry;
use cosmic::widget::image::Handle;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

impl AppModel {
    /// Create a delayed task that sends a message after the specified milliseconds
    pub(crate) fn delay_task(millis: u64, message: Message) -> Task<cosmic::Action<Message>> {
        Task::perform(
            async move {
                tokio::time::sleep(tokio::time::Duration::from_millis(millis)).await;
                message
            },
            cosmic::Action::App,
        )
    }

    /// Show a notice and schedule its removal
    pub(crate) fn show_notice(&mut self, text: String) -> Task<cosmic::Action<Message>> {
        self.notice_generation += 1;
        let generation = self.notice_generation;
        self.notice = Some(Notice { text, generation });
        Self::delay_task(ui::NOTICE_DURATION_MS, Message::ClearNotice(generation))
    }

    pub(crate) fn handle_clear_notice(&mut self, generation: u64) -> Task<cosmic::Action<Message>> {
        if self
            .notice
            .as_ref()
            .is_some_and(|notice| notice.generation == generation)
        {
            self.notice = None;
        }
        Task::none()
    }

    pub(crate) fn handle_take_photo(&mut self) -> Task<cosmic::Action<Message>> {
        match self.camera.capture_pressed() {
            Ok(snapshot) => {
                self.snapshot_handle = Some(Handle::from_bytes(snapshot.png_bytes().to_vec()));
                Task::none()
            }
            Err(TransitionError::Capture(PhotoError::NoFrameAvailable)) => {
                self.show_notice(fl!("notice-no-frame"))
            }
            Err(TransitionError::Capture(err)) => {
                error!(error = %err, "Capture failed");
                self.show_notice(fl!("notice-capture-failed", error = err.to_string()))
            }
            Err(err) => {
                debug!(error = %err, "Capture ignored");
                Task::none()
            }
        }
    }

    pub(crate) fn handle_delete_photo(&mut self) -> Task<cosmic::Action<Message>> {
        match self.camera.delete_pressed() {
            Ok(()) => self.snapshot_handle = None,
            Err(err) => debug!(error = %err, "Delete ignored"),
        }
        Task::none()
    }

    /// Ask where to save, pre-filled with the last directory and default name
    pub(crate) fn handle_download_photo(&mut self) -> Task<cosmic::Action<Message>> {
        // The dialog saves this photo even if it is replaced while open
        let png = match self.camera.download_target() {
            Ok(snapshot) => snapshot.png_shared(),
            Err(err) => {
                debug!(error = %err, "Download ignored");
                return Task::none();
            }
        };

        let suggested = storage::download_path(
            self.config.last_download_dir.as_deref(),
            &self.config.download_file_name,
        );
        let directory = suggested
            .parent()
            .map(PathBuf::from)
            .unwrap_or_else(storage::default_download_dir);
        let file_name = suggested
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| photo::DEFAULT_FILE_NAME.to_string());

        info!(directory = %directory.display(), file_name = %file_name, "Opening save dialog");
        Task::perform(
            async move {
                rfd::AsyncFileDialog::new()
                    .set_directory(&directory)
                    .set_file_name(file_name)
                    .add_filter("PNG", &["png"])
                    .save_file()
                    .await
                    .map(|handle| handle.path().to_path_buf())
            },
            move |path| cosmic::Action::App(Message::DownloadPathChosen(png, path)),
        )
    }

    pub(crate) fn handle_download_path_chosen(
        &mut self,
        png: Arc<[u8]>,
        path: Option<PathBuf>,
    ) -> Task<cosmic::Action<Message>> {
        let Some(path) = path else {
            debug!("Save dialog cancelled");
            return Task::none();
        };
        if self.camera.download_target().is_err() {
            warn!("Photo was deleted while the save dialog was open, saving it anyway");
        }

        Task::perform(
            async move {
                storage::save_png(png, path)
                    .await
                    .map_err(|err| err.to_string())
            },
            |result| cosmic::Action::App(Message::PhotoSaved(result)),
        )
    }

    pub(crate) fn handle_photo_saved(
        &mut self,
        result: Result<PathBuf, String>,
    ) -> Task<cosmic::Action<Message>> {
        match result {
            Ok(path) => {
                info!(path = %path.display(), "Photo saved successfully");
                let directory = path.parent().map(PathBuf::from);
                if directory.is_some() && directory != self.config.last_download_dir {
                    self.config.last_download_dir = directory;
                    if let Some(handler) = self.config_handler.as_ref()
                        && let Err(err) = self.config.write_entry(handler)
                    {
                        error!(?err, "Failed to save download directory");
                    }
                }
                self.show_notice(fl!("notice-saved", path = path.display().to_string()))
            }
            Err(err) => {
                error!(error = %err, "Failed to save photo");
                self.show_notice(fl!("notice-save-failed", error = err))
            }
        }
    }
}
