// SPDX-License-Identifier: GPL-3.0-only

//! Application state management

use crate::app::camera_view::CameraView;
use crate::backends::camera::{CameraFrame, CameraProvider, MediaAccessError, StreamGrant};
use crate::config::Config;
use cosmic::cosmic_config;
use cosmic::widget::about::About;
use std::path::PathBuf;
use std::sync::Arc;

/// Short-lived message shown over the camera view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    /// Bumped for every notice so a stale clear timer can't hide a newer one
    pub generation: u64,
}

/// The application model stores app-specific state used to describe its interface and
/// drive its logic.
pub struct AppModel {
    /// Application state which is managed by the COSMIC runtime.
    pub core: cosmic::Core,
    /// Display a context drawer with the designated page if defined.
    pub context_page: ContextPage,
    /// The about page for this app.
    pub about: About,
    /// Configuration data that persists between application runs.
    pub config: Config,
    /// Configuration handler for saving config changes
    pub config_handler: Option<cosmic_config::Config>,
    /// Injected camera source
    pub provider: Arc<dyn CameraProvider>,
    /// Camera screen state machine
    pub camera: CameraView,
    /// Latest preview frame ready for display (already mirrored if enabled)
    pub preview: Option<cosmic::widget::image::Handle>,
    /// Decoded handle of the captured snapshot
    pub snapshot_handle: Option<cosmic::widget::image::Handle>,
    /// Transient notice (capture skipped, photo saved)
    pub notice: Option<Notice>,
    pub notice_generation: u64,
    /// Labels for the theme dropdown
    pub theme_options: Vec<String>,
}

/// The context page to display in the context drawer.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum ContextPage {
    #[default]
    About,
    Settings,
}

/// Messages emitted by the application and its widgets.
#[derive(Debug, Clone)]
pub enum Message {
    // ===== UI Navigation =====
    /// Open external URL (repository, etc.)
    LaunchUrl(String),
    /// Toggle context drawer page (About, Settings)
    ToggleContextPage(ContextPage),

    // ===== Camera =====
    /// The provider answered the permission request
    PermissionResolved(Result<StreamGrant, MediaAccessError>),
    /// New frame from the active stream
    CameraFrame(Arc<CameraFrame>),
    /// The active stream could not be opened or ended with an error
    StreamFailed(MediaAccessError),
    /// Start prompt tapped
    StartCamera,

    // ===== Capture =====
    /// Capture control tapped
    TakePhoto,
    /// Delete control tapped
    DeletePhoto,
    /// Download control tapped
    DownloadPhoto,
    /// Save dialog closed with the photo it was opened for (path is None when cancelled)
    DownloadPathChosen(Arc<[u8]>, Option<PathBuf>),
    /// Photo written to disk
    PhotoSaved(Result<PathBuf, String>),
    /// Hide the notice with this generation
    ClearNotice(u64),

    // ===== Settings =====
    /// Configuration updated
    UpdateConfig(Config),
    /// Toggle mirror preview (horizontal flip)
    ToggleMirrorPreview,
    /// Toggle autoplay after permission is granted
    ToggleAutoplay,
    /// Select application theme by dropdown index
    SetAppTheme(usize),
}
