// SPDX-License-Identifier: GPL-3.0-only

//! Application-wide constants

/// UI layout constants
pub mod ui {
    /// Outer diameter of the capture button
    pub const CAPTURE_BUTTON_SIZE: f32 = 60.0;

    /// Width of the delete/download icon buttons
    pub const ICON_BUTTON_WIDTH: f32 = 44.0;

    /// Alpha of the controls bar background
    pub const OVERLAY_BACKGROUND_ALPHA: f32 = 0.6;

    /// Alpha applied to disabled controls
    pub const DISABLED_ALPHA: f32 = 0.3;

    /// How long transient notices stay on screen (ms)
    pub const NOTICE_DURATION_MS: u64 = 2500;
}

/// GStreamer pipeline constants
pub mod pipeline {
    /// Maximum number of buffers queued in the appsink
    pub const MAX_BUFFERS: u32 = 2;

    /// Pixel format every pipeline converts to
    pub const OUTPUT_FORMAT: &str = "RGBA";

    /// Capacity of the frame channel between pipeline and UI
    pub const FRAME_CHANNEL_CAPACITY: usize = 8;
}

/// Timing constants
pub mod timing {
    /// Log a frame statistics line every N frames
    pub const FRAME_LOG_INTERVAL: u64 = 30;

    /// Seconds to wait for a pipeline to reach PLAYING
    pub const START_TIMEOUT_SECS: u64 = 5;

    /// Seconds to wait for a pipeline to reach NULL
    pub const STOP_TIMEOUT_SECS: u64 = 2;

    /// Interval between repeated frames of a still image source
    pub const STILL_FRAME_INTERVAL_MS: u64 = 33;

    /// Default time `selfie snap` waits for a usable frame
    pub const SNAP_TIMEOUT_SECS: u64 = 10;
}

/// xdg-desktop-portal constants
pub mod portal {
    pub const DESTINATION: &str = "org.freedesktop.portal.Desktop";
    pub const PATH: &str = "/org/freedesktop/portal/desktop";
    pub const CAMERA_INTERFACE: &str = "org.freedesktop.portal.Camera";
    pub const REQUEST_INTERFACE: &str = "org.freedesktop.portal.Request";

    /// Response code: the user granted the request
    pub const RESPONSE_SUCCESS: u32 = 0;
    /// Response code: the user cancelled the request
    pub const RESPONSE_CANCELLED: u32 = 1;
}

/// Captured photo constants
pub mod photo {
    /// Default file name offered by the download control
    pub const DEFAULT_FILE_NAME: &str = "selfie.png";

    /// MIME type of captured photos
    pub const MIME_TYPE: &str = "image/png";

    /// Subdirectory of the pictures directory used for downloads
    pub const PICTURES_SUBDIR: &str = "selfie";
}

/// Application metadata
pub mod app_info {
    use std::path::Path;

    /// Application version from the build environment
    pub fn version() -> &'static str {
        env!("GIT_VERSION")
    }

    /// Running inside a Flatpak sandbox?
    pub fn is_flatpak() -> bool {
        Path::new("/.flatpak-info").exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_file_name_is_png() {
        assert!(photo::DEFAULT_FILE_NAME.ends_with(".png"));
        assert_eq!(photo::MIME_TYPE, "image/png");
    }

    #[test]
    fn test_portal_response_codes_distinct() {
        assert_ne!(portal::RESPONSE_SUCCESS, portal::RESPONSE_CANCELLED);
    }
}
