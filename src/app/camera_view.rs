// SPDX-License-Identifier: GPL-3.0-only

//! Camera view state machine
//!
//! Owns everything the camera screen shows: the video surface, the captured
//! snapshot, the error message and which regions are visible. Each user or
//! system event maps to one method. The view is free of UI toolkit types so
//! it can be driven directly in tests with a fake provider.
//!
//! ```text
//! Idle ──mount──▶ PermissionRequested ──first frame / start──▶ Streaming ◀──delete──┐
//!  │                     │                                        │                 │
//!  │ unsupported         │ denied                                 └──capture──▶ Captured
//!  ▼                     ▼
//! Error ◀────────────────┘
//! ```

use crate::backends::camera::{CameraFrame, CameraProvider, MediaAccessError, StreamGrant};
use crate::errors::{AppError, CameraError, PhotoError};
use crate::fl;
use crate::pipelines::photo::{self, Snapshot};
use std::sync::Arc;
use tracing::{debug, error, info};

/// Lifecycle phase of the view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    PermissionRequested,
    Streaming,
    Captured,
    /// Terminal for the session
    Error,
}

/// Mutually exclusive top-level display modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    StartPrompt,
    Error,
    Streaming,
    Captured,
}

/// Visibility of each screen region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Regions {
    pub start_prompt: bool,
    pub error_message: bool,
    pub video: bool,
    pub controls: bool,
    pub snapshot: bool,
}

impl Regions {
    /// Every mode whose region is currently shown
    pub fn visible_modes(&self) -> Vec<ViewMode> {
        let mut modes = Vec::with_capacity(1);
        if self.start_prompt {
            modes.push(ViewMode::StartPrompt);
        }
        if self.error_message {
            modes.push(ViewMode::Error);
        }
        if self.video {
            modes.push(ViewMode::Streaming);
        }
        if self.snapshot {
            modes.push(ViewMode::Captured);
        }
        modes
    }
}

/// Playback state of the video surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Playback {
    #[default]
    Stopped,
    Playing,
    Paused,
}

/// Where the live stream is rendered
///
/// Frames are only accepted while playing; pausing freezes the last frame.
#[derive(Debug, Default)]
pub struct VideoSurface {
    stream: Option<StreamGrant>,
    playback: Playback,
    frame: Option<Arc<CameraFrame>>,
    awaiting_first_frame: bool,
}

impl VideoSurface {
    /// Attach a granted stream; replaces any previous one
    pub fn attach(&mut self, grant: StreamGrant) {
        info!(camera = %grant.label, id = grant.id, "Stream attached to video surface");
        self.stream = Some(grant);
        self.frame = None;
    }

    pub fn stream(&self) -> Option<&StreamGrant> {
        self.stream.as_ref()
    }

    pub fn play(&mut self) {
        if self.playback != Playback::Playing {
            debug!(from = ?self.playback, "Video playback starting");
            self.playback = Playback::Playing;
            self.awaiting_first_frame = true;
        }
    }

    pub fn pause(&mut self) {
        if self.playback == Playback::Playing {
            debug!("Video playback paused");
            self.playback = Playback::Paused;
        }
    }

    pub fn playback(&self) -> Playback {
        self.playback
    }

    pub fn is_playing(&self) -> bool {
        self.playback == Playback::Playing
    }

    /// Offer a frame; returns true when it is the first one since `play`
    pub fn push_frame(&mut self, frame: Arc<CameraFrame>) -> bool {
        if !self.is_playing() {
            return false;
        }
        self.frame = Some(frame);
        std::mem::take(&mut self.awaiting_first_frame)
    }

    pub fn current_frame(&self) -> Option<&Arc<CameraFrame>> {
        self.frame.as_ref()
    }

    /// Intrinsic size of the video, (0, 0) before the first frame
    pub fn intrinsic_size(&self) -> (u32, u32) {
        self.frame
            .as_ref()
            .map(|f| (f.width, f.height))
            .unwrap_or((0, 0))
    }
}

/// Enablement of the photo controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Controls {
    pub delete_enabled: bool,
    pub download_enabled: bool,
}

/// Events the view reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Mount,
    PermissionGranted,
    PermissionDenied,
    StreamFailed,
    Start,
    Capture,
    Delete,
    Download,
}

/// Why an event did not change the view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionError {
    /// The event has no transition from the current phase
    Ignored { event: Event, phase: Phase },
    /// Capturing failed; the view did not change
    Capture(PhotoError),
}

impl std::fmt::Display for TransitionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransitionError::Ignored { event, phase } => {
                write!(f, "{:?} ignored in phase {:?}", event, phase)
            }
            TransitionError::Capture(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for TransitionError {}

impl From<TransitionError> for AppError {
    fn from(err: TransitionError) -> Self {
        match err {
            TransitionError::Capture(e) => AppError::Photo(e),
            ignored => AppError::Other(ignored.to_string()),
        }
    }
}

/// What mounting decided
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountOutcome {
    /// Capability present; the caller must now run the provider's access request
    PermissionRequested,
    /// No capture capability; the error is showing
    Unsupported,
}

/// The camera screen
#[derive(Debug)]
pub struct CameraView {
    phase: Phase,
    regions: Regions,
    video: VideoSurface,
    snapshot: Option<Snapshot>,
    error: Option<CameraError>,
    controls: Controls,
    autoplay: bool,
}

impl Default for CameraView {
    fn default() -> Self {
        Self::new(true)
    }
}

impl CameraView {
    /// A fresh view showing the start prompt
    ///
    /// With `autoplay` off a granted stream waits for the start control.
    pub fn new(autoplay: bool) -> Self {
        Self {
            phase: Phase::Idle,
            regions: Regions {
                start_prompt: true,
                ..Regions::default()
            },
            video: VideoSurface::default(),
            snapshot: None,
            error: None,
            controls: Controls::default(),
            autoplay,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn regions(&self) -> Regions {
        self.regions
    }

    /// The single visible mode
    pub fn mode(&self) -> ViewMode {
        match self.regions.visible_modes().as_slice() {
            [mode] => *mode,
            // hide_ui before every reveal keeps exactly one mode visible
            _ => ViewMode::StartPrompt,
        }
    }

    pub fn video(&self) -> &VideoSurface {
        &self.video
    }

    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }

    pub fn controls(&self) -> Controls {
        self.controls
    }

    pub fn error(&self) -> Option<&CameraError> {
        self.error.as_ref()
    }

    /// Text of the error region
    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(|err| match err {
            CameraError::Unsupported => fl!("error-unsupported"),
            CameraError::Access(e) => fl!("error-access", name = e.name()),
        })
    }

    pub fn set_autoplay(&mut self, autoplay: bool) {
        self.autoplay = autoplay;
    }

    /// Probe the provider and move on to the permission request
    pub fn mount(&mut self, provider: &dyn CameraProvider) -> Result<MountOutcome, TransitionError> {
        self.expect_phase(Event::Mount, &[Phase::Idle])?;

        if !provider.is_supported() {
            self.display_error(CameraError::Unsupported);
            return Ok(MountOutcome::Unsupported);
        }

        info!(provider = provider.name(), "Requesting camera permission");
        self.phase = Phase::PermissionRequested;
        Ok(MountOutcome::PermissionRequested)
    }

    /// Access granted: attach the stream and start playback unless autoplay is off
    ///
    /// The view stays in `PermissionRequested` until playback actually begins.
    pub fn permission_granted(&mut self, grant: StreamGrant) -> Result<(), TransitionError> {
        self.expect_pending_grant(Event::PermissionGranted)?;
        self.video.attach(grant);
        if self.autoplay {
            self.video.play();
        } else {
            info!("Autoplay disabled, waiting for the start control");
        }
        Ok(())
    }

    /// Access denied or failed; terminal for the session
    pub fn permission_denied(&mut self, err: MediaAccessError) -> Result<(), TransitionError> {
        self.expect_pending_grant(Event::PermissionDenied)?;
        self.display_error(CameraError::Access(err));
        Ok(())
    }

    /// The granted stream could not be opened or died
    pub fn stream_failed(&mut self, err: MediaAccessError) -> Result<(), TransitionError> {
        self.expect_phase(
            Event::StreamFailed,
            &[Phase::PermissionRequested, Phase::Streaming, Phase::Captured],
        )?;
        self.display_error(CameraError::Access(err));
        Ok(())
    }

    /// A frame arrived from the stream
    ///
    /// Returns true when this frame revealed the video (playback began).
    pub fn frame_received(&mut self, frame: Arc<CameraFrame>) -> bool {
        if self.phase == Phase::Error {
            return false;
        }
        let first_since_play = self.video.push_frame(frame);
        if first_since_play && matches!(self.phase, Phase::Idle | Phase::PermissionRequested) {
            info!("Video began playing");
            self.show_video();
            return true;
        }
        false
    }

    /// Start control tapped; needed where playback can't start unprompted
    pub fn start_pressed(&mut self) -> Result<(), TransitionError> {
        self.expect_phase(Event::Start, &[Phase::Idle, Phase::PermissionRequested])?;
        self.video.play();
        self.show_video();
        Ok(())
    }

    /// Capture control tapped: snapshot the current frame and freeze the video
    pub fn capture_pressed(&mut self) -> Result<&Snapshot, TransitionError> {
        self.expect_phase(Event::Capture, &[Phase::Streaming])?;

        let (width, height) = self.video.intrinsic_size();
        let snapshot = match self.video.current_frame() {
            Some(frame) => photo::take_snapshot(frame),
            None => Err(PhotoError::NoFrameAvailable),
        }
        .map_err(|e| {
            info!(width, height, error = %e, "Capture skipped");
            TransitionError::Capture(e)
        })?;

        self.hide_ui();
        self.regions.snapshot = true;
        self.regions.controls = true;
        self.controls = Controls {
            delete_enabled: true,
            download_enabled: true,
        };
        self.video.pause();
        self.phase = Phase::Captured;
        info!(width, height, "Photo captured");

        Ok(self.snapshot.insert(snapshot))
    }

    /// Delete control tapped: drop the snapshot and resume the video
    pub fn delete_pressed(&mut self) -> Result<(), TransitionError> {
        self.expect_phase(Event::Delete, &[Phase::Captured])?;
        self.snapshot = None;
        self.controls = Controls::default();
        self.video.play();
        self.show_video();
        info!("Photo deleted, playback resumed");
        Ok(())
    }

    /// The snapshot the download control points at
    pub fn download_target(&self) -> Result<&Snapshot, TransitionError> {
        match (&self.snapshot, self.controls.download_enabled) {
            (Some(snapshot), true) => Ok(snapshot),
            _ => Err(TransitionError::Ignored {
                event: Event::Download,
                phase: self.phase,
            }),
        }
    }

    fn expect_phase(&self, event: Event, allowed: &[Phase]) -> Result<(), TransitionError> {
        if allowed.contains(&self.phase) {
            Ok(())
        } else {
            debug!(?event, phase = ?self.phase, "Event ignored");
            Err(TransitionError::Ignored {
                event,
                phase: self.phase,
            })
        }
    }

    /// The permission answer is still outstanding; the start control may
    /// already have moved the view to `Streaming`
    fn expect_pending_grant(&self, event: Event) -> Result<(), TransitionError> {
        if self.phase == Phase::Streaming && self.video.stream().is_none() {
            return Ok(());
        }
        self.expect_phase(event, &[Phase::PermissionRequested])
    }

    fn show_video(&mut self) {
        self.hide_ui();
        self.regions.video = true;
        self.regions.controls = true;
        self.phase = Phase::Streaming;
    }

    fn display_error(&mut self, err: CameraError) {
        error!(error = %err, "Camera unavailable");
        self.error = Some(err);
        self.hide_ui();
        self.regions.error_message = true;
        self.phase = Phase::Error;
    }

    fn hide_ui(&mut self) {
        self.regions = Regions::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::camera::{MediaErrorKind, MediaResult};
    use crate::backends::camera::{ActiveStream, FrameSender};
    use futures::FutureExt;
    use futures::future::BoxFuture;

    struct StubProvider(bool);

    impl CameraProvider for StubProvider {
        fn name(&self) -> &str {
            "probe"
        }

        fn is_supported(&self) -> bool {
            self.0
        }

        fn request_access(&self) -> BoxFuture<'static, MediaResult<StreamGrant>> {
            async { Ok(StreamGrant::new("probe", None)) }.boxed()
        }

        fn open_stream(
            &self,
            _grant: &StreamGrant,
            _frames: FrameSender,
        ) -> MediaResult<Box<dyn ActiveStream>> {
            Err(MediaAccessError::new(MediaErrorKind::NotReadable, "no stream in unit tests"))
        }
    }

    fn frame(width: u32, height: u32) -> Arc<CameraFrame> {
        Arc::new(CameraFrame::from_rgba(
            width,
            height,
            vec![128u8; (width * height * 4) as usize],
        ))
    }

    fn streaming_view() -> CameraView {
        let mut view = CameraView::new(true);
        view.mount(&StubProvider(true)).unwrap();
        view.permission_granted(StreamGrant::new("cam", None)).unwrap();
        assert!(view.frame_received(frame(4, 3)));
        view
    }

    #[test]
    fn test_initial_state_shows_start_prompt() {
        let view = CameraView::default();
        assert_eq!(view.phase(), Phase::Idle);
        assert_eq!(view.mode(), ViewMode::StartPrompt);
        assert!(!view.regions().controls);
    }

    #[test]
    fn test_grant_without_autoplay_waits_for_start() {
        let mut view = CameraView::new(false);
        view.mount(&StubProvider(true)).unwrap();
        view.permission_granted(StreamGrant::new("cam", None)).unwrap();
        assert!(!view.frame_received(frame(4, 3)));
        assert_eq!(view.phase(), Phase::PermissionRequested);
        assert_eq!(view.mode(), ViewMode::StartPrompt);

        view.start_pressed().unwrap();
        assert_eq!(view.phase(), Phase::Streaming);
        assert!(view.video().is_playing());
    }

    #[test]
    fn test_grant_after_early_start_attaches_stream() {
        let mut view = CameraView::new(true);
        view.mount(&StubProvider(true)).unwrap();
        view.start_pressed().unwrap();
        assert_eq!(view.phase(), Phase::Streaming);

        view.permission_granted(StreamGrant::new("cam", None)).unwrap();
        assert!(view.video().stream().is_some());
        assert!(view.video().is_playing());
        view.frame_received(frame(4, 3));
        assert_eq!(view.video().intrinsic_size(), (4, 3));
        assert!(view.permission_granted(StreamGrant::new("again", None)).is_err());
    }

    #[test]
    fn test_denial_after_early_start_shows_error() {
        let mut view = CameraView::new(true);
        view.mount(&StubProvider(true)).unwrap();
        view.start_pressed().unwrap();
        assert!(view.video().stream().is_none());

        view.permission_denied(MediaAccessError::new(MediaErrorKind::NotAllowed, "denied"))
            .unwrap();
        assert_eq!(view.phase(), Phase::Error);
        assert_eq!(view.regions().visible_modes(), vec![ViewMode::Error]);
        assert!(!view.regions().video);
        assert!(!view.regions().controls);
        assert!(view.error_message().unwrap().contains("NotAllowedError"));
    }

    #[test]
    fn test_frames_ignored_while_paused() {
        let mut view = streaming_view();
        view.capture_pressed().unwrap();
        view.frame_received(frame(8, 8));
        assert_eq!(view.video().intrinsic_size(), (4, 3));
    }

    #[test]
    fn test_capture_without_frame_is_distinguishable() {
        let mut view = CameraView::new(true);
        view.start_pressed().unwrap();
        let err = view.capture_pressed().unwrap_err();
        assert_eq!(err, TransitionError::Capture(PhotoError::NoFrameAvailable));
        assert_eq!(view.phase(), Phase::Streaming);
        assert!(view.snapshot().is_none());
    }

    #[test]
    fn test_error_is_terminal() {
        let mut view = CameraView::new(true);
        view.mount(&StubProvider(false)).unwrap();
        assert_eq!(
            view.start_pressed(),
            Err(TransitionError::Ignored {
                event: Event::Start,
                phase: Phase::Error
            })
        );
        assert!(!view.frame_received(frame(4, 3)));
        assert_eq!(view.mode(), ViewMode::Error);
    }

    #[test]
    fn test_delete_only_from_captured() {
        let mut view = streaming_view();
        assert!(view.delete_pressed().is_err());
        assert!(view.download_target().is_err());
    }

    #[test]
    fn test_stream_failure_shows_error() {
        let mut view = streaming_view();
        view.stream_failed(MediaAccessError::new(MediaErrorKind::NotReadable, "gone"))
            .unwrap();
        assert_eq!(view.mode(), ViewMode::Error);
        assert!(view.error_message().unwrap().contains("NotReadableError"));
    }
}
