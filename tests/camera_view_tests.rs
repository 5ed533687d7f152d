// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for the camera view state machine

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use futures::FutureExt;
use futures::future::BoxFuture;
use selfie::app::camera_view::{Event, MountOutcome, TransitionError};
use selfie::backends::camera::{
    ActiveStream, CameraFrame, CameraProvider, FrameSender, MediaAccessError, MediaErrorKind,
    MediaResult, StreamGrant,
};
use selfie::{CameraView, Phase, PhotoError, ViewMode};
use std::sync::Arc;

/// Provider whose capability and permission answer are fixed up front
struct FakeProvider {
    supported: bool,
    answer: Result<(), MediaErrorKind>,
}

impl FakeProvider {
    fn granting() -> Self {
        Self {
            supported: true,
            answer: Ok(()),
        }
    }

    fn denying(kind: MediaErrorKind) -> Self {
        Self {
            supported: true,
            answer: Err(kind),
        }
    }

    fn unsupported() -> Self {
        Self {
            supported: false,
            answer: Ok(()),
        }
    }
}

impl CameraProvider for FakeProvider {
    fn name(&self) -> &str {
        "fake"
    }

    fn is_supported(&self) -> bool {
        self.supported
    }

    fn request_access(&self) -> BoxFuture<'static, MediaResult<StreamGrant>> {
        let answer = self.answer;
        async move {
            match answer {
                Ok(()) => Ok(StreamGrant::new("Fake camera", None)),
                Err(kind) => Err(MediaAccessError::new(kind, "refused")),
            }
        }
        .boxed()
    }

    fn open_stream(
        &self,
        _grant: &StreamGrant,
        _frames: FrameSender,
    ) -> MediaResult<Box<dyn ActiveStream>> {
        Err(MediaAccessError::new(
            MediaErrorKind::NotReadable,
            "frames are injected by the test",
        ))
    }
}

fn frame(width: u32, height: u32) -> Arc<CameraFrame> {
    let mut pixels = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        for x in 0..width {
            pixels.extend_from_slice(&[(x % 256) as u8, (y % 256) as u8, 200, 255]);
        }
    }
    Arc::new(CameraFrame::from_rgba(width, height, pixels))
}

async fn granted_view(provider: &FakeProvider) -> CameraView {
    let mut view = CameraView::new(true);
    assert_eq!(
        view.mount(provider).unwrap(),
        MountOutcome::PermissionRequested
    );
    let grant = provider.request_access().await.unwrap();
    view.permission_granted(grant).unwrap();
    view
}

async fn streaming_view() -> CameraView {
    let mut view = granted_view(&FakeProvider::granting()).await;
    assert!(view.frame_received(frame(640, 480)));
    view
}

fn assert_single_mode(view: &CameraView) {
    let modes = view.regions().visible_modes();
    assert_eq!(modes.len(), 1, "exactly one mode visible, got {modes:?}");
    assert_eq!(modes[0], view.mode());
}

#[test]
fn test_unsupported_environment_shows_support_error() {
    let mut view = CameraView::new(true);
    let outcome = view.mount(&FakeProvider::unsupported()).unwrap();

    assert_eq!(outcome, MountOutcome::Unsupported);
    assert_eq!(view.phase(), Phase::Error);
    assert_eq!(view.mode(), ViewMode::Error);
    assert!(!view.regions().start_prompt);
    assert!(!view.regions().controls);
    // Desktop wording of the web original's "Your browser doesn't have support
    // for the navigator.getUserMedia interface."
    let message = view.error_message().unwrap();
    assert!(message.contains("doesn't have support for camera capture"));
}

#[tokio::test]
async fn test_granted_stream_starts_playing() {
    let mut view = granted_view(&FakeProvider::granting()).await;
    assert!(view.video().stream().is_some());
    assert!(view.video().is_playing());
    // Still waiting for playback to actually begin
    assert_eq!(view.phase(), Phase::PermissionRequested);

    assert!(view.frame_received(frame(640, 480)));
    assert_eq!(view.phase(), Phase::Streaming);
    assert!(view.regions().video);
    assert!(view.regions().controls);
    assert!(!view.regions().start_prompt);
    assert_single_mode(&view);
}

#[tokio::test]
async fn test_capture_produces_png_data_url() {
    let mut view = streaming_view().await;

    let snapshot = view.capture_pressed().unwrap();
    assert_eq!((snapshot.width, snapshot.height), (640, 480));
    let url = snapshot.data_url();
    let payload = url.strip_prefix("data:image/png;base64,").unwrap();
    let png = STANDARD.decode(payload).unwrap();
    let decoded = image::load_from_memory(&png).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (640, 480));

    assert_eq!(view.phase(), Phase::Captured);
    assert!(view.regions().snapshot);
    assert!(!view.regions().video);
    assert!(view.controls().delete_enabled);
    assert!(view.controls().download_enabled);
    assert!(!view.video().is_playing());
    assert_single_mode(&view);
}

#[tokio::test]
async fn test_capture_keeps_pixels() {
    let mut view = streaming_view().await;
    let png = view.capture_pressed().unwrap().png_bytes().to_vec();
    let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
    assert_eq!(decoded.get_pixel(10, 20).0, [10, 20, 200, 255]);
}

#[tokio::test]
async fn test_delete_resumes_video() {
    let mut view = streaming_view().await;
    view.capture_pressed().unwrap();
    view.delete_pressed().unwrap();

    assert_eq!(view.phase(), Phase::Streaming);
    assert!(view.snapshot().is_none());
    assert!(view.regions().video);
    assert!(!view.regions().snapshot);
    assert!(!view.controls().delete_enabled);
    assert!(!view.controls().download_enabled);
    assert!(view.video().is_playing());
    assert!(view.download_target().is_err());
}

#[tokio::test]
async fn test_one_mode_visible_through_capture_delete_cycles() {
    let mut view = CameraView::new(true);
    assert_single_mode(&view);
    let provider = FakeProvider::granting();
    view.mount(&provider).unwrap();
    assert_single_mode(&view);
    view.permission_granted(provider.request_access().await.unwrap())
        .unwrap();
    assert_single_mode(&view);
    view.frame_received(frame(32, 24));
    assert_single_mode(&view);

    for round in 0..5 {
        view.capture_pressed().unwrap();
        assert_single_mode(&view);
        assert_eq!(view.mode(), ViewMode::Captured, "round {round}");
        // Repeated taps in the wrong phase change nothing
        assert!(view.capture_pressed().is_err());
        assert_single_mode(&view);
        view.delete_pressed().unwrap();
        assert_single_mode(&view);
        assert_eq!(view.mode(), ViewMode::Streaming, "round {round}");
        view.frame_received(frame(32 + round, 24));
    }
}

#[tokio::test]
async fn test_denied_permission_shows_error_name() {
    let provider = FakeProvider::denying(MediaErrorKind::NotAllowed);
    let mut view = CameraView::new(true);
    view.mount(&provider).unwrap();
    let err = provider.request_access().await.unwrap_err();
    view.permission_denied(err).unwrap();

    assert_eq!(view.phase(), Phase::Error);
    assert_single_mode(&view);
    let message = view.error_message().unwrap();
    assert!(message.contains("There was an error with accessing the camera stream"));
    assert!(message.contains("NotAllowedError"));
    assert!(!view.regions().controls);
}

#[tokio::test]
async fn test_error_ignores_later_events() {
    let provider = FakeProvider::denying(MediaErrorKind::NotFound);
    let mut view = CameraView::new(true);
    view.mount(&provider).unwrap();
    view.permission_denied(provider.request_access().await.unwrap_err())
        .unwrap();

    assert!(!view.frame_received(frame(8, 8)));
    assert_eq!(
        view.capture_pressed().unwrap_err(),
        TransitionError::Ignored {
            event: Event::Capture,
            phase: Phase::Error
        }
    );
    assert!(view.permission_granted(StreamGrant::new("late", None)).is_err());
    assert_eq!(view.mode(), ViewMode::Error);
}

#[test]
fn test_manual_start_without_autoplay() {
    let mut view = CameraView::new(false);
    view.mount(&FakeProvider::granting()).unwrap();
    view.permission_granted(StreamGrant::new("cam", None)).unwrap();
    assert!(!view.video().is_playing());
    assert_eq!(view.mode(), ViewMode::StartPrompt);

    view.start_pressed().unwrap();
    assert_eq!(view.mode(), ViewMode::Streaming);
    assert!(view.video().is_playing());
    // The first frame after a manual start does not re-run the reveal
    assert!(!view.frame_received(frame(4, 4)));
    assert_eq!(view.video().intrinsic_size(), (4, 4));
}

#[test]
fn test_capture_before_first_frame_is_reported() {
    let mut view = CameraView::new(true);
    view.start_pressed().unwrap();
    assert_eq!(
        view.capture_pressed().unwrap_err(),
        TransitionError::Capture(PhotoError::NoFrameAvailable)
    );
    assert_eq!(view.mode(), ViewMode::Streaming);
}

#[tokio::test]
async fn test_zero_sized_frame_cannot_be_captured() {
    let mut view = streaming_view().await;
    view.frame_received(frame(0, 480));
    assert_eq!(view.video().intrinsic_size(), (0, 480));

    assert_eq!(
        view.capture_pressed().unwrap_err(),
        TransitionError::Capture(PhotoError::NoFrameAvailable)
    );
    assert_eq!(view.phase(), Phase::Streaming);
    assert_eq!(view.mode(), ViewMode::Streaming);
    assert!(view.snapshot().is_none());
    assert!(view.video().is_playing());
}

#[tokio::test]
async fn test_photo_taken_for_download_survives_recapture() {
    let mut view = streaming_view().await;
    // What the save dialog holds on to while it is open
    let pending = view.capture_pressed().unwrap().png_shared();

    view.delete_pressed().unwrap();
    view.frame_received(frame(320, 240));
    let current = view.capture_pressed().unwrap().png_shared();

    let kept = image::load_from_memory(&pending).unwrap();
    assert_eq!((kept.width(), kept.height()), (640, 480));
    let replaced = image::load_from_memory(&current).unwrap();
    assert_eq!((replaced.width(), replaced.height()), (320, 240));
}

#[test]
fn test_mount_twice_is_ignored() {
    let mut view = CameraView::new(true);
    view.mount(&FakeProvider::granting()).unwrap();
    assert!(view.mount(&FakeProvider::granting()).is_err());
    assert_eq!(view.phase(), Phase::PermissionRequested);
}
