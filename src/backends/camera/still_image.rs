// SPDX-License-Identifier: GPL-3.0-only

//! File-backed camera that replays a single still image
//!
//! Useful on machines without a camera and for demos: the image is decoded
//! once and re-sent as an RGBA frame at a fixed interval.

use super::CameraProvider;
use super::types::*;
use crate::constants::timing;
use futures::FutureExt;
use futures::future::BoxFuture;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Camera provider backed by an image file
#[derive(Debug, Clone)]
pub struct StillImageProvider {
    path: PathBuf,
}

impl StillImageProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

/// Load an image file and convert it to a CameraFrame
pub fn load_image_as_frame(path: &Path) -> MediaResult<CameraFrame> {
    info!(path = %path.display(), "Loading image file");

    let img = image::open(path).map_err(|e| {
        MediaAccessError::new(
            MediaErrorKind::NotReadable,
            format!("Failed to load image '{}': {}", path.display(), e),
        )
    })?;

    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    info!(width, height, "Image loaded successfully");

    Ok(CameraFrame::from_rgba(width, height, rgba.into_raw()))
}

impl CameraProvider for StillImageProvider {
    fn name(&self) -> &str {
        "still image"
    }

    fn is_supported(&self) -> bool {
        true
    }

    fn request_access(&self) -> BoxFuture<'static, MediaResult<StreamGrant>> {
        let path = self.path.clone();
        async move {
            if !path.is_file() {
                return Err(MediaAccessError::new(
                    MediaErrorKind::NotFound,
                    format!("No such image: {}", path.display()),
                ));
            }
            let label = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            Ok(StreamGrant::new(label, None))
        }
        .boxed()
    }

    fn open_stream(
        &self,
        grant: &StreamGrant,
        frames: FrameSender,
    ) -> MediaResult<Box<dyn ActiveStream>> {
        let still = load_image_as_frame(&self.path)?;
        let running = Arc::new(AtomicBool::new(true));
        let thread_running = Arc::clone(&running);
        let interval = Duration::from_millis(timing::STILL_FRAME_INTERVAL_MS);

        std::thread::Builder::new()
            .name("still-image-source".to_string())
            .spawn(move || {
                let mut sender = frames;
                while thread_running.load(Ordering::Acquire) {
                    let frame = CameraFrame {
                        captured_at: Instant::now(),
                        ..still.clone()
                    };
                    if let Err(e) = sender.try_send(frame) {
                        if e.is_disconnected() {
                            debug!("Frame receiver gone, still image source exiting");
                            break;
                        }
                    }
                    std::thread::sleep(interval);
                }
            })
            .map_err(|e| MediaAccessError::new(MediaErrorKind::NotReadable, e.to_string()))?;

        Ok(Box::new(StillImageStream {
            label: grant.label.clone(),
            running,
        }))
    }
}

/// Handle for a running still image source
struct StillImageStream {
    label: String,
    running: Arc<AtomicBool>,
}

impl ActiveStream for StillImageStream {
    fn describe(&self) -> String {
        format!("still image '{}'", self.label)
    }
}

impl Drop for StillImageStream {
    fn drop(&mut self) {
        self.running.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;

    fn write_test_image(dir: &Path, width: u32, height: u32) -> PathBuf {
        let path = dir.join("face.png");
        let img = image::RgbaImage::from_pixel(width, height, image::Rgba([200, 120, 40, 255]));
        img.save(&path).unwrap();
        path
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let provider = StillImageProvider::new("/nonexistent/face.png");
        let err = provider.request_access().await.unwrap_err();
        assert_eq!(err.kind, MediaErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_streams_image_frames() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_test_image(dir.path(), 8, 6);
        let provider = StillImageProvider::new(&path);

        let grant = provider.request_access().await.unwrap();
        assert_eq!(grant.label, "face.png");

        let (sender, mut receiver) = futures::channel::mpsc::channel(2);
        let stream = provider.open_stream(&grant, sender).unwrap();
        let frame = receiver.next().await.unwrap();
        assert_eq!((frame.width, frame.height), (8, 6));
        assert_eq!(&frame.data[..4], &[200, 120, 40, 255]);
        drop(stream);
    }
}
