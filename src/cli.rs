// SPDX-License-Identifier: GPL-3.0-only

//! CLI commands
//!
//! `selfie snap` drives the same camera view the window uses, without a
//! window: mount, ask for access, wait for the first frame, capture, save.

use futures::StreamExt;
use futures::channel::mpsc;
use selfie::app::camera_view::{CameraView, MountOutcome};
use selfie::backends::camera::{CameraProvider, FrameReceiver, FrameSender, provider_for};
use selfie::constants::{photo, pipeline};
use selfie::errors::{AppError, AppResult, CameraError};
use selfie::storage;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Take a single photo and write it as PNG
pub fn snap(
    output: Option<PathBuf>,
    source: Option<PathBuf>,
    timeout_secs: u64,
) -> AppResult<()> {
    let provider = provider_for(source);
    let mut view = CameraView::new(true);

    if view.mount(provider.as_ref())? == MountOutcome::Unsupported {
        return Err(CameraError::Unsupported.into());
    }
    println!("Using source: {}", provider.name());

    let output_path = match output {
        Some(path) if path.is_dir() => path.join(photo::DEFAULT_FILE_NAME),
        Some(path) => path,
        None => storage::download_path(None, photo::DEFAULT_FILE_NAME),
    };

    let rt = tokio::runtime::Runtime::new()?;
    let saved = rt.block_on(capture_one(
        &mut view,
        provider.as_ref(),
        output_path,
        Duration::from_secs(timeout_secs),
    ))?;

    println!("Photo saved: {}", saved.display());
    Ok(())
}

async fn capture_one(
    view: &mut CameraView,
    provider: &dyn CameraProvider,
    output_path: PathBuf,
    timeout: Duration,
) -> AppResult<PathBuf> {
    let grant = match provider.request_access().await {
        Ok(grant) => grant,
        Err(err) => {
            view.permission_denied(err.clone())?;
            return Err(CameraError::Access(err).into());
        }
    };
    println!("Camera: {}", grant.label);
    view.permission_granted(grant.clone())?;

    let (sender, mut receiver): (FrameSender, FrameReceiver) =
        mpsc::channel(pipeline::FRAME_CHANNEL_CAPACITY);
    let _stream = provider.open_stream(&grant, sender)?;

    println!("Capturing...");
    let first_frame = tokio::time::timeout(timeout, async {
        while let Some(frame) = receiver.next().await {
            if view.frame_received(Arc::new(frame)) {
                return true;
            }
        }
        false
    })
    .await;

    match first_frame {
        Ok(true) => {}
        Ok(false) => {
            return Err(AppError::Other(
                "Camera stream ended before a frame arrived".into(),
            ));
        }
        Err(_) => {
            return Err(AppError::Other(format!(
                "No frame from the camera within {}s",
                timeout.as_secs()
            )));
        }
    }

    let snapshot = view.capture_pressed()?;
    println!("Captured {}x{}", snapshot.width, snapshot.height);

    Ok(storage::save_png(snapshot.png_shared(), output_path).await?)
}
