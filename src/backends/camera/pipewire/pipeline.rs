// SPDX-License-Identifier: GPL-3.0-only

//! PipeWire GStreamer pipeline for camera preview

use crate::backends::camera::types::*;
use crate::constants::{pipeline, timing};
use gstreamer::prelude::*;
use gstreamer_app::AppSink;
use gstreamer_video::VideoInfo;
use std::os::fd::AsRawFd;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use tracing::{debug, error, info, warn};

static FRAME_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Running `pipewiresrc ! videoconvert ! appsink` pipeline
///
/// Frames are converted to RGBA and pushed into the frame channel with
/// `try_send`; frames are dropped while the UI is busy.
pub struct PipeWirePipeline {
    pipeline: gstreamer::Pipeline,
    appsink: AppSink,
    label: String,
}

impl PipeWirePipeline {
    /// Build and start the pipeline for a granted stream
    pub fn new(grant: &StreamGrant, frame_sender: FrameSender) -> MediaResult<Self> {
        info!(camera = %grant.label, via_portal = grant.remote.is_some(), "Creating PipeWire pipeline");

        gstreamer::init().map_err(|e| not_readable(format!("GStreamer init failed: {}", e)))?;

        let description = pipeline_description(grant.remote.as_ref().map(|fd| fd.as_raw_fd()));
        debug!(pipeline = %description, "Launching pipeline");

        let pipeline = gstreamer::parse::launch(&description)
            .map_err(|e| not_readable(format!("Failed to build pipeline: {}", e)))?
            .dynamic_cast::<gstreamer::Pipeline>()
            .map_err(|_| not_readable("Launched element is not a pipeline"))?;

        let appsink = pipeline
            .by_name("sink")
            .ok_or_else(|| not_readable("Failed to get appsink"))?
            .dynamic_cast::<AppSink>()
            .map_err(|_| not_readable("Failed to cast appsink"))?;

        appsink.set_property("emit-signals", true);
        appsink.set_property("sync", false);
        appsink.set_property("max-buffers", pipeline::MAX_BUFFERS);
        appsink.set_property("drop", true);
        appsink.set_property("enable-last-sample", false);

        let mut frame_sender = frame_sender;
        appsink.set_callbacks(
            gstreamer_app::AppSinkCallbacks::builder()
                .new_sample(move |appsink| {
                    let frame_start = Instant::now();
                    let frame_num = FRAME_COUNTER.fetch_add(1, Ordering::Relaxed);

                    let sample = appsink.pull_sample().map_err(|e| {
                        error!(frame = frame_num, error = ?e, "Failed to pull sample");
                        gstreamer::FlowError::Eos
                    })?;
                    let buffer = sample.buffer_owned().ok_or(gstreamer::FlowError::Error)?;

                    if buffer.flags().contains(gstreamer::BufferFlags::CORRUPTED) {
                        warn!(frame = frame_num, "Buffer marked as corrupted, skipping frame");
                        return Ok(gstreamer::FlowSuccess::Ok);
                    }

                    let caps = sample.caps().ok_or(gstreamer::FlowError::Error)?;
                    let video_info = VideoInfo::from_caps(caps).map_err(|e| {
                        error!(frame = frame_num, error = ?e, "Failed to get video info");
                        gstreamer::FlowError::Error
                    })?;

                    let map = buffer.into_mapped_buffer_readable().map_err(|_| {
                        error!(frame = frame_num, "Failed to map buffer");
                        gstreamer::FlowError::Error
                    })?;

                    let frame = CameraFrame {
                        width: video_info.width(),
                        height: video_info.height(),
                        stride: video_info.stride()[0] as u32,
                        data: FrameData::from_mapped_buffer(map),
                        captured_at: frame_start,
                    };

                    match frame_sender.try_send(frame) {
                        Ok(()) => {
                            if frame_num % timing::FRAME_LOG_INTERVAL == 0 {
                                debug!(
                                    frame = frame_num,
                                    width = video_info.width(),
                                    height = video_info.height(),
                                    total_us = frame_start.elapsed().as_micros(),
                                    "Frame delivered"
                                );
                            }
                        }
                        Err(e) if e.is_disconnected() => {
                            info!("Frame receiver gone, ending stream");
                            return Err(gstreamer::FlowError::Eos);
                        }
                        Err(_) => {
                            debug!(frame = frame_num, "Frame dropped (channel full)");
                        }
                    }

                    Ok(gstreamer::FlowSuccess::Ok)
                })
                .build(),
        );

        pipeline
            .set_state(gstreamer::State::Playing)
            .map_err(|e| not_readable(format!("Failed to start pipeline: {}", e)))?;

        let (result, state, pending) = pipeline.state(gstreamer::ClockTime::from_seconds(
            timing::START_TIMEOUT_SECS,
        ));
        debug!(result = ?result, state = ?state, pending = ?pending, "Pipeline state");
        if result.is_err() {
            let _ = pipeline.set_state(gstreamer::State::Null);
            return Err(not_readable("Camera pipeline failed to start"));
        }
        if state != gstreamer::State::Playing {
            warn!("Pipeline is not in PLAYING state yet");
        }

        info!("PipeWire pipeline running");
        Ok(Self {
            pipeline,
            appsink,
            label: grant.label.clone(),
        })
    }
}

impl ActiveStream for PipeWirePipeline {
    fn describe(&self) -> String {
        format!("PipeWire camera '{}'", self.label)
    }
}

impl Drop for PipeWirePipeline {
    fn drop(&mut self) {
        info!("Stopping PipeWire pipeline");
        self.appsink
            .set_callbacks(gstreamer_app::AppSinkCallbacks::builder().build());
        let _ = self.pipeline.set_state(gstreamer::State::Null);
        let (result, state, _) = self.pipeline.state(gstreamer::ClockTime::from_seconds(
            timing::STOP_TIMEOUT_SECS,
        ));
        debug!(result = ?result, state = ?state, "PipeWire pipeline stopped");
    }
}

/// GStreamer launch line; `remote_fd` is the portal's PipeWire remote
pub fn pipeline_description(remote_fd: Option<i32>) -> String {
    let source = match remote_fd {
        Some(fd) => format!("pipewiresrc fd={} do-timestamp=true", fd),
        None => "pipewiresrc do-timestamp=true".to_string(),
    };
    format!(
        "{} ! videoconvert ! video/x-raw,format={} ! appsink name=sink",
        source,
        pipeline::OUTPUT_FORMAT
    )
}

fn not_readable(message: impl Into<String>) -> MediaAccessError {
    MediaAccessError::new(MediaErrorKind::NotReadable, message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_description_without_portal() {
        let desc = pipeline_description(None);
        assert!(desc.starts_with("pipewiresrc do-timestamp=true"));
        assert!(desc.contains("format=RGBA"));
        assert!(desc.ends_with("appsink name=sink"));
    }

    #[test]
    fn test_description_with_portal_remote() {
        let desc = pipeline_description(Some(17));
        assert!(desc.starts_with("pipewiresrc fd=17 "));
    }
}
