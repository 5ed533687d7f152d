// SPDX-License-Identifier: GPL-3.0-only

//! PipeWire camera provider
//!
//! Access goes through the xdg-desktop-portal camera interface when one is
//! running; frames come from a GStreamer `pipewiresrc` pipeline.

mod pipeline;
pub mod portal;

pub use pipeline::{PipeWirePipeline, pipeline_description};

use super::CameraProvider;
use super::types::*;
use futures::FutureExt;
use futures::future::BoxFuture;
use portal::PortalAccess;
use tracing::{info, warn};

/// Label used when the portal does not tell us which camera we got
const DEFAULT_CAMERA_LABEL: &str = "Default camera";

/// System camera through PipeWire
#[derive(Debug, Default)]
pub struct PipeWireProvider;

impl PipeWireProvider {
    pub fn new() -> Self {
        Self
    }
}

impl CameraProvider for PipeWireProvider {
    fn name(&self) -> &str {
        "PipeWire"
    }

    fn is_supported(&self) -> bool {
        if let Err(e) = gstreamer::init() {
            warn!(error = %e, "GStreamer unavailable");
            return false;
        }
        let available = gstreamer::ElementFactory::find("pipewiresrc").is_some();
        if !available {
            warn!("pipewiresrc element not found, camera capture unsupported");
        }
        available
    }

    fn request_access(&self) -> BoxFuture<'static, MediaResult<StreamGrant>> {
        async {
            match portal::access_camera().await? {
                PortalAccess::Granted(remote) => {
                    Ok(StreamGrant::new(DEFAULT_CAMERA_LABEL, Some(remote)))
                }
                PortalAccess::Unavailable => {
                    info!("No camera portal, using the PipeWire daemon directly");
                    Ok(StreamGrant::new(DEFAULT_CAMERA_LABEL, None))
                }
            }
        }
        .boxed()
    }

    fn open_stream(
        &self,
        grant: &StreamGrant,
        frames: FrameSender,
    ) -> MediaResult<Box<dyn ActiveStream>> {
        let pipeline = PipeWirePipeline::new(grant, frames)?;
        Ok(Box::new(pipeline))
    }
}
