// SPDX-License-Identifier: GPL-3.0-only

//! Still capture pipeline
//!
//! ```text
//! CameraFrame → draw onto canvas (RgbaImage) → PNG encode → Snapshot
//! ```

pub mod capture;
pub mod encoding;

pub use encoding::Snapshot;

use crate::backends::camera::types::CameraFrame;
use crate::errors::PhotoError;

/// Rasterize a frame into an encoded snapshot
pub fn take_snapshot(frame: &CameraFrame) -> Result<Snapshot, PhotoError> {
    let canvas = capture::draw_frame(frame)?;
    encoding::encode_png(&canvas)
}
