// SPDX-License-Identifier: GPL-3.0-only

//! Drawing a video frame onto an offscreen canvas
//!
//! The canvas is an `RgbaImage` sized to the frame's intrinsic dimensions.
//! Stride padding of the source rows is dropped.

use crate::backends::camera::types::CameraFrame;
use crate::errors::PhotoError;
use image::RgbaImage;
use tracing::debug;

/// Copy the current frame into a freshly sized canvas
///
/// Fails with [`PhotoError::NoFrameAvailable`] when either dimension is zero,
/// which is the case until the stream has produced its first frame.
pub fn draw_frame(frame: &CameraFrame) -> Result<RgbaImage, PhotoError> {
    if !frame.has_pixels() {
        return Err(PhotoError::NoFrameAvailable);
    }

    let row_bytes = frame.row_bytes();
    let stride = frame.stride as usize;
    let height = frame.height as usize;
    if stride < row_bytes {
        return Err(PhotoError::CaptureFailed(format!(
            "stride {} shorter than row of {} bytes",
            stride, row_bytes
        )));
    }

    let needed = stride * (height - 1) + row_bytes;
    if frame.data.len() < needed {
        return Err(PhotoError::CaptureFailed(format!(
            "frame holds {} bytes, {}x{} needs {}",
            frame.data.len(),
            frame.width,
            frame.height,
            needed
        )));
    }

    let mut pixels = Vec::with_capacity(row_bytes * height);
    for row in frame.data.chunks(stride).take(height) {
        pixels.extend_from_slice(&row[..row_bytes]);
    }

    debug!(width = frame.width, height = frame.height, stride, "Frame drawn to canvas");

    RgbaImage::from_raw(frame.width, frame.height, pixels)
        .ok_or_else(|| PhotoError::CaptureFailed("canvas size mismatch".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::camera::types::FrameData;
    use std::sync::Arc;
    use std::time::Instant;

    #[test]
    fn test_zero_dimensions_are_rejected() {
        let frame = CameraFrame::from_rgba(0, 0, Vec::new());
        assert_eq!(draw_frame(&frame), Err(PhotoError::NoFrameAvailable));

        let frame = CameraFrame::from_rgba(640, 0, Vec::new());
        assert_eq!(draw_frame(&frame), Err(PhotoError::NoFrameAvailable));
    }

    #[test]
    fn test_stride_padding_is_dropped() {
        // 2x2 image, rows padded to 12 bytes
        let mut data = Vec::new();
        data.extend_from_slice(&[1, 1, 1, 255, 2, 2, 2, 255, 0xEE, 0xEE, 0xEE, 0xEE]);
        data.extend_from_slice(&[3, 3, 3, 255, 4, 4, 4, 255]);
        let frame = CameraFrame {
            width: 2,
            height: 2,
            stride: 12,
            data: FrameData::Copied(Arc::from(data.into_boxed_slice())),
            captured_at: Instant::now(),
        };

        let canvas = draw_frame(&frame).unwrap();
        assert_eq!(canvas.dimensions(), (2, 2));
        assert_eq!(canvas.get_pixel(1, 0).0, [2, 2, 2, 255]);
        assert_eq!(canvas.get_pixel(0, 1).0, [3, 3, 3, 255]);
    }

    #[test]
    fn test_short_buffer_is_an_error() {
        let frame = CameraFrame::from_rgba(4, 4, vec![0u8; 10]);
        assert!(matches!(draw_frame(&frame), Err(PhotoError::CaptureFailed(_))));
    }
}
