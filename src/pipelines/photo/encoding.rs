// SPDX-License-Identifier: GPL-3.0-only

//! PNG encoding of captured frames
//!
//! A [`Snapshot`] holds the encoded PNG and renders as a
//! `data:image/png;base64,...` URL, the same value serves as the image source
//! and as the download target.

use crate::constants::photo;
use crate::errors::PhotoError;
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use image::{ImageFormat, RgbaImage};
use std::io::Cursor;
use std::sync::Arc;
use tracing::{debug, info};

/// A captured and encoded still
#[derive(Clone, PartialEq, Eq)]
pub struct Snapshot {
    png: Arc<[u8]>,
    pub width: u32,
    pub height: u32,
}

impl Snapshot {
    /// Encoded PNG bytes
    pub fn png_bytes(&self) -> &[u8] {
        &self.png
    }

    /// Shared handle to the PNG bytes, for moving into save tasks
    pub fn png_shared(&self) -> Arc<[u8]> {
        Arc::clone(&self.png)
    }

    /// Data URL usable as an image source or download target
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", photo::MIME_TYPE, BASE64.encode(&self.png))
    }
}

impl std::fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Snapshot")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("png_bytes", &self.png.len())
            .finish()
    }
}

/// Encode a canvas as PNG
pub fn encode_png(canvas: &RgbaImage) -> Result<Snapshot, PhotoError> {
    let (width, height) = canvas.dimensions();
    let mut buffer = Cursor::new(Vec::new());
    canvas.write_to(&mut buffer, ImageFormat::Png)?;
    let png = buffer.into_inner();

    if png.is_empty() {
        return Err(PhotoError::EncodingFailed("encoder produced no data".to_string()));
    }

    debug!(size = png.len(), "PNG encoding complete");
    info!(width, height, "Snapshot encoded");

    Ok(Snapshot {
        png: Arc::from(png.into_boxed_slice()),
        width,
        height,
    })
}
