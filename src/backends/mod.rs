// SPDX-License-Identifier: GPL-3.0-only

//! Backend layer for camera access
//!
//! - [`camera`]: camera providers (PipeWire, still image) behind one trait

pub mod camera;
