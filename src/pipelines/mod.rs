// SPDX-License-Identifier: GPL-3.0-only

//! Processing pipelines for captured media
//!
//! - [`photo`]: frame → canvas → PNG snapshot

pub mod photo;
