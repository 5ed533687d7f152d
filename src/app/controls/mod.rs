// SPDX-License-Identifier: GPL-3.0-only

//! Photo controls: delete, capture and download

pub mod capture_button;
