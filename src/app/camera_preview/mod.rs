// SPDX-License-Identifier: GPL-3.0-only

//! Camera preview and snapshot display
//!
//! Both fill the stage and letterbox the picture; the view only ever shows
//! one of them at a time.

use crate::app::state::{AppModel, Message};
use cosmic::Element;
use cosmic::iced::{ContentFit, Length};
use cosmic::widget;

impl AppModel {
    /// Live video region, blank until the first frame is decoded
    pub fn build_camera_preview(&self) -> Element<'_, Message> {
        match &self.preview {
            Some(handle) => fitted_image(handle.clone()),
            None => widget::Space::new(Length::Fill, Length::Fill).into(),
        }
    }

    /// Captured photo region
    pub fn build_snapshot(&self) -> Element<'_, Message> {
        match &self.snapshot_handle {
            Some(handle) => fitted_image(handle.clone()),
            None => widget::Space::new(Length::Fill, Length::Fill).into(),
        }
    }
}

fn fitted_image<'a>(handle: widget::image::Handle) -> Element<'a, Message> {
    widget::container(
        widget::image::Image::new(handle)
            .content_fit(ContentFit::Contain)
            .width(Length::Fill)
            .height(Length::Fill),
    )
    .width(Length::Fill)
    .height(Length::Fill)
    .center(Length::Fill)
    .into()
}
