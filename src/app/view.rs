// SPDX-License-Identifier: GPL-3.0-only

//! Main application view
//!
//! Draws whichever regions the camera view has made visible:
//! - Start prompt
//! - Error message
//! - Live preview (camera_preview module)
//! - Captured snapshot (camera_preview module)
//! - Controls bar (controls module)
//!
//! A transient notice is layered on top.

use crate::app::state::{AppModel, Message};
use crate::constants::ui;
use crate::fl;
use cosmic::Element;
use cosmic::iced::{Alignment, Background, Color, Length};
use cosmic::widget;

impl AppModel {
    /// Build the main application view
    pub fn view(&self) -> Element<'_, Message> {
        let regions = self.camera.regions();

        let mut stage = cosmic::iced::widget::Stack::new()
            .width(Length::Fill)
            .height(Length::Fill);

        if regions.start_prompt {
            stage = stage.push(self.build_start_prompt());
        }
        if regions.error_message {
            stage = stage.push(self.build_error_message());
        }
        if regions.video {
            stage = stage.push(self.build_camera_preview());
        }
        if regions.snapshot {
            stage = stage.push(self.build_snapshot());
        }
        if let Some(notice) = &self.notice {
            stage = stage.push(build_notice(&notice.text));
        }

        let mut content = widget::column()
            .push(stage)
            .width(Length::Fill)
            .height(Length::Fill);
        if regions.controls {
            content = content.push(self.build_controls());
        }

        widget::container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(|_theme| widget::container::Style {
                background: Some(Background::Color(Color::BLACK)),
                ..Default::default()
            })
            .into()
    }

    /// Full-stage button that starts playback by hand
    fn build_start_prompt(&self) -> Element<'_, Message> {
        let spacing = cosmic::theme::spacing();

        let label = widget::column()
            .push(widget::icon::from_name("camera-photo-symbolic").size(48))
            .push(widget::vertical_space().height(spacing.space_s))
            .push(widget::text(fl!("start-camera")).size(18))
            .align_x(Alignment::Center);

        widget::button::custom(
            widget::container(label)
                .width(Length::Fill)
                .height(Length::Fill)
                .center(Length::Fill),
        )
        .on_press(Message::StartCamera)
        .class(cosmic::theme::Button::Transparent)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
    }

    fn build_error_message(&self) -> Element<'_, Message> {
        let text = self.camera.error_message().unwrap_or_default();

        widget::container(
            widget::text(text)
                .size(16)
                .align_x(cosmic::iced::alignment::Horizontal::Center),
        )
        .padding(cosmic::theme::spacing().space_l)
        .width(Length::Fill)
        .height(Length::Fill)
        .center(Length::Fill)
        .style(|_theme| widget::container::Style {
            text_color: Some(Color::WHITE),
            ..Default::default()
        })
        .into()
    }
}

fn build_notice(text: &str) -> Element<'_, Message> {
    let spacing = cosmic::theme::spacing();

    let bubble = widget::container(widget::text(text).size(14))
        .padding([spacing.space_xxs, spacing.space_s])
        .style(|_theme| widget::container::Style {
            background: Some(Background::Color(Color::from_rgba(
                0.0,
                0.0,
                0.0,
                ui::OVERLAY_BACKGROUND_ALPHA,
            ))),
            text_color: Some(Color::WHITE),
            border: cosmic::iced::Border {
                radius: [8.0; 4].into(),
                ..Default::default()
            },
            ..Default::default()
        });

    widget::container(bubble)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(cosmic::iced::alignment::Horizontal::Center)
        .align_y(cosmic::iced::alignment::Vertical::Bottom)
        .padding([0, 0, spacing.space_m, 0])
        .into()
}
