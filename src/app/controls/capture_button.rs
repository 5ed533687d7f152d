// SPDX-License-Identifier: GPL-3.0-only

//! Capture bar widgets

use crate::app::camera_view::Phase;
use crate::app::state::{AppModel, Message};
use crate::constants::ui;
use crate::fl;
use cosmic::Element;
use cosmic::iced::{Alignment, Background, Color, Length};
use cosmic::widget;

impl AppModel {
    /// Build the controls bar: delete, capture, download
    pub fn build_controls(&self) -> Element<'_, Message> {
        let spacing = cosmic::theme::spacing();
        let controls = self.camera.controls();

        let delete = icon_control(
            "user-trash-symbolic",
            fl!("delete-photo"),
            controls.delete_enabled.then_some(Message::DeletePhoto),
        );
        let download = icon_control(
            "document-save-symbolic",
            fl!("download-photo"),
            controls.download_enabled.then_some(Message::DownloadPhoto),
        );

        let row = widget::row()
            .push(delete)
            .push(widget::horizontal_space().width(Length::Fill))
            .push(self.build_capture_button())
            .push(widget::horizontal_space().width(Length::Fill))
            .push(download)
            .align_y(Alignment::Center)
            .padding([spacing.space_xs, spacing.space_l]);

        widget::container(row)
            .width(Length::Fill)
            .style(|_theme| widget::container::Style {
                background: Some(Background::Color(Color::from_rgba(
                    0.0,
                    0.0,
                    0.0,
                    ui::OVERLAY_BACKGROUND_ALPHA,
                ))),
                ..Default::default()
            })
            .into()
    }

    /// Round shutter button, enabled only while the video is live
    pub fn build_capture_button(&self) -> Element<'_, Message> {
        let is_enabled = self.camera.phase() == Phase::Streaming;

        let color = if is_enabled {
            Color::WHITE
        } else {
            Color::from_rgba(0.5, 0.5, 0.5, ui::DISABLED_ALPHA)
        };
        let inner_size = ui::CAPTURE_BUTTON_SIZE * 0.8;

        let button_inner = widget::container(widget::Space::new(
            Length::Fixed(inner_size),
            Length::Fixed(inner_size),
        ))
        .style(move |_theme| widget::container::Style {
            background: Some(Background::Color(color)),
            border: cosmic::iced::Border {
                radius: [inner_size / 2.0; 4].into(),
                ..Default::default()
            },
            ..Default::default()
        });

        let mut button = widget::button::custom(button_inner)
            .padding(0)
            .width(Length::Fixed(ui::CAPTURE_BUTTON_SIZE))
            .height(Length::Fixed(ui::CAPTURE_BUTTON_SIZE));
        if is_enabled {
            button = button.on_press(Message::TakePhoto);
        }

        let button: Element<'_, Message> = widget::container(button)
            .width(Length::Fixed(ui::CAPTURE_BUTTON_SIZE))
            .height(Length::Fixed(ui::CAPTURE_BUTTON_SIZE))
            .center(ui::CAPTURE_BUTTON_SIZE)
            .into();

        widget::tooltip(
            button,
            widget::text(fl!("take-photo")),
            widget::tooltip::Position::Top,
        )
        .into()
    }
}

/// Icon button that is dimmed and inert when `on_press` is None
fn icon_control<'a>(
    icon_name: &'static str,
    label: String,
    on_press: Option<Message>,
) -> Element<'a, Message> {
    let enabled = on_press.is_some();
    let button = widget::button::icon(widget::icon::from_name(icon_name))
        .on_press_maybe(on_press)
        .width(Length::Fixed(ui::ICON_BUTTON_WIDTH));

    let button: Element<'a, Message> = if enabled {
        button.into()
    } else {
        widget::container(button)
            .style(|_theme| widget::container::Style {
                text_color: Some(Color::from_rgba(1.0, 1.0, 1.0, ui::DISABLED_ALPHA)),
                ..Default::default()
            })
            .into()
    };

    widget::tooltip(button, widget::text(label), widget::tooltip::Position::Top).into()
}
