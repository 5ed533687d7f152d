// SPDX-License-Identifier: GPL-3.0-only

//! Main application module for Selfie
//!
//! # Architecture
//!
//! - `camera_view`: Toolkit-free state machine of the camera screen
//! - `state`: Application state types (AppModel, Message, ContextPage)
//! - `settings`: Settings drawer UI
//! - `view`: Main view rendering
//! - `update`: Message dispatch into `handlers`

pub mod camera_view;
mod camera_preview;
mod controls;
mod handlers;
pub mod settings;
mod state;
mod update;
mod view;

use crate::backends::camera::{
    CameraProvider, FrameReceiver, FrameSender, MediaAccessError, MediaErrorKind,
};
use crate::config::Config;
use crate::constants::pipeline;
use crate::fl;
use camera_view::{CameraView, Phase};
use cosmic::app::context_drawer;
use cosmic::cosmic_config::{self, CosmicConfigEntry};
use cosmic::iced::Subscription;
use cosmic::widget::{self, about::About};
use cosmic::{Element, Task};
pub use state::{AppModel, ContextPage, Message, Notice};
use std::sync::Arc;
use tracing::{error, info, warn};

const REPOSITORY: &str = "https://github.com/cosmic-utils/selfie";

impl cosmic::Application for AppModel {
    /// The async executor that will be used to run your application's commands.
    type Executor = cosmic::executor::Default;

    /// Camera provider chosen at startup.
    type Flags = Arc<dyn CameraProvider>;

    /// Messages which the application and its widgets will emit.
    type Message = Message;

    /// Unique identifier in RDNN (reverse domain name notation) format.
    const APP_ID: &'static str = "io.github.cosmic_utils.Selfie";

    fn core(&self) -> &cosmic::Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut cosmic::Core {
        &mut self.core
    }

    /// Initializes the application and kicks off the camera permission request.
    fn init(
        core: cosmic::Core,
        provider: Self::Flags,
    ) -> (Self, Task<cosmic::Action<Self::Message>>) {
        let about = About::default()
            .name(fl!("app-title"))
            .icon(widget::icon::from_name("camera-photo").handle())
            .version(env!("GIT_VERSION"))
            .links([(fl!("repository"), REPOSITORY)])
            .license(env!("CARGO_PKG_LICENSE"));

        let (config_handler, config) =
            match cosmic_config::Config::new(Self::APP_ID, Config::VERSION) {
                Ok(handler) => {
                    let config = match Config::get_entry(&handler) {
                        Ok(config) => config,
                        Err((errors, config)) => {
                            error!(?errors, "Errors loading config");
                            config
                        }
                    };
                    (Some(handler), config)
                }
                Err(err) => {
                    error!(%err, "Failed to create config handler");
                    (None, Config::default())
                }
            };

        info!(provider = provider.name(), autoplay = config.autoplay, "Starting");

        let theme_task = cosmic::command::set_theme(config.app_theme.theme());

        let mut app = AppModel {
            core,
            context_page: ContextPage::default(),
            about,
            camera: CameraView::new(config.autoplay),
            config,
            config_handler,
            provider,
            preview: None,
            snapshot_handle: None,
            notice: None,
            notice_generation: 0,
            theme_options: vec![
                fl!("settings-theme-system"),
                fl!("settings-theme-dark"),
                fl!("settings-theme-light"),
            ],
        };

        let mount_task = app.mount_camera();
        (app, Task::batch([theme_task, mount_task]))
    }

    /// Elements to pack at the end of the header bar.
    fn header_end(&self) -> Vec<Element<'_, Self::Message>> {
        vec![
            widget::button::icon(widget::icon::from_name("help-about-symbolic"))
                .on_press(Message::ToggleContextPage(ContextPage::About))
                .into(),
            widget::button::icon(widget::icon::from_name("preferences-system-symbolic"))
                .on_press(Message::ToggleContextPage(ContextPage::Settings))
                .into(),
        ]
    }

    /// Display a context drawer if the context page is requested.
    fn context_drawer(&self) -> Option<context_drawer::ContextDrawer<'_, Self::Message>> {
        if !self.core.window.show_context {
            return None;
        }

        Some(match self.context_page {
            ContextPage::About => context_drawer::about(
                &self.about,
                |url| Message::LaunchUrl(url.to_string()),
                Message::ToggleContextPage(ContextPage::About),
            ),
            ContextPage::Settings => self.settings_view(),
        })
    }

    /// Describes the interface based on the current state of the application model.
    fn view(&self) -> Element<'_, Self::Message> {
        self.view()
    }

    /// Register subscriptions for this application.
    ///
    /// The frame subscription is keyed on the grant id, so it starts once
    /// access is granted and stops when the view hits an error.
    fn subscription(&self) -> Subscription<Self::Message> {
        use cosmic::iced::futures::StreamExt;

        let config_sub = self
            .core()
            .watch_config::<Config>(Self::APP_ID)
            .map(|update| Message::UpdateConfig(update.config));

        let grant = match self.camera.phase() {
            Phase::Error => None,
            _ => self.camera.video().stream().cloned(),
        };

        let Some(grant) = grant else {
            return config_sub;
        };

        let provider = Arc::clone(&self.provider);
        let camera_sub = Subscription::run_with_id(
            ("camera-stream", grant.id),
            cosmic::iced::stream::channel(
                pipeline::FRAME_CHANNEL_CAPACITY,
                move |mut output| async move {
                    info!(camera = %grant.label, id = grant.id, "Camera subscription started");

                    let (sender, mut receiver): (FrameSender, FrameReceiver) =
                        futures::channel::mpsc::channel(pipeline::FRAME_CHANNEL_CAPACITY);

                    // Building a GStreamer pipeline blocks until it reaches PLAYING
                    let opened = tokio::task::spawn_blocking({
                        let grant = grant.clone();
                        move || provider.open_stream(&grant, sender)
                    })
                    .await;

                    let stream = match opened {
                        Ok(Ok(stream)) => stream,
                        Ok(Err(err)) => {
                            error!(error = %err, "Failed to open camera stream");
                            let _ = output.try_send(Message::StreamFailed(err));
                            return;
                        }
                        Err(err) => {
                            error!(error = %err, "Stream setup task panicked");
                            let _ = output.try_send(Message::StreamFailed(
                                MediaAccessError::new(
                                    MediaErrorKind::NotReadable,
                                    err.to_string(),
                                ),
                            ));
                            return;
                        }
                    };
                    info!(stream = %stream.describe(), "Waiting for frames");

                    let mut frame_count = 0u64;
                    while let Some(frame) = receiver.next().await {
                        frame_count += 1;
                        // Dropping frames is fine for a live preview
                        if let Err(e) = output.try_send(Message::CameraFrame(Arc::new(frame))) {
                            if e.is_disconnected() {
                                info!("Output channel disconnected, stopping stream");
                                break;
                            }
                            if frame_count % crate::constants::timing::FRAME_LOG_INTERVAL == 0 {
                                warn!(frame = frame_count, "Frame dropped (UI channel full)");
                            }
                        }
                    }

                    if !output.is_closed() {
                        warn!(frames = frame_count, "Camera stream ended");
                        let _ = output.try_send(Message::StreamFailed(
                            MediaAccessError::new(
                                MediaErrorKind::NotReadable,
                                "the stream ended",
                            ),
                        ));
                    }
                    drop(stream);
                },
            ),
        );

        Subscription::batch([config_sub, camera_sub])
    }

    /// Handles messages emitted by the application and its widgets.
    fn update(&mut self, message: Self::Message) -> Task<cosmic::Action<Self::Message>> {
        self.update(message)
    }
}
