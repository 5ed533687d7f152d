// SPDX-License-Identifier: GPL-3.0-only

use clap::{Parser, Subcommand};
use selfie::app::AppModel;
use selfie::backends::camera::provider_for;
use selfie::constants::timing;
use selfie::i18n;
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "selfie")]
#[command(about = "Selfie camera for the COSMIC desktop")]
#[command(version)]
#[command(subcommand_required = false)]
struct Cli {
    /// Use an image file as the camera instead of the system camera
    #[arg(short, long, global = true)]
    source: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Take a photo without opening a window
    Snap {
        /// Output file or directory (default: ~/Pictures/selfie/selfie.png)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Seconds to wait for the first frame
        #[arg(short, long, default_value_t = timing::SNAP_TIMEOUT_SECS)]
        timeout: u64,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Set RUST_LOG to control the log level, e.g. RUST_LOG=selfie=debug
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(true)
        .with_level(true)
        .init();

    let cli = Cli::parse();

    // Error messages are localized in both modes
    let requested_languages = i18n_embed::DesktopLanguageRequester::requested_languages();
    i18n::init(&requested_languages);

    match cli.command {
        Some(Commands::Snap { output, timeout }) => Ok(cli::snap(output, cli.source, timeout)?),
        None => run_gui(cli.source),
    }
}

fn run_gui(source: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let settings = cosmic::app::Settings::default().size_limits(
        cosmic::iced::Limits::NONE
            .min_width(360.0)
            .min_height(320.0),
    );

    cosmic::app::run::<AppModel>(settings, provider_for(source))?;

    Ok(())
}
