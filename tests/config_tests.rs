// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for configuration module

use selfie::Config;
use selfie::config::AppTheme;

#[test]
fn test_config_default() {
    let config = Config::default();

    assert!(config.autoplay, "Autoplay should be enabled by default");
    assert!(
        config.mirror_preview,
        "Mirror preview should be enabled by default"
    );
    assert_eq!(config.app_theme, AppTheme::System);
    assert!(config.last_download_dir.is_none());
}

#[test]
fn test_default_download_name() {
    let config = Config::default();
    assert_eq!(config.download_file_name, "selfie.png");
}
