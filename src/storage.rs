// SPDX-License-Identifier: GPL-3.0-only

//! Storage utilities for downloaded photos

use crate::constants::photo;
use crate::errors::PhotoError;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Default download directory (~/Pictures/selfie)
pub fn default_download_dir() -> PathBuf {
    dirs::picture_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(photo::PICTURES_SUBDIR)
}

/// Resolve where a download should land
///
/// `configured_dir` is the directory last chosen by the user, if any.
pub fn download_path(configured_dir: Option<&Path>, file_name: &str) -> PathBuf {
    let dir = configured_dir
        .map(Path::to_path_buf)
        .unwrap_or_else(default_download_dir);
    let file_name = if file_name.trim().is_empty() {
        photo::DEFAULT_FILE_NAME
    } else {
        file_name
    };
    dir.join(file_name)
}

/// Write PNG bytes to `path`, creating parent directories
///
/// Runs on the blocking pool so the UI thread never waits on disk I/O.
pub async fn save_png(png: Arc<[u8]>, path: PathBuf) -> Result<PathBuf, PhotoError> {
    if png.is_empty() {
        return Err(PhotoError::NothingToSave);
    }

    tokio::task::spawn_blocking(move || {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        debug!(path = %path.display(), size = png.len(), "Writing photo");
        std::fs::write(&path, &png)?;
        info!(path = %path.display(), "Photo saved");
        Ok::<_, PhotoError>(path)
    })
    .await
    .map_err(|e| PhotoError::SaveFailed(e.to_string()))?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_download_path_uses_configured_dir() {
        let path = download_path(Some(Path::new("/tmp/shots")), "selfie.png");
        assert_eq!(path, PathBuf::from("/tmp/shots/selfie.png"));
    }

    #[test]
    fn test_blank_file_name_falls_back() {
        let path = download_path(Some(Path::new("/tmp")), "  ");
        assert_eq!(path.file_name().unwrap(), "selfie.png");
    }

    #[tokio::test]
    async fn test_save_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested").join("selfie.png");
        let saved = save_png(Arc::from(vec![1u8, 2, 3]), target.clone())
            .await
            .unwrap();
        assert_eq!(saved, target);
        assert_eq!(std::fs::read(&target).unwrap(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_empty_png_is_rejected() {
        let err = save_png(Arc::from(Vec::<u8>::new()), PathBuf::from("x.png"))
            .await
            .unwrap_err();
        assert_eq!(err, PhotoError::NothingToSave);
    }
}
