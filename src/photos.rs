// Copyright (c) Friend Focus Team
// SPDX-License-Identifier: Apache-2.0

//! Filesystem photo store. One photo per friend at `<dir>/<friend_id>.jpg`;
//! the directory is created lazily on first write. Deletion is best-effort:
//! a leaked file only costs disk space.

use std::io;
use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::warn;

pub struct PhotoStore {
    dir: PathBuf,
}

impl PhotoStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path a friend's photo is stored at.
    pub fn photo_path(&self, friend_id: i32) -> PathBuf {
        self.dir.join(format!("{}.jpg", friend_id))
    }

    /// Write a friend's photo, creating the photos directory if needed.
    pub async fn save(&self, friend_id: i32, bytes: &[u8]) -> io::Result<PathBuf> {
        fs::create_dir_all(&self.dir).await?;
        let path = self.photo_path(friend_id);
        fs::write(&path, bytes).await?;
        Ok(path)
    }

    /// Read a stored file by its (already validated) filename.
    pub async fn read_file(&self, filename: &str) -> io::Result<Vec<u8>> {
        fs::read(self.dir.join(filename)).await
    }

    /// Best-effort delete of a friend's photo. Failures are logged and
    /// swallowed.
    pub async fn delete(&self, friend_id: i32) {
        let path = self.photo_path(friend_id);
        if let Err(e) = fs::remove_file(&path).await {
            if e.kind() != io::ErrorKind::NotFound {
                warn!("Failed to delete photo {}: {}", path.display(), e);
            }
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

/// Reject path traversal in user-supplied photo filenames.
pub fn is_safe_filename(filename: &str) -> bool {
    !filename.is_empty() && !filename.contains("..") && !filename.contains('/')
}

/// Content type inferred from the file extension; anything unrecognized is
/// served as JPEG.
pub fn content_type_for(filename: &str) -> &'static str {
    if filename.ends_with(".png") {
        "image/png"
    } else if filename.ends_with(".webp") {
        "image/webp"
    } else {
        "image/jpeg"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn filenames_with_traversal_are_rejected() {
        assert!(is_safe_filename("42.jpg"));
        assert!(!is_safe_filename("../etc/passwd"));
        assert!(!is_safe_filename("a/b.jpg"));
        assert!(!is_safe_filename(""));
    }

    #[test]
    fn content_type_follows_extension() {
        assert_eq!(content_type_for("1.png"), "image/png");
        assert_eq!(content_type_for("1.webp"), "image/webp");
        assert_eq!(content_type_for("1.jpg"), "image/jpeg");
        assert_eq!(content_type_for("1"), "image/jpeg");
    }

    #[test_log::test(tokio::test)]
    async fn save_creates_directory_lazily_and_read_round_trips() {
        let tmp = tempdir().unwrap();
        let store = PhotoStore::new(tmp.path().join("photos"));
        assert!(!store.dir().exists());

        store.save(7, b"jpeg bytes").await.unwrap();
        assert!(store.dir().exists());

        let bytes = store.read_file("7.jpg").await.unwrap();
        assert_eq!(bytes, b"jpeg bytes");
    }

    #[tokio::test]
    async fn delete_is_silent_for_missing_files() {
        let tmp = tempdir().unwrap();
        let store = PhotoStore::new(tmp.path());
        // No photo was ever written; this must not panic or error
        store.delete(99).await;
    }

    #[tokio::test]
    async fn delete_removes_the_photo() {
        let tmp = tempdir().unwrap();
        let store = PhotoStore::new(tmp.path());
        store.save(3, b"x").await.unwrap();
        store.delete(3).await;
        assert!(store.read_file("3.jpg").await.is_err());
    }
}
