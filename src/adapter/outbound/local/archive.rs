//! Filesystem-backed archive store.
//!
//! Objects live at `{root}/{bucket}/{key}`. Writes go to a temp file first and
//! are renamed into place, so readers never see a partial object.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use crate::domain::ArchiveLocation;
use crate::error::{Error, Result};
use crate::port::ArchiveStore;

/// Archive store rooted at a local directory.
#[derive(Debug, Clone)]
pub struct FileArchiveStore {
    root: PathBuf,
}

impl FileArchiveStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a location to a path under the root.
    ///
    /// Bucket and key must be relative and may not step outside the root.
    fn object_path(&self, location: &ArchiveLocation) -> Result<PathBuf> {
        let mut path = self.root.clone();
        for part in [location.bucket.as_str(), location.key.as_str()] {
            let relative = Path::new(part);
            let contained = relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
            if part.is_empty() || !contained {
                return Err(archive_error(location, "bucket and key must be plain relative paths"));
            }
            path.push(relative);
        }
        Ok(path)
    }
}

fn archive_error(location: &ArchiveLocation, reason: impl Into<String>) -> Error {
    Error::Archive {
        location: location.to_string(),
        reason: reason.into(),
    }
}

#[async_trait]
impl ArchiveStore for FileArchiveStore {
    async fn put_object(&self, location: &ArchiveLocation, bytes: Vec<u8>) -> Result<()> {
        let path = self.object_path(location)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| archive_error(location, e.to_string()))?;
        }

        let temp_path = path.with_extension("tmp");
        if let Err(e) = fs::write(&temp_path, &bytes).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(archive_error(location, e.to_string()));
        }
        if let Err(e) = fs::rename(&temp_path, &path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(archive_error(location, e.to_string()));
        }

        debug!(location = %location, size = bytes.len(), "Archived object");
        Ok(())
    }

    async fn get_object(&self, location: &ArchiveLocation) -> Result<Vec<u8>> {
        let path = self.object_path(location)?;
        fs::read(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                archive_error(location, "object not found")
            } else {
                archive_error(location, e.to_string())
            }
        })
    }
}
