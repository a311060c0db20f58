//! Local filesystem storage client
//!
//! Writes uploaded bytes into a single flat directory and builds the public
//! URL the static file service exposes them under.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::core::config::UploadConfig;
use crate::core::error::AppError;

/// Flat-directory file storage
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root: PathBuf,
    public_path: String,
}

impl LocalStorage {
    /// Create the storage, making sure the root directory exists
    pub async fn new(config: &UploadConfig) -> Result<Self, AppError> {
        tokio::fs::create_dir_all(&config.dir).await.map_err(|e| {
            tracing::error!("Failed to create upload directory {:?}: {}", config.dir, e);
            AppError::Internal(format!("Failed to create upload directory: {}", e))
        })?;

        info!("Upload storage ready at {:?}", config.dir);

        Ok(Self {
            root: config.dir.clone(),
            public_path: config.public_path.clone(),
        })
    }

    /// Directory files are stored in
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write `data` under `filename`, replacing any existing file
    ///
    /// `filename` must be a bare name; anything containing a path separator
    /// or `..` is refused.
    pub async fn save(&self, filename: &str, data: &[u8]) -> Result<PathBuf, AppError> {
        if !is_bare_filename(filename) {
            return Err(AppError::BadRequest(format!(
                "Invalid storage filename '{}'",
                filename
            )));
        }

        let path = self.root.join(filename);
        tokio::fs::write(&path, data).await.map_err(|e| {
            tracing::error!("Failed to write file {:?}: {}", path, e);
            AppError::Internal(format!("Failed to store file: {}", e))
        })?;

        debug!("Stored {} bytes at {:?}", data.len(), path);
        Ok(path)
    }

    /// Public URL for a stored file
    pub fn url_for(&self, filename: &str) -> String {
        format!("{}/{}", self.public_path, filename)
    }
}

fn is_bare_filename(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\'])
        && !name.contains("..")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_config() -> UploadConfig {
        UploadConfig {
            dir: std::env::temp_dir().join(format!("lostfound-storage-{}", uuid::Uuid::new_v4())),
            max_file_size: 1024,
            public_path: "/uploads".to_string(),
        }
    }

    #[tokio::test]
    async fn test_new_creates_directory_and_saves() {
        let config = temp_config();
        let storage = LocalStorage::new(&config).await.unwrap();
        assert!(config.dir.is_dir());

        let path = storage.save("photo.png", b"png-bytes").await.unwrap();
        assert_eq!(path, config.dir.join("photo.png"));
        assert_eq!(tokio::fs::read(&path).await.unwrap(), b"png-bytes");

        let _ = tokio::fs::remove_dir_all(&config.dir).await;
    }

    #[tokio::test]
    async fn test_save_refuses_path_traversal() {
        let config = temp_config();
        let storage = LocalStorage::new(&config).await.unwrap();

        for name in ["../escape.png", "a/b.png", "a\\b.png", "..", ""] {
            let result = storage.save(name, b"x").await;
            assert!(matches!(result, Err(AppError::BadRequest(_))), "{}", name);
        }

        let _ = tokio::fs::remove_dir_all(&config.dir).await;
    }

    #[test]
    fn test_url_for() {
        let storage = LocalStorage {
            root: PathBuf::from("/tmp"),
            public_path: "/uploads".to_string(),
        };
        assert_eq!(storage.url_for("abc.jpg"), "/uploads/abc.jpg");
    }
}
