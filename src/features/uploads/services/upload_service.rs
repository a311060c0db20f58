use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::uploads::dtos::UploadResponseDto;
use crate::modules::storage::LocalStorage;
use crate::shared::constants::ALLOWED_IMAGE_EXTENSIONS;

/// Service for item image uploads
pub struct UploadService {
    storage: Arc<LocalStorage>,
    max_file_size: usize,
}

impl UploadService {
    pub fn new(storage: Arc<LocalStorage>, max_file_size: usize) -> Self {
        Self {
            storage,
            max_file_size,
        }
    }

    pub fn max_file_size(&self) -> usize {
        self.max_file_size
    }

    /// Validate and store an image under a generated name
    pub async fn upload_image(
        &self,
        original_filename: &str,
        data: &[u8],
    ) -> Result<UploadResponseDto> {
        let extension = image_extension(original_filename)?;
        check_size(data.len(), self.max_file_size)?;

        let filename = format!("{}{}", Uuid::new_v4(), extension);
        self.storage.save(&filename, data).await?;

        info!(
            "Image uploaded: original={}, stored={}, size={}",
            original_filename,
            filename,
            data.len()
        );

        Ok(UploadResponseDto {
            url: self.storage.url_for(&filename),
            filename,
        })
    }
}

/// Lowercased extension (with leading dot) if it is an accepted image type.
/// A leading dot marks a hidden file, not an extension: `.png` has none.
fn image_extension(filename: &str) -> Result<String> {
    let extension = filename
        .rfind('.')
        .filter(|&idx| idx > 0)
        .map(|idx| filename[idx..].to_lowercase())
        .unwrap_or_default();

    if ALLOWED_IMAGE_EXTENSIONS.contains(&extension.as_str()) {
        Ok(extension)
    } else {
        Err(AppError::BadRequest(format!(
            "File type not allowed. Allowed: {}",
            ALLOWED_IMAGE_EXTENSIONS.join(", ")
        )))
    }
}

fn check_size(len: usize, max: usize) -> Result<()> {
    if len == 0 {
        return Err(AppError::BadRequest("File is empty".to_string()));
    }
    if len > max {
        return Err(AppError::BadRequest(format!(
            "File too large. Maximum size is {} bytes ({} MB)",
            max,
            max / 1024 / 1024
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::UploadConfig;

    #[test]
    fn test_image_extension_is_case_insensitive() {
        assert_eq!(image_extension("photo.JPG").unwrap(), ".jpg");
        assert_eq!(image_extension("scan.final.webp").unwrap(), ".webp");
        assert_eq!(image_extension("a.Jpeg").unwrap(), ".jpeg");
    }

    #[test]
    fn test_image_extension_rejects_others() {
        for name in ["notes.pdf", "archive.png.zip", "noextension", "", "gif"] {
            assert!(
                matches!(image_extension(name), Err(AppError::BadRequest(_))),
                "{}",
                name
            );
        }
    }

    #[test]
    fn test_image_extension_ignores_leading_dot() {
        assert!(matches!(image_extension(".png"), Err(AppError::BadRequest(_))));
        assert!(matches!(image_extension(".JPG"), Err(AppError::BadRequest(_))));
        assert_eq!(image_extension(".hidden.png").unwrap(), ".png");
    }

    #[test]
    fn test_check_size_bounds() {
        assert!(check_size(1, 10).is_ok());
        assert!(check_size(10, 10).is_ok());
        assert!(matches!(check_size(0, 10), Err(AppError::BadRequest(_))));
        assert!(matches!(check_size(11, 10), Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_upload_image_stores_under_generated_name() {
        let config = UploadConfig {
            dir: std::env::temp_dir().join(format!("lostfound-upload-{}", Uuid::new_v4())),
            max_file_size: 16,
            public_path: "/uploads".to_string(),
        };
        let storage = Arc::new(LocalStorage::new(&config).await.unwrap());
        let service = UploadService::new(storage, config.max_file_size);

        let uploaded = service.upload_image("Wallet.PNG", b"image").await.unwrap();
        assert!(uploaded.filename.ends_with(".png"));
        assert_ne!(uploaded.filename, "Wallet.PNG");
        assert_eq!(uploaded.url, format!("/uploads/{}", uploaded.filename));

        let stored = tokio::fs::read(config.dir.join(&uploaded.filename))
            .await
            .unwrap();
        assert_eq!(stored, b"image");

        let too_big = service.upload_image("big.png", &[0u8; 17]).await;
        assert!(matches!(too_big, Err(AppError::BadRequest(_))));

        let _ = tokio::fs::remove_dir_all(&config.dir).await;
    }
}
