//! Persistence helpers for export artifacts.
//!
//! Everything an export produces (artifact bytes, the serialized scene,
//! the thumbnail frame) is written to uniquely named files in the
//! platform temp directory and referenced by `file://` URL in the result.

use crate::engine::EngineBlob;
use crate::error::{Error, Result};
use tokio::fs;
use url::Url;
use uuid::Uuid;

/// File name prefix for exported artifacts.
pub const ARTIFACT_PREFIX: &str = "studio_export_artifact_";
/// File name prefix for serialized scenes.
pub const SCENE_PREFIX: &str = "studio_export_scene_";
/// File name prefix for generated thumbnails.
pub const THUMBNAIL_PREFIX: &str = "studio_export_thumbnail_";

/// Writes the artifact blob to a temp file and returns its URL.
pub async fn save_artifact(blob: &EngineBlob) -> Result<Url> {
    write_temp(ARTIFACT_PREFIX, blob.mime.extension(), &blob.data).await
}

/// Writes a serialized scene to a temp file and returns its URL.
pub async fn save_scene(scene: &str) -> Result<Url> {
    write_temp(SCENE_PREFIX, "scene", scene.as_bytes()).await
}

/// Writes a rendered thumbnail frame to a temp file and returns its URL.
pub async fn save_thumbnail(frame: &[u8]) -> Result<Url> {
    write_temp(THUMBNAIL_PREFIX, "png", frame).await
}

async fn write_temp(prefix: &str, extension: &str, data: &[u8]) -> Result<Url> {
    let name = format!("{prefix}{}.{extension}", Uuid::new_v4());
    let path = std::env::temp_dir().join(name);
    fs::write(&path, data).await?;
    Url::from_file_path(&path)
        .map_err(|()| Error::Io(std::io::Error::other("temp directory is not an absolute path")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use studio_protocol::MimeType;

    #[tokio::test]
    async fn test_save_artifact_writes_file_url() {
        let blob = EngineBlob::new(vec![0x25, 0x50, 0x44, 0x46], MimeType::Pdf);
        let url = save_artifact(&blob).await.unwrap();

        assert_eq!(url.scheme(), "file");
        assert!(url.path().ends_with(".pdf"));

        let path = url.to_file_path().unwrap();
        let contents = fs::read(&path).await.unwrap();
        assert_eq!(contents, blob.data);
        fs::remove_file(&path).await.unwrap();
    }

    #[tokio::test]
    async fn test_save_scene_and_thumbnail_use_distinct_names() {
        let scene_url = save_scene("scene-body").await.unwrap();
        let thumb_url = save_thumbnail(&[1, 2, 3]).await.unwrap();

        assert_ne!(scene_url, thumb_url);
        assert!(scene_url.path().ends_with(".scene"));
        assert!(thumb_url.path().ends_with(".png"));

        for url in [scene_url, thumb_url] {
            fs::remove_file(url.to_file_path().unwrap()).await.unwrap();
        }
    }
}
