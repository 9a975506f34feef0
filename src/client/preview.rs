use base64::prelude::*;
use tracing::warn;

use super::validation::{FileKind, SelectedFile};

/// Encode an image into a `data:` URI for display
///
/// Only images get a preview. Encoding runs on the blocking pool since uploads can
/// reach the 100 MiB limit.
pub async fn preview(file: &SelectedFile, kind: FileKind) -> Option<String> {
    if kind != FileKind::Image {
        return None;
    }

    let mime_type = file.mime_type.clone();
    let content = file.content.clone();

    match tokio::task::spawn_blocking(move || {
        format!("data:{};base64,{}", mime_type, BASE64_STANDARD.encode(content))
    })
    .await
    {
        Ok(uri) => Some(uri),
        Err(e) => {
            warn!("Failed to build preview for '{}': {}", file.name, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_image_preview_is_data_uri() {
        let file = SelectedFile::new("a.png", "image/png", b"hello".to_vec());

        let uri = preview(&file, FileKind::Image).await.unwrap();

        assert_eq!(uri, "data:image/png;base64,aGVsbG8=");
    }

    #[tokio::test]
    async fn test_non_image_kinds_have_no_preview() {
        let csv = SelectedFile::new("plots.csv", "text/csv", b"a,b".to_vec());
        let tiff = SelectedFile::new("dem.tif", "image/tiff", b"II*\0".to_vec());

        assert_eq!(preview(&csv, FileKind::Csv).await, None);
        assert_eq!(preview(&tiff, FileKind::GeoTiff).await, None);
    }
}
