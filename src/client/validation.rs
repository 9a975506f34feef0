use std::path::Path;
use thiserror::Error;

use crate::shared::constants::{DEFAULT_CONTENT_TYPE, MAX_UPLOAD_SIZE};
use crate::shared::validation::{CSV_FILENAME_REGEX, GEOTIFF_FILENAME_REGEX};

/// A file chosen for upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub mime_type: String,
    pub size: u64,
    pub content: Vec<u8>,
}

impl SelectedFile {
    /// An empty `mime_type` is guessed from the file name, as browsers leave it blank
    /// for many GeoTIFF and CSV files
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, content: Vec<u8>) -> Self {
        let name = name.into();
        let mut mime_type = mime_type.into();
        if mime_type.trim().is_empty() {
            mime_type = guess_mime_type(&name);
        }

        Self {
            name,
            mime_type,
            size: content.len() as u64,
            content,
        }
    }

    /// Read a file from disk, guessing its MIME type from the extension
    pub async fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "unnamed".to_string());
        let mime_type = guess_mime_type(&name);

        Ok(Self::new(name, mime_type, content))
    }
}

fn guess_mime_type(name: &str) -> String {
    mime_guess::from_path(name)
        .first_raw()
        .unwrap_or(DEFAULT_CONTENT_TYPE)
        .to_string()
}

/// Media type without parameters, lowercased: `Text/CSV; charset=utf-8` -> `text/csv`
fn media_type(mime_type: &str) -> String {
    mime_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase()
}

/// Kinds of files the analysis pipeline accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Image,
    Csv,
    GeoTiff,
}

impl FileKind {
    pub fn label(&self) -> &'static str {
        match self {
            FileKind::Image => "image",
            FileKind::Csv => "csv",
            FileKind::GeoTiff => "geotiff",
        }
    }
}

/// Why a file was refused before upload
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RejectionReason {
    #[error("File is too large ({size} bytes). Maximum size is {} MB.", .limit / 1024 / 1024)]
    TooLarge { size: u64, limit: u64 },

    #[error("Unsupported file type '{mime_type}' for '{name}'. Please select an image, CSV or GeoTIFF file.")]
    UnsupportedType { name: String, mime_type: String },
}

/// Classify a file, refusing oversized or unsupported ones
///
/// The `.tif`/`.tiff` suffix wins over the MIME type, so a GeoTIFF declared as
/// `image/tiff` is treated as GeoTIFF and gets no image preview.
pub fn validate(file: &SelectedFile) -> Result<FileKind, RejectionReason> {
    let limit = MAX_UPLOAD_SIZE as u64;
    if file.size > limit {
        return Err(RejectionReason::TooLarge {
            size: file.size,
            limit,
        });
    }

    let mime_type = media_type(&file.mime_type);

    if GEOTIFF_FILENAME_REGEX.is_match(&file.name) {
        Ok(FileKind::GeoTiff)
    } else if mime_type.starts_with("image/") {
        Ok(FileKind::Image)
    } else if mime_type == "text/csv" || CSV_FILENAME_REGEX.is_match(&file.name) {
        Ok(FileKind::Csv)
    } else {
        Err(RejectionReason::UnsupportedType {
            name: file.name.clone(),
            mime_type: file.mime_type.clone(),
        })
    }
}
