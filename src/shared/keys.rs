//! Object key naming shared by the upload handler, the analysis handler and the client.
//!
//! An upload is stored under `<unix-timestamp-ms>-<original-filename>`. The external
//! analysis pipeline writes its report next to it with the extension replaced by
//! `.html`, so the report key is always derivable from the storage key alone.

/// Extension of the report objects written by the analysis pipeline
pub const REPORT_EXTENSION: &str = "html";

/// Build the storage key for an upload accepted at `timestamp_ms`
pub fn storage_key(timestamp_ms: i64, original_filename: &str) -> String {
    format!("{}-{}", timestamp_ms, original_filename)
}

/// Derive the report key from a storage key by replacing its extension with `.html`.
///
/// Keys without an extension get `.html` appended. Already-derived report keys map to
/// themselves.
pub fn report_key(key: &str) -> String {
    let name_start = key.rfind('/').map(|i| i + 1).unwrap_or(0);

    // A leading dot marks a hidden file, not an extension
    let stem = match key[name_start..].rfind('.') {
        Some(dot) if dot > 0 => &key[..name_start + dot],
        _ => key,
    };

    format!("{}.{}", stem, REPORT_EXTENSION)
}

/// Reduce a client-supplied filename to its final path component.
///
/// Returns `None` when nothing usable remains (browsers send an empty filename for an
/// empty file input).
pub fn sanitize_filename(raw: &str) -> Option<String> {
    let name = raw.rsplit(['/', '\\']).next().unwrap_or(raw).trim();

    if name.is_empty() || name == "." || name == ".." {
        None
    } else {
        Some(name.to_string())
    }
}
