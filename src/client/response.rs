//! Interpretation of upload responses
//!
//! Current servers answer with `application/json` matching [`UploadResponseDto`].
//! Older deployments answered with `text/plain`; that shape is still accepted, but
//! only when the content type says so.

use thiserror::Error;

use crate::features::uploads::dtos::UploadResponseDto;
use crate::shared::constants::MSG_UPLOAD_SUCCESS;
use crate::shared::keys::report_key;
use crate::shared::types::ErrorResponse;

pub const JSON_CONTENT_TYPE: &str = "application/json";
pub const LEGACY_TEXT_CONTENT_TYPE: &str = "text/plain";

/// Upload response as received from the transport
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: String,
}

/// A successful upload, with the key its report will be written under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadReceipt {
    pub message: String,
    pub storage_key: String,
    pub report_key: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    #[error("Please select a file to upload.")]
    NoFileSelected,

    #[error("{0}")]
    Rejected(String),

    #[error("Upload request failed: {0}")]
    Transport(String),

    #[error("Unexpected response from server: {0}")]
    UnexpectedResponse(String),
}

/// Turn a raw upload response into a receipt or a user-facing error
pub fn interpret_upload_response(
    raw: &RawResponse,
    original_filename: &str,
) -> Result<UploadReceipt, UploadError> {
    let media_type = raw
        .content_type
        .as_deref()
        .and_then(|ct| ct.split(';').next())
        .map(|ct| ct.trim().to_ascii_lowercase());

    if !(200..300).contains(&raw.status) {
        return Err(UploadError::Rejected(error_message(raw, media_type.as_deref())));
    }

    let (message, storage_key) = match media_type.as_deref() {
        Some(JSON_CONTENT_TYPE) => {
            let dto: UploadResponseDto = serde_json::from_str(&raw.body)
                .map_err(|e| UploadError::UnexpectedResponse(format!("invalid JSON body: {}", e)))?;
            (dto.message, dto.filename)
        }
        Some(LEGACY_TEXT_CONTENT_TYPE) => {
            let text = raw.body.trim();
            let message = if text.is_empty() {
                MSG_UPLOAD_SUCCESS.to_string()
            } else {
                text.to_string()
            };
            (message, original_filename.to_string())
        }
        other => {
            return Err(UploadError::UnexpectedResponse(format!(
                "unsupported content type '{}'",
                other.unwrap_or("none")
            )))
        }
    };

    Ok(UploadReceipt {
        message,
        report_key: report_key(&storage_key),
        storage_key,
    })
}

fn error_message(raw: &RawResponse, media_type: Option<&str>) -> String {
    if media_type == Some(JSON_CONTENT_TYPE) {
        if let Ok(body) = serde_json::from_str::<ErrorResponse>(&raw.body) {
            return body.error;
        }
    }

    let text = raw.body.trim();
    if text.is_empty() {
        format!("Upload failed (HTTP {})", raw.status)
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(status: u16, content_type: Option<&str>, body: &str) -> RawResponse {
        RawResponse {
            status,
            content_type: content_type.map(str::to_string),
            body: body.to_string(),
        }
    }

    #[test]
    fn test_json_success() {
        let response = raw(
            200,
            Some("application/json"),
            r#"{"message":"File uploaded successfully","filename":"1712345678901-a.png"}"#,
        );

        let receipt = interpret_upload_response(&response, "a.png").unwrap();

        assert_eq!(
            receipt,
            UploadReceipt {
                message: "File uploaded successfully".to_string(),
                storage_key: "1712345678901-a.png".to_string(),
                report_key: "1712345678901-a.html".to_string(),
            }
        );
    }

    #[test]
    fn test_json_success_with_charset() {
        let response = raw(
            200,
            Some("application/json; charset=utf-8"),
            r#"{"message":"ok","filename":"1-plots.csv"}"#,
        );

        let receipt = interpret_upload_response(&response, "plots.csv").unwrap();
        assert_eq!(receipt.report_key, "1-plots.html");
    }

    #[test]
    fn test_legacy_text_success_uses_original_filename() {
        let response = raw(200, Some("text/plain; charset=utf-8"), "Uploaded!\n");

        let receipt = interpret_upload_response(&response, "dem.tif").unwrap();

        assert_eq!(receipt.message, "Uploaded!");
        assert_eq!(receipt.storage_key, "dem.tif");
        assert_eq!(receipt.report_key, "dem.html");
    }

    #[test]
    fn test_invalid_json_is_unexpected() {
        let response = raw(200, Some("application/json"), "File uploaded");

        assert!(matches!(
            interpret_upload_response(&response, "a.png"),
            Err(UploadError::UnexpectedResponse(_))
        ));
    }

    #[test]
    fn test_unknown_content_type_is_unexpected() {
        let response = raw(200, Some("text/html"), "<html></html>");
        let err = interpret_upload_response(&response, "a.png").unwrap_err();
        assert!(err.to_string().contains("text/html"));

        let response = raw(200, None, "ok");
        assert!(matches!(
            interpret_upload_response(&response, "a.png"),
            Err(UploadError::UnexpectedResponse(_))
        ));
    }

    #[test]
    fn test_error_status_uses_server_message() {
        let response = raw(
            500,
            Some("application/json"),
            r#"{"error":"Upload failed: AWS Region is missing","details":{"hasRegion":false,"hasAccessKeyId":true,"hasSecretKey":true}}"#,
        );

        assert_eq!(
            interpret_upload_response(&response, "a.png"),
            Err(UploadError::Rejected(
                "Upload failed: AWS Region is missing".to_string()
            ))
        );
    }

    #[test]
    fn test_error_status_falls_back_to_text_or_status() {
        let response = raw(413, Some("text/plain"), "length limit exceeded");
        assert_eq!(
            interpret_upload_response(&response, "a.png").unwrap_err().to_string(),
            "length limit exceeded"
        );

        let response = raw(502, None, "");
        assert_eq!(
            interpret_upload_response(&response, "a.png").unwrap_err().to_string(),
            "Upload failed (HTTP 502)"
        );
    }
}
