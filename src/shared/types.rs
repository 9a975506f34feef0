use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Error body returned by every failing endpoint
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    /// Present on backend failures to help operators spot missing configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<ConfigDiagnostics>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(error: impl Into<String>, details: ConfigDiagnostics) -> Self {
        Self {
            error: error.into(),
            details: Some(details),
        }
    }
}

/// Which storage settings are present. Booleans only, never the values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfigDiagnostics {
    pub has_region: bool,
    pub has_access_key_id: bool,
    pub has_secret_key: bool,
}

impl ConfigDiagnostics {
    pub fn is_complete(&self) -> bool {
        self.has_region && self.has_access_key_id && self.has_secret_key
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_response_omits_missing_details() {
        let body = serde_json::to_value(ErrorResponse::new("No file uploaded")).unwrap();
        assert_eq!(body, json!({ "error": "No file uploaded" }));
    }

    #[test]
    fn test_diagnostics_serialize_camel_case() {
        let details = ConfigDiagnostics {
            has_region: true,
            has_access_key_id: false,
            has_secret_key: true,
        };
        let body =
            serde_json::to_value(ErrorResponse::with_details("Upload failed: x", details)).unwrap();
        assert_eq!(
            body,
            json!({
                "error": "Upload failed: x",
                "details": { "hasRegion": true, "hasAccessKeyId": false, "hasSecretKey": true }
            })
        );
        assert!(!details.is_complete());
    }
}
