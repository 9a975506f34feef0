use std::sync::Arc;
use tracing::{debug, info};

use crate::core::error::{AppError, Result};
use crate::modules::storage::{ObjectStore, StorageError};
use crate::shared::constants::MSG_ANALYSIS_NOT_READY;
use crate::shared::keys::report_key;
use crate::shared::types::ConfigDiagnostics;

/// Service reading analysis reports written by the external pipeline
pub struct AnalysisService {
    store: Arc<dyn ObjectStore>,
    diagnostics: ConfigDiagnostics,
}

impl AnalysisService {
    pub fn new(store: Arc<dyn ObjectStore>, diagnostics: ConfigDiagnostics) -> Self {
        Self { store, diagnostics }
    }

    /// Fetch the HTML report for `filename`
    ///
    /// `filename` may be either the storage key of the upload or the report key
    /// derived from it; both resolve to the same object. A missing report is
    /// [`AppError::NotFound`], the expected state while analysis is still running.
    pub async fn fetch_report(&self, filename: &str) -> Result<Vec<u8>> {
        let key = report_key(filename);
        debug!(
            "Fetching analysis report: filename={}, key={}, bucket={}",
            filename,
            key,
            self.store.bucket_name()
        );

        let content = match self.store.get_object(&key).await {
            Ok(content) => content,
            Err(StorageError::NotFound(_)) => {
                debug!("Analysis report not ready yet: {}", key);
                return Err(AppError::NotFound(MSG_ANALYSIS_NOT_READY.to_string()));
            }
            Err(e) => return Err(self.fetch_failed(e)),
        };

        if content.is_empty() {
            return Err(self.fetch_failed("No content found"));
        }

        info!(
            "Retrieved analysis report: key={}, size={}",
            key,
            content.len()
        );
        Ok(content)
    }

    fn fetch_failed(&self, reason: impl std::fmt::Display) -> AppError {
        AppError::Backend {
            message: format!("Failed to fetch analysis: {}", reason),
            details: self.diagnostics,
        }
    }
}
