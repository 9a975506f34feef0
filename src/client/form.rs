//! Upload form state machine
//!
//! `Idle -> FileSelected -> Uploading -> {Success, Error}`. Choosing another file
//! leaves `Success`/`Error`; a successful upload clears the selection and preview.

use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use super::preview::preview;
use super::response::{interpret_upload_response, UploadError, UploadReceipt};
use super::transport::UploadTransport;
use super::validation::{validate, FileKind, SelectedFile};

const COMPLETION_CHANNEL_CAPACITY: usize = 16;

const MSG_UPLOAD_COMPLETE: &str =
    "File uploaded successfully! The analysis report will be available once processing completes.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    Idle,
    FileSelected,
    Uploading,
    Success,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Empty,
    Error,
    Success,
}

/// Message shown under the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadStatus {
    pub kind: StatusKind,
    pub message: String,
}

impl UploadStatus {
    pub fn empty() -> Self {
        Self {
            kind: StatusKind::Empty,
            message: String::new(),
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            message: message.into(),
        }
    }

    fn success(message: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Success,
            message: message.into(),
        }
    }
}

/// Broadcast to the rest of the page so the report panel can start polling
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadCompleted {
    pub storage_key: String,
    pub report_key: String,
}

pub struct UploadForm<T: UploadTransport> {
    transport: T,
    state: FormState,
    file: Option<SelectedFile>,
    kind: Option<FileKind>,
    preview: Option<String>,
    status: UploadStatus,
    completions: broadcast::Sender<UploadCompleted>,
}

impl<T: UploadTransport> UploadForm<T> {
    pub fn new(transport: T) -> Self {
        let (completions, _) = broadcast::channel(COMPLETION_CHANNEL_CAPACITY);
        Self {
            transport,
            state: FormState::Idle,
            file: None,
            kind: None,
            preview: None,
            status: UploadStatus::empty(),
            completions,
        }
    }

    /// Listen for completed uploads
    pub fn subscribe(&self) -> broadcast::Receiver<UploadCompleted> {
        self.completions.subscribe()
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn status(&self) -> &UploadStatus {
        &self.status
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.file.as_ref()
    }

    pub fn selected_kind(&self) -> Option<FileKind> {
        self.kind
    }

    pub fn preview(&self) -> Option<&str> {
        self.preview.as_deref()
    }

    pub fn can_submit(&self) -> bool {
        self.file.is_some() && self.state != FormState::Uploading
    }

    /// Choose a file, validating it and rendering a preview for images
    pub async fn select_file(&mut self, file: SelectedFile) -> FormState {
        self.reset();

        match validate(&file) {
            Ok(kind) => {
                debug!("Selected {} file '{}'", kind.label(), file.name);
                self.preview = preview(&file, kind).await;
                self.kind = Some(kind);
                self.file = Some(file);
                self.state = FormState::FileSelected;
            }
            Err(reason) => {
                debug!("Rejected file '{}': {}", file.name, reason);
                self.status = UploadStatus::error(reason.to_string());
                self.state = FormState::Error;
            }
        }

        self.state
    }

    /// Upload the selected file
    ///
    /// On failure the selection is kept so the same file can be submitted again.
    pub async fn submit(&mut self) -> Result<UploadReceipt, UploadError> {
        let Some(file) = self.file.as_ref() else {
            let err = UploadError::NoFileSelected;
            self.status = UploadStatus::error(err.to_string());
            self.state = FormState::Error;
            return Err(err);
        };

        self.state = FormState::Uploading;
        self.status = UploadStatus::empty();

        let result = match self.transport.send(file).await {
            Ok(raw) => interpret_upload_response(&raw, &file.name),
            Err(e) => Err(e),
        };

        match result {
            Ok(receipt) => {
                info!(
                    "Upload complete: storage_key={}, report_key={}",
                    receipt.storage_key, receipt.report_key
                );
                self.status = UploadStatus::success(MSG_UPLOAD_COMPLETE);
                self.state = FormState::Success;
                self.file = None;
                self.kind = None;
                self.preview = None;

                let event = UploadCompleted {
                    storage_key: receipt.storage_key.clone(),
                    report_key: receipt.report_key.clone(),
                };
                if self.completions.send(event).is_err() {
                    debug!("No listeners for upload completion");
                }

                Ok(receipt)
            }
            Err(e) => {
                warn!("Upload failed: {}", e);
                self.status = UploadStatus::error(e.to_string());
                self.state = FormState::Error;
                Err(e)
            }
        }
    }

    /// Back to `Idle`, dropping the selection and status
    pub fn reset(&mut self) {
        self.state = FormState::Idle;
        self.file = None;
        self.kind = None;
        self.preview = None;
        self.status = UploadStatus::empty();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::response::RawResponse;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Replays canned responses and records what was sent
    struct ScriptedTransport {
        responses: Mutex<Vec<Result<RawResponse, UploadError>>>,
        sent: Mutex<Vec<String>>,
    }

    impl ScriptedTransport {
        fn new(responses: Vec<Result<RawResponse, UploadError>>) -> Self {
            Self {
                responses: Mutex::new(responses),
                sent: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl UploadTransport for ScriptedTransport {
        async fn send(&self, file: &SelectedFile) -> Result<RawResponse, UploadError> {
            self.sent.lock().unwrap().push(file.name.clone());
            self.responses.lock().unwrap().remove(0)
        }
    }

    fn json_ok(filename: &str) -> Result<RawResponse, UploadError> {
        Ok(RawResponse {
            status: 200,
            content_type: Some("application/json".to_string()),
            body: format!(
                r#"{{"message":"File uploaded successfully","filename":"{}"}}"#,
                filename
            ),
        })
    }

    fn png() -> SelectedFile {
        SelectedFile::new("a.png", "image/png", b"0123456789".to_vec())
    }

    #[tokio::test]
    async fn test_select_valid_image_renders_preview() {
        let mut form = UploadForm::new(ScriptedTransport::new(vec![]));

        assert_eq!(form.state(), FormState::Idle);
        assert_eq!(form.select_file(png()).await, FormState::FileSelected);
        assert_eq!(form.selected_kind(), Some(FileKind::Image));
        assert!(form.preview().unwrap().starts_with("data:image/png;base64,"));
        assert!(form.can_submit());
    }

    #[tokio::test]
    async fn test_select_csv_has_no_preview() {
        let mut form = UploadForm::new(ScriptedTransport::new(vec![]));

        let csv = SelectedFile::new("plots.csv", "text/csv", b"a,b\n1,2".to_vec());
        assert_eq!(form.select_file(csv).await, FormState::FileSelected);
        assert_eq!(form.selected_kind(), Some(FileKind::Csv));
        assert_eq!(form.preview(), None);
    }

    #[tokio::test]
    async fn test_select_invalid_file_sets_error() {
        let mut form = UploadForm::new(ScriptedTransport::new(vec![]));

        let pdf = SelectedFile::new("report.pdf", "application/pdf", b"%PDF".to_vec());
        assert_eq!(form.select_file(pdf).await, FormState::Error);
        assert_eq!(form.status().kind, StatusKind::Error);
        assert!(!form.status().message.is_empty());
        assert!(form.selected_file().is_none());
        assert!(!form.can_submit());
    }

    #[tokio::test]
    async fn test_submit_without_file_is_error() {
        let mut form = UploadForm::new(ScriptedTransport::new(vec![]));

        assert_eq!(form.submit().await, Err(UploadError::NoFileSelected));
        assert_eq!(form.state(), FormState::Error);
        assert_eq!(form.status().message, "Please select a file to upload.");
    }

    #[tokio::test]
    async fn test_successful_submit_notifies_and_clears() {
        let mut form = UploadForm::new(ScriptedTransport::new(vec![json_ok(
            "1712345678901-a.png",
        )]));
        let mut completions = form.subscribe();

        form.select_file(png()).await;
        let receipt = form.submit().await.unwrap();

        assert_eq!(receipt.report_key, "1712345678901-a.html");
        assert_eq!(form.state(), FormState::Success);
        assert_eq!(form.status().kind, StatusKind::Success);
        assert!(form.selected_file().is_none());
        assert_eq!(form.preview(), None);

        let event = completions.try_recv().unwrap();
        assert_eq!(
            event,
            UploadCompleted {
                storage_key: "1712345678901-a.png".to_string(),
                report_key: "1712345678901-a.html".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_failed_submit_keeps_file_for_retry() {
        let transport = ScriptedTransport::new(vec![
            Err(UploadError::Transport("connection reset".to_string())),
            json_ok("1712345678902-a.png"),
        ]);
        let mut form = UploadForm::new(transport);
        let mut completions = form.subscribe();

        form.select_file(png()).await;
        let err = form.submit().await.unwrap_err();

        assert!(matches!(err, UploadError::Transport(_)));
        assert_eq!(form.state(), FormState::Error);
        assert!(form.status().message.contains("connection reset"));
        assert!(form.can_submit());
        assert!(completions.try_recv().is_err());

        let receipt = form.submit().await.unwrap();
        assert_eq!(receipt.storage_key, "1712345678902-a.png");
        assert_eq!(form.state(), FormState::Success);
        assert_eq!(
            form.transport.sent.lock().unwrap().as_slice(),
            ["a.png", "a.png"]
        );
    }

    #[tokio::test]
    async fn test_server_error_surfaces_message() {
        let mut form = UploadForm::new(ScriptedTransport::new(vec![Ok(RawResponse {
            status: 500,
            content_type: Some("application/json".to_string()),
            body: r#"{"error":"Upload failed: AWS Access Key ID is missing"}"#.to_string(),
        })]));

        form.select_file(png()).await;
        form.submit().await.unwrap_err();

        assert_eq!(
            form.status().message,
            "Upload failed: AWS Access Key ID is missing"
        );
    }

    #[tokio::test]
    async fn test_selecting_new_file_leaves_success() {
        let mut form = UploadForm::new(ScriptedTransport::new(vec![json_ok("1-a.png")]));

        form.select_file(png()).await;
        form.submit().await.unwrap();
        assert_eq!(form.state(), FormState::Success);

        let tiff = SelectedFile::new("dem.tif", "image/tiff", b"II*\0".to_vec());
        assert_eq!(form.select_file(tiff).await, FormState::FileSelected);
        assert_eq!(form.status().kind, StatusKind::Empty);
        assert_eq!(form.selected_kind(), Some(FileKind::GeoTiff));
    }
}
