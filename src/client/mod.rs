//! Upload client: the browser-side half of the upload/report workflow
//!
//! Validates and previews a file, submits it to `/api/upload`, announces the
//! completed upload and polls `/api/getAnalysis` for the generated report.

mod analysis;
mod form;
mod preview;
mod response;
mod transport;
mod validation;

pub use analysis::{AnalysisClient, AnalysisClientError, PollPolicy, ReportFetch};
pub use form::{FormState, StatusKind, UploadCompleted, UploadForm, UploadStatus};
pub use preview::preview;
pub use response::{interpret_upload_response, RawResponse, UploadError, UploadReceipt};
pub use transport::{HttpUploadTransport, UploadTransport};
pub use validation::{validate, FileKind, RejectionReason, SelectedFile};
