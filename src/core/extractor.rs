use axum::{
    body::Body,
    extract::{multipart::MultipartRejection, FromRequest, Multipart, Request},
    response::{IntoResponse, Response},
};
use tracing::debug;

use crate::core::error::AppError;
use crate::shared::constants::MSG_NO_FILE_UPLOADED;

/// Multipart extractor that reports a non-multipart body as a missing upload
pub struct AppMultipart(pub Multipart);

impl<S> FromRequest<S> for AppMultipart
where
    S: Send + Sync,
{
    type Rejection = AppMultipartRejection;

    async fn from_request(req: Request<Body>, state: &S) -> Result<Self, Self::Rejection> {
        match Multipart::from_request(req, state).await {
            Ok(multipart) => Ok(Self(multipart)),
            Err(rejection) => Err(AppMultipartRejection(rejection)),
        }
    }
}

pub struct AppMultipartRejection(MultipartRejection);

impl IntoResponse for AppMultipartRejection {
    fn into_response(self) -> Response {
        // Without a multipart body there cannot be a `file` part
        debug!("Rejected non-multipart upload: {}", self.0.body_text());
        AppError::BadRequest(MSG_NO_FILE_UPLOADED.to_string()).into_response()
    }
}
