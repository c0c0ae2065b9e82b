use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use thiserror::Error;

/// Errors surfaced to HTTP clients. The display text is the only detail a
/// client ever sees; causes are logged before conversion.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("There was an error uploading the file.")]
    Upload,
    #[error("Could not retrieve file records.")]
    Listing,
    #[error("Invalid multipart payload.")]
    InvalidMultipart,
    #[error("No file was provided in the upload.")]
    MissingFile,
}

#[derive(Serialize)]
struct ApiErrBody {
    detail: String,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Upload | ApiError::Listing => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::InvalidMultipart => StatusCode::BAD_REQUEST,
            ApiError::MissingFile => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ApiErrBody {
            detail: self.to_string(),
        })
    }
}
