use actix_multipart::MultipartError;
use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use log::error;
use serde::Serialize;
use thiserror::Error;

use crate::utils::result::{self, StdResult};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("No file uploaded")]
    NoFile,

    #[error("Only image files are allowed")]
    NotAnImage,

    #[error("Unexpected field")]
    UnexpectedField,

    #[error("File too large")]
    TooLarge,

    #[error("Invalid multipart payload")]
    Multipart(#[from] MultipartError),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// The user has no photos.
    #[error("No photos found or invalid user ID.")]
    NoPhotos,

    /// The id could not be parsed or the lookup failed.
    #[error("Invalid user ID format.")]
    InvalidUserId,

    #[error("Image not found")]
    ImageNotFound,

    #[error("Photo not found")]
    PhotoNotFound,

    #[error("Error adding comment")]
    CommentFailed(#[source] result::Error),

    #[error("Internal server error")]
    Internal(#[source] result::Error),
}

impl AppError {
    pub fn comment_failed(err: impl Into<result::Error>) -> Self {
        let err = err.into();
        error!(target: "photoroll", "Error adding comment: {:#}", err);
        Self::CommentFailed(err)
    }
}

impl From<result::Error> for AppError {
    fn from(err: result::Error) -> Self {
        error!(target: "photoroll", "ERROR: {:#}", err);
        Self::Internal(err)
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        result::Error::from(err).into()
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        use AppError::*;
        match self {
            NoFile | NotAnImage | UnexpectedField | Multipart(_) | InvalidBody(_) => {
                StatusCode::BAD_REQUEST
            }
            NoPhotos | InvalidUserId => StatusCode::BAD_REQUEST,
            TooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ImageNotFound | PhotoNotFound => StatusCode::NOT_FOUND,
            CommentFailed(_) | Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.to_string(),
        })
    }
}

pub type Response<T = HttpResponse> = StdResult<T, AppError>;
