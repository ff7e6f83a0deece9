use rocket::http::Status;
use rocket::response::Responder;
use rocket::serde::json::Json;
use shared::{ErrorResponse, ValidationError};
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(&'static str),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Unprocessable(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> Status {
        match self {
            ApiError::NotFound(_) => Status::NotFound,
            ApiError::BadRequest(_) => Status::BadRequest,
            ApiError::Conflict(_) => Status::Conflict,
            ApiError::Unprocessable(_) => Status::UnprocessableEntity,
            ApiError::Internal(_) => Status::InternalServerError,
        }
    }

    pub fn detail(&self) -> String {
        match self {
            ApiError::Internal(_) => "Internal Server Error".into(),
            other => other.to_string(),
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        error!("Database error: {}", e);
        ApiError::Internal(e.to_string())
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        ApiError::Unprocessable(e.to_string())
    }
}

impl From<shared::Error> for ApiError {
    fn from(e: shared::Error) -> Self {
        ApiError::Unprocessable(e.to_string())
    }
}

impl<'r, 'o: 'r> Responder<'r, 'o> for ApiError {
    fn respond_to(self, req: &'r rocket::Request<'_>) -> rocket::response::Result<'o> {
        let status = self.status();
        rocket::Response::build_from(Json(ErrorResponse::new(self.detail())).respond_to(req)?)
            .status(status)
            .ok()
    }
}
