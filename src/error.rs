use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use derive_more::{Display, From};
use serde_json::json;

/// Failures that abort a request. Duplicate submissions are not errors;
/// see [`crate::engine::SubmitOutcome`].
#[derive(Debug, Display, From)]
pub enum AppError {
    #[display(fmt = "attendance storage I/O failed: {}", _0)]
    Io(std::io::Error),

    #[display(fmt = "tabular file could not be read or written: {}", _0)]
    Csv(csv::Error),

    #[display(fmt = "session token could not be issued: {}", _0)]
    Token(jsonwebtoken::errors::Error),

    #[display(fmt = "blocking task failed: {}", _0)]
    Blocking(actix_web::error::BlockingError),
}

impl std::error::Error for AppError {}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse {
        tracing::error!(error = %self, "Request failed");
        HttpResponse::build(self.status_code()).json(json!({
            "message": "Internal Server Error"
        }))
    }
}

pub type AppResult<T> = Result<T, AppError>;
