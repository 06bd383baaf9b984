use std::io::Error as IoError;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use service_status::QueryError;
use service_status::config::ConfigError;
use thiserror::Error;
use tracing::error;

/// Errors that abort startup
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0:#}")]
    Io(#[from] IoError),
    #[error("Address parsing error: {0}")]
    AddrParse(#[from] std::net::AddrParseError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Database(#[from] anyhow::Error),
}

/// Query failures mapped onto HTTP responses
#[derive(Debug, Error)]
#[error(transparent)]
pub struct ApiError(#[from] QueryError);

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self.0 {
            QueryError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            QueryError::NotFound => StatusCode::NOT_FOUND,
            QueryError::StoreUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let message = if status.is_server_error() {
            // Backend details stay in the log.
            error!(error = %self.0, "Query failed");
            "store unavailable".to_string()
        } else {
            self.0.to_string()
        };
        HttpResponse::build(status).json(ErrorBody { error: message })
    }
}
