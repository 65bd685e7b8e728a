use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use log::{error, warn};
use serde::Serialize;
use std::fmt;

use crate::db::{StoreError, StoreErrorKind};

const DATABASE_CONNECTION_MESSAGE: &str =
    "Database connection error. Please check the connection and try again.";

#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    Database { context: String, source: StoreError },
    Mail(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl AppError {
    pub fn employee_not_found(id: &str) -> Self {
        AppError::NotFound(format!("Employee with ID {} not found", id))
    }

    pub fn database(context: impl Into<String>) -> impl FnOnce(StoreError) -> AppError {
        let context = context.into();
        move |source| AppError::Database { context, source }
    }

    fn body(&self) -> ErrorResponse {
        match self {
            AppError::NotFound(msg) | AppError::BadRequest(msg) => ErrorResponse {
                error: msg.clone(),
                details: None,
            },
            AppError::Database { context, source } => {
                let error = match source.kind {
                    StoreErrorKind::Connection => DATABASE_CONNECTION_MESSAGE.to_string(),
                    StoreErrorKind::Query => context.clone(),
                };
                ErrorResponse { error, details: Some(source.message.clone()) }
            }
            AppError::Mail(msg) => ErrorResponse {
                error: "Error sending email".to_string(),
                details: Some(msg.clone()),
            },
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::Database { context, source } => write!(f, "{}: {}", context, source),
            AppError::Mail(msg) => write!(f, "Mail Error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Database { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Database { .. } | AppError::Mail(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            error!("{}", self);
        } else {
            warn!("{}", self);
        }
        HttpResponse::build(status).json(self.body())
    }
}
