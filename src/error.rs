//! Error types for Blogpad

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::validation::FieldError;

/// Message returned for every upstream or internal failure
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong";

#[derive(Error, Debug)]
pub enum Error {
    #[error("No session cookie present")]
    NoSession,

    #[error("Session expired or invalid")]
    SessionExpiredOrInvalid,

    #[error("Email or password is invalid")]
    InvalidCredentials,

    #[error("Email has been used. Please use another email")]
    EmailConflict,

    #[error("Blog not found")]
    ResourceNotFound,

    #[error("Access Denied")]
    OwnershipMismatch,

    #[error("Validation failed on {} field(s)", .0.len())]
    Validation(Vec<FieldError>),

    #[error("Upstream store failure: {0}")]
    UpstreamStoreFailure(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Config file not found. Run 'blogpad init' first.")]
    ConfigNotFound,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<bcrypt::BcryptError> for Error {
    fn from(err: bcrypt::BcryptError) -> Self {
        Error::UpstreamStoreFailure(format!("password hashing: {}", err))
    }
}

impl Error {
    /// HTTP status a client sees for this error
    pub fn status(&self) -> StatusCode {
        match self {
            Error::NoSession | Error::SessionExpiredOrInvalid => StatusCode::UNAUTHORIZED,
            Error::InvalidCredentials => StatusCode::BAD_REQUEST,
            Error::EmailConflict => StatusCode::CONFLICT,
            Error::ResourceNotFound => StatusCode::NOT_FOUND,
            Error::OwnershipMismatch => StatusCode::FORBIDDEN,
            Error::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Whether the cause must stay server-side
    pub fn is_internal(&self) -> bool {
        self.status() == StatusCode::INTERNAL_SERVER_ERROR
    }
}

/// JSON body carrying a single message
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            Error::Validation(errors) => (status, Json(errors)).into_response(),
            Error::NoSession | Error::SessionExpiredOrInvalid => {
                tracing::debug!("Rejecting request: {}", self);
                (status, Json(MessageResponse::new("Unauthorized"))).into_response()
            }
            err if err.is_internal() => {
                tracing::error!("Request failed: {}", err);
                (status, Json(MessageResponse::new(GENERIC_ERROR_MESSAGE))).into_response()
            }
            err => (status, Json(MessageResponse::new(err.to_string()))).into_response(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
