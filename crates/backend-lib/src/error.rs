// crates/backend-lib/src/error.rs

//! Central error type + Axum integration.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use credgate_common::ApiResponse;
use thiserror::Error;

use crate::validation::ValidationError;

/// Generic login failure text, shared by every failing login branch
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Credenciales inválidas";

/// Application error types with error codes and context
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Username and password are required")]
    MissingCredentials,

    #[error("Input rejected by injection screen")]
    InjectionDetected,

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Username already registered")]
    UsernameTaken,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Caller identity missing")]
    Unauthorized,

    #[error("Caller is not an administrator")]
    Forbidden,

    #[error("Authentication rate limit exceeded")]
    AuthRateLimited,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingCredentials
            | AppError::InjectionDetected
            | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::UsernameTaken => StatusCode::CONFLICT,
            AppError::InvalidCredentials | AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::AuthRateLimited => StatusCode::TOO_MANY_REQUESTS,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::MissingCredentials => "VAL_001",
            AppError::InjectionDetected => "VAL_002",
            AppError::Validation(_) => "VAL_003",
            AppError::UsernameTaken => "USR_001",
            AppError::InvalidCredentials => "AUTH_001",
            AppError::Unauthorized => "AUTH_002",
            AppError::Forbidden => "AUTH_003",
            AppError::AuthRateLimited => "AUTH_004",
            AppError::Internal(_) => "INT_001",
        }
    }

    /// Message sent to the client
    pub fn client_message(&self) -> String {
        match self {
            AppError::MissingCredentials => "Nombre de usuario y contraseña requeridos".to_string(),
            AppError::InjectionDetected => "Entrada inválida".to_string(),
            AppError::Validation(err) => err.to_string(),
            AppError::UsernameTaken => "El nombre de usuario ya está registrado".to_string(),
            AppError::InvalidCredentials => INVALID_CREDENTIALS_MESSAGE.to_string(),
            AppError::Unauthorized => "No autorizado".to_string(),
            AppError::Forbidden => "Acceso denegado".to_string(),
            AppError::AuthRateLimited => "Demasiados intentos, intente más tarde".to_string(),
            AppError::Internal(_) => "Error interno del servidor".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if let AppError::Internal(detail) = &self {
            tracing::error!(code = self.error_code(), %detail, "internal error");
        } else {
            tracing::debug!(code = self.error_code(), error = %self, "request rejected");
        }

        (status, Json(ApiResponse::failure(self.client_message()))).into_response()
    }
}

impl From<String> for AppError {
    fn from(msg: String) -> Self {
        AppError::Internal(msg)
    }
}

impl From<&str> for AppError {
    fn from(msg: &str) -> Self {
        AppError::Internal(msg.to_string())
    }
}
