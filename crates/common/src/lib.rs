// ================
// crates/common/src/lib.rs
// ================
//! Common types and structures
//! used for communication between the credgate clients and server.
//! This module defines the JSON request and response bodies of the HTTP API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use zeroize::Zeroize;

/// Body of `POST /registro` and `POST /login`.
///
/// Fields are kept as raw JSON values so the server can tell a missing field
/// from one of the wrong type. A string password is wiped on drop.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct CredentialsRequest {
    /// Claimed username
    #[serde(default)]
    pub username: Option<Value>,
    /// Plaintext password
    #[serde(default)]
    pub password: Option<Value>,
}

impl CredentialsRequest {
    /// Build a request from two strings
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: Some(Value::String(username.into())),
            password: Some(Value::String(password.into())),
        }
    }

    /// Username as text, if it is a JSON string
    pub fn username_str(&self) -> Option<&str> {
        self.username.as_ref().and_then(Value::as_str)
    }

    /// Password as text, if it is a JSON string
    pub fn password_str(&self) -> Option<&str> {
        self.password.as_ref().and_then(Value::as_str)
    }

    /// Overwrite the password text in place and forget it
    pub fn wipe_password(&mut self) {
        if let Some(Value::String(password)) = self.password.as_mut() {
            password.zeroize();
        }
        self.password = None;
    }
}

impl Drop for CredentialsRequest {
    fn drop(&mut self) {
        self.wipe_password();
    }
}

/// Body of `POST /users`: the caller's claimed identity.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct UsersRequest {
    #[serde(default)]
    pub username: Option<Value>,
}

impl UsersRequest {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: Some(Value::String(username.into())),
        }
    }
}

/// Generic `{success, message}` reply used by registration and by every error.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub success: bool,
    pub message: String,
}

impl ApiResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Successful login reply
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    /// Stored role of the authenticated user (`user` or `admin`)
    pub role: String,
}

/// Public view of a stored account. Never carries salt or hash.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub username: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

/// Reply of `POST /users` for an admin caller
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UsersResponse {
    pub success: bool,
    pub users: Vec<UserSummary>,
    pub total_users: usize,
}

impl UsersResponse {
    pub fn new(users: Vec<UserSummary>) -> Self {
        Self {
            success: true,
            total_users: users.len(),
            users,
        }
    }
}

/// Reply for unknown routes
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct NotFoundResponse {
    pub error: String,
    pub message: String,
}
