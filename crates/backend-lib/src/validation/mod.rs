// ============================
// crates/backend-lib/src/validation/mod.rs
// ============================
//! Input validation for usernames and passwords, plus the injection screen.

use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;
use thiserror::Error;

pub const MIN_USERNAME_LENGTH: usize = 3;
pub const MAX_USERNAME_LENGTH: usize = 50;
pub const MIN_PASSWORD_LENGTH: usize = 6;
pub const MAX_PASSWORD_LENGTH: usize = 128;

static USERNAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_-]+$").unwrap());

// Coarse denylist. Over-blocks passwords with punctuation and is not a defence
// on its own; keyed storage is what keeps input out of any query language.
static INJECTION_PATTERNS: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        Regex::new(r"(?i)\b(SELECT|INSERT|UPDATE|DELETE|DROP|CREATE|ALTER|EXEC|EXECUTE)\b").unwrap(),
        Regex::new(r#"['";\\]"#).unwrap(),
        Regex::new(r"(--|#|/\*)").unwrap(),
    ]
});

/// Possible validation errors. The display text is the user-facing message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("El nombre de usuario debe ser un string")]
    UsernameType,

    #[error("El nombre de usuario debe tener entre 3 y 50 caracteres")]
    UsernameLength,

    #[error("El nombre de usuario contiene caracteres inválidos")]
    UsernameCharacters,

    #[error("La contraseña debe ser un string")]
    PasswordType,

    #[error("La contraseña debe tener entre 6 y 128 caracteres")]
    PasswordLength,

    #[error("La contraseña debe contener mayúsculas, minúsculas y números")]
    PasswordComplexity,
}

/// Result type for validation operations
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Length as seen by browser clients (UTF-16 code units)
pub fn text_length(text: &str) -> usize {
    text.encode_utf16().count()
}

/// Whether a request field counts as not provided.
///
/// Absent, `null`, empty string, `false` and zero are all treated as missing.
pub fn is_missing(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Bool(b)) => !b,
        Some(Value::Number(n)) => n.as_f64() == Some(0.0),
        Some(Value::Array(_) | Value::Object(_)) => false,
    }
}

/// The field value, unless it counts as missing
pub fn provided(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !is_missing(Some(*v)))
}

/// Check a string for SQL keywords, quotes, backslashes or comment markers
pub fn detect_injection(input: &str) -> bool {
    INJECTION_PATTERNS.iter().any(|pattern| pattern.is_match(input))
}

/// Same as [`detect_injection`] for a raw request field.
///
/// Only strings are screened. Any other type is left for the validators,
/// which reject it with a wrong-type message.
pub fn detect_injection_value(value: &Value) -> bool {
    value.as_str().is_some_and(detect_injection)
}

/// Validate a username
pub fn validate_username(value: &Value) -> ValidationResult<&str> {
    let Value::String(username) = value else {
        return Err(ValidationError::UsernameType);
    };

    let length = text_length(username);
    if !(MIN_USERNAME_LENGTH..=MAX_USERNAME_LENGTH).contains(&length) {
        return Err(ValidationError::UsernameLength);
    }

    if !USERNAME_REGEX.is_match(username) {
        return Err(ValidationError::UsernameCharacters);
    }

    Ok(username.as_str())
}

/// Validate a password
pub fn validate_password(value: &Value) -> ValidationResult<&str> {
    let Value::String(password) = value else {
        return Err(ValidationError::PasswordType);
    };

    let length = text_length(password);
    if !(MIN_PASSWORD_LENGTH..=MAX_PASSWORD_LENGTH).contains(&length) {
        return Err(ValidationError::PasswordLength);
    }

    let has_uppercase = password.chars().any(|c| c.is_ascii_uppercase());
    let has_lowercase = password.chars().any(|c| c.is_ascii_lowercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());

    if !(has_uppercase && has_lowercase && has_digit) {
        return Err(ValidationError::PasswordComplexity);
    }

    Ok(password.as_str())
}
