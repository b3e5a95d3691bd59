use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern"));

pub const MIN_PASSWORD_LEN: usize = 6;

/// Client-visible screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Route {
    Board,
    Login,
    Register,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Board => "/",
            Route::Login => "/login",
            Route::Register => "/register",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("All fields are required.")]
    MissingFields,

    #[error("Invalid email format.")]
    InvalidEmail,

    #[error("Password must be at least 6 characters long.")]
    PasswordTooShort,
}

/// Shared gate for both auth screens. The first failing rule wins.
pub fn validate_credentials(email: &str, password: &str) -> Result<(), ValidationError> {
    if email.is_empty() || password.is_empty() {
        return Err(ValidationError::MissingFields);
    }
    if !EMAIL_PATTERN.is_match(email) {
        return Err(ValidationError::InvalidEmail);
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort);
    }
    Ok(())
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl LoginForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_credentials(&self.email, &self.password)
    }
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct RegisterForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl RegisterForm {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.is_empty() {
            return Err(ValidationError::MissingFields);
        }
        validate_credentials(&self.email, &self.password)
    }
}
