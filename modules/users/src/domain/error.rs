use thiserror::Error;

/// Domain-specific errors using thiserror.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("user not found: {id}")]
    NotFound { id: i64 },

    #[error("email '{email}' is already registered")]
    EmailAlreadyExists { email: String },

    #[error("validation failed: {field}: {message}")]
    Validation { field: String, message: String },

    /// The save succeeded but the follow-up search by email came back
    /// empty, so the assigned id could not be recovered.
    #[error("could not retrieve created user '{email}'")]
    CreatedUserMissing { email: String },

    /// The ERP backend could not be reached or rejected the call. Distinct
    /// from an empty result: callers can tell "no data" from "backend down".
    #[error("backend request failed: {message}")]
    Backend { message: String },
}

impl DomainError {
    pub fn not_found(id: i64) -> Self {
        Self::NotFound { id }
    }

    pub fn email_already_exists(email: impl Into<String>) -> Self {
        Self::EmailAlreadyExists {
            email: email.into(),
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn created_user_missing(email: impl Into<String>) -> Self {
        Self::CreatedUserMissing {
            email: email.into(),
        }
    }

    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }
}
