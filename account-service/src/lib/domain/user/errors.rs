use thiserror::Error;

/// Error for UserId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserIdError {
    #[error("Invalid user id: {0}")]
    InvalidFormat(String),
}

/// Error for Name validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NameError {
    #[error("Name must not be empty")]
    Empty,

    #[error("Name too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Error for credential hashing operations
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Password verification failed: {0}")]
    VerificationFailed(String),
}

/// Stable classification of a [`UserError`].
///
/// Callers branch on the kind instead of matching message strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or out-of-bounds input
    Validation,
    /// Well-formed input that violates a business rule
    Unprocessable,
    /// Referenced record does not exist
    NotFound,
    /// Credential mismatch
    Unauthorized,
    /// Infrastructure failure
    Internal,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "VALIDATION_ERROR",
            ErrorKind::Unprocessable => "UNPROCESSABLE_ENTITY",
            ErrorKind::NotFound => "NOT_FOUND",
            ErrorKind::Unauthorized => "UNAUTHORIZED",
            ErrorKind::Internal => "INTERNAL_ERROR",
        }
    }
}

/// Top-level error for all user-related operations
#[derive(Debug, Clone, Error)]
pub enum UserError {
    // Value object validation errors (automatically converted via #[from])
    #[error("{0}")]
    InvalidUserId(#[from] UserIdError),

    #[error("{0}")]
    InvalidName(#[from] NameError),

    #[error("{0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    // Domain-level errors
    #[error("Unknown user")]
    NotFound(String),

    #[error("EMAIL_ALREADY_TAKEN")]
    EmailAlreadyExists(String),

    #[error("Invalid old password")]
    InvalidCredentials,

    #[error("password not same")]
    PasswordMismatch,

    #[error("New password length must be between {min} and {max} characters")]
    PasswordLength { min: usize, max: usize },

    #[error("Failed to create user")]
    CreateFailed,

    #[error("Failed to update user")]
    UpdateFailed,

    #[error("Failed to delete user")]
    DeleteFailed,

    #[error("Failed to update password")]
    PasswordUpdateFailed,

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl UserError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            UserError::InvalidUserId(_) | UserError::InvalidName(_) | UserError::InvalidEmail(_) => {
                ErrorKind::Validation
            }
            UserError::NotFound(_) => ErrorKind::NotFound,
            UserError::InvalidCredentials => ErrorKind::Unauthorized,
            UserError::EmailAlreadyExists(_)
            | UserError::PasswordMismatch
            | UserError::PasswordLength { .. }
            | UserError::CreateFailed
            | UserError::UpdateFailed
            | UserError::DeleteFailed
            | UserError::PasswordUpdateFailed => ErrorKind::Unprocessable,
            UserError::Password(_) | UserError::DatabaseError(_) => ErrorKind::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_business_rule_messages_are_stable() {
        assert_eq!(
            UserError::EmailAlreadyExists("a@x.com".to_string()).to_string(),
            "EMAIL_ALREADY_TAKEN"
        );
        assert_eq!(UserError::NotFound("id".to_string()).to_string(), "Unknown user");
        assert_eq!(UserError::InvalidCredentials.to_string(), "Invalid old password");
        assert_eq!(UserError::PasswordMismatch.to_string(), "password not same");
        assert_eq!(
            UserError::PasswordLength { min: 6, max: 32 }.to_string(),
            "New password length must be between 6 and 32 characters"
        );
    }

    #[test]
    fn test_kind_classification() {
        assert_eq!(UserError::from(NameError::Empty).kind(), ErrorKind::Validation);
        assert_eq!(UserError::NotFound("id".to_string()).kind(), ErrorKind::NotFound);
        assert_eq!(UserError::InvalidCredentials.kind(), ErrorKind::Unauthorized);
        assert_eq!(UserError::DeleteFailed.kind(), ErrorKind::Unprocessable);
        assert_eq!(
            UserError::DatabaseError("boom".to_string()).kind(),
            ErrorKind::Internal
        );
    }
}
