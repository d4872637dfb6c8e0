use thiserror::Error;

/// Rejected form input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    #[error("{field} too long")]
    TooLong { field: &'static str },

    #[error("password must be at least {min} characters")]
    PasswordTooShort { min: usize },
}
