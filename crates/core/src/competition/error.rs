use thiserror::Error;

/// Errors raised by input validation, before any store is touched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),
    #[error("{field} is too long (maximum {max} characters)")]
    TooLong { field: &'static str, max: usize },
    #[error("invalid email format")]
    InvalidEmail,
    #[error("Invalid {0} format")]
    InvalidDate(&'static str),
}
