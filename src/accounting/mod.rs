use thiserror::Error;

pub mod analyzer;
pub mod transactions;


#[derive(Debug, PartialEq, Error)]
pub enum ValidationError {
    #[error("input is not an array")]
    NotAnArray,
    #[error("invalid transaction at index {index}: {reason}")]
    InvalidElement { index: usize, reason: FieldError },
}

/// Why a single element was rejected.
#[derive(Debug, PartialEq, Error)]
pub enum FieldError {
    #[error("element is not an object")]
    NotAnObject,
    #[error("missing field `{0}`")]
    MissingField(&'static str),
    #[error("id must be an integer")]
    InvalidId,
    #[error("amount must be a number")]
    InvalidAmount,
    #[error("amount is out of range")]
    AmountOutOfRange,
    #[error("amount must not be negative")]
    NegativeAmount,
    #[error("date is not a valid calendar instant")]
    InvalidDate,
    #[error("category must be a string")]
    InvalidCategory,
    #[error("category must not be empty")]
    EmptyCategory,
    #[error("unknown transaction type `{0}`")]
    UnknownType(String),
}
