use thiserror::Error;

/// Errors produced by value conversions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValueError {
    #[error("cyclic value graph cannot be converted to JSON")]
    Cyclic,

    #[error("unsupported value: {0}")]
    Unsupported(String),
}

/// Convenience alias for value results.
pub type ValueResult<T> = Result<T, ValueError>;
