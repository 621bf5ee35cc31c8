use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CacheError {
    #[error("No open checkpoint")]
    NoOpenCheckpoint,

    #[error("Malformed cached element: {0}")]
    MalformedElement(String),

    #[error("Invalid key length: expected {expected} bytes, got {actual}")]
    InvalidKey { expected: usize, actual: usize },
}
