use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConvertError {
    /// Client-side validation refused the selection. The message is shown as-is.
    #[error("{0}")]
    Rejected(String),

    #[error("Invalid value for {name}: {value}")]
    InvalidOption { name: String, value: String },

    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Unknown gallery entry: {0}")]
    UnknownEntry(u64),

    #[error("Index {index} out of bounds (len {len})")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("Unknown mode: {0}")]
    UnknownMode(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}
