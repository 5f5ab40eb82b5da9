use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the CLI
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Jwa(#[from] jose_jwa::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid hex input: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error("Invalid base64url input: {0}")]
    Base64(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
