use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid ignore pattern '{pattern}' while testing '{url}': {reason}")]
    InvalidPattern {
        pattern: String,
        url: String,
        reason: String,
    },

    #[error("Feed parsing error: {0}")]
    FeedParse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
