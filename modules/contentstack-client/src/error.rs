use thiserror::Error;

pub type Result<T> = std::result::Result<T, ContentstackError>;

#[derive(Debug, Error)]
pub enum ContentstackError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for ContentstackError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ContentstackError::Parse(err.to_string())
        } else {
            ContentstackError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ContentstackError {
    fn from(err: serde_json::Error) -> Self {
        ContentstackError::Parse(err.to_string())
    }
}
