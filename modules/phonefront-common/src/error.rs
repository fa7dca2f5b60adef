use contentstack_client::ContentstackError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PhoneFrontError>;

#[derive(Error, Debug)]
pub enum PhoneFrontError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Content delivery error: {0}")]
    Content(String),

    #[error("Taxonomy table error: {0}")]
    Taxonomy(String),
}

impl From<ContentstackError> for PhoneFrontError {
    fn from(err: ContentstackError) -> Self {
        match err {
            ContentstackError::Config(msg) => PhoneFrontError::Config(msg),
            other => PhoneFrontError::Content(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_config_errors_stay_config_errors() {
        let err: PhoneFrontError = ContentstackError::Config("missing token".to_string()).into();
        assert!(matches!(err, PhoneFrontError::Config(msg) if msg == "missing token"));
    }

    #[test]
    fn other_client_errors_become_content_errors() {
        let err: PhoneFrontError = ContentstackError::Api {
            status: 422,
            message: "bad query".to_string(),
        }
        .into();
        assert!(matches!(err, PhoneFrontError::Content(msg) if msg.contains("422")));
    }
}
