use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[source] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    JsonParsing(#[from] serde_json::Error),

    #[error("Failed to {action}: {status} - {message}")]
    ApiError {
        action: &'static str,
        status: u16,
        message: String,
    },

    #[error("{0} is not allowed")]
    MethodNotAllowed(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Configuration missing: {0}")]
    ConfigurationMissing(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

pub type Result<T> = std::result::Result<T, Error>;

// リクエストURLには `apiKey` が含まれるため、エラーに残さない
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::RequestFailed(err.without_url())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display_includes_body() {
        let err = Error::ApiError {
            action: "get space",
            status: 401,
            message: r#"{"errors":[{"message":"Authentication failure"}]}"#.to_string(),
        };

        assert_eq!(
            err.to_string(),
            r#"Failed to get space: 401 - {"errors":[{"message":"Authentication failure"}]}"#
        );
    }

    #[test]
    fn test_method_not_allowed_display() {
        let err = Error::MethodNotAllowed("DELETE".to_string());
        assert_eq!(err.to_string(), "DELETE is not allowed");
    }
}
