/// SceneScribe error types
#[derive(Debug, thiserror::Error)]
pub enum ScenescribeError {
    /// Configuration file missing, unreadable or incomplete
    #[error("Configuration unavailable: {0}")]
    ConfigUnavailable(String),

    /// Input transcript missing or not valid UTF-8
    #[error("Not found: {0}")]
    NotFound(String),

    /// API answered with a non-200 status after all retries
    #[error("Request failed with status {status}: {body}")]
    RequestFailed {
        /// HTTP status code of the last attempt
        status: u16,
        /// Response body of the last attempt
        body: String,
    },

    /// Network failure or unreadable response after all retries
    #[error("Transport error: {0}")]
    Transport(String),

    /// API body lacks the expected completion structure
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Model output is not a mapping of string to string
    #[error("Parse error: {reason}")]
    Parse {
        /// Why parsing failed
        reason: String,
        /// Text that was being parsed
        raw: String,
    },

    /// Run aborted through its cancellation token
    #[error("Operation cancelled")]
    Cancelled,

    /// File system error
    #[error("File system error: {0}")]
    FileSystem(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// General error (anyhow integration)
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ScenescribeError {
    /// Create config error
    pub fn config_unavailable<S: Into<String>>(msg: S) -> Self {
        Self::ConfigUnavailable(msg.into())
    }

    /// Create not found error
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create request failed error
    pub fn request_failed<S: Into<String>>(status: u16, body: S) -> Self {
        Self::RequestFailed {
            status,
            body: body.into(),
        }
    }

    /// Create transport error
    pub fn transport<S: Into<String>>(msg: S) -> Self {
        Self::Transport(msg.into())
    }

    /// Create malformed response error
    pub fn malformed_response<S: Into<String>>(msg: S) -> Self {
        Self::MalformedResponse(msg.into())
    }

    /// Create parse error, keeping the raw text for display
    pub fn parse<R: Into<String>, S: Into<String>>(reason: R, raw: S) -> Self {
        Self::Parse {
            reason: reason.into(),
            raw: raw.into(),
        }
    }

    /// Create file system error
    pub fn file_system<S: Into<String>>(msg: S) -> Self {
        Self::FileSystem(msg.into())
    }

    /// Create invalid input error
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Whether another attempt with the same payload may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::RequestFailed { .. } | Self::Transport(_))
    }

    /// Raw model output attached to a parse failure
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            Self::Parse { raw, .. } => Some(raw),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        assert!(ScenescribeError::request_failed(503, "busy").is_retryable());
        assert!(ScenescribeError::transport("connection reset").is_retryable());
        assert!(!ScenescribeError::malformed_response("no choices").is_retryable());
        assert!(!ScenescribeError::Cancelled.is_retryable());
        assert!(!ScenescribeError::parse("bad", "raw").is_retryable());
    }

    #[test]
    fn test_raw_response_only_on_parse() {
        let err = ScenescribeError::parse("expected object", "not a mapping");
        assert_eq!(err.raw_response(), Some("not a mapping"));
        assert_eq!(ScenescribeError::Cancelled.raw_response(), None);
    }

    #[test]
    fn test_display() {
        let err = ScenescribeError::request_failed(429, "rate limited");
        assert_eq!(err.to_string(), "Request failed with status 429: rate limited");
    }
}
