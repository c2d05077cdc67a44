use thiserror::Error;

/// Type alias for Result with JobMailError
pub type Result<T> = std::result::Result<T, JobMailError>;

/// Error types for the job-mail counting pipeline
///
/// Every error is fatal to the account currently being processed; there is
/// no internal retry. Whether a failed account aborts the whole run is
/// decided by the driver (see `ExecutionConfig::continue_on_error`).
#[derive(Error, Debug)]
pub enum JobMailError {
    /// Gmail API returned an error
    #[error("Gmail API error: {0}")]
    ApiError(String),

    /// Refresh or interactive authorization could not complete
    #[error("Authentication failed: {0}")]
    AuthError(String),

    /// Missing or unusable static configuration (client secret, config file)
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Caller supplied an unusable argument (query window under-specified,
    /// malformed start date)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Network-related error (connection issues, timeouts, etc.)
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Server returned 5xx error
    #[error("Server error (HTTP {status}): {message}")]
    ServerError { status: u16, message: String },

    /// Rate limit exceeded (HTTP 429); surfaced as-is, not retried
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// Resource not found (404)
    #[error("Message not found: {0}")]
    MessageNotFound(String),

    /// Bad request (400)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Forbidden (403)
    #[error("Access forbidden: {0}")]
    Forbidden(String),

    /// Invalid message format or parsing error
    #[error("Invalid message format: {0}")]
    InvalidMessageFormat(String),

    /// IO error (file operations, etc.)
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl From<google_gmail1::Error> for JobMailError {
    fn from(error: google_gmail1::Error) -> Self {
        match error {
            // HTTP response with status code (non-success responses)
            google_gmail1::Error::Failure(ref response) => {
                let status = response.status();
                let status_code = status.as_u16();
                let message = format!(
                    "HTTP {}: {}",
                    status_code,
                    status.canonical_reason().unwrap_or("Unknown")
                );

                match status_code {
                    429 => JobMailError::RateLimited(message),
                    404 => JobMailError::MessageNotFound("Resource not found".to_string()),
                    400 => JobMailError::BadRequest(message),
                    403 => JobMailError::Forbidden(message),
                    500..=599 => JobMailError::ServerError {
                        status: status_code,
                        message,
                    },
                    _ => JobMailError::ApiError(message),
                }
            }
            // BadRequest variant (request not understood by server)
            google_gmail1::Error::BadRequest(ref err) => {
                JobMailError::BadRequest(format!("{}", err))
            }
            // Network/connection errors
            google_gmail1::Error::HttpError(ref err) => {
                JobMailError::NetworkError(format!("Connection error: {}", err))
            }
            google_gmail1::Error::Io(err) => JobMailError::NetworkError(err.to_string()),
            // All other errors
            _ => JobMailError::ApiError(error.to_string()),
        }
    }
}
