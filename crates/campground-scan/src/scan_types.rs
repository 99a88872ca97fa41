use reqwest::StatusCode;

/// Custom error type for campground scan operations
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// The back-end has no campground with this identifier
    #[error("No campground with id {0}")]
    CampgroundNotFound(String),

    /// The identifier cannot be used with this back-end
    #[error("Invalid campground id: {0}")]
    InvalidCampgroundId(String),

    /// Rate limited by external API
    #[error("Rate limited by external API")]
    RateLimited,

    /// Authentication failed with external service
    #[error("Authentication failed with external service")]
    AuthenticationFailed,

    /// API error
    #[error("API error: {0}")]
    ApiError(String),

    /// Network error
    #[error("Network error: {0}")]
    Network(String),

    /// Data format error
    #[error("Data format error: {0}")]
    DataFormat(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl ScanError {
    /// Map an unsuccessful HTTP status to an error.
    ///
    /// 404 is left to the adapters since it means "no such campground" for some
    /// requests and a plain API error for others.
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        match status.as_u16() {
            429 => ScanError::RateLimited,
            401 | 403 => ScanError::AuthenticationFailed,
            _ if body.is_empty() => ScanError::ApiError(format!("HTTP {}", status)),
            _ => ScanError::ApiError(format!("HTTP {} - {}", status, body)),
        }
    }
}

impl From<reqwest::Error> for ScanError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ScanError::DataFormat(format!("Failed to parse response: {}", e))
        } else if e.is_builder() {
            ScanError::ConfigError(format!("Failed to build request: {}", e))
        } else {
            ScanError::Network(format!("HTTP request failed: {}", e))
        }
    }
}
