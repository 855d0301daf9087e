use thiserror::Error;

/// Errors raised by a host integration while attaching to the presentation host
#[derive(Debug, Error)]
pub enum HostError {
    #[error("This add-in only runs inside PowerPoint (host reported {0})")]
    UnsupportedApplication(String),

    #[error("Host API call failed: {0}")]
    Api(String),
}

/// Errors that can occur while decoding a cross-window host message
#[derive(Debug, Error)]
pub enum MessageError {
    #[error("Malformed host message: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Errors that can occur while loading the overlay configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Invalid color value: {0}")]
    InvalidColor(String),

    #[error("Invalid config value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Result type for host operations
pub type HostResult<T> = Result<T, HostError>;

/// Result type for config operations
pub type ConfigResult<T> = Result<T, ConfigError>;
