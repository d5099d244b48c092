//! Error types for configuration loading and validation.

/// Errors that can occur when loading or validating hintc configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An I/O error occurred while reading the configuration file.
    #[error("failed to read configuration: {0}")]
    IoError(#[from] std::io::Error),

    /// The TOML content could not be parsed.
    #[error("failed to parse configuration: {0}")]
    ParseError(String),

    /// A processor option was not of the form `key=value`.
    #[error("malformed processor option '{0}', expected key=value")]
    MalformedOption(String),

    /// The named charset is not supported.
    #[error("unsupported charset '{0}'")]
    UnsupportedCharset(String),

    /// A required field is missing from the configuration.
    #[error("missing required field: {0}")]
    MissingField(String),

    /// A configuration value failed validation.
    #[error("validation error: {0}")]
    ValidationError(String),
}
