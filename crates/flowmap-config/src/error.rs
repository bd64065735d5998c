//! Error types for configuration handling.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while resolving or querying the run configuration.
///
/// All construction-time errors abort configuration before any search work
/// begins; none are recovered internally.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A supplied token does not match any recognized value of an
    /// enumerated option domain.
    #[error("unrecognized {option} token `{token}`")]
    Format {
        /// Name of the option domain that rejected the token.
        option: &'static str,
        /// The offending token.
        token: String,
    },

    /// A path cannot be read or written.
    #[error("cannot access `{}`: {source}", .path.display())]
    Path {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// IO error outside of a specific path check.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// An option was set in violation of a required setup order.
    #[error("invalid option order: {0}")]
    State(String),

    /// A step-qualified query was made outside the criteria sequence.
    #[error("optimization step {step} out of range ({len} criteria)")]
    StepOutOfRange { step: usize, len: usize },

    /// A settings dump could not be re-parsed.
    #[error("settings parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// Settings could not be rendered for dumping.
    #[error("settings render error: {0}")]
    Render(#[from] toml::ser::Error),
}

/// Result type alias for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
