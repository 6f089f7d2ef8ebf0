//! Error types for locator operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for locator operations.
pub type Result<T> = std::result::Result<T, LocatorError>;

/// Errors that can occur while configuring or querying a locator.
#[derive(Debug, Error)]
pub enum LocatorError {
    /// The host declared an endpoint API version outside the supported range.
    #[error(
        "fsreg-locator is not compatible with endpoint API v{api_version} (supported: {supported}); \
         please install a compatible version"
    )]
    IncompatibleApi {
        /// API version declared by the host.
        api_version: String,
        /// Supported version range.
        supported: String,
    },

    /// The configured base directory does not exist or is not a directory.
    #[error("{env_var} doesn't point to a valid registry base directory: \"{}\"", .path.display())]
    InvalidBaseDir {
        /// Environment variable that normally supplies the base directory.
        env_var: &'static str,
        /// Resolved base directory.
        path: PathBuf,
    },

    /// The package name resolves outside the registry base directory.
    #[error(
        "Invalid package name '{name}': package names must not contain relative path fragments"
    )]
    InvalidPackageName {
        /// Offending package name.
        name: String,
    },

    /// The requested version cannot name an archive inside the package directory.
    #[error("Invalid version '{version}': versions must not contain path separators")]
    InvalidVersion {
        /// Offending version.
        version: String,
    },

    /// The release archive could not be opened.
    #[error(
        "Local package zip file could not be accessed: {}. Make sure the file exists and is \
         accessible by the current user.",
        .path.display()
    )]
    ArchiveUnavailable {
        /// Expected archive path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The release archive could not be extracted.
    #[error("Failed to extract {}: {source}", .path.display())]
    Extraction {
        /// Archive path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: zip::result::ZipError,
    },

    /// File I/O error.
    #[error("File I/O error at {}: {source}", .path.display())]
    Io {
        /// File path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// JSON deserialization error.
    #[error("Invalid JSON in {}: {source}", .path.display())]
    Json {
        /// File path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },

    /// The interactive prompt failed.
    #[error("Prompt failed: {message}")]
    Prompt {
        /// Error message.
        message: String,
    },

    /// A blocking task was cancelled or panicked.
    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl LocatorError {
    /// Returns true for configuration errors.
    ///
    /// Configuration errors indicate an operator mistake (bad base directory,
    /// incompatible host, unsafe package name) rather than a failed read.
    #[must_use]
    pub const fn is_config(&self) -> bool {
        matches!(
            self,
            Self::IncompatibleApi { .. }
                | Self::InvalidBaseDir { .. }
                | Self::InvalidPackageName { .. }
                | Self::InvalidVersion { .. }
        )
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
