//! Configuration types for the filesystem locator.

use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{LocatorError, Result};

/// Environment variable that supplies the default registry base directory.
///
/// The library never reads it; the bootstrap layer does and passes the
/// value in through [`LocatorOptions::with_base_dir`].
pub const BASEDIR_ENV: &str = "FSREG_BASEDIR";

/// Range of host endpoint API versions this locator implements.
pub const SUPPORTED_API: &str = ">=2.0.0, <3.0.0";

/// Options used to construct a [`FilesystemLocator`](crate::FilesystemLocator).
#[derive(Debug, Clone)]
pub struct LocatorOptions {
    /// Endpoint API version declared by the host (e.g., "2.0").
    pub api_version: String,

    /// Locator protocol version string supplied by the host.
    pub version_string: String,

    /// Registry base directory. Resolved against the current directory.
    pub base_dir: Option<PathBuf>,
}

impl LocatorOptions {
    /// Creates options for the given host API version.
    ///
    /// # Examples
    ///
    /// ```
    /// use fsreg_locator::LocatorOptions;
    ///
    /// let options = LocatorOptions::new("2.0").with_base_dir("/srv/registry");
    /// assert_eq!(options.api_version, "2.0");
    /// assert!(options.base_dir.is_some());
    /// ```
    #[must_use]
    pub fn new(api_version: impl Into<String>) -> Self {
        Self {
            api_version: api_version.into(),
            version_string: "1".to_string(),
            base_dir: None,
        }
    }

    /// Sets the registry base directory.
    #[must_use]
    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(base_dir.into());
        self
    }

    /// Sets the locator protocol version string.
    #[must_use]
    pub fn with_version_string(mut self, version_string: impl Into<String>) -> Self {
        self.version_string = version_string.into();
        self
    }
}

/// Persisted locator configuration, as written by `configure`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocatorConfig {
    /// Absolute registry base directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_dir: Option<PathBuf>,
}

impl LocatorConfig {
    /// Loads a configuration file, returning the default if it is absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !crate::fs::is_file(path).map_err(|e| LocatorError::io(path, e))? {
            return Ok(Self::default());
        }
        crate::fs::load_json_file(path)
    }

    /// Writes the configuration as pretty-printed JSON, creating parent
    /// directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| LocatorError::io(parent, e))?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| LocatorError::Json {
            path: path.to_path_buf(),
            source: e,
        })?;
        std::fs::write(path, json).map_err(|e| LocatorError::io(path, e))
    }
}

/// Checks a host API version against [`SUPPORTED_API`].
///
/// Two-part versions such as `"2.0"` are completed with a zero patch.
///
/// # Errors
///
/// Returns [`LocatorError::IncompatibleApi`] if the version is unparsable or
/// outside the supported range.
pub fn check_api_version(api_version: &str) -> Result<()> {
    let incompatible = || LocatorError::IncompatibleApi {
        api_version: api_version.to_string(),
        supported: SUPPORTED_API.to_string(),
    };

    let full = match api_version.trim().split('.').count() {
        1 => format!("{}.0.0", api_version.trim()),
        2 => format!("{}.0", api_version.trim()),
        _ => api_version.trim().to_string(),
    };
    let version = semver::Version::parse(&full).map_err(|_| incompatible())?;
    let supported = semver::VersionReq::parse(SUPPORTED_API).map_err(|_| incompatible())?;

    if supported.matches(&version) {
        Ok(())
    } else {
        Err(incompatible())
    }
}

/// Makes `path` absolute against the current directory and removes `.` and
/// `..` components without touching the filesystem.
///
/// # Errors
///
/// Returns an error if the current directory cannot be determined.
pub fn resolve_path(path: &Path) -> std::io::Result<PathBuf> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };
    Ok(normalize(&absolute))
}

/// Lexically normalizes a path: drops `.`, and lets `..` pop the previous
/// component (never above the root).
#[must_use]
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
