//! Version discovery from release archive file names.
//!
//! Release archives are named `<package>-<token>.zip`, where the token is
//! one of:
//! - a dotted numeric string (`1.0.0`, `2.1`, `3`)
//! - `latest`
//! - `beta`
//!
//! Matching is case-insensitive over the whole file name, so
//! `Foo-1.0.0.ZIP` belongs to package `foo`.

use std::path::Path;
use std::time::SystemTime;

use chrono::{DateTime, Utc};
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::error::{LocatorError, Result};

/// Alternatives accepted as the version part of an archive file name.
pub const VERSION_TOKEN_PATTERN: &str = r"[\d.]+|latest|beta";

/// A single version available in a package directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionEntry {
    /// Change-detecting identity: `<absolute archive path>#<mtime millis>`.
    pub hash: String,

    /// True when the token is a valid semantic version.
    pub stable: bool,
}

impl VersionEntry {
    /// Builds the entry for an archive with the given token.
    #[must_use]
    pub fn new(archive: &Path, modified: SystemTime, token: &str) -> Self {
        Self {
            hash: content_hash(archive, modified),
            stable: is_stable(token),
        }
    }
}

/// Matches archive file names belonging to one package.
#[derive(Debug, Clone)]
pub struct ArchivePattern {
    regex: Regex,
}

impl ArchivePattern {
    /// Compiles the file name pattern for `package`.
    ///
    /// The package name is matched literally; regex metacharacters in it
    /// carry no special meaning.
    ///
    /// # Errors
    ///
    /// Returns [`LocatorError::InvalidPackageName`] if the name cannot be
    /// turned into a pattern (for example when it exceeds the regex size
    /// limit).
    pub fn new(package: &str) -> Result<Self> {
        let pattern = format!(
            r"^{}-({VERSION_TOKEN_PATTERN})\.zip$",
            regex::escape(package)
        );
        let regex = RegexBuilder::new(&pattern)
            .case_insensitive(true)
            .build()
            .map_err(|_| LocatorError::InvalidPackageName {
                name: package.to_string(),
            })?;
        Ok(Self { regex })
    }

    /// Returns the version token if `file_name` is an archive of this package.
    ///
    /// # Examples
    ///
    /// ```
    /// use fsreg_locator::ArchivePattern;
    ///
    /// let pattern = ArchivePattern::new("foo").unwrap();
    /// assert_eq!(pattern.version_token("foo-1.0.0.zip"), Some("1.0.0"));
    /// assert_eq!(pattern.version_token("Foo-LATEST.ZIP"), Some("LATEST"));
    /// assert_eq!(pattern.version_token("foo-notaversion.txt"), None);
    /// ```
    #[must_use]
    pub fn version_token<'a>(&self, file_name: &'a str) -> Option<&'a str> {
        self.regex
            .captures(file_name)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }
}

/// Returns the archive file name for a package release.
#[must_use]
pub fn archive_file_name(package: &str, version: &str) -> String {
    format!("{package}-{version}.zip")
}

/// Returns true if `token` is a valid semantic version.
///
/// Dotted strings that are not full `major.minor.patch` versions, and the
/// `latest`/`beta` channels, are not stable.
#[must_use]
pub fn is_stable(token: &str) -> bool {
    semver::Version::parse(token).is_ok()
}

/// Builds the content identity of an archive from its path and mtime.
#[must_use]
pub fn content_hash(archive: &Path, modified: SystemTime) -> String {
    let millis = DateTime::<Utc>::from(modified).timestamp_millis();
    format!("{}#{millis}", archive.display())
}
