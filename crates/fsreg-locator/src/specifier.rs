//! Package specifiers routed to this locator.
//!
//! Hosts pick a locator by matching package specifiers against its address
//! scheme. Filesystem packages use `fs:<name>[@<version>][/<path>]`.

use once_cell::sync::Lazy;
use regex::Regex;

/// Pattern identifying specifiers served by the filesystem locator.
pub const PACKAGE_FORMAT: &str = r"(?i)^fs:([^@/]+(@[^/]+)?(/.+)?)$";

static PACKAGE_FORMAT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(PACKAGE_FORMAT).expect("package format pattern is valid"));

/// A parsed `fs:` package specifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageSpecifier {
    /// Package name.
    pub name: String,
    /// Requested version, if any.
    pub version: Option<String>,
    /// Path inside the package, if any.
    pub path: Option<String>,
}

impl PackageSpecifier {
    /// Parses a specifier, returning `None` if it is not an `fs:` specifier.
    ///
    /// # Examples
    ///
    /// ```
    /// use fsreg_locator::PackageSpecifier;
    ///
    /// let spec = PackageSpecifier::parse("fs:foo@1.0.0/lib/index.js").unwrap();
    /// assert_eq!(spec.name, "foo");
    /// assert_eq!(spec.version.as_deref(), Some("1.0.0"));
    /// assert_eq!(spec.path.as_deref(), Some("lib/index.js"));
    ///
    /// assert!(PackageSpecifier::parse("npm:foo").is_none());
    /// ```
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        let caps = PACKAGE_FORMAT_RE.captures(input)?;
        let body = caps.get(1)?.as_str();
        let version = caps.get(2).map(|m| m.as_str()[1..].to_string());
        let path = caps.get(3).map(|m| m.as_str()[1..].to_string());

        let name_end = body.find(['@', '/']).unwrap_or(body.len());

        Some(Self {
            name: body[..name_end].to_string(),
            version,
            path,
        })
    }

    /// Returns true if `input` is addressed to the filesystem locator.
    #[must_use]
    pub fn matches(input: &str) -> bool {
        PACKAGE_FORMAT_RE.is_match(input)
    }
}

impl std::fmt::Display for PackageSpecifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "fs:{}", self.name)?;
        if let Some(version) = &self.version {
            write!(f, "@{version}")?;
        }
        if let Some(path) = &self.path {
            write!(f, "/{path}")?;
        }
        Ok(())
    }
}
