//! # fsreg Locator
//!
//! Filesystem-backed registry locator for package-manager hosts.
//!
//! A host resolves, lists and downloads packages through the
//! [`RegistryLocator`] interface. [`FilesystemLocator`] serves them from a
//! local or network directory tree instead of a remote HTTP registry.
//!
//! ## Features
//!
//! - **Sandboxed resolution**: package names never escape the base directory
//! - **Aliases**: optional `aliases.json` redirects checked before the filesystem
//! - **Version discovery**: `<name>-<version>.zip` archives, semver stability
//! - **Download**: zip extraction into a host-supplied directory
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use fsreg_locator::{FilesystemLocator, LocatorOptions, LookupResult, RegistryLocator};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let options = LocatorOptions::new("2.0").with_base_dir("/srv/registry");
//!     let locator = FilesystemLocator::new(options)?;
//!
//!     if let LookupResult::Versions(versions) = locator.lookup("left-pad").await? {
//!         for (token, entry) in &versions {
//!             println!("{token} stable={}", entry.stable);
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod archive;
mod config;
mod error;
pub mod fs;
mod locator;
mod specifier;
mod version;

pub use config::{
    check_api_version, normalize, resolve_path, LocatorConfig, LocatorOptions, BASEDIR_ENV,
    SUPPORTED_API,
};
pub use error::{LocatorError, Result};
pub use locator::{
    load_aliases, AliasMap, FilesystemLocator, LocateResult, LookupResult, Prompt,
    RegistryLocator, ALIAS_FILE,
};
pub use specifier::{PackageSpecifier, PACKAGE_FORMAT};
pub use version::{
    archive_file_name, content_hash, is_stable, ArchivePattern, VersionEntry,
    VERSION_TOKEN_PATTERN,
};
