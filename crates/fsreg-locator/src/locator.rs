//! The registry locator interface and its filesystem implementation.
//!
//! Registry layout:
//! ```text
//! <base>/
//!   aliases.json              (optional: { "<name>": "<redirect>" })
//!   <name>/
//!     <name>-<version>.zip    (one archive per release, package.json at root)
//! ```

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::archive;
use crate::config::{self, LocatorConfig, LocatorOptions, BASEDIR_ENV};
use crate::error::{LocatorError, Result};
use crate::fs::{self, ItemType};
use crate::version::{archive_file_name, ArchivePattern, VersionEntry};

/// Name of the optional alias file at the registry root.
pub const ALIAS_FILE: &str = "aliases.json";

/// Package-name redirect table.
pub type AliasMap = HashMap<String, String>;

/// Interactive input capability supplied by the host.
#[async_trait]
pub trait Prompt: Send + Sync {
    /// Asks the operator for a value, pre-filled with `default`.
    ///
    /// Implementations return `default` (or an empty string) when the
    /// operator enters nothing.
    async fn input(&self, message: &str, default: Option<&str>) -> Result<String>;
}

/// Outcome of [`RegistryLocator::locate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum LocateResult {
    /// The package is an alias for another package.
    Redirect {
        /// Redirect target.
        target: String,
    },
    /// No package directory exists.
    NotFound,
    /// The package directory exists.
    Found {
        /// Absolute package directory.
        dir: PathBuf,
    },
}

/// Outcome of [`RegistryLocator::lookup`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum LookupResult {
    /// No package directory exists.
    NotFound,
    /// Versions found in the package directory, keyed by version token.
    Versions(BTreeMap<String, VersionEntry>),
}

impl LookupResult {
    /// Returns the version map, or `None` if the package was not found.
    #[must_use]
    pub const fn versions(&self) -> Option<&BTreeMap<String, VersionEntry>> {
        match self {
            Self::Versions(versions) => Some(versions),
            Self::NotFound => None,
        }
    }
}

/// A registry backend as seen by the package-manager host.
#[async_trait]
pub trait RegistryLocator: Send + Sync {
    /// Interactively updates the persisted configuration.
    ///
    /// `default_base_dir` pre-fills the prompt when the configuration has no
    /// base directory yet; the bootstrap layer passes the environment value.
    async fn configure(
        config: LocatorConfig,
        default_base_dir: Option<&Path>,
        prompt: &dyn Prompt,
    ) -> Result<LocatorConfig>
    where
        Self: Sized;

    /// Resolves a package name to a redirect or existence information.
    async fn locate(&self, package: &str) -> Result<LocateResult>;

    /// Lists available versions of a package.
    async fn lookup(&self, package: &str) -> Result<LookupResult>;

    /// Materializes one release into `target_dir` and returns its
    /// `package.json`.
    async fn download(
        &self,
        package: &str,
        version: &str,
        hash: &str,
        meta: Option<&serde_json::Value>,
        target_dir: &Path,
    ) -> Result<serde_json::Value>;
}

/// Registry locator backed by a local or network directory tree.
#[derive(Debug, Clone)]
pub struct FilesystemLocator {
    base_dir: PathBuf,
    aliases: AliasMap,
    version_string: String,
}

impl FilesystemLocator {
    /// Specifier pattern routed to this locator.
    pub const PACKAGE_FORMAT: &'static str = crate::specifier::PACKAGE_FORMAT;

    /// Creates a locator bound to the configured base directory.
    ///
    /// # Errors
    ///
    /// Returns [`LocatorError::IncompatibleApi`] if the host API version is
    /// unsupported (checked before any filesystem access), and
    /// [`LocatorError::InvalidBaseDir`] if the base directory is missing or
    /// not a directory.
    pub fn new(options: LocatorOptions) -> Result<Self> {
        config::check_api_version(&options.api_version)?;

        let requested = options.base_dir.unwrap_or_default();
        let base_dir =
            config::resolve_path(&requested).map_err(|e| LocatorError::io(&requested, e))?;

        let invalid = || LocatorError::InvalidBaseDir {
            env_var: BASEDIR_ENV,
            path: base_dir.clone(),
        };
        if !fs::is_directory(&base_dir).map_err(|_| invalid())? {
            return Err(invalid());
        }

        let aliases = load_aliases(&base_dir).unwrap_or_default();
        info!(
            base_dir = %base_dir.display(),
            aliases = aliases.len(),
            "Filesystem locator ready"
        );

        Ok(Self {
            base_dir,
            aliases,
            version_string: format!("{}.1", options.version_string),
        })
    }

    /// Returns the absolute registry base directory.
    #[must_use]
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Returns the loaded alias map.
    #[must_use]
    pub const fn aliases(&self) -> &AliasMap {
        &self.aliases
    }

    /// Returns the locator version string reported to the host.
    #[must_use]
    pub fn version_string(&self) -> &str {
        &self.version_string
    }

    /// Resolves the package directory, refusing names that escape the base
    /// directory.
    ///
    /// # Errors
    ///
    /// Returns [`LocatorError::InvalidPackageName`] if the normalized
    /// directory is not strictly below the base directory.
    pub fn package_dir(&self, package: &str) -> Result<PathBuf> {
        let candidate = config::normalize(&self.base_dir.join(package));
        if candidate == self.base_dir || !candidate.starts_with(&self.base_dir) {
            return Err(LocatorError::InvalidPackageName {
                name: package.to_string(),
            });
        }
        Ok(candidate)
    }

    fn alias(&self, package: &str) -> Option<&str> {
        self.aliases
            .get(package)
            .map(String::as_str)
            .filter(|target| !target.is_empty())
    }
}

/// Loads `aliases.json` from the registry root.
///
/// Returns `None` when the file is missing or unreadable; a registry without
/// aliases is the common case. The file must be a flat object of string
/// values: a single non-string value makes the whole file unparsable, and
/// no aliases are loaded.
pub fn load_aliases(base_dir: &Path) -> Option<AliasMap> {
    let path = base_dir.join(ALIAS_FILE);
    match fs::load_json_file::<AliasMap>(&path) {
        Ok(aliases) => {
            debug!(path = %path.display(), "Alias mapping loaded");
            Some(aliases)
        }
        Err(e) => {
            debug!(path = %path.display(), error = %e, "No alias mapping loaded");
            None
        }
    }
}

#[async_trait]
impl RegistryLocator for FilesystemLocator {
    async fn configure(
        mut config: LocatorConfig,
        default_base_dir: Option<&Path>,
        prompt: &dyn Prompt,
    ) -> Result<LocatorConfig> {
        let default = config
            .base_dir
            .as_deref()
            .or(default_base_dir)
            .map(|p| p.display().to_string());

        let answer = prompt
            .input(
                "Enter absolute directory path to where your package release files reside: ",
                default.as_deref(),
            )
            .await?;

        let answer = answer.trim();
        config.base_dir = if answer.is_empty() {
            default.map(PathBuf::from)
        } else {
            Some(PathBuf::from(answer))
        };
        Ok(config)
    }

    #[instrument(skip(self))]
    async fn locate(&self, package: &str) -> Result<LocateResult> {
        if let Some(target) = self.alias(package) {
            debug!(redirect = target, "Resolved alias");
            return Ok(LocateResult::Redirect {
                target: target.to_string(),
            });
        }

        let dir = self.package_dir(package)?;
        if fs::is_directory(&dir).map_err(|e| LocatorError::io(&dir, e))? {
            Ok(LocateResult::Found { dir })
        } else {
            Ok(LocateResult::NotFound)
        }
    }

    #[instrument(skip(self))]
    async fn lookup(&self, package: &str) -> Result<LookupResult> {
        let dir = self.package_dir(package)?;
        if !fs::is_directory(&dir).map_err(|e| LocatorError::io(&dir, e))? {
            return Ok(LookupResult::NotFound);
        }

        let pattern = ArchivePattern::new(package)?;
        let mut versions = BTreeMap::new();
        let files =
            fs::list_dir(&dir, Some(ItemType::File)).map_err(|e| LocatorError::io(&dir, e))?;
        for item in files {
            let Some(file_name) = item.path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let Some(token) = pattern.version_token(file_name) else {
                continue;
            };
            let modified = item
                .metadata
                .modified()
                .map_err(|e| LocatorError::io(&item.path, e))?;
            versions.insert(
                token.to_string(),
                VersionEntry::new(&item.path, modified, token),
            );
        }

        debug!(count = versions.len(), "Collected versions");
        Ok(LookupResult::Versions(versions))
    }

    #[instrument(skip(self, _hash, _meta, target_dir), fields(target_dir = %target_dir.display()))]
    async fn download(
        &self,
        package: &str,
        version: &str,
        _hash: &str,
        _meta: Option<&serde_json::Value>,
        target_dir: &Path,
    ) -> Result<serde_json::Value> {
        let dir = self.package_dir(package)?;
        if version.is_empty() || version.contains(['/', '\\']) {
            return Err(LocatorError::InvalidVersion {
                version: version.to_string(),
            });
        }
        let archive_path = dir.join(archive_file_name(package, version));

        let file = archive::open(&archive_path)?;
        archive::extract(file, archive_path.clone(), target_dir.to_path_buf()).await?;

        let manifest = fs::load_json_file(&target_dir.join("package.json"))?;
        info!(archive = %archive_path.display(), "Package downloaded");
        Ok(manifest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use tempfile::TempDir;

    struct ScriptedPrompt {
        answer: String,
        seen_default: Mutex<Option<String>>,
    }

    impl ScriptedPrompt {
        fn new(answer: &str) -> Self {
            Self {
                answer: answer.to_string(),
                seen_default: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl Prompt for ScriptedPrompt {
        async fn input(&self, _message: &str, default: Option<&str>) -> Result<String> {
            *self.seen_default.lock().unwrap() = default.map(str::to_string);
            Ok(self.answer.clone())
        }
    }

    fn locator(dir: &TempDir) -> FilesystemLocator {
        FilesystemLocator::new(LocatorOptions::new("2.0").with_base_dir(dir.path())).unwrap()
    }

    #[test]
    fn test_version_string_suffix() {
        let dir = TempDir::new().unwrap();
        let options = LocatorOptions::new("2.0")
            .with_base_dir(dir.path())
            .with_version_string("1.4");
        let locator = FilesystemLocator::new(options).unwrap();
        assert_eq!(locator.version_string(), "1.4.1");
    }

    #[test]
    fn test_package_dir_rejects_escapes() {
        let dir = TempDir::new().unwrap();
        let locator = locator(&dir);

        for name in ["../escape", "a/../../x", "/etc", "", ".", "foo/.."] {
            let err = locator.package_dir(name).unwrap_err();
            assert!(err.is_config(), "{name:?} should be rejected");
        }
        assert_eq!(locator.package_dir("foo").unwrap(), locator.base_dir().join("foo"));
        assert_eq!(locator.package_dir("a/../foo").unwrap(), locator.base_dir().join("foo"));
    }

    #[test]
    fn test_sibling_prefix_is_not_inside_base() {
        let parent = TempDir::new().unwrap();
        let base = parent.path().join("reg");
        std::fs::create_dir(&base).unwrap();
        std::fs::create_dir(parent.path().join("reg2")).unwrap();

        let locator =
            FilesystemLocator::new(LocatorOptions::new("2.0").with_base_dir(&base)).unwrap();
        assert!(locator.package_dir("../reg2").is_err());
    }

    #[tokio::test]
    async fn test_download_rejects_version_with_separators() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("foo")).unwrap();
        let target = dir.path().join("out");

        for version in ["../../x", "1.0.0/../../y", ""] {
            let err = locator(&dir)
                .download("foo", version, "", None, &target)
                .await
                .unwrap_err();
            assert!(matches!(err, LocatorError::InvalidVersion { .. }), "{version:?}");
        }
        assert!(!target.exists());
    }

    #[test]
    fn test_empty_alias_target_is_ignored() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(ALIAS_FILE), r#"{"foo": ""}"#).unwrap();
        let locator = locator(&dir);
        assert!(locator.alias("foo").is_none());
    }

    #[test]
    fn test_load_aliases_missing_or_broken() {
        let dir = TempDir::new().unwrap();
        assert!(load_aliases(dir.path()).is_none());

        std::fs::write(dir.path().join(ALIAS_FILE), "[1, 2").unwrap();
        assert!(load_aliases(dir.path()).is_none());
        assert!(locator(&dir).aliases().is_empty());
    }

    #[test]
    fn test_non_string_alias_discards_whole_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(ALIAS_FILE), r#"{"foo": "bar", "baz": 1}"#).unwrap();
        assert!(load_aliases(dir.path()).is_none());
        assert!(locator(&dir).aliases().is_empty());
    }

    #[tokio::test]
    async fn test_configure_prefers_existing_config() {
        let prompt = ScriptedPrompt::new("");
        let config = LocatorConfig {
            base_dir: Some(PathBuf::from("/srv/existing")),
        };

        let updated =
            FilesystemLocator::configure(config, Some(Path::new("/from/env")), &prompt)
                .await
                .unwrap();

        assert_eq!(
            prompt.seen_default.lock().unwrap().as_deref(),
            Some("/srv/existing")
        );
        assert_eq!(updated.base_dir, Some(PathBuf::from("/srv/existing")));
    }

    #[tokio::test]
    async fn test_configure_uses_answer_and_env_default() {
        let prompt = ScriptedPrompt::new("  /srv/new  ");
        let updated = FilesystemLocator::configure(
            LocatorConfig::default(),
            Some(Path::new("/from/env")),
            &prompt,
        )
        .await
        .unwrap();

        assert_eq!(prompt.seen_default.lock().unwrap().as_deref(), Some("/from/env"));
        assert_eq!(updated.base_dir, Some(PathBuf::from("/srv/new")));
    }

    #[tokio::test]
    async fn test_configure_does_not_touch_filesystem() {
        let prompt = ScriptedPrompt::new("/definitely/not/there");
        let updated = FilesystemLocator::configure(LocatorConfig::default(), None, &prompt)
            .await
            .unwrap();
        assert_eq!(updated.base_dir, Some(PathBuf::from("/definitely/not/there")));
    }

    #[test]
    fn test_lookup_result_versions_accessor() {
        assert!(LookupResult::NotFound.versions().is_none());
        assert_eq!(
            LookupResult::Versions(BTreeMap::new()).versions().map(BTreeMap::len),
            Some(0)
        );
    }
}
