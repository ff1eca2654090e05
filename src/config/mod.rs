// src/config/mod.rs

//! Persisted configuration.
//!
//! Configuration lives in a JSON file and owns the long-lived policy inputs:
//! custom package prefixes, the explicit removable-package set, pinned
//! versions for offline mode, and the offline flag. Everything else in the
//! crate takes per-request snapshots of this data.

use crate::error::Result;
use crate::policy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Default path for the configuration file.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/dpm/config.json";

fn default_custom_prefixes() -> Vec<String> {
    ["mycompany-", "internal-", "custom-", "dev-", "local-", "meta-", "bundle-"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Main configuration, serialized as JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_custom_prefixes")]
    custom_prefixes: Vec<String>,

    #[serde(default)]
    removable_packages: Vec<String>,

    #[serde(default)]
    pinned_versions: BTreeMap<String, String>,

    #[serde(default)]
    offline_mode: bool,

    #[serde(skip)]
    path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            custom_prefixes: default_custom_prefixes(),
            removable_packages: Vec::new(),
            pinned_versions: BTreeMap::new(),
            offline_mode: false,
            path: None,
        }
    }
}

impl Config {
    /// Load configuration from a file.
    ///
    /// A missing file yields the defaults bound to that path; they are
    /// written out on the first save. An unreadable or malformed file is an
    /// error, not silently replaced.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            debug!("No config at {}, using defaults", path.display());
            let mut config = Self::default();
            config.path = Some(path.to_path_buf());
            return Ok(config);
        }

        let content = std::fs::read_to_string(path)?;
        let mut config: Self = serde_json::from_str(&content)?;
        config.path = Some(path.to_path_buf());
        debug!(
            "Loaded config from {} ({} prefixes, {} removable, {} pinned)",
            path.display(),
            config.custom_prefixes.len(),
            config.removable_packages.len(),
            config.pinned_versions.len()
        );
        Ok(config)
    }

    /// Write the configuration back to its file.
    pub fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            warn!("Config has no backing file, skipping save");
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn custom_prefixes(&self) -> &[String] {
        &self.custom_prefixes
    }

    pub fn add_custom_prefix(&mut self, prefix: &str) {
        if !self.custom_prefixes.iter().any(|p| p == prefix) {
            self.custom_prefixes.push(prefix.to_string());
        }
    }

    pub fn remove_custom_prefix(&mut self, prefix: &str) -> bool {
        let before = self.custom_prefixes.len();
        self.custom_prefixes.retain(|p| p != prefix);
        self.custom_prefixes.len() != before
    }

    pub fn removable_packages(&self) -> &[String] {
        &self.removable_packages
    }

    /// Register a package as explicitly removable.
    ///
    /// System-critical names are rejected with a policy violation; the
    /// persisted list can therefore never contain one.
    pub fn add_removable_package(&mut self, name: &str) -> Result<()> {
        policy::ensure_not_critical(name)?;
        if !self.removable_packages.iter().any(|p| p == name) {
            self.removable_packages.push(name.to_string());
        }
        Ok(())
    }

    pub fn remove_removable_package(&mut self, name: &str) -> bool {
        let before = self.removable_packages.len();
        self.removable_packages.retain(|p| p != name);
        self.removable_packages.len() != before
    }

    /// Whether a package may be removed: custom-prefixed or explicitly
    /// removable, nothing else.
    pub fn can_remove_package(&self, name: &str) -> bool {
        self.removable_packages.iter().any(|p| p == name)
            || self.custom_prefixes.iter().any(|p| name.starts_with(p.as_str()))
    }

    pub fn is_offline_mode(&self) -> bool {
        self.offline_mode
    }

    pub fn set_offline_mode(&mut self, offline: bool) {
        self.offline_mode = offline;
    }

    pub fn get_pinned_version(&self, package: &str) -> Option<&str> {
        self.pinned_versions.get(package).map(|s| s.as_str())
    }

    pub fn set_pinned_version(&mut self, package: &str, version: &str) {
        self.pinned_versions
            .insert(package.to_string(), version.to_string());
    }

    pub fn remove_pinned_version(&mut self, package: &str) -> bool {
        self.pinned_versions.remove(package).is_some()
    }

    pub fn pinned_versions(&self) -> &BTreeMap<String, String> {
        &self.pinned_versions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");

        let config = Config::load(&path).unwrap();
        assert!(!config.is_offline_mode());
        assert!(config.custom_prefixes().contains(&"custom-".to_string()));
        assert!(config.removable_packages().is_empty());
    }

    #[test]
    fn test_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");

        let mut config = Config::load(&path).unwrap();
        config.add_custom_prefix("myco-");
        config.add_removable_package("oldtool").unwrap();
        config.set_pinned_version("nginx", "1.18.0-0ubuntu1");
        config.set_offline_mode(true);
        config.save().unwrap();

        let reloaded = Config::load(&path).unwrap();
        assert!(reloaded.custom_prefixes().contains(&"myco-".to_string()));
        assert_eq!(reloaded.removable_packages(), ["oldtool"]);
        assert_eq!(reloaded.get_pinned_version("nginx"), Some("1.18.0-0ubuntu1"));
        assert!(reloaded.is_offline_mode());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"offline_mode": true}"#).unwrap();

        let config = Config::load(&path).unwrap();
        assert!(config.is_offline_mode());
        assert!(!config.custom_prefixes().is_empty());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(matches!(Config::load(&path), Err(Error::JsonError(_))));
    }

    #[test]
    fn test_critical_removable_rejected_and_not_persisted() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");

        let mut config = Config::load(&path).unwrap();
        assert!(matches!(
            config.add_removable_package("dpkg-extra"),
            Err(Error::PolicyViolation { .. })
        ));
        config.save().unwrap();

        let reloaded = Config::load(&path).unwrap();
        assert!(reloaded.removable_packages().is_empty());
    }

    #[test]
    fn test_can_remove_package_paths() {
        let mut config = Config::default();
        config.add_custom_prefix("myco-");
        config.add_removable_package("oldtool").unwrap();

        assert!(config.can_remove_package("myco-tools"));
        assert!(config.can_remove_package("oldtool"));
        assert!(!config.can_remove_package("nginx"));
    }

    #[test]
    fn test_prefix_removal() {
        let mut config = Config::default();
        config.add_custom_prefix("myco-");
        assert!(config.remove_custom_prefix("myco-"));
        assert!(!config.remove_custom_prefix("myco-"));
        assert!(!config.can_remove_package("myco-tools"));
    }
}
