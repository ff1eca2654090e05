// src/query/memory.rs

//! In-memory package universe for tests and offline planning.

use super::PackageQuery;
use crate::model::{Conflict, Package, PackageStatus};
use std::collections::{HashMap, HashSet};

/// A fixed package universe held in memory.
///
/// Used by the test suite in place of the apt adapter, and usable for
/// planning against a snapshot without touching the host package database.
#[derive(Debug, Clone, Default)]
pub struct MemoryQuery {
    versions: HashMap<String, String>,
    installed: HashSet<String>,
    upgradable: HashSet<String>,
    dependencies: HashMap<String, Vec<String>>,
    conflicts: HashMap<String, Vec<(String, String)>>,
    available: HashMap<String, Vec<String>>,
}

impl MemoryQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an installed package.
    pub fn add_installed(&mut self, name: &str, version: &str) {
        self.versions.insert(name.to_string(), version.to_string());
        self.installed.insert(name.to_string());
    }

    /// Register an installed package with a newer version available.
    pub fn add_upgradable(&mut self, name: &str, version: &str) {
        self.add_installed(name, version);
        self.upgradable.insert(name.to_string());
    }

    /// Register a known but not installed package.
    pub fn add_available(&mut self, name: &str, version: &str) {
        self.versions.insert(name.to_string(), version.to_string());
    }

    /// Declare a direct dependency edge.
    pub fn add_dependency(&mut self, package: &str, dependency: &str) {
        self.dependencies
            .entry(package.to_string())
            .or_default()
            .push(dependency.to_string());
    }

    /// Declare that installing `package` requires removing `conflicting`.
    pub fn add_conflict(&mut self, package: &str, conflicting: &str, reason: &str) {
        self.conflicts
            .entry(package.to_string())
            .or_default()
            .push((conflicting.to_string(), reason.to_string()));
    }

    /// Record the version table for a package.
    pub fn add_versions(&mut self, package: &str, versions: &[&str]) {
        self.available.insert(
            package.to_string(),
            versions.iter().map(|v| v.to_string()).collect(),
        );
    }

    fn status(&self, name: &str) -> PackageStatus {
        if self.upgradable.contains(name) {
            PackageStatus::Upgradable
        } else if self.installed.contains(name) {
            PackageStatus::Installed
        } else {
            PackageStatus::NotInstalled
        }
    }

    fn package(&self, name: &str) -> Package {
        let version = self.versions.get(name).cloned().unwrap_or_default();
        Package::new(name, version).with_status(self.status(name))
    }
}

impl PackageQuery for MemoryQuery {
    fn is_installed(&self, name: &str) -> bool {
        self.installed.contains(name)
    }

    fn get_dependencies(&self, name: &str) -> Vec<Package> {
        self.dependencies
            .get(name)
            .map(|deps| deps.iter().map(|d| self.package(d)).collect())
            .unwrap_or_default()
    }

    fn check_conflicts(&self, name: &str) -> Vec<Conflict> {
        self.conflicts
            .get(name)
            .map(|entries| {
                entries
                    .iter()
                    .map(|(conflicting, reason)| Conflict {
                        package: self.package(name),
                        conflicting_package: self.package(conflicting),
                        reason: reason.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    fn get_package_info(&self, name: &str) -> Option<Package> {
        if self.versions.contains_key(name)
            || self.installed.contains(name)
            || self.dependencies.contains_key(name)
        {
            Some(self.package(name))
        } else {
            None
        }
    }

    fn get_available_versions(&self, name: &str) -> Vec<String> {
        self.available.get(name).cloned().unwrap_or_default()
    }
}
