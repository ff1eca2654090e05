// src/query/apt.rs

//! Package-universe queries backed by apt and dpkg command-line tools.

use super::PackageQuery;
use crate::model::{Conflict, Package, PackageStatus};
use std::process::Command;
use tracing::{debug, warn};

/// Queries the host package universe via `apt-cache`, `apt` and
/// `dpkg-query`.
///
/// All methods degrade to empty results when the underlying tools fail;
/// failures are logged, not propagated, because an unknown package and an
/// unqueryable one look the same to the planning core.
#[derive(Debug, Clone, Default)]
pub struct AptQuery;

impl AptQuery {
    pub fn new() -> Self {
        Self
    }

    fn run(command: &str, args: &[&str]) -> Option<std::process::Output> {
        match Command::new(command).args(args).output() {
            Ok(output) => Some(output),
            Err(e) => {
                warn!("Failed to run {}: {}. Is it installed?", command, e);
                None
            }
        }
    }

    fn package_status(&self, name: &str) -> PackageStatus {
        if !self.is_installed(name) {
            return PackageStatus::NotInstalled;
        }
        if self.is_upgradable(name) {
            PackageStatus::Upgradable
        } else {
            PackageStatus::Installed
        }
    }

    fn is_upgradable(&self, name: &str) -> bool {
        let Some(output) = Self::run("apt", &["list", "--upgradable", name]) else {
            return false;
        };
        let stdout = String::from_utf8_lossy(&output.stdout);
        stdout.contains(name) && stdout.contains("upgradable")
    }
}

impl PackageQuery for AptQuery {
    fn is_installed(&self, name: &str) -> bool {
        // "ii" in the status abbreviation means desired=install, status=installed
        let Some(output) =
            Self::run("dpkg-query", &["-W", "-f", "${db:Status-Abbrev}", name])
        else {
            return false;
        };
        if !output.status.success() {
            return false;
        }
        String::from_utf8_lossy(&output.stdout)
            .trim()
            .starts_with("ii")
    }

    fn get_dependencies(&self, name: &str) -> Vec<Package> {
        debug!("Querying dependencies for {}", name);

        let Some(output) = Self::run("apt-cache", &["depends", name]) else {
            return Vec::new();
        };
        if !output.status.success() {
            return Vec::new();
        }

        let mut dependencies = Vec::new();
        for line in String::from_utf8_lossy(&output.stdout).lines() {
            let line = line.trim();
            let Some(rest) = line.strip_prefix("Depends:") else {
                continue;
            };

            // Drop version constraints and take the first alternative
            let dep_name = rest
                .split('|')
                .next()
                .unwrap_or("")
                .split('(')
                .next()
                .unwrap_or("")
                .trim();

            // Names in angle brackets are virtual packages
            if dep_name.is_empty() || dep_name.starts_with('<') {
                continue;
            }

            dependencies.push(
                Package::new(dep_name, "").with_status(self.package_status(dep_name)),
            );
        }

        debug!("Found {} dependencies for {}", dependencies.len(), name);
        dependencies
    }

    fn check_conflicts(&self, name: &str) -> Vec<Conflict> {
        debug!("Checking conflicts for {}", name);

        // Simulated install; a removal section in the output means the
        // install would displace existing packages
        let Some(output) = Self::run("apt-get", &["install", "-s", name]) else {
            return Vec::new();
        };

        let text = format!(
            "{}{}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );

        let mut conflicts = Vec::new();
        let mut in_removed_section = false;
        for line in text.lines() {
            if line.starts_with("The following packages will be REMOVED") {
                in_removed_section = true;
                continue;
            }
            if in_removed_section {
                if !line.starts_with(' ') {
                    break;
                }
                for removed in line.split_whitespace() {
                    conflicts.push(Conflict {
                        package: Package::new(name, ""),
                        conflicting_package: Package::new(removed, "")
                            .with_status(PackageStatus::Installed),
                        reason: "Package removal required for installation".to_string(),
                    });
                }
            }
        }

        conflicts
    }

    fn get_package_info(&self, name: &str) -> Option<Package> {
        let output = Self::run("apt-cache", &["show", name])?;
        if !output.status.success() {
            return None;
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let version = stdout
            .lines()
            .find_map(|line| line.strip_prefix("Version:"))
            .map(|v| v.trim().to_string())
            .unwrap_or_default();

        Some(Package::new(name, version).with_status(self.package_status(name)))
    }

    fn get_available_versions(&self, name: &str) -> Vec<String> {
        let Some(output) = Self::run("apt-cache", &["policy", name]) else {
            return Vec::new();
        };
        if !output.status.success() {
            return Vec::new();
        }

        let mut versions = Vec::new();
        let mut in_version_table = false;
        for line in String::from_utf8_lossy(&output.stdout).lines() {
            if line.contains("Version table:") {
                in_version_table = true;
                continue;
            }
            if !in_version_table {
                continue;
            }

            // Table entries are indented, optionally marked "***" for the
            // installed version
            let entry = line.trim_start_matches("***").trim();
            let Some(version) = entry.split_whitespace().next() else {
                continue;
            };
            if version.starts_with(|c: char| c.is_ascii_digit())
                && !versions.iter().any(|v| v == version)
            {
                versions.push(version.to_string());
            }
        }

        versions
    }
}
