// src/policy.rs

//! Removal safety policy.
//!
//! A package may be removed only if it carries a configured custom prefix or
//! sits in the explicit removable set. There is no other path to
//! removability; force flags never widen it. A hard-coded system-critical
//! deny-list guards the removable set at add time, so the set can never
//! contain a critical name.

use crate::config::Config;
use crate::error::{Error, Result};
use std::collections::BTreeSet;

/// Packages that can never be registered as removable, either by exact name
/// or as a `<name>-` prefix.
pub const CRITICAL_PACKAGES: &[&str] = &[
    "libc6",
    "bash",
    "coreutils",
    "util-linux",
    "systemd",
    "init",
    "kernel",
    "linux-image",
    "grub",
    "apt",
    "dpkg",
    "base-files",
    "base-passwd",
    "login",
    "passwd",
    "sudo",
    "openssh-server",
];

/// Reject a name that matches the system-critical set.
///
/// Runs at add time, not at remove time.
pub fn ensure_not_critical(name: &str) -> Result<()> {
    for critical in CRITICAL_PACKAGES {
        if name == *critical {
            return Err(Error::PolicyViolation {
                package: name.to_string(),
                reason: format!("'{critical}' is a system-critical package"),
            });
        }
        if name.starts_with(&format!("{critical}-")) {
            return Err(Error::PolicyViolation {
                package: name.to_string(),
                reason: format!("matches system-critical prefix '{critical}-'"),
            });
        }
    }
    Ok(())
}

/// Answers "may package X be removed?" from a snapshot of the configured
/// allow-list. One policy instance per resolution request.
#[derive(Debug, Clone)]
pub struct SafetyPolicy {
    custom_prefixes: Vec<String>,
    removable: BTreeSet<String>,
}

impl SafetyPolicy {
    pub fn new(
        custom_prefixes: Vec<String>,
        removable: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            custom_prefixes,
            removable: removable.into_iter().collect(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.custom_prefixes().to_vec(),
            config.removable_packages().iter().cloned(),
        )
    }

    /// Whether a package may be removed.
    ///
    /// True iff the name is in the explicit removable set or starts with a
    /// configured custom prefix.
    pub fn can_remove_package(&self, name: &str) -> bool {
        if self.removable.contains(name) {
            return true;
        }
        self.custom_prefixes
            .iter()
            .any(|prefix| name.starts_with(prefix.as_str()))
    }

    /// Register a package as explicitly removable.
    ///
    /// Fails with [`Error::PolicyViolation`] for system-critical names.
    pub fn add_removable_package(&mut self, name: &str) -> Result<()> {
        ensure_not_critical(name)?;
        self.removable.insert(name.to_string());
        Ok(())
    }

    /// Drop a package from the explicit removable set. Returns whether the
    /// name was present.
    pub fn remove_removable_package(&mut self, name: &str) -> bool {
        self.removable.remove(name)
    }

    pub fn removable_packages(&self) -> impl Iterator<Item = &str> {
        self.removable.iter().map(|s| s.as_str())
    }
}
