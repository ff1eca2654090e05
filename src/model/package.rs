// src/model/package.rs

//! Package representation and installation status.

use strum_macros::{Display, EnumString};

/// Installation status of a package as reported by the package universe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum PackageStatus {
    Installed,
    NotInstalled,
    Upgradable,
    Broken,
}

/// A Debian package and its metadata.
///
/// Identity is by `name` alone within a single resolution run; `version`
/// is the informational/target version, not part of the key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    pub name: String,
    pub version: String,
    pub is_metapackage: bool,
    pub is_custom: bool,
    pub status: PackageStatus,
}

impl Package {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            is_metapackage: false,
            is_custom: false,
            status: PackageStatus::NotInstalled,
        }
    }

    pub fn with_status(mut self, status: PackageStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_flags(mut self, is_metapackage: bool, is_custom: bool) -> Self {
        self.is_metapackage = is_metapackage;
        self.is_custom = is_custom;
        self
    }

    pub fn is_installed(&self) -> bool {
        matches!(
            self.status,
            PackageStatus::Installed | PackageStatus::Upgradable
        )
    }
}

impl std::fmt::Display for Package {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.version.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{} (v{})", self.name, self.version)
        }
    }
}
