// src/query/mod.rs

//! Read-only package-universe queries.
//!
//! The resolver and arbiter see the package universe only through the
//! [`PackageQuery`] port. Expected absences (unknown package, no
//! dependencies, no conflicts) are empty collections, never errors.

mod apt;
mod memory;

pub use apt::AptQuery;
pub use memory::MemoryQuery;

use crate::model::{Conflict, Package};

/// Synchronous, side-effect-free queries against the package universe.
pub trait PackageQuery {
    /// Whether a package is currently installed.
    fn is_installed(&self, name: &str) -> bool;

    /// Direct dependencies only, version-unresolved.
    fn get_dependencies(&self, name: &str) -> Vec<Package>;

    /// Conflicts that installing this package would cause.
    fn check_conflicts(&self, name: &str) -> Vec<Conflict>;

    /// Detailed information about a package, if known.
    fn get_package_info(&self, name: &str) -> Option<Package>;

    /// Available versions for a package.
    fn get_available_versions(&self, name: &str) -> Vec<String>;
}
