// src/exec/mod.rs

//! Plan execution against the native package manager.
//!
//! The planning core never executes anything itself; a finalized plan is
//! handed to a [`PackageOps`] implementation.

mod apt;

pub use apt::AptExecutor;

use crate::error::Result;

/// Executes individual package operations.
pub trait PackageOps {
    /// Install a package, optionally at a specific version. Returns whether
    /// the underlying tool reported success.
    fn install(&mut self, name: &str, version: Option<&str>) -> Result<bool>;

    /// Remove a package. `force` corresponds to a forced resolution plan,
    /// not to a policy override.
    fn remove(&mut self, name: &str, force: bool) -> Result<bool>;

    /// Upgrade an installed package to its candidate version.
    fn upgrade(&mut self, name: &str) -> Result<bool>;
}
