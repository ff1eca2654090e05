// src/model/plan.rs

//! Resolution plans, conflicts, and operation results.

use super::Package;

/// An asymmetric conflict pairing: installing `package` requires removing
/// `conflicting_package`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    pub package: Package,
    pub conflicting_package: Package,
    pub reason: String,
}

impl std::fmt::Display for Conflict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} conflicts with {}: {}",
            self.package.name, self.conflicting_package.name, self.reason
        )
    }
}

/// Plan for dependency resolution operations.
///
/// Mutated only during plan construction and conflict resolution; read-only
/// once handed to the execution layer. A valid plan never has the same name
/// in both `to_install` and `to_remove` (the validator flags this).
#[derive(Debug, Clone, Default)]
pub struct DependencyPlan {
    pub to_install: Vec<Package>,
    pub to_remove: Vec<Package>,
    pub to_upgrade: Vec<Package>,
    pub conflicts: Vec<Conflict>,
    pub requires_user_confirmation: bool,
    pub requires_force_mode: bool,
}

impl DependencyPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_operations(&self) -> usize {
        self.to_install.len() + self.to_remove.len() + self.to_upgrade.len()
    }

    pub fn has_conflicts(&self) -> bool {
        !self.conflicts.is_empty()
    }
}

impl std::fmt::Display for DependencyPlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "plan: install={}, remove={}, upgrade={}, conflicts={}",
            self.to_install.len(),
            self.to_remove.len(),
            self.to_upgrade.len(),
            self.conflicts.len()
        )
    }
}

/// Result of executing a package operation.
#[derive(Debug, Clone, Default)]
pub struct OperationResult {
    pub success: bool,
    pub packages_affected: Vec<Package>,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

impl OperationResult {
    pub fn succeeded() -> Self {
        Self {
            success: true,
            ..Self::default()
        }
    }

    pub fn failed() -> Self {
        Self {
            success: false,
            ..Self::default()
        }
    }

    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    /// Record an error; a result with errors is never successful.
    pub fn add_error(&mut self, error: impl Into<String>) {
        self.errors.push(error.into());
        self.success = false;
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}
