// src/lib.rs

//! dpm - Debian package operations with a custom-package safety policy
//!
//! Manages Debian packages on top of `apt`/`dpkg`, layering a safety
//! policy and a conflict-resolution workflow over the native tools.
//!
//! # Architecture
//!
//! - Classification: package names map to system/custom/metapackage types
//!   and removal risk tiers, from configured prefixes
//! - Safety policy: only custom-prefixed or explicitly whitelisted
//!   packages are ever removable; a hard-coded critical set can never be
//!   whitelisted
//! - Resolution: transitive dependency closures with cycle avoidance,
//!   conflict-removal planning, topological installation ordering, plan
//!   validation
//! - Arbitration: risk-tiered interactive confirmation, or safe/forced
//!   auto-resolution for non-interactive use
//! - Execution: finalized plans are handed to an apt-get backed executor

pub mod classifier;
pub mod config;
pub mod conflict;
mod engine;
mod error;
pub mod exec;
pub mod model;
pub mod policy;
pub mod query;
pub mod resolver;

pub use classifier::{Classified, PackageClassifier, PackageType, RiskLevel};
pub use config::{Config, DEFAULT_CONFIG_PATH};
pub use conflict::{AutoConfirm, Confirmation, ConflictHandler, ConsolePrompt};
pub use engine::PackageEngine;
pub use error::{Error, Result};
pub use exec::{AptExecutor, PackageOps};
pub use model::{Conflict, DependencyPlan, OperationResult, Package, PackageStatus};
pub use policy::{SafetyPolicy, CRITICAL_PACKAGES};
pub use query::{AptQuery, MemoryQuery, PackageQuery};
pub use resolver::{DependencyResolver, PlanValidation};
