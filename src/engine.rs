// src/engine.rs

//! Package operation orchestration.
//!
//! Wires the classifier, resolver, validator, and arbiter together and
//! executes the finalized plan through the execution port. One engine per
//! process; each operation builds its own resolver (and with it a fresh
//! closure cache).

use crate::classifier::PackageClassifier;
use crate::config::Config;
use crate::conflict::{ConflictHandler, Confirmation};
use crate::exec::PackageOps;
use crate::model::{DependencyPlan, OperationResult, Package, PackageStatus};
use crate::policy::SafetyPolicy;
use crate::query::PackageQuery;
use crate::resolver::{DependencyResolver, PlanValidation};
use tracing::{info, warn};

/// Main orchestration for package operations.
pub struct PackageEngine {
    config: Config,
    classifier: PackageClassifier,
    query: Box<dyn PackageQuery>,
    executor: Box<dyn PackageOps>,
    prompt: Box<dyn Confirmation>,
}

impl PackageEngine {
    pub fn new(
        config: Config,
        query: Box<dyn PackageQuery>,
        executor: Box<dyn PackageOps>,
        prompt: Box<dyn Confirmation>,
    ) -> Self {
        let classifier = PackageClassifier::from_config(&config);
        Self {
            config,
            classifier,
            query,
            executor,
            prompt,
        }
    }

    /// Install a package with full dependency resolution and conflict
    /// handling.
    pub fn install_package(&mut self, name: &str, force: bool) -> OperationResult {
        info!("Installing package: {}", name);
        let target = self.build_target(name);

        if self.query.is_installed(name) && !force {
            let mut result = OperationResult::succeeded();
            result.packages_affected.push(target);
            result.add_warning(format!("Package {name} is already installed"));
            return result;
        }

        let mut resolver =
            DependencyResolver::new(self.query.as_ref(), &self.classifier, &self.config);
        let mut plan = resolver.resolve_dependencies(&target);

        let validation = resolver.validate_resolution_plan(&plan);
        if !validation.is_valid() {
            if !force {
                let mut result = OperationResult::failed();
                for issue in validation.issues {
                    result.add_error(issue);
                }
                return result;
            }
            for issue in &validation.issues {
                warn!("Proceeding despite validation issue: {}", issue);
            }
        }

        if plan.has_conflicts() || !plan.to_remove.is_empty() {
            let policy = SafetyPolicy::from_config(&self.config);
            let mut handler =
                ConflictHandler::new(&self.classifier, &policy, self.prompt.as_mut());
            let (approved, final_plan) = handler.handle_conflicts(&plan);
            if !approved {
                let mut result = OperationResult::failed();
                result.add_warning("Operation cancelled by user");
                return result;
            }
            plan = final_plan;
        }

        let order = resolver.create_installation_order(&plan.to_install);
        self.execute_plan(&plan, &order)
    }

    /// Remove a package, subject to the safety policy.
    pub fn remove_package(&mut self, name: &str, force: bool) -> OperationResult {
        info!("Removing package: {}", name);

        if !self.query.is_installed(name) {
            let mut result = OperationResult::succeeded();
            result.add_warning(format!("Package {name} is not installed"));
            return result;
        }

        let policy = SafetyPolicy::from_config(&self.config);
        if !policy.can_remove_package(name) {
            let mut result = OperationResult::failed();
            result.add_error(format!(
                "Cannot remove {name}: system package (no custom prefix)"
            ));
            result.add_error(
                "Only packages with configured custom prefixes or explicitly \
                 removable packages can be removed"
                    .to_string(),
            );
            return result;
        }

        let target = self.build_target(name);
        let approved = match self.classifier.get_removal_risk_level(name) {
            crate::classifier::RiskLevel::High => self.prompt.confirm(
                &format!("Remove HIGH RISK package {name}? (type 'YES' to confirm):"),
                true,
            ),
            _ => self
                .prompt
                .confirm(&format!("Remove package {name}? [y/N]:"), false),
        };
        if !approved {
            let mut result = OperationResult::failed();
            result.add_warning("Operation cancelled by user");
            return result;
        }

        let mut result = OperationResult::succeeded();
        match self.executor.remove(name, force) {
            Ok(true) => result.packages_affected.push(target),
            Ok(false) => result.add_error(format!("Failed to remove {name}")),
            Err(e) => result.add_error(format!("Failed to remove {name}: {e}")),
        }
        result
    }

    /// Resolve and validate without executing; used for dry runs.
    pub fn plan_installation(&mut self, name: &str) -> (DependencyPlan, PlanValidation, String) {
        let target = self.build_target(name);
        let mut resolver =
            DependencyResolver::new(self.query.as_ref(), &self.classifier, &self.config);
        let plan = resolver.resolve_dependencies(&target);
        let validation = resolver.validate_resolution_plan(&plan);
        let summary = resolver.resolution_summary(&plan);
        (plan, validation, summary)
    }

    pub fn classifier(&self) -> &PackageClassifier {
        &self.classifier
    }

    pub fn query(&self) -> &dyn PackageQuery {
        self.query.as_ref()
    }

    /// Build the target package for an operation: pinned version in
    /// offline mode, otherwise whatever the universe reports.
    fn build_target(&self, name: &str) -> Package {
        let version = self.target_version(name).unwrap_or_default();
        let status = self
            .query
            .get_package_info(name)
            .map(|info| info.status)
            .unwrap_or(PackageStatus::NotInstalled);

        Package::new(name, version)
            .with_flags(
                self.classifier.is_metapackage(name),
                self.classifier.is_custom_package(name),
            )
            .with_status(status)
    }

    fn target_version(&self, name: &str) -> Option<String> {
        if self.config.is_offline_mode() {
            if let Some(pinned) = self.config.get_pinned_version(name) {
                return Some(pinned.to_string());
            }
        }
        self.query
            .get_package_info(name)
            .map(|info| info.version)
            .filter(|version| !version.is_empty())
    }

    /// Execute a finalized plan: removals first, then installs in
    /// dependency order, then upgrades.
    fn execute_plan(&mut self, plan: &DependencyPlan, install_order: &[Package]) -> OperationResult {
        let mut result = OperationResult::succeeded();

        for pkg in &plan.to_remove {
            match self.executor.remove(&pkg.name, plan.requires_force_mode) {
                Ok(true) => result.packages_affected.push(pkg.clone()),
                Ok(false) => result.add_error(format!("Failed to remove {}", pkg.name)),
                Err(e) => result.add_error(format!("Failed to remove {}: {e}", pkg.name)),
            }
        }

        for pkg in install_order {
            let version = (!pkg.version.is_empty()).then_some(pkg.version.as_str());
            match self.executor.install(&pkg.name, version) {
                Ok(true) => result.packages_affected.push(pkg.clone()),
                Ok(false) => result.add_error(format!("Failed to install {}", pkg.name)),
                Err(e) => result.add_error(format!("Failed to install {}: {e}", pkg.name)),
            }
        }

        for pkg in &plan.to_upgrade {
            match self.executor.upgrade(&pkg.name) {
                Ok(true) => result.packages_affected.push(pkg.clone()),
                Ok(false) => result.add_error(format!("Failed to upgrade {}", pkg.name)),
                Err(e) => result.add_error(format!("Failed to upgrade {}: {e}", pkg.name)),
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conflict::AutoConfirm;
    use crate::error::Result;
    use crate::query::MemoryQuery;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records executed operations instead of touching the system.
    #[derive(Clone, Default)]
    struct RecordingExecutor {
        calls: Rc<RefCell<Vec<String>>>,
    }

    impl RecordingExecutor {
        fn new() -> (Self, Rc<RefCell<Vec<String>>>) {
            let calls = Rc::new(RefCell::new(Vec::new()));
            (
                Self {
                    calls: calls.clone(),
                },
                calls,
            )
        }
    }

    impl PackageOps for RecordingExecutor {
        fn install(&mut self, name: &str, version: Option<&str>) -> Result<bool> {
            self.calls
                .borrow_mut()
                .push(format!("install {name}{}", match version {
                    Some(v) => format!("={v}"),
                    None => String::new(),
                }));
            Ok(true)
        }

        fn remove(&mut self, name: &str, force: bool) -> Result<bool> {
            self.calls
                .borrow_mut()
                .push(format!("remove {name} force={force}"));
            Ok(true)
        }

        fn upgrade(&mut self, name: &str) -> Result<bool> {
            self.calls.borrow_mut().push(format!("upgrade {name}"));
            Ok(true)
        }
    }

    fn config_with_prefix() -> Config {
        let mut config = Config::default();
        config.add_custom_prefix("myco-");
        config
    }

    fn engine(query: MemoryQuery) -> (PackageEngine, Rc<RefCell<Vec<String>>>) {
        let (executor, calls) = RecordingExecutor::new();
        let engine = PackageEngine::new(
            config_with_prefix(),
            Box::new(query),
            Box::new(executor),
            Box::new(AutoConfirm::new(true)),
        );
        (engine, calls)
    }

    #[test]
    fn test_install_clean_target() {
        let mut query = MemoryQuery::new();
        query.add_available("myco-tools", "1.0");
        query.add_dependency("myco-tools", "libfoo");
        query.add_dependency("myco-tools", "libbar");

        let (mut engine, calls) = engine(query);
        let result = engine.install_package("myco-tools", false);

        assert!(result.success, "errors: {:?}", result.errors);
        assert_eq!(result.packages_affected.len(), 3);
        let calls = calls.borrow();
        // Dependencies come before the target
        let pos = |needle: &str| calls.iter().position(|c| c.contains(needle)).unwrap();
        assert!(pos("libfoo") < pos("myco-tools"));
        assert!(pos("libbar") < pos("myco-tools"));
    }

    #[test]
    fn test_install_already_installed_is_a_warning() {
        let mut query = MemoryQuery::new();
        query.add_installed("myco-tools", "1.0");

        let (mut engine, calls) = engine(query);
        let result = engine.install_package("myco-tools", false);

        assert!(result.success);
        assert!(result.has_warnings());
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn test_install_declined_by_user() {
        let mut query = MemoryQuery::new();
        query.add_available("newpkg", "2.0");
        query.add_installed("myco-old", "1.0");
        query.add_conflict("newpkg", "myco-old", "files overlap");

        let (executor, calls) = RecordingExecutor::new();
        let mut engine = PackageEngine::new(
            config_with_prefix(),
            Box::new(query),
            Box::new(executor),
            Box::new(AutoConfirm::new(false)),
        );

        let result = engine.install_package("newpkg", false);
        assert!(!result.success);
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn test_install_resolves_conflict_and_removes_first() {
        let mut query = MemoryQuery::new();
        query.add_available("newpkg", "2.0");
        query.add_installed("myco-old", "1.0");
        query.add_conflict("newpkg", "myco-old", "files overlap");

        let (mut engine, calls) = engine(query);
        let result = engine.install_package("newpkg", false);

        assert!(result.success, "errors: {:?}", result.errors);
        let calls = calls.borrow();
        let pos = |needle: &str| calls.iter().position(|c| c.contains(needle)).unwrap();
        assert!(pos("remove myco-old") < pos("install newpkg"));
    }

    #[test]
    fn test_install_blocked_when_no_side_removable() {
        let mut query = MemoryQuery::new();
        query.add_available("newpkg", "2.0");
        query.add_installed("oldlib", "1.0");
        query.add_conflict("newpkg", "oldlib", "files overlap");

        let (mut engine, calls) = engine(query);
        let result = engine.install_package("newpkg", false);

        // The proposed removal (the uninstalled newpkg side) is high-risk
        // and not removable under policy; validation refuses the plan
        assert!(!result.success);
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn test_remove_blocked_system_package() {
        let mut query = MemoryQuery::new();
        query.add_installed("nginx", "1.21");

        let (mut engine, calls) = engine(query);
        let result = engine.remove_package("nginx", false);

        assert!(!result.success);
        assert!(result.errors[0].contains("no custom prefix"));
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn test_remove_custom_package() {
        let mut query = MemoryQuery::new();
        query.add_installed("myco-old", "1.0");

        let (mut engine, calls) = engine(query);
        let result = engine.remove_package("myco-old", false);

        assert!(result.success);
        assert_eq!(calls.borrow().as_slice(), ["remove myco-old force=false"]);
    }

    #[test]
    fn test_remove_not_installed_is_a_warning() {
        let (mut engine, calls) = engine(MemoryQuery::new());
        let result = engine.remove_package("myco-ghost", false);

        assert!(result.success);
        assert!(result.has_warnings());
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn test_plan_installation_is_dry() {
        let mut query = MemoryQuery::new();
        query.add_available("myco-tools", "1.0");
        query.add_dependency("myco-tools", "libfoo");

        let (mut engine, calls) = engine(query);
        let (plan, validation, summary) = engine.plan_installation("myco-tools");

        assert_eq!(plan.to_install.len(), 2);
        assert!(validation.is_valid());
        assert!(summary.starts_with("Install:"));
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn test_offline_mode_pins_target_version() {
        let mut query = MemoryQuery::new();
        query.add_available("myco-tools", "2.0");

        let (executor, calls) = RecordingExecutor::new();
        let mut config = config_with_prefix();
        config.set_offline_mode(true);
        config.set_pinned_version("myco-tools", "1.5");
        let mut engine = PackageEngine::new(
            config,
            Box::new(query),
            Box::new(executor),
            Box::new(AutoConfirm::new(true)),
        );

        let result = engine.install_package("myco-tools", false);
        assert!(result.success);
        assert_eq!(calls.borrow().as_slice(), ["install myco-tools=1.5"]);
    }
}
