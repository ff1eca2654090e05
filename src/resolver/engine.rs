// src/resolver/engine.rs

//! Dependency resolver implementation.

use crate::classifier::PackageClassifier;
use crate::config::Config;
use crate::model::{Conflict, DependencyPlan, Package, PackageStatus};
use crate::query::PackageQuery;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Resolves the work needed to install a target package.
///
/// Holds a per-instance memoization cache of dependency closures; create
/// one resolver per resolution request.
pub struct DependencyResolver<'a> {
    query: &'a dyn PackageQuery,
    classifier: &'a PackageClassifier,
    config: &'a Config,
    closure_cache: HashMap<String, Vec<Package>>,
}

impl<'a> DependencyResolver<'a> {
    pub fn new(
        query: &'a dyn PackageQuery,
        classifier: &'a PackageClassifier,
        config: &'a Config,
    ) -> Self {
        Self {
            query,
            classifier,
            config,
            closure_cache: HashMap::new(),
        }
    }

    /// Build a dependency plan for installing the target package.
    pub fn resolve_dependencies(&mut self, target: &Package) -> DependencyPlan {
        debug!("Resolving dependencies for {}", target.name);
        let mut plan = DependencyPlan::new();

        for dep in self.get_all_dependencies(&target.name) {
            if !self.query.is_installed(&dep.name) {
                plan.to_install.push(dep);
            } else if self.needs_upgrade(&dep) {
                plan.to_upgrade.push(dep);
            }
        }

        if !self.query.is_installed(&target.name) {
            plan.to_install.insert(0, target.clone());
        }

        let mut conflicts = Vec::new();
        for pkg in plan.to_install.iter().chain(plan.to_upgrade.iter()) {
            conflicts.extend(self.query.check_conflicts(&pkg.name));
        }
        plan.conflicts = conflicts;

        if plan.has_conflicts() {
            let conflicts = plan.conflicts.clone();
            plan.to_remove = self.plan_conflict_resolution(&conflicts);
            plan.requires_user_confirmation = true;
        }

        debug!("{}", plan);
        plan
    }

    /// Whether an installed dependency should be upgraded as part of the
    /// plan.
    ///
    /// Upgradable status always triggers; in offline mode a divergence from
    /// the configured pinned version does too.
    fn needs_upgrade(&self, dep: &Package) -> bool {
        let status = self
            .query
            .get_package_info(&dep.name)
            .map(|info| info.status)
            .unwrap_or(dep.status);
        if status == PackageStatus::Upgradable {
            return true;
        }

        if self.config.is_offline_mode() {
            if let Some(pinned) = self.config.get_pinned_version(&dep.name) {
                if let Some(info) = self.query.get_package_info(&dep.name) {
                    return !info.version.is_empty() && info.version != pinned;
                }
            }
        }

        false
    }

    /// Transitive dependency closure of a package, deduplicated by name in
    /// first-seen order. The package itself is not part of its closure.
    ///
    /// Names already visited are never re-expanded, so the traversal
    /// terminates on any finite dependency graph, cyclic ones included. The
    /// full closure is memoized per top-level name.
    pub fn get_all_dependencies(&mut self, name: &str) -> Vec<Package> {
        if let Some(cached) = self.closure_cache.get(name) {
            return cached.clone();
        }

        let mut visited = HashSet::new();
        visited.insert(name.to_string());
        let mut collected = Vec::new();
        self.collect_dependencies(name, &mut visited, &mut collected);

        self.closure_cache
            .insert(name.to_string(), collected.clone());
        collected
    }

    fn collect_dependencies(
        &self,
        name: &str,
        visited: &mut HashSet<String>,
        out: &mut Vec<Package>,
    ) {
        for dep in self.query.get_dependencies(name) {
            if visited.insert(dep.name.clone()) {
                let dep_name = dep.name.clone();
                out.push(dep);
                self.collect_dependencies(&dep_name, visited, out);
            }
        }
    }

    /// Plan package removals that would clear the given conflicts.
    ///
    /// One candidate per conflict, deduplicated by name, sorted so the
    /// least critical packages are removed first: if resolution is
    /// interrupted partway, the damage is bounded.
    pub fn plan_conflict_resolution(&mut self, conflicts: &[Conflict]) -> Vec<Package> {
        let mut to_remove: Vec<Package> = Vec::new();

        for conflict in conflicts {
            let candidate = self
                .choose_removal_candidate(&conflict.package, &conflict.conflicting_package);
            if !to_remove.iter().any(|p| p.name == candidate.name) {
                to_remove.push(candidate);
            }
        }

        // Stable sort keeps insertion order within equal priorities
        to_remove.sort_by_key(|p| self.removal_priority(&p.name));
        to_remove
    }

    /// Choose which side of a conflict should be removed.
    ///
    /// Total and deterministic: preservation-prioritized packages survive,
    /// custom packages are cheaper to remove and reinstall, packages not
    /// yet installed cost nothing to drop, and the first package is the
    /// final fallback. Removability under the safety policy is not checked
    /// here; the arbiter filters later.
    pub fn choose_removal_candidate(&self, a: &Package, b: &Package) -> Package {
        let preserve_a = self.classifier.should_prioritize_preservation(&a.name);
        let preserve_b = self.classifier.should_prioritize_preservation(&b.name);
        if preserve_a && !preserve_b {
            return b.clone();
        }
        if preserve_b && !preserve_a {
            return a.clone();
        }

        let custom_a = self.classifier.is_custom_package(&a.name);
        let custom_b = self.classifier.is_custom_package(&b.name);
        if custom_a && !custom_b {
            return a.clone();
        }
        if custom_b && !custom_a {
            return b.clone();
        }

        if !self.query.is_installed(&a.name) {
            return a.clone();
        }
        if !self.query.is_installed(&b.name) {
            return b.clone();
        }

        a.clone()
    }

    /// Removal priority score; lower scores are removed first.
    fn removal_priority(&self, name: &str) -> u32 {
        if self.classifier.should_prioritize_preservation(name) {
            100
        } else if self.classifier.is_custom_package(name) {
            10
        } else {
            50
        }
    }

    pub(super) fn query(&self) -> &dyn PackageQuery {
        self.query
    }

    pub(super) fn classifier(&self) -> &PackageClassifier {
        self.classifier
    }

    /// Human-readable summary of a resolution plan.
    pub fn resolution_summary(&self, plan: &DependencyPlan) -> String {
        let mut parts = Vec::new();

        if !plan.to_install.is_empty() {
            let names: Vec<String> =
                plan.to_install.iter().map(|p| p.name.clone()).collect();
            parts.push(format!(
                "Install: {}",
                self.classifier.category_summary(&names)
            ));
        }
        if !plan.to_upgrade.is_empty() {
            let names: Vec<String> =
                plan.to_upgrade.iter().map(|p| p.name.clone()).collect();
            parts.push(format!(
                "Upgrade: {}",
                self.classifier.category_summary(&names)
            ));
        }
        if !plan.to_remove.is_empty() {
            let names: Vec<String> =
                plan.to_remove.iter().map(|p| p.name.clone()).collect();
            parts.push(format!(
                "Remove: {}",
                self.classifier.category_summary(&names)
            ));
        }
        if plan.has_conflicts() {
            parts.push(format!("Conflicts: {} detected", plan.conflicts.len()));
        }

        if parts.is_empty() {
            "No changes required".to_string()
        } else {
            parts.join("; ")
        }
    }
}
