// src/resolver/validate.rs

//! Plan validation.

use super::engine::DependencyResolver;
use crate::classifier::RiskLevel;
use crate::model::DependencyPlan;
use std::collections::HashSet;

/// Outcome of validating a resolution plan.
///
/// The plan is valid iff the issues list is empty; issues are
/// human-readable and surfaced to the caller, which decides whether to
/// abort or proceed with force.
#[derive(Debug, Clone, Default)]
pub struct PlanValidation {
    pub issues: Vec<String>,
}

impl PlanValidation {
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }
}

impl DependencyResolver<'_> {
    /// Check that a resolution plan is feasible.
    ///
    /// Flags circular dependencies within the plan's install+upgrade set,
    /// names appearing in both the install and remove sets, high-risk
    /// removals (hard failure, independent of any confirmation), and
    /// metapackages whose dependencies are neither installed nor part of
    /// the plan.
    pub fn validate_resolution_plan(&mut self, plan: &DependencyPlan) -> PlanValidation {
        let mut issues = Vec::new();

        let plan_names: HashSet<String> = plan
            .to_install
            .iter()
            .chain(plan.to_upgrade.iter())
            .map(|p| p.name.clone())
            .collect();

        for pkg in plan.to_install.iter().chain(plan.to_upgrade.iter()) {
            if self.has_circular_dependency(&pkg.name, &plan_names) {
                issues.push(format!(
                    "Circular dependency detected involving {}",
                    pkg.name
                ));
            }
        }

        // A name in both the install and remove sets is contradictory
        for pkg in &plan.to_install {
            if plan.to_remove.iter().any(|removed| removed.name == pkg.name) {
                issues.push(format!(
                    "Contradictory plan: {} is both installed and removed",
                    pkg.name
                ));
            }
        }

        for pkg in &plan.to_remove {
            if self.classifier().get_removal_risk_level(&pkg.name) == RiskLevel::High {
                issues.push(format!(
                    "High-risk removal: {} is a critical system package",
                    pkg.name
                ));
            }
        }

        for pkg in &plan.to_install {
            if !self.classifier().is_metapackage(&pkg.name) {
                continue;
            }
            let closure = self.get_all_dependencies(&pkg.name);
            let missing: Vec<String> = closure
                .iter()
                .filter(|dep| {
                    !self.query().is_installed(&dep.name)
                        && !plan.to_install.iter().any(|p| p.name == dep.name)
                })
                .map(|dep| dep.name.clone())
                .collect();
            if !missing.is_empty() {
                issues.push(format!(
                    "Metapackage {} missing dependencies: {}",
                    pkg.name,
                    missing.join(", ")
                ));
            }
        }

        PlanValidation { issues }
    }

    /// Whether a package's dependency closure, restricted to the given
    /// plan set, transitively contains the package itself.
    fn has_circular_dependency(&self, name: &str, plan_names: &HashSet<String>) -> bool {
        let mut visited = HashSet::new();
        let mut stack: Vec<String> = self
            .query()
            .get_dependencies(name)
            .into_iter()
            .filter(|dep| plan_names.contains(&dep.name))
            .map(|dep| dep.name)
            .collect();

        while let Some(current) = stack.pop() {
            if current == name {
                return true;
            }
            if visited.insert(current.clone()) {
                for dep in self.query().get_dependencies(&current) {
                    if plan_names.contains(&dep.name) {
                        stack.push(dep.name);
                    }
                }
            }
        }

        false
    }
}
