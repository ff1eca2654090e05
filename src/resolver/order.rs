// src/resolver/order.rs

//! Installation ordering.

use super::engine::DependencyResolver;
use crate::model::Package;
use std::collections::HashSet;
use tracing::warn;

impl DependencyResolver<'_> {
    /// Order packages so that dependencies come before their dependents.
    ///
    /// Repeatedly picks from the remaining set the packages whose closure
    /// contains no other remaining package, preferring
    /// preservation-prioritized packages and then name order within each
    /// ready batch. A set with a true internal cycle is appended in its
    /// original order instead of looping forever.
    pub fn create_installation_order(&mut self, packages: &[Package]) -> Vec<Package> {
        let mut ordered = Vec::with_capacity(packages.len());
        let mut remaining: Vec<Package> = packages.to_vec();

        while !remaining.is_empty() {
            let remaining_names: HashSet<String> =
                remaining.iter().map(|p| p.name.clone()).collect();

            let mut ready: Vec<Package> = Vec::new();
            for pkg in &remaining {
                let closure = self.get_all_dependencies(&pkg.name);
                let has_unmet = closure
                    .iter()
                    .any(|dep| dep.name != pkg.name && remaining_names.contains(&dep.name));
                if !has_unmet {
                    ready.push(pkg.clone());
                }
            }

            if ready.is_empty() {
                // Dependency cycle within the set; keep the original order
                // for the remainder rather than failing the whole plan
                warn!(
                    "Dependency cycle among {} packages, keeping given order",
                    remaining.len()
                );
                ordered.append(&mut remaining);
                break;
            }

            ready.sort_by(|a, b| {
                let a_key = !self.classifier().should_prioritize_preservation(&a.name);
                let b_key = !self.classifier().should_prioritize_preservation(&b.name);
                a_key.cmp(&b_key).then_with(|| a.name.cmp(&b.name))
            });

            let next = ready.into_iter().next().expect("ready set is non-empty");
            remaining.retain(|p| p.name != next.name);
            ordered.push(next);
        }

        ordered
    }
}
