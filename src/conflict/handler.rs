// src/conflict/handler.rs

//! Conflict handling and user interaction.

use super::prompt::Confirmation;
use crate::classifier::{PackageClassifier, RiskLevel};
use crate::model::{Conflict, DependencyPlan, OperationResult, Package};
use crate::policy::SafetyPolicy;
use tracing::info;

/// Arbitrates a plan's conflicts and removals.
///
/// Owns no state; a pure transformation over the plan plus the
/// confirmation boundary.
pub struct ConflictHandler<'a> {
    classifier: &'a PackageClassifier,
    policy: &'a SafetyPolicy,
    prompt: &'a mut dyn Confirmation,
}

impl<'a> ConflictHandler<'a> {
    pub fn new(
        classifier: &'a PackageClassifier,
        policy: &'a SafetyPolicy,
        prompt: &'a mut dyn Confirmation,
    ) -> Self {
        Self {
            classifier,
            policy,
            prompt,
        }
    }

    /// Walk the user through a plan's conflicts and removals.
    ///
    /// Returns the approval decision and the plan to execute. On any
    /// rejection the original plan comes back unchanged; on approval the
    /// plan's removals are reduced to the policy-allowed subset, so a
    /// blocked package can never reach the execution layer.
    pub fn handle_conflicts(&mut self, plan: &DependencyPlan) -> (bool, DependencyPlan) {
        if !plan.has_conflicts() && plan.to_remove.is_empty() {
            return (true, plan.clone());
        }

        println!("\n{}", "=".repeat(60));
        println!("PACKAGE CONFLICT RESOLUTION REQUIRED");
        println!("{}", "=".repeat(60));

        if plan.has_conflicts() {
            self.display_conflicts(&plan.conflicts);
        }

        let mut approved_removals = Vec::new();
        if !plan.to_remove.is_empty() {
            let (allowed, blocked) = self.partition_removals(&plan.to_remove);

            if !blocked.is_empty() {
                self.display_blocked(&blocked);
                if allowed.is_empty() {
                    println!("Cannot proceed: all required removals are system packages.");
                    println!("Configure custom prefixes to enable conflict resolution.");
                    return (false, plan.clone());
                }
            }

            if !allowed.is_empty() && !self.confirm_removals(&allowed) {
                println!("Operation cancelled by user.");
                return (false, plan.clone());
            }
            approved_removals = allowed;
        }

        if !plan.to_install.is_empty() || !plan.to_upgrade.is_empty() {
            self.display_operation_summary(plan);
        }

        if plan.requires_user_confirmation
            && !self
                .prompt
                .confirm("Do you want to proceed with this operation? [y/N]:", false)
        {
            println!("Operation cancelled by user.");
            return (false, plan.clone());
        }

        let mut approved = plan.clone();
        approved.to_remove = approved_removals;
        (true, approved)
    }

    /// Split removals into those the safety policy allows and those it
    /// blocks. Blocked packages are never removed, whatever the user
    /// answers.
    fn partition_removals(&self, packages: &[Package]) -> (Vec<Package>, Vec<Package>) {
        packages
            .iter()
            .cloned()
            .partition(|pkg| self.policy.can_remove_package(&pkg.name))
    }

    fn display_conflicts(&self, conflicts: &[Conflict]) {
        println!("\nDetected {} package conflict(s):", conflicts.len());
        println!("{}", "-".repeat(40));

        for (i, conflict) in conflicts.iter().enumerate() {
            println!(
                "{}. {} conflicts with {}",
                i + 1,
                conflict.package.name,
                conflict.conflicting_package.name
            );
            println!("   Reason: {}", conflict.reason);
            println!(
                "   Types: {} ({}) vs {} ({})",
                conflict.package.name,
                self.classifier.get_package_type(&conflict.package.name),
                conflict.conflicting_package.name,
                self.classifier
                    .get_package_type(&conflict.conflicting_package.name)
            );
            println!();
        }
    }

    fn display_blocked(&self, blocked: &[Package]) {
        println!("\nBLOCKED REMOVALS - the following packages CANNOT be removed:");
        println!("{}", "-".repeat(60));
        for pkg in blocked {
            println!("   - {} - system package (no custom prefix)", pkg);
        }
        println!();
        println!("System packages are never removed for safety.");
        println!("Only packages with configured custom prefixes can be removed.");
        println!("Add custom prefixes with: dpm config add-prefix 'yourprefix-'");
        println!();
    }

    /// Display the allowed removals grouped by risk and ask for approval.
    /// High-risk removals demand the literal "YES".
    fn confirm_removals(&mut self, packages: &[Package]) -> bool {
        println!(
            "\nThe following {} package(s) need to be REMOVED:",
            packages.len()
        );
        println!("{}", "-".repeat(50));

        let mut high = Vec::new();
        let mut medium = Vec::new();
        let mut low = Vec::new();
        for pkg in packages {
            match self.classifier.get_removal_risk_level(&pkg.name) {
                RiskLevel::High => high.push(pkg),
                RiskLevel::Medium => medium.push(pkg),
                RiskLevel::Low => low.push(pkg),
            }
        }

        if !high.is_empty() {
            println!("HIGH RISK REMOVALS (critical system packages):");
            for pkg in &high {
                println!("   - {} - CRITICAL SYSTEM PACKAGE", pkg);
            }
            println!();
        }
        if !medium.is_empty() {
            println!("MEDIUM RISK REMOVALS:");
            for pkg in &medium {
                println!(
                    "   - {} - {}",
                    pkg,
                    self.classifier.get_package_type(&pkg.name)
                );
            }
            println!();
        }
        if !low.is_empty() {
            println!("LOW RISK REMOVALS (custom packages):");
            for pkg in &low {
                println!("   - {} - custom package", pkg);
            }
            println!();
        }

        let names: Vec<String> = packages.iter().map(|p| p.name.clone()).collect();
        println!("Summary: {}", self.classifier.category_summary(&names));
        println!();

        if !high.is_empty() {
            println!("WARNING: this operation will remove CRITICAL SYSTEM PACKAGES!");
            println!("This could make your system unstable or unusable.");
            self.prompt.confirm(
                "Do you want to proceed with HIGH RISK removals? (type 'YES' to confirm):",
                true,
            )
        } else {
            self.prompt
                .confirm("Do you want to proceed with these removals? [y/N]:", false)
        }
    }

    fn display_operation_summary(&self, plan: &DependencyPlan) {
        println!("\nPLANNED OPERATIONS:");
        println!("{}", "-".repeat(30));

        if !plan.to_install.is_empty() {
            let names: Vec<String> = plan.to_install.iter().map(|p| p.name.clone()).collect();
            println!("INSTALL: {}", self.classifier.category_summary(&names));
            for pkg in plan.to_install.iter().take(5) {
                println!(
                    "   + {} - {}",
                    pkg,
                    self.classifier.get_package_type(&pkg.name)
                );
            }
            if plan.to_install.len() > 5 {
                println!("   ... and {} more packages", plan.to_install.len() - 5);
            }
            println!();
        }

        if !plan.to_upgrade.is_empty() {
            let names: Vec<String> = plan.to_upgrade.iter().map(|p| p.name.clone()).collect();
            println!("UPGRADE: {}", self.classifier.category_summary(&names));
            for pkg in plan.to_upgrade.iter().take(5) {
                println!("   ^ {}", pkg);
            }
            if plan.to_upgrade.len() > 5 {
                println!("   ... and {} more packages", plan.to_upgrade.len() - 5);
            }
            println!();
        }
    }

    /// Resolve conflicts without user interaction, within policy.
    ///
    /// For each conflict the policy-allowed side is removed; when both
    /// sides are allowed the already-installed one goes, and when neither
    /// is, the conflict is left unresolved rather than decided either way.
    pub fn create_safe_resolution_plan(&self, conflicts: &[Conflict]) -> DependencyPlan {
        let mut plan = DependencyPlan {
            conflicts: conflicts.to_vec(),
            requires_user_confirmation: true,
            ..DependencyPlan::default()
        };

        for conflict in conflicts {
            let Some(candidate) =
                self.choose_removal_for_policy(&conflict.package, &conflict.conflicting_package)
            else {
                info!(
                    "Conflict between {} and {} is unresolvable within policy",
                    conflict.package.name, conflict.conflicting_package.name
                );
                continue;
            };
            if !plan.to_remove.iter().any(|p| p.name == candidate.name) {
                plan.to_remove.push(candidate);
            }
        }

        plan
    }

    /// Choose which side of a conflict to remove under the safety policy.
    ///
    /// Returns `None` when neither side is removable. When both are, the
    /// conflicting package (already installed and blocking the new
    /// installation) is preferred over the requested target.
    fn choose_removal_for_policy(
        &self,
        target: &Package,
        conflicting: &Package,
    ) -> Option<Package> {
        let target_ok = self.policy.can_remove_package(&target.name);
        let conflicting_ok = self.policy.can_remove_package(&conflicting.name);

        match (target_ok, conflicting_ok) {
            (false, false) => None,
            (true, false) => Some(target.clone()),
            (_, true) => Some(conflicting.clone()),
        }
    }

    /// Safe resolution plus explicit force for whatever remains.
    ///
    /// Conflicts that the safe plan could not resolve are retained in the
    /// plan and flagged for force mode, so the execution layer pushes them
    /// through explicitly instead of dropping them.
    pub fn create_forced_resolution_plan(&self, conflicts: &[Conflict]) -> DependencyPlan {
        let mut plan = self.create_safe_resolution_plan(conflicts);

        let unresolved: Vec<Conflict> = conflicts
            .iter()
            .filter(|conflict| {
                let removed = |name: &str| plan.to_remove.iter().any(|p| p.name == name);
                !removed(&conflict.package.name)
                    && !removed(&conflict.conflicting_package.name)
            })
            .cloned()
            .collect();

        if !unresolved.is_empty() {
            plan.conflicts = unresolved;
            plan.requires_force_mode = true;
        }

        plan
    }
}

/// Print the outcome of an executed operation.
pub fn display_operation_result(result: &OperationResult) {
    println!("\n{}", "=".repeat(60));
    if result.success {
        println!("OPERATION COMPLETED SUCCESSFULLY");
    } else {
        println!("OPERATION FAILED");
    }
    println!("{}", "=".repeat(60));

    if !result.packages_affected.is_empty() {
        println!("\nPackages affected ({}):", result.packages_affected.len());
        for pkg in &result.packages_affected {
            println!("  - {}", pkg);
        }
    }
    if result.has_warnings() {
        println!("\nWarnings ({}):", result.warnings.len());
        for warning in &result.warnings {
            println!("  - {}", warning);
        }
    }
    if result.has_errors() {
        println!("\nErrors ({}):", result.errors.len());
        for error in &result.errors {
            println!("  - {}", error);
        }
    }
    println!();
}
