// tests/arbitration.rs

//! Conflict arbitration tests: blocked removals, safe and forced
//! auto-resolution, and the preservation rule end to end.

use dpm::{
    AutoConfirm, Config, ConflictHandler, DependencyResolver, MemoryQuery, Package,
    PackageClassifier, SafetyPolicy,
};

fn classifier() -> PackageClassifier {
    PackageClassifier::new(vec!["myco-".to_string()])
}

fn policy() -> SafetyPolicy {
    SafetyPolicy::new(vec!["myco-".to_string()], Vec::new())
}

#[test]
fn test_system_conflict_is_blocked_not_silently_installed() {
    // newpkg conflicts with the installed system package oldpkg; the
    // candidate must never be oldpkg, and with neither side removable the
    // arbiter must refuse rather than decide
    let mut query = MemoryQuery::new();
    query.add_available("newpkg", "2.0");
    query.add_installed("oldpkg", "1.0");
    query.add_conflict("newpkg", "oldpkg", "files overlap");

    let classifier = classifier();
    let config = Config::default();
    let mut resolver = DependencyResolver::new(&query, &classifier, &config);

    let plan = resolver.resolve_dependencies(&Package::new("newpkg", "2.0"));
    assert_eq!(plan.conflicts.len(), 1);
    // The preservation rule spares the installed system package
    assert!(plan.to_remove.iter().all(|p| p.name != "oldpkg"));

    let policy = policy();
    let mut prompt = AutoConfirm::new(true);
    let mut handler = ConflictHandler::new(&classifier, &policy, &mut prompt);
    let (approved, final_plan) = handler.handle_conflicts(&plan);

    // Even an always-yes prompt cannot push a blocked removal through
    assert!(!approved);
    assert_eq!(final_plan.conflicts.len(), 1);
}

#[test]
fn test_custom_conflict_resolves_and_approves() {
    let mut query = MemoryQuery::new();
    query.add_available("newpkg", "2.0");
    query.add_installed("myco-old", "1.0");
    query.add_conflict("newpkg", "myco-old", "files overlap");

    let classifier = classifier();
    let config = Config::default();
    let mut resolver = DependencyResolver::new(&query, &classifier, &config);

    let plan = resolver.resolve_dependencies(&Package::new("newpkg", "2.0"));
    let removals: Vec<&str> = plan.to_remove.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(removals, vec!["myco-old"]);
    assert!(plan.requires_user_confirmation);

    let policy = policy();
    let mut prompt = AutoConfirm::new(true);
    let mut handler = ConflictHandler::new(&classifier, &policy, &mut prompt);
    let (approved, final_plan) = handler.handle_conflicts(&plan);

    assert!(approved);
    let removals: Vec<&str> = final_plan.to_remove.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(removals, vec!["myco-old"]);
}

#[test]
fn test_declined_arbitration_returns_plan_unchanged() {
    let mut query = MemoryQuery::new();
    query.add_available("newpkg", "2.0");
    query.add_installed("myco-old", "1.0");
    query.add_conflict("newpkg", "myco-old", "files overlap");

    let classifier = classifier();
    let config = Config::default();
    let mut resolver = DependencyResolver::new(&query, &classifier, &config);
    let plan = resolver.resolve_dependencies(&Package::new("newpkg", "2.0"));

    let policy = policy();
    let mut prompt = AutoConfirm::new(false);
    let mut handler = ConflictHandler::new(&classifier, &policy, &mut prompt);
    let (approved, final_plan) = handler.handle_conflicts(&plan);

    assert!(!approved);
    assert_eq!(final_plan.to_remove.len(), plan.to_remove.len());
    assert_eq!(final_plan.conflicts.len(), plan.conflicts.len());
}

#[test]
fn test_safe_resolution_spares_unremovable_sides() {
    let classifier = classifier();
    let policy = policy();
    let mut prompt = AutoConfirm::new(true);
    let handler = ConflictHandler::new(&classifier, &policy, &mut prompt);

    let conflicts = vec![
        dpm::Conflict {
            package: Package::new("newpkg", "2.0"),
            conflicting_package: Package::new("myco-old", "1.0"),
            reason: "files overlap".to_string(),
        },
        dpm::Conflict {
            package: Package::new("other", "1.0"),
            conflicting_package: Package::new("oldlib", "1.0"),
            reason: "files overlap".to_string(),
        },
    ];

    let plan = handler.create_safe_resolution_plan(&conflicts);
    let removals: Vec<&str> = plan.to_remove.iter().map(|p| p.name.as_str()).collect();
    // Only the custom side of the first conflict is removable; the second
    // conflict stays unresolved in either direction
    assert_eq!(removals, vec!["myco-old"]);
    assert!(plan.requires_user_confirmation);
    assert!(!plan.requires_force_mode);

    let forced = handler.create_forced_resolution_plan(&conflicts);
    assert!(forced.requires_force_mode);
    assert_eq!(forced.conflicts.len(), 1);
    assert_eq!(forced.conflicts[0].package.name, "other");
}

#[test]
fn test_plan_without_conflicts_passes_untouched() {
    let classifier = classifier();
    let policy = policy();
    let mut prompt = AutoConfirm::new(false);
    let mut handler = ConflictHandler::new(&classifier, &policy, &mut prompt);

    let mut plan = dpm::DependencyPlan::new();
    plan.to_install.push(Package::new("myco-tools", "1.0"));

    // Even an always-no prompt is never consulted
    let (approved, final_plan) = handler.handle_conflicts(&plan);
    assert!(approved);
    assert_eq!(final_plan.to_install.len(), 1);
}
