// src/classifier.rs

//! Package classification from name patterns.
//!
//! Classifies package names into system, custom, and metapackage categories
//! and derives a removal risk tier. Pure functions of the name plus the
//! configured prefix and indicator lists; repeated calls with unchanged
//! configuration yield identical results.

use crate::config::Config;
use strum_macros::Display;

/// Package type classification.
///
/// Derived from the name at query time, never stored on the package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "snake_case")]
pub enum PackageType {
    System,
    Custom,
    Metapackage,
}

/// Risk tier for removing a package, driving confirmation strictness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "UPPERCASE")]
pub enum RiskLevel {
    High,
    Medium,
    Low,
}

/// Name substrings that mark a package as a metapackage.
const METAPACKAGE_INDICATORS: &[&str] = &["meta-", "bundle-", "suite-", "collection-"];

/// Looser patterns that mark a *custom* package as a metapackage.
const CUSTOM_METAPACKAGE_PATTERNS: &[&str] = &["meta", "bundle", "suite", "all", "full"];

/// Substrings of names that must be preserved during conflict resolution,
/// independent of the removal policy's deny-list.
const CRITICAL_NAME_PATTERNS: &[&str] = &[
    "libc", "systemd", "kernel", "init", "base-", "essential", "apt", "dpkg", "ubuntu-", "debian-",
];

/// Package names grouped by classification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classified {
    pub custom: Vec<String>,
    pub system: Vec<String>,
    pub metapackage: Vec<String>,
}

/// Classifies packages as custom, system, or metapackage.
#[derive(Debug, Clone)]
pub struct PackageClassifier {
    custom_prefixes: Vec<String>,
    metapackage_indicators: Vec<String>,
}

impl PackageClassifier {
    pub fn new(custom_prefixes: Vec<String>) -> Self {
        Self {
            custom_prefixes,
            metapackage_indicators: METAPACKAGE_INDICATORS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.custom_prefixes().to_vec())
    }

    /// Check if a package is a custom package using the configured prefixes.
    pub fn is_custom_package(&self, name: &str) -> bool {
        self.custom_prefixes
            .iter()
            .any(|prefix| name.starts_with(prefix.as_str()))
    }

    /// Check if a package is likely a metapackage.
    pub fn is_metapackage(&self, name: &str) -> bool {
        let lower = name.to_lowercase();

        if self
            .metapackage_indicators
            .iter()
            .any(|indicator| lower.contains(indicator.as_str()))
        {
            return true;
        }

        // Custom packages with certain name patterns are likely metapackages
        if self.is_custom_package(name) {
            return CUSTOM_METAPACKAGE_PATTERNS
                .iter()
                .any(|pattern| lower.contains(pattern));
        }

        false
    }

    /// Determine the type of a package.
    ///
    /// Order of checks matters: metapackage takes precedence over custom,
    /// custom over system (the default).
    pub fn get_package_type(&self, name: &str) -> PackageType {
        if self.is_metapackage(name) {
            PackageType::Metapackage
        } else if self.is_custom_package(name) {
            PackageType::Custom
        } else {
            PackageType::System
        }
    }

    /// Whether a package should be preserved over its counterpart during
    /// conflict resolution.
    ///
    /// True for system packages and for any name containing a critical
    /// pattern, whatever its type.
    pub fn should_prioritize_preservation(&self, name: &str) -> bool {
        if self.get_package_type(name) == PackageType::System {
            return true;
        }

        let lower = name.to_lowercase();
        CRITICAL_NAME_PATTERNS
            .iter()
            .any(|pattern| lower.contains(pattern))
    }

    /// Risk tier for removing a package.
    pub fn get_removal_risk_level(&self, name: &str) -> RiskLevel {
        if self.should_prioritize_preservation(name) {
            RiskLevel::High
        } else if self.get_package_type(name) == PackageType::Metapackage {
            RiskLevel::Medium
        } else if self.get_package_type(name) == PackageType::Custom {
            RiskLevel::Low
        } else {
            RiskLevel::Medium
        }
    }

    /// Register an additional metapackage indicator pattern.
    pub fn add_metapackage_indicator(&mut self, indicator: &str) {
        if !self
            .metapackage_indicators
            .iter()
            .any(|existing| existing == indicator)
        {
            self.metapackage_indicators.push(indicator.to_string());
        }
    }

    /// Classify multiple packages into categorized name lists.
    pub fn classify_packages(&self, names: &[String]) -> Classified {
        let mut result = Classified::default();

        for name in names {
            match self.get_package_type(name) {
                PackageType::Custom => result.custom.push(name.clone()),
                PackageType::System => result.system.push(name.clone()),
                PackageType::Metapackage => result.metapackage.push(name.clone()),
            }
        }

        result
    }

    /// Human-readable summary of package categories.
    pub fn category_summary(&self, names: &[String]) -> String {
        let classified = self.classify_packages(names);

        let mut parts = Vec::new();
        if !classified.metapackage.is_empty() {
            parts.push(format!("{} metapackage(s)", classified.metapackage.len()));
        }
        if !classified.custom.is_empty() {
            parts.push(format!("{} custom package(s)", classified.custom.len()));
        }
        if !classified.system.is_empty() {
            parts.push(format!("{} system package(s)", classified.system.len()));
        }

        if parts.is_empty() {
            "No packages".to_string()
        } else {
            parts.join(", ")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> PackageClassifier {
        PackageClassifier::new(vec!["myco-".to_string(), "internal-".to_string()])
    }

    #[test]
    fn test_custom_prefix_match() {
        let c = classifier();
        assert!(c.is_custom_package("myco-tools"));
        assert!(c.is_custom_package("internal-dashboard"));
        assert!(!c.is_custom_package("libc6"));
        assert!(!c.is_custom_package("nginx"));
    }

    #[test]
    fn test_metapackage_indicators() {
        let c = classifier();
        assert!(c.is_metapackage("meta-desktop"));
        assert!(c.is_metapackage("office-suite-2024"));
        assert!(c.is_metapackage("bundle-media"));
        assert!(!c.is_metapackage("nginx"));
    }

    #[test]
    fn test_custom_metapackage_patterns() {
        let c = classifier();
        // Custom packages match the looser pattern set
        assert!(c.is_metapackage("myco-full-stack"));
        assert!(c.is_metapackage("myco-all"));
        // Non-custom names need an explicit indicator
        assert!(!c.is_metapackage("texlive-full"));
    }

    #[test]
    fn test_type_precedence() {
        let c = classifier();
        // Metapackage wins over custom
        assert_eq!(c.get_package_type("myco-meta-base"), PackageType::Metapackage);
        assert_eq!(c.get_package_type("myco-tools"), PackageType::Custom);
        assert_eq!(c.get_package_type("libc6"), PackageType::System);
    }

    #[test]
    fn test_classification_is_stable() {
        let c = classifier();
        for name in ["libc6", "myco-tools", "meta-desktop", "weird.name-1.0"] {
            let first = c.get_package_type(name);
            for _ in 0..3 {
                assert_eq!(c.get_package_type(name), first);
            }
        }
    }

    #[test]
    fn test_preservation_priority() {
        let c = classifier();
        assert!(c.should_prioritize_preservation("libc6"));
        assert!(c.should_prioritize_preservation("systemd"));
        assert!(c.should_prioritize_preservation("nginx")); // system type
        // Custom name containing a critical pattern is still preserved
        assert!(c.should_prioritize_preservation("myco-kernel-tools"));
        assert!(!c.should_prioritize_preservation("myco-tools"));
    }

    #[test]
    fn test_risk_levels() {
        let c = classifier();
        assert_eq!(c.get_removal_risk_level("libc6"), RiskLevel::High);
        assert_eq!(c.get_removal_risk_level("myco-tools"), RiskLevel::Low);
        assert_eq!(c.get_removal_risk_level("meta-desktop"), RiskLevel::Medium);
        // Unclassified non-custom, non-meta, non-critical names default to medium
        // but plain system names are preservation-prioritized, hence high
        assert_eq!(c.get_removal_risk_level("nginx"), RiskLevel::High);
        assert_eq!(c.get_removal_risk_level("myco-suite"), RiskLevel::Medium);
    }

    #[test]
    fn test_add_indicator_extends_detection() {
        let mut c = classifier();
        assert!(!c.is_metapackage("stack-web"));
        c.add_metapackage_indicator("stack-");
        assert!(c.is_metapackage("stack-web"));
        // Duplicate registration is a no-op
        c.add_metapackage_indicator("stack-");
        assert!(c.is_metapackage("stack-web"));
    }

    #[test]
    fn test_classify_and_summarize() {
        let c = classifier();
        let names: Vec<String> = ["libc6", "myco-tools", "meta-desktop"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let classified = c.classify_packages(&names);
        assert_eq!(classified.system, vec!["libc6"]);
        assert_eq!(classified.custom, vec!["myco-tools"]);
        assert_eq!(classified.metapackage, vec!["meta-desktop"]);

        let summary = c.category_summary(&names);
        assert_eq!(
            summary,
            "1 metapackage(s), 1 custom package(s), 1 system package(s)"
        );
        assert_eq!(c.category_summary(&[]), "No packages");
    }
}
