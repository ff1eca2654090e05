// src/commands/info.rs

//! Display package information and classification.

use anyhow::Result;
use dpm::{AptQuery, Config, PackageClassifier, PackageQuery};

pub fn cmd_info(config_path: &str, package: &str) -> Result<()> {
    let config = Config::load(config_path)?;
    let classifier = PackageClassifier::from_config(&config);
    let query = AptQuery::new();

    println!("Package information: {package}");
    println!("{}", "-".repeat(40));

    match query.get_package_info(package) {
        Some(info) => {
            println!("Version: {}", if info.version.is_empty() { "-" } else { &info.version });
            println!("Status: {}", info.status);
        }
        None => println!("Not known to the package universe"),
    }

    println!("Type: {}", classifier.get_package_type(package));
    println!(
        "Custom package: {}",
        if classifier.is_custom_package(package) { "yes" } else { "no" }
    );
    println!(
        "Metapackage: {}",
        if classifier.is_metapackage(package) { "yes" } else { "no" }
    );
    println!("Removal risk: {}", classifier.get_removal_risk_level(package));
    println!(
        "Removable under policy: {}",
        if config.can_remove_package(package) { "yes" } else { "no" }
    );

    let dependencies = query.get_dependencies(package);
    if !dependencies.is_empty() {
        println!("\nDirect dependencies ({}):", dependencies.len());
        for dep in dependencies.iter().take(10) {
            println!("  - {} ({})", dep.name, classifier.get_package_type(&dep.name));
        }
        if dependencies.len() > 10 {
            println!("  ... and {} more", dependencies.len() - 10);
        }
    }

    Ok(())
}
