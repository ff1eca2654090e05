// src/commands/config.rs

//! Configuration management commands.

use anyhow::Result;
use clap::Subcommand;
use dpm::Config;

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the current configuration
    Show,
    /// Add a custom package prefix
    AddPrefix { prefix: String },
    /// Remove a custom package prefix
    RemovePrefix { prefix: String },
    /// Mark a package as explicitly removable
    AddRemovable { package: String },
    /// Drop a package from the removable list
    RemoveRemovable { package: String },
    /// Pin a package to a version for offline mode
    Pin { package: String, version: String },
    /// Remove a version pin
    Unpin { package: String },
    /// Enable or disable offline mode
    Offline {
        #[arg(value_parser = ["on", "off"])]
        state: String,
    },
}

pub fn cmd_config(config_path: &str, action: ConfigAction) -> Result<()> {
    let mut config = Config::load(config_path)?;

    match action {
        ConfigAction::Show => {
            println!("Custom prefixes:");
            for prefix in config.custom_prefixes() {
                println!("  - {prefix}");
            }
            println!("\nRemovable packages:");
            if config.removable_packages().is_empty() {
                println!("  (none)");
            }
            for package in config.removable_packages() {
                println!("  - {package}");
            }
            println!("\nPinned versions:");
            if config.pinned_versions().is_empty() {
                println!("  (none)");
            }
            for (package, version) in config.pinned_versions() {
                println!("  - {package} = {version}");
            }
            println!(
                "\nOffline mode: {}",
                if config.is_offline_mode() { "on" } else { "off" }
            );
            return Ok(());
        }
        ConfigAction::AddPrefix { prefix } => {
            config.add_custom_prefix(&prefix);
            println!("Added custom prefix '{prefix}'");
        }
        ConfigAction::RemovePrefix { prefix } => {
            if config.remove_custom_prefix(&prefix) {
                println!("Removed custom prefix '{prefix}'");
            } else {
                println!("Prefix '{prefix}' was not configured");
            }
        }
        ConfigAction::AddRemovable { package } => {
            config.add_removable_package(&package)?;
            println!("Marked '{package}' as removable");
        }
        ConfigAction::RemoveRemovable { package } => {
            if config.remove_removable_package(&package) {
                println!("Dropped '{package}' from the removable list");
            } else {
                println!("'{package}' was not in the removable list");
            }
        }
        ConfigAction::Pin { package, version } => {
            config.set_pinned_version(&package, &version);
            println!("Pinned '{package}' to version {version}");
        }
        ConfigAction::Unpin { package } => {
            if config.remove_pinned_version(&package) {
                println!("Unpinned '{package}'");
            } else {
                println!("'{package}' was not pinned");
            }
        }
        ConfigAction::Offline { state } => {
            let offline = state == "on";
            config.set_offline_mode(offline);
            println!(
                "Offline mode {}",
                if offline { "enabled - using pinned versions" } else { "disabled" }
            );
        }
    }

    config.save()?;
    Ok(())
}
