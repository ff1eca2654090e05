// src/commands/plan.rs

//! Show the resolution plan for a package without executing it.

use anyhow::Result;
use dpm::Config;

pub fn cmd_plan(config_path: &str, package: &str) -> Result<()> {
    let config = Config::load(config_path)?;
    let mut engine = super::system_engine(config, true);

    let (plan, validation, summary) = engine.plan_installation(package);

    println!("Resolution plan for {package}:");
    println!("  {summary}");

    if !plan.to_install.is_empty() {
        println!("\nTo install ({}):", plan.to_install.len());
        for pkg in &plan.to_install {
            println!("  + {pkg}");
        }
    }
    if !plan.to_upgrade.is_empty() {
        println!("\nTo upgrade ({}):", plan.to_upgrade.len());
        for pkg in &plan.to_upgrade {
            println!("  ^ {pkg}");
        }
    }
    if !plan.to_remove.is_empty() {
        println!("\nTo remove ({}):", plan.to_remove.len());
        for pkg in &plan.to_remove {
            println!("  - {pkg}");
        }
    }
    if plan.has_conflicts() {
        println!("\nConflicts ({}):", plan.conflicts.len());
        for conflict in &plan.conflicts {
            println!("  ! {conflict}");
        }
    }

    if validation.is_valid() {
        println!("\nPlan is valid.");
    } else {
        println!("\nPlan has issues:");
        for issue in &validation.issues {
            println!("  ! {issue}");
        }
    }

    Ok(())
}
