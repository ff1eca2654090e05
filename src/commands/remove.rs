// src/commands/remove.rs

//! Remove a package, subject to the safety policy.

use anyhow::Result;
use dpm::conflict::display_operation_result;
use dpm::Config;
use tracing::info;

pub fn cmd_remove(config_path: &str, package: &str, force: bool, yes: bool) -> Result<()> {
    let config = Config::load(config_path)?;
    info!("Removing {} (force={})", package, force);

    let mut engine = super::system_engine(config, yes);
    let result = engine.remove_package(package, force);
    display_operation_result(&result);

    if result.success {
        Ok(())
    } else {
        Err(anyhow::anyhow!("removal of '{}' failed", package))
    }
}
