// src/commands/install.rs

//! Install a package with resolution and conflict handling.

use anyhow::Result;
use dpm::conflict::display_operation_result;
use dpm::Config;
use tracing::info;

pub fn cmd_install(config_path: &str, package: &str, force: bool, yes: bool) -> Result<()> {
    let config = Config::load(config_path)?;
    info!("Installing {} (force={})", package, force);

    let mut engine = super::system_engine(config, yes);
    let result = engine.install_package(package, force);
    display_operation_result(&result);

    if result.success {
        Ok(())
    } else {
        Err(anyhow::anyhow!("installation of '{}' failed", package))
    }
}
