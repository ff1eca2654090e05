// src/exec/apt.rs

//! apt-get backed execution.

use super::PackageOps;
use crate::error::{Error, Result};
use std::process::Command;
use tracing::{debug, info};

/// Runs installs and removals through `apt-get`.
#[derive(Debug, Clone, Default)]
pub struct AptExecutor;

impl AptExecutor {
    pub fn new() -> Self {
        Self
    }

    fn run_apt_get(args: &[&str]) -> Result<bool> {
        debug!("Running apt-get {}", args.join(" "));

        let output = Command::new("apt-get")
            .args(args)
            .output()
            .map_err(|e| Error::CommandFailed(format!("failed to run apt-get: {e}")))?;

        if !output.status.success() {
            debug!(
                "apt-get {} failed: {}",
                args.first().unwrap_or(&""),
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        Ok(output.status.success())
    }
}

impl PackageOps for AptExecutor {
    fn install(&mut self, name: &str, version: Option<&str>) -> Result<bool> {
        let spec = match version {
            Some(version) if !version.is_empty() => format!("{name}={version}"),
            _ => name.to_string(),
        };
        info!("Installing {}", spec);
        Self::run_apt_get(&["install", "-y", &spec])
    }

    fn remove(&mut self, name: &str, force: bool) -> Result<bool> {
        info!("Removing {}", name);
        if force {
            // Forced resolution plans push retained conflicts through
            // explicitly; downgrades may be part of the displacement
            Self::run_apt_get(&["remove", "-y", "--allow-downgrades", name])
        } else {
            Self::run_apt_get(&["remove", "-y", name])
        }
    }

    fn upgrade(&mut self, name: &str) -> Result<bool> {
        info!("Upgrading {}", name);
        Self::run_apt_get(&["install", "-y", "--only-upgrade", name])
    }
}
