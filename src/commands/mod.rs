// src/commands/mod.rs

//! CLI command implementations.

mod config;
mod info;
mod install;
mod plan;
mod remove;

pub use config::{cmd_config, ConfigAction};
pub use info::cmd_info;
pub use install::cmd_install;
pub use plan::cmd_plan;
pub use remove::cmd_remove;

use dpm::{AptExecutor, AptQuery, AutoConfirm, Config, ConsolePrompt, PackageEngine};

/// Build an engine wired to the host package tools.
///
/// `assume_yes` swaps the console prompt for an auto-answer stub, for
/// scripted use.
pub(crate) fn system_engine(config: Config, assume_yes: bool) -> PackageEngine {
    let prompt: Box<dyn dpm::Confirmation> = if assume_yes {
        Box::new(AutoConfirm::new(true))
    } else {
        Box::new(ConsolePrompt::new())
    };
    PackageEngine::new(
        config,
        Box::new(AptQuery::new()),
        Box::new(AptExecutor::new()),
        prompt,
    )
}
