// src/main.rs

use anyhow::Result;
use clap::{Parser, Subcommand};
use dpm::DEFAULT_CONFIG_PATH;

mod commands;
use commands::ConfigAction;

#[derive(Parser)]
#[command(name = "dpm")]
#[command(author, version, about = "Debian package operations with a custom-package safety policy", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH, global = true)]
    config: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Install a package with dependency resolution and conflict handling
    Install {
        /// Package name
        package: String,
        /// Proceed despite validation issues
        #[arg(short, long)]
        force: bool,
        /// Answer yes to all confirmations
        #[arg(short, long)]
        yes: bool,
    },
    /// Remove a package, subject to the safety policy
    Remove {
        /// Package name
        package: String,
        /// Push retained conflicts through explicitly
        #[arg(short, long)]
        force: bool,
        /// Answer yes to all confirmations
        #[arg(short, long)]
        yes: bool,
    },
    /// Show the resolution plan for a package without executing it
    Plan {
        /// Package name
        package: String,
    },
    /// Show package information and classification
    Info {
        /// Package name
        package: String,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Install {
            package,
            force,
            yes,
        }) => commands::cmd_install(&cli.config, &package, force, yes),
        Some(Commands::Remove {
            package,
            force,
            yes,
        }) => commands::cmd_remove(&cli.config, &package, force, yes),
        Some(Commands::Plan { package }) => commands::cmd_plan(&cli.config, &package),
        Some(Commands::Info { package }) => commands::cmd_info(&cli.config, &package),
        Some(Commands::Config { action }) => commands::cmd_config(&cli.config, action),
        None => {
            println!("dpm v{}", env!("CARGO_PKG_VERSION"));
            println!("Run 'dpm --help' for usage information");
            Ok(())
        }
    }
}
