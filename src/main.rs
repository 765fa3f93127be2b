//! Tablet Variant Manager - catalogue browser and installer for
//! tablet-driver configuration variants.
//!
//! This binary is the thin front end over the library: it turns selections
//! into repository queries and install calls, and renders results as prose.
//! All the invariants live in the library; nothing here touches the
//! filesystem directly.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use tablet_variant_manager::config::Config;
use tablet_variant_manager::constants::APP_BINARY_NAME;
use tablet_variant_manager::services::{Installer, VariantRepository};

/// Tablet Variant Manager - browse and install tablet configuration variants
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the variant catalogue root (overrides the settings file)
    #[arg(long, value_name = "DIR")]
    source: Option<PathBuf>,

    /// Driver configuration directory to install into (overrides the settings file)
    #[arg(long, value_name = "DIR")]
    dest: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List manufacturers in the catalogue
    Manufacturers,
    /// List devices of a manufacturer
    Devices {
        /// Manufacturer name, as listed by `manufacturers`
        manufacturer: String,
    },
    /// List variants of a device, stock entry first
    Variants {
        /// Manufacturer name
        manufacturer: String,
        /// Device name, as listed by `devices`
        device: String,
    },
    /// Print a variant's configuration document
    Show {
        /// Manufacturer name
        manufacturer: String,
        /// Device name
        device: String,
        /// Variant display name, as listed by `variants`
        variant: String,
    },
    /// Install a variant into the driver's configuration directory
    Install {
        /// Manufacturer name
        manufacturer: String,
        /// Device name
        device: String,
        /// Variant display name; the "<device> Stock" entry removes the override
        variant: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // A broken settings file should not block read-only browsing.
    let config = Config::load().unwrap_or_else(|_| Config::default());

    let Some(source_dir) = cli.source.clone().or_else(|| config.paths.source_dir.clone())
    else {
        eprintln!("Error: no catalogue source directory configured.");
        eprintln!();
        eprintln!("Pass one explicitly:");
        eprintln!("  {} --source /path/to/Configurations manufacturers", APP_BINARY_NAME);
        eprintln!();
        eprintln!("or set source_dir in the settings file:");
        if let Ok(path) = Config::config_file_path() {
            eprintln!("  {}", path.display());
        }
        std::process::exit(1);
    };

    let repository = VariantRepository::open(&source_dir).with_context(|| {
        format!("Failed to scan the catalogue at {}", source_dir.display())
    })?;

    match cli.command {
        Command::Manufacturers => {
            for name in repository.manufacturers() {
                println!("{name}");
            }
        }
        Command::Devices { manufacturer } => {
            for name in repository.devices(&manufacturer)? {
                println!("{name}");
            }
        }
        Command::Variants {
            manufacturer,
            device,
        } => {
            for name in repository.variants(&manufacturer, &device)? {
                println!("{name}");
            }
        }
        Command::Show {
            manufacturer,
            device,
            variant,
        } => match repository.resolve_configuration(&manufacturer, &device, &variant)? {
            Some(configuration) => {
                let json = serde_json::to_string_pretty(configuration)
                    .context("Failed to render the configuration document")?;
                println!("{json}");
            }
            None => {
                println!("\"{variant}\" is the stock variant; it has no configuration document.");
            }
        },
        Command::Install {
            manufacturer,
            device,
            variant,
        } => {
            let destination = cli
                .dest
                .or(config.paths.destination_root)
                .unwrap_or_default();

            let installer = Installer::new(&repository);
            let outcome = installer.install(&manufacturer, &device, &variant, &destination)?;

            if let Some(backup) = &outcome.backup {
                println!("Previous configuration backed up to {}", backup.display());
            }
            match &outcome.written {
                Some(path) => println!("Installed \"{variant}\" to {}", path.display()),
                None => println!(
                    "Stock selected; {device} now has no override. The driver will use its built-in configuration."
                ),
            }
        }
    }

    Ok(())
}
