mod internal;
mod types;
mod utils;

use crate::internal::add_targets::add_targets;
use crate::internal::patch_all::patch_all_apps;
use crate::internal::rollback::{rollback_all, rollback_interactive};
use crate::internal::session_patch::session_patch_interactive;
use crate::types::SessionFamily;
use crate::types::settings::PatcherSettings;
use crate::utils::gpu::has_nvidia_dgpu;
use crate::utils::privilege::is_root;
use anyhow::{Result, bail};
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[clap(author, version, about = "Force PRIME render offload for desktop launchers", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Debug, Subcommand)]
enum CliCommand {
    /// Patch explicit .desktop paths, or search by keyword and pick interactively
    #[command(alias = "a")]
    Add {
        #[arg(required = true, value_name = "QUERY_OR_PATH")]
        targets: Vec<String>,
    },
    /// Patch every known application launcher in the search directories
    All,
    /// Interactively patch desktop session files (no query lists them all)
    Desktop {
        query: Option<String>,
        /// Only patch sessions of this desktop family
        #[arg(long, value_enum)]
        family: Option<FamilyArg>,
    },
    /// Remove the offload prefix again; without a query everything is rolled back
    #[command(alias = "r")]
    Rollback { query: Option<String> },
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum FamilyArg {
    Gnome,
    Kde,
}

impl From<FamilyArg> for SessionFamily {
    fn from(family: FamilyArg) -> Self {
        match family {
            FamilyArg::Gnome => SessionFamily::Gnome,
            FamilyArg::Kde => SessionFamily::Kde,
        }
    }
}

/// Patching touches files under /usr/share and only makes sense with an
/// offload-capable GPU; rollback deliberately skips both gates.
fn ensure_patching_allowed() -> Result<()> {
    if !is_root() {
        bail!("Root privileges are required to edit system .desktop files.");
    }
    if !has_nvidia_dgpu() {
        bail!("No NVIDIA dGPU or driver detected, nothing was modified.");
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Cli::parse();
    let settings = PatcherSettings::default();

    match args.command {
        CliCommand::Rollback { query } => match query.as_deref() {
            None => {
                rollback_all(&settings)?;
            }
            Some(query) => {
                let count = rollback_interactive(query, &settings)?;
                println!("Rolled back {count} target(s).");
            }
        },
        CliCommand::Add { targets } => {
            ensure_patching_allowed()?;
            add_targets(&targets, &settings)?;
        }
        CliCommand::All => {
            ensure_patching_allowed()?;
            let count = patch_all_apps(&settings)?;
            println!("Patched {count} application launcher(s).");
        }
        CliCommand::Desktop { query, family } => {
            ensure_patching_allowed()?;
            session_patch_interactive(query.as_deref(), family.map(Into::into), &settings)?;
        }
    }

    Ok(())
}
