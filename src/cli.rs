//! Command-line interface for the script engine.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Top-level CLI entry point for the install-script engine.
#[derive(Parser, Debug)]
#[command(
    name = "iscript",
    about = "Execution engine for ira package install scripts",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available subcommands, one per operation mode.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Execute a script's install section against an installation root
    Install(InstallOpts),
    /// Execute a script's remove section against an installation root
    Remove(RemoveOpts),
    /// Execute a script's update section against an installation root
    Update(UpdateOpts),
}

/// Options for the `install` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct InstallOpts {
    /// Path to the install script
    #[arg(long)]
    pub script: PathBuf,

    /// Installation root (must exist)
    #[arg(long)]
    pub root: PathBuf,

    /// Package source directory (must exist)
    #[arg(long)]
    pub source: PathBuf,
}

/// Options for the `remove` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct RemoveOpts {
    /// Path to the install script
    #[arg(long)]
    pub script: PathBuf,

    /// Installation root (must exist)
    #[arg(long)]
    pub root: PathBuf,
}

/// Options for the `update` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct UpdateOpts {
    /// Path to the install script
    #[arg(long)]
    pub script: PathBuf,

    /// Installation root (must exist)
    #[arg(long)]
    pub root: PathBuf,

    /// Old package source directory (must exist)
    #[arg(long)]
    pub source: PathBuf,
}
