//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use super::commands::get::GetArgs;
use super::commands::init::InitArgs;
use super::commands::set::SetArgs;
use super::commands::show::ShowArgs;

#[derive(Parser, Debug)]
#[command(name = "exactonline-store")]
#[command(about = "Inspect and maintain Exact Online OAuth session storage", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Configuration file (defaults to .exactonline/config.yaml)
    #[arg(short, long, global = true, env = "EXACTONLINE_STORE_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the database, seed the key rows and provision endpoint URLs
    Init(InitArgs),

    /// Print the value stored under one key
    Get(GetArgs),

    /// Update a settable key (tokens, expiry, division, iteration limit)
    Set(SetArgs),

    /// Print every stored key and whether client credentials are configured
    Show(ShowArgs),
}
