use std::{net::SocketAddr, path::PathBuf};

use clap::Parser;

/// Clinical Clarity training backend
#[derive(Debug, Parser)]
#[command(name = "clarity", about = "Scenario, scoring, and transcription backend for clinical communication training")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "clarity.toml", env = "CLARITY_CONFIG")]
    pub config: PathBuf,

    /// Override the listen address
    #[arg(long, env = "CLARITY_LISTEN")]
    pub listen: Option<SocketAddr>,

    /// Validate the configuration and exit
    #[arg(long)]
    pub check: bool,
}
