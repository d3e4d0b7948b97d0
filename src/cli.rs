//! Command-line argument parsing for modman.

use clap::Parser;
use std::path::PathBuf;

/// An interactive console manager for moving mods between active and
/// inactive folders.
#[derive(Parser, Debug)]
#[command(name = "modman")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Profile to enter on startup (by name)
    #[arg(short = 'p', long, value_name = "NAME")]
    pub profile: Option<String>,

    /// Directory holding the profile records (overrides the config file)
    #[arg(long, value_name = "PATH", env = "MODMAN_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Config file path
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

impl Cli {
    /// Parses command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
