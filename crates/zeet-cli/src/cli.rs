//! Command-line arguments

use std::path::PathBuf;

use clap::Parser;

/// ZEET - Efficient Exam Terminal
#[derive(Parser, Debug)]
#[command(name = "zeet", version, about)]
pub struct Cli {
    /// Settings file (defaults to the user config dir, zeet/config.toml)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Text typed out on the splash screen
    #[arg(long)]
    pub text: Option<String>,

    /// User name shown in the boot greeting
    #[arg(long)]
    pub user: Option<String>,

    /// Skip the boot progress bar
    #[arg(long)]
    pub no_boot: bool,

    /// Upper bound for the boot progress bar, in seconds
    #[arg(long, value_name = "SECS")]
    pub boot_secs: Option<f64>,

    /// Show a frames-per-second readout on the splash
    #[arg(long)]
    pub fps: bool,

    /// Write logs here instead of the default data dir location
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Debug-level logging
    #[arg(short, long)]
    pub verbose: bool,
}
