use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "mpick", about = concat!("mpick v", env!("CARGO_PKG_VERSION"), " - pick several items from a list"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Config file (default: mpick.toml found by walking up from the current directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Candidates file (.json or .toml), or - to read `key<TAB>display` lines from stdin
    #[arg(long, global = true, value_name = "FILE")]
    pub items: Option<String>,

    /// Initially selected key (repeatable or comma-separated; replaces [picker] selected)
    #[arg(long, global = true, value_name = "KEY", value_delimiter = ',')]
    pub select: Vec<String>,

    /// Wrap badge and list navigation at the ends
    #[arg(long = "loop", global = true)]
    pub loop_nav: bool,

    /// Right-to-left layout: mirror the arrow keys
    #[arg(long, global = true)]
    pub rtl: bool,

    /// Placeholder shown in the empty input
    #[arg(long, global = true)]
    pub placeholder: Option<String>,

    /// Write logs to this file (also: MPICK_LOG)
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List candidates matching a query
    Filter(FilterArgs),
    /// Run a key script without a terminal and print the final state
    Replay(ReplayArgs),
}

#[derive(Args)]
pub struct FilterArgs {
    /// Case-insensitive substring of the display text (empty matches all)
    #[arg(default_value = "")]
    pub query: String,
}

#[derive(Args)]
pub struct ReplayArgs {
    /// Script tokens, e.g. `type:an enter left backspace`
    #[arg(required = true, value_name = "STEP")]
    pub script: Vec<String>,
}
