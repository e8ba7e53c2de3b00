use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "mindex",
    about = "Maven index record codec: compact and expand index chunk records",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory that input and output names resolve against
    #[arg(long, global = true)]
    pub base_dir: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compact typed records into chunk-native maps
    Compact(CompactArgs),
    /// Expand chunk-native maps back into typed records
    Expand(ExpandArgs),
    /// Print the effective configuration
    ShowConfig,
}

#[derive(Args)]
pub struct CompactArgs {
    /// JSON array of records
    pub input: String,
    #[arg(short, long)]
    pub output: Option<String>,
    /// Reject artifact records without group id, artifact id or version
    #[arg(long)]
    pub strict: bool,
}

#[derive(Args)]
pub struct ExpandArgs {
    /// JSON array of encoded maps
    pub input: String,
    #[arg(short, long)]
    pub output: Option<String>,
}
