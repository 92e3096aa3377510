use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "keel",
    about = "Keel - content hashes, identifiers, timestamps, and on-disk persistence",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// TOML file with disk store settings
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compute the 64-byte content digest of a file or stdin
    Hash(HashArgs),
    /// Generate random identifiers
    Uuid(UuidArgs),
    /// Print the current UTC timestamp
    Timestamp,
    /// Base64-encode or decode a file or stdin
    B64(B64Args),
    /// Write stdin to a file
    Save(SaveArgs),
    /// Write a file to stdout
    Cat(CatArgs),
}

#[derive(Args)]
pub struct HashArgs {
    /// Input file; reads stdin when omitted
    pub file: Option<PathBuf>,
    /// Print the digest as hex instead of base64
    #[arg(long)]
    pub hex: bool,
}

#[derive(Args)]
pub struct UuidArgs {
    #[arg(short = 'n', long, default_value = "1")]
    pub count: usize,
}

#[derive(Args)]
pub struct B64Args {
    /// Input file; reads stdin when omitted
    pub file: Option<PathBuf>,
    #[arg(short, long)]
    pub decode: bool,
}

#[derive(Args)]
pub struct SaveArgs {
    pub file: PathBuf,
}

#[derive(Args)]
pub struct CatArgs {
    pub file: PathBuf,
}
