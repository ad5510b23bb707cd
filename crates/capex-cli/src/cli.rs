use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "capex",
    about = "Capex chaincode: local development host",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// World state file (overrides the config file)
    #[arg(long, global = true)]
    pub state: Option<PathBuf>,

    /// Host configuration file (TOML)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Write the five seed records
    InitLedger,
    /// Create (or overwrite) a record
    Create(CreateArgs),
    /// Show one record
    Query(QueryArgs),
    /// Show every record
    QueryAll,
    /// Replace the MRU field of a record
    Change(ChangeArgs),
    /// Call a contract function by name with raw string arguments
    Invoke(InvokeArgs),
    /// Describe the contract's functions
    Metadata,
}

#[derive(Args)]
pub struct CreateArgs {
    pub id: String,
    pub bu: String,
    pub cocd: String,
    pub docno: String,
    pub mru: String,
}

#[derive(Args)]
pub struct QueryArgs {
    pub id: String,
}

#[derive(Args)]
pub struct ChangeArgs {
    pub id: String,
    pub new_mru: String,
}

#[derive(Args)]
pub struct InvokeArgs {
    pub function: String,
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}
