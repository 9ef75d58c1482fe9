pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "nrtm-mirror")]
#[command(about = "NRTM mirror client - apply mirrored RPSL operations to a local registry mirror")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Validate and apply a single NRTM operation")]
    Apply(commands::apply::ApplyArgs),

    #[command(about = "Parse an RPSL object and show its key, attributes and messages")]
    Parse(commands::parse::ParseArgs),

    #[command(about = "Mirror database management")]
    Db {
        #[command(subcommand)]
        cmd: commands::db::DbCommands,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command {
        Commands::Apply(args) => commands::apply::handle(args, output_format).await,
        Commands::Parse(args) => commands::parse::handle(args, output_format),
        Commands::Db { cmd } => commands::db::handle(cmd, output_format).await,
    }
}
