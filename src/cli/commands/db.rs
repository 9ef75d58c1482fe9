use clap::Subcommand;
use serde_json::json;

use crate::cli::utils::{output_empty_collection, output_success};
use crate::cli::OutputFormat;
use crate::config::config;
use crate::database::{schema, DatabaseManager, PgMirrorStore};

#[derive(Subcommand)]
pub enum DbCommands {
    #[command(about = "Create the mirror tables if they do not exist")]
    Migrate,

    #[command(about = "Check database connectivity")]
    Health,

    #[command(about = "List recorded mirror errors for a source")]
    Errors {
        #[arg(long, help = "Source to list errors for")]
        source: String,
        #[arg(long, default_value_t = 20, help = "Maximum number of errors")]
        limit: i64,
    },
}

pub async fn handle(cmd: DbCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let store = PgMirrorStore::connect(&config().database).await?;

    match cmd {
        DbCommands::Migrate => {
            schema::migrate(store.pool()).await?;
            output_success(&output_format, "Mirror schema is up to date", None)
        }
        DbCommands::Health => {
            DatabaseManager::health_check(store.pool()).await?;
            output_success(&output_format, "Database is reachable", None)
        }
        DbCommands::Errors { source, limit } => {
            let source = source.to_ascii_uppercase();
            let errors = store.mirror_errors(&source, limit).await?;
            if errors.is_empty() {
                return output_empty_collection(
                    &output_format,
                    "mirror_errors",
                    &format!("No mirror errors recorded for {}", source),
                );
            }

            match output_format {
                OutputFormat::Json => output_success(
                    &output_format,
                    &format!("{} mirror errors for {}", errors.len(), source),
                    Some(json!({ "mirror_errors": errors })),
                ),
                OutputFormat::Text => {
                    for error in &errors {
                        println!("{}  {}", error.created_at.to_rfc3339(), error.message);
                    }
                    Ok(())
                }
            }
        }
    }
}
