use clap::{Args, ValueEnum};
use serde_json::json;
use std::path::PathBuf;

use crate::cli::utils::{output_success, read_object_text};
use crate::cli::OutputFormat;
use crate::config::config;
use crate::database::PgMirrorStore;
use crate::nrtm::{NrtmOperation, OperationApplier};
use crate::store::{MemoryStore, MirrorErrorRecord};
use crate::types::OperationKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StoreKind {
    /// Throwaway in-memory mirror (dry run)
    Memory,
    /// PostgreSQL mirror from DATABASE_URL
    Postgres,
}

#[derive(Args)]
pub struct ApplyArgs {
    #[arg(long, help = "Source (registry) the stream belongs to")]
    pub source: String,

    #[arg(long, help = "Serial of the operation in the source's stream")]
    pub serial: i64,

    #[arg(long, help = "Operation: ADD / add_or_update or DEL / delete")]
    pub operation: OperationKind,

    #[arg(long, help = "File with the object text (reads stdin when omitted)")]
    pub file: Option<PathBuf>,

    #[arg(long, value_delimiter = ',', help = "Only mirror these object classes")]
    pub object_class_filter: Option<Vec<String>>,

    #[arg(long, value_enum, default_value_t = StoreKind::Memory, help = "Mirror store to apply to")]
    pub store: StoreKind,
}

pub async fn handle(args: ApplyArgs, output_format: OutputFormat) -> anyhow::Result<()> {
    let config = config();
    let object_text = read_object_text(args.file.as_deref())?;
    let object_class_filter = args
        .object_class_filter
        .or_else(|| config.mirror.object_class_filter.clone());

    let operation = NrtmOperation::new(
        args.source,
        args.operation,
        args.serial,
        object_text,
        object_class_filter,
    );
    let applier = OperationApplier::default().with_completed_log(config.mirror.log_completed_operations);

    let (applied, mirror_errors) = match args.store {
        StoreKind::Memory => {
            let store = MemoryStore::new();
            let applied = applier.apply(&operation, &store).await?;
            (applied, store.mirror_errors(operation.source()).await)
        }
        StoreKind::Postgres => {
            let store = PgMirrorStore::connect(&config.database).await?;
            // Recorded errors stay in the database; `db errors` lists them
            (applier.apply(&operation, &store).await?, Vec::new())
        }
    };

    report(&output_format, &operation, applied, &mirror_errors)
}

fn report(
    output_format: &OutputFormat,
    operation: &NrtmOperation,
    applied: bool,
    mirror_errors: &[MirrorErrorRecord],
) -> anyhow::Result<()> {
    let message = if applied {
        format!("Applied NRTM operation {}", operation)
    } else {
        format!("Discarded NRTM operation {}", operation)
    };

    output_success(
        output_format,
        &message,
        Some(json!({
            "operation": operation.to_string(),
            "applied": applied,
            "mirror_errors": mirror_errors,
        })),
    )?;

    if matches!(output_format, OutputFormat::Text) {
        for error in mirror_errors {
            println!("  mirror error ({}): {}", error.source, error.message);
        }
    }
    Ok(())
}
