use sqlx::PgPool;
use tracing::info;

use crate::error::StoreError;

/// Mirror tables, created idempotently
const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS rpsl_objects (
        source TEXT NOT NULL,
        object_class TEXT NOT NULL,
        pk TEXT NOT NULL,
        object_text TEXT NOT NULL,
        parsed_data JSONB NOT NULL,
        serial BIGINT NOT NULL,
        updated TIMESTAMPTZ NOT NULL DEFAULT now(),
        PRIMARY KEY (source, object_class, pk)
    )",
    "CREATE TABLE IF NOT EXISTS rpsl_database_journal (
        id BIGSERIAL PRIMARY KEY,
        source TEXT NOT NULL,
        serial BIGINT NOT NULL,
        operation TEXT NOT NULL,
        object_class TEXT NOT NULL,
        pk TEXT NOT NULL,
        object_text TEXT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )",
    "CREATE INDEX IF NOT EXISTS rpsl_database_journal_source_serial
        ON rpsl_database_journal (source, serial)",
    "CREATE TABLE IF NOT EXISTS mirror_errors (
        id BIGSERIAL PRIMARY KEY,
        source TEXT NOT NULL,
        message TEXT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )",
    "CREATE INDEX IF NOT EXISTS mirror_errors_source_created
        ON mirror_errors (source, created_at DESC)",
];

pub async fn migrate(pool: &PgPool) -> Result<(), StoreError> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }
    info!("Mirror schema is up to date ({} statements)", SCHEMA.len());
    Ok(())
}
