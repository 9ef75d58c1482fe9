use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::debug;

use crate::config::DatabaseConfig;
use crate::database::manager::DatabaseManager;
use crate::database::models::MirrorErrorRow;
use crate::error::StoreError;
use crate::rpsl::ParsedObject;
use crate::store::{object_source, MirrorErrorRecord, MirrorStore};
use crate::types::OperationKind;

/// Mirror store backed by PostgreSQL
///
/// Each mutation and its journal row commit in one transaction.
#[derive(Clone)]
pub struct PgMirrorStore {
    pool: PgPool,
}

impl PgMirrorStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StoreError> {
        Ok(Self::new(DatabaseManager::connect(config).await?))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Most recent mirror errors for a source, newest first
    pub async fn mirror_errors(&self, source: &str, limit: i64) -> Result<Vec<MirrorErrorRecord>, StoreError> {
        let rows = sqlx::query_as::<_, MirrorErrorRow>(
            "SELECT id, source, message, created_at
             FROM mirror_errors
             WHERE source = $1
             ORDER BY created_at DESC, id DESC
             LIMIT $2",
        )
        .bind(source)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(MirrorErrorRecord::from).collect())
    }

    async fn journal(
        tx: &mut Transaction<'_, Postgres>,
        object: &ParsedObject,
        source: &str,
        serial: i64,
        operation: OperationKind,
    ) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO rpsl_database_journal (source, serial, operation, object_class, pk, object_text)
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(source)
        .bind(serial)
        .bind(operation.as_str())
        .bind(object.object_class())
        .bind(object.pk())
        .bind(object.object_text())
        .execute(&mut **tx)
        .await?;
        Ok(())
    }
}

#[async_trait]
impl MirrorStore for PgMirrorStore {
    async fn upsert_rpsl_object(&self, object: &ParsedObject, serial: i64) -> Result<(), StoreError> {
        let source = object_source(object)?;
        let parsed_data = serde_json::to_value(object.parsed_data())
            .map_err(|e| StoreError::query_error(e.to_string()))?;

        let mut tx = self.pool.begin().await?;
        sqlx::query(
            "INSERT INTO rpsl_objects (source, object_class, pk, object_text, parsed_data, serial, updated)
             VALUES ($1, $2, $3, $4, $5, $6, now())
             ON CONFLICT (source, object_class, pk) DO UPDATE
             SET object_text = EXCLUDED.object_text,
                 parsed_data = EXCLUDED.parsed_data,
                 serial = EXCLUDED.serial,
                 updated = now()",
        )
        .bind(source)
        .bind(object.object_class())
        .bind(object.pk())
        .bind(object.object_text())
        .bind(parsed_data)
        .bind(serial)
        .execute(&mut *tx)
        .await?;

        Self::journal(&mut tx, object, source, serial, OperationKind::AddOrUpdate).await?;
        tx.commit().await?;

        debug!("Upserted {} {} from {} at serial {}", object.object_class(), object.pk(), source, serial);
        Ok(())
    }

    async fn delete_rpsl_object(&self, object: &ParsedObject, serial: i64) -> Result<(), StoreError> {
        let source = object_source(object)?;

        let mut tx = self.pool.begin().await?;
        let result = sqlx::query(
            "DELETE FROM rpsl_objects WHERE source = $1 AND object_class = $2 AND pk = $3",
        )
        .bind(source)
        .bind(object.object_class())
        .bind(object.pk())
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() > 0 {
            Self::journal(&mut tx, object, source, serial, OperationKind::Delete).await?;
            debug!("Deleted {} {} from {} at serial {}", object.object_class(), object.pk(), source, serial);
        } else {
            debug!("Delete of absent {} {} from {} at serial {}", object.object_class(), object.pk(), source, serial);
        }
        tx.commit().await?;
        Ok(())
    }

    async fn record_mirror_error(&self, source: &str, message: &str) -> Result<(), StoreError> {
        sqlx::query("INSERT INTO mirror_errors (source, message) VALUES ($1, $2)")
            .bind(source)
            .bind(message)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
