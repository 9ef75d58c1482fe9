use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::store::MirrorErrorRecord;

#[derive(Debug, Clone, FromRow)]
pub struct MirrorErrorRow {
    pub id: i64,
    pub source: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl From<MirrorErrorRow> for MirrorErrorRecord {
    fn from(row: MirrorErrorRow) -> Self {
        Self {
            source: row.source,
            message: row.message,
            created_at: row.created_at,
        }
    }
}
