// Mirror stores: where applied operations and mirror errors end up

pub mod memory;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::StoreError;
use crate::rpsl::ParsedObject;
use crate::types::OperationKind;

pub use memory::{MemoryStore, StoredObject};

/// Persistent mirror state plus its error log
///
/// Implementations must keep each call a single logical write. Callers apply
/// operations for one source in ascending serial order.
#[async_trait]
pub trait MirrorStore: Send + Sync {
    /// Insert or replace the object identified by (source, class, pk)
    async fn upsert_rpsl_object(&self, object: &ParsedObject, serial: i64) -> Result<(), StoreError>;

    /// Remove the object identified by (source, class, pk); absent objects are not an error
    async fn delete_rpsl_object(&self, object: &ParsedObject, serial: i64) -> Result<(), StoreError>;

    /// Append a mirror error for a source
    async fn record_mirror_error(&self, source: &str, message: &str) -> Result<(), StoreError>;
}

/// A recorded inconsistency for one source
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MirrorErrorRecord {
    pub source: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// One applied mutation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JournalEntry {
    pub source: String,
    pub serial: i64,
    pub operation: OperationKind,
    pub object_class: String,
    pub pk: String,
}

impl JournalEntry {
    pub fn new(object: &ParsedObject, source: &str, serial: i64, operation: OperationKind) -> Self {
        Self {
            source: source.to_string(),
            serial,
            operation,
            object_class: object.object_class().to_string(),
            pk: object.pk().to_string(),
        }
    }
}

/// Source an object is stored under; the applier only passes attributed objects
pub(crate) fn object_source(object: &ParsedObject) -> Result<&str, StoreError> {
    object.source().ok_or_else(|| {
        StoreError::query_error(format!(
            "{} object {} has no source",
            object.object_class(),
            object.pk()
        ))
    })
}
