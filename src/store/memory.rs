use async_trait::async_trait;
use chrono::Utc;
use serde::Serialize;
use std::collections::BTreeMap;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::StoreError;
use crate::rpsl::ParsedObject;
use crate::store::{object_source, JournalEntry, MirrorErrorRecord, MirrorStore};
use crate::types::OperationKind;

/// (source, object class, primary key)
type ObjectKey = (String, String, String);

#[derive(Debug, Clone, Serialize)]
pub struct StoredObject {
    pub object: ParsedObject,
    pub serial: i64,
}

#[derive(Debug, Default)]
struct MemoryState {
    objects: BTreeMap<ObjectKey, StoredObject>,
    journal: Vec<JournalEntry>,
    errors: Vec<MirrorErrorRecord>,
}

/// In-process mirror store, used by the CLI's dry runs and by tests
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, source: &str, object_class: &str, pk: &str) -> Option<StoredObject> {
        let key = (source.to_string(), object_class.to_string(), pk.to_string());
        self.state.read().await.objects.get(&key).cloned()
    }

    pub async fn object_count(&self) -> usize {
        self.state.read().await.objects.len()
    }

    /// Applied mutations in the order they happened
    pub async fn journal(&self) -> Vec<JournalEntry> {
        self.state.read().await.journal.clone()
    }

    /// Mirror errors recorded for one source, oldest first
    pub async fn mirror_errors(&self, source: &str) -> Vec<MirrorErrorRecord> {
        self.state
            .read()
            .await
            .errors
            .iter()
            .filter(|record| record.source == source)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl MirrorStore for MemoryStore {
    async fn upsert_rpsl_object(&self, object: &ParsedObject, serial: i64) -> Result<(), StoreError> {
        let source = object_source(object)?;
        let key = (
            source.to_string(),
            object.object_class().to_string(),
            object.pk().to_string(),
        );

        let mut state = self.state.write().await;
        state.objects.insert(
            key,
            StoredObject {
                object: object.clone(),
                serial,
            },
        );
        state
            .journal
            .push(JournalEntry::new(object, source, serial, OperationKind::AddOrUpdate));

        debug!("Upserted {} {} from {} at serial {}", object.object_class(), object.pk(), source, serial);
        Ok(())
    }

    async fn delete_rpsl_object(&self, object: &ParsedObject, serial: i64) -> Result<(), StoreError> {
        let source = object_source(object)?;
        let key = (
            source.to_string(),
            object.object_class().to_string(),
            object.pk().to_string(),
        );

        let mut state = self.state.write().await;
        if state.objects.remove(&key).is_some() {
            state
                .journal
                .push(JournalEntry::new(object, source, serial, OperationKind::Delete));
            debug!("Deleted {} {} from {} at serial {}", object.object_class(), object.pk(), source, serial);
        } else {
            debug!("Delete of absent {} {} from {} at serial {}", object.object_class(), object.pk(), source, serial);
        }
        Ok(())
    }

    async fn record_mirror_error(&self, source: &str, message: &str) -> Result<(), StoreError> {
        self.state.write().await.errors.push(MirrorErrorRecord {
            source: source.to_string(),
            message: message.to_string(),
            created_at: Utc::now(),
        });
        Ok(())
    }
}
