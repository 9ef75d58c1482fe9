use async_trait::async_trait;
use std::sync::Mutex;

use crate::error::StoreError;
use crate::nrtm::OperationLog;
use crate::rpsl::ParsedObject;
use crate::store::MirrorStore;

/// Object texts shared by unit tests
pub mod fixtures {
    pub const ROUTE_RIPE: &str = "route:          192.0.2.0/24\n\
                                  descr:          Example route\n\
                                  origin:         AS65537\n\
                                  mnt-by:         EXAMPLE-MNT\n\
                                  source:         RIPE\n";

    pub const ROUTE_ARIN: &str = "route:          192.0.2.0/24\n\
                                  origin:         AS65537\n\
                                  mnt-by:         EXAMPLE-MNT\n\
                                  source:         ARIN\n";

    /// Key attributes only, as NRTM deletions may carry
    pub const ROUTE_KEY_ONLY: &str = "route: 192.0.2.0/24\norigin: AS65537\n";

    pub const ROUTE_BAD_PREFIX: &str = "route:          192.0.2.1/24\n\
                                        origin:         AS65537\n\
                                        mnt-by:         EXAMPLE-MNT\n\
                                        source:         RIPE\n";

    pub const ROUTE6_RIPE: &str = "route6:         2001:db8::/32\n\
                                   origin:         AS65537\n\
                                   mnt-by:         EXAMPLE-MNT\n\
                                   source:         RIPE\n";

    pub const UNKNOWN_CLASS: &str = "foobar:         EXAMPLE\nsource:         RIPE\n";
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Critical,
}

/// Operation log that keeps every message for assertions
#[derive(Debug, Default)]
pub struct RecordingLog {
    entries: Mutex<Vec<(LogLevel, String)>>,
}

impl RecordingLog {
    pub fn infos(&self) -> Vec<String> {
        self.at_level(LogLevel::Info)
    }

    pub fn criticals(&self) -> Vec<String> {
        self.at_level(LogLevel::Critical)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().expect("log entries").is_empty()
    }

    fn at_level(&self, level: LogLevel) -> Vec<String> {
        self.entries
            .lock()
            .expect("log entries")
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, message)| message.clone())
            .collect()
    }
}

impl OperationLog for RecordingLog {
    fn info(&self, message: &str) {
        self.entries
            .lock()
            .expect("log entries")
            .push((LogLevel::Info, message.to_string()));
    }

    fn critical(&self, message: &str) {
        self.entries
            .lock()
            .expect("log entries")
            .push((LogLevel::Critical, message.to_string()));
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    Upsert {
        object_class: String,
        pk: String,
        source: Option<String>,
        serial: i64,
    },
    Delete {
        object_class: String,
        pk: String,
        source: Option<String>,
        serial: i64,
    },
    RecordError {
        source: String,
        message: String,
    },
}

/// Mirror store that records calls instead of keeping state
#[derive(Debug, Default)]
pub struct RecordingStore {
    calls: Mutex<Vec<StoreCall>>,
    failing: bool,
    failing_mirror_errors: bool,
}

impl RecordingStore {
    /// A store whose every call fails as if the database were unreachable
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    /// A store that applies mutations but cannot record mirror errors
    pub fn failing_mirror_errors() -> Self {
        Self {
            failing_mirror_errors: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().expect("store calls").clone()
    }

    pub fn mutations(&self) -> Vec<StoreCall> {
        self.calls()
            .into_iter()
            .filter(|call| !matches!(call, StoreCall::RecordError { .. }))
            .collect()
    }

    /// (source, message) pairs
    pub fn mirror_errors(&self) -> Vec<(String, String)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                StoreCall::RecordError { source, message } => Some((source, message)),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: StoreCall) -> Result<(), StoreError> {
        if self.failing {
            return Err(StoreError::unavailable("connection refused"));
        }
        self.calls.lock().expect("store calls").push(call);
        Ok(())
    }
}

#[async_trait]
impl MirrorStore for RecordingStore {
    async fn upsert_rpsl_object(&self, object: &ParsedObject, serial: i64) -> Result<(), StoreError> {
        self.record(StoreCall::Upsert {
            object_class: object.object_class().to_string(),
            pk: object.pk().to_string(),
            source: object.source().map(str::to_string),
            serial,
        })
    }

    async fn delete_rpsl_object(&self, object: &ParsedObject, serial: i64) -> Result<(), StoreError> {
        self.record(StoreCall::Delete {
            object_class: object.object_class().to_string(),
            pk: object.pk().to_string(),
            source: object.source().map(str::to_string),
            serial,
        })
    }

    async fn record_mirror_error(&self, source: &str, message: &str) -> Result<(), StoreError> {
        if self.failing_mirror_errors {
            return Err(StoreError::query_error("mirror_errors is read-only"));
        }
        self.record(StoreCall::RecordError {
            source: source.to_string(),
            message: message.to_string(),
        })
    }
}
