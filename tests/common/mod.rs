#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use nrtm_mirror::nrtm::{OperationApplier, OperationLog};
use nrtm_mirror::rpsl::RpslParser;

pub const ROUTE_RIPE: &str = "route:          192.0.2.0/24\n\
                              descr:          Example route\n\
                              origin:         AS65537\n\
                              mnt-by:         EXAMPLE-MNT\n\
                              source:         RIPE\n";

pub const ROUTE_RIPE_UPDATED: &str = "route:          192.0.2.0/24\n\
                                      descr:          Example route, renumbered customer\n\
                                      origin:         AS65537\n\
                                      mnt-by:         EXAMPLE-MNT\n\
                                      source:         RIPE\n";

pub const ROUTE_ARIN: &str = "route:          192.0.2.0/24\n\
                              origin:         AS65537\n\
                              mnt-by:         EXAMPLE-MNT\n\
                              source:         ARIN\n";

pub const ROUTE_KEY_ONLY: &str = "route:          192.0.2.0/24\n\
                                  origin:         AS65537\n";

pub const ROUTE_BAD_ORIGIN: &str = "route:          192.0.2.0/24\n\
                                    origin:         65537x\n\
                                    mnt-by:         EXAMPLE-MNT\n\
                                    source:         RIPE\n";

pub const ROUTE6_RIPE: &str = "route6:         2001:db8::/32\n\
                               origin:         AS65537\n\
                               mnt-by:         EXAMPLE-MNT\n\
                               source:         RIPE\n";

pub const AUT_NUM_ARIN: &str = "aut-num:        AS65537\n\
                                as-name:        EXAMPLE-AS\n\
                                mnt-by:         EXAMPLE-MNT\n\
                                source:         ARIN\n";

pub const UNKNOWN_CLASS: &str = "foobar:         EXAMPLE\n\
                                 source:         RIPE\n";

pub const ROUTE_PK: &str = "192.0.2.0/24AS65537";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Logged {
    Info(String),
    Critical(String),
}

/// Operation log that keeps messages for assertions
#[derive(Debug, Default)]
pub struct CapturedLog {
    entries: Mutex<Vec<Logged>>,
}

impl CapturedLog {
    pub fn entries(&self) -> Vec<Logged> {
        self.entries.lock().expect("log entries").clone()
    }

    pub fn infos(&self) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter_map(|entry| match entry {
                Logged::Info(message) => Some(message),
                Logged::Critical(_) => None,
            })
            .collect()
    }
}

impl OperationLog for CapturedLog {
    fn info(&self, message: &str) {
        self.entries
            .lock()
            .expect("log entries")
            .push(Logged::Info(message.to_string()));
    }

    fn critical(&self, message: &str) {
        self.entries
            .lock()
            .expect("log entries")
            .push(Logged::Critical(message.to_string()));
    }
}

/// An applier using the RPSL parser and a captured log
pub fn applier() -> (OperationApplier, Arc<CapturedLog>) {
    let log = Arc::new(CapturedLog::default());
    let applier = OperationApplier::new(Arc::new(RpslParser), log.clone());
    (applier, log)
}
