/// Shared types used across the codebase

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Mirror operations carried by an NRTM stream
/// Used by both the operation applier and the store journals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    AddOrUpdate,
    Delete,
}

impl OperationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::AddOrUpdate => "add_or_update",
            OperationKind::Delete => "delete",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown operation kind: {0}")]
pub struct UnknownOperationKind(pub String);

impl FromStr for OperationKind {
    type Err = UnknownOperationKind;

    /// Accepts the stored names as well as the NRTM stream keywords ADD/DEL
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "add_or_update" | "add" => Ok(OperationKind::AddOrUpdate),
            "delete" | "del" => Ok(OperationKind::Delete),
            _ => Err(UnknownOperationKind(s.to_string())),
        }
    }
}
