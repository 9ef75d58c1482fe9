use std::fmt;

use crate::types::OperationKind;

/// A single ADD or DEL entry from an NRTM stream, with its serial and source
///
/// The object text may be incomplete for deletions: only the primary key
/// attributes are needed, and the source is taken from the stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NrtmOperation {
    source: String,
    kind: OperationKind,
    serial: i64,
    object_text: String,
    object_class_filter: Option<Vec<String>>,
}

impl NrtmOperation {
    /// `source` is upper-cased and filter entries lower-cased; an empty filter admits every class.
    pub fn new(
        source: impl Into<String>,
        kind: OperationKind,
        serial: i64,
        object_text: impl Into<String>,
        object_class_filter: Option<Vec<String>>,
    ) -> Self {
        let object_class_filter = object_class_filter
            .map(|classes| {
                classes
                    .iter()
                    .map(|class| class.trim().to_ascii_lowercase())
                    .filter(|class| !class.is_empty())
                    .collect::<Vec<_>>()
            })
            .filter(|classes| !classes.is_empty());

        Self {
            source: source.into().trim().to_ascii_uppercase(),
            kind,
            serial,
            object_text: object_text.into(),
            object_class_filter,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    pub fn serial(&self) -> i64 {
        self.serial
    }

    pub fn object_text(&self) -> &str {
        &self.object_text
    }

    pub fn object_class_filter(&self) -> Option<&[String]> {
        self.object_class_filter.as_deref()
    }

    /// Whether the class filter lets this object class through
    pub fn admits_class(&self, object_class: &str) -> bool {
        match &self.object_class_filter {
            Some(classes) => {
                let object_class = object_class.to_ascii_lowercase();
                classes.iter().any(|class| *class == object_class)
            }
            None => true,
        }
    }
}

impl fmt::Display for NrtmOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.source, self.serial, self.kind)
    }
}
