use serde::Serialize;
use std::collections::BTreeMap;

use crate::rpsl::messages::ValidationMessages;

/// An RPSL object as produced by an [`ObjectParser`](crate::rpsl::ObjectParser)
///
/// `parsed_data` holds the normalised values (key attributes canonicalised,
/// `source` upper-cased), `attributes` keeps the attribute lines in text order.
/// Objects with validation errors are still returned so they can be reported.
#[derive(Debug, Clone, Serialize)]
pub struct ParsedObject {
    object_class: String,
    pk: String,
    attributes: Vec<(String, String)>,
    parsed_data: BTreeMap<String, Vec<String>>,
    #[serde(skip)]
    object_text: String,
    pub messages: ValidationMessages,
}

impl ParsedObject {
    pub(crate) fn new(
        object_class: String,
        pk: String,
        attributes: Vec<(String, String)>,
        parsed_data: BTreeMap<String, Vec<String>>,
        object_text: String,
        messages: ValidationMessages,
    ) -> Self {
        Self {
            object_class,
            pk,
            attributes,
            parsed_data,
            object_text,
            messages,
        }
    }

    pub fn object_class(&self) -> &str {
        &self.object_class
    }

    /// Primary key, derivable from the key attributes alone
    pub fn pk(&self) -> &str {
        &self.pk
    }

    /// First value of an attribute
    pub fn get(&self, attribute: &str) -> Option<&str> {
        self.parsed_data
            .get(attribute)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    pub fn source(&self) -> Option<&str> {
        self.get("source")
    }

    /// Attribute lines in text order, values as written
    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    pub fn parsed_data(&self) -> &BTreeMap<String, Vec<String>> {
        &self.parsed_data
    }

    pub fn object_text(&self) -> &str {
        &self.object_text
    }
}
