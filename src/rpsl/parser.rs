use std::collections::BTreeMap;
use std::net::{Ipv4Addr, Ipv6Addr};
use thiserror::Error;

use crate::rpsl::classes::{ObjectClass, ValueKind};
use crate::rpsl::messages::ValidationMessages;
use crate::rpsl::object::ParsedObject;

/// Parser failures
///
/// Recognised but malformed objects are not failures: they come back as a
/// [`ParsedObject`] carrying error messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown object class: {0}")]
    UnknownObjectClass(String),
}

impl ParseError {
    /// The object class named in the text
    pub fn object_class(&self) -> &str {
        match self {
            ParseError::UnknownObjectClass(class) => class,
        }
    }
}

/// Turns raw object text into a [`ParsedObject`]
pub trait ObjectParser: Send + Sync {
    /// `default_source` is used as the `source` attribute when the text has none.
    fn parse(
        &self,
        text: &str,
        strict: bool,
        default_source: Option<&str>,
    ) -> Result<ParsedObject, ParseError>;
}

/// RPSL parser for the object classes listed in [`OBJECT_CLASSES`](crate::rpsl::OBJECT_CLASSES)
#[derive(Debug, Clone, Copy, Default)]
pub struct RpslParser;

impl ObjectParser for RpslParser {
    fn parse(
        &self,
        text: &str,
        strict: bool,
        default_source: Option<&str>,
    ) -> Result<ParsedObject, ParseError> {
        let first_line = text.lines().next().unwrap_or_default();
        let class_name = first_line
            .split(':')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        let class = ObjectClass::find(&class_name)
            .ok_or_else(|| ParseError::UnknownObjectClass(class_name.clone()))?;

        let mut messages = ValidationMessages::new();
        let attributes = extract_attributes(text, &mut messages);

        let mut parsed_data: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (name, value) in &attributes {
            parsed_data
                .entry(name.clone())
                .or_default()
                .push(value.clone());
        }

        let pk = derive_primary_key(class, &mut parsed_data, &mut messages);

        match parsed_data.get_mut("source").and_then(|values| values.first_mut()) {
            Some(source) => {
                *source = source.to_ascii_uppercase();
                if !is_source_name(source) {
                    messages.error(format!("Invalid source name \"{}\"", source));
                }
            }
            None => {
                if let Some(default_source) = default_source {
                    parsed_data.insert("source".to_string(), vec![default_source.to_ascii_uppercase()]);
                }
            }
        }

        for attribute in class.mandatory {
            if !parsed_data.contains_key(*attribute) {
                let message = format!(
                    "Mandatory attribute \"{}\" on object {} is missing",
                    attribute, class.name
                );
                // Without a source the object cannot be attributed, strict or not
                if strict || *attribute == "source" {
                    messages.error(message);
                } else {
                    messages.warning(message);
                }
            }
        }

        if strict {
            for (name, values) in &parsed_data {
                if !class.knows_attribute(name) {
                    messages.error(format!(
                        "Unrecognised attribute \"{}\" on object {}",
                        name, class.name
                    ));
                } else if values.len() > 1 && (class.is_key_attribute(name) || name == "source") {
                    messages.error(format!(
                        "Attribute \"{}\" on object {} occurs multiple times",
                        name, class.name
                    ));
                }
            }
        }

        Ok(ParsedObject::new(
            class.name.to_string(),
            pk,
            attributes,
            parsed_data,
            text.to_string(),
            messages,
        ))
    }
}

/// Split object text into (name, value) pairs, folding continuation lines
fn extract_attributes(text: &str, messages: &mut ValidationMessages) -> Vec<(String, String)> {
    let mut attributes: Vec<(String, String)> = Vec::new();

    for (index, line) in text.lines().enumerate() {
        let line_number = index + 1;
        if line.trim().is_empty() {
            continue;
        }

        if line.starts_with([' ', '\t', '+']) {
            let Some((_, value)) = attributes.last_mut() else {
                messages.error(format!(
                    "Line {}: continuation line without preceding attribute",
                    line_number
                ));
                continue;
            };
            let continuation = strip_comment(line.strip_prefix('+').unwrap_or(line)).trim();
            if !continuation.is_empty() {
                if !value.is_empty() {
                    value.push(' ');
                }
                value.push_str(continuation);
            }
            continue;
        }

        match line.split_once(':') {
            Some((name, value)) if is_attribute_name(name.trim()) => {
                attributes.push((
                    name.trim().to_ascii_lowercase(),
                    strip_comment(value).trim().to_string(),
                ));
            }
            _ => messages.error(format!(
                "Line {}: line is neither continuation nor attribute",
                line_number
            )),
        }
    }

    attributes
}

/// Normalise the key attributes in place and concatenate them into the primary key
fn derive_primary_key(
    class: &ObjectClass,
    parsed_data: &mut BTreeMap<String, Vec<String>>,
    messages: &mut ValidationMessages,
) -> String {
    let mut pk = String::new();

    for (attribute, kind) in class.key {
        let Some(value) = parsed_data.get_mut(*attribute).and_then(|values| values.first_mut()) else {
            messages.error(format!(
                "Primary key attribute \"{}\" on object {} is missing",
                attribute, class.name
            ));
            continue;
        };

        match normalize(*kind, value) {
            Ok(normalized) => {
                if normalized != *value {
                    messages.info(format!(
                        "Value \"{}\" for attribute \"{}\" was reformatted as \"{}\"",
                        value, attribute, normalized
                    ));
                }
                *value = normalized;
                pk.push_str(value);
            }
            Err(reason) => {
                messages.error(format!(
                    "Invalid value \"{}\" for attribute \"{}\": {}",
                    value, attribute, reason
                ));
                pk.push_str(&value.to_ascii_uppercase());
            }
        }
    }

    pk
}

fn normalize(kind: ValueKind, value: &str) -> Result<String, String> {
    let value = value.trim();
    if value.is_empty() {
        return Err("empty value".to_string());
    }

    match kind {
        ValueKind::Ipv4Prefix => {
            let (address, length) = split_prefix(value)?;
            let address: Ipv4Addr = address
                .parse()
                .map_err(|_| format!("invalid IPv4 address {}", address))?;
            if length > 32 {
                return Err(format!("prefix length {} exceeds 32", length));
            }
            let host_mask = u32::MAX.checked_shr(u32::from(length)).unwrap_or(0);
            if u32::from(address) & host_mask != 0 {
                return Err("host bits set beyond prefix length".to_string());
            }
            Ok(format!("{}/{}", address, length))
        }
        ValueKind::Ipv6Prefix => {
            let (address, length) = split_prefix(value)?;
            let address: Ipv6Addr = address
                .parse()
                .map_err(|_| format!("invalid IPv6 address {}", address))?;
            if length > 128 {
                return Err(format!("prefix length {} exceeds 128", length));
            }
            let host_mask = u128::MAX.checked_shr(u32::from(length)).unwrap_or(0);
            if u128::from(address) & host_mask != 0 {
                return Err("host bits set beyond prefix length".to_string());
            }
            Ok(format!("{}/{}", address, length))
        }
        ValueKind::Ipv4Range => {
            let (first, last) = value
                .split_once('-')
                .ok_or_else(|| "expected an address range".to_string())?;
            let first: Ipv4Addr = first
                .trim()
                .parse()
                .map_err(|_| format!("invalid IPv4 address {}", first.trim()))?;
            let last: Ipv4Addr = last
                .trim()
                .parse()
                .map_err(|_| format!("invalid IPv4 address {}", last.trim()))?;
            if first > last {
                return Err("range start is after range end".to_string());
            }
            Ok(format!("{} - {}", first, last))
        }
        ValueKind::AsNumber => Ok(format!("AS{}", parse_as_number(value)?)),
        ValueKind::AsBlock => {
            let (first, last) = value
                .split_once('-')
                .ok_or_else(|| "expected an AS number range".to_string())?;
            let first = parse_as_number(first.trim())?;
            let last = parse_as_number(last.trim())?;
            if first > last {
                return Err("range start is after range end".to_string());
            }
            Ok(format!("AS{} - AS{}", first, last))
        }
        ValueKind::SetName => {
            let upper = value.to_ascii_uppercase();
            let valid = upper.split(':').all(|component| {
                !component.is_empty()
                    && component
                        .chars()
                        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
            });
            if !valid {
                return Err("invalid set name".to_string());
            }
            Ok(upper)
        }
        ValueKind::Handle => {
            if value.chars().any(char::is_whitespace) {
                return Err("contains whitespace".to_string());
            }
            Ok(value.to_ascii_uppercase())
        }
    }
}

fn split_prefix(value: &str) -> Result<(&str, u8), String> {
    let (address, length) = value
        .split_once('/')
        .ok_or_else(|| "missing prefix length".to_string())?;
    let length = length
        .trim()
        .parse::<u8>()
        .map_err(|_| format!("invalid prefix length {}", length.trim()))?;
    Ok((address.trim(), length))
}

fn parse_as_number(value: &str) -> Result<u32, String> {
    let upper = value.to_ascii_uppercase();
    let digits = upper
        .strip_prefix("AS")
        .ok_or_else(|| format!("{} does not start with AS", value))?;
    digits
        .parse::<u32>()
        .map_err(|_| format!("invalid AS number {}", value))
}

fn strip_comment(value: &str) -> &str {
    match value.find('#') {
        Some(index) => &value[..index],
        None => value,
    }
}

fn is_attribute_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

fn is_source_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROUTE: &str = "route:          192.0.2.0/24\n\
                         descr:          Example route\n\
                         origin:         as65537\n\
                         mnt-by:         EXAMPLE-MNT\n\
                         source:         ripe";

    fn parse(text: &str) -> ParsedObject {
        RpslParser.parse(text, false, None).unwrap()
    }

    #[test]
    fn parses_route_and_derives_primary_key() {
        let obj = parse(ROUTE);

        assert_eq!(obj.object_class(), "route");
        assert_eq!(obj.pk(), "192.0.2.0/24AS65537");
        assert_eq!(obj.get("origin"), Some("AS65537"));
        assert_eq!(obj.source(), Some("RIPE"));
        assert_eq!(obj.get("descr"), Some("Example route"));
        assert!(!obj.messages.has_errors(), "{:?}", obj.messages);
        assert!(obj.messages.warnings().is_empty());
        assert_eq!(
            obj.messages.infos(),
            vec!["Value \"as65537\" for attribute \"origin\" was reformatted as \"AS65537\""]
        );
    }

    #[test]
    fn unknown_class_is_a_parse_error() {
        let err = RpslParser.parse("foobar: x\nsource: RIPE", false, None).unwrap_err();
        assert_eq!(err, ParseError::UnknownObjectClass("foobar".to_string()));
        assert_eq!(err.to_string(), "unknown object class: foobar");
    }

    #[test]
    fn folds_continuation_lines_and_strips_comments() {
        let text = "as-set: AS-EXAMPLE\n\
                    members: AS65537, # first\n \
                    AS65538\n\
                    +\n\
                    \tAS65539\n\
                    mnt-by: EXAMPLE-MNT\n\
                    source: RIPE";
        let obj = parse(text);

        assert_eq!(obj.pk(), "AS-EXAMPLE");
        assert_eq!(obj.get("members"), Some("AS65537, AS65538 AS65539"));
        assert!(!obj.messages.has_errors());
    }

    #[test]
    fn missing_primary_key_attribute_is_an_error() {
        let obj = parse("route: 192.0.2.0/24\nmnt-by: EXAMPLE-MNT\nsource: RIPE");
        assert_eq!(
            obj.messages.errors(),
            vec!["Primary key attribute \"origin\" on object route is missing"]
        );
    }

    #[test]
    fn rejects_host_bits_in_prefix() {
        let obj = parse("route6: 2001:db8::1/32\norigin: AS65537\nmnt-by: EXAMPLE-MNT\nsource: RIPE");
        assert!(obj.messages.has_errors());
        assert!(obj.messages.errors()[0].contains("host bits"));
    }

    #[test]
    fn canonicalises_ipv6_prefix() {
        let obj = parse("route6: 2001:DB8:0::/32\norigin: AS65537\nmnt-by: EXAMPLE-MNT\nsource: RIPE");
        assert_eq!(obj.pk(), "2001:db8::/32AS65537");
        assert_eq!(obj.messages.infos().len(), 1);
    }

    #[test]
    fn default_source_fills_missing_source_only() {
        let partial = RpslParser
            .parse("route: 192.0.2.0/24\norigin: AS65537", false, Some("ripe"))
            .unwrap();
        assert_eq!(partial.source(), Some("RIPE"));
        assert_eq!(partial.pk(), "192.0.2.0/24AS65537");
        assert!(!partial.messages.has_errors());

        let explicit = RpslParser.parse(ROUTE, false, Some("ARIN")).unwrap();
        assert_eq!(explicit.source(), Some("RIPE"));
    }

    #[test]
    fn missing_mandatory_attribute_is_a_warning_unless_strict() {
        let text = "route: 192.0.2.0/24\norigin: AS65537\nsource: RIPE";

        let relaxed = RpslParser.parse(text, false, None).unwrap();
        assert!(!relaxed.messages.has_errors());
        assert_eq!(relaxed.messages.warnings().len(), 1);

        let strict = RpslParser.parse(text, true, None).unwrap();
        assert_eq!(
            strict.messages.errors(),
            vec!["Mandatory attribute \"mnt-by\" on object route is missing"]
        );
    }

    #[test]
    fn missing_source_is_an_error_without_default() {
        let obj = parse("route: 192.0.2.0/24\norigin: AS65537\nmnt-by: EXAMPLE-MNT");
        assert_eq!(
            obj.messages.errors(),
            vec!["Mandatory attribute \"source\" on object route is missing"]
        );
        assert_eq!(obj.source(), None);
    }

    #[test]
    fn unknown_attributes_only_fail_strict_parsing() {
        let text = format!("{}\nfavourite-colour: blue", ROUTE);
        assert!(!RpslParser.parse(&text, false, None).unwrap().messages.has_errors());
        assert!(RpslParser.parse(&text, true, None).unwrap().messages.has_errors());
    }

    #[test]
    fn reports_malformed_lines() {
        let obj = parse("mntner: EXAMPLE-MNT\nthis line has no colon\nsource: RIPE");
        assert!(obj
            .messages
            .errors()
            .contains(&"Line 2: line is neither continuation nor attribute"));
    }

    #[test]
    fn invalid_source_name_is_an_error() {
        let obj = parse("mntner: EXAMPLE-MNT\nsource: RI PE");
        assert!(obj.messages.errors().iter().any(|e| e.contains("Invalid source name")));
    }

    #[test]
    fn person_primary_key_is_nic_handle() {
        let obj = parse("person: Jane Example\nnic-hdl: je1-ripe\nsource: RIPE");
        assert_eq!(obj.pk(), "JE1-RIPE");
    }
}
