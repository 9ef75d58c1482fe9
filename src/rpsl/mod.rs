// RPSL object parsing: text to ParsedObject, with validation messages

pub mod classes;
pub mod messages;
pub mod object;
pub mod parser;

pub use classes::{ObjectClass, ValueKind, OBJECT_CLASSES};
pub use messages::{MessageLevel, ValidationMessage, ValidationMessages};
pub use object::ParsedObject;
pub use parser::{ObjectParser, ParseError, RpslParser};
