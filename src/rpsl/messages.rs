use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationMessage {
    pub level: MessageLevel,
    pub text: String,
}

/// Messages collected while parsing and validating an object
///
/// The text of each message is an opaque diagnostic; callers report it,
/// they never interpret it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationMessages {
    messages: Vec<ValidationMessage>,
}

impl ValidationMessages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.push(MessageLevel::Error, text.into());
    }

    pub fn warning(&mut self, text: impl Into<String>) {
        self.push(MessageLevel::Warning, text.into());
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.push(MessageLevel::Info, text.into());
    }

    pub fn errors(&self) -> Vec<&str> {
        self.at_level(MessageLevel::Error)
    }

    pub fn warnings(&self) -> Vec<&str> {
        self.at_level(MessageLevel::Warning)
    }

    pub fn infos(&self) -> Vec<&str> {
        self.at_level(MessageLevel::Info)
    }

    pub fn has_errors(&self) -> bool {
        self.messages.iter().any(|m| m.level == MessageLevel::Error)
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationMessage> {
        self.messages.iter()
    }

    fn push(&mut self, level: MessageLevel, text: String) {
        self.messages.push(ValidationMessage { level, text });
    }

    fn at_level(&self, level: MessageLevel) -> Vec<&str> {
        self.messages
            .iter()
            .filter(|m| m.level == level)
            .map(|m| m.text.as_str())
            .collect()
    }
}
