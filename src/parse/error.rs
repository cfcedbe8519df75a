use thiserror::Error;

/// Errors produced when parsing rule-format text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("parse error: {message}")]
pub struct ParseError {
    message: String,
}

impl ParseError {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The parser's description of where and why the input was rejected.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}
