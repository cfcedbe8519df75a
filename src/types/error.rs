use thiserror::Error;

/// Errors raised when rules, dimensions or queries are unusable.
///
/// All of them are raised before any result is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("no rules defined; at least one rule is required to check a query")]
    EmptyRuleSet,

    #[error("no query values given; at least one value is required")]
    EmptyQuery,

    #[error("unknown action {action} in rule \"{rule}\" at index {index}")]
    UnknownAction {
        action: String,
        rule: String,
        index: usize,
    },

    #[error("no dimensions defined; alternative search requires at least one dimension")]
    NoDimensions,

    #[error("dimension '{dimension}' has no values")]
    EmptyDimension { dimension: String },

    #[error("duplicate value '{value}' in dimension '{dimension}'")]
    DuplicateValue { dimension: String, value: String },

    #[error("duplicate dimension name '{dimension}'")]
    DuplicateDimension { dimension: String },

    #[error("reserved wildcard token '*' used as a value in {location}")]
    ReservedValue { location: String },

    #[error("empty value set at position {position} of rule {index}")]
    EmptySet { index: usize, position: usize },
}
