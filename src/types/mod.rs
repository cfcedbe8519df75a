mod alternative;
mod condition;
mod definitions;
mod dimension;
mod error;
mod rule;
mod value;
mod verdict;

pub use alternative::Alternative;
pub use condition::{Condition, any, is, one_of};
pub use definitions::{Definitions, DefinitionsBuilder};
pub use dimension::Dimension;
pub use error::ConfigurationError;
pub use rule::{Action, Rule, RuleRow, UnknownActionToken};
pub use value::{Value, WILDCARD};
pub use verdict::Verdict;
