use crate::{Dimension, RuleRow};

/// The result of parsing rule-format text, before action tokens are
/// resolved and the definitions are validated.
#[derive(Debug)]
pub struct ParsedDefinitions {
    pub dimensions: Vec<Dimension>,
    pub rules: Vec<RuleRow>,
}
