//! The textual rule format.
//!
//! ```text
//! # comments run to the end of the line
//! dimension category: Men, Women, Kids
//! dimension size: XS, S, M, L, XL
//!
//! DENY  Men XS
//! ALLOW [Women, Kids] *
//! ```
//!
//! `dimension NAME: v1, v2, ...` declares the next dimension. Every other
//! line is a rule: an action token followed by space-separated conditions,
//! where `*` is a wildcard, `[a, b]` a set and anything else a literal.
//! Values are bare words or double-quoted strings.

mod error;
mod grammar;
mod parser;

pub use error::ParseError;
pub use parser::ParsedDefinitions;

/// Parse rule-format text into a [`ParsedDefinitions`].
///
/// Action tokens are not checked here; see
/// [`Definitions::from_rows()`](crate::Definitions::from_rows).
///
/// # Errors
///
/// Returns [`ParseError`] if the input is not valid rule-format syntax.
pub fn parse(input: &str) -> Result<ParsedDefinitions, ParseError> {
    use winnow::Parser;
    grammar::parse_definitions
        .parse(input)
        .map_err(|e| ParseError::new(e.to_string()))
}
