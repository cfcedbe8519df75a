use winnow::ascii::{line_ending, till_line_ending};
use winnow::combinator::{alt, cut_err, eof, opt, preceded, repeat, separated};
use winnow::error::{ModalResult, StrContext, StrContextValue};
use winnow::prelude::*;
use winnow::token::{any, take_while};

use crate::{Condition, Dimension, RuleRow, Value};

use super::parser::ParsedDefinitions;

const DIMENSION_KEYWORD: &str = "dimension";

// -- Whitespace & comments --------------------------------------------------

/// Spaces and tabs only; newlines separate statements.
fn sp(input: &mut &str) -> ModalResult<()> {
    take_while(0.., [' ', '\t']).void().parse_next(input)
}

fn sp1(input: &mut &str) -> ModalResult<()> {
    take_while(1.., [' ', '\t']).void().parse_next(input)
}

fn comment(input: &mut &str) -> ModalResult<()> {
    ('#', till_line_ending).void().parse_next(input)
}

fn end_of_line(input: &mut &str) -> ModalResult<()> {
    (sp, opt(comment), alt((line_ending.void(), eof.void())))
        .void()
        .parse_next(input)
}

fn blank_lines(input: &mut &str) -> ModalResult<()> {
    let _: () = repeat(0.., (sp, opt(comment), line_ending).void()).parse_next(input)?;
    Ok(())
}

// -- Values -----------------------------------------------------------------

fn bare_word<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_while(1.., |c: char| {
        c.is_alphanumeric() || matches!(c, '_' | '.' | '-')
    })
    .parse_next(input)
}

fn string_literal(input: &mut &str) -> ModalResult<String> {
    '"'.parse_next(input)?;
    let mut s = String::new();
    loop {
        let ch = any.parse_next(input)?;
        match ch {
            '"' => return Ok(s),
            '\\' => {
                let esc = any.parse_next(input)?;
                match esc {
                    '"' => s.push('"'),
                    '\\' => s.push('\\'),
                    'n' => s.push('\n'),
                    't' => s.push('\t'),
                    other => {
                        s.push('\\');
                        s.push(other);
                    }
                }
            }
            c => s.push(c),
        }
    }
}

fn value(input: &mut &str) -> ModalResult<Value> {
    alt((string_literal.map(Value::from), bare_word.map(Value::from)))
        .context(StrContext::Expected(StrContextValue::Description("value")))
        .parse_next(input)
}

fn value_list(input: &mut &str) -> ModalResult<Vec<Value>> {
    separated(0.., value, (sp, ',', sp)).parse_next(input)
}

// -- Conditions -------------------------------------------------------------

fn value_set(input: &mut &str) -> ModalResult<Condition> {
    '['.parse_next(input)?;
    sp.parse_next(input)?;
    let values = cut_err(value_list).parse_next(input)?;
    sp.parse_next(input)?;
    cut_err(']')
        .context(StrContext::Expected(StrContextValue::CharLiteral(']')))
        .parse_next(input)?;
    Ok(Condition::Set(values))
}

fn condition(input: &mut &str) -> ModalResult<Condition> {
    alt((
        '*'.value(Condition::Wildcard),
        value_set,
        value.map(Condition::Literal),
    ))
    .context(StrContext::Expected(StrContextValue::Description(
        "condition",
    )))
    .parse_next(input)
}

// -- Statements -------------------------------------------------------------

enum Statement {
    Dimension(Dimension),
    Rule(RuleRow),
}

fn dimension_body(input: &mut &str) -> ModalResult<Dimension> {
    sp1.parse_next(input)?;
    let name = value
        .context(StrContext::Expected(StrContextValue::Description(
            "dimension name",
        )))
        .parse_next(input)?;
    sp.parse_next(input)?;
    ':'.context(StrContext::Expected(StrContextValue::CharLiteral(':')))
        .parse_next(input)?;
    sp.parse_next(input)?;
    let values = value_list.parse_next(input)?;
    Ok(Dimension::new(name.into_string(), values))
}

fn rule_body(action: Value, input: &mut &str) -> ModalResult<RuleRow> {
    let conditions: Vec<Condition> = repeat(0.., preceded(sp1, condition)).parse_next(input)?;
    Ok(RuleRow {
        action: action.into_string(),
        conditions,
    })
}

fn statement(input: &mut &str) -> ModalResult<Statement> {
    let head = value
        .context(StrContext::Expected(StrContextValue::Description(
            "action or dimension declaration",
        )))
        .parse_next(input)?;

    let stmt = if head == DIMENSION_KEYWORD {
        cut_err(dimension_body)
            .map(Statement::Dimension)
            .parse_next(input)?
    } else {
        Statement::Rule(rule_body(head, input)?)
    };

    cut_err(end_of_line)
        .context(StrContext::Expected(StrContextValue::Description(
            "end of line",
        )))
        .parse_next(input)?;
    Ok(stmt)
}

// -- Top-level parser -------------------------------------------------------

pub fn parse_definitions(input: &mut &str) -> ModalResult<ParsedDefinitions> {
    let mut dimensions = Vec::new();
    let mut rules = Vec::new();

    loop {
        blank_lines.parse_next(input)?;
        (sp, opt(comment)).void().parse_next(input)?;
        if input.is_empty() {
            break;
        }
        match cut_err(statement).parse_next(input)? {
            Statement::Dimension(d) => dimensions.push(d),
            Statement::Rule(r) => rules.push(r),
        }
    }

    Ok(ParsedDefinitions { dimensions, rules })
}

#[cfg(test)]
mod tests {
    use crate::parse::parse;
    use crate::{any, is, one_of};

    #[test]
    fn parse_dimension() {
        let result = parse("dimension size: XS, S, M").unwrap();
        assert_eq!(result.dimensions.len(), 1);
        assert_eq!(result.dimensions[0].name(), "size");
        assert_eq!(result.dimensions[0].values(), ["XS", "S", "M"]);
        assert!(result.rules.is_empty());
    }

    #[test]
    fn parse_rule_row() {
        let result = parse("DENY Men * XS").unwrap();
        assert_eq!(result.rules.len(), 1);
        assert_eq!(result.rules[0].action, "DENY");
        assert_eq!(result.rules[0].conditions, vec![is("Men"), any(), is("XS")]);
    }

    #[test]
    fn parse_value_set() {
        let result = parse("ALLOW [Women, Men] * * [Green,White]").unwrap();
        assert_eq!(
            result.rules[0].conditions,
            vec![one_of(["Women", "Men"]), any(), any(), one_of(["Green", "White"])]
        );
    }

    #[test]
    fn parse_empty_set() {
        let result = parse("ALLOW []").unwrap();
        assert_eq!(result.rules[0].conditions, vec![one_of(Vec::<&str>::new())]);
    }

    #[test]
    fn parse_rule_without_conditions() {
        let result = parse("deny").unwrap();
        assert_eq!(result.rules[0].action, "deny");
        assert!(result.rules[0].conditions.is_empty());
    }

    #[test]
    fn unknown_action_is_kept_as_token() {
        let result = parse("LET *").unwrap();
        assert_eq!(result.rules[0].action, "LET");
    }

    #[test]
    fn parse_quoted_values() {
        let result = parse(r#"ALLOW "dark blue" "a\"b\\c""#).unwrap();
        assert_eq!(
            result.rules[0].conditions,
            vec![is("dark blue"), is("a\"b\\c")]
        );
    }

    #[test]
    fn quoted_star_is_a_literal() {
        let result = parse(r#"ALLOW "*""#).unwrap();
        assert_eq!(result.rules[0].conditions, vec![is("*")]);
    }

    #[test]
    fn parse_comments_and_blank_lines() {
        let input = "# header\n\ndimension d: a, b # trailing\n   \n# middle\nALLOW a # why\n# end";
        let result = parse(input).unwrap();
        assert_eq!(result.dimensions.len(), 1);
        assert_eq!(result.dimensions[0].values(), ["a", "b"]);
        assert_eq!(result.rules.len(), 1);
        assert_eq!(result.rules[0].conditions, vec![is("a")]);
    }

    #[test]
    fn parse_keeps_statement_order() {
        let input = "dimension a: x\nALLOW x\ndimension b: y\nDENY x y\n";
        let result = parse(input).unwrap();
        assert_eq!(result.dimensions[0].name(), "a");
        assert_eq!(result.dimensions[1].name(), "b");
        assert_eq!(result.rules[0].action, "ALLOW");
        assert_eq!(result.rules[1].action, "DENY");
    }

    #[test]
    fn parse_crlf_line_endings() {
        let result = parse("dimension d: a, b\r\nALLOW a\r\n").unwrap();
        assert_eq!(result.dimensions.len(), 1);
        assert_eq!(result.rules.len(), 1);
    }

    #[test]
    fn parse_empty_input() {
        let result = parse("").unwrap();
        assert!(result.dimensions.is_empty());
        assert!(result.rules.is_empty());
    }

    #[test]
    fn unclosed_set_is_an_error() {
        assert!(parse("ALLOW [a, b").is_err());
    }

    #[test]
    fn dimension_without_colon_is_an_error() {
        assert!(parse("dimension size XS, S").is_err());
    }

    #[test]
    fn stray_punctuation_is_an_error() {
        assert!(parse("ALLOW a ; b").is_err());
    }
}
