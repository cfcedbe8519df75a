use std::fmt;

use super::value::{Value, WILDCARD};

/// One positional condition of a [`Rule`](super::Rule).
///
/// Conditions are aligned with dimensions and query values by index only.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(from = "RawCondition", into = "RawCondition")
)]
pub enum Condition {
    /// Matches any value, or any member of the aligned dimension when
    /// dimensions are configured.
    Wildcard,
    /// Matches a single value by equality.
    Literal(Value),
    /// Matches any member of a non-empty collection of values.
    Set(Vec<Value>),
}

/// A condition that matches anything (the `*` token).
#[must_use]
pub fn any() -> Condition {
    Condition::Wildcard
}

/// A condition that matches exactly `value`.
#[must_use]
pub fn is(value: impl Into<Value>) -> Condition {
    Condition::Literal(value.into())
}

/// A condition that matches any of `values`.
#[must_use]
pub fn one_of<I, V>(values: I) -> Condition
where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    Condition::Set(values.into_iter().map(Into::into).collect())
}

impl Condition {
    /// Literal equality or set membership. Wildcards admit everything here;
    /// narrowing them to a dimension is the evaluator's job.
    pub(crate) fn admits(&self, value: &str) -> bool {
        match self {
            Condition::Wildcard => true,
            Condition::Literal(v) => v.as_str() == value,
            Condition::Set(values) => values.iter().any(|v| v.as_str() == value),
        }
    }

    /// Values named by this condition.
    pub(crate) fn values(&self) -> &[Value] {
        match self {
            Condition::Wildcard => &[],
            Condition::Literal(v) => std::slice::from_ref(v),
            Condition::Set(values) => values,
        }
    }
}

/// `"*"` converts to [`Condition::Wildcard`]; any other token to a literal.
impl From<&str> for Condition {
    fn from(token: &str) -> Self {
        if token == WILDCARD {
            Condition::Wildcard
        } else {
            Condition::Literal(token.into())
        }
    }
}

impl From<Value> for Condition {
    fn from(value: Value) -> Self {
        if value.is_reserved() {
            Condition::Wildcard
        } else {
            Condition::Literal(value)
        }
    }
}

impl<const N: usize> From<[&str; N]> for Condition {
    fn from(values: [&str; N]) -> Self {
        one_of(values)
    }
}

impl From<Vec<Value>> for Condition {
    fn from(values: Vec<Value>) -> Self {
        Condition::Set(values)
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Wildcard => write!(f, "{WILDCARD}"),
            Condition::Literal(v) => write!(f, "{v}"),
            Condition::Set(values) => {
                write!(f, "[")?;
                for (i, v) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{v}")?;
                }
                write!(f, "]")
            }
        }
    }
}

/// Row form used by serde: a bare string (`"*"` or a literal) or a list.
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub(crate) enum RawCondition {
    One(Value),
    Many(Vec<Value>),
}

#[cfg(feature = "serde")]
impl From<RawCondition> for Condition {
    fn from(raw: RawCondition) -> Self {
        match raw {
            RawCondition::One(v) => v.into(),
            RawCondition::Many(values) => Condition::Set(values),
        }
    }
}

#[cfg(feature = "serde")]
impl From<Condition> for RawCondition {
    fn from(condition: Condition) -> Self {
        match condition {
            Condition::Wildcard => RawCondition::One(Value::from(WILDCARD)),
            Condition::Literal(v) => RawCondition::One(v),
            Condition::Set(values) => RawCondition::Many(values),
        }
    }
}
