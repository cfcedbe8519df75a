use std::fmt;

use super::dimension::Dimension;
use super::value::Value;

/// The closest allowed alternative found for a denied query.
///
/// Returned by [`Definitions::closest_verbose()`](super::Definitions::closest_verbose).
/// Exactly one position of the original query was substituted: the one at
/// [`dimension_index()`](Self::dimension_index).
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct Alternative<'a> {
    dimension: &'a Dimension,
    dimension_index: usize,
    value: Value,
    conditions: Vec<Value>,
}

impl<'a> Alternative<'a> {
    pub(crate) fn new(
        dimension: &'a Dimension,
        dimension_index: usize,
        value: Value,
        conditions: Vec<Value>,
    ) -> Self {
        Self {
            dimension,
            dimension_index,
            value,
            conditions,
        }
    }

    /// The dimension whose value was substituted.
    #[must_use]
    pub fn dimension(&self) -> &'a Dimension {
        self.dimension
    }

    #[must_use]
    pub fn dimension_index(&self) -> usize {
        self.dimension_index
    }

    /// The substituted value.
    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// The full query with the substitution applied.
    #[must_use]
    pub fn conditions(&self) -> &[Value] {
        &self.conditions
    }

    #[must_use]
    pub fn into_value(self) -> Value {
        self.value
    }

    #[must_use]
    pub fn into_conditions(self) -> Vec<Value> {
        self.conditions
    }
}

impl fmt::Display for Alternative<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} = {} (index {}) -> [",
            self.dimension.name(),
            self.value,
            self.dimension_index
        )?;
        for (i, v) in self.conditions.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{v}")?;
        }
        write!(f, "]")
    }
}
