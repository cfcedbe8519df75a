use std::collections::HashSet;
use std::fmt;

use super::alternative::Alternative;
use super::condition::Condition;
use super::dimension::Dimension;
use super::error::ConfigurationError;
use super::rule::{Action, Rule, RuleRow};
use super::value::Value;
use super::verdict::Verdict;

/// Builder for constructing validated [`Definitions`].
///
/// # Example
///
/// ```
/// use rulegrid::{DefinitionsBuilder, any, is, one_of};
///
/// let defs = DefinitionsBuilder::new()
///     .dimension("category", ["Men", "Women", "Kids"])
///     .dimension("size", ["XS", "S", "M", "L", "XL"])
///     .deny([is("Men"), is("XS")])
///     .allow([one_of(["Men", "Women"]), any()])
///     .build()
///     .unwrap();
///
/// assert!(!defs.check(&["Men", "XS"]).unwrap());
/// assert!(defs.check(&["Women", "XS"]).unwrap());
/// ```
#[derive(Debug, Default)]
pub struct DefinitionsBuilder {
    rules: Vec<Rule>,
    dimensions: Vec<Dimension>,
}

impl DefinitionsBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a dimension. Dimensions are positional: the first one lines up
    /// with the first condition of every rule and the first query value.
    #[must_use]
    pub fn dimension<I, V>(mut self, name: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.dimensions.push(Dimension::new(name, values));
        self
    }

    /// Append a rule. Earlier rules take priority.
    #[must_use]
    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    #[must_use]
    pub fn allow<I, C>(self, conditions: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Condition>,
    {
        self.rule(Rule::new(Action::Allow, conditions))
    }

    #[must_use]
    pub fn deny<I, C>(self, conditions: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Condition>,
    {
        self.rule(Rule::new(Action::Deny, conditions))
    }

    /// Validate and freeze the definitions.
    ///
    /// An empty rule list is accepted here; checking a query against it
    /// fails with [`ConfigurationError::EmptyRuleSet`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] if a dimension is empty, repeats a
    /// value or a name, or if `*` is used as a value.
    pub fn build(self) -> Result<Definitions, ConfigurationError> {
        let defs = Definitions::new(self.rules, self.dimensions);
        defs.validate()?;
        Ok(defs)
    }
}

/// An ordered rule list paired with the dimensions it ranges over.
///
/// Immutable once built; share it behind `Arc` to check queries from
/// several threads. To change rules, build a new value and swap the `Arc`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "RawDefinitions", into = "RawDefinitions")
)]
pub struct Definitions {
    rules: Vec<Rule>,
    dimensions: Vec<Dimension>,
}

impl Definitions {
    /// Pair rules and dimensions without validation.
    #[must_use]
    pub fn new(rules: Vec<Rule>, dimensions: Vec<Dimension>) -> Self {
        Self { rules, dimensions }
    }

    #[must_use]
    pub fn builder() -> DefinitionsBuilder {
        DefinitionsBuilder::new()
    }

    /// Build from rule rows whose actions are still tokens.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::UnknownAction`] for the first row whose
    /// action is neither `allow` nor `deny`, or any validation error from
    /// [`DefinitionsBuilder::build()`].
    pub fn from_rows(
        rows: Vec<RuleRow>,
        dimensions: Vec<Dimension>,
    ) -> Result<Self, ConfigurationError> {
        let rules = rows
            .into_iter()
            .enumerate()
            .map(|(index, row)| row.into_rule(index))
            .collect::<Result<Vec<_>, _>>()?;
        let defs = Self::new(rules, dimensions);
        defs.validate()?;
        Ok(defs)
    }

    /// Parse the textual rule format and build validated definitions.
    ///
    /// # Errors
    ///
    /// Returns [`RulegridError`](crate::RulegridError) on parse or
    /// validation failure.
    pub fn from_dsl(input: &str) -> Result<Self, crate::RulegridError> {
        let parsed = crate::parse::parse(input)?;
        let defs = Self::from_rows(parsed.rules, parsed.dimensions)?;
        Ok(defs)
    }

    /// Read a rule file and build validated definitions.
    ///
    /// # Errors
    ///
    /// Returns [`RulegridError`](crate::RulegridError) on I/O, parse or
    /// validation failure.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, crate::RulegridError> {
        let input = std::fs::read_to_string(path)?;
        Self::from_dsl(&input)
    }

    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    #[must_use]
    pub fn dimensions(&self) -> &[Dimension] {
        &self.dimensions
    }

    /// Position of the dimension called `name`, for use as a search target.
    #[must_use]
    pub fn dimension_index(&self, name: &str) -> Option<usize> {
        self.dimensions.iter().position(|d| d.name() == name)
    }

    #[must_use]
    pub fn dimension(&self, name: &str) -> Option<&Dimension> {
        self.dimensions.iter().find(|d| d.name() == name)
    }

    /// Whether `query` is allowed. See [`evaluate`](crate::evaluate).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] if there are no rules or the query is
    /// empty.
    pub fn check<V: AsRef<str>>(&self, query: &[V]) -> Result<bool, ConfigurationError> {
        crate::evaluate::evaluate(&self.rules, &self.dimensions, query)
    }

    /// Like [`check()`](Self::check), reporting the deciding rule as well.
    ///
    /// # Errors
    ///
    /// Same as [`check()`](Self::check).
    pub fn check_detailed<V: AsRef<str>>(
        &self,
        query: &[V],
    ) -> Result<Verdict, ConfigurationError> {
        crate::evaluate::evaluate_detailed(&self.rules, &self.dimensions, query)
    }

    /// The closest allowed query, searching from the second-to-last
    /// dimension inward.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::NoDimensions`] when no dimensions are
    /// defined, and the errors of [`check()`](Self::check).
    pub fn closest<V: AsRef<str>>(
        &self,
        query: &[V],
    ) -> Result<Option<Vec<Value>>, ConfigurationError> {
        self.closest_in(query, None)
    }

    /// The closest allowed query, searching from dimension `target` inward.
    ///
    /// # Errors
    ///
    /// Same as [`closest()`](Self::closest).
    pub fn closest_in<V: AsRef<str>>(
        &self,
        query: &[V],
        target: Option<usize>,
    ) -> Result<Option<Vec<Value>>, ConfigurationError> {
        crate::closest::find_alternative_conditions(&self.rules, &self.dimensions, query, target)
    }

    /// The substituted value of the closest allowed query.
    ///
    /// # Errors
    ///
    /// Same as [`closest()`](Self::closest).
    pub fn closest_value<V: AsRef<str>>(
        &self,
        query: &[V],
    ) -> Result<Option<Value>, ConfigurationError> {
        self.closest_value_in(query, None)
    }

    /// # Errors
    ///
    /// Same as [`closest()`](Self::closest).
    pub fn closest_value_in<V: AsRef<str>>(
        &self,
        query: &[V],
        target: Option<usize>,
    ) -> Result<Option<Value>, ConfigurationError> {
        crate::closest::find_alternative_value(&self.rules, &self.dimensions, query, target)
    }

    /// The closest allowed query with the dimension, index and value that
    /// were substituted.
    ///
    /// # Errors
    ///
    /// Same as [`closest()`](Self::closest).
    pub fn closest_verbose<V: AsRef<str>>(
        &self,
        query: &[V],
    ) -> Result<Option<Alternative<'_>>, ConfigurationError> {
        self.closest_verbose_in(query, None)
    }

    /// # Errors
    ///
    /// Same as [`closest()`](Self::closest).
    pub fn closest_verbose_in<V: AsRef<str>>(
        &self,
        query: &[V],
        target: Option<usize>,
    ) -> Result<Option<Alternative<'_>>, ConfigurationError> {
        crate::closest::find_alternative_verbose(&self.rules, &self.dimensions, query, target)
    }

    /// Structural checks applied by [`DefinitionsBuilder::build()`].
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigurationError`] found.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        check_dimensions(&self.dimensions)?;
        check_rules(&self.rules)
    }
}

fn check_dimensions(dimensions: &[Dimension]) -> Result<(), ConfigurationError> {
    let mut names = HashSet::new();
    for dimension in dimensions {
        if !names.insert(dimension.name()) {
            return Err(ConfigurationError::DuplicateDimension {
                dimension: dimension.name().to_owned(),
            });
        }
        if dimension.is_empty() {
            return Err(ConfigurationError::EmptyDimension {
                dimension: dimension.name().to_owned(),
            });
        }
        let mut seen = HashSet::new();
        for value in dimension.iter() {
            if value.is_reserved() {
                return Err(ConfigurationError::ReservedValue {
                    location: format!("dimension '{}'", dimension.name()),
                });
            }
            if !seen.insert(value.as_str()) {
                return Err(ConfigurationError::DuplicateValue {
                    dimension: dimension.name().to_owned(),
                    value: value.as_str().to_owned(),
                });
            }
        }
    }
    Ok(())
}

fn check_rules(rules: &[Rule]) -> Result<(), ConfigurationError> {
    for (index, rule) in rules.iter().enumerate() {
        for (position, condition) in rule.conditions.iter().enumerate() {
            if matches!(condition, Condition::Set(values) if values.is_empty()) {
                return Err(ConfigurationError::EmptySet { index, position });
            }
            if condition.values().iter().any(Value::is_reserved) {
                return Err(ConfigurationError::ReservedValue {
                    location: format!("rule {index}"),
                });
            }
        }
    }
    Ok(())
}

/// Renders in the textual rule format; the output parses back with
/// [`Definitions::from_dsl()`].
impl fmt::Display for Definitions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for dimension in &self.dimensions {
            writeln!(f, "{dimension}")?;
        }
        for rule in &self.rules {
            writeln!(f, "{rule}")?;
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct RawDefinitions {
    #[serde(default)]
    dimensions: Vec<Dimension>,
    #[serde(default)]
    rules: Vec<RuleRow>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawDefinitions> for Definitions {
    type Error = ConfigurationError;

    fn try_from(raw: RawDefinitions) -> Result<Self, Self::Error> {
        Self::from_rows(raw.rules, raw.dimensions)
    }
}

#[cfg(feature = "serde")]
impl From<Definitions> for RawDefinitions {
    fn from(defs: Definitions) -> Self {
        Self {
            dimensions: defs.dimensions,
            rules: defs.rules.into_iter().map(RuleRow::from).collect(),
        }
    }
}
