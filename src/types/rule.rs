use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use super::condition::RawCondition;
use super::condition::Condition;
use super::error::ConfigurationError;

/// What a matching rule decides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Allow,
    Deny,
}

impl Action {
    #[must_use]
    pub fn is_allow(self) -> bool {
        matches!(self, Action::Allow)
    }
}

/// Error returned when a token names neither `allow` nor `deny`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownActionToken(pub String);

impl FromStr for Action {
    type Err = UnknownActionToken;

    /// Case-insensitive: `ALLOW`, `allow` and `Allow` are all accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("allow") {
            Ok(Action::Allow)
        } else if s.eq_ignore_ascii_case("deny") {
            Ok(Action::Deny)
        } else {
            Err(UnknownActionToken(s.to_owned()))
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Allow => write!(f, "ALLOW"),
            Action::Deny => write!(f, "DENY"),
        }
    }
}

/// An action followed by one condition per dimension position.
///
/// The condition list may be shorter than the dimension list or the query;
/// see [`evaluate`](crate::evaluate) for how missing positions are handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub action: Action,
    pub conditions: Vec<Condition>,
}

impl Rule {
    pub fn new<I, C>(action: Action, conditions: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Condition>,
    {
        Self {
            action,
            conditions: conditions.into_iter().map(Into::into).collect(),
        }
    }

    pub fn allow<I, C>(conditions: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Condition>,
    {
        Self::new(Action::Allow, conditions)
    }

    pub fn deny<I, C>(conditions: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Condition>,
    {
        Self::new(Action::Deny, conditions)
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.action)?;
        for c in &self.conditions {
            write!(f, " {c}")?;
        }
        Ok(())
    }
}

/// A rule whose action is still an unchecked token, as read from text or
/// a serialized row.
///
/// With the `serde` feature a row is a flat sequence whose first element is
/// the action: `["DENY", "Men", "*", ["S", "M"]]`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "Vec<RawCondition>", into = "Vec<RawCondition>")
)]
pub struct RuleRow {
    pub action: String,
    pub conditions: Vec<Condition>,
}

impl RuleRow {
    /// Resolve the action token. `index` is the row's position in its rule
    /// list and is reported back on failure.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::UnknownAction`] if the token is neither
    /// `allow` nor `deny`.
    pub fn into_rule(self, index: usize) -> Result<Rule, ConfigurationError> {
        match self.action.parse::<Action>() {
            Ok(action) => Ok(Rule {
                action,
                conditions: self.conditions,
            }),
            Err(UnknownActionToken(action)) => Err(ConfigurationError::UnknownAction {
                action,
                rule: render_conditions(&self.conditions),
                index,
            }),
        }
    }
}

impl From<Rule> for RuleRow {
    fn from(rule: Rule) -> Self {
        Self {
            action: rule.action.to_string(),
            conditions: rule.conditions,
        }
    }
}

#[cfg(feature = "serde")]
impl TryFrom<Vec<RawCondition>> for RuleRow {
    type Error = String;

    fn try_from(raw: Vec<RawCondition>) -> Result<Self, Self::Error> {
        let mut items = raw.into_iter();
        match items.next() {
            Some(RawCondition::One(action)) => Ok(Self {
                action: action.into_string(),
                conditions: items.map(Condition::from).collect(),
            }),
            Some(RawCondition::Many(_)) => Err("rule row must start with an action".to_owned()),
            None => Err("rule row is empty".to_owned()),
        }
    }
}

#[cfg(feature = "serde")]
impl From<RuleRow> for Vec<RawCondition> {
    fn from(row: RuleRow) -> Self {
        std::iter::once(RawCondition::One(row.action.into()))
            .chain(row.conditions.into_iter().map(RawCondition::from))
            .collect()
    }
}

fn render_conditions(conditions: &[Condition]) -> String {
    conditions
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
