use tracing::trace;

use crate::{Action, Condition, ConfigurationError, Dimension, Rule, Verdict, WILDCARD};

/// Check `query` against an ordered rule list.
///
/// Rules are tried in order and the first one whose conditions all match
/// decides: `true` for [`Action::Allow`], `false` for [`Action::Deny`]. A
/// query that matches no rule is denied.
///
/// Conditions and query values are aligned by position:
///
/// - a query shorter than a rule matches the missing positions only if the
///   rule allows, so a longer deny rule never matches a shorter query;
/// - query values past the end of a rule are ignored;
/// - a wildcard matches anything when `dimensions` is empty, and otherwise
///   only members of the dimension at the same position;
/// - a query value equal to [`WILDCARD`](crate::WILDCARD) is an unfilled
///   slot and matches no condition.
///
/// # Errors
///
/// Returns [`ConfigurationError::EmptyRuleSet`] if `rules` is empty and
/// [`ConfigurationError::EmptyQuery`] if `query` is empty.
pub fn evaluate<V: AsRef<str>>(
    rules: &[Rule],
    dimensions: &[Dimension],
    query: &[V],
) -> Result<bool, ConfigurationError> {
    evaluate_detailed(rules, dimensions, query).map(|v| v.allowed())
}

/// Like [`evaluate`], but also reports which rule decided.
///
/// # Errors
///
/// Same as [`evaluate`].
pub fn evaluate_detailed<V: AsRef<str>>(
    rules: &[Rule],
    dimensions: &[Dimension],
    query: &[V],
) -> Result<Verdict, ConfigurationError> {
    if rules.is_empty() {
        return Err(ConfigurationError::EmptyRuleSet);
    }
    if query.is_empty() {
        return Err(ConfigurationError::EmptyQuery);
    }

    for (index, rule) in rules.iter().enumerate() {
        if rule_matches(rule, dimensions, query) {
            trace!(event = "match", rule = index, action = %rule.action);
            return Ok(Verdict::new(rule.action.is_allow(), Some(index)));
        }
    }

    trace!(event = "default_deny", rules = rules.len());
    Ok(Verdict::default_deny())
}

fn rule_matches<V: AsRef<str>>(rule: &Rule, dimensions: &[Dimension], query: &[V]) -> bool {
    rule.conditions
        .iter()
        .enumerate()
        .all(|(i, condition)| match query.get(i) {
            None => rule.action == Action::Allow,
            Some(value) => condition_matches(condition, dimensions, i, value.as_ref()),
        })
}

fn condition_matches(
    condition: &Condition,
    dimensions: &[Dimension],
    position: usize,
    value: &str,
) -> bool {
    // The reserved token marks an unfilled query slot.
    if value == WILDCARD {
        return false;
    }
    match condition {
        Condition::Wildcard if dimensions.is_empty() => true,
        // A wildcard past the last dimension has nothing to be a member of.
        Condition::Wildcard => dimensions
            .get(position)
            .is_some_and(|d| d.contains(value)),
        other => other.admits(value),
    }
}
