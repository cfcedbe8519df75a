use tracing::{debug, trace, warn};

use crate::evaluate::evaluate;
use crate::{Alternative, ConfigurationError, Dimension, Rule, Value, WILDCARD};

/// Search for the closest allowed alternative to `query` by substituting a
/// single dimension's value.
///
/// The search starts at dimension `target`, or at the second-to-last
/// dimension when `target` is `None` or out of range (the only dimension when
/// there is just one). Each dimension's values are tried in their configured
/// order; the first one that makes the query pass [`evaluate`] wins. When a
/// dimension is exhausted the search moves to the preceding one.
///
/// At dimension 0 the search stops after the first rejected candidate.
///
/// A dimension whose index lies at or past the end of `query` is still
/// searched: the working copy is extended up to that index, and any slot
/// between the end of `query` and the index is filled with [`WILDCARD`],
/// which matches no condition. The extension is dropped again when the
/// dimension is exhausted. An empty query is searched the same way.
///
/// Returns `Ok(None)` when no alternative was found. `query` is never
/// modified.
///
/// # Errors
///
/// Returns [`ConfigurationError::NoDimensions`] if `dimensions` is empty
/// and [`ConfigurationError::EmptyRuleSet`] if `rules` is empty.
pub fn find_alternative_verbose<'d, V: AsRef<str>>(
    rules: &[Rule],
    dimensions: &'d [Dimension],
    query: &[V],
    target: Option<usize>,
) -> Result<Option<Alternative<'d>>, ConfigurationError> {
    if dimensions.is_empty() {
        return Err(ConfigurationError::NoDimensions);
    }
    if rules.is_empty() {
        return Err(ConfigurationError::EmptyRuleSet);
    }

    let start = resolve_target(dimensions.len(), target);
    let mut working: Vec<Value> = query.iter().map(|v| Value::from(v.as_ref())).collect();

    for index in (0..=start).rev() {
        let dimension = &dimensions[index];
        if index >= working.len() {
            debug!(
                event = "extend",
                dimension = dimension.name(),
                index,
                query_len = query.len(),
            );
            working.resize(index + 1, Value::from(WILDCARD));
        }
        let original = working[index].clone();

        debug!(
            event = "scan",
            dimension = dimension.name(),
            index,
            candidates = dimension.len(),
        );

        for candidate in dimension.iter() {
            working[index] = candidate.clone();
            if evaluate(rules, dimensions, &working)? {
                debug!(
                    event = "found",
                    dimension = dimension.name(),
                    index,
                    value = %candidate,
                );
                return Ok(Some(Alternative::new(
                    dimension,
                    index,
                    candidate.clone(),
                    working,
                )));
            }
            trace!(event = "rejected", index, value = %candidate);
            working[index] = original.clone();

            if index == 0 {
                debug!(event = "exhausted", dimension = dimension.name());
                return Ok(None);
            }
        }
        working.truncate(query.len());
    }

    debug!(event = "exhausted", start);
    Ok(None)
}

/// Like [`find_alternative_verbose`], returning only the substituted query.
///
/// # Errors
///
/// Same as [`find_alternative_verbose`].
pub fn find_alternative_conditions<V: AsRef<str>>(
    rules: &[Rule],
    dimensions: &[Dimension],
    query: &[V],
    target: Option<usize>,
) -> Result<Option<Vec<Value>>, ConfigurationError> {
    Ok(find_alternative_verbose(rules, dimensions, query, target)?
        .map(Alternative::into_conditions))
}

/// Like [`find_alternative_verbose`], returning only the substituted value.
///
/// # Errors
///
/// Same as [`find_alternative_verbose`].
pub fn find_alternative_value<V: AsRef<str>>(
    rules: &[Rule],
    dimensions: &[Dimension],
    query: &[V],
    target: Option<usize>,
) -> Result<Option<Value>, ConfigurationError> {
    Ok(find_alternative_verbose(rules, dimensions, query, target)?.map(Alternative::into_value))
}

fn resolve_target(len: usize, target: Option<usize>) -> usize {
    let default = len.saturating_sub(2);
    match target {
        Some(index) if index < len => index,
        Some(index) => {
            warn!(event = "target_out_of_range", index, dimensions = len, fallback = default);
            default
        }
        None => default,
    }
}
