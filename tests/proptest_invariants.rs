
use proptest::prelude::*;
use rulegrid::{evaluate_detailed, Action, Condition, Definitions, Rule, Value, WILDCARD};
use strategies::{arb_definitions, arb_full_query, arb_query, arb_rules, schema};

// ---------------------------------------------------------------------------
// Invariant 1: Determinism
//
// The same definitions and query always produce the same verdict.
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn determinism(defs in arb_definitions(), query in arb_query()) {
        let first = defs.check_detailed(&query);
        for _ in 0..5 {
            let again = defs.check_detailed(&query);
            prop_assert_eq!(&first, &again, "determinism violated on repeated check");
        }
    }

    #[test]
    fn determinism_closest(defs in arb_definitions(), query in arb_full_query()) {
        let first = defs.closest(&query);
        let again = defs.closest(&query);
        prop_assert_eq!(first, again);
    }
}

// ---------------------------------------------------------------------------
// Invariant 2: First match wins
//
// The deciding rule is matched, and no earlier rule is.
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn first_match_decides(rules in arb_rules(), query in arb_query()) {
        let dims = schema();
        let verdict = evaluate_detailed(&rules, &dims, &query).unwrap();

        if let Some(index) = verdict.rule() {
            prop_assert_eq!(verdict.allowed(), rules[index].action.is_allow());

            // The deciding rule alone reaches the same verdict.
            let alone = evaluate_detailed(&rules[index..=index], &dims, &query).unwrap();
            prop_assert_eq!(alone.rule(), Some(0));
            prop_assert_eq!(alone.allowed(), verdict.allowed());

            // Every earlier rule falls through.
            if index > 0 {
                let earlier = evaluate_detailed(&rules[..index], &dims, &query).unwrap();
                prop_assert_eq!(earlier.rule(), None, "rule before {} matched", index);
            }
        } else {
            prop_assert!(!verdict.allowed(), "no rule matched but query was allowed");
        }
    }

    #[test]
    fn appended_rules_never_override(rules in arb_rules(), extra in arb_rules(), query in arb_query()) {
        let dims = schema();
        let verdict = evaluate_detailed(&rules, &dims, &query).unwrap();
        if verdict.rule().is_some() {
            let mut extended = rules.clone();
            extended.extend(extra);
            let again = evaluate_detailed(&extended, &dims, &query).unwrap();
            prop_assert_eq!(verdict, again);
        }
    }
}

// ---------------------------------------------------------------------------
// Invariant 3: Default deny
//
// A trailing rule with no conditions decides every query left undecided.
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn catch_all_decides_leftovers(rules in arb_rules(), query in arb_query(), allow in any::<bool>()) {
        let dims = schema();
        let verdict = evaluate_detailed(&rules, &dims, &query).unwrap();

        let action = if allow { Action::Allow } else { Action::Deny };
        let mut extended = rules.clone();
        extended.push(Rule::new(action, Vec::<Condition>::new()));
        let caught = evaluate_detailed(&extended, &dims, &query).unwrap();

        match verdict.rule() {
            Some(_) => {
                prop_assert_eq!(verdict, caught);
            }
            None => {
                prop_assert_eq!(caught.rule(), Some(rules.len()));
                prop_assert_eq!(caught.allowed(), allow);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Invariant 4: Alternatives
//
// A found alternative is allowed, differs from the query only at the
// reported dimension, and uses a value of that dimension. Slots between a
// short query's end and the reported dimension stay unfilled.
// ---------------------------------------------------------------------------

fn assert_alternative(
    defs: &Definitions,
    query: &[Value],
    target: Option<usize>,
) -> Result<(), TestCaseError> {
    let Some(alt) = defs.closest_verbose_in(query, target).unwrap() else {
        return Ok(());
    };
    let index = alt.dimension_index();

    prop_assert_eq!(defs.check(alt.conditions()), Ok(true));
    prop_assert_eq!(alt.conditions().len(), query.len().max(index + 1));
    prop_assert!(alt.dimension().contains(alt.value().as_str()));
    prop_assert_eq!(&alt.conditions()[index], alt.value());

    for (i, found) in alt.conditions().iter().enumerate() {
        if i == index {
            continue;
        }
        match query.get(i) {
            Some(asked) => {
                prop_assert_eq!(found, asked, "position {} changed", i);
            }
            None => {
                prop_assert_eq!(found.as_str(), WILDCARD, "gap {} was filled", i);
            }
        }
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn found_alternative_is_allowed(defs in arb_definitions(), query in arb_full_query()) {
        assert_alternative(&defs, &query, None)?;
    }

    #[test]
    fn short_query_alternative_is_allowed(
        defs in arb_definitions(),
        query in arb_query(),
        target in prop::option::of(0_usize..3),
    ) {
        assert_alternative(&defs, &query, target)?;
    }

    #[test]
    fn targeted_alternative_is_allowed(
        defs in arb_definitions(),
        query in arb_full_query(),
        target in 0_usize..4,
    ) {
        if let Some(conditions) = defs.closest_in(&query, Some(target)).unwrap() {
            prop_assert_eq!(defs.check(&conditions), Ok(true));
        }
    }

    #[test]
    fn search_leaves_query_alone(defs in arb_definitions(), query in arb_full_query()) {
        let before = query.clone();
        let _ = defs.closest(&query);
        prop_assert_eq!(query, before);
    }

    #[test]
    fn search_adapters_agree(defs in arb_definitions(), query in arb_full_query()) {
        let verbose = defs.closest_verbose(&query).unwrap();
        let conditions = defs.closest(&query).unwrap();
        let value = defs.closest_value(&query).unwrap();

        prop_assert_eq!(verbose.as_ref().map(|a| a.conditions().to_vec()), conditions);
        prop_assert_eq!(verbose.map(|a| a.value().clone()), value);
    }
}
