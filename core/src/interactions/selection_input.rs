//! `MultipleChoiceInput` and `ItemSelectionInput` rules.
//!
//! Choices are identified by index (multiple choice) or by content id (item
//! selection); both are opaque to the rules.

use std::collections::BTreeSet;

use crate::{InteractionClassifierBuilder, SingleInputClassifier};

/// Multiple-choice interaction id.
pub const MULTIPLE_CHOICE_ID: &str = "MultipleChoiceInput";

/// Item-selection interaction id.
pub const ITEM_SELECTION_ID: &str = "ItemSelectionInput";

type Selection = SingleInputClassifier<Vec<String>, Vec<String>>;

fn set(items: &[String]) -> BTreeSet<&str> {
    items.iter().map(String::as_str).collect()
}

/// Register every `MultipleChoiceInput` rule.
#[must_use]
pub fn register_multiple_choice(
    rules: InteractionClassifierBuilder,
) -> InteractionClassifierBuilder {
    rules.rule("Equals", SingleInputClassifier::<u32, u32>::new("x", |a, x| a == x))
}

/// Register every `ItemSelectionInput` rule.
#[must_use]
pub fn register_item_selection(
    rules: InteractionClassifierBuilder,
) -> InteractionClassifierBuilder {
    rules
        .rule("Equals", Selection::new("x", |a, x| set(a) == set(x)))
        .rule(
            "ContainsAtLeastOneOf",
            Selection::new("x", |a, x| !set(a).is_disjoint(&set(x))),
        )
        .rule(
            "DoesNotContainAtLeastOneOf",
            Selection::new("x", |a, x| !set(x).is_subset(&set(a))),
        )
        .rule(
            "IsProperSubsetOf",
            Selection::new("x", |a, x| {
                let (a, x) = (set(a), set(x));
                a.len() < x.len() && a.is_subset(&x)
            }),
        )
}
