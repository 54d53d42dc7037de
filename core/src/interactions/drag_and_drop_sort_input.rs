//! `DragAndDropSortInput` rules.
//!
//! Answers are orderings: a list of positions, each holding one or more item
//! ids. Items sharing a position are unordered among themselves. Positions in
//! rule inputs are 1-indexed.

use std::collections::{BTreeMap, BTreeSet};

use crate::{DoubleInputClassifier, InteractionClassifierBuilder, SingleInputClassifier};

/// Interaction id.
pub const INTERACTION_ID: &str = "DragAndDropSortInput";

type ItemOrdering = Vec<Vec<String>>;

type AgainstOrdering = SingleInputClassifier<ItemOrdering, ItemOrdering>;

fn positions(ordering: &[Vec<String>]) -> Vec<BTreeSet<&str>> {
    ordering
        .iter()
        .map(|items| items.iter().map(String::as_str).collect())
        .collect()
}

/// Zero-based position of every item; a repeated item keeps its first position.
fn item_positions(ordering: &[Vec<String>]) -> BTreeMap<&str, usize> {
    let mut found = BTreeMap::new();
    for (position, items) in ordering.iter().enumerate() {
        for item in items {
            found.entry(item.as_str()).or_insert(position);
        }
    }
    found
}

fn position_of(ordering: &[Vec<String>], item: &str) -> Option<usize> {
    ordering
        .iter()
        .position(|items| items.iter().any(|candidate| candidate == item))
}

fn is_equal_to_ordering(answer: &ItemOrdering, x: &ItemOrdering) -> bool {
    positions(answer) == positions(x)
}

/// Items whose position differs between the two orderings, counting items
/// present in only one of them.
fn misplaced_items(answer: &[Vec<String>], x: &[Vec<String>]) -> usize {
    let (answer, x) = (item_positions(answer), item_positions(x));
    let items: BTreeSet<&str> = answer.keys().chain(x.keys()).copied().collect();
    items
        .into_iter()
        .filter(|item| answer.get(item) != x.get(item))
        .count()
}

fn has_element_at_position(answer: &ItemOrdering, x: &String, y: &u32) -> bool {
    position_of(answer, x).map(|position| position + 1) == usize::try_from(*y).ok()
}

fn has_element_before(answer: &ItemOrdering, x: &String, y: &String) -> bool {
    match (position_of(answer, x), position_of(answer, y)) {
        (Some(first), Some(second)) => first < second,
        _ => false,
    }
}

/// Register every `DragAndDropSortInput` rule.
#[must_use]
pub fn register(rules: InteractionClassifierBuilder) -> InteractionClassifierBuilder {
    rules
        .rule("IsEqualToOrdering", AgainstOrdering::new("x", is_equal_to_ordering))
        .rule(
            "IsEqualToOrderingWithOneItemAtIncorrectPosition",
            AgainstOrdering::new("x", |a, x| misplaced_items(a, x) == 1),
        )
        .rule(
            "HasElementXAtPositionY",
            DoubleInputClassifier::<ItemOrdering, String, u32>::new(
                "x",
                "y",
                has_element_at_position,
            ),
        )
        .rule(
            "HasElementXBeforeElementY",
            DoubleInputClassifier::<ItemOrdering, String, String>::new(
                "x",
                "y",
                has_element_before,
            ),
        )
}
