//! `TextInput` rules.
//!
//! Answers and every alternative in `x` are compared after normalization:
//! trimmed, runs of whitespace collapsed to one space, lowercased. A rule
//! matches if it holds for any alternative.

use crate::{InteractionClassifierBuilder, SingleInputClassifier};

/// Interaction id.
pub const INTERACTION_ID: &str = "TextInput";

type Against = SingleInputClassifier<String, Vec<String>>;

/// Trim, collapse internal whitespace and lowercase.
#[must_use]
pub fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Levenshtein distance over `char`s.
#[must_use]
pub fn edit_distance(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0; b.len() + 1];
    for (i, ca) in a.chars().enumerate() {
        current[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = previous[j] + usize::from(ca != *cb);
            current[j + 1] = substitution.min(previous[j + 1] + 1).min(current[j] + 1);
        }
        std::mem::swap(&mut previous, &mut current);
    }
    previous[b.len()]
}

fn any_alternative(answer: &str, alternatives: &[String], test: fn(&str, &str) -> bool) -> bool {
    let answer = normalize(answer);
    alternatives
        .iter()
        .any(|alternative| test(&answer, &normalize(alternative)))
}

/// Register every `TextInput` rule.
#[must_use]
pub fn register(rules: InteractionClassifierBuilder) -> InteractionClassifierBuilder {
    rules
        .rule("Equals", Against::new("x", |a, x| any_alternative(a, x, |a, x| a == x)))
        .rule(
            "StartsWith",
            Against::new("x", |a, x| any_alternative(a, x, |a, x| a.starts_with(x))),
        )
        .rule(
            "Contains",
            Against::new("x", |a, x| any_alternative(a, x, |a, x| a.contains(x))),
        )
        .rule(
            "FuzzyEquals",
            Against::new("x", |a, x| any_alternative(a, x, |a, x| edit_distance(a, x) <= 1)),
        )
}
