//! Built-in interactions and their rule catalogues.
//!
//! | Interaction | Rules |
//! |-------------|-------|
//! | `NumericInput` | `Equals`, `IsLessThan`, `IsGreaterThan`, `IsLessThanOrEqualTo`, `IsGreaterThanOrEqualTo`, `IsInclusivelyBetween`, `IsWithinTolerance` |
//! | `FractionInput` | `IsExactlyEqualTo`, `IsEquivalentTo`, `IsEquivalentToAndInSimplestForm`, `IsLessThan`, `IsGreaterThan`, `HasNumeratorEqualTo`, `HasDenominatorEqualTo`, `HasIntegerPartEqualTo`, `HasNoFractionalPart`, `HasFractionalPartExactlyEqualTo` |
//! | `RatioExpressionInput` | `Equals`, `IsEquivalent`, `HasNumberOfTermsEqualTo`, `HasSpecificTermEqualTo` |
//! | `NumberWithUnits` | `IsEqualTo`, `IsEquivalentTo` |
//! | `ImageClickInput` | `IsInRegion` |
//! | `TextInput` | `Equals`, `StartsWith`, `Contains`, `FuzzyEquals` |
//! | `MultipleChoiceInput` | `Equals` |
//! | `ItemSelectionInput` | `Equals`, `ContainsAtLeastOneOf`, `DoesNotContainAtLeastOneOf`, `IsProperSubsetOf` |
//! | `DragAndDropSortInput` | `IsEqualToOrdering`, `IsEqualToOrderingWithOneItemAtIncorrectPosition`, `HasElementXAtPositionY`, `HasElementXBeforeElementY` |
//! | `Continue`, `EndExploration` | none; always the default outcome |

pub mod drag_and_drop_sort_input;
pub mod fraction_input;
pub mod image_click_input;
pub mod number_with_units;
pub mod numeric_input;
pub mod ratio_expression_input;
pub mod selection_input;
pub mod text_input;

use crate::{RegistryBuilder, TERMINAL_INTERACTION_ID};

/// Interaction id of the rule-less "continue" button.
pub const CONTINUE_ID: &str = "Continue";

/// Register every built-in interaction.
///
/// Domain code can add its own interactions on top:
///
/// ```
/// use tutor::{register_core_interactions, NoInputClassifier, RegistryBuilder};
///
/// let registry = register_core_interactions(RegistryBuilder::new())
///     .interaction("Toggle", |rules| {
///         rules.rule("IsOn", NoInputClassifier::<u32>::new(|a| *a == 1))
///     })
///     .build();
/// assert!(registry.contains("Toggle"));
/// assert!(registry.contains("FractionInput"));
/// ```
#[must_use]
pub fn register_core_interactions(builder: RegistryBuilder) -> RegistryBuilder {
    builder
        .interaction(numeric_input::INTERACTION_ID, numeric_input::register)
        .interaction(fraction_input::INTERACTION_ID, fraction_input::register)
        .interaction(ratio_expression_input::INTERACTION_ID, ratio_expression_input::register)
        .interaction(number_with_units::INTERACTION_ID, number_with_units::register)
        .interaction(image_click_input::INTERACTION_ID, image_click_input::register)
        .interaction(text_input::INTERACTION_ID, text_input::register)
        .interaction(selection_input::MULTIPLE_CHOICE_ID, selection_input::register_multiple_choice)
        .interaction(selection_input::ITEM_SELECTION_ID, selection_input::register_item_selection)
        .interaction(drag_and_drop_sort_input::INTERACTION_ID, drag_and_drop_sort_input::register)
        .interaction(CONTINUE_ID, |rules| rules)
        .interaction(TERMINAL_INTERACTION_ID, |rules| rules)
}

/// Evaluate one built-in rule directly.
#[cfg(test)]
pub(crate) fn check(
    interaction: &str,
    rule: &str,
    answer: crate::TypedValue,
    inputs: &[(&str, crate::TypedValue)],
) -> Result<bool, crate::InputValidationError> {
    let registry = crate::ClassifierRegistry::with_core_interactions();
    let inputs: crate::RuleInputs = inputs
        .iter()
        .map(|(name, value)| ((*name).to_string(), value.clone()))
        .collect();
    let classifier = registry
        .get_interaction_classifier(interaction)
        .and_then(|rules| rules.get_rule_classifier(rule))
        .unwrap_or_else(|| panic!("{interaction}.{rule} is not registered"));
    classifier.matches(&answer, &inputs)
}
