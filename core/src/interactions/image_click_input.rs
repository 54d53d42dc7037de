//! `ImageClickInput` rules.

use crate::{ClickOnImage, InteractionClassifierBuilder, SingleInputClassifier};

/// Interaction id.
pub const INTERACTION_ID: &str = "ImageClickInput";

/// Register every `ImageClickInput` rule.
#[must_use]
pub fn register(rules: InteractionClassifierBuilder) -> InteractionClassifierBuilder {
    rules.rule(
        "IsInRegion",
        SingleInputClassifier::<ClickOnImage, String>::new("x", |a, x| a.is_in_region(x)),
    )
}
