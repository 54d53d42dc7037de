//! Rule classifiers: one named, pure predicate over a typed answer.
//!
//! A classifier is built from a predicate over concrete Rust types. The generic
//! wrapper owns the validation step, so a predicate body only ever sees values
//! that already passed [`FromTypedValue`]:
//!
//! | Shape | Predicate | Example |
//! |-------|-----------|---------|
//! | [`NoInputClassifier`] | `fn(&A) -> bool` | `HasNoFractionalPart` |
//! | [`SingleInputClassifier`] | `fn(&A, &I) -> bool` | `IsLessThan` |
//! | [`DoubleInputClassifier`] | `fn(&A, &I1, &I2) -> bool` | `IsWithinTolerance` |
//!
//! Multi-type rules need no extra shape: `A` and `I` are independent type
//! parameters (a `RatioExpression` answer against a `u32` input), and a
//! parameter that accepts several tags uses a widening target such as
//! [`Number`](crate::Number).

use std::fmt;
use std::marker::PhantomData;

use crate::input_validator::{retrieve_input, typed_answer, typed_input};
use crate::{FromTypedValue, InputValidationError, RuleInputs, TypedValue, ValueType};

/// A named rule's predicate, as seen by the registry and the controller.
///
/// Implementations are stateless and `Send + Sync`; one instance is shared by
/// every classification on every thread.
pub trait RuleClassifier: Send + Sync + fmt::Debug {
    /// Validate `answer` and `inputs`, then evaluate the predicate.
    ///
    /// # Errors
    ///
    /// Returns [`InputValidationError`] if a declared parameter is missing or
    /// ill-typed, or if the answer's type is not accepted.
    fn matches(&self, answer: &TypedValue, inputs: &RuleInputs)
        -> Result<bool, InputValidationError>;

    /// Tags accepted as the learner's answer.
    fn answer_types(&self) -> &'static [ValueType];

    /// Declared parameters, in predicate order, with their accepted tags.
    fn parameters(&self) -> Vec<(&'static str, &'static [ValueType])>;

    /// Check a rule spec's inputs without an answer (content load time).
    ///
    /// # Errors
    ///
    /// Returns the first [`InputValidationError`] found, in declaration order.
    fn validate_inputs(&self, inputs: &RuleInputs) -> Result<(), InputValidationError> {
        for (name, expected) in self.parameters() {
            retrieve_input(inputs, name, expected)?;
        }
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// No input
// ═══════════════════════════════════════════════════════════════════════════════

/// A rule that looks only at the answer.
pub struct NoInputClassifier<A> {
    predicate: fn(&A) -> bool,
    _answer: PhantomData<fn() -> A>,
}

impl<A: FromTypedValue> NoInputClassifier<A> {
    /// Wrap a predicate over the answer.
    #[must_use]
    pub fn new(predicate: fn(&A) -> bool) -> Self {
        Self {
            predicate,
            _answer: PhantomData,
        }
    }
}

impl<A: FromTypedValue> RuleClassifier for NoInputClassifier<A> {
    fn matches(
        &self,
        answer: &TypedValue,
        _inputs: &RuleInputs,
    ) -> Result<bool, InputValidationError> {
        let answer = typed_answer::<A>(answer)?;
        Ok((self.predicate)(&answer))
    }

    fn answer_types(&self) -> &'static [ValueType] {
        A::ACCEPTS
    }

    fn parameters(&self) -> Vec<(&'static str, &'static [ValueType])> {
        Vec::new()
    }
}

impl<A> fmt::Debug for NoInputClassifier<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NoInputClassifier")
            .field("answer", &std::any::type_name::<A>())
            .finish()
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Single input
// ═══════════════════════════════════════════════════════════════════════════════

/// A rule with one named parameter.
pub struct SingleInputClassifier<A, I> {
    input_name: &'static str,
    predicate: fn(&A, &I) -> bool,
    _types: PhantomData<fn() -> (A, I)>,
}

impl<A: FromTypedValue, I: FromTypedValue> SingleInputClassifier<A, I> {
    /// Wrap a predicate over the answer and parameter `input_name`.
    #[must_use]
    pub fn new(input_name: &'static str, predicate: fn(&A, &I) -> bool) -> Self {
        Self {
            input_name,
            predicate,
            _types: PhantomData,
        }
    }
}

impl<A: FromTypedValue, I: FromTypedValue> RuleClassifier for SingleInputClassifier<A, I> {
    fn matches(
        &self,
        answer: &TypedValue,
        inputs: &RuleInputs,
    ) -> Result<bool, InputValidationError> {
        let input = typed_input::<I>(inputs, self.input_name)?;
        let answer = typed_answer::<A>(answer)?;
        Ok((self.predicate)(&answer, &input))
    }

    fn answer_types(&self) -> &'static [ValueType] {
        A::ACCEPTS
    }

    fn parameters(&self) -> Vec<(&'static str, &'static [ValueType])> {
        vec![(self.input_name, I::ACCEPTS)]
    }
}

impl<A, I> fmt::Debug for SingleInputClassifier<A, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SingleInputClassifier")
            .field("answer", &std::any::type_name::<A>())
            .field(self.input_name, &std::any::type_name::<I>())
            .finish()
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Double input
// ═══════════════════════════════════════════════════════════════════════════════

/// A rule with two named parameters.
pub struct DoubleInputClassifier<A, I1, I2> {
    first_name: &'static str,
    second_name: &'static str,
    predicate: fn(&A, &I1, &I2) -> bool,
    _types: PhantomData<fn() -> (A, I1, I2)>,
}

impl<A, I1, I2> DoubleInputClassifier<A, I1, I2>
where
    A: FromTypedValue,
    I1: FromTypedValue,
    I2: FromTypedValue,
{
    /// Wrap a predicate over the answer and two named parameters.
    #[must_use]
    pub fn new(
        first_name: &'static str,
        second_name: &'static str,
        predicate: fn(&A, &I1, &I2) -> bool,
    ) -> Self {
        Self {
            first_name,
            second_name,
            predicate,
            _types: PhantomData,
        }
    }
}

impl<A, I1, I2> RuleClassifier for DoubleInputClassifier<A, I1, I2>
where
    A: FromTypedValue,
    I1: FromTypedValue,
    I2: FromTypedValue,
{
    fn matches(
        &self,
        answer: &TypedValue,
        inputs: &RuleInputs,
    ) -> Result<bool, InputValidationError> {
        let first = typed_input::<I1>(inputs, self.first_name)?;
        let second = typed_input::<I2>(inputs, self.second_name)?;
        let answer = typed_answer::<A>(answer)?;
        Ok((self.predicate)(&answer, &first, &second))
    }

    fn answer_types(&self) -> &'static [ValueType] {
        A::ACCEPTS
    }

    fn parameters(&self) -> Vec<(&'static str, &'static [ValueType])> {
        vec![(self.first_name, I1::ACCEPTS), (self.second_name, I2::ACCEPTS)]
    }
}

impl<A, I1, I2> fmt::Debug for DoubleInputClassifier<A, I1, I2> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DoubleInputClassifier")
            .field("answer", &std::any::type_name::<A>())
            .field(self.first_name, &std::any::type_name::<I1>())
            .field(self.second_name, &std::any::type_name::<I2>())
            .finish()
    }
}
