//! Evaluation of formulas within a single model
//!
//! The [`Interpreter`] walks an [`Element`][crate::element::Element] tree recursively. The
//! assignment of the free variables lives in three [`VariableSet`]s and is advanced with
//! [`Interpreter::next`] until either the formula is false or all assignments were tried.

mod assignment;
mod evaluator;
mod variables;

pub use assignment::{Binding, Countermodel};
pub use evaluator::Interpreter;
pub use variables::{
    FunctionVariable, FunctionVariables, PredicateVariable, PredicateVariables, SubjectVariable,
    SubjectVariables, VariableKey, VariableSet,
};
