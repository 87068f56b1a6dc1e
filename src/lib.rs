//! `attomodel` refutes formulas of first order predicate logic by evaluating them within small
//! finite models. A formula that is false under some assignment of its free variables within some
//! model is certainly not a theorem. A formula that stays true proves nothing, but passing a few
//! well chosen models is a cheap signal before searching for a formal proof.
//!
//! # Main data structures
//! There are four main data structures in `attomodel`: [`Element`]s, [`Model`]s, the
//! [`Interpreter`] and the [`Checker`].
//!
//! ## Elements
//! An [`Element`] is a tree of tagged lists and names, representing a formula like
//! _∀x ¬(x ∈ x)_ as `FORALL(VAR(x), NOT(PREDCON(in, VAR(x), VAR(x))))`. The tag of a list
//! decides how it is evaluated, see [`element::Operator`].
//!
//! ## Models
//! A [`Model`] is a finite domain of [`model::Entity`]s together with
//!  * pools of predicates and functions per arity, which predicate and function variables range
//!    over,
//!  * named predicate and function constants, like the membership predicate `in`,
//!  * a comprehension table, deciding which entity represents the class _{ x | φ(x) }_.
//!
//! Models are immutable once built and can be shared between threads. The built-in models are
//! listed by [`ModelKind`].
//!
//! ## Interpreter
//! The [`Interpreter`] evaluates a formula recursively under the current assignment of its free
//! subject, predicate and function variables. Constants are looked up in
//! [`definitions::ModuleDefinitions`] first, so a constant defined by a formula is evaluated by
//! evaluating its definition.
//!
//! ## Checker
//! The [`Checker`] repeats the evaluation for every assignment of the free variables until the
//! formula is false, and reports the assignment as a [`Countermodel`]. A [`checker::Library`]
//! repeats this over several models.
//!
//! # Example
//! ```
//! use attomodel::{checker::check_library, CheckerConfig, Element};
//! use attomodel::definitions::{ModuleDefinitions, NoImports};
//!
//! let member = |x, y| Element::predcon("in", vec![Element::var(x), Element::var(y)]);
//! // there is a set containing every set
//! let universal_set = Element::exists("y", Element::forall("x", member("x", "y")));
//!
//! let module = ModuleDefinitions::new("set");
//! let report = check_library(&CheckerConfig::default(), &module, &NoImports, &universal_set);
//! assert!(report.is_refuted());
//! ```

#[cfg(feature = "serialization")]
extern crate nom;
#[cfg(test)]
#[macro_use]
extern crate quickcheck;

pub mod checker;
pub mod config;
pub mod definitions;
pub mod element;
pub mod error;
pub mod interpreter;
pub mod model;
#[cfg(feature = "serialization")]
pub mod serialization;
mod table;
pub mod trail;
mod types;

pub use checker::{Checker, Verdict};
pub use config::CheckerConfig;
pub use element::Element;
pub use error::{EvaluationError, EvaluationResult};
pub use interpreter::{Countermodel, Interpreter};
pub use model::{Model, ModelKind};
pub use types::*;
