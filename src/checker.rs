//! The refutation driver
//!
//! A [`Checker`] evaluates a formula within one model under every assignment of its free
//! variables, stopping at the first assignment that makes it false. A formula that survives is
//! not proven: truth in one finite model says nothing about validity in general. A [`Library`]
//! repeats the check over several models.

use crate::{
    config::{CheckerConfig, EvaluationOptions},
    definitions::{ModuleDefinitions, ModuleResolver},
    element::Element,
    error::{EvaluationError, EvaluationErrorKind, EvaluationResult},
    interpreter::{Countermodel, Interpreter},
    model::{Entity, Model},
    trail::Trail,
};
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, info, trace, warn};

/// The outcome of checking a formula within one model
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// The formula is false under the recorded assignment
    Refuted(Countermodel),
    /// Every assignment was tried and none made the formula false
    Survived { passes: u64 },
    /// The pass budget ran out before all assignments were tried
    Abandoned { passes: u64 },
}

impl Verdict {
    pub fn is_refuted(&self) -> bool {
        matches!(self, Verdict::Refuted(_))
    }

    pub fn countermodel(&self) -> Option<&Countermodel> {
        match self {
            Verdict::Refuted(countermodel) => Some(countermodel),
            _ => None,
        }
    }

    pub fn passes(&self) -> Option<u64> {
        match self {
            Verdict::Refuted(_) => None,
            Verdict::Survived { passes } | Verdict::Abandoned { passes } => Some(*passes),
        }
    }
}

/// Checks formulas of one module within one model
///
/// # Example
/// ```
/// use attomodel::{Checker, Element, ModelKind};
/// use attomodel::definitions::{ModuleDefinitions, NoImports};
///
/// let model = ModelKind::Three.build();
/// let module = ModuleDefinitions::new("set");
/// let checker = Checker::new(&model, &module, &NoImports, Default::default());
///
/// let member = |x, y| Element::predcon("in", vec![Element::var(x), Element::var(y)]);
/// let irreflexive = Element::forall("x", Element::not(member("x", "x")));
/// assert_eq!(checker.is_tautology(&irreflexive), Ok(true));
///
/// let below = Element::forall("x", Element::exists("y", member("y", "x")));
/// assert_eq!(checker.is_tautology(&below), Ok(false));
/// ```
pub struct Checker<'m> {
    model: &'m Model,
    module: &'m ModuleDefinitions,
    resolver: &'m dyn ModuleResolver,
    options: EvaluationOptions,
    max_passes: Option<u64>,
}

impl<'m> Checker<'m> {
    pub fn new(
        model: &'m Model,
        module: &'m ModuleDefinitions,
        resolver: &'m dyn ModuleResolver,
        options: EvaluationOptions,
    ) -> Self {
        Checker {
            model,
            module,
            resolver,
            options,
            max_passes: None,
        }
    }

    /// Gives up after `max_passes` evaluations
    pub fn with_max_passes(mut self, max_passes: Option<u64>) -> Self {
        self.max_passes = max_passes;
        self
    }

    pub fn model(&self) -> &'m Model {
        self.model
    }

    fn interpreter(&self) -> Interpreter<'m> {
        Interpreter::new(self.model, self.resolver, self.options)
    }

    /// Searches an assignment of the free variables of `formula` that makes it false.
    ///
    /// # Errors
    /// The first evaluation failure ends the search. A panic inside a primitive of the model is
    /// reported as `Internal`.
    pub fn check(&self, formula: &'m Element) -> EvaluationResult<Verdict> {
        let model = self.model.name();
        debug!(model, module = self.module.label(), "checking formula");
        let mut interpreter = self.interpreter();
        let mut passes = 0;
        loop {
            passes += 1;
            let value = self
                .guarded(|| interpreter.evaluate_formula(self.module, formula))
                .map_err(|e| {
                    warn!(model, passes, code = e.code(), "evaluation failed: {}", e);
                    e
                })?;
            trace!(model, passes, value, "evaluation pass");
            if !value {
                let countermodel = interpreter.countermodel();
                info!(model, passes, "refuted by {}", countermodel);
                return Ok(Verdict::Refuted(countermodel));
            }
            if !interpreter.next() {
                debug!(model, passes, "no countermodel found");
                return Ok(Verdict::Survived { passes });
            }
            if self.max_passes.map_or(false, |max| passes >= max) {
                warn!(model, passes, "pass budget exhausted");
                return Ok(Verdict::Abandoned { passes });
            }
        }
    }

    /// Whether no assignment makes `formula` false. An abandoned search counts as `true`.
    pub fn is_tautology(&self, formula: &'m Element) -> EvaluationResult<bool> {
        self.check(formula).map(|verdict| !verdict.is_refuted())
    }

    /// Evaluates `formula` under the assignment recorded in `countermodel`. Variables the
    /// countermodel does not mention start at their first selection.
    pub fn replay(
        &self,
        formula: &'m Element,
        countermodel: &'m Countermodel,
    ) -> EvaluationResult<bool> {
        let mut interpreter = self.interpreter();
        interpreter.restore(countermodel)?;
        self.guarded(|| interpreter.evaluate_formula(self.module, formula))
    }

    /// Evaluates the body of the predicate definition `name` of the checked module
    pub fn calculate_predicate_value(
        &self,
        name: &str,
        arguments: &[Entity],
    ) -> EvaluationResult<bool> {
        let definition = self.module.predicate(name, arguments.len()).ok_or_else(|| {
            self.error(EvaluationErrorKind::UnknownPredicateConstant {
                name: name.to_owned(),
                arity: arguments.len(),
            })
        })?;
        let mut interpreter = self.interpreter();
        self.guarded(|| interpreter.calculate_predicate_value(self.module, definition, arguments))
    }

    /// Evaluates the body of the function definition `name` of the checked module
    pub fn calculate_function_value(
        &self,
        name: &str,
        arguments: &[Entity],
    ) -> EvaluationResult<Entity> {
        let definition = self.module.function(name, arguments.len()).ok_or_else(|| {
            self.error(EvaluationErrorKind::UnknownFunctionConstant {
                name: name.to_owned(),
                arity: arguments.len(),
            })
        })?;
        let mut interpreter = self.interpreter();
        self.guarded(|| interpreter.calculate_function_value(self.module, definition, arguments))
    }

    fn error(&self, kind: EvaluationErrorKind) -> EvaluationError {
        EvaluationError::new(kind, Trail::root(self.module.label()).to_string())
    }

    /// Runs `f`, turning a panic into an `Internal` error
    fn guarded<T>(&self, f: impl FnOnce() -> EvaluationResult<T>) -> EvaluationResult<T> {
        panic::catch_unwind(AssertUnwindSafe(f)).unwrap_or_else(|payload| {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "evaluation panicked".to_owned());
            Err(self.error(EvaluationErrorKind::Internal(message)))
        })
    }
}

/// The result of checking a formula within one model of a [`Library`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModelOutcome {
    pub model: String,
    pub result: EvaluationResult<Verdict>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LibraryReport {
    /// One entry per model that was tried, in order
    pub outcomes: Vec<ModelOutcome>,
}

impl LibraryReport {
    /// The countermodel of the refuting model, if any
    pub fn countermodel(&self) -> Option<&Countermodel> {
        self.outcomes
            .iter()
            .find_map(|o| o.result.as_ref().ok().and_then(Verdict::countermodel))
    }

    pub fn is_refuted(&self) -> bool {
        self.countermodel().is_some()
    }

    pub fn failures(&self) -> impl Iterator<Item = (&str, &EvaluationError)> + '_ {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (o.model.as_str(), e)))
    }

    /// Whether every model was searched completely without finding a countermodel
    pub fn survived_all(&self) -> bool {
        self.outcomes
            .iter()
            .all(|o| matches!(o.result, Ok(Verdict::Survived { .. })))
    }
}

/// The models of a [`CheckerConfig`], built once and reused for any number of checks
pub struct Library {
    models: Vec<Model>,
    config: CheckerConfig,
}

impl Library {
    pub fn new(config: CheckerConfig) -> Self {
        Library {
            models: config.models.iter().map(|kind| kind.build()).collect(),
            config,
        }
    }

    pub fn models(&self) -> &[Model] {
        &self.models
    }

    pub fn config(&self) -> &CheckerConfig {
        &self.config
    }

    /// Checks `formula` in every model, in order, until one refutes it. A model whose evaluation
    /// fails is recorded and the next one is tried.
    pub fn check<'a>(
        &'a self,
        module: &'a ModuleDefinitions,
        resolver: &'a dyn ModuleResolver,
        formula: &'a Element,
    ) -> LibraryReport {
        let mut report = LibraryReport::default();
        for model in &self.models {
            let result = Checker::new(model, module, resolver, self.config.evaluation)
                .with_max_passes(self.config.max_passes)
                .check(formula);
            let refuted = matches!(result, Ok(Verdict::Refuted(_)));
            report.outcomes.push(ModelOutcome {
                model: model.name().to_owned(),
                result,
            });
            if refuted {
                break;
            }
        }
        report
    }
}

/// Checks `formula` in every model of `config`, see [`Library::check`]
pub fn check_library(
    config: &CheckerConfig,
    module: &ModuleDefinitions,
    resolver: &dyn ModuleResolver,
    formula: &Element,
) -> LibraryReport {
    Library::new(config.clone()).check(module, resolver, formula)
}
