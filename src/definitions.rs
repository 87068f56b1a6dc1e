//! Predicate and function constants defined by a formula or term, and the resolution of constant
//! names against definitions and model primitives.
use crate::{
    element::Element,
    error::{DefinitionError, EvaluationErrorKind},
    model::{Model, SharedFunction, SharedPredicate},
    table::ArityTable,
};
use std::collections::HashMap;

/// _name(parameters) :<-> body_
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PredicateDefinition {
    name: String,
    parameters: Vec<String>,
    body: Element,
}

/// _name(parameters) := body_
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FunctionDefinition {
    name: String,
    parameters: Vec<String>,
    body: Element,
}

macro_rules! definition {
    ($t:ident) => {
        impl $t {
            /// # Errors
            /// `DuplicateParameter` if a parameter name occurs twice
            pub fn new(
                name: impl Into<String>,
                parameters: Vec<String>,
                body: Element,
            ) -> Result<Self, DefinitionError> {
                let name = name.into();
                if let Some(parameter) = first_duplicate(&parameters) {
                    return Err(DefinitionError::DuplicateParameter {
                        name,
                        parameter: parameter.to_owned(),
                    });
                }
                Ok($t {
                    name,
                    parameters,
                    body,
                })
            }

            pub fn name(&self) -> &str {
                &self.name
            }

            pub fn parameters(&self) -> &[String] {
                &self.parameters
            }

            pub fn arity(&self) -> usize {
                self.parameters.len()
            }

            pub fn body(&self) -> &Element {
                &self.body
            }
        }
    };
}

definition!(PredicateDefinition);
definition!(FunctionDefinition);

fn first_duplicate(parameters: &[String]) -> Option<&str> {
    parameters
        .iter()
        .enumerate()
        .find(|(i, p)| parameters[..*i].contains(p))
        .map(|(_, p)| p.as_str())
}

/// The constants defined in one module
#[derive(Clone, Debug)]
pub struct ModuleDefinitions {
    label: String,
    predicates: ArityTable<PredicateDefinition>,
    functions: ArityTable<FunctionDefinition>,
}

impl ModuleDefinitions {
    pub fn new(label: impl Into<String>) -> Self {
        ModuleDefinitions {
            label: label.into(),
            predicates: ArityTable::new(),
            functions: ArityTable::new(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// # Errors
    /// `AlreadyDefined` if a predicate with the same name and arity is already defined
    pub fn add_predicate(
        &mut self,
        definition: PredicateDefinition,
    ) -> Result<(), DefinitionError> {
        if self.predicates.contains(&definition.name, definition.arity()) {
            return Err(self.already_defined(&definition.name, definition.arity()));
        }
        self.predicates
            .insert(definition.name.clone(), definition.arity(), definition);
        Ok(())
    }

    /// # Errors
    /// `AlreadyDefined` if a function with the same name and arity is already defined
    pub fn add_function(&mut self, definition: FunctionDefinition) -> Result<(), DefinitionError> {
        if self.functions.contains(&definition.name, definition.arity()) {
            return Err(self.already_defined(&definition.name, definition.arity()));
        }
        self.functions
            .insert(definition.name.clone(), definition.arity(), definition);
        Ok(())
    }

    fn already_defined(&self, name: &str, arity: usize) -> DefinitionError {
        DefinitionError::AlreadyDefined {
            module: self.label.clone(),
            name: name.to_owned(),
            arity,
        }
    }

    pub fn predicate(&self, name: &str, arity: usize) -> Option<&PredicateDefinition> {
        self.predicates.get(name, arity)
    }

    pub fn function(&self, name: &str, arity: usize) -> Option<&FunctionDefinition> {
        self.functions.get(name, arity)
    }

    pub fn predicate_count(&self) -> usize {
        self.predicates.len()
    }

    pub fn function_count(&self) -> usize {
        self.functions.len()
    }
}

/// Gives access to the definitions of other modules, by the label used in qualified names like
/// `label.name`.
pub trait ModuleResolver {
    fn resolve(&self, label: &str) -> Option<&ModuleDefinitions>;
}

/// A resolver which knows no modules
#[derive(Clone, Copy, Debug, Default)]
pub struct NoImports;

impl ModuleResolver for NoImports {
    fn resolve(&self, _: &str) -> Option<&ModuleDefinitions> {
        None
    }
}

/// Loaded modules by label
#[derive(Clone, Debug, Default)]
pub struct ModuleRegistry {
    modules: HashMap<String, ModuleDefinitions>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        ModuleRegistry {
            modules: HashMap::new(),
        }
    }

    /// Registers `module` under its own label, returning the module it replaced
    pub fn insert(&mut self, module: ModuleDefinitions) -> Option<ModuleDefinitions> {
        self.modules.insert(module.label.clone(), module)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl ModuleResolver for ModuleRegistry {
    fn resolve(&self, label: &str) -> Option<&ModuleDefinitions> {
        self.modules.get(label)
    }
}

/// What a constant name stands for: a primitive of the model, or a definition to be evaluated
/// within the module that owns it.
#[derive(Debug)]
pub enum Resolution<'a, P, D> {
    Primitive(&'a P),
    Defined {
        definition: &'a D,
        owner: &'a ModuleDefinitions,
    },
}

pub type PredicateResolution<'a> = Resolution<'a, SharedPredicate, PredicateDefinition>;
pub type FunctionResolution<'a> = Resolution<'a, SharedFunction, FunctionDefinition>;

/// Resolves the predicate constant `name` with `arity` arguments as seen from the module `scope`.
///
/// A qualified name `label.local` is looked up among the definitions of the module `label`. Other
/// names are looked up among the definitions of `scope`. If no definition matches, the constant
/// of the model named `local` (or `name`) is used.
///
/// # Errors
/// * `UnknownModule` - if the label of a qualified name cannot be resolved
/// * `UnknownPredicateConstant` - if neither a definition nor a model constant matches
///
/// # Example
/// ```
/// use attomodel::definitions::{resolve_predicate, ModuleDefinitions, NoImports, Resolution};
/// use attomodel::ModelKind;
///
/// let model = ModelKind::Three.build();
/// let module = ModuleDefinitions::new("set");
/// let r = resolve_predicate(&model, &NoImports, &module, "in", 2).unwrap();
/// assert!(matches!(r, Resolution::Primitive(_)));
/// assert!(resolve_predicate(&model, &NoImports, &module, "in", 3).is_err());
/// assert!(resolve_predicate(&model, &NoImports, &module, "logic.in", 2).is_err());
/// ```
pub fn resolve_predicate<'a>(
    model: &'a Model,
    resolver: &'a dyn ModuleResolver,
    scope: &'a ModuleDefinitions,
    name: &str,
    arity: usize,
) -> Result<PredicateResolution<'a>, EvaluationErrorKind> {
    let (owner, local) = owner_of(resolver, scope, name)?;
    if let Some(definition) = owner.predicate(local, arity) {
        return Ok(Resolution::Defined { definition, owner });
    }
    model
        .predicate_constant(local, arity)
        .map(Resolution::Primitive)
        .ok_or_else(|| EvaluationErrorKind::UnknownPredicateConstant {
            name: name.to_owned(),
            arity,
        })
}

/// Resolves the function constant `name` with `arity` arguments as seen from the module `scope`,
/// the same way [`resolve_predicate`] resolves predicate constants.
pub fn resolve_function<'a>(
    model: &'a Model,
    resolver: &'a dyn ModuleResolver,
    scope: &'a ModuleDefinitions,
    name: &str,
    arity: usize,
) -> Result<FunctionResolution<'a>, EvaluationErrorKind> {
    let (owner, local) = owner_of(resolver, scope, name)?;
    if let Some(definition) = owner.function(local, arity) {
        return Ok(Resolution::Defined { definition, owner });
    }
    model
        .function_constant(local, arity)
        .map(Resolution::Primitive)
        .ok_or_else(|| EvaluationErrorKind::UnknownFunctionConstant {
            name: name.to_owned(),
            arity,
        })
}

fn owner_of<'a, 'n>(
    resolver: &'a dyn ModuleResolver,
    scope: &'a ModuleDefinitions,
    name: &'n str,
) -> Result<(&'a ModuleDefinitions, &'n str), EvaluationErrorKind> {
    match name.split_once('.') {
        Some((label, local)) if label == scope.label => Ok((scope, local)),
        Some((label, local)) => resolver
            .resolve(label)
            .map(|module| (module, local))
            .ok_or_else(|| EvaluationErrorKind::UnknownModule(label.to_owned())),
        None => Ok((scope, name)),
    }
}
