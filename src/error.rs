use crate::types::*;
use thiserror::Error;

/// The reason an evaluation pass was aborted
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvaluationErrorKind {
    /// An atom was found where a list was required, or a list has the wrong shape
    #[error("wrong calling convention: {0}")]
    WrongCallingConvention(String),
    #[error("unknown logical operator {0:?}")]
    UnknownOperator(String),
    #[error("unknown term operator {0:?}")]
    UnknownTermOperator(String),
    #[error("unknown predicate constant {name:?} with {arity} argument(s)")]
    UnknownPredicateConstant { name: String, arity: usize },
    #[error("unknown function constant {name:?} with {arity} argument(s)")]
    UnknownFunctionConstant { name: String, arity: usize },
    /// A qualified name refers to a module label which is not loaded
    #[error("module {0:?} is not loaded")]
    UnknownModule(String),
    /// The model has no predicate or function variable interpretation for this arity
    #[error("model has no {kind} variable interpretation for {arity} argument(s)")]
    MissingInterpretation { kind: &'static str, arity: usize },
    #[error("{name} accepts {expected} argument(s) but got {actual}")]
    ArityMismatch {
        name: String,
        expected: Arity,
        actual: usize,
    },
    #[error("nesting exceeds {0} levels")]
    DepthExceeded(usize),
    #[error("evaluation failed unexpectedly: {0}")]
    Internal(String),
}

impl EvaluationErrorKind {
    pub fn code(&self) -> ErrorCode {
        use EvaluationErrorKind::*;
        match self {
            WrongCallingConvention(_) => 37400,
            UnknownOperator(_) => 37410,
            UnknownTermOperator(_) => 37420,
            UnknownPredicateConstant { .. } => 37430,
            UnknownFunctionConstant { .. } => 37440,
            UnknownModule(_) => 37450,
            MissingInterpretation { .. } => 37460,
            ArityMismatch { .. } => 37470,
            DepthExceeded(_) => 37480,
            Internal(_) => 37499,
        }
    }
}

/// A error which aborts the evaluation of a formula. It carries the position within the formula
/// where it occured.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} (at {location})")]
pub struct EvaluationError {
    kind: EvaluationErrorKind,
    location: String,
}

impl EvaluationError {
    pub fn new(kind: EvaluationErrorKind, location: String) -> Self {
        EvaluationError { kind, location }
    }

    pub fn kind(&self) -> &EvaluationErrorKind {
        &self.kind
    }

    pub fn code(&self) -> ErrorCode {
        self.kind.code()
    }

    pub fn message(&self) -> String {
        self.kind.to_string()
    }

    pub fn location(&self) -> &str {
        &self.location
    }
}

pub type EvaluationResult<T> = Result<T, EvaluationError>;

/// A error produced while assembling a [`Model`][crate::model::Model]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("argument ranges {0} and {1} do not overlap")]
    DisjointArity(Arity, Arity),
    #[error("{name} does not accept {arity} argument(s)")]
    ArityNotAccepted { name: String, arity: usize },
    #[error("model has no entities")]
    EmptyDomain,
    #[error("comprehension table of width {width} needs {expected} entries, found {actual}")]
    ComprehensionSize {
        width: usize,
        expected: usize,
        actual: usize,
    },
    #[error("comprehension refers to entity {0} which does not exist")]
    UnknownEntity(usize),
    #[error("{name} cannot be used in a domain of {entities} entities")]
    DomainMismatch { name: String, entities: usize },
}

/// A error produced while registering definitions of a module
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DefinitionError {
    #[error("{name} with {arity} argument(s) is already defined in module {module}")]
    AlreadyDefined {
        module: String,
        name: String,
        arity: usize,
    },
    #[error("parameter {parameter} of {name} is declared twice")]
    DuplicateParameter { name: String, parameter: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_and_messages() {
        let e = EvaluationError::new(
            EvaluationErrorKind::UnknownPredicateConstant {
                name: "isSet".to_owned(),
                arity: 1,
            },
            "set/1/0".to_owned(),
        );
        assert_eq!(e.code(), 37430);
        assert_eq!(
            e.message(),
            "unknown predicate constant \"isSet\" with 1 argument(s)"
        );
        assert_eq!(e.location(), "set/1/0");
        assert_eq!(
            e.to_string(),
            "unknown predicate constant \"isSet\" with 1 argument(s) (at set/1/0)"
        );
    }
}
