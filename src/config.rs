use crate::model::ModelKind;

#[cfg(feature = "use-serde")]
use serde::{Deserialize, Serialize};

/// How conjunctions, disjunctions, negations and equivalences treat their children
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "use-serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "use-serde", serde(rename_all = "kebab-case"))]
pub enum Connectives {
    /// Stop as soon as the value is determined
    #[default]
    ShortCircuit,
    /// Evaluate every child. The value is the same, but a failure in a child that short circuit
    /// evaluation would skip is reported.
    Exhaustive,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "use-serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "use-serde", serde(default))]
pub struct EvaluationOptions {
    pub connectives: Connectives,
    /// Only entities satisfying the predicate constant `isSet` become members of a class
    pub class_requires_set: bool,
    /// Maximum nesting of operators and definitions
    pub max_depth: usize,
}

impl Default for EvaluationOptions {
    fn default() -> Self {
        EvaluationOptions {
            connectives: Connectives::ShortCircuit,
            class_requires_set: true,
            max_depth: 512,
        }
    }
}

/// Settings for checking formulas against the model library
///
/// # Example
/// ```
/// use attomodel::{CheckerConfig, ModelKind};
///
/// let config = CheckerConfig::default();
/// assert_eq!(config.models, ModelKind::ALL.to_vec());
/// assert!(config.evaluation.class_requires_set);
/// assert_eq!(config.max_passes, None);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "use-serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "use-serde", serde(default))]
pub struct CheckerConfig {
    /// Models to try, in this order
    pub models: Vec<ModelKind>,
    pub evaluation: EvaluationOptions,
    /// Give up on a model after this many evaluation passes
    pub max_passes: Option<u64>,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        CheckerConfig {
            models: ModelKind::ALL.to_vec(),
            evaluation: EvaluationOptions::default(),
            max_passes: None,
        }
    }
}
