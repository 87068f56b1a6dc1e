use std::fmt;
use std::sync::Arc;

/// One element of the domain of a [`Model`][super::Model].
///
/// Entities are numbered densely from `0` within their model; the number is used for enumeration
/// and by the ordering and equality predicates.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Entity {
    value: usize,
    label: Arc<str>,
    description: Arc<str>,
}

impl Entity {
    pub(crate) fn new(value: usize, label: &str, description: &str) -> Self {
        Entity {
            value,
            label: Arc::from(label),
            description: Arc::from(description),
        }
    }

    pub fn value(&self) -> usize {
        self.value
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}
