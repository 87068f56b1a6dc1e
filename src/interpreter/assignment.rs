use std::fmt;

#[cfg(feature = "use-serde")]
use serde::{Deserialize, Serialize};

/// The selection of one variable, together with the label of what was selected
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "use-serde", derive(Serialize, Deserialize))]
pub struct Binding {
    pub name: String,
    /// Always `0` for subject variables
    pub arity: usize,
    pub selection: usize,
    pub label: String,
}

impl Binding {
    pub fn new(name: &str, arity: usize, selection: usize, label: &str) -> Self {
        Binding {
            name: name.to_owned(),
            arity,
            selection,
            label: label.to_owned(),
        }
    }
}

/// A complete assignment of the free variables of a formula within one model, recorded when the
/// formula evaluated to false. It can be replayed with
/// [`Checker::replay`][crate::checker::Checker::replay].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "use-serde", derive(Serialize, Deserialize))]
pub struct Countermodel {
    pub model: String,
    pub subjects: Vec<Binding>,
    pub predicates: Vec<Binding>,
    pub functions: Vec<Binding>,
}

impl Countermodel {
    /// The selected entity label of the subject variable `name`
    pub fn subject(&self, name: &str) -> Option<&str> {
        self.subjects
            .iter()
            .rev()
            .find(|b| b.name == name)
            .map(|b| b.label.as_str())
    }

    pub fn predicate(&self, name: &str, arity: usize) -> Option<&str> {
        find(&self.predicates, name, arity)
    }

    pub fn function(&self, name: &str, arity: usize) -> Option<&str> {
        find(&self.functions, name, arity)
    }
}

fn find<'b>(bindings: &'b [Binding], name: &str, arity: usize) -> Option<&'b str> {
    bindings
        .iter()
        .find(|b| b.name == name && b.arity == arity)
        .map(|b| b.label.as_str())
}

impl fmt::Display for Countermodel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "model {}", self.model)?;
        let mut separator = ": ";
        for b in &self.subjects {
            write!(f, "{}{} = {}", separator, b.name, b.label)?;
            separator = ", ";
        }
        for b in self.predicates.iter().chain(self.functions.iter()) {
            write!(f, "{}{}/{} = {}", separator, b.name, b.arity, b.label)?;
            separator = ", ";
        }
        Ok(())
    }
}
