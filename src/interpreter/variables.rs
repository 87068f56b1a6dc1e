//! Assignments of the free and bound variables of a formula.
//!
//! Subject, predicate and function variables share one implementation, [`VariableSet`], which only
//! differs in how many choices a variable has (see [`VariableKey::bound`]). A selection is an
//! index into the model: an entity for subject variables, an entry of the predicate or function
//! pool of the variable's arity otherwise.
use crate::model::Model;
use std::fmt::Debug;

pub trait VariableKey: Copy + Eq + Debug {
    /// Number of possible selections of this variable within `model`
    fn bound(&self, model: &Model) -> usize;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubjectVariable<'a> {
    pub name: &'a str,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PredicateVariable<'a> {
    pub name: &'a str,
    pub arity: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FunctionVariable<'a> {
    pub name: &'a str,
    pub arity: usize,
}

impl<'a> SubjectVariable<'a> {
    pub fn new(name: &'a str) -> Self {
        SubjectVariable { name }
    }
}

impl<'a> PredicateVariable<'a> {
    pub fn new(name: &'a str, arity: usize) -> Self {
        PredicateVariable { name, arity }
    }
}

impl<'a> FunctionVariable<'a> {
    pub fn new(name: &'a str, arity: usize) -> Self {
        FunctionVariable { name, arity }
    }
}

impl VariableKey for SubjectVariable<'_> {
    fn bound(&self, model: &Model) -> usize {
        model.entity_count()
    }
}

impl VariableKey for PredicateVariable<'_> {
    fn bound(&self, model: &Model) -> usize {
        model.predicate_pool_size(self.arity)
    }
}

impl VariableKey for FunctionVariable<'_> {
    fn bound(&self, model: &Model) -> usize {
        model.function_pool_size(self.arity)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Allocation<K> {
    key: K,
    selection: usize,
}

/// An ordered list of variable allocations.
///
/// The order is the order of first reference, which is also the order of enumeration. A variable
/// may occur more than once (a quantifier over a variable that is already bound); lookups and
/// removals always use the last occurrence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VariableSet<K> {
    allocations: Vec<Allocation<K>>,
}

pub type SubjectVariables<'a> = VariableSet<SubjectVariable<'a>>;
pub type PredicateVariables<'a> = VariableSet<PredicateVariable<'a>>;
pub type FunctionVariables<'a> = VariableSet<FunctionVariable<'a>>;

impl<K: VariableKey> Default for VariableSet<K> {
    fn default() -> Self {
        VariableSet::new()
    }
}

impl<K: VariableKey> VariableSet<K> {
    pub fn new() -> Self {
        VariableSet {
            allocations: Vec::new(),
        }
    }

    fn position(&self, key: &K) -> Option<usize> {
        self.allocations.iter().rposition(|a| a.key == *key)
    }

    /// Returns the current selection of `key`. A variable seen for the first time is appended
    /// with selection `0`.
    pub fn get(&mut self, key: K) -> usize {
        match self.position(&key) {
            Some(i) => self.allocations[i].selection,
            None => {
                self.allocations.push(Allocation { key, selection: 0 });
                0
            }
        }
    }

    /// Binds `key` with selection `0`, shadowing earlier occurrences
    pub fn add(&mut self, key: K) {
        self.force_add(key, 0);
    }

    /// Removes the last occurrence of `key`. Returns `false` if there was none.
    pub fn remove(&mut self, key: &K) -> bool {
        self.force_remove(key)
    }

    /// Binds `key` with the given selection, shadowing earlier occurrences
    pub fn force_add(&mut self, key: K, selection: usize) {
        self.allocations.push(Allocation { key, selection });
    }

    pub fn force_remove(&mut self, key: &K) -> bool {
        match self.position(key) {
            Some(i) => {
                self.allocations.remove(i);
                true
            }
            None => false,
        }
    }

    /// Increments the selection of the last occurrence of `key`, without any carry. Returns
    /// `false` if `key` is not allocated.
    pub fn increase_selection(&mut self, key: &K) -> bool {
        match self.position(key) {
            Some(i) => {
                self.allocations[i].selection += 1;
                true
            }
            None => false,
        }
    }

    /// Advances to the next combination of selections, counting like an odometer whose last
    /// allocated variable is the fastest digit. Returns `false` once every combination was visited;
    /// all selections are then back at `0`.
    ///
    /// # Example
    /// ```
    /// use attomodel::interpreter::{SubjectVariable, SubjectVariables};
    /// use attomodel::ModelKind;
    ///
    /// let model = ModelKind::Three.build();
    /// let (x, y) = (SubjectVariable::new("x"), SubjectVariable::new("y"));
    /// let mut vars = SubjectVariables::new();
    /// vars.get(x);
    /// vars.get(y);
    /// let mut seen = vec![(vars.get(x), vars.get(y))];
    /// while vars.next(&model) {
    ///     seen.push((vars.get(x), vars.get(y)));
    /// }
    /// assert_eq!(seen.len(), 9);
    /// assert_eq!(seen[1], (0, 1));
    /// assert_eq!(seen[3], (1, 0));
    /// assert_eq!((vars.get(x), vars.get(y)), (0, 0));
    /// ```
    pub fn next(&mut self, model: &Model) -> bool {
        for allocation in self.allocations.iter_mut().rev() {
            if allocation.selection + 1 < allocation.key.bound(model) {
                allocation.selection += 1;
                return true;
            }
            allocation.selection = 0;
        }
        false
    }

    pub fn len(&self) -> usize {
        self.allocations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.allocations.is_empty()
    }

    pub fn clear(&mut self) {
        self.allocations.clear();
    }

    /// All allocations in order of allocation
    pub fn iter(&self) -> impl Iterator<Item = (K, usize)> + '_ {
        self.allocations.iter().map(|a| (a.key, a.selection))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ModelKind;

    #[test]
    fn shadowing() {
        let x = SubjectVariable::new("x");
        let mut vars = SubjectVariables::new();
        assert_eq!(vars.get(x), 0);
        vars.add(x);
        assert!(vars.increase_selection(&x));
        vars.force_add(x, 2);
        assert_eq!(vars.get(x), 2);
        assert!(vars.force_remove(&x));
        assert_eq!(vars.get(x), 1);
        assert!(vars.remove(&x));
        assert_eq!(vars.get(x), 0);
        assert_eq!(vars.len(), 1);
        assert!(vars.remove(&x));
        assert!(!vars.remove(&x));
        assert!(!vars.increase_selection(&x));
    }

    #[test]
    fn empty_pools_carry_immediately() {
        let model = ModelKind::Three.build();
        let mut vars = PredicateVariables::new();
        vars.get(PredicateVariable::new("P", 7));
        assert!(!vars.next(&model));
        let mut vars = FunctionVariables::new();
        assert!(!vars.next(&model));
    }

    quickcheck! {
        /// The number of combinations is the product of all bounds
        fn odometer_visits_every_combination(arities: Vec<u8>) -> bool {
            let model = ModelKind::Four.build();
            let names: Vec<String> = (0..arities.len().min(4)).map(|i| format!("P{}", i)).collect();
            let mut vars = PredicateVariables::new();
            let mut expected = 1;
            for (name, arity) in names.iter().zip(arities.iter()) {
                let key = PredicateVariable::new(name, *arity as usize % 4);
                vars.get(key);
                expected *= key.bound(&model);
            }
            let mut count = 1;
            while vars.next(&model) {
                count += 1;
            }
            count == expected && vars.iter().all(|(_, s)| s == 0)
        }
    }
}
