//! Finite models: a domain of [`Entity`]s together with the predicates and functions that
//! predicate and function variables range over, and the named constants of the signature.
//!
//! A [`Model`] is immutable once built with a [`ModelBuilder`]. It can therefore be shared between
//! any number of evaluations, also across threads. The ready-made models used for refutation are
//! in [`library`].
mod comprehension;
mod entity;
pub mod function;
pub mod library;
pub mod predicate;

pub use comprehension::ComprehensionTable;
pub use entity::Entity;
pub use function::{Function, SharedFunction};
pub use library::ModelKind;
pub use predicate::{Predicate, SharedPredicate};

use crate::{error::ModelError, table::ArityTable};
use std::fmt;

pub struct Model {
    name: String,
    description: String,
    entities: Vec<Entity>,
    predicate_pools: Vec<Vec<SharedPredicate>>,
    function_pools: Vec<Vec<SharedFunction>>,
    predicate_constants: ArityTable<SharedPredicate>,
    function_constants: ArityTable<SharedFunction>,
    comprehension: ComprehensionTable,
}

impl Model {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// # Panics
    /// This method panics if `index >= self.entity_count()`
    pub fn entity(&self, index: usize) -> &Entity {
        &self.entities[index]
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Number of predicates a predicate variable with `arity` arguments can stand for
    pub fn predicate_pool_size(&self, arity: usize) -> usize {
        self.predicate_pools.get(arity).map_or(0, Vec::len)
    }

    /// # Panics
    /// This method panics if `index >= self.predicate_pool_size(arity)`
    pub fn predicate(&self, arity: usize, index: usize) -> &SharedPredicate {
        &self.predicate_pools[arity][index]
    }

    pub fn predicate_constant(&self, name: &str, arity: usize) -> Option<&SharedPredicate> {
        self.predicate_constants.get(name, arity)
    }

    /// Number of functions a function variable with `arity` arguments can stand for
    pub fn function_pool_size(&self, arity: usize) -> usize {
        self.function_pools.get(arity).map_or(0, Vec::len)
    }

    /// # Panics
    /// This method panics if `index >= self.function_pool_size(arity)`
    pub fn function(&self, arity: usize, index: usize) -> &SharedFunction {
        &self.function_pools[arity][index]
    }

    pub fn function_constant(&self, name: &str, arity: usize) -> Option<&SharedFunction> {
        self.function_constants.get(name, arity)
    }

    /// The entity representing the class of exactly the given members
    pub fn comprehension(&self, members: &[Entity]) -> &Entity {
        &self.entities[self.comprehension.select(members)]
    }
}

impl fmt::Debug for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Model")
            .field("name", &self.name)
            .field("entities", &self.entities.len())
            .field(
                "predicate_pools",
                &self.predicate_pools.iter().map(Vec::len).collect::<Vec<_>>(),
            )
            .field(
                "function_pools",
                &self.function_pools.iter().map(Vec::len).collect::<Vec<_>>(),
            )
            .field("predicate_constants", &self.predicate_constants.len())
            .field("function_constants", &self.function_constants.len())
            .finish()
    }
}

/// Assembles a [`Model`].
///
/// The constants `TRUE` and `FALSE` (no arguments) and `equal` (two arguments) are always bound
/// and may be replaced.
///
/// # Example
/// ```
/// use attomodel::model::{predicate, function, ModelBuilder, ComprehensionTable};
///
/// let model = ModelBuilder::new("two", "two ordered entities")
///     .entity("0", "zero")
///     .entity("1", "one")
///     .predicate_variable(2, predicate::less())
///     .predicate_variable(2, predicate::equal())
///     .function_variable(1, function::successor())
///     .predicate_constant("in", 2, predicate::less())
///     .comprehension(ComprehensionTable::new(1, vec![0, 1], 1).unwrap())
///     .build()
///     .unwrap();
/// assert_eq!(model.entity_count(), 2);
/// assert_eq!(model.predicate_pool_size(2), 2);
/// assert_eq!(model.predicate_pool_size(1), 0);
/// assert!(model.predicate_constant("equal", 2).is_some());
/// assert_eq!(model.comprehension(&[model.entity(0).clone()]).label(), "1");
/// ```
pub struct ModelBuilder {
    name: String,
    description: String,
    entities: Vec<Entity>,
    predicate_pools: Vec<Vec<SharedPredicate>>,
    function_pools: Vec<Vec<SharedFunction>>,
    predicate_constants: ArityTable<SharedPredicate>,
    function_constants: ArityTable<SharedFunction>,
    comprehension: ComprehensionTable,
}

impl ModelBuilder {
    pub fn new(name: &str, description: &str) -> Self {
        let mut predicate_constants = ArityTable::new();
        predicate_constants.insert("TRUE".to_owned(), 0, predicate::always_true());
        predicate_constants.insert("FALSE".to_owned(), 0, predicate::always_false());
        predicate_constants.insert("equal".to_owned(), 2, predicate::equal());
        ModelBuilder {
            name: name.to_owned(),
            description: description.to_owned(),
            entities: Vec::new(),
            predicate_pools: Vec::new(),
            function_pools: Vec::new(),
            predicate_constants,
            function_constants: ArityTable::new(),
            comprehension: ComprehensionTable::constant(0),
        }
    }

    /// Adds the next entity; its value is the number of entities added before it
    pub fn entity(mut self, label: &str, description: &str) -> Self {
        let value = self.entities.len();
        self.entities.push(Entity::new(value, label, description));
        self
    }

    pub fn predicate_variable(mut self, arity: usize, predicate: SharedPredicate) -> Self {
        pool_at(&mut self.predicate_pools, arity).push(predicate);
        self
    }

    pub fn function_variable(mut self, arity: usize, function: SharedFunction) -> Self {
        pool_at(&mut self.function_pools, arity).push(function);
        self
    }

    pub fn predicate_constant(
        mut self,
        name: &str,
        arity: usize,
        predicate: SharedPredicate,
    ) -> Self {
        self.predicate_constants.insert(name.to_owned(), arity, predicate);
        self
    }

    pub fn function_constant(
        mut self,
        name: &str,
        arity: usize,
        function: SharedFunction,
    ) -> Self {
        self.function_constants.insert(name.to_owned(), arity, function);
        self
    }

    pub fn comprehension(mut self, comprehension: ComprehensionTable) -> Self {
        self.comprehension = comprehension;
        self
    }

    /// # Errors
    /// * `EmptyDomain` - if no entity was added
    /// * `ArityNotAccepted` - if a predicate or function was added to a pool or bound as constant
    /// for a number of arguments it does not accept
    /// * `DomainMismatch` - if a predicate or function cannot handle the entities of the model,
    /// like a constant function of an entity that was not added
    /// * `UnknownEntity` - if the comprehension table produces an entity that was not added
    pub fn build(self) -> Result<Model, ModelError> {
        let entities = self.entities.len();
        if entities == 0 {
            return Err(ModelError::EmptyDomain);
        }
        for (arity, pool) in self.predicate_pools.iter().enumerate() {
            for p in pool {
                check_arity(p.name(), p.arity(), arity)?;
                check_domain(p.name(), p.fits_domain(entities), entities)?;
            }
        }
        for (arity, pool) in self.function_pools.iter().enumerate() {
            for f in pool {
                check_arity(f.name(), f.arity(), arity)?;
                check_domain(f.name(), f.fits_domain(entities), entities)?;
            }
        }
        for (name, arity, p) in self.predicate_constants.iter() {
            check_arity(name, p.arity(), arity)?;
            check_domain(name, p.fits_domain(entities), entities)?;
        }
        for (name, arity, f) in self.function_constants.iter() {
            check_arity(name, f.arity(), arity)?;
            check_domain(name, f.fits_domain(entities), entities)?;
        }
        if let Some(missing) = self
            .comprehension
            .targets()
            .find(|v| *v >= entities)
        {
            return Err(ModelError::UnknownEntity(missing));
        }
        Ok(Model {
            name: self.name,
            description: self.description,
            entities: self.entities,
            predicate_pools: self.predicate_pools,
            function_pools: self.function_pools,
            predicate_constants: self.predicate_constants,
            function_constants: self.function_constants,
            comprehension: self.comprehension,
        })
    }
}

fn pool_at<T>(pools: &mut Vec<Vec<T>>, arity: usize) -> &mut Vec<T> {
    if pools.len() <= arity {
        pools.resize_with(arity + 1, Vec::new);
    }
    &mut pools[arity]
}

fn check_domain(name: &str, fits: bool, entities: usize) -> Result<(), ModelError> {
    if fits {
        Ok(())
    } else {
        Err(ModelError::DomainMismatch {
            name: name.to_owned(),
            entities,
        })
    }
}

fn check_arity(name: &str, range: crate::Arity, arity: usize) -> Result<(), ModelError> {
    if range.accepts(arity) {
        Ok(())
    } else {
        Err(ModelError::ArityNotAccepted {
            name: name.to_owned(),
            arity,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> ModelBuilder {
        ModelBuilder::new("test", "").entity("a", "").entity("b", "")
    }

    #[test]
    fn baseline_constants_can_be_shadowed() {
        let model = builder()
            .predicate_constant("TRUE", 0, predicate::always_false())
            .build()
            .unwrap();
        let p = model.predicate_constant("TRUE", 0).unwrap();
        assert!(!p.decide(&[]));
        assert!(model.predicate_constant("FALSE", 0).is_some());
        assert!(model.predicate_constant("equal", 3).is_none());
    }

    #[test]
    fn pools_reject_unacceptable_arities() {
        let r = builder().predicate_variable(1, predicate::less()).build();
        assert_eq!(
            r.unwrap_err(),
            ModelError::ArityNotAccepted {
                name: "less".to_owned(),
                arity: 1
            }
        );
        let r = builder().function_constant("p", 0, function::projection(0)).build();
        assert!(matches!(r, Err(ModelError::ArityNotAccepted { .. })));
    }

    #[test]
    fn pools_may_be_absent() {
        let model = builder().function_variable(2, function::maximum()).build().unwrap();
        assert_eq!(model.function_pool_size(0), 0);
        assert_eq!(model.function_pool_size(1), 0);
        assert_eq!(model.function_pool_size(2), 1);
        assert_eq!(model.function_pool_size(9), 0);
    }

    #[test]
    fn empty_domain_and_bad_comprehension() {
        assert_eq!(
            ModelBuilder::new("x", "").build().unwrap_err(),
            ModelError::EmptyDomain
        );
        let r = builder()
            .comprehension(ComprehensionTable::new(1, vec![0, 2], 1).unwrap())
            .build();
        assert_eq!(r.unwrap_err(), ModelError::UnknownEntity(2));
    }

    #[test]
    fn blocks_must_fit_the_domain() {
        let r = builder()
            .function_constant("c", 0, function::constant(2))
            .build();
        assert_eq!(
            r.unwrap_err(),
            ModelError::DomainMismatch {
                name: "c".to_owned(),
                entities: 2
            }
        );
        let r = builder()
            .predicate_variable(2, predicate::not(predicate::member_of(vec![0])))
            .build();
        assert!(matches!(r, Err(ModelError::DomainMismatch { entities: 2, .. })));
        let r = builder()
            .predicate_constant("in", 2, predicate::member_of(vec![0, 1]))
            .function_variable(0, function::constant(1))
            .build();
        assert!(r.is_ok());
    }
}
