use super::Entity;
use crate::types::*;
use std::fmt;
use std::sync::Arc;

/// A named total map from a list of entities to an entity of the same domain
pub trait Function: fmt::Debug + Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    fn arity(&self) -> Arity;

    /// Maps the arguments to an element of `domain`. Callers make sure that the number of
    /// arguments is accepted by [`arity`](Function::arity).
    fn map<'d>(&self, domain: &'d [Entity], arguments: &[Entity]) -> &'d Entity;

    /// Whether the function only produces entities of a domain with `entities` elements
    fn fits_domain(&self, _entities: usize) -> bool {
        true
    }
}

pub type SharedFunction = Arc<dyn Function>;

/// Ignores its arguments. The model using it must contain the entity.
#[derive(Debug)]
pub struct Constant {
    value: usize,
    name: String,
}

impl Function for Constant {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        "constant"
    }

    fn arity(&self) -> Arity {
        Arity::ANY
    }

    fn map<'d>(&self, domain: &'d [Entity], _: &[Entity]) -> &'d Entity {
        &domain[self.value]
    }

    fn fits_domain(&self, entities: usize) -> bool {
        self.value < entities
    }
}

/// Selects one of its arguments
#[derive(Debug)]
pub struct Projection {
    index: usize,
    name: String,
}

impl Function for Projection {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        "projection"
    }

    fn arity(&self) -> Arity {
        Arity::at_least(self.index + 1)
    }

    fn map<'d>(&self, domain: &'d [Entity], arguments: &[Entity]) -> &'d Entity {
        &domain[arguments[self.index].value()]
    }
}

/// Sum of the argument values plus one, modulo the size of the domain
#[derive(Debug)]
pub struct Successor;

impl Function for Successor {
    fn name(&self) -> &str {
        "successor"
    }

    fn description(&self) -> &str {
        "sum of the arguments plus one, modulo the domain size"
    }

    fn arity(&self) -> Arity {
        Arity::at_least(1)
    }

    fn map<'d>(&self, domain: &'d [Entity], arguments: &[Entity]) -> &'d Entity {
        let sum = arguments
            .iter()
            .fold(1, |acc, e| (acc + e.value()) % domain.len());
        &domain[sum % domain.len()]
    }
}

#[derive(Debug)]
pub struct Maximum;

impl Function for Maximum {
    fn name(&self) -> &str {
        "max"
    }

    fn description(&self) -> &str {
        "greatest argument"
    }

    fn arity(&self) -> Arity {
        Arity::at_least(1)
    }

    fn map<'d>(&self, domain: &'d [Entity], arguments: &[Entity]) -> &'d Entity {
        let value = arguments.iter().map(Entity::value).max().unwrap_or(0);
        &domain[value]
    }
}

#[derive(Debug)]
pub struct Minimum;

impl Function for Minimum {
    fn name(&self) -> &str {
        "min"
    }

    fn description(&self) -> &str {
        "smallest argument"
    }

    fn arity(&self) -> Arity {
        Arity::at_least(1)
    }

    fn map<'d>(&self, domain: &'d [Entity], arguments: &[Entity]) -> &'d Entity {
        let value = arguments.iter().map(Entity::value).min().unwrap_or(0);
        &domain[value]
    }
}

pub fn constant(value: usize) -> SharedFunction {
    Arc::new(Constant {
        value,
        name: format!("const{}", value),
    })
}

pub fn projection(index: usize) -> SharedFunction {
    Arc::new(Projection {
        index,
        name: format!("proj{}", index),
    })
}

pub fn successor() -> SharedFunction {
    Arc::new(Successor)
}

pub fn maximum() -> SharedFunction {
    Arc::new(Maximum)
}

pub fn minimum() -> SharedFunction {
    Arc::new(Minimum)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn domain(n: usize) -> Vec<Entity> {
        (0..n).map(|i| Entity::new(i, &i.to_string(), "")).collect()
    }

    #[test]
    fn building_blocks() {
        let d = domain(4);
        let args = [d[3].clone(), d[1].clone()];
        assert_eq!(constant(2).map(&d, &args).value(), 2);
        assert_eq!(projection(1).map(&d, &args).value(), 1);
        assert_eq!(projection(1).arity(), Arity::at_least(2));
        assert_eq!(successor().map(&d, &args[..1]).value(), 0);
        assert_eq!(successor().map(&d, &args).value(), 1);
        assert_eq!(maximum().map(&d, &args).value(), 3);
        assert_eq!(minimum().map(&d, &args).value(), 1);
    }

    quickcheck! {
        fn results_stay_in_domain(n: u8, values: Vec<u8>) -> bool {
            let n = n as usize % 6 + 1;
            let d = domain(n);
            let args: Vec<Entity> = values.iter().map(|v| d[*v as usize % n].clone()).collect();
            if args.is_empty() {
                return true;
            }
            [successor(), maximum(), minimum(), projection(0)]
                .iter()
                .all(|f| f.map(&d, &args).value() < n)
        }
    }
}
