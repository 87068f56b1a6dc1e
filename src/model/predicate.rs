//! Predicates and the building blocks models are assembled from.
//!
//! All predicates are stateless, so a single instance may be shared by any number of models and
//! constants through a [`SharedPredicate`].
use super::Entity;
use crate::{error::ModelError, types::*};
use std::fmt;
use std::sync::Arc;

/// A named map from a list of entities to a truth value
pub trait Predicate: fmt::Debug + Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    fn arity(&self) -> Arity;

    /// Decides the predicate for the given arguments. Callers make sure that the number of
    /// arguments is accepted by [`arity`](Predicate::arity).
    fn decide(&self, arguments: &[Entity]) -> bool;

    /// Whether the predicate can decide every argument list over a domain of `entities` elements
    fn fits_domain(&self, _entities: usize) -> bool {
        true
    }
}

pub type SharedPredicate = Arc<dyn Predicate>;

#[derive(Debug)]
pub struct Truth(bool);

impl Predicate for Truth {
    fn name(&self) -> &str {
        if self.0 {
            "TRUE"
        } else {
            "FALSE"
        }
    }

    fn description(&self) -> &str {
        if self.0 {
            "always true"
        } else {
            "always false"
        }
    }

    fn arity(&self) -> Arity {
        Arity::ANY
    }

    fn decide(&self, _: &[Entity]) -> bool {
        self.0
    }
}

/// Arguments are strictly increasing
#[derive(Debug)]
pub struct Less;

impl Predicate for Less {
    fn name(&self) -> &str {
        "less"
    }

    fn description(&self) -> &str {
        "arguments are strictly increasing"
    }

    fn arity(&self) -> Arity {
        Arity::at_least(2)
    }

    fn decide(&self, arguments: &[Entity]) -> bool {
        arguments.windows(2).all(|w| w[0].value() < w[1].value())
    }
}

#[derive(Debug)]
pub struct Equal;

impl Predicate for Equal {
    fn name(&self) -> &str {
        "equal"
    }

    fn description(&self) -> &str {
        "arguments are all equal"
    }

    fn arity(&self) -> Arity {
        Arity::at_least(2)
    }

    fn decide(&self, arguments: &[Entity]) -> bool {
        arguments.windows(2).all(|w| w[0].value() == w[1].value())
    }
}

#[derive(Debug)]
pub struct Even;

impl Predicate for Even {
    fn name(&self) -> &str {
        "even"
    }

    fn description(&self) -> &str {
        "every argument has an even value"
    }

    fn arity(&self) -> Arity {
        Arity::at_least(1)
    }

    fn decide(&self, arguments: &[Entity]) -> bool {
        arguments.iter().all(|e| e.value() % 2 == 0)
    }
}

/// Every argument is one fixed entity
#[derive(Debug)]
pub struct Is {
    value: usize,
    name: String,
}

impl Predicate for Is {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        "every argument is one fixed entity"
    }

    fn arity(&self) -> Arity {
        Arity::at_least(1)
    }

    fn decide(&self, arguments: &[Entity]) -> bool {
        arguments.iter().all(|e| e.value() == self.value)
    }
}

/// Membership read from a table: `members[y]` has bit `x` set iff _x in y_.
#[derive(Debug)]
pub struct MemberOf {
    members: Vec<u64>,
}

impl Predicate for MemberOf {
    fn name(&self) -> &str {
        "in"
    }

    fn description(&self) -> &str {
        "membership given by a table"
    }

    fn arity(&self) -> Arity {
        Arity::exactly(2)
    }

    fn decide(&self, arguments: &[Entity]) -> bool {
        let (x, y) = (arguments[0].value(), arguments[1].value());
        x < 64 && self.members[y] & (1 << x) != 0
    }

    fn fits_domain(&self, entities: usize) -> bool {
        self.members.len() >= entities
    }
}

/// Every argument belongs to a fixed subset of the domain, given as bit mask
#[derive(Debug)]
pub struct InSubset {
    name: String,
    description: String,
    mask: u64,
}

impl Predicate for InSubset {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn arity(&self) -> Arity {
        Arity::at_least(1)
    }

    fn decide(&self, arguments: &[Entity]) -> bool {
        arguments
            .iter()
            .all(|e| e.value() < 64 && self.mask & (1 << e.value()) != 0)
    }
}

#[derive(Debug)]
pub struct Not {
    name: String,
    inner: SharedPredicate,
}

impl Predicate for Not {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        "negation"
    }

    fn arity(&self) -> Arity {
        self.inner.arity()
    }

    fn decide(&self, arguments: &[Entity]) -> bool {
        !self.inner.decide(arguments)
    }

    fn fits_domain(&self, entities: usize) -> bool {
        self.inner.fits_domain(entities)
    }
}

#[derive(Debug)]
pub struct And {
    name: String,
    arity: Arity,
    left: SharedPredicate,
    right: SharedPredicate,
}

impl Predicate for And {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        "conjunction"
    }

    fn arity(&self) -> Arity {
        self.arity
    }

    fn decide(&self, arguments: &[Entity]) -> bool {
        self.left.decide(arguments) && self.right.decide(arguments)
    }

    fn fits_domain(&self, entities: usize) -> bool {
        self.left.fits_domain(entities) && self.right.fits_domain(entities)
    }
}

#[derive(Debug)]
pub struct Or {
    name: String,
    arity: Arity,
    left: SharedPredicate,
    right: SharedPredicate,
}

impl Predicate for Or {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        "disjunction"
    }

    fn arity(&self) -> Arity {
        self.arity
    }

    fn decide(&self, arguments: &[Entity]) -> bool {
        self.left.decide(arguments) || self.right.decide(arguments)
    }

    fn fits_domain(&self, entities: usize) -> bool {
        self.left.fits_domain(entities) && self.right.fits_domain(entities)
    }
}

pub fn always_true() -> SharedPredicate {
    Arc::new(Truth(true))
}

pub fn always_false() -> SharedPredicate {
    Arc::new(Truth(false))
}

pub fn less() -> SharedPredicate {
    Arc::new(Less)
}

pub fn equal() -> SharedPredicate {
    Arc::new(Equal)
}

pub fn even() -> SharedPredicate {
    Arc::new(Even)
}

pub fn is(value: usize) -> SharedPredicate {
    Arc::new(Is {
        value,
        name: format!("is{}", value),
    })
}

/// Membership where `members[y]` is the bit mask of all `x` with _x in y_
pub fn member_of(members: Vec<u64>) -> SharedPredicate {
    Arc::new(MemberOf { members })
}

pub fn in_subset(name: &str, description: &str, mask: u64) -> SharedPredicate {
    Arc::new(InSubset {
        name: name.to_owned(),
        description: description.to_owned(),
        mask,
    })
}

pub fn not(predicate: SharedPredicate) -> SharedPredicate {
    Arc::new(Not {
        name: format!("not({})", predicate.name()),
        inner: predicate,
    })
}

/// Conjunction of two predicates. It accepts the argument counts both of them accept.
///
/// # Errors
/// `DisjointArity` if no argument count is accepted by both predicates
///
/// # Example
/// ```
/// use attomodel::model::predicate::{and, equal, even};
/// use attomodel::model::Predicate;
/// use attomodel::Arity;
///
/// let p = and(even(), equal()).unwrap();
/// assert_eq!(p.arity(), Arity::at_least(2));
/// assert_eq!(p.name(), "and(even, equal)");
/// ```
pub fn and(left: SharedPredicate, right: SharedPredicate) -> Result<SharedPredicate, ModelError> {
    let arity = combined_arity(&left, &right)?;
    Ok(Arc::new(And {
        name: format!("and({}, {})", left.name(), right.name()),
        arity,
        left,
        right,
    }))
}

/// Disjunction of two predicates. It accepts the argument counts both of them accept.
///
/// # Errors
/// `DisjointArity` if no argument count is accepted by both predicates
pub fn or(left: SharedPredicate, right: SharedPredicate) -> Result<SharedPredicate, ModelError> {
    let arity = combined_arity(&left, &right)?;
    Ok(Arc::new(Or {
        name: format!("or({}, {})", left.name(), right.name()),
        arity,
        left,
        right,
    }))
}

fn combined_arity(left: &SharedPredicate, right: &SharedPredicate) -> Result<Arity, ModelError> {
    left.arity()
        .intersect(right.arity())
        .ok_or(ModelError::DisjointArity(left.arity(), right.arity()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::{Arbitrary, Gen};

    fn entities(values: &[u8]) -> Vec<Entity> {
        values
            .iter()
            .map(|v| Entity::new(*v as usize % 6, "e", ""))
            .collect()
    }

    #[derive(Clone, Debug)]
    struct Block(usize);

    impl Arbitrary for Block {
        fn arbitrary(g: &mut Gen) -> Self {
            Block(usize::arbitrary(g) % 7)
        }
    }

    impl Block {
        fn predicate(&self) -> SharedPredicate {
            match self.0 {
                0 => always_true(),
                1 => always_false(),
                2 => less(),
                3 => equal(),
                4 => even(),
                5 => is(1),
                _ => member_of(vec![0, 1, 3, 7, 15, 31]),
            }
        }
    }

    quickcheck! {
        fn double_negation(block: Block, values: Vec<u8>) -> bool {
            let p = block.predicate();
            let args = entities(&values);
            if !p.arity().accepts(args.len()) {
                return true;
            }
            not(not(p.clone())).decide(&args) == p.decide(&args)
        }

        fn excluded_middle(block: Block, values: Vec<u8>) -> bool {
            let p = block.predicate();
            let args = entities(&values);
            if !p.arity().accepts(args.len()) {
                return true;
            }
            or(p.clone(), not(p)).unwrap().decide(&args)
        }
    }

    #[test]
    fn disjoint_ranges_fail_fast() {
        let r = and(member_of(vec![0]), Arc::new(Truth(true)));
        assert!(r.is_ok());
        let unary = and(is(0), member_of(vec![0]));
        assert_eq!(unary.unwrap().arity(), Arity::exactly(2));
        let narrow: SharedPredicate = Arc::new(And {
            name: "x".to_owned(),
            arity: Arity::exactly(1),
            left: always_true(),
            right: always_true(),
        });
        assert_eq!(
            or(narrow, less()).unwrap_err(),
            ModelError::DisjointArity(Arity::exactly(1), Arity::at_least(2))
        );
    }

    #[test]
    fn building_blocks() {
        assert!(less().decide(&entities(&[0, 1, 2])));
        assert!(!less().decide(&entities(&[0, 2, 2])));
        assert!(equal().decide(&entities(&[3, 3])));
        assert!(even().decide(&entities(&[0, 2, 4])));
        assert!(!is(1).decide(&entities(&[1, 2])));
        let member = member_of(vec![0b000, 0b001, 0b011]);
        assert!(member.decide(&entities(&[0, 2])));
        assert!(!member.decide(&entities(&[2, 1])));
        let sets = in_subset("isSet", "", 0b011);
        assert!(sets.decide(&entities(&[1])));
        assert!(!sets.decide(&entities(&[2])));
    }
}
