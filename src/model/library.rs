//! The ready-made models formulas are tested against.
//!
//! Each model approximates a small universe of sets. All of them bind the predicate constants
//! `in` (two arguments) and `isSet` (one argument, true for entities which are member of some
//! entity) and the function constant `emptySet`. They differ in their domain, in their membership
//! relation and in how a class of members collapses into a single entity, since a domain of at
//! most six entities cannot contain a representative for every subset.
use super::{
    function, predicate, ComprehensionTable, Model, ModelBuilder, SharedFunction, SharedPredicate,
};
use std::{fmt, str::FromStr};
use thiserror::Error;

#[cfg(feature = "use-serde")]
use serde::{Deserialize, Serialize};

/// Predicate and function variables of up to this many arguments have an interpretation in every
/// library model
pub const MAX_POOL_ARITY: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "use-serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "use-serde", serde(rename_all = "lowercase"))]
pub enum ModelKind {
    One,
    Three,
    Four,
    Six,
}

enum Membership {
    Nothing,
    Less,
    Table(&'static [u64]),
}

struct LibraryRow {
    name: &'static str,
    description: &'static str,
    entities: &'static [(&'static str, &'static str)],
    membership: Membership,
    /// Entities which are member of some entity
    sets: u64,
    /// Width, table and overflow entity of the comprehension
    comprehension: (usize, &'static [usize], usize),
}

const ONE: LibraryRow = LibraryRow {
    name: "one",
    description: "a single empty set, nothing is member of anything",
    entities: &[("{}", "empty set")],
    membership: Membership::Nothing,
    sets: 0,
    comprehension: (0, &[0], 0),
};

const THREE: LibraryRow = LibraryRow {
    name: "three",
    description: "the ordinals 0, 1 and 2 with membership as less",
    entities: &[
        ("{}", "empty set, 0"),
        ("{{}}", "1"),
        ("{{}, {{}}}", "2, a proper class"),
    ],
    membership: Membership::Less,
    sets: 0b011,
    // {} -> 0, {0} -> 1, {1} -> 2, {0, 1} -> 2
    comprehension: (2, &[0, 1, 2, 2], 2),
};

const FOUR: LibraryRow = LibraryRow {
    name: "four",
    description: "three sets and the class of all sets",
    entities: &[
        ("{}", "empty set"),
        ("{{}}", "set of empty set"),
        ("{{{}}}", "set of set of empty set"),
        ("V", "class of all sets"),
    ],
    membership: Membership::Table(&[0b000, 0b001, 0b010, 0b111]),
    sets: 0b0111,
    comprehension: (3, &[0, 1, 2, 3, 3, 3, 3, 3], 3),
};

const SIX: LibraryRow = LibraryRow {
    name: "six",
    description: "four sets and two proper classes",
    entities: &[
        ("{}", "empty set"),
        ("{{}}", "set of empty set"),
        ("{{{}}}", "set of set of empty set"),
        ("{{}, {{}}}", "pair of empty set and its singleton"),
        ("V", "class of all sets"),
        ("W", "class of the two sets of rank two"),
    ],
    membership: Membership::Table(&[0b0000, 0b0001, 0b0010, 0b0011, 0b1111, 0b1100]),
    sets: 0b1111,
    // classes containing the empty set collapse into V, all others into W
    comprehension: (
        4,
        &[0, 1, 2, 3, 5, 4, 5, 4, 5, 4, 5, 4, 5, 4, 5, 4],
        4,
    ),
};

impl ModelKind {
    /// All library models, by increasing size
    pub const ALL: [ModelKind; 4] = [
        ModelKind::One,
        ModelKind::Three,
        ModelKind::Four,
        ModelKind::Six,
    ];

    fn row(self) -> &'static LibraryRow {
        match self {
            ModelKind::One => &ONE,
            ModelKind::Three => &THREE,
            ModelKind::Four => &FOUR,
            ModelKind::Six => &SIX,
        }
    }

    pub fn name(self) -> &'static str {
        self.row().name
    }

    pub fn description(self) -> &'static str {
        self.row().description
    }

    pub fn entity_count(self) -> usize {
        self.row().entities.len()
    }

    /// Builds the model.
    ///
    /// # Example
    /// ```
    /// use attomodel::ModelKind;
    ///
    /// let model = ModelKind::Three.build();
    /// assert_eq!(model.entity_count(), 3);
    /// assert!(model.predicate_constant("in", 2).is_some());
    /// assert!(model.predicate_constant("isSet", 1).is_some());
    /// ```
    pub fn build(self) -> Model {
        let row = self.row();
        let size = row.entities.len();
        let membership = match row.membership {
            Membership::Nothing => predicate::always_false(),
            Membership::Less => predicate::less(),
            Membership::Table(members) => predicate::member_of(members.to_vec()),
        };
        // `less` is a pool block of its own
        let distinct_membership = match row.membership {
            Membership::Table(_) => Some(&membership),
            _ => None,
        };
        let is_set = predicate::in_subset("isSet", "member of some entity", row.sets);

        let mut builder = row.entities.iter().fold(
            ModelBuilder::new(row.name, row.description),
            |b, (label, description)| b.entity(label, description),
        );
        for arity in 0..=MAX_POOL_ARITY {
            for p in predicate_blocks(size, distinct_membership, &is_set) {
                if p.arity().accepts(arity) {
                    builder = builder.predicate_variable(arity, p);
                }
            }
            for f in function_blocks(size) {
                if f.arity().accepts(arity) {
                    builder = builder.function_variable(arity, f);
                }
            }
        }
        let (width, table, overflow) = row.comprehension;
        builder
            .predicate_constant("in", 2, membership)
            .predicate_constant("isSet", 1, is_set)
            .function_constant("emptySet", 0, function::constant(0))
            .comprehension(
                ComprehensionTable::new(width, table.to_vec(), overflow)
                    .expect("library comprehension tables have 2^width entries"),
            )
            .build()
            .expect("library models are well-formed")
    }
}

fn predicate_blocks(
    size: usize,
    membership: Option<&SharedPredicate>,
    is_set: &SharedPredicate,
) -> Vec<SharedPredicate> {
    let mut blocks = vec![predicate::always_false(), predicate::always_true()];
    if size > 1 {
        blocks.extend([
            predicate::less(),
            predicate::equal(),
            predicate::not(predicate::equal()),
            predicate::even(),
            predicate::is(0),
        ]);
        blocks.extend(membership.cloned());
        blocks.push(is_set.clone());
    }
    blocks
}

fn function_blocks(size: usize) -> Vec<SharedFunction> {
    let mut blocks: Vec<SharedFunction> = (0..size).map(function::constant).collect();
    blocks.push(function::projection(0));
    if size > 1 {
        blocks.extend([
            function::projection(1),
            function::successor(),
            function::maximum(),
            function::minimum(),
        ]);
    }
    blocks
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown model {0:?}, expected one of one, three, four, six")]
pub struct UnknownModelKind(String);

impl FromStr for ModelKind {
    type Err = UnknownModelKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ModelKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| UnknownModelKind(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Entity;

    #[test]
    fn sizes() {
        let sizes: Vec<usize> = ModelKind::ALL.iter().map(|k| k.build().entity_count()).collect();
        assert_eq!(sizes, vec![1, 3, 4, 6]);
        for kind in ModelKind::ALL {
            assert_eq!(kind.entity_count(), kind.build().entity_count());
            assert_eq!(kind.name().parse::<ModelKind>(), Ok(kind));
        }
        assert!("seven".parse::<ModelKind>().is_err());
    }

    /// `isSet` holds exactly for the entities which are member of something
    #[test]
    fn sets_are_members() {
        for kind in ModelKind::ALL {
            let model = kind.build();
            let member = model.predicate_constant("in", 2).unwrap();
            let is_set = model.predicate_constant("isSet", 1).unwrap();
            for x in model.entities() {
                let in_something = model
                    .entities()
                    .iter()
                    .any(|y| member.decide(&[x.clone(), y.clone()]));
                assert_eq!(is_set.decide(&[x.clone()]), in_something, "{} {}", kind, x);
            }
        }
    }

    /// Whenever some entity has exactly the given sets as members, comprehension finds it
    #[test]
    fn comprehension_is_exact_where_possible() {
        for kind in ModelKind::ALL {
            let model = kind.build();
            let member = model.predicate_constant("in", 2).unwrap();
            let is_set = model.predicate_constant("isSet", 1).unwrap();
            for y in model.entities() {
                let members: Vec<Entity> = model
                    .entities()
                    .iter()
                    .filter(|x| member.decide(&[(*x).clone(), y.clone()]))
                    .cloned()
                    .collect();
                if members.iter().all(|m| is_set.decide(&[m.clone()])) {
                    assert_eq!(model.comprehension(&members), y, "{}", kind);
                }
            }
        }
    }

    /// W collects exactly the sets of rank two
    #[test]
    fn six_separates_rank_two() {
        let model = ModelKind::Six.build();
        let member = model.predicate_constant("in", 2).unwrap();
        fn rank(model: &Model, member: &SharedPredicate, x: &Entity) -> usize {
            model
                .entities()
                .iter()
                .filter(|m| member.decide(&[(*m).clone(), x.clone()]))
                .map(|m| rank(model, member, m) + 1)
                .max()
                .unwrap_or(0)
        }
        let w = model.entities().iter().find(|e| e.label() == "W").unwrap();
        assert!(w.description().contains("rank two"));
        for x in &model.entities()[..4] {
            let in_w = member.decide(&[x.clone(), w.clone()]);
            assert_eq!(in_w, rank(&model, member, x) == 2, "{}", x);
        }
    }

    #[test]
    fn pools_cover_small_arities() {
        for kind in ModelKind::ALL {
            let model = kind.build();
            for arity in 0..=MAX_POOL_ARITY {
                assert!(model.predicate_pool_size(arity) >= 2);
                assert!(model.function_pool_size(arity) >= 1);
            }
        }
        let three = ModelKind::Three.build();
        assert_eq!(three.predicate_pool_size(0), 2);
        assert_eq!(three.predicate_pool_size(2), 8);
        let four = ModelKind::Four.build();
        assert_eq!(four.predicate_pool_size(2), 9);
    }

    #[test]
    fn pools_hold_no_duplicate_blocks() {
        for kind in ModelKind::ALL {
            let model = kind.build();
            for arity in 0..=MAX_POOL_ARITY {
                let mut names: Vec<&str> = (0..model.predicate_pool_size(arity))
                    .map(|i| model.predicate(arity, i).name())
                    .collect();
                let count = names.len();
                names.sort_unstable();
                names.dedup();
                assert_eq!(names.len(), count, "{} {}", kind, arity);
            }
        }
    }
}
