use super::Entity;
use crate::error::ModelError;

/// Collapses a list of members into the single entity representing "the class of exactly these
/// members".
///
/// Members whose value is below `width` form a bit mask which indexes `table`. If any member has
/// a value of `width` or more the result is `overflow`. Since a finite domain cannot contain an
/// entity for every subset, most tables map several masks to the same entity.
///
/// # Example
/// ```
/// use attomodel::model::ComprehensionTable;
///
/// // {} -> 0, {0} -> 1, {1} -> 2, {0, 1} -> 2
/// let t = ComprehensionTable::new(2, vec![0, 1, 2, 2], 2).unwrap();
/// assert_eq!(t.select_values([0usize]), 1);
/// assert_eq!(t.select_values([1usize, 0]), 2);
/// assert_eq!(t.select_values(Vec::new()), 0);
/// assert_eq!(t.select_values([5usize]), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComprehensionTable {
    width: usize,
    table: Vec<usize>,
    overflow: usize,
}

impl ComprehensionTable {
    /// # Errors
    /// `ComprehensionSize` if `table` does not have exactly `2^width` entries
    pub fn new(width: usize, table: Vec<usize>, overflow: usize) -> Result<Self, ModelError> {
        let expected = 1usize.checked_shl(width as u32).unwrap_or(0);
        if width >= 16 || table.len() != expected {
            return Err(ModelError::ComprehensionSize {
                width,
                expected,
                actual: table.len(),
            });
        }
        Ok(ComprehensionTable {
            width,
            table,
            overflow,
        })
    }

    /// Every class collapses into the same entity
    pub fn constant(value: usize) -> Self {
        ComprehensionTable {
            width: 0,
            table: vec![value],
            overflow: value,
        }
    }

    /// All entity values this table can produce
    pub fn targets(&self) -> impl Iterator<Item = usize> + '_ {
        self.table
            .iter()
            .copied()
            .chain(std::iter::once(self.overflow))
    }

    pub fn select(&self, members: &[Entity]) -> usize {
        self.select_values(members.iter().map(Entity::value))
    }

    pub fn select_values(&self, members: impl IntoIterator<Item = usize>) -> usize {
        let mut mask = 0;
        for value in members {
            if value >= self.width {
                return self.overflow;
            }
            mask |= 1 << value;
        }
        self.table[mask]
    }
}
