use std::fmt;

/// Type alias for the numeric code carried by an
/// [`EvaluationError`][crate::error::EvaluationError]
pub type ErrorCode = i32;

/// Upper bound of an [`Arity`] which accepts any number of arguments
pub const UNBOUNDED: usize = usize::MAX;

/// The range of argument counts a [`Predicate`][crate::model::Predicate] or
/// [`Function`][crate::model::Function] accepts.
///
/// # Example
/// ```
/// use attomodel::Arity;
///
/// let a = Arity::at_least(1);
/// let b = Arity::new(0, 2).unwrap();
/// assert_eq!(a.intersect(b), Arity::new(1, 2));
/// assert_eq!(Arity::exactly(3).intersect(b), None);
/// assert!(a.accepts(17));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "use-serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Arity {
    min: usize,
    max: usize,
}

impl Arity {
    /// Accepts any number of arguments, including none
    pub const ANY: Arity = Arity {
        min: 0,
        max: UNBOUNDED,
    };

    /// Returns `None` if `min > max`
    pub fn new(min: usize, max: usize) -> Option<Self> {
        if min <= max {
            Some(Arity { min, max })
        } else {
            None
        }
    }

    pub fn exactly(n: usize) -> Self {
        Arity { min: n, max: n }
    }

    pub fn at_least(n: usize) -> Self {
        Arity {
            min: n,
            max: UNBOUNDED,
        }
    }

    pub fn min(&self) -> usize {
        self.min
    }

    pub fn max(&self) -> usize {
        self.max
    }

    pub fn accepts(&self, n: usize) -> bool {
        self.min <= n && n <= self.max
    }

    /// The argument counts accepted by both ranges, or `None` if they do not overlap
    pub fn intersect(self, other: Arity) -> Option<Arity> {
        Arity::new(self.min.max(other.min), self.max.min(other.max))
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.min == self.max {
            write!(f, "{}", self.min)
        } else if self.max == UNBOUNDED {
            write!(f, "{}..", self.min)
        } else {
            write!(f, "{}..={}", self.min, self.max)
        }
    }
}
