//! Formula and term trees as they are handed to the evaluator.
//!
//! An [`Element`] is either an atom (a name) or an operator tagged list of further elements. The
//! operator tags are plain strings, since the tree comes from outside of this crate; the tags the
//! evaluator understands are listed in [`Operator`].
use std::fmt;

#[cfg(feature = "use-serde")]
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "use-serde", derive(Serialize, Deserialize))]
pub enum Element {
    Atom(String),
    List(ElementList),
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "use-serde", derive(Serialize, Deserialize))]
pub struct ElementList {
    operator: String,
    elements: Vec<Element>,
}

impl ElementList {
    pub fn new(operator: impl Into<String>, elements: Vec<Element>) -> Self {
        ElementList {
            operator: operator.into(),
            elements,
        }
    }

    pub fn operator(&self) -> &str {
        &self.operator
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn element(&self, index: usize) -> Option<&Element> {
        self.elements.get(index)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

/// The operators the evaluator knows how to interpret
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operator {
    Conjunction,
    Disjunction,
    Implication,
    Equivalence,
    Negation,
    PredicateVariable,
    PredicateConstant,
    Universal,
    Existential,
    UniqueExistential,
    SubjectVariable,
    FunctionVariable,
    FunctionConstant,
    Class,
}

impl Operator {
    pub const ALL: [Operator; 14] = [
        Operator::Conjunction,
        Operator::Disjunction,
        Operator::Implication,
        Operator::Equivalence,
        Operator::Negation,
        Operator::PredicateVariable,
        Operator::PredicateConstant,
        Operator::Universal,
        Operator::Existential,
        Operator::UniqueExistential,
        Operator::SubjectVariable,
        Operator::FunctionVariable,
        Operator::FunctionConstant,
        Operator::Class,
    ];

    pub fn tag(self) -> &'static str {
        use Operator::*;
        match self {
            Conjunction => "AND",
            Disjunction => "OR",
            Implication => "IMPL",
            Equivalence => "EQUI",
            Negation => "NOT",
            PredicateVariable => "PREDVAR",
            PredicateConstant => "PREDCON",
            Universal => "FORALL",
            Existential => "EXISTS",
            UniqueExistential => "EXISTSU",
            SubjectVariable => "VAR",
            FunctionVariable => "FUNVAR",
            FunctionConstant => "FUNCON",
            Class => "CLASS",
        }
    }

    /// # Example
    /// ```
    /// use attomodel::element::Operator;
    ///
    /// assert_eq!(Operator::from_tag("EXISTSU"), Some(Operator::UniqueExistential));
    /// assert_eq!(Operator::from_tag("exists"), None);
    /// ```
    pub fn from_tag(tag: &str) -> Option<Operator> {
        Operator::ALL.iter().copied().find(|op| op.tag() == tag)
    }

    /// Whether this operator builds a term rather than a formula
    pub fn is_term(self) -> bool {
        use Operator::*;
        matches!(
            self,
            SubjectVariable | FunctionVariable | FunctionConstant | Class
        )
    }
}

impl Element {
    pub fn atom(name: impl Into<String>) -> Self {
        Element::Atom(name.into())
    }

    pub fn list(operator: Operator, elements: Vec<Element>) -> Self {
        Element::List(ElementList::new(operator.tag(), elements))
    }

    pub fn as_atom(&self) -> Option<&str> {
        match self {
            Element::Atom(name) => Some(name),
            Element::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&ElementList> {
        match self {
            Element::Atom(_) => None,
            Element::List(list) => Some(list),
        }
    }

    pub fn var(name: &str) -> Self {
        Element::list(Operator::SubjectVariable, vec![Element::atom(name)])
    }

    pub fn and(elements: Vec<Element>) -> Self {
        Element::list(Operator::Conjunction, elements)
    }

    pub fn or(elements: Vec<Element>) -> Self {
        Element::list(Operator::Disjunction, elements)
    }

    pub fn implies(premise: Element, conclusion: Element) -> Self {
        Element::list(Operator::Implication, vec![premise, conclusion])
    }

    pub fn equivalent(left: Element, right: Element) -> Self {
        Element::list(Operator::Equivalence, vec![left, right])
    }

    pub fn not(formula: Element) -> Self {
        Element::list(Operator::Negation, vec![formula])
    }

    pub fn predvar(name: &str, arguments: Vec<Element>) -> Self {
        Element::named(Operator::PredicateVariable, name, arguments)
    }

    pub fn predcon(name: &str, arguments: Vec<Element>) -> Self {
        Element::named(Operator::PredicateConstant, name, arguments)
    }

    pub fn funvar(name: &str, arguments: Vec<Element>) -> Self {
        Element::named(Operator::FunctionVariable, name, arguments)
    }

    pub fn funcon(name: &str, arguments: Vec<Element>) -> Self {
        Element::named(Operator::FunctionConstant, name, arguments)
    }

    pub fn forall(variable: &str, body: Element) -> Self {
        Element::list(Operator::Universal, vec![Element::var(variable), body])
    }

    pub fn exists(variable: &str, body: Element) -> Self {
        Element::list(Operator::Existential, vec![Element::var(variable), body])
    }

    pub fn exists_unique(variable: &str, body: Element) -> Self {
        Element::list(
            Operator::UniqueExistential,
            vec![Element::var(variable), body],
        )
    }

    /// A quantifier in its restricted form, e.g. _forall x (restriction -> body)_
    pub fn restricted(
        quantifier: Operator,
        variable: &str,
        restriction: Element,
        body: Element,
    ) -> Self {
        Element::list(quantifier, vec![Element::var(variable), restriction, body])
    }

    pub fn class(variable: &str, formula: Element) -> Self {
        Element::list(Operator::Class, vec![Element::var(variable), formula])
    }

    fn named(operator: Operator, name: &str, arguments: Vec<Element>) -> Self {
        let mut elements = Vec::with_capacity(arguments.len() + 1);
        elements.push(Element::atom(name));
        elements.extend(arguments);
        Element::list(operator, elements)
    }
}

/// Whether `name` can be written without quotes
pub fn is_plain_atom(name: &str) -> bool {
    !name.is_empty() && name.chars().all(is_atom_char)
}

pub(crate) fn is_atom_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '.' || c == '\''
}

/// Formats the element in the notation `OPERATOR(child, child)`.
///
/// # Example
/// ```
/// use attomodel::Element;
///
/// let member = Element::predcon("in", vec![Element::var("x"), Element::var("x")]);
/// let e = Element::forall("x", member);
/// assert_eq!(e.to_string(), "FORALL(VAR(x), PREDCON(in, VAR(x), VAR(x)))");
/// ```
impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Element::Atom(name) if is_plain_atom(name) => f.write_str(name),
            Element::Atom(name) => write!(f, "\"{}\"", name),
            Element::List(list) => write!(f, "{}", list),
        }
    }
}

impl fmt::Display for ElementList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.operator)?;
        for (i, e) in self.elements.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", e)?;
        }
        f.write_str(")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_round_trip() {
        for op in Operator::ALL {
            assert_eq!(Operator::from_tag(op.tag()), Some(op));
        }
        assert!(Operator::Class.is_term());
        assert!(!Operator::Universal.is_term());
    }

    #[test]
    fn quoted_atoms() {
        let e = Element::predcon("my pred", vec![]);
        assert_eq!(e.to_string(), "PREDCON(\"my pred\")");
        assert_eq!(Element::atom("set.in").to_string(), "set.in");
    }

    #[test]
    fn restricted_form() {
        let e = Element::restricted(
            Operator::Existential,
            "y",
            Element::predvar("P", vec![Element::var("y")]),
            Element::predcon("TRUE", vec![]),
        );
        let list = e.as_list().unwrap();
        assert_eq!(list.operator(), "EXISTS");
        assert_eq!(list.len(), 3);
        assert_eq!(list.element(0), Some(&Element::var("y")));
    }
}
