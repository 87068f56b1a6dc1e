use nom::{
    branch::alt,
    bytes::complete::{take_till, take_while1},
    character::complete::{char, multispace0},
    combinator::{all_consuming, map, opt},
    error::context,
    multi::separated_list0,
    sequence::{delimited, preceded, terminated, tuple},
    IResult,
};

use super::error::{or_fail, GreedyError};
use crate::element::{is_atom_char, Element, ElementList};

/// A name made of letters, digits, `_`, `.` and `'`
pub fn parse_name(input: &str) -> IResult<&str, &str, GreedyError<&str>> {
    take_while1(is_atom_char)(input)
}

fn parse_quoted(input: &str) -> IResult<&str, String, GreedyError<&str>> {
    map(
        delimited(char('"'), take_till(|c| c == '"'), or_fail(char('"'))),
        str::to_owned,
    )(input)
}

fn parse_children(input: &str) -> IResult<&str, Vec<Element>, GreedyError<&str>> {
    delimited(
        tuple((char('('), multispace0)),
        separated_list0(tuple((multispace0, char(','), multispace0)), parse_element),
        or_fail(tuple((multispace0, char(')')))),
    )(input)
}

/// Parses one element in the notation `OPERATOR(child, ...)`, as written by the `Display`
/// implementation of [`Element`]. A name directly followed by `(` starts a list.
///
/// # Example
/// ```
/// use attomodel::Element;
/// use attomodel::serialization::parse_element;
///
/// let (rest, e) = parse_element("NOT(PREDCON(TRUE)) tail").unwrap();
/// assert_eq!(e, Element::not(Element::predcon("TRUE", vec![])));
/// assert_eq!(rest, " tail");
/// ```
pub fn parse_element(input: &str) -> IResult<&str, Element, GreedyError<&str>> {
    alt((
        map(parse_quoted, Element::Atom),
        map(
            tuple((parse_name, opt(context("list", parse_children)))),
            |(name, children)| match children {
                Some(elements) => Element::List(ElementList::new(name, elements)),
                None => Element::atom(name),
            },
        ),
    ))(input)
}

/// Parses a complete formula or term, surrounding whitespace included
pub fn parse_formula(input: &str) -> Result<Element, nom::Err<GreedyError<&str>>> {
    let (_, element) = all_consuming(terminated(
        preceded(multispace0, parse_element),
        multispace0,
    ))(input)?;
    Ok(element)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Operator;

    #[test]
    fn display_is_parsed_back() {
        let formula = Element::forall(
            "x",
            Element::restricted(
                Operator::Existential,
                "y",
                Element::predcon("in", vec![Element::var("y"), Element::var("x")]),
                Element::predvar("P", vec![Element::funcon("my fun", vec![Element::var("y'")])]),
            ),
        );
        assert_eq!(parse_formula(&formula.to_string()), Ok(formula));
    }

    #[test]
    fn whitespace_and_empty_lists() {
        let e = parse_formula("  AND( ) ").unwrap();
        assert_eq!(e, Element::and(vec![]));
        let e = parse_formula("OR(\n  PREDCON(TRUE) ,PREDCON( FALSE )\n)").unwrap();
        assert_eq!(
            e,
            Element::or(vec![
                Element::predcon("TRUE", vec![]),
                Element::predcon("FALSE", vec![]),
            ])
        );
    }

    #[test]
    fn unknown_operators_are_still_elements() {
        // operators are checked during evaluation
        let e = parse_formula("FOO(bar)").unwrap();
        assert_eq!(e.as_list().map(ElementList::operator), Some("FOO"));
    }

    #[test]
    fn malformed_input() {
        assert!(parse_formula("AND(PREDCON(TRUE)").is_err());
        assert!(parse_formula("AND(PREDCON(TRUE)) x").is_err());
        assert!(parse_formula("PREDCON(\"open)").is_err());
        assert!(parse_formula("").is_err());
    }
}
