use std::fmt;

use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{char, multispace0, space0, space1},
    combinator::{all_consuming, eof, map, opt},
    error::context,
    multi::separated_list0,
    sequence::{delimited, preceded, terminated, tuple},
    IResult,
};
use thiserror::Error;

use super::{
    element::{parse_element, parse_name},
    error::{describe, or_fail, GreedyError},
};
use crate::{
    definitions::{FunctionDefinition, ModuleDefinitions, PredicateDefinition},
    element::{is_plain_atom, Element},
    error::DefinitionError,
};

/// One line of a session file
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Command {
    DefinePredicate(PredicateDefinition),
    DefineFunction(FunctionDefinition),
    Check {
        formula: Element,
        name: Option<String>,
    },
}

/// A formula to check, together with the line it was given on
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Check {
    pub line: usize,
    pub name: Option<String>,
    pub formula: Element,
}

impl Check {
    /// The name of the check, or its line number
    pub fn title(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("line {}", self.line),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("line {line}: {source}")]
    Definition {
        line: usize,
        #[source]
        source: DefinitionError,
    },
}

/// The definitions and checks collected from a session file
#[derive(Debug, Clone)]
pub struct Session {
    module: ModuleDefinitions,
    checks: Vec<Check>,
}

impl Session {
    pub fn new(label: impl Into<String>) -> Self {
        Session {
            module: ModuleDefinitions::new(label),
            checks: Vec::new(),
        }
    }

    /// Reads a whole session file. Empty lines and lines starting with `#` are skipped.
    ///
    /// # Example
    /// ```
    /// use attomodel::serialization::Session;
    ///
    /// let session = Session::parse(
    ///     "set",
    ///     "# subsets\n\
    ///      predicate sub(x, y) := FORALL(VAR(z), \
    ///          IMPL(PREDCON(in, VAR(z), VAR(x)), PREDCON(in, VAR(z), VAR(y))))\n\
    ///      check FORALL(VAR(x), PREDCON(sub, VAR(x), VAR(x))): reflexive\n",
    /// )
    /// .unwrap();
    /// assert_eq!(session.module().predicate_count(), 1);
    /// assert_eq!(session.checks()[0].title(), "reflexive");
    /// assert_eq!(session.checks()[0].line, 3);
    /// ```
    pub fn parse(label: impl Into<String>, input: &str) -> Result<Self, SessionError> {
        let mut session = Session::new(label);
        for (index, line) in input.lines().enumerate() {
            let number = index + 1;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let command = Command::parse(trimmed).map_err(|e| SessionError::Parse {
                line: number,
                message: describe(&e),
            })?;
            command
                .apply(&mut session, number)
                .map_err(|source| SessionError::Definition {
                    line: number,
                    source,
                })?;
        }
        Ok(session)
    }

    pub fn module(&self) -> &ModuleDefinitions {
        &self.module
    }

    pub fn checks(&self) -> &[Check] {
        &self.checks
    }
}

impl Command {
    pub fn apply(self, session: &mut Session, line: usize) -> Result<(), DefinitionError> {
        match self {
            Command::DefinePredicate(definition) => session.module.add_predicate(definition)?,
            Command::DefineFunction(definition) => session.module.add_function(definition)?,
            Command::Check { formula, name } => session.checks.push(Check {
                line,
                name,
                formula,
            }),
        }
        Ok(())
    }

    pub fn parse(input: &str) -> Result<Self, nom::Err<GreedyError<&str>>> {
        let (_, command) = all_consuming(alt((
            context("predicate", Self::parse_predicate),
            context("function", Self::parse_function),
            context("check", Self::parse_check),
        )))(input)?;
        Ok(command)
    }

    /// `name(x, y) := body`, the parameter list may be left out
    fn parse_signature(
        input: &str,
    ) -> IResult<&str, (&str, Vec<String>, Element), GreedyError<&str>> {
        let (input, name) = parse_name(input)?;
        let (input, parameters) = opt(delimited(
            tuple((char('('), space0)),
            separated_list0(
                tuple((space0, char(','), space0)),
                map(parse_name, str::to_owned),
            ),
            or_fail(tuple((space0, char(')')))),
        ))(input)?;
        let (input, _) = or_fail(tuple((space0, tag(":="), multispace0)))(input)?;
        let (input, body) = or_fail(terminated(parse_element, tuple((multispace0, eof))))(input)?;
        Ok((input, (name, parameters.unwrap_or_default(), body)))
    }

    fn parse_predicate(input: &str) -> IResult<&str, Command, GreedyError<&str>> {
        let (input, _) = tuple((tag("predicate"), space1))(input)?;
        let (input, (name, parameters, body)) = or_fail(Self::parse_signature)(input)?;
        match PredicateDefinition::new(name, parameters, body) {
            Ok(definition) => Ok((input, Command::DefinePredicate(definition))),
            Err(_) => Err(duplicate_parameter(input)),
        }
    }

    fn parse_function(input: &str) -> IResult<&str, Command, GreedyError<&str>> {
        let (input, _) = tuple((tag("function"), space1))(input)?;
        let (input, (name, parameters, body)) = or_fail(Self::parse_signature)(input)?;
        match FunctionDefinition::new(name, parameters, body) {
            Ok(definition) => Ok((input, Command::DefineFunction(definition))),
            Err(_) => Err(duplicate_parameter(input)),
        }
    }

    fn parse_check(input: &str) -> IResult<&str, Command, GreedyError<&str>> {
        let (input, _) = tuple((tag("check"), space1))(input)?;
        or_fail(|input| {
            let (input, formula) = parse_element(input)?;
            let (input, name) = opt(preceded(
                tuple((space0, char(':'), space0)),
                map(parse_name, str::to_owned),
            ))(input)?;
            let (input, _) = tuple((space0, eof))(input)?;
            Ok((input, Command::Check { formula, name }))
        })(input)
    }
}

fn duplicate_parameter(input: &str) -> nom::Err<GreedyError<&str>> {
    use nom::error::{ContextError, ErrorKind, ParseError};
    nom::Err::Failure(GreedyError::add_context(
        input,
        "duplicate parameter",
        GreedyError::from_error_kind(input, ErrorKind::Verify),
    ))
}

fn write_signature(
    f: &mut fmt::Formatter<'_>,
    keyword: &str,
    name: &str,
    parameters: &[String],
    body: &Element,
) -> fmt::Result {
    write!(f, "{} {}({}) := {}", keyword, name, parameters.join(", "), body)
}

/// Writes the command in the form accepted by [`Command::parse`]
impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::DefinePredicate(d) => {
                write_signature(f, "predicate", d.name(), d.parameters(), d.body())
            }
            Command::DefineFunction(d) => {
                write_signature(f, "function", d.name(), d.parameters(), d.body())
            }
            Command::Check { formula, name } => {
                write!(f, "check {}", formula)?;
                match name {
                    Some(name) if is_plain_atom(name) => write!(f, ": {}", name),
                    _ => Ok(()),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        checker::Library, definitions::NoImports, element::Operator, CheckerConfig, ModelKind,
    };

    fn member(x: &str, y: &str) -> Element {
        Element::predcon("in", vec![Element::var(x), Element::var(y)])
    }

    #[test]
    fn parse_commands() {
        let command = Command::parse(
            "predicate empty(x) := NOT(EXISTS(VAR(y), PREDCON(in, VAR(y), VAR(x))))",
        );
        let expected = PredicateDefinition::new(
            "empty",
            vec!["x".to_owned()],
            Element::not(Element::exists("y", member("y", "x"))),
        )
        .unwrap();
        assert_eq!(command, Ok(Command::DefinePredicate(expected)));

        let command = Command::parse("function zero := FUNCON(emptySet)").unwrap();
        assert!(matches!(&command, Command::DefineFunction(d) if d.arity() == 0));

        let command = Command::parse("check PREDCON(TRUE) : truth").unwrap();
        assert_eq!(
            command,
            Command::Check {
                formula: Element::predcon("TRUE", vec![]),
                name: Some("truth".to_owned()),
            }
        );
    }

    #[test]
    fn display_is_parsed_back() {
        let commands = vec![
            Command::DefineFunction(
                FunctionDefinition::new(
                    "pair",
                    vec!["x".to_owned(), "y".to_owned()],
                    Element::class(
                        "z",
                        Element::or(vec![
                            Element::predcon("equal", vec![Element::var("z"), Element::var("x")]),
                            Element::predcon("equal", vec![Element::var("z"), Element::var("y")]),
                        ]),
                    ),
                )
                .unwrap(),
            ),
            Command::Check {
                formula: Element::list(
                    Operator::Implication,
                    vec![member("x", "y"), member("y", "x")],
                ),
                name: None,
            },
        ];
        for command in commands {
            assert_eq!(Command::parse(&command.to_string()), Ok(command));
        }
    }

    #[test]
    fn rejected_lines() {
        assert!(Command::parse("predicate p(x, x) := PREDCON(TRUE)").is_err());
        assert!(Command::parse("predicate p(x := PREDCON(TRUE)").is_err());
        assert!(Command::parse("check").is_err());
        assert!(Command::parse("check PREDCON(TRUE) trailing words").is_err());
        assert!(Command::parse("theorem PREDCON(TRUE)").is_err());
    }

    #[test]
    fn session_errors_carry_line_numbers() {
        let e = Session::parse("set", "\n# nothing\ncheck AND(\n").unwrap_err();
        assert!(matches!(e, SessionError::Parse { line: 3, .. }));

        let twice = "predicate p := PREDCON(TRUE)\npredicate p := PREDCON(FALSE)";
        let e = Session::parse("set", twice).unwrap_err();
        assert!(matches!(
            e,
            SessionError::Definition {
                line: 2,
                source: DefinitionError::AlreadyDefined { .. }
            }
        ));
    }

    #[test]
    fn session_is_checked() {
        let input = "\
            predicate empty(x) := FORALL(VAR(y), NOT(PREDCON(in, VAR(y), VAR(x))))\n\
            check EXISTS(VAR(x), PREDCON(empty, VAR(x))): empty_set\n\
            check FORALL(VAR(x), PREDCON(empty, VAR(x))): all_empty\n";
        let session = Session::parse("set", input).unwrap();
        let library = Library::new(CheckerConfig {
            models: vec![ModelKind::Three],
            ..CheckerConfig::default()
        });
        let results: Vec<_> = session
            .checks()
            .iter()
            .map(|check| library.check(session.module(), &NoImports, &check.formula).is_refuted())
            .collect();
        assert_eq!(results, vec![false, true]);
    }
}
