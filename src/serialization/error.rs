use std::fmt::Display;

use nom::{
    error::{ContextError, ErrorKind, ParseError},
    IResult, Parser,
};

/// A nom error that keeps the alternative which got furthest into the input
#[derive(Debug, PartialEq)]
pub struct GreedyError<I>(Vec<(I, GreedyErrorKind)>);

#[derive(Debug, PartialEq)]
enum GreedyErrorKind {
    Context(&'static str),
    Nom(ErrorKind),
    Char(char),
}

pub trait Length {
    fn length(&self) -> usize;
}

impl Length for &str {
    fn length(&self) -> usize {
        self.len()
    }
}

impl<I> GreedyError<I> {
    /// The contexts the error occured in, innermost first
    pub fn contexts(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.iter().filter_map(|(_, kind)| match kind {
            GreedyErrorKind::Context(ctx) => Some(*ctx),
            _ => None,
        })
    }
}

impl GreedyError<&str> {
    /// The unparsed input where the error occured
    pub fn remaining(&self) -> &str {
        self.0.first().map_or("", |(input, _)| *input)
    }
}

impl Display for GreedyError<&str> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (input, error) in self.0.iter() {
            let end = input
                .char_indices()
                .nth(20)
                .map_or(input.len(), |(i, _)| i);
            match error {
                GreedyErrorKind::Context(ctx) => write!(f, "in {}", ctx)?,
                GreedyErrorKind::Nom(kind) => write!(f, "{}", kind.description())?,
                GreedyErrorKind::Char(c) => write!(f, "expected '{}'", c)?,
            }
            writeln!(f, " at {:?}", &input[..end])?;
        }
        Ok(())
    }
}

impl<I> ParseError<I> for GreedyError<I>
where
    I: Length,
{
    fn from_error_kind(input: I, kind: ErrorKind) -> Self {
        Self(vec![(input, GreedyErrorKind::Nom(kind))])
    }

    fn append(input: I, kind: ErrorKind, mut other: Self) -> Self {
        other.0.push((input, GreedyErrorKind::Nom(kind)));
        other
    }

    fn from_char(input: I, c: char) -> Self {
        Self(vec![(input, GreedyErrorKind::Char(c))])
    }

    fn or(self, other: Self) -> Self {
        if self.0[0].0.length() < other.0[0].0.length() {
            self
        } else {
            other
        }
    }
}

impl<I> ContextError<I> for GreedyError<I> {
    fn add_context(input: I, ctx: &'static str, mut other: Self) -> Self {
        other.0.push((input, GreedyErrorKind::Context(ctx)));
        other
    }
}

/// Turns recoverable errors of `f` into failures, so that enclosing alternatives are not tried
pub fn or_fail<I, O, E: ParseError<I>, F>(mut f: F) -> impl FnMut(I) -> IResult<I, O, E>
where
    F: Parser<I, O, E>,
{
    move |input| {
        f.parse(input).map_err(|error| match error {
            nom::Err::Error(e) => nom::Err::Failure(e),
            e => e,
        })
    }
}

/// Renders a parse error of a whole line as a single message
pub(crate) fn describe(error: &nom::Err<GreedyError<&str>>) -> String {
    match error {
        nom::Err::Incomplete(_) => "incomplete input".to_owned(),
        nom::Err::Error(e) | nom::Err::Failure(e) => {
            let mut message = format!("unexpected input {:?}", e.remaining());
            let contexts: Vec<_> = e.contexts().collect();
            if !contexts.is_empty() {
                message.push_str(" in ");
                message.push_str(&contexts.join(" of "));
            }
            message
        }
    }
}
