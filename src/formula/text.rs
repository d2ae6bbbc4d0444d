//! Parser for the infix syntax `(A v ~B) ^ C`.
//!
//! Clauses are separated by `^` and literals by `v`, so `v` can't name a
//! variable. Whitespace and parentheses carry no meaning.

use crate::formula::{Clause, Formula, Literal, ParseError, Variable};
use std::io::Read;

pub fn parse(input: &str) -> Result<Formula, ParseError> {
    if input.trim().is_empty() {
        return Err(ParseError::Format("empty formula".into()));
    }

    let mut clauses = vec![];
    for (idx, clause) in input.split('^').enumerate() {
        let mut literals = vec![];
        for token in clause.split('v') {
            literals.push(parse_literal(token, idx)?);
        }
        clauses.push(Clause::new(literals));
    }

    Ok(Formula::new(clauses))
}

pub fn parse_reader<R: Read>(mut reader: R) -> Result<Formula, ParseError> {
    let mut input = String::new();
    reader.read_to_string(&mut input)?;
    parse(&input)
}

fn parse_literal(token: &str, clause: usize) -> Result<Literal, ParseError> {
    let mut negated = false;
    let mut variable = None;

    for c in token.chars() {
        match c {
            '(' | ')' => continue,
            c if c.is_whitespace() => continue,
            '~' if variable.is_none() => negated = !negated,
            c if c.is_ascii_alphabetic() && variable.is_none() => {
                variable = Some(Variable::from_char(c)?);
            }
            c if c.is_ascii_alphabetic() => {
                return Err(ParseError::Format(format!(
                    "clause {}: variable names are a single letter, found {:?}",
                    clause + 1,
                    token.trim()
                )));
            }
            c => {
                return Err(ParseError::Format(format!(
                    "clause {}: unexpected character {:?}",
                    clause + 1,
                    c
                )));
            }
        }
    }

    match variable {
        Some(v) if negated => Ok(Literal::Negative(v)),
        Some(v) => Ok(Literal::Positive(v)),
        None if is_blank(token) => Err(ParseError::Format(format!(
            "clause {}: missing literal",
            clause + 1
        ))),
        None => Err(ParseError::Format(format!(
            "clause {}: literal {:?} names no variable",
            clause + 1,
            token.trim()
        ))),
    }
}

fn is_blank(token: &str) -> bool {
    token
        .chars()
        .all(|c| c.is_whitespace() || c == '(' || c == ')')
}
