use crate::formula::{Clause, Formula, Literal, ParseError, Variable, MAX_VARIABLES};
use std::io::{BufRead, BufReader, Read};

/// Parses a DIMACS CNF file. Variable `n` becomes the variable with index `n`,
/// so only variables `1..MAX_VARIABLES` are accepted.
pub fn parse<R: Read>(reader: R) -> Result<Formula, ParseError> {
    let reader = BufReader::new(reader);

    let mut clauses = vec![];
    let mut num_clauses = None;

    for line in reader.lines() {
        let line = line?;
        let mut line = line.split_whitespace().peekable();

        match line.peek() {
            Some(&"c") | None => continue,
            Some(&"p") => {
                let _ = line.next();

                if line.next() != Some("cnf") {
                    return Err(ParseError::Format("missing 'cnf'".into()));
                }

                let num_variables = line
                    .next()
                    .and_then(|c| c.parse::<usize>().ok())
                    .ok_or_else(|| ParseError::Format("invalid num_variables".into()))?;
                if num_variables >= MAX_VARIABLES {
                    // variable n needs index n, so the largest usable name is MAX_VARIABLES - 1
                    Variable::new(num_variables)?;
                }

                num_clauses = Some(
                    line.next()
                        .and_then(|c| c.parse::<usize>().ok())
                        .ok_or_else(|| ParseError::Format("invalid num_clauses".into()))?,
                );
            }
            Some(_) => {
                let expected = match num_clauses {
                    Some(n) => n,
                    None => {
                        return Err(ParseError::Format("missing 'p' line before clauses".into()))
                    }
                };

                let mut clause = vec![];
                for x in line {
                    match parse_literal(x)? {
                        Some(l) => clause.push(l),
                        None => break,
                    }
                }
                if !clause.is_empty() {
                    clauses.push(Clause::new(clause));
                }

                if clauses.len() >= expected {
                    break;
                }
            }
        }
    }

    if num_clauses.is_none() {
        return Err(ParseError::Format("missing 'p' line before clauses".into()));
    }

    let formula = Formula::new(clauses);
    Ok(formula)
}

fn parse_literal(s: &str) -> Result<Option<Literal>, ParseError> {
    let l = s
        .parse::<isize>()
        .map_err(|_| ParseError::Format(format!("invalid literal {:?}", s)))?;
    if l > 0 {
        Ok(Some(Literal::Positive(Variable::new(l as usize)?)))
    } else if l < 0 {
        Ok(Some(Literal::Negative(Variable::new(l.unsigned_abs())?)))
    } else {
        Ok(None)
    }
}
