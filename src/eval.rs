//! Three-valued evaluation of literals, clauses and formulas under a partial
//! assignment.
//!
//! Two scan orders are available. [`Evaluation::Kleene`] resolves each clause
//! and formula fully: a clause is True as soon as any literal is True, and a
//! formula is False as soon as any clause is False. [`Evaluation::Ordered`]
//! stops at the first literal that isn't False (or the first clause that isn't
//! True) and reports whatever it found there, so an Undefined literal can hide a
//! later True one and an Undefined clause can hide a later False one.
//!
//! Both orders agree on total assignments. They disagree on partial ones, and
//! only the Kleene order is safe for the search: with the ordered scan a clause
//! that is already satisfied can look like a unit clause.

use crate::assignment::{Assignment, Truth};
use crate::formula::{Clause, Formula, Literal};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Evaluation {
    Kleene,
    Ordered,
}

impl Default for Evaluation {
    fn default() -> Self {
        Evaluation::Kleene
    }
}

pub trait Evaluate {
    fn evaluate_with(&self, assignment: &Assignment, evaluation: Evaluation) -> Truth;

    fn evaluate(&self, assignment: &Assignment) -> Truth {
        self.evaluate_with(assignment, Evaluation::Kleene)
    }
}

impl Evaluate for Literal {
    fn evaluate_with(&self, assignment: &Assignment, _: Evaluation) -> Truth {
        assignment.literal(self)
    }
}

impl Evaluate for Clause {
    fn evaluate_with(&self, assignment: &Assignment, evaluation: Evaluation) -> Truth {
        let mut result = Truth::False;
        for literal in self.literals() {
            match (assignment.literal(literal), evaluation) {
                (Truth::False, _) => continue,
                (Truth::True, _) => return Truth::True,
                (Truth::Undefined, Evaluation::Ordered) => return Truth::Undefined,
                (Truth::Undefined, Evaluation::Kleene) => result = Truth::Undefined,
            }
        }
        result
    }
}

impl Evaluate for Formula {
    fn evaluate_with(&self, assignment: &Assignment, evaluation: Evaluation) -> Truth {
        let mut result = Truth::True;
        for clause in self.clauses() {
            match (clause.evaluate_with(assignment, evaluation), evaluation) {
                (Truth::True, _) => continue,
                (Truth::False, _) => return Truth::False,
                (Truth::Undefined, Evaluation::Ordered) => return Truth::Undefined,
                (Truth::Undefined, Evaluation::Kleene) => result = Truth::Undefined,
            }
        }
        result
    }
}

pub fn evaluate_literal(literal: &Literal, assignment: &Assignment) -> Truth {
    literal.evaluate(assignment)
}

pub fn evaluate_clause(clause: &Clause, assignment: &Assignment) -> Truth {
    clause.evaluate(assignment)
}

pub fn evaluate_formula(formula: &Formula, assignment: &Assignment) -> Truth {
    formula.evaluate(assignment)
}
