use crate::assignment::{Assignment, Truth};
use crate::eval::Evaluate;
use crate::formula::{Formula, Literal, Variable};
use log::{debug, trace};
use std::fmt::{self, Display, Formatter};

/// Counters collected over one call to [`Solver::solve`].
#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
pub struct Stats {
    pub decisions: usize,
    pub unit_propagations: usize,
    pub pure_literals: usize,
    pub backtracks: usize,
    pub max_depth: usize,
}

impl Display for Stats {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(
            f,
            "decisions = {}, unit propagations = {}, pure literals = {}, backtracks = {}, max depth = {}",
            self.decisions, self.unit_propagations, self.pure_literals, self.backtracks, self.max_depth
        )
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Reason {
    Unit,
    Pure,
    Decision,
}

/// Recursive DPLL search with unit propagation and pure-literal elimination.
pub struct Solver<'f> {
    formula: &'f Formula,
    // variables of the formula in index order; nothing else is ever assigned
    variables: Vec<Variable>,
    stats: Stats,
}

impl<'f> Solver<'f> {
    pub fn new(formula: &'f Formula) -> Self {
        Self {
            formula,
            variables: formula.universe().iter().collect(),
            stats: Stats::default(),
        }
    }

    /// Returns an assignment that satisfies the formula and defines every
    /// variable it mentions, or `None` if the formula is unsatisfiable.
    pub fn solve(&mut self) -> Option<Assignment> {
        self.stats = Stats::default();
        debug!(
            "solving {} clauses over {} variables",
            self.formula.num_clauses(),
            self.variables.len()
        );

        let mut assignment = Assignment::new();
        let solved = self.step(&mut assignment, 0);
        debug!("search finished: {}", self.stats);

        if !solved {
            debug_assert_eq!(assignment.num_defined(), 0);
            return None;
        }

        // the formula can become true before every variable was needed
        for &variable in &self.variables {
            if assignment.get(variable) == Truth::Undefined {
                assignment.set(variable, Truth::False);
            }
        }
        Some(assignment)
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    fn step(&mut self, assignment: &mut Assignment, depth: usize) -> bool {
        self.stats.max_depth = self.stats.max_depth.max(depth);

        match self.formula.evaluate(assignment) {
            Truth::True => return true,
            Truth::False => return false,
            Truth::Undefined => {}
        }

        if let Some(literal) = self.find_unit(assignment) {
            self.stats.unit_propagations += 1;
            return self.try_assign(assignment, depth, literal, Reason::Unit);
        }

        if let Some(literal) = self.find_pure(assignment) {
            self.stats.pure_literals += 1;
            return self.try_assign(assignment, depth, literal, Reason::Pure);
        }

        let variable = match self.find_unassigned(assignment) {
            Some(v) => v,
            // an undefined formula always mentions an unassigned variable
            None => return false,
        };
        self.stats.decisions += 1;
        if self.try_assign(assignment, depth, Literal::Positive(variable), Reason::Decision) {
            return true;
        }
        self.try_assign(assignment, depth, Literal::Negative(variable), Reason::Decision)
    }

    /// Makes `literal` true, recurses, and undoes the assignment if the
    /// subtree has no solution.
    fn try_assign(
        &mut self,
        assignment: &mut Assignment,
        depth: usize,
        literal: Literal,
        reason: Reason,
    ) -> bool {
        trace!("{:?} {} at depth {}", reason, literal, depth);

        let mut tentative = assignment.tentative(literal.variable(), literal.is_positive());
        if self.step(&mut tentative, depth + 1) {
            tentative.commit();
            return true;
        }

        trace!("backtrack {} at depth {}", literal, depth);
        self.stats.backtracks += 1;
        false
    }

    /// The first clause (in order) that isn't yet true and has exactly one
    /// unassigned literal yields that literal.
    fn find_unit(&self, assignment: &Assignment) -> Option<Literal> {
        for clause in self.formula.clauses() {
            if clause.evaluate(assignment) == Truth::True {
                continue;
            }

            let mut unassigned = clause
                .literals()
                .filter(|literal| assignment.get(literal.variable()) == Truth::Undefined);
            if let (Some(literal), None) = (unassigned.next(), unassigned.next()) {
                return Some(*literal);
            }
        }
        None
    }

    /// The first unassigned variable (in index order) that occurs with a single
    /// polarity across the clauses that aren't yet true.
    fn find_pure(&self, assignment: &Assignment) -> Option<Literal> {
        self.variables
            .iter()
            .filter(|&&variable| assignment.get(variable) == Truth::Undefined)
            .find_map(|&variable| self.pure_literal_for(assignment, variable))
    }

    fn pure_literal_for(&self, assignment: &Assignment, variable: Variable) -> Option<Literal> {
        let mut found: Option<Literal> = None;
        for clause in self.formula.clauses() {
            if clause.evaluate(assignment) == Truth::True {
                continue;
            }
            for literal in clause.literals().filter(|l| l.variable() == variable) {
                match found {
                    None => found = Some(*literal),
                    Some(seen) if seen != *literal => return None,
                    Some(_) => {}
                }
            }
        }
        found
    }

    fn find_unassigned(&self, assignment: &Assignment) -> Option<Variable> {
        self.variables
            .iter()
            .copied()
            .find(|&variable| assignment.get(variable) == Truth::Undefined)
    }
}

/// Convenience wrapper around [`Solver`].
pub fn solve(formula: &Formula) -> Option<Assignment> {
    Solver::new(formula).solve()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::text::parse;
    use test_env_log::test;

    fn var(c: char) -> Variable {
        Variable::from_char(c).unwrap()
    }

    #[test]
    fn unit_clause_is_propagated_first() {
        let f = parse("(A v B v C) ^ ~B").unwrap();
        let mut solver = Solver::new(&f);
        let a = solver.solve().expect("satisfiable");
        assert_eq!(a.get(var('B')), Truth::False);
        assert_eq!(solver.stats().unit_propagations, 1);
        assert_eq!(solver.stats().decisions, 0);
    }

    #[test]
    fn pure_literal_is_assigned_by_polarity() {
        // A occurs only negated, B occurs both ways
        let f = parse("(~A v B) ^ (~A v ~B)").unwrap();
        let mut solver = Solver::new(&f);
        let a = solver.solve().expect("satisfiable");
        assert_eq!(a.get(var('A')), Truth::False);
        assert_eq!(solver.stats().pure_literals, 1);
        assert_eq!(solver.stats().decisions, 0);
    }

    #[test]
    fn branches_true_before_false() {
        let f = parse("(A v B) ^ (~A v ~B)").unwrap();
        let mut solver = Solver::new(&f);
        let a = solver.solve().expect("satisfiable");
        assert_eq!(a.get(var('A')), Truth::True);
        assert_eq!(a.get(var('B')), Truth::False);
        assert_eq!(solver.stats().decisions, 1);
        assert_eq!(solver.stats().backtracks, 0);
    }

    #[test]
    fn falls_back_to_false_branch() {
        // A = True leads to a conflict, the search has to come back and try A = False
        let f = parse("(A v B) ^ (~A v C) ^ (~A v ~C) ^ (~B v A v D) ^ (~D v B)").unwrap();
        let mut solver = Solver::new(&f);
        let a = solver.solve().expect("satisfiable");
        assert_eq!(a.get(var('A')), Truth::False);
        assert_eq!(f.evaluate(&a), Truth::True);
        assert!(solver.stats().backtracks > 0);
    }

    #[test]
    fn satisfied_clause_is_never_a_unit() {
        // once A is set by the pure rule, the first clause is satisfied even though B is unassigned;
        // forcing B = True from it would miss the only solutions
        let f = parse("(B v A) ^ (~B v C) ^ (~B v ~C)").unwrap();
        let a = solve(&f).expect("satisfiable");
        assert_eq!(a.get(var('A')), Truth::True);
        assert_eq!(a.get(var('B')), Truth::False);
        assert_eq!(f.evaluate(&a), Truth::True);
    }

    #[test]
    fn failed_search_restores_assignment() {
        let f = parse("(A v B) ^ (A v ~B) ^ (~A v C) ^ (~A v ~C)").unwrap();
        let mut solver = Solver::new(&f);
        let mut assignment = Assignment::new();
        assert!(!solver.step(&mut assignment, 0));
        assert_eq!(assignment, Assignment::new());
        assert!(solver.stats().backtracks > 0);
    }

    #[test]
    fn failed_sibling_leaves_no_trace() {
        // the A = True branch sets C = True before failing; C is free once A = False
        let f = parse("(A v B) ^ (~A v C) ^ (~A v ~C) ^ (~B v A v D) ^ (~D v B)").unwrap();
        let a = solve(&f).expect("satisfiable");
        assert_eq!(a.num_defined(), 4);
        assert_eq!(a.get(var('A')), Truth::False);
        assert_eq!(a.get(var('C')), Truth::False);
        assert_eq!(a.get(var('E')), Truth::Undefined);
    }

    #[test]
    fn variables_outside_universe_stay_undefined() {
        let f = parse("Z ^ ~Y").unwrap();
        let a = solve(&f).expect("satisfiable");
        assert_eq!(a.num_defined(), 2);
        assert_eq!(a.get(var('Z')), Truth::True);
        assert_eq!(a.get(var('Y')), Truth::False);
    }

    #[test]
    fn empty_clause_is_unsatisfiable() {
        let f = Formula::new(vec![crate::formula::Clause::new(vec![])]);
        assert!(solve(&f).is_none());
    }

    #[test]
    fn stats_reset_between_solves() {
        let f = parse("(A v B) ^ (~A v B) ^ (A v ~B) ^ (~A v ~B)").unwrap();
        let mut solver = Solver::new(&f);
        assert!(solver.solve().is_none());
        let first = *solver.stats();
        assert!(solver.solve().is_none());
        assert_eq!(*solver.stats(), first);
    }
}
