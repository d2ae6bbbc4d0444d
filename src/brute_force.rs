use crate::assignment::{Assignment, Truth};
use crate::eval::Evaluate;
use crate::formula::{Formula, Variable};
use log::debug;

/// Tries every assignment of the formula's variables, starting from all False
/// and counting up in binary with the lowest-indexed variable as the lowest
/// bit. Returns the first satisfying assignment, or `None` once the counter
/// overflows.
pub fn solve(formula: &Formula) -> Option<Assignment> {
    let variables: Vec<Variable> = formula.universe().iter().collect();
    let mut assignment = Assignment::for_formula(formula, Truth::False);
    let mut tried = 1u128;

    while formula.evaluate(&assignment) != Truth::True {
        if !increment(&mut assignment, &variables) {
            debug!("brute force exhausted after {} assignments", tried);
            return None;
        }
        tried = tried.saturating_add(1);
    }
    debug!("brute force satisfied after {} assignments", tried);
    Some(assignment)
}

/// Advances the counter by one. Returns false on overflow, when every
/// combination has been seen.
fn increment(assignment: &mut Assignment, variables: &[Variable]) -> bool {
    for &variable in variables {
        if assignment.get(variable) == Truth::True {
            assignment.set(variable, Truth::False);
        } else {
            assignment.set(variable, Truth::True);
            return true;
        }
    }
    false
}
