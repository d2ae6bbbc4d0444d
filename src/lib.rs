pub mod assignment;
pub mod brute_force;
pub mod eval;
pub mod formula;
mod solver;

pub use assignment::{Assignment, Truth};
pub use eval::{evaluate_clause, evaluate_formula, evaluate_literal, Evaluate, Evaluation};
pub use formula::{Clause, Formula, Literal, Variable, VariableOutOfRange, MAX_VARIABLES};
pub use solver::{solve, Solver, Stats};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::text::parse;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn var(c: char) -> Variable {
        Variable::from_char(c).unwrap()
    }

    fn assert_model(f: &Formula, a: &Assignment) {
        assert_eq!(f.evaluate(a), Truth::True, "{} not satisfied by {:?}", f, a);
        for v in f.universe().iter() {
            assert!(a.get(v).is_defined(), "{} left undefined in {:?}", v, a);
        }
    }

    #[test]
    fn single_positive_literal() {
        let f = parse("A").unwrap();
        let a = solve(&f).expect("satisfiable");
        assert_eq!(a.get(var('A')), Truth::True);
        assert_eq!(a.num_defined(), 1);
    }

    #[test]
    fn literal_and_its_negation() {
        let f = parse("A ^ ~A").unwrap();
        assert_eq!(solve(&f), None);
    }

    #[test]
    fn forced_by_propagation() {
        let f = parse("(A v B) ^ (~A v B)").unwrap();
        let a = solve(&f).expect("satisfiable");
        assert_eq!(a.get(var('B')), Truth::True);
        assert_model(&f, &a);
    }

    #[test]
    fn any_model_of_a_single_clause() {
        let f = parse("A v B v C").unwrap();
        let a = solve(&f).expect("satisfiable");
        assert_model(&f, &a);
        assert!(a.iter().any(|(_, value)| value));
    }

    #[test]
    fn empty_formula() {
        let a = solve(&Formula::new(vec![])).expect("satisfiable");
        assert_eq!(a.num_defined(), 0);
    }

    #[test]
    fn tautological_clause() {
        let f = parse("A v ~A").unwrap();
        let a = solve(&f).expect("satisfiable");
        assert_model(&f, &a);
    }

    #[test]
    fn solve_conflict_unsat() {
        let f = parse("(A v B) ^ ~A ^ ~B").unwrap();
        assert_eq!(solve(&f), None);
        assert_eq!(brute_force::solve(&f), None);
    }

    #[test]
    fn solve_uses_full_namespace() {
        let low = Variable::new(0).unwrap();
        let high = Variable::new(MAX_VARIABLES - 1).unwrap();
        let f = Formula::new(vec![
            Clause::new(vec![Literal::Positive(low), Literal::Positive(high)]),
            Clause::new(vec![Literal::Negative(low)]),
        ]);
        let a = solve(&f).expect("satisfiable");
        assert_eq!(a.get(low), Truth::False);
        assert_eq!(a.get(high), Truth::True);
    }

    #[test]
    fn random_3cnf_agrees_with_brute_force() {
        let mut rng = StdRng::seed_from_u64(0x5a7);
        for _ in 0..200 {
            let num_vars = rng.gen_range(3, 9);
            let num_clauses = rng.gen_range(1, 5 * num_vars);
            let f = Formula::new((0..num_clauses).map(|_| {
                Clause::new((0..3).map(|_| {
                    let v = Variable::new(rng.gen_range(0, num_vars)).unwrap();
                    if rng.gen() {
                        Literal::Positive(v)
                    } else {
                        Literal::Negative(v)
                    }
                }))
            }));

            match (solve(&f), brute_force::solve(&f)) {
                (Some(a), Some(_)) => assert_model(&f, &a),
                (None, None) => {}
                (dpll, brute) => panic!("{}: dpll {:?}, brute force {:?}", f, dpll, brute),
            }
        }
    }

    fn literal() -> impl Strategy<Value = Literal> {
        // spread over the namespace so that index order matters
        (prop::sample::select(vec![0usize, 1, 2, 7, 40, 65, 66, 90, 127]), any::<bool>()).prop_map(
            |(idx, positive)| {
                let v = Variable::new(idx).unwrap();
                if positive {
                    Literal::Positive(v)
                } else {
                    Literal::Negative(v)
                }
            },
        )
    }

    fn formula() -> impl Strategy<Value = Formula> {
        prop::collection::vec(prop::collection::vec(literal(), 1..5), 0..12)
            .prop_map(|clauses| Formula::new(clauses.into_iter().map(Clause::new)))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(500))]

        #[test]
        fn solver_eq_brute_force(f in formula()) {
            let dpll = solve(&f);
            let brute = brute_force::solve(&f);
            prop_assert_eq!(dpll.is_some(), brute.is_some());
        }

        #[test]
        fn models_are_total_and_satisfying(f in formula()) {
            if let Some(a) = solve(&f) {
                prop_assert_eq!(f.evaluate(&a), Truth::True);
                let universe = f.universe();
                for v in universe.iter() {
                    prop_assert!(a.get(v).is_defined());
                }
                prop_assert_eq!(a.num_defined(), universe.len());
            }
        }

        #[test]
        fn solving_is_deterministic(f in formula()) {
            prop_assert_eq!(solve(&f), solve(&f));
        }
    }
}
