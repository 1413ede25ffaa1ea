//! Fixed-point simplification of a completed theory (`spec.md` §4.4).
//!
//! Three rewrites, applied bottom-up to a fixed point the way the teacher's `simp_expr!` macro
//! drives `canon_visitor` to a fixed point: constant folding (`#true`/`#false` absorb into
//! `and`/`or`/`not`), flattening nested `and`/`or` of the same kind, and equality-driven
//! elimination of an existentially-bound variable that a conjunct pins to a term.
//!
//! Only meaningful for the classical (completed) theory — here-and-there's paired formulas keep
//! their literal shape so the biconditional conjecture stays a faithful translation, not a
//! simplified one.

use crate::ast::substitute::substitute_term_for_variable;
use crate::ast::{ComparisonOperator, Formula, Term, VariableId};

pub fn simplify_formula(formula: Formula) -> Formula {
    let mut current = formula;
    loop {
        let next = simplify_once(&current);
        if next == current {
            return next;
        }
        current = next;
    }
}

pub fn simplify_program(formulas: Vec<Formula>) -> Vec<Formula> {
    formulas.into_iter().map(simplify_formula).collect()
}

fn flatten_and(formula: Formula, out: &mut Vec<Formula>) {
    match formula {
        Formula::And(conjuncts) => conjuncts.into_iter().for_each(|c| flatten_and(c, out)),
        other => out.push(other),
    }
}

fn flatten_or(formula: Formula, out: &mut Vec<Formula>) {
    match formula {
        Formula::Or(disjuncts) => disjuncts.into_iter().for_each(|d| flatten_or(d, out)),
        other => out.push(other),
    }
}

fn term_contains_variable(term: &Term, target: VariableId) -> bool {
    let mut vars = Vec::new();
    term.variables(&mut vars);
    vars.contains(&target)
}

fn eliminate_equality(vars: Vec<VariableId>, body: Formula) -> Formula {
    if let Formula::And(conjuncts) = &body {
        for (index, conjunct) in conjuncts.iter().enumerate() {
            let pinned = match conjunct {
                Formula::Comparison(ComparisonOperator::Equal, Term::Variable(v), t) if vars.contains(v) && !term_contains_variable(t, *v) => {
                    Some((*v, t.clone()))
                }
                Formula::Comparison(ComparisonOperator::Equal, t, Term::Variable(v)) if vars.contains(v) && !term_contains_variable(t, *v) => {
                    Some((*v, t.clone()))
                }
                _ => None,
            };
            if let Some((target, replacement)) = pinned {
                let remaining_vars: Vec<VariableId> = vars.iter().copied().filter(|v| *v != target).collect();
                let remaining: Vec<Formula> = conjuncts
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| *i != index)
                    .map(|(_, c)| substitute_term_for_variable(c, target, &replacement))
                    .collect();
                return Formula::exists(remaining_vars, Formula::and(remaining));
            }
        }
    }
    Formula::exists(vars, body)
}

fn simplify_once(formula: &Formula) -> Formula {
    match formula {
        Formula::Boolean(_) | Formula::Predicate(..) | Formula::Comparison(..) | Formula::In(..) => formula.clone(),
        Formula::Not(inner) => match simplify_once(inner) {
            Formula::Not(doubly) => *doubly,
            Formula::Boolean(b) => Formula::Boolean(!b),
            other => Formula::not(other),
        },
        Formula::And(conjuncts) => {
            let mut flat = Vec::new();
            for c in conjuncts {
                flatten_and(simplify_once(c), &mut flat);
            }
            if flat.iter().any(|f| matches!(f, Formula::Boolean(false))) {
                return Formula::FALSE;
            }
            flat.retain(|f| !matches!(f, Formula::Boolean(true)));
            Formula::and(flat)
        }
        Formula::Or(disjuncts) => {
            let mut flat = Vec::new();
            for d in disjuncts {
                flatten_or(simplify_once(d), &mut flat);
            }
            if flat.iter().any(|f| matches!(f, Formula::Boolean(true))) {
                return Formula::TRUE;
            }
            flat.retain(|f| !matches!(f, Formula::Boolean(false)));
            Formula::or(flat)
        }
        Formula::Implies(antecedent, consequent) => {
            let antecedent = simplify_once(antecedent);
            let consequent = simplify_once(consequent);
            match (&antecedent, &consequent) {
                (Formula::Boolean(false), _) => Formula::TRUE,
                (Formula::Boolean(true), _) => consequent,
                (_, Formula::Boolean(true)) => Formula::TRUE,
                _ => Formula::implies(antecedent, consequent),
            }
        }
        Formula::Biconditional(left, right) => {
            let left = simplify_once(left);
            let right = simplify_once(right);
            match (&left, &right) {
                (Formula::Boolean(true), _) => right,
                (_, Formula::Boolean(true)) => left,
                (Formula::Boolean(false), _) => Formula::not(right),
                (_, Formula::Boolean(false)) => Formula::not(left),
                _ => Formula::biconditional(left, right),
            }
        }
        Formula::Exists(vars, body) => eliminate_equality(vars.clone(), simplify_once(body)),
        Formula::ForAll(vars, body) => Formula::for_all(vars.clone(), simplify_once(body)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::declaration::VariableType;
    use crate::context::{Config, Context};

    #[test]
    fn folds_and_with_a_false_conjunct() {
        let formula = Formula::and(vec![Formula::TRUE, Formula::FALSE, Formula::TRUE]);
        assert_eq!(simplify_formula(formula), Formula::FALSE);
    }

    #[test]
    fn folds_or_with_a_true_disjunct() {
        let formula = Formula::or(vec![Formula::FALSE, Formula::TRUE]);
        assert_eq!(simplify_formula(formula), Formula::TRUE);
    }

    #[test]
    fn cancels_double_negation() {
        let formula = Formula::not(Formula::not(Formula::TRUE));
        assert_eq!(simplify_formula(formula), Formula::TRUE);
    }

    #[test]
    fn eliminates_an_existential_pinned_by_equality() {
        let mut context = Context::new(Config::default());
        let v = context.new_variable(None, VariableType::Body, crate::ast::Domain::Unknown);
        let p = context.find_or_create_predicate("p", 1);

        // exists V (V = 1 and p(V)) simplifies to p(1).
        let formula = Formula::exists(
            vec![v],
            Formula::and(vec![
                Formula::Comparison(ComparisonOperator::Equal, Term::Variable(v), Term::Integer(1)),
                Formula::Predicate(p, vec![Term::Variable(v)]),
            ]),
        );
        let simplified = simplify_formula(formula);
        assert_eq!(simplified, Formula::Predicate(p, vec![Term::Integer(1)]));
    }
}
