//! Integer-variable detection, `spec.md` §4.7: a monotone fixpoint that upgrades a variable's or
//! predicate parameter's [`Domain`] from `Unknown` to `Integer` wherever arithmetic, ordering, or
//! a predicate's other call sites prove it must hold an integer. Runs before simplification, once
//! completion has produced the theory it walks (`spec.md` §9).

use rustc_hash::FxHashSet;

use crate::ast::declaration::Domain;
use crate::ast::{ComparisonOperator, Formula, PredicateId, Term, VariableId};
use crate::context::Context;

fn term_evidence(term: &Term, out: &mut FxHashSet<VariableId>) {
    match term {
        Term::Integer(_) | Term::SpecialInteger(_) | Term::String(_) | Term::Boolean(_) => {}
        Term::Variable(_) => {}
        Term::Function(_, args) => args.iter().for_each(|a| term_evidence(a, out)),
        Term::UnaryOperation(_, t) => mark_if_variable(t, out),
        Term::BinaryOperation(_, l, r) => {
            mark_if_variable(l, out);
            mark_if_variable(r, out);
        }
        Term::Interval(l, r) => {
            mark_if_variable(l, out);
            mark_if_variable(r, out);
        }
    }
}

fn mark_if_variable(term: &Term, out: &mut FxHashSet<VariableId>) {
    if let Term::Variable(v) = term {
        out.insert(*v);
    }
    term_evidence(term, out);
}

fn collect_direct_evidence(formula: &Formula, out: &mut FxHashSet<VariableId>) {
    match formula {
        Formula::Boolean(_) => {}
        Formula::Predicate(_, args) => args.iter().for_each(|a| term_evidence(a, out)),
        Formula::Comparison(op, l, r) => {
            term_evidence(l, out);
            term_evidence(r, out);
            if matches!(
                op,
                ComparisonOperator::Less | ComparisonOperator::LessEqual | ComparisonOperator::Greater | ComparisonOperator::GreaterEqual
            ) {
                mark_if_variable(l, out);
                mark_if_variable(r, out);
            }
            if matches!(op, ComparisonOperator::Equal) {
                if let (Term::Variable(v), Term::Integer(_) | Term::SpecialInteger(_)) = (l, r) {
                    out.insert(*v);
                }
                if let (Term::Integer(_) | Term::SpecialInteger(_), Term::Variable(v)) = (l, r) {
                    out.insert(*v);
                }
            }
        }
        Formula::In(element, set) => {
            term_evidence(element, out);
            term_evidence(set, out);
            if let Term::Interval(..) = set.as_ref() {
                mark_if_variable(element, out);
            }
        }
        Formula::Not(f) => collect_direct_evidence(f, out),
        Formula::And(fs) | Formula::Or(fs) => fs.iter().for_each(|f| collect_direct_evidence(f, out)),
        Formula::Implies(l, r) | Formula::Biconditional(l, r) => {
            collect_direct_evidence(l, out);
            collect_direct_evidence(r, out);
        }
        Formula::Exists(_, f) | Formula::ForAll(_, f) => collect_direct_evidence(f, out),
    }
}

fn collect_predicate_occurrences(formula: &Formula, out: &mut Vec<(PredicateId, Vec<Term>)>) {
    match formula {
        Formula::Boolean(_) | Formula::Comparison(..) | Formula::In(..) => {}
        Formula::Predicate(id, args) => out.push((*id, args.clone())),
        Formula::Not(f) => collect_predicate_occurrences(f, out),
        Formula::And(fs) | Formula::Or(fs) => fs.iter().for_each(|f| collect_predicate_occurrences(f, out)),
        Formula::Implies(l, r) | Formula::Biconditional(l, r) => {
            collect_predicate_occurrences(l, out);
            collect_predicate_occurrences(r, out);
        }
        Formula::Exists(_, f) | Formula::ForAll(_, f) => collect_predicate_occurrences(f, out),
    }
}

pub fn detect_integer_domains(formulas: &[Formula], context: &mut Context) {
    let mut occurrences = Vec::new();
    let mut direct = FxHashSet::default();
    for formula in formulas {
        collect_direct_evidence(formula, &mut direct);
        collect_predicate_occurrences(formula, &mut occurrences);
    }

    for variable in direct {
        if context.variable(variable).domain == Domain::Unknown {
            context.variable_mut(variable).domain = Domain::Integer;
        }
    }

    loop {
        let mut changed = false;

        for (predicate, args) in &occurrences {
            for (position, arg) in args.iter().enumerate() {
                if let Term::Variable(v) = arg {
                    if context.variable(*v).domain == Domain::Integer
                        && context.predicate(*predicate).parameter_domains[position] == Domain::Unknown
                    {
                        context.predicate_mut(*predicate).parameter_domains[position] = Domain::Integer;
                        changed = true;
                    }
                }
            }
        }

        for (predicate, args) in &occurrences {
            for (position, arg) in args.iter().enumerate() {
                if let Term::Variable(v) = arg {
                    if context.predicate(*predicate).parameter_domains[position] == Domain::Integer
                        && context.variable(*v).domain == Domain::Unknown
                    {
                        context.variable_mut(*v).domain = Domain::Integer;
                        changed = true;
                    }
                }
            }
        }

        if !changed {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::declaration::VariableType;
    use crate::context::{Config, Context};

    #[test]
    fn a_variable_compared_with_less_than_is_marked_integer() {
        let mut context = Context::new(Config::default());
        let v = context.new_variable(None, VariableType::Body, Domain::Unknown);
        let formula = Formula::Comparison(ComparisonOperator::Less, Term::Variable(v), Term::Integer(3));

        detect_integer_domains(&[formula], &mut context);

        assert_eq!(context.variable(v).domain, Domain::Integer);
    }

    #[test]
    fn integer_domain_propagates_from_a_variable_to_the_predicate_parameter_and_back() {
        let mut context = Context::new(Config::default());
        let v = context.new_variable(None, VariableType::Body, Domain::Unknown);
        let w = context.new_variable(None, VariableType::Body, Domain::Unknown);
        let p = context.find_or_create_predicate("p", 1);
        let q = context.find_or_create_predicate("q", 1);

        let formulas = vec![
            Formula::Comparison(ComparisonOperator::Less, Term::Variable(v), Term::Integer(0)),
            Formula::Predicate(p, vec![Term::Variable(v)]),
            Formula::Predicate(p, vec![Term::Variable(w)]),
            Formula::Predicate(q, vec![Term::Variable(w)]),
        ];

        detect_integer_domains(&formulas, &mut context);

        assert_eq!(context.predicate(p).parameter_domains[0], Domain::Integer);
        assert_eq!(context.variable(w).domain, Domain::Integer, "w shares p's parameter position with v");
        assert_eq!(context.predicate(q).parameter_domains[0], Domain::Integer, "propagates onward through q");
    }

    #[test]
    fn a_plain_variable_with_no_evidence_stays_unknown() {
        let mut context = Context::new(Config::default());
        let v = context.new_variable(None, VariableType::Body, Domain::Unknown);
        let p = context.find_or_create_predicate("p", 1);
        let formula = Formula::Predicate(p, vec![Term::Variable(v)]);

        detect_integer_domains(&[formula], &mut context);

        assert_eq!(context.variable(v).domain, Domain::Unknown);
    }
}
