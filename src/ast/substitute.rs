//! Structural deep-copy ("prepare copy") and substitution, `spec.md` §4.1 and §9.
//!
//! Every variable id in this crate is allocated once from [`crate::context::Context`]'s
//! monotonic counter and never reused, so a given [`VariableId`] denotes the same binding
//! everywhere it appears in a program — there is no shadowing to track. That turns the "two-pass
//! structural copy" §9 recommends into: (1) find which ids are *bound* (appear in an `Exists`/
//! `ForAll` list) inside the subtree being copied, (2) mint a fresh duplicate declaration for each
//! and rebuild the tree substituting old id for new wherever it is used as a binder or as a
//! reference to one; free-variable references (bound outside the subtree) pass through unchanged.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::context::Context;

use super::formula::Formula;
use super::ids::VariableId;
use super::term::Term;

fn collect_bound_in_formula(formula: &Formula, out: &mut FxHashSet<VariableId>) {
    match formula {
        Formula::Boolean(_) | Formula::Predicate(..) | Formula::Comparison(..) | Formula::In(..) => {}
        Formula::Not(f) => collect_bound_in_formula(f, out),
        Formula::And(fs) | Formula::Or(fs) => {
            fs.iter().for_each(|f| collect_bound_in_formula(f, out))
        }
        Formula::Implies(l, r) | Formula::Biconditional(l, r) => {
            collect_bound_in_formula(l, out);
            collect_bound_in_formula(r, out);
        }
        Formula::Exists(vars, f) | Formula::ForAll(vars, f) => {
            out.extend(vars.iter().copied());
            collect_bound_in_formula(f, out);
        }
    }
}

fn remap_term(term: &Term, remap: &FxHashMap<VariableId, VariableId>) -> Term {
    match term {
        Term::Integer(_) | Term::SpecialInteger(_) | Term::String(_) | Term::Boolean(_) => {
            term.clone()
        }
        Term::Variable(id) => Term::Variable(*remap.get(id).unwrap_or(id)),
        Term::Function(f, args) => {
            Term::Function(*f, args.iter().map(|a| remap_term(a, remap)).collect())
        }
        Term::UnaryOperation(op, t) => Term::UnaryOperation(*op, Box::new(remap_term(t, remap))),
        Term::BinaryOperation(op, l, r) => Term::BinaryOperation(
            *op,
            Box::new(remap_term(l, remap)),
            Box::new(remap_term(r, remap)),
        ),
        Term::Interval(l, r) => {
            Term::Interval(Box::new(remap_term(l, remap)), Box::new(remap_term(r, remap)))
        }
    }
}

fn remap_formula(formula: &Formula, remap: &FxHashMap<VariableId, VariableId>) -> Formula {
    match formula {
        Formula::Boolean(b) => Formula::Boolean(*b),
        Formula::Predicate(p, terms) => {
            Formula::Predicate(*p, terms.iter().map(|t| remap_term(t, remap)).collect())
        }
        Formula::Comparison(op, l, r) => {
            Formula::Comparison(*op, remap_term(l, remap), remap_term(r, remap))
        }
        Formula::In(e, s) => Formula::in_(remap_term(e, remap), remap_term(s, remap)),
        Formula::Not(f) => Formula::not(remap_formula(f, remap)),
        Formula::And(fs) => Formula::And(fs.iter().map(|f| remap_formula(f, remap)).collect()),
        Formula::Or(fs) => Formula::Or(fs.iter().map(|f| remap_formula(f, remap)).collect()),
        Formula::Implies(l, r) => {
            Formula::implies(remap_formula(l, remap), remap_formula(r, remap))
        }
        Formula::Biconditional(l, r) => {
            Formula::biconditional(remap_formula(l, remap), remap_formula(r, remap))
        }
        Formula::Exists(vars, f) => Formula::Exists(
            vars.iter().map(|v| *remap.get(v).unwrap_or(v)).collect(),
            Box::new(remap_formula(f, remap)),
        ),
        Formula::ForAll(vars, f) => Formula::ForAll(
            vars.iter().map(|v| *remap.get(v).unwrap_or(v)).collect(),
            Box::new(remap_formula(f, remap)),
        ),
    }
}

/// Rebuilds `formula` with every quantifier-bound variable replaced by a fresh duplicate
/// declaration; free variables (bound outside `formula`) are left as-is.
///
/// This is the sole mechanism by which passes that insert the same logical subtree at several
/// places in the AST (hidden-predicate elimination's replacement; here-and-there's duplicated
/// axiom copies) produce independent subtrees that do not alias each other's bound variables.
pub fn prepare_copy(formula: &Formula, context: &mut Context) -> Formula {
    let mut bound = FxHashSet::default();
    collect_bound_in_formula(formula, &mut bound);
    let remap: FxHashMap<VariableId, VariableId> = bound
        .into_iter()
        .map(|old| (old, context.duplicate_variable(old)))
        .collect();
    remap_formula(formula, &remap)
}

/// Renames free occurrences of `from` to `to` throughout `formula`. Used to "rewire" a completed
/// definition's bound-argument variables `X̄` onto the actual call-site arguments `ā` during
/// hidden-predicate elimination (`spec.md` §4.6), where `ā` is guaranteed to itself be a variable.
pub fn rename_free_variables(formula: &Formula, mapping: &FxHashMap<VariableId, VariableId>) -> Formula {
    remap_formula(formula, mapping)
}

fn substitute_term(term: &Term, target: VariableId, replacement: &Term) -> Term {
    match term {
        Term::Integer(_) | Term::SpecialInteger(_) | Term::String(_) | Term::Boolean(_) => {
            term.clone()
        }
        Term::Variable(id) if *id == target => replacement.clone(),
        Term::Variable(_) => term.clone(),
        Term::Function(f, args) => Term::Function(
            *f,
            args.iter()
                .map(|a| substitute_term(a, target, replacement))
                .collect(),
        ),
        Term::UnaryOperation(op, t) => {
            Term::UnaryOperation(*op, Box::new(substitute_term(t, target, replacement)))
        }
        Term::BinaryOperation(op, l, r) => Term::BinaryOperation(
            *op,
            Box::new(substitute_term(l, target, replacement)),
            Box::new(substitute_term(r, target, replacement)),
        ),
        Term::Interval(l, r) => Term::Interval(
            Box::new(substitute_term(l, target, replacement)),
            Box::new(substitute_term(r, target, replacement)),
        ),
    }
}

/// Substitutes `replacement` for every free occurrence of `target` throughout `formula`.
///
/// Used by simplification's equality-driven variable elimination (`spec.md` §4.4), where
/// `replacement` may be an arbitrary term, not just a variable. Panics if `target` is rebound by
/// a nested quantifier in `formula` — by construction this never happens, since ids are globally
/// fresh and `target` is only ever free where this is called.
pub fn substitute_term_for_variable(formula: &Formula, target: VariableId, replacement: &Term) -> Formula {
    match formula {
        Formula::Boolean(b) => Formula::Boolean(*b),
        Formula::Predicate(p, terms) => Formula::Predicate(
            *p,
            terms
                .iter()
                .map(|t| substitute_term(t, target, replacement))
                .collect(),
        ),
        Formula::Comparison(op, l, r) => Formula::Comparison(
            *op,
            substitute_term(l, target, replacement),
            substitute_term(r, target, replacement),
        ),
        Formula::In(e, s) => Formula::in_(
            substitute_term(e, target, replacement),
            substitute_term(s, target, replacement),
        ),
        Formula::Not(f) => Formula::not(substitute_term_for_variable(f, target, replacement)),
        Formula::And(fs) => Formula::And(
            fs.iter()
                .map(|f| substitute_term_for_variable(f, target, replacement))
                .collect(),
        ),
        Formula::Or(fs) => Formula::Or(
            fs.iter()
                .map(|f| substitute_term_for_variable(f, target, replacement))
                .collect(),
        ),
        Formula::Implies(l, r) => Formula::implies(
            substitute_term_for_variable(l, target, replacement),
            substitute_term_for_variable(r, target, replacement),
        ),
        Formula::Biconditional(l, r) => Formula::biconditional(
            substitute_term_for_variable(l, target, replacement),
            substitute_term_for_variable(r, target, replacement),
        ),
        Formula::Exists(vars, f) => {
            debug_assert!(!vars.contains(&target), "target variable is shadowed");
            Formula::Exists(
                vars.clone(),
                Box::new(substitute_term_for_variable(f, target, replacement)),
            )
        }
        Formula::ForAll(vars, f) => {
            debug_assert!(!vars.contains(&target), "target variable is shadowed");
            Formula::ForAll(
                vars.clone(),
                Box::new(substitute_term_for_variable(f, target, replacement)),
            )
        }
    }
}

/// Substitutes a [`crate::ast::formula::Formula::Predicate`] occurrence `p(ā)` by a fresh copy of
/// `replacement` (itself universally scoped over `X̄`) with each `Xᵢ` rewired to `āᵢ`
/// (`spec.md` §4.6). `arguments_are_variables` enforces the head-normalization invariant that `ā`
/// resolves to variables.
pub fn substitute_predicate_occurrence(
    call_arguments: &[Term],
    replacement_parameters: &[VariableId],
    replacement_body: &Formula,
    context: &mut Context,
) -> Formula {
    debug_assert_eq!(call_arguments.len(), replacement_parameters.len());
    let fresh_body = prepare_copy(replacement_body, context);
    let mapping: FxHashMap<VariableId, VariableId> = replacement_parameters
        .iter()
        .zip(call_arguments)
        .map(|(param, arg)| match arg {
            Term::Variable(arg_var) => (*param, *arg_var),
            _ => unreachable!(
                "head-normalization guarantees call arguments are variables, got {arg:?}"
            ),
        })
        .collect();
    rename_free_variables(&fresh_body, &mapping)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::declaration::VariableType;
    use crate::ast::ComparisonOperator;
    use crate::context::{Config, Context};

    #[test]
    fn prepare_copy_freshens_bound_variables_but_not_free_ones() {
        let mut context = Context::new(Config::default());
        let free = context.new_variable(None, VariableType::Head, crate::ast::Domain::Unknown);
        let bound = context.new_variable(None, VariableType::Body, crate::ast::Domain::Unknown);
        let p = context.find_or_create_predicate("p", 2);

        // exists bound (p(free, bound))
        let formula = Formula::exists(
            vec![bound],
            Formula::Predicate(p, vec![Term::Variable(free), Term::Variable(bound)]),
        );

        let copy = prepare_copy(&formula, &mut context);

        let Formula::Exists(copy_vars, copy_body) = &copy else {
            panic!("expected an Exists");
        };
        assert_eq!(copy_vars.len(), 1);
        assert_ne!(copy_vars[0], bound, "the bound variable must be freshened");

        let Formula::Predicate(_, args) = copy_body.as_ref() else {
            panic!("expected a predicate");
        };
        assert_eq!(args[0], Term::Variable(free), "the free variable must be untouched");
        assert_eq!(args[1], Term::Variable(copy_vars[0]));
    }

    #[test]
    fn substitute_term_for_variable_replaces_every_free_occurrence() {
        let mut context = Context::new(Config::default());
        let v = context.new_variable(None, VariableType::Body, crate::ast::Domain::Unknown);
        let formula = Formula::and(vec![
            Formula::Comparison(ComparisonOperator::Equal, Term::Variable(v), Term::Integer(0)),
            Formula::Comparison(ComparisonOperator::Less, Term::Variable(v), Term::Integer(10)),
        ]);

        let substituted = substitute_term_for_variable(&formula, v, &Term::Integer(5));

        assert_eq!(
            substituted,
            Formula::and(vec![
                Formula::Comparison(ComparisonOperator::Equal, Term::Integer(5), Term::Integer(0)),
                Formula::Comparison(ComparisonOperator::Less, Term::Integer(5), Term::Integer(10)),
            ])
        );
    }
}
