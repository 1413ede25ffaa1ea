//! Hidden-predicate elimination, `spec.md` §4.6, grounded on `original_source/`'s
//! `HiddenPredicateElimination.{h,cpp}`.
//!
//! A predicate marked hidden (by `#show` excluding it, or by default visibility) has its
//! completed definition substituted wherever it's called and its own biconditional dropped from
//! the output — as long as its definition doesn't mention itself, which the original source
//! checks syntactically rather than with a general dependency analysis. A directly
//! self-referential hidden predicate is left defined; this crate does not attempt the mutual-
//! recursion case (`spec.md` §9 open question, resolved as "single-predicate cycles only").

use rustc_hash::FxHashSet;

use crate::ast::declaration::Visibility;
use crate::ast::substitute::substitute_predicate_occurrence;
use crate::ast::{Formula, PredicateId, Term, VariableId};
use crate::context::Context;
use crate::error::Warning;

fn as_predicate_definition(formula: &Formula) -> Option<(PredicateId, Vec<VariableId>, Formula)> {
    let Formula::ForAll(vars, body) = formula else { return None };
    let Formula::Biconditional(left, right) = body.as_ref() else { return None };
    let Formula::Predicate(id, args) = left.as_ref() else { return None };
    if args.len() != vars.len() {
        return None;
    }
    let matches_shared_vars = args.iter().zip(vars.iter()).all(|(arg, var)| matches!(arg, Term::Variable(v) if v == var));
    if !matches_shared_vars {
        return None;
    }
    Some((*id, vars.clone(), (**right).clone()))
}

fn formula_references_predicate(formula: &Formula, target: PredicateId) -> bool {
    match formula {
        Formula::Boolean(_) | Formula::Comparison(..) | Formula::In(..) => false,
        Formula::Predicate(id, _) => *id == target,
        Formula::Not(f) => formula_references_predicate(f, target),
        Formula::And(fs) | Formula::Or(fs) => fs.iter().any(|f| formula_references_predicate(f, target)),
        Formula::Implies(l, r) | Formula::Biconditional(l, r) => {
            formula_references_predicate(l, target) || formula_references_predicate(r, target)
        }
        Formula::Exists(_, f) | Formula::ForAll(_, f) => formula_references_predicate(f, target),
    }
}

fn replace_predicate_occurrences(
    formula: &Formula,
    target: PredicateId,
    parameters: &[VariableId],
    definition: &Formula,
    context: &mut Context,
) -> Formula {
    match formula {
        Formula::Boolean(_) | Formula::Comparison(..) | Formula::In(..) => formula.clone(),
        Formula::Predicate(id, args) if *id == target => {
            substitute_predicate_occurrence(args, parameters, definition, context)
        }
        Formula::Predicate(..) => formula.clone(),
        Formula::Not(f) => Formula::not(replace_predicate_occurrences(f, target, parameters, definition, context)),
        Formula::And(fs) => Formula::And(
            fs.iter()
                .map(|f| replace_predicate_occurrences(f, target, parameters, definition, context))
                .collect(),
        ),
        Formula::Or(fs) => Formula::Or(
            fs.iter()
                .map(|f| replace_predicate_occurrences(f, target, parameters, definition, context))
                .collect(),
        ),
        Formula::Implies(l, r) => Formula::implies(
            replace_predicate_occurrences(l, target, parameters, definition, context),
            replace_predicate_occurrences(r, target, parameters, definition, context),
        ),
        Formula::Biconditional(l, r) => Formula::biconditional(
            replace_predicate_occurrences(l, target, parameters, definition, context),
            replace_predicate_occurrences(r, target, parameters, definition, context),
        ),
        Formula::Exists(vars, f) => Formula::Exists(
            vars.clone(),
            Box::new(replace_predicate_occurrences(f, target, parameters, definition, context)),
        ),
        Formula::ForAll(vars, f) => Formula::ForAll(
            vars.clone(),
            Box::new(replace_predicate_occurrences(f, target, parameters, definition, context)),
        ),
    }
}

pub fn eliminate_hidden_predicates(formulas: Vec<Formula>, context: &mut Context) -> Vec<Formula> {
    let mut current = formulas;
    let mut pending: Vec<PredicateId> = context
        .predicates()
        .filter(|p| p.visibility == Visibility::Hidden && !p.is_external)
        .map(|p| p.id())
        .collect();

    let mut warned: FxHashSet<PredicateId> = FxHashSet::default();

    loop {
        let mut still_pending = Vec::new();
        let mut progressed = false;

        for predicate_id in pending {
            let Some(def_index) = current
                .iter()
                .position(|f| matches!(as_predicate_definition(f), Some((p, _, _)) if p == predicate_id))
            else {
                continue;
            };
            let (_, parameters, definition) = as_predicate_definition(&current[def_index]).unwrap();
            if formula_references_predicate(&definition, predicate_id) {
                if warned.insert(predicate_id) {
                    let declaration = context.predicate(predicate_id);
                    let qualified_name = format!("{}/{}", declaration.name, declaration.arity);
                    context.diagnostics.warn(Warning::CircularHiddenDependency(qualified_name));
                }
                still_pending.push(predicate_id);
                continue;
            }
            current.remove(def_index);
            current = current
                .into_iter()
                .map(|f| replace_predicate_occurrences(&f, predicate_id, &parameters, &definition, context))
                .collect();
            progressed = true;
        }

        pending = still_pending;
        if !progressed || pending.is_empty() {
            break;
        }
    }

    current
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::declaration::VariableType;
    use crate::context::{Config, Context};

    #[test]
    fn as_predicate_definition_rejects_a_formula_whose_head_args_arent_the_bound_vars() {
        let mut context = Context::new(Config::default());
        let v = context.new_variable(None, VariableType::Head, crate::ast::Domain::Unknown);
        let p = context.find_or_create_predicate("p", 1);

        // forall V (p(V) <-> p(V)) is fine...
        let ok = Formula::for_all(
            vec![v],
            Formula::biconditional(
                Formula::Predicate(p, vec![Term::Variable(v)]),
                Formula::Predicate(p, vec![Term::Variable(v)]),
            ),
        );
        assert!(as_predicate_definition(&ok).is_some());

        // ...but an implication isn't a definition shape at all.
        let not_a_definition = Formula::for_all(
            vec![v],
            Formula::implies(
                Formula::Predicate(p, vec![Term::Variable(v)]),
                Formula::Predicate(p, vec![Term::Variable(v)]),
            ),
        );
        assert!(as_predicate_definition(&not_a_definition).is_none());
    }

    #[test]
    fn hidden_predicate_is_substituted_at_its_call_site_and_dropped() {
        let mut context = Context::new(Config::default());
        let hidden = context.find_or_create_predicate("hidden", 0);
        context.predicate_mut(hidden).visibility = Visibility::Hidden;
        let shown = context.find_or_create_predicate("shown", 0);
        context.predicate_mut(shown).visibility = Visibility::Default;

        // forall () (hidden <-> true)
        let hidden_def = Formula::for_all(vec![], Formula::biconditional(Formula::Predicate(hidden, vec![]), Formula::TRUE));
        // forall () (shown <-> hidden)
        let shown_def = Formula::for_all(
            vec![],
            Formula::biconditional(Formula::Predicate(shown, vec![]), Formula::Predicate(hidden, vec![])),
        );

        let result = eliminate_hidden_predicates(vec![hidden_def, shown_def], &mut context);

        assert_eq!(result.len(), 1, "the hidden predicate's own definition is dropped");
        assert!(!formula_references_predicate(&result[0], hidden), "its call site no longer mentions it");
    }

    #[test]
    fn a_self_referential_hidden_predicate_is_left_in_place() {
        let mut context = Context::new(Config::default());
        let hidden = context.find_or_create_predicate("hidden", 0);
        context.predicate_mut(hidden).visibility = Visibility::Hidden;

        // forall () (hidden <-> hidden) — directly self-referential.
        let def = Formula::for_all(
            vec![],
            Formula::biconditional(Formula::Predicate(hidden, vec![]), Formula::Predicate(hidden, vec![])),
        );

        let result = eliminate_hidden_predicates(vec![def], &mut context);
        assert_eq!(result.len(), 1, "left untouched since eliminating it would require substituting into itself");
    }

    #[test]
    fn a_self_referential_hidden_predicate_warns_exactly_once() {
        let mut context = Context::new(Config::default());
        let hidden = context.find_or_create_predicate("hidden", 0);
        context.predicate_mut(hidden).visibility = Visibility::Hidden;

        let def = Formula::for_all(
            vec![],
            Formula::biconditional(Formula::Predicate(hidden, vec![]), Formula::Predicate(hidden, vec![])),
        );

        eliminate_hidden_predicates(vec![def], &mut context);

        let warnings = context.diagnostics.warnings();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0], Warning::CircularHiddenDependency("hidden/0".to_string()));
    }
}
