//! Clark's completion, `spec.md` §4.5.
//!
//! Collects every rule's contribution to its head predicate's defining disjunction `Dp(X̄)`,
//! unifies the disjuncts onto one shared parameter tuple, and emits `∀X̄ (p(X̄) ↔ Dp(X̄))` per used
//! predicate plus the program's integrity constraints, closed separately.

use indexmap::IndexMap;
use rustc_hash::FxHashMap;

use crate::ast::declaration::{Domain, VariableType};
use crate::ast::substitute::rename_free_variables;
use crate::ast::{Formula, PredicateId, Term, VariableId};
use crate::context::Context;
use crate::error::Warning;
use crate::translate::statement::{RuleContribution, TranslatedStatement};

pub fn complete(statements: Vec<TranslatedStatement>, context: &mut Context) -> Vec<Formula> {
    let mut by_predicate: IndexMap<PredicateId, Vec<RuleContribution>> = IndexMap::new();
    let mut constraints = Vec::new();

    for statement in statements {
        match statement {
            TranslatedStatement::Definitional(contributions) => {
                for contribution in contributions {
                    by_predicate
                        .entry(contribution.predicate)
                        .or_default()
                        .push(contribution);
                }
            }
            TranslatedStatement::Constraint(scoped) => constraints.push(scoped.close_universally()),
        }
    }

    let predicate_ids: Vec<PredicateId> = context.predicates().map(|p| p.id()).collect();
    let mut results = Vec::with_capacity(predicate_ids.len() + constraints.len());

    for predicate_id in predicate_ids {
        let decl = context.predicate(predicate_id);
        if decl.is_external || !decl.is_used {
            continue;
        }
        let arity = decl.arity;
        let qualified_name = format!("{}/{}", decl.name, decl.arity);

        let shared_vars: Vec<VariableId> = (0..arity)
            .map(|_| context.new_variable(None, VariableType::Head, Domain::Unknown))
            .collect();
        let head_atom = Formula::Predicate(predicate_id, shared_vars.iter().map(|v| Term::Variable(*v)).collect());

        let definition = match by_predicate.get(&predicate_id) {
            Some(contributions) => {
                let disjuncts: Vec<Formula> = contributions
                    .iter()
                    .map(|contribution| {
                        let mapping: FxHashMap<VariableId, VariableId> = contribution
                            .disjunct
                            .free_variables
                            .iter()
                            .copied()
                            .zip(shared_vars.iter().copied())
                            .collect();
                        rename_free_variables(&contribution.disjunct.formula, &mapping)
                    })
                    .collect();
                Formula::or(disjuncts)
            }
            None => {
                context
                    .diagnostics
                    .warn(Warning::UndefinedPredicateAssumedFalse(qualified_name));
                Formula::FALSE
            }
        };

        results.push(Formula::for_all(shared_vars, Formula::biconditional(head_atom, definition)));
    }

    results.extend(constraints);
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Config;
    use crate::surface::parser::parse_program;
    use crate::translate::statement::translate_program;

    fn complete_source(source: &str) -> (Vec<Formula>, Context) {
        let mut context = Context::new(Config::default());
        let program = parse_program("<test>", source).expect("valid program");
        let statements = translate_program(&program, &mut context);
        let formulas = complete(statements, &mut context);
        (formulas, context)
    }

    #[test]
    fn a_fact_completes_to_a_biconditional_with_true() {
        let (formulas, context) = complete_source("a(1).\n");
        assert_eq!(formulas.len(), 1);
        let Formula::ForAll(_, body) = &formulas[0] else { panic!("expected ForAll, got {:?}", formulas[0]) };
        let Formula::Biconditional(head, def) = body.as_ref() else { panic!("expected Biconditional") };
        let Formula::Predicate(id, _) = head.as_ref() else { panic!("expected head atom") };
        assert_eq!(context.predicate(*id).name, "a");
        assert!(matches!(def.as_ref(), Formula::Or(disjuncts) if disjuncts.len() == 1));
    }

    #[test]
    fn an_undefined_predicate_completes_to_false_and_warns() {
        let (formulas, context) = complete_source(":- a, not b.\n");
        // neither `a` nor `b` appears in a rule head, so each completes to `<-> false`, plus the
        // constraint itself: three formulas total.
        assert_eq!(formulas.len(), 3);
        assert!(!context.diagnostics.warnings().is_empty());
    }

    #[test]
    fn a_constraint_is_asserted_outright_not_folded_into_a_disjunct() {
        let (formulas, _context) = complete_source("q(1).\n:- q(X), X > 0.\n");
        let constraint_count = formulas
            .iter()
            .filter(|f| matches!(f, Formula::ForAll(_, body) if matches!(body.as_ref(), Formula::Not(_))))
            .count();
        assert_eq!(constraint_count, 1);
    }
}
