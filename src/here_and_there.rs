//! Here-and-there embedding into classical logic, `spec.md` §4.9.
//!
//! Each rule is read literally as an implication (unlike [`crate::completion`], which folds every
//! rule for the same head into one disjunction) and embedded via the standard two-world
//! translation: `h` interprets a formula in the "here" (minimal) world, using a predicate's plain
//! name; `t` interprets it in the "there" (classical) world, using the predicate's primed
//! counterpart (`spec.md`/`original_source` `Translation.cpp`). The two only diverge under
//! negation, where `t` falls back to `h` for the negated part — `¬F ↦ ¬h(F) ∧ ¬t(F)` — which is
//! the "primes only outside of an odd number of negations" shape `spec.md` §9 describes.
//! Comparisons and set-membership are classical built-ins and are left unprimed in both worlds.

use crate::ast::declaration::Visibility;
use crate::ast::{Formula, PredicateId, Term, VariableId};
use crate::context::Context;
use crate::surface::ast::{Directive, Head, Program, Rule, Statement};
use crate::translate::statement::{body_translate, declare_head_predicate, normalize_head_args};
use crate::translate::Scope;

/// Reads one rule as a plain implication rather than a completion disjunct.
pub fn rule_to_formula(rule: &Rule, context: &mut Context) -> Formula {
    let mut scope = Scope::new();
    match &rule.head {
        Head::Empty => {
            let body_formulas = body_translate(&rule.body, &mut scope, context);
            let free_vars: Vec<VariableId> = scope.declared_variables().copied().collect();
            Formula::for_all(free_vars, Formula::not(Formula::and(body_formulas)))
        }
        Head::Basic(atom) => {
            let (head_vars, head_conditions) = normalize_head_args(atom, &mut scope, context);
            let predicate = declare_head_predicate(atom, context);
            let body_formulas = body_translate(&rule.body, &mut scope, context);
            let mut all_vars = head_vars.clone();
            all_vars.extend(scope.declared_variables().copied());
            let antecedent = Formula::and(head_conditions.into_iter().chain(body_formulas).collect());
            let head_atom = Formula::Predicate(predicate, head_vars.iter().map(|v| Term::Variable(*v)).collect());
            #[cfg(debug_assertions)]
            head_atom.assert_head_normal_form();
            Formula::for_all(all_vars, Formula::implies(antecedent, head_atom))
        }
        Head::Choice(atom) => {
            let (head_vars, head_conditions) = normalize_head_args(atom, &mut scope, context);
            let predicate = declare_head_predicate(atom, context);
            let body_formulas = body_translate(&rule.body, &mut scope, context);
            let mut all_vars = head_vars.clone();
            all_vars.extend(scope.declared_variables().copied());
            let antecedent = Formula::and(head_conditions.into_iter().chain(body_formulas).collect());
            let head_atom = Formula::Predicate(predicate, head_vars.iter().map(|v| Term::Variable(*v)).collect());
            #[cfg(debug_assertions)]
            head_atom.assert_head_normal_form();
            let excluded_middle = Formula::or(vec![head_atom.clone(), Formula::not(head_atom)]);
            Formula::for_all(all_vars, Formula::implies(antecedent, excluded_middle))
        }
        Head::Disjunctive(atoms) => {
            let mut all_vars = Vec::new();
            let mut head_conditions_all = Vec::new();
            let mut head_atoms = Vec::new();
            for atom in atoms {
                let (vars, conditions) = normalize_head_args(atom, &mut scope, context);
                let predicate = declare_head_predicate(atom, context);
                let atom_formula = Formula::Predicate(predicate, vars.iter().map(|v| Term::Variable(*v)).collect());
                #[cfg(debug_assertions)]
                atom_formula.assert_head_normal_form();
                head_atoms.push(atom_formula);
                head_conditions_all.extend(conditions);
                all_vars.extend(vars);
            }
            let body_formulas = body_translate(&rule.body, &mut scope, context);
            all_vars.extend(scope.declared_variables().copied());
            let antecedent = Formula::and(head_conditions_all.into_iter().chain(body_formulas).collect());
            Formula::for_all(all_vars, Formula::implies(antecedent, Formula::or(head_atoms)))
        }
    }
}

/// Every rule of `program`, applying `#show`/`#external` the same way completion mode does.
pub fn rules_to_formulas(program: &Program, context: &mut Context) -> Vec<Formula> {
    let mut formulas = Vec::new();
    for statement in &program.statements {
        match statement {
            Statement::Rule(rule) => formulas.push(rule_to_formula(rule, context)),
            Statement::Directive(Directive::External(name, arity)) => {
                let predicate = context.find_or_create_predicate(name, *arity);
                context.predicate_mut(predicate).is_external = true;
            }
            Statement::Directive(Directive::Show(name, arity)) => {
                let predicate = context.find_or_create_predicate(name, *arity);
                context.predicate_mut(predicate).visibility = Visibility::Visible;
            }
            Statement::Directive(Directive::ShowAll) => {}
        }
    }
    formulas
}

fn is_negation_shaped(formula: &Formula) -> Option<&Formula> {
    match formula {
        Formula::Not(inner) => Some(inner),
        _ => None,
    }
}

/// `h`: interpretation in the "here" world, using each predicate's plain name.
pub fn here(formula: &Formula, context: &mut Context) -> Formula {
    if let Some(inner) = is_negation_shaped(formula) {
        return Formula::not(here(inner, context));
    }
    match formula {
        Formula::Boolean(b) => Formula::Boolean(*b),
        Formula::Predicate(id, args) => Formula::Predicate(*id, args.clone()),
        Formula::Comparison(op, l, r) => Formula::Comparison(*op, l.clone(), r.clone()),
        Formula::In(e, s) => Formula::in_((**e).clone(), (**s).clone()),
        Formula::Not(_) => unreachable!("handled above"),
        Formula::And(fs) => Formula::And(fs.iter().map(|f| here(f, context)).collect()),
        Formula::Or(fs) => Formula::Or(fs.iter().map(|f| here(f, context)).collect()),
        Formula::Implies(l, r) => Formula::implies(here(l, context), here(r, context)),
        Formula::Biconditional(l, r) => Formula::biconditional(here(l, context), here(r, context)),
        Formula::Exists(vars, f) => Formula::Exists(vars.clone(), Box::new(here(f, context))),
        Formula::ForAll(vars, f) => Formula::ForAll(vars.clone(), Box::new(here(f, context))),
    }
}

/// `t`: interpretation in the "there" world, priming each predicate except where it falls back to
/// `h` under a negation (`spec.md` §9).
pub fn there(formula: &Formula, context: &mut Context) -> Formula {
    if let Some(inner) = is_negation_shaped(formula) {
        return Formula::and(vec![Formula::not(here(inner, context)), Formula::not(there(inner, context))]);
    }
    match formula {
        Formula::Boolean(b) => Formula::Boolean(*b),
        Formula::Predicate(id, args) => Formula::Predicate(context.primed_predicate(*id), args.clone()),
        Formula::Comparison(op, l, r) => Formula::Comparison(*op, l.clone(), r.clone()),
        Formula::In(e, s) => Formula::in_((**e).clone(), (**s).clone()),
        Formula::Not(_) => unreachable!("handled above"),
        Formula::And(fs) => Formula::And(fs.iter().map(|f| there(f, context)).collect()),
        Formula::Or(fs) => Formula::Or(fs.iter().map(|f| there(f, context)).collect()),
        Formula::Implies(l, r) => Formula::and(vec![
            Formula::implies(here(l, context), here(r, context)),
            Formula::implies(there(l, context), there(r, context)),
        ]),
        Formula::Biconditional(l, r) => there(
            &Formula::and(vec![Formula::implies((**l).clone(), (**r).clone()), Formula::implies((**r).clone(), (**l).clone())]),
            context,
        ),
        Formula::Exists(vars, f) => Formula::Exists(vars.clone(), Box::new(there(f, context))),
        Formula::ForAll(vars, f) => Formula::ForAll(vars.clone(), Box::new(there(f, context))),
    }
}

/// `∀X̄ (p(X̄) → p'(X̄))` for every used, non-external predicate — "here" truth persists into
/// "there" (`spec.md` §4.9).
pub fn persistence_axioms(context: &mut Context) -> Vec<Formula> {
    let predicate_ids: Vec<PredicateId> = context
        .predicates()
        .filter(|p| p.is_used && !p.is_external)
        .map(|p| p.id())
        .collect();
    predicate_ids
        .into_iter()
        .map(|id| {
            let arity = context.predicate(id).arity;
            let vars: Vec<VariableId> = (0..arity)
                .map(|_| context.new_variable(None, crate::ast::declaration::VariableType::Head, crate::ast::Domain::Unknown))
                .collect();
            let args: Vec<Term> = vars.iter().map(|v| Term::Variable(*v)).collect();
            let primed = context.primed_predicate(id);
            Formula::for_all(
                vars,
                Formula::implies(Formula::Predicate(id, args.clone()), Formula::Predicate(primed, args)),
            )
        })
        .collect()
}

/// Embeds a single program: `h` and `t` of every rule, plus persistence axioms
/// (`spec.md` §4.9, single-program mode).
pub fn embed_single_program(program: &Program, context: &mut Context) -> Vec<Formula> {
    let rule_formulas = rules_to_formulas(program, context);
    let mut embedded: Vec<Formula> = rule_formulas.iter().map(|f| here(f, context)).collect();
    embedded.extend(rule_formulas.iter().map(|f| there(f, context)));
    embedded.extend(persistence_axioms(context));
    embedded
}

/// Embeds two programs sharing one predicate vocabulary and conjectures their equivalence:
/// `(⋀ HT(A)) ↔ (⋀ HT(B))` (`spec.md` §4.9, double-program / external-equivalence mode).
pub fn embed_and_conjecture_equivalence(program_a: &Program, program_b: &Program, context: &mut Context) -> Formula {
    let a = Formula::and(embed_single_program(program_a, context));
    let b = Formula::and(embed_single_program(program_b, context));
    Formula::biconditional(a, b)
}
