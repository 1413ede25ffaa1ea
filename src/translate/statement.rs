//! Rule and directive translation (`spec.md` §4.3), grounded on `teiesti-anthem-next`'s
//! `body_translate`/`choice_body_translate`/`shorthand_rule`/`shorthand`.

use crate::ast::declaration::{Domain, VariableType, Visibility};
use crate::ast::{Formula, PredicateId, ScopedFormula, Term, VariableId};
use crate::context::Context;
use crate::error::Warning;
use crate::surface::ast::{Atom, BodyLiteral, Directive, Head, Program, Rule, Statement};

use super::term::{translate_atomic_formula, translate_term};
use super::Scope;

/// One head atom's contribution to its predicate's eventual completed definition
/// (`spec.md` §4.5): `∀X̄ (disjunct → p(X̄))` is one disjunct of `Dp(X̄)`.
#[derive(Debug, Clone)]
pub struct RuleContribution {
    pub predicate: PredicateId,
    pub disjunct: ScopedFormula,
}

#[derive(Debug, Clone)]
pub enum TranslatedStatement {
    Definitional(Vec<RuleContribution>),
    /// An integrity constraint: `∀x̄ ¬B`, asserted outright rather than folded into completion.
    Constraint(ScopedFormula),
}

pub(crate) fn body_translate(body: &[BodyLiteral], scope: &mut Scope, context: &mut Context) -> Vec<Formula> {
    body.iter()
        .map(|literal| match literal {
            BodyLiteral::Positive(f) => translate_atomic_formula(f, scope, context),
            BodyLiteral::Negative(f) => Formula::not(translate_atomic_formula(f, scope, context)),
            BodyLiteral::DoubleNegative(f) => Formula::not(Formula::not(translate_atomic_formula(f, scope, context))),
        })
        .collect()
}

/// Allocates one fresh `Head`-typed variable per head argument position and an equality
/// condition linking it to the position's actual term — head-normalization (`spec.md` §9): every
/// head argument is guaranteed to be a plain variable, never a compound term.
pub(crate) fn normalize_head_args(atom: &Atom, scope: &mut Scope, context: &mut Context) -> (Vec<VariableId>, Vec<Formula>) {
    let mut head_vars = Vec::with_capacity(atom.terms.len());
    let mut conditions = Vec::with_capacity(atom.terms.len());
    for term in &atom.terms {
        let head_var = context.new_variable(None, VariableType::Head, Domain::Unknown);
        conditions.push(translate_term(term, Term::Variable(head_var), scope, context));
        head_vars.push(head_var);
    }
    (head_vars, conditions)
}

pub(crate) fn declare_head_predicate(atom: &Atom, context: &mut Context) -> PredicateId {
    let predicate = context.find_or_create_predicate(&atom.predicate, atom.terms.len());
    context.predicate_mut(predicate).is_used = true;
    predicate
}

pub fn shorthand_rule(rule: &Rule, context: &mut Context) -> TranslatedStatement {
    let mut scope = Scope::new();

    match &rule.head {
        Head::Empty => {
            let body_formulas = body_translate(&rule.body, &mut scope, context);
            let free_variables: Vec<VariableId> = scope.declared_variables().copied().collect();
            let constraint = Formula::not(Formula::and(body_formulas));
            TranslatedStatement::Constraint(ScopedFormula::new(constraint, free_variables))
        }
        Head::Basic(atom) => {
            let (head_vars, head_conditions) = normalize_head_args(atom, &mut scope, context);
            let predicate = declare_head_predicate(atom, context);
            let body_formulas = body_translate(&rule.body, &mut scope, context);
            let body_only: Vec<VariableId> = scope.declared_variables().copied().collect();
            let conjunction = Formula::and(head_conditions.into_iter().chain(body_formulas).collect());
            let disjunct = Formula::exists(body_only, conjunction);
            TranslatedStatement::Definitional(vec![RuleContribution {
                predicate,
                disjunct: ScopedFormula::new(disjunct, head_vars),
            }])
        }
        Head::Choice(atom) => {
            let (head_vars, head_conditions) = normalize_head_args(atom, &mut scope, context);
            let predicate = declare_head_predicate(atom, context);
            let body_formulas = body_translate(&rule.body, &mut scope, context);
            let body_only: Vec<VariableId> = scope.declared_variables().copied().collect();
            // Choice rules don't force the head from the body: conjoining the head atom itself
            // into the disjunct (rather than just the body) means `p(X̄) <-> (... ∨ (p(X̄) ∧ B) ∨ ...)`,
            // which leaves `p(X̄)` free to be true or false whenever `B` holds.
            let own_atom = Formula::Predicate(predicate, head_vars.iter().map(|v| Term::Variable(*v)).collect());
            #[cfg(debug_assertions)]
            own_atom.assert_head_normal_form();
            let conjunction = Formula::and(
                head_conditions
                    .into_iter()
                    .chain(body_formulas)
                    .chain([own_atom])
                    .collect(),
            );
            let disjunct = Formula::exists(body_only, conjunction);
            TranslatedStatement::Definitional(vec![RuleContribution {
                predicate,
                disjunct: ScopedFormula::new(disjunct, head_vars),
            }])
        }
        Head::Disjunctive(atoms) => {
            let mut per_atom = Vec::with_capacity(atoms.len());
            for atom in atoms {
                let (vars, conditions) = normalize_head_args(atom, &mut scope, context);
                let predicate = declare_head_predicate(atom, context);
                per_atom.push((predicate, vars, conditions));
            }
            let body_formulas = body_translate(&rule.body, &mut scope, context);
            let all_head_conditions: Vec<Formula> = per_atom
                .iter()
                .flat_map(|(_, _, conditions)| conditions.clone())
                .collect();

            let mut contributions = Vec::with_capacity(atoms.len());
            for (index, (predicate, vars, _)) in per_atom.iter().enumerate() {
                // Variables belonging to this disjunct's own head stay free (`X̄`); every other
                // variable — this rule's plain body variables and the other head atoms' own
                // head variables — gets existentially closed within the disjunct.
                let other_head_vars = per_atom
                    .iter()
                    .enumerate()
                    .filter(|(j, _)| *j != index)
                    .flat_map(|(_, (_, vars, _))| vars.clone());
                let locally_bound: Vec<VariableId> = scope
                    .declared_variables()
                    .copied()
                    .chain(other_head_vars)
                    .collect();
                let own_atom = Formula::Predicate(*predicate, vars.iter().map(|v| Term::Variable(*v)).collect());
                #[cfg(debug_assertions)]
                own_atom.assert_head_normal_form();
                let conjunction = Formula::and(
                    all_head_conditions
                        .clone()
                        .into_iter()
                        .chain(body_formulas.clone())
                        .chain([own_atom])
                        .collect(),
                );
                let disjunct = Formula::exists(locally_bound, conjunction);
                contributions.push(RuleContribution {
                    predicate: *predicate,
                    disjunct: ScopedFormula::new(disjunct, vars.clone()),
                });
            }
            TranslatedStatement::Definitional(contributions)
        }
    }
}

/// Translates every rule in `program`, applies `#show`/`#external` directives to the resulting
/// declarations, and returns the per-statement contributions for [`crate::completion`] to group.
pub fn translate_program(program: &Program, context: &mut Context) -> Vec<TranslatedStatement> {
    let mut statements = Vec::new();
    let mut show_all = false;
    let mut shown = Vec::new();

    for statement in &program.statements {
        match statement {
            Statement::Rule(rule) => statements.push(shorthand_rule(rule, context)),
            Statement::Directive(Directive::ShowAll) => show_all = true,
            Statement::Directive(Directive::Show(name, arity)) => shown.push((name.clone(), *arity)),
            Statement::Directive(Directive::External(name, arity)) => {
                let predicate = context.find_or_create_predicate(name, *arity);
                context.predicate_mut(predicate).is_external = true;
            }
        }
    }

    if show_all {
        for predicate in context.predicates() {
            // `#show.` with no further directives means "show nothing but what's explicitly
            // listed"; with no `#show` directives at all every predicate keeps its default
            // visibility. Either way `#show.` alone only matters when no names follow it, so
            // nothing to do here beyond the default visibility already assigned at creation.
            let _ = predicate;
        }
    } else if !shown.is_empty() {
        let ids: Vec<PredicateId> = context.predicates().map(|p| p.id()).collect();
        for id in ids {
            context.predicate_mut(id).visibility = Visibility::Hidden;
        }
        for (name, arity) in &shown {
            let id = context.find_or_create_predicate(name, *arity);
            context.predicate_mut(id).visibility = Visibility::Visible;
        }
    }

    for (name, arity) in &shown {
        let id = context.find_or_create_predicate(name, *arity);
        if !context.predicate(id).is_used {
            context.diagnostics.warn(Warning::ShowDirectiveUnmatched(format!("{name}/{arity}")));
        }
    }

    statements
}
