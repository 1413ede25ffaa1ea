//! Term, atom, and comparison translation (`spec.md` §4.3), grounded on
//! `teiesti-anthem-next`'s `translate_term`/`translate_atom`/`translate_comparison`.

use crate::ast::declaration::Domain;
use crate::ast::{BinaryOperator as AstBinaryOperator, ComparisonOperator, Formula, Term, UnaryOperator, VariableId};
use crate::context::Context;
use crate::surface::ast::{
    Atom, AtomicFormula, BinaryOperator as SurfaceBinaryOperator, ComparisonOperator as SurfaceComparisonOperator,
    Term as SurfaceTerm,
};

use super::Scope;

fn convert_operator(op: SurfaceBinaryOperator) -> AstBinaryOperator {
    match op {
        SurfaceBinaryOperator::Plus => AstBinaryOperator::Plus,
        SurfaceBinaryOperator::Minus => AstBinaryOperator::Minus,
        SurfaceBinaryOperator::Multiply => AstBinaryOperator::Multiply,
        SurfaceBinaryOperator::Divide => AstBinaryOperator::Divide,
        SurfaceBinaryOperator::Modulo => AstBinaryOperator::Modulo,
        SurfaceBinaryOperator::Power => AstBinaryOperator::Power,
    }
}

fn convert_comparison(op: SurfaceComparisonOperator) -> ComparisonOperator {
    match op {
        SurfaceComparisonOperator::Equal => ComparisonOperator::Equal,
        SurfaceComparisonOperator::NotEqual => ComparisonOperator::NotEqual,
        SurfaceComparisonOperator::Less => ComparisonOperator::Less,
        SurfaceComparisonOperator::LessEqual => ComparisonOperator::LessEqual,
        SurfaceComparisonOperator::Greater => ComparisonOperator::Greater,
        SurfaceComparisonOperator::GreaterEqual => ComparisonOperator::GreaterEqual,
    }
}

/// Asserts that `value` denotes `term`, existentially quantifying whatever intermediate
/// variables `term`'s arithmetic, function nesting, interval, or pool structure requires.
pub fn translate_term(term: &SurfaceTerm, value: Term, scope: &mut Scope, context: &mut Context) -> Formula {
    match term {
        SurfaceTerm::Variable(name) => {
            let id = scope.resolve(name, context);
            Formula::Comparison(ComparisonOperator::Equal, value, Term::Variable(id))
        }
        SurfaceTerm::Anonymous => {
            let id = scope.fresh_anonymous(context);
            Formula::Comparison(ComparisonOperator::Equal, value, Term::Variable(id))
        }
        SurfaceTerm::Integer(i) => Formula::Comparison(ComparisonOperator::Equal, value, Term::Integer(*i)),
        SurfaceTerm::Infimum => Formula::Comparison(
            ComparisonOperator::Equal,
            value,
            Term::SpecialInteger(crate::ast::SpecialInteger::Infimum),
        ),
        SurfaceTerm::Supremum => Formula::Comparison(
            ComparisonOperator::Equal,
            value,
            Term::SpecialInteger(crate::ast::SpecialInteger::Supremum),
        ),
        SurfaceTerm::String(s) => Formula::Comparison(ComparisonOperator::Equal, value, Term::String(s.clone())),
        SurfaceTerm::Symbolic(name) => {
            let id = context.find_or_create_function(name, 0);
            Formula::Comparison(ComparisonOperator::Equal, value, Term::function(id, vec![]))
        }
        SurfaceTerm::Negative(inner) => {
            let inner_var = context.new_variable(None, crate::ast::VariableType::Body, Domain::Unknown);
            let inner_formula = translate_term(inner, Term::Variable(inner_var), scope, context);
            Formula::exists(
                vec![inner_var],
                Formula::and(vec![
                    inner_formula,
                    Formula::Comparison(
                        ComparisonOperator::Equal,
                        value,
                        Term::UnaryOperation(UnaryOperator::Minus, Box::new(Term::Variable(inner_var))),
                    ),
                ]),
            )
        }
        SurfaceTerm::Absolute(inner) => {
            let inner_var = context.new_variable(None, crate::ast::VariableType::Body, Domain::Unknown);
            let inner_formula = translate_term(inner, Term::Variable(inner_var), scope, context);
            Formula::exists(
                vec![inner_var],
                Formula::and(vec![
                    inner_formula,
                    Formula::Comparison(
                        ComparisonOperator::Equal,
                        value,
                        Term::UnaryOperation(UnaryOperator::Absolute, Box::new(Term::Variable(inner_var))),
                    ),
                ]),
            )
        }
        SurfaceTerm::BinaryOperation(op, left, right) => {
            let left_var = context.new_variable(None, crate::ast::VariableType::Body, Domain::Unknown);
            let right_var = context.new_variable(None, crate::ast::VariableType::Body, Domain::Unknown);
            let left_formula = translate_term(left, Term::Variable(left_var), scope, context);
            let right_formula = translate_term(right, Term::Variable(right_var), scope, context);
            Formula::exists(
                vec![left_var, right_var],
                Formula::and(vec![
                    left_formula,
                    right_formula,
                    Formula::Comparison(
                        ComparisonOperator::Equal,
                        value,
                        Term::BinaryOperation(
                            convert_operator(*op),
                            Box::new(Term::Variable(left_var)),
                            Box::new(Term::Variable(right_var)),
                        ),
                    ),
                ]),
            )
        }
        SurfaceTerm::Function(name, arguments) => {
            let (extra_vars, conditions, arg_terms) = translate_arguments(arguments, scope, context);
            let function_id = context.find_or_create_function(name, arguments.len());
            let equality = Formula::Comparison(ComparisonOperator::Equal, value, Term::function(function_id, arg_terms));
            if extra_vars.is_empty() {
                equality
            } else {
                Formula::exists(extra_vars, Formula::and(conditions.into_iter().chain([equality]).collect()))
            }
        }
        // `l..u` unfolds to `∃N1,N2,N3 (N1=l ∧ N2=u ∧ N1≤N3 ∧ N3≤N2 ∧ X=N3)` (`spec.md` §4.3) —
        // written out explicitly rather than as a compact `Term::Interval`/`Formula::In` node,
        // since nothing downstream ever lowers that node back into this shape.
        SurfaceTerm::Interval(left, right) => {
            let left_var = context.new_variable(None, crate::ast::VariableType::Body, Domain::Integer);
            let right_var = context.new_variable(None, crate::ast::VariableType::Body, Domain::Integer);
            let result_var = context.new_variable(None, crate::ast::VariableType::Body, Domain::Integer);
            let left_formula = translate_term(left, Term::Variable(left_var), scope, context);
            let right_formula = translate_term(right, Term::Variable(right_var), scope, context);
            Formula::exists(
                vec![left_var, right_var, result_var],
                Formula::and(vec![
                    left_formula,
                    right_formula,
                    Formula::Comparison(ComparisonOperator::LessEqual, Term::Variable(left_var), Term::Variable(result_var)),
                    Formula::Comparison(ComparisonOperator::LessEqual, Term::Variable(result_var), Term::Variable(right_var)),
                    Formula::Comparison(ComparisonOperator::Equal, value, Term::Variable(result_var)),
                ]),
            )
        }
        SurfaceTerm::Pool(elements) => {
            Formula::or(elements.iter().map(|e| translate_term(e, value.clone(), scope, context)).collect())
        }
    }
}

/// One argument position: primitive surface terms convert directly with no quantifier; composite
/// ones (arithmetic, intervals, pools, nested functions that need it) get a fresh value variable
/// plus the side condition binding it, left for the caller to existentially close.
fn translate_argument(term: &SurfaceTerm, scope: &mut Scope, context: &mut Context) -> (Vec<VariableId>, Vec<Formula>, Term) {
    match term {
        SurfaceTerm::Variable(name) => {
            let id = scope.resolve(name, context);
            (vec![], vec![], Term::Variable(id))
        }
        SurfaceTerm::Anonymous => {
            let id = scope.fresh_anonymous(context);
            (vec![id], vec![], Term::Variable(id))
        }
        SurfaceTerm::Integer(i) => (vec![], vec![], Term::Integer(*i)),
        SurfaceTerm::Infimum => (vec![], vec![], Term::SpecialInteger(crate::ast::SpecialInteger::Infimum)),
        SurfaceTerm::Supremum => (vec![], vec![], Term::SpecialInteger(crate::ast::SpecialInteger::Supremum)),
        SurfaceTerm::String(s) => (vec![], vec![], Term::String(s.clone())),
        SurfaceTerm::Symbolic(name) => {
            let function_id = context.find_or_create_function(name, 0);
            (vec![], vec![], Term::function(function_id, vec![]))
        }
        SurfaceTerm::Function(name, arguments) => {
            let (mut vars, mut conditions, arg_terms) = translate_arguments(arguments, scope, context);
            let function_id = context.find_or_create_function(name, arguments.len());
            let term = Term::function(function_id, arg_terms);
            vars.dedup();
            conditions.dedup();
            (vars, conditions, term)
        }
        SurfaceTerm::Negative(_) | SurfaceTerm::Absolute(_) | SurfaceTerm::BinaryOperation(..) | SurfaceTerm::Interval(..) | SurfaceTerm::Pool(_) => {
            let value_var = context.new_variable(None, crate::ast::VariableType::Body, Domain::Unknown);
            let condition = translate_term(term, Term::Variable(value_var), scope, context);
            (vec![value_var], vec![condition], Term::Variable(value_var))
        }
    }
}

fn translate_arguments(terms: &[SurfaceTerm], scope: &mut Scope, context: &mut Context) -> (Vec<VariableId>, Vec<Formula>, Vec<Term>) {
    let mut vars = Vec::new();
    let mut conditions = Vec::new();
    let mut result_terms = Vec::new();
    for term in terms {
        let (t_vars, t_conditions, t_term) = translate_argument(term, scope, context);
        vars.extend(t_vars);
        conditions.extend(t_conditions);
        result_terms.push(t_term);
    }
    (vars, conditions, result_terms)
}

pub fn translate_atom(atom: &Atom, scope: &mut Scope, context: &mut Context) -> Formula {
    let (vars, conditions, arg_terms) = translate_arguments(&atom.terms, scope, context);
    let predicate_id = context.find_or_create_predicate(&atom.predicate, atom.terms.len());
    context.predicate_mut(predicate_id).is_used = true;
    let atom_formula = Formula::Predicate(predicate_id, arg_terms);
    if vars.is_empty() {
        atom_formula
    } else {
        Formula::exists(vars, Formula::and(conditions.into_iter().chain([atom_formula]).collect()))
    }
}

pub fn translate_comparison(left: &SurfaceTerm, op: SurfaceComparisonOperator, right: &SurfaceTerm, scope: &mut Scope, context: &mut Context) -> Formula {
    let (mut vars, mut conditions, left_term) = translate_argument(left, scope, context);
    let (right_vars, right_conditions, right_term) = translate_argument(right, scope, context);
    vars.extend(right_vars);
    conditions.extend(right_conditions);
    let comparison = Formula::Comparison(convert_comparison(op), left_term, right_term);
    if vars.is_empty() {
        comparison
    } else {
        Formula::exists(vars, Formula::and(conditions.into_iter().chain([comparison]).collect()))
    }
}

pub fn translate_atomic_formula(formula: &AtomicFormula, scope: &mut Scope, context: &mut Context) -> Formula {
    match formula {
        AtomicFormula::Atom(atom) => translate_atom(atom, scope, context),
        AtomicFormula::Comparison(left, op, right) => translate_comparison(left, *op, right, scope, context),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Config;

    #[test]
    fn atom_with_only_plain_variable_arguments_needs_no_existential() {
        let mut context = Context::new(Config::default());
        let mut scope = Scope::new();
        let atom = Atom {
            predicate: "p".to_string(),
            terms: vec![SurfaceTerm::Variable("X".to_string())],
        };

        let formula = translate_atom(&atom, &mut scope, &mut context);

        let Formula::Predicate(id, args) = &formula else {
            panic!("expected a bare predicate, got {formula:?}");
        };
        assert_eq!(context.predicate(*id).name, "p");
        assert_eq!(args.len(), 1);
        assert!(matches!(args[0], Term::Variable(_)));
    }

    #[test]
    fn arithmetic_argument_is_wrapped_in_an_existential_equality() {
        let mut context = Context::new(Config::default());
        let mut scope = Scope::new();
        let atom = Atom {
            predicate: "p".to_string(),
            terms: vec![SurfaceTerm::BinaryOperation(
                SurfaceBinaryOperator::Plus,
                Box::new(SurfaceTerm::Variable("X".to_string())),
                Box::new(SurfaceTerm::Integer(1)),
            )],
        };

        let formula = translate_atom(&atom, &mut scope, &mut context);

        let Formula::Exists(vars, body) = &formula else {
            panic!("expected an Exists wrapping the arithmetic side condition, got {formula:?}");
        };
        assert_eq!(vars.len(), 1, "one fresh value variable for the sum");
        let Formula::And(conjuncts) = body.as_ref() else {
            panic!("expected the side condition and the atom conjoined, got {body:?}");
        };
        assert_eq!(conjuncts.len(), 2);
        assert!(matches!(conjuncts[1], Formula::Predicate(..)));
    }

    #[test]
    fn symbolic_constant_becomes_a_zero_arity_function() {
        let mut context = Context::new(Config::default());
        let mut scope = Scope::new();

        let formula = translate_term(&SurfaceTerm::Symbolic("a".to_string()), Term::Integer(0), &mut scope, &mut context);

        let Formula::Comparison(ComparisonOperator::Equal, Term::Integer(0), Term::Function(id, args)) = &formula else {
            panic!("expected value = a, got {formula:?}");
        };
        assert_eq!(context.function(*id).name, "a");
        assert!(args.is_empty());
    }

    #[test]
    fn comparison_of_two_plain_variables_needs_no_existential() {
        let mut context = Context::new(Config::default());
        let mut scope = Scope::new();

        let formula = translate_comparison(
            &SurfaceTerm::Variable("X".to_string()),
            SurfaceComparisonOperator::Less,
            &SurfaceTerm::Variable("Y".to_string()),
            &mut scope,
            &mut context,
        );

        assert!(matches!(formula, Formula::Comparison(ComparisonOperator::Less, Term::Variable(_), Term::Variable(_))));
    }

    #[test]
    fn interval_unfolds_into_three_fresh_variables_and_explicit_comparisons() {
        let mut context = Context::new(Config::default());
        let mut scope = Scope::new();
        let value_var = context.new_variable(None, crate::ast::VariableType::Head, Domain::Unknown);

        let formula = translate_term(
            &SurfaceTerm::Interval(Box::new(SurfaceTerm::Integer(1)), Box::new(SurfaceTerm::Integer(5))),
            Term::Variable(value_var),
            &mut scope,
            &mut context,
        );

        let Formula::Exists(vars, body) = &formula else {
            panic!("expected an Exists over the three interval variables, got {formula:?}");
        };
        assert_eq!(vars.len(), 3, "N1, N2, N3");
        let Formula::And(conjuncts) = body.as_ref() else {
            panic!("expected a conjunction of N1=l, N2=u, N1<=N3, N3<=N2, X=N3, got {body:?}");
        };
        assert_eq!(conjuncts.len(), 5);
        assert!(matches!(conjuncts[0], Formula::Comparison(ComparisonOperator::Equal, Term::Variable(_), Term::Integer(1))));
        assert!(matches!(conjuncts[1], Formula::Comparison(ComparisonOperator::Equal, Term::Variable(_), Term::Integer(5))));
        assert!(matches!(conjuncts[2], Formula::Comparison(ComparisonOperator::LessEqual, Term::Variable(_), Term::Variable(_))));
        assert!(matches!(conjuncts[3], Formula::Comparison(ComparisonOperator::LessEqual, Term::Variable(_), Term::Variable(_))));
        assert!(matches!(conjuncts[4], Formula::Comparison(ComparisonOperator::Equal, Term::Variable(_), Term::Variable(_))));
        assert!(!matches!(conjuncts[4], Formula::Comparison(_, _, Term::Integer(_))));
    }

    #[test]
    fn repeated_variable_name_resolves_to_the_same_id_within_a_scope() {
        let mut context = Context::new(Config::default());
        let mut scope = Scope::new();
        let a = scope.resolve("X", &mut context);
        let b = scope.resolve("X", &mut context);
        assert_eq!(a, b);
    }
}
