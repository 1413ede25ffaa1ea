//! Domain mapping into TPTP's untyped `object` universe, `spec.md` §4.8.
//!
//! TPTP `tff` declares one sort; every value this crate's typed `Term` distinguishes (plain
//! integers, the two special integers, arithmetic results, symbolic strings) has to become a
//! first-order term over that single sort instead. Each is wrapped by a dedicated constructor
//! function (`f__integer__`, `f__sum__`, ...), registered once per run and reused everywhere —
//! the same wrapper names `teiesti-anthem-next`'s TPTP backend uses.

use crate::ast::{BinaryOperator, Formula, SpecialInteger, Term, UnaryOperator};
use crate::context::Context;
use crate::ast::ids::FunctionId;

#[derive(Debug, Clone, Copy)]
pub struct DomainMapping {
    pub integer: FunctionId,
    pub infimum: FunctionId,
    pub supremum: FunctionId,
    pub sum: FunctionId,
    pub difference: FunctionId,
    pub product: FunctionId,
    pub quotient: FunctionId,
    pub modulo: FunctionId,
    pub power: FunctionId,
    pub negation: FunctionId,
    pub absolute: FunctionId,
    pub symbolic: FunctionId,
}

impl DomainMapping {
    pub fn install(context: &mut Context) -> Self {
        Self {
            integer: context.find_or_create_function("f__integer__", 1),
            infimum: context.find_or_create_function("f__infimum__", 0),
            supremum: context.find_or_create_function("f__supremum__", 0),
            sum: context.find_or_create_function("f__sum__", 2),
            difference: context.find_or_create_function("f__difference__", 2),
            product: context.find_or_create_function("f__product__", 2),
            quotient: context.find_or_create_function("f__quotient__", 2),
            modulo: context.find_or_create_function("f__modulo__", 2),
            power: context.find_or_create_function("f__power__", 2),
            negation: context.find_or_create_function("f__negation__", 1),
            absolute: context.find_or_create_function("f__absolute_value__", 1),
            symbolic: context.find_or_create_function("f__symbolic__", 1),
        }
    }
}

fn map_term(term: &Term, mapping: &DomainMapping) -> Term {
    match term {
        Term::Integer(_) => Term::function(mapping.integer, vec![term.clone()]),
        Term::SpecialInteger(SpecialInteger::Infimum) => Term::function(mapping.infimum, vec![]),
        Term::SpecialInteger(SpecialInteger::Supremum) => Term::function(mapping.supremum, vec![]),
        Term::String(_) => Term::function(mapping.symbolic, vec![term.clone()]),
        Term::Variable(_) => term.clone(),
        Term::Function(id, args) => Term::Function(*id, args.iter().map(|a| map_term(a, mapping)).collect()),
        Term::UnaryOperation(op, inner) => {
            let wrapper = match op {
                UnaryOperator::Minus => mapping.negation,
                UnaryOperator::Absolute => mapping.absolute,
            };
            Term::function(wrapper, vec![map_term(inner, mapping)])
        }
        Term::BinaryOperation(op, left, right) => {
            let wrapper = match op {
                BinaryOperator::Plus => mapping.sum,
                BinaryOperator::Minus => mapping.difference,
                BinaryOperator::Multiply => mapping.product,
                BinaryOperator::Divide => mapping.quotient,
                BinaryOperator::Modulo => mapping.modulo,
                BinaryOperator::Power => mapping.power,
            };
            Term::function(wrapper, vec![map_term(left, mapping), map_term(right, mapping)])
        }
        Term::Interval(left, right) => Term::Interval(Box::new(map_term(left, mapping)), Box::new(map_term(right, mapping))),
    }
}

fn map_formula(formula: &Formula, mapping: &DomainMapping) -> Formula {
    match formula {
        Formula::Boolean(b) => Formula::Boolean(*b),
        Formula::Predicate(id, args) => Formula::Predicate(*id, args.iter().map(|a| map_term(a, mapping)).collect()),
        Formula::Comparison(op, l, r) => Formula::Comparison(*op, map_term(l, mapping), map_term(r, mapping)),
        Formula::In(element, set) => Formula::in_(map_term(element, mapping), map_term(set, mapping)),
        Formula::Not(f) => Formula::not(map_formula(f, mapping)),
        Formula::And(fs) => Formula::And(fs.iter().map(|f| map_formula(f, mapping)).collect()),
        Formula::Or(fs) => Formula::Or(fs.iter().map(|f| map_formula(f, mapping)).collect()),
        Formula::Implies(l, r) => Formula::implies(map_formula(l, mapping), map_formula(r, mapping)),
        Formula::Biconditional(l, r) => Formula::biconditional(map_formula(l, mapping), map_formula(r, mapping)),
        Formula::Exists(vars, f) => Formula::Exists(vars.clone(), Box::new(map_formula(f, mapping))),
        Formula::ForAll(vars, f) => Formula::ForAll(vars.clone(), Box::new(map_formula(f, mapping))),
    }
}

pub fn map_domains(formulas: Vec<Formula>, context: &mut Context) -> Vec<Formula> {
    let mapping = DomainMapping::install(context);
    formulas.iter().map(|f| map_formula(f, &mapping)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Config;

    #[test]
    fn a_plain_integer_is_wrapped_in_the_integer_constructor() {
        let mut context = Context::new(Config::default());
        let p = context.find_or_create_predicate("p", 1);
        let formula = Formula::Predicate(p, vec![Term::Integer(5)]);

        let mapped = map_domains(vec![formula], &mut context);

        let Formula::Predicate(_, args) = &mapped[0] else { panic!("expected a predicate") };
        assert!(matches!(&args[0], Term::Function(id, inner) if *id == context.find_or_create_function("f__integer__", 1) && inner[0] == Term::Integer(5)));
    }

    #[test]
    fn a_variable_passes_through_unmapped() {
        let mut context = Context::new(Config::default());
        let v = context.new_variable(None, crate::ast::declaration::VariableType::Body, crate::ast::Domain::Unknown);
        let p = context.find_or_create_predicate("p", 1);
        let formula = Formula::Predicate(p, vec![Term::Variable(v)]);

        let mapped = map_domains(vec![formula], &mut context);

        let Formula::Predicate(_, args) = &mapped[0] else { panic!("expected a predicate") };
        assert_eq!(args[0], Term::Variable(v));
    }

    #[test]
    fn a_sum_is_wrapped_with_its_named_function_and_mapped_operands() {
        let mut context = Context::new(Config::default());
        let term = Term::BinaryOperation(BinaryOperator::Plus, Box::new(Term::Integer(1)), Box::new(Term::Integer(2)));
        let mapping = DomainMapping::install(&mut context);

        let mapped = map_term(&term, &mapping);

        let Term::Function(id, args) = &mapped else { panic!("expected a function term") };
        assert_eq!(*id, mapping.sum);
        assert_eq!(args.len(), 2);
    }
}
