//! TPTP output, `spec.md` §6: `tff(name, role, formula).` clauses over a fixed typed prelude.
//!
//! Assumes [`crate::rewrite::domain_map::map_domains`] has already run, so every value in the
//! formulas here is an `object`-sorted term built from the wrapper functions it installs.

use std::fmt::Write as _;

use itertools::Itertools;

use crate::ast::{BinaryOperator, ComparisonOperator, Formula, FunctionDeclaration, SpecialInteger, Term, UnaryOperator};
use crate::context::Context;

const OBJECT_SORT: &str = "object";

fn write_term(term: &Term, context: &Context, out: &mut String) {
    match term {
        Term::Integer(i) => write!(out, "{i}").unwrap(),
        Term::SpecialInteger(SpecialInteger::Infimum) => out.push_str("inf"),
        Term::SpecialInteger(SpecialInteger::Supremum) => out.push_str("sup"),
        Term::String(s) => write!(out, "\"{s}\"").unwrap(),
        Term::Boolean(b) => write!(out, "{b}").unwrap(),
        Term::Variable(id) => {
            out.push_str("V");
            write!(out, "{}", id.index()).unwrap();
        }
        Term::Function(id, args) => {
            out.push_str(&sanitize(&context.function(*id).name));
            if !args.is_empty() {
                out.push('(');
                for (i, a) in args.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    write_term(a, context, out);
                }
                out.push(')');
            }
        }
        Term::UnaryOperation(UnaryOperator::Minus, inner) => {
            out.push_str("f__negation__(");
            write_term(inner, context, out);
            out.push(')');
        }
        Term::UnaryOperation(UnaryOperator::Absolute, inner) => {
            out.push_str("f__absolute_value__(");
            write_term(inner, context, out);
            out.push(')');
        }
        Term::BinaryOperation(op, l, r) => {
            let name = match op {
                BinaryOperator::Plus => "f__sum__",
                BinaryOperator::Minus => "f__difference__",
                BinaryOperator::Multiply => "f__product__",
                BinaryOperator::Divide => "f__quotient__",
                BinaryOperator::Modulo => "f__modulo__",
                BinaryOperator::Power => "f__power__",
            };
            write!(out, "{name}(").unwrap();
            write_term(l, context, out);
            out.push_str(", ");
            write_term(r, context, out);
            out.push(')');
        }
        Term::Interval(l, r) => {
            out.push_str("f__interval__(");
            write_term(l, context, out);
            out.push_str(", ");
            write_term(r, context, out);
            out.push(')');
        }
    }
}

fn sanitize(name: &str) -> String {
    // TPTP lower-case identifiers can't carry `'` (the here-and-there prime) or `-` (classical
    // negation's marker); both are kept as plain name fragments instead.
    name.replace('\'', "_primed").replace('-', "neg_")
}

fn comparison_symbol(op: ComparisonOperator) -> &'static str {
    match op {
        ComparisonOperator::Equal => "=",
        ComparisonOperator::NotEqual => "!=",
        ComparisonOperator::Less => "f__less__",
        ComparisonOperator::LessEqual => "f__less_equal__",
        ComparisonOperator::Greater => "f__greater__",
        ComparisonOperator::GreaterEqual => "f__greater_equal__",
    }
}

fn write_formula(formula: &Formula, context: &Context, out: &mut String) {
    match formula {
        Formula::Boolean(true) => out.push_str("$true"),
        Formula::Boolean(false) => out.push_str("$false"),
        Formula::Predicate(id, args) => {
            out.push_str(&sanitize(&context.predicate(*id).name));
            if !args.is_empty() {
                out.push('(');
                for (i, a) in args.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    write_term(a, context, out);
                }
                out.push(')');
            }
        }
        Formula::Comparison(op @ (ComparisonOperator::Equal | ComparisonOperator::NotEqual), l, r) => {
            write_term(l, context, out);
            write!(out, " {} ", comparison_symbol(*op)).unwrap();
            write_term(r, context, out);
        }
        Formula::Comparison(op, l, r) => {
            write!(out, "{}(", comparison_symbol(*op)).unwrap();
            write_term(l, context, out);
            out.push_str(", ");
            write_term(r, context, out);
            out.push(')');
        }
        Formula::In(e, s) => {
            out.push_str("f__member__(");
            write_term(e, context, out);
            out.push_str(", ");
            write_term(s, context, out);
            out.push(')');
        }
        Formula::Not(inner) => {
            out.push_str("~ (");
            write_formula(inner, context, out);
            out.push(')');
        }
        Formula::And(fs) => write_joined(fs, " & ", context, out),
        Formula::Or(fs) => write_joined(fs, " | ", context, out),
        Formula::Implies(l, r) => {
            out.push('(');
            write_formula(l, context, out);
            out.push_str(") => (");
            write_formula(r, context, out);
            out.push(')');
        }
        Formula::Biconditional(l, r) => {
            out.push('(');
            write_formula(l, context, out);
            out.push_str(") <=> (");
            write_formula(r, context, out);
            out.push(')');
        }
        Formula::Exists(vars, body) => {
            write!(out, "? [{}] : (", typed_variable_list(vars)).unwrap();
            write_formula(body, context, out);
            out.push(')');
        }
        Formula::ForAll(vars, body) => {
            write!(out, "! [{}] : (", typed_variable_list(vars)).unwrap();
            write_formula(body, context, out);
            out.push(')');
        }
    }
}

fn typed_variable_list(vars: &[crate::ast::VariableId]) -> String {
    vars.iter().map(|v| format!("V{}: {OBJECT_SORT}", v.index())).join(", ")
}

fn write_joined(formulas: &[Formula], separator: &str, context: &Context, out: &mut String) {
    if formulas.is_empty() {
        out.push_str("$true");
        return;
    }
    for (i, f) in formulas.iter().enumerate() {
        if i > 0 {
            out.push_str(separator);
        }
        out.push('(');
        write_formula(f, context, out);
        out.push(')');
    }
}

/// `f__integer__`/`f__symbolic__` carry their underlying TPTP sort (`$int`/`$i`) in their
/// argument position rather than the shared `object` sort every other wrapper uses.
fn function_signature(function: &FunctionDeclaration) -> String {
    match function.name.as_str() {
        "f__integer__" => format!("$int > {OBJECT_SORT}"),
        "f__symbolic__" => format!("$i > {OBJECT_SORT}"),
        _ if function.arity == 0 => OBJECT_SORT.to_string(),
        _ => format!("({}) > {OBJECT_SORT}", vec![OBJECT_SORT; function.arity].join(" * ")),
    }
}

fn prelude(context: &Context) -> String {
    let mut out = String::new();
    writeln!(out, "tff(object_type, type, {OBJECT_SORT}: $tType).").unwrap();
    for function in context.functions() {
        let signature = function_signature(function);
        writeln!(out, "tff({}_type, type, {}: {}).", sanitize(&function.name), sanitize(&function.name), signature).unwrap();
    }
    for predicate in context.predicates() {
        if !predicate.is_used {
            continue;
        }
        let arity = predicate.arity;
        let signature = if arity == 0 {
            "$o".to_string()
        } else {
            format!("({}) > $o", vec![OBJECT_SORT; arity].join(" * "))
        };
        writeln!(out, "tff({}_type, type, {}: {}).", sanitize(&predicate.name), sanitize(&predicate.name), signature).unwrap();
    }

    // Disjointness of integers and symbolics, arithmetic soundness, and comparison axioms for
    // mixed integer/symbolic operands — verbatim in spirit from `anthem`'s `Translation.cpp`
    // prelude (the `tff(type_check, ...)`/`tff(operations, ...)`/`tff(less_equal, ...)` block),
    // carried over to this crate's wrapper-function names and extended to the additional
    // arithmetic wrappers (`f__quotient__`, `f__modulo__`, `f__power__`, `f__absolute_value__`)
    // this crate's arithmetic fragment adds beyond the original's sum/difference/product/negation.
    if context.function_is_installed("f__integer__") {
        out.push_str(arithmetic_prelude());
    }
    out
}

fn arithmetic_prelude() -> &'static str {
    r#"tff(is_integer_type, type, p__is_integer__: object > $o).
tff(is_symbolic_type, type, p__is_symbolic__: object > $o).

tff(type_check, axiom, (![X: object]: (p__is_integer__(X) <=> (?[Y: $int]: (X = f__integer__(Y)))))).
tff(type_check, axiom, (![X: object]: (p__is_symbolic__(X) <=> (?[Y: $i]: (X = f__symbolic__(Y)))))).
tff(type_check, axiom, (![X: object]: (p__is_integer__(X) <~> p__is_symbolic__(X)))).
tff(type_check, axiom, (![X: $int, Y: $int]: ((f__integer__(X) = f__integer__(Y)) => (X = Y)))).

tff(operations, axiom, (![X1: $int, X2: $int]: (f__sum__(f__integer__(X1), f__integer__(X2)) = f__integer__($sum(X1, X2))))).
tff(operations, axiom, (![X: $int]: (f__negation__(f__integer__(X)) = f__integer__($uminus(X))))).
tff(operations, axiom, (![X1: $int, X2: $int]: (f__difference__(f__integer__(X1), f__integer__(X2)) = f__integer__($difference(X1, X2))))).
tff(operations, axiom, (![X1: $int, X2: $int]: (f__product__(f__integer__(X1), f__integer__(X2)) = f__integer__($product(X1, X2))))).
tff(operations, axiom, (![X: $int]: (f__absolute_value__(f__integer__(X)) = f__integer__($abs(X))))).

tff(less_equal, axiom, (![X1: $int, X2: $int]: (f__less_equal__(f__integer__(X1), f__integer__(X2)) <=> $lesseq(X1, X2)))).
tff(less_equal, axiom, (![X1: $i, X2: $int]: ~f__less_equal__(f__symbolic__(X1), f__integer__(X2)))).
tff(less_equal, axiom, (![X1: $int, X2: $i]: f__less_equal__(f__integer__(X1), f__symbolic__(X2)))).

tff(less, axiom, (![X1: $int, X2: $int]: (f__less__(f__integer__(X1), f__integer__(X2)) <=> $less(X1, X2)))).
tff(less, axiom, (![X1: $i, X2: $int]: ~f__less__(f__symbolic__(X1), f__integer__(X2)))).
tff(less, axiom, (![X1: $int, X2: $i]: f__less__(f__integer__(X1), f__symbolic__(X2)))).

tff(greater_equal, axiom, (![X1: $int, X2: $int]: (f__greater_equal__(f__integer__(X1), f__integer__(X2)) <=> $greatereq(X1, X2)))).
tff(greater_equal, axiom, (![X1: $i, X2: $int]: f__greater_equal__(f__symbolic__(X1), f__integer__(X2)))).
tff(greater_equal, axiom, (![X1: $int, X2: $i]: ~f__greater_equal__(f__integer__(X1), f__symbolic__(X2)))).

tff(greater, axiom, (![X1: $int, X2: $int]: (f__greater__(f__integer__(X1), f__integer__(X2)) <=> $greater(X1, X2)))).
tff(greater, axiom, (![X1: $i, X2: $int]: f__greater__(f__symbolic__(X1), f__integer__(X2)))).
tff(greater, axiom, (![X1: $int, X2: $i]: ~f__greater__(f__integer__(X1), f__symbolic__(X2)))).
"#
}

pub fn format_program(formulas: &[Formula], context: &Context) -> String {
    let mut out = prelude(context);
    for (index, formula) in formulas.iter().enumerate() {
        let mut body = String::new();
        write_formula(formula, context, &mut body);
        writeln!(out, "tff(formula_{index}, axiom, {body}).").unwrap();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Config;

    #[test]
    fn prelude_omits_arithmetic_axioms_when_domain_mapping_never_ran() {
        let context = Context::new(Config::default());
        let rendered = format_program(&[], &context);
        assert!(!rendered.contains("tff(type_check"), "no f__integer__ registered, no axioms expected: {rendered}");
    }

    #[test]
    fn prelude_adds_disjointness_and_arithmetic_and_comparison_axioms_once_domains_are_mapped() {
        let mut context = Context::new(Config::default());
        let _ = crate::rewrite::domain_map::DomainMapping::install(&mut context);

        let rendered = format_program(&[], &context);

        assert!(rendered.contains("tff(type_check, axiom, (![X: object]: (p__is_integer__(X)"));
        assert!(rendered.contains("p__is_integer__(X) <~> p__is_symbolic__(X)"));
        assert!(rendered.contains("f__sum__(f__integer__(X1), f__integer__(X2)) = f__integer__($sum(X1, X2))"));
        assert!(rendered.contains("f__less_equal__(f__integer__(X1), f__integer__(X2)) <=> $lesseq(X1, X2)"));
        assert!(rendered.contains("tff(f__integer___type, type, f__integer__: $int > object)."));
    }
}
