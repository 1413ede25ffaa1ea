//! Human-readable output, `spec.md` §6: infix `and`/`or`/`not`/`->`/`<->`, `forall`/`exists`,
//! `#true`/`#false`.

use std::fmt::Write as _;

use crate::ast::{BinaryOperator, ComparisonOperator, Formula, SpecialInteger, Term, UnaryOperator};
use crate::context::Context;

fn write_term(term: &Term, context: &Context, out: &mut String) {
    match term {
        Term::Integer(i) => write!(out, "{i}").unwrap(),
        Term::SpecialInteger(SpecialInteger::Infimum) => out.push_str("#inf"),
        Term::SpecialInteger(SpecialInteger::Supremum) => out.push_str("#sup"),
        Term::String(s) => write!(out, "\"{s}\"").unwrap(),
        Term::Boolean(b) => write!(out, "{b}").unwrap(),
        Term::Variable(id) => out.push_str(&context.variable(*id).display_name()),
        Term::Function(id, args) => {
            out.push_str(&context.function(*id).name);
            if !args.is_empty() {
                out.push('(');
                write_term_list(args, context, out);
                out.push(')');
            }
        }
        Term::UnaryOperation(op, inner) => {
            match op {
                UnaryOperator::Minus => out.push('-'),
                UnaryOperator::Absolute => out.push('|'),
            }
            write_term(inner, context, out);
            if matches!(op, UnaryOperator::Absolute) {
                out.push('|');
            }
        }
        Term::BinaryOperation(op, l, r) => {
            out.push('(');
            write_term(l, context, out);
            out.push_str(match op {
                BinaryOperator::Plus => " + ",
                BinaryOperator::Minus => " - ",
                BinaryOperator::Multiply => " * ",
                BinaryOperator::Divide => " / ",
                BinaryOperator::Modulo => " \\ ",
                BinaryOperator::Power => " ** ",
            });
            write_term(r, context, out);
            out.push(')');
        }
        Term::Interval(l, r) => {
            write_term(l, context, out);
            out.push_str("..");
            write_term(r, context, out);
        }
    }
}

fn write_term_list(terms: &[Term], context: &Context, out: &mut String) {
    for (i, t) in terms.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        write_term(t, context, out);
    }
}

fn comparison_symbol(op: ComparisonOperator) -> &'static str {
    match op {
        ComparisonOperator::Equal => "=",
        ComparisonOperator::NotEqual => "!=",
        ComparisonOperator::Less => "<",
        ComparisonOperator::LessEqual => "<=",
        ComparisonOperator::Greater => ">",
        ComparisonOperator::GreaterEqual => ">=",
    }
}

fn write_formula(formula: &Formula, context: &Context, out: &mut String) {
    match formula {
        Formula::Boolean(true) => out.push_str("#true"),
        Formula::Boolean(false) => out.push_str("#false"),
        Formula::Predicate(id, args) => {
            out.push_str(&context.predicate(*id).name);
            if !args.is_empty() {
                out.push('(');
                write_term_list(args, context, out);
                out.push(')');
            }
        }
        Formula::Comparison(op, l, r) => {
            write_term(l, context, out);
            write!(out, " {} ", comparison_symbol(*op)).unwrap();
            write_term(r, context, out);
        }
        Formula::In(e, s) => {
            write_term(e, context, out);
            out.push_str(" in ");
            write_term(s, context, out);
        }
        Formula::Not(inner) => {
            out.push_str("not ");
            write_formula_parenthesized(inner, context, out);
        }
        Formula::And(conjuncts) => write_joined(conjuncts, " and ", context, out),
        Formula::Or(disjuncts) => write_joined(disjuncts, " or ", context, out),
        Formula::Implies(l, r) => {
            write_formula_parenthesized(l, context, out);
            out.push_str(" -> ");
            write_formula_parenthesized(r, context, out);
        }
        Formula::Biconditional(l, r) => {
            write_formula_parenthesized(l, context, out);
            out.push_str(" <-> ");
            write_formula_parenthesized(r, context, out);
        }
        Formula::Exists(vars, body) => {
            out.push_str("exists ");
            write_variable_list(vars, context, out);
            out.push(' ');
            write_formula_parenthesized(body, context, out);
        }
        Formula::ForAll(vars, body) => {
            out.push_str("forall ");
            write_variable_list(vars, context, out);
            out.push(' ');
            write_formula_parenthesized(body, context, out);
        }
    }
}

fn write_variable_list(vars: &[crate::ast::VariableId], context: &Context, out: &mut String) {
    for (i, v) in vars.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push_str(&context.variable(*v).display_name());
    }
}

fn write_joined(formulas: &[Formula], separator: &str, context: &Context, out: &mut String) {
    if formulas.is_empty() {
        // Shouldn't happen: `Formula::and`/`Formula::or` collapse the empty case to a boolean.
        out.push_str("#true");
        return;
    }
    for (i, f) in formulas.iter().enumerate() {
        if i > 0 {
            out.push_str(separator);
        }
        write_formula_parenthesized(f, context, out);
    }
}

fn needs_parentheses(formula: &Formula) -> bool {
    matches!(
        formula,
        Formula::And(_) | Formula::Or(_) | Formula::Implies(..) | Formula::Biconditional(..) | Formula::Exists(..) | Formula::ForAll(..)
    )
}

fn write_formula_parenthesized(formula: &Formula, context: &Context, out: &mut String) {
    if needs_parentheses(formula) {
        out.push('(');
        write_formula(formula, context, out);
        out.push(')');
    } else {
        write_formula(formula, context, out);
    }
}

pub fn format_formula(formula: &Formula, context: &Context) -> String {
    let mut out = String::new();
    write_formula(formula, context, &mut out);
    out
}

/// Each top-level formula on its own line, each followed by a newline — including the last
/// (`spec.md` §6), e.g. a single formula `p <-> #true` renders as exactly `"(p <-> #true)\n"`.
pub fn format_program(formulas: &[Formula], context: &Context) -> String {
    let mut out = String::new();
    for formula in formulas {
        write_formula_parenthesized(formula, context, &mut out);
        out.push('\n');
    }
    out
}
