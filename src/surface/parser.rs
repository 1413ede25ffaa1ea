//! Turns the grammar's parse tree into [`super::ast`] nodes, the way the teacher's
//! `parser/model.rs` walks its own pest tree with a `parse_pair`/`parse_children` pair of
//! recursive helpers per production.

use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;

use crate::error::ParseError;

use super::ast::{
    Atom, AtomicFormula, BinaryOperator, BodyLiteral, ComparisonOperator, Directive, Head,
    Program, Rule as AspRule, Statement, Term,
};

#[derive(Parser)]
#[grammar = "surface/grammar.pest"]
struct AspParser;

pub fn parse_program(path: &str, input: &str) -> Result<Program, ParseError> {
    let mut pairs = AspParser::parse(Rule::program, input).map_err(|e| ParseError::Syntax {
        path: path.to_string(),
        line: e.line_col_line(),
        column: e.line_col_col(),
        message: e.to_string(),
    })?;
    let program_pair = pairs.next().expect("program rule always produces one pair");

    let mut statements = Vec::new();
    for pair in program_pair.into_inner() {
        match pair.as_rule() {
            Rule::statement => statements.push(parse_statement(pair)),
            Rule::EOI => {}
            other => unreachable!("unexpected top-level rule {other:?}"),
        }
    }
    Ok(Program { statements })
}

trait LineCol {
    fn line_col_line(&self) -> usize;
    fn line_col_col(&self) -> usize;
}

impl LineCol for pest::error::Error<Rule> {
    fn line_col_line(&self) -> usize {
        match self.line_col {
            pest::error::LineColLocation::Pos((line, _)) => line,
            pest::error::LineColLocation::Span((line, _), _) => line,
        }
    }

    fn line_col_col(&self) -> usize {
        match self.line_col {
            pest::error::LineColLocation::Pos((_, col)) => col,
            pest::error::LineColLocation::Span((_, col), _) => col,
        }
    }
}

fn parse_statement(pair: Pair<Rule>) -> Statement {
    let inner = pair.into_inner().next().expect("statement has one child");
    match inner.as_rule() {
        Rule::rule => Statement::Rule(parse_rule(inner)),
        Rule::directive => Statement::Directive(parse_directive(inner)),
        other => unreachable!("unexpected statement child {other:?}"),
    }
}

fn parse_directive(pair: Pair<Rule>) -> Directive {
    let text = pair.as_str();
    let mut idents = pair.into_inner();
    if text.starts_with("#show") {
        match idents.next() {
            Some(name) => {
                let arity: usize = idents
                    .next()
                    .expect("#show name/arity")
                    .as_str()
                    .parse()
                    .expect("arity is a number token");
                Directive::Show(name.as_str().to_string(), arity)
            }
            None => Directive::ShowAll,
        }
    } else {
        let name = idents.next().expect("#external name").as_str().to_string();
        let arity: usize = idents
            .next()
            .expect("#external arity")
            .as_str()
            .parse()
            .expect("arity is a number token");
        Directive::External(name, arity)
    }
}

fn parse_rule(pair: Pair<Rule>) -> AspRule {
    let mut head = Head::Empty;
    let mut body = Vec::new();
    for child in pair.into_inner() {
        match child.as_rule() {
            Rule::choice_head => {
                let atom = parse_atom(child.into_inner().next().expect("choice head atom"));
                head = Head::Choice(atom);
            }
            Rule::disjunctive_head => {
                let atoms: Vec<Atom> = child.into_inner().map(parse_atom).collect();
                head = if atoms.len() == 1 {
                    Head::Basic(atoms.into_iter().next().unwrap())
                } else {
                    Head::Disjunctive(atoms)
                };
            }
            Rule::body => {
                body = child.into_inner().map(parse_body_literal).collect();
            }
            other => unreachable!("unexpected rule child {other:?}"),
        }
    }
    AspRule { head, body }
}

fn parse_body_literal(pair: Pair<Rule>) -> BodyLiteral {
    let text = pair.as_str();
    let formula = parse_atomic_formula(
        pair.into_inner()
            .next()
            .expect("body literal wraps one atomic formula"),
    );
    if text.starts_with("not not") {
        BodyLiteral::DoubleNegative(formula)
    } else if text.starts_with("not") {
        BodyLiteral::Negative(formula)
    } else {
        BodyLiteral::Positive(formula)
    }
}

fn parse_atomic_formula(pair: Pair<Rule>) -> AtomicFormula {
    let inner = pair.into_inner().next().expect("atomic formula child");
    match inner.as_rule() {
        Rule::atom => AtomicFormula::Atom(parse_atom(inner)),
        Rule::comparison => {
            let mut parts = inner.into_inner();
            let left = parse_term(parts.next().expect("comparison lhs"));
            let op = match parts.next().expect("comparison operator").as_str() {
                "=" => ComparisonOperator::Equal,
                "!=" => ComparisonOperator::NotEqual,
                "<" => ComparisonOperator::Less,
                "<=" => ComparisonOperator::LessEqual,
                ">" => ComparisonOperator::Greater,
                ">=" => ComparisonOperator::GreaterEqual,
                other => unreachable!("unexpected comparison operator {other}"),
            };
            let right = parse_term(parts.next().expect("comparison rhs"));
            AtomicFormula::Comparison(left, op, right)
        }
        other => unreachable!("unexpected atomic formula child {other:?}"),
    }
}

fn parse_atom(pair: Pair<Rule>) -> Atom {
    let negated = pair.as_str().starts_with('-');
    let mut inner = pair.into_inner();
    let mut name = inner.next().expect("atom name").as_str().to_string();
    if negated {
        // Classical negation is surfaced as a distinct predicate name, the way `teiesti-anthem-next`
        // treats `-p` and `p` as unrelated predicates rather than adding a negation bit everywhere.
        name = format!("-{name}");
    }
    let terms = inner.map(parse_term).collect();
    Atom {
        predicate: name,
        terms,
    }
}

fn parse_term(pair: Pair<Rule>) -> Term {
    let elements: Vec<Term> = pair.into_inner().map(parse_interval).collect();
    if elements.len() == 1 {
        elements.into_iter().next().unwrap()
    } else {
        Term::Pool(elements)
    }
}

fn parse_interval(pair: Pair<Rule>) -> Term {
    let inner = pair.into_inner().next().expect("pool element wraps interval");
    parse_interval_rule(inner)
}

fn parse_interval_rule(pair: Pair<Rule>) -> Term {
    let mut parts = pair.into_inner();
    let left = parse_additive(parts.next().expect("interval lhs"));
    match parts.next() {
        Some(right_pair) => Term::Interval(Box::new(left), Box::new(parse_additive(right_pair))),
        None => left,
    }
}

fn parse_additive(pair: Pair<Rule>) -> Term {
    let mut parts = pair.into_inner();
    let mut term = parse_multiplicative(parts.next().expect("additive lhs"));
    let mut operator_and_operand = parts;
    while let Some(op_pair) = operator_and_operand.next() {
        let operator = match op_pair.as_str() {
            "+" => BinaryOperator::Plus,
            "-" => BinaryOperator::Minus,
            other => unreachable!("unexpected additive operator {other}"),
        };
        let rhs = parse_multiplicative(
            operator_and_operand
                .next()
                .expect("additive operator has a right operand"),
        );
        term = Term::BinaryOperation(operator, Box::new(term), Box::new(rhs));
    }
    term
}

fn parse_multiplicative(pair: Pair<Rule>) -> Term {
    let mut parts = pair.into_inner();
    let mut term = parse_power(parts.next().expect("multiplicative lhs"));
    let mut operator_and_operand = parts;
    while let Some(op_pair) = operator_and_operand.next() {
        let operator = match op_pair.as_str() {
            "*" => BinaryOperator::Multiply,
            "/" => BinaryOperator::Divide,
            "\\" => BinaryOperator::Modulo,
            other => unreachable!("unexpected multiplicative operator {other}"),
        };
        let rhs = parse_power(
            operator_and_operand
                .next()
                .expect("multiplicative operator has a right operand"),
        );
        term = Term::BinaryOperation(operator, Box::new(term), Box::new(rhs));
    }
    term
}

fn parse_power(pair: Pair<Rule>) -> Term {
    let mut parts = pair.into_inner();
    let base = parse_unary(parts.next().expect("power lhs"));
    match parts.next() {
        Some(exponent_pair) => Term::BinaryOperation(
            BinaryOperator::Power,
            Box::new(base),
            Box::new(parse_unary(exponent_pair)),
        ),
        None => base,
    }
}

fn parse_unary(pair: Pair<Rule>) -> Term {
    let text = pair.as_str();
    let mut inner = pair.into_inner();
    if text.starts_with('-') {
        Term::Negative(Box::new(parse_unary(inner.next().expect("negated operand"))))
    } else if text.starts_with('|') {
        Term::Absolute(Box::new(parse_additive(
            inner.next().expect("absolute value operand"),
        )))
    } else {
        parse_primary(inner.next().expect("unary wraps a primary"))
    }
}

fn parse_primary(pair: Pair<Rule>) -> Term {
    match pair.as_rule() {
        Rule::term => parse_term(pair),
        Rule::function_term => {
            let mut parts = pair.into_inner();
            let name = parts.next().expect("function name").as_str().to_string();
            let arguments = parts.map(parse_term).collect();
            Term::Function(name, arguments)
        }
        Rule::variable => Term::Variable(pair.as_str().to_string()),
        Rule::anonymous => Term::Anonymous,
        Rule::integer => Term::Integer(pair.as_str().parse().expect("integer token parses")),
        Rule::infimum => Term::Infimum,
        Rule::supremum => Term::Supremum,
        Rule::string => Term::String(pair.as_str().trim_matches('"').to_string()),
        Rule::symbolic => Term::Symbolic(pair.as_str().to_string()),
        other => unreachable!("unexpected primary child {other:?}"),
    }
}
