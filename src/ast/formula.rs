//! Formulas, `spec.md` §3.

use super::ids::{PredicateId, VariableId};
use super::term::Term;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparisonOperator {
    Greater,
    Less,
    GreaterEqual,
    LessEqual,
    Equal,
    NotEqual,
}

/// A formula, as a tagged union (`spec.md` §3).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Formula {
    Boolean(bool),
    Predicate(PredicateId, Vec<Term>),
    Comparison(ComparisonOperator, Term, Term),
    /// `In(element, set)`. `element` must be [`Term::is_primitive`]; enforced by [`Formula::in_`].
    In(Box<Term>, Box<Term>),
    Not(Box<Formula>),
    And(Vec<Formula>),
    Or(Vec<Formula>),
    Implies(Box<Formula>, Box<Formula>),
    Biconditional(Box<Formula>, Box<Formula>),
    Exists(Vec<VariableId>, Box<Formula>),
    ForAll(Vec<VariableId>, Box<Formula>),
}

impl Formula {
    pub const TRUE: Formula = Formula::Boolean(true);
    pub const FALSE: Formula = Formula::Boolean(false);

    /// `In(element, set)`, requiring `element.is_primitive()` (`spec.md` §4.1).
    ///
    /// Panics on violation: this is an internal invariant that every caller in this crate must
    /// already satisfy by construction, not a user-facing error condition.
    pub fn in_(element: Term, set: Term) -> Formula {
        assert!(
            element.is_primitive(),
            "In(..) requires a primitive element term, got {element:?}"
        );
        Formula::In(Box::new(element), Box::new(set))
    }

    /// `And` of zero or more conjuncts; zero conjuncts is `#true` (`spec.md` §4.1).
    pub fn and(conjuncts: Vec<Formula>) -> Formula {
        match conjuncts.len() {
            0 => Formula::TRUE,
            _ => Formula::And(conjuncts),
        }
    }

    /// `Or` of zero or more disjuncts; zero disjuncts is `#false` (`spec.md` §4.1).
    pub fn or(disjuncts: Vec<Formula>) -> Formula {
        match disjuncts.len() {
            0 => Formula::FALSE,
            _ => Formula::Or(disjuncts),
        }
    }

    /// `Exists` over zero or more variables is just the body (`spec.md` §4.1).
    pub fn exists(variables: Vec<VariableId>, body: Formula) -> Formula {
        if variables.is_empty() {
            body
        } else {
            Formula::Exists(variables, Box::new(body))
        }
    }

    /// `ForAll` over zero or more variables is just the body (`spec.md` §4.1).
    pub fn for_all(variables: Vec<VariableId>, body: Formula) -> Formula {
        if variables.is_empty() {
            body
        } else {
            Formula::ForAll(variables, Box::new(body))
        }
    }

    pub fn not(formula: Formula) -> Formula {
        Formula::Not(Box::new(formula))
    }

    pub fn implies(antecedent: Formula, consequent: Formula) -> Formula {
        Formula::Implies(Box::new(antecedent), Box::new(consequent))
    }

    pub fn biconditional(left: Formula, right: Formula) -> Formula {
        Formula::Biconditional(Box::new(left), Box::new(right))
    }

    /// Every free occurrence of a [`PredicateId`] in this formula.
    pub fn predicates(&self, out: &mut Vec<PredicateId>) {
        match self {
            Formula::Boolean(_) => {}
            Formula::Predicate(id, _) => out.push(*id),
            Formula::Comparison(..) | Formula::In(..) => {}
            Formula::Not(f) => f.predicates(out),
            Formula::And(fs) | Formula::Or(fs) => fs.iter().for_each(|f| f.predicates(out)),
            Formula::Implies(l, r) | Formula::Biconditional(l, r) => {
                l.predicates(out);
                r.predicates(out);
            }
            Formula::Exists(_, f) | Formula::ForAll(_, f) => f.predicates(out),
        }
    }

    /// Debug-only check that every `Predicate` occurrence directly inside `self` (not descending
    /// into nested quantifiers) has only bare-variable arguments — the head-normalization
    /// invariant statement translation is supposed to establish before completion or
    /// hidden-predicate elimination ever see the formula.
    #[cfg(debug_assertions)]
    pub fn assert_head_normal_form(&self) {
        if let Formula::Predicate(_, args) = self {
            for arg in args {
                assert!(
                    matches!(arg, Term::Variable(_)),
                    "head-normalization invariant violated: non-variable argument {arg:?}"
                );
            }
        }
    }

    /// Every [`VariableId`] occurring anywhere in this formula, bound or free (duplicates
    /// possible). Used by invariant checks, not by substitution (which must distinguish binding).
    pub fn variables(&self, out: &mut Vec<VariableId>) {
        match self {
            Formula::Boolean(_) => {}
            Formula::Predicate(_, terms) => terms.iter().for_each(|t| t.variables(out)),
            Formula::Comparison(_, l, r) => {
                l.variables(out);
                r.variables(out);
            }
            Formula::In(e, s) => {
                e.variables(out);
                s.variables(out);
            }
            Formula::Not(f) => f.variables(out),
            Formula::And(fs) | Formula::Or(fs) => fs.iter().for_each(|f| f.variables(out)),
            Formula::Implies(l, r) | Formula::Biconditional(l, r) => {
                l.variables(out);
                r.variables(out);
            }
            Formula::Exists(vars, f) | Formula::ForAll(vars, f) => {
                out.extend(vars.iter().copied());
                f.variables(out);
            }
        }
    }
}
