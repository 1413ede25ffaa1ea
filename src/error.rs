//! Error and warning types, `spec.md` §7.
//!
//! Fatal conditions are `thiserror`-derived enums unified under [`AnthemError`], the way
//! `teiesti-anthem-next`'s task errors are layered; non-fatal conditions go through [`Diagnostics`]
//! instead of being returned, so a single run can report every warning it collects rather than
//! stopping at the first one.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("{path}:{line}:{column}: {message}")]
    Syntax {
        path: String,
        line: usize,
        column: usize,
        message: String,
    },
    #[error("unsupported construct: {0}")]
    Unsupported(String),
}

#[derive(Debug, Error)]
pub enum TranslationError {
    #[error("predicate {name}/{arity} is used with conflicting arities")]
    ArityMismatch { name: String, arity: usize },
    #[error("choice rule head {0} is not in the supported fragment")]
    UnsupportedHead(String),
    #[error("argument {argument} of {predicate} is not a variable after head-normalization")]
    NonVariableArgument { predicate: String, argument: String },
}

#[derive(Debug, Error)]
pub enum LogicError {
    #[error("predicate {0} has no defining rule and is not declared #external")]
    UndefinedPredicate(String),
    #[error("completion requires a single defining disjunction for {0}, found none")]
    EmptyCompletion(String),
}

#[derive(Debug, Error)]
pub enum IoError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// The union of every fatal error this crate can produce.
#[derive(Debug, Error)]
pub enum AnthemError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Translation(#[from] TranslationError),
    #[error(transparent)]
    Logic(#[from] LogicError),
    #[error(transparent)]
    Io(#[from] IoError),
}

/// A non-fatal condition: translation continues, but the user should know about it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Warning {
    #[error("predicate {0} is never defined and has no #external declaration; treated as always false")]
    UndefinedPredicateAssumedFalse(String),
    #[error("variable {0} does not occur in the head and was not renamed by completion")]
    UnusedHeadVariable(String),
    #[error("#show directive for {0} does not match any predicate in the program")]
    ShowDirectiveUnmatched(String),
    #[error("integer-variable detection could not prove {0} is integer-valued; domain left general")]
    IntegerDomainUndetermined(String),
    #[error("hidden predicate {0} depends on itself through its own definition; left in place rather than eliminated")]
    CircularHiddenDependency(String),
}

/// Collects [`Warning`]s over the course of a run instead of aborting on the first one.
#[derive(Debug, Default, Clone)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warn(&mut self, warning: Warning) {
        self.warnings.push(warning);
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}
