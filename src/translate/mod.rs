//! Translates [`crate::surface::ast`] into the typed [`crate::ast`], `spec.md` §4.3.
//!
//! Grounded on `teiesti-anthem-next`'s `translating::shorthand` module: terms are translated
//! against a "value" position rather than producing a value themselves, so that arithmetic and
//! function nesting become existentially-quantified equalities instead of a separate evaluator.

pub mod statement;
pub mod term;

use rustc_hash::FxHashMap;

use crate::ast::declaration::VariableType;
use crate::ast::VariableId;
use crate::context::Context;

/// Maps surface variable names to their (once-per-rule) [`VariableId`], so repeated occurrences
/// of the same name within one rule resolve to the same declaration.
#[derive(Debug, Default)]
pub struct Scope {
    names: FxHashMap<String, VariableId>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves a named variable, declaring it on first use within this scope.
    pub fn resolve(&mut self, name: &str, context: &mut Context) -> VariableId {
        *self.names.entry(name.to_string()).or_insert_with(|| {
            context.new_variable(
                Some(name.to_string()),
                VariableType::UserDefined,
                crate::ast::Domain::Unknown,
            )
        })
    }

    /// A fresh variable for a `_` occurrence; never shared with another `_`.
    pub fn fresh_anonymous(&mut self, context: &mut Context) -> VariableId {
        context.new_variable(None, VariableType::UserDefined, crate::ast::Domain::Unknown)
    }

    pub fn declared_variables(&self) -> impl Iterator<Item = &VariableId> {
        self.names.values()
    }
}
