//! Small `Copy` identifiers indexing the declaration tables owned by [`crate::context::Context`].
//!
//! AST nodes hold these instead of the declarations themselves: a [`Term::Variable`] or
//! [`crate::ast::formula::Formula::Predicate`] never owns the thing it names, it only names it.
//! This is the same discipline the teacher repo uses for `VarId`/`Id` indexing into `Arena`,
//! generalized from one flat table to the three tables `spec.md` §3 describes.

/// Identifies a [`super::declaration::PredicateDeclaration`] in a [`crate::context::Context`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PredicateId(pub(crate) u32);

/// Identifies a [`super::declaration::FunctionDeclaration`] in a [`crate::context::Context`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FunctionId(pub(crate) u32);

/// Identifies a [`super::declaration::VariableDeclaration`] in a [`crate::context::Context`].
///
/// Unlike predicates and functions, variable ids are also used to decide *binding*: whether a
/// given id is free or bound within some formula is determined by whether it appears in an
/// enclosing [`crate::ast::scoped::ScopedFormula`]'s free-variable list or an `Exists`/`ForAll`'s
/// bound-variable list, not by anything in the declaration table itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VariableId(pub(crate) u32);

impl PredicateId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl FunctionId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl VariableId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}
