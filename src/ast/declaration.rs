//! The three declaration tables `spec.md` §3 assigns to the [`crate::context::Context`].

use super::ids::{FunctionId, PredicateId, VariableId};

/// The sort a term or variable is known (or not yet known) to inhabit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Domain {
    Unknown,
    Integer,
    Symbolic,
    General,
}

/// Whether a predicate's completed definition is shown in final output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    Default,
    Visible,
    Hidden,
}

/// Where a [`super::declaration::VariableDeclaration`] came from, used only for fresh-name prefix
/// selection (`X` for head-introduced, `N` for integer intermediates, `V`/`U` for universal-closure
/// free variables) — see `spec.md` §6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariableType {
    UserDefined,
    Head,
    Body,
}

#[derive(Debug, Clone)]
pub struct PredicateDeclaration {
    pub(crate) id: PredicateId,
    pub name: String,
    pub arity: usize,
    pub parameter_domains: Vec<Domain>,
    pub is_used: bool,
    pub is_external: bool,
    pub visibility: Visibility,
}

impl PredicateDeclaration {
    pub fn id(&self) -> PredicateId {
        self.id
    }
}

#[derive(Debug, Clone)]
pub struct FunctionDeclaration {
    pub(crate) id: FunctionId,
    pub name: String,
    pub arity: usize,
    pub parameter_domains: Vec<Domain>,
    pub return_domain: Domain,
}

impl FunctionDeclaration {
    pub fn id(&self) -> FunctionId {
        self.id
    }
}

#[derive(Debug, Clone)]
pub struct VariableDeclaration {
    pub(crate) id: VariableId,
    /// The user-written name, if any (`None` for anonymous `_` and purely internal variables).
    pub name: Option<String>,
    pub variable_type: VariableType,
    pub domain: Domain,
}

impl VariableDeclaration {
    pub fn id(&self) -> VariableId {
        self.id
    }

    /// The prefix used when a display name must be synthesized (`spec.md` §6).
    pub(crate) fn fresh_prefix(&self) -> &'static str {
        match self.variable_type {
            VariableType::Head => "X",
            VariableType::Body => "N",
            VariableType::UserDefined => "V",
        }
    }

    /// The name to print: the user's own name if this is a user-defined variable that kept it,
    /// otherwise a synthesized `<prefix><id>` name that cannot collide with any user name (no
    /// user identifier in the accepted ASP fragment contains a digit-suffixed reserved prefix
    /// check is unnecessary here because synthesized names always carry the numeric id).
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("{}{}", self.fresh_prefix(), self.id.index()),
        }
    }
}
