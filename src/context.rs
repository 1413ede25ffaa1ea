//! The `Context`: owns every declaration table and the run's configuration (`spec.md` §3, §6).
//!
//! Generalizes the teacher's single `Arena` (one flat `Vec<Expr>` plus a `Vec<Var>`) into three
//! tables, one per kind of name this crate's AST can reference, each indexed the same way: a
//! `Vec` for storage plus an [`IndexMap`] for name-based lookup that preserves insertion order
//! (`teiesti-anthem-next` uses `IndexMap` for exactly this reason — deterministic output order
//! that doesn't depend on hash iteration).

use indexmap::IndexMap;

use crate::ast::declaration::{Domain, VariableType, Visibility};
use crate::ast::ids::{FunctionId, PredicateId, VariableId};
use crate::ast::{FunctionDeclaration, PredicateDeclaration, VariableDeclaration};
use crate::error::Diagnostics;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslationMode {
    /// Clark's completion of a single program (`spec.md` §4.5).
    Completion,
    /// Embed one program into classical logic via here-and-there (`spec.md` §4.9).
    HereAndThereSingle,
    /// Embed two programs and conjecture their equivalence (`spec.md` §4.9).
    HereAndThereDouble,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    HumanReadable,
    Tptp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultVisibility {
    Visible,
    Hidden,
}

/// Whether completed formulas are mapped into the typed `object` universe TPTP output needs
/// (`spec.md` §4.8). Human-readable output never needs this, so `Auto` skips it unless the chosen
/// [`OutputFormat`] requires it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegerMappingPolicy {
    Auto,
    Always,
    Never,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub mode: TranslationMode,
    pub output_format: OutputFormat,
    pub default_visibility: DefaultVisibility,
    pub integer_mapping: IntegerMappingPolicy,
    pub perform_simplification: bool,
    pub perform_integer_detection: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: TranslationMode::Completion,
            output_format: OutputFormat::HumanReadable,
            default_visibility: DefaultVisibility::Visible,
            integer_mapping: IntegerMappingPolicy::Auto,
            perform_simplification: true,
            perform_integer_detection: true,
        }
    }
}

#[derive(Debug, Default)]
pub struct Context {
    predicates: Vec<PredicateDeclaration>,
    predicate_index: IndexMap<(String, usize), PredicateId>,
    /// `p` -> `p'`, populated lazily by [`Context::primed_predicate`] for here-and-there (§4.9).
    primed_predicates: IndexMap<PredicateId, PredicateId>,
    functions: Vec<FunctionDeclaration>,
    function_index: IndexMap<(String, usize), FunctionId>,
    variables: Vec<VariableDeclaration>,
    pub diagnostics: Diagnostics,
    pub config: Config,
}

impl Context {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn find_or_create_predicate(&mut self, name: &str, arity: usize) -> PredicateId {
        let key = (name.to_string(), arity);
        if let Some(id) = self.predicate_index.get(&key) {
            return *id;
        }
        let id = PredicateId(self.predicates.len() as u32);
        self.predicates.push(PredicateDeclaration {
            id,
            name: name.to_string(),
            arity,
            parameter_domains: vec![Domain::Unknown; arity],
            is_used: false,
            is_external: false,
            visibility: match self.config.default_visibility {
                DefaultVisibility::Visible => Visibility::Default,
                DefaultVisibility::Hidden => Visibility::Hidden,
            },
        });
        self.predicate_index.insert(key, id);
        id
    }

    pub fn predicate(&self, id: PredicateId) -> &PredicateDeclaration {
        &self.predicates[id.index()]
    }

    pub fn predicate_mut(&mut self, id: PredicateId) -> &mut PredicateDeclaration {
        &mut self.predicates[id.index()]
    }

    pub fn predicates(&self) -> impl Iterator<Item = &PredicateDeclaration> {
        self.predicates.iter()
    }

    /// The primed counterpart `p'` of `p`, creating it on first use (`spec.md` §4.9). Shares `p`'s
    /// arity and parameter domains; visibility is always hidden, since primed predicates never
    /// appear in user-facing output.
    pub fn primed_predicate(&mut self, id: PredicateId) -> PredicateId {
        if let Some(primed) = self.primed_predicates.get(&id) {
            return *primed;
        }
        let source = self.predicate(id).clone();
        let primed_id = PredicateId(self.predicates.len() as u32);
        self.predicates.push(PredicateDeclaration {
            id: primed_id,
            name: format!("{}'", source.name),
            arity: source.arity,
            parameter_domains: source.parameter_domains.clone(),
            is_used: true,
            is_external: false,
            visibility: Visibility::Hidden,
        });
        self.primed_predicates.insert(id, primed_id);
        primed_id
    }

    pub fn find_or_create_function(&mut self, name: &str, arity: usize) -> FunctionId {
        let key = (name.to_string(), arity);
        if let Some(id) = self.function_index.get(&key) {
            return *id;
        }
        let id = FunctionId(self.functions.len() as u32);
        self.functions.push(FunctionDeclaration {
            id,
            name: name.to_string(),
            arity,
            parameter_domains: vec![Domain::Unknown; arity],
            return_domain: Domain::Unknown,
        });
        self.function_index.insert(key, id);
        id
    }

    pub fn function(&self, id: FunctionId) -> &FunctionDeclaration {
        &self.functions[id.index()]
    }

    pub fn functions(&self) -> impl Iterator<Item = &FunctionDeclaration> {
        self.functions.iter()
    }

    /// Whether a function of this name has been registered, regardless of arity — used to gate
    /// emitting the TPTP arithmetic prelude on [`crate::rewrite::domain_map::map_domains`] having
    /// actually run (it's the only thing that registers `f__integer__`).
    pub fn function_is_installed(&self, name: &str) -> bool {
        self.functions.iter().any(|f| f.name == name)
    }

    /// Allocates a brand-new variable, distinct from every variable allocated before it.
    pub fn new_variable(
        &mut self,
        name: Option<String>,
        variable_type: VariableType,
        domain: Domain,
    ) -> VariableId {
        let id = VariableId(self.variables.len() as u32);
        self.variables.push(VariableDeclaration {
            id,
            name,
            variable_type,
            domain,
        });
        id
    }

    pub fn variable(&self, id: VariableId) -> &VariableDeclaration {
        &self.variables[id.index()]
    }

    pub fn variable_mut(&mut self, id: VariableId) -> &mut VariableDeclaration {
        &mut self.variables[id.index()]
    }

    /// Mints a fresh duplicate of `old`'s declaration; used only by
    /// [`crate::ast::substitute::prepare_copy`].
    pub fn duplicate_variable(&mut self, old: VariableId) -> VariableId {
        let source = self.variable(old).clone();
        self.new_variable(source.name, source.variable_type, source.domain)
    }
}
