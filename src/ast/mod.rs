//! The typed term/formula AST, `spec.md` §3.

pub mod declaration;
pub mod formula;
pub mod ids;
pub mod scoped;
pub mod substitute;
pub mod term;

pub use declaration::{Domain, FunctionDeclaration, PredicateDeclaration, VariableDeclaration, VariableType, Visibility};
pub use formula::{ComparisonOperator, Formula};
pub use ids::{FunctionId, PredicateId, VariableId};
pub use scoped::ScopedFormula;
pub use term::{BinaryOperator, SpecialInteger, Term, UnaryOperator};
