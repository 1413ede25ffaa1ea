//! Command-line surface, `spec.md` §6, built with `clap`'s derive API the way the teacher
//! declares (but never wires up) its own `Cli` struct.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum ModeArg {
    /// Clark's completion of a single program.
    Completion,
    /// Embed a single program into classical logic via here-and-there.
    HereAndThere,
    /// Embed two programs and conjecture their equivalence.
    Equivalent,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum FormatArg {
    Human,
    Tptp,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum VisibilityArg {
    Visible,
    Hidden,
}

#[derive(Debug, Parser)]
#[command(name = "anthem", about = "Translates gringo-dialect ASP programs into classical first-order logic")]
pub struct Cli {
    /// Input program files; with `equivalent` mode, exactly two. Reads stdin if none are given.
    pub files: Vec<PathBuf>,

    #[arg(long, value_enum, default_value_t = ModeArg::Completion)]
    pub mode: ModeArg,

    #[arg(long, value_enum, default_value_t = FormatArg::Human)]
    pub format: FormatArg,

    /// Whether a predicate not named by any `#show` is visible by default.
    #[arg(long, value_enum, default_value_t = VisibilityArg::Visible)]
    pub default_visibility: VisibilityArg,

    #[arg(long)]
    pub no_simplify: bool,

    #[arg(long)]
    pub no_integer_detection: bool,

    /// Keep predicates hidden-predicate elimination would otherwise fold away.
    #[arg(long)]
    pub no_hidden_elimination: bool,
}
