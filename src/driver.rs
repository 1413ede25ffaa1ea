//! Chains the passes in a fixed order per `spec.md` §9's resolution of the translation-order open
//! question: complete, eliminate hidden predicates, detect integer domains, simplify, then (for
//! TPTP output only) map domains. Here-and-there modes skip hidden-predicate elimination (its
//! pattern match only recognizes completion's biconditional shape) and simplification (valid
//! classical rewrites aren't always valid here-and-there ones).

use std::fs;
use std::path::Path;

use crate::ast::Formula;
use crate::cli::{Cli, FormatArg, ModeArg, VisibilityArg};
use crate::completion::complete;
use crate::context::{Config, Context, DefaultVisibility, IntegerMappingPolicy, OutputFormat, TranslationMode};
use crate::error::{AnthemError, Diagnostics, IoError};
use crate::format::{human, tptp};
use crate::here_and_there::embed_and_conjecture_equivalence;
use crate::rewrite::domain_map::map_domains;
use crate::rewrite::hidden::eliminate_hidden_predicates;
use crate::rewrite::integer_detect::detect_integer_domains;
use crate::rewrite::simplify::simplify_program;
use crate::surface::parse_program;
use crate::translate::statement::translate_program;

fn read_input(path: &Path) -> Result<String, AnthemError> {
    fs::read_to_string(path)
        .map_err(|source| AnthemError::Io(IoError::Read { path: path.display().to_string(), source }))
}

fn config_from_cli(cli: &Cli) -> Config {
    Config {
        mode: match cli.mode {
            ModeArg::Completion => TranslationMode::Completion,
            ModeArg::HereAndThere => TranslationMode::HereAndThereSingle,
            ModeArg::Equivalent => TranslationMode::HereAndThereDouble,
        },
        output_format: match cli.format {
            FormatArg::Human => OutputFormat::HumanReadable,
            FormatArg::Tptp => OutputFormat::Tptp,
        },
        default_visibility: match cli.default_visibility {
            VisibilityArg::Visible => DefaultVisibility::Visible,
            VisibilityArg::Hidden => DefaultVisibility::Hidden,
        },
        integer_mapping: IntegerMappingPolicy::Auto,
        perform_simplification: !cli.no_simplify,
        perform_integer_detection: !cli.no_integer_detection,
    }
}

fn render(formulas: &[Formula], context: &Context, format: OutputFormat) -> String {
    match format {
        OutputFormat::HumanReadable => human::format_program(formulas, context),
        OutputFormat::Tptp => tptp::format_program(formulas, context),
    }
}

fn finish_classical(mut formulas: Vec<Formula>, context: &mut Context, hidden_elimination: bool) -> Vec<Formula> {
    if hidden_elimination {
        formulas = eliminate_hidden_predicates(formulas, context);
    }
    if context.config.perform_integer_detection {
        detect_integer_domains(&formulas, context);
    }
    if context.config.perform_simplification {
        formulas = simplify_program(formulas);
    }
    if context.config.output_format == OutputFormat::Tptp {
        formulas = map_domains(formulas, context);
    }
    formulas
}

pub fn run(cli: &Cli) -> Result<(String, Diagnostics), AnthemError> {
    let config = config_from_cli(cli);
    let mut context = Context::new(config);

    let output = match context.config.mode {
        TranslationMode::Completion => {
            let source = read_source(&cli.files, 0)?;
            let program = parse_program(&display_path(&cli.files, 0), &source)?;
            let statements = translate_program(&program, &mut context);
            let formulas = complete(statements, &mut context);
            let formulas = finish_classical(formulas, &mut context, !cli.no_hidden_elimination);
            render(&formulas, &context, context.config.output_format)
        }
        TranslationMode::HereAndThereSingle => {
            let source = read_source(&cli.files, 0)?;
            let program = parse_program(&display_path(&cli.files, 0), &source)?;
            let mut formulas = crate::here_and_there::embed_single_program(&program, &mut context);
            if context.config.perform_integer_detection {
                detect_integer_domains(&formulas, &mut context);
            }
            if context.config.output_format == OutputFormat::Tptp {
                formulas = map_domains(formulas, &mut context);
            }
            render(&formulas, &context, context.config.output_format)
        }
        TranslationMode::HereAndThereDouble => {
            let source_a = read_source(&cli.files, 0)?;
            let source_b = read_source(&cli.files, 1)?;
            let program_a = parse_program(&display_path(&cli.files, 0), &source_a)?;
            let program_b = parse_program(&display_path(&cli.files, 1), &source_b)?;
            let conjecture = embed_and_conjecture_equivalence(&program_a, &program_b, &mut context);
            let mut formulas = vec![conjecture];
            if context.config.perform_integer_detection {
                detect_integer_domains(&formulas, &mut context);
            }
            if context.config.output_format == OutputFormat::Tptp {
                formulas = map_domains(formulas, &mut context);
            }
            render(&formulas, &context, context.config.output_format)
        }
    };

    Ok((output, context.diagnostics))
}

fn display_path(files: &[std::path::PathBuf], index: usize) -> String {
    files.get(index).map(|p| p.display().to_string()).unwrap_or_else(|| "<stdin>".to_string())
}

fn read_source(files: &[std::path::PathBuf], index: usize) -> Result<String, AnthemError> {
    match files.get(index) {
        Some(path) => read_input(path),
        None if index == 0 => {
            use std::io::Read;
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|source| AnthemError::Io(IoError::Read { path: "<stdin>".to_string(), source }))?;
            Ok(buffer)
        }
        None => Err(AnthemError::Io(IoError::Read {
            path: format!("<missing argument {index}>"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "expected a second input file"),
        })),
    }
}
