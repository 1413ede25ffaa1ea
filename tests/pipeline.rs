//! Coarse end-to-end checks: parse a small program through completion and through the
//! here-and-there embedding, and assert on substrings of the rendered output rather than an exact
//! string, since a byte-for-byte match would be too brittle to keep in sync by hand.

use anthem::completion::complete;
use anthem::context::{Config, Context};
use anthem::format::human;
use anthem::here_and_there::embed_single_program;
use anthem::rewrite::domain_map::map_domains;
use anthem::rewrite::hidden::eliminate_hidden_predicates;
use anthem::rewrite::integer_detect::detect_integer_domains;
use anthem::rewrite::simplify::simplify_program;
use anthem::surface::parse_program;
use anthem::translate::statement::translate_program;

const TRANSITIVE_CLOSURE: &str = "\
edge(1, 2).
edge(2, 3).
path(X, Y) :- edge(X, Y).
path(X, Z) :- path(X, Y), edge(Y, Z).
#show path/2.
";

#[test]
fn completion_of_transitive_closure_hides_edge_and_shows_path() {
    let mut context = Context::new(Config::default());
    let program = parse_program("<test>", TRANSITIVE_CLOSURE).expect("valid program");
    let statements = translate_program(&program, &mut context);
    let formulas = complete(statements, &mut context);
    let formulas = eliminate_hidden_predicates(formulas, &mut context);
    detect_integer_domains(&formulas, &mut context);
    let formulas = simplify_program(formulas);

    let rendered = human::format_program(&formulas, &context);

    assert!(rendered.contains("path(X"), "path's completion should survive: {rendered}");
    assert!(!rendered.contains("edge("), "edge is hidden by #show and should be eliminated: {rendered}");
}

#[test]
fn a_choice_rule_completion_does_not_force_its_head_from_the_body() {
    let mut context = Context::new(Config::default());
    let program = parse_program("<test>", "{ a } :- b.\nb.\n").expect("valid program");
    let statements = translate_program(&program, &mut context);
    let formulas = complete(statements, &mut context);

    let rendered = human::format_program(&formulas, &context);
    // The choice's own atom must appear conjoined into its defining disjunct, not just the body.
    assert!(rendered.contains("a(") || rendered.contains(" a ") || rendered.contains("a and") || rendered.contains("a)"),
        "expected the choice atom itself inside its completion: {rendered}");
}

#[test]
fn integrity_constraint_becomes_a_standalone_negated_closure() {
    let mut context = Context::new(Config::default());
    let program = parse_program("<test>", "p(1).\n:- p(X), X > 10.\n").expect("valid program");
    let statements = translate_program(&program, &mut context);
    let formulas = complete(statements, &mut context);

    let rendered = human::format_program(&formulas, &context);
    assert!(rendered.contains("not ("), "the constraint should render as a negated closure: {rendered}");
}

#[test]
fn tptp_output_wraps_every_integer_literal_in_its_constructor_function() {
    let mut context = Context::new(Config::default());
    context.config.output_format = anthem::context::OutputFormat::Tptp;
    let program = parse_program("<test>", "p(1).\n").expect("valid program");
    let statements = translate_program(&program, &mut context);
    let formulas = complete(statements, &mut context);
    let formulas = map_domains(formulas, &mut context);

    let rendered = anthem::format::tptp::format_program(&formulas, &context);

    assert!(rendered.contains("f__integer__(1)"), "expected the wrapped literal: {rendered}");
    assert!(rendered.contains("tff("), "expected tff-style clauses: {rendered}");
}

#[test]
fn here_and_there_embedding_asserts_persistence_from_plain_to_primed() {
    let mut context = Context::new(Config::default());
    let program = parse_program("<test>", "a :- b.\nb.\n").expect("valid program");

    let formulas = embed_single_program(&program, &mut context);
    let rendered = human::format_program(&formulas, &context);

    assert!(rendered.contains("'"), "the there-world embedding should mention primed predicates: {rendered}");
    assert!(rendered.contains("->"), "persistence axioms are implications: {rendered}");
}
