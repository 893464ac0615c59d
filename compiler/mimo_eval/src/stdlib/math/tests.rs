#![expect(clippy::unwrap_used, reason = "tests unwrap expected outcomes")]

use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::{normalize_seed, round_half_up, MODULUS};
use crate::test_support::{error, output};

fn with_math(body: &str) -> String {
    output(&format!("import \"math\" as m\n{body}"))
}

#[test]
fn constants_and_elementary_functions() {
    let out = with_math(
        "show > m.PI 3.14\n\
         show call m.sqrt(16)\n\
         show call m.pow(2, 10)\n\
         show call m.abs(- 0 3)\n\
         show call m.floor(2.7)\n\
         show call m.ceil(2.1)\n\
         show call m.max(1, 7, 3)\n\
         show call m.min(4, 2)",
    );
    assert_eq!(out, "true\n4\n1024\n3\n2\n3\n7\n2\n");
}

#[test]
fn round_goes_half_up() {
    assert_eq!(round_half_up(2.5), 3.0);
    assert_eq!(round_half_up(-2.5), -2.0);
    assert_eq!(round_half_up(-2.6), -3.0);
    assert_eq!(round_half_up(1.4), 1.0);
}

#[test]
fn max_propagates_nan() {
    assert_eq!(with_math("show call m.max(1, call m.sqrt(- 0 1), 3)"), "NaN\n");
}

#[test]
fn seeded_random_is_reproducible() {
    let program = "call m.seed(42)\n\
                   set a call m.random()\n\
                   set b call m.randint(1, 6)\n\
                   call m.seed(42)\n\
                   show = a (call m.random())\n\
                   show = b (call m.randint(1, 6))\n\
                   show and >= a 0 < a 1";
    assert_eq!(with_math(program), "true\ntrue\ntrue\n");
}

#[test]
fn seed_normalization() {
    assert_eq!(normalize_seed(0.0), 1);
    assert_eq!(normalize_seed(f64::NAN), 1);
    assert_eq!(normalize_seed(-5.5), 6);
    assert_eq!(normalize_seed(MODULUS as f64), 1);
}

#[test]
fn non_numbers_are_rejected() {
    let err = error("import \"math\" as m\ncall m.sqrt(\"4\")");
    assert_eq!(err.code, "TYPE001");
    assert_eq!(err.message, "sqrt() expects a number as argument 1. Got 'string'.");
}

proptest! {
    #[test]
    fn seeds_stay_in_generator_range(seed in proptest::num::f64::ANY) {
        let state = normalize_seed(seed);
        prop_assert!((1..MODULUS).contains(&state));
    }
}

#[test]
fn configured_seed_matches_seed_call() {
    use crate::interpreter::{Interpreter, InterpreterConfig};
    use crate::module_loader::parse_source;
    use crate::print_handler::buffer_handler;

    let print = buffer_handler();
    let config = InterpreterConfig::default()
        .with_print_handler(print.clone())
        .with_random_seed(42.0);
    let mut interp = Interpreter::with_config(config);
    let program = parse_source(
        "import \"math\" as m\nshow call m.random()\nshow call m.random()",
        "seeded.mimo",
    )
    .unwrap();
    interp.interpret(&program, "seeded.mimo").unwrap();

    let explicit = with_math("call m.seed(42)\nshow call m.random()\nshow call m.random()");
    assert_eq!(print.get_output(), explicit);
}
