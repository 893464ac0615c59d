use std::rc::Rc;

use pretty_assertions::assert_eq;

use crate::test_support::{error, output, run_with_host, MemoryHost};

#[test]
fn len_counts_characters_and_items() {
    assert_eq!(output("show call len([1, 2, 3])\nshow call len(\"héllo\")"), "3\n5\n");
    let err = error("call len(5)");
    assert_eq!(err.code, "TYPE001");
    assert_eq!(err.message, "len() expects an array or string. Got 'number'.");
}

#[test]
fn arity_is_checked_before_the_call() {
    let err = error("call len()");
    assert_eq!(err.code, "BUILTIN001");
    assert_eq!(err.message, "Built-in function 'len' expects 1 arguments but received 0.");
    let err = error("call slice([1], 1, 2, 3)");
    assert_eq!(err.message, "Built-in function 'slice' expects 1-3 arguments but received 4.");
}

#[test]
fn get_and_update() {
    let out = output(
        "set xs [1, 2]\n\
         call update(xs, 4, \"x\")\n\
         show xs\n\
         show call get(xs, 9)\n\
         set o {a: 1}\n\
         call update(o, 2, true)\n\
         show o\n\
         show call get(o, \"a\")",
    );
    assert_eq!(out, "[1, 2, null, null, x]\nnull\n{a: 1, 2: true}\n1\n");
    assert_eq!(error("call get(\"s\", 0)").code, "TYPE002");
    assert_eq!(error("call update([1], -1, 0)").code, "INDEX001");
    assert_eq!(error("call get([1], 0.5)").code, "TYPE001");
}

#[test]
fn growth_and_range_are_bounded() {
    let err = error("call update([1], 100000000000, 0)");
    assert_eq!(err.code, "INDEX001");
    assert_eq!(
        err.message,
        "Array index 100000000000 is too large. Arrays hold at most 16777216 elements."
    );
    let err = error("call range(1000000000000)");
    assert_eq!(err.code, "ARG001");
    assert_eq!(
        err.message,
        "range() result would have length 1000000000000, over the limit of 16777216."
    );
    assert_eq!(output("show call len(call range(0, 100000, 7))"), "14286\n");
}

#[test]
fn type_names() {
    assert_eq!(
        output(
            "show call type(null)\nshow call type(1)\nshow call type(\"\")\nshow call type([])\n\
             show call type({})\nshow call type(len)\nshow call type(fn x -> return x end)"
        ),
        "null\nnumber\nstring\narray\nobject\nfunction\nfunction\n"
    );
}

#[test]
fn push_and_pop_mutate_in_place() {
    let out = output("set xs []\ncall push(xs, 1)\ncall push(xs, 2)\nshow call pop(xs)\nshow xs");
    assert_eq!(out, "2\n[1]\n");
    let err = error("call pop([])");
    assert_eq!(err.code, "INDEX001");
    assert_eq!(err.message, "Cannot pop from empty array");
}

#[test]
fn slice_supports_negative_bounds() {
    assert_eq!(
        output("show call slice([1, 2, 3, 4], 1)\nshow call slice([1, 2, 3, 4], -3, -1)"),
        "[2, 3, 4]\n[2, 3]\n"
    );
}

#[test]
fn range_variants() {
    assert_eq!(
        output("show call range(3)\nshow call range(2, 5)\nshow call range(5, 0, -2)\nshow call range(3, 1)"),
        "[0, 1, 2]\n[2, 3, 4]\n[5, 3, 1]\n[]\n"
    );
    let err = error("call range(0, 5, 0)");
    assert_eq!(err.code, "ARG001");
    assert_eq!(err.message, "range() step argument cannot be zero.");
    assert_eq!(error("call range(1.5)").message, "range() arguments must be integers.");
    assert_eq!(error("call range(\"3\")").message, "range() arguments must be numbers.");
}

#[test]
fn join_prints_each_element() {
    assert_eq!(output("show call join([1, \"a\", null, true], \"-\")"), "1-a-null-true\n");
    assert_eq!(error("call join([1], 0)").code, "TYPE001");
}

#[test]
fn has_property_on_objects_and_arrays() {
    assert_eq!(
        output(
            "show call has_property({a: null}, \"a\")\n\
             show call has_property([1, 2], 1)\n\
             show call has_property([1, 2], \"01\")\n\
             show call has_property([1, 2], 2)\n\
             show call has_property(\"str\", \"length\")"
        ),
        "true\ntrue\nfalse\nfalse\nfalse\n"
    );
}

#[test]
fn keys_values_entries() {
    let out = output(
        "set o {b: 1, a: 2}\nshow call keys(o)\nshow call values(o)\nshow call entries(o)\nshow call keys([7, 8])",
    );
    assert_eq!(out, "[b, a]\n[1, 2]\n[[b, 1], [a, 2]]\n[0, 1]\n");
    assert_eq!(error("call keys(null)").message, "keys() requires a non-null object.");
    assert_eq!(error("call entries(3)").message, "entries() requires an object argument.");
}

#[test]
fn host_backed_builtins() {
    let host = Rc::new(
        MemoryHost::new()
            .with_args(&["one", "two"])
            .with_env("HOME", "/home/mimo"),
    );
    let run = run_with_host(
        "show call get_arguments()\nshow call get_env(\"HOME\")\nshow call get_env(\"NOPE\")\ncall exit_code(3.7)",
        host.clone(),
    );
    assert!(run.result.is_ok());
    assert_eq!(run.output, "[one, two]\n/home/mimo\nnull\n");
    assert_eq!(*host.exit_code.borrow(), Some(3));
}

#[test]
fn exit_code_without_capability() {
    let run = run_with_host("call exit_code(1)", Rc::new(crate::host::NullHost));
    let Err(err) = run.result else {
        panic!("exit on a null host must fail");
    };
    assert_eq!(err.code, "ADAPTER001");
}

#[test]
fn coalesce_if_else_and_safe_property() {
    assert_eq!(
        output(
            "show call coalesce(null, 1)\n\
             show call coalesce(false, 1)\n\
             show call if_else(\"\", \"yes\", \"no\")\n\
             show call get_property_safe(null, \"x\")\n\
             show call get_property_safe({x: 5}, \"x\")\n\
             show call get_property_safe(\"abc\", \"length\")"
        ),
        "1\nfalse\nno\nnull\n5\n3\n"
    );
    assert_eq!(error("call get_property_safe(5, \"x\")").code, "TYPE002");
    assert_eq!(error("call get_property_safe({}, 1)").code, "TYPE001");
}

#[test]
fn builtins_can_be_rebound() {
    assert_eq!(output("set len 5\nshow len"), "5\n");
}

#[test]
fn array_global_is_the_array_module() {
    assert_eq!(output("show call Array.first([9, 8])"), "9\n");
}
