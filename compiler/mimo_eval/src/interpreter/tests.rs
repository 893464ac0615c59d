#![expect(clippy::unwrap_used, reason = "tests unwrap parse results")]

use std::rc::Rc;

use pretty_assertions::assert_eq;

use super::*;
use crate::module_loader::parse_source;
use crate::print_handler::buffer_handler;
use crate::test_support::{error, eval, output, MemoryHost};

// Expressions

#[test]
fn prefix_arithmetic() {
    assert_eq!(output("show + 1 * 2 3\nshow - 10 4\nshow / 7 2\nshow % 7 3"), "7\n6\n3.5\n1\n");
    assert_eq!(output("show + 0.1 0.2"), "0.30000000000000004\n");
}

#[test]
fn plus_concatenates_when_either_side_is_a_string() {
    assert_eq!(output("show + \"n=\" 3\nshow + 1 \"x\"\nshow + \"a\" null"), "n=3\n1x\nanull\n");
}

#[test]
fn arithmetic_type_and_zero_errors() {
    assert_eq!(error("show * \"a\" 2").code, "TYPE001");
    let err = error("show / 1 0");
    assert_eq!(err.code, "MATH001");
    assert_eq!(err.message, "Division by zero is not allowed.");
    assert_eq!(error("show % 1 0").message, "Modulo by zero is not allowed.");
}

#[test]
fn equality_and_logic() {
    assert_eq!(
        output("set p [1]\nset q [1]\nshow = 1 1\nshow != \"a\" \"b\"\nshow = p q\nshow and 1 0\nshow or null \"x\"\nshow ?? null 5\nshow not 0"),
        "true\ntrue\nfalse\nfalse\ntrue\n5\ntrue\n"
    );
}

#[test]
fn templates_and_inline_if() {
    let out = output(
        "set name \"Ada\"\n\
         set xs [1, 2]\n\
         show `Hi ${name}, ${+ 1 2} items: ${xs}`\n\
         function double(n) return * n 2 end\n\
         function negate(n) return - 0 n end\n\
         show 5 |> if > 2 1 then double else negate\n\
         show 5 |> if > 1 2 then double else negate",
    );
    assert_eq!(out, "Hi Ada, 3 items: [1, 2]\n10\n-5\n");
}

#[test]
fn collections_spread_and_access() {
    let out = output(
        "set base [1, 2]\n\
         set xs [0, ...base, 3]\n\
         set o {a: 1, ...{b: 2}, c: xs}\n\
         show xs\n\
         show o.c[2]\n\
         show xs[9]\n\
         set s \"abc\"\n\
         show s[1]\n\
         show xs.length\n\
         show o[\"b\"]",
    );
    assert_eq!(out, "[0, 1, 2, 3]\n2\nnull\nb\n4\n2\n");
    assert_eq!(error("set xs [...5]").code, "TYPE001");
}

#[test]
fn optional_chaining_short_circuits_on_null() {
    let out = output(
        "set user null\n\
         show user?.name\n\
         show user?.[0]\n\
         show user?.(1)\n\
         set profile {address: null}\n\
         show profile.address?.city",
    );
    assert_eq!(out, "null\nnull\nnull\nnull\n");
    let err = error("set user null\nshow user.name");
    assert_eq!(err.code, "REF001");
}

#[test]
fn pipes_pass_the_value_first() {
    let out = output(
        "function add(a, b)\n\
           return + a b\n\
         end\n\
         function double(x)\n\
           return * x 2\n\
         end\n\
         show 5 |> double |> add(1)",
    );
    assert_eq!(out, "11\n");
}

// Variables and scope

#[test]
fn let_is_block_scoped_and_set_updates_outer() {
    let out = output(
        "set x 1\n\
         if true\n\
           let x 2\n\
           show x\n\
         end\n\
         show x\n\
         if true\n\
           set x 3\n\
         end\n\
         show x",
    );
    assert_eq!(out, "2\n1\n3\n");
}

#[test]
fn const_cannot_be_reassigned() {
    let err = error("const pi 3.14\nset pi 3");
    assert_eq!(err.code, "CONST001");
    assert_eq!(err.message, "Cannot assign to const variable 'pi'");
}

#[test]
fn let_redeclaration_fails() {
    assert_eq!(error("let a 1\nlet a 2").code, "DECL001");
}

#[test]
fn undefined_variable_suggests_nearest_name() {
    let err = error("set counter 1\nshow countr");
    assert_eq!(err.code, "REF002");
    assert_eq!(err.message, "Undefined variable: countr");
    assert!(err.suggestion.unwrap().contains("counter"));
}

#[test]
fn global_declares_from_any_depth() {
    let out = output(
        "function setup()\n\
           global config {debug: true}\n\
         end\n\
         call setup()\n\
         show config.debug",
    );
    assert_eq!(out, "true\n");
}

#[test]
fn destructuring_binds_missing_as_null() {
    let out = output(
        "const [a, b, c] [1, 2]\n\
         show [a, b, c]\n\
         let {x, z} {x: 5, y: 6}\n\
         show [x, z]\n\
         set p 0\n\
         set q 0\n\
         destructure [p, q] from [7, 8]\n\
         show + p q",
    );
    assert_eq!(out, "[1, 2, null]\n[5, null]\n15\n");
    assert_eq!(error("const [a] {x: 1}").code, "TYPE002");
}

#[test]
fn member_assignment() {
    let out = output(
        "set o {inner: {}}\n\
         set o.inner.v 1\n\
         set xs [1]\n\
         set xs[3] 4\n\
         set o[\"k\"] xs\n\
         show o",
    );
    assert_eq!(out, "{inner: {v: 1}, k: [1, null, null, 4]}\n");
    assert_eq!(error("set xs [1]\nset xs[- 0 1] 0").code, "INDEX001");
    assert_eq!(error("set n 5\nset n.x 1").code, "TYPE004");
}

#[test]
fn oversized_index_assignment_is_catchable() {
    let out = output(
        "set xs [1]\n\
         try\n\
           set xs[100000000000] 1\n\
         catch e\n\
           show e.code\n\
         end\n\
         show call len(xs)",
    );
    assert_eq!(out, "INDEX001\n1\n");
}

// Functions

#[test]
fn defaults_and_rest_parameters() {
    let out = output(
        "function greet(name, greeting: \"Hello\", ...rest)\n\
           return `${greeting}, ${name} ${rest}`\n\
         end\n\
         show call greet(\"Ada\")\n\
         show call greet(\"Ada\", \"Hi\", 1, 2)",
    );
    assert_eq!(out, "Hello, Ada []\nHi, Ada [1, 2]\n");
}

#[test]
fn argument_count_is_checked() {
    let source = "function f(a, b: 1)\n  return a\nend\n";
    let err = error(&format!("{source}call f()"));
    assert_eq!(err.code, "FUNC001");
    assert_eq!(err.message, "Function 'f' expects at least 1 arguments but received 0.");
    assert_eq!(error(&format!("{source}call f(1, 2, 3)")).code, "FUNC002");
}

#[test]
fn closures_capture_their_scope() {
    let out = output(
        "function counter()\n\
           set n 0\n\
           return fn -> \n\
             set n + n 1\n\
             return n\n\
           end\n\
         end\n\
         set next call counter()\n\
         call next()\n\
         call next()\n\
         show call next()",
    );
    assert_eq!(out, "3\n");
}

#[test]
fn closures_capture_each_iteration() {
    let out = output(
        "set fs []\n\
         for i in [1, 2, 3]\n\
           call push(fs, fn -> return i end)\n\
         end\n\
         set n 0\n\
         loop\n\
           if = n 3\n\
             break\n\
           end\n\
           let j n\n\
           call push(fs, fn -> return j end)\n\
           set n + n 1\n\
         end\n\
         for f in fs\n\
           show call f()\n\
         end",
    );
    assert_eq!(out, "1\n2\n3\n0\n1\n2\n");
}

#[test]
fn functions_are_hoisted_and_recursive() {
    let out = output(
        "show call fact(5)\n\
         function fact(n)\n\
           if <= n 1\n\
             return 1\n\
           end\n\
           return * n (call fact(- n 1))\n\
         end",
    );
    assert_eq!(out, "120\n");
}

#[test]
fn call_statement_destination() {
    assert_eq!(output("call len([1, 2]) -> size\nshow size"), "2\n");
}

#[test]
fn calling_a_non_function() {
    let err = error("set x 5\ncall x()");
    assert_eq!(err.code, "TYPE002");
    assert_eq!(err.message, "'x' is not a callable function.");
}

#[test]
fn max_call_depth_is_enforced() {
    let source = "function down(n)\n  return call down(+ n 1)\nend\ncall down(0)";
    let program = parse_source(source, "deep.mimo").unwrap();
    let config = InterpreterConfig::default()
        .with_print_handler(buffer_handler())
        .with_max_call_depth(50);
    let mut interp = Interpreter::with_config(config);
    let err = interp.interpret(&program, "deep.mimo").unwrap_err();
    assert_eq!(err.code, "STACK001");
    assert_eq!(err.message, "Maximum call depth of 50 exceeded.");
}

#[test]
fn runaway_recursion_stops_at_the_default_depth() {
    let err = error("function down(n)\n  return call down(+ n 1)\nend\ncall down(0)");
    assert_eq!(err.code, "STACK001");
    assert_eq!(
        err.message,
        format!("Maximum call depth of {DEFAULT_MAX_CALL_DEPTH} exceeded.")
    );
}

// Control flow

#[test]
fn else_if_chain() {
    let source = |n: i32| {
        format!(
            "set x {n}\nif > x 10\n  show \"big\"\nelse if > x 5\n  show \"medium\"\nelse\n  show \"small\"\nend"
        )
    };
    assert_eq!(output(&source(20)), "big\n");
    assert_eq!(output(&source(7)), "medium\n");
    assert_eq!(output(&source(1)), "small\n");
}

#[test]
fn loops_with_break_and_continue() {
    let out = output(
        "set i 0\n\
         set seen []\n\
         while < i 10\n\
           set i + i 1\n\
           if = % i 2 0\n\
             continue\n\
           end\n\
           if > i 7\n\
             break\n\
           end\n\
           call push(seen, i)\n\
         end\n\
         show seen\n\
         set n 0\n\
         loop\n\
           set n + n 1\n\
           if = n 3\n\
             break\n\
           end\n\
         end\n\
         show n",
    );
    assert_eq!(out, "[1, 3, 5, 7]\n3\n");
}

#[test]
fn for_visits_elements_appended_during_iteration() {
    let out = output(
        "set xs [1]\n\
         for x in xs\n\
           if < x 3\n\
             call push(xs, + x 1)\n\
           end\n\
           show x\n\
         end",
    );
    assert_eq!(out, "1\n2\n3\n");
    assert_eq!(error("for x in 5\nend").code, "TYPE001");
}

#[test]
fn labeled_break_exits_outer_loop() {
    let out = output(
        "outer: for i in [1, 2, 3]\n\
           for j in [1, 2, 3]\n\
             if = j 2\n\
               continue outer\n\
             end\n\
             if = i 3\n\
               break outer\n\
             end\n\
             show `${i}${j}`\n\
           end\n\
         end",
    );
    assert_eq!(out, "11\n21\n");
}

#[test]
fn stray_break_is_an_error() {
    let err = error("function f()\n  break\nend\ncall f()");
    assert_eq!(err.code, "CTRL002");
    assert_eq!(err.message, "'break' can only be used inside a loop.");
}

#[test]
fn guard_else_must_exit() {
    let out = output(
        "function check(n)\n\
           guard > n 0 else\n\
             return \"non-positive\"\n\
           end\n\
           return \"ok\"\n\
         end\n\
         show call check(1)\n\
         show call check(0)",
    );
    assert_eq!(out, "ok\nnon-positive\n");
    let err = error("guard false else\n  show 1\nend");
    assert_eq!(err.code, "CTRL001");
}

#[test]
fn try_catch_binds_error_object() {
    let out = output(
        "try\n\
           throw \"boom\"\n\
         catch err\n\
           show err.message\n\
           show err.code\n\
           show err.type\n\
           show err.line\n\
         end\n\
         try\n\
           show / 1 0\n\
         catch e\n\
           show e.code\n\
         end",
    );
    assert_eq!(out, "boom\nUSER001\nRuntimeError\n2\nMATH001\n");
}

#[test]
fn try_does_not_catch_return() {
    let out = output(
        "function f()\n\
           try\n\
             return 1\n\
           catch e\n\
             return 2\n\
           end\n\
           return 3\n\
         end\n\
         show call f()",
    );
    assert_eq!(out, "1\n");
}

#[test]
fn match_patterns_and_guards() {
    let source = |value: &str| {
        format!(
            "match {value}\n  case 0: show \"zero\"\n  case [x, [1, y]] when > x 2: show + x y\n  case [a, b]: show `pair ${{a}} ${{b}}`\n  case \"s\": show \"string\"\n  default: show \"other\"\nend"
        )
    };
    assert_eq!(output(&source("0")), "zero\n");
    assert_eq!(output(&source("[3, [1, 4]]")), "7\n");
    assert_eq!(output(&source("[1, [1, 4]]")), "pair 1 [1, 4]\n");
    assert_eq!(output(&source("\"s\"")), "string\n");
    assert_eq!(output(&source("{}")), "other\n");
}

#[test]
fn match_without_default_fails() {
    let err = error("match 5\n  case 1: show 1\nend");
    assert_eq!(err.code, "MATCH001");
    assert_eq!(err.message, "No matching pattern found for value: 5");
}

// Results and diagnostics

#[test]
fn program_value_is_last_statement_or_top_level_return() {
    assert_eq!(eval("set x 2\n* x 21").as_number(), Some(42.0));
    assert_eq!(eval("return 7\nshow 1").as_number(), Some(7.0));
    assert!(eval("not false").is_truthy());
    assert!(!eval("and true false").is_truthy());
}

#[test]
fn runtime_errors_carry_snippet_and_stack() {
    let err = error("function inner()\n  throw \"deep\"\nend\nfunction outer()\n  call inner()\nend\ncall outer()");
    assert_eq!(err.code, "USER001");
    assert_eq!(err.location.line, 2);
    assert_eq!(err.snippet.as_deref(), Some("  throw \"deep\""));
    let names: Vec<&str> = err.stack.iter().map(|f| f.function.as_str()).collect();
    assert_eq!(names, vec!["inner", "outer", "<root>"]);
}

#[test]
fn globals_persist_between_runs() {
    let print = buffer_handler();
    let config = InterpreterConfig::default()
        .with_print_handler(print.clone())
        .with_host(Rc::new(MemoryHost::new()));
    let mut interp = Interpreter::with_config(config);
    let first = parse_source("set total 40", "a.mimo").unwrap();
    let second = parse_source("show + total 2", "b.mimo").unwrap();
    interp.interpret(&first, "a.mimo").unwrap();
    interp.interpret(&second, "b.mimo").unwrap();
    assert_eq!(print.get_output(), "42\n");
    assert!(interp.globals().lookup("total").is_some());
}

#[test]
fn call_function_invokes_user_closures() {
    let mut interp = Interpreter::with_config(
        InterpreterConfig::default().with_print_handler(buffer_handler()),
    );
    let program = parse_source("fn a b -> return * a b end", "f.mimo").unwrap();
    let func = interp.interpret(&program, "f.mimo").unwrap();
    let result = interp
        .call_function(
            &func,
            vec![Value::Number(6.0), Value::Number(7.0)],
            &Location::synthetic("embed"),
        )
        .unwrap();
    assert_eq!(result.as_number(), Some(42.0));
}
