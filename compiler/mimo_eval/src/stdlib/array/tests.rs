use pretty_assertions::assert_eq;

use crate::test_support::{error, output};

fn with_array(body: &str) -> String {
    output(&format!("import \"array\" as arr\n{body}"))
}

#[test]
fn map_filter_reduce() {
    let out = with_array(
        "set xs [1, 2, 3, 4]\n\
         show call arr.map(xs, fn x -> return * x 10 end)\n\
         show call arr.filter(xs, fn x -> return = % x 2 0 end)\n\
         show call arr.reduce(xs, fn acc x -> return + acc x end)\n\
         show call arr.reduce(xs, fn acc x -> return + acc x end, 100)\n\
         show xs",
    );
    assert_eq!(out, "[10, 20, 30, 40]\n[2, 4]\n10\n110\n[1, 2, 3, 4]\n");
}

#[test]
fn callbacks_receive_index_and_array() {
    let out = with_array(
        "show call arr.map([\"a\", \"b\"], fn x i -> return `${i}:${x}` end)\n\
         show call arr.map([5], function(x, i, all) return call len(all) end)",
    );
    assert_eq!(out, "[0:a, 1:b]\n[1]\n");
}

#[test]
fn callbacks_see_mutations_during_iteration() {
    let out = with_array(
        "set xs [1, 2]\n\
         set seen []\n\
         function visit(x)\n\
           call push(seen, x)\n\
           if = x 1\n\
             call push(xs, 3)\n\
           end\n\
         end\n\
         call arr.for_each(xs, visit)\n\
         show seen",
    );
    assert_eq!(out, "[1, 2, 3]\n");
}

#[test]
fn reduce_empty_without_initial_fails() {
    let err = error("import \"array\" as arr\ncall arr.reduce([], fn a b -> return a end)");
    assert_eq!(err.code, "ARG001");
    assert_eq!(err.message, "reduce() of empty array with no initial value.");
}

#[test]
fn callbacks_must_be_mimo_functions() {
    let err = error("import \"array\" as arr\ncall arr.map([1], len)");
    assert_eq!(err.code, "TYPE001");
    assert_eq!(err.message, "map() expects a Mimo function as argument 2. Got 'function'.");
}

#[test]
fn searching() {
    let out = with_array(
        "set xs [3, 5, 3, 8]\n\
         show call arr.find(xs, fn x -> return > x 4 end)\n\
         show call arr.find(xs, fn x -> return > x 40 end)\n\
         show call arr.find_index(xs, fn x -> return > x 4 end)\n\
         show call arr.includes(xs, 8)\n\
         show call arr.includes(xs, 3, 3)\n\
         show call arr.index_of(xs, 3)\n\
         show call arr.index_of(xs, 3, 1)\n\
         show call arr.last_index_of(xs, 3)\n\
         show call arr.last_index_of(xs, 3, 1)\n\
         show call arr.index_of(xs, \"3\")",
    );
    assert_eq!(out, "5\nnull\n1\ntrue\nfalse\n0\n2\n2\n0\n-1\n");
}

#[test]
fn includes_treats_nan_as_equal() {
    let out = with_array(
        "import \"math\" as m\n\
         set nan call m.sqrt(- 0 1)\n\
         show call arr.includes([nan], nan)\n\
         show call arr.index_of([nan], nan)",
    );
    assert_eq!(out, "true\n-1\n");
}

#[test]
fn access_helpers() {
    let out = with_array(
        "show call arr.first([])\n\
         show call arr.last([1, 2])\n\
         show call arr.is_empty([])\n\
         show call arr.slice([1, 2, 3], -2)\n\
         show call arr.reverse([1, 2, 3])",
    );
    assert_eq!(out, "null\n2\ntrue\n[2, 3]\n[3, 2, 1]\n");
}

#[test]
fn sort_orders() {
    let out = with_array(
        "set xs [10, 9, 1, 100]\n\
         show call arr.sort(xs)\n\
         show xs\n\
         show call arr.sort([\"b\", \"B\", \"a\"])\n\
         show call arr.sort([2, \"10\", true])",
    );
    assert_eq!(out, "[1, 9, 10, 100]\n[10, 9, 1, 100]\n[B, a, b]\n[10, 2, true]\n");
}

#[test]
fn set_operations_keep_first_occurrence_order() {
    let out = with_array(
        "show call arr.concat([1], [2, 3], [])\n\
         show call arr.unique([1, 2, 1, 3, 2])\n\
         show call arr.intersection([1, 2, 3], [3, 1])\n\
         show call arr.union([1, 2], [2, 3])\n\
         show call arr.difference([1, 2, 3], [2])",
    );
    assert_eq!(out, "[1, 2, 3]\n[1, 2, 3]\n[1, 3]\n[1, 2, 3]\n[1, 3]\n");
}

#[test]
fn containers_compare_by_identity() {
    let out = with_array(
        "set a [1]\n\
         show call arr.unique([a, a, [1]])\n\
         show call arr.includes([[1]], [1])",
    );
    assert_eq!(out, "[[1], [1]]\nfalse\n");
}

#[test]
fn concat_rejects_non_arrays() {
    let err = error("import \"array\" as arr\ncall arr.concat([1], 2)");
    assert_eq!(err.message, "concat() expects an array as argument 2. Got 'number'.");
}
