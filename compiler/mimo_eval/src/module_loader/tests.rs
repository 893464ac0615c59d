use std::rc::Rc;

use pretty_assertions::assert_eq;

use crate::test_support::{run_with_host, MemoryHost, Run};

fn run_files(main: &str, files: &[(&str, &str)]) -> Run {
    let host = files
        .iter()
        .fold(MemoryHost::new(), |host, (path, source)| host.with_file(path, source));
    run_with_host(main, Rc::new(host))
}

fn output_of(run: Run) -> String {
    if let Err(e) = &run.result {
        panic!("program failed: {}", e.format());
    }
    run.output
}

#[test]
fn exported_names_only() {
    let run = run_files(
        "import \"./lib/geometry\" as geo\n\
         show call geo.area(2)\n\
         show geo.PI\n\
         show call keys(geo)",
        &[(
            "/work/lib/geometry.mimo",
            "export const PI 3\nset hidden 1\nexport function area(r)\n  return * PI * r r\nend",
        )],
    );
    assert_eq!(output_of(run), "12\n3\n[PI, area]\n");
}

#[test]
fn without_exports_every_top_level_binding_is_visible() {
    let run = run_files(
        "import util from \"util.mimo\"\nshow util.a\nshow call util.twice(4)",
        &[("/work/util.mimo", "set a 1\nfunction twice(x)\n  return * x 2\nend")],
    );
    assert_eq!(output_of(run), "1\n8\n");
}

#[test]
fn modules_run_once_and_share_state() {
    let run = run_files(
        "import \"counter\" as c1\n\
         import \"./counter.mimo\" as c2\n\
         call c1.bump()\n\
         call c2.bump()\n\
         show call c1.current()",
        &[(
            "/work/counter.mimo",
            "show \"loading\"\n\
             set state {n: 0}\n\
             function bump()\n  set state.n + state.n 1\nend\n\
             function current()\n  return state.n\nend",
        )],
    );
    assert_eq!(output_of(run), "loading\n2\n");
}

#[test]
fn nested_imports_resolve_relative_to_importer() {
    let run = run_files(
        "import \"lib/a\" as a\nshow a.value",
        &[
            ("/work/lib/a.mimo", "import \"./b\" as b\nexport set value + b.base 1"),
            ("/work/lib/b.mimo", "export set base 41"),
        ],
    );
    assert_eq!(output_of(run), "42\n");
}

#[test]
fn stdlib_names_never_touch_the_host() {
    let run = run_files(
        "import \"math\" as m\nshow call m.abs(- 0 2)",
        &[("/work/math.mimo", "export set abs 0")],
    );
    assert_eq!(output_of(run), "2\n");
}

#[test]
fn missing_module_lists_tried_paths() {
    let Err(err) = run_files("import \"nope\" as n", &[]).result else {
        panic!("import must fail");
    };
    assert_eq!(err.code, "MOD001");
    assert_eq!(
        err.message,
        "Module 'nope' not found. Tried paths:\n  - /work/nope\n  - /work/nope.mimo"
    );
    assert_eq!(err.location.line, 1);
}

#[test]
fn circular_imports_are_detected() {
    let Err(err) = run_files(
        "import \"a\" as a",
        &[
            ("/work/a.mimo", "import \"b\" as b\nexport set x 1"),
            ("/work/b.mimo", "import \"a\" as a\nexport set y 2"),
        ],
    )
    .result
    else {
        panic!("cycle must fail");
    };
    assert_eq!(err.code, "MOD003");
    assert_eq!(
        err.message,
        "Circular module dependency detected: /work/a.mimo -> /work/b.mimo -> /work/a.mimo."
    );
}

#[test]
fn unknown_member_suggests_available_names() {
    let Err(err) = run_files(
        "import \"lib\" as lib\ncall lib.valeu()",
        &[("/work/lib.mimo", "export function value()\n  return 1\nend")],
    )
    .result
    else {
        panic!("missing member must fail");
    };
    assert_eq!(err.code, "MOD002");
    assert_eq!(err.message, "Property 'valeu' not found in module 'lib'.");
}

#[test]
fn errors_inside_modules_quote_module_source() {
    let Err(err) = run_files(
        "import \"bad\" as bad",
        &[("/work/bad.mimo", "set x 1\nshow / x 0")],
    )
    .result
    else {
        panic!("module error must propagate");
    };
    assert_eq!(err.code, "MATH001");
    assert_eq!(&*err.location.file, "/work/bad.mimo");
    assert_eq!(err.snippet.as_deref(), Some("show / x 0"));
}

#[test]
fn syntax_errors_in_modules_propagate() {
    let Err(err) = run_files("import \"broken\" as b", &[("/work/broken.mimo", "set x [1, 2")]).result
    else {
        panic!("syntax error must propagate");
    };
    assert_eq!(err.code, "SYN012");
}
