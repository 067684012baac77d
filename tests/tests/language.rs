// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end language semantics: statements, closures, completions,
//! strict mode.

use conformance::{eval, eval_bool, eval_number, eval_string, eval_throws, eval_with_console};
use rigel_vm::Value;

#[test]
fn hello_world() {
    assert_eq!(
        eval_string(r#"(function(){ return "Hello World!"; })()"#),
        "Hello World!"
    );
}

#[test]
fn for_loop_accumulates() {
    assert_eq!(
        eval_number("var x = 0; for (var i = 0; i < 10; i++) x += i; x;"),
        45.0
    );
}

#[test]
fn finally_overrides_catch_return() {
    let source = r#"
        function f() {
            try { throw new TypeError("oops"); }
            catch (e) { return e.message; }
            finally { return "fin"; }
        }
        f();
    "#;
    assert_eq!(eval_string(source), "fin");
}

#[test]
fn finally_preserves_normal_outcome() {
    let source = r#"
        function f() {
            try { return "block"; }
            finally { var witness = 1; }
        }
        f();
    "#;
    assert_eq!(eval_string(source), "block");
}

#[test]
fn strict_this_is_undefined() {
    let (_, value) = eval("'use strict'; function f() { return this; } f();");
    assert_eq!(value, Value::Undefined);
}

#[test]
fn sloppy_this_is_the_global_object() {
    assert!(eval_bool("function f() { return this; } f() === this;"));
}

#[test]
fn typeof_never_throws() {
    assert_eq!(eval_string("typeof undeclaredName"), "undefined");
    for (source, expected) in [
        ("typeof undefined", "undefined"),
        ("typeof null", "object"),
        ("typeof true", "boolean"),
        ("typeof 1.5", "number"),
        ("typeof 'x'", "string"),
        ("typeof {}", "object"),
        ("typeof function () {}", "function"),
        ("typeof Math.abs", "function"),
    ] {
        assert_eq!(eval_string(source), expected, "{source}");
    }
}

#[test]
fn unresolved_reference_throws() {
    eval_throws("undeclaredName;", "undeclaredName is not defined");
}

#[test]
fn closures_capture_environments() {
    let source = r#"
        function counter() {
            var n = 0;
            return function () { n += 1; return n; };
        }
        var c = counter();
        c(); c(); c();
    "#;
    assert_eq!(eval_number(source), 3.0);
}

#[test]
fn named_function_expression_sees_itself() {
    let source = r#"
        var f = function fact(n) { return n <= 1 ? 1 : n * fact(n - 1); };
        f(5);
    "#;
    assert_eq!(eval_number(source), 120.0);
    // The name does not leak into the enclosing scope.
    assert_eq!(eval_string("var f = function g() {}; typeof g;"), "undefined");
}

#[test]
fn hoisting() {
    assert_eq!(eval_number("f(); function f() { return 7; }"), 7.0);
    assert_eq!(eval_string("typeof x; var x = 1;"), "undefined");
    // Function declarations hoist over var declarations of the same name.
    assert_eq!(
        eval_string("typeof f; function f() {} var f;"),
        "function"
    );
}

#[test]
fn var_is_function_scoped() {
    let source = r#"
        function f() {
            if (true) { var inner = 1; }
            return inner;
        }
        f();
    "#;
    assert_eq!(eval_number(source), 1.0);
}

#[test]
fn arguments_object() {
    assert_eq!(eval_number("function f() { return arguments.length; } f(1, 2, 3);"), 3.0);
    assert_eq!(eval_number("function f(a) { return arguments[1]; } f(1, 2);"), 2.0);
    assert_eq!(
        eval_number("function f() { return arguments.callee.length; } f();"),
        0.0
    );
    eval_throws(
        "'use strict'; function f() { return arguments.callee; } f();",
        "TypeError",
    );
}

#[test]
fn labeled_break_and_continue() {
    let source = r#"
        var hits = 0;
        outer: for (var i = 0; i < 3; i++) {
            for (var j = 0; j < 3; j++) {
                if (j === 1) continue outer;
                if (i === 2) break outer;
                hits++;
            }
        }
        hits;
    "#;
    assert_eq!(eval_number(source), 2.0);
    assert_eq!(eval_number("block: { break block; 99; } 42;"), 42.0);
}

#[test]
fn switch_fall_through() {
    let source = r#"
        function pick(x) {
            var log = '';
            switch (x) {
                case 1: log += 'a';
                case 2: log += 'b'; break;
                case 3: log += 'c'; break;
                default: log += 'd';
            }
            return log;
        }
        pick(1) + ' ' + pick(2) + ' ' + pick(3) + ' ' + pick(9);
    "#;
    assert_eq!(eval_string(source), "ab b c d");
}

#[test]
fn with_statement_scoping() {
    let source = r#"
        var o = { x: 10 };
        var x = 1;
        var seen;
        with (o) { seen = x; x = 99; }
        seen + ',' + x + ',' + o.x;
    "#;
    assert_eq!(eval_string(source), "10,1,99");
}

#[test]
fn do_while_runs_at_least_once() {
    assert_eq!(eval_number("var n = 0; do { n++; } while (false); n;"), 1.0);
}

#[test]
fn for_in_visits_insertion_order() {
    let source = r#"
        var o = { b: 1, a: 2, c: 3 };
        var keys = [];
        for (var k in o) keys.push(k);
        keys.join(',');
    "#;
    assert_eq!(eval_string(source), "b,a,c");
}

#[test]
fn for_in_skips_deleted_and_shadowed() {
    let source = r#"
        var proto = { a: 1, b: 2 };
        var o = Object.create(proto);
        o.a = 10;
        o.c = 3;
        var keys = [];
        for (var k in o) keys.push(k);
        keys.join(',');
    "#;
    assert_eq!(eval_string(source), "a,c,b");
}

#[test]
fn for_in_over_null_is_empty() {
    assert_eq!(eval_number("var n = 0; for (var k in null) n++; n;"), 0.0);
}

#[test]
fn try_catch_binds_in_fresh_environment() {
    let source = r#"
        var e = 'outer';
        try { throw 'inner'; } catch (e) { var seen = e; }
        e + ',' + seen;
    "#;
    assert_eq!(eval_string(source), "outer,inner");
}

#[test]
fn throw_non_error_values() {
    let (mut interpreter, value) = eval("try { throw 42; } catch (e) { e; }");
    assert_eq!(value, Value::Number(42.0));
    assert!(!interpreter.is_error_value(value));
    let _ = interpreter.to_display_string(value);
}

#[test]
fn uncaught_throw_escapes_as_error_value() {
    let (mut interpreter, value) = eval("null.x;");
    assert!(interpreter.is_error_value(value));
    let rendered = interpreter.to_display_string(value);
    assert!(rendered.contains("TypeError"), "{rendered}");
}

#[test]
fn instanceof_and_prototypes() {
    assert!(eval_bool("function A() {} var a = new A(); a instanceof A;"));
    assert!(eval_bool("new TypeError('x') instanceof Error;"));
    assert!(eval_bool("[] instanceof Array && [] instanceof Object;"));
    assert!(!eval_bool("({}) instanceof Array;"));
    eval_throws("1 instanceof 2;", "TypeError");
}

#[test]
fn constructor_returning_object_wins() {
    let source = r#"
        var stash = { marker: 1 };
        function F() { this.marker = 2; return stash; }
        new F().marker;
    "#;
    assert_eq!(eval_number(source), 1.0);
    assert_eq!(
        eval_number("function G() { this.marker = 2; return 5; } new G().marker;"),
        2.0
    );
}

#[test]
fn new_without_arguments() {
    assert!(eval_bool("function A() {} new A instanceof A;"));
}

#[test]
fn delete_semantics() {
    // Top-level var bindings are non-configurable.
    assert!(!eval_bool("var x = 1; delete x;"));
    assert!(eval_bool("var o = { p: 1 }; delete o.p;"));
    assert!(eval_bool("delete nonexistentGlobal;"));
    assert_eq!(
        eval_string("var o = { p: 1 }; delete o.p; typeof o.p;"),
        "undefined"
    );
}

#[test]
fn global_var_is_a_global_object_property() {
    assert!(eval_bool("var x = 3; this.x === 3;"));
    assert!(eval_bool("y = 4; this.y === 4;"));
}

#[test]
fn assignment_evaluation_order_and_references() {
    eval_throws("'use strict'; missing += 1;", "missing is not defined");
    // Sloppy-mode assignment to an unresolvable name creates a global.
    assert_eq!(eval_number("function f() { ghost = 8; } f(); ghost;"), 8.0);
}

#[test]
fn update_expressions() {
    assert_eq!(eval_number("var i = 5; i++;"), 5.0);
    assert_eq!(eval_number("var i = 5; i++; i;"), 6.0);
    assert_eq!(eval_number("var i = 5; ++i;"), 6.0);
    assert_eq!(eval_number("var o = { n: '3' }; o.n--; o.n;"), 2.0);
}

#[test]
fn logical_operators_short_circuit() {
    assert_eq!(
        eval_number("var calls = 0; function t() { calls++; return true; } false && t(); calls;"),
        0.0
    );
    assert_eq!(eval_number("0 || 7;"), 7.0);
    assert_eq!(eval_string("'' || 'fallback';"), "fallback");
    assert_eq!(eval_number("1 && 2;"), 2.0);
}

#[test]
fn conditional_and_sequence() {
    assert_eq!(eval_number("1 ? 2 : 3;"), 2.0);
    assert_eq!(eval_number("(1, 2, 3);"), 3.0);
}

#[test]
fn call_depth_is_bounded() {
    eval_throws(
        "function f() { return f(); } f();",
        "Maximum call stack size exceeded",
    );
}

#[test]
fn long_statement_lists_do_not_overflow() {
    let mut source = String::from("var total = 0;\n");
    for i in 0..20_000 {
        source.push_str(&format!("total += {};\n", i % 7));
    }
    source.push_str("total;");
    let (_, value) = eval(&source);
    assert!(matches!(value, Value::Number(_)));
}

#[test]
fn console_log_receives_stringified_arguments() {
    let (_, _, lines) = eval_with_console("console.log('x', 1, true, [1, 2], {});");
    assert_eq!(lines, ["x 1 true 1,2 [object Object]"]);
}

#[test]
fn eval_runs_in_global_scope() {
    assert_eq!(eval_number("eval('var q = 6; q * 7')"), 42.0);
    assert_eq!(eval_number("eval('var r = 1;'); r;"), 1.0);
    assert_eq!(eval_number("eval(9);"), 9.0);
    eval_throws("eval('syntax error here');", "SyntaxError");
}

#[test]
fn function_constructor_parses_source() {
    assert_eq!(
        eval_number("var add = new Function('a', 'b', 'return a + b;'); add(2, 3);"),
        5.0
    );
}

#[test]
fn host_function_installation() {
    let mut interpreter = rigel_vm::Interpreter::new();
    interpreter.set_global_function("double", 1, |agent, _this, arguments| {
        let n = match arguments.first() {
            Some(Value::Number(n)) => *n,
            _ => 0.0,
        };
        let _ = agent;
        Ok(Value::Number(n * 2.0))
    });
    let value = interpreter.execute_string("double(21);", None).unwrap();
    assert_eq!(value, Value::Number(42.0));
}
