// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::parse_program;
use crate::ast::printer::to_source;
use crate::ast::*;

fn parse_ok(source: &str) -> Program {
    parse_program(source).unwrap_or_else(|e| panic!("parse of {source:?} failed: {e}"))
}

fn parse_err(source: &str) -> String {
    match parse_program(source) {
        Ok(_) => panic!("parse of {source:?} unexpectedly succeeded"),
        Err(e) => e.message,
    }
}

#[test]
fn empty_program() {
    let program = parse_ok("");
    assert!(program.body.is_empty());
    assert!(!program.strict);
}

#[test]
fn variable_statement_shapes() {
    let program = parse_ok("var a, b = 1, c = b + 1;");
    let Statement::Variable(v) = &program.body[0] else {
        panic!("expected a variable statement");
    };
    assert_eq!(v.declarations.len(), 3);
    assert_eq!(&*v.declarations[0].id.name, "a");
    assert!(v.declarations[0].init.is_none());
    assert!(v.declarations[2].init.is_some());
}

#[test]
fn precedence_shapes() {
    let program = parse_ok("x = 1 + 2 * 3;");
    let Statement::Expression(s) = &program.body[0] else {
        panic!()
    };
    let Expression::Assignment(a) = &s.expression else {
        panic!()
    };
    let Expression::Binary(add) = &a.value else { panic!() };
    assert_eq!(add.operator, BinaryOperator::Add);
    let Expression::Binary(mul) = &add.right else {
        panic!()
    };
    assert_eq!(mul.operator, BinaryOperator::Mul);
}

#[test]
fn assignment_is_right_associative() {
    let program = parse_ok("a = b = c;");
    let Statement::Expression(s) = &program.body[0] else {
        panic!()
    };
    let Expression::Assignment(outer) = &s.expression else {
        panic!()
    };
    assert!(matches!(outer.value, Expression::Assignment(_)));
}

#[test]
fn asi_inserts_at_line_breaks_and_eof() {
    let program = parse_ok("a = 1\nb = 2\nc = 3");
    assert_eq!(program.body.len(), 3);
}

#[test]
fn asi_does_not_split_across_operators() {
    // `a = b + c` followed by a line break then `(d)` continues the
    // expression: no semicolon is inserted before `(`.
    let program = parse_ok("a = b\n(c);");
    assert_eq!(program.body.len(), 1);
}

#[test]
fn asi_restricted_return() {
    let program = parse_ok("function f() { return\n1; }");
    let Statement::FunctionDeclaration(f) = &program.body[0] else {
        panic!()
    };
    let Statement::Return(r) = &f.body[0] else { panic!() };
    assert!(r.argument.is_none());
    // The orphaned `1;` becomes its own statement.
    assert!(matches!(f.body[1], Statement::Expression(_)));
}

#[test]
fn asi_restricted_postfix() {
    // A line terminator before `++` detaches it; `++b` then fails to be a
    // statement on its own only if `b` is missing, so this parses as two
    // statements.
    let program = parse_ok("a\n++b;");
    assert_eq!(program.body.len(), 2);
    assert!(matches!(
        &program.body[1],
        Statement::Expression(ExpressionStatement {
            expression: Expression::Update(_),
            ..
        })
    ));
}

#[test]
fn asi_never_inside_for_header() {
    let message = parse_err("for (a\nb; c) {}");
    assert!(message.contains("expected ';'"), "{message}");
}

#[test]
fn no_newline_after_throw() {
    let message = parse_err("function f() { throw\nnew Error(); }");
    assert!(message.contains("throw"), "{message}");
}

#[test]
fn do_while_semicolon_is_optional() {
    let program = parse_ok("do {} while (0) var x;");
    assert_eq!(program.body.len(), 2);
}

#[test]
fn for_in_disambiguation() {
    let program = parse_ok("for (var k in o) {} for (k in o) {} for (var i = 0; i < 1; i++) {}");
    assert!(matches!(program.body[0], Statement::ForIn(_)));
    assert!(matches!(program.body[1], Statement::ForIn(_)));
    assert!(matches!(program.body[2], Statement::For(_)));
}

#[test]
fn in_operator_allowed_outside_for_header() {
    let program = parse_ok("x = 'a' in o;");
    let Statement::Expression(s) = &program.body[0] else {
        panic!()
    };
    let Expression::Assignment(a) = &s.expression else {
        panic!()
    };
    let Expression::Binary(b) = &a.value else { panic!() };
    assert_eq!(b.operator, BinaryOperator::In);
}

#[test]
fn regex_vs_division() {
    let program = parse_ok("a = b / c; d = /b/g;");
    let Statement::Expression(s) = &program.body[1] else {
        panic!()
    };
    let Expression::Assignment(a) = &s.expression else {
        panic!()
    };
    assert!(matches!(
        &a.value,
        Expression::Literal(Literal {
            value: LiteralValue::Regex { .. },
            ..
        })
    ));
}

#[test]
fn function_forms() {
    let program = parse_ok("function f(a, b) { return a; } var g = function (x) { return x; };");
    assert!(matches!(&program.body[0], Statement::FunctionDeclaration(f) if f.params.len() == 2));
    let Statement::Variable(v) = &program.body[1] else {
        panic!()
    };
    assert!(matches!(
        v.declarations[0].init,
        Some(Expression::Function(_))
    ));
}

#[test]
fn named_function_expression_is_not_a_declaration() {
    let program = parse_ok("(function g() {});");
    assert!(matches!(
        &program.body[0],
        Statement::Expression(ExpressionStatement {
            expression: Expression::Function(_),
            ..
        })
    ));
}

#[test]
fn directive_prologue_sets_strict() {
    assert!(parse_ok("'use strict';").strict);
    assert!(parse_ok("\"use strict\";").strict);
    // An escape disqualifies the directive.
    assert!(!parse_ok("'use \\u0073trict';").strict);
    // A directive after a non-directive statement has no effect.
    assert!(!parse_ok("1; 'use strict';").strict);
    // Other directives may precede it.
    assert!(parse_ok("'other'; 'use strict';").strict);
}

#[test]
fn strict_propagates_into_nested_functions() {
    let program = parse_ok("'use strict'; function f() { function g() {} }");
    let Statement::FunctionDeclaration(f) = &program.body[1] else {
        panic!()
    };
    assert!(f.strict);
    let Statement::FunctionDeclaration(g) = &f.body[0] else {
        panic!()
    };
    assert!(g.strict);
}

#[test]
fn inner_directive_does_not_leak_out() {
    let program = parse_ok("function f() { 'use strict'; } var with_ok = 1;");
    let Statement::FunctionDeclaration(f) = &program.body[0] else {
        panic!()
    };
    assert!(f.strict);
    assert!(!program.strict);
}

#[test]
fn strict_early_errors() {
    parse_err("'use strict'; with (o) {}");
    parse_err("'use strict'; var eval = 1;");
    parse_err("'use strict'; eval = 1;");
    parse_err("'use strict'; arguments++;");
    parse_err("'use strict'; function eval() {}");
    parse_err("'use strict'; function f(a, a) {}");
    parse_err("'use strict'; function f(eval) {}");
    parse_err("'use strict'; delete x;");
    parse_err("'use strict'; var x = 010;");
    parse_err("'use strict'; var s = '\\101';");
    parse_err("'use strict'; var interface = 1;");
    parse_err("function f() { 'use strict'; return 010; }");
    // The same forms are fine in sloppy mode.
    parse_ok("with (o) {} var eval = 1; delete x; var y = 010;");
}

#[test]
fn strict_directive_with_octal_in_prologue() {
    parse_err("'\\101'; 'use strict';");
}

#[test]
fn strict_duplicate_data_properties() {
    parse_err("'use strict'; var o = {a: 1, a: 2};");
    let program = parse_ok("var o = {a: 1, a: 2};");
    let Statement::Variable(v) = &program.body[0] else {
        panic!()
    };
    let Some(Expression::Object(o)) = &v.declarations[0].init else {
        panic!()
    };
    assert_eq!(o.properties.len(), 2);
}

#[test]
fn accessor_conflicts_are_errors_in_any_mode() {
    parse_err("var o = {get a() {}, get a() {}};");
    parse_err("var o = {a: 1, get a() {}};");
    parse_err("var o = {set a(v) {}, a: 1};");
    parse_ok("var o = {get a() {}, set a(v) {}};");
}

#[test]
fn accessor_parameter_counts() {
    parse_err("var o = {get a(x) {}};");
    parse_err("var o = {set a() {}};");
    parse_err("var o = {set a(x, y) {}};");
}

#[test]
fn reserved_words_as_property_names() {
    parse_ok("var o = {if: 1, in: 2, class: 3, null: 4, true: 5}; o.delete; o.new;");
}

#[test]
fn keywords_may_not_be_identifiers() {
    parse_err("var if = 1;");
    parse_err("class;");
}

#[test]
fn labels() {
    parse_ok("outer: for (;;) { inner: for (;;) { continue outer; break inner; } }");
    parse_ok("a: b: for (;;) { continue a; }");
    parse_ok("block: { break block; }");
    parse_err("a: a: ;");
    parse_err("for (;;) { continue missing; }");
    parse_err("break;");
    parse_err("continue;");
    parse_err("x: { continue x; }");
    parse_err("function f() { return; } return;");
}

#[test]
fn switch_statements() {
    let program = parse_ok("switch (x) { case 1: case 2: f(); break; default: g(); }");
    let Statement::Switch(s) = &program.body[0] else {
        panic!()
    };
    assert_eq!(s.cases.len(), 3);
    assert!(s.cases[0].body.is_empty());
    parse_err("switch (x) { default: default: }");
}

#[test]
fn try_requires_catch_or_finally() {
    parse_err("try {}");
    parse_ok("try {} catch (e) {}");
    parse_ok("try {} finally {}");
}

#[test]
fn new_expression_argument_binding() {
    let program = parse_ok("new a.b(c)(d);");
    let Statement::Expression(s) = &program.body[0] else {
        panic!()
    };
    // `new a.b(c)` then called with (d).
    let Expression::Call(call) = &s.expression else {
        panic!()
    };
    assert!(matches!(call.callee, Expression::New(_)));
}

#[test]
fn array_elisions() {
    let program = parse_ok("var a = [, 1, , 2, ];");
    let Statement::Variable(v) = &program.body[0] else {
        panic!()
    };
    let Some(Expression::Array(a)) = &v.declarations[0].init else {
        panic!()
    };
    assert_eq!(a.elements.len(), 4);
    assert!(a.elements[0].is_none());
    assert!(a.elements[2].is_none());
}

#[test]
fn invalid_assignment_targets() {
    parse_err("1 = 2;");
    parse_err("a + b = c;");
    parse_err("++1;");
    parse_err("1--;");
    parse_ok("a.b = 1; a[0] = 2; a = 3;");
}

#[test]
fn parse_error_positions() {
    let error = parse_program("var x = ;").unwrap_err();
    assert_eq!(error.line, 1);
    assert_eq!(error.column, 9);
    let error = parse_program("a;\nb c;").unwrap_err();
    assert_eq!(error.line, 2);
}

// Print → reparse round-trips. Printing normalizes trivia and locations, so
// the printed form must be a fixpoint: parse(print(p)) prints identically.

fn roundtrips(source: &str) {
    let first = parse_ok(source);
    let printed = to_source(&first);
    let second = parse_program(&printed)
        .unwrap_or_else(|e| panic!("reparse of printed source failed: {e}\n{printed}"));
    let reprinted = to_source(&second);
    assert_eq!(printed, reprinted, "printing is not a fixpoint for {source:?}");
}

#[test]
fn print_reparse_roundtrip() {
    roundtrips("var x = 0; for (var i = 0; i < 10; i++) x += i;");
    roundtrips("function f(a, b) { return a * (b + 1); }");
    roundtrips("var o = {a: 1, 'b c': 2, 3: [4, , 5], get d() { return 1; }};");
    roundtrips("a = b = c ? d : e, f && (g || h);");
    roundtrips("x = (1 + 2) * 3; y = -(-z); w = - -z;");
    roundtrips("if (a) if (b) c(); else d();");
    roundtrips("if (a) while (b) if (c) d(); else e(); else f();");
    roundtrips("try { f(); } catch (e) { g(e); } finally { h(); }");
    roundtrips("outer: for (p in o) { continue outer; }");
    roundtrips("({x: 1}); (function () {});");
    roundtrips("switch (x) { case 1: f(); default: g(); }");
    roundtrips("a = b / c; d = /pat[/]tern/gi; e = typeof f;");
    roundtrips("s = 'it\\'s \"quoted\" \\n\\u2028';");
    roundtrips("new a.b(c)(d); void 0; delete o.p; x instanceof y;");
    roundtrips("do f(); while (g());");
}
