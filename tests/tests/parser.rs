// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Parser surface: token coverage, ASI, early errors, printing, and the
//! AST navigation contract.

use conformance::parse_fails;
use rigel_parser::ast::printer::to_source;
use rigel_parser::ast::visit::{AstChild, NodeRef};
use rigel_parser::lexer::Lexer;
use rigel_parser::parse_string;
use rigel_parser::token::TokenKind;

#[test]
fn tokens_cover_source_contiguously() {
    let source = "var answer = 40 + /* gap */ 2; // done";
    let mut lexer = Lexer::new(source);
    let mut previous_end = 0usize;
    loop {
        let token = lexer.next().expect("lex error");
        if token.kind == TokenKind::Eof {
            break;
        }
        assert!(token.span.start_offset >= previous_end);
        assert!(token.span.start_offset <= token.span.end_offset);
        // Everything between tokens is whitespace or comments.
        let gap = &source[previous_end..token.span.start_offset];
        assert!(
            gap.chars().all(|c| c.is_whitespace() || "/*gapdone".contains(c)),
            "unexpected gap {gap:?}"
        );
        previous_end = token.span.end_offset;
    }
}

#[test]
fn asi_outside_for_headers_only() {
    assert!(parse_string("a = 1\nb = 2", None).is_ok());
    assert!(parse_string("for (var i = 0\n i < 1; i++) {}", None).is_err());
    assert!(parse_string("for (var i = 0; i < 1\n i++) {}", None).is_err());
}

#[test]
fn early_errors_are_parse_time() {
    parse_fails("'use strict'; var o = {a: 1, a: 2};");
    parse_fails("function f() { break; }");
    parse_fails("return 1;");
    parse_fails("continue;");
    parse_fails("var 1x;");
    parse_fails("if (a) { ");
}

#[test]
fn print_then_reparse_is_structurally_stable() {
    let sources = [
        "var x = 0; for (var i = 0; i < 10; i++) x += i;",
        "function f(a) { return a ? f(a - 1) : 0; }",
        "try { g(); } catch (e) { h(e); } finally { k(); }",
        "var o = {a: [1, 2, {b: 'c'}], get d() { return 1; }};",
        "label: while (x) { if (y) continue label; break; }",
        "a = b / c; d = /e+/gi.test('ee');",
        "s = 'quotes \\' and \\n newlines';",
    ];
    for source in sources {
        let first = parse_string(source, None).expect("first parse");
        let printed = to_source(&first);
        let second = parse_string(&printed, None)
            .unwrap_or_else(|e| panic!("reparse failed for {printed:?}: {e}"));
        assert_eq!(
            printed,
            to_source(&second),
            "printing is not a fixpoint for {source:?}"
        );
    }
}

#[test]
fn ast_navigation_contract() {
    let program = parse_string("var x = 1 + 2; function f(a) { return a; }", None).unwrap();
    let root = NodeRef::Program(&program);
    assert_eq!(root.kind(), "Program");

    // Fields are named, ordered, and walkable.
    let fields = root.fields();
    assert_eq!(fields.len(), 1);
    assert_eq!(fields[0].0, "body");
    let AstChild::List(body) = &fields[0].1 else {
        panic!("body is a list");
    };
    assert_eq!(body.len(), 2);

    let children = root.children();
    assert_eq!(children.len(), 2);
    assert_eq!(children[0].kind(), "VariableStatement");
    assert_eq!(children[1].kind(), "FunctionDeclaration");

    // Scalars appear through attributes.
    let declaration = children[0].children()[0];
    assert_eq!(declaration.kind(), "VariableDeclaration");
    let init = &declaration.fields()[1];
    assert_eq!(init.0, "init");
    let AstChild::Node(init) = &init.1 else {
        panic!("init is present");
    };
    assert_eq!(init.kind(), "BinaryExpression");
    let attributes = init.attributes();
    assert!(attributes
        .iter()
        .any(|(name, value)| *name == "operator" && matches!(value, AstChild::Str(s) if s == "+")));

    // Terminal nodes have no children and expose their values.
    let function = children[1];
    let entries = function.entries();
    assert!(entries.iter().any(|(name, _)| *name == "params"));
    assert!(entries
        .iter()
        .any(|(name, value)| *name == "strict" && matches!(value, AstChild::Bool(false))));
}

#[test]
fn parse_error_reports_position_and_file() {
    let error = parse_string("var x = ;", Some("script.js")).unwrap_err();
    assert_eq!(error.filename.as_deref(), Some("script.js"));
    assert_eq!((error.line, error.column), (1, 9));
    let rendered = error.to_string();
    assert!(rendered.contains("script.js:1:9"), "{rendered}");
}

#[test]
fn parser_entry_points() {
    let mut parser = rigel_parser::Parser::new("1 + 2 * 3", None);
    let expression = parser.parse_expression_entry().unwrap();
    assert!(matches!(
        expression,
        rigel_parser::ast::Expression::Binary(_)
    ));

    let mut parser = rigel_parser::Parser::new("function f() { return 1; }", None);
    assert!(parser.parse_function_declaration_entry().is_ok());

    let mut parser = rigel_parser::Parser::new("if (x) y(); else z();", None);
    assert!(parser.parse_statement_entry().is_ok());
}
