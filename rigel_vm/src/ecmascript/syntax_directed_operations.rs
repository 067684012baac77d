// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Static walks over parsed code: the declarations that
//! [§10.5 Declaration Binding Instantiation](https://262.ecma-international.org/5.1/#sec-10.5)
//! hoists. The walk descends through statements but never into nested
//! function bodies; those hoist into their own activation.

use std::rc::Rc;

use rigel_parser::ast::{
    CaseClause, ForInTarget, ForInit, Function, Statement,
};

#[derive(Debug, Default)]
pub struct Declarations {
    /// `var`-declared names, in source order, duplicates preserved.
    pub var_names: Vec<Rc<str>>,
    /// Hoisted function declarations, in source order. Declarations inside
    /// blocks hoist to the enclosing activation, the pre-ES6 web behavior.
    pub functions: Vec<Rc<Function>>,
}

pub fn collect_declarations(body: &[Statement]) -> Declarations {
    let mut declarations = Declarations::default();
    collect_from_statements(body, &mut declarations);
    declarations
}

fn collect_from_statements(statements: &[Statement], out: &mut Declarations) {
    for statement in statements {
        collect_from_statement(statement, out);
    }
}

fn collect_from_statement(statement: &Statement, out: &mut Declarations) {
    match statement {
        Statement::Variable(v) => {
            for declarator in &v.declarations {
                out.var_names.push(declarator.id.name.clone());
            }
        }
        Statement::FunctionDeclaration(f) => {
            out.functions.push(f.clone());
        }
        Statement::Block(b) => collect_from_statements(&b.body, out),
        Statement::If(i) => {
            collect_from_statement(&i.consequent, out);
            if let Some(alternate) = &i.alternate {
                collect_from_statement(alternate, out);
            }
        }
        Statement::DoWhile(d) => collect_from_statement(&d.body, out),
        Statement::While(w) => collect_from_statement(&w.body, out),
        Statement::For(f) => {
            if let Some(ForInit::Variable(v)) = &f.init {
                for declarator in &v.declarations {
                    out.var_names.push(declarator.id.name.clone());
                }
            }
            collect_from_statement(&f.body, out);
        }
        Statement::ForIn(f) => {
            if let ForInTarget::Variable(declarator) = &f.left {
                out.var_names.push(declarator.id.name.clone());
            }
            collect_from_statement(&f.body, out);
        }
        Statement::With(w) => collect_from_statement(&w.body, out),
        Statement::Labeled(l) => collect_from_statement(&l.body, out),
        Statement::Switch(s) => {
            for CaseClause { body, .. } in &s.cases {
                collect_from_statements(body, out);
            }
        }
        Statement::Try(t) => {
            collect_from_statements(&t.block.body, out);
            if let Some(handler) = &t.handler {
                collect_from_statements(&handler.body.body, out);
            }
            if let Some(finalizer) = &t.finalizer {
                collect_from_statements(&finalizer.body, out);
            }
        }
        Statement::Empty(_)
        | Statement::Expression(_)
        | Statement::Continue(_)
        | Statement::Break(_)
        | Statement::Return(_)
        | Statement::Throw(_)
        | Statement::Debugger(_) => {}
    }
}
