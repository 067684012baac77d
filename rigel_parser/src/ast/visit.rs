// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Uniform AST navigation.
//!
//! Every node exposes a `kind` string, its ordered child slots (`fields`),
//! its scalar metadata (`attributes`), iteration over `(name, value)` pairs
//! and iteration over child nodes only. Terminal values use the tagged
//! [`AstChild`] representation: a node, a list, a string, a number, a
//! boolean, or null.

use std::borrow::Cow;

use super::*;

/// A field or attribute value.
#[derive(Debug, Clone)]
pub enum AstChild<'a> {
    Node(NodeRef<'a>),
    List(Vec<AstChild<'a>>),
    Str(Cow<'a, str>),
    Num(f64),
    Bool(bool),
    Null,
}

impl<'a> AstChild<'a> {
    fn opt_node(node: Option<NodeRef<'a>>) -> Self {
        match node {
            Some(n) => AstChild::Node(n),
            None => AstChild::Null,
        }
    }

    /// All nodes reachable from this value, depth-first into lists.
    fn collect_nodes(&self, out: &mut Vec<NodeRef<'a>>) {
        match self {
            AstChild::Node(n) => out.push(*n),
            AstChild::List(items) => {
                for item in items {
                    item.collect_nodes(out);
                }
            }
            _ => {}
        }
    }
}

/// A borrowed reference to any AST node.
#[derive(Debug, Clone, Copy)]
pub enum NodeRef<'a> {
    Program(&'a Program),
    Statement(&'a Statement),
    Expression(&'a Expression),
    Function { function: &'a Function, declaration: bool },
    Block(&'a BlockStatement),
    Variable(&'a VariableStatement),
    Declarator(&'a VariableDeclarator),
    Property(&'a Property),
    CaseClause(&'a CaseClause),
    CatchClause(&'a CatchClause),
    Ident(&'a Ident),
}

fn stmts<'a>(body: &'a [Statement]) -> AstChild<'a> {
    AstChild::List(
        body.iter()
            .map(|s| AstChild::Node(NodeRef::Statement(s)))
            .collect(),
    )
}

fn exprs<'a>(list: &'a [Expression]) -> AstChild<'a> {
    AstChild::List(
        list.iter()
            .map(|e| AstChild::Node(NodeRef::Expression(e)))
            .collect(),
    )
}

fn idents<'a>(list: &'a [Ident]) -> AstChild<'a> {
    AstChild::List(
        list.iter()
            .map(|i| AstChild::Node(NodeRef::Ident(i)))
            .collect(),
    )
}

impl<'a> NodeRef<'a> {
    /// The production name, as listed in the grammar.
    pub fn kind(self) -> &'static str {
        match self {
            NodeRef::Program(_) => "Program",
            NodeRef::Function { declaration: true, .. } => "FunctionDeclaration",
            NodeRef::Function { declaration: false, .. } => "FunctionExpression",
            NodeRef::Block(_) => "BlockStatement",
            NodeRef::Variable(_) => "VariableStatement",
            NodeRef::Declarator(_) => "VariableDeclaration",
            NodeRef::Property(_) => "Property",
            NodeRef::CaseClause(_) => "CaseClause",
            NodeRef::CatchClause(_) => "CatchClause",
            NodeRef::Ident(_) => "Identifier",
            NodeRef::Statement(s) => match s {
                Statement::Block(_) => "BlockStatement",
                Statement::Variable(_) => "VariableStatement",
                Statement::Empty(_) => "EmptyStatement",
                Statement::Expression(_) => "ExpressionStatement",
                Statement::If(_) => "IfStatement",
                Statement::DoWhile(_) => "DoWhileStatement",
                Statement::While(_) => "WhileStatement",
                Statement::For(_) => "ForStatement",
                Statement::ForIn(_) => "ForInStatement",
                Statement::Continue(_) => "ContinueStatement",
                Statement::Break(_) => "BreakStatement",
                Statement::Return(_) => "ReturnStatement",
                Statement::With(_) => "WithStatement",
                Statement::Switch(_) => "SwitchStatement",
                Statement::Labeled(_) => "LabeledStatement",
                Statement::Throw(_) => "ThrowStatement",
                Statement::Try(_) => "TryStatement",
                Statement::Debugger(_) => "DebuggerStatement",
                Statement::FunctionDeclaration(_) => "FunctionDeclaration",
            },
            NodeRef::Expression(e) => match e {
                Expression::This(_) => "ThisExpression",
                Expression::Identifier(_) => "Identifier",
                Expression::Literal(_) => "Literal",
                Expression::Array(_) => "ArrayExpression",
                Expression::Object(_) => "ObjectExpression",
                Expression::Function(_) => "FunctionExpression",
                Expression::Member(_) => "MemberExpression",
                Expression::New(_) => "NewExpression",
                Expression::Call(_) => "CallExpression",
                Expression::Update(_) => "UpdateExpression",
                Expression::Unary(_) => "UnaryExpression",
                Expression::Binary(_) => "BinaryExpression",
                Expression::Logical(_) => "LogicalExpression",
                Expression::Assignment(_) => "AssignmentExpression",
                Expression::Conditional(_) => "ConditionalExpression",
                Expression::Sequence(_) => "SequenceExpression",
            },
        }
    }

    /// Ordered child slots: nodes and lists of nodes.
    pub fn fields(self) -> Vec<(&'static str, AstChild<'a>)> {
        match self {
            NodeRef::Program(p) => vec![("body", stmts(&p.body))],
            NodeRef::Function { function, .. } => vec![
                (
                    "id",
                    AstChild::opt_node(function.name.as_ref().map(NodeRef::Ident)),
                ),
                ("params", idents(&function.params)),
                ("body", stmts(&function.body)),
            ],
            NodeRef::Block(b) => vec![("body", stmts(&b.body))],
            NodeRef::Variable(v) => vec![(
                "declarations",
                AstChild::List(
                    v.declarations
                        .iter()
                        .map(|d| AstChild::Node(NodeRef::Declarator(d)))
                        .collect(),
                ),
            )],
            NodeRef::Declarator(d) => vec![
                ("id", AstChild::Node(NodeRef::Ident(&d.id))),
                (
                    "init",
                    AstChild::opt_node(d.init.as_ref().map(NodeRef::Expression)),
                ),
            ],
            NodeRef::Property(p) => {
                vec![("value", AstChild::Node(NodeRef::Expression(&p.value)))]
            }
            NodeRef::CaseClause(c) => vec![
                (
                    "test",
                    AstChild::opt_node(c.test.as_ref().map(NodeRef::Expression)),
                ),
                ("consequent", stmts(&c.body)),
            ],
            NodeRef::CatchClause(c) => vec![
                ("param", AstChild::Node(NodeRef::Ident(&c.param))),
                ("body", AstChild::Node(NodeRef::Block(&c.body))),
            ],
            NodeRef::Ident(_) => vec![],
            NodeRef::Statement(s) => match s {
                Statement::Block(b) => vec![("body", stmts(&b.body))],
                Statement::Variable(v) => vec![(
                    "declarations",
                    AstChild::List(
                        v.declarations
                            .iter()
                            .map(|d| AstChild::Node(NodeRef::Declarator(d)))
                            .collect(),
                    ),
                )],
                Statement::Empty(_) | Statement::Debugger(_) => vec![],
                Statement::Expression(e) => vec![(
                    "expression",
                    AstChild::Node(NodeRef::Expression(&e.expression)),
                )],
                Statement::If(i) => vec![
                    ("test", AstChild::Node(NodeRef::Expression(&i.test))),
                    (
                        "consequent",
                        AstChild::Node(NodeRef::Statement(&i.consequent)),
                    ),
                    (
                        "alternate",
                        AstChild::opt_node(i.alternate.as_ref().map(NodeRef::Statement)),
                    ),
                ],
                Statement::DoWhile(d) => vec![
                    ("body", AstChild::Node(NodeRef::Statement(&d.body))),
                    ("test", AstChild::Node(NodeRef::Expression(&d.test))),
                ],
                Statement::While(w) => vec![
                    ("test", AstChild::Node(NodeRef::Expression(&w.test))),
                    ("body", AstChild::Node(NodeRef::Statement(&w.body))),
                ],
                Statement::For(f) => vec![
                    (
                        "init",
                        match &f.init {
                            Some(ForInit::Variable(v)) => {
                                AstChild::Node(NodeRef::Variable(v))
                            }
                            Some(ForInit::Expression(e)) => {
                                AstChild::Node(NodeRef::Expression(e))
                            }
                            None => AstChild::Null,
                        },
                    ),
                    (
                        "test",
                        AstChild::opt_node(f.test.as_ref().map(NodeRef::Expression)),
                    ),
                    (
                        "update",
                        AstChild::opt_node(f.update.as_ref().map(NodeRef::Expression)),
                    ),
                    ("body", AstChild::Node(NodeRef::Statement(&f.body))),
                ],
                Statement::ForIn(f) => vec![
                    (
                        "left",
                        match &f.left {
                            ForInTarget::Variable(d) => AstChild::Node(NodeRef::Declarator(d)),
                            ForInTarget::Expression(e) => {
                                AstChild::Node(NodeRef::Expression(e))
                            }
                        },
                    ),
                    ("right", AstChild::Node(NodeRef::Expression(&f.right))),
                    ("body", AstChild::Node(NodeRef::Statement(&f.body))),
                ],
                Statement::Continue(c) => vec![(
                    "label",
                    AstChild::opt_node(c.label.as_ref().map(NodeRef::Ident)),
                )],
                Statement::Break(b) => vec![(
                    "label",
                    AstChild::opt_node(b.label.as_ref().map(NodeRef::Ident)),
                )],
                Statement::Return(r) => vec![(
                    "argument",
                    AstChild::opt_node(r.argument.as_ref().map(NodeRef::Expression)),
                )],
                Statement::With(w) => vec![
                    ("object", AstChild::Node(NodeRef::Expression(&w.object))),
                    ("body", AstChild::Node(NodeRef::Statement(&w.body))),
                ],
                Statement::Switch(s) => vec![
                    (
                        "discriminant",
                        AstChild::Node(NodeRef::Expression(&s.discriminant)),
                    ),
                    (
                        "cases",
                        AstChild::List(
                            s.cases
                                .iter()
                                .map(|c| AstChild::Node(NodeRef::CaseClause(c)))
                                .collect(),
                        ),
                    ),
                ],
                Statement::Labeled(l) => vec![
                    ("label", AstChild::Node(NodeRef::Ident(&l.label))),
                    ("body", AstChild::Node(NodeRef::Statement(&l.body))),
                ],
                Statement::Throw(t) => vec![(
                    "argument",
                    AstChild::Node(NodeRef::Expression(&t.argument)),
                )],
                Statement::Try(t) => vec![
                    ("block", AstChild::Node(NodeRef::Block(&t.block))),
                    (
                        "handler",
                        AstChild::opt_node(t.handler.as_ref().map(NodeRef::CatchClause)),
                    ),
                    (
                        "finalizer",
                        AstChild::opt_node(t.finalizer.as_ref().map(NodeRef::Block)),
                    ),
                ],
                Statement::FunctionDeclaration(f) => NodeRef::Function {
                    function: f,
                    declaration: true,
                }
                .fields(),
            },
            NodeRef::Expression(e) => match e {
                Expression::This(_) | Expression::Identifier(_) | Expression::Literal(_) => {
                    vec![]
                }
                Expression::Array(a) => vec![(
                    "elements",
                    AstChild::List(
                        a.elements
                            .iter()
                            .map(|e| {
                                AstChild::opt_node(e.as_ref().map(NodeRef::Expression))
                            })
                            .collect(),
                    ),
                )],
                Expression::Object(o) => vec![(
                    "properties",
                    AstChild::List(
                        o.properties
                            .iter()
                            .map(|p| AstChild::Node(NodeRef::Property(p)))
                            .collect(),
                    ),
                )],
                Expression::Function(f) => NodeRef::Function {
                    function: f,
                    declaration: false,
                }
                .fields(),
                Expression::Member(m) => vec![
                    ("object", AstChild::Node(NodeRef::Expression(&m.object))),
                    (
                        "property",
                        match &m.property {
                            MemberProperty::Static(i) => AstChild::Node(NodeRef::Ident(i)),
                            MemberProperty::Computed(e) => {
                                AstChild::Node(NodeRef::Expression(e))
                            }
                        },
                    ),
                ],
                Expression::New(n) => vec![
                    ("callee", AstChild::Node(NodeRef::Expression(&n.callee))),
                    ("arguments", exprs(&n.arguments)),
                ],
                Expression::Call(c) => vec![
                    ("callee", AstChild::Node(NodeRef::Expression(&c.callee))),
                    ("arguments", exprs(&c.arguments)),
                ],
                Expression::Update(u) => vec![(
                    "argument",
                    AstChild::Node(NodeRef::Expression(&u.argument)),
                )],
                Expression::Unary(u) => vec![(
                    "argument",
                    AstChild::Node(NodeRef::Expression(&u.argument)),
                )],
                Expression::Binary(b) => vec![
                    ("left", AstChild::Node(NodeRef::Expression(&b.left))),
                    ("right", AstChild::Node(NodeRef::Expression(&b.right))),
                ],
                Expression::Logical(l) => vec![
                    ("left", AstChild::Node(NodeRef::Expression(&l.left))),
                    ("right", AstChild::Node(NodeRef::Expression(&l.right))),
                ],
                Expression::Assignment(a) => vec![
                    ("left", AstChild::Node(NodeRef::Expression(&a.target))),
                    ("right", AstChild::Node(NodeRef::Expression(&a.value))),
                ],
                Expression::Conditional(c) => vec![
                    ("test", AstChild::Node(NodeRef::Expression(&c.test))),
                    (
                        "consequent",
                        AstChild::Node(NodeRef::Expression(&c.consequent)),
                    ),
                    (
                        "alternate",
                        AstChild::Node(NodeRef::Expression(&c.alternate)),
                    ),
                ],
                Expression::Sequence(s) => vec![("expressions", exprs(&s.expressions))],
            },
        }
    }

    /// Scalar metadata: names, operators, literal values, flags.
    pub fn attributes(self) -> Vec<(&'static str, AstChild<'a>)> {
        match self {
            NodeRef::Program(p) => vec![("strict", AstChild::Bool(p.strict))],
            NodeRef::Function { function, .. } => {
                vec![("strict", AstChild::Bool(function.strict))]
            }
            NodeRef::Ident(i) => vec![("name", AstChild::Str(Cow::Borrowed(&i.name)))],
            NodeRef::Property(p) => vec![
                (
                    "kind",
                    AstChild::Str(Cow::Borrowed(match p.kind {
                        PropertyKind::Init => "init",
                        PropertyKind::Get => "get",
                        PropertyKind::Set => "set",
                    })),
                ),
                (
                    "key",
                    match &p.key {
                        PropertyKey::Identifier(name) => AstChild::Str(Cow::Borrowed(name)),
                        PropertyKey::String(units) => {
                            AstChild::Str(Cow::Owned(String::from_utf16_lossy(units)))
                        }
                        PropertyKey::Number(n) => AstChild::Num(*n),
                    },
                ),
            ],
            NodeRef::Expression(Expression::Identifier(i)) => {
                vec![("name", AstChild::Str(Cow::Borrowed(&i.name)))]
            }
            NodeRef::Expression(Expression::Literal(l)) => match &l.value {
                LiteralValue::Null => vec![("value", AstChild::Null)],
                LiteralValue::Boolean(b) => vec![("value", AstChild::Bool(*b))],
                LiteralValue::Number(n) => vec![("value", AstChild::Num(*n))],
                LiteralValue::String(units) => vec![(
                    "value",
                    AstChild::Str(Cow::Owned(String::from_utf16_lossy(units))),
                )],
                LiteralValue::Regex { pattern, flags } => vec![
                    ("pattern", AstChild::Str(Cow::Borrowed(pattern))),
                    ("flags", AstChild::Str(Cow::Borrowed(flags))),
                ],
            },
            NodeRef::Expression(Expression::Member(m)) => vec![(
                "computed",
                AstChild::Bool(matches!(m.property, MemberProperty::Computed(_))),
            )],
            NodeRef::Expression(Expression::Update(u)) => vec![
                (
                    "operator",
                    AstChild::Str(Cow::Borrowed(u.operator.as_str())),
                ),
                ("prefix", AstChild::Bool(u.prefix)),
            ],
            NodeRef::Expression(Expression::Unary(u)) => vec![(
                "operator",
                AstChild::Str(Cow::Borrowed(u.operator.as_str())),
            )],
            NodeRef::Expression(Expression::Binary(b)) => vec![(
                "operator",
                AstChild::Str(Cow::Borrowed(b.operator.as_str())),
            )],
            NodeRef::Expression(Expression::Logical(l)) => vec![(
                "operator",
                AstChild::Str(Cow::Borrowed(l.operator.as_str())),
            )],
            NodeRef::Expression(Expression::Assignment(a)) => vec![(
                "operator",
                AstChild::Str(Cow::Borrowed(a.operator.as_str())),
            )],
            NodeRef::Statement(Statement::FunctionDeclaration(f)) => {
                vec![("strict", AstChild::Bool(f.strict))]
            }
            NodeRef::Expression(Expression::Function(f)) => {
                vec![("strict", AstChild::Bool(f.strict))]
            }
            _ => vec![],
        }
    }

    /// `(name, value)` pairs: fields in order, then attributes.
    pub fn entries(self) -> Vec<(&'static str, AstChild<'a>)> {
        let mut entries = self.fields();
        entries.extend(self.attributes());
        entries
    }

    /// Child nodes only, in field order.
    pub fn children(self) -> Vec<NodeRef<'a>> {
        let mut out = Vec::new();
        for (_, value) in self.fields() {
            value.collect_nodes(&mut out);
        }
        out
    }
}
