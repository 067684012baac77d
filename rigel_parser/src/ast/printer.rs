// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Source renderer for AST nodes.
//!
//! Emits parseable ES5.1 source. Parenthesization is driven by operator
//! precedence, so reparsing the output reproduces the tree. Bodies of `if`,
//! loops and `with` are braced only when leaving them bare would re-attach a
//! dangling `else` on reparse.

use super::*;

/// Render a Program back to source text.
pub fn to_source(program: &Program) -> String {
    let mut p = Printer::new();
    for statement in &program.body {
        p.statement(statement);
    }
    p.out
}

/// Render a single function (declaration or expression form) to source.
pub fn to_source_function(function: &Function) -> String {
    let mut p = Printer::new();
    p.function(function);
    p.out
}

struct Printer {
    out: String,
    indent: usize,
}

// Precedence levels, tighter binds higher. Mirrors the grammar cascade of
// §11.
const PREC_SEQUENCE: u8 = 0;
const PREC_ASSIGNMENT: u8 = 1;
const PREC_CONDITIONAL: u8 = 2;
const PREC_LOGICAL_OR: u8 = 3;
const PREC_LOGICAL_AND: u8 = 4;
const PREC_BIT_OR: u8 = 5;
const PREC_BIT_XOR: u8 = 6;
const PREC_BIT_AND: u8 = 7;
const PREC_EQUALITY: u8 = 8;
const PREC_RELATIONAL: u8 = 9;
const PREC_SHIFT: u8 = 10;
const PREC_ADDITIVE: u8 = 11;
const PREC_MULTIPLICATIVE: u8 = 12;
const PREC_UNARY: u8 = 13;
const PREC_POSTFIX: u8 = 14;
const PREC_LEFT_HAND_SIDE: u8 = 15;
const PREC_MEMBER: u8 = 17;
const PREC_PRIMARY: u8 = 18;

fn binary_precedence(op: BinaryOperator) -> u8 {
    use BinaryOperator::*;
    match op {
        Mul | Div | Mod => PREC_MULTIPLICATIVE,
        Add | Sub => PREC_ADDITIVE,
        ShiftLeft | ShiftRight | ShiftRightUnsigned => PREC_SHIFT,
        LessThan | GreaterThan | LessThanOrEqual | GreaterThanOrEqual | In | InstanceOf => {
            PREC_RELATIONAL
        }
        Equal | NotEqual | StrictEqual | StrictNotEqual => PREC_EQUALITY,
        BitAnd => PREC_BIT_AND,
        BitXor => PREC_BIT_XOR,
        BitOr => PREC_BIT_OR,
    }
}

fn precedence(expr: &Expression) -> u8 {
    match expr {
        Expression::Sequence(_) => PREC_SEQUENCE,
        Expression::Assignment(_) => PREC_ASSIGNMENT,
        Expression::Conditional(_) => PREC_CONDITIONAL,
        Expression::Logical(l) => match l.operator {
            LogicalOperator::Or => PREC_LOGICAL_OR,
            LogicalOperator::And => PREC_LOGICAL_AND,
        },
        Expression::Binary(b) => binary_precedence(b.operator),
        Expression::Unary(_) => PREC_UNARY,
        Expression::Update(u) => {
            if u.prefix {
                PREC_UNARY
            } else {
                PREC_POSTFIX
            }
        }
        Expression::Call(_) => PREC_LEFT_HAND_SIDE,
        // `new` is always printed with argument parentheses, which makes it
        // bind like a member expression.
        Expression::New(_) => PREC_MEMBER,
        Expression::Member(_) => PREC_MEMBER,
        _ => PREC_PRIMARY,
    }
}

/// Would this expression, printed at the start of a statement, begin with
/// `{` or `function`?
fn needs_statement_parens(expr: &Expression) -> bool {
    match expr {
        Expression::Object(_) | Expression::Function(_) => true,
        Expression::Member(m) => needs_statement_parens(&m.object),
        Expression::Call(c) => needs_statement_parens(&c.callee),
        Expression::Update(u) => !u.prefix && needs_statement_parens(&u.argument),
        Expression::Binary(b) => needs_statement_parens(&b.left),
        Expression::Logical(l) => needs_statement_parens(&l.left),
        Expression::Assignment(a) => needs_statement_parens(&a.target),
        Expression::Conditional(c) => needs_statement_parens(&c.test),
        Expression::Sequence(s) => s
            .expressions
            .first()
            .is_some_and(needs_statement_parens),
        _ => false,
    }
}

/// Does this statement end in an `if` with no `else` (directly or through a
/// chain of unbraced bodies)? A bare body like that would capture a
/// following `else` on reparse.
fn ends_with_open_if(statement: &Statement) -> bool {
    match statement {
        Statement::If(i) => match &i.alternate {
            None => true,
            Some(alt) => ends_with_open_if(alt),
        },
        Statement::While(w) => ends_with_open_if(&w.body),
        Statement::For(f) => ends_with_open_if(&f.body),
        Statement::ForIn(f) => ends_with_open_if(&f.body),
        Statement::With(w) => ends_with_open_if(&w.body),
        Statement::Labeled(l) => ends_with_open_if(&l.body),
        _ => false,
    }
}

impl Printer {
    fn new() -> Self {
        Self {
            out: String::new(),
            indent: 0,
        }
    }

    fn push(&mut self, s: &str) {
        self.out.push_str(s);
    }

    fn newline(&mut self) {
        self.out.push('\n');
        for _ in 0..self.indent {
            self.out.push_str("  ");
        }
    }

    fn statement(&mut self, statement: &Statement) {
        self.newline();
        self.statement_inline(statement);
    }

    fn statement_inline(&mut self, statement: &Statement) {
        match statement {
            Statement::Block(b) => self.block_body(&b.body),
            Statement::Variable(v) => {
                self.variable_statement(v);
                self.push(";");
            }
            Statement::Empty(_) => self.push(";"),
            Statement::Expression(e) => {
                if needs_statement_parens(&e.expression) {
                    self.push("(");
                    self.expression(&e.expression, PREC_SEQUENCE);
                    self.push(")");
                } else {
                    self.expression(&e.expression, PREC_SEQUENCE);
                }
                self.push(";");
            }
            Statement::If(i) => {
                self.push("if (");
                self.expression(&i.test, PREC_SEQUENCE);
                self.push(") ");
                if i.alternate.is_some() && ends_with_open_if(&i.consequent) {
                    // Brace the consequent so the `else` stays ours.
                    self.braced(&i.consequent);
                } else {
                    self.statement_inline(&i.consequent);
                }
                if let Some(alternate) = &i.alternate {
                    self.push(" else ");
                    self.statement_inline(alternate);
                }
            }
            Statement::DoWhile(d) => {
                self.push("do ");
                self.statement_inline(&d.body);
                self.push(" while (");
                self.expression(&d.test, PREC_SEQUENCE);
                self.push(");");
            }
            Statement::While(w) => {
                self.push("while (");
                self.expression(&w.test, PREC_SEQUENCE);
                self.push(") ");
                self.statement_inline(&w.body);
            }
            Statement::For(f) => {
                self.push("for (");
                match &f.init {
                    Some(ForInit::Variable(v)) => self.variable_statement(v),
                    Some(ForInit::Expression(e)) => self.expression(e, PREC_SEQUENCE),
                    None => {}
                }
                self.push("; ");
                if let Some(test) = &f.test {
                    self.expression(test, PREC_SEQUENCE);
                }
                self.push("; ");
                if let Some(update) = &f.update {
                    self.expression(update, PREC_SEQUENCE);
                }
                self.push(") ");
                self.statement_inline(&f.body);
            }
            Statement::ForIn(f) => {
                self.push("for (");
                match &f.left {
                    ForInTarget::Variable(d) => {
                        self.push("var ");
                        self.declarator(d);
                    }
                    ForInTarget::Expression(e) => {
                        self.expression(e, PREC_LEFT_HAND_SIDE)
                    }
                }
                self.push(" in ");
                self.expression(&f.right, PREC_SEQUENCE);
                self.push(") ");
                self.statement_inline(&f.body);
            }
            Statement::Continue(c) => {
                self.push("continue");
                if let Some(label) = &c.label {
                    self.push(" ");
                    self.push(&label.name);
                }
                self.push(";");
            }
            Statement::Break(b) => {
                self.push("break");
                if let Some(label) = &b.label {
                    self.push(" ");
                    self.push(&label.name);
                }
                self.push(";");
            }
            Statement::Return(r) => {
                self.push("return");
                if let Some(argument) = &r.argument {
                    self.push(" ");
                    self.expression(argument, PREC_SEQUENCE);
                }
                self.push(";");
            }
            Statement::With(w) => {
                self.push("with (");
                self.expression(&w.object, PREC_SEQUENCE);
                self.push(") ");
                self.statement_inline(&w.body);
            }
            Statement::Switch(s) => {
                self.push("switch (");
                self.expression(&s.discriminant, PREC_SEQUENCE);
                self.push(") {");
                self.indent += 1;
                for case in &s.cases {
                    self.newline();
                    match &case.test {
                        Some(test) => {
                            self.push("case ");
                            self.expression(test, PREC_SEQUENCE);
                            self.push(":");
                        }
                        None => self.push("default:"),
                    }
                    self.indent += 1;
                    for statement in &case.body {
                        self.statement(statement);
                    }
                    self.indent -= 1;
                }
                self.indent -= 1;
                self.newline();
                self.push("}");
            }
            Statement::Labeled(l) => {
                self.push(&l.label.name);
                self.push(": ");
                self.statement_inline(&l.body);
            }
            Statement::Throw(t) => {
                self.push("throw ");
                self.expression(&t.argument, PREC_SEQUENCE);
                self.push(";");
            }
            Statement::Try(t) => {
                self.push("try ");
                self.block_body(&t.block.body);
                if let Some(handler) = &t.handler {
                    self.push(" catch (");
                    self.push(&handler.param.name);
                    self.push(") ");
                    self.block_body(&handler.body.body);
                }
                if let Some(finalizer) = &t.finalizer {
                    self.push(" finally ");
                    self.block_body(&finalizer.body);
                }
            }
            Statement::Debugger(_) => self.push("debugger;"),
            Statement::FunctionDeclaration(f) => self.function(f),
        }
    }

    fn braced(&mut self, statement: &Statement) {
        self.push("{");
        self.indent += 1;
        self.statement(statement);
        self.indent -= 1;
        self.newline();
        self.push("}");
    }

    fn block_body(&mut self, body: &[Statement]) {
        if body.is_empty() {
            self.push("{}");
            return;
        }
        self.push("{");
        self.indent += 1;
        for statement in body {
            self.statement(statement);
        }
        self.indent -= 1;
        self.newline();
        self.push("}");
    }

    fn variable_statement(&mut self, v: &VariableStatement) {
        self.push("var ");
        for (i, declarator) in v.declarations.iter().enumerate() {
            if i > 0 {
                self.push(", ");
            }
            self.declarator(declarator);
        }
    }

    fn declarator(&mut self, d: &VariableDeclarator) {
        self.push(&d.id.name);
        if let Some(init) = &d.init {
            self.push(" = ");
            self.expression(init, PREC_ASSIGNMENT);
        }
    }

    fn function(&mut self, f: &Function) {
        self.push("function");
        if let Some(name) = &f.name {
            self.push(" ");
            self.push(&name.name);
        }
        self.push("(");
        for (i, param) in f.params.iter().enumerate() {
            if i > 0 {
                self.push(", ");
            }
            self.push(&param.name);
        }
        self.push(") ");
        self.block_body(&f.body);
    }

    fn expression(&mut self, expr: &Expression, min: u8) {
        let own = precedence(expr);
        if own < min {
            self.push("(");
            self.expression_bare(expr);
            self.push(")");
        } else {
            self.expression_bare(expr);
        }
    }

    fn expression_bare(&mut self, expr: &Expression) {
        match expr {
            Expression::This(_) => self.push("this"),
            Expression::Identifier(i) => self.push(&i.name),
            Expression::Literal(l) => self.literal(l),
            Expression::Array(a) => {
                self.push("[");
                for (i, element) in a.elements.iter().enumerate() {
                    if i > 0 {
                        self.push(", ");
                    }
                    if let Some(element) = element {
                        self.expression(element, PREC_ASSIGNMENT);
                    }
                }
                // A trailing elision needs its comma kept: [1,,] has length
                // 3 but prints two commas.
                if a.elements.last().is_some_and(Option::is_none) {
                    self.push(",");
                }
                self.push("]");
            }
            Expression::Object(o) => {
                if o.properties.is_empty() {
                    self.push("{}");
                    return;
                }
                self.push("{");
                for (i, property) in o.properties.iter().enumerate() {
                    if i > 0 {
                        self.push(",");
                    }
                    self.push(" ");
                    self.property(property);
                }
                self.push(" }");
            }
            Expression::Function(f) => self.function(f),
            Expression::Member(m) => {
                self.expression(&m.object, PREC_LEFT_HAND_SIDE);
                match &m.property {
                    MemberProperty::Static(i) => {
                        self.push(".");
                        self.push(&i.name);
                    }
                    MemberProperty::Computed(e) => {
                        self.push("[");
                        self.expression(e, PREC_SEQUENCE);
                        self.push("]");
                    }
                }
            }
            Expression::New(n) => {
                self.push("new ");
                self.expression(&n.callee, PREC_MEMBER);
                self.push("(");
                self.arguments(&n.arguments);
                self.push(")");
            }
            Expression::Call(c) => {
                self.expression(&c.callee, PREC_LEFT_HAND_SIDE);
                self.push("(");
                self.arguments(&c.arguments);
                self.push(")");
            }
            Expression::Update(u) => {
                if u.prefix {
                    self.push(u.operator.as_str());
                    self.expression(&u.argument, PREC_UNARY);
                } else {
                    self.expression(&u.argument, PREC_LEFT_HAND_SIDE);
                    self.push(u.operator.as_str());
                }
            }
            Expression::Unary(u) => {
                let op = u.operator.as_str();
                self.push(op);
                let symbolic = matches!(
                    u.operator,
                    UnaryOperator::Plus
                        | UnaryOperator::Minus
                        | UnaryOperator::Not
                        | UnaryOperator::BitNot
                );
                if !symbolic {
                    self.push(" ");
                } else if starts_with_sign(&u.argument, u.operator) {
                    // Avoid fusing `- -x` into `--x`.
                    self.push(" ");
                }
                self.expression(&u.argument, PREC_UNARY);
            }
            Expression::Binary(b) => {
                let prec = binary_precedence(b.operator);
                self.expression(&b.left, prec);
                self.push(" ");
                self.push(b.operator.as_str());
                self.push(" ");
                self.expression(&b.right, prec + 1);
            }
            Expression::Logical(l) => {
                let prec = precedence(expr);
                self.expression(&l.left, prec);
                self.push(" ");
                self.push(l.operator.as_str());
                self.push(" ");
                self.expression(&l.right, prec + 1);
            }
            Expression::Assignment(a) => {
                self.expression(&a.target, PREC_LEFT_HAND_SIDE);
                self.push(" ");
                self.push(a.operator.as_str());
                self.push(" ");
                self.expression(&a.value, PREC_ASSIGNMENT);
            }
            Expression::Conditional(c) => {
                self.expression(&c.test, PREC_LOGICAL_OR);
                self.push(" ? ");
                self.expression(&c.consequent, PREC_ASSIGNMENT);
                self.push(" : ");
                self.expression(&c.alternate, PREC_ASSIGNMENT);
            }
            Expression::Sequence(s) => {
                for (i, e) in s.expressions.iter().enumerate() {
                    if i > 0 {
                        self.push(", ");
                    }
                    self.expression(e, PREC_ASSIGNMENT);
                }
            }
        }
    }

    fn arguments(&mut self, arguments: &[Expression]) {
        for (i, argument) in arguments.iter().enumerate() {
            if i > 0 {
                self.push(", ");
            }
            self.expression(argument, PREC_ASSIGNMENT);
        }
    }

    fn property(&mut self, property: &Property) {
        match property.kind {
            PropertyKind::Init => {
                self.property_key(&property.key);
                self.push(": ");
                self.expression(&property.value, PREC_ASSIGNMENT);
            }
            PropertyKind::Get | PropertyKind::Set => {
                self.push(if property.kind == PropertyKind::Get {
                    "get "
                } else {
                    "set "
                });
                self.property_key(&property.key);
                let Expression::Function(f) = &property.value else {
                    unreachable!("accessor value is always a function expression");
                };
                self.push("(");
                for (i, param) in f.params.iter().enumerate() {
                    if i > 0 {
                        self.push(", ");
                    }
                    self.push(&param.name);
                }
                self.push(") ");
                self.block_body(&f.body);
            }
        }
    }

    fn property_key(&mut self, key: &PropertyKey) {
        match key {
            PropertyKey::Identifier(name) => self.push(name),
            PropertyKey::String(units) => {
                let quoted = quote_string(units);
                self.push(&quoted);
            }
            PropertyKey::Number(n) => {
                let formatted = format_number(*n);
                self.push(&formatted);
            }
        }
    }

    fn literal(&mut self, literal: &Literal) {
        match &literal.value {
            LiteralValue::Null => self.push("null"),
            LiteralValue::Boolean(true) => self.push("true"),
            LiteralValue::Boolean(false) => self.push("false"),
            LiteralValue::Number(n) => {
                let formatted = format_number(*n);
                self.push(&formatted);
            }
            LiteralValue::String(units) => {
                let quoted = quote_string(units);
                self.push(&quoted);
            }
            LiteralValue::Regex { pattern, flags } => {
                self.push("/");
                self.push(pattern);
                self.push("/");
                self.push(flags);
            }
        }
    }
}

fn starts_with_sign(expr: &Expression, op: UnaryOperator) -> bool {
    match (expr, op) {
        (Expression::Unary(u), UnaryOperator::Minus) => u.operator == UnaryOperator::Minus,
        (Expression::Unary(u), UnaryOperator::Plus) => u.operator == UnaryOperator::Plus,
        (Expression::Update(u), UnaryOperator::Minus) => {
            u.prefix && u.operator == UpdateOperator::Decrement
        }
        (Expression::Update(u), UnaryOperator::Plus) => {
            u.prefix && u.operator == UpdateOperator::Increment
        }
        _ => false,
    }
}

fn format_number(n: f64) -> String {
    // A literal can only overflow to +Infinity (e.g. 1e999); render it as an
    // overflowing literal so it stays a Literal node on reparse.
    if n.is_infinite() {
        "1e999".to_string()
    } else {
        format!("{n}")
    }
}

fn quote_string(units: &[u16]) -> String {
    let mut out = String::from("\"");
    let mut iter = units.iter().copied().peekable();
    while let Some(unit) = iter.next() {
        // Recombine surrogate pairs so astral characters print verbatim.
        if (0xD800..0xDC00).contains(&unit) {
            if let Some(&low) = iter.peek() {
                if (0xDC00..0xE000).contains(&low) {
                    iter.next();
                    let c = char::from_u32(
                        0x10000 + ((unit as u32 - 0xD800) << 10) + (low as u32 - 0xDC00),
                    )
                    .unwrap();
                    out.push(c);
                    continue;
                }
            }
            out.push_str(&format!("\\u{unit:04X}"));
            continue;
        }
        match unit {
            0x0008 => out.push_str("\\b"),
            0x0009 => out.push_str("\\t"),
            0x000A => out.push_str("\\n"),
            0x000B => out.push_str("\\v"),
            0x000C => out.push_str("\\f"),
            0x000D => out.push_str("\\r"),
            0x0022 => out.push_str("\\\""),
            0x005C => out.push_str("\\\\"),
            0x2028 | 0x2029 => out.push_str(&format!("\\u{unit:04X}")),
            u if u < 0x20 || (0xDC00..0xE000).contains(&u) => {
                out.push_str(&format!("\\u{u:04X}"));
            }
            u => match char::from_u32(u as u32) {
                Some(c) => out.push(c),
                None => out.push_str(&format!("\\u{u:04X}")),
            },
        }
    }
    out.push('"');
    out
}
