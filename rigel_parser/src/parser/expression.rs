// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Expression productions ([§11](https://262.ecma-international.org/5.1/#sec-11)).
//!
//! Binary operators are parsed by precedence climbing over one table; the
//! `in` operator drops out of the table when the NoIn grammar variant is
//! active (`for` statement initializers).

use std::collections::HashMap;

use super::statement::is_assignment_target;
use super::Parser;
use crate::ast::*;
use crate::error::ParseError;
use crate::source::Span;
use crate::token::{Keyword, Punctuator, Token, TokenKind, TokenValue};

enum BinOp {
    Binary(BinaryOperator),
    Logical(LogicalOperator),
}

/// Operator and left binding power for the precedence climb.
fn binary_operator(token: &Token, allow_in: bool) -> Option<(BinOp, u8)> {
    use BinaryOperator::*;
    use Punctuator as P;
    let (op, precedence) = match token.kind {
        TokenKind::Punctuator(P::LogicalOr) => (BinOp::Logical(LogicalOperator::Or), 3),
        TokenKind::Punctuator(P::LogicalAnd) => (BinOp::Logical(LogicalOperator::And), 4),
        TokenKind::Punctuator(P::BitOr) => (BinOp::Binary(BitOr), 5),
        TokenKind::Punctuator(P::BitXor) => (BinOp::Binary(BitXor), 6),
        TokenKind::Punctuator(P::BitAnd) => (BinOp::Binary(BitAnd), 7),
        TokenKind::Punctuator(P::Equal) => (BinOp::Binary(Equal), 8),
        TokenKind::Punctuator(P::NotEqual) => (BinOp::Binary(NotEqual), 8),
        TokenKind::Punctuator(P::StrictEqual) => (BinOp::Binary(StrictEqual), 8),
        TokenKind::Punctuator(P::StrictNotEqual) => (BinOp::Binary(StrictNotEqual), 8),
        TokenKind::Punctuator(P::LessThan) => (BinOp::Binary(LessThan), 9),
        TokenKind::Punctuator(P::GreaterThan) => (BinOp::Binary(GreaterThan), 9),
        TokenKind::Punctuator(P::LessThanOrEqual) => (BinOp::Binary(LessThanOrEqual), 9),
        TokenKind::Punctuator(P::GreaterThanOrEqual) => {
            (BinOp::Binary(GreaterThanOrEqual), 9)
        }
        TokenKind::Keyword(Keyword::InstanceOf) => (BinOp::Binary(InstanceOf), 9),
        TokenKind::Keyword(Keyword::In) if allow_in => (BinOp::Binary(In), 9),
        TokenKind::Punctuator(P::ShiftLeft) => (BinOp::Binary(ShiftLeft), 10),
        TokenKind::Punctuator(P::ShiftRight) => (BinOp::Binary(ShiftRight), 10),
        TokenKind::Punctuator(P::ShiftRightUnsigned) => {
            (BinOp::Binary(ShiftRightUnsigned), 10)
        }
        TokenKind::Punctuator(P::Add) => (BinOp::Binary(Add), 11),
        TokenKind::Punctuator(P::Sub) => (BinOp::Binary(Sub), 11),
        TokenKind::Punctuator(P::Mul) => (BinOp::Binary(Mul), 12),
        TokenKind::Punctuator(P::Div) => (BinOp::Binary(Div), 12),
        TokenKind::Punctuator(P::Mod) => (BinOp::Binary(Mod), 12),
        _ => return None,
    };
    Some((op, precedence))
}

fn assignment_operator(token: &Token) -> Option<AssignmentOperator> {
    use AssignmentOperator::*;
    use Punctuator as P;
    Some(match token.kind {
        TokenKind::Punctuator(P::Assign) => Assign,
        TokenKind::Punctuator(P::AddAssign) => AddAssign,
        TokenKind::Punctuator(P::SubAssign) => SubAssign,
        TokenKind::Punctuator(P::MulAssign) => MulAssign,
        TokenKind::Punctuator(P::DivAssign) => DivAssign,
        TokenKind::Punctuator(P::ModAssign) => ModAssign,
        TokenKind::Punctuator(P::ShiftLeftAssign) => ShiftLeftAssign,
        TokenKind::Punctuator(P::ShiftRightAssign) => ShiftRightAssign,
        TokenKind::Punctuator(P::ShiftRightUnsignedAssign) => ShiftRightUnsignedAssign,
        TokenKind::Punctuator(P::BitAndAssign) => BitAndAssign,
        TokenKind::Punctuator(P::BitOrAssign) => BitOrAssign,
        TokenKind::Punctuator(P::BitXorAssign) => BitXorAssign,
        _ => return None,
    })
}

impl<'s> Parser<'s> {
    /// ### [11.14 Comma Operator](https://262.ecma-international.org/5.1/#sec-11.14)
    pub(super) fn parse_expression(&mut self, allow_in: bool) -> Result<Expression, ParseError> {
        let first = self.parse_assignment_expression(allow_in)?;
        if !self.peek()?.is_punctuator(Punctuator::Comma) {
            return Ok(first);
        }
        let mut expressions = vec![first];
        while self.eat(Punctuator::Comma)? {
            expressions.push(self.parse_assignment_expression(allow_in)?);
        }
        let span = Span::between(
            expressions.first().unwrap().span(),
            expressions.last().unwrap().span(),
        );
        Ok(Expression::Sequence(SequenceExpression { expressions, span }))
    }

    /// ### [11.13 Assignment Operators](https://262.ecma-international.org/5.1/#sec-11.13)
    pub(super) fn parse_assignment_expression(
        &mut self,
        allow_in: bool,
    ) -> Result<Expression, ParseError> {
        let target = self.parse_conditional_expression(allow_in)?;
        let Some(operator) = assignment_operator(self.peek()?) else {
            return Ok(target);
        };
        self.check_assignment_target(&target)?;
        self.next()?;
        let value = self.parse_assignment_expression(allow_in)?;
        let span = Span::between(target.span(), value.span());
        Ok(Expression::Assignment(Box::new(AssignmentExpression {
            operator,
            target,
            value,
            span,
        })))
    }

    /// ### [11.12 Conditional Operator](https://262.ecma-international.org/5.1/#sec-11.12)
    fn parse_conditional_expression(
        &mut self,
        allow_in: bool,
    ) -> Result<Expression, ParseError> {
        let test = self.parse_binary_expression(0, allow_in)?;
        if !self.eat(Punctuator::Question)? {
            return Ok(test);
        }
        // The middle operand always allows `in`.
        let consequent = self.parse_assignment_expression(true)?;
        self.expect(Punctuator::Colon)?;
        let alternate = self.parse_assignment_expression(allow_in)?;
        let span = Span::between(test.span(), alternate.span());
        Ok(Expression::Conditional(Box::new(ConditionalExpression {
            test,
            consequent,
            alternate,
            span,
        })))
    }

    /// ### [11.5–11.11 Binary Operators](https://262.ecma-international.org/5.1/#sec-11.5)
    fn parse_binary_expression(
        &mut self,
        min_precedence: u8,
        allow_in: bool,
    ) -> Result<Expression, ParseError> {
        let mut left = self.parse_unary_expression()?;
        loop {
            let Some((op, precedence)) = binary_operator(self.peek()?, allow_in) else {
                break;
            };
            if precedence < min_precedence {
                break;
            }
            self.next()?;
            let right = self.parse_binary_expression(precedence + 1, allow_in)?;
            let span = Span::between(left.span(), right.span());
            left = match op {
                BinOp::Binary(operator) => Expression::Binary(Box::new(BinaryExpression {
                    operator,
                    left,
                    right,
                    span,
                })),
                BinOp::Logical(operator) => Expression::Logical(Box::new(LogicalExpression {
                    operator,
                    left,
                    right,
                    span,
                })),
            };
        }
        Ok(left)
    }

    /// ### [11.4 Unary Operators](https://262.ecma-international.org/5.1/#sec-11.4)
    fn parse_unary_expression(&mut self) -> Result<Expression, ParseError> {
        let token = self.peek()?.clone();
        let operator = match token.kind {
            TokenKind::Keyword(Keyword::Delete) => Some(UnaryOperator::Delete),
            TokenKind::Keyword(Keyword::Void) => Some(UnaryOperator::Void),
            TokenKind::Keyword(Keyword::TypeOf) => Some(UnaryOperator::TypeOf),
            TokenKind::Punctuator(Punctuator::Add) => Some(UnaryOperator::Plus),
            TokenKind::Punctuator(Punctuator::Sub) => Some(UnaryOperator::Minus),
            TokenKind::Punctuator(Punctuator::BitNot) => Some(UnaryOperator::BitNot),
            TokenKind::Punctuator(Punctuator::Not) => Some(UnaryOperator::Not),
            _ => None,
        };
        if let Some(operator) = operator {
            self.next()?;
            let argument = self.parse_unary_expression()?;
            if operator == UnaryOperator::Delete
                && self.strict
                && matches!(argument, Expression::Identifier(_))
            {
                return Err(self.error_at(
                    token.span.start,
                    "applying 'delete' to a variable name is not allowed in strict mode",
                ));
            }
            let span = Span::between(token.span, argument.span());
            return Ok(Expression::Unary(Box::new(UnaryExpression {
                operator,
                argument,
                span,
            })));
        }
        if let TokenKind::Punctuator(p @ (Punctuator::Increment | Punctuator::Decrement)) =
            token.kind
        {
            self.next()?;
            let argument = self.parse_unary_expression()?;
            self.check_assignment_target(&argument)?;
            let span = Span::between(token.span, argument.span());
            return Ok(Expression::Update(Box::new(UpdateExpression {
                operator: if p == Punctuator::Increment {
                    UpdateOperator::Increment
                } else {
                    UpdateOperator::Decrement
                },
                prefix: true,
                argument,
                span,
            })));
        }
        self.parse_postfix_expression()
    }

    /// ### [11.3 Postfix Expressions](https://262.ecma-international.org/5.1/#sec-11.3)
    ///
    /// The restricted production: no line terminator between the operand and
    /// the operator.
    fn parse_postfix_expression(&mut self) -> Result<Expression, ParseError> {
        let argument = self.parse_left_hand_side_expression()?;
        if self.line_terminator_before_next()? {
            return Ok(argument);
        }
        let token = self.peek()?.clone();
        let operator = match token.kind {
            TokenKind::Punctuator(Punctuator::Increment) => UpdateOperator::Increment,
            TokenKind::Punctuator(Punctuator::Decrement) => UpdateOperator::Decrement,
            _ => return Ok(argument),
        };
        self.check_assignment_target(&argument)?;
        self.next()?;
        let span = Span::between(argument.span(), token.span);
        Ok(Expression::Update(Box::new(UpdateExpression {
            operator,
            prefix: false,
            argument,
            span,
        })))
    }

    /// ### [11.2 Left-Hand-Side Expressions](https://262.ecma-international.org/5.1/#sec-11.2)
    pub(super) fn parse_left_hand_side_expression(&mut self) -> Result<Expression, ParseError> {
        let mut expression = self.parse_member_expression()?;
        loop {
            let token = self.peek()?.clone();
            match token.kind {
                TokenKind::Punctuator(Punctuator::OpenParen) => {
                    let (arguments, close) = self.parse_arguments()?;
                    let span = Span::between(expression.span(), close.span);
                    expression = Expression::Call(Box::new(CallExpression {
                        callee: expression,
                        arguments,
                        span,
                    }));
                }
                TokenKind::Punctuator(Punctuator::Dot) => {
                    self.next()?;
                    let property = self.parse_identifier_name()?;
                    let span = Span::between(expression.span(), property.span);
                    expression = Expression::Member(Box::new(MemberExpression {
                        object: expression,
                        property: MemberProperty::Static(property),
                        span,
                    }));
                }
                TokenKind::Punctuator(Punctuator::OpenBracket) => {
                    self.next()?;
                    let property = self.parse_expression(true)?;
                    let close = self.expect(Punctuator::CloseBracket)?;
                    let span = Span::between(expression.span(), close.span);
                    expression = Expression::Member(Box::new(MemberExpression {
                        object: expression,
                        property: MemberProperty::Computed(property),
                        span,
                    }));
                }
                _ => break,
            }
        }
        Ok(expression)
    }

    /// MemberExpression, including `new` forms. `new X` without an argument
    /// list consumes no call parentheses; `new X()` takes the nearest ones.
    fn parse_member_expression(&mut self) -> Result<Expression, ParseError> {
        let token = self.peek()?.clone();
        let mut expression = if token.is_keyword(Keyword::New) {
            self.next()?;
            let callee = self.parse_member_expression()?;
            let (arguments, end) =
                if self.peek()?.is_punctuator(Punctuator::OpenParen) {
                    let (arguments, close) = self.parse_arguments()?;
                    (arguments, close.span)
                } else {
                    (Vec::new(), callee.span())
                };
            Expression::New(Box::new(NewExpression {
                callee,
                arguments,
                span: Span::between(token.span, end),
            }))
        } else {
            self.parse_primary_expression()?
        };
        loop {
            let token = self.peek()?.clone();
            match token.kind {
                TokenKind::Punctuator(Punctuator::Dot) => {
                    self.next()?;
                    let property = self.parse_identifier_name()?;
                    let span = Span::between(expression.span(), property.span);
                    expression = Expression::Member(Box::new(MemberExpression {
                        object: expression,
                        property: MemberProperty::Static(property),
                        span,
                    }));
                }
                TokenKind::Punctuator(Punctuator::OpenBracket) => {
                    self.next()?;
                    let property = self.parse_expression(true)?;
                    let close = self.expect(Punctuator::CloseBracket)?;
                    let span = Span::between(expression.span(), close.span);
                    expression = Expression::Member(Box::new(MemberExpression {
                        object: expression,
                        property: MemberProperty::Computed(property),
                        span,
                    }));
                }
                _ => break,
            }
        }
        Ok(expression)
    }

    /// Arguments :: `(` AssignmentExpression ( `,` AssignmentExpression )* `)`
    fn parse_arguments(&mut self) -> Result<(Vec<Expression>, Token), ParseError> {
        self.expect(Punctuator::OpenParen)?;
        let mut arguments = Vec::new();
        if !self.peek()?.is_punctuator(Punctuator::CloseParen) {
            loop {
                arguments.push(self.parse_assignment_expression(true)?);
                if !self.eat(Punctuator::Comma)? {
                    break;
                }
            }
        }
        let close = self.expect(Punctuator::CloseParen)?;
        Ok((arguments, close))
    }

    /// ### [11.1 Primary Expressions](https://262.ecma-international.org/5.1/#sec-11.1)
    fn parse_primary_expression(&mut self) -> Result<Expression, ParseError> {
        let token = self.peek()?.clone();
        match token.kind {
            TokenKind::Keyword(Keyword::This) => {
                let token = self.next()?;
                Ok(Expression::This(token.span))
            }
            TokenKind::Keyword(Keyword::Function) => self.parse_function_expression(),
            TokenKind::Identifier => {
                let id = self.parse_identifier()?;
                Ok(Expression::Identifier(id))
            }
            TokenKind::NullLiteral => {
                let token = self.next()?;
                Ok(Expression::Literal(Literal {
                    value: LiteralValue::Null,
                    span: token.span,
                }))
            }
            TokenKind::BooleanLiteral => {
                let token = self.next()?;
                let TokenValue::Boolean(b) = token.value else {
                    unreachable!()
                };
                Ok(Expression::Literal(Literal {
                    value: LiteralValue::Boolean(b),
                    span: token.span,
                }))
            }
            TokenKind::NumericLiteral => {
                self.check_octal(&token)?;
                let token = self.next()?;
                let TokenValue::Number(n) = token.value else {
                    unreachable!()
                };
                Ok(Expression::Literal(Literal {
                    value: LiteralValue::Number(n),
                    span: token.span,
                }))
            }
            TokenKind::StringLiteral => {
                self.check_octal(&token)?;
                let token = self.next()?;
                let TokenValue::String(units) = token.value else {
                    unreachable!()
                };
                Ok(Expression::Literal(Literal {
                    value: LiteralValue::String(units),
                    span: token.span,
                }))
            }
            // A `/` or `/=` in primary position begins a regular expression;
            // the buffered punctuator is handed back for re-scanning.
            TokenKind::Punctuator(Punctuator::Div | Punctuator::DivAssign) => {
                let filename = self.filename.clone();
                let token = self
                    .stream
                    .rescan_regex()
                    .map_err(|e| ParseError::from_lex(e, filename.as_deref()))?;
                let TokenValue::Regex { pattern, flags } = token.value else {
                    unreachable!()
                };
                Ok(Expression::Literal(Literal {
                    value: LiteralValue::Regex {
                        pattern: pattern.as_ref().into(),
                        flags: flags.as_ref().into(),
                    },
                    span: token.span,
                }))
            }
            TokenKind::Punctuator(Punctuator::OpenParen) => {
                self.next()?;
                let expression = self.parse_expression(true)?;
                self.expect(Punctuator::CloseParen)?;
                Ok(expression)
            }
            TokenKind::Punctuator(Punctuator::OpenBracket) => self.parse_array_literal(),
            TokenKind::Punctuator(Punctuator::OpenBrace) => self.parse_object_literal(),
            _ => Err(self.unexpected(&token)),
        }
    }

    /// ### [11.1.4 Array Initialiser](https://262.ecma-international.org/5.1/#sec-11.1.4)
    fn parse_array_literal(&mut self) -> Result<Expression, ParseError> {
        let open = self.expect(Punctuator::OpenBracket)?;
        let mut elements: Vec<Option<Expression>> = Vec::new();
        loop {
            if self.peek()?.is_punctuator(Punctuator::CloseBracket) {
                break;
            }
            if self.eat(Punctuator::Comma)? {
                // Elision.
                elements.push(None);
                continue;
            }
            elements.push(Some(self.parse_assignment_expression(true)?));
            if !self.peek()?.is_punctuator(Punctuator::CloseBracket) {
                self.expect(Punctuator::Comma)?;
            }
        }
        let close = self.expect(Punctuator::CloseBracket)?;
        Ok(Expression::Array(ArrayExpression {
            elements,
            span: Span::between(open.span, close.span),
        }))
    }

    /// ### [11.1.5 Object Initialiser](https://262.ecma-international.org/5.1/#sec-11.1.5)
    fn parse_object_literal(&mut self) -> Result<Expression, ParseError> {
        let open = self.expect(Punctuator::OpenBrace)?;
        let mut properties = Vec::new();
        // Duplicate-name early errors: in strict mode two data properties
        // may not share a name; in any mode data and accessor forms may not
        // mix, and an accessor kind may not repeat.
        let mut seen: HashMap<String, (bool, bool, bool)> = HashMap::new();
        while !self.peek()?.is_punctuator(Punctuator::CloseBrace) {
            let property = self.parse_property_assignment()?;
            let key = canonical_property_name(&property.key);
            let entry = seen.entry(key).or_insert((false, false, false));
            let (had_data, had_get, had_set) = *entry;
            let conflict = match property.kind {
                PropertyKind::Init => (self.strict && had_data) || had_get || had_set,
                PropertyKind::Get => had_data || had_get,
                PropertyKind::Set => had_data || had_set,
            };
            if conflict {
                return Err(self.error_at(
                    property.span.start,
                    "duplicate property name in object literal",
                ));
            }
            match property.kind {
                PropertyKind::Init => entry.0 = true,
                PropertyKind::Get => entry.1 = true,
                PropertyKind::Set => entry.2 = true,
            }
            properties.push(property);
            if !self.eat(Punctuator::Comma)? {
                break;
            }
        }
        let close = self.expect(Punctuator::CloseBrace)?;
        Ok(Expression::Object(ObjectExpression {
            properties,
            span: Span::between(open.span, close.span),
        }))
    }

    fn parse_property_assignment(&mut self) -> Result<Property, ParseError> {
        let token = self.next()?;
        // `get`/`set` name an accessor only when a PropertyName follows.
        if let (TokenKind::Identifier, TokenValue::Name(name)) = (&token.kind, &token.value) {
            if (name.as_ref() == "get" || name.as_ref() == "set")
                && !self.peek()?.is_punctuator(Punctuator::Colon)
                && !self.peek()?.is_punctuator(Punctuator::Comma)
                && !self.peek()?.is_punctuator(Punctuator::CloseBrace)
            {
                let kind = if name.as_ref() == "get" {
                    PropertyKind::Get
                } else {
                    PropertyKind::Set
                };
                return self.parse_accessor_property(kind, token.span);
            }
        }
        let key = self.property_name(&token)?;
        self.expect(Punctuator::Colon)?;
        let value = self.parse_assignment_expression(true)?;
        let span = Span::between(token.span, value.span());
        Ok(Property {
            kind: PropertyKind::Init,
            key,
            value,
            span,
        })
    }

    fn parse_accessor_property(
        &mut self,
        kind: PropertyKind,
        start: Span,
    ) -> Result<Property, ParseError> {
        let key_token = self.next()?;
        let key = self.property_name(&key_token)?;
        let function = self.parse_accessor_function(kind == PropertyKind::Get, start)?;
        let span = Span::between(start, function.span());
        Ok(Property {
            kind,
            key,
            value: function,
            span,
        })
    }

    /// PropertyName :: IdentifierName | StringLiteral | NumericLiteral
    fn property_name(&mut self, token: &Token) -> Result<PropertyKey, ParseError> {
        match (&token.kind, &token.value) {
            (TokenKind::Identifier | TokenKind::FutureReservedWord, TokenValue::Name(name)) => {
                Ok(PropertyKey::Identifier(name.as_ref().into()))
            }
            (TokenKind::Keyword(k), _) => Ok(PropertyKey::Identifier(k.as_str().into())),
            (TokenKind::NullLiteral, _) => Ok(PropertyKey::Identifier("null".into())),
            (TokenKind::BooleanLiteral, TokenValue::Boolean(b)) => Ok(PropertyKey::Identifier(
                if *b { "true" } else { "false" }.into(),
            )),
            (TokenKind::StringLiteral, TokenValue::String(units)) => {
                self.check_octal(token)?;
                Ok(PropertyKey::String(units.as_ref().into()))
            }
            (TokenKind::NumericLiteral, TokenValue::Number(n)) => {
                self.check_octal(token)?;
                Ok(PropertyKey::Number(*n))
            }
            _ => Err(self.error_at(
                token.span.start,
                format!("expected a property name but found {}", token.describe()),
            )),
        }
    }

    /// IdentifierName after `.`: reserved words are acceptable.
    fn parse_identifier_name(&mut self) -> Result<Ident, ParseError> {
        let token = self.next()?;
        let name: std::rc::Rc<str> = match (&token.kind, &token.value) {
            (TokenKind::Identifier | TokenKind::FutureReservedWord, TokenValue::Name(name)) => {
                name.as_ref().into()
            }
            (TokenKind::Keyword(k), _) => k.as_str().into(),
            (TokenKind::NullLiteral, _) => "null".into(),
            (TokenKind::BooleanLiteral, TokenValue::Boolean(b)) => {
                if *b { "true" } else { "false" }.into()
            }
            _ => {
                return Err(self.error_at(
                    token.span.start,
                    format!("expected a property name but found {}", token.describe()),
                ));
            }
        };
        Ok(Ident {
            name,
            span: token.span,
        })
    }

    /// Shared validity check for assignment, compound assignment and the
    /// update operators.
    fn check_assignment_target(&self, target: &Expression) -> Result<(), ParseError> {
        if !is_assignment_target(target) {
            return Err(self.error_at(
                target.span().start,
                "invalid left-hand side in assignment",
            ));
        }
        if let Expression::Identifier(id) = target {
            self.check_binding_name(&id.name, id.span.start, self.strict)?;
        }
        Ok(())
    }
}

/// Property names compare by their string value: `{ 1.0: a, "1": b }` is a
/// duplicate.
fn canonical_property_name(key: &PropertyKey) -> String {
    match key {
        PropertyKey::Identifier(name) => name.to_string(),
        PropertyKey::String(units) => String::from_utf16_lossy(units),
        PropertyKey::Number(n) => format!("{n}"),
    }
}
