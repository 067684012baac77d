// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Function forms ([§13](https://262.ecma-international.org/5.1/#sec-13)).
//!
//! A function body opens a fresh parsing context: label sets and
//! iteration/switch nesting do not cross the boundary, strict mode flows in
//! and may additionally be established by the body's own directive
//! prologue. Strict-mode restrictions on the function name and parameters
//! can only be checked after the body is parsed, since the body's prologue
//! decides strictness.

use std::collections::HashSet;
use std::rc::Rc;

use super::{Label, Parser};
use crate::ast::*;
use crate::error::ParseError;
use crate::source::Span;
use crate::token::{is_strict_future_reserved, Keyword, Punctuator};

struct FunctionContext {
    strict: bool,
    in_function: bool,
    in_iteration: u32,
    in_switch: u32,
    labels: Vec<Label>,
}

impl<'s> Parser<'s> {
    /// ### FunctionDeclaration
    pub(super) fn parse_function_declaration(&mut self) -> Result<Statement, ParseError> {
        let function = self.parse_function(true)?;
        Ok(Statement::FunctionDeclaration(function))
    }

    /// ### FunctionExpression
    pub(super) fn parse_function_expression(&mut self) -> Result<Expression, ParseError> {
        let function = self.parse_function(false)?;
        Ok(Expression::Function(function))
    }

    fn parse_function(&mut self, require_name: bool) -> Result<Rc<Function>, ParseError> {
        let keyword = self.expect_keyword(Keyword::Function)?;
        let name = if self.peek()?.is_punctuator(Punctuator::OpenParen) {
            if require_name {
                let token = self.peek()?.clone();
                return Err(self.error_at(
                    token.span.start,
                    "a function declaration requires a name",
                ));
            }
            None
        } else {
            Some(self.parse_identifier()?)
        };

        self.expect(Punctuator::OpenParen)?;
        let mut params = Vec::new();
        if !self.peek()?.is_punctuator(Punctuator::CloseParen) {
            loop {
                params.push(self.parse_identifier()?);
                if !self.eat(Punctuator::Comma)? {
                    break;
                }
            }
        }
        self.expect(Punctuator::CloseParen)?;

        let (body, strict, close) = self.parse_function_body()?;
        self.check_function_names(strict, name.as_ref(), &params)?;

        Ok(Rc::new(Function {
            name,
            params,
            body,
            strict,
            span: Span::between(keyword.span, close),
        }))
    }

    /// A getter or setter in an object initialiser; the parameter shape is
    /// fixed by [§11.1.5](https://262.ecma-international.org/5.1/#sec-11.1.5).
    pub(super) fn parse_accessor_function(
        &mut self,
        is_getter: bool,
        start: Span,
    ) -> Result<Expression, ParseError> {
        let open = self.expect(Punctuator::OpenParen)?;
        let mut params = Vec::new();
        if !self.peek()?.is_punctuator(Punctuator::CloseParen) {
            loop {
                params.push(self.parse_identifier()?);
                if !self.eat(Punctuator::Comma)? {
                    break;
                }
            }
        }
        self.expect(Punctuator::CloseParen)?;
        if is_getter && !params.is_empty() {
            return Err(self.error_at(open.span.start, "a getter must have no parameters"));
        }
        if !is_getter && params.len() != 1 {
            return Err(self.error_at(
                open.span.start,
                "a setter must have exactly one parameter",
            ));
        }

        let (body, strict, close) = self.parse_function_body()?;
        self.check_function_names(strict, None, &params)?;

        Ok(Expression::Function(Rc::new(Function {
            name: None,
            params,
            body,
            strict,
            span: Span::between(start, close),
        })))
    }

    /// `{ FunctionBody }` with a fresh statement context. Returns the body,
    /// its strictness and the closing brace span.
    fn parse_function_body(
        &mut self,
    ) -> Result<(Vec<Statement>, bool, Span), ParseError> {
        self.expect(Punctuator::OpenBrace)?;

        let saved = FunctionContext {
            strict: self.strict,
            in_function: self.in_function,
            in_iteration: self.in_iteration,
            in_switch: self.in_switch,
            labels: std::mem::take(&mut self.labels),
        };
        self.in_function = true;
        self.in_iteration = 0;
        self.in_switch = 0;

        let result: Result<(Vec<Statement>, bool, Span), ParseError> = (|| {
            let mut body = Vec::new();
            let strict = self.parse_directive_prologue(&mut body)?;
            self.strict = strict;
            loop {
                let token = self.peek()?;
                if token.is_punctuator(Punctuator::CloseBrace) {
                    break;
                }
                if token.is_eof() {
                    let token = token.clone();
                    return Err(self.unexpected(&token));
                }
                body.push(self.parse_source_element()?);
            }
            let close = self.expect(Punctuator::CloseBrace)?;
            Ok((body, strict, close.span))
        })();

        self.strict = saved.strict;
        self.in_function = saved.in_function;
        self.in_iteration = saved.in_iteration;
        self.in_switch = saved.in_switch;
        self.labels = saved.labels;
        result
    }

    /// Strict-function name restrictions, applied once the body's final
    /// strictness is known ([§13.1](https://262.ecma-international.org/5.1/#sec-13.1)).
    fn check_function_names(
        &self,
        strict: bool,
        name: Option<&Ident>,
        params: &[Ident],
    ) -> Result<(), ParseError> {
        if !strict {
            return Ok(());
        }
        if let Some(name) = name {
            self.check_strict_name(name)?;
        }
        let mut seen: HashSet<&str> = HashSet::new();
        for param in params {
            self.check_strict_name(param)?;
            if !seen.insert(&param.name) {
                return Err(self.error_at(
                    param.span.start,
                    format!("duplicate parameter name '{}' in strict mode", param.name),
                ));
            }
        }
        Ok(())
    }

    fn check_strict_name(&self, ident: &Ident) -> Result<(), ParseError> {
        self.check_binding_name(&ident.name, ident.span.start, true)?;
        if is_strict_future_reserved(&ident.name) {
            return Err(self.error_at(
                ident.span.start,
                format!("'{}' is a reserved word in strict mode", ident.name),
            ));
        }
        Ok(())
    }
}
