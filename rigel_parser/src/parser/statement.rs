// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Statement productions ([§12](https://262.ecma-international.org/5.1/#sec-12)).

use super::{Label, Parser};
use crate::ast::*;
use crate::error::ParseError;
use crate::source::Span;
use crate::token::{Keyword, Punctuator, Token, TokenKind, TokenValue};

impl<'s> Parser<'s> {
    /// SourceElement :: Statement | FunctionDeclaration
    pub(super) fn parse_source_element(&mut self) -> Result<Statement, ParseError> {
        if self.peek()?.is_keyword(Keyword::Function) {
            self.parse_function_declaration()
        } else {
            self.parse_statement()
        }
    }

    pub(super) fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        self.parse_statement_inner(Vec::new())
    }

    /// Parses one statement. `pending` carries label names already consumed
    /// for this statement; they join the active label set around the
    /// terminal (non-label) statement so `break`/`continue` targets resolve,
    /// and become `continue` targets when that statement is a loop.
    fn parse_statement_inner(&mut self, pending: Vec<Ident>) -> Result<Statement, ParseError> {
        let token = self.peek()?.clone();
        let is_iteration = matches!(
            token.kind,
            TokenKind::Keyword(Keyword::Do | Keyword::While | Keyword::For)
        );

        // The expression/label path grows `pending` and recurses.
        if token.kind == TokenKind::Identifier {
            return self.parse_expression_or_labeled(pending);
        }

        let depth = self.labels.len();
        for label in &pending {
            self.labels.push(Label {
                name: label.name.clone(),
                iteration: is_iteration,
            });
        }
        let result = self.parse_unlabeled_statement(&token, !pending.is_empty());
        self.labels.truncate(depth);
        let mut statement = result?;
        for label in pending.into_iter().rev() {
            let span = Span::between(label.span, statement.span());
            statement = Statement::Labeled(Box::new(LabeledStatement {
                label,
                body: statement,
                span,
            }));
        }
        Ok(statement)
    }

    fn parse_unlabeled_statement(
        &mut self,
        token: &Token,
        labeled: bool,
    ) -> Result<Statement, ParseError> {
        match token.kind {
            TokenKind::Punctuator(Punctuator::OpenBrace) => self.parse_block_statement(),
            TokenKind::Punctuator(Punctuator::Semicolon) => {
                let token = self.next()?;
                Ok(Statement::Empty(token.span))
            }
            TokenKind::Keyword(Keyword::Var) => {
                let statement = self.parse_variable_statement(true)?;
                self.expect_semicolon()?;
                Ok(Statement::Variable(statement))
            }
            TokenKind::Keyword(Keyword::If) => self.parse_if_statement(),
            TokenKind::Keyword(Keyword::Do) => self.parse_do_while_statement(),
            TokenKind::Keyword(Keyword::While) => self.parse_while_statement(),
            TokenKind::Keyword(Keyword::For) => self.parse_for_statement(),
            TokenKind::Keyword(Keyword::Continue) => self.parse_continue_statement(),
            TokenKind::Keyword(Keyword::Break) => self.parse_break_statement(),
            TokenKind::Keyword(Keyword::Return) => self.parse_return_statement(),
            TokenKind::Keyword(Keyword::With) => self.parse_with_statement(),
            TokenKind::Keyword(Keyword::Switch) => self.parse_switch_statement(),
            TokenKind::Keyword(Keyword::Throw) => self.parse_throw_statement(),
            TokenKind::Keyword(Keyword::Try) => self.parse_try_statement(),
            TokenKind::Keyword(Keyword::Debugger) => {
                let token = self.next()?;
                self.expect_semicolon()?;
                Ok(Statement::Debugger(token.span))
            }
            TokenKind::Keyword(Keyword::Function) => {
                // FunctionDeclaration is a SourceElement, not a Statement;
                // engines accept it in statement position, but a label on it
                // has no defined semantics.
                if labeled {
                    return Err(self.error_at(
                        token.span.start,
                        "a function declaration may not be labelled",
                    ));
                }
                self.parse_function_declaration()
            }
            _ => self.parse_expression_statement(),
        }
    }

    /// Disambiguates `identifier :` (LabelledStatement) from an expression
    /// statement that happens to start with an identifier, within the
    /// single-token lookahead: the expression is parsed first, and a lone
    /// identifier followed by `:` re-shapes into a label.
    fn parse_expression_or_labeled(
        &mut self,
        mut pending: Vec<Ident>,
    ) -> Result<Statement, ParseError> {
        let expression = self.parse_expression(true)?;
        if let Expression::Identifier(id) = &expression {
            if self.eat(Punctuator::Colon)? {
                if self.labels.iter().any(|l| l.name == id.name)
                    || pending.iter().any(|l| l.name == id.name)
                {
                    return Err(self.error_at(
                        id.span.start,
                        format!("label '{}' has already been declared", id.name),
                    ));
                }
                pending.push(id.clone());
                return self.parse_statement_inner(pending);
            }
        }
        let span = expression.span();
        self.expect_semicolon()?;
        let mut statement = Statement::Expression(ExpressionStatement { expression, span });
        // Labels on a plain statement are legal; wrap them back on.
        for label in pending.into_iter().rev() {
            let span = Span::between(label.span, statement.span());
            statement = Statement::Labeled(Box::new(LabeledStatement {
                label,
                body: statement,
                span,
            }));
        }
        Ok(statement)
    }

    fn parse_expression_statement(&mut self) -> Result<Statement, ParseError> {
        let expression = self.parse_expression(true)?;
        let span = expression.span();
        self.expect_semicolon()?;
        Ok(Statement::Expression(ExpressionStatement { expression, span }))
    }

    /// ### [12.1 Block](https://262.ecma-international.org/5.1/#sec-12.1)
    pub(super) fn parse_block(&mut self) -> Result<BlockStatement, ParseError> {
        let open = self.expect(Punctuator::OpenBrace)?;
        let mut body = Vec::new();
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
        Ok(BlockStatement {
            body,
            span: Span::between(open.span, close.span),
        })
    }

    fn parse_block_statement(&mut self) -> Result<Statement, ParseError> {
        Ok(Statement::Block(self.parse_block()?))
    }

    /// ### [12.2 Variable Statement](https://262.ecma-international.org/5.1/#sec-12.2)
    ///
    /// The caller supplies `allow_in` to select the NoIn declaration grammar
    /// inside `for` headers; the trailing semicolon is also the caller's.
    pub(super) fn parse_variable_statement(
        &mut self,
        allow_in: bool,
    ) -> Result<VariableStatement, ParseError> {
        let var = self.expect_keyword(Keyword::Var)?;
        let mut declarations = vec![self.parse_variable_declarator(allow_in)?];
        while self.eat(Punctuator::Comma)? {
            declarations.push(self.parse_variable_declarator(allow_in)?);
        }
        let span = Span::between(var.span, declarations.last().unwrap().span);
        Ok(VariableStatement { declarations, span })
    }

    pub(super) fn parse_variable_declarator(
        &mut self,
        allow_in: bool,
    ) -> Result<VariableDeclarator, ParseError> {
        let id = self.parse_binding_identifier()?;
        let init = if self.eat(Punctuator::Assign)? {
            Some(self.parse_assignment_expression(allow_in)?)
        } else {
            None
        };
        let span = match &init {
            Some(expression) => Span::between(id.span, expression.span()),
            None => id.span,
        };
        Ok(VariableDeclarator { id, init, span })
    }

    /// ### [12.5 The if Statement](https://262.ecma-international.org/5.1/#sec-12.5)
    fn parse_if_statement(&mut self) -> Result<Statement, ParseError> {
        let keyword = self.expect_keyword(Keyword::If)?;
        self.expect(Punctuator::OpenParen)?;
        let test = self.parse_expression(true)?;
        self.expect(Punctuator::CloseParen)?;
        let consequent = self.parse_statement()?;
        let alternate = if self.eat_keyword(Keyword::Else)? {
            Some(self.parse_statement()?)
        } else {
            None
        };
        let end = alternate
            .as_ref()
            .map_or_else(|| consequent.span(), |s| s.span());
        Ok(Statement::If(Box::new(IfStatement {
            test,
            consequent,
            alternate,
            span: Span::between(keyword.span, end),
        })))
    }

    /// ### [12.6.1 The do-while Statement](https://262.ecma-international.org/5.1/#sec-12.6.1)
    fn parse_do_while_statement(&mut self) -> Result<Statement, ParseError> {
        let keyword = self.expect_keyword(Keyword::Do)?;
        self.in_iteration += 1;
        let body = self.parse_statement();
        self.in_iteration -= 1;
        let body = body?;
        self.expect_keyword(Keyword::While)?;
        self.expect(Punctuator::OpenParen)?;
        let test = self.parse_expression(true)?;
        let close = self.expect(Punctuator::CloseParen)?;
        // The semicolon after do-while is always insertable.
        self.eat(Punctuator::Semicolon)?;
        Ok(Statement::DoWhile(Box::new(DoWhileStatement {
            body,
            test,
            span: Span::between(keyword.span, close.span),
        })))
    }

    /// ### [12.6.2 The while Statement](https://262.ecma-international.org/5.1/#sec-12.6.2)
    fn parse_while_statement(&mut self) -> Result<Statement, ParseError> {
        let keyword = self.expect_keyword(Keyword::While)?;
        self.expect(Punctuator::OpenParen)?;
        let test = self.parse_expression(true)?;
        self.expect(Punctuator::CloseParen)?;
        self.in_iteration += 1;
        let body = self.parse_statement();
        self.in_iteration -= 1;
        let body = body?;
        let span = Span::between(keyword.span, body.span());
        Ok(Statement::While(Box::new(WhileStatement {
            test,
            body,
            span,
        })))
    }

    /// ### [12.6.3 The for Statement](https://262.ecma-international.org/5.1/#sec-12.6.3),
    /// [12.6.4 The for-in Statement](https://262.ecma-international.org/5.1/#sec-12.6.4)
    ///
    /// The initializer is parsed with the NoIn grammar; if a single
    /// declaration or a LeftHandSideExpression is followed by `in`, the
    /// whole statement re-shapes into for-in.
    fn parse_for_statement(&mut self) -> Result<Statement, ParseError> {
        let keyword = self.expect_keyword(Keyword::For)?;
        self.expect(Punctuator::OpenParen)?;

        let mut init: Option<ForInit> = None;
        let mut for_in_target: Option<ForInTarget> = None;

        if self.peek()?.is_punctuator(Punctuator::Semicolon) {
            // No initializer.
        } else if self.peek()?.is_keyword(Keyword::Var) {
            let var = self.expect_keyword(Keyword::Var)?;
            let first = self.parse_variable_declarator(false)?;
            if self.peek()?.is_keyword(Keyword::In) {
                self.next()?;
                for_in_target = Some(ForInTarget::Variable(first));
            } else {
                let mut declarations = vec![first];
                while self.eat(Punctuator::Comma)? {
                    declarations.push(self.parse_variable_declarator(false)?);
                }
                let span = Span::between(var.span, declarations.last().unwrap().span);
                init = Some(ForInit::Variable(VariableStatement { declarations, span }));
            }
        } else {
            let expression = self.parse_expression(false)?;
            if self.peek()?.is_keyword(Keyword::In) {
                self.next()?;
                if !is_assignment_target(&expression) {
                    return Err(self.error_at(
                        expression.span().start,
                        "invalid left-hand side in for-in",
                    ));
                }
                for_in_target = Some(ForInTarget::Expression(expression));
            } else {
                init = Some(ForInit::Expression(expression));
            }
        }

        if let Some(left) = for_in_target {
            let right = self.parse_expression(true)?;
            self.expect(Punctuator::CloseParen)?;
            self.in_iteration += 1;
            let body = self.parse_statement();
            self.in_iteration -= 1;
            let body = body?;
            let span = Span::between(keyword.span, body.span());
            return Ok(Statement::ForIn(Box::new(ForInStatement {
                left,
                right,
                body,
                span,
            })));
        }

        // Semicolons inside the for header are never inserted; a line break
        // here is a syntax error.
        self.expect(Punctuator::Semicolon)?;
        let test = if self.peek()?.is_punctuator(Punctuator::Semicolon) {
            None
        } else {
            Some(self.parse_expression(true)?)
        };
        self.expect(Punctuator::Semicolon)?;
        let update = if self.peek()?.is_punctuator(Punctuator::CloseParen) {
            None
        } else {
            Some(self.parse_expression(true)?)
        };
        self.expect(Punctuator::CloseParen)?;
        self.in_iteration += 1;
        let body = self.parse_statement();
        self.in_iteration -= 1;
        let body = body?;
        let span = Span::between(keyword.span, body.span());
        Ok(Statement::For(Box::new(ForStatement {
            init,
            test,
            update,
            body,
            span,
        })))
    }

    /// ### [12.7 The continue Statement](https://262.ecma-international.org/5.1/#sec-12.7)
    fn parse_continue_statement(&mut self) -> Result<Statement, ParseError> {
        let keyword = self.expect_keyword(Keyword::Continue)?;
        let label = self.parse_optional_label()?;
        self.expect_semicolon()?;
        match &label {
            None => {
                if self.in_iteration == 0 {
                    return Err(self.error_at(
                        keyword.span.start,
                        "'continue' outside of an iteration statement",
                    ));
                }
            }
            Some(label) => {
                if !self
                    .labels
                    .iter()
                    .any(|l| l.name == label.name && l.iteration)
                {
                    return Err(self.error_at(
                        label.span.start,
                        format!("'continue' label '{}' does not name an enclosing loop", label.name),
                    ));
                }
            }
        }
        let end = label.as_ref().map_or(keyword.span, |l| l.span);
        Ok(Statement::Continue(ContinueStatement {
            label,
            span: Span::between(keyword.span, end),
        }))
    }

    /// ### [12.8 The break Statement](https://262.ecma-international.org/5.1/#sec-12.8)
    fn parse_break_statement(&mut self) -> Result<Statement, ParseError> {
        let keyword = self.expect_keyword(Keyword::Break)?;
        let label = self.parse_optional_label()?;
        self.expect_semicolon()?;
        match &label {
            None => {
                if self.in_iteration == 0 && self.in_switch == 0 {
                    return Err(self.error_at(
                        keyword.span.start,
                        "'break' outside of a loop or switch",
                    ));
                }
            }
            Some(label) => {
                if !self.labels.iter().any(|l| l.name == label.name) {
                    return Err(self.error_at(
                        label.span.start,
                        format!("'break' label '{}' is not defined", label.name),
                    ));
                }
            }
        }
        let end = label.as_ref().map_or(keyword.span, |l| l.span);
        Ok(Statement::Break(BreakStatement {
            label,
            span: Span::between(keyword.span, end),
        }))
    }

    /// The restricted production: `continue`/`break` take a label only when
    /// no line terminator intervenes.
    fn parse_optional_label(&mut self) -> Result<Option<Ident>, ParseError> {
        if self.line_terminator_before_next()? {
            return Ok(None);
        }
        if self.peek()?.kind == TokenKind::Identifier {
            Ok(Some(self.parse_identifier()?))
        } else {
            Ok(None)
        }
    }

    /// ### [12.9 The return Statement](https://262.ecma-international.org/5.1/#sec-12.9)
    fn parse_return_statement(&mut self) -> Result<Statement, ParseError> {
        let keyword = self.expect_keyword(Keyword::Return)?;
        if !self.in_function {
            return Err(self.error_at(keyword.span.start, "'return' outside of a function"));
        }
        let argument = if self.line_terminator_before_next()?
            || self.peek()?.is_punctuator(Punctuator::Semicolon)
            || self.peek()?.is_punctuator(Punctuator::CloseBrace)
            || self.peek()?.is_eof()
        {
            None
        } else {
            Some(self.parse_expression(true)?)
        };
        self.expect_semicolon()?;
        let end = argument.as_ref().map_or(keyword.span, |e| e.span());
        Ok(Statement::Return(ReturnStatement {
            argument,
            span: Span::between(keyword.span, end),
        }))
    }

    /// ### [12.10 The with Statement](https://262.ecma-international.org/5.1/#sec-12.10)
    fn parse_with_statement(&mut self) -> Result<Statement, ParseError> {
        let keyword = self.expect_keyword(Keyword::With)?;
        if self.strict {
            return Err(self.error_at(
                keyword.span.start,
                "'with' statements are not allowed in strict mode",
            ));
        }
        self.expect(Punctuator::OpenParen)?;
        let object = self.parse_expression(true)?;
        self.expect(Punctuator::CloseParen)?;
        let body = self.parse_statement()?;
        let span = Span::between(keyword.span, body.span());
        Ok(Statement::With(Box::new(WithStatement {
            object,
            body,
            span,
        })))
    }

    /// ### [12.11 The switch Statement](https://262.ecma-international.org/5.1/#sec-12.11)
    fn parse_switch_statement(&mut self) -> Result<Statement, ParseError> {
        let keyword = self.expect_keyword(Keyword::Switch)?;
        self.expect(Punctuator::OpenParen)?;
        let discriminant = self.parse_expression(true)?;
        self.expect(Punctuator::CloseParen)?;
        self.expect(Punctuator::OpenBrace)?;
        let mut cases = Vec::new();
        let mut seen_default = false;
        self.in_switch += 1;
        let result: Result<(), ParseError> = (|| {
            loop {
                let token = self.peek()?.clone();
                if token.is_punctuator(Punctuator::CloseBrace) {
                    return Ok(());
                }
                let test = if token.is_keyword(Keyword::Case) {
                    self.next()?;
                    Some(self.parse_expression(true)?)
                } else if token.is_keyword(Keyword::Default) {
                    if seen_default {
                        return Err(self.error_at(
                            token.span.start,
                            "more than one 'default' clause in a switch statement",
                        ));
                    }
                    seen_default = true;
                    self.next()?;
                    None
                } else {
                    return Err(self.unexpected(&token));
                };
                self.expect(Punctuator::Colon)?;
                let mut body = Vec::new();
                loop {
                    let token = self.peek()?;
                    if token.is_punctuator(Punctuator::CloseBrace)
                        || token.is_keyword(Keyword::Case)
                        || token.is_keyword(Keyword::Default)
                    {
                        break;
                    }
                    if token.is_eof() {
                        let token = token.clone();
                        return Err(self.unexpected(&token));
                    }
                    body.push(self.parse_source_element()?);
                }
                let end = body.last().map_or(token.span, |s| s.span());
                cases.push(CaseClause {
                    test,
                    body,
                    span: Span::between(token.span, end),
                });
            }
        })();
        self.in_switch -= 1;
        result?;
        let close = self.expect(Punctuator::CloseBrace)?;
        Ok(Statement::Switch(Box::new(SwitchStatement {
            discriminant,
            cases,
            span: Span::between(keyword.span, close.span),
        })))
    }

    /// ### [12.13 The throw Statement](https://262.ecma-international.org/5.1/#sec-12.13)
    fn parse_throw_statement(&mut self) -> Result<Statement, ParseError> {
        let keyword = self.expect_keyword(Keyword::Throw)?;
        if self.line_terminator_before_next()? {
            return Err(self.error_at(
                keyword.span.start,
                "no line break is allowed between 'throw' and its expression",
            ));
        }
        let argument = self.parse_expression(true)?;
        self.expect_semicolon()?;
        let span = Span::between(keyword.span, argument.span());
        Ok(Statement::Throw(ThrowStatement { argument, span }))
    }

    /// ### [12.14 The try Statement](https://262.ecma-international.org/5.1/#sec-12.14)
    fn parse_try_statement(&mut self) -> Result<Statement, ParseError> {
        let keyword = self.expect_keyword(Keyword::Try)?;
        let block = self.parse_block()?;
        let handler = if self.peek()?.is_keyword(Keyword::Catch) {
            let catch = self.next()?;
            self.expect(Punctuator::OpenParen)?;
            let param = self.parse_binding_identifier()?;
            self.expect(Punctuator::CloseParen)?;
            let body = self.parse_block()?;
            let span = Span::between(catch.span, body.span);
            Some(CatchClause { param, body, span })
        } else {
            None
        };
        let finalizer = if self.eat_keyword(Keyword::Finally)? {
            Some(self.parse_block()?)
        } else {
            None
        };
        if handler.is_none() && finalizer.is_none() {
            return Err(self.error_at(
                keyword.span.start,
                "missing 'catch' or 'finally' after 'try'",
            ));
        }
        let end = finalizer
            .as_ref()
            .map(|b| b.span)
            .or_else(|| handler.as_ref().map(|h| h.span))
            .unwrap();
        Ok(Statement::Try(Box::new(TryStatement {
            block,
            handler,
            finalizer,
            span: Span::between(keyword.span, end),
        })))
    }

    /// An Identifier in binding position: strict-mode reserved words and the
    /// `eval`/`arguments` restriction both apply.
    pub(super) fn parse_binding_identifier(&mut self) -> Result<Ident, ParseError> {
        let id = self.parse_identifier()?;
        self.check_binding_name(&id.name, id.span.start, self.strict)?;
        Ok(id)
    }

    /// A plain Identifier reference.
    pub(super) fn parse_identifier(&mut self) -> Result<Ident, ParseError> {
        let token = self.next()?;
        match (&token.kind, &token.value) {
            (TokenKind::Identifier, TokenValue::Name(name)) => {
                self.check_identifier(name, token.span.start)?;
                Ok(Ident {
                    name: name.as_ref().into(),
                    span: token.span,
                })
            }
            (TokenKind::FutureReservedWord, _) => Err(self.error_at(
                token.span.start,
                format!("unexpected reserved word {}", token.describe()),
            )),
            _ => Err(self.error_at(
                token.span.start,
                format!("expected an identifier but found {}", token.describe()),
            )),
        }
    }
}

/// Is this expression a valid assignment target shape?
pub(super) fn is_assignment_target(expression: &Expression) -> bool {
    matches!(
        expression,
        Expression::Identifier(_) | Expression::Member(_)
    )
}
