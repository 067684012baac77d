// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Recursive-descent parser for the ES5.1 grammar.
//!
//! Grammar shape lives in the [`statement`], [`expression`] and [`function`]
//! submodules; this module owns the parser state and the cross-cutting
//! machinery: automatic semicolon insertion
//! ([§7.9](https://262.ecma-international.org/5.1/#sec-7.9)), strict-mode
//! directive prologues ([§14.1](https://262.ecma-international.org/5.1/#sec-14.1))
//! and the early-error bookkeeping (label sets, iteration/switch nesting,
//! function nesting).

mod expression;
mod function;
mod statement;

use std::rc::Rc;

use crate::ast::{Expression, ExpressionStatement, Literal, LiteralValue, Program, Statement};
use crate::error::ParseError;
use crate::lexer::Lexer;
use crate::source::{Position, Span};
use crate::token::{is_strict_future_reserved, Keyword, Punctuator, Token, TokenKind};
use crate::token_stream::TokenStream;

#[derive(Debug, Clone)]
struct Label {
    name: Rc<str>,
    /// Whether the labelled statement is an iteration statement, making the
    /// label a valid `continue` target.
    iteration: bool,
}

#[derive(Debug)]
pub struct Parser<'s> {
    stream: TokenStream<'s>,
    filename: Option<Rc<str>>,
    /// Strict-mode state of the code currently being parsed. Monotone within
    /// a function body: once a directive establishes it, nested bodies
    /// inherit it.
    strict: bool,
    in_function: bool,
    in_iteration: u32,
    in_switch: u32,
    labels: Vec<Label>,
}

impl<'s> Parser<'s> {
    pub fn new(source: &'s str, filename: Option<&str>) -> Self {
        Self {
            stream: TokenStream::new(Lexer::new(source)),
            filename: filename.map(Rc::from),
            strict: false,
            in_function: false,
            in_iteration: 0,
            in_switch: 0,
            labels: Vec::new(),
        }
    }

    /// ### [14 Program](https://262.ecma-international.org/5.1/#sec-14)
    pub fn parse(mut self) -> Result<Program, ParseError> {
        let start = self.peek()?.span;
        let mut body = Vec::new();
        let strict = self.parse_directive_prologue(&mut body)?;
        self.strict = strict;
        while !self.peek()?.is_eof() {
            body.push(self.parse_source_element()?);
        }
        let end = self.peek()?.span;
        Ok(Program {
            body,
            strict,
            span: Span::between(start, end),
        })
    }

    /// Parse a single Statement and require end of input.
    pub fn parse_statement_entry(&mut self) -> Result<Statement, ParseError> {
        let statement = self.parse_statement()?;
        self.expect_eof()?;
        Ok(statement)
    }

    /// Parse a single Expression and require end of input.
    pub fn parse_expression_entry(&mut self) -> Result<Expression, ParseError> {
        let expression = self.parse_expression(true)?;
        self.expect_eof()?;
        Ok(expression)
    }

    /// Parse a single FunctionDeclaration and require end of input.
    pub fn parse_function_declaration_entry(&mut self) -> Result<Statement, ParseError> {
        let token = self.peek()?.clone();
        if !token.is_keyword(Keyword::Function) {
            return Err(self.unexpected(&token));
        }
        let declaration = self.parse_function_declaration()?;
        self.expect_eof()?;
        Ok(declaration)
    }

    fn expect_eof(&mut self) -> Result<(), ParseError> {
        let token = self.peek()?.clone();
        if token.is_eof() {
            Ok(())
        } else {
            Err(self.unexpected(&token))
        }
    }

    // ## Token plumbing.
    //
    // Lexical errors are converted to `ParseError` at this boundary so the
    // grammar code only deals in one error type.

    fn peek(&mut self) -> Result<&Token, ParseError> {
        let filename = self.filename.clone();
        self.stream
            .peek()
            .map_err(|e| ParseError::from_lex(e, filename.as_deref()))
    }

    fn next(&mut self) -> Result<Token, ParseError> {
        let filename = self.filename.clone();
        self.stream
            .next()
            .map_err(|e| ParseError::from_lex(e, filename.as_deref()))
    }

    fn eat(&mut self, p: Punctuator) -> Result<bool, ParseError> {
        let filename = self.filename.clone();
        self.stream
            .eat(p)
            .map_err(|e| ParseError::from_lex(e, filename.as_deref()))
    }

    fn eat_keyword(&mut self, k: Keyword) -> Result<bool, ParseError> {
        if self.peek()?.is_keyword(k) {
            self.next()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn expect(&mut self, p: Punctuator) -> Result<Token, ParseError> {
        let token = self.next()?;
        if token.is_punctuator(p) {
            Ok(token)
        } else {
            Err(self.error_at(
                token.span.start,
                format!("expected '{}' but found {}", p.as_str(), token.describe()),
            ))
        }
    }

    fn expect_keyword(&mut self, k: Keyword) -> Result<Token, ParseError> {
        let token = self.next()?;
        if token.is_keyword(k) {
            Ok(token)
        } else {
            Err(self.error_at(
                token.span.start,
                format!("expected '{}' but found {}", k.as_str(), token.describe()),
            ))
        }
    }

    fn line_terminator_before_next(&mut self) -> Result<bool, ParseError> {
        let filename = self.filename.clone();
        self.stream
            .line_terminator_before_next()
            .map_err(|e| ParseError::from_lex(e, filename.as_deref()))
    }

    /// The raw source text of a span.
    fn raw(&self, span: Span) -> &'s str {
        &self.stream.source()[span.start_offset..span.end_offset]
    }

    fn error_at(&self, position: Position, message: impl Into<String>) -> ParseError {
        ParseError::new(message, self.filename.as_deref(), position)
    }

    fn unexpected(&self, token: &Token) -> ParseError {
        self.error_at(token.span.start, format!("unexpected {}", token.describe()))
    }

    // ## Automatic semicolon insertion
    //
    /// ### [7.9.1 Rules of Automatic Semicolon Insertion](https://262.ecma-international.org/5.1/#sec-7.9.1)
    ///
    /// At a `;`-required point, the semicolon is inserted iff the next token
    /// is `}` or end of input, or a line terminator precedes it.
    fn expect_semicolon(&mut self) -> Result<(), ParseError> {
        if self.eat(Punctuator::Semicolon)? {
            return Ok(());
        }
        let token = self.peek()?;
        if token.is_punctuator(Punctuator::CloseBrace)
            || token.is_eof()
            || token.preceded_by_line_terminator
        {
            return Ok(());
        }
        let token = token.clone();
        Err(self.error_at(
            token.span.start,
            format!("expected ';' but found {}", token.describe()),
        ))
    }

    // ## Directive prologues

    /// ### [14.1 Directive Prologues and the Use Strict Directive](https://262.ecma-international.org/5.1/#sec-14.1)
    ///
    /// Parses the leading run of ExpressionStatements that consist solely of
    /// a StringLiteral, appending them to `out`. Returns whether the body is
    /// strict: either inherited from the surrounding code or established by
    /// a `"use strict"` directive whose lexeme contains no escapes.
    fn parse_directive_prologue(
        &mut self,
        out: &mut Vec<Statement>,
    ) -> Result<bool, ParseError> {
        let mut strict = self.strict;
        // An octal escape inside an earlier directive only becomes an error
        // once a later directive turns on strict mode.
        let mut octal_in_prologue: Option<Position> = None;
        loop {
            let token = self.peek()?;
            if token.kind != TokenKind::StringLiteral {
                break;
            }
            let token_span = token.span;
            let has_octal = token.has_legacy_octal;
            let statement = self.parse_statement()?;
            let directive = matches!(
                &statement,
                Statement::Expression(ExpressionStatement {
                    expression: Expression::Literal(Literal {
                        value: LiteralValue::String(_),
                        span,
                    }),
                    ..
                }) if span.start_offset == token_span.start_offset
                    && span.end_offset == token_span.end_offset
            );
            out.push(statement);
            if !directive {
                break;
            }
            if has_octal && octal_in_prologue.is_none() {
                octal_in_prologue = Some(token_span.start);
            }
            let raw = self.raw(token_span);
            if raw == "\"use strict\"" || raw == "'use strict'" {
                strict = true;
                self.strict = true;
            }
        }
        if strict {
            if let Some(position) = octal_in_prologue {
                return Err(self.error_at(
                    position,
                    "octal escape sequences are not allowed in strict mode",
                ));
            }
        }
        Ok(strict)
    }

    // ## Identifier restrictions

    /// Reject `eval` and `arguments` as a binding name in strict mode code
    /// ([§12.2.1](https://262.ecma-international.org/5.1/#sec-12.2.1)).
    fn check_binding_name(
        &self,
        name: &str,
        position: Position,
        strict: bool,
    ) -> Result<(), ParseError> {
        if strict && (name == "eval" || name == "arguments") {
            return Err(self.error_at(
                position,
                format!("'{name}' may not be bound in strict mode"),
            ));
        }
        Ok(())
    }

    /// Whether an identifier name is usable as an Identifier here, given the
    /// strict-only future reserved words.
    fn check_identifier(&self, name: &str, position: Position) -> Result<(), ParseError> {
        if self.strict && is_strict_future_reserved(name) {
            return Err(self.error_at(
                position,
                format!("'{name}' is a reserved word in strict mode"),
            ));
        }
        Ok(())
    }

    /// Reject legacy octal tokens once strict mode is known.
    fn check_octal(&self, token: &Token) -> Result<(), ParseError> {
        if self.strict && token.has_legacy_octal {
            return Err(self.error_at(
                token.span.start,
                if token.kind == TokenKind::NumericLiteral {
                    "octal literals are not allowed in strict mode"
                } else {
                    "octal escape sequences are not allowed in strict mode"
                },
            ));
        }
        Ok(())
    }
}

/// Convenience used by tests and tools: parse a Program.
pub fn parse_program(source: &str) -> Result<Program, ParseError> {
    Parser::new(source, None).parse()
}

#[cfg(test)]
mod tests;
