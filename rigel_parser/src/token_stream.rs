// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! One-token lookahead buffer over the [`Lexer`], plus the pending
//! line-terminator bit that automatic semicolon insertion consumes.
//!
//! Tokens are buffered under the default `InputElementDiv` goal. When the
//! parser discovers a regex context, the buffered `/` or `/=` token is
//! invalidated and handed back to the lexer for re-scanning.

use crate::error::LexError;
use crate::lexer::{Lexer, LexResult};
use crate::token::{Punctuator, Token, TokenKind, TokenValue};

#[derive(Debug)]
pub struct TokenStream<'s> {
    lexer: Lexer<'s>,
    buffered: Option<Token>,
}

impl<'s> TokenStream<'s> {
    pub fn new(lexer: Lexer<'s>) -> Self {
        Self {
            lexer,
            buffered: None,
        }
    }

    pub fn source(&self) -> &'s str {
        self.lexer.source()
    }

    fn fill(&mut self) -> Result<(), LexError> {
        if self.buffered.is_none() {
            self.buffered = Some(self.lexer.next()?);
        }
        Ok(())
    }

    /// The next token, without consuming it.
    pub fn peek(&mut self) -> LexResult<&Token> {
        self.fill()?;
        Ok(self.buffered.as_ref().unwrap())
    }

    /// Consume and return the next token.
    pub fn next(&mut self) -> LexResult<Token> {
        self.fill()?;
        Ok(self.buffered.take().unwrap())
    }

    /// Consume the next token if it is the given punctuator.
    pub fn eat(&mut self, p: Punctuator) -> LexResult<bool> {
        if self.peek()?.is_punctuator(p) {
            self.buffered = None;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Whether a line terminator was skipped before the next token.
    pub fn line_terminator_before_next(&mut self) -> LexResult<bool> {
        Ok(self.peek()?.preceded_by_line_terminator)
    }

    /// Re-lex a buffered `/` or `/=` under the `InputElementRegExp` goal.
    ///
    /// Returns the RegularExpressionLiteral token and leaves the lookahead
    /// empty. Panics if the lookahead is not a division punctuator; the
    /// parser only calls this at a primary-expression position after
    /// peeking one.
    pub fn rescan_regex(&mut self) -> LexResult<Token> {
        let buffered = self
            .buffered
            .take()
            .expect("rescan_regex called without a buffered token");
        debug_assert!(matches!(
            buffered.kind,
            TokenKind::Punctuator(Punctuator::Div | Punctuator::DivAssign)
        ));
        self.lexer.rescan_as_regex(&buffered)
    }

    /// The decoded semantic value of the next token, without consuming it.
    pub fn peek_value(&mut self) -> LexResult<&TokenValue> {
        self.fill()?;
        Ok(&self.buffered.as_ref().unwrap().value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenKind;

    #[test]
    fn lookahead_does_not_consume() {
        let mut stream = TokenStream::new(Lexer::new("a b"));
        assert_eq!(stream.peek().unwrap().kind, TokenKind::Identifier);
        assert_eq!(stream.peek().unwrap().span.start_offset, 0);
        let first = stream.next().unwrap();
        assert_eq!(first.span.start_offset, 0);
        assert_eq!(stream.next().unwrap().span.start_offset, 2);
    }

    #[test]
    fn rescan_invalidates_buffer() {
        let mut stream = TokenStream::new(Lexer::new("/x/g"));
        assert!(stream.peek().unwrap().is_punctuator(Punctuator::Div));
        let regex = stream.rescan_regex().unwrap();
        assert_eq!(regex.kind, TokenKind::RegularExpressionLiteral);
        assert!(stream.next().unwrap().is_eof());
    }
}
