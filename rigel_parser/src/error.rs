// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::source::Position;

/// Lexical error kinds ([§7](https://262.ecma-international.org/5.1/#sec-7)).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexErrorKind {
    UnterminatedString,
    UnterminatedComment,
    UnterminatedRegex,
    InvalidEscape,
    InvalidNumber,
    UnexpectedChar,
    OctalInStrict,
}

#[derive(Debug, Clone)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub position: Position,
}

impl LexError {
    pub(crate) fn message(&self) -> &'static str {
        match self.kind {
            LexErrorKind::UnterminatedString => "unterminated string literal",
            LexErrorKind::UnterminatedComment => "unterminated block comment",
            LexErrorKind::UnterminatedRegex => "unterminated regular expression literal",
            LexErrorKind::InvalidEscape => "invalid escape sequence",
            LexErrorKind::InvalidNumber => "invalid numeric literal",
            LexErrorKind::UnexpectedChar => "unexpected character",
            LexErrorKind::OctalInStrict => "octal literals are not allowed in strict mode",
        }
    }
}

/// Parse failure, carrying a human-readable message and the source position
/// the parser had reached. Lexical errors are folded into this type so that
/// embedders only ever observe one error shape.
#[derive(Debug, Clone)]
pub struct ParseError {
    pub message: String,
    pub filename: Option<String>,
    pub line: u32,
    pub column: u32,
}

impl ParseError {
    pub(crate) fn new(message: impl Into<String>, filename: Option<&str>, pos: Position) -> Self {
        Self {
            message: message.into(),
            filename: filename.map(str::to_string),
            line: pos.line,
            column: pos.column,
        }
    }

    pub(crate) fn from_lex(error: LexError, filename: Option<&str>) -> Self {
        Self::new(error.message(), filename, error.position)
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.filename {
            Some(name) => write!(f, "{}:{}:{}: {}", name, self.line, self.column, self.message),
            None => write!(f, "{}:{}: {}", self.line, self.column, self.message),
        }
    }
}

impl std::error::Error for ParseError {}
