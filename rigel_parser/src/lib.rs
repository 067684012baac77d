// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Lexer and recursive-descent parser for ECMAScript 5.1, as defined by
//! ECMA-262, 5th Edition.
//!
//! The pipeline is source text → [`source::CodePoints`] → [`lexer::Lexer`] →
//! [`token_stream::TokenStream`] → [`parser::Parser`] → [`ast`] nodes. The
//! lexer implements both lexical goal symbols of [§7](https://262.ecma-international.org/5.1/#sec-7)
//! (`InputElementDiv` and `InputElementRegExp`); the parser selects between
//! them and drives automatic semicolon insertion, strict-mode directive
//! prologues and the ES5.1 early-error checks.

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod source;
pub mod token;
pub mod token_stream;

pub use error::ParseError;
pub use lexer::Lexer;
pub use parser::Parser;
pub use token_stream::TokenStream;

use ast::Program;

/// Parse a complete Program from a string.
pub fn parse_string(source: &str, filename: Option<&str>) -> Result<Program, ParseError> {
    Parser::new(source, filename).parse()
}

/// Parse a complete Program from a file. The file must be UTF-8.
pub fn parse_file(path: &std::path::Path) -> Result<Program, ParseError> {
    let source = std::fs::read_to_string(path).map_err(|e| ParseError {
        message: format!("could not read {}: {e}", path.display()),
        filename: Some(path.display().to_string()),
        line: 0,
        column: 0,
    })?;
    parse_string(&source, Some(&path.display().to_string()))
}
