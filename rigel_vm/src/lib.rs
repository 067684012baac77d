// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The Rigel virtual machine: an ECMAScript 5.1 runtime.
//!
//! The [`Interpreter`] owns an [`ecmascript::execution::Agent`] — the heap,
//! the realm (global object and intrinsics) and the execution context stack.
//! Interpreter instances are fully independent; there is no process-wide
//! state. Values, objects and environments are arena-allocated behind `Copy`
//! handles and swept when the interpreter is dropped.

pub mod ecmascript;
pub mod engine;
pub mod heap;
mod interpreter;

pub use ecmascript::execution::agent::{HostHooks, JsError, JsResult};
pub use ecmascript::types::Value;
pub use interpreter::Interpreter;
pub use rigel_parser::{parse_file, parse_string, ParseError};
