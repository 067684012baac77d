// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::ecmascript::types::{JsString, Value};

/// ### [8.9 The Completion Specification Type](https://262.ecma-international.org/5.1/#sec-8.9)
///
/// The (type, value, target) triple describing how a statement finished.
/// Break and continue carry the statement's value (loops accumulate it) and
/// an optional label target. The throw arm of the triple is the `Err`
/// variant of [`JsResult`](crate::ecmascript::execution::agent::JsResult):
/// statement evaluation returns `JsResult<Completion>`, and `try`/`finally`
/// inspects the whole `Result` before deciding the joined outcome.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Completion {
    Normal(Option<Value>),
    Break(Option<Value>, Option<JsString>),
    Continue(Option<Value>, Option<JsString>),
    Return(Value),
}

impl Completion {
    /// The completion's value, if any.
    pub fn value(self) -> Option<Value> {
        match self {
            Completion::Normal(v) | Completion::Break(v, _) | Completion::Continue(v, _) => v,
            Completion::Return(v) => Some(v),
        }
    }

    pub fn is_abrupt(self) -> bool {
        !matches!(self, Completion::Normal(_))
    }

    /// Replace an empty value, per the "if V is empty" steps of
    /// [§12](https://262.ecma-international.org/5.1/#sec-12).
    pub fn update_value(self, value: Option<Value>) -> Completion {
        match self {
            Completion::Normal(v) => Completion::Normal(v.or(value)),
            Completion::Break(v, target) => Completion::Break(v.or(value), target),
            Completion::Continue(v, target) => Completion::Continue(v.or(value), target),
            Completion::Return(v) => Completion::Return(v),
        }
    }
}
