// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The agent: one independent ECMAScript runtime instance. It owns the
//! heap, the realm and the execution context stack; all evaluator and
//! builtin code threads a `&mut Agent` through.

use std::rc::Rc;

use super::execution_context::ExecutionContext;
use super::realm::Realm;
use crate::ecmascript::builtins::error_objects;
use crate::ecmascript::types::{JsString, Object, Value};
use crate::heap::Heap;

pub type JsResult<T> = std::result::Result<T, JsError>;

/// A `Throw` completion in flight: the thrown language value.
#[derive(Debug, Clone, Copy)]
pub struct JsError(Value);

impl JsError {
    pub(crate) fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn value(self) -> Value {
        self.0
    }
}

/// The native error kinds of
/// [§15.11.6](https://262.ecma-international.org/5.1/#sec-15.11.6).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExceptionType {
    Error,
    EvalError,
    RangeError,
    ReferenceError,
    SyntaxError,
    TypeError,
    UriError,
}

/// Host integration points. The evaluator never performs I/O itself; the
/// embedder decides where `console.log` lines go and where randomness comes
/// from.
pub trait HostHooks: std::fmt::Debug {
    /// Sink for `console.log`. Receives one already-stringified line.
    fn print(&self, message: &str) {
        println!("{message}");
    }

    /// Source for `Math.random`: a double in `[0, 1)`.
    fn random(&self) -> f64 {
        rand::random()
    }
}

/// Hooks used when the embedder installs none.
#[derive(Debug, Default)]
pub struct DefaultHostHooks;

impl HostHooks for DefaultHostHooks {}

/// Calls nested deeper than this raise a RangeError instead of exhausting
/// the host stack.
pub(crate) const MAX_CALL_DEPTH: u32 = 1024;

#[derive(Debug)]
pub struct Agent {
    pub(crate) heap: Heap,
    pub(crate) realm: Realm,
    pub(crate) execution_context_stack: Vec<ExecutionContext>,
    pub(crate) host_hooks: Rc<dyn HostHooks>,
    pub(crate) call_depth: u32,
}

impl Agent {
    pub fn new(host_hooks: Rc<dyn HostHooks>) -> Self {
        let mut heap = Heap::new();
        let realm = Realm::create(&mut heap);
        let mut agent = Self {
            heap,
            realm,
            execution_context_stack: Vec::new(),
            host_hooks,
            call_depth: 0,
        };
        crate::ecmascript::builtins::populate_realm(&mut agent);
        agent
    }

    // ## Strings

    pub fn intern(&mut self, s: &str) -> JsString {
        self.heap.intern_str(s)
    }

    pub fn intern_units(&mut self, units: &[u16]) -> JsString {
        self.heap.intern_units(units)
    }

    pub fn string(&self, s: JsString) -> &[u16] {
        self.heap.string(s)
    }

    pub fn string_lossy(&self, s: JsString) -> String {
        self.heap.string_lossy(s)
    }

    pub fn empty_string(&mut self) -> JsString {
        self.heap.intern_units(&[])
    }

    // ## Execution contexts

    pub(crate) fn running_execution_context(&self) -> &ExecutionContext {
        self.execution_context_stack
            .last()
            .expect("no running execution context")
    }

    pub(crate) fn running_execution_context_mut(&mut self) -> &mut ExecutionContext {
        self.execution_context_stack
            .last_mut()
            .expect("no running execution context")
    }

    pub(crate) fn in_strict_mode(&self) -> bool {
        self.running_execution_context().strict
    }

    pub(crate) fn this_binding(&self) -> Value {
        self.running_execution_context().this_binding
    }

    // ## Realm accessors

    pub fn global_object(&self) -> Object {
        self.realm.global_object
    }

    pub(crate) fn is_callable_object(&self, o: Object) -> bool {
        self.heap.object(o).is_callable()
    }

    // ## Error creation

    /// Create a native error object and wrap it as a throw completion.
    pub fn throw_exception(&mut self, kind: ExceptionType, message: String) -> JsError {
        let message = self.intern(&message);
        let error = error_objects::create_native_error(self, kind, Some(message));
        JsError::new(Value::Object(error))
    }

    pub fn throw_exception_with_static_message(
        &mut self,
        kind: ExceptionType,
        message: &str,
    ) -> JsError {
        self.throw_exception(kind, message.to_string())
    }
}
