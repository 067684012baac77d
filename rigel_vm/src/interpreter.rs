// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The embedder-facing interpreter: parse and run source, install host
//! functions, render values. One `Interpreter` is one isolated realm; its
//! heap is swept when it drops.

use std::rc::Rc;

use rigel_parser::ast::Program;
use rigel_parser::ParseError;

use crate::ecmascript::abstract_operations::type_conversion::to_string;
use crate::ecmascript::builtins::error_objects::is_error_value;
use crate::ecmascript::builtins::{builtin_function, ecmascript_function, ordinary};
use crate::ecmascript::execution::agent::{Agent, DefaultHostHooks, HostHooks, JsResult};
use crate::ecmascript::scripts_and_modules::script::script_evaluation;
use crate::ecmascript::types::{ObjectData, PrimitiveValue, Value};

pub struct Interpreter {
    agent: Agent,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    pub fn new() -> Self {
        Self::with_host_hooks(Rc::new(DefaultHostHooks))
    }

    pub fn with_host_hooks(host_hooks: Rc<dyn HostHooks>) -> Self {
        Self {
            agent: Agent::new(host_hooks),
        }
    }

    pub fn agent(&mut self) -> &mut Agent {
        &mut self.agent
    }

    /// Parse and evaluate `source` in this interpreter's global context.
    ///
    /// Parse failures are the `Err` arm. A runtime throw that escapes the
    /// program is returned as `Ok` with the thrown value — an Error
    /// instance for engine-raised conditions — distinguishable with
    /// [`Interpreter::is_error_value`].
    pub fn execute_string(
        &mut self,
        source: &str,
        filename: Option<&str>,
    ) -> Result<Value, ParseError> {
        let program = rigel_parser::parse_string(source, filename)?;
        Ok(self.execute_program(&program))
    }

    /// Evaluate an already-parsed Program.
    pub fn execute_program(&mut self, program: &Program) -> Value {
        match script_evaluation(&mut self.agent, program) {
            Ok(value) => value,
            Err(error) => error.value(),
        }
    }

    /// Whether a value is an Error instance (used to detect uncaught
    /// throws).
    pub fn is_error_value(&self, value: Value) -> bool {
        is_error_value(&self.agent, value)
    }

    /// The `toString` of a value, for host-side display. Falls back to a
    /// class tag if user code throws during conversion.
    pub fn to_display_string(&mut self, value: Value) -> String {
        match to_string(&mut self.agent, value) {
            Ok(text) => self.agent.string_lossy(text),
            Err(_) => match value {
                Value::Object(o) => format!("[object {}]", self.agent.heap.object(o).class),
                _ => "<unprintable>".to_string(),
            },
        }
    }

    /// A REPL-style rendering: strings are quoted, everything else is
    /// `toString`.
    pub fn inspect(&mut self, value: Value) -> String {
        match value {
            Value::String(s) => format!("'{}'", self.agent.string_lossy(s)),
            Value::Object(o)
                if matches!(
                    self.agent.heap.object(o).data,
                    ObjectData::Primitive(PrimitiveValue::String(_))
                ) =>
            {
                self.to_display_string(value)
            }
            _ => self.to_display_string(value),
        }
    }

    /// Install a host function as a global before execution. The function
    /// must report failures through its `JsResult`, never by panicking.
    pub fn set_global_function<F>(&mut self, name: &str, length: u32, behaviour: F)
    where
        F: Fn(&mut Agent, Value, &[Value]) -> JsResult<Value> + 'static,
    {
        let f = ecmascript_function::create_host_function(
            &mut self.agent,
            name,
            length,
            Rc::new(behaviour),
        );
        let global = self.agent.realm.global_object;
        builtin_function::define_builtin_value(&mut self.agent, global, name, Value::Object(f));
    }

    /// Define a global data property before execution.
    pub fn set_global_value(&mut self, name: &str, value: Value) {
        let global = self.agent.realm.global_object;
        builtin_function::define_builtin_value(&mut self.agent, global, name, value);
    }

    /// Read a global, for host-side inspection in tests and tools.
    pub fn get_global_value(&mut self, name: &str) -> JsResult<Value> {
        let key = self.agent.intern(name);
        let global = self.agent.realm.global_object;
        ordinary::get(&mut self.agent, global, key)
    }

    /// Intern a Rust string into the interpreter's heap.
    pub fn string_value(&mut self, text: &str) -> Value {
        Value::String(self.agent.intern(text))
    }
}
