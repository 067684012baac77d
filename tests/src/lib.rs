// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Shared helpers for the conformance suites.

use std::cell::RefCell;
use std::rc::Rc;

use rigel_vm::{HostHooks, Interpreter, Value};

/// Host hooks that capture `console.log` lines and fix `Math.random`.
#[derive(Debug, Default)]
pub struct RecordingHooks {
    pub lines: Rc<RefCell<Vec<String>>>,
}

impl HostHooks for RecordingHooks {
    fn print(&self, message: &str) {
        self.lines.borrow_mut().push(message.to_string());
    }

    fn random(&self) -> f64 {
        0.5
    }
}

/// Run a script in a fresh interpreter; panic on parse errors.
pub fn eval(source: &str) -> (Interpreter, Value) {
    let mut interpreter = Interpreter::new();
    let value = interpreter
        .execute_string(source, Some("<test>"))
        .unwrap_or_else(|e| panic!("parse of {source:?} failed: {e}"));
    (interpreter, value)
}

/// Run a script, capturing console output.
pub fn eval_with_console(source: &str) -> (Interpreter, Value, Vec<String>) {
    let lines = Rc::new(RefCell::new(Vec::new()));
    let hooks = RecordingHooks {
        lines: lines.clone(),
    };
    let mut interpreter = Interpreter::with_host_hooks(Rc::new(hooks));
    let value = interpreter
        .execute_string(source, Some("<test>"))
        .unwrap_or_else(|e| panic!("parse of {source:?} failed: {e}"));
    let captured = lines.borrow().clone();
    (interpreter, value, captured)
}

/// The numeric result of a script; panics on any other outcome.
pub fn eval_number(source: &str) -> f64 {
    let (mut interpreter, value) = eval(source);
    match value {
        Value::Number(n) => n,
        other => panic!(
            "expected a number from {source:?}, got {}",
            interpreter.to_display_string(other)
        ),
    }
}

/// The string result of a script.
pub fn eval_string(source: &str) -> String {
    let (mut interpreter, value) = eval(source);
    match value {
        Value::String(_) => interpreter.to_display_string(value),
        other => panic!(
            "expected a string from {source:?}, got {}",
            interpreter.to_display_string(other)
        ),
    }
}

/// The boolean result of a script.
pub fn eval_bool(source: &str) -> bool {
    let (mut interpreter, value) = eval(source);
    match value {
        Value::Boolean(b) => b,
        other => panic!(
            "expected a boolean from {source:?}, got {}",
            interpreter.to_display_string(other)
        ),
    }
}

/// Assert the script ends with an uncaught throw whose rendering contains
/// `needle`.
pub fn eval_throws(source: &str, needle: &str) {
    let (mut interpreter, value) = eval(source);
    assert!(
        interpreter.is_error_value(value),
        "expected an uncaught error from {source:?}, got {}",
        interpreter.to_display_string(value)
    );
    let rendered = interpreter.to_display_string(value);
    assert!(
        rendered.contains(needle),
        "expected error containing {needle:?}, got {rendered:?}"
    );
}

/// Assert the script fails to parse.
pub fn parse_fails(source: &str) {
    assert!(
        rigel_parser::parse_string(source, None).is_err(),
        "expected a parse error for {source:?}"
    );
}
