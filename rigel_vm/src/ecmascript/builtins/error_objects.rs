// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ### [15.11 Error Objects](https://262.ecma-international.org/5.1/#sec-15.11)

use crate::ecmascript::abstract_operations::type_conversion::to_string;
use crate::ecmascript::execution::agent::{Agent, ExceptionType, JsResult};
use crate::ecmascript::types::{
    JsString, Object, ObjectData, ObjectRecord, PropertyDescriptor, Value,
};

use super::builtin_function::{define_builtin_function, make_intrinsic_constructor};
use super::ordinary;

/// Create a native error instance with an optional message.
pub fn create_native_error(
    agent: &mut Agent,
    kind: ExceptionType,
    message: Option<JsString>,
) -> Object {
    let (_, prototype) = agent.realm.intrinsics.native_error(kind);
    let error = agent.heap.create_object(ObjectRecord::with_class(
        Some(prototype),
        "Error",
        ObjectData::Error,
    ));
    if let Some(message) = message {
        let message_key = agent.intern("message");
        agent.heap.object_mut(error).properties.insert(
            message_key,
            PropertyDescriptor::data(Value::String(message), true, false, true),
        );
    }
    error
}

/// Whether a value is an Error instance: its prototype chain passes through
/// one of the native error prototypes.
pub fn is_error_value(agent: &Agent, value: Value) -> bool {
    let Value::Object(o) = value else {
        return false;
    };
    if matches!(agent.heap.object(o).data, ObjectData::Error) {
        return true;
    }
    let error_prototype = agent.realm.intrinsics.error_prototype;
    let mut current = agent.heap.object(o).prototype;
    while let Some(p) = current {
        if p == error_prototype {
            return true;
        }
        current = agent.heap.object(p).prototype;
    }
    false
}

fn construct_error(
    agent: &mut Agent,
    kind: ExceptionType,
    arguments: &[Value],
) -> JsResult<Value> {
    let message = match arguments.first().copied() {
        None | Some(Value::Undefined) => None,
        Some(value) => Some(to_string(agent, value)?),
    };
    Ok(Value::Object(create_native_error(agent, kind, message)))
}

// Calling a NativeError constructor is equivalent to constructing it
// ([15.11.1](https://262.ecma-international.org/5.1/#sec-15.11.1)).
macro_rules! native_error_behaviour {
    ($call:ident, $construct:ident, $kind:expr) => {
        fn $call(agent: &mut Agent, _this: Value, arguments: &[Value]) -> JsResult<Value> {
            construct_error(agent, $kind, arguments)
        }
        fn $construct(agent: &mut Agent, arguments: &[Value]) -> JsResult<Value> {
            construct_error(agent, $kind, arguments)
        }
    };
}

native_error_behaviour!(call_error, new_error, ExceptionType::Error);
native_error_behaviour!(call_eval_error, new_eval_error, ExceptionType::EvalError);
native_error_behaviour!(call_range_error, new_range_error, ExceptionType::RangeError);
native_error_behaviour!(
    call_reference_error,
    new_reference_error,
    ExceptionType::ReferenceError
);
native_error_behaviour!(call_syntax_error, new_syntax_error, ExceptionType::SyntaxError);
native_error_behaviour!(call_type_error, new_type_error, ExceptionType::TypeError);
native_error_behaviour!(call_uri_error, new_uri_error, ExceptionType::UriError);

type CallBehaviour = fn(&mut Agent, Value, &[Value]) -> JsResult<Value>;
type ConstructBehaviour = fn(&mut Agent, &[Value]) -> JsResult<Value>;

pub(crate) fn populate(agent: &mut Agent) {
    let kinds: [(ExceptionType, &str, CallBehaviour, ConstructBehaviour); 7] = [
        (ExceptionType::Error, "Error", call_error, new_error),
        (ExceptionType::EvalError, "EvalError", call_eval_error, new_eval_error),
        (ExceptionType::RangeError, "RangeError", call_range_error, new_range_error),
        (
            ExceptionType::ReferenceError,
            "ReferenceError",
            call_reference_error,
            new_reference_error,
        ),
        (
            ExceptionType::SyntaxError,
            "SyntaxError",
            call_syntax_error,
            new_syntax_error,
        ),
        (ExceptionType::TypeError, "TypeError", call_type_error, new_type_error),
        (ExceptionType::UriError, "URIError", call_uri_error, new_uri_error),
    ];
    for (kind, name, call, construct) in kinds {
        let (constructor, prototype) = agent.realm.intrinsics.native_error(kind);
        make_intrinsic_constructor(agent, constructor, name, 1, call, construct, prototype);
        // [15.11.4] Prototype name and empty message.
        let name_value = Value::String(agent.intern(name));
        super::builtin_function::define_builtin_value(agent, prototype, "name", name_value);
        let empty = Value::String(agent.empty_string());
        super::builtin_function::define_builtin_value(agent, prototype, "message", empty);
    }
    // toString lives on Error.prototype only and is inherited.
    let error_prototype = agent.realm.intrinsics.error_prototype;
    define_builtin_function(agent, error_prototype, "toString", 0, error_proto_to_string);
}

/// ### [15.11.4.4 Error.prototype.toString ( )](https://262.ecma-international.org/5.1/#sec-15.11.4.4)
fn error_proto_to_string(agent: &mut Agent, this: Value, _: &[Value]) -> JsResult<Value> {
    // 2. If Type(O) is not Object, throw a TypeError exception.
    let Value::Object(o) = this else {
        return Err(agent.throw_exception_with_static_message(
            ExceptionType::TypeError,
            "Error.prototype.toString called on a non-object",
        ));
    };
    // 3–5. name defaults to "Error".
    let name_key = agent.intern("name");
    let name = match ordinary::get(agent, o, name_key)? {
        Value::Undefined => agent.intern("Error"),
        value => to_string(agent, value)?,
    };
    // 6–9. message defaults to "".
    let message_key = agent.intern("message");
    let message = match ordinary::get(agent, o, message_key)? {
        Value::Undefined => agent.empty_string(),
        value => to_string(agent, value)?,
    };
    // 10. If msg is the empty String, return name.
    if agent.heap.string_len(message) == 0 {
        return Ok(Value::String(name));
    }
    if agent.heap.string_len(name) == 0 {
        return Ok(Value::String(message));
    }
    // 11. Return name ": " msg.
    let text = format!(
        "{}: {}",
        agent.string_lossy(name),
        agent.string_lossy(message)
    );
    Ok(Value::String(agent.intern(&text)))
}
