// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ### [15.3 Function Objects](https://262.ecma-international.org/5.1/#sec-15.3)

use super::builtin_function::{
    define_builtin_function, define_length, make_intrinsic_constructor,
};
use super::ecmascript_function;
use super::ordinary;
use super::arg;
use crate::ecmascript::abstract_operations::operations_on_objects::call;
use crate::ecmascript::abstract_operations::type_conversion::{to_string, to_uint32};
use crate::ecmascript::execution::agent::{Agent, ExceptionType, JsResult};
use crate::ecmascript::types::language::object::{
    BoundFunctionData, BuiltinBehaviour, BuiltinFunctionData,
};
use crate::ecmascript::types::{
    Object, ObjectData, ObjectRecord, PropertyDescriptor, Value,
};

pub(crate) fn populate(agent: &mut Agent) {
    let function_prototype = agent.realm.intrinsics.function_prototype;
    let function_constructor = agent.realm.intrinsics.function_constructor;

    // [15.3.4] Function.prototype is itself a function that accepts any
    // arguments and returns undefined.
    let initial_name = agent.intern("");
    {
        let record = agent.heap.object_mut(function_prototype);
        record.class = "Function";
        record.data = ObjectData::Builtin(BuiltinFunctionData {
            behaviour: BuiltinBehaviour::Static(function_prototype_call),
            construct: None,
            initial_name,
        });
    }
    define_length(agent, function_prototype, 0);

    make_intrinsic_constructor(
        agent,
        function_constructor,
        "Function",
        1,
        function_constructor_call,
        function_constructor_construct,
        function_prototype,
    );

    define_builtin_function(agent, function_prototype, "toString", 0, function_to_string);
    define_builtin_function(agent, function_prototype, "apply", 2, function_apply);
    define_builtin_function(agent, function_prototype, "call", 1, function_call);
    define_builtin_function(agent, function_prototype, "bind", 1, function_bind);

    // [13.2.3] The [[ThrowTypeError]] function object.
    let throw_type_error = agent.realm.intrinsics.throw_type_error;
    let initial_name = agent.intern("ThrowTypeError");
    {
        let record = agent.heap.object_mut(throw_type_error);
        record.class = "Function";
        record.data = ObjectData::Builtin(BuiltinFunctionData {
            behaviour: BuiltinBehaviour::Static(throw_type_error_behaviour),
            construct: None,
            initial_name,
        });
        record.extensible = false;
    }
    define_length(agent, throw_type_error, 0);
}

fn function_prototype_call(_: &mut Agent, _: Value, _: &[Value]) -> JsResult<Value> {
    Ok(Value::Undefined)
}

fn throw_type_error_behaviour(agent: &mut Agent, _: Value, _: &[Value]) -> JsResult<Value> {
    Err(agent.throw_exception_with_static_message(
        ExceptionType::TypeError,
        "'caller', 'callee', and 'arguments' properties may not be accessed on strict mode functions or the arguments objects for calls to them",
    ))
}

/// ### [15.3.1 / 15.3.2 The Function Constructor](https://262.ecma-international.org/5.1/#sec-15.3.2.1)
///
/// Assembles a function source from the arguments and parses it with the
/// engine's own parser.
fn function_constructor_construct(agent: &mut Agent, arguments: &[Value]) -> JsResult<Value> {
    let mut params = Vec::new();
    for argument in arguments.iter().take(arguments.len().saturating_sub(1)) {
        let text = to_string(agent, *argument)?;
        params.push(agent.string_lossy(text));
    }
    let body = match arguments.last() {
        Some(&last) => {
            let text = to_string(agent, last)?;
            agent.string_lossy(text)
        }
        None => String::new(),
    };
    let source = format!("(function anonymous({}) {{\n{}\n}})", params.join(", "), body);
    let program = rigel_parser::parse_string(&source, None).map_err(|error| {
        agent.throw_exception(ExceptionType::SyntaxError, error.message.clone())
    })?;
    let Some(rigel_parser::ast::Statement::Expression(expression)) = program.body.first() else {
        return Err(agent.throw_exception_with_static_message(
            ExceptionType::SyntaxError,
            "Failed to parse function body",
        ));
    };
    let rigel_parser::ast::Expression::Function(function) = &expression.expression else {
        return Err(agent.throw_exception_with_static_message(
            ExceptionType::SyntaxError,
            "Failed to parse function body",
        ));
    };
    // The new function closes over the global environment only.
    let global_env = agent.realm.global_env;
    let f = ecmascript_function::create_function_object(agent, function.clone(), global_env);
    Ok(Value::Object(f))
}

fn function_constructor_call(
    agent: &mut Agent,
    _this: Value,
    arguments: &[Value],
) -> JsResult<Value> {
    // [15.3.1.1] Function(...) creates and initialises a new function
    // object exactly as the construct form does.
    function_constructor_construct(agent, arguments)
}

/// ### [15.3.4.2 Function.prototype.toString ( )](https://262.ecma-international.org/5.1/#sec-15.3.4.2)
fn function_to_string(agent: &mut Agent, this: Value, _: &[Value]) -> JsResult<Value> {
    let Value::Object(o) = this else {
        return Err(agent.throw_exception_with_static_message(
            ExceptionType::TypeError,
            "Function.prototype.toString called on a non-function",
        ));
    };
    let text = match &agent.heap.object(o).data {
        ObjectData::Function(data) => {
            rigel_parser::ast::printer::to_source_function(&data.function)
        }
        ObjectData::Builtin(data) => {
            let name = agent.string_lossy(data.initial_name);
            format!("function {name}() {{ [native code] }}")
        }
        ObjectData::Bound(_) => "function () { [native code] }".to_string(),
        _ => {
            return Err(agent.throw_exception_with_static_message(
                ExceptionType::TypeError,
                "Function.prototype.toString called on a non-function",
            ));
        }
    };
    Ok(Value::String(agent.intern(&text)))
}

/// ### [15.3.4.3 Function.prototype.apply (thisArg, argArray)](https://262.ecma-international.org/5.1/#sec-15.3.4.3)
fn function_apply(agent: &mut Agent, this: Value, arguments: &[Value]) -> JsResult<Value> {
    let this_arg = arg(arguments, 0);
    let arg_array = arg(arguments, 1);
    let call_arguments = match arg_array {
        // 2. undefined or null: call with no arguments.
        Value::Undefined | Value::Null => Vec::new(),
        // 3. Otherwise argArray must be an object with a length.
        Value::Object(array) => {
            let length_key = agent.intern("length");
            let length = ordinary::get(agent, array, length_key)?;
            let length = to_uint32(agent, length)?;
            let mut values = Vec::with_capacity(length as usize);
            for index in 0..length {
                let key = ordinary::index_key(agent, index as usize);
                values.push(ordinary::get(agent, array, key)?);
            }
            values
        }
        _ => {
            return Err(agent.throw_exception_with_static_message(
                ExceptionType::TypeError,
                "Function.prototype.apply: arguments list has wrong type",
            ));
        }
    };
    call(agent, this, this_arg, &call_arguments)
}

/// ### [15.3.4.4 Function.prototype.call (thisArg, ...)](https://262.ecma-international.org/5.1/#sec-15.3.4.4)
fn function_call(agent: &mut Agent, this: Value, arguments: &[Value]) -> JsResult<Value> {
    let this_arg = arg(arguments, 0);
    let rest = if arguments.is_empty() {
        &[]
    } else {
        &arguments[1..]
    };
    call(agent, this, this_arg, rest)
}

/// ### [15.3.4.5 Function.prototype.bind (thisArg, ...)](https://262.ecma-international.org/5.1/#sec-15.3.4.5)
fn function_bind(agent: &mut Agent, this: Value, arguments: &[Value]) -> JsResult<Value> {
    // 2. Target must be callable.
    let Value::Object(target) = this else {
        return Err(agent.throw_exception_with_static_message(
            ExceptionType::TypeError,
            "Function.prototype.bind called on a non-function",
        ));
    };
    if !agent.is_callable_object(target) {
        return Err(agent.throw_exception_with_static_message(
            ExceptionType::TypeError,
            "Function.prototype.bind called on a non-function",
        ));
    }
    let bound_this = arg(arguments, 0);
    let bound_args: Vec<Value> = arguments.iter().skip(1).copied().collect();
    // 15. length: the target's length minus the bound argument count.
    let length_key = agent.intern("length");
    let target_length = match ordinary::get(agent, target, length_key)? {
        Value::Number(n) => n,
        _ => 0.0,
    };
    let bound_length = (target_length - bound_args.len() as f64).max(0.0);

    let function_prototype = agent.realm.intrinsics.function_prototype;
    let f = agent.heap.create_object(ObjectRecord::with_class(
        Some(function_prototype),
        "Function",
        ObjectData::Bound(Box::new(BoundFunctionData {
            target_function: target,
            bound_this,
            bound_args,
        })),
    ));
    agent.heap.object_mut(f).properties.insert(
        length_key,
        PropertyDescriptor::data(Value::Number(bound_length), false, false, false),
    );
    // 20–21. caller and arguments are poisoned.
    let thrower = Value::Object(agent.realm.intrinsics.throw_type_error);
    let poisoned = PropertyDescriptor::accessor(thrower, thrower, false, false);
    let caller_key = agent.intern("caller");
    let arguments_key = agent.intern("arguments");
    let record = agent.heap.object_mut(f);
    record.properties.insert(caller_key, poisoned);
    record.properties.insert(arguments_key, poisoned);
    Ok(Value::Object(f))
}
