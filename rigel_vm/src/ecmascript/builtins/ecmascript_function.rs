// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Function objects: `[[Call]]`, `[[Construct]]`, `[[HasInstance]]`
//! ([§13.2](https://262.ecma-international.org/5.1/#sec-13.2)), entering
//! function code ([§10.4.3](https://262.ecma-international.org/5.1/#sec-10.4.3)),
//! declaration binding instantiation
//! ([§10.5](https://262.ecma-international.org/5.1/#sec-10.5)) and the
//! arguments object ([§10.6](https://262.ecma-international.org/5.1/#sec-10.6)).

use std::rc::Rc;

use rigel_parser::ast;

use super::builtin_function;
use super::ordinary;
use crate::ecmascript::execution::agent::{
    Agent, ExceptionType, JsResult, MAX_CALL_DEPTH,
};
use crate::ecmascript::execution::environments::{
    new_declarative_environment, Environment,
};
use crate::ecmascript::execution::execution_context::{get_global_object, ExecutionContext};
use crate::ecmascript::syntax_directed_operations::collect_declarations;
use crate::ecmascript::types::language::object::{
    BuiltinBehaviour, FunctionObjectData,
};
use crate::ecmascript::types::{
    Object, ObjectData, PropertyDescriptor, Value,
};
use crate::engine::evaluator::evaluate_function_body;

/// ### [13.2 Creating Function Objects](https://262.ecma-international.org/5.1/#sec-13.2)
pub fn create_function_object(
    agent: &mut Agent,
    function: Rc<ast::Function>,
    scope: Environment,
) -> Object {
    let strict = function.strict;
    let parameter_count = function.params.len() as f64;
    let function_prototype = agent.realm.intrinsics.function_prototype;
    // 1–13. The function object itself.
    let f = agent.heap.create_object(
        crate::ecmascript::types::ObjectRecord::with_class(
            Some(function_prototype),
            "Function",
            ObjectData::Function(Box::new(FunctionObjectData {
                function,
                scope,
                strict,
            })),
        ),
    );
    // 15. length: the number of formal parameters.
    let length_key = agent.intern("length");
    agent.heap.object_mut(f).properties.insert(
        length_key,
        PropertyDescriptor::data(Value::Number(parameter_count), false, false, false),
    );
    // 16–18. The prototype property, with its back-pointing constructor.
    let object_prototype = agent.realm.intrinsics.object_prototype;
    let proto = agent
        .heap
        .create_object(crate::ecmascript::types::ObjectRecord::ordinary(Some(
            object_prototype,
        )));
    let constructor_key = agent.intern("constructor");
    agent.heap.object_mut(proto).properties.insert(
        constructor_key,
        PropertyDescriptor::data(Value::Object(f), true, false, true),
    );
    let prototype_key = agent.intern("prototype");
    agent.heap.object_mut(f).properties.insert(
        prototype_key,
        PropertyDescriptor::data(Value::Object(proto), true, false, false),
    );
    // 19. Strict functions poison caller and arguments.
    if strict {
        let thrower = Value::Object(agent.realm.intrinsics.throw_type_error);
        let poisoned = PropertyDescriptor::accessor(thrower, thrower, false, false);
        let caller_key = agent.intern("caller");
        let arguments_key = agent.intern("arguments");
        let record = agent.heap.object_mut(f);
        record.properties.insert(caller_key, poisoned);
        record.properties.insert(arguments_key, poisoned);
    }
    f
}

/// ### [13.2.1 \[\[Call\]\]](https://262.ecma-international.org/5.1/#sec-13.2.1)
pub fn call_function(
    agent: &mut Agent,
    f: Object,
    this_value: Value,
    arguments: &[Value],
) -> JsResult<Value> {
    if agent.call_depth >= MAX_CALL_DEPTH {
        return Err(agent.throw_exception_with_static_message(
            ExceptionType::RangeError,
            "Maximum call stack size exceeded",
        ));
    }
    agent.call_depth += 1;
    let result = match &agent.heap.object(f).data {
        ObjectData::Function(data) => {
            let function = data.function.clone();
            let scope = data.scope;
            let strict = data.strict;
            call_ecmascript_function(agent, f, function, scope, strict, this_value, arguments)
        }
        ObjectData::Builtin(data) => match data.behaviour.clone() {
            BuiltinBehaviour::Static(behaviour) => behaviour(agent, this_value, arguments),
            BuiltinBehaviour::Host(behaviour) => behaviour(agent, this_value, arguments),
        },
        ObjectData::Bound(data) => {
            // [15.3.4.5.1] [[Call]] of a bound function.
            let target = data.target_function;
            let bound_this = data.bound_this;
            let mut all_arguments = data.bound_args.clone();
            all_arguments.extend_from_slice(arguments);
            call_function(agent, target, bound_this, &all_arguments)
        }
        _ => Err(agent.throw_exception_with_static_message(
            ExceptionType::TypeError,
            "Object is not a function",
        )),
    };
    agent.call_depth -= 1;
    result
}

fn call_ecmascript_function(
    agent: &mut Agent,
    f: Object,
    function: Rc<ast::Function>,
    scope: Environment,
    strict: bool,
    this_value: Value,
    arguments: &[Value],
) -> JsResult<Value> {
    // [10.4.3] Entering Function Code: the this binding.
    let this_binding = if strict {
        // 1. Strict code uses the this value unchanged.
        this_value
    } else {
        match this_value {
            // 2. undefined and null become the global object.
            Value::Undefined | Value::Null => Value::Object(get_global_object(agent)),
            // 3. Primitives are boxed.
            Value::Boolean(_) | Value::Number(_) | Value::String(_) => Value::Object(
                crate::ecmascript::abstract_operations::type_conversion::to_object(
                    agent, this_value,
                )?,
            ),
            // 4. Objects pass through.
            Value::Object(_) => this_value,
        }
    };
    // 5. Let localEnv be NewDeclarativeEnvironment(F.[[Scope]]).
    let local_env = new_declarative_environment(agent, Some(scope));
    agent.execution_context_stack.push(ExecutionContext {
        lexical_environment: local_env,
        variable_environment: local_env,
        this_binding,
        function: Some(f),
        strict,
    });
    // [10.5] Declaration Binding Instantiation, then the body.
    let result = declaration_binding_instantiation(
        agent,
        &function.params,
        &function.body,
        Some(f),
        arguments,
        local_env,
        strict,
        false,
    )
    .and_then(|()| evaluate_function_body(agent, &function.body));
    agent.execution_context_stack.pop();
    result
}

/// ### [13.2.2 \[\[Construct\]\]](https://262.ecma-international.org/5.1/#sec-13.2.2)
pub fn construct(agent: &mut Agent, f: Object, arguments: &[Value]) -> JsResult<Value> {
    match &agent.heap.object(f).data {
        ObjectData::Function(_) => {
            // 1–5. The new object's prototype comes from F.prototype, if it
            // is an object.
            let prototype_key = agent.intern("prototype");
            let prototype = match ordinary::get(agent, f, prototype_key)? {
                Value::Object(p) => p,
                _ => agent.realm.intrinsics.object_prototype,
            };
            let obj = agent.heap.create_object(
                crate::ecmascript::types::ObjectRecord::ordinary(Some(prototype)),
            );
            // 8. Call F with the new object as this.
            let result = call_function(agent, f, Value::Object(obj), arguments)?;
            // 9–10. An object result wins; otherwise the created object.
            Ok(match result {
                Value::Object(o) => Value::Object(o),
                _ => Value::Object(obj),
            })
        }
        ObjectData::Builtin(data) => {
            let Some(construct) = data.construct else {
                return Err(agent.throw_exception_with_static_message(
                    ExceptionType::TypeError,
                    "Object is not a constructor",
                ));
            };
            construct(agent, arguments)
        }
        ObjectData::Bound(data) => {
            // [15.3.4.5.2] [[Construct]] of a bound function.
            let target = data.target_function;
            let mut all_arguments = data.bound_args.clone();
            all_arguments.extend_from_slice(arguments);
            construct(agent, target, &all_arguments)
        }
        _ => Err(agent.throw_exception_with_static_message(
            ExceptionType::TypeError,
            "Object is not a constructor",
        )),
    }
}

/// ### [15.3.5.3 \[\[HasInstance\]\] (V)](https://262.ecma-international.org/5.1/#sec-15.3.5.3)
pub fn ordinary_has_instance(agent: &mut Agent, f: Object, value: Value) -> JsResult<bool> {
    // Bound functions delegate to their target ([15.3.4.5.3]).
    if let ObjectData::Bound(data) = &agent.heap.object(f).data {
        let target = data.target_function;
        return ordinary_has_instance(agent, target, value);
    }
    if !agent.is_callable_object(f) {
        return Err(agent.throw_exception_with_static_message(
            ExceptionType::TypeError,
            "Right-hand side of 'instanceof' is not callable",
        ));
    }
    // 1. If V is not an object, return false.
    let Value::Object(mut v) = value else {
        return Ok(false);
    };
    // 2. Let O be the result of getting F.prototype; it must be an object.
    let prototype_key = agent.intern("prototype");
    let Value::Object(o) = ordinary::get(agent, f, prototype_key)? else {
        return Err(agent.throw_exception_with_static_message(
            ExceptionType::TypeError,
            "Function has non-object prototype in instanceof check",
        ));
    };
    // 4. Walk V's prototype chain.
    loop {
        match agent.heap.object(v).prototype {
            None => return Ok(false),
            Some(p) if p == o => return Ok(true),
            Some(p) => v = p,
        }
    }
}

/// ### [10.5 Declaration Binding Instantiation](https://262.ecma-international.org/5.1/#sec-10.5)
///
/// Formals, hoisted functions, `arguments`, then `var`s. `f` is `None` for
/// global and eval code, which have no formals or `arguments` binding;
/// `configurable_bindings` is true only for eval code.
#[allow(clippy::too_many_arguments)]
pub fn declaration_binding_instantiation(
    agent: &mut Agent,
    params: &[ast::Ident],
    body: &[ast::Statement],
    f: Option<Object>,
    arguments: &[Value],
    env: Environment,
    strict: bool,
    configurable_bindings: bool,
) -> JsResult<()> {
    // 4. Formal parameters, in order; extra formals get undefined.
    for (index, param) in params.iter().enumerate() {
        let name = agent.intern(&param.name);
        let value = arguments.get(index).copied().unwrap_or(Value::Undefined);
        if !env.has_binding(agent, name) {
            env.create_mutable_binding(agent, name, configurable_bindings);
        }
        env.set_mutable_binding(agent, name, value, strict)?;
    }

    let declarations = collect_declarations(body);

    // 5. Hoisted function declarations, in source order.
    for declaration in &declarations.functions {
        let name_ident = declaration
            .name
            .as_ref()
            .expect("function declarations always have a name");
        let name = agent.intern(&name_ident.name);
        let fo = create_function_object(agent, declaration.clone(), env);
        if !env.has_binding(agent, name) {
            env.create_mutable_binding(agent, name, configurable_bindings);
        }
        env.set_mutable_binding(agent, name, Value::Object(fo), strict)?;
    }

    // 6–7. The arguments object, bound exactly once per activation.
    let arguments_name = agent.intern("arguments");
    if let Some(f) = f {
        if !env.has_binding(agent, arguments_name) {
            let args_object = create_arguments_object(agent, f, arguments, strict);
            if strict {
                env.create_immutable_binding(agent, arguments_name);
                env.initialize_immutable_binding(
                    agent,
                    arguments_name,
                    Value::Object(args_object),
                );
            } else {
                env.create_mutable_binding(agent, arguments_name, false);
                env.set_mutable_binding(
                    agent,
                    arguments_name,
                    Value::Object(args_object),
                    false,
                )?;
            }
        }
    }

    // 8. var declarations initialize to undefined unless already bound.
    for name in &declarations.var_names {
        let name = agent.intern(name);
        if !env.has_binding(agent, name) {
            env.create_mutable_binding(agent, name, configurable_bindings);
            env.set_mutable_binding(agent, name, Value::Undefined, strict)?;
        }
    }
    Ok(())
}

/// ### [10.6 Arguments Object](https://262.ecma-international.org/5.1/#sec-10.6)
///
/// Index properties snapshot the call's arguments. The non-strict
/// formal-parameter aliasing map is not maintained.
fn create_arguments_object(
    agent: &mut Agent,
    f: Object,
    arguments: &[Value],
    strict: bool,
) -> Object {
    let object_prototype = agent.realm.intrinsics.object_prototype;
    let obj = agent.heap.create_object(
        crate::ecmascript::types::ObjectRecord::with_class(
            Some(object_prototype),
            "Arguments",
            ObjectData::Arguments,
        ),
    );
    let length_key = agent.intern("length");
    agent.heap.object_mut(obj).properties.insert(
        length_key,
        PropertyDescriptor::data(Value::Number(arguments.len() as f64), true, false, true),
    );
    for (index, &value) in arguments.iter().enumerate() {
        let key = ordinary::index_key(agent, index);
        agent
            .heap
            .object_mut(obj)
            .properties
            .insert(key, PropertyDescriptor::data(value, true, true, true));
    }
    let callee_key = agent.intern("callee");
    if strict {
        let thrower = Value::Object(agent.realm.intrinsics.throw_type_error);
        let poisoned = PropertyDescriptor::accessor(thrower, thrower, false, false);
        let caller_key = agent.intern("caller");
        let record = agent.heap.object_mut(obj);
        record.properties.insert(callee_key, poisoned);
        record.properties.insert(caller_key, poisoned);
    } else {
        agent.heap.object_mut(obj).properties.insert(
            callee_key,
            PropertyDescriptor::data(Value::Object(f), true, false, true),
        );
    }
    obj
}

/// Host hook surface: install a host function as a global.
pub fn create_host_function(
    agent: &mut Agent,
    name: &str,
    length: u32,
    behaviour: Rc<dyn Fn(&mut Agent, Value, &[Value]) -> JsResult<Value>>,
) -> Object {
    builtin_function::create_builtin_function(
        agent,
        name,
        length,
        BuiltinBehaviour::Host(behaviour),
        None,
    )
}
