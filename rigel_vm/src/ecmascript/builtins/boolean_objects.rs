// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ### [15.6 Boolean Objects](https://262.ecma-international.org/5.1/#sec-15.6)

use super::arg;
use super::builtin_function::{define_builtin_function, make_intrinsic_constructor};
use super::primitive_objects::{create_boolean_object, this_boolean_value};
use crate::ecmascript::abstract_operations::type_conversion::to_boolean;
use crate::ecmascript::execution::agent::{Agent, JsResult};
use crate::ecmascript::types::{ObjectData, PrimitiveValue, Value};

pub(crate) fn populate(agent: &mut Agent) {
    let boolean_prototype = agent.realm.intrinsics.boolean_prototype;
    let boolean_constructor = agent.realm.intrinsics.boolean_constructor;

    // [15.6.4] Boolean.prototype is a Boolean object with value false.
    {
        let record = agent.heap.object_mut(boolean_prototype);
        record.class = "Boolean";
        record.data = ObjectData::Primitive(PrimitiveValue::Boolean(false));
    }

    make_intrinsic_constructor(
        agent,
        boolean_constructor,
        "Boolean",
        1,
        boolean_constructor_call,
        boolean_constructor_construct,
        boolean_prototype,
    );

    define_builtin_function(agent, boolean_prototype, "toString", 0, boolean_to_string);
    define_builtin_function(agent, boolean_prototype, "valueOf", 0, boolean_value_of);
}

/// ### [15.6.2.1 new Boolean (value)](https://262.ecma-international.org/5.1/#sec-15.6.2.1)
fn boolean_constructor_construct(agent: &mut Agent, arguments: &[Value]) -> JsResult<Value> {
    let value = to_boolean(agent, arg(arguments, 0));
    Ok(Value::Object(create_boolean_object(agent, value)))
}

/// ### [15.6.1.1 Boolean (value)](https://262.ecma-international.org/5.1/#sec-15.6.1.1)
fn boolean_constructor_call(agent: &mut Agent, _this: Value, arguments: &[Value]) -> JsResult<Value> {
    Ok(Value::Boolean(to_boolean(agent, arg(arguments, 0))))
}

/// ### [15.6.4.2 Boolean.prototype.toString ( )](https://262.ecma-international.org/5.1/#sec-15.6.4.2)
fn boolean_to_string(agent: &mut Agent, this: Value, _: &[Value]) -> JsResult<Value> {
    let value = this_boolean_value(agent, this)?;
    Ok(Value::String(
        agent.intern(if value { "true" } else { "false" }),
    ))
}

/// ### [15.6.4.3 Boolean.prototype.valueOf ( )](https://262.ecma-international.org/5.1/#sec-15.6.4.3)
fn boolean_value_of(agent: &mut Agent, this: Value, _: &[Value]) -> JsResult<Value> {
    Ok(Value::Boolean(this_boolean_value(agent, this)?))
}
