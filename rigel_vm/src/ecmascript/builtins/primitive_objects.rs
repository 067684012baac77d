// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Boolean, Number and String wrapper objects
//! ([§15.5.5](https://262.ecma-international.org/5.1/#sec-15.5.5),
//! [§15.6.5](https://262.ecma-international.org/5.1/#sec-15.6.5),
//! [§15.7.5](https://262.ecma-international.org/5.1/#sec-15.7.5)).

use crate::ecmascript::execution::agent::{Agent, ExceptionType, JsResult};
use crate::ecmascript::types::language::string::JsString;
use crate::ecmascript::types::{
    Object, ObjectData, ObjectRecord, PrimitiveValue, PropertyDescriptor, Value,
};

pub fn create_boolean_object(agent: &mut Agent, value: bool) -> Object {
    let prototype = agent.realm.intrinsics.boolean_prototype;
    agent.heap.create_object(ObjectRecord::with_class(
        Some(prototype),
        "Boolean",
        ObjectData::Primitive(PrimitiveValue::Boolean(value)),
    ))
}

pub fn create_number_object(agent: &mut Agent, value: f64) -> Object {
    let prototype = agent.realm.intrinsics.number_prototype;
    agent.heap.create_object(ObjectRecord::with_class(
        Some(prototype),
        "Number",
        ObjectData::Primitive(PrimitiveValue::Number(value)),
    ))
}

pub fn create_string_object(agent: &mut Agent, value: JsString) -> Object {
    let prototype = agent.realm.intrinsics.string_prototype;
    let length = agent.heap.string_len(value) as f64;
    let o = agent.heap.create_object(ObjectRecord::with_class(
        Some(prototype),
        "String",
        ObjectData::Primitive(PrimitiveValue::String(value)),
    ));
    // [15.5.5.1] length is an own, immutable property; the index
    // properties stay virtual.
    let length_key = agent.intern("length");
    agent.heap.object_mut(o).properties.insert(
        length_key,
        PropertyDescriptor::data(Value::Number(length), false, false, false),
    );
    o
}

/// `this` resolution shared by the wrapper prototypes: accept the primitive
/// itself or a wrapper of the right class.
pub fn this_boolean_value(agent: &mut Agent, this: Value) -> JsResult<bool> {
    match this {
        Value::Boolean(b) => Ok(b),
        Value::Object(o) => {
            if let ObjectData::Primitive(PrimitiveValue::Boolean(b)) = agent.heap.object(o).data {
                return Ok(b);
            }
            Err(agent.throw_exception_with_static_message(
                ExceptionType::TypeError,
                "Boolean.prototype method called on incompatible receiver",
            ))
        }
        _ => Err(agent.throw_exception_with_static_message(
            ExceptionType::TypeError,
            "Boolean.prototype method called on incompatible receiver",
        )),
    }
}

pub fn this_number_value(agent: &mut Agent, this: Value) -> JsResult<f64> {
    match this {
        Value::Number(n) => Ok(n),
        Value::Object(o) => {
            if let ObjectData::Primitive(PrimitiveValue::Number(n)) = agent.heap.object(o).data {
                return Ok(n);
            }
            Err(agent.throw_exception_with_static_message(
                ExceptionType::TypeError,
                "Number.prototype method called on incompatible receiver",
            ))
        }
        _ => Err(agent.throw_exception_with_static_message(
            ExceptionType::TypeError,
            "Number.prototype method called on incompatible receiver",
        )),
    }
}

pub fn this_string_value(agent: &mut Agent, this: Value) -> JsResult<JsString> {
    match this {
        Value::String(s) => Ok(s),
        Value::Object(o) => {
            if let ObjectData::Primitive(PrimitiveValue::String(s)) = agent.heap.object(o).data {
                return Ok(s);
            }
            Err(agent.throw_exception_with_static_message(
                ExceptionType::TypeError,
                "String.prototype method called on incompatible receiver",
            ))
        }
        _ => Err(agent.throw_exception_with_static_message(
            ExceptionType::TypeError,
            "String.prototype method called on incompatible receiver",
        )),
    }
}
