// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Construction helpers for builtin function objects and the intrinsic
//! population code.

use crate::ecmascript::execution::agent::Agent;
use crate::ecmascript::types::language::object::{
    BuiltinBehaviour, BuiltinFunctionData, NativeConstructor, NativeFunction,
};
use crate::ecmascript::types::{Object, ObjectData, ObjectRecord, PropertyDescriptor, Value};

/// Create a fresh builtin function object.
pub fn create_builtin_function(
    agent: &mut Agent,
    name: &str,
    length: u32,
    behaviour: BuiltinBehaviour,
    construct: Option<NativeConstructor>,
) -> Object {
    let initial_name = agent.intern(name);
    let function_prototype = agent.realm.intrinsics.function_prototype;
    let f = agent.heap.create_object(ObjectRecord::with_class(
        Some(function_prototype),
        "Function",
        ObjectData::Builtin(BuiltinFunctionData {
            behaviour,
            construct,
            initial_name,
        }),
    ));
    define_length(agent, f, length);
    f
}

/// Define a builtin method on `target`: writable, non-enumerable,
/// configurable, like every §15 method.
pub fn define_builtin_function(
    agent: &mut Agent,
    target: Object,
    name: &str,
    length: u32,
    behaviour: NativeFunction,
) {
    let f = create_builtin_function(
        agent,
        name,
        length,
        BuiltinBehaviour::Static(behaviour),
        None,
    );
    let key = agent.intern(name);
    agent
        .heap
        .object_mut(target)
        .properties
        .insert(key, PropertyDescriptor::data(Value::Object(f), true, false, true));
}

/// Turn a bare intrinsic object into a constructor: install behaviour,
/// `length`, its `prototype` property, and the back-pointing `constructor`.
pub fn make_intrinsic_constructor(
    agent: &mut Agent,
    constructor: Object,
    name: &str,
    length: u32,
    behaviour: NativeFunction,
    construct: NativeConstructor,
    prototype: Object,
) {
    let initial_name = agent.intern(name);
    {
        let record = agent.heap.object_mut(constructor);
        record.class = "Function";
        record.data = ObjectData::Builtin(BuiltinFunctionData {
            behaviour: BuiltinBehaviour::Static(behaviour),
            construct: Some(construct),
            initial_name,
        });
    }
    define_length(agent, constructor, length);
    let prototype_key = agent.intern("prototype");
    agent.heap.object_mut(constructor).properties.insert(
        prototype_key,
        PropertyDescriptor::data(Value::Object(prototype), false, false, false),
    );
    let constructor_key = agent.intern("constructor");
    agent.heap.object_mut(prototype).properties.insert(
        constructor_key,
        PropertyDescriptor::data(Value::Object(constructor), true, false, true),
    );
}

pub(crate) fn define_length(agent: &mut Agent, f: Object, length: u32) {
    let key = agent.intern("length");
    agent.heap.object_mut(f).properties.insert(
        key,
        PropertyDescriptor::data(Value::Number(length as f64), false, false, false),
    );
}

/// Define a non-function data property with §15's default attributes
/// (writable, non-enumerable, configurable).
pub fn define_builtin_value(agent: &mut Agent, target: Object, name: &str, value: Value) {
    let key = agent.intern(name);
    agent
        .heap
        .object_mut(target)
        .properties
        .insert(key, PropertyDescriptor::data(value, true, false, true));
}

/// Define an immutable value property (NaN, Infinity, constants).
pub fn define_frozen_value(agent: &mut Agent, target: Object, name: &str, value: Value) {
    let key = agent.intern(name);
    agent
        .heap
        .object_mut(target)
        .properties
        .insert(key, PropertyDescriptor::data(value, false, false, false));
}
