// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ### [15.2 Object Objects](https://262.ecma-international.org/5.1/#sec-15.2)

use super::arg;
use super::builtin_function::{define_builtin_function, make_intrinsic_constructor};
use super::ordinary;
use crate::ecmascript::abstract_operations::operations_on_objects::{
    create_data_property, own_property_keys,
};
use crate::ecmascript::abstract_operations::testing_and_comparison::is_callable;
use crate::ecmascript::abstract_operations::type_conversion::{
    to_boolean, to_object, to_string,
};
use crate::ecmascript::execution::agent::{Agent, ExceptionType, JsResult};
use crate::ecmascript::types::{
    JsString, Object, ObjectRecord, PropertyDescriptor, Value,
};

pub(crate) fn populate(agent: &mut Agent) {
    let object_prototype = agent.realm.intrinsics.object_prototype;
    let object_constructor = agent.realm.intrinsics.object_constructor;

    make_intrinsic_constructor(
        agent,
        object_constructor,
        "Object",
        1,
        object_constructor_call,
        object_constructor_construct,
        object_prototype,
    );

    define_builtin_function(agent, object_constructor, "getPrototypeOf", 1, object_get_prototype_of);
    define_builtin_function(
        agent,
        object_constructor,
        "getOwnPropertyDescriptor",
        2,
        object_get_own_property_descriptor,
    );
    define_builtin_function(
        agent,
        object_constructor,
        "getOwnPropertyNames",
        1,
        object_get_own_property_names,
    );
    define_builtin_function(agent, object_constructor, "create", 2, object_create);
    define_builtin_function(agent, object_constructor, "defineProperty", 3, object_define_property);
    define_builtin_function(
        agent,
        object_constructor,
        "defineProperties",
        2,
        object_define_properties,
    );
    define_builtin_function(agent, object_constructor, "seal", 1, object_seal);
    define_builtin_function(agent, object_constructor, "freeze", 1, object_freeze);
    define_builtin_function(
        agent,
        object_constructor,
        "preventExtensions",
        1,
        object_prevent_extensions,
    );
    define_builtin_function(agent, object_constructor, "isSealed", 1, object_is_sealed);
    define_builtin_function(agent, object_constructor, "isFrozen", 1, object_is_frozen);
    define_builtin_function(agent, object_constructor, "isExtensible", 1, object_is_extensible);
    define_builtin_function(agent, object_constructor, "keys", 1, object_keys);

    define_builtin_function(agent, object_prototype, "toString", 0, object_proto_to_string);
    define_builtin_function(agent, object_prototype, "valueOf", 0, object_proto_value_of);
    define_builtin_function(
        agent,
        object_prototype,
        "hasOwnProperty",
        1,
        object_proto_has_own_property,
    );
    define_builtin_function(
        agent,
        object_prototype,
        "isPrototypeOf",
        1,
        object_proto_is_prototype_of,
    );
    define_builtin_function(
        agent,
        object_prototype,
        "propertyIsEnumerable",
        1,
        object_proto_property_is_enumerable,
    );
}

/// ### [15.2.2.1 new Object (value)](https://262.ecma-international.org/5.1/#sec-15.2.2.1)
fn object_constructor_construct(agent: &mut Agent, arguments: &[Value]) -> JsResult<Value> {
    match arg(arguments, 0) {
        Value::Undefined | Value::Null => {
            let prototype = agent.realm.intrinsics.object_prototype;
            let o = agent
                .heap
                .create_object(ObjectRecord::ordinary(Some(prototype)));
            Ok(Value::Object(o))
        }
        value => Ok(Value::Object(to_object(agent, value)?)),
    }
}

/// ### [15.2.1.1 Object (value)](https://262.ecma-international.org/5.1/#sec-15.2.1.1)
fn object_constructor_call(agent: &mut Agent, _this: Value, arguments: &[Value]) -> JsResult<Value> {
    object_constructor_construct(agent, arguments)
}

fn require_object(agent: &mut Agent, value: Value, who: &str) -> JsResult<Object> {
    match value {
        Value::Object(o) => Ok(o),
        _ => {
            let message = format!("{who} called on non-object");
            Err(agent.throw_exception(ExceptionType::TypeError, message))
        }
    }
}

/// ### [15.2.3.2 Object.getPrototypeOf (O)](https://262.ecma-international.org/5.1/#sec-15.2.3.2)
fn object_get_prototype_of(agent: &mut Agent, _this: Value, arguments: &[Value]) -> JsResult<Value> {
    let o = require_object(agent, arg(arguments, 0), "Object.getPrototypeOf")?;
    Ok(match agent.heap.object(o).prototype {
        Some(p) => Value::Object(p),
        None => Value::Null,
    })
}

/// ### [8.10.4 FromPropertyDescriptor](https://262.ecma-international.org/5.1/#sec-8.10.4)
fn from_property_descriptor(agent: &mut Agent, descriptor: PropertyDescriptor) -> Value {
    let prototype = agent.realm.intrinsics.object_prototype;
    let obj = agent
        .heap
        .create_object(ObjectRecord::ordinary(Some(prototype)));
    if descriptor.is_data_descriptor() {
        let key = agent.intern("value");
        create_data_property(agent, obj, key, descriptor.value.unwrap_or(Value::Undefined));
        let key = agent.intern("writable");
        create_data_property(agent, obj, key, Value::Boolean(descriptor.writable()));
    } else {
        let key = agent.intern("get");
        create_data_property(agent, obj, key, descriptor.get.unwrap_or(Value::Undefined));
        let key = agent.intern("set");
        create_data_property(agent, obj, key, descriptor.set.unwrap_or(Value::Undefined));
    }
    let key = agent.intern("enumerable");
    create_data_property(agent, obj, key, Value::Boolean(descriptor.enumerable()));
    let key = agent.intern("configurable");
    create_data_property(agent, obj, key, Value::Boolean(descriptor.configurable()));
    Value::Object(obj)
}

/// ### [8.10.5 ToPropertyDescriptor](https://262.ecma-international.org/5.1/#sec-8.10.5)
fn to_property_descriptor(agent: &mut Agent, value: Value) -> JsResult<PropertyDescriptor> {
    let Value::Object(obj) = value else {
        return Err(agent.throw_exception_with_static_message(
            ExceptionType::TypeError,
            "Property description must be an object",
        ));
    };
    let mut descriptor = PropertyDescriptor::default();
    let key = agent.intern("enumerable");
    if ordinary::has_property(agent, obj, key) {
        let v = ordinary::get(agent, obj, key)?;
        descriptor.enumerable = Some(to_boolean(agent, v));
    }
    let key = agent.intern("configurable");
    if ordinary::has_property(agent, obj, key) {
        let v = ordinary::get(agent, obj, key)?;
        descriptor.configurable = Some(to_boolean(agent, v));
    }
    let key = agent.intern("value");
    if ordinary::has_property(agent, obj, key) {
        descriptor.value = Some(ordinary::get(agent, obj, key)?);
    }
    let key = agent.intern("writable");
    if ordinary::has_property(agent, obj, key) {
        let v = ordinary::get(agent, obj, key)?;
        descriptor.writable = Some(to_boolean(agent, v));
    }
    let key = agent.intern("get");
    if ordinary::has_property(agent, obj, key) {
        let getter = ordinary::get(agent, obj, key)?;
        if !getter.is_undefined() && is_callable(agent, getter).is_none() {
            return Err(agent.throw_exception_with_static_message(
                ExceptionType::TypeError,
                "Getter must be a function",
            ));
        }
        descriptor.get = Some(getter);
    }
    let key = agent.intern("set");
    if ordinary::has_property(agent, obj, key) {
        let setter = ordinary::get(agent, obj, key)?;
        if !setter.is_undefined() && is_callable(agent, setter).is_none() {
            return Err(agent.throw_exception_with_static_message(
                ExceptionType::TypeError,
                "Setter must be a function",
            ));
        }
        descriptor.set = Some(setter);
    }
    if descriptor.is_accessor_descriptor() && descriptor.is_data_descriptor() {
        return Err(agent.throw_exception_with_static_message(
            ExceptionType::TypeError,
            "Property descriptors may not be both data and accessor descriptors",
        ));
    }
    Ok(descriptor)
}

/// ### [15.2.3.3 Object.getOwnPropertyDescriptor (O, P)](https://262.ecma-international.org/5.1/#sec-15.2.3.3)
fn object_get_own_property_descriptor(
    agent: &mut Agent,
    _this: Value,
    arguments: &[Value],
) -> JsResult<Value> {
    let o = require_object(agent, arg(arguments, 0), "Object.getOwnPropertyDescriptor")?;
    let p = arg(arguments, 1);
    let name = to_string(agent, p)?;
    match ordinary::get_own_property(agent, o, name) {
        Some(descriptor) => Ok(from_property_descriptor(agent, descriptor)),
        None => Ok(Value::Undefined),
    }
}

/// ### [15.2.3.4 Object.getOwnPropertyNames (O)](https://262.ecma-international.org/5.1/#sec-15.2.3.4)
fn object_get_own_property_names(
    agent: &mut Agent,
    _this: Value,
    arguments: &[Value],
) -> JsResult<Value> {
    let o = require_object(agent, arg(arguments, 0), "Object.getOwnPropertyNames")?;
    let keys = own_property_keys(agent, o, false);
    Ok(Value::Object(string_list_to_array(agent, &keys)?))
}

/// ### [15.2.3.14 Object.keys (O)](https://262.ecma-international.org/5.1/#sec-15.2.3.14)
fn object_keys(agent: &mut Agent, _this: Value, arguments: &[Value]) -> JsResult<Value> {
    let o = require_object(agent, arg(arguments, 0), "Object.keys")?;
    let keys = own_property_keys(agent, o, true);
    Ok(Value::Object(string_list_to_array(agent, &keys)?))
}

fn string_list_to_array(agent: &mut Agent, keys: &[JsString]) -> JsResult<Object> {
    let array = super::array_objects::create_array(agent);
    for (index, &key) in keys.iter().enumerate() {
        let index_key = ordinary::index_key(agent, index);
        ordinary::define_own_property(
            agent,
            array,
            index_key,
            PropertyDescriptor::data(Value::String(key), true, true, true),
            false,
        )?;
    }
    Ok(array)
}

/// ### [15.2.3.5 Object.create (O [, Properties])](https://262.ecma-international.org/5.1/#sec-15.2.3.5)
fn object_create(agent: &mut Agent, _this: Value, arguments: &[Value]) -> JsResult<Value> {
    let prototype = match arg(arguments, 0) {
        Value::Object(o) => Some(o),
        Value::Null => None,
        _ => {
            return Err(agent.throw_exception_with_static_message(
                ExceptionType::TypeError,
                "Object prototype may only be an Object or null",
            ));
        }
    };
    let obj = agent.heap.create_object(ObjectRecord::ordinary(prototype));
    let properties = arg(arguments, 1);
    if !properties.is_undefined() {
        define_properties_on(agent, obj, properties)?;
    }
    Ok(Value::Object(obj))
}

/// ### [15.2.3.6 Object.defineProperty (O, P, Attributes)](https://262.ecma-international.org/5.1/#sec-15.2.3.6)
fn object_define_property(agent: &mut Agent, _this: Value, arguments: &[Value]) -> JsResult<Value> {
    let o = require_object(agent, arg(arguments, 0), "Object.defineProperty")?;
    let name = arg(arguments, 1);
    let name = to_string(agent, name)?;
    let descriptor = to_property_descriptor(agent, arg(arguments, 2))?;
    ordinary::define_own_property(agent, o, name, descriptor, true)?;
    Ok(Value::Object(o))
}

/// ### [15.2.3.7 Object.defineProperties (O, Properties)](https://262.ecma-international.org/5.1/#sec-15.2.3.7)
fn object_define_properties(
    agent: &mut Agent,
    _this: Value,
    arguments: &[Value],
) -> JsResult<Value> {
    let o = require_object(agent, arg(arguments, 0), "Object.defineProperties")?;
    define_properties_on(agent, o, arg(arguments, 1))?;
    Ok(Value::Object(o))
}

fn define_properties_on(agent: &mut Agent, o: Object, properties: Value) -> JsResult<()> {
    let properties = to_object(agent, properties)?;
    let keys = own_property_keys(agent, properties, true);
    let mut descriptors = Vec::with_capacity(keys.len());
    for key in keys {
        let value = ordinary::get(agent, properties, key)?;
        descriptors.push((key, to_property_descriptor(agent, value)?));
    }
    for (key, descriptor) in descriptors {
        ordinary::define_own_property(agent, o, key, descriptor, true)?;
    }
    Ok(())
}

/// ### [15.2.3.8 Object.seal (O)](https://262.ecma-international.org/5.1/#sec-15.2.3.8)
fn object_seal(agent: &mut Agent, _this: Value, arguments: &[Value]) -> JsResult<Value> {
    let o = require_object(agent, arg(arguments, 0), "Object.seal")?;
    let keys = own_property_keys(agent, o, false);
    for key in keys {
        if let Some(descriptor) = agent.heap.object_mut(o).properties.get_mut(&key) {
            descriptor.configurable = Some(false);
        }
    }
    agent.heap.object_mut(o).extensible = false;
    Ok(Value::Object(o))
}

/// ### [15.2.3.9 Object.freeze (O)](https://262.ecma-international.org/5.1/#sec-15.2.3.9)
fn object_freeze(agent: &mut Agent, _this: Value, arguments: &[Value]) -> JsResult<Value> {
    let o = require_object(agent, arg(arguments, 0), "Object.freeze")?;
    let keys = own_property_keys(agent, o, false);
    for key in keys {
        if let Some(descriptor) = agent.heap.object_mut(o).properties.get_mut(&key) {
            if descriptor.is_data_descriptor() {
                descriptor.writable = Some(false);
            }
            descriptor.configurable = Some(false);
        }
    }
    agent.heap.object_mut(o).extensible = false;
    Ok(Value::Object(o))
}

/// ### [15.2.3.10 Object.preventExtensions (O)](https://262.ecma-international.org/5.1/#sec-15.2.3.10)
fn object_prevent_extensions(
    agent: &mut Agent,
    _this: Value,
    arguments: &[Value],
) -> JsResult<Value> {
    let o = require_object(agent, arg(arguments, 0), "Object.preventExtensions")?;
    agent.heap.object_mut(o).extensible = false;
    Ok(Value::Object(o))
}

/// ### [15.2.3.11 Object.isSealed (O)](https://262.ecma-international.org/5.1/#sec-15.2.3.11)
fn object_is_sealed(agent: &mut Agent, _this: Value, arguments: &[Value]) -> JsResult<Value> {
    let o = require_object(agent, arg(arguments, 0), "Object.isSealed")?;
    let record = agent.heap.object(o);
    let sealed = !record.extensible
        && record
            .properties
            .values()
            .all(|descriptor| !descriptor.configurable());
    Ok(Value::Boolean(sealed))
}

/// ### [15.2.3.12 Object.isFrozen (O)](https://262.ecma-international.org/5.1/#sec-15.2.3.12)
fn object_is_frozen(agent: &mut Agent, _this: Value, arguments: &[Value]) -> JsResult<Value> {
    let o = require_object(agent, arg(arguments, 0), "Object.isFrozen")?;
    let record = agent.heap.object(o);
    let frozen = !record.extensible
        && record.properties.values().all(|descriptor| {
            !descriptor.configurable()
                && (!descriptor.is_data_descriptor() || !descriptor.writable())
        });
    Ok(Value::Boolean(frozen))
}

/// ### [15.2.3.13 Object.isExtensible (O)](https://262.ecma-international.org/5.1/#sec-15.2.3.13)
fn object_is_extensible(agent: &mut Agent, _this: Value, arguments: &[Value]) -> JsResult<Value> {
    let o = require_object(agent, arg(arguments, 0), "Object.isExtensible")?;
    Ok(Value::Boolean(agent.heap.object(o).extensible))
}

/// ### [15.2.4.2 Object.prototype.toString ( )](https://262.ecma-international.org/5.1/#sec-15.2.4.2)
fn object_proto_to_string(agent: &mut Agent, this: Value, _: &[Value]) -> JsResult<Value> {
    let text = match this {
        Value::Undefined => "[object Undefined]".to_string(),
        Value::Null => "[object Null]".to_string(),
        _ => {
            let o = to_object(agent, this)?;
            format!("[object {}]", agent.heap.object(o).class)
        }
    };
    Ok(Value::String(agent.intern(&text)))
}

/// ### [15.2.4.4 Object.prototype.valueOf ( )](https://262.ecma-international.org/5.1/#sec-15.2.4.4)
fn object_proto_value_of(agent: &mut Agent, this: Value, _: &[Value]) -> JsResult<Value> {
    Ok(Value::Object(to_object(agent, this)?))
}

/// ### [15.2.4.5 Object.prototype.hasOwnProperty (V)](https://262.ecma-international.org/5.1/#sec-15.2.4.5)
fn object_proto_has_own_property(
    agent: &mut Agent,
    this: Value,
    arguments: &[Value],
) -> JsResult<Value> {
    let name = arg(arguments, 0);
    let name = to_string(agent, name)?;
    let o = to_object(agent, this)?;
    Ok(Value::Boolean(
        ordinary::get_own_property(agent, o, name).is_some(),
    ))
}

/// ### [15.2.4.6 Object.prototype.isPrototypeOf (V)](https://262.ecma-international.org/5.1/#sec-15.2.4.6)
fn object_proto_is_prototype_of(
    agent: &mut Agent,
    this: Value,
    arguments: &[Value],
) -> JsResult<Value> {
    let Value::Object(mut v) = arg(arguments, 0) else {
        return Ok(Value::Boolean(false));
    };
    let o = to_object(agent, this)?;
    loop {
        match agent.heap.object(v).prototype {
            None => return Ok(Value::Boolean(false)),
            Some(p) if p == o => return Ok(Value::Boolean(true)),
            Some(p) => v = p,
        }
    }
}

/// ### [15.2.4.7 Object.prototype.propertyIsEnumerable (V)](https://262.ecma-international.org/5.1/#sec-15.2.4.7)
fn object_proto_property_is_enumerable(
    agent: &mut Agent,
    this: Value,
    arguments: &[Value],
) -> JsResult<Value> {
    let name = arg(arguments, 0);
    let name = to_string(agent, name)?;
    let o = to_object(agent, this)?;
    let enumerable = ordinary::get_own_property(agent, o, name)
        .is_some_and(|descriptor| descriptor.enumerable());
    Ok(Value::Boolean(enumerable))
}
