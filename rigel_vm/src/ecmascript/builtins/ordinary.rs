// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ### [8.12 Algorithms for Object Internal Methods](https://262.ecma-international.org/5.1/#sec-8.12)
//!
//! The default internal methods, plus the two exotic behaviours the core
//! needs: Array's `[[DefineOwnProperty]]`
//! ([§15.4.5.1](https://262.ecma-international.org/5.1/#sec-15.4.5.1)), which
//! maintains the `length` invariant, and String wrappers' virtual index
//! properties ([§15.5.5.2](https://262.ecma-international.org/5.1/#sec-15.5.5.2)).

use crate::ecmascript::abstract_operations::testing_and_comparison::same_value;
use crate::ecmascript::abstract_operations::type_conversion::{
    number_to_string, to_number, to_uint32,
};
use crate::ecmascript::execution::agent::{Agent, ExceptionType, JsResult};
use crate::ecmascript::types::{
    JsString, Object, ObjectData, PrimitiveValue, PropertyDescriptor, Value,
};

/// Property names that are canonical array indices
/// ([§15.4](https://262.ecma-international.org/5.1/#sec-15.4)): the string
/// form of an integer below 2^32 - 1.
pub fn array_index(agent: &Agent, p: JsString) -> Option<u32> {
    let units = agent.string(p);
    if units.is_empty() || units.len() > 10 {
        return None;
    }
    let mut value: u64 = 0;
    for &unit in units {
        if !(0x30..=0x39).contains(&unit) {
            return None;
        }
        value = value * 10 + (unit - 0x30) as u64;
    }
    // No leading zeros: only "0" itself starts with one.
    if units[0] == 0x30 && units.len() > 1 {
        return None;
    }
    if value < u32::MAX as u64 {
        Some(value as u32)
    } else {
        None
    }
}

/// ### [8.12.1 \[\[GetOwnProperty\]\] (P)](https://262.ecma-international.org/5.1/#sec-8.12.1)
///
/// The `&mut` is for String wrappers, whose index properties materialize
/// single-character strings on access.
pub fn get_own_property(
    agent: &mut Agent,
    o: Object,
    p: JsString,
) -> Option<PropertyDescriptor> {
    if let Some(descriptor) = agent.heap.object(o).properties.get(&p) {
        return Some(*descriptor);
    }
    // [15.5.5.2] String wrapper index properties.
    if let ObjectData::Primitive(PrimitiveValue::String(s)) = agent.heap.object(o).data {
        if let Some(index) = array_index(agent, p) {
            let units = agent.string(s);
            if let Some(&unit) = units.get(index as usize) {
                let single = agent.intern_units(&[unit]);
                return Some(PropertyDescriptor::data(
                    Value::String(single),
                    false,
                    true,
                    false,
                ));
            }
        }
    }
    None
}

/// Own-property existence without materializing values.
fn has_own_property(agent: &Agent, o: Object, p: JsString) -> bool {
    if agent.heap.object(o).properties.contains_key(&p) {
        return true;
    }
    if let ObjectData::Primitive(PrimitiveValue::String(s)) = agent.heap.object(o).data {
        if let Some(index) = array_index(agent, p) {
            return (index as usize) < agent.heap.string_len(s);
        }
    }
    false
}

/// ### [8.12.2 \[\[GetProperty\]\] (P)](https://262.ecma-international.org/5.1/#sec-8.12.2)
pub fn get_property(
    agent: &mut Agent,
    o: Object,
    p: JsString,
) -> Option<PropertyDescriptor> {
    let mut current = Some(o);
    while let Some(object) = current {
        if let Some(descriptor) = get_own_property(agent, object, p) {
            return Some(descriptor);
        }
        current = agent.heap.object(object).prototype;
    }
    None
}

/// ### [8.12.3 \[\[Get\]\] (P)](https://262.ecma-international.org/5.1/#sec-8.12.3)
pub fn get(agent: &mut Agent, o: Object, p: JsString) -> JsResult<Value> {
    // 1. Let desc be the result of calling [[GetProperty]].
    let Some(descriptor) = get_property(agent, o, p) else {
        // 2. If desc is undefined, return undefined.
        return Ok(Value::Undefined);
    };
    // 3. If IsDataDescriptor(desc) is true, return desc.[[Value]].
    if descriptor.is_data_descriptor() {
        return Ok(descriptor.value.unwrap_or(Value::Undefined));
    }
    // 4. Otherwise, let getter be desc.[[Get]].
    let getter = descriptor.get.unwrap_or(Value::Undefined);
    // 5. If getter is undefined, return undefined.
    if getter.is_undefined() {
        return Ok(Value::Undefined);
    }
    // 6. Return the result of calling the [[Call]] internal method of
    // getter providing O as the this value.
    crate::ecmascript::abstract_operations::operations_on_objects::call(
        agent,
        getter,
        Value::Object(o),
        &[],
    )
}

/// ### [8.12.4 \[\[CanPut\]\] (P)](https://262.ecma-international.org/5.1/#sec-8.12.4)
pub fn can_put(agent: &mut Agent, o: Object, p: JsString) -> bool {
    // 1. Let desc be the result of calling [[GetOwnProperty]].
    if let Some(descriptor) = get_own_property(agent, o, p) {
        // 2. If desc is not undefined:
        return if descriptor.is_accessor_descriptor() {
            // a. If IsAccessorDescriptor(desc), return false if
            // desc.[[Set]] is undefined.
            !descriptor.set.unwrap_or(Value::Undefined).is_undefined()
        } else {
            // b. Else return desc.[[Writable]].
            descriptor.writable()
        };
    }
    // 3–4. Consult the prototype chain.
    let Some(proto) = agent.heap.object(o).prototype else {
        return agent.heap.object(o).extensible;
    };
    let Some(inherited) = get_property(agent, proto, p) else {
        return agent.heap.object(o).extensible;
    };
    if inherited.is_accessor_descriptor() {
        !inherited.set.unwrap_or(Value::Undefined).is_undefined()
    } else {
        // 8. A non-writable data property anywhere on the chain blocks
        // shadowing.
        agent.heap.object(o).extensible && inherited.writable()
    }
}

/// ### [8.12.5 \[\[Put\]\] (P, V, Throw)](https://262.ecma-international.org/5.1/#sec-8.12.5)
pub fn put(
    agent: &mut Agent,
    o: Object,
    p: JsString,
    value: Value,
    throw: bool,
) -> JsResult<()> {
    // 1. If [[CanPut]] is false:
    if !can_put(agent, o, p) {
        // a. If Throw, throw a TypeError exception.
        if throw {
            let message = format!(
                "Cannot assign to read-only property '{}'.",
                agent.string_lossy(p)
            );
            return Err(agent.throw_exception(ExceptionType::TypeError, message));
        }
        return Ok(());
    }
    // 2–3. An own data property is updated in place.
    if let Some(own) = get_own_property(agent, o, p) {
        if own.is_data_descriptor() {
            let update = PropertyDescriptor {
                value: Some(value),
                ..Default::default()
            };
            define_own_property(agent, o, p, update, throw)?;
            return Ok(());
        }
    }
    // 4–5. An inherited accessor is invoked.
    if let Some(descriptor) = get_property(agent, o, p) {
        if descriptor.is_accessor_descriptor() {
            let setter = descriptor.set.unwrap_or(Value::Undefined);
            crate::ecmascript::abstract_operations::operations_on_objects::call(
                agent,
                setter,
                Value::Object(o),
                &[value],
            )?;
            return Ok(());
        }
    }
    // 6. Otherwise create an own data property.
    let descriptor = PropertyDescriptor::data(value, true, true, true);
    define_own_property(agent, o, p, descriptor, throw)?;
    Ok(())
}

/// ### [8.12.6 \[\[HasProperty\]\] (P)](https://262.ecma-international.org/5.1/#sec-8.12.6)
pub fn has_property(agent: &Agent, o: Object, p: JsString) -> bool {
    let mut current = Some(o);
    while let Some(object) = current {
        if has_own_property(agent, object, p) {
            return true;
        }
        current = agent.heap.object(object).prototype;
    }
    false
}

/// ### [8.12.7 \[\[Delete\]\] (P, Throw)](https://262.ecma-international.org/5.1/#sec-8.12.7)
pub fn delete(agent: &mut Agent, o: Object, p: JsString, throw: bool) -> JsResult<bool> {
    // 1. Let desc be the result of calling [[GetOwnProperty]].
    let Some(descriptor) = get_own_property(agent, o, p) else {
        // 2. If desc is undefined, return true.
        return Ok(true);
    };
    // 3. If desc.[[Configurable]] is true, remove the own property.
    if descriptor.configurable() {
        agent.heap.object_mut(o).properties.shift_remove(&p);
        return Ok(true);
    }
    // 4. Else if Throw, throw a TypeError exception.
    if throw {
        let message = format!(
            "Cannot delete non-configurable property '{}'.",
            agent.string_lossy(p)
        );
        return Err(agent.throw_exception(ExceptionType::TypeError, message));
    }
    Ok(false)
}

/// ### [8.12.8 \[\[DefaultValue\]\] (hint)](https://262.ecma-international.org/5.1/#sec-8.12.8)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferredType {
    String,
    Number,
}

pub fn default_value(
    agent: &mut Agent,
    o: Object,
    hint: Option<PreferredType>,
) -> JsResult<Value> {
    // When hint is absent, Date objects behave as if hint String was
    // supplied; all other objects as if hint Number.
    let hint = hint.unwrap_or_else(|| {
        if matches!(agent.heap.object(o).data, ObjectData::Date(_)) {
            PreferredType::String
        } else {
            PreferredType::Number
        }
    });
    let to_string = agent.intern("toString");
    let value_of = agent.intern("valueOf");
    let methods = match hint {
        PreferredType::String => [to_string, value_of],
        PreferredType::Number => [value_of, to_string],
    };
    for name in methods {
        let method = get(agent, o, name)?;
        if let Value::Object(m) = method {
            if agent.is_callable_object(m) {
                let result = crate::ecmascript::abstract_operations::operations_on_objects::call(
                    agent,
                    method,
                    Value::Object(o),
                    &[],
                )?;
                if !result.is_object() {
                    return Ok(result);
                }
            }
        }
    }
    Err(agent.throw_exception_with_static_message(
        ExceptionType::TypeError,
        "Cannot convert object to primitive value",
    ))
}

/// ### [8.12.9 \[\[DefineOwnProperty\]\] (P, Desc, Throw)](https://262.ecma-international.org/5.1/#sec-8.12.9)
///
/// Dispatches to the Array variant for Array exotic objects.
pub fn define_own_property(
    agent: &mut Agent,
    o: Object,
    p: JsString,
    descriptor: PropertyDescriptor,
    throw: bool,
) -> JsResult<bool> {
    if matches!(agent.heap.object(o).data, ObjectData::Array) {
        return array_define_own_property(agent, o, p, descriptor, throw);
    }
    ordinary_define_own_property(agent, o, p, descriptor, throw)
}

fn reject(agent: &mut Agent, p: JsString, throw: bool) -> JsResult<bool> {
    if throw {
        let message = format!(
            "Cannot redefine property '{}'.",
            agent.string_lossy(p)
        );
        Err(agent.throw_exception(ExceptionType::TypeError, message))
    } else {
        Ok(false)
    }
}

pub fn ordinary_define_own_property(
    agent: &mut Agent,
    o: Object,
    p: JsString,
    descriptor: PropertyDescriptor,
    throw: bool,
) -> JsResult<bool> {
    // 1. Let current be the result of [[GetOwnProperty]](P).
    let current = get_own_property(agent, o, p);
    let extensible = agent.heap.object(o).extensible;

    let Some(current) = current else {
        // 3. If current is undefined and extensible is false, reject.
        if !extensible {
            return reject(agent, p, throw);
        }
        // 4. Create the own property with absent fields defaulted.
        agent
            .heap
            .object_mut(o)
            .properties
            .insert(p, descriptor.complete());
        return Ok(true);
    };

    // 5. Return true if every field in Desc is absent.
    if descriptor == PropertyDescriptor::default() {
        return Ok(true);
    }

    // 7. If current.[[Configurable]] is false:
    if !current.configurable() {
        if descriptor.configurable == Some(true) {
            return reject(agent, p, throw);
        }
        if descriptor
            .enumerable
            .is_some_and(|e| e != current.enumerable())
        {
            return reject(agent, p, throw);
        }
        // 9. Changing between data and accessor needs configurability.
        if !descriptor.is_generic_descriptor()
            && descriptor.is_data_descriptor() != current.is_data_descriptor()
        {
            return reject(agent, p, throw);
        }
        if current.is_data_descriptor() && descriptor.is_data_descriptor() {
            // 10.a. Non-writable, non-configurable data properties are
            // frozen in place.
            if !current.writable() {
                if descriptor.writable == Some(true) {
                    return reject(agent, p, throw);
                }
                if let Some(value) = descriptor.value {
                    if !same_value(agent, value, current.value.unwrap_or(Value::Undefined)) {
                        return reject(agent, p, throw);
                    }
                }
            }
        } else if current.is_accessor_descriptor() && descriptor.is_accessor_descriptor() {
            // 11.a. Accessor halves may not change.
            if let Some(set) = descriptor.set {
                if !same_value(agent, set, current.set.unwrap_or(Value::Undefined)) {
                    return reject(agent, p, throw);
                }
            }
            if let Some(get) = descriptor.get {
                if !same_value(agent, get, current.get.unwrap_or(Value::Undefined)) {
                    return reject(agent, p, throw);
                }
            }
        }
    }

    // 12. Every validated field of Desc is set on the property.
    let merged = merge_descriptor(current, descriptor);
    agent.heap.object_mut(o).properties.insert(p, merged);
    Ok(true)
}

/// Apply the present fields of `descriptor` over `current`, converting
/// between data and accessor forms when the kind flips.
fn merge_descriptor(
    current: PropertyDescriptor,
    descriptor: PropertyDescriptor,
) -> PropertyDescriptor {
    let mut merged = current;
    if descriptor.is_accessor_descriptor() && current.is_data_descriptor() {
        merged.value = None;
        merged.writable = None;
        merged.get = Some(Value::Undefined);
        merged.set = Some(Value::Undefined);
    } else if descriptor.is_data_descriptor() && current.is_accessor_descriptor() {
        merged.get = None;
        merged.set = None;
        merged.value = Some(Value::Undefined);
        merged.writable = Some(false);
    }
    if let Some(value) = descriptor.value {
        merged.value = Some(value);
    }
    if let Some(writable) = descriptor.writable {
        merged.writable = Some(writable);
    }
    if let Some(get) = descriptor.get {
        merged.get = Some(get);
    }
    if let Some(set) = descriptor.set {
        merged.set = Some(set);
    }
    if let Some(enumerable) = descriptor.enumerable {
        merged.enumerable = Some(enumerable);
    }
    if let Some(configurable) = descriptor.configurable {
        merged.configurable = Some(configurable);
    }
    merged
}

/// ### [15.4.5.1 \[\[DefineOwnProperty\]\] for Array objects](https://262.ecma-international.org/5.1/#sec-15.4.5.1)
fn array_define_own_property(
    agent: &mut Agent,
    o: Object,
    p: JsString,
    descriptor: PropertyDescriptor,
    throw: bool,
) -> JsResult<bool> {
    let length_key = agent.intern("length");
    // 1. The "length" own property always exists on arrays.
    let old_len_desc = get_own_property(agent, o, length_key).expect("array without length");
    let old_len = match old_len_desc.value {
        Some(Value::Number(n)) => n as u32,
        _ => unreachable!("array length is always a number"),
    };

    if p == length_key {
        // 3. Defining "length" itself.
        let Some(new_len_value) = descriptor.value else {
            return ordinary_define_own_property(agent, o, p, descriptor, throw);
        };
        let new_len = to_uint32(agent, new_len_value)?;
        let numeric = to_number(agent, new_len_value)?;
        if new_len as f64 != numeric {
            return Err(agent
                .throw_exception_with_static_message(ExceptionType::RangeError, "Invalid array length"));
        }
        let mut new_len_desc = descriptor;
        new_len_desc.value = Some(Value::Number(new_len as f64));
        if new_len >= old_len {
            return ordinary_define_own_property(agent, o, p, new_len_desc, throw);
        }
        // f. Shrinking: the length must currently be writable.
        if !old_len_desc.writable() {
            return reject(agent, p, throw);
        }
        if !ordinary_define_own_property(agent, o, length_key, new_len_desc, throw)? {
            return Ok(false);
        }
        // l. Delete indices from the top down; a non-configurable element
        // stops the truncation and fixes the length just above it.
        let mut doomed: Vec<(u32, JsString)> = agent
            .heap
            .object(o)
            .properties
            .keys()
            .filter_map(|&key| array_index(agent, key).map(|index| (index, key)))
            .filter(|&(index, _)| index >= new_len)
            .collect();
        doomed.sort_unstable_by(|a, b| b.0.cmp(&a.0));
        for (index, key) in doomed {
            if !delete(agent, o, key, false)? {
                let mut fixed = new_len_desc;
                fixed.value = Some(Value::Number((index + 1) as f64));
                ordinary_define_own_property(agent, o, length_key, fixed, false)?;
                return reject(agent, p, throw);
            }
        }
        return Ok(true);
    }

    if let Some(index) = array_index(agent, p) {
        // 4. Defining an array index.
        if index >= old_len && !old_len_desc.writable() {
            return reject(agent, p, throw);
        }
        if !ordinary_define_own_property(agent, o, p, descriptor, false)? {
            return reject(agent, p, throw);
        }
        if index >= old_len {
            let update = PropertyDescriptor {
                value: Some(Value::Number((index + 1) as f64)),
                ..Default::default()
            };
            ordinary_define_own_property(agent, o, length_key, update, false)?;
        }
        return Ok(true);
    }

    // 5. Any other property is ordinary.
    ordinary_define_own_property(agent, o, p, descriptor, throw)
}

/// Convenience for internal property setup: a writable, non-enumerable,
/// configurable data property, defined without invariants checks.
pub fn define_builtin_property(
    agent: &mut Agent,
    o: Object,
    name: &str,
    value: Value,
) {
    let key = agent.intern(name);
    agent
        .heap
        .object_mut(o)
        .properties
        .insert(key, PropertyDescriptor::data(value, true, false, true));
}

/// Number-keyed helper used by Array and String builtins.
pub fn index_key(agent: &mut Agent, index: usize) -> JsString {
    let text = number_to_string(index as f64);
    agent.intern(&text)
}
