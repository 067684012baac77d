// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ### [15.4 Array Objects](https://262.ecma-international.org/5.1/#sec-15.4)

use super::arg;
use super::builtin_function::{define_builtin_function, make_intrinsic_constructor};
use super::ordinary;
use crate::ecmascript::abstract_operations::operations_on_objects::call;
use crate::ecmascript::abstract_operations::testing_and_comparison::{
    is_callable, is_strictly_equal,
};
use crate::ecmascript::abstract_operations::type_conversion::{
    integer_part, to_boolean, to_number, to_object, to_string, to_uint32,
};
use crate::ecmascript::execution::agent::{Agent, ExceptionType, JsResult};
use crate::ecmascript::types::{Object, ObjectData, ObjectRecord, PropertyDescriptor, Value};

/// Create an empty Array exotic object.
pub fn create_array(agent: &mut Agent) -> Object {
    let prototype = agent.realm.intrinsics.array_prototype;
    let array = agent.heap.create_object(ObjectRecord::with_class(
        Some(prototype),
        "Array",
        ObjectData::Array,
    ));
    let length_key = agent.intern("length");
    agent.heap.object_mut(array).properties.insert(
        length_key,
        PropertyDescriptor::data(Value::Number(0.0), true, false, false),
    );
    array
}

/// Create an Array from a value list.
pub fn create_array_from_values(agent: &mut Agent, values: &[Value]) -> JsResult<Object> {
    let array = create_array(agent);
    for (index, &value) in values.iter().enumerate() {
        let key = ordinary::index_key(agent, index);
        ordinary::define_own_property(
            agent,
            array,
            key,
            PropertyDescriptor::data(value, true, true, true),
            false,
        )?;
    }
    Ok(array)
}

pub(crate) fn populate(agent: &mut Agent) {
    let array_prototype = agent.realm.intrinsics.array_prototype;
    let array_constructor = agent.realm.intrinsics.array_constructor;

    // [15.4.4] Array.prototype is itself an array.
    {
        let record = agent.heap.object_mut(array_prototype);
        record.class = "Array";
        record.data = ObjectData::Array;
    }
    let length_key = agent.intern("length");
    agent.heap.object_mut(array_prototype).properties.insert(
        length_key,
        PropertyDescriptor::data(Value::Number(0.0), true, false, false),
    );

    make_intrinsic_constructor(
        agent,
        array_constructor,
        "Array",
        1,
        array_constructor_call,
        array_constructor_construct,
        array_prototype,
    );
    define_builtin_function(agent, array_constructor, "isArray", 1, array_is_array);

    define_builtin_function(agent, array_prototype, "toString", 0, array_to_string);
    define_builtin_function(agent, array_prototype, "join", 1, array_join);
    define_builtin_function(agent, array_prototype, "pop", 0, array_pop);
    define_builtin_function(agent, array_prototype, "push", 1, array_push);
    define_builtin_function(agent, array_prototype, "reverse", 0, array_reverse);
    define_builtin_function(agent, array_prototype, "shift", 0, array_shift);
    define_builtin_function(agent, array_prototype, "unshift", 1, array_unshift);
    define_builtin_function(agent, array_prototype, "slice", 2, array_slice);
    define_builtin_function(agent, array_prototype, "splice", 2, array_splice);
    define_builtin_function(agent, array_prototype, "concat", 1, array_concat);
    define_builtin_function(agent, array_prototype, "sort", 1, array_sort);
    define_builtin_function(agent, array_prototype, "indexOf", 1, array_index_of);
    define_builtin_function(agent, array_prototype, "lastIndexOf", 1, array_last_index_of);
    define_builtin_function(agent, array_prototype, "every", 1, array_every);
    define_builtin_function(agent, array_prototype, "some", 1, array_some);
    define_builtin_function(agent, array_prototype, "forEach", 1, array_for_each);
    define_builtin_function(agent, array_prototype, "map", 1, array_map);
    define_builtin_function(agent, array_prototype, "filter", 1, array_filter);
    define_builtin_function(agent, array_prototype, "reduce", 1, array_reduce);
    define_builtin_function(agent, array_prototype, "reduceRight", 1, array_reduce_right);
}

/// ### [15.4.2 The Array Constructor](https://262.ecma-international.org/5.1/#sec-15.4.2)
fn array_constructor_construct(agent: &mut Agent, arguments: &[Value]) -> JsResult<Value> {
    // [15.4.2.2] A single numeric argument is the initial length.
    if arguments.len() == 1 {
        if let Value::Number(n) = arguments[0] {
            let len = to_uint32(agent, arguments[0])?;
            if len as f64 != n {
                return Err(agent.throw_exception_with_static_message(
                    ExceptionType::RangeError,
                    "Invalid array length",
                ));
            }
            let array = create_array(agent);
            let length_key = agent.intern("length");
            agent.heap.object_mut(array).properties.insert(
                length_key,
                PropertyDescriptor::data(Value::Number(len as f64), true, false, false),
            );
            return Ok(Value::Object(array));
        }
    }
    // [15.4.2.1] Otherwise the arguments are the elements.
    Ok(Value::Object(create_array_from_values(agent, arguments)?))
}

fn array_constructor_call(agent: &mut Agent, _this: Value, arguments: &[Value]) -> JsResult<Value> {
    array_constructor_construct(agent, arguments)
}

/// ### [15.4.3.2 Array.isArray (arg)](https://262.ecma-international.org/5.1/#sec-15.4.3.2)
fn array_is_array(agent: &mut Agent, _this: Value, arguments: &[Value]) -> JsResult<Value> {
    let result = matches!(
        arg(arguments, 0),
        Value::Object(o) if matches!(agent.heap.object(o).data, ObjectData::Array)
    );
    Ok(Value::Boolean(result))
}

fn this_object_and_length(agent: &mut Agent, this: Value) -> JsResult<(Object, u32)> {
    let o = to_object(agent, this)?;
    let length_key = agent.intern("length");
    let length = ordinary::get(agent, o, length_key)?;
    let length = to_uint32(agent, length)?;
    Ok((o, length))
}

fn get_index(agent: &mut Agent, o: Object, index: u32) -> JsResult<Value> {
    let key = ordinary::index_key(agent, index as usize);
    ordinary::get(agent, o, key)
}

fn has_index(agent: &mut Agent, o: Object, index: u32) -> bool {
    let key = ordinary::index_key(agent, index as usize);
    ordinary::has_property(agent, o, key)
}

fn put_index(agent: &mut Agent, o: Object, index: u32, value: Value) -> JsResult<()> {
    let key = ordinary::index_key(agent, index as usize);
    ordinary::put(agent, o, key, value, true)
}

fn delete_index(agent: &mut Agent, o: Object, index: u32) -> JsResult<()> {
    let key = ordinary::index_key(agent, index as usize);
    ordinary::delete(agent, o, key, true)?;
    Ok(())
}

fn put_length(agent: &mut Agent, o: Object, length: f64) -> JsResult<()> {
    let key = agent.intern("length");
    ordinary::put(agent, o, key, Value::Number(length), true)
}

/// Relative index clamping used by slice and splice ([§15.4.4.10]).
fn clamp_relative(relative: f64, length: u32) -> u32 {
    if relative < 0.0 {
        (length as f64 + relative).max(0.0) as u32
    } else {
        relative.min(length as f64) as u32
    }
}

fn require_callback(agent: &mut Agent, value: Value, who: &str) -> JsResult<Object> {
    match is_callable(agent, value) {
        Some(f) => Ok(f),
        None => {
            let message = format!("{who}: callback is not a function");
            Err(agent.throw_exception(ExceptionType::TypeError, message))
        }
    }
}

/// ### [15.4.4.2 Array.prototype.toString ( )](https://262.ecma-international.org/5.1/#sec-15.4.4.2)
fn array_to_string(agent: &mut Agent, this: Value, _: &[Value]) -> JsResult<Value> {
    let array = to_object(agent, this)?;
    let join_key = agent.intern("join");
    let join = ordinary::get(agent, array, join_key)?;
    if is_callable(agent, join).is_some() {
        call(agent, join, Value::Object(array), &[])
    } else {
        // Fall back to Object.prototype.toString.
        let text = format!("[object {}]", agent.heap.object(array).class);
        Ok(Value::String(agent.intern(&text)))
    }
}

/// ### [15.4.4.5 Array.prototype.join (separator)](https://262.ecma-international.org/5.1/#sec-15.4.4.5)
fn array_join(agent: &mut Agent, this: Value, arguments: &[Value]) -> JsResult<Value> {
    let (o, length) = this_object_and_length(agent, this)?;
    let separator = match arg(arguments, 0) {
        Value::Undefined => ",".to_string(),
        value => {
            let s = to_string(agent, value)?;
            agent.string_lossy(s)
        }
    };
    let mut pieces: Vec<String> = Vec::with_capacity(length as usize);
    for index in 0..length {
        let element = get_index(agent, o, index)?;
        let piece = match element {
            Value::Undefined | Value::Null => String::new(),
            value => {
                let s = to_string(agent, value)?;
                agent.string_lossy(s)
            }
        };
        pieces.push(piece);
    }
    Ok(Value::String(agent.intern(&pieces.join(&separator))))
}

/// ### [15.4.4.6 Array.prototype.pop ( )](https://262.ecma-international.org/5.1/#sec-15.4.4.6)
fn array_pop(agent: &mut Agent, this: Value, _: &[Value]) -> JsResult<Value> {
    let (o, length) = this_object_and_length(agent, this)?;
    if length == 0 {
        put_length(agent, o, 0.0)?;
        return Ok(Value::Undefined);
    }
    let element = get_index(agent, o, length - 1)?;
    delete_index(agent, o, length - 1)?;
    put_length(agent, o, (length - 1) as f64)?;
    Ok(element)
}

/// ### [15.4.4.7 Array.prototype.push (...)](https://262.ecma-international.org/5.1/#sec-15.4.4.7)
fn array_push(agent: &mut Agent, this: Value, arguments: &[Value]) -> JsResult<Value> {
    let (o, length) = this_object_and_length(agent, this)?;
    let mut n = length as f64;
    for &value in arguments {
        let key = {
            let text = crate::ecmascript::abstract_operations::type_conversion::number_to_string(n);
            agent.intern(&text)
        };
        ordinary::put(agent, o, key, value, true)?;
        n += 1.0;
    }
    put_length(agent, o, n)?;
    Ok(Value::Number(n))
}

/// ### [15.4.4.8 Array.prototype.reverse ( )](https://262.ecma-international.org/5.1/#sec-15.4.4.8)
fn array_reverse(agent: &mut Agent, this: Value, _: &[Value]) -> JsResult<Value> {
    let (o, length) = this_object_and_length(agent, this)?;
    let middle = length / 2;
    let mut lower = 0u32;
    while lower != middle {
        let upper = length - lower - 1;
        let lower_value = get_index(agent, o, lower)?;
        let upper_value = get_index(agent, o, upper)?;
        let lower_exists = has_index(agent, o, lower);
        let upper_exists = has_index(agent, o, upper);
        match (lower_exists, upper_exists) {
            (true, true) => {
                put_index(agent, o, lower, upper_value)?;
                put_index(agent, o, upper, lower_value)?;
            }
            (false, true) => {
                put_index(agent, o, lower, upper_value)?;
                delete_index(agent, o, upper)?;
            }
            (true, false) => {
                delete_index(agent, o, lower)?;
                put_index(agent, o, upper, lower_value)?;
            }
            (false, false) => {}
        }
        lower += 1;
    }
    Ok(Value::Object(o))
}

/// ### [15.4.4.9 Array.prototype.shift ( )](https://262.ecma-international.org/5.1/#sec-15.4.4.9)
fn array_shift(agent: &mut Agent, this: Value, _: &[Value]) -> JsResult<Value> {
    let (o, length) = this_object_and_length(agent, this)?;
    if length == 0 {
        put_length(agent, o, 0.0)?;
        return Ok(Value::Undefined);
    }
    let first = get_index(agent, o, 0)?;
    for index in 1..length {
        if has_index(agent, o, index) {
            let value = get_index(agent, o, index)?;
            put_index(agent, o, index - 1, value)?;
        } else {
            delete_index(agent, o, index - 1)?;
        }
    }
    delete_index(agent, o, length - 1)?;
    put_length(agent, o, (length - 1) as f64)?;
    Ok(first)
}

/// ### [15.4.4.13 Array.prototype.unshift (...)](https://262.ecma-international.org/5.1/#sec-15.4.4.13)
fn array_unshift(agent: &mut Agent, this: Value, arguments: &[Value]) -> JsResult<Value> {
    let (o, length) = this_object_and_length(agent, this)?;
    let insert = arguments.len() as u32;
    if insert > 0 {
        let mut k = length;
        while k > 0 {
            if has_index(agent, o, k - 1) {
                let value = get_index(agent, o, k - 1)?;
                put_index(agent, o, k + insert - 1, value)?;
            } else {
                delete_index(agent, o, k + insert - 1)?;
            }
            k -= 1;
        }
        for (index, &value) in arguments.iter().enumerate() {
            put_index(agent, o, index as u32, value)?;
        }
    }
    let new_length = (length + insert) as f64;
    put_length(agent, o, new_length)?;
    Ok(Value::Number(new_length))
}

/// ### [15.4.4.10 Array.prototype.slice (start, end)](https://262.ecma-international.org/5.1/#sec-15.4.4.10)
fn array_slice(agent: &mut Agent, this: Value, arguments: &[Value]) -> JsResult<Value> {
    let (o, length) = this_object_and_length(agent, this)?;
    let start = arg(arguments, 0);
    let start = to_number(agent, start)?;
    let from = clamp_relative(integer_part(start), length);
    let to = match arg(arguments, 1) {
        Value::Undefined => length,
        end => {
            let end = to_number(agent, end)?;
            clamp_relative(integer_part(end), length)
        }
    };
    let result = create_array(agent);
    let mut n = 0usize;
    for index in from..to {
        if has_index(agent, o, index) {
            let value = get_index(agent, o, index)?;
            let key = ordinary::index_key(agent, n);
            ordinary::define_own_property(
                agent,
                result,
                key,
                PropertyDescriptor::data(value, true, true, true),
                false,
            )?;
        }
        n += 1;
    }
    let saturating = to.saturating_sub(from);
    put_length(agent, result, saturating as f64)?;
    Ok(Value::Object(result))
}

/// ### [15.4.4.12 Array.prototype.splice (start, deleteCount, ...)](https://262.ecma-international.org/5.1/#sec-15.4.4.12)
fn array_splice(agent: &mut Agent, this: Value, arguments: &[Value]) -> JsResult<Value> {
    let (o, length) = this_object_and_length(agent, this)?;
    let start = arg(arguments, 0);
    let start = to_number(agent, start)?;
    let actual_start = clamp_relative(integer_part(start), length);
    let delete_count = arg(arguments, 1);
    let delete_count = to_number(agent, delete_count)?;
    let actual_delete = integer_part(delete_count)
        .max(0.0)
        .min((length - actual_start) as f64) as u32;
    let items: Vec<Value> = arguments.iter().skip(2).copied().collect();

    // Collect removed elements first.
    let removed = create_array(agent);
    for offset in 0..actual_delete {
        if has_index(agent, o, actual_start + offset) {
            let value = get_index(agent, o, actual_start + offset)?;
            let key = ordinary::index_key(agent, offset as usize);
            ordinary::define_own_property(
                agent,
                removed,
                key,
                PropertyDescriptor::data(value, true, true, true),
                false,
            )?;
        }
    }
    put_length(agent, removed, actual_delete as f64)?;

    let item_count = items.len() as u32;
    if item_count < actual_delete {
        // Shift the tail left.
        for k in actual_start..(length - actual_delete) {
            let from = k + actual_delete;
            let to = k + item_count;
            if has_index(agent, o, from) {
                let value = get_index(agent, o, from)?;
                put_index(agent, o, to, value)?;
            } else {
                delete_index(agent, o, to)?;
            }
        }
        for k in ((length - actual_delete + item_count)..length).rev() {
            delete_index(agent, o, k)?;
        }
    } else if item_count > actual_delete {
        // Shift the tail right, from the end.
        let mut k = length - actual_delete;
        while k > actual_start {
            let from = k + actual_delete - 1;
            let to = k + item_count - 1;
            if has_index(agent, o, from) {
                let value = get_index(agent, o, from)?;
                put_index(agent, o, to, value)?;
            } else {
                delete_index(agent, o, to)?;
            }
            k -= 1;
        }
    }
    for (offset, &item) in items.iter().enumerate() {
        put_index(agent, o, actual_start + offset as u32, item)?;
    }
    put_length(agent, o, (length - actual_delete + item_count) as f64)?;
    Ok(Value::Object(removed))
}

/// ### [15.4.4.4 Array.prototype.concat (...)](https://262.ecma-international.org/5.1/#sec-15.4.4.4)
fn array_concat(agent: &mut Agent, this: Value, arguments: &[Value]) -> JsResult<Value> {
    let o = to_object(agent, this)?;
    let result = create_array(agent);
    let mut n = 0usize;
    let mut items = vec![Value::Object(o)];
    items.extend_from_slice(arguments);
    for item in items {
        let spreadable = matches!(
            item,
            Value::Object(obj) if matches!(agent.heap.object(obj).data, ObjectData::Array)
        );
        if spreadable {
            let Value::Object(array) = item else {
                unreachable!()
            };
            let length_key = agent.intern("length");
            let length = ordinary::get(agent, array, length_key)?;
            let length = to_uint32(agent, length)?;
            for index in 0..length {
                if has_index(agent, array, index) {
                    let value = get_index(agent, array, index)?;
                    let key = ordinary::index_key(agent, n);
                    ordinary::define_own_property(
                        agent,
                        result,
                        key,
                        PropertyDescriptor::data(value, true, true, true),
                        false,
                    )?;
                }
                n += 1;
            }
        } else {
            let key = ordinary::index_key(agent, n);
            ordinary::define_own_property(
                agent,
                result,
                key,
                PropertyDescriptor::data(item, true, true, true),
                false,
            )?;
            n += 1;
        }
    }
    put_length(agent, result, n as f64)?;
    Ok(Value::Object(result))
}

/// ### [15.4.4.11 Array.prototype.sort (comparefn)](https://262.ecma-international.org/5.1/#sec-15.4.4.11)
///
/// Holes sort past undefineds, which sort past everything else. The
/// comparator can run arbitrary code, so an insertion sort that threads
/// `JsResult` keeps error propagation simple.
fn array_sort(agent: &mut Agent, this: Value, arguments: &[Value]) -> JsResult<Value> {
    let (o, length) = this_object_and_length(agent, this)?;
    let comparator = arg(arguments, 0);
    if !comparator.is_undefined() && is_callable(agent, comparator).is_none() {
        return Err(agent.throw_exception_with_static_message(
            ExceptionType::TypeError,
            "The comparison function must be either a function or undefined",
        ));
    }
    let mut present: Vec<Value> = Vec::new();
    let mut undefined_count = 0usize;
    let mut hole_count = 0usize;
    for index in 0..length {
        if !has_index(agent, o, index) {
            hole_count += 1;
        } else {
            let value = get_index(agent, o, index)?;
            if value.is_undefined() {
                undefined_count += 1;
            } else {
                present.push(value);
            }
        }
    }

    // Insertion sort using SortCompare.
    for i in 1..present.len() {
        let item = present[i];
        let mut j = i;
        while j > 0 {
            let ordering = sort_compare(agent, comparator, present[j - 1], item)?;
            if ordering <= 0.0 {
                break;
            }
            present[j] = present[j - 1];
            j -= 1;
        }
        present[j] = item;
    }

    let mut index = 0u32;
    for &value in &present {
        put_index(agent, o, index, value)?;
        index += 1;
    }
    for _ in 0..undefined_count {
        put_index(agent, o, index, Value::Undefined)?;
        index += 1;
    }
    for _ in 0..hole_count {
        delete_index(agent, o, index)?;
        index += 1;
    }
    Ok(Value::Object(o))
}

fn sort_compare(
    agent: &mut Agent,
    comparator: Value,
    x: Value,
    y: Value,
) -> JsResult<f64> {
    if !comparator.is_undefined() {
        let result = call(agent, comparator, Value::Undefined, &[x, y])?;
        let number = to_number(agent, result)?;
        return Ok(if number.is_nan() { 0.0 } else { number });
    }
    let x = to_string(agent, x)?;
    let y = to_string(agent, y)?;
    let x = agent.string(x);
    let y = agent.string(y);
    Ok(match x.cmp(y) {
        std::cmp::Ordering::Less => -1.0,
        std::cmp::Ordering::Equal => 0.0,
        std::cmp::Ordering::Greater => 1.0,
    })
}

/// ### [15.4.4.14 Array.prototype.indexOf (searchElement, fromIndex)](https://262.ecma-international.org/5.1/#sec-15.4.4.14)
fn array_index_of(agent: &mut Agent, this: Value, arguments: &[Value]) -> JsResult<Value> {
    let (o, length) = this_object_and_length(agent, this)?;
    if length == 0 {
        return Ok(Value::Number(-1.0));
    }
    let search = arg(arguments, 0);
    let from = arg(arguments, 1);
    let from = to_number(agent, from)?;
    let from = integer_part(from);
    let mut k = if from >= 0.0 {
        from as i64
    } else {
        (length as f64 + from).max(0.0) as i64
    };
    while k < length as i64 {
        let index = k as u32;
        if has_index(agent, o, index) {
            let element = get_index(agent, o, index)?;
            if is_strictly_equal(agent, search, element) {
                return Ok(Value::Number(k as f64));
            }
        }
        k += 1;
    }
    Ok(Value::Number(-1.0))
}

/// ### [15.4.4.15 Array.prototype.lastIndexOf (searchElement, fromIndex)](https://262.ecma-international.org/5.1/#sec-15.4.4.15)
fn array_last_index_of(agent: &mut Agent, this: Value, arguments: &[Value]) -> JsResult<Value> {
    let (o, length) = this_object_and_length(agent, this)?;
    if length == 0 {
        return Ok(Value::Number(-1.0));
    }
    let search = arg(arguments, 0);
    let from = if arguments.len() >= 2 {
        let from = to_number(agent, arguments[1])?;
        integer_part(from)
    } else {
        (length - 1) as f64
    };
    let mut k = if from >= 0.0 {
        from.min((length - 1) as f64) as i64
    } else {
        length as i64 + from as i64
    };
    while k >= 0 {
        let index = k as u32;
        if has_index(agent, o, index) {
            let element = get_index(agent, o, index)?;
            if is_strictly_equal(agent, search, element) {
                return Ok(Value::Number(k as f64));
            }
        }
        k -= 1;
    }
    Ok(Value::Number(-1.0))
}

/// ### [15.4.4.16 Array.prototype.every (callbackfn, thisArg)](https://262.ecma-international.org/5.1/#sec-15.4.4.16)
fn array_every(agent: &mut Agent, this: Value, arguments: &[Value]) -> JsResult<Value> {
    let (o, length) = this_object_and_length(agent, this)?;
    let callback = require_callback(agent, arg(arguments, 0), "Array.prototype.every")?;
    let this_arg = arg(arguments, 1);
    for index in 0..length {
        if has_index(agent, o, index) {
            let value = get_index(agent, o, index)?;
            let args = [value, Value::Number(index as f64), Value::Object(o)];
            let result = call(agent, Value::Object(callback), this_arg, &args)?;
            if !to_boolean(agent, result) {
                return Ok(Value::Boolean(false));
            }
        }
    }
    Ok(Value::Boolean(true))
}

/// ### [15.4.4.17 Array.prototype.some (callbackfn, thisArg)](https://262.ecma-international.org/5.1/#sec-15.4.4.17)
fn array_some(agent: &mut Agent, this: Value, arguments: &[Value]) -> JsResult<Value> {
    let (o, length) = this_object_and_length(agent, this)?;
    let callback = require_callback(agent, arg(arguments, 0), "Array.prototype.some")?;
    let this_arg = arg(arguments, 1);
    for index in 0..length {
        if has_index(agent, o, index) {
            let value = get_index(agent, o, index)?;
            let args = [value, Value::Number(index as f64), Value::Object(o)];
            let result = call(agent, Value::Object(callback), this_arg, &args)?;
            if to_boolean(agent, result) {
                return Ok(Value::Boolean(true));
            }
        }
    }
    Ok(Value::Boolean(false))
}

/// ### [15.4.4.18 Array.prototype.forEach (callbackfn, thisArg)](https://262.ecma-international.org/5.1/#sec-15.4.4.18)
fn array_for_each(agent: &mut Agent, this: Value, arguments: &[Value]) -> JsResult<Value> {
    let (o, length) = this_object_and_length(agent, this)?;
    let callback = require_callback(agent, arg(arguments, 0), "Array.prototype.forEach")?;
    let this_arg = arg(arguments, 1);
    for index in 0..length {
        if has_index(agent, o, index) {
            let value = get_index(agent, o, index)?;
            let args = [value, Value::Number(index as f64), Value::Object(o)];
            call(agent, Value::Object(callback), this_arg, &args)?;
        }
    }
    Ok(Value::Undefined)
}

/// ### [15.4.4.19 Array.prototype.map (callbackfn, thisArg)](https://262.ecma-international.org/5.1/#sec-15.4.4.19)
fn array_map(agent: &mut Agent, this: Value, arguments: &[Value]) -> JsResult<Value> {
    let (o, length) = this_object_and_length(agent, this)?;
    let callback = require_callback(agent, arg(arguments, 0), "Array.prototype.map")?;
    let this_arg = arg(arguments, 1);
    let result = create_array(agent);
    for index in 0..length {
        if has_index(agent, o, index) {
            let value = get_index(agent, o, index)?;
            let args = [value, Value::Number(index as f64), Value::Object(o)];
            let mapped = call(agent, Value::Object(callback), this_arg, &args)?;
            let key = ordinary::index_key(agent, index as usize);
            ordinary::define_own_property(
                agent,
                result,
                key,
                PropertyDescriptor::data(mapped, true, true, true),
                false,
            )?;
        }
    }
    put_length(agent, result, length as f64)?;
    Ok(Value::Object(result))
}

/// ### [15.4.4.20 Array.prototype.filter (callbackfn, thisArg)](https://262.ecma-international.org/5.1/#sec-15.4.4.20)
fn array_filter(agent: &mut Agent, this: Value, arguments: &[Value]) -> JsResult<Value> {
    let (o, length) = this_object_and_length(agent, this)?;
    let callback = require_callback(agent, arg(arguments, 0), "Array.prototype.filter")?;
    let this_arg = arg(arguments, 1);
    let result = create_array(agent);
    let mut to_index = 0usize;
    for index in 0..length {
        if has_index(agent, o, index) {
            let value = get_index(agent, o, index)?;
            let args = [value, Value::Number(index as f64), Value::Object(o)];
            let selected = call(agent, Value::Object(callback), this_arg, &args)?;
            if to_boolean(agent, selected) {
                let key = ordinary::index_key(agent, to_index);
                ordinary::define_own_property(
                    agent,
                    result,
                    key,
                    PropertyDescriptor::data(value, true, true, true),
                    false,
                )?;
                to_index += 1;
            }
        }
    }
    Ok(Value::Object(result))
}

/// ### [15.4.4.21 Array.prototype.reduce (callbackfn, initialValue)](https://262.ecma-international.org/5.1/#sec-15.4.4.21)
fn array_reduce(agent: &mut Agent, this: Value, arguments: &[Value]) -> JsResult<Value> {
    let (o, length) = this_object_and_length(agent, this)?;
    let callback = require_callback(agent, arg(arguments, 0), "Array.prototype.reduce")?;
    let mut accumulator;
    let mut k = 0u32;
    if arguments.len() >= 2 {
        accumulator = arguments[1];
    } else {
        // Find the first present element.
        loop {
            if k >= length {
                return Err(agent.throw_exception_with_static_message(
                    ExceptionType::TypeError,
                    "Reduce of empty array with no initial value",
                ));
            }
            if has_index(agent, o, k) {
                accumulator = get_index(agent, o, k)?;
                k += 1;
                break;
            }
            k += 1;
        }
    }
    while k < length {
        if has_index(agent, o, k) {
            let value = get_index(agent, o, k)?;
            let args = [accumulator, value, Value::Number(k as f64), Value::Object(o)];
            accumulator = call(agent, Value::Object(callback), Value::Undefined, &args)?;
        }
        k += 1;
    }
    Ok(accumulator)
}

/// ### [15.4.4.22 Array.prototype.reduceRight (callbackfn, initialValue)](https://262.ecma-international.org/5.1/#sec-15.4.4.22)
fn array_reduce_right(agent: &mut Agent, this: Value, arguments: &[Value]) -> JsResult<Value> {
    let (o, length) = this_object_and_length(agent, this)?;
    let callback = require_callback(agent, arg(arguments, 0), "Array.prototype.reduceRight")?;
    let mut accumulator;
    let mut k = length as i64 - 1;
    if arguments.len() >= 2 {
        accumulator = arguments[1];
    } else {
        loop {
            if k < 0 {
                return Err(agent.throw_exception_with_static_message(
                    ExceptionType::TypeError,
                    "Reduce of empty array with no initial value",
                ));
            }
            if has_index(agent, o, k as u32) {
                accumulator = get_index(agent, o, k as u32)?;
                k -= 1;
                break;
            }
            k -= 1;
        }
    }
    while k >= 0 {
        if has_index(agent, o, k as u32) {
            let value = get_index(agent, o, k as u32)?;
            let args = [accumulator, value, Value::Number(k as f64), Value::Object(o)];
            accumulator = call(agent, Value::Object(callback), Value::Undefined, &args)?;
        }
        k -= 1;
    }
    Ok(accumulator)
}
