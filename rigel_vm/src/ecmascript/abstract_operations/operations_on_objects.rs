// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Operations on objects that sit above the internal methods: property
//! access from arbitrary base values, calling, and the helpers the builtin
//! modules lean on.

use crate::ecmascript::builtins::ecmascript_function;
use crate::ecmascript::builtins::ordinary;
use crate::ecmascript::execution::agent::{Agent, ExceptionType, JsResult};
use crate::ecmascript::types::{
    JsString, Object, ObjectData, PrimitiveValue, PropertyDescriptor, Value,
};

use super::testing_and_comparison::is_callable;
use super::type_conversion::to_object;

/// Property lookup from any base value; primitive bases are boxed for the
/// duration of the access, per the property accessor semantics of
/// [§11.2.1](https://262.ecma-international.org/5.1/#sec-11.2.1).
pub fn get_v(agent: &mut Agent, base: Value, p: JsString) -> JsResult<Value> {
    // Reading from a string wrapper created on the fly is the common case
    // (`"abc".length`); the wrapper exists only for this lookup.
    let o = to_object(agent, base)?;
    ordinary::get(agent, o, p)
}

/// Call a value ([§11.2.3 step 5](https://262.ecma-international.org/5.1/#sec-11.2.3)):
/// a TypeError unless it is a callable object.
pub fn call(
    agent: &mut Agent,
    f: Value,
    this_value: Value,
    arguments: &[Value],
) -> JsResult<Value> {
    let Some(callable) = is_callable(agent, f) else {
        let message = format!("{} is not a function", describe_value(agent, f));
        return Err(agent.throw_exception(ExceptionType::TypeError, message));
    };
    ecmascript_function::call_function(agent, callable, this_value, arguments)
}

/// A side-effect-free description for error messages; never runs script
/// code.
fn describe_value(agent: &Agent, value: Value) -> String {
    use crate::ecmascript::abstract_operations::type_conversion::number_to_string;
    match value {
        Value::Undefined => "undefined".to_string(),
        Value::Null => "null".to_string(),
        Value::Boolean(b) => b.to_string(),
        Value::Number(n) => number_to_string(n),
        Value::String(s) => format!("'{}'", agent.string_lossy(s)),
        Value::Object(o) => format!("[object {}]", agent.heap.object(o).class),
    }
}

/// ### DefineOwnProperty with Throw = true.
pub fn define_property_or_throw(
    agent: &mut Agent,
    o: Object,
    p: JsString,
    descriptor: PropertyDescriptor,
) -> JsResult<()> {
    ordinary::define_own_property(agent, o, p, descriptor, true)?;
    Ok(())
}

/// A writable, enumerable, configurable data property.
pub fn create_data_property(agent: &mut Agent, o: Object, p: JsString, value: Value) {
    let descriptor = PropertyDescriptor::data(value, true, true, true);
    // Fresh objects under engine control: the define cannot fail.
    ordinary::define_own_property(agent, o, p, descriptor, false)
        .expect("data property creation failed");
}

/// The own property names of an object in insertion order, optionally
/// restricted to enumerable ones. String wrapper index properties come
/// first, matching their creation order in actual engines.
pub fn own_property_keys(agent: &mut Agent, o: Object, enumerable_only: bool) -> Vec<JsString> {
    let mut keys = Vec::new();
    if let ObjectData::Primitive(PrimitiveValue::String(s)) = agent.heap.object(o).data {
        let len = agent.heap.string_len(s);
        for index in 0..len {
            keys.push(ordinary::index_key(agent, index));
        }
    }
    let record = agent.heap.object(o);
    keys.extend(
        record
            .properties
            .iter()
            .filter(|(_, descriptor)| !enumerable_only || descriptor.enumerable())
            .map(|(key, _)| *key),
    );
    keys
}

/// The key sequence `for-in` visits: own keys per prototype level in
/// insertion order, skipping names already seen on a nearer object
/// ([§12.6.4](https://262.ecma-international.org/5.1/#sec-12.6.4)).
pub fn enumerate_keys_for_in(agent: &mut Agent, o: Object) -> Vec<JsString> {
    let mut visited: Vec<JsString> = Vec::new();
    let mut shadowed: std::collections::HashSet<JsString> = std::collections::HashSet::new();
    let mut current = Some(o);
    while let Some(object) = current {
        let own = own_property_keys(agent, object, false);
        for key in own {
            if shadowed.insert(key) {
                let enumerable = ordinary::get_own_property(agent, object, key)
                    .is_some_and(|d| d.enumerable());
                if enumerable {
                    visited.push(key);
                }
            }
        }
        current = agent.heap.object(object).prototype;
    }
    visited
}
