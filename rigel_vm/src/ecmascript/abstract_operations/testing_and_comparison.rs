// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Equality, relational comparison and callability checks.

use crate::ecmascript::builtins::ordinary::PreferredType;
use crate::ecmascript::execution::agent::{Agent, JsResult};
use crate::ecmascript::types::{Object, Value};

use super::type_conversion::{to_number, to_primitive};

/// ### [9.11 IsCallable](https://262.ecma-international.org/5.1/#sec-9.11)
pub fn is_callable(agent: &Agent, value: Value) -> Option<Object> {
    match value {
        Value::Object(o) if agent.is_callable_object(o) => Some(o),
        _ => None,
    }
}

/// ### [9.12 The SameValue Algorithm](https://262.ecma-international.org/5.1/#sec-9.12)
///
/// String handles are interned, so handle equality is contents equality.
pub fn same_value(_agent: &Agent, x: Value, y: Value) -> bool {
    match (x, y) {
        (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
        (Value::Number(a), Value::Number(b)) => {
            // NaN is the same value as NaN; +0 and -0 are different.
            if a.is_nan() && b.is_nan() {
                true
            } else {
                a.to_bits() == b.to_bits()
            }
        }
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Boolean(a), Value::Boolean(b)) => a == b,
        (Value::Object(a), Value::Object(b)) => a == b,
        _ => false,
    }
}

/// ### [11.9.6 The Strict Equality Comparison Algorithm](https://262.ecma-international.org/5.1/#sec-11.9.6)
pub fn is_strictly_equal(_agent: &Agent, x: Value, y: Value) -> bool {
    match (x, y) {
        (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
        // IEEE semantics: NaN != NaN, +0 == -0.
        (Value::Number(a), Value::Number(b)) => a == b,
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Boolean(a), Value::Boolean(b)) => a == b,
        (Value::Object(a), Value::Object(b)) => a == b,
        _ => false,
    }
}

/// ### [11.9.3 The Abstract Equality Comparison Algorithm](https://262.ecma-international.org/5.1/#sec-11.9.3)
pub fn is_loosely_equal(agent: &mut Agent, x: Value, y: Value) -> JsResult<bool> {
    // 1. Same type: strict comparison.
    if same_type(x, y) {
        return Ok(is_strictly_equal(agent, x, y));
    }
    match (x, y) {
        // 2–3. null and undefined equal each other.
        (Value::Null, Value::Undefined) | (Value::Undefined, Value::Null) => Ok(true),
        // 4–5. Number vs String: compare numerically.
        (Value::Number(_), Value::String(_)) => {
            let y = to_number(agent, y)?;
            is_loosely_equal(agent, x, Value::Number(y))
        }
        (Value::String(_), Value::Number(_)) => {
            let x = to_number(agent, x)?;
            is_loosely_equal(agent, Value::Number(x), y)
        }
        // 6–7. Booleans convert to numbers.
        (Value::Boolean(_), _) => {
            let x = to_number(agent, x)?;
            is_loosely_equal(agent, Value::Number(x), y)
        }
        (_, Value::Boolean(_)) => {
            let y = to_number(agent, y)?;
            is_loosely_equal(agent, x, Value::Number(y))
        }
        // 8–9. An object compares through its primitive value.
        (Value::Number(_) | Value::String(_), Value::Object(_)) => {
            let y = to_primitive(agent, y, None)?;
            is_loosely_equal(agent, x, y)
        }
        (Value::Object(_), Value::Number(_) | Value::String(_)) => {
            let x = to_primitive(agent, x, None)?;
            is_loosely_equal(agent, x, y)
        }
        // 10. Otherwise false.
        _ => Ok(false),
    }
}

fn same_type(x: Value, y: Value) -> bool {
    matches!(
        (x, y),
        (Value::Undefined, Value::Undefined)
            | (Value::Null, Value::Null)
            | (Value::Boolean(_), Value::Boolean(_))
            | (Value::Number(_), Value::Number(_))
            | (Value::String(_), Value::String(_))
            | (Value::Object(_), Value::Object(_))
    )
}

/// ### [11.8.5 The Abstract Relational Comparison Algorithm](https://262.ecma-international.org/5.1/#sec-11.8.5)
///
/// Returns `None` for the undefined result (a NaN operand).
pub fn abstract_relational_comparison(
    agent: &mut Agent,
    x: Value,
    y: Value,
    left_first: bool,
) -> JsResult<Option<bool>> {
    // 1–2. ToPrimitive with hint Number, in evaluation order.
    let (px, py) = if left_first {
        let px = to_primitive(agent, x, Some(PreferredType::Number))?;
        let py = to_primitive(agent, y, Some(PreferredType::Number))?;
        (px, py)
    } else {
        let py = to_primitive(agent, y, Some(PreferredType::Number))?;
        let px = to_primitive(agent, x, Some(PreferredType::Number))?;
        (px, py)
    };
    // 4. Two strings compare by code units.
    if let (Value::String(a), Value::String(b)) = (px, py) {
        let a = agent.string(a);
        let b = agent.string(b);
        return Ok(Some(a < b));
    }
    // 3. Otherwise numerically.
    let nx = to_number(agent, px)?;
    let ny = to_number(agent, py)?;
    if nx.is_nan() || ny.is_nan() {
        return Ok(None);
    }
    Ok(Some(nx < ny))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_value_distinguishes_zeros_and_nans() {
        let agent = &crate::ecmascript::execution::agent::Agent::new(std::rc::Rc::new(
            crate::ecmascript::execution::agent::DefaultHostHooks,
        ));
        assert!(same_value(agent, Value::Number(f64::NAN), Value::Number(f64::NAN)));
        assert!(!same_value(agent, Value::Number(0.0), Value::Number(-0.0)));
        assert!(is_strictly_equal(agent, Value::Number(0.0), Value::Number(-0.0)));
        assert!(!is_strictly_equal(
            agent,
            Value::Number(f64::NAN),
            Value::Number(f64::NAN)
        ));
    }
}
