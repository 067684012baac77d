// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ### [15.7 Number Objects](https://262.ecma-international.org/5.1/#sec-15.7)

use super::arg;
use super::builtin_function::{
    define_builtin_function, define_frozen_value, make_intrinsic_constructor,
};
use super::primitive_objects::{create_number_object, this_number_value};
use crate::ecmascript::abstract_operations::type_conversion::{
    integer_part, number_to_string, to_number,
};
use crate::ecmascript::execution::agent::{Agent, ExceptionType, JsResult};
use crate::ecmascript::types::{ObjectData, PrimitiveValue, Value};

pub(crate) fn populate(agent: &mut Agent) {
    let number_prototype = agent.realm.intrinsics.number_prototype;
    let number_constructor = agent.realm.intrinsics.number_constructor;

    // [15.7.4] Number.prototype is a Number object with value +0.
    {
        let record = agent.heap.object_mut(number_prototype);
        record.class = "Number";
        record.data = ObjectData::Primitive(PrimitiveValue::Number(0.0));
    }

    make_intrinsic_constructor(
        agent,
        number_constructor,
        "Number",
        1,
        number_constructor_call,
        number_constructor_construct,
        number_prototype,
    );

    // [15.7.3] Constructor value properties.
    define_frozen_value(
        agent,
        number_constructor,
        "MAX_VALUE",
        Value::Number(f64::MAX),
    );
    define_frozen_value(
        agent,
        number_constructor,
        "MIN_VALUE",
        Value::Number(5e-324),
    );
    define_frozen_value(agent, number_constructor, "NaN", Value::Number(f64::NAN));
    define_frozen_value(
        agent,
        number_constructor,
        "POSITIVE_INFINITY",
        Value::Number(f64::INFINITY),
    );
    define_frozen_value(
        agent,
        number_constructor,
        "NEGATIVE_INFINITY",
        Value::Number(f64::NEG_INFINITY),
    );

    define_builtin_function(agent, number_prototype, "toString", 1, number_to_string_method);
    define_builtin_function(agent, number_prototype, "valueOf", 0, number_value_of);
    define_builtin_function(agent, number_prototype, "toFixed", 1, number_to_fixed);
}

/// ### [15.7.2.1 new Number (value)](https://262.ecma-international.org/5.1/#sec-15.7.2.1)
fn number_constructor_construct(agent: &mut Agent, arguments: &[Value]) -> JsResult<Value> {
    let value = match arguments.first() {
        None => 0.0,
        Some(&value) => to_number(agent, value)?,
    };
    Ok(Value::Object(create_number_object(agent, value)))
}

/// ### [15.7.1.1 Number (value)](https://262.ecma-international.org/5.1/#sec-15.7.1.1)
fn number_constructor_call(agent: &mut Agent, _this: Value, arguments: &[Value]) -> JsResult<Value> {
    let value = match arguments.first() {
        None => 0.0,
        Some(&value) => to_number(agent, value)?,
    };
    Ok(Value::Number(value))
}

/// ### [15.7.4.2 Number.prototype.toString ([radix])](https://262.ecma-international.org/5.1/#sec-15.7.4.2)
fn number_to_string_method(agent: &mut Agent, this: Value, arguments: &[Value]) -> JsResult<Value> {
    let value = this_number_value(agent, this)?;
    let radix = match arg(arguments, 0) {
        Value::Undefined => 10.0,
        radix => {
            let radix = to_number(agent, radix)?;
            integer_part(radix)
        }
    };
    if !(2.0..=36.0).contains(&radix) {
        return Err(agent.throw_exception_with_static_message(
            ExceptionType::RangeError,
            "toString() radix must be between 2 and 36",
        ));
    }
    let text = if radix == 10.0 {
        number_to_string(value)
    } else {
        number_to_radix_string(value, radix as u32)
    };
    Ok(Value::String(agent.intern(&text)))
}

/// Non-decimal rendering: an exact integer part plus up to 20 fractional
/// digits, enough for round-tripping doubles in practice.
fn number_to_radix_string(value: f64, radix: u32) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    let negative = value < 0.0;
    let mut magnitude = value.abs();
    let mut integer = magnitude.trunc();
    magnitude -= integer;

    let digits = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut integer_digits: Vec<u8> = Vec::new();
    if integer == 0.0 {
        integer_digits.push(b'0');
    }
    while integer >= 1.0 {
        let digit = (integer % radix as f64) as usize;
        integer_digits.push(digits[digit]);
        integer = (integer / radix as f64).trunc();
    }
    integer_digits.reverse();

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(std::str::from_utf8(&integer_digits).unwrap());
    if magnitude > 0.0 {
        out.push('.');
        let mut fraction = magnitude;
        for _ in 0..20 {
            fraction *= radix as f64;
            let digit = fraction.trunc() as usize;
            out.push(digits[digit.min(35)] as char);
            fraction -= fraction.trunc();
            if fraction == 0.0 {
                break;
            }
        }
    }
    out
}

/// ### [15.7.4.4 Number.prototype.valueOf ( )](https://262.ecma-international.org/5.1/#sec-15.7.4.4)
fn number_value_of(agent: &mut Agent, this: Value, _: &[Value]) -> JsResult<Value> {
    Ok(Value::Number(this_number_value(agent, this)?))
}

/// ### [15.7.4.5 Number.prototype.toFixed (fractionDigits)](https://262.ecma-international.org/5.1/#sec-15.7.4.5)
fn number_to_fixed(agent: &mut Agent, this: Value, arguments: &[Value]) -> JsResult<Value> {
    let value = this_number_value(agent, this)?;
    let digits = arg(arguments, 0);
    let digits = integer_part(to_number(agent, digits)?);
    if !(0.0..=20.0).contains(&digits) {
        return Err(agent.throw_exception_with_static_message(
            ExceptionType::RangeError,
            "toFixed() digits argument must be between 0 and 20",
        ));
    }
    // Magnitudes at or above 10^21 fall back to ToString.
    let text = if value.is_nan() {
        "NaN".to_string()
    } else if value.abs() >= 1e21 {
        number_to_string(value)
    } else {
        format!("{:.*}", digits as usize, value)
    };
    Ok(Value::String(agent.intern(&text)))
}
