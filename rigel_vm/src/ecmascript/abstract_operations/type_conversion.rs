// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ### [9 Type Conversion and Testing](https://262.ecma-international.org/5.1/#sec-9)

use crate::ecmascript::builtins::ordinary::{default_value, PreferredType};
use crate::ecmascript::builtins::primitive_objects;
use crate::ecmascript::execution::agent::{Agent, ExceptionType, JsResult};
use crate::ecmascript::types::language::string::is_trimmable_whitespace;
use crate::ecmascript::types::{JsString, Object, Value};

/// ### [9.1 ToPrimitive](https://262.ecma-international.org/5.1/#sec-9.1)
pub fn to_primitive(
    agent: &mut Agent,
    input: Value,
    preferred_type: Option<PreferredType>,
) -> JsResult<Value> {
    match input {
        // Objects defer to [[DefaultValue]].
        Value::Object(o) => default_value(agent, o, preferred_type),
        // Every other type converts to itself.
        _ => Ok(input),
    }
}

/// ### [9.2 ToBoolean](https://262.ecma-international.org/5.1/#sec-9.2)
pub fn to_boolean(agent: &Agent, value: Value) -> bool {
    match value {
        Value::Undefined | Value::Null => false,
        Value::Boolean(b) => b,
        Value::Number(n) => !(n == 0.0 || n.is_nan()),
        Value::String(s) => agent.heap.string_len(s) != 0,
        Value::Object(_) => true,
    }
}

/// ### [9.3 ToNumber](https://262.ecma-international.org/5.1/#sec-9.3)
pub fn to_number(agent: &mut Agent, value: Value) -> JsResult<f64> {
    match value {
        Value::Undefined => Ok(f64::NAN),
        Value::Null => Ok(0.0),
        Value::Boolean(b) => Ok(if b { 1.0 } else { 0.0 }),
        Value::Number(n) => Ok(n),
        Value::String(s) => Ok(string_to_number(agent.string(s))),
        Value::Object(_) => {
            let primitive = to_primitive(agent, value, Some(PreferredType::Number))?;
            to_number(agent, primitive)
        }
    }
}

/// ### [9.3.1 ToNumber Applied to the String Type](https://262.ecma-international.org/5.1/#sec-9.3.1)
///
/// The StringNumericLiteral grammar: optional whitespace, then a decimal
/// literal (signs and `Infinity` allowed), or a hex integer literal. The
/// empty string is 0; anything else is NaN.
pub fn string_to_number(units: &[u16]) -> f64 {
    let start = units
        .iter()
        .position(|&u| !is_trimmable_whitespace(u))
        .unwrap_or(units.len());
    let end = units
        .iter()
        .rposition(|&u| !is_trimmable_whitespace(u))
        .map_or(start, |i| i + 1);
    let trimmed = &units[start..end];
    if trimmed.is_empty() {
        return 0.0;
    }
    // Work on a UTF-8 copy; the grammar is pure ASCII, so any non-ASCII
    // content fails the shape checks below.
    let Ok(text) = String::from_utf16(trimmed) else {
        return f64::NAN;
    };

    // HexIntegerLiteral (no sign allowed).
    if let Some(digits) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return f64::NAN;
        }
        return digits
            .bytes()
            .fold(0.0, |acc, b| acc * 16.0 + (b as char).to_digit(16).unwrap() as f64);
    }

    let (sign, magnitude) = match text.strip_prefix('-') {
        Some(rest) => (-1.0, rest),
        None => (1.0, text.strip_prefix('+').unwrap_or(&text)),
    };
    if magnitude == "Infinity" {
        return sign * f64::INFINITY;
    }
    if !is_str_decimal_literal(magnitude) {
        return f64::NAN;
    }
    match fast_float::parse::<f64, _>(magnitude) {
        Ok(value) => sign * value,
        Err(_) => f64::NAN,
    }
}

/// StrUnsignedDecimalLiteral: digits [. digits] [exp] | . digits [exp]
fn is_str_decimal_literal(text: &str) -> bool {
    let bytes = text.as_bytes();
    let mut i = 0;
    let integer_digits = count_digits(bytes, i);
    i += integer_digits;
    let mut fraction_digits = 0;
    if bytes.get(i) == Some(&b'.') {
        i += 1;
        fraction_digits = count_digits(bytes, i);
        i += fraction_digits;
    }
    if integer_digits == 0 && fraction_digits == 0 {
        return false;
    }
    if matches!(bytes.get(i), Some(b'e') | Some(b'E')) {
        i += 1;
        if matches!(bytes.get(i), Some(b'+') | Some(b'-')) {
            i += 1;
        }
        let exponent_digits = count_digits(bytes, i);
        if exponent_digits == 0 {
            return false;
        }
        i += exponent_digits;
    }
    i == bytes.len()
}

fn count_digits(bytes: &[u8], from: usize) -> usize {
    bytes[from..]
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .count()
}

/// ### [9.4 ToInteger](https://262.ecma-international.org/5.1/#sec-9.4)
pub fn to_integer(agent: &mut Agent, value: Value) -> JsResult<f64> {
    let number = to_number(agent, value)?;
    Ok(integer_part(number))
}

pub fn integer_part(number: f64) -> f64 {
    if number.is_nan() {
        0.0
    } else {
        number.trunc()
    }
}

/// ### [9.5 ToInt32](https://262.ecma-international.org/5.1/#sec-9.5)
pub fn to_int32(agent: &mut Agent, value: Value) -> JsResult<i32> {
    let number = to_number(agent, value)?;
    Ok(to_int32_f64(number))
}

pub fn to_int32_f64(number: f64) -> i32 {
    to_uint32_f64(number) as i32
}

/// ### [9.6 ToUint32](https://262.ecma-international.org/5.1/#sec-9.6)
pub fn to_uint32(agent: &mut Agent, value: Value) -> JsResult<u32> {
    let number = to_number(agent, value)?;
    Ok(to_uint32_f64(number))
}

pub fn to_uint32_f64(number: f64) -> u32 {
    if !number.is_finite() || number == 0.0 {
        return 0;
    }
    let number = number.trunc();
    // Modulo 2^32, with the sign folded in.
    let modulus = number.rem_euclid(4294967296.0);
    modulus as u32
}

/// ### [9.7 ToUint16](https://262.ecma-international.org/5.1/#sec-9.7)
pub fn to_uint16(agent: &mut Agent, value: Value) -> JsResult<u16> {
    let number = to_number(agent, value)?;
    if !number.is_finite() || number == 0.0 {
        return Ok(0);
    }
    Ok(number.trunc().rem_euclid(65536.0) as u16)
}

/// ### [9.8 ToString](https://262.ecma-international.org/5.1/#sec-9.8)
pub fn to_string(agent: &mut Agent, value: Value) -> JsResult<JsString> {
    match value {
        Value::Undefined => Ok(agent.intern("undefined")),
        Value::Null => Ok(agent.intern("null")),
        Value::Boolean(true) => Ok(agent.intern("true")),
        Value::Boolean(false) => Ok(agent.intern("false")),
        Value::Number(n) => {
            let text = number_to_string(n);
            Ok(agent.intern(&text))
        }
        Value::String(s) => Ok(s),
        Value::Object(_) => {
            let primitive = to_primitive(agent, value, Some(PreferredType::String))?;
            to_string(agent, primitive)
        }
    }
}

/// ### [9.8.1 ToString Applied to the Number Type](https://262.ecma-international.org/5.1/#sec-9.8.1)
///
/// The shortest decimal that round-trips, with the spec's exponent
/// thresholds; `ryu-js` implements exactly this.
pub fn number_to_string(number: f64) -> String {
    if number.is_nan() {
        return "NaN".to_string();
    }
    if number == 0.0 {
        return "0".to_string();
    }
    if number == f64::INFINITY {
        return "Infinity".to_string();
    }
    if number == f64::NEG_INFINITY {
        return "-Infinity".to_string();
    }
    ryu_js::Buffer::new().format_finite(number).to_string()
}

/// ### [9.9 ToObject](https://262.ecma-international.org/5.1/#sec-9.9)
pub fn to_object(agent: &mut Agent, value: Value) -> JsResult<Object> {
    match value {
        Value::Undefined | Value::Null => Err(agent.throw_exception_with_static_message(
            ExceptionType::TypeError,
            "Cannot convert undefined or null to object",
        )),
        Value::Boolean(b) => Ok(primitive_objects::create_boolean_object(agent, b)),
        Value::Number(n) => Ok(primitive_objects::create_number_object(agent, n)),
        Value::String(s) => Ok(primitive_objects::create_string_object(agent, s)),
        Value::Object(o) => Ok(o),
    }
}

/// ### [9.10 CheckObjectCoercible](https://262.ecma-international.org/5.1/#sec-9.10)
pub fn check_object_coercible(agent: &mut Agent, value: Value) -> JsResult<()> {
    match value {
        Value::Undefined | Value::Null => Err(agent.throw_exception_with_static_message(
            ExceptionType::TypeError,
            "Cannot convert undefined or null to object",
        )),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn units(s: &str) -> Vec<u16> {
        s.encode_utf16().collect()
    }

    #[test]
    fn string_numeric_literal_grammar() {
        assert_eq!(string_to_number(&units("")), 0.0);
        assert_eq!(string_to_number(&units("  42  ")), 42.0);
        assert_eq!(string_to_number(&units("1.5e3")), 1500.0);
        assert_eq!(string_to_number(&units(".5")), 0.5);
        assert_eq!(string_to_number(&units("5.")), 5.0);
        assert_eq!(string_to_number(&units("0xFF")), 255.0);
        assert_eq!(string_to_number(&units("-Infinity")), f64::NEG_INFINITY);
        assert_eq!(string_to_number(&units("+12")), 12.0);
        assert!(string_to_number(&units("12px")).is_nan());
        assert!(string_to_number(&units("inf")).is_nan());
        assert!(string_to_number(&units("0x")).is_nan());
        assert!(string_to_number(&units("-0x10")).is_nan());
        assert!(string_to_number(&units("1e")).is_nan());
        assert!(string_to_number(&units(".")).is_nan());
    }

    #[test]
    fn number_to_string_specials() {
        assert_eq!(number_to_string(f64::NAN), "NaN");
        assert_eq!(number_to_string(f64::INFINITY), "Infinity");
        assert_eq!(number_to_string(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(number_to_string(0.0), "0");
        assert_eq!(number_to_string(-0.0), "0");
        assert_eq!(number_to_string(1.0), "1");
        assert_eq!(number_to_string(-1.5), "-1.5");
        assert_eq!(number_to_string(0.1 + 0.2), "0.30000000000000004");
    }

    #[test]
    fn uint32_wrapping() {
        assert_eq!(to_uint32_f64(-1.0), 4294967295);
        assert_eq!(to_uint32_f64(4294967296.0), 0);
        assert_eq!(to_uint32_f64(f64::NAN), 0);
        assert_eq!(to_uint32_f64(f64::INFINITY), 0);
        assert_eq!(to_int32_f64(2147483648.0), -2147483648);
        assert_eq!(to_int32_f64(-2147483649.0), 2147483647);
    }
}
