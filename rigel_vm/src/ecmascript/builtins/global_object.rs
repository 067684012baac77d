// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ### [15.1 The Global Object](https://262.ecma-international.org/5.1/#sec-15.1)

use super::arg;
use super::builtin_function::{
    define_builtin_function, define_builtin_value, define_frozen_value,
};
use crate::ecmascript::abstract_operations::type_conversion::{to_number, to_string};
use crate::ecmascript::execution::agent::{Agent, ExceptionType, JsResult};
use crate::ecmascript::types::language::string::is_trimmable_whitespace;
use crate::ecmascript::types::{ObjectRecord, Value};

pub(crate) fn populate(agent: &mut Agent) {
    let global = agent.realm.global_object;

    // [15.1.1] Value properties.
    define_frozen_value(agent, global, "NaN", Value::Number(f64::NAN));
    define_frozen_value(agent, global, "Infinity", Value::Number(f64::INFINITY));
    define_frozen_value(agent, global, "undefined", Value::Undefined);

    // [15.1.4] Constructor properties.
    let intrinsics = agent.realm.intrinsics;
    define_builtin_value(agent, global, "Object", Value::Object(intrinsics.object_constructor));
    define_builtin_value(agent, global, "Function", Value::Object(intrinsics.function_constructor));
    define_builtin_value(agent, global, "Array", Value::Object(intrinsics.array_constructor));
    define_builtin_value(agent, global, "String", Value::Object(intrinsics.string_constructor));
    define_builtin_value(agent, global, "Boolean", Value::Object(intrinsics.boolean_constructor));
    define_builtin_value(agent, global, "Number", Value::Object(intrinsics.number_constructor));
    define_builtin_value(agent, global, "Date", Value::Object(intrinsics.date_constructor));
    define_builtin_value(agent, global, "RegExp", Value::Object(intrinsics.regexp_constructor));
    define_builtin_value(agent, global, "Error", Value::Object(intrinsics.error_constructor));
    define_builtin_value(agent, global, "EvalError", Value::Object(intrinsics.eval_error_constructor));
    define_builtin_value(agent, global, "RangeError", Value::Object(intrinsics.range_error_constructor));
    define_builtin_value(
        agent,
        global,
        "ReferenceError",
        Value::Object(intrinsics.reference_error_constructor),
    );
    define_builtin_value(
        agent,
        global,
        "SyntaxError",
        Value::Object(intrinsics.syntax_error_constructor),
    );
    define_builtin_value(agent, global, "TypeError", Value::Object(intrinsics.type_error_constructor));
    define_builtin_value(agent, global, "URIError", Value::Object(intrinsics.uri_error_constructor));

    // [15.1.5] Other properties.
    define_builtin_value(agent, global, "Math", Value::Object(intrinsics.math));

    // [15.1.2] Function properties.
    define_builtin_function(agent, global, "eval", 1, global_eval);
    define_builtin_function(agent, global, "parseInt", 2, global_parse_int);
    define_builtin_function(agent, global, "parseFloat", 1, global_parse_float);
    define_builtin_function(agent, global, "isNaN", 1, global_is_nan);
    define_builtin_function(agent, global, "isFinite", 1, global_is_finite);

    // [15.1.3] URI handling.
    define_builtin_function(agent, global, "encodeURI", 1, global_encode_uri);
    define_builtin_function(agent, global, "decodeURI", 1, global_decode_uri);
    define_builtin_function(agent, global, "encodeURIComponent", 1, global_encode_uri_component);
    define_builtin_function(agent, global, "decodeURIComponent", 1, global_decode_uri_component);

    // The console object, wired to the host print hook.
    let object_prototype = intrinsics.object_prototype;
    let console = agent
        .heap
        .create_object(ObjectRecord::ordinary(Some(object_prototype)));
    define_builtin_function(agent, console, "log", 0, console_log);
    define_builtin_value(agent, global, "console", Value::Object(console));
}

/// `console.log`: ToString every argument, join with spaces, hand the line
/// to the host hook.
fn console_log(agent: &mut Agent, _this: Value, arguments: &[Value]) -> JsResult<Value> {
    let mut pieces = Vec::with_capacity(arguments.len());
    for &argument in arguments {
        let text = to_string(agent, argument)?;
        pieces.push(agent.string_lossy(text));
    }
    let hooks = agent.host_hooks.clone();
    hooks.print(&pieces.join(" "));
    Ok(Value::Undefined)
}

/// ### [15.1.2.1 eval (x)](https://262.ecma-international.org/5.1/#sec-15.1.2.1)
///
/// Global-scope eval: the eval code runs against the global environment,
/// with a fresh declarative environment when the eval code itself is
/// strict.
fn global_eval(agent: &mut Agent, _this: Value, arguments: &[Value]) -> JsResult<Value> {
    let Value::String(source) = arg(arguments, 0) else {
        // 1. A non-string argument is returned unchanged.
        return Ok(arg(arguments, 0));
    };
    let text = agent.string_lossy(source);
    let program = rigel_parser::parse_string(&text, Some("<eval>")).map_err(|error| {
        agent.throw_exception(ExceptionType::SyntaxError, error.to_string())
    })?;
    crate::ecmascript::scripts_and_modules::script::eval_in_global(agent, &program)
}

/// ### [15.1.2.2 parseInt (string, radix)](https://262.ecma-international.org/5.1/#sec-15.1.2.2)
fn global_parse_int(agent: &mut Agent, _this: Value, arguments: &[Value]) -> JsResult<Value> {
    let input = arg(arguments, 0);
    let input = to_string(agent, input)?;
    let units = agent.string(input).to_vec();
    let radix_value = arg(arguments, 1);
    let radix = to_number(agent, radix_value)?;
    let mut radix = if radix.is_finite() { radix as i64 } else { 0 };

    let mut i = units
        .iter()
        .position(|&u| !is_trimmable_whitespace(u))
        .unwrap_or(units.len());
    let mut sign = 1.0;
    if i < units.len() && (units[i] == 0x2B || units[i] == 0x2D) {
        if units[i] == 0x2D {
            sign = -1.0;
        }
        i += 1;
    }
    let mut strip_prefix = true;
    if radix != 0 {
        if !(2..=36).contains(&radix) {
            return Ok(Value::Number(f64::NAN));
        }
        if radix != 16 {
            strip_prefix = false;
        }
    } else {
        radix = 10;
    }
    if strip_prefix
        && i + 1 < units.len()
        && units[i] == 0x30
        && (units[i + 1] == 0x78 || units[i + 1] == 0x58)
    {
        i += 2;
        radix = 16;
    }
    let mut value = 0.0f64;
    let mut digits = 0usize;
    while i < units.len() {
        let Some(c) = char::from_u32(units[i] as u32) else {
            break;
        };
        let Some(digit) = c.to_digit(36) else { break };
        if digit as i64 >= radix {
            break;
        }
        value = value * radix as f64 + digit as f64;
        digits += 1;
        i += 1;
    }
    if digits == 0 {
        return Ok(Value::Number(f64::NAN));
    }
    Ok(Value::Number(sign * value))
}

/// ### [15.1.2.3 parseFloat (string)](https://262.ecma-international.org/5.1/#sec-15.1.2.3)
fn global_parse_float(agent: &mut Agent, _this: Value, arguments: &[Value]) -> JsResult<Value> {
    let input = arg(arguments, 0);
    let input = to_string(agent, input)?;
    let text = agent.string_lossy(input);
    let trimmed = text.trim_start_matches(|c: char| {
        let mut buf = [0u16; 2];
        c.encode_utf16(&mut buf);
        is_trimmable_whitespace(buf[0])
    });

    // Longest prefix forming a StrDecimalLiteral.
    let bytes = trimmed.as_bytes();
    let mut i = 0usize;
    let sign_len = if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        i += 1;
        1
    } else {
        0
    };
    if trimmed[sign_len..].starts_with("Infinity") {
        let value = if bytes.first() == Some(&b'-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
        return Ok(Value::Number(value));
    }
    let digits_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let int_digits = i - digits_start;
    let mut frac_digits = 0;
    if i < bytes.len() && bytes[i] == b'.' {
        let dot = i;
        i += 1;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        frac_digits = i - dot - 1;
        if int_digits == 0 && frac_digits == 0 {
            i = dot;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return Ok(Value::Number(f64::NAN));
    }
    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mark = i;
        i += 1;
        if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
            i += 1;
        }
        let exponent_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == exponent_start {
            i = mark;
        }
    }
    match fast_float::parse::<f64, _>(&trimmed[..i]) {
        Ok(value) => Ok(Value::Number(value)),
        Err(_) => Ok(Value::Number(f64::NAN)),
    }
}

/// ### [15.1.2.4 isNaN (number)](https://262.ecma-international.org/5.1/#sec-15.1.2.4)
fn global_is_nan(agent: &mut Agent, _this: Value, arguments: &[Value]) -> JsResult<Value> {
    let number = to_number(agent, arg(arguments, 0))?;
    Ok(Value::Boolean(number.is_nan()))
}

/// ### [15.1.2.5 isFinite (number)](https://262.ecma-international.org/5.1/#sec-15.1.2.5)
fn global_is_finite(agent: &mut Agent, _this: Value, arguments: &[Value]) -> JsResult<Value> {
    let number = to_number(agent, arg(arguments, 0))?;
    Ok(Value::Boolean(number.is_finite()))
}

// ## [15.1.3 URI Handling Function Properties](https://262.ecma-international.org/5.1/#sec-15.1.3)

const URI_UNESCAPED: &str =
    "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_.!~*'()";
const URI_RESERVED: &str = ";/?:@&=+$,";

fn uri_error(agent: &mut Agent) -> crate::ecmascript::execution::agent::JsError {
    agent.throw_exception_with_static_message(ExceptionType::UriError, "URI malformed")
}

/// ### [15.1.3.3 Encode](https://262.ecma-international.org/5.1/#sec-15.1.3.3)
fn encode(agent: &mut Agent, value: Value, unescaped: &str) -> JsResult<Value> {
    let text = to_string(agent, value)?;
    let units = agent.string(text).to_vec();
    let mut out = String::new();
    let mut iter = units.iter().copied().peekable();
    while let Some(unit) = iter.next() {
        if let Some(c) = char::from_u32(unit as u32) {
            if unescaped.contains(c) {
                out.push(c);
                continue;
            }
        }
        // Decode one code point, rejecting unpaired surrogates.
        let code_point = if (0xD800..0xDC00).contains(&unit) {
            let Some(&low) = iter.peek() else {
                return Err(uri_error(agent));
            };
            if !(0xDC00..0xE000).contains(&low) {
                return Err(uri_error(agent));
            }
            iter.next();
            0x10000 + ((unit as u32 - 0xD800) << 10) + (low as u32 - 0xDC00)
        } else if (0xDC00..0xE000).contains(&unit) {
            return Err(uri_error(agent));
        } else {
            unit as u32
        };
        let c = char::from_u32(code_point).ok_or_else(|| uri_error(agent))?;
        let mut buffer = [0u8; 4];
        for byte in c.encode_utf8(&mut buffer).bytes() {
            out.push_str(&format!("%{byte:02X}"));
        }
    }
    Ok(Value::String(agent.intern(&out)))
}

/// ### [15.1.3.1 Decode](https://262.ecma-international.org/5.1/#sec-15.1.3.1)
fn decode(agent: &mut Agent, value: Value, reserved: &str) -> JsResult<Value> {
    let text = to_string(agent, value)?;
    let text = agent.string_lossy(text);
    let bytes = text.as_bytes();
    let mut out: Vec<u8> = Vec::with_capacity(bytes.len());
    let mut i = 0usize;
    while i < bytes.len() {
        if bytes[i] != b'%' {
            let c = text[i..].chars().next().unwrap();
            let mut buffer = [0u8; 4];
            out.extend_from_slice(c.encode_utf8(&mut buffer).as_bytes());
            i += c.len_utf8();
            continue;
        }
        let Some(byte) = hex_byte(bytes, i) else {
            return Err(uri_error(agent));
        };
        // Reserved characters stay percent-encoded.
        if byte < 0x80 && reserved.contains(byte as char) {
            out.extend_from_slice(&bytes[i..i + 3]);
        } else {
            out.push(byte);
        }
        i += 3;
    }
    match String::from_utf8(out) {
        Ok(decoded) => Ok(Value::String(agent.intern(&decoded))),
        Err(_) => Err(uri_error(agent)),
    }
}

fn hex_byte(bytes: &[u8], percent: usize) -> Option<u8> {
    if percent + 2 >= bytes.len() {
        return None;
    }
    let high = (bytes[percent + 1] as char).to_digit(16)?;
    let low = (bytes[percent + 2] as char).to_digit(16)?;
    Some((high * 16 + low) as u8)
}

fn global_encode_uri(agent: &mut Agent, _this: Value, arguments: &[Value]) -> JsResult<Value> {
    let unescaped = format!("{URI_UNESCAPED}{URI_RESERVED}#");
    encode(agent, arg(arguments, 0), &unescaped)
}

fn global_encode_uri_component(
    agent: &mut Agent,
    _this: Value,
    arguments: &[Value],
) -> JsResult<Value> {
    encode(agent, arg(arguments, 0), URI_UNESCAPED)
}

fn global_decode_uri(agent: &mut Agent, _this: Value, arguments: &[Value]) -> JsResult<Value> {
    let reserved = format!("{URI_RESERVED}#");
    decode(agent, arg(arguments, 0), &reserved)
}

fn global_decode_uri_component(
    agent: &mut Agent,
    _this: Value,
    arguments: &[Value],
) -> JsResult<Value> {
    decode(agent, arg(arguments, 0), "")
}
