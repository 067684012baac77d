// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ### [15.10 RegExp Objects](https://262.ecma-international.org/5.1/#sec-15.10)
//!
//! Pattern matching is delegated to the host `regex` crate. The ES5.1
//! pattern dialect mostly passes through; 4-digit `\uHHHH` escapes are
//! rewritten to the crate's `\x{HHHH}` form, and features the crate cannot
//! express (backreferences, lookaround) raise a SyntaxError at
//! construction.

use regex::RegexBuilder;

use super::arg;
use super::builtin_function::{define_builtin_function, make_intrinsic_constructor};
use super::ordinary;
use crate::ecmascript::abstract_operations::type_conversion::{to_string, to_uint32};
use crate::ecmascript::execution::agent::{Agent, ExceptionType, JsResult};
use crate::ecmascript::types::language::object::RegExpData;
use crate::ecmascript::types::{
    JsString, Object, ObjectData, ObjectRecord, PropertyDescriptor, Value,
};

/// Rewrite JS-only escape forms into the backing engine's dialect.
fn translate_pattern(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut chars = pattern.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.peek() {
            Some('u') => {
                // \uHHHH → \x{HHHH}; \u without four hex digits passes
                // through for the backing engine to reject.
                let mut probe = chars.clone();
                probe.next();
                let digits: String = probe.by_ref().take(4).collect();
                if digits.len() == 4 && digits.bytes().all(|b| b.is_ascii_hexdigit()) {
                    chars.next();
                    for _ in 0..4 {
                        chars.next();
                    }
                    out.push_str("\\x{");
                    out.push_str(&digits);
                    out.push('}');
                } else {
                    out.push('\\');
                }
            }
            _ => {
                out.push('\\');
                if let Some(next) = chars.next() {
                    out.push(next);
                }
            }
        }
    }
    out
}

/// Compile a pattern/flags pair into a RegExp object
/// ([§15.10.4.1](https://262.ecma-international.org/5.1/#sec-15.10.4.1)).
pub fn create_regexp(agent: &mut Agent, pattern: &str, flags: &str) -> JsResult<Object> {
    let mut global = false;
    let mut ignore_case = false;
    let mut multiline = false;
    for flag in flags.chars() {
        let slot = match flag {
            'g' => &mut global,
            'i' => &mut ignore_case,
            'm' => &mut multiline,
            _ => {
                let message = format!("Invalid regular expression flag '{flag}'");
                return Err(agent.throw_exception(ExceptionType::SyntaxError, message));
            }
        };
        if *slot {
            let message = format!("Duplicate regular expression flag '{flag}'");
            return Err(agent.throw_exception(ExceptionType::SyntaxError, message));
        }
        *slot = true;
    }

    let translated = translate_pattern(pattern);
    let matcher = RegexBuilder::new(&translated)
        .case_insensitive(ignore_case)
        .multi_line(multiline)
        .build()
        .map_err(|error| {
            let message = format!("Invalid regular expression: {error}");
            agent.throw_exception(ExceptionType::SyntaxError, message)
        })?;

    let source = agent.intern(if pattern.is_empty() { "(?:)" } else { pattern });
    let prototype = agent.realm.intrinsics.regexp_prototype;
    let o = agent.heap.create_object(ObjectRecord::with_class(
        Some(prototype),
        "RegExp",
        ObjectData::RegExp(Box::new(RegExpData {
            matcher,
            source,
            global,
            ignore_case,
            multiline,
        })),
    ));
    // [15.10.7] Instance properties.
    let source_key = agent.intern("source");
    agent.heap.object_mut(o).properties.insert(
        source_key,
        PropertyDescriptor::data(Value::String(source), false, false, false),
    );
    let global_key = agent.intern("global");
    agent.heap.object_mut(o).properties.insert(
        global_key,
        PropertyDescriptor::data(Value::Boolean(global), false, false, false),
    );
    let ignore_case_key = agent.intern("ignoreCase");
    agent.heap.object_mut(o).properties.insert(
        ignore_case_key,
        PropertyDescriptor::data(Value::Boolean(ignore_case), false, false, false),
    );
    let multiline_key = agent.intern("multiline");
    agent.heap.object_mut(o).properties.insert(
        multiline_key,
        PropertyDescriptor::data(Value::Boolean(multiline), false, false, false),
    );
    let last_index_key = agent.intern("lastIndex");
    agent.heap.object_mut(o).properties.insert(
        last_index_key,
        PropertyDescriptor::data(Value::Number(0.0), true, false, false),
    );
    Ok(o)
}

pub(crate) fn populate(agent: &mut Agent) {
    let regexp_prototype = agent.realm.intrinsics.regexp_prototype;
    let regexp_constructor = agent.realm.intrinsics.regexp_constructor;
    agent.heap.object_mut(regexp_prototype).class = "RegExp";

    make_intrinsic_constructor(
        agent,
        regexp_constructor,
        "RegExp",
        2,
        regexp_constructor_call,
        regexp_constructor_construct,
        regexp_prototype,
    );

    define_builtin_function(agent, regexp_prototype, "exec", 1, regexp_exec_method);
    define_builtin_function(agent, regexp_prototype, "test", 1, regexp_test);
    define_builtin_function(agent, regexp_prototype, "toString", 0, regexp_to_string);
}

/// ### [15.10.4 The RegExp Constructor](https://262.ecma-international.org/5.1/#sec-15.10.4)
fn regexp_constructor_construct(agent: &mut Agent, arguments: &[Value]) -> JsResult<Value> {
    let pattern = arg(arguments, 0);
    let flags = arg(arguments, 1);
    // An existing RegExp passes through when flags are absent.
    if let Value::Object(o) = pattern {
        if let ObjectData::RegExp(data) = &agent.heap.object(o).data {
            if !flags.is_undefined() {
                return Err(agent.throw_exception_with_static_message(
                    ExceptionType::TypeError,
                    "Cannot supply flags when constructing one RegExp from another",
                ));
            }
            let source = agent.string_lossy(data.source);
            let mut flag_text = String::new();
            if data.global {
                flag_text.push('g');
            }
            if data.ignore_case {
                flag_text.push('i');
            }
            if data.multiline {
                flag_text.push('m');
            }
            let o = create_regexp(agent, &source, &flag_text)?;
            return Ok(Value::Object(o));
        }
    }
    let pattern = match pattern {
        Value::Undefined => String::new(),
        value => {
            let text = to_string(agent, value)?;
            agent.string_lossy(text)
        }
    };
    let flags = match flags {
        Value::Undefined => String::new(),
        value => {
            let text = to_string(agent, value)?;
            agent.string_lossy(text)
        }
    };
    let o = create_regexp(agent, &pattern, &flags)?;
    Ok(Value::Object(o))
}

/// ### [15.10.3.1 RegExp (pattern, flags)](https://262.ecma-international.org/5.1/#sec-15.10.3.1)
fn regexp_constructor_call(agent: &mut Agent, _this: Value, arguments: &[Value]) -> JsResult<Value> {
    // A lone RegExp argument returns unchanged when called as a function.
    if let (Value::Object(o), Value::Undefined) = (arg(arguments, 0), arg(arguments, 1)) {
        if matches!(agent.heap.object(o).data, ObjectData::RegExp(_)) {
            return Ok(Value::Object(o));
        }
    }
    regexp_constructor_construct(agent, arguments)
}

fn require_regexp(agent: &mut Agent, this: Value, who: &str) -> JsResult<Object> {
    if let Value::Object(o) = this {
        if matches!(agent.heap.object(o).data, ObjectData::RegExp(_)) {
            return Ok(o);
        }
    }
    let message = format!("{who} called on incompatible receiver");
    Err(agent.throw_exception(ExceptionType::TypeError, message))
}

/// UTF-16 index of a UTF-8 byte offset.
fn utf16_index(text: &str, byte_offset: usize) -> usize {
    text[..byte_offset].encode_utf16().count()
}

/// ### [15.10.6.2 RegExp.prototype.exec (string)](https://262.ecma-international.org/5.1/#sec-15.10.6.2)
///
/// The core matcher, shared with `test` and the String methods. Returns the
/// match array or null, honoring and updating `lastIndex` when global.
pub(crate) fn regexp_exec(agent: &mut Agent, regexp: Object, subject: JsString) -> JsResult<Value> {
    let text = agent.string_lossy(subject);
    let last_index_key = agent.intern("lastIndex");
    let ObjectData::RegExp(data) = &agent.heap.object(regexp).data else {
        return Err(agent.throw_exception_with_static_message(
            ExceptionType::TypeError,
            "RegExp.prototype.exec called on incompatible receiver",
        ));
    };
    let global = data.global;
    let matcher = data.matcher.clone();

    let start_utf16 = if global {
        let last_index = ordinary::get(agent, regexp, last_index_key)?;
        to_uint32(agent, last_index)? as usize
    } else {
        0
    };
    let utf16_units: Vec<u16> = text.encode_utf16().collect();
    if start_utf16 > utf16_units.len() {
        if global {
            ordinary::put(agent, regexp, last_index_key, Value::Number(0.0), true)?;
        }
        return Ok(Value::Null);
    }
    let start_byte = {
        let prefix = String::from_utf16_lossy(&utf16_units[..start_utf16]);
        prefix.len()
    };

    let Some(captures) = matcher.captures_at(&text, start_byte) else {
        if global {
            ordinary::put(agent, regexp, last_index_key, Value::Number(0.0), true)?;
        }
        return Ok(Value::Null);
    };
    let full = captures.get(0).unwrap();
    let match_start = utf16_index(&text, full.start());
    let match_end = utf16_index(&text, full.end());
    if global {
        ordinary::put(
            agent,
            regexp,
            last_index_key,
            Value::Number(match_end as f64),
            true,
        )?;
    }

    // [15.10.6.2 step 15] The match result array.
    let result = super::array_objects::create_array(agent);
    for index in 0..captures.len() {
        let value = match captures.get(index) {
            Some(group) => Value::String(agent.intern(group.as_str())),
            None => Value::Undefined,
        };
        let key = ordinary::index_key(agent, index);
        ordinary::define_own_property(
            agent,
            result,
            key,
            PropertyDescriptor::data(value, true, true, true),
            false,
        )?;
    }
    let index_key = agent.intern("index");
    let index_value = Value::Number(match_start as f64);
    ordinary::define_own_property(
        agent,
        result,
        index_key,
        PropertyDescriptor::data(index_value, true, true, true),
        false,
    )?;
    let input_key = agent.intern("input");
    ordinary::define_own_property(
        agent,
        result,
        input_key,
        PropertyDescriptor::data(Value::String(subject), true, true, true),
        false,
    )?;
    Ok(Value::Object(result))
}

fn regexp_exec_method(agent: &mut Agent, this: Value, arguments: &[Value]) -> JsResult<Value> {
    let regexp = require_regexp(agent, this, "RegExp.prototype.exec")?;
    let subject = arg(arguments, 0);
    let subject = to_string(agent, subject)?;
    regexp_exec(agent, regexp, subject)
}

/// ### [15.10.6.3 RegExp.prototype.test (string)](https://262.ecma-international.org/5.1/#sec-15.10.6.3)
fn regexp_test(agent: &mut Agent, this: Value, arguments: &[Value]) -> JsResult<Value> {
    let regexp = require_regexp(agent, this, "RegExp.prototype.test")?;
    let subject = arg(arguments, 0);
    let subject = to_string(agent, subject)?;
    let result = regexp_exec(agent, regexp, subject)?;
    Ok(Value::Boolean(!result.is_null()))
}

/// ### [15.10.6.4 RegExp.prototype.toString ( )](https://262.ecma-international.org/5.1/#sec-15.10.6.4)
fn regexp_to_string(agent: &mut Agent, this: Value, _: &[Value]) -> JsResult<Value> {
    let regexp = require_regexp(agent, this, "RegExp.prototype.toString")?;
    let ObjectData::RegExp(data) = &agent.heap.object(regexp).data else {
        unreachable!()
    };
    let source = agent.string_lossy(data.source);
    let mut text = format!("/{source}/");
    if data.global {
        text.push('g');
    }
    if data.ignore_case {
        text.push('i');
    }
    if data.multiline {
        text.push('m');
    }
    Ok(Value::String(agent.intern(&text)))
}
