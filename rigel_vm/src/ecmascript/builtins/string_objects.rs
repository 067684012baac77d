// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ### [15.5 String Objects](https://262.ecma-international.org/5.1/#sec-15.5)
//!
//! All index arithmetic is over UTF-16 code units, matching the string
//! heap's representation exactly.

use super::arg;
use super::builtin_function::{define_builtin_function, make_intrinsic_constructor};
use super::ordinary;
use super::primitive_objects::{create_string_object, this_string_value};
use super::regexp_objects;
use crate::ecmascript::abstract_operations::type_conversion::{
    check_object_coercible, integer_part, to_number, to_string, to_uint16,
};
use crate::ecmascript::execution::agent::{Agent, JsResult};
use crate::ecmascript::types::language::string::is_trimmable_whitespace;
use crate::ecmascript::types::{
    JsString, ObjectData, PropertyDescriptor, Value,
};

pub(crate) fn populate(agent: &mut Agent) {
    let string_prototype = agent.realm.intrinsics.string_prototype;
    let string_constructor = agent.realm.intrinsics.string_constructor;

    // [15.5.4] String.prototype is a String object with value "".
    let empty = agent.empty_string();
    {
        let record = agent.heap.object_mut(string_prototype);
        record.class = "String";
        record.data = ObjectData::Primitive(
            crate::ecmascript::types::PrimitiveValue::String(empty),
        );
    }
    let length_key = agent.intern("length");
    agent.heap.object_mut(string_prototype).properties.insert(
        length_key,
        PropertyDescriptor::data(Value::Number(0.0), false, false, false),
    );

    make_intrinsic_constructor(
        agent,
        string_constructor,
        "String",
        1,
        string_constructor_call,
        string_constructor_construct,
        string_prototype,
    );
    define_builtin_function(agent, string_constructor, "fromCharCode", 1, string_from_char_code);

    define_builtin_function(agent, string_prototype, "toString", 0, string_to_string);
    define_builtin_function(agent, string_prototype, "valueOf", 0, string_to_string);
    define_builtin_function(agent, string_prototype, "charAt", 1, string_char_at);
    define_builtin_function(agent, string_prototype, "charCodeAt", 1, string_char_code_at);
    define_builtin_function(agent, string_prototype, "concat", 1, string_concat);
    define_builtin_function(agent, string_prototype, "indexOf", 1, string_index_of);
    define_builtin_function(agent, string_prototype, "lastIndexOf", 1, string_last_index_of);
    define_builtin_function(agent, string_prototype, "match", 1, string_match);
    define_builtin_function(agent, string_prototype, "replace", 2, string_replace);
    define_builtin_function(agent, string_prototype, "slice", 2, string_slice);
    define_builtin_function(agent, string_prototype, "split", 2, string_split);
    define_builtin_function(agent, string_prototype, "substring", 2, string_substring);
    define_builtin_function(agent, string_prototype, "substr", 2, string_substr);
    define_builtin_function(agent, string_prototype, "toLowerCase", 0, string_to_lower_case);
    define_builtin_function(agent, string_prototype, "toUpperCase", 0, string_to_upper_case);
    define_builtin_function(agent, string_prototype, "trim", 0, string_trim);
}

/// ### [15.5.2.1 new String (value)](https://262.ecma-international.org/5.1/#sec-15.5.2.1)
fn string_constructor_construct(agent: &mut Agent, arguments: &[Value]) -> JsResult<Value> {
    let value = match arguments.first() {
        None => agent.empty_string(),
        Some(&value) => to_string(agent, value)?,
    };
    Ok(Value::Object(create_string_object(agent, value)))
}

/// ### [15.5.1.1 String (value)](https://262.ecma-international.org/5.1/#sec-15.5.1.1)
fn string_constructor_call(agent: &mut Agent, _this: Value, arguments: &[Value]) -> JsResult<Value> {
    match arguments.first() {
        None => Ok(Value::String(agent.empty_string())),
        Some(&value) => Ok(Value::String(to_string(agent, value)?)),
    }
}

/// ### [15.5.3.2 String.fromCharCode (...)](https://262.ecma-international.org/5.1/#sec-15.5.3.2)
fn string_from_char_code(agent: &mut Agent, _this: Value, arguments: &[Value]) -> JsResult<Value> {
    let mut units = Vec::with_capacity(arguments.len());
    for &argument in arguments {
        units.push(to_uint16(agent, argument)?);
    }
    Ok(Value::String(agent.intern_units(&units)))
}

/// The common prelude of the generic String.prototype methods:
/// CheckObjectCoercible then ToString(this).
fn this_to_string(agent: &mut Agent, this: Value) -> JsResult<JsString> {
    check_object_coercible(agent, this)?;
    to_string(agent, this)
}

/// ### [15.5.4.2 String.prototype.toString ( )](https://262.ecma-international.org/5.1/#sec-15.5.4.2)
fn string_to_string(agent: &mut Agent, this: Value, _: &[Value]) -> JsResult<Value> {
    Ok(Value::String(this_string_value(agent, this)?))
}

/// ### [15.5.4.4 String.prototype.charAt (pos)](https://262.ecma-international.org/5.1/#sec-15.5.4.4)
fn string_char_at(agent: &mut Agent, this: Value, arguments: &[Value]) -> JsResult<Value> {
    let s = this_to_string(agent, this)?;
    let position = arg(arguments, 0);
    let position = to_number(agent, position)?;
    let position = integer_part(position);
    let units = agent.string(s);
    if position < 0.0 || position >= units.len() as f64 {
        return Ok(Value::String(agent.empty_string()));
    }
    let unit = units[position as usize];
    Ok(Value::String(agent.intern_units(&[unit])))
}

/// ### [15.5.4.5 String.prototype.charCodeAt (pos)](https://262.ecma-international.org/5.1/#sec-15.5.4.5)
fn string_char_code_at(agent: &mut Agent, this: Value, arguments: &[Value]) -> JsResult<Value> {
    let s = this_to_string(agent, this)?;
    let position = arg(arguments, 0);
    let position = to_number(agent, position)?;
    let position = integer_part(position);
    let units = agent.string(s);
    if position < 0.0 || position >= units.len() as f64 {
        return Ok(Value::Number(f64::NAN));
    }
    Ok(Value::Number(units[position as usize] as f64))
}

/// ### [15.5.4.6 String.prototype.concat (...)](https://262.ecma-international.org/5.1/#sec-15.5.4.6)
fn string_concat(agent: &mut Agent, this: Value, arguments: &[Value]) -> JsResult<Value> {
    let s = this_to_string(agent, this)?;
    let mut units = agent.string(s).to_vec();
    for &argument in arguments {
        let piece = to_string(agent, argument)?;
        units.extend_from_slice(agent.string(piece));
    }
    Ok(Value::String(agent.intern_units(&units)))
}

fn find_sub(haystack: &[u16], needle: &[u16], from: usize) -> Option<usize> {
    if needle.is_empty() {
        return Some(from.min(haystack.len()));
    }
    if needle.len() > haystack.len() {
        return None;
    }
    (from..=haystack.len().saturating_sub(needle.len()))
        .find(|&start| &haystack[start..start + needle.len()] == needle)
}

/// ### [15.5.4.7 String.prototype.indexOf (searchString, position)](https://262.ecma-international.org/5.1/#sec-15.5.4.7)
fn string_index_of(agent: &mut Agent, this: Value, arguments: &[Value]) -> JsResult<Value> {
    let s = this_to_string(agent, this)?;
    let search = arg(arguments, 0);
    let search = to_string(agent, search)?;
    let position = arg(arguments, 1);
    let position = to_number(agent, position)?;
    let haystack = agent.string(s);
    let start = integer_part(if position.is_nan() { 0.0 } else { position })
        .clamp(0.0, haystack.len() as f64) as usize;
    let haystack = agent.string(s).to_vec();
    let needle = agent.string(search).to_vec();
    Ok(Value::Number(match find_sub(&haystack, &needle, start) {
        Some(index) => index as f64,
        None => -1.0,
    }))
}

/// ### [15.5.4.8 String.prototype.lastIndexOf (searchString, position)](https://262.ecma-international.org/5.1/#sec-15.5.4.8)
fn string_last_index_of(agent: &mut Agent, this: Value, arguments: &[Value]) -> JsResult<Value> {
    let s = this_to_string(agent, this)?;
    let search = arg(arguments, 0);
    let search = to_string(agent, search)?;
    let position = arg(arguments, 1);
    let position = to_number(agent, position)?;
    let haystack = agent.string(s).to_vec();
    let needle = agent.string(search).to_vec();
    let limit = if position.is_nan() {
        haystack.len()
    } else {
        integer_part(position).clamp(0.0, haystack.len() as f64) as usize
    };
    let mut result = -1.0;
    let mut from = 0;
    while let Some(index) = find_sub(&haystack, &needle, from) {
        if index > limit {
            break;
        }
        result = index as f64;
        from = index + 1;
        if from > haystack.len() {
            break;
        }
    }
    Ok(Value::Number(result))
}

/// Coerce a search value into a RegExp object, as match does.
fn to_regexp(agent: &mut Agent, value: Value) -> JsResult<crate::ecmascript::types::Object> {
    if let Value::Object(o) = value {
        if matches!(agent.heap.object(o).data, ObjectData::RegExp(_)) {
            return Ok(o);
        }
    }
    let pattern = match value {
        Value::Undefined => String::new(),
        other => {
            let text = to_string(agent, other)?;
            agent.string_lossy(text)
        }
    };
    regexp_objects::create_regexp(agent, &pattern, "")
}

/// ### [15.5.4.10 String.prototype.match (regexp)](https://262.ecma-international.org/5.1/#sec-15.5.4.10)
fn string_match(agent: &mut Agent, this: Value, arguments: &[Value]) -> JsResult<Value> {
    let s = this_to_string(agent, this)?;
    let regexp = to_regexp(agent, arg(arguments, 0))?;
    let global = matches!(
        &agent.heap.object(regexp).data,
        ObjectData::RegExp(data) if data.global
    );
    if !global {
        return regexp_objects::regexp_exec(agent, regexp, s);
    }
    // Global: collect every match's matched text.
    let last_index_key = agent.intern("lastIndex");
    ordinary::put(agent, regexp, last_index_key, Value::Number(0.0), true)?;
    let mut matches: Vec<Value> = Vec::new();
    let zero_key = agent.intern("0");
    loop {
        let result = regexp_objects::regexp_exec(agent, regexp, s)?;
        let Value::Object(result) = result else {
            break;
        };
        let matched = ordinary::get(agent, result, zero_key)?;
        matches.push(matched);
        // An empty match must still advance.
        if let Value::String(text) = matched {
            if agent.heap.string_len(text) == 0 {
                let last_index = ordinary::get(agent, regexp, last_index_key)?;
                let last_index = to_number(agent, last_index)?;
                ordinary::put(
                    agent,
                    regexp,
                    last_index_key,
                    Value::Number(last_index + 1.0),
                    true,
                )?;
            }
        }
    }
    if matches.is_empty() {
        return Ok(Value::Null);
    }
    let array = super::array_objects::create_array_from_values(agent, &matches)?;
    Ok(Value::Object(array))
}

/// Expand `$` placeholders in a replacement template
/// ([§15.5.4.11 Table 22](https://262.ecma-international.org/5.1/#sec-15.5.4.11)).
fn expand_replacement(
    template: &str,
    matched: &str,
    subject: &str,
    match_start: usize,
    captures: &[Option<String>],
) -> String {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '$' {
            out.push(c);
            continue;
        }
        match chars.peek().copied() {
            Some('$') => {
                chars.next();
                out.push('$');
            }
            Some('&') => {
                chars.next();
                out.push_str(matched);
            }
            Some('`') => {
                chars.next();
                out.push_str(&subject[..match_start]);
            }
            Some('\'') => {
                chars.next();
                out.push_str(&subject[match_start + matched.len()..]);
            }
            Some(d) if d.is_ascii_digit() => {
                chars.next();
                let mut number = d.to_digit(10).unwrap() as usize;
                // Two-digit references win when they name a capture.
                if let Some(d2) = chars.peek().copied() {
                    if d2.is_ascii_digit() {
                        let wide = number * 10 + d2.to_digit(10).unwrap() as usize;
                        if wide >= 1 && wide <= captures.len() {
                            chars.next();
                            number = wide;
                        }
                    }
                }
                if number >= 1 && number <= captures.len() {
                    if let Some(capture) = &captures[number - 1] {
                        out.push_str(capture);
                    }
                } else {
                    out.push('$');
                    out.push(char::from_digit(number as u32, 10).unwrap_or('0'));
                }
            }
            _ => out.push('$'),
        }
    }
    out
}

/// ### [15.5.4.11 String.prototype.replace (searchValue, replaceValue)](https://262.ecma-international.org/5.1/#sec-15.5.4.11)
fn string_replace(agent: &mut Agent, this: Value, arguments: &[Value]) -> JsResult<Value> {
    let s = this_to_string(agent, this)?;
    let subject = agent.string_lossy(s);
    let search_value = arg(arguments, 0);
    let replace_value = arg(arguments, 1);

    // Regex search: replace the first match, or all when global.
    if let Value::Object(regexp) = search_value {
        if let ObjectData::RegExp(data) = &agent.heap.object(regexp).data {
            let matcher = data.matcher.clone();
            let global = data.global;
            let mut out = String::new();
            let mut last_end = 0usize;
            for captures in matcher.captures_iter(&subject) {
                let full = captures.get(0).unwrap();
                out.push_str(&subject[last_end..full.start()]);
                let capture_strings: Vec<Option<String>> = (1..captures.len())
                    .map(|i| captures.get(i).map(|g| g.as_str().to_string()))
                    .collect();
                let replacement = compute_replacement(
                    agent,
                    replace_value,
                    full.as_str(),
                    &subject,
                    full.start(),
                    &capture_strings,
                )?;
                out.push_str(&replacement);
                last_end = full.end();
                if !global {
                    break;
                }
                // Manual advance over an empty match.
                if full.start() == full.end() && last_end >= subject.len() {
                    break;
                }
            }
            out.push_str(&subject[last_end..]);
            if global {
                let last_index_key = agent.intern("lastIndex");
                ordinary::put(agent, regexp, last_index_key, Value::Number(0.0), true)?;
            }
            return Ok(Value::String(agent.intern(&out)));
        }
    }

    // String search: first occurrence only.
    let search = to_string(agent, search_value)?;
    let search_text = agent.string_lossy(search);
    let Some(start) = subject.find(&search_text) else {
        return Ok(Value::String(s));
    };
    let replacement = compute_replacement(
        agent,
        replace_value,
        &search_text,
        &subject,
        start,
        &[],
    )?;
    let mut out = String::with_capacity(subject.len());
    out.push_str(&subject[..start]);
    out.push_str(&replacement);
    out.push_str(&subject[start + search_text.len()..]);
    Ok(Value::String(agent.intern(&out)))
}

fn compute_replacement(
    agent: &mut Agent,
    replace_value: Value,
    matched: &str,
    subject: &str,
    match_start: usize,
    captures: &[Option<String>],
) -> JsResult<String> {
    use crate::ecmascript::abstract_operations::operations_on_objects::call;
    use crate::ecmascript::abstract_operations::testing_and_comparison::is_callable;
    if is_callable(agent, replace_value).is_some() {
        // The replacer receives the match, captures, the UTF-16 offset and
        // the subject.
        let mut call_arguments: Vec<Value> = Vec::with_capacity(captures.len() + 3);
        let matched_value = Value::String(agent.intern(matched));
        call_arguments.push(matched_value);
        for capture in captures {
            call_arguments.push(match capture {
                Some(text) => Value::String(agent.intern(text)),
                None => Value::Undefined,
            });
        }
        let offset = subject[..match_start].encode_utf16().count();
        call_arguments.push(Value::Number(offset as f64));
        call_arguments.push(Value::String(agent.intern(subject)));
        let result = call(agent, replace_value, Value::Undefined, &call_arguments)?;
        let result = to_string(agent, result)?;
        Ok(agent.string_lossy(result))
    } else {
        let template = to_string(agent, replace_value)?;
        let template = agent.string_lossy(template);
        Ok(expand_replacement(
            &template,
            matched,
            subject,
            match_start,
            captures,
        ))
    }
}

/// ### [15.5.4.13 String.prototype.slice (start, end)](https://262.ecma-international.org/5.1/#sec-15.5.4.13)
fn string_slice(agent: &mut Agent, this: Value, arguments: &[Value]) -> JsResult<Value> {
    let s = this_to_string(agent, this)?;
    let length = agent.heap.string_len(s) as f64;
    let start = arg(arguments, 0);
    let start = integer_part(to_number(agent, start)?);
    let end = match arg(arguments, 1) {
        Value::Undefined => length,
        value => integer_part(to_number(agent, value)?),
    };
    let from = if start < 0.0 {
        (length + start).max(0.0)
    } else {
        start.min(length)
    } as usize;
    let to = if end < 0.0 {
        (length + end).max(0.0)
    } else {
        end.min(length)
    } as usize;
    let units = agent.string(s)[from..to.max(from)].to_vec();
    Ok(Value::String(agent.intern_units(&units)))
}

/// ### [15.5.4.15 String.prototype.substring (start, end)](https://262.ecma-international.org/5.1/#sec-15.5.4.15)
fn string_substring(agent: &mut Agent, this: Value, arguments: &[Value]) -> JsResult<Value> {
    let s = this_to_string(agent, this)?;
    let length = agent.heap.string_len(s) as f64;
    let start = arg(arguments, 0);
    let start = integer_part(to_number(agent, start)?).clamp(0.0, length);
    let end = match arg(arguments, 1) {
        Value::Undefined => length,
        value => integer_part(to_number(agent, value)?).clamp(0.0, length),
    };
    let from = start.min(end) as usize;
    let to = start.max(end) as usize;
    let units = agent.string(s)[from..to].to_vec();
    Ok(Value::String(agent.intern_units(&units)))
}

/// ### [B.2.3 String.prototype.substr (start, length)](https://262.ecma-international.org/5.1/#sec-B.2.3)
fn string_substr(agent: &mut Agent, this: Value, arguments: &[Value]) -> JsResult<Value> {
    let s = this_to_string(agent, this)?;
    let size = agent.heap.string_len(s) as f64;
    let start = arg(arguments, 0);
    let start = integer_part(to_number(agent, start)?);
    let length = match arg(arguments, 1) {
        Value::Undefined => f64::INFINITY,
        value => integer_part(to_number(agent, value)?),
    };
    let from = if start >= 0.0 {
        start.min(size)
    } else {
        (size + start).max(0.0)
    };
    let take = length.max(0.0).min(size - from);
    if take <= 0.0 {
        return Ok(Value::String(agent.empty_string()));
    }
    let from = from as usize;
    let to = from + take as usize;
    let units = agent.string(s)[from..to].to_vec();
    Ok(Value::String(agent.intern_units(&units)))
}

/// ### [15.5.4.14 String.prototype.split (separator, limit)](https://262.ecma-international.org/5.1/#sec-15.5.4.14)
fn string_split(agent: &mut Agent, this: Value, arguments: &[Value]) -> JsResult<Value> {
    let s = this_to_string(agent, this)?;
    let separator = arg(arguments, 0);
    let limit = match arg(arguments, 1) {
        Value::Undefined => u32::MAX,
        value => crate::ecmascript::abstract_operations::type_conversion::to_uint32(agent, value)?,
    };
    let result = super::array_objects::create_array(agent);
    if limit == 0 {
        return Ok(Value::Object(result));
    }

    // 10. An undefined separator yields the whole string.
    if separator.is_undefined() {
        let key = agent.intern("0");
        ordinary::define_own_property(
            agent,
            result,
            key,
            PropertyDescriptor::data(Value::String(s), true, true, true),
            false,
        )?;
        return Ok(Value::Object(result));
    }

    let is_regexp = matches!(
        separator,
        Value::Object(o) if matches!(agent.heap.object(o).data, ObjectData::RegExp(_))
    );
    let mut pieces: Vec<Value> = Vec::new();
    if is_regexp {
        // Regex separator: the pieces between matches, with capture groups
        // spliced in. Empty matches at either end of the string do not
        // produce empty leading/trailing pieces.
        let Value::Object(o) = separator else {
            unreachable!()
        };
        let ObjectData::RegExp(data) = &agent.heap.object(o).data else {
            unreachable!()
        };
        let matcher = data.matcher.clone();
        let subject = agent.string_lossy(s);
        let mut last_end = 0usize;
        let mut capture_buffer: Vec<Vec<Option<String>>> = Vec::new();
        let mut spans: Vec<(usize, usize)> = Vec::new();
        for captures in matcher.captures_iter(&subject) {
            let full = captures.get(0).unwrap();
            let empty = full.start() == full.end();
            if empty && (full.end() == 0 || full.start() >= subject.len()) {
                continue;
            }
            if empty && full.start() == last_end && last_end != 0 {
                continue;
            }
            spans.push((full.start(), full.end()));
            capture_buffer.push(
                (1..captures.len())
                    .map(|i| captures.get(i).map(|g| g.as_str().to_string()))
                    .collect(),
            );
            last_end = full.end();
        }
        let mut cursor = 0usize;
        for ((start, end), captures) in spans.into_iter().zip(capture_buffer) {
            let piece = subject[cursor..start].to_string();
            pieces.push(Value::String(agent.intern(&piece)));
            for capture in captures {
                pieces.push(match capture {
                    Some(text) => Value::String(agent.intern(&text)),
                    None => Value::Undefined,
                });
            }
            cursor = end;
        }
        let tail = subject[cursor..].to_string();
        pieces.push(Value::String(agent.intern(&tail)));
    } else {
        let separator = to_string(agent, separator)?;
        let haystack = agent.string(s).to_vec();
        let needle = agent.string(separator).to_vec();
        if needle.is_empty() {
            // An empty separator splits into single code units.
            for &unit in &haystack {
                pieces.push(Value::String(agent.intern_units(&[unit])));
            }
        } else {
            let mut from = 0usize;
            loop {
                match find_sub(&haystack, &needle, from) {
                    Some(index) => {
                        let piece = haystack[from..index].to_vec();
                        pieces.push(Value::String(agent.intern_units(&piece)));
                        from = index + needle.len();
                    }
                    None => {
                        let piece = haystack[from..].to_vec();
                        pieces.push(Value::String(agent.intern_units(&piece)));
                        break;
                    }
                }
            }
        }
    }

    for (index, &piece) in pieces.iter().take(limit as usize).enumerate() {
        let key = ordinary::index_key(agent, index);
        ordinary::define_own_property(
            agent,
            result,
            key,
            PropertyDescriptor::data(piece, true, true, true),
            false,
        )?;
    }
    Ok(Value::Object(result))
}

/// ### [15.5.4.16 String.prototype.toLowerCase ( )](https://262.ecma-international.org/5.1/#sec-15.5.4.16)
fn string_to_lower_case(agent: &mut Agent, this: Value, _: &[Value]) -> JsResult<Value> {
    let s = this_to_string(agent, this)?;
    let text = agent.string_lossy(s).to_lowercase();
    Ok(Value::String(agent.intern(&text)))
}

/// ### [15.5.4.18 String.prototype.toUpperCase ( )](https://262.ecma-international.org/5.1/#sec-15.5.4.18)
fn string_to_upper_case(agent: &mut Agent, this: Value, _: &[Value]) -> JsResult<Value> {
    let s = this_to_string(agent, this)?;
    let text = agent.string_lossy(s).to_uppercase();
    Ok(Value::String(agent.intern(&text)))
}

/// ### [15.5.4.20 String.prototype.trim ( )](https://262.ecma-international.org/5.1/#sec-15.5.4.20)
fn string_trim(agent: &mut Agent, this: Value, _: &[Value]) -> JsResult<Value> {
    let s = this_to_string(agent, this)?;
    let units = agent.string(s);
    let start = units
        .iter()
        .position(|&u| !is_trimmable_whitespace(u))
        .unwrap_or(units.len());
    let end = units
        .iter()
        .rposition(|&u| !is_trimmable_whitespace(u))
        .map_or(start, |i| i + 1);
    let trimmed = units[start..end].to_vec();
    Ok(Value::String(agent.intern_units(&trimmed)))
}
