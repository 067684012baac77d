// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ### [15.9 Date Objects](https://262.ecma-international.org/5.1/#sec-15.9)
//!
//! A deliberately small Date: the time value is milliseconds since the
//! epoch from `SystemTime`, construction takes zero arguments (now) or a
//! millisecond count, and rendering is fixed UTC. There is no timezone
//! database and no date-string parser.

use std::time::{SystemTime, UNIX_EPOCH};

use super::builtin_function::{define_builtin_function, make_intrinsic_constructor};
use crate::ecmascript::abstract_operations::type_conversion::{integer_part, to_number};
use crate::ecmascript::execution::agent::{Agent, ExceptionType, JsResult};
use crate::ecmascript::types::{ObjectData, ObjectRecord, Value};

fn now_milliseconds() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|duration| duration.as_millis() as f64)
        .unwrap_or(0.0)
}

/// ### [15.9.1.14 TimeClip (time)](https://262.ecma-international.org/5.1/#sec-15.9.1.14)
fn time_clip(time: f64) -> f64 {
    if !time.is_finite() || time.abs() > 8.64e15 {
        f64::NAN
    } else {
        integer_part(time)
    }
}

fn create_date(agent: &mut Agent, time: f64) -> Value {
    let prototype = agent.realm.intrinsics.date_prototype;
    let o = agent.heap.create_object(ObjectRecord::with_class(
        Some(prototype),
        "Date",
        ObjectData::Date(time),
    ));
    Value::Object(o)
}

pub(crate) fn populate(agent: &mut Agent) {
    let date_prototype = agent.realm.intrinsics.date_prototype;
    let date_constructor = agent.realm.intrinsics.date_constructor;

    // [15.9.5] Date.prototype is a Date object whose value is NaN.
    {
        let record = agent.heap.object_mut(date_prototype);
        record.class = "Date";
        record.data = ObjectData::Date(f64::NAN);
    }

    make_intrinsic_constructor(
        agent,
        date_constructor,
        "Date",
        2,
        date_constructor_call,
        date_constructor_construct,
        date_prototype,
    );
    define_builtin_function(agent, date_constructor, "now", 0, date_now);

    define_builtin_function(agent, date_prototype, "getTime", 0, date_get_time);
    define_builtin_function(agent, date_prototype, "valueOf", 0, date_get_time);
    define_builtin_function(agent, date_prototype, "toString", 0, date_to_string);
    define_builtin_function(agent, date_prototype, "toISOString", 0, date_to_iso_string);
}

/// ### [15.9.3 The Date Constructor](https://262.ecma-international.org/5.1/#sec-15.9.3)
fn date_constructor_construct(agent: &mut Agent, arguments: &[Value]) -> JsResult<Value> {
    let time = match arguments.first() {
        None => now_milliseconds(),
        Some(&value) => {
            let number = to_number(agent, value)?;
            time_clip(number)
        }
    };
    Ok(create_date(agent, time))
}

/// ### [15.9.2.1 Date (...)](https://262.ecma-international.org/5.1/#sec-15.9.2.1)
fn date_constructor_call(agent: &mut Agent, _this: Value, _: &[Value]) -> JsResult<Value> {
    // Calling Date as a function always renders the current time.
    let text = format_utc(now_milliseconds());
    Ok(Value::String(agent.intern(&text)))
}

/// ### [15.9.4.4 Date.now ( )](https://262.ecma-international.org/5.1/#sec-15.9.4.4)
fn date_now(_agent: &mut Agent, _this: Value, _: &[Value]) -> JsResult<Value> {
    Ok(Value::Number(now_milliseconds()))
}

fn this_time_value(agent: &mut Agent, this: Value) -> JsResult<f64> {
    if let Value::Object(o) = this {
        if let ObjectData::Date(time) = agent.heap.object(o).data {
            return Ok(time);
        }
    }
    Err(agent.throw_exception_with_static_message(
        ExceptionType::TypeError,
        "Date.prototype method called on incompatible receiver",
    ))
}

/// ### [15.9.5.9 Date.prototype.getTime ( )](https://262.ecma-international.org/5.1/#sec-15.9.5.9)
fn date_get_time(agent: &mut Agent, this: Value, _: &[Value]) -> JsResult<Value> {
    Ok(Value::Number(this_time_value(agent, this)?))
}

/// Civil-from-days conversion for the UTC renderings.
fn civil_from_days(days: i64) -> (i64, u32, u32) {
    let days = days + 719468;
    let era = days.div_euclid(146097);
    let day_of_era = days.rem_euclid(146097) as u64;
    let year_of_era =
        (day_of_era - day_of_era / 1460 + day_of_era / 36524 - day_of_era / 146096) / 365;
    let year = year_of_era as i64 + era * 400;
    let day_of_year = day_of_era - (365 * year_of_era + year_of_era / 4 - year_of_era / 100);
    let mp = (5 * day_of_year + 2) / 153;
    let day = (day_of_year - (153 * mp + 2) / 5 + 1) as u32;
    let month = if mp < 10 { mp + 3 } else { mp - 9 } as u32;
    let year = if month <= 2 { year + 1 } else { year };
    (year, month, day)
}

fn split_time(time: f64) -> (i64, u32, u32, u32, u32, u32, u32) {
    let total_ms = time as i64;
    let days = total_ms.div_euclid(86_400_000);
    let ms_of_day = total_ms.rem_euclid(86_400_000) as u32;
    let (year, month, day) = civil_from_days(days);
    let hour = ms_of_day / 3_600_000;
    let minute = (ms_of_day % 3_600_000) / 60_000;
    let second = (ms_of_day % 60_000) / 1000;
    let millisecond = ms_of_day % 1000;
    (year, month, day, hour, minute, second, millisecond)
}

fn format_utc(time: f64) -> String {
    if time.is_nan() {
        return "Invalid Date".to_string();
    }
    const WEEKDAYS: [&str; 7] = ["Thu", "Fri", "Sat", "Sun", "Mon", "Tue", "Wed"];
    const MONTHS: [&str; 12] = [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ];
    let (year, month, day, hour, minute, second, _) = split_time(time);
    let weekday = WEEKDAYS[(time as i64).div_euclid(86_400_000).rem_euclid(7) as usize];
    format!(
        "{weekday} {} {day:02} {year} {hour:02}:{minute:02}:{second:02} GMT+0000 (UTC)",
        MONTHS[(month - 1) as usize]
    )
}

/// ### [15.9.5.2 Date.prototype.toString ( )](https://262.ecma-international.org/5.1/#sec-15.9.5.2)
fn date_to_string(agent: &mut Agent, this: Value, _: &[Value]) -> JsResult<Value> {
    let time = this_time_value(agent, this)?;
    let text = format_utc(time);
    Ok(Value::String(agent.intern(&text)))
}

/// ### [15.9.5.43 Date.prototype.toISOString ( )](https://262.ecma-international.org/5.1/#sec-15.9.5.43)
fn date_to_iso_string(agent: &mut Agent, this: Value, _: &[Value]) -> JsResult<Value> {
    let time = this_time_value(agent, this)?;
    if time.is_nan() {
        return Err(agent.throw_exception_with_static_message(
            ExceptionType::RangeError,
            "Invalid time value",
        ));
    }
    let (year, month, day, hour, minute, second, millisecond) = split_time(time);
    let text = format!(
        "{year:04}-{month:02}-{day:02}T{hour:02}:{minute:02}:{second:02}.{millisecond:03}Z"
    );
    Ok(Value::String(agent.intern(&text)))
}
