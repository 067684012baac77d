// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ### [15.8 The Math Object](https://262.ecma-international.org/5.1/#sec-15.8)

use super::arg;
use super::builtin_function::{define_builtin_function, define_frozen_value};
use crate::ecmascript::abstract_operations::type_conversion::to_number;
use crate::ecmascript::execution::agent::{Agent, JsResult};
use crate::ecmascript::types::Value;

pub(crate) fn populate(agent: &mut Agent) {
    let math = agent.realm.intrinsics.math;
    agent.heap.object_mut(math).class = "Math";

    // [15.8.1] Value properties.
    define_frozen_value(agent, math, "E", Value::Number(std::f64::consts::E));
    define_frozen_value(agent, math, "LN10", Value::Number(std::f64::consts::LN_10));
    define_frozen_value(agent, math, "LN2", Value::Number(std::f64::consts::LN_2));
    define_frozen_value(agent, math, "LOG2E", Value::Number(std::f64::consts::LOG2_E));
    define_frozen_value(agent, math, "LOG10E", Value::Number(std::f64::consts::LOG10_E));
    define_frozen_value(agent, math, "PI", Value::Number(std::f64::consts::PI));
    define_frozen_value(agent, math, "SQRT1_2", Value::Number(std::f64::consts::FRAC_1_SQRT_2));
    define_frozen_value(agent, math, "SQRT2", Value::Number(std::f64::consts::SQRT_2));

    define_builtin_function(agent, math, "abs", 1, math_abs);
    define_builtin_function(agent, math, "acos", 1, math_acos);
    define_builtin_function(agent, math, "asin", 1, math_asin);
    define_builtin_function(agent, math, "atan", 1, math_atan);
    define_builtin_function(agent, math, "atan2", 2, math_atan2);
    define_builtin_function(agent, math, "ceil", 1, math_ceil);
    define_builtin_function(agent, math, "cos", 1, math_cos);
    define_builtin_function(agent, math, "exp", 1, math_exp);
    define_builtin_function(agent, math, "floor", 1, math_floor);
    define_builtin_function(agent, math, "log", 1, math_log);
    define_builtin_function(agent, math, "max", 2, math_max);
    define_builtin_function(agent, math, "min", 2, math_min);
    define_builtin_function(agent, math, "pow", 2, math_pow);
    define_builtin_function(agent, math, "random", 0, math_random);
    define_builtin_function(agent, math, "round", 1, math_round);
    define_builtin_function(agent, math, "sin", 1, math_sin);
    define_builtin_function(agent, math, "sqrt", 1, math_sqrt);
    define_builtin_function(agent, math, "tan", 1, math_tan);
}

macro_rules! unary_math {
    ($name:ident, |$x:ident| $body:expr) => {
        fn $name(agent: &mut Agent, _this: Value, arguments: &[Value]) -> JsResult<Value> {
            let $x = to_number(agent, arg(arguments, 0))?;
            Ok(Value::Number($body))
        }
    };
}

unary_math!(math_abs, |x| x.abs());
unary_math!(math_acos, |x| x.acos());
unary_math!(math_asin, |x| x.asin());
unary_math!(math_atan, |x| x.atan());
unary_math!(math_ceil, |x| x.ceil());
unary_math!(math_cos, |x| x.cos());
unary_math!(math_exp, |x| x.exp());
unary_math!(math_floor, |x| x.floor());
unary_math!(math_log, |x| x.ln());
unary_math!(math_sin, |x| x.sin());
unary_math!(math_sqrt, |x| x.sqrt());
unary_math!(math_tan, |x| x.tan());

/// ### [15.8.2.5 atan2 (y, x)](https://262.ecma-international.org/5.1/#sec-15.8.2.5)
fn math_atan2(agent: &mut Agent, _this: Value, arguments: &[Value]) -> JsResult<Value> {
    let y = to_number(agent, arg(arguments, 0))?;
    let x = to_number(agent, arg(arguments, 1))?;
    Ok(Value::Number(y.atan2(x)))
}

/// ### [15.8.2.11 max (...)](https://262.ecma-international.org/5.1/#sec-15.8.2.11)
fn math_max(agent: &mut Agent, _this: Value, arguments: &[Value]) -> JsResult<Value> {
    let mut result = f64::NEG_INFINITY;
    for &argument in arguments {
        let n = to_number(agent, argument)?;
        if n.is_nan() {
            return Ok(Value::Number(f64::NAN));
        }
        // +0 beats -0.
        if n > result || (n == result && n.is_sign_positive()) {
            result = n;
        }
    }
    Ok(Value::Number(result))
}

/// ### [15.8.2.12 min (...)](https://262.ecma-international.org/5.1/#sec-15.8.2.12)
fn math_min(agent: &mut Agent, _this: Value, arguments: &[Value]) -> JsResult<Value> {
    let mut result = f64::INFINITY;
    for &argument in arguments {
        let n = to_number(agent, argument)?;
        if n.is_nan() {
            return Ok(Value::Number(f64::NAN));
        }
        if n < result || (n == result && n.is_sign_negative()) {
            result = n;
        }
    }
    Ok(Value::Number(result))
}

/// ### [15.8.2.13 pow (x, y)](https://262.ecma-international.org/5.1/#sec-15.8.2.13)
fn math_pow(agent: &mut Agent, _this: Value, arguments: &[Value]) -> JsResult<Value> {
    let x = to_number(agent, arg(arguments, 0))?;
    let y = to_number(agent, arg(arguments, 1))?;
    // The spec deviates from IEEE 754 here: 1^NaN is NaN.
    if y.is_nan() {
        return Ok(Value::Number(f64::NAN));
    }
    Ok(Value::Number(x.powf(y)))
}

/// ### [15.8.2.14 random ( )](https://262.ecma-international.org/5.1/#sec-15.8.2.14)
fn math_random(agent: &mut Agent, _this: Value, _: &[Value]) -> JsResult<Value> {
    Ok(Value::Number(agent.host_hooks.random()))
}

/// ### [15.8.2.15 round (x)](https://262.ecma-international.org/5.1/#sec-15.8.2.15)
fn math_round(agent: &mut Agent, _this: Value, arguments: &[Value]) -> JsResult<Value> {
    let x = to_number(agent, arg(arguments, 0))?;
    // Half-way cases round toward +Infinity, so -2.5 rounds to -2.
    let result = if x.is_finite() && x.fract() != 0.0 {
        (x + 0.5).floor()
    } else {
        x
    };
    Ok(Value::Number(result))
}
