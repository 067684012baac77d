// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The intrinsic objects of [§15](https://262.ecma-international.org/5.1/#sec-15),
//! the ordinary object internal methods, and the function-object machinery.

pub mod array_objects;
pub mod boolean_objects;
pub mod builtin_function;
pub mod date_objects;
pub mod ecmascript_function;
pub mod error_objects;
pub mod function_objects;
pub mod global_object;
pub mod math_object;
pub mod number_objects;
pub mod object_objects;
pub mod ordinary;
pub mod primitive_objects;
pub mod regexp_objects;
pub mod string_objects;

use crate::ecmascript::execution::agent::Agent;
use crate::ecmascript::types::Value;

/// The i-th argument, or undefined: every §15 builtin treats missing
/// arguments this way.
pub(crate) fn arg(arguments: &[Value], index: usize) -> Value {
    arguments.get(index).copied().unwrap_or(Value::Undefined)
}

/// Second phase of realm initialization: fill the bare intrinsic objects
/// with their properties and behaviour. Order only matters in that
/// `function_objects` installs `Function.prototype`'s behaviour before
/// anything is called.
pub(crate) fn populate_realm(agent: &mut Agent) {
    function_objects::populate(agent);
    object_objects::populate(agent);
    array_objects::populate(agent);
    string_objects::populate(agent);
    boolean_objects::populate(agent);
    number_objects::populate(agent);
    error_objects::populate(agent);
    math_object::populate(agent);
    date_objects::populate(agent);
    regexp_objects::populate(agent);
    global_object::populate(agent);
}
