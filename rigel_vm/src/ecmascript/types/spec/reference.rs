// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ### [8.7 The Reference Specification Type](https://262.ecma-international.org/5.1/#sec-8.7)
//!
//! References make `delete`, `typeof` and assignment observable on
//! unresolved bindings, so expression evaluation must not eagerly
//! dereference: it returns [`Evaluated`], and the operators that care about
//! the reference arm handle it explicitly.

use crate::ecmascript::execution::environments::Environment;
use crate::ecmascript::types::{JsString, Value};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReferenceBase {
    /// The reference did not resolve; `GetValue` throws a ReferenceError,
    /// `typeof` yields `"undefined"`, `delete` succeeds in non-strict code.
    Unresolvable,
    /// An environment record binding.
    Environment(Environment),
    /// A property reference. Primitive bases are boxed on access.
    Value(Value),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reference {
    /// \[\[Base]]
    pub base: ReferenceBase,
    /// \[\[ReferencedName]]
    pub referenced_name: JsString,
    /// Whether the reference originated in strict mode code.
    pub strict: bool,
}

impl Reference {
    /// ### [8.7 IsPropertyReference](https://262.ecma-international.org/5.1/#sec-8.7)
    pub fn is_property_reference(&self) -> bool {
        matches!(self.base, ReferenceBase::Value(_))
    }

    pub fn is_unresolvable(&self) -> bool {
        matches!(self.base, ReferenceBase::Unresolvable)
    }
}

/// The result of evaluating an expression: a language value, or a Reference
/// for the operators that need one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Evaluated {
    Value(Value),
    Reference(Reference),
}

impl From<Value> for Evaluated {
    fn from(value: Value) -> Self {
        Evaluated::Value(value)
    }
}

impl From<Reference> for Evaluated {
    fn from(reference: Reference) -> Self {
        Evaluated::Reference(reference)
    }
}

use crate::ecmascript::abstract_operations::type_conversion::to_object;
use crate::ecmascript::builtins::ordinary;
use crate::ecmascript::execution::agent::{Agent, ExceptionType, JsResult};
use crate::ecmascript::execution::execution_context::get_global_object;

/// ### [8.7.1 GetValue (V)](https://262.ecma-international.org/5.1/#sec-8.7.1)
pub fn get_value(agent: &mut Agent, v: Evaluated) -> JsResult<Value> {
    let reference = match v {
        // 1. If Type(V) is not Reference, return V.
        Evaluated::Value(value) => return Ok(value),
        Evaluated::Reference(reference) => reference,
    };
    match reference.base {
        // 3. An unresolvable reference throws.
        ReferenceBase::Unresolvable => {
            let message = format!(
                "{} is not defined",
                agent.string_lossy(reference.referenced_name)
            );
            Err(agent.throw_exception(ExceptionType::ReferenceError, message))
        }
        // 5. Environment record bindings.
        ReferenceBase::Environment(env) => {
            env.get_binding_value(agent, reference.referenced_name, reference.strict)
        }
        // 4. Property references; primitive bases box transiently.
        ReferenceBase::Value(base) => {
            if base.is_undefined() || base.is_null() {
                let message = format!(
                    "Cannot read property '{}' of {}",
                    agent.string_lossy(reference.referenced_name),
                    if base.is_null() { "null" } else { "undefined" }
                );
                return Err(agent.throw_exception(ExceptionType::TypeError, message));
            }
            let o = to_object(agent, base)?;
            ordinary::get(agent, o, reference.referenced_name)
        }
    }
}

/// ### [8.7.2 PutValue (V, W)](https://262.ecma-international.org/5.1/#sec-8.7.2)
pub fn put_value(agent: &mut Agent, v: Evaluated, w: Value) -> JsResult<()> {
    let reference = match v {
        // 1. If Type(V) is not Reference, throw a ReferenceError.
        Evaluated::Value(_) => {
            return Err(agent.throw_exception_with_static_message(
                ExceptionType::ReferenceError,
                "Invalid assignment target",
            ));
        }
        Evaluated::Reference(reference) => reference,
    };
    match reference.base {
        ReferenceBase::Unresolvable => {
            // 3.a. In strict mode an unresolvable put throws; otherwise the
            // property is created on the global object.
            if reference.strict {
                let message = format!(
                    "{} is not defined",
                    agent.string_lossy(reference.referenced_name)
                );
                return Err(agent.throw_exception(ExceptionType::ReferenceError, message));
            }
            let global = get_global_object(agent);
            ordinary::put(agent, global, reference.referenced_name, w, false)
        }
        ReferenceBase::Environment(env) => {
            env.set_mutable_binding(agent, reference.referenced_name, w, reference.strict)
        }
        ReferenceBase::Value(base) => {
            if base.is_undefined() || base.is_null() {
                let message = format!(
                    "Cannot set property '{}' of {}",
                    agent.string_lossy(reference.referenced_name),
                    if base.is_null() { "null" } else { "undefined" }
                );
                return Err(agent.throw_exception(ExceptionType::TypeError, message));
            }
            // Writes through a primitive base go to a transient wrapper and
            // are observable only through accessors on the prototype.
            let o = to_object(agent, base)?;
            ordinary::put(agent, o, reference.referenced_name, w, reference.strict)
        }
    }
}
