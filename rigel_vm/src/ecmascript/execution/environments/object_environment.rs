// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::ecmascript::builtins::ordinary;
use crate::ecmascript::execution::agent::{Agent, ExceptionType, JsResult};
use crate::ecmascript::types::{JsString, Object, PropertyDescriptor, Value};

/// ### [10.2.1.2 Object Environment Records](https://262.ecma-international.org/5.1/#sec-10.2.1.2)
///
/// Backed by a binding object: the global environment (over the global
/// object) and `with` environments. `provide_this` is set only by `with`.
#[derive(Debug, Clone, Copy)]
pub struct ObjectEnvironmentRecord {
    pub binding_object: Object,
    pub provide_this: bool,
}

impl ObjectEnvironmentRecord {
    /// ### [10.2.1.2.1 HasBinding (N)](https://262.ecma-international.org/5.1/#sec-10.2.1.2.1)
    pub fn has_binding(&self, agent: &Agent, name: JsString) -> bool {
        ordinary::has_property(agent, self.binding_object, name)
    }

    /// ### [10.2.1.2.2 CreateMutableBinding (N, D)](https://262.ecma-international.org/5.1/#sec-10.2.1.2.2)
    pub fn create_mutable_binding(&self, agent: &mut Agent, name: JsString, deletable: bool) {
        debug_assert!(!self.has_binding(agent, name));
        let descriptor =
            PropertyDescriptor::data(Value::Undefined, true, true, deletable);
        // The binding object is the global object or a `with` target; the
        // define cannot fail on them short of preventExtensions, in which
        // case the spec swallows the failure for false `throw`.
        let _ = ordinary::define_own_property(
            agent,
            self.binding_object,
            name,
            descriptor,
            false,
        );
    }

    /// ### [10.2.1.2.3 SetMutableBinding (N, V, S)](https://262.ecma-international.org/5.1/#sec-10.2.1.2.3)
    pub fn set_mutable_binding(
        &self,
        agent: &mut Agent,
        name: JsString,
        value: Value,
        strict: bool,
    ) -> JsResult<()> {
        ordinary::put(agent, self.binding_object, name, value, strict)
    }

    /// ### [10.2.1.2.4 GetBindingValue (N, S)](https://262.ecma-international.org/5.1/#sec-10.2.1.2.4)
    pub fn get_binding_value(
        &self,
        agent: &mut Agent,
        name: JsString,
        strict: bool,
    ) -> JsResult<Value> {
        if !ordinary::has_property(agent, self.binding_object, name) {
            if !strict {
                return Ok(Value::Undefined);
            }
            let message = format!("'{}' is not defined.", agent.string_lossy(name));
            return Err(agent.throw_exception(ExceptionType::ReferenceError, message));
        }
        ordinary::get(agent, self.binding_object, name)
    }

    /// ### [10.2.1.2.5 DeleteBinding (N)](https://262.ecma-international.org/5.1/#sec-10.2.1.2.5)
    pub fn delete_binding(&self, agent: &mut Agent, name: JsString) -> JsResult<bool> {
        ordinary::delete(agent, self.binding_object, name, false)
    }

    /// ### [10.2.1.2.6 ImplicitThisValue ()](https://262.ecma-international.org/5.1/#sec-10.2.1.2.6)
    pub fn implicit_this_value(&self) -> Value {
        if self.provide_this {
            Value::Object(self.binding_object)
        } else {
            Value::Undefined
        }
    }
}
