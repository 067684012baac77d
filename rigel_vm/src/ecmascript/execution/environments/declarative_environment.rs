// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use ahash::AHashMap;

use crate::ecmascript::types::{JsString, Value};

/// ### [10.2.1.1 Declarative Environment Records](https://262.ecma-international.org/5.1/#sec-10.2.1.1)
///
/// Bindings created directly by syntax: formal parameters, `var` and
/// function declarations inside function code, catch parameters, and the
/// name binding of named function expressions.
#[derive(Debug, Default)]
pub struct DeclarativeEnvironmentRecord {
    bindings: AHashMap<JsString, Binding>,
}

#[derive(Debug, Clone, Copy)]
struct Binding {
    /// `None` while uninitialized (an immutable binding between creation
    /// and initialization).
    value: Option<Value>,
    mutable: bool,
    deletable: bool,
}

impl DeclarativeEnvironmentRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// ### [10.2.1.1.1 HasBinding (N)](https://262.ecma-international.org/5.1/#sec-10.2.1.1.1)
    pub fn has_binding(&self, name: JsString) -> bool {
        self.bindings.contains_key(&name)
    }

    /// ### [10.2.1.1.2 CreateMutableBinding (N, D)](https://262.ecma-international.org/5.1/#sec-10.2.1.1.2)
    ///
    /// The new binding is initialized to undefined right away; every caller
    /// in ES5.1 does so before any code can observe it.
    pub fn create_mutable_binding(&mut self, name: JsString, deletable: bool) {
        debug_assert!(!self.has_binding(name));
        self.bindings.insert(
            name,
            Binding {
                value: Some(Value::Undefined),
                mutable: true,
                deletable,
            },
        );
    }

    /// CreateImmutableBinding (N): the binding starts uninitialized.
    pub fn create_immutable_binding(&mut self, name: JsString) {
        debug_assert!(!self.has_binding(name));
        self.bindings.insert(
            name,
            Binding {
                value: None,
                mutable: false,
                deletable: false,
            },
        );
    }

    /// InitializeImmutableBinding (N, V)
    pub fn initialize_binding(&mut self, name: JsString, value: Value) {
        let binding = self.bindings.get_mut(&name).unwrap();
        debug_assert!(binding.value.is_none());
        binding.value = Some(value);
    }

    /// ### [10.2.1.1.3 SetMutableBinding (N, V, S)](https://262.ecma-international.org/5.1/#sec-10.2.1.1.3)
    ///
    /// `Err(())` reports an attempt to change an immutable binding; the
    /// caller decides whether strictness turns that into a TypeError.
    pub fn set_mutable_binding(&mut self, name: JsString, value: Value) -> Result<(), ()> {
        let binding = self.bindings.get_mut(&name).expect("binding must exist");
        if binding.mutable {
            binding.value = Some(value);
            Ok(())
        } else {
            Err(())
        }
    }

    /// ### [10.2.1.1.4 GetBindingValue (N, S)](https://262.ecma-international.org/5.1/#sec-10.2.1.1.4)
    ///
    /// `None` reports an uninitialized immutable binding.
    pub fn get_binding_value(&self, name: JsString) -> Option<Value> {
        self.bindings.get(&name).expect("binding must exist").value
    }

    /// ### [10.2.1.1.5 DeleteBinding (N)](https://262.ecma-international.org/5.1/#sec-10.2.1.1.5)
    pub fn delete_binding(&mut self, name: JsString) -> bool {
        let Some(binding) = self.bindings.get(&name) else {
            return true;
        };
        if !binding.deletable {
            return false;
        }
        self.bindings.remove(&name);
        true
    }
}
