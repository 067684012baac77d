// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::ecmascript::types::Value;

/// ### [8.10 The Property Descriptor Specification Type](https://262.ecma-international.org/5.1/#sec-8.10)
///
/// Fields are all optional so one type serves both partial descriptors (as
/// passed to `Object.defineProperty`) and the complete descriptors stored in
/// object property maps. Accessor fields hold `Value::Undefined` for an
/// explicitly absent getter or setter.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PropertyDescriptor {
    /// \[\[Value]]
    pub value: Option<Value>,

    /// \[\[Writable]]
    pub writable: Option<bool>,

    /// \[\[Get]]
    pub get: Option<Value>,

    /// \[\[Set]]
    pub set: Option<Value>,

    /// \[\[Enumerable]]
    pub enumerable: Option<bool>,

    /// \[\[Configurable]]
    pub configurable: Option<bool>,
}

impl PropertyDescriptor {
    /// ### [8.10.2 IsDataDescriptor](https://262.ecma-international.org/5.1/#sec-8.10.2)
    pub fn is_data_descriptor(&self) -> bool {
        self.value.is_some() || self.writable.is_some()
    }

    /// ### [8.10.1 IsAccessorDescriptor](https://262.ecma-international.org/5.1/#sec-8.10.1)
    pub fn is_accessor_descriptor(&self) -> bool {
        self.get.is_some() || self.set.is_some()
    }

    /// ### [8.10.3 IsGenericDescriptor](https://262.ecma-international.org/5.1/#sec-8.10.3)
    pub fn is_generic_descriptor(&self) -> bool {
        !self.is_data_descriptor() && !self.is_accessor_descriptor()
    }

    pub fn writable(&self) -> bool {
        self.writable.unwrap_or(false)
    }

    pub fn enumerable(&self) -> bool {
        self.enumerable.unwrap_or(false)
    }

    pub fn configurable(&self) -> bool {
        self.configurable.unwrap_or(false)
    }

    /// A complete data descriptor.
    pub fn data(value: Value, writable: bool, enumerable: bool, configurable: bool) -> Self {
        Self {
            value: Some(value),
            writable: Some(writable),
            get: None,
            set: None,
            enumerable: Some(enumerable),
            configurable: Some(configurable),
        }
    }

    /// A complete accessor descriptor.
    pub fn accessor(get: Value, set: Value, enumerable: bool, configurable: bool) -> Self {
        Self {
            value: None,
            writable: None,
            get: Some(get),
            set: Some(set),
            enumerable: Some(enumerable),
            configurable: Some(configurable),
        }
    }

    /// Fill absent fields with the §8.10 defaults, producing a stored-form
    /// descriptor.
    pub fn complete(mut self) -> Self {
        if self.is_accessor_descriptor() {
            self.get.get_or_insert(Value::Undefined);
            self.set.get_or_insert(Value::Undefined);
        } else {
            self.value.get_or_insert(Value::Undefined);
            self.writable.get_or_insert(false);
        }
        self.enumerable.get_or_insert(false);
        self.configurable.get_or_insert(false);
        self
    }
}
