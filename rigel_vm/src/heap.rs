// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Arena storage for strings, objects and environment records.
//!
//! Every heap value is addressed by a `Copy` u32 handle ([`JsString`],
//! [`Object`], [`Environment`]). Strings are interned: equal contents yield
//! equal handles, so handle equality is string equality. Nothing is
//! collected while the interpreter runs; the arenas are swept when the
//! owning interpreter is dropped.

use ahash::RandomState;
use hashbrown::HashTable;

use crate::ecmascript::execution::environments::{Environment, EnvironmentRecord};
use crate::ecmascript::types::language::object::ObjectRecord;
use crate::ecmascript::types::language::{string::JsString, Object};

#[derive(Debug, Default)]
pub struct Heap {
    strings: Vec<Box<[u16]>>,
    /// Intern table: entries are indices into `strings`, keyed by content.
    string_table: HashTable<u32>,
    hasher: RandomState,
    objects: Vec<ObjectRecord>,
    environments: Vec<EnvironmentRecord>,
}

impl Heap {
    pub fn new() -> Self {
        Self::default()
    }

    // ## Strings

    /// Intern a UTF-16 string, returning the canonical handle for its
    /// contents.
    pub fn intern_units(&mut self, units: &[u16]) -> JsString {
        let hash = self.hasher.hash_one(units);
        let strings = &self.strings;
        if let Some(&index) = self
            .string_table
            .find(hash, |&index| &*strings[index as usize] == units)
        {
            return JsString::from_index(index);
        }
        let index = u32::try_from(self.strings.len()).expect("string heap exhausted");
        self.strings.push(units.into());
        let strings = &self.strings;
        let hasher = &self.hasher;
        self.string_table.insert_unique(hash, index, |&index| {
            hasher.hash_one(&*strings[index as usize])
        });
        JsString::from_index(index)
    }

    pub fn intern_str(&mut self, s: &str) -> JsString {
        let units: Vec<u16> = s.encode_utf16().collect();
        self.intern_units(&units)
    }

    /// The code units of an interned string.
    pub fn string(&self, s: JsString) -> &[u16] {
        &self.strings[s.into_index() as usize]
    }

    /// UTF-8 rendering; unpaired surrogates become U+FFFD.
    pub fn string_lossy(&self, s: JsString) -> String {
        String::from_utf16_lossy(self.string(s))
    }

    pub fn string_len(&self, s: JsString) -> usize {
        self.string(s).len()
    }

    // ## Objects

    pub fn create_object(&mut self, record: ObjectRecord) -> Object {
        let index = u32::try_from(self.objects.len()).expect("object heap exhausted");
        self.objects.push(record);
        Object::from_index(index)
    }

    pub fn object(&self, o: Object) -> &ObjectRecord {
        &self.objects[o.into_index() as usize]
    }

    pub fn object_mut(&mut self, o: Object) -> &mut ObjectRecord {
        &mut self.objects[o.into_index() as usize]
    }

    // ## Environments

    pub fn create_environment(&mut self, record: EnvironmentRecord) -> Environment {
        let index = u32::try_from(self.environments.len()).expect("environment heap exhausted");
        self.environments.push(record);
        Environment::from_index(index)
    }

    pub fn environment(&self, e: Environment) -> &EnvironmentRecord {
        &self.environments[e.into_index() as usize]
    }

    pub fn environment_mut(&mut self, e: Environment) -> &mut EnvironmentRecord {
        &mut self.environments[e.into_index() as usize]
    }
}
