// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ECMAScript types: the language types scripts can observe
//! ([§8](https://262.ecma-international.org/5.1/#sec-8)) and the
//! specification types that exist to describe semantics
//! (Reference, Property Descriptor, Completion).

pub mod language;
pub mod spec;

pub use language::object::{ObjectData, ObjectRecord, PrimitiveValue};
pub use language::string::JsString;
pub use language::{Object, Value};
pub use spec::completion::Completion;
pub use spec::property_descriptor::PropertyDescriptor;
pub use spec::reference::{Evaluated, Reference, ReferenceBase};
