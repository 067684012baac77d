// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ### [8.6 The Object Type](https://262.ecma-international.org/5.1/#sec-8.6)
//!
//! An object is its own property collection plus the internal properties of
//! [§8.6.2](https://262.ecma-international.org/5.1/#sec-8.6.2): `[[Prototype]]`,
//! `[[Class]]`, `[[Extensible]]` and the kind-specific internal slots. Own
//! properties live in an insertion-ordered map; `for-in` relies on that
//! order.

use std::rc::Rc;

use ahash::RandomState;
use indexmap::IndexMap;

use rigel_parser::ast;

use super::string::JsString;
use super::value::Value;
use crate::ecmascript::execution::agent::{Agent, JsResult};
use crate::ecmascript::execution::environments::Environment;
use crate::ecmascript::types::spec::property_descriptor::PropertyDescriptor;

/// Handle to an object in an interpreter's heap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Object(u32);

impl Object {
    pub(crate) fn from_index(index: u32) -> Self {
        Self(index)
    }

    pub(crate) fn into_index(self) -> u32 {
        self.0
    }
}

pub type PropertyStorage = IndexMap<JsString, PropertyDescriptor, RandomState>;

/// Heap record backing an [`Object`] handle.
#[derive(Debug)]
pub struct ObjectRecord {
    /// \[\[Prototype]]
    pub prototype: Option<Object>,
    /// \[\[Class]]
    pub class: &'static str,
    /// \[\[Extensible]]
    pub extensible: bool,
    /// Own properties, in insertion order. Stored descriptors are always
    /// complete (every applicable field present).
    pub properties: PropertyStorage,
    /// Kind-specific internal slots.
    pub data: ObjectData,
}

impl ObjectRecord {
    pub fn ordinary(prototype: Option<Object>) -> Self {
        Self {
            prototype,
            class: "Object",
            extensible: true,
            properties: PropertyStorage::default(),
            data: ObjectData::Ordinary,
        }
    }

    pub fn with_class(prototype: Option<Object>, class: &'static str, data: ObjectData) -> Self {
        Self {
            prototype,
            class,
            extensible: true,
            properties: PropertyStorage::default(),
            data,
        }
    }

    pub fn is_callable(&self) -> bool {
        matches!(
            self.data,
            ObjectData::Function(_) | ObjectData::Builtin(_) | ObjectData::Bound(_)
        )
    }
}

/// Internal slots by object kind.
#[derive(Debug)]
pub enum ObjectData {
    Ordinary,
    /// Array exotic object: `[[DefineOwnProperty]]` maintains `length`.
    Array,
    /// A non-strict arguments object.
    Arguments,
    /// Boolean, Number and String wrapper objects: \[\[PrimitiveValue]].
    Primitive(PrimitiveValue),
    /// An ECMAScript function ([§13.2](https://262.ecma-international.org/5.1/#sec-13.2)).
    Function(Box<FunctionObjectData>),
    /// A function implemented by the engine or the host.
    Builtin(BuiltinFunctionData),
    /// The result of `Function.prototype.bind`
    /// ([§15.3.4.5](https://262.ecma-international.org/5.1/#sec-15.3.4.5)).
    Bound(Box<BoundFunctionData>),
    Error,
    /// \[\[PrimitiveValue]]: the time value in milliseconds since the epoch.
    Date(f64),
    RegExp(Box<RegExpData>),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PrimitiveValue {
    Boolean(bool),
    Number(f64),
    String(JsString),
}

/// \[\[FormalParameters]], \[\[Code]] and \[\[Scope]] of an ECMAScript
/// function. The AST is shared with the parse result; a closure keeps its
/// code alive for as long as the function object is reachable.
#[derive(Debug)]
pub struct FunctionObjectData {
    pub function: Rc<ast::Function>,
    /// \[\[Scope]]
    pub scope: Environment,
    pub strict: bool,
}

/// The native behaviour of a builtin function: `(agent, this, arguments)`.
pub type NativeFunction = fn(&mut Agent, Value, &[Value]) -> JsResult<Value>;

/// A builtin's `[[Construct]]`, where it has one: `(agent, arguments)`.
pub type NativeConstructor = fn(&mut Agent, &[Value]) -> JsResult<Value>;

#[derive(Clone)]
pub enum BuiltinBehaviour {
    Static(NativeFunction),
    /// A host-installed function. It must signal errors through the
    /// returned `JsResult`, never by unwinding across the evaluator.
    Host(Rc<dyn Fn(&mut Agent, Value, &[Value]) -> JsResult<Value>>),
}

impl std::fmt::Debug for BuiltinBehaviour {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuiltinBehaviour::Static(_) => f.write_str("BuiltinBehaviour::Static"),
            BuiltinBehaviour::Host(_) => f.write_str("BuiltinBehaviour::Host"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct BuiltinFunctionData {
    pub behaviour: BuiltinBehaviour,
    /// `[[Construct]]`, for the constructor intrinsics.
    pub construct: Option<NativeConstructor>,
    pub initial_name: JsString,
}

#[derive(Debug)]
pub struct BoundFunctionData {
    /// \[\[TargetFunction]]
    pub target_function: Object,
    /// \[\[BoundThis]]
    pub bound_this: Value,
    /// \[\[BoundArgs]]
    pub bound_args: Vec<Value>,
}

#[derive(Debug)]
pub struct RegExpData {
    /// The compiled pattern. Patterns outside the backing engine's dialect
    /// throw a SyntaxError at construction, so every RegExp object holds a
    /// usable matcher.
    pub matcher: regex::Regex,
    /// \[\[Source]], verbatim.
    pub source: JsString,
    pub global: bool,
    pub ignore_case: bool,
    pub multiline: bool,
}
