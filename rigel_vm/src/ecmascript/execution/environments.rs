// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ### [10.2 Lexical Environments](https://262.ecma-international.org/5.1/#sec-10.2)
//!
//! An environment record plus its outer link, allocated in the heap's
//! environment arena and addressed by the `Copy` [`Environment`] handle.
//! Closures pin their `[[Scope]]` environment simply by holding the handle;
//! nothing is reclaimed before interpreter teardown.

pub mod declarative_environment;
pub mod object_environment;

use declarative_environment::DeclarativeEnvironmentRecord;
use object_environment::ObjectEnvironmentRecord;

use super::agent::{Agent, ExceptionType, JsResult};
use crate::ecmascript::types::{JsString, Object, Reference, ReferenceBase, Value};

/// Handle to a lexical environment in an interpreter's heap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Environment(u32);

impl Environment {
    pub(crate) fn from_index(index: u32) -> Self {
        Self(index)
    }

    pub(crate) fn into_index(self) -> u32 {
        self.0
    }
}

/// A lexical environment: the record and the outer link.
#[derive(Debug)]
pub struct EnvironmentRecord {
    pub outer: Option<Environment>,
    pub kind: EnvironmentKind,
}

#[derive(Debug)]
pub enum EnvironmentKind {
    /// ### [10.2.1.1 Declarative Environment Records](https://262.ecma-international.org/5.1/#sec-10.2.1.1)
    Declarative(DeclarativeEnvironmentRecord),
    /// ### [10.2.1.2 Object Environment Records](https://262.ecma-international.org/5.1/#sec-10.2.1.2)
    Object(ObjectEnvironmentRecord),
}

/// ### [10.2.2.2 NewDeclarativeEnvironment (E)](https://262.ecma-international.org/5.1/#sec-10.2.2.2)
pub fn new_declarative_environment(
    agent: &mut Agent,
    outer: Option<Environment>,
) -> Environment {
    agent.heap.create_environment(EnvironmentRecord {
        outer,
        kind: EnvironmentKind::Declarative(DeclarativeEnvironmentRecord::new()),
    })
}

/// ### [10.2.2.3 NewObjectEnvironment (O, E)](https://262.ecma-international.org/5.1/#sec-10.2.2.3)
pub fn new_object_environment(
    agent: &mut Agent,
    binding_object: Object,
    provide_this: bool,
    outer: Option<Environment>,
) -> Environment {
    agent.heap.create_environment(EnvironmentRecord {
        outer,
        kind: EnvironmentKind::Object(ObjectEnvironmentRecord {
            binding_object,
            provide_this,
        }),
    })
}

impl Environment {
    pub fn outer(self, agent: &Agent) -> Option<Environment> {
        agent.heap.environment(self).outer
    }

    /// HasBinding(N)
    pub fn has_binding(self, agent: &Agent, name: JsString) -> bool {
        match &agent.heap.environment(self).kind {
            EnvironmentKind::Declarative(record) => record.has_binding(name),
            EnvironmentKind::Object(record) => record.has_binding(agent, name),
        }
    }

    /// CreateMutableBinding(N, D)
    pub fn create_mutable_binding(self, agent: &mut Agent, name: JsString, deletable: bool) {
        match &agent.heap.environment(self).kind {
            EnvironmentKind::Declarative(_) => {
                let EnvironmentKind::Declarative(record) =
                    &mut agent.heap.environment_mut(self).kind
                else {
                    unreachable!()
                };
                record.create_mutable_binding(name, deletable);
            }
            EnvironmentKind::Object(record) => {
                let record = *record;
                record.create_mutable_binding(agent, name, deletable);
            }
        }
    }

    /// CreateImmutableBinding(N), for the name binding of named function
    /// expressions.
    pub fn create_immutable_binding(self, agent: &mut Agent, name: JsString) {
        let EnvironmentKind::Declarative(record) = &mut agent.heap.environment_mut(self).kind
        else {
            unreachable!("immutable bindings only exist in declarative records");
        };
        record.create_immutable_binding(name);
    }

    /// InitializeImmutableBinding(N, V)
    pub fn initialize_immutable_binding(self, agent: &mut Agent, name: JsString, value: Value) {
        let EnvironmentKind::Declarative(record) = &mut agent.heap.environment_mut(self).kind
        else {
            unreachable!("immutable bindings only exist in declarative records");
        };
        record.initialize_binding(name, value);
    }

    /// SetMutableBinding(N, V, S)
    pub fn set_mutable_binding(
        self,
        agent: &mut Agent,
        name: JsString,
        value: Value,
        strict: bool,
    ) -> JsResult<()> {
        match &agent.heap.environment(self).kind {
            EnvironmentKind::Declarative(_) => {
                let EnvironmentKind::Declarative(record) =
                    &mut agent.heap.environment_mut(self).kind
                else {
                    unreachable!()
                };
                match record.set_mutable_binding(name, value) {
                    Ok(()) => Ok(()),
                    Err(()) => {
                        // Attempting to change an immutable binding.
                        if strict {
                            let message = format!(
                                "Assignment to constant binding '{}'.",
                                agent.string_lossy(name)
                            );
                            Err(agent.throw_exception(ExceptionType::TypeError, message))
                        } else {
                            Ok(())
                        }
                    }
                }
            }
            EnvironmentKind::Object(record) => {
                let record = *record;
                record.set_mutable_binding(agent, name, value, strict)
            }
        }
    }

    /// GetBindingValue(N, S)
    pub fn get_binding_value(
        self,
        agent: &mut Agent,
        name: JsString,
        strict: bool,
    ) -> JsResult<Value> {
        match &agent.heap.environment(self).kind {
            EnvironmentKind::Declarative(record) => {
                match record.get_binding_value(name) {
                    Some(value) => Ok(value),
                    None => {
                        // An uninitialized immutable binding: only reachable
                        // for a named function expression mid-creation.
                        let message = format!(
                            "Binding '{}' is not initialized.",
                            agent.string_lossy(name)
                        );
                        Err(agent.throw_exception(ExceptionType::ReferenceError, message))
                    }
                }
            }
            EnvironmentKind::Object(record) => {
                let record = *record;
                record.get_binding_value(agent, name, strict)
            }
        }
    }

    /// DeleteBinding(N)
    pub fn delete_binding(self, agent: &mut Agent, name: JsString) -> JsResult<bool> {
        match &agent.heap.environment(self).kind {
            EnvironmentKind::Declarative(_) => {
                let EnvironmentKind::Declarative(record) =
                    &mut agent.heap.environment_mut(self).kind
                else {
                    unreachable!()
                };
                Ok(record.delete_binding(name))
            }
            EnvironmentKind::Object(record) => {
                let record = *record;
                record.delete_binding(agent, name)
            }
        }
    }

    /// ImplicitThisValue()
    pub fn implicit_this_value(self, agent: &Agent) -> Value {
        match &agent.heap.environment(self).kind {
            EnvironmentKind::Declarative(_) => Value::Undefined,
            EnvironmentKind::Object(record) => record.implicit_this_value(),
        }
    }
}

/// ### [10.2.2.1 GetIdentifierReference (lex, name, strict)](https://262.ecma-international.org/5.1/#sec-10.2.2.1)
pub fn get_identifier_reference(
    agent: &Agent,
    mut environment: Option<Environment>,
    name: JsString,
    strict: bool,
) -> Reference {
    // 2. If lex is the value null, return a Reference of base undefined.
    while let Some(env) = environment {
        // 3. If envRec.HasBinding(name) is true, return a Reference with
        // base environment record envRec.
        if env.has_binding(agent, name) {
            return Reference {
                base: ReferenceBase::Environment(env),
                referenced_name: name,
                strict,
            };
        }
        // 5. Else, let outer be lex's outer environment reference and
        // repeat.
        environment = env.outer(agent);
    }
    Reference {
        base: ReferenceBase::Unresolvable,
        referenced_name: name,
        strict,
    }
}
