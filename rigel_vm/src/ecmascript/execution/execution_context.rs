// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::agent::Agent;
use super::environments::Environment;
use crate::ecmascript::types::{Object, Value};

/// ### [10.3 Execution Contexts](https://262.ecma-international.org/5.1/#sec-10.3)
///
/// One entry of the execution context stack: pushed for global code, for
/// every function call and for `eval` code.
#[derive(Debug, Clone, Copy)]
pub struct ExecutionContext {
    /// ### LexicalEnvironment
    ///
    /// Resolves identifier references made by code in this context.
    pub lexical_environment: Environment,

    /// ### VariableEnvironment
    ///
    /// Holds bindings created by VariableStatements and
    /// FunctionDeclarations. `with` and `catch` change the lexical
    /// environment but never this one.
    pub variable_environment: Environment,

    /// ### ThisBinding
    pub this_binding: Value,

    /// The function whose code this context evaluates; `None` for global
    /// and eval code.
    pub function: Option<Object>,

    /// Whether the code of this context is strict mode code.
    pub strict: bool,
}

/// The global object of the agent's single realm.
pub fn get_global_object(agent: &Agent) -> Object {
    agent.realm.global_object
}
