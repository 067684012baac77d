// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Global code evaluation: entering global code
//! ([§10.4.1](https://262.ecma-international.org/5.1/#sec-10.4.1)) and the
//! eval variant ([§10.4.2](https://262.ecma-international.org/5.1/#sec-10.4.2)).

use rigel_parser::ast::Program;

use crate::ecmascript::builtins::ecmascript_function::declaration_binding_instantiation;
use crate::ecmascript::execution::agent::{Agent, JsResult};
use crate::ecmascript::execution::environments::new_declarative_environment;
use crate::ecmascript::execution::execution_context::ExecutionContext;
use crate::ecmascript::types::{Completion, Value};
use crate::engine::evaluator::evaluate_statements;

/// ### [10.4.1 Entering Global Code](https://262.ecma-international.org/5.1/#sec-10.4.1)
///
/// Pushes a global execution context, hoists declarations onto the global
/// environment (bindings are non-deletable: `delete x` on a top-level var
/// is false), evaluates the program and returns its completion value.
pub fn script_evaluation(agent: &mut Agent, program: &Program) -> JsResult<Value> {
    let global_env = agent.realm.global_env;
    let global_object = agent.realm.global_object;
    agent.execution_context_stack.push(ExecutionContext {
        lexical_environment: global_env,
        variable_environment: global_env,
        this_binding: Value::Object(global_object),
        function: None,
        strict: program.strict,
    });
    let result = declaration_binding_instantiation(
        agent,
        &[],
        &program.body,
        None,
        &[],
        global_env,
        program.strict,
        false,
    )
    .and_then(|()| evaluate_statements(agent, &program.body));
    agent.execution_context_stack.pop();
    Ok(match result? {
        Completion::Normal(value) => value.unwrap_or(Value::Undefined),
        // Return/break/continue cannot escape a Program (early errors).
        other => other.value().unwrap_or(Value::Undefined),
    })
}

/// ### [10.4.2 Entering Eval Code](https://262.ecma-international.org/5.1/#sec-10.4.2)
///
/// Global-scope eval: the eval code sees the global environment. Strict
/// eval code gets its own declarative environment so its declarations do
/// not leak ([§10.4.2.1](https://262.ecma-international.org/5.1/#sec-10.4.2.1)).
pub fn eval_in_global(agent: &mut Agent, program: &Program) -> JsResult<Value> {
    let global_env = agent.realm.global_env;
    let global_object = agent.realm.global_object;
    let env = if program.strict {
        new_declarative_environment(agent, Some(global_env))
    } else {
        global_env
    };
    agent.execution_context_stack.push(ExecutionContext {
        lexical_environment: env,
        variable_environment: env,
        this_binding: Value::Object(global_object),
        function: None,
        strict: program.strict,
    });
    let result = declaration_binding_instantiation(
        agent,
        &[],
        &program.body,
        None,
        &[],
        env,
        program.strict,
        true,
    )
    .and_then(|()| evaluate_statements(agent, &program.body));
    agent.execution_context_stack.pop();
    Ok(match result? {
        Completion::Normal(value) => value.unwrap_or(Value::Undefined),
        other => other.value().unwrap_or(Value::Undefined),
    })
}
