// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Statement evaluation ([§12](https://262.ecma-international.org/5.1/#sec-12)).
//!
//! Every statement yields a [`Completion`]; the Throw arm travels as the
//! `Err` of `JsResult`, which `try`/`finally` inspects before joining
//! outcomes. Statement lists and loop bodies are driven iteratively so deep
//! programs do not grow the host stack.

use rigel_parser::ast::*;

use crate::ecmascript::abstract_operations::operations_on_objects::enumerate_keys_for_in;
use crate::ecmascript::abstract_operations::testing_and_comparison::same_value;
use crate::ecmascript::abstract_operations::type_conversion::{to_boolean, to_object};
use crate::ecmascript::builtins::ordinary;
use crate::ecmascript::execution::agent::{Agent, JsError, JsResult};
use crate::ecmascript::execution::environments::{
    get_identifier_reference, new_declarative_environment, new_object_environment,
};
use crate::ecmascript::types::spec::reference::put_value;
use crate::ecmascript::types::{Completion, Evaluated, JsString, Value};

use super::expressions::{evaluate, intern_label, resolve_for_in_target};

/// Evaluate a statement list, threading the statement value V.
pub fn evaluate_statements(agent: &mut Agent, statements: &[Statement]) -> JsResult<Completion> {
    let mut value: Option<Value> = None;
    for statement in statements {
        match evaluate_statement(agent, statement)? {
            Completion::Normal(v) => {
                if v.is_some() {
                    value = v;
                }
            }
            abrupt => return Ok(abrupt.update_value(value)),
        }
    }
    Ok(Completion::Normal(value))
}

/// Evaluate a function body to its return value.
pub fn evaluate_function_body(agent: &mut Agent, body: &[Statement]) -> JsResult<Value> {
    match evaluate_statements(agent, body)? {
        Completion::Return(value) => Ok(value),
        // Falling off the end returns undefined; break/continue cannot
        // cross a function boundary (early errors).
        _ => Ok(Value::Undefined),
    }
}

pub fn evaluate_statement(agent: &mut Agent, statement: &Statement) -> JsResult<Completion> {
    // ### [12.12 Labelled Statements](https://262.ecma-international.org/5.1/#sec-12.12)
    //
    // Collect the whole label chain; the labelled statement's own
    // evaluation consumes a break targeting any of its labels.
    if let Statement::Labeled(_) = statement {
        let mut labels = Vec::new();
        let mut inner = statement;
        while let Statement::Labeled(labeled) = inner {
            labels.push(agent.intern(&labeled.label.name));
            inner = &labeled.body;
        }
        let completion = evaluate_statement_with_labels(agent, inner, &labels)?;
        return Ok(match completion {
            Completion::Break(value, Some(target)) if labels.contains(&target) => {
                Completion::Normal(value)
            }
            other => other,
        });
    }
    evaluate_statement_with_labels(agent, statement, &[])
}

fn evaluate_statement_with_labels(
    agent: &mut Agent,
    statement: &Statement,
    labels: &[JsString],
) -> JsResult<Completion> {
    match statement {
        Statement::Block(block) => evaluate_statements(agent, &block.body),

        // ### [12.2 Variable Statement](https://262.ecma-international.org/5.1/#sec-12.2)
        Statement::Variable(variable) => {
            evaluate_variable_declarations(agent, &variable.declarations)?;
            Ok(Completion::Normal(None))
        }

        Statement::Empty(_) | Statement::Debugger(_) => Ok(Completion::Normal(None)),

        // The binding was created during declaration instantiation.
        Statement::FunctionDeclaration(_) => Ok(Completion::Normal(None)),

        // ### [12.4 Expression Statement](https://262.ecma-international.org/5.1/#sec-12.4)
        Statement::Expression(expression) => {
            let value = evaluate(agent, &expression.expression)?;
            Ok(Completion::Normal(Some(value)))
        }

        // ### [12.5 The if Statement](https://262.ecma-international.org/5.1/#sec-12.5)
        Statement::If(if_statement) => {
            let test = evaluate(agent, &if_statement.test)?;
            if to_boolean(agent, test) {
                evaluate_statement(agent, &if_statement.consequent)
            } else if let Some(alternate) = &if_statement.alternate {
                evaluate_statement(agent, alternate)
            } else {
                Ok(Completion::Normal(None))
            }
        }

        // ### [12.6.1 The do-while Statement](https://262.ecma-international.org/5.1/#sec-12.6.1)
        Statement::DoWhile(do_while) => {
            let mut value: Option<Value> = None;
            loop {
                match loop_body(agent, &do_while.body, labels, &mut value)? {
                    LoopFlow::Continue => {}
                    LoopFlow::Break => return Ok(Completion::Normal(value)),
                    LoopFlow::Propagate(completion) => return Ok(completion),
                }
                let test = evaluate(agent, &do_while.test)?;
                if !to_boolean(agent, test) {
                    return Ok(Completion::Normal(value));
                }
            }
        }

        // ### [12.6.2 The while Statement](https://262.ecma-international.org/5.1/#sec-12.6.2)
        Statement::While(while_statement) => {
            let mut value: Option<Value> = None;
            loop {
                let test = evaluate(agent, &while_statement.test)?;
                if !to_boolean(agent, test) {
                    return Ok(Completion::Normal(value));
                }
                match loop_body(agent, &while_statement.body, labels, &mut value)? {
                    LoopFlow::Continue => {}
                    LoopFlow::Break => return Ok(Completion::Normal(value)),
                    LoopFlow::Propagate(completion) => return Ok(completion),
                }
            }
        }

        // ### [12.6.3 The for Statement](https://262.ecma-international.org/5.1/#sec-12.6.3)
        Statement::For(for_statement) => {
            match &for_statement.init {
                Some(ForInit::Variable(variable)) => {
                    evaluate_variable_declarations(agent, &variable.declarations)?;
                }
                Some(ForInit::Expression(expression)) => {
                    evaluate(agent, expression)?;
                }
                None => {}
            }
            let mut value: Option<Value> = None;
            loop {
                if let Some(test) = &for_statement.test {
                    let test = evaluate(agent, test)?;
                    if !to_boolean(agent, test) {
                        return Ok(Completion::Normal(value));
                    }
                }
                match loop_body(agent, &for_statement.body, labels, &mut value)? {
                    LoopFlow::Continue => {}
                    LoopFlow::Break => return Ok(Completion::Normal(value)),
                    LoopFlow::Propagate(completion) => return Ok(completion),
                }
                if let Some(update) = &for_statement.update {
                    evaluate(agent, update)?;
                }
            }
        }

        // ### [12.6.4 The for-in Statement](https://262.ecma-international.org/5.1/#sec-12.6.4)
        Statement::ForIn(for_in) => {
            // Evaluate a var-form initializer before the loop: `for (var p
            // = x in o)` runs the initializer once.
            if let ForInTarget::Variable(declarator) = &for_in.left {
                evaluate_variable_declarator(agent, declarator)?;
            }
            let object = evaluate(agent, &for_in.right)?;
            // 3. undefined and null short-circuit to an empty loop.
            if object.is_undefined() || object.is_null() {
                return Ok(Completion::Normal(None));
            }
            let object = to_object(agent, object)?;
            let keys = enumerate_keys_for_in(agent, object);
            let mut value: Option<Value> = None;
            for key in keys {
                // A property deleted before its turn is skipped.
                if !ordinary::has_property(agent, object, key) {
                    continue;
                }
                let target = resolve_for_in_target(agent, &for_in.left)?;
                put_value(agent, target, Value::String(key))?;
                match loop_body(agent, &for_in.body, labels, &mut value)? {
                    LoopFlow::Continue => {}
                    LoopFlow::Break => return Ok(Completion::Normal(value)),
                    LoopFlow::Propagate(completion) => return Ok(completion),
                }
            }
            Ok(Completion::Normal(value))
        }

        // ### [12.7](https://262.ecma-international.org/5.1/#sec-12.7) /
        // [12.8 The continue and break Statements](https://262.ecma-international.org/5.1/#sec-12.8)
        Statement::Continue(continue_statement) => {
            let target = intern_label(agent, &continue_statement.label);
            Ok(Completion::Continue(None, target))
        }
        Statement::Break(break_statement) => {
            let target = intern_label(agent, &break_statement.label);
            Ok(Completion::Break(None, target))
        }

        // ### [12.9 The return Statement](https://262.ecma-international.org/5.1/#sec-12.9)
        Statement::Return(return_statement) => {
            let value = match &return_statement.argument {
                Some(argument) => evaluate(agent, argument)?,
                None => Value::Undefined,
            };
            Ok(Completion::Return(value))
        }

        // ### [12.10 The with Statement](https://262.ecma-international.org/5.1/#sec-12.10)
        Statement::With(with_statement) => {
            let object = evaluate(agent, &with_statement.object)?;
            let object = to_object(agent, object)?;
            let old_env = agent.running_execution_context().lexical_environment;
            let new_env = new_object_environment(agent, object, true, Some(old_env));
            agent.running_execution_context_mut().lexical_environment = new_env;
            let result = evaluate_statement(agent, &with_statement.body);
            agent.running_execution_context_mut().lexical_environment = old_env;
            result
        }

        // ### [12.11 The switch Statement](https://262.ecma-international.org/5.1/#sec-12.11)
        Statement::Switch(switch) => {
            let completion = evaluate_switch(agent, switch)?;
            Ok(match completion {
                Completion::Break(value, None) => Completion::Normal(value),
                Completion::Break(value, Some(target)) if labels.contains(&target) => {
                    Completion::Normal(value)
                }
                other => other,
            })
        }

        // ### [12.13 The throw Statement](https://262.ecma-international.org/5.1/#sec-12.13)
        Statement::Throw(throw) => {
            let value = evaluate(agent, &throw.argument)?;
            Err(JsError::new(value))
        }

        // ### [12.14 The try Statement](https://262.ecma-international.org/5.1/#sec-12.14)
        Statement::Try(try_statement) => evaluate_try(agent, try_statement),

        Statement::Labeled(_) => evaluate_statement(agent, statement),
    }
}

/// What a loop driver should do after one body evaluation.
enum LoopFlow {
    Continue,
    Break,
    Propagate(Completion),
}

fn loop_body(
    agent: &mut Agent,
    body: &Statement,
    labels: &[JsString],
    value: &mut Option<Value>,
) -> JsResult<LoopFlow> {
    match evaluate_statement(agent, body)? {
        Completion::Normal(v) => {
            if v.is_some() {
                *value = v;
            }
            Ok(LoopFlow::Continue)
        }
        Completion::Continue(v, target) => {
            if v.is_some() {
                *value = v;
            }
            match target {
                None => Ok(LoopFlow::Continue),
                Some(label) if labels.contains(&label) => Ok(LoopFlow::Continue),
                Some(label) => {
                    Ok(LoopFlow::Propagate(Completion::Continue(*value, Some(label))))
                }
            }
        }
        Completion::Break(v, target) => {
            if v.is_some() {
                *value = v;
            }
            match target {
                None => Ok(LoopFlow::Break),
                Some(label) if labels.contains(&label) => Ok(LoopFlow::Break),
                Some(label) => Ok(LoopFlow::Propagate(Completion::Break(*value, Some(label)))),
            }
        }
        Completion::Return(v) => Ok(LoopFlow::Propagate(Completion::Return(v))),
    }
}

fn evaluate_variable_declarations(
    agent: &mut Agent,
    declarations: &[VariableDeclarator],
) -> JsResult<()> {
    for declarator in declarations {
        evaluate_variable_declarator(agent, declarator)?;
    }
    Ok(())
}

fn evaluate_variable_declarator(
    agent: &mut Agent,
    declarator: &VariableDeclarator,
) -> JsResult<()> {
    let Some(init) = &declarator.init else {
        return Ok(());
    };
    // The binding exists since declaration instantiation; this is just an
    // assignment that cannot be unresolvable.
    let name = agent.intern(&declarator.id.name);
    let strict = agent.in_strict_mode();
    let lexical = agent.running_execution_context().lexical_environment;
    let reference = get_identifier_reference(agent, Some(lexical), name, strict);
    let value = evaluate(agent, init)?;
    put_value(agent, Evaluated::Reference(reference), value)?;
    Ok(())
}

/// ### [12.11 The switch Statement](https://262.ecma-international.org/5.1/#sec-12.11)
///
/// Case selection compares with SameValue; once a clause matches (or the
/// default is reached), execution falls through the remaining clauses.
fn evaluate_switch(agent: &mut Agent, switch: &SwitchStatement) -> JsResult<Completion> {
    let discriminant = evaluate(agent, &switch.discriminant)?;
    let mut start = None;
    for (index, case) in switch.cases.iter().enumerate() {
        let Some(test) = &case.test else {
            continue;
        };
        let test = evaluate(agent, test)?;
        if same_value(agent, discriminant, test) {
            start = Some(index);
            break;
        }
    }
    if start.is_none() {
        start = switch.cases.iter().position(|case| case.test.is_none());
    }
    let Some(start) = start else {
        return Ok(Completion::Normal(None));
    };
    let mut value: Option<Value> = None;
    for case in &switch.cases[start..] {
        match evaluate_statements(agent, &case.body)? {
            Completion::Normal(v) => {
                if v.is_some() {
                    value = v;
                }
            }
            abrupt => return Ok(abrupt.update_value(value)),
        }
    }
    Ok(Completion::Normal(value))
}

/// ### [12.14 The try Statement](https://262.ecma-international.org/5.1/#sec-12.14)
fn evaluate_try(agent: &mut Agent, try_statement: &TryStatement) -> JsResult<Completion> {
    let block = evaluate_statements(agent, &try_statement.block.body);

    // Catch converts a throw from the protected block into its own result.
    let handled = match (block, &try_statement.handler) {
        (Err(error), Some(handler)) => evaluate_catch(agent, handler, error.value()),
        (other, _) => other,
    };

    let Some(finalizer) = &try_statement.finalizer else {
        return handled;
    };
    match evaluate_statements(agent, &finalizer.body)? {
        // A normal finally preserves the protected block's outcome, even an
        // abrupt one.
        Completion::Normal(_) => handled,
        // An abrupt finally supersedes it.
        abrupt => Ok(abrupt),
    }
}

/// ### [12.14 Catch](https://262.ecma-international.org/5.1/#sec-12.14):
/// the parameter is bound in a fresh declarative environment.
fn evaluate_catch(
    agent: &mut Agent,
    handler: &CatchClause,
    thrown: Value,
) -> JsResult<Completion> {
    let old_env = agent.running_execution_context().lexical_environment;
    let catch_env = new_declarative_environment(agent, Some(old_env));
    let name = agent.intern(&handler.param.name);
    catch_env.create_mutable_binding(agent, name, false);
    catch_env.set_mutable_binding(agent, name, thrown, false)?;
    agent.running_execution_context_mut().lexical_environment = catch_env;
    let result = evaluate_statements(agent, &handler.body.body);
    agent.running_execution_context_mut().lexical_environment = old_env;
    result
}
