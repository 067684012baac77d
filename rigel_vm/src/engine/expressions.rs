// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Expression evaluation ([§11](https://262.ecma-international.org/5.1/#sec-11)).
//!
//! [`evaluate`] produces a language value; [`evaluate_reference`] preserves
//! the Reference for the operators whose semantics depend on it (`delete`,
//! `typeof`, assignment, update, and the this-binding of calls).

use rigel_parser::ast::*;

use crate::ecmascript::abstract_operations::operations_on_objects::call;
use crate::ecmascript::abstract_operations::testing_and_comparison::{
    abstract_relational_comparison, is_loosely_equal, is_strictly_equal,
};
use crate::ecmascript::abstract_operations::type_conversion::{
    check_object_coercible, to_boolean, to_int32, to_number, to_object, to_string, to_uint32,
};
use crate::ecmascript::builtins::ordinary;
use crate::ecmascript::builtins::{
    array_objects, ecmascript_function, regexp_objects,
};
use crate::ecmascript::execution::agent::{Agent, ExceptionType, JsResult};
use crate::ecmascript::execution::environments::{
    get_identifier_reference, new_declarative_environment,
};
use crate::ecmascript::types::spec::reference::{get_value, put_value};
use crate::ecmascript::types::{
    Evaluated, JsString, PropertyDescriptor, Reference, ReferenceBase, Value,
};

/// Evaluate to a language value.
pub fn evaluate(agent: &mut Agent, expression: &Expression) -> JsResult<Value> {
    let evaluated = evaluate_reference(agent, expression)?;
    get_value(agent, evaluated)
}

/// Evaluate, keeping References intact.
pub fn evaluate_reference(agent: &mut Agent, expression: &Expression) -> JsResult<Evaluated> {
    match expression {
        // ### [11.1.1 The this Keyword](https://262.ecma-international.org/5.1/#sec-11.1.1)
        Expression::This(_) => Ok(Evaluated::Value(agent.this_binding())),

        // ### [11.1.2 Identifier Reference](https://262.ecma-international.org/5.1/#sec-11.1.2)
        Expression::Identifier(id) => {
            let name = agent.intern(&id.name);
            let strict = agent.in_strict_mode();
            let lexical = agent.running_execution_context().lexical_environment;
            let reference = get_identifier_reference(agent, Some(lexical), name, strict);
            Ok(Evaluated::Reference(reference))
        }

        Expression::Literal(literal) => {
            Ok(Evaluated::Value(evaluate_literal(agent, literal)?))
        }

        Expression::Array(array) => Ok(Evaluated::Value(evaluate_array(agent, array)?)),
        Expression::Object(object) => Ok(Evaluated::Value(evaluate_object(agent, object)?)),

        // ### [13 Function Expression](https://262.ecma-international.org/5.1/#sec-13)
        Expression::Function(function) => {
            Ok(Evaluated::Value(instantiate_function_expression(
                agent, function,
            )?))
        }

        // ### [11.2.1 Property Accessors](https://262.ecma-international.org/5.1/#sec-11.2.1)
        Expression::Member(member) => {
            let base = evaluate(agent, &member.object)?;
            let name = match &member.property {
                MemberProperty::Static(id) => agent.intern(&id.name),
                MemberProperty::Computed(expression) => {
                    let property = evaluate(agent, expression)?;
                    check_object_coercible(agent, base)?;
                    to_string(agent, property)?
                }
            };
            check_object_coercible(agent, base)?;
            Ok(Evaluated::Reference(Reference {
                base: ReferenceBase::Value(base),
                referenced_name: name,
                strict: agent.in_strict_mode(),
            }))
        }

        // ### [11.2.2 The new Operator](https://262.ecma-international.org/5.1/#sec-11.2.2)
        Expression::New(new) => {
            let constructor = evaluate(agent, &new.callee)?;
            let arguments = evaluate_arguments(agent, &new.arguments)?;
            let Value::Object(constructor) = constructor else {
                return Err(agent.throw_exception_with_static_message(
                    ExceptionType::TypeError,
                    "Constructor is not an object",
                ));
            };
            let result = ecmascript_function::construct(agent, constructor, &arguments)?;
            Ok(Evaluated::Value(result))
        }

        // ### [11.2.3 Function Calls](https://262.ecma-international.org/5.1/#sec-11.2.3)
        Expression::Call(call_expression) => {
            let callee = evaluate_reference(agent, &call_expression.callee)?;
            let function = get_value(agent, callee)?;
            let arguments = evaluate_arguments(agent, &call_expression.arguments)?;
            // 6–7. The this value comes from the callee reference.
            let this_value = match callee {
                Evaluated::Reference(reference) => match reference.base {
                    ReferenceBase::Value(base) => base,
                    ReferenceBase::Environment(env) => env.implicit_this_value(agent),
                    ReferenceBase::Unresolvable => Value::Undefined,
                },
                Evaluated::Value(_) => Value::Undefined,
            };
            Ok(Evaluated::Value(call(
                agent, function, this_value, &arguments,
            )?))
        }

        // ### [11.3 Postfix](https://262.ecma-international.org/5.1/#sec-11.3) /
        // [11.4.4–11.4.5 Prefix Increment and Decrement](https://262.ecma-international.org/5.1/#sec-11.4.4)
        Expression::Update(update) => {
            let reference = evaluate_reference(agent, &update.argument)?;
            let old_value = get_value(agent, reference)?;
            let old_number = to_number(agent, old_value)?;
            let new_number = match update.operator {
                UpdateOperator::Increment => old_number + 1.0,
                UpdateOperator::Decrement => old_number - 1.0,
            };
            put_value(agent, reference, Value::Number(new_number))?;
            Ok(Evaluated::Value(Value::Number(if update.prefix {
                new_number
            } else {
                old_number
            })))
        }

        Expression::Unary(unary) => evaluate_unary(agent, unary),
        Expression::Binary(binary) => {
            let left = evaluate(agent, &binary.left)?;
            let right = evaluate(agent, &binary.right)?;
            let result = apply_binary_operator(agent, binary.operator, left, right)?;
            Ok(Evaluated::Value(result))
        }

        // ### [11.11 Binary Logical Operators](https://262.ecma-international.org/5.1/#sec-11.11)
        Expression::Logical(logical) => {
            let left = evaluate(agent, &logical.left)?;
            let keep_left = match logical.operator {
                LogicalOperator::And => !to_boolean(agent, left),
                LogicalOperator::Or => to_boolean(agent, left),
            };
            if keep_left {
                Ok(Evaluated::Value(left))
            } else {
                Ok(Evaluated::Value(evaluate(agent, &logical.right)?))
            }
        }

        // ### [11.13 Assignment Operators](https://262.ecma-international.org/5.1/#sec-11.13)
        Expression::Assignment(assignment) => {
            let target = evaluate_reference(agent, &assignment.target)?;
            let result = match assignment.operator.binary_operator() {
                None => evaluate(agent, &assignment.value)?,
                Some(operator) => {
                    let left = get_value(agent, target)?;
                    let right = evaluate(agent, &assignment.value)?;
                    apply_binary_operator(agent, operator, left, right)?
                }
            };
            put_value(agent, target, result)?;
            Ok(Evaluated::Value(result))
        }

        // ### [11.12 Conditional Operator](https://262.ecma-international.org/5.1/#sec-11.12)
        Expression::Conditional(conditional) => {
            let test = evaluate(agent, &conditional.test)?;
            let branch = if to_boolean(agent, test) {
                &conditional.consequent
            } else {
                &conditional.alternate
            };
            Ok(Evaluated::Value(evaluate(agent, branch)?))
        }

        // ### [11.14 Comma Operator](https://262.ecma-international.org/5.1/#sec-11.14)
        Expression::Sequence(sequence) => {
            let mut result = Value::Undefined;
            for expression in &sequence.expressions {
                result = evaluate(agent, expression)?;
            }
            Ok(Evaluated::Value(result))
        }
    }
}

fn evaluate_literal(agent: &mut Agent, literal: &Literal) -> JsResult<Value> {
    Ok(match &literal.value {
        LiteralValue::Null => Value::Null,
        LiteralValue::Boolean(b) => Value::Boolean(*b),
        LiteralValue::Number(n) => Value::Number(*n),
        LiteralValue::String(units) => Value::String(agent.intern_units(units)),
        // ### [7.8.5] A regex literal evaluates to a fresh RegExp object.
        LiteralValue::Regex { pattern, flags } => {
            let object = regexp_objects::create_regexp(agent, pattern, flags)?;
            Value::Object(object)
        }
    })
}

/// ### [11.1.4 Array Initialiser](https://262.ecma-international.org/5.1/#sec-11.1.4)
fn evaluate_array(agent: &mut Agent, array: &ArrayExpression) -> JsResult<Value> {
    let result = array_objects::create_array(agent);
    for (index, element) in array.elements.iter().enumerate() {
        let Some(element) = element else {
            continue;
        };
        let value = evaluate(agent, element)?;
        let key = ordinary::index_key(agent, index);
        ordinary::define_own_property(
            agent,
            result,
            key,
            PropertyDescriptor::data(value, true, true, true),
            false,
        )?;
    }
    // Elisions at the tail still count toward length.
    let length_key = agent.intern("length");
    let length = PropertyDescriptor {
        value: Some(Value::Number(array.elements.len() as f64)),
        ..Default::default()
    };
    ordinary::define_own_property(agent, result, length_key, length, false)?;
    Ok(Value::Object(result))
}

/// ### [11.1.5 Object Initialiser](https://262.ecma-international.org/5.1/#sec-11.1.5)
fn evaluate_object(agent: &mut Agent, object: &ObjectExpression) -> JsResult<Value> {
    let prototype = agent.realm.intrinsics.object_prototype;
    let result = agent.heap.create_object(
        crate::ecmascript::types::ObjectRecord::ordinary(Some(prototype)),
    );
    for property in &object.properties {
        let key = match &property.key {
            PropertyKey::Identifier(name) => agent.intern(name),
            PropertyKey::String(units) => agent.intern_units(units),
            PropertyKey::Number(n) => {
                let text =
                    crate::ecmascript::abstract_operations::type_conversion::number_to_string(*n);
                agent.intern(&text)
            }
        };
        let descriptor = match property.kind {
            PropertyKind::Init => {
                let value = evaluate(agent, &property.value)?;
                PropertyDescriptor::data(value, true, true, true)
            }
            PropertyKind::Get => {
                let getter = evaluate(agent, &property.value)?;
                PropertyDescriptor {
                    get: Some(getter),
                    enumerable: Some(true),
                    configurable: Some(true),
                    ..Default::default()
                }
            }
            PropertyKind::Set => {
                let setter = evaluate(agent, &property.value)?;
                PropertyDescriptor {
                    set: Some(setter),
                    enumerable: Some(true),
                    configurable: Some(true),
                    ..Default::default()
                }
            }
        };
        ordinary::define_own_property(agent, result, key, descriptor, false)?;
    }
    Ok(Value::Object(result))
}

/// ### [13 Function Definition](https://262.ecma-international.org/5.1/#sec-13)
///
/// A named function expression binds its own name in a dedicated
/// environment, immutably, invisible to the caller.
fn instantiate_function_expression(
    agent: &mut Agent,
    function: &std::rc::Rc<Function>,
) -> JsResult<Value> {
    let lexical = agent.running_execution_context().lexical_environment;
    let scope = match &function.name {
        None => lexical,
        Some(name) => {
            let func_env = new_declarative_environment(agent, Some(lexical));
            let name = agent.intern(&name.name);
            func_env.create_immutable_binding(agent, name);
            func_env
        }
    };
    let closure = ecmascript_function::create_function_object(agent, function.clone(), scope);
    if let Some(name) = &function.name {
        let name = agent.intern(&name.name);
        scope.initialize_immutable_binding(agent, name, Value::Object(closure));
    }
    Ok(Value::Object(closure))
}

fn evaluate_arguments(agent: &mut Agent, arguments: &[Expression]) -> JsResult<Vec<Value>> {
    let mut values = Vec::with_capacity(arguments.len());
    for argument in arguments {
        values.push(evaluate(agent, argument)?);
    }
    Ok(values)
}

/// ### [11.4 Unary Operators](https://262.ecma-international.org/5.1/#sec-11.4)
fn evaluate_unary(agent: &mut Agent, unary: &UnaryExpression) -> JsResult<Evaluated> {
    match unary.operator {
        // ### [11.4.1 The delete Operator](https://262.ecma-international.org/5.1/#sec-11.4.1)
        UnaryOperator::Delete => {
            let evaluated = evaluate_reference(agent, &unary.argument)?;
            let Evaluated::Reference(reference) = evaluated else {
                // 2. A non-Reference operand yields true.
                return Ok(Evaluated::Value(Value::Boolean(true)));
            };
            let result = match reference.base {
                // 3. Unresolvable: true in non-strict code (strict is a
                // parse-time error).
                ReferenceBase::Unresolvable => true,
                ReferenceBase::Value(base) => {
                    let o = to_object(agent, base)?;
                    ordinary::delete(agent, o, reference.referenced_name, reference.strict)?
                }
                ReferenceBase::Environment(env) => {
                    env.delete_binding(agent, reference.referenced_name)?
                }
            };
            Ok(Evaluated::Value(Value::Boolean(result)))
        }

        // ### [11.4.2 The void Operator](https://262.ecma-international.org/5.1/#sec-11.4.2)
        UnaryOperator::Void => {
            evaluate(agent, &unary.argument)?;
            Ok(Evaluated::Value(Value::Undefined))
        }

        // ### [11.4.3 The typeof Operator](https://262.ecma-international.org/5.1/#sec-11.4.3)
        UnaryOperator::TypeOf => {
            let evaluated = evaluate_reference(agent, &unary.argument)?;
            let value = match evaluated {
                Evaluated::Reference(reference) if reference.is_unresolvable() => {
                    // 2. typeof never throws on unresolvable references.
                    let text = agent.intern("undefined");
                    return Ok(Evaluated::Value(Value::String(text)));
                }
                other => get_value(agent, other)?,
            };
            let text = value.type_of(agent);
            let text = agent.intern(text);
            Ok(Evaluated::Value(Value::String(text)))
        }

        UnaryOperator::Plus => {
            let value = evaluate(agent, &unary.argument)?;
            let number = to_number(agent, value)?;
            Ok(Evaluated::Value(Value::Number(number)))
        }
        UnaryOperator::Minus => {
            let value = evaluate(agent, &unary.argument)?;
            let number = to_number(agent, value)?;
            Ok(Evaluated::Value(Value::Number(-number)))
        }
        UnaryOperator::BitNot => {
            let value = evaluate(agent, &unary.argument)?;
            let number = to_int32(agent, value)?;
            Ok(Evaluated::Value(Value::Number(!number as f64)))
        }
        UnaryOperator::Not => {
            let value = evaluate(agent, &unary.argument)?;
            Ok(Evaluated::Value(Value::Boolean(!to_boolean(agent, value))))
        }
    }
}

/// The binary operator table, shared with compound assignment.
pub(crate) fn apply_binary_operator(
    agent: &mut Agent,
    operator: BinaryOperator,
    left: Value,
    right: Value,
) -> JsResult<Value> {
    use BinaryOperator::*;
    Ok(match operator {
        // ### [11.6.1 The Addition operator](https://262.ecma-international.org/5.1/#sec-11.6.1)
        Add => {
            let lprim = crate::ecmascript::abstract_operations::type_conversion::to_primitive(
                agent, left, None,
            )?;
            let rprim = crate::ecmascript::abstract_operations::type_conversion::to_primitive(
                agent, right, None,
            )?;
            // 7. String concatenation if either side is a String.
            if matches!(lprim, Value::String(_)) || matches!(rprim, Value::String(_)) {
                let lstr = to_string(agent, lprim)?;
                let rstr = to_string(agent, rprim)?;
                let mut units = agent.string(lstr).to_vec();
                units.extend_from_slice(agent.string(rstr));
                Value::String(agent.intern_units(&units))
            } else {
                let lnum = to_number(agent, lprim)?;
                let rnum = to_number(agent, rprim)?;
                Value::Number(lnum + rnum)
            }
        }
        Sub => binary_number(agent, left, right, |a, b| a - b)?,
        Mul => binary_number(agent, left, right, |a, b| a * b)?,
        Div => binary_number(agent, left, right, |a, b| a / b)?,
        // ### [11.5.3] The % operator follows IEEE remainder, not Euclid.
        Mod => binary_number(agent, left, right, |a, b| a % b)?,

        // ### [11.7 Bitwise Shift Operators](https://262.ecma-international.org/5.1/#sec-11.7)
        ShiftLeft => {
            let lnum = to_int32(agent, left)?;
            let shift = to_uint32(agent, right)? & 0x1F;
            Value::Number((lnum << shift) as f64)
        }
        ShiftRight => {
            let lnum = to_int32(agent, left)?;
            let shift = to_uint32(agent, right)? & 0x1F;
            Value::Number((lnum >> shift) as f64)
        }
        ShiftRightUnsigned => {
            let lnum = to_uint32(agent, left)?;
            let shift = to_uint32(agent, right)? & 0x1F;
            Value::Number((lnum >> shift) as f64)
        }

        // ### [11.8 Relational Operators](https://262.ecma-international.org/5.1/#sec-11.8)
        LessThan => {
            let r = abstract_relational_comparison(agent, left, right, true)?;
            Value::Boolean(r.unwrap_or(false))
        }
        GreaterThan => {
            let r = abstract_relational_comparison(agent, right, left, false)?;
            Value::Boolean(r.unwrap_or(false))
        }
        LessThanOrEqual => {
            let r = abstract_relational_comparison(agent, right, left, false)?;
            Value::Boolean(!r.unwrap_or(true))
        }
        GreaterThanOrEqual => {
            let r = abstract_relational_comparison(agent, left, right, true)?;
            Value::Boolean(!r.unwrap_or(true))
        }

        // ### [11.8.6 The instanceof operator](https://262.ecma-international.org/5.1/#sec-11.8.6)
        InstanceOf => {
            let Value::Object(constructor) = right else {
                return Err(agent.throw_exception_with_static_message(
                    ExceptionType::TypeError,
                    "Right-hand side of 'instanceof' is not an object",
                ));
            };
            let result = ecmascript_function::ordinary_has_instance(agent, constructor, left)?;
            Value::Boolean(result)
        }

        // ### [11.8.7 The in operator](https://262.ecma-international.org/5.1/#sec-11.8.7)
        In => {
            let Value::Object(object) = right else {
                return Err(agent.throw_exception_with_static_message(
                    ExceptionType::TypeError,
                    "Cannot use 'in' operator on a non-object",
                ));
            };
            let name = to_string(agent, left)?;
            Value::Boolean(ordinary::has_property(agent, object, name))
        }

        // ### [11.9 Equality Operators](https://262.ecma-international.org/5.1/#sec-11.9)
        Equal => Value::Boolean(is_loosely_equal(agent, left, right)?),
        NotEqual => Value::Boolean(!is_loosely_equal(agent, left, right)?),
        StrictEqual => Value::Boolean(is_strictly_equal(agent, left, right)),
        StrictNotEqual => Value::Boolean(!is_strictly_equal(agent, left, right)),

        // ### [11.10 Binary Bitwise Operators](https://262.ecma-international.org/5.1/#sec-11.10)
        BitAnd => {
            let lnum = to_int32(agent, left)?;
            let rnum = to_int32(agent, right)?;
            Value::Number((lnum & rnum) as f64)
        }
        BitXor => {
            let lnum = to_int32(agent, left)?;
            let rnum = to_int32(agent, right)?;
            Value::Number((lnum ^ rnum) as f64)
        }
        BitOr => {
            let lnum = to_int32(agent, left)?;
            let rnum = to_int32(agent, right)?;
            Value::Number((lnum | rnum) as f64)
        }
    })
}

fn binary_number(
    agent: &mut Agent,
    left: Value,
    right: Value,
    op: fn(f64, f64) -> f64,
) -> JsResult<Value> {
    let lnum = to_number(agent, left)?;
    let rnum = to_number(agent, right)?;
    Ok(Value::Number(op(lnum, rnum)))
}

/// Used by `for-in` to write the loop variable.
pub(crate) fn resolve_for_in_target(
    agent: &mut Agent,
    target: &ForInTarget,
) -> JsResult<Evaluated> {
    match target {
        ForInTarget::Variable(declarator) => {
            let name = agent.intern(&declarator.id.name);
            let strict = agent.in_strict_mode();
            let lexical = agent.running_execution_context().lexical_environment;
            Ok(Evaluated::Reference(get_identifier_reference(
                agent,
                Some(lexical),
                name,
                strict,
            )))
        }
        ForInTarget::Expression(expression) => evaluate_reference(agent, expression),
    }
}

/// String interning shortcut for statement labels.
pub(crate) fn intern_label(agent: &mut Agent, label: &Option<Ident>) -> Option<JsString> {
    label.as_ref().map(|ident| agent.intern(&ident.name))
}
