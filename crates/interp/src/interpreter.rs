/*
 * Copyright (c) 2026. Mikhail Kulik.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *     http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 */

use std::collections::HashMap;

use ast::expr::{BinaryOperator, Expression};
use ast::types::{BuiltIn, ParameterDirection};
use ast::{FuncId, Program, Spanned};
use logos::Span;

use crate::RuntimeError;

/// The result of evaluating an expression. Statement-shaped expressions
/// (assignments, calls without an `out` parameter) produce `Void`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Value {
    I32(i32),
    Void,
}

/// One activation per function call: the named locals of that call.
#[derive(Debug, Default)]
struct Frame {
    locals: HashMap<String, i32>,
}

pub(crate) struct Interpreter<'p> {
    program: &'p Program,
}

impl<'p> Interpreter<'p> {
    pub fn new(program: &'p Program) -> Self {
        Self { program }
    }

    /// Run one function call: populate a fresh frame from the parameters,
    /// evaluate the body, then read the `out` slot back out.
    ///
    /// `in` parameters bind to caller argument values by name, `out`
    /// parameters start at zero. A callee with one `out` parameter yields
    /// that slot's final value; with none it yields no value.
    pub fn call_function(
        &self,
        id: FuncId,
        in_args: &[(String, i32)],
        call_span: &Span,
    ) -> Result<Value, RuntimeError> {
        let func = self.program.func(id);
        let func_type = self.program.ty(func.ty);
        let Some(signature) = func_type.as_func() else {
            return Err(RuntimeError::new(
                format!("{} is not callable: {}", func.name, func_type.rep),
                call_span.clone(),
            ));
        };

        let mut frame = Frame::default();
        let mut out_params = Vec::new();
        for param in &signature.parameters {
            if !self.program.ty(param.ty).is_builtin(BuiltIn::I32) {
                return Err(RuntimeError::new(
                    format!(
                        "only built in types supported as parameter types: {}",
                        func_type.rep
                    ),
                    call_span.clone(),
                ));
            }
            match param.direction {
                ParameterDirection::In => {
                    let value = in_args
                        .iter()
                        .find(|(name, _)| name == &param.name)
                        .map(|(_, value)| *value)
                        .ok_or_else(|| {
                            RuntimeError::new(
                                format!("missing argument for parameter: {}", param.name),
                                call_span.clone(),
                            )
                        })?;
                    frame.locals.insert(param.name.clone(), value);
                }
                ParameterDirection::Out => {
                    frame.locals.insert(param.name.clone(), 0);
                    out_params.push(param.name.as_str());
                }
                ParameterDirection::Inout => {
                    return Err(RuntimeError::new(
                        format!("inout parameters not implemented: {}", func_type.rep),
                        call_span.clone(),
                    ));
                }
            }
        }
        if out_params.len() > 1 {
            return Err(RuntimeError::new(
                format!("multiple out parameters not supported: {}", func_type.rep),
                call_span.clone(),
            ));
        }

        // The body is a statement: it must not leave a value behind.
        let result = self.eval(&mut frame, &func.body)?;
        if result != Value::Void {
            return Err(RuntimeError::new(
                format!("function body of {} should not produce a value", func.name),
                func.body.span.clone(),
            ));
        }

        match out_params.first() {
            Some(name) => Ok(Value::I32(frame.locals[*name])),
            None => Ok(Value::Void),
        }
    }

    fn eval(&self, frame: &mut Frame, expr: &Spanned<Expression>) -> Result<Value, RuntimeError> {
        match &expr.node {
            Expression::Literal(value) => Ok(Value::I32(*value)),

            Expression::VarRef(name) => frame
                .locals
                .get(name)
                .copied()
                .map(Value::I32)
                .ok_or_else(|| {
                    RuntimeError::new(format!("undeclared variable: {}", name), expr.span.clone())
                }),

            Expression::InitAssignment { target, value } => {
                let computed = self.eval_i32(frame, value)?;
                match frame.locals.get_mut(target) {
                    Some(slot) => {
                        *slot = computed;
                        Ok(Value::Void)
                    }
                    None => Err(RuntimeError::new(
                        format!("undeclared variable: {}", target),
                        expr.span.clone(),
                    )),
                }
            }

            Expression::BinaryOp { op, lhs, rhs } => {
                let left = self.eval_i32(frame, lhs)?;
                let right = self.eval_i32(frame, rhs)?;
                self.apply_operator(*op, left, right, &expr.span)
            }

            Expression::Call { callee, arguments } => {
                let id = self.program.find_function(callee).ok_or_else(|| {
                    RuntimeError::new(format!("unknown function: {}", callee), expr.span.clone())
                })?;

                let mut in_args = Vec::new();
                for argument in arguments {
                    match argument.direction {
                        ParameterDirection::In => {
                            let value = self.eval_i32(frame, &argument.value)?;
                            in_args.push((argument.name.clone(), value));
                        }
                        // The callee's single out slot becomes the call's
                        // value; the argument's own identifier is unused.
                        ParameterDirection::Out => {}
                        ParameterDirection::Inout => {
                            return Err(RuntimeError::new(
                                "inout arguments not implemented",
                                argument.value.span.clone(),
                            ));
                        }
                    }
                }
                self.call_function(id, &in_args, &expr.span)
            }
        }
    }

    /// Evaluate an expression that must produce an `i32`.
    fn eval_i32(&self, frame: &mut Frame, expr: &Spanned<Expression>) -> Result<i32, RuntimeError> {
        match self.eval(frame, expr)? {
            Value::I32(value) => Ok(value),
            Value::Void => Err(RuntimeError::new(
                "expression produced no value",
                expr.span.clone(),
            )),
        }
    }

    /// Two's-complement i32 arithmetic: add/subtract/multiply wrap, divide
    /// and modulo trap on zero divisors and on `i32::MIN / -1`.
    fn apply_operator(
        &self,
        op: BinaryOperator,
        left: i32,
        right: i32,
        span: &Span,
    ) -> Result<Value, RuntimeError> {
        let value = match op {
            BinaryOperator::Add => left.wrapping_add(right),
            BinaryOperator::Subtract => left.wrapping_sub(right),
            BinaryOperator::Multiply => left.wrapping_mul(right),
            BinaryOperator::Divide | BinaryOperator::Modulo => {
                if right == 0 {
                    return Err(RuntimeError::new("division by zero", span.clone()));
                }
                let result = match op {
                    BinaryOperator::Divide => left.checked_div(right),
                    _ => left.checked_rem(right),
                };
                result.ok_or_else(|| {
                    RuntimeError::new("integer overflow in division", span.clone())
                })?
            }
        };
        Ok(Value::I32(value))
    }
}
