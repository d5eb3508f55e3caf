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

use ast::expr::{BinaryOperator, Expression};
use ast::Spanned;

use super::Emitter;
use crate::leb128::write_sleb128;
use crate::EmitError;

const OPCODE_I32_CONST: u8 = 0x41;
const OPCODE_I32_ADD: u8 = 0x6A;
const OPCODE_I32_SUB: u8 = 0x6B;
const OPCODE_I32_MUL: u8 = 0x6C;
const OPCODE_I32_DIV_S: u8 = 0x6D;
const OPCODE_I32_REM_S: u8 = 0x6F;

impl Emitter<'_> {
    /// Postorder lowering to stack-machine bytecode; the expression's value
    /// is left on the operand stack.
    ///
    /// The single assignment that makes up a function body compiles to its
    /// right-hand side alone: the value stays on the stack and becomes the
    /// function result, which is where the `out` parameter lives in the
    /// WebAssembly calling convention.
    pub(super) fn emit_expr(
        &self,
        buf: &mut Vec<u8>,
        expr: &Spanned<Expression>,
    ) -> Result<(), EmitError> {
        match &expr.node {
            Expression::Literal(value) => {
                buf.push(OPCODE_I32_CONST);
                write_sleb128(buf, *value);
                Ok(())
            }

            Expression::InitAssignment { value, .. } => self.emit_expr(buf, value),

            Expression::BinaryOp { op, lhs, rhs } => {
                self.emit_expr(buf, lhs)?;
                self.emit_expr(buf, rhs)?;
                buf.push(match op {
                    BinaryOperator::Add => OPCODE_I32_ADD,
                    BinaryOperator::Subtract => OPCODE_I32_SUB,
                    BinaryOperator::Multiply => OPCODE_I32_MUL,
                    // signed variants only; nothing produces unsigned values
                    BinaryOperator::Divide => OPCODE_I32_DIV_S,
                    BinaryOperator::Modulo => OPCODE_I32_REM_S,
                });
                Ok(())
            }

            Expression::VarRef(_) => Err(EmitError::UnsupportedExpression {
                what: "variable references",
                span: expr.span.clone(),
            }),

            Expression::Call { .. } => Err(EmitError::UnsupportedExpression {
                what: "function calls",
                span: expr.span.clone(),
            }),
        }
    }
}
