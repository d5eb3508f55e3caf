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

use crate::types::ParameterDirection;
use crate::Spanned;

/// The five binary operators. All share one precedence level and associate
/// to the left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
}

#[derive(Debug, Clone)]
pub enum Expression {
    /// A 32-bit signed integer literal: `42i32`, `-3i32`
    Literal(i32),

    /// A reference to an in-scope local: `exitCode`
    VarRef(String),

    /// `target = value`: writes the computed value to the named local and
    /// produces no value itself.
    InitAssignment {
        target: String,
        value: Box<Spanned<Expression>>,
    },

    /// `lhs op rhs`
    BinaryOp {
        op: BinaryOperator,
        lhs: Box<Spanned<Expression>>,
        rhs: Box<Spanned<Expression>>,
    },

    /// An intra-program call: `callee(in name: expr, ...)`
    Call {
        callee: String,
        arguments: Vec<FuncArgument>,
    },
}

/// A single call argument, matched to the callee's parameters by name.
#[derive(Debug, Clone)]
pub struct FuncArgument {
    pub name: String,
    pub direction: ParameterDirection,
    pub value: Spanned<Expression>,
}
