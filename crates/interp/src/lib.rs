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

//! Tree-walk interpreter.
//!
//! Evaluates a parsed program directly: the entry point runs with a synthetic
//! zero-initialized `out` slot for `exitCode`, and the slot's final value is
//! the program's exit code.

mod interpreter;


use std::fmt;

use ast::Program;
use logos::Span;

use interpreter::{Interpreter, Value};

/// A semantic failure during evaluation, with the span of the offending
/// expression where one exists.
#[derive(Debug, Clone)]
pub struct RuntimeError {
    pub message: String,
    pub span: Span,
}

impl RuntimeError {
    pub(crate) fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
        }
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for RuntimeError {}

/// Evaluate the program's entry point and return its exit code.
pub fn execute(program: &Program) -> Result<i32, RuntimeError> {
    let main_id = program
        .entry_point()
        .ok_or_else(|| RuntimeError::new("missing main function", 0..0))?;
    let main = program.func(main_id);

    let interpreter = Interpreter::new(program);
    match interpreter.call_function(main_id, &[], &main.body.span)? {
        Value::I32(code) => Ok(code),
        Value::Void => Err(RuntimeError::new(
            "main produced no exit code",
            main.body.span.clone(),
        )),
    }
}
