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

//! WebAssembly 1.0 module emitter.
//!
//! Writes a standalone binary module directly, byte by byte: a `_start`
//! export that calls the user's `main` and passes the result to the
//! imported WASI `proc_exit`. The module layout is fixed: type, import,
//! function, memory, export and code sections, in that order.

pub mod leb128;

mod emitter;


use std::fmt;
use std::io;

use ast::Program;
use logos::Span;

/// A construct the emitter cannot lower, or a sink/size failure.
///
/// Type-level rejections are detected before the first byte is written;
/// expression-level rejections can leave a partial module behind in the
/// sink.
#[derive(Debug)]
pub enum EmitError {
    /// The program has no entry point to wire `_start` to.
    MissingEntryPoint,
    /// A function whose type is not a function type.
    NotAFunctionType { name: String },
    /// `inout` has no WebAssembly calling convention yet.
    InoutParameter { rep: String },
    /// Parameters must be built-in types.
    UnsupportedParamType { rep: String },
    /// At most one `out` parameter can map to a WebAssembly result.
    MultipleOutParams { rep: String },
    /// An expression form with no lowering (variable references, calls).
    UnsupportedExpression { what: &'static str, span: Span },
    /// A section payload longer than a section header can describe.
    SectionTooLarge { len: usize },
    /// The sink stopped accepting bytes.
    Io(io::Error),
}

impl fmt::Display for EmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmitError::MissingEntryPoint => write!(f, "missing main function"),
            EmitError::NotAFunctionType { name } => {
                write!(f, "{} does not have a function type", name)
            }
            EmitError::InoutParameter { rep } => {
                write!(f, "inout parameter direction not supported yet: {}", rep)
            }
            EmitError::UnsupportedParamType { rep } => {
                write!(f, "only built-in parameter types are supported: {}", rep)
            }
            EmitError::MultipleOutParams { rep } => {
                write!(f, "multiple out parameters not supported yet: {}", rep)
            }
            EmitError::UnsupportedExpression { what, span } => {
                write!(f, "{} cannot be compiled yet (at bytes {}..{})", what, span.start, span.end)
            }
            EmitError::SectionTooLarge { len } => {
                write!(f, "section of {} bytes exceeds the binary format limit", len)
            }
            EmitError::Io(err) => write!(f, "failed to write module: {}", err),
        }
    }
}

impl std::error::Error for EmitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EmitError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for EmitError {
    fn from(err: io::Error) -> Self {
        EmitError::Io(err)
    }
}

/// Compile `program` into a complete WebAssembly module written to `out`.
///
/// The byte stream is deterministic: equal programs produce identical
/// modules.
pub fn compile<W: io::Write>(program: &Program, out: &mut W) -> Result<(), EmitError> {
    emitter::Emitter::new(program)?.write_module(out)
}
