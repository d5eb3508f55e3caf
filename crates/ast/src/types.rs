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

use std::fmt;

/// Handle to an interned type stored in a [`crate::Program`].
///
/// Because types are interned, handle equality is type equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeId(pub(crate) u32);

/// How a parameter's value flows between caller and callee.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterDirection {
    In,
    Out,
    Inout,
}

impl fmt::Display for ParameterDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterDirection::In => write!(f, "in"),
            ParameterDirection::Out => write!(f, "out"),
            ParameterDirection::Inout => write!(f, "inout"),
        }
    }
}

/// The closed set of built-in types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltIn {
    I32,
}

impl fmt::Display for BuiltIn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuiltIn::I32 => write!(f, "i32"),
        }
    }
}

/// A single parameter of a function type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuncParameter {
    pub name: String,
    pub direction: ParameterDirection,
    pub ty: TypeId,
}

/// A function type: an ordered parameter list. Results are expressed as
/// `out` parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FuncType {
    pub parameters: Vec<FuncParameter>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeKind {
    BuiltIn(BuiltIn),
    Func(FuncType),
}

/// A type together with its source spelling.
///
/// `rep` is a diagnostic aid only: equality compares the kind alone, so two
/// types spelled with different whitespace still intern to one entry.
#[derive(Debug, Clone)]
pub struct Type {
    pub rep: String,
    pub kind: TypeKind,
}

impl PartialEq for Type {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

impl Eq for Type {}

impl Type {
    pub fn builtin(builtin: BuiltIn) -> Self {
        Self {
            rep: builtin.to_string(),
            kind: TypeKind::BuiltIn(builtin),
        }
    }

    pub fn func(rep: impl Into<String>, parameters: Vec<FuncParameter>) -> Self {
        Self {
            rep: rep.into(),
            kind: TypeKind::Func(FuncType { parameters }),
        }
    }

    pub fn as_func(&self) -> Option<&FuncType> {
        match &self.kind {
            TypeKind::Func(func_type) => Some(func_type),
            TypeKind::BuiltIn(_) => None,
        }
    }

    pub fn is_builtin(&self, builtin: BuiltIn) -> bool {
        matches!(&self.kind, TypeKind::BuiltIn(b) if *b == builtin)
    }
}
