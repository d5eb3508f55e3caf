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

mod expr;

use std::collections::HashMap;
use std::io::Write;

use ast::types::{BuiltIn, FuncType, ParameterDirection, TypeId, TypeKind};
use ast::{FuncId, Program};

use crate::leb128::write_uleb128;
use crate::EmitError;

/// The single value type this backend knows.
const VALTYPE_I32: u8 = 0x7F;

/// Imports precede defined functions in the index space; `proc_exit` is the
/// only import, so user functions start at index 1.
const NUM_IMPORTS: u32 = 1;
const PROC_EXIT_FUNC_INDEX: u32 = 0;

const IMPORT_MODULE: &str = "wasi_snapshot_preview1";
const IMPORT_NAME: &str = "proc_exit";

const SECTION_TYPE: u8 = 1;
const SECTION_IMPORT: u8 = 2;
const SECTION_FUNCTION: u8 = 3;
const SECTION_MEMORY: u8 = 5;
const SECTION_EXPORT: u8 = 7;
const SECTION_CODE: u8 = 10;

const IMPORT_KIND_FUNC: u8 = 0x00;
const EXPORT_KIND_FUNC: u8 = 0x00;
const EXPORT_KIND_MEMORY: u8 = 0x02;

const OPCODE_CALL: u8 = 0x10;
const OPCODE_END: u8 = 0x0B;

/// A function type lowered to WebAssembly parameter and result lists.
struct WasmFuncType {
    params: Vec<u8>,
    results: Vec<u8>,
}

/// Assembles the module: function types are translated up front (so
/// type-level rejections happen before the first byte is written), then the
/// sections are framed and written in ascending id order.
pub(crate) struct Emitter<'p> {
    program: &'p Program,
    /// One entry per function type, in declaration order, plus the two
    /// injected types for `_start` and `proc_exit` at the end.
    func_types: Vec<WasmFuncType>,
    type_indices: HashMap<TypeId, u32>,
    func_indices: HashMap<FuncId, u32>,
    start_type_index: u32,
    proc_exit_type_index: u32,
    main_func_index: u32,
    start_func_index: u32,
}

impl<'p> Emitter<'p> {
    pub fn new(program: &'p Program) -> Result<Self, EmitError> {
        let mut func_types = Vec::new();
        let mut type_indices = HashMap::new();
        for (id, ty) in program.types() {
            if let TypeKind::Func(func_type) = &ty.kind {
                type_indices.insert(id, vector_len(func_types.len())?);
                func_types.push(translate_func_type(program, &ty.rep, func_type)?);
            }
        }

        // Types for the injected `_start` and `proc_exit` functions. They
        // are appended without interning; a duplicate entry is harmless.
        let start_type_index = vector_len(func_types.len())?;
        func_types.push(WasmFuncType {
            params: Vec::new(),
            results: Vec::new(),
        });
        let proc_exit_type_index = vector_len(func_types.len())?;
        func_types.push(WasmFuncType {
            params: vec![VALTYPE_I32],
            results: Vec::new(),
        });

        let mut func_indices = HashMap::new();
        let mut next_index = NUM_IMPORTS;
        for (id, _) in program.functions() {
            func_indices.insert(id, next_index);
            next_index += 1;
        }
        let start_func_index = next_index;

        let entry_point = program.entry_point().ok_or(EmitError::MissingEntryPoint)?;
        let main_func_index = func_indices[&entry_point];

        Ok(Self {
            program,
            func_types,
            type_indices,
            func_indices,
            start_type_index,
            proc_exit_type_index,
            main_func_index,
            start_func_index,
        })
    }

    pub fn write_module<W: Write>(&self, out: &mut W) -> Result<(), EmitError> {
        out.write_all(&[0x00, 0x61, 0x73, 0x6D])?; // magic
        out.write_all(&[0x01, 0x00, 0x00, 0x00])?; // version
        self.write_type_section(out)?;
        self.write_import_section(out)?;
        self.write_function_section(out)?;
        self.write_memory_section(out)?;
        self.write_export_section(out)?;
        self.write_code_section(out)?;
        Ok(())
    }

    /// Section 1: one `0x60` entry per function type.
    fn write_type_section<W: Write>(&self, out: &mut W) -> Result<(), EmitError> {
        let mut payload = Vec::new();
        write_uleb128(&mut payload, vector_len(self.func_types.len())?);
        for func_type in &self.func_types {
            payload.push(0x60);
            write_uleb128(&mut payload, vector_len(func_type.params.len())?);
            payload.extend_from_slice(&func_type.params);
            write_uleb128(&mut payload, vector_len(func_type.results.len())?);
            payload.extend_from_slice(&func_type.results);
        }
        write_section(out, SECTION_TYPE, &payload)
    }

    /// Section 2: the synthesized `wasi_snapshot_preview1.proc_exit` import.
    fn write_import_section<W: Write>(&self, out: &mut W) -> Result<(), EmitError> {
        let mut payload = Vec::new();
        write_uleb128(&mut payload, NUM_IMPORTS);
        write_name(&mut payload, IMPORT_MODULE)?;
        write_name(&mut payload, IMPORT_NAME)?;
        payload.push(IMPORT_KIND_FUNC);
        write_uleb128(&mut payload, self.proc_exit_type_index);
        write_section(out, SECTION_IMPORT, &payload)
    }

    /// Section 3: type indices for the user functions plus `_start`.
    fn write_function_section<W: Write>(&self, out: &mut W) -> Result<(), EmitError> {
        let mut payload = Vec::new();
        write_uleb128(&mut payload, vector_len(self.program.function_count() + 1)?);
        for (_, func) in self.program.functions() {
            let type_index =
                self.type_indices
                    .get(&func.ty)
                    .copied()
                    .ok_or_else(|| EmitError::NotAFunctionType {
                        name: func.name.clone(),
                    })?;
            write_uleb128(&mut payload, type_index);
        }
        write_uleb128(&mut payload, self.start_type_index);
        write_section(out, SECTION_FUNCTION, &payload)
    }

    /// Section 5: one memory, zero initial pages, 1024 pages max.
    fn write_memory_section<W: Write>(&self, out: &mut W) -> Result<(), EmitError> {
        let mut payload = Vec::new();
        write_uleb128(&mut payload, 1);
        payload.push(0x01); // limits carry a maximum
        write_uleb128(&mut payload, 0);
        write_uleb128(&mut payload, 1024);
        write_section(out, SECTION_MEMORY, &payload)
    }

    /// Section 7: the `_start` function and the memory.
    fn write_export_section<W: Write>(&self, out: &mut W) -> Result<(), EmitError> {
        let mut payload = Vec::new();
        write_uleb128(&mut payload, 2);
        write_name(&mut payload, "_start")?;
        payload.push(EXPORT_KIND_FUNC);
        write_uleb128(&mut payload, self.start_func_index);
        write_name(&mut payload, "memory")?;
        payload.push(EXPORT_KIND_MEMORY);
        write_uleb128(&mut payload, 0);
        write_section(out, SECTION_EXPORT, &payload)
    }

    /// Section 10: user function bodies in declaration order, then the
    /// synthesized `_start` body.
    fn write_code_section<W: Write>(&self, out: &mut W) -> Result<(), EmitError> {
        let mut payload = Vec::new();
        write_uleb128(&mut payload, vector_len(self.program.function_count() + 1)?);
        for (_, func) in self.program.functions() {
            let mut body = Vec::new();
            write_uleb128(&mut body, 0); // no extra locals
            self.emit_expr(&mut body, &func.body)?;
            body.push(OPCODE_END);
            write_uleb128(&mut payload, vector_len(body.len())?);
            payload.extend_from_slice(&body);
        }

        // _start: call main, hand the result to proc_exit
        let mut body = Vec::new();
        write_uleb128(&mut body, 0);
        body.push(OPCODE_CALL);
        write_uleb128(&mut body, self.main_func_index);
        body.push(OPCODE_CALL);
        write_uleb128(&mut body, PROC_EXIT_FUNC_INDEX);
        body.push(OPCODE_END);
        write_uleb128(&mut payload, vector_len(body.len())?);
        payload.extend_from_slice(&body);

        write_section(out, SECTION_CODE, &payload)
    }
}

/// Lower a function type: `in` parameters become parameters, the `out`
/// parameter becomes the result.
fn translate_func_type(
    program: &Program,
    rep: &str,
    func_type: &FuncType,
) -> Result<WasmFuncType, EmitError> {
    let mut params = Vec::new();
    let mut results = Vec::new();
    for parameter in &func_type.parameters {
        if parameter.direction == ParameterDirection::Inout {
            return Err(EmitError::InoutParameter {
                rep: rep.to_string(),
            });
        }
        let param_type = program.ty(parameter.ty);
        match &param_type.kind {
            TypeKind::BuiltIn(BuiltIn::I32) => {
                let list = if parameter.direction == ParameterDirection::Out {
                    &mut results
                } else {
                    &mut params
                };
                list.push(VALTYPE_I32);
            }
            TypeKind::Func(_) => {
                return Err(EmitError::UnsupportedParamType {
                    rep: param_type.rep.clone(),
                })
            }
        }
    }
    if results.len() > 1 {
        return Err(EmitError::MultipleOutParams {
            rep: rep.to_string(),
        });
    }
    Ok(WasmFuncType { params, results })
}

/// Frame a section: id byte, ULEB128 byte length, payload.
fn write_section<W: Write>(out: &mut W, id: u8, payload: &[u8]) -> Result<(), EmitError> {
    let len = vector_len(payload.len())?;
    out.write_all(&[id])?;
    let mut header = Vec::new();
    write_uleb128(&mut header, len);
    out.write_all(&header)?;
    out.write_all(payload)?;
    Ok(())
}

/// A length-prefixed UTF-8 name.
fn write_name(out: &mut Vec<u8>, name: &str) -> Result<(), EmitError> {
    write_uleb128(out, vector_len(name.len())?);
    out.extend_from_slice(name.as_bytes());
    Ok(())
}

/// Vector counts and byte lengths must fit the format's u32 fields.
fn vector_len(len: usize) -> Result<u32, EmitError> {
    u32::try_from(len).map_err(|_| EmitError::SectionTooLarge { len })
}
