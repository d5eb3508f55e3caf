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

use crate::types::{BuiltIn, FuncParameter, ParameterDirection, Type};
use crate::Program;

#[test]
fn test_func_parameter_equality() {
    let mut program = Program::new();
    let i32_id = program.intern_type(Type::builtin(BuiltIn::I32));

    let param1 = FuncParameter {
        name: "name".to_string(),
        direction: ParameterDirection::In,
        ty: i32_id,
    };
    let param2 = FuncParameter {
        name: "name".to_string(),
        direction: ParameterDirection::In,
        ty: i32_id,
    };
    let param3 = FuncParameter {
        name: "other name".to_string(),
        direction: ParameterDirection::In,
        ty: i32_id,
    };

    assert_eq!(param1, param2);
    assert_ne!(param1, param3);
}

#[test]
fn test_type_equality_ignores_rep() {
    let mut program = Program::new();
    let i32_id = program.intern_type(Type::builtin(BuiltIn::I32));

    let param = FuncParameter {
        name: "exitCode".to_string(),
        direction: ParameterDirection::Out,
        ty: i32_id,
    };

    let spelled_one_way = Type::func("fun(out exitCode: i32)", vec![param.clone()]);
    let spelled_another = Type::func("fun( out exitCode : i32 )", vec![param]);
    assert_eq!(spelled_one_way, spelled_another);

    let builtin = Type::builtin(BuiltIn::I32);
    assert_ne!(spelled_one_way, builtin);
}

#[test]
fn test_interning_reuses_equal_types() {
    let mut program = Program::new();
    let first = program.intern_type(Type::builtin(BuiltIn::I32));
    let second = program.intern_type(Type::builtin(BuiltIn::I32));
    assert_eq!(first, second);
    assert_eq!(program.type_count(), 1);
}

#[test]
fn test_interning_appends_distinct_types() {
    let mut program = Program::new();
    let i32_id = program.intern_type(Type::builtin(BuiltIn::I32));

    let out_param = FuncParameter {
        name: "exitCode".to_string(),
        direction: ParameterDirection::Out,
        ty: i32_id,
    };
    let in_param = FuncParameter {
        name: "exitCode".to_string(),
        direction: ParameterDirection::In,
        ty: i32_id,
    };

    let out_ty = program.intern_type(Type::func("fun(out exitCode: i32)", vec![out_param.clone()]));
    let in_ty = program.intern_type(Type::func("fun(in exitCode: i32)", vec![in_param]));
    let out_again = program.intern_type(Type::func("fun(out exitCode: i32)", vec![out_param]));

    assert_ne!(out_ty, in_ty);
    assert_eq!(out_ty, out_again);
    assert_eq!(program.type_count(), 3);
}

#[test]
fn test_nested_func_type_interning() {
    let mut program = Program::new();
    let i32_id = program.intern_type(Type::builtin(BuiltIn::I32));

    let inner = program.intern_type(Type::func("fun()", Vec::new()));
    let param = FuncParameter {
        name: "callback".to_string(),
        direction: ParameterDirection::In,
        ty: inner,
    };
    let outer = program.intern_type(Type::func("fun(in callback: fun())", vec![param.clone()]));
    let outer_again = program.intern_type(Type::func("fun(in callback: fun())", vec![param]));

    assert_eq!(outer, outer_again);
    assert_ne!(outer, inner);
    assert_ne!(outer, i32_id);
    assert_eq!(program.type_count(), 3);
}
