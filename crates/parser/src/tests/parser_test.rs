use ast::expr::{BinaryOperator, Expression};
use ast::types::ParameterDirection;
use ast::{Program, Spanned};

use crate::{parse, ParseError};

fn parse_ok(source: &str) -> Program {
    parse(source, "test name").expect("parse failed")
}

fn parse_err(source: &str) -> ParseError {
    match parse(source, "test name") {
        Ok(_) => panic!("expected parse to fail"),
        Err(err) => err,
    }
}

/// The right-hand side of the entry point's single assignment.
fn main_value(program: &Program) -> &Spanned<Expression> {
    let main = program.entry_point().expect("entry point should be set");
    match &program.func(main).body.node {
        Expression::InitAssignment { value, .. } => value,
        other => panic!("expected InitAssignment, got {:?}", other),
    }
}

#[test]
fn test_minimal_program() {
    let program = parse_ok("def main = fun(out exitCode: i32) { exitCode = 0i32; };");

    assert_eq!(program.type_count(), 2);
    assert_eq!(program.function_count(), 1);
    let main = program.entry_point().expect("entry point should be set");
    assert_eq!(program.func(main).name, "main");
    assert_eq!(program.func(main).source_file, "test name");
}

#[test]
fn test_types_are_interned() {
    let program = parse_ok(
        "def other = fun(out exitCode: i32) { exitCode = 1i32; };\n\
         def main = fun(out exitCode: i32) { exitCode = 0i32; };",
    );

    // i32 plus one shared function type
    assert_eq!(program.type_count(), 2);
    let ids: Vec<_> = program.functions().map(|(_, f)| f.ty).collect();
    assert_eq!(ids[0], ids[1]);
}

#[test]
fn test_parameter_names_are_part_of_the_type() {
    let program = parse_ok(
        "def other = fun(out result: i32) { result = 1i32; };\n\
         def main = fun(out exitCode: i32) { exitCode = 0i32; };",
    );

    assert_eq!(program.type_count(), 3);
    let ids: Vec<_> = program.functions().map(|(_, f)| f.ty).collect();
    assert_ne!(ids[0], ids[1]);
}

#[test]
fn test_operators_are_left_associative() {
    let program = parse_ok("def main = fun(out exitCode: i32) { exitCode = 10i32 - 3i32 - 2i32; };");

    match &main_value(&program).node {
        Expression::BinaryOp { op, lhs, rhs } => {
            assert_eq!(*op, BinaryOperator::Subtract);
            assert!(matches!(&rhs.node, Expression::Literal(2)));
            match &lhs.node {
                Expression::BinaryOp { op, .. } => assert_eq!(*op, BinaryOperator::Subtract),
                other => panic!("expected BinaryOp, got {:?}", other),
            }
        }
        other => panic!("expected BinaryOp, got {:?}", other),
    }
}

#[test]
fn test_all_operators_share_one_precedence() {
    // 2 + 3 * 4 parses as (2 + 3) * 4
    let program = parse_ok("def main = fun(out exitCode: i32) { exitCode = 2i32 + 3i32 * 4i32; };");

    match &main_value(&program).node {
        Expression::BinaryOp { op, lhs, .. } => {
            assert_eq!(*op, BinaryOperator::Multiply);
            match &lhs.node {
                Expression::BinaryOp { op, .. } => assert_eq!(*op, BinaryOperator::Add),
                other => panic!("expected BinaryOp, got {:?}", other),
            }
        }
        other => panic!("expected BinaryOp, got {:?}", other),
    }
}

#[test]
fn test_parenthesized_terms() {
    let program =
        parse_ok("def main = fun(out exitCode: i32) { exitCode = 2i32 * (3i32 + 4i32); };");

    match &main_value(&program).node {
        Expression::BinaryOp { op, rhs, .. } => {
            assert_eq!(*op, BinaryOperator::Multiply);
            match &rhs.node {
                Expression::BinaryOp { op, .. } => assert_eq!(*op, BinaryOperator::Add),
                other => panic!("expected BinaryOp, got {:?}", other),
            }
        }
        other => panic!("expected BinaryOp, got {:?}", other),
    }
}

#[test]
fn test_negative_literals() {
    let program = parse_ok("def main = fun(out exitCode: i32) { exitCode = -3i32; };");
    assert!(matches!(
        &main_value(&program).node,
        Expression::Literal(-3)
    ));

    let program = parse_ok("def main = fun(out exitCode: i32) { exitCode = -2147483648i32; };");
    assert!(matches!(
        &main_value(&program).node,
        Expression::Literal(i32::MIN)
    ));
}

#[test]
fn test_literal_overflow_is_a_parse_error() {
    let err = parse_err("def main = fun(out exitCode: i32) { exitCode = 2147483648i32; };");
    assert!(err.message.contains("out of range"), "{}", err.message);

    let err = parse_err("def main = fun(out exitCode: i32) { exitCode = -2147483649i32; };");
    assert!(err.message.contains("out of range"), "{}", err.message);
}

#[test]
fn test_literal_requires_suffix() {
    let err = parse_err("def main = fun(out exitCode: i32) { exitCode = 0; };");
    assert!(err.message.contains("i32 suffix"), "{}", err.message);
}

#[test]
fn test_call_without_arguments() {
    let program = parse_ok(
        "def five = fun(out value: i32) { value = 5i32; };\n\
         def main = fun(out exitCode: i32) { exitCode = five(); };",
    );

    match &main_value(&program).node {
        Expression::Call { callee, arguments } => {
            assert_eq!(callee, "five");
            assert!(arguments.is_empty());
        }
        other => panic!("expected Call, got {:?}", other),
    }
}

#[test]
fn test_call_with_named_arguments() {
    let program = parse_ok(
        "def double = fun(in x: i32, out result: i32) { result = x + x; };\n\
         def main = fun(out exitCode: i32) { exitCode = double(in x: 21i32); };",
    );

    match &main_value(&program).node {
        Expression::Call { callee, arguments } => {
            assert_eq!(callee, "double");
            assert_eq!(arguments.len(), 1);
            assert_eq!(arguments[0].name, "x");
            assert_eq!(arguments[0].direction, ParameterDirection::In);
            assert!(matches!(&arguments[0].value.node, Expression::Literal(21)));
        }
        other => panic!("expected Call, got {:?}", other),
    }
}

#[test]
fn test_inout_direction_parses() {
    let program = parse_ok(
        "def tweak = fun(inout v: i32) { v = 0i32; };\n\
         def main = fun(out exitCode: i32) { exitCode = 0i32; };",
    );

    let tweak = program.find_function("tweak").expect("tweak should exist");
    let func_type = program
        .ty(program.func(tweak).ty)
        .as_func()
        .expect("function type");
    assert_eq!(func_type.parameters[0].direction, ParameterDirection::Inout);
}

#[test]
fn test_program_without_main_fails() {
    let err = parse_err("def foo = fun(out exitCode: i32) { exitCode = 0i32; };");
    assert!(err.message.contains("main"), "{}", err.message);
}

#[test]
fn test_duplicate_main_fails_at_second_definition() {
    let err = parse_err(
        "def main = fun(out exitCode: i32) { exitCode = 0i32; };\n\
         def main = fun(out exitCode: i32) { exitCode = 1i32; };",
    );
    assert!(err.message.contains("multiple main"), "{}", err.message);
    assert_eq!(err.line, 2);
}

#[test]
fn test_wrong_main_type_fails() {
    let err = parse_err("def main = fun(in exitCode: i32) { exitCode = 0i32; };");
    assert!(err.message.contains("wrong type for main"), "{}", err.message);

    let err = parse_err("def main = fun(out code: i32) { code = 0i32; };");
    assert!(err.message.contains("wrong type for main"), "{}", err.message);

    let err = parse_err("def main = fun() { exitCode = 0i32; };");
    assert!(err.message.contains("wrong type for main"), "{}", err.message);
}

#[test]
fn test_empty_body_fails() {
    let err = parse_err("def main = fun(out exitCode: i32) { };");
    assert!(err.message.contains("empty function body"), "{}", err.message);
}

#[test]
fn test_multiple_statements_fail() {
    let err = parse_err("def main = fun(out exitCode: i32) { exitCode = 0i32; exitCode = 1i32; };");
    assert!(err.message.contains("not implemented"), "{}", err.message);
}

#[test]
fn test_diagnostic_location_is_one_based() {
    let err = parse_err("def main =\n  flop { exitCode = 0i32; };");
    assert_eq!(err.source_name, "test name");
    assert_eq!(err.line, 2);
    assert_eq!(err.column, 3);
    assert_eq!(
        err.to_string(),
        "test name(2:3): non-function types not implemented"
    );
}

#[test]
fn test_missing_definition_terminator() {
    let err = parse_err("def main = fun(out exitCode: i32) { exitCode = 0i32; }");
    assert!(err.message.contains("Semicolon"), "{}", err.message);
}

#[test]
fn test_truncated_input() {
    let err = parse_err("def main = fun(out");
    assert!(err.message.contains("identifier"), "{}", err.message);
}

#[test]
fn test_unexpected_character() {
    let err = parse_err("def main = fun(out exitCode: i32) { exitCode = 0i32 @ 1i32; };");
    assert!(err.message.contains("unexpected character: @"), "{}", err.message);
}

#[test]
fn test_whitespace_is_free_between_tokens() {
    let program = parse_ok(
        "def main\n\t= fun(\n  out exitCode:\n  i32\n) {\n  exitCode = 0i32;\n};",
    );
    assert_eq!(program.function_count(), 1);
}
