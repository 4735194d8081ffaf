//! Whole-pipeline scenarios drawn from the testable-properties table
//! (§8), exercised end-to-end through [`emberc_drv::compile`].

use std::io::Write;
use std::path::PathBuf;

use emberc_drv::{compile, Action, CompileRequest, DriverError};

fn write_source(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    path
}

fn emit_ir(content: &str) -> String {
    let dir = tempfile::tempdir().unwrap();
    let input = write_source(&dir, "scenario.ember", content);
    let output = dir.path().join("scenario.ll");
    let request = CompileRequest { input, output: Some(output.clone()), action: Action::EmitIr };
    compile(&request).expect("scenario should compile cleanly");
    std::fs::read_to_string(output).unwrap()
}

#[test]
fn if_expression_requires_an_else_branch() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_source(&dir, "no_else.ember", "if true { 1 }");
    let request = CompileRequest { input, output: None, action: Action::EmitIr };
    let err = compile(&request).expect_err("an else-less if used as an expression is a type error");
    assert!(matches!(err, DriverError::CompilationFailed(_)));
}

#[test]
fn while_loop_lowers_to_three_blocks_and_prints_final_counter() {
    let ir = emit_ir("var i = 0\nwhile i < 3 { i += 1 }\ni");
    assert!(ir.contains("while.cond"));
    assert!(ir.contains("while.body"));
    assert!(ir.contains("while.exit"));
}

#[test]
fn float_declaration_and_compound_assignment_emit_fadd() {
    let ir = emit_ir("var x = 3.0\nx += 1.5\nx");
    assert!(ir.contains("fadd"));
}

#[test]
fn dump_parse_reports_a_newline_significant_token_stream() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_source(&dir, "tokens.ember", "var x = 1\nx");
    let output = dir.path().join("tokens.txt");
    let request = CompileRequest { input, output: Some(output.clone()), action: Action::DumpParse };
    compile(&request).expect("dump-parse should succeed even without a type-checkable program");
    let dumped = std::fs::read_to_string(output).unwrap();
    assert!(dumped.lines().any(|l| l.contains("Newline")));
}
