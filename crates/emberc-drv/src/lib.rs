//! emberc-drv - compilation driver (§4.6, §6).
//!
//! Sequences the front-end stages (lex, parse, check) and, depending on
//! the requested [`Action`], IR generation and linking. Each stage
//! transition is gated on [`emberc_util::Handler::had_error`] (§7): a
//! malformed tree is never handed to the next stage. There is no
//! mtime-based skip DAG — every invocation runs the whole pipeline
//! (§1 Non-goals: no incremental recompilation).

pub mod error;

use std::path::{Path, PathBuf};

use emberc_gen::{IrGenerator, Linker};
use emberc_lex::Lexer;
use emberc_par::Parser;
use emberc_util::{Handler, SourceMap};
use inkwell::context::Context;
use tracing::{debug, warn};

pub use error::{DriverError, Result};

/// The artifact a compilation run should produce (§6).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    DumpParse,
    DumpAst,
    EmitIr,
    EmitObject,
    EmitExecutable,
}

/// One compilation invocation: a single input file, an optional output
/// path (`-` or omitted means stdout for textual actions), and the
/// requested action.
#[derive(Debug, Clone)]
pub struct CompileRequest {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub action: Action,
}

/// Runs one compilation end to end. On success, the requested artifact
/// has been written to `request.output` (or stdout for the textual
/// actions when no output path was given). Returns
/// [`DriverError::CompilationFailed`] carrying a rendered diagnostic
/// report if any stage found a problem; the CLI layer prints it and
/// exits with code 1.
pub fn compile(request: &CompileRequest) -> Result<()> {
    let source = std::fs::read_to_string(&request.input)
        .map_err(|e| DriverError::ReadFailed { path: request.input.clone(), source: e })?;
    debug!(bytes = source.len(), path = %request.input.display(), "read source file");

    let mut source_map = SourceMap::new();
    source_map.add_file(request.input.display().to_string(), source.clone());
    let handler = Handler::new();

    if request.action == Action::DumpParse {
        let tokens: Vec<_> = Lexer::new(&source, &handler).collect();
        debug!(count = tokens.len(), "lexed token stream");
        let mut out = String::new();
        for token in &tokens {
            out.push_str(&format!("{token:?}\n"));
        }
        return finish(&handler, &source_map, &out, request.output.as_deref());
    }

    let mut parser = Parser::new(&source, &handler);
    let module = parser.parse_module();
    debug!(stmts = module.stmts.len(), "parsed module");
    if handler.had_error() {
        warn!(errors = handler.error_count(), "parse stage ended with diagnostics pending");
        return Err(DriverError::CompilationFailed(handler.render(&source_map)));
    }

    if request.action == Action::DumpAst {
        let out = format!("{module:#?}\n");
        return finish(&handler, &source_map, &out, request.output.as_deref());
    }

    let checked = emberc_sem::check(module, &handler);
    debug!(alloca_vector_size = checked.alloca_vector_size, "type-checked module");
    if handler.had_error() {
        warn!(errors = handler.error_count(), "type check ended with diagnostics pending");
        return Err(DriverError::CompilationFailed(handler.render(&source_map)));
    }

    let context = Context::create();
    let mut generator = IrGenerator::new(&context, &module_name(&request.input));
    generator.generate(&checked)?;
    debug!("generated LLVM IR for main");

    match request.action {
        Action::EmitIr => finish(&handler, &source_map, &generator.ir_to_string(), request.output.as_deref()),
        Action::EmitObject => {
            let output = request.output.clone().unwrap_or_else(|| default_output(&request.input, "o"));
            generator.write_object(&output)?;
            debug!(path = %output.display(), "wrote object file");
            Ok(())
        },
        Action::EmitExecutable => {
            let object_path = std::env::temp_dir().join(format!("emberc-{}.o", std::process::id()));
            generator.write_object(&object_path)?;

            let output = request.output.clone().unwrap_or_else(|| default_output(&request.input, ""));
            let link_result = Linker::locate().and_then(|linker| linker.link(&[object_path.clone()], &output));
            let _ = std::fs::remove_file(&object_path);
            link_result?;
            debug!(path = %output.display(), "linked executable");
            Ok(())
        },
        Action::DumpParse | Action::DumpAst => unreachable!("handled above"),
    }
}

fn finish(handler: &Handler, source_map: &SourceMap, text: &str, output: Option<&Path>) -> Result<()> {
    if handler.had_error() {
        warn!(errors = handler.error_count(), "stage ended with diagnostics pending");
        return Err(DriverError::CompilationFailed(handler.render(source_map)));
    }
    match output {
        Some(path) if path != Path::new("-") => std::fs::write(path, text)
            .map_err(|e| DriverError::WriteFailed { path: path.to_path_buf(), source: e })?,
        _ => print!("{text}"),
    }
    Ok(())
}

fn default_output(input: &Path, ext: &str) -> PathBuf {
    let stem = input.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_else(|| "a".to_string());
    if ext.is_empty() {
        PathBuf::from(stem)
    } else {
        PathBuf::from(format!("{stem}.{ext}"))
    }
}

fn module_name(input: &Path) -> String {
    input.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_else(|| "module".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_source(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn dump_ast_succeeds_for_well_formed_source() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_source(&dir, "a.ember", "1 + 2 * 3");
        let output = dir.path().join("a.ast.txt");
        let request = CompileRequest { input, output: Some(output.clone()), action: Action::DumpAst };
        compile(&request).expect("dump-ast should succeed");
        let dumped = std::fs::read_to_string(output).unwrap();
        assert!(dumped.contains("Binary"));
    }

    #[test]
    fn emit_ir_fails_with_rendered_diagnostic_on_type_error() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_source(&dir, "bad.ember", "let y = 1\ny = 2");
        let request = CompileRequest { input, output: None, action: Action::EmitIr };
        let err = compile(&request).expect_err("assigning to an immutable binding is a type error");
        assert!(matches!(err, DriverError::CompilationFailed(_)));
    }

    #[test]
    fn emit_ir_succeeds_for_arithmetic_scenario() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_source(&dir, "arith.ember", "1 + 2 * 3");
        let output = dir.path().join("arith.ll");
        let request = CompileRequest { input, output: Some(output.clone()), action: Action::EmitIr };
        compile(&request).expect("emit-ir should succeed");
        let ir = std::fs::read_to_string(output).unwrap();
        assert!(ir.contains("define i32 @main"));
    }

    #[test]
    fn read_failed_for_missing_input() {
        let request =
            CompileRequest { input: PathBuf::from("/nonexistent/path/to/source.ember"), output: None, action: Action::DumpAst };
        let err = compile(&request).expect_err("missing input file should fail");
        assert!(matches!(err, DriverError::ReadFailed { .. }));
    }
}
