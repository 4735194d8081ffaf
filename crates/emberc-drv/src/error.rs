//! Error type for the compilation driver (§7: I/O and subprocess errors
//! are fatal user-facing errors modeled with `thiserror` at each crate
//! boundary; recoverable diagnostics from lex/parse/check are instead
//! rendered text, carried in [`DriverError::CompilationFailed`]).

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("failed to read input file '{path}': {source}")]
    ReadFailed { path: PathBuf, #[source] source: std::io::Error },

    #[error("failed to write output '{path}': {source}")]
    WriteFailed { path: PathBuf, #[source] source: std::io::Error },

    /// A prior stage reported one or more diagnostics; the string is
    /// the already-rendered report (§4.5), ready to print as-is.
    #[error("{0}")]
    CompilationFailed(String),

    #[error(transparent)]
    CodeGen(#[from] emberc_gen::CodeGenError),
}

pub type Result<T> = std::result::Result<T, DriverError>;
