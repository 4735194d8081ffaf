//! Error types for LLVM code generation.

use thiserror::Error;

/// Error type for LLVM code generation.
///
/// [`CodeGenError::VerificationFailed`] is the one path §7 calls out as
/// a genuinely internal/fatal error: LLVM's function verifier rejecting
/// IR the generator itself produced indicates a bug in this crate, not
/// a user-facing problem, but it is still surfaced as a `Result` rather
/// than a `panic!` so the driver can report it uniformly.
#[derive(Debug, Error)]
pub enum CodeGenError {
    /// The generated function failed LLVM's verifier.
    #[error("LLVM verification failed for function '{0}': {1}")]
    VerificationFailed(String, String),

    /// No usable target machine for the host triple.
    #[error("could not create a target machine for '{0}'")]
    TargetUnavailable(String),

    /// Writing an object or assembly file to disk failed.
    #[error("failed to write output file '{path}': {source}")]
    WriteFailed { path: String, #[source] source: std::io::Error },

    /// No system linker found on `PATH` (§6: "located by `PATH` search").
    #[error("could not locate a system linker ('{0}') on PATH")]
    LinkerNotFound(String),

    /// The linker process could not be spawned.
    #[error("failed to spawn linker '{0}': {1}")]
    LinkerSpawnFailed(String, #[source] std::io::Error),

    /// The linker exited with a non-zero status.
    #[error("linker exited with status {0}")]
    LinkerFailed(i32),
}

pub type Result<T> = std::result::Result<T, CodeGenError>;
