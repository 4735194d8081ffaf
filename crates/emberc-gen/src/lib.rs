//! emberc-gen - LLVM IR generation for the Ember compiler (§4.4).
//!
//! Walks the checker's typed AST ([`emberc_sem::hir`]) directly into
//! LLVM IR via `inkwell`; there is no separate mid-level IR stage here
//! since LLVM performs instruction selection and register allocation
//! itself.

pub mod error;
pub mod linker;
pub mod llvm;
pub mod types;

pub use error::{CodeGenError, Result};
pub use linker::Linker;
pub use llvm::IrGenerator;
pub use types::TypeMapper;
