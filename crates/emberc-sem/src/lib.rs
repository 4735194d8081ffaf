//! emberc-sem - Type checking for the Ember compiler.
//!
//! Walks the untyped AST produced by [`emberc_par`] and produces a typed
//! AST ([`hir`]) with every expression's [`types::Type`] resolved. There
//! is no separate name-resolution pass: variable resolution, mutability
//! checking, and type checking all happen in the same bidirectional walk
//! (see [`checker`]).

mod checker;
pub mod hint;
pub mod hir;
pub mod scope;
pub mod types;

pub use checker::Checker;

use emberc_par::ast;
use emberc_util::Handler;

/// Output of a complete checking run: the typed module plus the
/// declaration-slot high-water mark the IR generator sizes its `alloca`
/// vector to.
pub struct CheckedModule {
    pub module: hir::Module,
    pub alloca_vector_size: usize,
}

/// Type-checks a parsed module. Errors are reported through `handler`;
/// callers should check [`Handler::had_error`] before trusting the
/// result for code generation (§7).
pub fn check(module: ast::Module, handler: &Handler) -> CheckedModule {
    let mut checker = Checker::new(handler);
    let checked = checker.check_module(module);
    CheckedModule { module: checked, alloca_vector_size: checker.alloca_vector_size() }
}
