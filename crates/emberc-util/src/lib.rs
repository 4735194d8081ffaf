//! emberc-util - Core utilities shared across the Ember compiler crates.
//!
//! Provides source location tracking ([`span`]), diagnostic reporting
//! ([`diagnostic`]), string interning ([`symbol`]), and a typed-index
//! vector ([`index_vec`]) used by later compiler phases.

pub mod diagnostic;
pub mod index_vec;
pub mod span;
pub mod symbol;

pub use diagnostic::{Diagnostic, DiagnosticCode, Handler, Level};
pub use index_vec::{Idx, IndexVec};
pub use span::{FileId, SourceFile, SourceMap, Span};
pub use symbol::Symbol;
