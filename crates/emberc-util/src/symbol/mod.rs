//! String interning for efficient identifier and keyword handling.
//!
//! [`Symbol`] is a compact (4-byte) handle to an interned string, enabling
//! O(1) comparison and de-duplicated storage for identifiers, keywords, and
//! builtin type names encountered while compiling a source file.
//!
//! # Examples
//!
//! ```
//! use emberc_util::symbol::Symbol;
//!
//! let s1 = Symbol::intern("hello");
//! let s2 = Symbol::intern("hello");
//! assert_eq!(s1, s2);
//! ```
//!
//! ```
//! use emberc_util::symbol::{Symbol, KW_VAR, KW_FUNC};
//!
//! assert_eq!(KW_VAR.as_str(), "var");
//! assert!(KW_FUNC.is_known());
//! ```

mod interner;

pub use interner::STRING_TABLE;

/// Statistics about the string interner, useful for profiling.
#[derive(Clone, Copy, Debug, Default)]
pub struct InternerStats {
    /// Number of interned strings.
    pub count: usize,
    /// Hash map capacity (number of buckets).
    pub capacity: usize,
    /// Number of hash collisions encountered.
    pub collisions: usize,
    /// Number of cache hits.
    pub hits: usize,
    /// Number of cache misses.
    pub misses: usize,
}

impl InternerStats {
    pub const fn new(count: usize, capacity: usize, collisions: usize, hits: usize, misses: usize) -> Self {
        Self { count, capacity, collisions, hits, misses }
    }

    pub fn load_factor(&self) -> f64 {
        if self.capacity == 0 { 0.0 } else { self.count as f64 / self.capacity as f64 }
    }

    pub fn is_near_capacity(&self) -> bool {
        self.load_factor() > 0.75
    }

    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 { 0.0 } else { self.hits as f64 / total as f64 }
    }

    pub fn total_operations(&self) -> usize {
        self.hits + self.misses
    }

    pub fn memory_efficiency(&self) -> f64 {
        if self.count == 0 { 0.0 } else { self.count as f64 / self.total_operations() as f64 }
    }
}

/// A compact handle to an interned string.
///
/// `Symbol` is 4 bytes, cache-friendly compared to `String`'s 24 bytes plus
/// heap allocation. Symbols are `'static` and never deallocated: a
/// compilation run is bounded in size by the source file, so this is safe.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol {
    pub(crate) index: u32,
}

/// Symbols with index below this are pre-interned at startup: keywords and
/// builtin type names.
const RESERVED_SYMBOLS_END: u32 = 128;

// ----------------------------------------------------------------------------
// Keywords (§6 of the language definition, fixed and case-sensitive)
// ----------------------------------------------------------------------------

pub const KW_VAR: Symbol = Symbol { index: 0 };
pub const KW_LET: Symbol = Symbol { index: 1 };
pub const KW_FUNC: Symbol = Symbol { index: 2 };
pub const KW_CLASS: Symbol = Symbol { index: 3 };
pub const KW_INIT: Symbol = Symbol { index: 4 };
pub const KW_IF: Symbol = Symbol { index: 5 };
pub const KW_ELIF: Symbol = Symbol { index: 6 };
pub const KW_ELSE: Symbol = Symbol { index: 7 };
pub const KW_WHILE: Symbol = Symbol { index: 8 };
pub const KW_FOR: Symbol = Symbol { index: 9 };
pub const KW_IN: Symbol = Symbol { index: 10 };
pub const KW_DO: Symbol = Symbol { index: 11 };
pub const KW_BREAK: Symbol = Symbol { index: 12 };
pub const KW_CONTINUE: Symbol = Symbol { index: 13 };
pub const KW_RETURN: Symbol = Symbol { index: 14 };
pub const KW_SWITCH: Symbol = Symbol { index: 15 };
pub const KW_CASE: Symbol = Symbol { index: 16 };
pub const KW_TRUE: Symbol = Symbol { index: 17 };
pub const KW_FALSE: Symbol = Symbol { index: 18 };
pub const KW_NIL: Symbol = Symbol { index: 19 };
pub const KW_SELF: Symbol = Symbol { index: 20 };
pub const KW_SUPER: Symbol = Symbol { index: 21 };
pub const KW_PRINT: Symbol = Symbol { index: 22 };
pub const KW_AS: Symbol = Symbol { index: 23 };
pub const KW_IS: Symbol = Symbol { index: 24 };
pub const KW_AND: Symbol = Symbol { index: 25 };
pub const KW_OR: Symbol = Symbol { index: 26 };
pub const KW_BINARY: Symbol = Symbol { index: 27 };
pub const KW_UNARY: Symbol = Symbol { index: 28 };
pub const KW_COMPOUND: Symbol = Symbol { index: 29 };
pub const KW_FAILABLE: Symbol = Symbol { index: 30 };
pub const KW_OVERRIDE: Symbol = Symbol { index: 31 };
pub const KW_PRIVATE: Symbol = Symbol { index: 32 };

// ----------------------------------------------------------------------------
// Builtin type names (§3.3). Not reserved words: a type annotation is an
// ordinary identifier resolved against this table by the type checker.
// ----------------------------------------------------------------------------

pub const TY_I_NATIVE: Symbol = Symbol { index: 40 };
pub const TY_I8: Symbol = Symbol { index: 41 };
pub const TY_I16: Symbol = Symbol { index: 42 };
pub const TY_I32: Symbol = Symbol { index: 43 };
pub const TY_I64: Symbol = Symbol { index: 44 };
pub const TY_F16: Symbol = Symbol { index: 45 };
pub const TY_F32: Symbol = Symbol { index: 46 };
pub const TY_F64: Symbol = Symbol { index: 47 };
pub const TY_F128: Symbol = Symbol { index: 48 };
pub const TY_BOOL: Symbol = Symbol { index: 49 };
pub const TY_VOID: Symbol = Symbol { index: 50 };
pub const TY_NOTHING: Symbol = Symbol { index: 51 };

impl Symbol {
    pub const MAX_INDEX: u32 = u32::MAX;

    /// Intern a string, returning its symbol.
    #[inline]
    pub fn intern(string: &str) -> Self {
        STRING_TABLE.intern(string)
    }

    /// Look up the string this symbol refers to.
    ///
    /// O(n) in the number of interned strings; avoid in hot loops, prefer
    /// [`Symbol::eq_str`] for comparisons.
    #[inline]
    pub fn as_str(&self) -> &'static str {
        STRING_TABLE.get(*self).unwrap_or("")
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.as_str().is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.as_str().len()
    }

    #[inline]
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.as_str().starts_with(prefix)
    }

    #[inline]
    pub fn ends_with(&self, suffix: &str) -> bool {
        self.as_str().ends_with(suffix)
    }

    #[inline]
    pub fn eq_str(&self, other: &str) -> bool {
        self.as_str() == other
    }

    /// True for any symbol pre-interned at startup (keyword or builtin type name).
    #[inline]
    pub fn is_known(&self) -> bool {
        self.index < RESERVED_SYMBOLS_END
    }

    #[inline]
    pub fn as_u32(&self) -> u32 {
        self.index
    }

    /// # Safety
    /// `index` must correspond to a valid entry in the string table.
    #[inline]
    pub unsafe fn from_u32_unchecked(index: u32) -> Self {
        Self { index }
    }

    #[inline]
    pub fn stats_struct() -> InternerStats {
        STRING_TABLE.stats()
    }

    #[inline]
    pub fn stats() -> (usize, usize) {
        let stats = STRING_TABLE.stats();
        (stats.count, stats.capacity)
    }

    /// Intern a string, returning a predefined keyword symbol when the
    /// string matches one of the language's reserved words.
    #[inline]
    pub fn intern_known(string: &str) -> Self {
        match string {
            "var" => KW_VAR,
            "let" => KW_LET,
            "func" => KW_FUNC,
            "class" => KW_CLASS,
            "init" => KW_INIT,
            "if" => KW_IF,
            "elif" => KW_ELIF,
            "else" => KW_ELSE,
            "while" => KW_WHILE,
            "for" => KW_FOR,
            "in" => KW_IN,
            "do" => KW_DO,
            "break" => KW_BREAK,
            "continue" => KW_CONTINUE,
            "return" => KW_RETURN,
            "switch" => KW_SWITCH,
            "case" => KW_CASE,
            "true" => KW_TRUE,
            "false" => KW_FALSE,
            "nil" => KW_NIL,
            "self" => KW_SELF,
            "super" => KW_SUPER,
            "print" => KW_PRINT,
            "as" => KW_AS,
            "is" => KW_IS,
            "and" => KW_AND,
            "or" => KW_OR,
            "binary" => KW_BINARY,
            "unary" => KW_UNARY,
            "compound" => KW_COMPOUND,
            "failable" => KW_FAILABLE,
            "override" => KW_OVERRIDE,
            "private" => KW_PRIVATE,
            _ => Self::intern(string),
        }
    }

    /// Intern a string, returning a predefined builtin-type symbol when the
    /// string names one of the closed set of built-in types (§3.3).
    #[inline]
    pub fn intern_type(string: &str) -> Self {
        match string {
            "iNative" => TY_I_NATIVE,
            "i8" => TY_I8,
            "i16" => TY_I16,
            "i32" => TY_I32,
            "i64" => TY_I64,
            "f16" => TY_F16,
            "f32" => TY_F32,
            "f64" => TY_F64,
            "f128" => TY_F128,
            "bool" => TY_BOOL,
            "void" => TY_VOID,
            "nothing" => TY_NOTHING,
            _ => Self::intern(string),
        }
    }
}

impl std::fmt::Debug for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Symbol({})", self.as_str())
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Pretty-print a symbol with quotes, to distinguish it from a plain string
/// in debug output.
pub trait SymbolPretty {
    fn pretty(&self) -> SymbolPrettyDisplay<'_>;
}

impl SymbolPretty for Symbol {
    fn pretty(&self) -> SymbolPrettyDisplay<'_> {
        SymbolPrettyDisplay(self)
    }
}

pub struct SymbolPrettyDisplay<'a>(&'a Symbol);

impl std::fmt::Display for SymbolPrettyDisplay<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "\"{}\"", self.0.as_str())
    }
}

impl std::fmt::Debug for SymbolPrettyDisplay<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SymbolPretty(\"{}\")", self.0.as_str())
    }
}

static_assertions::assert_impl_all!(Symbol: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn intern_roundtrip() {
        let s1 = Symbol::intern("hello");
        let s2 = Symbol::intern("hello");
        let s3 = Symbol::intern("world");
        assert_eq!(s1, s2);
        assert_ne!(s1, s3);
        assert_eq!(s1.as_str(), "hello");
    }

    #[test]
    fn display_and_debug() {
        let s = Symbol::intern("test");
        assert_eq!(format!("{}", s), "test");
        assert_eq!(format!("{:?}", s), "Symbol(test)");
        assert_eq!(format!("{}", s.pretty()), "\"test\"");
    }

    #[test]
    fn known_keywords() {
        assert_eq!(KW_VAR.as_str(), "var");
        assert_eq!(KW_FUNC.as_str(), "func");
        assert_eq!(KW_ELIF.as_str(), "elif");
        assert!(KW_VAR.is_known());
        assert!(!Symbol::intern("my_variable").is_known());
    }

    #[test]
    fn known_types() {
        assert_eq!(TY_I32.as_str(), "i32");
        assert_eq!(TY_F64.as_str(), "f64");
        assert!(TY_BOOL.is_known());
    }

    #[test]
    fn intern_known_dispatches_keywords() {
        assert_eq!(Symbol::intern_known("var"), KW_VAR);
        let unknown = Symbol::intern_known("not_a_keyword");
        assert_eq!(unknown.as_str(), "not_a_keyword");
        assert!(!unknown.is_known());
    }

    #[test]
    fn intern_type_dispatches_builtins() {
        assert_eq!(Symbol::intern_type("i32"), TY_I32);
        assert_eq!(Symbol::intern_type("iNative"), TY_I_NATIVE);
        let custom = Symbol::intern_type("MyType");
        assert_eq!(custom.as_str(), "MyType");
        assert!(!custom.is_known());
    }

    #[test]
    fn empty_and_unicode() {
        let s = Symbol::intern("");
        assert!(s.is_empty());
        for text in ["你好", "🦀", "Привет"] {
            assert_eq!(Symbol::intern(text).as_str(), text);
        }
    }

    #[test]
    fn concurrent_intern_is_consistent() {
        let handles: Vec<_> = (0..8)
            .map(|_| thread::spawn(|| Symbol::intern("concurrent_same")))
            .collect();
        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        for s in &results[1..] {
            assert_eq!(results[0], *s);
        }
    }

    #[test]
    fn send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Symbol>();
    }
}
