//! The closed set of built-in types and the `TypeRef` wrapper the checker
//! passes around.
//!
//! There is no user-defined type, so the whole type lattice is a single
//! enum: `Void`, `Nothing` (the type of a statement that produces no
//! value), `Bool`, a fixed set of integer widths, and a fixed set of
//! floating-point kinds. Equality is structural (`#[derive(PartialEq)]`
//! is enough, mirroring the teacher's closed builtin-type hierarchy
//! without the open-ended `Adt`/`Param`/`Ref` cases it needed for a
//! richer source language).

use emberc_util::Symbol;

/// Integer bit widths the source language exposes (§3.3: `width ∈
/// {1,8,16,32,64}`). `W1` is a real one-bit integer type distinct from
/// `Type::Bool`; the original compiler folds the two together by
/// modeling `Bool` as a 1-bit `BuiltinIntegerType`, but the distilled
/// spec lists `Bool` as its own `Type` case, so we keep them separate
/// here rather than re-deriving booleanness from a bit width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntWidth {
    W1,
    W8,
    W16,
    W32,
    W64,
}

impl IntWidth {
    pub fn bits(self) -> u32 {
        match self {
            IntWidth::W1 => 1,
            IntWidth::W8 => 8,
            IntWidth::W16 => 16,
            IntWidth::W32 => 32,
            IntWidth::W64 => 64,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FloatKind {
    F32,
    F64,
}

impl FloatKind {
    pub fn bits(self) -> u32 {
        match self {
            FloatKind::F32 => 32,
            FloatKind::F64 => 64,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    Void,
    /// The type of a statement, block, or `if`-statement that does not
    /// yield a value, and of the placeholder substituted for an
    /// expression that failed to type-check.
    Nothing,
    Bool,
    Int(IntWidth),
    Float(FloatKind),
}

impl Type {
    pub const I_NATIVE: Type = Type::Int(IntWidth::W64);
    pub const I64: Type = Type::Int(IntWidth::W64);
    pub const I32: Type = Type::Int(IntWidth::W32);
    pub const I16: Type = Type::Int(IntWidth::W16);
    pub const I8: Type = Type::Int(IntWidth::W8);
    pub const F64: Type = Type::Float(FloatKind::F64);
    pub const F32: Type = Type::Float(FloatKind::F32);

    pub fn is_integer(self) -> bool {
        matches!(self, Type::Int(_))
    }

    pub fn is_float(self) -> bool {
        matches!(self, Type::Float(_))
    }

    /// True for every type an integer literal may adopt under
    /// `Expected(T)` (§4.3: "integer ... other than `Bool` ... or
    /// floating-point"). `Bool` is excluded: `var b: bool = 1` is a type
    /// error, not an implicit `0`/`1` conversion.
    pub fn is_arithmetic(self) -> bool {
        self.is_integer() || self.is_float()
    }

    /// The preferred-order list consulted by `ExpectedOneOf` resolution
    /// for literals (§4.3): `iNative, i64, i32, i16, i8, f64, f32`.
    /// `iNative` and `i64` are both `Int(W64)` here, so the first match
    /// is always `i64`.
    pub fn arithmetic_preference_order() -> &'static [Type] {
        &[Type::I_NATIVE, Type::I32, Type::I16, Type::I8, Type::F64, Type::F32]
    }

    /// Resolves a bare type-annotation name (`i64`, `bool`, `f32`, ...)
    /// to a builtin `Type`. Returns `None` for anything else; the
    /// checker reports that as an unresolved type name.
    pub fn from_name(name: &str) -> Option<Type> {
        Some(match name {
            "Void" => Type::Void,
            "bool" => Type::Bool,
            "i1" => Type::Int(IntWidth::W1),
            "i8" => Type::Int(IntWidth::W8),
            "i16" => Type::Int(IntWidth::W16),
            "i32" => Type::Int(IntWidth::W32),
            "i64" => Type::Int(IntWidth::W64),
            "iNative" => Type::I_NATIVE,
            "f32" => Type::Float(FloatKind::F32),
            "f64" => Type::Float(FloatKind::F64),
            _ => return None,
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            Type::Void => "Void",
            Type::Nothing => "Nothing",
            Type::Bool => "bool",
            Type::Int(IntWidth::W1) => "i1",
            Type::Int(IntWidth::W8) => "i8",
            Type::Int(IntWidth::W16) => "i16",
            Type::Int(IntWidth::W32) => "i32",
            Type::Int(IntWidth::W64) => "i64",
            Type::Float(FloatKind::F32) => "f32",
            Type::Float(FloatKind::F64) => "f64",
        }
    }
}

impl std::fmt::Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The value handed around the checker's `analyze_*` functions: a
/// resolved `Type` plus the l-value flag (§3.3). Equality is purely
/// structural on `ty`; `is_lvalue` does not participate in type
/// agreement checks (an `if`'s then/else branches can disagree on
/// l-valueness without that being a type mismatch).
#[derive(Debug, Clone, Copy)]
pub struct TypeRef {
    pub ty: Type,
    pub is_lvalue: bool,
}

impl TypeRef {
    pub fn rvalue(ty: Type) -> Self {
        TypeRef { ty, is_lvalue: false }
    }

    pub fn lvalue(ty: Type) -> Self {
        TypeRef { ty, is_lvalue: true }
    }
}

impl PartialEq for TypeRef {
    fn eq(&self, other: &Self) -> bool {
        self.ty == other.ty
    }
}

/// A resolved variable declaration: used both by the scope table
/// (`emberc_sem::scope`) and carried onto `hir::Expr::Var` nodes.
#[derive(Debug, Clone, Copy)]
pub struct VarInfo {
    pub name: Symbol,
    pub ty: Type,
    pub mutable: bool,
}
