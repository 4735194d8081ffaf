//! Downward type hints (§4.3, §9).
//!
//! Grounded on `original_source`'s `TypeHint`/`NoneTypeHint`/
//! `UnknownTypeHint`/`ExpectedTypeHint` class hierarchy: a closed `Kind`
//! plus an l-value/r-value flag pair. The distilled spec generalizes the
//! original's single `ExpectedTypeHint` into an additional
//! `ExpectedOneOf` variant, needed because integer-literal checking
//! against a binary operator's operand (`ExpectedOneOf(arithmetic
//! types)`) must pick from several candidate types rather than one.

use crate::types::Type;

#[derive(Debug, Clone)]
pub enum TypeHint {
    None,
    Unknown,
    Expected(Type),
    ExpectedOneOf(Vec<Type>),
}

impl TypeHint {
    pub fn expected_one_of(types: &[Type]) -> Self {
        TypeHint::ExpectedOneOf(types.to_vec())
    }

    /// The arithmetic-typed hint used for the left operand of `+ - * /`
    /// and for compound-assign targets (§4.3).
    pub fn arithmetic() -> Self {
        TypeHint::expected_one_of(Type::arithmetic_preference_order())
    }

    pub fn accepts(&self, ty: Type) -> bool {
        match self {
            TypeHint::None | TypeHint::Unknown => true,
            TypeHint::Expected(t) => *t == ty,
            TypeHint::ExpectedOneOf(ts) => ts.contains(&ty),
        }
    }
}

/// A `TypeHint` paired with the l-value requirement it carries (§9: "Pass
/// it by immutable reference; never mutate"). Kept as a separate struct
/// rather than folding the flag into `TypeHint` itself so every
/// `TypeHint` variant doesn't need to repeat it.
#[derive(Debug, Clone)]
pub struct Hint {
    pub kind: TypeHint,
    pub requires_lvalue: bool,
}

impl Hint {
    pub fn none() -> Self {
        Hint { kind: TypeHint::None, requires_lvalue: false }
    }

    pub fn unknown() -> Self {
        Hint { kind: TypeHint::Unknown, requires_lvalue: false }
    }

    pub fn unknown_lvalue() -> Self {
        Hint { kind: TypeHint::Unknown, requires_lvalue: true }
    }

    pub fn expected(ty: Type) -> Self {
        Hint { kind: TypeHint::Expected(ty), requires_lvalue: false }
    }

    pub fn arithmetic_lvalue() -> Self {
        Hint { kind: TypeHint::arithmetic(), requires_lvalue: true }
    }

    pub fn arithmetic() -> Self {
        Hint { kind: TypeHint::arithmetic(), requires_lvalue: false }
    }

    pub fn with_kind(kind: TypeHint) -> Self {
        Hint { kind, requires_lvalue: false }
    }
}
