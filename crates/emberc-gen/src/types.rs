//! Maps the checker's closed [`emberc_sem::types::Type`] to LLVM basic
//! types (§4.4, §12.1-equivalent of the distilled spec).
//!
//! There is no aggregate, pointer, or struct type in the source
//! language, so unlike a general-purpose backend's type mapper this one
//! is a flat match with no recursion.

use emberc_sem::types::{FloatKind, IntWidth, Type};
use inkwell::context::Context;
use inkwell::types::{BasicTypeEnum, IntType};

pub struct TypeMapper<'ctx> {
    context: &'ctx Context,
}

impl<'ctx> TypeMapper<'ctx> {
    pub fn new(context: &'ctx Context) -> Self {
        Self { context }
    }

    /// Maps a checked `Type` to its LLVM representation. `Void` and
    /// `Nothing` have no `BasicTypeEnum` (LLVM's `void` is not a basic
    /// type); callers needing those map them to `()` themselves.
    pub fn map_to_basic(&self, ty: Type) -> BasicTypeEnum<'ctx> {
        match ty {
            Type::Bool => self.context.bool_type().into(),
            Type::Int(width) => self.int_type(width).into(),
            Type::Float(FloatKind::F32) => self.context.f32_type().into(),
            Type::Float(FloatKind::F64) => self.context.f64_type().into(),
            Type::Void | Type::Nothing => {
                unreachable!("Void/Nothing have no storage representation")
            },
        }
    }

    pub fn int_type(&self, width: IntWidth) -> IntType<'ctx> {
        match width {
            IntWidth::W1 => self.context.bool_type(),
            IntWidth::W8 => self.context.i8_type(),
            IntWidth::W16 => self.context.i16_type(),
            IntWidth::W32 => self.context.i32_type(),
            IntWidth::W64 => self.context.i64_type(),
        }
    }
}
