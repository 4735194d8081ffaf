//! Declaration table and lexical scope stack (§3.5).
//!
//! Scopes don't own a
//! `HashMap<Symbol, DefId>` each, because slot reuse across sibling
//! scopes needs the same flat `Vec<Declaration>` lent out to every scope
//! in the chain, with each scope only remembering where in that vector
//! it started. A child scope's declarations physically overwrite a freed
//! parent-sibling's slot once that sibling's scope has ended, instead of
//! allocating a fresh index — this is what lets the IR generator address
//! `alloca`s by a dense, reused index rather than one slot per
//! declaration ever seen.

use emberc_util::Symbol;

use crate::types::Type;

#[derive(Debug, Clone, Copy)]
pub struct Declaration {
    pub name: Symbol,
    pub ty: Type,
    pub mutable: bool,
}

/// One frame of the scope stack. `start` is the `declarations` length
/// when this scope was entered; `top` is the current length as seen
/// through this scope (grows as names are added, never below `start`).
struct Frame {
    start: usize,
    top: usize,
}

pub struct ScopeStack {
    declarations: Vec<Declaration>,
    frames: Vec<Frame>,
}

impl ScopeStack {
    pub fn new() -> Self {
        ScopeStack { declarations: Vec::new(), frames: vec![Frame { start: 0, top: 0 }] }
    }

    pub fn push_scope(&mut self) {
        let top = self.frames.last().unwrap().top;
        self.frames.push(Frame { start: top, top });
    }

    pub fn pop_scope(&mut self) {
        self.frames.pop();
        debug_assert!(!self.frames.is_empty(), "popped the module-level scope");
    }

    /// The high-water mark for declaration indices across the whole
    /// checking run — the `alloca_vector_size` the IR generator sizes
    /// its stack-slot vector to.
    pub fn alloca_vector_size(&self) -> usize {
        self.declarations.len()
    }

    /// Looks up `name` from innermost to outermost scope, searching only
    /// `declarations[0..top]` of the current frame (§3.5: "scans the
    /// slice ... from newest to oldest").
    pub fn lookup(&self, name: Symbol) -> Option<(usize, Declaration)> {
        let top = self.frames.last().unwrap().top;
        self.declarations[..top]
            .iter()
            .enumerate()
            .rev()
            .find(|(_, decl)| decl.name == name)
            .map(|(idx, decl)| (idx, *decl))
    }

    /// True if `name` is already declared in the *current* scope only
    /// (used to detect redeclaration, which is legal across scopes but
    /// not within one).
    pub fn declared_in_current_scope(&self, name: Symbol) -> bool {
        let frame = self.frames.last().unwrap();
        self.declarations[frame.start..frame.top].iter().any(|decl| decl.name == name)
    }

    /// Adds a declaration to the current scope, returning its dense
    /// slot index. Appends past the end of `declarations`, or overwrites
    /// a slot freed by a sibling scope that already ended.
    pub fn add_declaration(&mut self, name: Symbol, ty: Type, mutable: bool) -> usize {
        let frame = self.frames.last_mut().unwrap();
        let index = frame.top;
        let decl = Declaration { name, ty, mutable };
        if index == self.declarations.len() {
            self.declarations.push(decl);
        } else {
            self.declarations[index] = decl;
        }
        frame.top += 1;
        index
    }
}

impl Default for ScopeStack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_finds_innermost_shadowing_declaration() {
        let mut scopes = ScopeStack::new();
        let x = Symbol::intern("x");
        scopes.add_declaration(x, Type::I64, true);
        scopes.push_scope();
        scopes.add_declaration(x, Type::Bool, false);

        let (_, decl) = scopes.lookup(x).unwrap();
        assert_eq!(decl.ty, Type::Bool);
    }

    #[test]
    fn slot_is_reused_after_sibling_scope_ends() {
        let mut scopes = ScopeStack::new();
        scopes.push_scope();
        let a = scopes.add_declaration(Symbol::intern("a"), Type::I64, true);
        scopes.pop_scope();

        scopes.push_scope();
        let b = scopes.add_declaration(Symbol::intern("b"), Type::Bool, true);
        scopes.pop_scope();

        assert_eq!(a, b);
        assert_eq!(scopes.alloca_vector_size(), 1);
    }

    #[test]
    fn redeclaration_in_same_scope_is_detected() {
        let mut scopes = ScopeStack::new();
        let x = Symbol::intern("redeclared_x");
        scopes.add_declaration(x, Type::I64, true);
        assert!(scopes.declared_in_current_scope(x));
    }

    #[test]
    fn shadowing_in_nested_scope_is_not_redeclaration() {
        let mut scopes = ScopeStack::new();
        let x = Symbol::intern("shadow_x");
        scopes.add_declaration(x, Type::I64, true);
        scopes.push_scope();
        assert!(!scopes.declared_in_current_scope(x));
    }
}
