//! Typed AST (§3.4): structurally parallel to `emberc_par::ast`, but every
//! node carries its resolved [`Type`](crate::types::Type). Operator kinds
//! are reused directly from the untyped AST (`emberc_par::ast::{BinOp,
//! UnOp}`) since checking does not change what operator was written, only
//! what it resolves to.

use emberc_par::ast::{BinOp, UnOp};

use crate::types::Type;

#[derive(Debug, Clone)]
pub struct Module {
    pub stmts: Vec<Stmt>,
    /// Type of the module's last statement, or `Nothing` if empty
    /// (§4.3: "A block and the top-level module produce the type of
    /// their last statement").
    pub ty: Type,
}

#[derive(Debug, Clone)]
pub struct Block {
    pub stmts: Vec<Stmt>,
    pub ty: Type,
}

#[derive(Debug, Clone)]
pub enum ControlFlowBody {
    Block(Block),
    Expr(Box<Expr>),
}

impl ControlFlowBody {
    pub fn ty(&self) -> Type {
        match self {
            ControlFlowBody::Block(block) => block.ty,
            ControlFlowBody::Expr(expr) => expr.ty(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct If {
    pub cond: Box<Expr>,
    pub then_branch: ControlFlowBody,
    pub elifs: Vec<(Expr, ControlFlowBody)>,
    pub else_branch: Option<ControlFlowBody>,
    pub is_statement: bool,
    pub ty: Type,
}

#[derive(Debug, Clone)]
pub struct WhileStmt {
    pub cond: Box<Expr>,
    pub body: ControlFlowBody,
}

/// A checked variable declaration. `slot` is the dense index assigned by
/// the scope table (§3.5); the IR generator addresses `slots[slot]`
/// directly, with no further lookup.
#[derive(Debug, Clone)]
pub struct Decl {
    pub mutable: bool,
    pub slot: usize,
    pub ty: Type,
    pub init: Option<Box<Expr>>,
}

#[derive(Debug, Clone)]
pub enum Stmt {
    Block(Block),
    Expr(Expr),
    If(If),
    While(WhileStmt),
    Decl(Decl),
}

impl Stmt {
    pub fn ty(&self) -> Type {
        match self {
            Stmt::Block(block) => block.ty,
            Stmt::Expr(expr) => expr.ty(),
            Stmt::If(node) => node.ty,
            Stmt::While(_) => Type::Nothing,
            Stmt::Decl(_) => Type::Nothing,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Expr {
    Int(i64, Type),
    Float(f64, Type),
    Bool(bool),
    /// A resolved reference to a declaration: its dense slot index,
    /// mutability (for later l-value checks against nested uses), and
    /// resolved type (§3.4).
    Var { slot: usize, mutable: bool, ty: Type },
    Grouping(Box<Expr>),
    Unary { op: UnOp, operand: Box<Expr>, ty: Type },
    Binary { left: Box<Expr>, op: BinOp, right: Box<Expr>, ty: Type },
    If(Box<If>),
    Block(Block),
    /// Placeholder substituted in place of an expression that failed to
    /// type-check (§7), so checking can continue and later stages always
    /// see a structurally complete tree.
    Error,
}

impl Expr {
    pub fn ty(&self) -> Type {
        match self {
            Expr::Int(_, ty) => *ty,
            Expr::Float(_, ty) => *ty,
            Expr::Bool(_) => Type::Bool,
            Expr::Var { ty, .. } => *ty,
            Expr::Grouping(inner) => inner.ty(),
            Expr::Unary { ty, .. } => *ty,
            Expr::Binary { ty, .. } => *ty,
            Expr::If(node) => node.ty,
            Expr::Block(block) => block.ty,
            Expr::Error => Type::Nothing,
        }
    }

    /// True for an expression designating an addressable storage
    /// location (§3.3, §GLOSSARY: L-value). Only a mutable variable
    /// reference is ever an l-value in this language — there are no
    /// fields, no dereference, no array indexing.
    pub fn is_lvalue(&self) -> bool {
        match self {
            Expr::Var { .. } => true,
            Expr::Grouping(inner) => inner.is_lvalue(),
            _ => false,
        }
    }

    pub fn is_mutable_lvalue(&self) -> bool {
        match self {
            Expr::Var { mutable, .. } => *mutable,
            Expr::Grouping(inner) => inner.is_mutable_lvalue(),
            _ => false,
        }
    }
}
