//! Shared vocabulary for the gosem resolver.
//!
//! This crate defines the data the resolver consumes and nothing else:
//!
//! - [`Name`] / [`StringInterner`]: compact interned identifiers
//! - [`Span`]: byte-offset source locations
//! - The declaration tree ([`File`], [`Decl`], [`Spec`], ...) an external
//!   parser is assumed to produce
//!
//! No semantics live here; the resolver in `gosem_types` interprets these
//! shapes.

mod ast;
mod interner;
mod name;
mod span;

pub use ast::{
    BinaryOp, ChanDir, Decl, Expr, Field, File, FuncDecl, GenDecl, GenDeclKind, ImportName,
    ImportSpec, InterfaceElem, Lit, Package, Param, Receiver, Signature, Spec, StringLit, TypeExpr,
    TypeSpec, UnaryOp, ValueSpec,
};
pub use interner::{SharedInterner, StringInterner};
pub use name::Name;
pub use span::Span;
