//! Type model and declaration resolver for gosem.
//!
//! Builds a structured, queryable type model from a source unit's top-level
//! declarations without executing the source:
//!
//! - [`Kind`]: closed discriminant taxonomy over all entities
//! - [`Pool`] / [`Idx`]: arena of immutable type entities with 32-bit handles
//! - [`Types`]: ordered, name-indexed symbol table container
//! - [`MethodTable`]: receiver bare name to declared methods
//! - [`SourceResolver`]: the per-source-unit resolution pass
//! - [`TypeEval`] / [`Importer`]: the evaluator and cross-package
//!   collaborator contracts, with [`BasicEval`] as the bundled structural
//!   evaluator
//!
//! Resolution is best effort: malformed declarations are skipped and
//! unresolvable types enter the tables as `Invalid`-kind entities, so one
//! bad declaration never aborts a source unit.

mod collection;
mod eval;
mod idx;
mod importer;
mod kind;
mod method;
mod pool;
mod resolve;

pub use collection::Types;
pub use eval::{BasicEval, TypeEval};
pub use idx::Idx;
pub use importer::{ImportError, Importer};
pub use kind::Kind;
pub use method::MethodTable;
pub use pool::Pool;
pub use resolve::{
    resolve_package, resolve_source, resolve_source_with_imports, Resolution, SourceResolver,
};
