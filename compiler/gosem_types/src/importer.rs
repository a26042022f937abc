//! Cross-package import collaborator contract.
//!
//! The resolver does not load packages itself; a caller-supplied `Importer`
//! materializes the exported scope of an import path into the resolver's
//! own pool, so that handles stay comparable across the boundary. Without
//! an importer the resolver still runs, with import resolution inert.

use thiserror::Error;

use crate::{Pool, Types};

/// Failure reported by an [`Importer`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportError {
    /// No package exists at the path.
    #[error("package {path:?} not found")]
    NotFound { path: String },

    /// The path participates in an import cycle.
    #[error("import cycle through {path:?}")]
    Cycle { path: String },

    /// The importer cannot handle the path.
    #[error("cannot import {path:?}: {reason}")]
    Unsupported { path: String, reason: String },
}

/// Resolves import paths to the exported scope of the target package.
///
/// # Contract
///
/// - Deterministic: the same path yields an equivalent scope every call.
/// - Idempotent: safe to call repeatedly; no-repeat insertion relies on
///   repeated resolution producing equivalent results.
/// - Entities are allocated into the pool passed in, never into importer
///   private storage.
///
/// The resolver issues at most one `resolve` call per distinct path per
/// source unit; implementations may additionally cache across units.
pub trait Importer {
    /// Resolve `path`, requested from the source unit `from`.
    fn resolve(&mut self, pool: &mut Pool, path: &str, from: &str) -> Result<Types, ImportError>;
}
