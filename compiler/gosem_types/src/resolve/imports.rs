//! Import block resolution.
//!
//! Four spec shapes: blank imports resolve for side effect only, dot
//! imports flatten the target scope into the current one, aliased and
//! plain imports add a package entity under the alias or the path-derived
//! name. All insertions use no-repeat mode so repeated imports cannot
//! duplicate symbols. Without an importer collaborator the whole pass is
//! inert.

use gosem_ir::{GenDecl, ImportName, ImportSpec, Name, Spec};

use crate::{TypeEval, Types};

use super::SourceResolver;

impl<E: TypeEval> SourceResolver<'_, E> {
    /// Resolve an import declaration block.
    pub(super) fn resolve_import_block(&mut self, gen: &GenDecl) {
        for spec in &gen.specs {
            let Spec::Import(s) = spec else {
                tracing::trace!("skipping non-import spec in import block");
                continue;
            };
            self.resolve_import_spec(s);
        }
    }

    fn resolve_import_spec(&mut self, s: &ImportSpec) {
        let Some(path) = s.path.value() else {
            tracing::debug!(raw = %s.path.raw, "skipping import with malformed path literal");
            return;
        };
        if self.importer.is_none() {
            return;
        }

        match s.name {
            Some(ImportName::Blank) => {
                // Side-effect import: resolved by the loader, never named here.
            }
            Some(ImportName::Dot) => {
                let Some(members) = self.resolve_path(&path) else {
                    return;
                };
                for member in &members {
                    self.nameds.add_no_repeat(&self.pool, member);
                }
            }
            Some(ImportName::Name(alias)) => {
                self.add_package_entity(&path, alias);
            }
            None => {
                let name = self.interner.intern(default_import_name(&path));
                self.add_package_entity(&path, name);
            }
        }
    }

    fn add_package_entity(&mut self, path: &str, name: Name) {
        let Some(members) = self.resolve_path(path) else {
            return;
        };
        let member_list: Vec<_> = members.iter().collect();
        let path_name = self.interner.intern(path);
        let entity = self.pool.package(name, path_name, &member_list);
        self.nameds.add_no_repeat(&self.pool, entity);
    }

    /// Resolve an import path through the importer, at most once per
    /// distinct path for this source unit.
    fn resolve_path(&mut self, path: &str) -> Option<Types> {
        if let Some(cached) = self.import_memo.get(path) {
            return cached.clone();
        }
        let resolved = match self.importer.as_deref_mut() {
            Some(importer) => match importer.resolve(&mut self.pool, path, &self.src) {
                Ok(types) => Some(types),
                Err(err) => {
                    tracing::debug!(path, %err, "skipping unresolvable import");
                    None
                }
            },
            None => None,
        };
        self.import_memo.insert(path.to_owned(), resolved.clone());
        resolved
    }
}

/// Conventional package name of an import path: the last path segment.
fn default_import_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::default_import_name;

    #[test]
    fn default_name_is_last_segment() {
        assert_eq!(default_import_name("encoding/json"), "json");
        assert_eq!(default_import_name("fmt"), "fmt");
        assert_eq!(default_import_name("github.com/user/repo/pkg"), "pkg");
    }
}
