//! Declaration resolution passes.
//!
//! A [`SourceResolver`] is created fresh per source unit, walks the
//! unit's top-level declarations once, top to bottom, and accumulates two
//! tables: the package-level named entities and the receiver-keyed method
//! table. Resolution is best effort: a malformed declaration is skipped,
//! never fatal, and an unresolvable right-hand side flows in as an
//! `Invalid`-kind entity for the consumer to discover.

mod imports;
mod values;

use gosem_ir::{
    Decl, File, FuncDecl, GenDecl, GenDeclKind, Name, Package, Spec, StringInterner, TypeExpr,
};
use rustc_hash::FxHashMap;

use crate::{Importer, Kind, MethodTable, Pool, TypeEval, Types};

/// Finished output of one resolution pass.
///
/// Handles in `nameds` and `methods` are only meaningful against `pool`.
pub struct Resolution {
    pub pool: Pool,
    /// Package-level named entities, in declaration order.
    pub nameds: Types,
    /// Receiver bare name to declared methods.
    pub methods: MethodTable,
}

/// One-shot resolver over a source unit's declarations.
///
/// The resolver instance is the scope: it owns the pool and the tables
/// while the pass runs and releases them through [`finish`](Self::finish).
pub struct SourceResolver<'a, E> {
    pool: Pool,
    interner: &'a StringInterner,
    eval: E,
    importer: Option<&'a mut dyn Importer>,
    nameds: Types,
    methods: MethodTable,
    /// Identifier of the source unit, handed to the importer.
    src: String,
    /// One importer request per distinct path per source unit.
    import_memo: FxHashMap<String, Option<Types>>,
}

impl<'a, E: TypeEval> SourceResolver<'a, E> {
    /// Create a resolver without cross-package import support.
    pub fn new(interner: &'a StringInterner, eval: E, src: impl Into<String>) -> Self {
        SourceResolver {
            pool: Pool::new(),
            interner,
            eval,
            importer: None,
            nameds: Types::new(),
            methods: MethodTable::new(),
            src: src.into(),
            import_memo: FxHashMap::default(),
        }
    }

    /// Create a resolver with an importer collaborator.
    pub fn with_importer(
        interner: &'a StringInterner,
        eval: E,
        src: impl Into<String>,
        importer: &'a mut dyn Importer,
    ) -> Self {
        let mut resolver = Self::new(interner, eval, src);
        resolver.importer = Some(importer);
        resolver
    }

    /// Resolve every top-level declaration of one source unit.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn resolve_file(&mut self, file: &File) {
        for decl in &file.decls {
            self.resolve_decl(decl);
        }
    }

    /// Resolve every file of a package through this one scope, in order.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn resolve_package(&mut self, package: &Package) {
        for file in &package.files {
            self.resolve_file(file);
        }
    }

    /// Hand back the finished tables.
    pub fn finish(self) -> Resolution {
        Resolution {
            pool: self.pool,
            nameds: self.nameds,
            methods: self.methods,
        }
    }

    /// Resolve a single top-level declaration.
    pub fn resolve_decl(&mut self, decl: &Decl) {
        match decl {
            Decl::Func(func) => self.resolve_func(func),
            Decl::Gen(gen) => self.resolve_gen(gen),
            Decl::Bad(span) => {
                tracing::trace!(?span, "skipping unparsed declaration");
            }
        }
    }

    fn resolve_gen(&mut self, gen: &GenDecl) {
        match gen.kind {
            GenDeclKind::Const | GenDeclKind::Var => self.resolve_value_block(gen),
            GenDeclKind::Import => self.resolve_import_block(gen),
            GenDeclKind::Type => self.resolve_type_block(gen),
        }
    }

    /// Function and method declarations.
    ///
    /// A plain function becomes a Named entity over its signature. A method
    /// is appended to the method table under its receiver's bare name,
    /// unless the receiver type is not owned by this source unit, in which
    /// case the declaration is dropped without error.
    fn resolve_func(&mut self, func: &FuncDecl) {
        let sig = self
            .eval
            .eval_signature(&mut self.pool, &self.nameds, &func.sig);

        if let Some(recv) = &func.recv {
            let Some(receiver) = receiver_base_name(&recv.ty) else {
                tracing::debug!("skipping method with foreign or malformed receiver");
                return;
            };
            let method = self.pool.named(func.name, sig);
            self.methods.add(&self.pool, receiver, method);
            return;
        }

        let entity = self.pool.named(func.name, sig);
        self.nameds.add(&self.pool, entity);
    }

    /// Type declaration block.
    ///
    /// `type X = T` always yields an Alias. `type X T` yields a Named
    /// entity unless `T` denotes an interface: interface identity is
    /// structural, so naming one still yields an Alias.
    fn resolve_type_block(&mut self, gen: &GenDecl) {
        for spec in &gen.specs {
            let Spec::Type(s) = spec else {
                tracing::trace!("skipping non-type spec in type block");
                continue;
            };
            let underlying = self.eval.eval_type(&mut self.pool, &self.nameds, &s.ty);
            let entity = if !s.alias && self.pool.base_kind(underlying) != Kind::Interface {
                self.pool.named(s.name, underlying)
            } else {
                self.pool.alias(s.name, underlying)
            };
            self.nameds.add(&self.pool, entity);
        }
    }
}

/// Bare name of a receiver's base type.
///
/// Pointer and paren wrappers are stripped; a plain identifier names a type
/// this source unit can own. A selector means the receiver type lives in
/// another package, and anything else is malformed; both yield `None`.
///
/// The test is purely shape-based so that methods declared before their
/// receiver type, in the same unit, still attach.
fn receiver_base_name(ty: &TypeExpr) -> Option<Name> {
    match ty {
        TypeExpr::Ident(name) => Some(*name),
        TypeExpr::Ptr(inner) | TypeExpr::Paren(inner) => receiver_base_name(inner),
        _ => None,
    }
}

/// Resolve one source unit without import support.
#[tracing::instrument(level = "debug", skip_all)]
pub fn resolve_source<E: TypeEval>(
    interner: &StringInterner,
    eval: E,
    src: impl Into<String>,
    file: &File,
) -> Resolution {
    let mut resolver = SourceResolver::new(interner, eval, src);
    resolver.resolve_file(file);
    resolver.finish()
}

/// Resolve one source unit with an importer collaborator.
#[tracing::instrument(level = "debug", skip_all)]
pub fn resolve_source_with_imports<E: TypeEval>(
    interner: &StringInterner,
    eval: E,
    src: impl Into<String>,
    importer: &mut dyn Importer,
    file: &File,
) -> Resolution {
    let mut resolver = SourceResolver::with_importer(interner, eval, src, importer);
    resolver.resolve_file(file);
    resolver.finish()
}

/// Resolve a whole package through one shared scope.
#[tracing::instrument(level = "debug", skip_all)]
pub fn resolve_package<E: TypeEval>(
    interner: &StringInterner,
    eval: E,
    src: impl Into<String>,
    package: &Package,
) -> Resolution {
    let mut resolver = SourceResolver::new(interner, eval, src);
    resolver.resolve_package(package);
    resolver.finish()
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
