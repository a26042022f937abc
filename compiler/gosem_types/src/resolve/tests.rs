use gosem_ir::{
    Decl, Expr, File, FuncDecl, GenDecl, GenDeclKind, ImportName, ImportSpec, InterfaceElem, Lit,
    Package, Param, Receiver, Signature, Span, Spec, StringInterner, StringLit, TypeExpr, TypeSpec,
    ValueSpec,
};
use pretty_assertions::assert_eq;

use crate::{BasicEval, ImportError, Importer, Kind, Pool, Types};

use super::*;

// === IR construction helpers ===

fn ty_ident(interner: &StringInterner, s: &str) -> TypeExpr {
    TypeExpr::Ident(interner.intern(s))
}

fn gen(kind: GenDeclKind, specs: Vec<Spec>) -> Decl {
    Decl::Gen(GenDecl {
        kind,
        specs,
        span: Span::DUMMY,
    })
}

fn vspec(
    interner: &StringInterner,
    names: &[&str],
    ty: Option<TypeExpr>,
    values: Vec<Expr>,
) -> Spec {
    Spec::Value(ValueSpec {
        names: names.iter().map(|n| interner.intern(n)).collect(),
        ty,
        values,
        span: Span::DUMMY,
    })
}

fn tspec(interner: &StringInterner, name: &str, alias: bool, ty: TypeExpr) -> Spec {
    Spec::Type(TypeSpec {
        name: interner.intern(name),
        alias,
        ty,
        span: Span::DUMMY,
    })
}

fn ispec(name: Option<ImportName>, path: &str) -> Spec {
    Spec::Import(ImportSpec {
        name,
        path: StringLit::quoted(path),
        span: Span::DUMMY,
    })
}

fn func_decl(interner: &StringInterner, name: &str, results: Vec<TypeExpr>) -> Decl {
    Decl::Func(FuncDecl {
        recv: None,
        name: interner.intern(name),
        sig: Signature {
            params: vec![],
            results: results
                .into_iter()
                .map(|ty| Param { name: None, ty })
                .collect(),
        },
        span: Span::DUMMY,
    })
}

fn method_decl(interner: &StringInterner, recv: TypeExpr, name: &str) -> Decl {
    Decl::Func(FuncDecl {
        recv: Some(Receiver {
            name: Some(interner.intern("r")),
            ty: recv,
        }),
        name: interner.intern(name),
        sig: Signature::default(),
        span: Span::DUMMY,
    })
}

fn call(interner: &StringInterner, f: &str) -> Expr {
    Expr::Call {
        func: Box::new(Expr::Ident(interner.intern(f))),
        args: vec![],
    }
}

fn resolve(interner: &StringInterner, decls: Vec<Decl>) -> Resolution {
    resolve_source(interner, BasicEval::new(interner), "unit.go", &File { decls })
}

fn kind_of(res: &Resolution, interner: &StringInterner, name: &str) -> Option<Kind> {
    res.nameds
        .get(interner.intern(name))
        .map(|idx| res.pool.kind(idx))
}

// === Importer test double ===

struct FakeImporter<'a> {
    interner: &'a StringInterner,
    calls: usize,
}

impl<'a> FakeImporter<'a> {
    fn new(interner: &'a StringInterner) -> Self {
        FakeImporter { interner, calls: 0 }
    }
}

impl Importer for FakeImporter<'_> {
    fn resolve(&mut self, pool: &mut Pool, path: &str, _from: &str) -> Result<Types, ImportError> {
        self.calls += 1;
        if path != "lib/util" {
            return Err(ImportError::NotFound { path: path.into() });
        }
        let mut types = Types::new();
        let a = pool.binding(self.interner.intern("MaxSize"), crate::Idx::INT);
        let b = pool.binding(self.interner.intern("Greeting"), crate::Idx::STRING);
        types.add(pool, a);
        types.add(pool, b);
        Ok(types)
    }
}

// === Value blocks ===

#[test]
fn const_block_carries_previous_type() {
    let interner = StringInterner::new();
    let decls = vec![gen(
        GenDeclKind::Const,
        vec![
            vspec(
                &interner,
                &["A"],
                Some(ty_ident(&interner, "int")),
                vec![Expr::Ident(interner.intern("iota"))],
            ),
            vspec(&interner, &["B"], None, vec![]),
            vspec(&interner, &["C"], None, vec![]),
        ],
    )];
    let res = resolve(&interner, decls);

    assert_eq!(kind_of(&res, &interner, "A"), Some(Kind::Int));
    assert_eq!(kind_of(&res, &interner, "B"), Some(Kind::Int));
    assert_eq!(kind_of(&res, &interner, "C"), Some(Kind::Int));
    assert_eq!(res.nameds.len(), 3);
}

#[test]
fn untyped_const_inherits_value_type() {
    let interner = StringInterner::new();
    let decls = vec![gen(
        GenDeclKind::Const,
        vec![
            vspec(&interner, &["A"], None, vec![Expr::Lit(Lit::String("s".into()))]),
            vspec(&interner, &["B"], None, vec![]),
        ],
    )];
    let res = resolve(&interner, decls);

    assert_eq!(kind_of(&res, &interner, "A"), Some(Kind::String));
    assert_eq!(kind_of(&res, &interner, "B"), Some(Kind::String));
}

#[test]
fn var_block_has_no_implicit_repetition() {
    let interner = StringInterner::new();
    let decls = vec![gen(
        GenDeclKind::Var,
        vec![
            vspec(&interner, &["a"], None, vec![Expr::Lit(Lit::Int(1))]),
            vspec(&interner, &["b"], None, vec![]),
        ],
    )];
    let res = resolve(&interner, decls);

    assert_eq!(kind_of(&res, &interner, "a"), Some(Kind::Int));
    assert_eq!(kind_of(&res, &interner, "b"), None);
}

#[test]
fn explicit_type_binds_every_name_in_spec() {
    let interner = StringInterner::new();
    let decls = vec![gen(
        GenDeclKind::Var,
        vec![vspec(
            &interner,
            &["a", "b"],
            Some(ty_ident(&interner, "string")),
            vec![],
        )],
    )];
    let res = resolve(&interner, decls);

    assert_eq!(kind_of(&res, &interner, "a"), Some(Kind::String));
    assert_eq!(kind_of(&res, &interner, "b"), Some(Kind::String));
}

#[test]
fn tuple_destructuring_binds_positionally() {
    let interner = StringInterner::new();
    let decls = vec![
        func_decl(
            &interner,
            "open",
            vec![ty_ident(&interner, "int"), ty_ident(&interner, "string")],
        ),
        gen(
            GenDeclKind::Var,
            vec![vspec(&interner, &["a", "b"], None, vec![call(&interner, "open")])],
        ),
    ];
    let res = resolve(&interner, decls);

    assert_eq!(kind_of(&res, &interner, "a"), Some(Kind::Int));
    assert_eq!(kind_of(&res, &interner, "b"), Some(Kind::String));
}

#[test]
fn tuple_names_beyond_arity_stay_unbound() {
    let interner = StringInterner::new();
    let decls = vec![
        func_decl(
            &interner,
            "open",
            vec![ty_ident(&interner, "int"), ty_ident(&interner, "string")],
        ),
        gen(
            GenDeclKind::Var,
            vec![vspec(
                &interner,
                &["a", "b", "c"],
                None,
                vec![call(&interner, "open")],
            )],
        ),
    ];
    let res = resolve(&interner, decls);

    assert_eq!(kind_of(&res, &interner, "a"), Some(Kind::Int));
    assert_eq!(kind_of(&res, &interner, "b"), Some(Kind::String));
    assert_eq!(kind_of(&res, &interner, "c"), None);
    // "open" plus the two bound names.
    assert_eq!(res.nameds.len(), 3);
}

#[test]
fn tuple_blank_names_are_skipped() {
    let interner = StringInterner::new();
    let decls = vec![
        func_decl(
            &interner,
            "open",
            vec![ty_ident(&interner, "int"), ty_ident(&interner, "string")],
        ),
        gen(
            GenDeclKind::Var,
            vec![vspec(&interner, &["_", "b"], None, vec![call(&interner, "open")])],
        ),
    ];
    let res = resolve(&interner, decls);

    assert_eq!(kind_of(&res, &interner, "b"), Some(Kind::String));
    assert_eq!(res.nameds.len(), 2);
}

#[test]
fn multi_expression_spec_binds_index_for_index() {
    let interner = StringInterner::new();
    let decls = vec![gen(
        GenDeclKind::Var,
        vec![vspec(
            &interner,
            &["a", "b", "c"],
            None,
            vec![Expr::Lit(Lit::Int(1)), Expr::Lit(Lit::String("s".into()))],
        )],
    )];
    let res = resolve(&interner, decls);

    assert_eq!(kind_of(&res, &interner, "a"), Some(Kind::Int));
    assert_eq!(kind_of(&res, &interner, "b"), Some(Kind::String));
    assert_eq!(kind_of(&res, &interner, "c"), None);
}

#[test]
fn blank_names_never_enter_the_table() {
    let interner = StringInterner::new();
    let decls = vec![gen(
        GenDeclKind::Var,
        vec![
            vspec(
                &interner,
                &["_", "b"],
                None,
                vec![Expr::Lit(Lit::Int(1)), Expr::Lit(Lit::Int(2))],
            ),
            vspec(&interner, &["_"], Some(ty_ident(&interner, "int")), vec![]),
        ],
    )];
    let res = resolve(&interner, decls);

    assert_eq!(res.nameds.len(), 1);
    assert_eq!(kind_of(&res, &interner, "b"), Some(Kind::Int));
}

#[test]
fn unresolvable_value_propagates_invalid() {
    let interner = StringInterner::new();
    let decls = vec![gen(
        GenDeclKind::Var,
        vec![vspec(
            &interner,
            &["x"],
            None,
            vec![Expr::Ident(interner.intern("missing"))],
        )],
    )];
    let res = resolve(&interner, decls);

    assert_eq!(kind_of(&res, &interner, "x"), Some(Kind::Invalid));
}

// === Type blocks ===

#[test]
fn explicit_alias_is_always_alias() {
    let interner = StringInterner::new();
    let decls = vec![gen(
        GenDeclKind::Type,
        vec![
            tspec(&interner, "X", true, ty_ident(&interner, "int")),
            tspec(
                &interner,
                "S",
                true,
                TypeExpr::Struct(vec![]),
            ),
        ],
    )];
    let res = resolve(&interner, decls);

    assert_eq!(kind_of(&res, &interner, "X"), Some(Kind::Alias));
    assert_eq!(kind_of(&res, &interner, "S"), Some(Kind::Alias));
}

#[test]
fn type_definition_is_named_unless_interface() {
    let interner = StringInterner::new();
    let decls = vec![gen(
        GenDeclKind::Type,
        vec![
            tspec(&interner, "Y", false, ty_ident(&interner, "int")),
            tspec(&interner, "S", false, TypeExpr::Struct(vec![])),
            tspec(&interner, "I", false, TypeExpr::Interface(vec![])),
        ],
    )];
    let res = resolve(&interner, decls);

    assert_eq!(kind_of(&res, &interner, "Y"), Some(Kind::Named));
    assert_eq!(kind_of(&res, &interner, "S"), Some(Kind::Named));
    // Interface identity is structural; naming one still aliases it.
    assert_eq!(kind_of(&res, &interner, "I"), Some(Kind::Alias));
}

#[test]
fn interface_rule_sees_through_wrapper_chains() {
    let interner = StringInterner::new();
    let decls = vec![gen(
        GenDeclKind::Type,
        vec![
            tspec(&interner, "I", false, TypeExpr::Interface(vec![])),
            tspec(&interner, "J", false, ty_ident(&interner, "I")),
            tspec(&interner, "S", false, TypeExpr::Struct(vec![])),
            tspec(&interner, "T", false, ty_ident(&interner, "S")),
        ],
    )];
    let res = resolve(&interner, decls);

    assert_eq!(kind_of(&res, &interner, "J"), Some(Kind::Alias));
    assert_eq!(kind_of(&res, &interner, "T"), Some(Kind::Named));
}

#[test]
fn later_declarations_shadow_on_lookup_only() {
    let interner = StringInterner::new();
    let decls = vec![gen(
        GenDeclKind::Type,
        vec![
            tspec(&interner, "X", false, ty_ident(&interner, "int")),
            tspec(&interner, "X", false, ty_ident(&interner, "string")),
        ],
    )];
    let res = resolve(&interner, decls);

    let x = res.nameds.get(interner.intern("X")).unwrap();
    assert_eq!(res.pool.base_kind(x), Kind::String);
    assert_eq!(res.nameds.len(), 2);
}

// === Functions and methods ===

#[test]
fn plain_function_becomes_named_entity() {
    let interner = StringInterner::new();
    let decls = vec![func_decl(&interner, "hello", vec![ty_ident(&interner, "error")])];
    let res = resolve(&interner, decls);

    let hello = res.nameds.get(interner.intern("hello")).unwrap();
    assert_eq!(res.pool.kind(hello), Kind::Named);
    assert_eq!(res.pool.base_kind(hello), Kind::Func);
    assert!(res.methods.is_empty());
}

#[test]
fn methods_attach_to_local_receiver_including_forward_references() {
    let interner = StringInterner::new();
    let buffer = interner.intern("Buffer");
    let decls = vec![
        // Method declared before its receiver type.
        method_decl(
            &interner,
            TypeExpr::Ptr(Box::new(TypeExpr::Ident(buffer))),
            "Len",
        ),
        gen(
            GenDeclKind::Type,
            vec![tspec(&interner, "Buffer", false, TypeExpr::Struct(vec![]))],
        ),
        method_decl(&interner, TypeExpr::Ident(buffer), "Cap"),
    ];
    let res = resolve(&interner, decls);

    let methods = res.methods.get(buffer).unwrap();
    assert_eq!(methods.len(), 2);
    assert!(methods.contains(interner.intern("Len")));
    assert!(methods.contains(interner.intern("Cap")));
    // Methods are not package-level names.
    assert_eq!(res.nameds.len(), 1);
}

#[test]
fn foreign_receiver_method_is_dropped() {
    let interner = StringInterner::new();
    let decls = vec![method_decl(
        &interner,
        TypeExpr::Selector {
            pkg: interner.intern("bytes"),
            name: interner.intern("Buffer"),
        },
        "Hijack",
    )];
    let res = resolve(&interner, decls);

    assert!(res.methods.is_empty());
    assert!(res.nameds.is_empty());
}

// === Imports ===

#[test]
fn dot_import_flattens_without_duplicates() {
    let interner = StringInterner::new();
    let mut importer = FakeImporter::new(&interner);
    let file = File {
        decls: vec![
            gen(GenDeclKind::Import, vec![ispec(Some(ImportName::Dot), "lib/util")]),
            gen(GenDeclKind::Import, vec![ispec(Some(ImportName::Dot), "lib/util")]),
        ],
    };
    let res = resolve_source_with_imports(
        &interner,
        BasicEval::new(&interner),
        "unit.go",
        &mut importer,
        &file,
    );

    assert_eq!(kind_of(&res, &interner, "MaxSize"), Some(Kind::Int));
    assert_eq!(kind_of(&res, &interner, "Greeting"), Some(Kind::String));
    // Flattened members only, inserted once.
    assert_eq!(res.nameds.len(), 2);
    // The memo kept the importer to a single resolution request.
    assert_eq!(importer.calls, 1);
}

#[test]
fn blank_import_adds_nothing() {
    let interner = StringInterner::new();
    let mut importer = FakeImporter::new(&interner);
    let file = File {
        decls: vec![gen(
            GenDeclKind::Import,
            vec![ispec(Some(ImportName::Blank), "lib/util")],
        )],
    };
    let res = resolve_source_with_imports(
        &interner,
        BasicEval::new(&interner),
        "unit.go",
        &mut importer,
        &file,
    );

    assert!(res.nameds.is_empty());
}

#[test]
fn plain_import_is_named_by_path_convention() {
    let interner = StringInterner::new();
    let mut importer = FakeImporter::new(&interner);
    let file = File {
        decls: vec![gen(GenDeclKind::Import, vec![ispec(None, "lib/util")])],
    };
    let res = resolve_source_with_imports(
        &interner,
        BasicEval::new(&interner),
        "unit.go",
        &mut importer,
        &file,
    );

    let util = res.nameds.get(interner.intern("util")).unwrap();
    assert_eq!(res.pool.kind(util), Kind::Pkg);
    let path = res.pool.import_path(util).unwrap();
    assert_eq!(interner.resolve(path).as_deref(), Some("lib/util"));
    assert_eq!(res.pool.num_child(util), 2);
}

#[test]
fn aliased_import_uses_the_alias() {
    let interner = StringInterner::new();
    let mut importer = FakeImporter::new(&interner);
    let file = File {
        decls: vec![gen(
            GenDeclKind::Import,
            vec![ispec(Some(ImportName::Name(interner.intern("u"))), "lib/util")],
        )],
    };
    let res = resolve_source_with_imports(
        &interner,
        BasicEval::new(&interner),
        "unit.go",
        &mut importer,
        &file,
    );

    assert_eq!(kind_of(&res, &interner, "u"), Some(Kind::Pkg));
    assert_eq!(res.nameds.get(interner.intern("util")), None);
}

#[test]
fn unresolvable_import_is_skipped() {
    let interner = StringInterner::new();
    let mut importer = FakeImporter::new(&interner);
    let file = File {
        decls: vec![gen(GenDeclKind::Import, vec![ispec(None, "lib/absent")])],
    };
    let res = resolve_source_with_imports(
        &interner,
        BasicEval::new(&interner),
        "unit.go",
        &mut importer,
        &file,
    );

    assert!(res.nameds.is_empty());
}

#[test]
fn malformed_import_path_is_skipped() {
    let interner = StringInterner::new();
    let mut importer = FakeImporter::new(&interner);
    let file = File {
        decls: vec![gen(
            GenDeclKind::Import,
            vec![Spec::Import(ImportSpec {
                name: None,
                path: StringLit::new("\"unterminated", Span::DUMMY),
                span: Span::DUMMY,
            })],
        )],
    };
    let res = resolve_source_with_imports(
        &interner,
        BasicEval::new(&interner),
        "unit.go",
        &mut importer,
        &file,
    );

    assert!(res.nameds.is_empty());
    assert_eq!(importer.calls, 0);
}

#[test]
fn imports_are_inert_without_an_importer() {
    let interner = StringInterner::new();
    let decls = vec![gen(GenDeclKind::Import, vec![ispec(None, "lib/util")])];
    let res = resolve(&interner, decls);

    assert!(res.nameds.is_empty());
}

// === Structure and determinism ===

#[test]
fn bad_declarations_and_specs_are_skipped() {
    let interner = StringInterner::new();
    let decls = vec![
        Decl::Bad(Span::DUMMY),
        gen(
            GenDeclKind::Type,
            vec![
                Spec::Bad(Span::DUMMY),
                // Wrong spec shape for the block.
                vspec(&interner, &["x"], None, vec![Expr::Lit(Lit::Int(1))]),
                tspec(&interner, "T", false, ty_ident(&interner, "int")),
            ],
        ),
        gen(
            GenDeclKind::Var,
            vec![
                Spec::Bad(Span::DUMMY),
                vspec(&interner, &["y"], None, vec![Expr::Lit(Lit::Int(2))]),
            ],
        ),
    ];
    let res = resolve(&interner, decls);

    assert_eq!(kind_of(&res, &interner, "T"), Some(Kind::Named));
    assert_eq!(kind_of(&res, &interner, "y"), Some(Kind::Int));
    assert_eq!(kind_of(&res, &interner, "x"), None);
    assert_eq!(res.nameds.len(), 2);
}

#[test]
fn resolving_twice_yields_equal_tables() {
    let interner = StringInterner::new();
    let file = File {
        decls: vec![
            gen(
                GenDeclKind::Type,
                vec![
                    tspec(&interner, "I", false, TypeExpr::Interface(vec![InterfaceElem::Method {
                        name: interner.intern("Close"),
                        sig: Signature {
                            params: vec![],
                            results: vec![Param {
                                name: None,
                                ty: ty_ident(&interner, "error"),
                            }],
                        },
                    }])),
                    tspec(&interner, "Buffer", false, TypeExpr::Struct(vec![])),
                ],
            ),
            method_decl(&interner, ty_ident(&interner, "Buffer"), "Len"),
            func_decl(&interner, "hello", vec![ty_ident(&interner, "error")]),
            gen(
                GenDeclKind::Const,
                vec![
                    vspec(&interner, &["A"], Some(ty_ident(&interner, "int")), vec![]),
                    vspec(&interner, &["B"], None, vec![]),
                ],
            ),
        ],
    };

    let first = resolve_source(&interner, BasicEval::new(&interner), "unit.go", &file);
    let second = resolve_source(&interner, BasicEval::new(&interner), "unit.go", &file);

    assert_eq!(first.nameds, second.nameds);
    assert_eq!(first.methods, second.methods);
    for (a, b) in first.nameds.iter().zip(second.nameds.iter()) {
        assert_eq!(first.pool.kind(a), second.pool.kind(b));
        assert_eq!(first.pool.name(a), second.pool.name(b));
        assert_eq!(first.pool.num_child(a), second.pool.num_child(b));
    }
}

#[test]
fn package_files_resolve_through_one_scope() {
    let interner = StringInterner::new();
    let buffer = interner.intern("Buffer");
    let package = Package {
        files: vec![
            File {
                decls: vec![gen(
                    GenDeclKind::Type,
                    vec![tspec(&interner, "Buffer", false, TypeExpr::Struct(vec![]))],
                )],
            },
            File {
                decls: vec![
                    method_decl(&interner, TypeExpr::Ident(buffer), "Len"),
                    gen(
                        GenDeclKind::Var,
                        vec![vspec(
                            &interner,
                            &["buf"],
                            Some(TypeExpr::Ident(buffer)),
                            vec![],
                        )],
                    ),
                ],
            },
        ],
    };
    let res = resolve_package(&interner, BasicEval::new(&interner), "pkg", &package);

    assert_eq!(res.methods.get(buffer).map(Types::len), Some(1));
    let buf = res.nameds.get(interner.intern("buf")).unwrap();
    assert_eq!(res.pool.base_kind(buf), Kind::Struct);
}
