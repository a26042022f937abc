//! Expression-type evaluation capability.
//!
//! The resolver never inspects expression shapes itself; it hands type
//! expressions and value expressions to a [`TypeEval`] collaborator and
//! consumes the returned handles. A failed evaluation returns
//! [`Idx::INVALID`], which flows into the tables like any other entity.
//!
//! [`BasicEval`] is the bundled structural implementation: it resolves
//! predeclared names, looks declared names up in the scope built so far,
//! and constructs composite shapes recursively. Constant arithmetic and
//! conversion rules beyond that are out of scope; embedders with a full
//! constant evaluator supply their own `TypeEval`.

use gosem_ir::{Expr, Lit, Name, Param, Signature, StringInterner, TypeExpr, UnaryOp};
use rustc_hash::FxHashMap;

use crate::{Idx, Kind, Pool, Types};

/// Expression-type evaluator collaborator.
///
/// Implementations read prior entries from `scope` and allocate into
/// `pool`; they never mutate `scope`, so resolution stays re-entrancy safe.
pub trait TypeEval {
    /// Resolve a type expression. Returns [`Idx::INVALID`] on failure.
    fn eval_type(&mut self, pool: &mut Pool, scope: &Types, ty: &TypeExpr) -> Idx;

    /// Resolve the type of a value expression. Returns [`Idx::INVALID`] on
    /// failure; a multi-value result is a `Tuple` entity.
    fn eval_expr(&mut self, pool: &mut Pool, scope: &Types, expr: &Expr) -> Idx;

    /// Resolve a function signature into a `Func` entity.
    fn eval_signature(&mut self, pool: &mut Pool, scope: &Types, sig: &Signature) -> Idx {
        self.eval_type(pool, scope, &TypeExpr::Func(Box::new(sig.clone())))
    }
}

/// Structural evaluator over the declaration scope.
pub struct BasicEval {
    /// Predeclared type names at their fixed handles.
    predeclared: FxHashMap<Name, Idx>,
    iota: Name,
}

impl BasicEval {
    pub fn new(interner: &StringInterner) -> Self {
        let mut predeclared = FxHashMap::default();
        let fixed: [(&str, Idx); 20] = [
            ("bool", Idx::BOOL),
            ("int", Idx::INT),
            ("int8", Idx::INT8),
            ("int16", Idx::INT16),
            ("int32", Idx::INT32),
            ("int64", Idx::INT64),
            ("uint", Idx::UINT),
            ("uint8", Idx::UINT8),
            ("uint16", Idx::UINT16),
            ("uint32", Idx::UINT32),
            ("uint64", Idx::UINT64),
            ("uintptr", Idx::UINTPTR),
            ("float32", Idx::FLOAT32),
            ("float64", Idx::FLOAT64),
            ("complex64", Idx::COMPLEX64),
            ("complex128", Idx::COMPLEX128),
            ("string", Idx::STRING),
            ("error", Idx::ERROR),
            // Spelled alias of uint8.
            ("byte", Idx::UINT8),
            ("rune", Idx::RUNE),
        ];
        for (name, idx) in fixed {
            predeclared.insert(interner.intern(name), idx);
        }
        BasicEval {
            predeclared,
            iota: interner.intern("iota"),
        }
    }

    fn signature(&mut self, pool: &mut Pool, scope: &Types, sig: &Signature) -> Idx {
        let params = self.param_list(pool, scope, &sig.params);
        let results = self.param_list(pool, scope, &sig.results);
        pool.func_type(&params, &results)
    }

    fn param_list(&mut self, pool: &mut Pool, scope: &Types, params: &[Param]) -> Vec<Idx> {
        params
            .iter()
            .map(|p| {
                let ty = self.eval_type(pool, scope, &p.ty);
                match p.name {
                    Some(name) if !name.is_blank() => pool.binding(name, ty),
                    _ => ty,
                }
            })
            .collect()
    }
}

/// Base identifier of a type expression, for embedded-field naming.
fn embedded_name(ty: &TypeExpr) -> Name {
    match ty {
        TypeExpr::Ident(name) => *name,
        TypeExpr::Selector { name, .. } => *name,
        TypeExpr::Ptr(inner) | TypeExpr::Paren(inner) => embedded_name(inner),
        _ => Name::EMPTY,
    }
}

/// Constant array length, when it is a plain integer literal.
fn literal_len(expr: &Expr) -> u32 {
    match expr {
        Expr::Lit(Lit::Int(n)) => u32::try_from(*n).unwrap_or(0),
        Expr::Paren(inner) => literal_len(inner),
        _ => 0,
    }
}

impl TypeEval for BasicEval {
    fn eval_type(&mut self, pool: &mut Pool, scope: &Types, ty: &TypeExpr) -> Idx {
        match ty {
            TypeExpr::Ident(name) => {
                if let Some(&idx) = self.predeclared.get(name) {
                    return idx;
                }
                scope.get(*name).unwrap_or(Idx::INVALID)
            }
            TypeExpr::Selector { pkg, name } => {
                let Some(p) = scope.get(*pkg) else {
                    return Idx::INVALID;
                };
                if pool.kind(p) != Kind::Pkg {
                    return Idx::INVALID;
                }
                pool.child_named(p, *name).unwrap_or(Idx::INVALID)
            }
            TypeExpr::Ptr(inner) => {
                let elem = self.eval_type(pool, scope, inner);
                pool.ptr(elem)
            }
            TypeExpr::Slice(inner) => {
                let elem = self.eval_type(pool, scope, inner);
                pool.slice(elem)
            }
            TypeExpr::Array { len, elem } => {
                let elem = self.eval_type(pool, scope, elem);
                let len = len.as_deref().map_or(0, literal_len);
                pool.array(elem, len)
            }
            TypeExpr::Map { key, value } => {
                let key = self.eval_type(pool, scope, key);
                let value = self.eval_type(pool, scope, value);
                pool.map_type(key, value)
            }
            TypeExpr::Chan { dir, elem } => {
                let elem = self.eval_type(pool, scope, elem);
                pool.chan(*dir, elem)
            }
            TypeExpr::Func(sig) => self.signature(pool, scope, sig),
            TypeExpr::Struct(fields) => {
                let children: Vec<Idx> = fields
                    .iter()
                    .map(|f| {
                        let ty = self.eval_type(pool, scope, &f.ty);
                        let name = f.name.unwrap_or_else(|| embedded_name(&f.ty));
                        pool.binding(name, ty)
                    })
                    .collect();
                pool.struct_type(&children)
            }
            TypeExpr::Interface(elems) => {
                let children: Vec<Idx> = elems
                    .iter()
                    .map(|elem| match elem {
                        gosem_ir::InterfaceElem::Method { name, sig } => {
                            let sig = self.signature(pool, scope, sig);
                            pool.binding(*name, sig)
                        }
                        gosem_ir::InterfaceElem::Embedded(ty) => self.eval_type(pool, scope, ty),
                    })
                    .collect();
                pool.interface_type(&children)
            }
            TypeExpr::Paren(inner) => self.eval_type(pool, scope, inner),
        }
    }

    fn eval_expr(&mut self, pool: &mut Pool, scope: &Types, expr: &Expr) -> Idx {
        match expr {
            Expr::Lit(lit) => match lit {
                Lit::Int(_) => Idx::INT,
                Lit::Float(_) => Idx::FLOAT64,
                Lit::Imag(_) => Idx::COMPLEX128,
                Lit::Rune(_) => Idx::RUNE,
                Lit::String(_) => Idx::STRING,
                Lit::Bool(_) => Idx::BOOL,
            },
            Expr::Ident(name) => {
                if *name == self.iota {
                    return Idx::INT;
                }
                scope.get(*name).unwrap_or(Idx::INVALID)
            }
            Expr::Selector { expr, name } => {
                let value = self.eval_expr(pool, scope, expr);
                let base = pool.base(value);
                match pool.kind(base) {
                    Kind::Pkg | Kind::Struct => {
                        pool.child_named(base, *name).unwrap_or(Idx::INVALID)
                    }
                    _ => Idx::INVALID,
                }
            }
            Expr::Call { func, .. } => {
                let callee = self.eval_expr(pool, scope, func);
                let base = pool.base(callee);
                if pool.kind(base) == Kind::Func {
                    let results = pool.func_results(base).to_vec();
                    return match results.as_slice() {
                        [] => Idx::INVALID,
                        [single] => *single,
                        many => pool.tuple(many),
                    };
                }
                // Not a function: a call of a type entity is a conversion.
                callee
            }
            Expr::Unary { op, expr } => match op {
                UnaryOp::Neg | UnaryOp::Not => self.eval_expr(pool, scope, expr),
                UnaryOp::Addr => {
                    let inner = self.eval_expr(pool, scope, expr);
                    pool.ptr(inner)
                }
                UnaryOp::Deref => {
                    let inner = self.eval_expr(pool, scope, expr);
                    let base = pool.base(inner);
                    if pool.kind(base) == Kind::Ptr {
                        pool.child(base, 0)
                    } else {
                        Idx::INVALID
                    }
                }
            },
            Expr::Binary { op, lhs, rhs } => {
                if op.is_comparison_or_logic() {
                    return Idx::BOOL;
                }
                let l = self.eval_expr(pool, scope, lhs);
                if !l.is_invalid() {
                    return l;
                }
                self.eval_expr(pool, scope, rhs)
            }
            Expr::Paren(inner) => self.eval_expr(pool, scope, inner),
        }
    }

    fn eval_signature(&mut self, pool: &mut Pool, scope: &Types, sig: &Signature) -> Idx {
        self.signature(pool, scope, sig)
    }
}
