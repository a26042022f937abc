//! Const and var block resolution.
//!
//! Specs are processed top to bottom, left to right, with one piece of
//! state carried between iterations: the previous spec's value type. A
//! const spec with neither type nor values inherits it; that is the
//! implicit repetition of sequential constant groups.

use gosem_ir::{GenDecl, GenDeclKind, Spec, ValueSpec};

use crate::{Idx, Kind, TypeEval};

use super::SourceResolver;

impl<E: TypeEval> SourceResolver<'_, E> {
    /// Resolve a const or var declaration block.
    pub(super) fn resolve_value_block(&mut self, gen: &GenDecl) {
        let mut prev = Idx::NONE;
        let mut val = Idx::NONE;
        for spec in &gen.specs {
            prev = val;
            let Spec::Value(s) = spec else {
                tracing::trace!("skipping non-value spec in value block");
                continue;
            };
            val = Idx::NONE;

            if let Some(ty) = &s.ty {
                // Explicit type: every name in the spec gets it.
                val = self.eval.eval_type(&mut self.pool, &self.nameds, ty);
            } else {
                match s.values.len() {
                    0 => {
                        // Implicit repetition, const blocks only.
                        if gen.kind == GenDeclKind::Const {
                            val = prev;
                        }
                    }
                    1 => {
                        val = self.eval.eval_expr(&mut self.pool, &self.nameds, &s.values[0]);
                        if self.pool.kind(val) == Kind::Tuple {
                            self.bind_tuple(s, val);
                            continue;
                        }
                    }
                    _ => {
                        self.bind_positional(s);
                        continue;
                    }
                }
            }

            if val.is_none() {
                continue;
            }
            for &name in &s.names {
                if name.is_blank() {
                    continue;
                }
                let entity = self.pool.binding(name, val);
                self.nameds.add(&self.pool, entity);
            }
        }
    }

    /// Destructure one multi-value expression positionally.
    ///
    /// The i-th name binds to the i-th tuple component; names beyond the
    /// tuple's arity stay unbound, blank names are skipped.
    fn bind_tuple(&mut self, s: &ValueSpec, tuple: Idx) {
        let arity = self.pool.num_child(tuple);
        for (i, &name) in s.names.iter().enumerate() {
            if name.is_blank() {
                continue;
            }
            if i >= arity {
                break;
            }
            let component = self.pool.child(tuple, i);
            let entity = self.pool.binding(name, component);
            self.nameds.add(&self.pool, entity);
        }
    }

    /// Bind names to expressions index for index.
    ///
    /// Bounded by the expression count; blank names are skipped.
    fn bind_positional(&mut self, s: &ValueSpec) {
        let count = s.values.len();
        for (i, &name) in s.names.iter().enumerate() {
            if name.is_blank() {
                continue;
            }
            if i >= count {
                break;
            }
            let ty = self.eval.eval_expr(&mut self.pool, &self.nameds, &s.values[i]);
            let entity = self.pool.binding(name, ty);
            self.nameds.add(&self.pool, entity);
        }
    }
}
