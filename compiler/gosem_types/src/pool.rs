//! Entity pool: arena storage for type entities.
//!
//! All entities of one resolution pass are allocated here and referenced by
//! [`Idx`] handles. Entities are immutable once constructed (resolution
//! only appends, never rewrites), so handles can be shared freely: a struct
//! type referenced by several named wrappers is stored once.
//!
//! Each entity carries a [`Kind`], an optional declared name, an optional
//! underlying entity, an ordered child list, and one kind-dependent `data`
//! word (array length, function parameter count, channel direction, import
//! path).

use gosem_ir::{ChanDir, Name, StringInterner};
use smallvec::SmallVec;

use crate::{Idx, Kind};

/// One stored entity.
///
/// The `underlying` of a constructed entity always precedes it in the pool,
/// so wrapper chains cannot form cycles.
struct Entity {
    kind: Kind,
    /// Declared name; `Name::EMPTY` when anonymous.
    name: Name,
    /// Underlying entity for wrappers and bindings; `Idx::NONE` otherwise.
    underlying: Idx,
    /// Ordered children: struct fields, params then results, tuple
    /// components, package members.
    children: SmallVec<[Idx; 4]>,
    /// Kind-dependent payload.
    data: u32,
}

impl Entity {
    fn leaf(kind: Kind) -> Self {
        Entity {
            kind,
            name: Name::EMPTY,
            underlying: Idx::NONE,
            children: SmallVec::new(),
            data: 0,
        }
    }
}

/// Append-only arena of type entities.
///
/// A fresh pool starts with the `Invalid` placeholder at index 0 and the
/// predeclared types at their fixed indices (see [`Idx`]).
pub struct Pool {
    entities: Vec<Entity>,
}

/// Predeclared kinds in pre-intern order; position 0 is `Invalid`.
const PRE_INTERNED_KINDS: [Kind; Idx::PRE_INTERNED as usize] = [
    Kind::Invalid,
    Kind::Bool,
    Kind::Int,
    Kind::Int8,
    Kind::Int16,
    Kind::Int32,
    Kind::Int64,
    Kind::Uint,
    Kind::Uint8,
    Kind::Uint16,
    Kind::Uint32,
    Kind::Uint64,
    Kind::Uintptr,
    Kind::Float32,
    Kind::Float64,
    Kind::Complex64,
    Kind::Complex128,
    Kind::String,
    Kind::Bytes,
    Kind::Rune,
    Kind::Error,
];

impl Pool {
    /// Create a pool with the pre-interned entities in place.
    pub fn new() -> Self {
        let entities = PRE_INTERNED_KINDS.iter().map(|&k| Entity::leaf(k)).collect();
        Pool { entities }
    }

    /// Fixed handle for a predeclared kind, if the kind is predeclared.
    pub fn predeclared(kind: Kind) -> Option<Idx> {
        kind.is_predeclared().then_some(Idx::from_raw(kind as u32))
    }

    /// Number of entities, pre-interned included.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        // The pre-interned entities are always present.
        false
    }

    fn entity(&self, idx: Idx) -> Option<&Entity> {
        if idx.is_none() {
            return None;
        }
        self.entities.get(idx.raw() as usize)
    }

    fn push(&mut self, entity: Entity) -> Idx {
        let idx = Idx::from_raw(self.entities.len() as u32);
        self.entities.push(entity);
        idx
    }

    // === Accessors ===

    /// Kind of an entity. Out-of-pool handles report `Invalid`.
    pub fn kind(&self, idx: Idx) -> Kind {
        self.entity(idx).map_or(Kind::Invalid, |e| e.kind)
    }

    /// Declared name of an entity, if any.
    pub fn name(&self, idx: Idx) -> Option<Name> {
        let e = self.entity(idx)?;
        (e.name != Name::EMPTY).then_some(e.name)
    }

    /// Underlying entity of a wrapper or binding.
    pub fn underlying(&self, idx: Idx) -> Idx {
        self.entity(idx).map_or(Idx::NONE, |e| e.underlying)
    }

    /// Chase wrapper and binding chains to the entity that carries the
    /// actual shape.
    ///
    /// Terminates because an `underlying` always precedes its wrapper.
    pub fn base(&self, idx: Idx) -> Idx {
        let mut cur = idx;
        while let Some(e) = self.entity(cur) {
            if e.children.is_empty() && !e.underlying.is_none() {
                cur = e.underlying;
            } else {
                break;
            }
        }
        cur
    }

    /// Kind of the entity at the end of the wrapper chain.
    ///
    /// The Alias/Named decision rule uses this so that a name whose chain
    /// ends in an interface is recognized as denoting one.
    pub fn base_kind(&self, idx: Idx) -> Kind {
        self.kind(self.base(idx))
    }

    /// Number of children, delegating through wrappers and bindings.
    pub fn num_child(&self, idx: Idx) -> usize {
        self.entity(self.base(idx)).map_or(0, |e| e.children.len())
    }

    /// The i-th child, delegating through wrappers and bindings.
    /// Out-of-range positions report `Idx::NONE`.
    pub fn child(&self, idx: Idx, i: usize) -> Idx {
        self.entity(self.base(idx))
            .and_then(|e| e.children.get(i).copied())
            .unwrap_or(Idx::NONE)
    }

    /// Look up a child entity by declared name.
    pub fn child_named(&self, idx: Idx, name: Name) -> Option<Idx> {
        let e = self.entity(self.base(idx))?;
        e.children
            .iter()
            .copied()
            .find(|&c| self.entity(c).is_some_and(|ce| ce.name == name))
    }

    /// Declared array length; `None` unless the entity is an array.
    pub fn array_len(&self, idx: Idx) -> Option<u32> {
        let e = self.entity(idx)?;
        (e.kind == Kind::Array).then_some(e.data)
    }

    /// Parameter count of a function entity's child list.
    pub fn param_count(&self, idx: Idx) -> Option<usize> {
        let e = self.entity(self.base(idx))?;
        (e.kind == Kind::Func).then_some(e.data as usize)
    }

    /// Channel direction; `None` unless the entity is a channel.
    pub fn chan_dir(&self, idx: Idx) -> Option<ChanDir> {
        let e = self.entity(idx)?;
        if e.kind != Kind::Chan {
            return None;
        }
        match e.data {
            1 => Some(ChanDir::Send),
            2 => Some(ChanDir::Recv),
            _ => Some(ChanDir::Both),
        }
    }

    /// Import path of a package entity.
    pub fn import_path(&self, idx: Idx) -> Option<Name> {
        let e = self.entity(idx)?;
        (e.kind == Kind::Pkg).then_some(Name::from_raw(e.data))
    }

    // === Constructors ===

    /// Pointer type `*elem`.
    pub fn ptr(&mut self, elem: Idx) -> Idx {
        self.push(Entity {
            children: SmallVec::from_slice(&[elem]),
            ..Entity::leaf(Kind::Ptr)
        })
    }

    /// Slice type `[]elem`.
    pub fn slice(&mut self, elem: Idx) -> Idx {
        self.push(Entity {
            children: SmallVec::from_slice(&[elem]),
            ..Entity::leaf(Kind::Slice)
        })
    }

    /// Array type `[len]elem`. Length 0 stands for an unresolved length.
    pub fn array(&mut self, elem: Idx, len: u32) -> Idx {
        self.push(Entity {
            children: SmallVec::from_slice(&[elem]),
            data: len,
            ..Entity::leaf(Kind::Array)
        })
    }

    /// Channel type `chan elem` with a direction.
    pub fn chan(&mut self, dir: ChanDir, elem: Idx) -> Idx {
        let data = match dir {
            ChanDir::Both => 0,
            ChanDir::Send => 1,
            ChanDir::Recv => 2,
        };
        self.push(Entity {
            children: SmallVec::from_slice(&[elem]),
            data,
            ..Entity::leaf(Kind::Chan)
        })
    }

    /// Map type `map[key]value`.
    pub fn map_type(&mut self, key: Idx, value: Idx) -> Idx {
        self.push(Entity {
            children: SmallVec::from_slice(&[key, value]),
            ..Entity::leaf(Kind::Map)
        })
    }

    /// Function type. Children are the parameters followed by the results;
    /// the parameter count is kept in the data word.
    pub fn func_type(&mut self, params: &[Idx], results: &[Idx]) -> Idx {
        let mut children = SmallVec::with_capacity(params.len() + results.len());
        children.extend_from_slice(params);
        children.extend_from_slice(results);
        self.push(Entity {
            children,
            data: params.len() as u32,
            ..Entity::leaf(Kind::Func)
        })
    }

    /// Result slice of a function entity.
    pub fn func_results(&self, idx: Idx) -> &[Idx] {
        let base = self.base(idx);
        match self.entity(base) {
            Some(e) if e.kind == Kind::Func => &e.children[e.data as usize..],
            _ => &[],
        }
    }

    /// Struct type from field entities (bindings, in declaration order).
    pub fn struct_type(&mut self, fields: &[Idx]) -> Idx {
        self.push(Entity {
            children: SmallVec::from_slice(fields),
            ..Entity::leaf(Kind::Struct)
        })
    }

    /// Interface type from method entities and embedded interfaces.
    pub fn interface_type(&mut self, elems: &[Idx]) -> Idx {
        self.push(Entity {
            children: SmallVec::from_slice(elems),
            ..Entity::leaf(Kind::Interface)
        })
    }

    /// Multi-value result. Consumed only by positional destructuring.
    pub fn tuple(&mut self, components: &[Idx]) -> Idx {
        self.push(Entity {
            children: SmallVec::from_slice(components),
            ..Entity::leaf(Kind::Tuple)
        })
    }

    /// Nominally distinct declared type over an underlying entity.
    pub fn named(&mut self, name: Name, underlying: Idx) -> Idx {
        self.push(Entity {
            name,
            underlying,
            ..Entity::leaf(Kind::Named)
        })
    }

    /// Transparent declared name over an underlying entity.
    pub fn alias(&mut self, name: Name, underlying: Idx) -> Idx {
        self.push(Entity {
            name,
            underlying,
            ..Entity::leaf(Kind::Alias)
        })
    }

    /// Declared value binding (var, const, field, interface method).
    ///
    /// The binding reports the kind of the bound type, `Invalid` included:
    /// an unresolved right-hand side flows into the tables unchanged and
    /// surfaces when the consumer queries the kind.
    pub fn binding(&mut self, name: Name, ty: Idx) -> Idx {
        let kind = self.kind(ty);
        self.push(Entity {
            kind,
            name,
            underlying: ty,
            children: SmallVec::new(),
            data: 0,
        })
    }

    /// Imported package scope with its member entities.
    pub fn package(&mut self, name: Name, path: Name, members: &[Idx]) -> Idx {
        self.push(Entity {
            name,
            children: SmallVec::from_slice(members),
            data: path.raw(),
            ..Entity::leaf(Kind::Pkg)
        })
    }

    // === Rendering ===

    /// Render an entity for diagnostics and tests.
    pub fn display(&self, idx: Idx, interner: &StringInterner) -> String {
        let mut out = String::new();
        self.render(idx, interner, &mut out, 0);
        out
    }

    fn render(&self, idx: Idx, interner: &StringInterner, out: &mut String, depth: usize) {
        // Depth cap keeps pathological nesting readable.
        if depth > 8 {
            out.push_str("...");
            return;
        }
        let Some(e) = self.entity(idx) else {
            out.push_str("<none>");
            return;
        };
        if e.name != Name::EMPTY {
            let name = interner.resolve(e.name).unwrap_or_else(|| "?".into());
            if e.kind == Kind::Pkg {
                out.push_str("package ");
            }
            out.push_str(&name);
            return;
        }
        match e.kind {
            k if k.is_predeclared() || k == Kind::Invalid => out.push_str(k.name()),
            Kind::Ptr => {
                out.push('*');
                self.render(e.children[0], interner, out, depth + 1);
            }
            Kind::Slice => {
                out.push_str("[]");
                self.render(e.children[0], interner, out, depth + 1);
            }
            Kind::Array => {
                out.push_str(&format!("[{}]", e.data));
                self.render(e.children[0], interner, out, depth + 1);
            }
            Kind::Map => {
                out.push_str("map[");
                self.render(e.children[0], interner, out, depth + 1);
                out.push(']');
                self.render(e.children[1], interner, out, depth + 1);
            }
            Kind::Chan => {
                out.push_str(match e.data {
                    1 => "chan<- ",
                    2 => "<-chan ",
                    _ => "chan ",
                });
                self.render(e.children[0], interner, out, depth + 1);
            }
            Kind::Func => {
                out.push_str("func(");
                let split = e.data as usize;
                for (i, &p) in e.children[..split].iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    self.render(p, interner, out, depth + 1);
                }
                out.push(')');
                let results = &e.children[split..];
                if results.len() == 1 {
                    out.push(' ');
                    self.render(results[0], interner, out, depth + 1);
                } else if results.len() > 1 {
                    out.push_str(" (");
                    for (i, &r) in results.iter().enumerate() {
                        if i > 0 {
                            out.push_str(", ");
                        }
                        self.render(r, interner, out, depth + 1);
                    }
                    out.push(')');
                }
            }
            Kind::Struct => {
                out.push_str(&format!("struct{{{} fields}}", e.children.len()));
            }
            Kind::Interface => {
                out.push_str(&format!("interface{{{} methods}}", e.children.len()));
            }
            Kind::Tuple => {
                out.push('(');
                for (i, &c) in e.children.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    self.render(c, interner, out, depth + 1);
                }
                out.push(')');
            }
            k => out.push_str(k.name()),
        }
    }
}

impl Default for Pool {
    fn default() -> Self {
        Self::new()
    }
}
