//! Entity handle.
//!
//! `Idx` is the canonical reference to a type entity. All entities of one
//! resolution pass live in a [`Pool`](crate::Pool) and are referenced by
//! their 32-bit index; identity comparison is O(1) index equality.
//!
//! The `Invalid` placeholder and the predeclared types are pre-interned at
//! fixed indices so the evaluator resolves them without touching the pool.

use std::fmt;

use crate::Kind;

/// A 32-bit index into the entity pool.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct Idx(u32);

impl Idx {
    // === Pre-interned entities (0-20) ===
    // Index values line up with the Kind tag of each predeclared type.

    /// The `Invalid` placeholder entity.
    pub const INVALID: Self = Self(0);
    pub const BOOL: Self = Self(Kind::Bool as u32);
    pub const INT: Self = Self(Kind::Int as u32);
    pub const INT8: Self = Self(Kind::Int8 as u32);
    pub const INT16: Self = Self(Kind::Int16 as u32);
    pub const INT32: Self = Self(Kind::Int32 as u32);
    pub const INT64: Self = Self(Kind::Int64 as u32);
    pub const UINT: Self = Self(Kind::Uint as u32);
    pub const UINT8: Self = Self(Kind::Uint8 as u32);
    pub const UINT16: Self = Self(Kind::Uint16 as u32);
    pub const UINT32: Self = Self(Kind::Uint32 as u32);
    pub const UINT64: Self = Self(Kind::Uint64 as u32);
    pub const UINTPTR: Self = Self(Kind::Uintptr as u32);
    pub const FLOAT32: Self = Self(Kind::Float32 as u32);
    pub const FLOAT64: Self = Self(Kind::Float64 as u32);
    pub const COMPLEX64: Self = Self(Kind::Complex64 as u32);
    pub const COMPLEX128: Self = Self(Kind::Complex128 as u32);
    pub const STRING: Self = Self(Kind::String as u32);
    pub const BYTES: Self = Self(Kind::Bytes as u32);
    pub const RUNE: Self = Self(Kind::Rune as u32);
    pub const ERROR: Self = Self(Kind::Error as u32);

    /// Number of pre-interned entities (`Invalid` plus the predeclared set).
    pub const PRE_INTERNED: u32 = 21;

    /// Sentinel value indicating no entity.
    pub const NONE: Self = Self(u32::MAX);

    /// Create an index from a raw u32 value.
    ///
    /// The caller must ensure the index is valid in its pool.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Get the raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Check if this is a pre-interned entity (`Invalid` or predeclared).
    #[inline]
    pub const fn is_pre_interned(self) -> bool {
        self.0 < Self::PRE_INTERNED
    }

    /// Check if this is the NONE sentinel.
    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }

    /// Check if this is the `Invalid` placeholder.
    #[inline]
    pub const fn is_invalid(self) -> bool {
        self.0 == Self::INVALID.0
    }
}

impl fmt::Debug for Idx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::NONE => write!(f, "Idx::NONE"),
            Self::INVALID => write!(f, "Idx::INVALID"),
            _ => write!(f, "Idx({})", self.0),
        }
    }
}

// Compile-time size assertion: Idx must be exactly 4 bytes
const _: () = assert!(std::mem::size_of::<Idx>() == 4);
