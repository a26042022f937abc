//! Type kind discriminant.
//!
//! Every entity in the pool reports exactly one `Kind`. The tag space is
//! partitioned into semantic ranges:
//!
//! - 0: the `Invalid` placeholder
//! - 1-20: predeclared types (bounded by the sentinel constants)
//! - 32-39: composite types
//! - 64-65: declared-name wrappers (alias, named)
//! - 240-255: special internal shapes (tuple results, package scopes)
//!
//! `Invalid` marks unresolved or erroneous results; it never appears in a
//! successfully completed symbol table.

use std::fmt;

/// Type kind discriminant (u8).
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Kind {
    /// Unresolved or erroneous result.
    Invalid = 0,

    // === Predeclared types (1-20) ===
    /// Boolean.
    Bool = 1,
    /// Platform-width signed integer.
    Int = 2,
    Int8 = 3,
    Int16 = 4,
    Int32 = 5,
    Int64 = 6,
    /// Platform-width unsigned integer.
    Uint = 7,
    Uint8 = 8,
    Uint16 = 9,
    Uint32 = 10,
    Uint64 = 11,
    /// Pointer-width unsigned integer.
    Uintptr = 12,
    Float32 = 13,
    Float64 = 14,
    Complex64 = 15,
    Complex128 = 16,
    /// UTF-8 string.
    String = 17,
    /// Byte sequence.
    Bytes = 18,
    /// Unicode code point.
    Rune = 19,
    /// The predeclared error interface.
    Error = 20,

    // Reserved: 21-31

    // === Composite types (32-39) ===
    Array = 32,
    Chan = 33,
    Func = 34,
    Interface = 35,
    Map = 36,
    Ptr = 37,
    Slice = 38,
    Struct = 39,

    // Reserved: 40-63

    // === Declared-name wrappers (64-65) ===
    /// Transparent name for its underlying type; no new identity.
    Alias = 64,
    /// Nominally distinct declared type; methods may attach to it.
    Named = 65,

    // === Special (240-255) ===
    /// Multi-value expression result, consumed only positionally.
    Tuple = 240,
    /// Imported package scope.
    Pkg = 241,
}

impl Kind {
    /// First tag of the predeclared partition.
    pub const PREDECLARED_FIRST: u8 = Kind::Bool as u8;
    /// Last tag of the predeclared partition.
    pub const PREDECLARED_LAST: u8 = Kind::Error as u8;

    /// Check if this kind is a predeclared type.
    ///
    /// The Alias/Named decision and downstream structural short-circuits
    /// depend on this predicate.
    #[inline]
    pub const fn is_predeclared(self) -> bool {
        let v = self as u8;
        v >= Self::PREDECLARED_FIRST && v <= Self::PREDECLARED_LAST
    }

    /// Check if this kind is a composite type.
    #[inline]
    pub const fn is_composite(self) -> bool {
        matches!(
            self,
            Self::Array
                | Self::Chan
                | Self::Func
                | Self::Interface
                | Self::Map
                | Self::Ptr
                | Self::Slice
                | Self::Struct
        )
    }

    /// Check if this kind is a declared-name wrapper.
    #[inline]
    pub const fn is_wrapper(self) -> bool {
        matches!(self, Self::Alias | Self::Named)
    }

    /// Get the name of this kind as a static string.
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Invalid => "<invalid>",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Int8 => "int8",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Uint => "uint",
            Self::Uint8 => "uint8",
            Self::Uint16 => "uint16",
            Self::Uint32 => "uint32",
            Self::Uint64 => "uint64",
            Self::Uintptr => "uintptr",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::Complex64 => "complex64",
            Self::Complex128 => "complex128",
            Self::String => "string",
            Self::Bytes => "bytes",
            Self::Rune => "rune",
            Self::Error => "error",
            Self::Array => "array",
            Self::Chan => "chan",
            Self::Func => "func",
            Self::Interface => "interface",
            Self::Map => "map",
            Self::Ptr => "ptr",
            Self::Slice => "slice",
            Self::Struct => "struct",
            Self::Alias => "alias",
            Self::Named => "named",
            Self::Tuple => "tuple",
            Self::Pkg => "package",
        }
    }
}

impl fmt::Debug for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Kind::{}", self.name())
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// Compile-time size assertion: Kind must be exactly 1 byte
const _: () = assert!(std::mem::size_of::<Kind>() == 1);
