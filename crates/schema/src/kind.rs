//! Field kinds and the [`FieldType`] trait that maps Rust types onto them.
//!
//! A [`FieldKind`] is the structural classification of a field's declared
//! type. Nested kinds carry an explicit [`RecordRef`] so path resolution can
//! descend without any runtime type introspection.
//!
//! ```rust
//! use propath_schema::{FieldKind, FieldType};
//!
//! assert_eq!(<u16 as FieldType>::field_kind(), FieldKind::U16);
//! assert_eq!(<Vec<String> as FieldType>::field_kind(), FieldKind::Sequence);
//! assert!(<Option<i64> as FieldType>::field_kind().is_signed());
//! ```

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::fmt;
use std::sync::Arc;

use num_complex::{Complex32, Complex64};

use crate::record::RecordRef;

/// Structural classification of a field's declared type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// UTF-8 text.
    Text,
    /// Boolean.
    Bool,
    /// Machine-width signed integer, treated as 64-bit.
    Int,
    /// 8-bit signed integer.
    I8,
    /// 16-bit signed integer.
    I16,
    /// 32-bit signed integer.
    I32,
    /// 64-bit signed integer.
    I64,
    /// Machine-width unsigned integer, treated as 64-bit.
    Uint,
    /// 8-bit unsigned integer.
    U8,
    /// 16-bit unsigned integer.
    U16,
    /// 32-bit unsigned integer.
    U32,
    /// 64-bit unsigned integer.
    U64,
    /// Single-precision float.
    F32,
    /// Double-precision float.
    F64,
    /// Complex number with `f32` parts.
    Complex32,
    /// Complex number with `f64` parts.
    Complex64,
    /// Fixed-size array.
    Array,
    /// Key/value map.
    Map,
    /// Growable sequence.
    Sequence,
    /// Nested record with a known shape.
    Record(RecordRef),
    /// Polymorphic value. Paths can only descend into it when a record
    /// shape is declared.
    Interface(Option<RecordRef>),
    /// Anything else; coerced as raw text.
    Other,
}

impl FieldKind {
    /// Short descriptive name, used in errors and logs.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::Uint => "uint",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::Complex32 => "complex32",
            Self::Complex64 => "complex64",
            Self::Array => "array",
            Self::Map => "map",
            Self::Sequence => "sequence",
            Self::Record(_) => "record",
            Self::Interface(_) => "interface",
            Self::Other => "other",
        }
    }

    /// Array, map or sequence.
    pub const fn is_composite(&self) -> bool {
        matches!(self, Self::Array | Self::Map | Self::Sequence)
    }

    /// Record or interface; the kinds a path may descend into.
    pub const fn is_nested(&self) -> bool {
        matches!(self, Self::Record(_) | Self::Interface(_))
    }

    /// Any signed integer width.
    pub const fn is_signed(&self) -> bool {
        matches!(self, Self::Int | Self::I8 | Self::I16 | Self::I32 | Self::I64)
    }

    /// Any unsigned integer width.
    pub const fn is_unsigned(&self) -> bool {
        matches!(self, Self::Uint | Self::U8 | Self::U16 | Self::U32 | Self::U64)
    }

    /// The record shape this kind describes, if any.
    ///
    /// `Interface(None)` has no shape and returns `None`.
    pub fn record_ref(&self) -> Option<&RecordRef> {
        match self {
            Self::Record(r) | Self::Interface(Some(r)) => Some(r),
            _ => None,
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.record_ref() {
            Some(r) => write!(f, "{}<{}>", self.name(), r.get().name()),
            None => f.write_str(self.name()),
        }
    }
}

/// Types that can appear as record fields.
///
/// Implemented for the primitive types, std collections and the document
/// identifier; `#[derive(Record)]` implements it for records.
pub trait FieldType {
    /// The kind a field of this type is declared with.
    fn field_kind() -> FieldKind;
}

macro_rules! impl_field_type {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl FieldType for $ty {
                #[inline]
                fn field_kind() -> FieldKind {
                    FieldKind::$kind
                }
            }
        )*
    };
}

impl_field_type! {
    String => Text,
    str => Text,
    char => Text,
    bool => Bool,
    isize => Int,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    usize => Uint,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    f32 => F32,
    f64 => F64,
    Complex32 => Complex32,
    Complex64 => Complex64,
    bson::oid::ObjectId => Other,
    bson::Document => Map,
}

impl FieldType for Cow<'_, str> {
    fn field_kind() -> FieldKind {
        FieldKind::Text
    }
}

impl<T, const N: usize> FieldType for [T; N] {
    fn field_kind() -> FieldKind {
        FieldKind::Array
    }
}

impl<T> FieldType for Vec<T> {
    fn field_kind() -> FieldKind {
        FieldKind::Sequence
    }
}

impl<T> FieldType for VecDeque<T> {
    fn field_kind() -> FieldKind {
        FieldKind::Sequence
    }
}

impl<T> FieldType for [T] {
    fn field_kind() -> FieldKind {
        FieldKind::Sequence
    }
}

impl<T, S> FieldType for HashSet<T, S> {
    fn field_kind() -> FieldKind {
        FieldKind::Sequence
    }
}

impl<T> FieldType for BTreeSet<T> {
    fn field_kind() -> FieldKind {
        FieldKind::Sequence
    }
}

impl<K, V, S> FieldType for HashMap<K, V, S> {
    fn field_kind() -> FieldKind {
        FieldKind::Map
    }
}

impl<K, V> FieldType for BTreeMap<K, V> {
    fn field_kind() -> FieldKind {
        FieldKind::Map
    }
}

// Wrappers are transparent: an optional or boxed field has the kind of
// what it wraps.
impl<T: FieldType> FieldType for Option<T> {
    fn field_kind() -> FieldKind {
        T::field_kind()
    }
}

impl<T: FieldType + ?Sized> FieldType for Box<T> {
    fn field_kind() -> FieldKind {
        T::field_kind()
    }
}

impl<T: FieldType + ?Sized> FieldType for Arc<T> {
    fn field_kind() -> FieldKind {
        T::field_kind()
    }
}
