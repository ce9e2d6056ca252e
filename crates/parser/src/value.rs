//! Values produced by coercion.

use std::fmt;

use bson::oid::ObjectId;
use num_complex::Complex64;
use propath_schema::FieldKind;
use serde::Serialize;

/// A raw query value converted to the representation its field expects.
///
/// Integer, float and complex values are widened to 64-bit storage
/// regardless of the field's declared width; the width only bounds what
/// parses successfully.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParsedValue {
    /// Text, or a raw value passed through unchanged.
    Text(String),
    /// Boolean.
    Bool(bool),
    /// Any signed integer width.
    Int(i64),
    /// Any unsigned integer width.
    Uint(u64),
    /// Any float width.
    Float(f64),
    /// Any complex width.
    Complex(Complex64),
    /// Document identifier from the reserved id field.
    ObjectId(ObjectId),
    /// Composite or nested field that is not converted here.
    Unresolved(Unresolved),
}

/// Marker for values this crate does not convert.
///
/// Callers must not treat it as data. It serializes as the legacy marker
/// strings `"MAP"` and `"STRUCT"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Unresolved {
    /// Array, map or sequence field.
    #[serde(rename = "MAP")]
    Composite,
    /// Record or interface field.
    #[serde(rename = "STRUCT")]
    Nested,
}

impl Unresolved {
    /// Legacy marker string.
    pub const fn marker(self) -> &'static str {
        match self {
            Self::Composite => "MAP",
            Self::Nested => "STRUCT",
        }
    }
}

impl fmt::Display for Unresolved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.marker())
    }
}

impl ParsedValue {
    /// Zero value for `kind`, returned alongside failed numeric conversions.
    pub fn zero_for(kind: &FieldKind) -> Self {
        match kind {
            FieldKind::Bool => Self::Bool(false),
            k if k.is_signed() => Self::Int(0),
            k if k.is_unsigned() => Self::Uint(0),
            FieldKind::F32 | FieldKind::F64 => Self::Float(0.0),
            FieldKind::Complex32 | FieldKind::Complex64 => Self::Complex(Complex64::new(0.0, 0.0)),
            k if k.is_composite() => Self::Unresolved(Unresolved::Composite),
            k if k.is_nested() => Self::Unresolved(Unresolved::Nested),
            _ => Self::Text(String::new()),
        }
    }

    /// Short name of the variant, for diagnostics.
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Uint(_) => "uint",
            Self::Float(_) => "float",
            Self::Complex(_) => "complex",
            Self::ObjectId(_) => "object_id",
            Self::Unresolved(_) => "unresolved",
        }
    }

    /// Text content, if this is text.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Boolean content, if this is a boolean.
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Signed integer content.
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Unsigned integer content.
    pub const fn as_u64(&self) -> Option<u64> {
        match self {
            Self::Uint(u) => Some(*u),
            _ => None,
        }
    }

    /// Float content.
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Complex content.
    pub const fn as_complex(&self) -> Option<Complex64> {
        match self {
            Self::Complex(c) => Some(*c),
            _ => None,
        }
    }

    /// Identifier content.
    pub const fn as_object_id(&self) -> Option<ObjectId> {
        match self {
            Self::ObjectId(id) => Some(*id),
            _ => None,
        }
    }

    /// Whether this is a marker rather than data.
    pub const fn is_unresolved(&self) -> bool {
        matches!(self, Self::Unresolved(_))
    }
}

impl fmt::Display for ParsedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Uint(u) => write!(f, "{u}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Complex(c) => write!(f, "{c}"),
            Self::ObjectId(id) => write!(f, "{id}"),
            Self::Unresolved(u) => write!(f, "{u}"),
        }
    }
}

impl From<String> for ParsedValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for ParsedValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<bool> for ParsedValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for ParsedValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u64> for ParsedValue {
    fn from(value: u64) -> Self {
        Self::Uint(value)
    }
}

impl From<f64> for ParsedValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<Complex64> for ParsedValue {
    fn from(value: Complex64) -> Self {
        Self::Complex(value)
    }
}

impl From<ObjectId> for ParsedValue {
    fn from(value: ObjectId) -> Self {
        Self::ObjectId(value)
    }
}

impl From<Unresolved> for ParsedValue {
    fn from(value: Unresolved) -> Self {
        Self::Unresolved(value)
    }
}
