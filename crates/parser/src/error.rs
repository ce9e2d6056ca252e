//! Error types for path resolution, coercion and the entry point.

use std::num::{ParseFloatError, ParseIntError};

use num_complex::ParseComplexError;

use crate::value::ParsedValue;

/// Errors from resolving a field path against a record type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    /// The target type is not a structured record.
    #[error("bad type: expected a record, found {found}")]
    BadType {
        /// Kind name of the offending type.
        found: &'static str,
    },

    /// Segments remain after a field that cannot be descended into.
    #[error("invalid path: field `{field}` of kind {kind} has no member `{remainder}`")]
    InvalidPath {
        /// Alias of the leaf field that was matched.
        field: String,
        /// Kind name of that field.
        kind: &'static str,
        /// Dotted segments left unresolved.
        remainder: String,
    },

    /// No field declares the segment as its alias.
    #[error("no field `{segment}` in path `{path}`")]
    NotFound {
        /// Segment that matched nothing.
        segment: String,
        /// Full path being resolved.
        path: String,
    },

    /// The path is empty or has an empty segment.
    #[error("empty segment in path `{path}`")]
    EmptySegment {
        /// Full path being resolved.
        path: String,
    },

    /// The path has more segments than allowed.
    #[error("path has {actual} segments, limit is {limit}")]
    TooDeep {
        /// Maximum number of segments.
        limit: usize,
        /// Segments in the offending path.
        actual: usize,
    },
}

impl PathError {
    /// Whether resolution failed only because no field matched.
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Underlying conversion failure of a [`CoerceError`].
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum ConversionError {
    /// Not one of the accepted boolean literals.
    #[error("invalid boolean literal")]
    Bool,

    /// Malformed or out-of-range integer.
    #[error(transparent)]
    Int(#[from] ParseIntError),

    /// Leading `+` on an unsigned value.
    #[error("unsigned value cannot carry a sign")]
    UnsignedSign,

    /// Malformed float.
    #[error(transparent)]
    Float(#[from] ParseFloatError),

    /// Finite literal outside the float width's range.
    #[error("value out of range")]
    FloatRange,

    /// Malformed complex literal.
    #[error(transparent)]
    Complex(#[from] ParseComplexError<ParseFloatError>),
}

/// A raw value could not be converted to its field's kind.
///
/// Carries the best-effort value a caller may still use: the kind's zero
/// value for numbers, the configured fallback for booleans.
#[derive(Debug, PartialEq, thiserror::Error)]
#[error("cannot parse {value:?} as {kind}: {source}")]
pub struct CoerceError {
    kind: &'static str,
    value: String,
    fallback: ParsedValue,
    #[source]
    source: ConversionError,
}

impl CoerceError {
    pub(crate) fn new(
        kind: &'static str,
        value: &str,
        fallback: ParsedValue,
        source: impl Into<ConversionError>,
    ) -> Self {
        Self {
            kind,
            value: value.to_owned(),
            fallback,
            source: source.into(),
        }
    }

    /// Kind name the value was being converted to.
    pub fn kind(&self) -> &'static str {
        self.kind
    }

    /// The raw input.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Best-effort value paired with this error.
    pub fn fallback(&self) -> &ParsedValue {
        &self.fallback
    }

    /// Consume the error, keeping the best-effort value.
    pub fn into_fallback(self) -> ParsedValue {
        self.fallback
    }

    /// The underlying conversion failure.
    pub fn conversion(&self) -> &ConversionError {
        &self.source
    }
}

/// Errors from [`PropParser`](crate::PropParser) and [`parse_value`](crate::parse_value).
#[derive(Debug, thiserror::Error)]
pub enum PropError {
    /// Field path resolution failed.
    #[error(transparent)]
    Path(#[from] PathError),

    /// Value conversion failed.
    #[error(transparent)]
    Coerce(#[from] CoerceError),

    /// The reserved id value is not a valid document identifier.
    #[error("invalid object id {value:?}: {source}")]
    InvalidObjectId {
        /// The raw input.
        value: String,
        /// Error reported by the identifier parser.
        #[source]
        source: bson::oid::Error,
    },
}

impl PropError {
    /// Whether the path matched no field.
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Path(e) if e.is_not_found())
    }

    /// Best-effort value, when the failure was a coercion.
    pub fn fallback(&self) -> Option<&ParsedValue> {
        match self {
            Self::Coerce(e) => Some(e.fallback()),
            _ => None,
        }
    }
}

/// Result type of the entry point.
pub type PropResult<T> = Result<T, PropError>;
