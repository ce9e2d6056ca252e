//! Field-path resolution.
//!
//! A dotted path such as `address.geo.lat` is matched segment by segment
//! against field aliases, descending into nested records while segments
//! remain.

use std::fmt;

use propath_schema::{FieldDescriptor, FieldKind, RecordType};

use crate::error::PathError;

/// Maximum number of segments in a field path.
pub const MAX_PATH_SEGMENTS: usize = 64;

/// A validated dotted path: at least one segment, none of them empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath<'a> {
    raw: &'a str,
    segments: Vec<&'a str>,
}

impl<'a> FieldPath<'a> {
    /// Split `raw` on `.` and validate the segments.
    ///
    /// Segments are not trimmed; `"a. b"` has the segment `" b"`.
    pub fn parse(raw: &'a str) -> Result<Self, PathError> {
        let mut segments = Vec::new();
        for segment in raw.split('.') {
            if segment.is_empty() {
                return Err(PathError::EmptySegment {
                    path: raw.to_owned(),
                });
            }
            segments.push(segment);
        }

        if segments.len() > MAX_PATH_SEGMENTS {
            return Err(PathError::TooDeep {
                limit: MAX_PATH_SEGMENTS,
                actual: segments.len(),
            });
        }

        Ok(Self { raw, segments })
    }

    /// The path as given.
    pub fn as_str(&self) -> &'a str {
        self.raw
    }

    /// Segments in order.
    pub fn segments(&self) -> &[&'a str] {
        &self.segments
    }

    /// Number of segments; never zero.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether the path has no segments; never true for a parsed path.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Dotted segments after the one at `index`.
    pub fn remainder_after(&self, index: usize) -> String {
        self.segments
            .get(index + 1..)
            .map(|rest| rest.join("."))
            .unwrap_or_default()
    }
}

impl fmt::Display for FieldPath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.raw)
    }
}

/// Resolve `path` against the record described by `ty`.
///
/// Fails with [`PathError::BadType`] unless `ty` is a record, or an
/// interface that declares a record shape.
///
/// # Examples
///
/// ```rust
/// use propath::locate_field;
/// use propath_schema::{FieldDescriptor, FieldKind, RecordRef, RecordType, TagNamespace};
///
/// let geo = RecordType::builder("Geo")
///     .field(FieldDescriptor::new("lat", FieldKind::F64).with_tag(TagNamespace::Json, "lat"))
///     .build();
/// let place = FieldKind::Record(RecordRef::shared(
///     RecordType::builder("Place")
///         .field(
///             FieldDescriptor::new("geo", FieldKind::Record(RecordRef::shared(geo)))
///                 .with_tag(TagNamespace::Bson, "geo"),
///         )
///         .build(),
/// ));
///
/// let field = locate_field("geo.lat", &place).unwrap();
/// assert_eq!(field.kind(), &FieldKind::F64);
/// assert!(locate_field("geo.lat", &FieldKind::Text).is_err());
/// ```
pub fn locate_field<'a>(path: &str, ty: &'a FieldKind) -> Result<&'a FieldDescriptor, PathError> {
    let record = ty
        .record_ref()
        .ok_or(PathError::BadType { found: ty.name() })?;
    locate_in(path, record.get())
}

/// Resolve `path` against `record`.
///
/// The first segment is matched against `record`'s fields in declaration
/// order; each further segment against the nested record of the previous
/// match. Matching is exact and case-sensitive.
pub fn locate_in<'a>(path: &str, record: &'a RecordType) -> Result<&'a FieldDescriptor, PathError> {
    let path = FieldPath::parse(path)?;
    let Some((leaf, parents)) = path.segments().split_last() else {
        return Err(PathError::EmptySegment {
            path: path.as_str().to_owned(),
        });
    };

    let mut current = record;
    for (depth, segment) in parents.iter().enumerate() {
        let field = find(current, segment, &path)?;
        current = match field.kind() {
            FieldKind::Record(nested) | FieldKind::Interface(Some(nested)) => nested.get(),
            FieldKind::Interface(None) => {
                return Err(PathError::BadType {
                    found: field.kind().name(),
                });
            }
            kind => {
                return Err(PathError::InvalidPath {
                    field: (*segment).to_owned(),
                    kind: kind.name(),
                    remainder: path.remainder_after(depth),
                });
            }
        };
    }

    let field = find(current, leaf, &path)?;
    tracing::trace!(
        path = path.as_str(),
        record = current.name(),
        field = field.name(),
        kind = %field.kind(),
        "located field"
    );
    Ok(field)
}

fn find<'a>(
    record: &'a RecordType,
    segment: &str,
    path: &FieldPath<'_>,
) -> Result<&'a FieldDescriptor, PathError> {
    record
        .field_by_alias(segment)
        .ok_or_else(|| PathError::NotFound {
            segment: segment.to_owned(),
            path: path.as_str().to_owned(),
        })
}
