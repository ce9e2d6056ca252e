//! The entry point: resolve a path, then coerce the raw value.

use bson::oid::ObjectId;
use propath_schema::{FieldKind, FieldType};

use crate::coerce::Coercer;
use crate::config::{MissingFieldPolicy, ParserConfig};
use crate::error::{PathError, PropError, PropResult};
use crate::locate::locate_field;
use crate::value::ParsedValue;

/// Converts raw query values addressed by dotted paths.
///
/// # Examples
///
/// ```rust
/// use propath::{ParsedValue, PropParser};
/// use propath_schema::Record;
///
/// #[derive(Record)]
/// struct Item {
///     #[record(json = "qty")]
///     quantity: u32,
///     #[record(bson = "flags")]
///     enabled: bool,
/// }
///
/// let parser = PropParser::new();
/// assert_eq!(parser.parse::<Item>("qty", "12").unwrap(), ParsedValue::Uint(12));
/// assert_eq!(parser.parse::<Item>("flags", "T").unwrap(), ParsedValue::Bool(true));
/// assert!(parser.parse::<Item>("missing", "1").unwrap_err().is_not_found());
/// ```
#[derive(Debug, Clone, Default)]
pub struct PropParser {
    config: ParserConfig,
    coercer: Coercer,
}

impl PropParser {
    /// Parser with the strict defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parser with an explicit configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        let coercer = Coercer::new(config.bool_fallback);
        Self { config, coercer }
    }

    /// Active configuration.
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse `raw` for the field at `path` in the record type `T`.
    pub fn parse<T: FieldType + ?Sized>(&self, path: &str, raw: &str) -> PropResult<ParsedValue> {
        self.parse_in(path, raw, &T::field_kind())
    }

    /// Parse `raw` for the field at `path` in the type described by `ty`.
    ///
    /// The reserved id path is checked first and parsed as a document
    /// identifier whether or not the record declares such a field.
    pub fn parse_in(&self, path: &str, raw: &str, ty: &FieldKind) -> PropResult<ParsedValue> {
        if path == self.config.reserved_id {
            return self.parse_reserved_id(raw, ty);
        }

        let field = match locate_field(path, ty) {
            Ok(field) => field,
            Err(err @ PathError::NotFound { .. }) => {
                return match self.config.missing_field {
                    MissingFieldPolicy::PassThrough => {
                        tracing::debug!(path, "no field for path, passing raw value through");
                        Ok(ParsedValue::Text(raw.to_owned()))
                    }
                    MissingFieldPolicy::Error => Err(err.into()),
                };
            }
            Err(err) => {
                tracing::debug!(path, error = %err, "path resolution failed");
                return Err(err.into());
            }
        };

        self.coercer.coerce(field.kind(), raw).map_err(|err| {
            tracing::debug!(path, error = %err, "value conversion failed");
            PropError::from(err)
        })
    }

    fn parse_reserved_id(&self, raw: &str, ty: &FieldKind) -> PropResult<ParsedValue> {
        if ty.record_ref().is_none() {
            return Err(PathError::BadType { found: ty.name() }.into());
        }

        tracing::debug!(path = %self.config.reserved_id, "parsing reserved id as object id");
        ObjectId::parse_str(raw)
            .map(ParsedValue::ObjectId)
            .map_err(|source| {
                tracing::debug!(path = %self.config.reserved_id, "invalid object id");
                PropError::InvalidObjectId {
                    value: raw.to_owned(),
                    source,
                }
            })
    }
}

/// Parse `raw` for the field at `path` in the type of `instance`, using the
/// strict defaults.
///
/// Only the type of `instance` is inspected; its contents are ignored.
///
/// ```rust
/// use propath::{ParsedValue, parse_value};
/// use propath_schema::Record;
///
/// #[derive(Record)]
/// struct Point {
///     #[record(json = "x")]
///     x: i32,
/// }
///
/// let point = Point { x: 0 };
/// assert_eq!(parse_value("x", "-4", &point).unwrap(), ParsedValue::Int(-4));
/// ```
pub fn parse_value<T: FieldType>(path: &str, raw: &str, _instance: &T) -> PropResult<ParsedValue> {
    PropParser::new().parse::<T>(path, raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BoolFallback;
    use pretty_assertions::assert_eq;
    use propath_schema::{FieldDescriptor, RecordRef, RecordType, TagNamespace};

    const OID: &str = "507f1f77bcf86cd799439011";

    fn doc() -> FieldKind {
        FieldKind::Record(RecordRef::shared(
            RecordType::builder("Doc")
                .field(
                    FieldDescriptor::new("count", FieldKind::I32)
                        .with_tag(TagNamespace::Json, "count"),
                )
                .field(
                    FieldDescriptor::new("live", FieldKind::Bool)
                        .with_tag(TagNamespace::Query, "live"),
                )
                .field(
                    FieldDescriptor::new("items", FieldKind::Sequence)
                        .with_tag(TagNamespace::Bson, "items"),
                )
                .build(),
        ))
    }

    #[test]
    fn coerces_located_field() {
        let parser = PropParser::new();
        assert_eq!(parser.parse_in("count", "-12", &doc()).unwrap(), ParsedValue::Int(-12));
        assert_eq!(
            parser.parse_in("items", "[1]", &doc()).unwrap().to_string(),
            "MAP"
        );
    }

    #[test]
    fn reserved_id_without_declared_field() {
        let parser = PropParser::new();
        let value = parser.parse_in("_id", OID, &doc()).unwrap();
        assert_eq!(value.as_object_id().map(|id| id.to_hex()), Some(OID.to_owned()));
    }

    #[test]
    fn reserved_id_rejects_malformed_hex() {
        let err = PropParser::new().parse_in("_id", "nothex", &doc()).unwrap_err();
        assert!(matches!(err, PropError::InvalidObjectId { ref value, .. } if value == "nothex"));
    }

    #[test]
    fn reserved_id_requires_a_record() {
        let err = PropParser::new().parse_in("_id", OID, &FieldKind::Text).unwrap_err();
        assert!(matches!(err, PropError::Path(PathError::BadType { found: "text" })));
    }

    #[test]
    fn custom_reserved_id() {
        let parser = PropParser::with_config(ParserConfig::strict().with_reserved_id("oid"));
        assert!(parser.parse_in("oid", OID, &doc()).unwrap().as_object_id().is_some());
        assert!(parser.parse_in("_id", OID, &doc()).unwrap_err().is_not_found());
    }

    #[test]
    fn missing_field_policy() {
        let strict = PropParser::new();
        assert!(strict.parse_in("ghost", "v", &doc()).unwrap_err().is_not_found());

        let legacy = PropParser::with_config(ParserConfig::legacy());
        assert_eq!(
            legacy.parse_in("ghost", "v", &doc()).unwrap(),
            ParsedValue::Text("v".into())
        );
        // Only unknown fields pass through.
        assert!(matches!(
            legacy.parse_in("count.x", "v", &doc()),
            Err(PropError::Path(PathError::InvalidPath { .. }))
        ));
    }

    #[test]
    fn bool_fallback_follows_config() {
        let err = PropParser::new().parse_in("live", "maybe", &doc()).unwrap_err();
        assert_eq!(err.fallback(), Some(&ParsedValue::Bool(false)));

        let config = ParserConfig {
            bool_fallback: BoolFallback::True,
            ..ParserConfig::default()
        };
        let err = PropParser::with_config(config)
            .parse_in("live", "maybe", &doc())
            .unwrap_err();
        assert_eq!(err.fallback(), Some(&ParsedValue::Bool(true)));
    }

    #[test]
    fn non_record_target_is_bad_type() {
        let err = PropParser::new().parse::<u32>("count", "1").unwrap_err();
        assert!(matches!(err, PropError::Path(PathError::BadType { found: "u32" })));
    }
}
