//! Record types: ordered field tables and lazy references to them.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::field::FieldDescriptor;
use crate::kind::FieldType;

/// Field-metadata table of one record type.
///
/// Fields keep their declaration order; lookups scan in that order so the
/// first field wins when several declare the same alias.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordType {
    name: Cow<'static, str>,
    fields: Vec<FieldDescriptor>,
}

impl RecordType {
    /// Start building a record type named `name`.
    pub fn builder(name: impl Into<Cow<'static, str>>) -> RecordTypeBuilder {
        RecordTypeBuilder {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Type name, for diagnostics.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Number of declared fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record declares no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// First field, in declaration order, whose alias equals `alias`.
    ///
    /// Comparison is exact and case-sensitive. An empty `alias` never
    /// matches.
    pub fn field_by_alias(&self, alias: &str) -> Option<&FieldDescriptor> {
        if alias.is_empty() {
            return None;
        }
        self.fields.iter().find(|field| field.alias() == alias)
    }

    /// Field with the given Rust-side name.
    pub fn field_by_name(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.name() == name)
    }
}

/// Builder for [`RecordType`].
#[derive(Debug)]
pub struct RecordTypeBuilder {
    name: Cow<'static, str>,
    fields: Vec<FieldDescriptor>,
}

impl RecordTypeBuilder {
    /// Append a field.
    #[must_use = "builder methods must be chained or built"]
    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// Append several fields.
    #[must_use = "builder methods must be chained or built"]
    pub fn fields(mut self, fields: impl IntoIterator<Item = FieldDescriptor>) -> Self {
        self.fields.extend(fields);
        self
    }

    /// Finish the table.
    pub fn build(self) -> RecordType {
        RecordType {
            name: self.name,
            fields: self.fields,
        }
    }
}

/// Handle to a nested [`RecordType`].
///
/// Compile-time tables are referenced through their accessor function and
/// resolved lazily, which keeps self-referential records finite. Tables
/// built at runtime are shared behind an [`Arc`].
#[derive(Clone)]
pub struct RecordRef(Target);

#[derive(Clone)]
enum Target {
    Static(fn() -> &'static RecordType),
    Shared(Arc<RecordType>),
}

impl RecordRef {
    /// Reference the table of a [`Record`] type.
    pub fn of<T: Record>() -> Self {
        Self(Target::Static(T::record_type))
    }

    /// Reference a table built at runtime.
    pub fn shared(record: impl Into<Arc<RecordType>>) -> Self {
        Self(Target::Shared(record.into()))
    }

    /// Resolve the referenced table.
    pub fn get(&self) -> &RecordType {
        match &self.0 {
            Target::Static(accessor) => accessor(),
            Target::Shared(record) => record.as_ref(),
        }
    }
}

impl PartialEq for RecordRef {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.get(), other.get())
    }
}

impl Eq for RecordRef {}

// Only the name: printing fields would recurse on self-referential records.
impl fmt::Debug for RecordRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RecordRef").field(&self.get().name()).finish()
    }
}

/// A type with a compile-time field-metadata table.
///
/// Usually implemented with `#[derive(Record)]`.
pub trait Record: FieldType {
    /// The type's field table. Built once, then shared.
    fn record_type() -> &'static RecordType;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::TagNamespace;
    use crate::kind::FieldKind;
    use pretty_assertions::assert_eq;

    fn address() -> RecordType {
        RecordType::builder("Address")
            .field(
                FieldDescriptor::new("city", FieldKind::Text)
                    .with_tag(TagNamespace::Json, "city"),
            )
            .field(
                FieldDescriptor::new("zip", FieldKind::U32)
                    .with_tag(TagNamespace::Bson, "zip"),
            )
            .field(FieldDescriptor::new("notes", FieldKind::Text))
            .build()
    }

    #[test]
    fn keeps_declaration_order() {
        let record = address();
        let names: Vec<_> = record.fields().iter().map(FieldDescriptor::name).collect();
        assert_eq!(names, ["city", "zip", "notes"]);
        assert_eq!(record.len(), 3);
        assert!(!record.is_empty());
    }

    #[test]
    fn first_matching_alias_wins() {
        let record = RecordType::builder("Dup")
            .field(FieldDescriptor::new("a", FieldKind::Text).with_tag(TagNamespace::Json, "x"))
            .field(FieldDescriptor::new("b", FieldKind::Bool).with_tag(TagNamespace::Json, "x"))
            .build();
        assert_eq!(record.field_by_alias("x").map(FieldDescriptor::name), Some("a"));
    }

    #[test]
    fn untagged_fields_are_unreachable_by_alias() {
        let record = address();
        assert!(record.field_by_alias("").is_none());
        assert!(record.field_by_alias("notes").is_none());
        assert!(record.field_by_name("notes").is_some());
    }

    #[test]
    fn alias_lookup_is_case_sensitive() {
        assert!(address().field_by_alias("City").is_none());
    }

    #[test]
    fn shared_refs_compare_by_identity() {
        let shared = Arc::new(address());
        let a = RecordRef::shared(Arc::clone(&shared));
        let b = RecordRef::shared(shared);
        let c = RecordRef::shared(address());
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(format!("{a:?}"), r#"RecordRef("Address")"#);
    }
}
