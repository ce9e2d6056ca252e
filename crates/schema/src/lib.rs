#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! # propath-schema
//!
//! Static field-metadata tables for records addressed by dotted query paths.
//!
//! This crate provides:
//! - [`FieldKind`] -- structural classification of a field's declared type
//! - [`FieldDescriptor`] -- a field's name, kind and raw alias declarations
//! - [`RecordType`] -- an ordered field table, built once per type
//! - [`RecordRef`] -- lazy handle used by nested kinds
//! - [`alias`] -- first-non-empty alias resolution over `query`, `bson`, `json`
//! - `#[derive(Record)]` (feature `derive`) -- generates the table at compile time
//!
//! ```rust
//! use propath_schema::{FieldDescriptor, FieldKind, RecordType, TagNamespace};
//!
//! let user = RecordType::builder("User")
//!     .field(
//!         FieldDescriptor::new("name", FieldKind::Text)
//!             .with_tag(TagNamespace::Json, "name,omitempty"),
//!     )
//!     .field(FieldDescriptor::new("age", FieldKind::U8).with_tag(TagNamespace::Bson, "age"))
//!     .build();
//!
//! assert_eq!(user.field_by_alias("name").map(|f| f.kind()), Some(&FieldKind::Text));
//! ```

// Lets the derive's `::propath_schema::...` paths resolve inside this crate's own tests.
extern crate self as propath_schema;

pub mod alias;
pub mod field;
pub mod kind;
pub mod record;

pub use alias::resolve_alias;
pub use field::{AliasTags, FieldDescriptor, TagNamespace};
pub use kind::{FieldKind, FieldType};
pub use record::{Record, RecordRef, RecordType, RecordTypeBuilder};

#[cfg(feature = "derive")]
pub use propath_schema_macros::Record;

/// Common imports for declaring record metadata.
pub mod prelude {
    pub use super::{
        AliasTags, FieldDescriptor, FieldKind, FieldType, Record, RecordRef, RecordType,
        TagNamespace,
    };
}
