//! # propath-schema-macros
//!
//! Derive macro generating `propath_schema::Record` metadata tables.
//!
//! | Macro | Description |
//! |-------|-------------|
//! | [`Record`](derive@Record) | Implements `Record` and `FieldType` |
//!
//! Use it through the `propath-schema` re-export rather than depending on
//! this crate directly.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

extern crate proc_macro;

use proc_macro::TokenStream;

mod record;
mod support;

/// Derive macro for the `Record` trait.
///
/// Builds the field table once, on first use, from the struct's named
/// fields in declaration order. Each field's kind comes from its type's
/// `FieldType` implementation unless overridden.
///
/// # Attributes
///
/// ## Container attributes (`#[record(...)]` on the struct)
///
/// - `name = "..."` - Record name used in diagnostics (default: the struct name)
///
/// ## Field attributes
///
/// - `query = "..."` - Framework alias declaration, highest priority
/// - `bson = "..."` - Document alias declaration
/// - `json = "..."` - Text alias declaration, lowest priority
/// - `interface` - Declares a polymorphic field with no record shape
/// - `interface = Type` - Declares a polymorphic field shaped like `Type: Record`
/// - `kind = ...` - Sets the field's kind directly, for types without a
///   `FieldType` impl: `text`, `bool`, `int`, `i8`..`i64`, `uint`,
///   `u8`..`u64`, `f32`, `f64`, `complex32`, `complex64`, `array`, `map`,
///   `sequence` or `other` (raw text). Cannot be combined with `interface`.
/// - `skip` - Leaves the field out of the table
///
/// Each alias declaration may carry modifiers after a comma
/// (`json = "name,omitempty"`); only the part before the first comma names
/// the field. A field with no declarations cannot be addressed by a path.
///
/// # Example
///
/// ```ignore
/// use propath_schema::Record;
///
/// #[derive(Record)]
/// struct Address {
///     #[record(json = "city")]
///     city: String,
/// }
///
/// #[derive(Record)]
/// struct User {
///     #[record(query = "login", json = "username,omitempty")]
///     username: String,
///     #[record(bson = "address")]
///     address: Address,
///     #[record(bson = "created", kind = other)]
///     created: bson::DateTime,
///     #[record(skip)]
///     session: Vec<u8>,
/// }
/// ```
#[proc_macro_derive(Record, attributes(record))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    record::derive(input)
}
