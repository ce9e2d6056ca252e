#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! # propath
//!
//! Converts raw string values from query parameters into the types their
//! target fields declare, where fields are addressed by dotted paths such as
//! `address.geo.lat`.
//!
//! - [`locate_field`] walks a path through [`propath_schema`] metadata,
//!   matching each segment against field aliases (`query`, then `bson`,
//!   then `json`)
//! - [`coerce`] converts a raw string according to a [`FieldKind`]
//! - [`PropParser`] combines both and handles the reserved `_id` path
//!
//! ```rust
//! use propath::{ParsedValue, PropParser};
//! use propath_schema::Record;
//!
//! #[derive(Record)]
//! struct Geo {
//!     #[record(json = "lat")]
//!     lat: f64,
//! }
//!
//! #[derive(Record)]
//! struct Place {
//!     #[record(bson = "geo")]
//!     geo: Geo,
//!     #[record(query = "open", json = "isOpen")]
//!     open: bool,
//! }
//!
//! let parser = PropParser::new();
//! assert_eq!(parser.parse::<Place>("geo.lat", "52.5").unwrap(), ParsedValue::Float(52.5));
//! assert_eq!(parser.parse::<Place>("open", "false").unwrap(), ParsedValue::Bool(false));
//! assert!(parser.parse::<Place>("isOpen", "true").is_err());
//! ```

pub mod coerce;
pub mod config;
pub mod error;
pub mod locate;
pub mod parser;
pub mod value;

pub use coerce::{Coercer, coerce, parse_bool};
pub use config::{BoolFallback, DEFAULT_RESERVED_ID, MissingFieldPolicy, ParserConfig};
pub use error::{CoerceError, ConversionError, PathError, PropError, PropResult};
pub use locate::{FieldPath, MAX_PATH_SEGMENTS, locate_field, locate_in};
pub use parser::{PropParser, parse_value};
pub use value::{ParsedValue, Unresolved};

pub use propath_schema::{FieldKind, FieldType, Record, RecordType};
