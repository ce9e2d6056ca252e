//! Parser configuration.
//!
//! The defaults are strict: unknown fields are errors and a failed boolean
//! conversion falls back to `false`. [`ParserConfig::legacy`] opts into
//! passing unknown fields through as raw text and into the `true` boolean
//! fallback older query handlers used.

use serde::{Deserialize, Serialize};

/// Name of the field routed to the document identifier parser by default.
pub const DEFAULT_RESERVED_ID: &str = "_id";

/// Controls how [`PropParser`](crate::PropParser) resolves and converts values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Path parsed as a document identifier regardless of the record's fields.
    pub reserved_id: String,
    /// What to do when no field matches the path.
    pub missing_field: MissingFieldPolicy,
    /// Value paired with a failed boolean conversion.
    pub bool_fallback: BoolFallback,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self::strict()
    }
}

impl ParserConfig {
    /// Unknown fields are errors; booleans fall back to `false`.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            reserved_id: DEFAULT_RESERVED_ID.to_owned(),
            missing_field: MissingFieldPolicy::Error,
            bool_fallback: BoolFallback::False,
        }
    }

    /// Unknown fields pass the raw value through; booleans fall back to `true`.
    #[must_use]
    pub fn legacy() -> Self {
        Self {
            reserved_id: DEFAULT_RESERVED_ID.to_owned(),
            missing_field: MissingFieldPolicy::PassThrough,
            bool_fallback: BoolFallback::True,
        }
    }

    /// Use a different reserved identifier path.
    #[must_use]
    pub fn with_reserved_id(mut self, reserved_id: impl Into<String>) -> Self {
        self.reserved_id = reserved_id.into();
        self
    }
}

/// Behavior when a path matches no field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingFieldPolicy {
    /// Return [`PathError::NotFound`](crate::PathError::NotFound).
    #[default]
    Error,
    /// Return the raw value unchanged as text.
    PassThrough,
}

/// Value paired with a failed boolean conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoolFallback {
    /// The zero value, consistent with every numeric kind.
    #[default]
    False,
    /// `true`, as older query handlers returned.
    True,
}

impl BoolFallback {
    /// The fallback as a boolean.
    pub const fn value(self) -> bool {
        matches!(self, Self::True)
    }
}
