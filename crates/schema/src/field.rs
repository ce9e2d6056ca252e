//! Field descriptors and their alias declarations.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::alias;
use crate::kind::FieldKind;

/// One of the three namespaces a field may declare an external name under.
///
/// The declaration order of the variants is the resolution priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagNamespace {
    /// Framework-specific query alias.
    Query,
    /// Document-store alias.
    Bson,
    /// Generic text serialization alias.
    Json,
}

impl TagNamespace {
    /// All namespaces in resolution order.
    pub const ALL: [Self; 3] = [Self::Query, Self::Bson, Self::Json];

    /// Attribute key used for this namespace.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Bson => "bson",
            Self::Json => "json",
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::Query => 0,
            Self::Bson => 1,
            Self::Json => 2,
        }
    }
}

impl fmt::Display for TagNamespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw alias declarations of a field, one slot per [`TagNamespace`].
///
/// Each declaration is stored verbatim, e.g. `"name,omitempty"`; the
/// modifiers after the first comma are ignored on resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasTags {
    slots: [Option<Cow<'static, str>>; 3],
}

impl AliasTags {
    /// No declarations in any namespace.
    pub const fn new() -> Self {
        Self {
            slots: [None, None, None],
        }
    }

    /// Set the raw declaration for `namespace`, replacing any previous one.
    pub fn set(&mut self, namespace: TagNamespace, raw: impl Into<Cow<'static, str>>) {
        self.slots[namespace.index()] = Some(raw.into());
    }

    /// Raw declaration for `namespace`, if present.
    pub fn get(&self, namespace: TagNamespace) -> Option<&str> {
        self.slots[namespace.index()].as_deref()
    }

    /// The externally visible name. See [`alias::resolve`].
    pub fn resolve(&self) -> &str {
        alias::resolve(self)
    }
}

/// A single field of a [`RecordType`](crate::RecordType).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    name: Cow<'static, str>,
    kind: FieldKind,
    tags: AliasTags,
}

impl FieldDescriptor {
    /// Create a field with no alias declarations.
    pub fn new(name: impl Into<Cow<'static, str>>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            tags: AliasTags::new(),
        }
    }

    /// Declare a raw alias in `namespace`.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_tag(
        mut self,
        namespace: TagNamespace,
        raw: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.tags.set(namespace, raw);
        self
    }

    /// Rust-side field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared kind.
    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    /// Raw alias declarations.
    pub fn tags(&self) -> &AliasTags {
        &self.tags
    }

    /// Name a path segment must equal to select this field.
    ///
    /// Empty when no namespace declares an alias; such fields are never
    /// matched by a path.
    pub fn alias(&self) -> &str {
        self.tags.resolve()
    }
}
