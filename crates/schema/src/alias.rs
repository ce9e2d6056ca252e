//! Alias resolution across the three tag namespaces.

use crate::field::{AliasTags, FieldDescriptor, TagNamespace};

/// Resolve the externally visible name from raw alias declarations.
///
/// Namespaces are consulted in [`TagNamespace::ALL`] order. For each one
/// the declaration is cut at the first comma (`"name,omitempty"` yields
/// `"name"`) and the first non-empty result wins. Returns `""` when no
/// namespace yields a name.
///
/// ```rust
/// use propath_schema::{AliasTags, TagNamespace, alias};
///
/// let mut tags = AliasTags::new();
/// tags.set(TagNamespace::Query, ",omitempty");
/// tags.set(TagNamespace::Json, "user_name,omitempty");
/// assert_eq!(alias::resolve(&tags), "user_name");
/// ```
pub fn resolve(tags: &AliasTags) -> &str {
    TagNamespace::ALL
        .into_iter()
        .filter_map(|ns| tags.get(ns))
        .map(first_token)
        .find(|name| !name.is_empty())
        .unwrap_or("")
}

/// Externally visible name of `field`.
pub fn resolve_alias(field: &FieldDescriptor) -> &str {
    resolve(field.tags())
}

fn first_token(raw: &str) -> &str {
    raw.split_once(',').map_or(raw, |(head, _)| head)
}
