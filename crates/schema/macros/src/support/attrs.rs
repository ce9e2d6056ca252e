use syn::{
    Attribute, Ident, Lit, LitStr, Meta, Path, Result, Token,
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
};

use crate::support::diag;

/// Parsed `#[record(...)]` arguments.
#[derive(Debug, Clone, Default)]
pub struct AttrArgs {
    pub items: Vec<AttrItem>,
}

/// A single attribute item.
#[derive(Debug, Clone)]
pub enum AttrItem {
    /// A flag like `skip`
    Flag(Ident),
    /// Key-value pair like `json = "name"` or `interface = Shape`
    KeyValue { key: Ident, value: AttrValue },
}

impl AttrItem {
    pub fn key(&self) -> &Ident {
        match self {
            Self::Flag(key) | Self::KeyValue { key, .. } => key,
        }
    }
}

/// Right-hand side of a key-value item.
#[derive(Debug, Clone)]
pub enum AttrValue {
    Lit(Lit),
    Path(Path),
}

impl AttrArgs {
    /// Find a key-value pair by key name.
    pub fn get_value(&self, key: &str) -> Option<&AttrValue> {
        self.items.iter().find_map(|item| match item {
            AttrItem::KeyValue { key: k, value } if k == key => Some(value),
            _ => None,
        })
    }

    /// Get a string literal by key, erroring when the key holds anything else.
    pub fn get_str(&self, key: &str) -> Result<Option<&LitStr>> {
        match self.get_value(key) {
            None => Ok(None),
            Some(AttrValue::Lit(Lit::Str(s))) => Ok(Some(s)),
            Some(AttrValue::Lit(other)) => Err(diag::error_spanned(
                other,
                format!("`{key}` expects a string literal"),
            )),
            Some(AttrValue::Path(path)) => Err(diag::error_spanned(
                path,
                format!("`{key}` expects a string literal"),
            )),
        }
    }

    /// Get a type path by key, erroring when the key holds a literal.
    pub fn get_path(&self, key: &str) -> Result<Option<&Path>> {
        match self.get_value(key) {
            None => Ok(None),
            Some(AttrValue::Path(path)) => Ok(Some(path)),
            Some(AttrValue::Lit(lit)) => Err(diag::error_spanned(
                lit,
                format!("`{key}` expects a type path, e.g. `{key} = Shape`"),
            )),
        }
    }

    /// Check if a flag is present.
    pub fn has_flag(&self, flag: &str) -> bool {
        self.items
            .iter()
            .any(|item| matches!(item, AttrItem::Flag(f) if f == flag))
    }

    /// Reject any key outside `allowed`.
    pub fn deny_unknown(&self, allowed: &[&str]) -> Result<()> {
        for item in &self.items {
            let key = item.key();
            if !allowed.iter().any(|a| key == a) {
                return Err(diag::error_spanned(
                    key,
                    format!(
                        "unknown attribute `{key}`, expected one of: {}",
                        allowed.join(", ")
                    ),
                ));
            }
        }
        Ok(())
    }
}

/// Parse attribute like `#[record(...)]` (the whole Attribute, not only args).
pub fn parse_attr(attr: &Attribute, expected: &str) -> Result<Option<AttrArgs>> {
    if !attr.path().is_ident(expected) {
        return Ok(None);
    }

    match &attr.meta {
        Meta::Path(_) => Ok(Some(AttrArgs::default())),
        Meta::List(list) => {
            let args = syn::parse2::<AttrArgsParser>(list.tokens.clone())?;
            Ok(Some(args.0))
        }
        Meta::NameValue(nv) => Err(diag::error_spanned(
            nv,
            format!("#[{expected}] must be #[{expected}(...)] or #[{expected}] (not name-value)"),
        )),
    }
}

/// Parse all attributes of a given type and merge them.
pub fn parse_attrs(attrs: &[Attribute], name: &str) -> Result<AttrArgs> {
    let mut result = AttrArgs::default();

    for attr in attrs {
        if let Some(args) = parse_attr(attr, name)? {
            result.items.extend(args.items);
        }
    }

    Ok(result)
}

struct AttrArgsParser(AttrArgs);

impl Parse for AttrArgsParser {
    fn parse(input: ParseStream) -> Result<Self> {
        let items = if input.is_empty() {
            vec![]
        } else {
            Punctuated::<AttrItemParser, Token![,]>::parse_terminated(input)?
                .into_iter()
                .map(|x| x.0)
                .collect()
        };
        Ok(Self(AttrArgs { items }))
    }
}

struct AttrItemParser(AttrItem);

impl Parse for AttrItemParser {
    fn parse(input: ParseStream) -> Result<Self> {
        let key: Ident = input.parse()?;

        if input.peek(Token![=]) {
            input.parse::<Token![=]>()?;
            let value = if input.peek(Lit) {
                AttrValue::Lit(input.parse()?)
            } else {
                AttrValue::Path(input.parse()?)
            };
            return Ok(Self(AttrItem::KeyValue { key, value }));
        }

        Ok(Self(AttrItem::Flag(key)))
    }
}
