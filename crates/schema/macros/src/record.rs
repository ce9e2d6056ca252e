use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::spanned::Spanned;
use syn::{DeriveInput, parse_macro_input};

use crate::support::{attrs, diag, utils};

const ATTR: &str = "record";
const CONTAINER_KEYS: &[&str] = &["name"];
const FIELD_KEYS: &[&str] = &["query", "bson", "json", "interface", "kind", "skip"];

/// Values accepted by `kind = ...`, with the `FieldKind` variant each names.
const KINDS: &[(&str, &str)] = &[
    ("text", "Text"),
    ("bool", "Bool"),
    ("int", "Int"),
    ("i8", "I8"),
    ("i16", "I16"),
    ("i32", "I32"),
    ("i64", "I64"),
    ("uint", "Uint"),
    ("u8", "U8"),
    ("u16", "U16"),
    ("u32", "U32"),
    ("u64", "U64"),
    ("f32", "F32"),
    ("f64", "F64"),
    ("complex32", "Complex32"),
    ("complex64", "Complex64"),
    ("array", "Array"),
    ("map", "Map"),
    ("sequence", "Sequence"),
    ("other", "Other"),
];

pub fn derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match expand(&input) {
        Ok(ts) => ts.into(),
        Err(e) => diag::to_compile_error(e),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let struct_name = &input.ident;

    // The table lives in a per-impl static, which cannot vary per
    // monomorphization.
    if !input.generics.params.is_empty() {
        return Err(diag::error_spanned(
            &input.generics,
            "#[derive(Record)] does not support generic structs",
        ));
    }

    let container = attrs::parse_attrs(&input.attrs, ATTR)?;
    container.deny_unknown(CONTAINER_KEYS)?;
    let record_name = match container.get_str("name")? {
        Some(lit) => lit.value(),
        None => struct_name.to_string(),
    };

    let fields = utils::require_named_fields(input)?;
    let mut field_defs = Vec::with_capacity(fields.named.len());

    for field in &fields.named {
        let ident = field
            .ident
            .as_ref()
            .ok_or_else(|| diag::error_spanned(field, "expected a named field"))?;
        let field_attrs = attrs::parse_attrs(&field.attrs, ATTR)?;
        field_attrs.deny_unknown(FIELD_KEYS)?;

        if field_attrs.has_flag("skip") {
            continue;
        }

        field_defs.push(field_def(ident, &field.ty, &field_attrs)?);
    }

    Ok(quote! {
        impl ::propath_schema::Record for #struct_name {
            fn record_type() -> &'static ::propath_schema::RecordType {
                static RECORD: ::std::sync::OnceLock<::propath_schema::RecordType> =
                    ::std::sync::OnceLock::new();
                RECORD.get_or_init(|| {
                    ::propath_schema::RecordType::builder(#record_name)
                        #(.field(#field_defs))*
                        .build()
                })
            }
        }

        impl ::propath_schema::FieldType for #struct_name {
            fn field_kind() -> ::propath_schema::FieldKind {
                ::propath_schema::FieldKind::Record(::propath_schema::RecordRef::of::<Self>())
            }
        }
    })
}

fn field_def(
    ident: &syn::Ident,
    ty: &syn::Type,
    field_attrs: &attrs::AttrArgs,
) -> syn::Result<TokenStream2> {
    let name = utils::unraw(ident);

    if let Some(kind) = field_attrs.get_path("kind")? {
        if field_attrs.get_value("interface").is_some() || field_attrs.has_flag("interface") {
            return Err(diag::error_spanned(kind, "`kind` and `interface` are mutually exclusive"));
        }
    }

    let kind = match field_attrs.get_path("interface")? {
        Some(shape) => quote! {
            ::propath_schema::FieldKind::Interface(::core::option::Option::Some(
                ::propath_schema::RecordRef::of::<#shape>(),
            ))
        },
        None if field_attrs.has_flag("interface") => {
            quote!(::propath_schema::FieldKind::Interface(::core::option::Option::None))
        }
        None => match field_attrs.get_path("kind")? {
            Some(kind) => explicit_kind(kind)?,
            None => quote!(<#ty as ::propath_schema::FieldType>::field_kind()),
        },
    };

    let mut tags = Vec::new();
    let namespaces = [
        ("query", quote!(Query)),
        ("bson", quote!(Bson)),
        ("json", quote!(Json)),
    ];
    for (key, namespace) in namespaces {
        if let Some(raw) = field_attrs.get_str(key)? {
            tags.push(quote! {
                .with_tag(::propath_schema::TagNamespace::#namespace, #raw)
            });
        }
    }

    Ok(quote! {
        ::propath_schema::FieldDescriptor::new(#name, #kind) #(#tags)*
    })
}

/// Kind named by `kind = ...`, bypassing the field type's `FieldType` impl.
fn explicit_kind(path: &syn::Path) -> syn::Result<TokenStream2> {
    let name = path.get_ident().map(ToString::to_string).unwrap_or_default();
    let variant = KINDS
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, variant)| syn::Ident::new(variant, path.span()))
        .ok_or_else(|| {
            let known: Vec<_> = KINDS.iter().map(|(key, _)| *key).collect();
            diag::error_spanned(
                path,
                format!("unknown kind, expected one of: {}", known.join(", ")),
            )
        })?;
    Ok(quote!(::propath_schema::FieldKind::#variant))
}
