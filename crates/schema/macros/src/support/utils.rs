use syn::spanned::Spanned;
use syn::{Data, DeriveInput, Fields, Ident};

/// Return named fields if the input is a struct with them; otherwise error.
pub fn require_named_fields(input: &DeriveInput) -> syn::Result<&syn::FieldsNamed> {
    let fields = match &input.data {
        Data::Struct(s) => &s.fields,
        _ => {
            return Err(syn::Error::new(
                input.ident.span(),
                "This derive can only be used on structs",
            ));
        }
    };
    match fields {
        Fields::Named(n) => Ok(n),
        Fields::Unnamed(_) => Err(syn::Error::new(
            fields.span(),
            "This derive requires a struct with named fields (e.g. `struct X { ... }`)",
        )),
        Fields::Unit => Err(syn::Error::new(
            fields.span(),
            "This derive requires a non-unit struct with fields",
        )),
    }
}

/// Field name as written, without a raw-identifier prefix.
pub fn unraw(ident: &Ident) -> String {
    let name = ident.to_string();
    match name.strip_prefix("r#") {
        Some(stripped) => stripped.to_owned(),
        None => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quote::format_ident;

    #[test]
    fn strips_raw_prefix() {
        assert_eq!(unraw(&format_ident!("r#type")), "type");
        assert_eq!(unraw(&format_ident!("name")), "name");
    }

    #[test]
    fn rejects_enums() {
        let input: DeriveInput = syn::parse_quote!(enum E { A });
        assert!(require_named_fields(&input).is_err());
    }

    #[test]
    fn rejects_tuple_structs() {
        let input: DeriveInput = syn::parse_quote!(struct T(u8););
        assert!(require_named_fields(&input).is_err());
    }
}
