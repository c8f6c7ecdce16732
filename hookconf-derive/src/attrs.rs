//! Attribute parsing for `#[env(...)]` annotations.
//!
//! Two forms are accepted on a field:
//! - `#[env("key")]` / `#[env("key,default")]`: a raw tag string, carried
//!   verbatim into the generated walk and parsed at decode time
//! - `#[env(nested)]`: recurse into the field as a nested structure

use syn::{Field, Ident, LitStr, Meta};

/// Parsed `#[env(...)]` attributes from a struct field.
#[derive(Debug, Default)]
pub struct FieldAttrs {
    /// Raw tag string (`key` or `key,default`), forwarded unparsed.
    ///
    /// Validation is deliberately deferred to the runtime tag parser so a
    /// malformed tag surfaces as a decode error, not a compile error.
    pub tag: Option<String>,

    /// Recurse into this field with the same decoder configuration.
    pub nested: bool,
}

impl FieldAttrs {
    /// Extract `#[env(...)]` attributes from a struct field.
    ///
    /// Attributes from other macros are ignored; a malformed `env`
    /// attribute is a compile error.
    pub fn from_field(field: &Field) -> syn::Result<Self> {
        let mut attrs = Self::default();

        for attr in &field.attrs {
            if !attr.path().is_ident("env") {
                continue;
            }

            let Meta::List(list) = &attr.meta else {
                return Err(syn::Error::new_spanned(
                    attr,
                    "expected #[env(\"key\")], #[env(\"key,default\")] or #[env(nested)]",
                ));
            };

            if let Ok(lit) = list.parse_args::<LitStr>() {
                attrs.tag = Some(lit.value());
                continue;
            }
            if let Ok(ident) = list.parse_args::<Ident>() {
                if ident == "nested" {
                    attrs.nested = true;
                    continue;
                }
                return Err(syn::Error::new_spanned(
                    attr,
                    format!("unsupported env attribute `{ident}`; expected a tag string or `nested`"),
                ));
            }
            return Err(syn::Error::new_spanned(
                attr,
                "expected #[env(\"key\")], #[env(\"key,default\")] or #[env(nested)]",
            ));
        }

        if attrs.tag.is_some() && attrs.nested {
            return Err(syn::Error::new_spanned(
                field,
                "a field cannot combine a tag string with `nested`",
            ));
        }

        Ok(attrs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn test_parse_tag_string() {
        let field: Field = parse_quote! {
            #[env("rotate_count,20")]
            pub rotate_count: u32
        };

        let attrs = FieldAttrs::from_field(&field).unwrap();
        assert_eq!(attrs.tag, Some("rotate_count,20".to_string()));
        assert!(!attrs.nested);
    }

    #[test]
    fn test_parse_plain_key() {
        let field: Field = parse_quote! {
            #[env("avatar")]
            pub avatar: String
        };

        let attrs = FieldAttrs::from_field(&field).unwrap();
        assert_eq!(attrs.tag, Some("avatar".to_string()));
    }

    #[test]
    fn test_parse_nested() {
        let field: Field = parse_quote! {
            #[env(nested)]
            pub info: Info
        };

        let attrs = FieldAttrs::from_field(&field).unwrap();
        assert!(attrs.nested);
        assert_eq!(attrs.tag, None);
    }

    #[test]
    fn test_untagged_field_is_empty() {
        let field: Field = parse_quote! {
            pub skipped: String
        };

        let attrs = FieldAttrs::from_field(&field).unwrap();
        assert_eq!(attrs.tag, None);
        assert!(!attrs.nested);
    }

    #[test]
    fn test_malformed_tag_is_forwarded_not_rejected() {
        // empty lookup key stays a runtime decode error
        let field: Field = parse_quote! {
            #[env(",default")]
            pub broken: String
        };

        let attrs = FieldAttrs::from_field(&field).unwrap();
        assert_eq!(attrs.tag, Some(",default".to_string()));
    }

    #[test]
    fn test_unknown_ident_rejected() {
        let field: Field = parse_quote! {
            #[env(flattened)]
            pub field: String
        };

        assert!(FieldAttrs::from_field(&field).is_err());
    }

    #[test]
    fn test_tag_and_nested_conflict() {
        let field: Field = parse_quote! {
            #[env("info")]
            #[env(nested)]
            pub info: Info
        };

        assert!(FieldAttrs::from_field(&field).is_err());
    }

    #[test]
    fn test_other_attributes_ignored() {
        let field: Field = parse_quote! {
            #[serde(rename = "user")]
            #[env("user_name")]
            pub user: String
        };

        let attrs = FieldAttrs::from_field(&field).unwrap();
        assert_eq!(attrs.tag, Some("user_name".to_string()));
    }
}
