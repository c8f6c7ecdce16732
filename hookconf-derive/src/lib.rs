//! Derive macro implementation for hookconf

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields};

mod attrs;

use attrs::FieldAttrs;

/// `EnvDecode` derive macro
///
/// Implements `hookconf::EnvDecode` for a struct with named fields: the
/// generated `decode_env` visits fields in declaration order, decoding each
/// `#[env("key")]` / `#[env("key,default")]` field through the decoder and
/// recursing into each `#[env(nested)]` field with the same configuration.
/// Untagged fields are left untouched.
///
/// The tag string is embedded verbatim; key/default splitting happens at
/// decode time inside `hookconf`, so tag validity is a runtime concern of
/// the decoder, not of this macro.
///
/// # Example
///
/// See the `hookconf` crate documentation for usage examples.
#[proc_macro_derive(EnvDecode, attributes(env))]
pub fn derive_env_decode(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    // Struct name
    let struct_name = &input.ident;

    // Extract fields
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return syn::Error::new_spanned(
                    &input,
                    "EnvDecode only supports structs with named fields",
                )
                .to_compile_error()
                .into();
            }
        },
        _ => {
            return syn::Error::new_spanned(&input, "EnvDecode only supports structs")
                .to_compile_error()
                .into();
        }
    };

    // One walk step per annotated field, in declaration order
    let mut steps = Vec::new();

    for field in fields {
        let field_ident = field.ident.as_ref().unwrap();

        let attrs = match FieldAttrs::from_field(field) {
            Ok(attrs) => attrs,
            Err(err) => return err.to_compile_error().into(),
        };

        if let Some(tag) = attrs.tag {
            let field_name = field_ident.to_string();
            steps.push(quote! {
                decoder.decode_field(&mut self.#field_ident, #field_name, #tag, source)?;
            });
        } else if attrs.nested {
            steps.push(quote! {
                ::hookconf::EnvDecode::decode_env(&mut self.#field_ident, decoder, source)?;
            });
        }
    }

    let expanded = quote! {
        impl ::hookconf::EnvDecode for #struct_name {
            fn decode_env(
                &mut self,
                decoder: &::hookconf::EnvDecoder,
                source: &dyn ::hookconf::EnvSource,
            ) -> ::core::result::Result<(), ::hookconf::DecodeError> {
                #(#steps)*
                Ok(())
            }
        }
    };

    TokenStream::from(expanded)
}
