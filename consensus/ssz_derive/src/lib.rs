//! Provides the following procedural derive macros:
//!
//! - `#[derive(Encode)]`
//! - `#[derive(Decode)]`
//! - `#[derive(SszSchema)]`
//!
//! These macros provide SSZ encoding/decoding for a `struct`, treating it as an SSZ container.
//! Fields are encoded/decoded in the order they are defined.
//!
//! Presently, only `structs` with named fields are supported. `enum`s and tuple-structs are
//! unsupported.
//!
//! Example:
//! ```
//! use ssz::{Decode, Encode};
//! use ssz_derive::{Encode, Decode};
//!
//! #[derive(Debug, PartialEq, Encode, Decode)]
//! struct Foo {
//!     pub bar: bool,
//!     pub baz: u64,
//! }
//!
//! fn main() {
//!     let foo = Foo {
//!         bar: true,
//!         baz: 42,
//!     };
//!
//!     let bytes = foo.as_ssz_bytes();
//!
//!     let decoded_foo = Foo::from_ssz_bytes(&bytes).unwrap();
//!
//!     assert_eq!(foo, decoded_foo);
//! }
//! ```
extern crate proc_macro;

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, DataStruct, DeriveInput, Ident, Type};

/// Returns the `(ident, type)` of every named field in the struct.
///
/// # Panics
/// Any unnamed struct field (like in a tuple struct) will raise a panic at compile time.
fn get_named_fields(struct_data: &DataStruct) -> Vec<(&Ident, &Type)> {
    struct_data
        .fields
        .iter()
        .map(|f| match &f.ident {
            Some(ref ident) => (ident, &f.ty),
            _ => panic!("ssz_derive only supports named struct fields."),
        })
        .collect()
}

fn get_struct_data(item: &DeriveInput) -> &DataStruct {
    match &item.data {
        syn::Data::Struct(s) => s,
        _ => panic!("ssz_derive only supports structs."),
    }
}

/// Implements `ssz::Encode` for some `struct`.
///
/// Fields are encoded in the order they are defined.
#[proc_macro_derive(Encode)]
pub fn ssz_encode_derive(input: TokenStream) -> TokenStream {
    let item = parse_macro_input!(input as DeriveInput);

    let name = &item.ident;
    let (impl_generics, ty_generics, where_clause) = &item.generics.split_for_impl();

    let fields = get_named_fields(get_struct_data(&item));
    let field_idents = fields.iter().map(|(ident, _)| *ident).collect::<Vec<_>>();
    let field_types = fields.iter().map(|(_, ty)| *ty).collect::<Vec<_>>();

    let output = quote! {
        impl #impl_generics ssz::Encode for #name #ty_generics #where_clause {
            fn is_ssz_fixed_len() -> bool {
                #(
                    <#field_types as ssz::Encode>::is_ssz_fixed_len() &&
                )*
                    true
            }

            fn ssz_fixed_len() -> usize {
                if <Self as ssz::Encode>::is_ssz_fixed_len() {
                    #(
                        <#field_types as ssz::Encode>::ssz_fixed_len() +
                    )*
                        0
                } else {
                    ssz::BYTES_PER_LENGTH_OFFSET
                }
            }

            fn ssz_bytes_len(&self) -> usize {
                if <Self as ssz::Encode>::is_ssz_fixed_len() {
                    <Self as ssz::Encode>::ssz_fixed_len()
                } else {
                    let mut len: usize = 0;
                    #(
                        if <#field_types as ssz::Encode>::is_ssz_fixed_len() {
                            len += <#field_types as ssz::Encode>::ssz_fixed_len();
                        } else {
                            len += ssz::BYTES_PER_LENGTH_OFFSET;
                            len += self.#field_idents.ssz_bytes_len();
                        }
                    )*

                    len
                }
            }

            fn ssz_append(&self, buf: &mut Vec<u8>) {
                let mut encoder = ssz::SszEncoder::container(buf);

                #(
                    encoder.append(&self.#field_idents);
                )*

                encoder.finalize();
            }
        }
    };
    output.into()
}

/// Implements `ssz::Decode` for some `struct`.
///
/// Fields are decoded in the order they are defined.
#[proc_macro_derive(Decode)]
pub fn ssz_decode_derive(input: TokenStream) -> TokenStream {
    let item = parse_macro_input!(input as DeriveInput);

    let name = &item.ident;
    let (impl_generics, ty_generics, where_clause) = &item.generics.split_for_impl();

    let fields = get_named_fields(get_struct_data(&item));
    let field_idents = fields.iter().map(|(ident, _)| *ident).collect::<Vec<_>>();
    let field_types = fields.iter().map(|(_, ty)| *ty).collect::<Vec<_>>();

    let output = quote! {
        impl #impl_generics ssz::Decode for #name #ty_generics #where_clause {
            fn is_ssz_fixed_len() -> bool {
                #(
                    <#field_types as ssz::Decode>::is_ssz_fixed_len() &&
                )*
                    true
            }

            fn ssz_fixed_len() -> usize {
                if <Self as ssz::Decode>::is_ssz_fixed_len() {
                    #(
                        <#field_types as ssz::Decode>::ssz_fixed_len() +
                    )*
                        0
                } else {
                    ssz::BYTES_PER_LENGTH_OFFSET
                }
            }

            fn from_ssz_bytes(bytes: &[u8]) -> std::result::Result<Self, ssz::DecodeError> {
                let mut builder = ssz::SszDecoderBuilder::new(bytes);

                #(
                    builder.register_type::<#field_types>()?;
                )*

                let mut decoder = builder.build()?;

                Ok(Self {
                    #(
                        #field_idents: decoder.decode_next()?,
                    )*
                })
            }
        }
    };
    output.into()
}

/// Implements `ssz::SszSchema` for some `struct`, describing it as a container of its fields.
#[proc_macro_derive(SszSchema)]
pub fn ssz_schema_derive(input: TokenStream) -> TokenStream {
    let item = parse_macro_input!(input as DeriveInput);

    let name = &item.ident;
    let name_str = name.to_string();
    let (impl_generics, ty_generics, where_clause) = &item.generics.split_for_impl();

    let fields = get_named_fields(get_struct_data(&item));
    let field_names = fields
        .iter()
        .map(|(ident, _)| ident.to_string())
        .collect::<Vec<_>>();
    let field_types = fields.iter().map(|(_, ty)| *ty).collect::<Vec<_>>();

    let output = quote! {
        impl #impl_generics ssz::SszSchema for #name #ty_generics #where_clause {
            fn ssz_schema() -> ssz::SszType {
                ssz::SszType::Container {
                    name: #name_str,
                    fields: vec![
                        #(
                            (#field_names, <#field_types as ssz::SszSchema>::ssz_schema()),
                        )*
                    ],
                }
            }
        }
    };
    output.into()
}
