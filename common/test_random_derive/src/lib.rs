use proc_macro::TokenStream;
use quote::{quote, ToTokens};
use syn::{parse_macro_input, DeriveInput, Fields};

/// Returns true if the field is marked `#[test_random(default)]`, meaning it is built with
/// `Default` rather than randomized.
fn should_use_default(field: &syn::Field) -> bool {
    field.attrs.iter().any(|attr| {
        attr.path.is_ident("test_random")
            && attr.tokens.to_token_stream().to_string().replace(' ', "") == "(default)"
    })
}

fn field_value(field: &syn::Field) -> proc_macro2::TokenStream {
    if should_use_default(field) {
        quote! { <_>::default() }
    } else {
        quote! { <_>::random_for_test(rng) }
    }
}

/// Implements `TestRandom` for a struct by randomizing each field in turn.
///
/// The trait must be in scope at the derive site.
#[proc_macro_derive(TestRandom, attributes(test_random))]
pub fn test_random_derive(input: TokenStream) -> TokenStream {
    let derived_input = parse_macro_input!(input as DeriveInput);
    let name = &derived_input.ident;
    let (impl_generics, ty_generics, where_clause) = &derived_input.generics.split_for_impl();

    let struct_data = match &derived_input.data {
        syn::Data::Struct(s) => s,
        _ => panic!("test_random_derive only supports structs."),
    };

    let body = match &struct_data.fields {
        Fields::Named(fields) => {
            let assignments = fields.named.iter().map(|field| {
                let ident = &field.ident;
                let value = field_value(field);
                quote! { #ident: #value }
            });
            quote! { Self { #(#assignments),* } }
        }
        Fields::Unnamed(fields) => {
            let values = fields.unnamed.iter().map(field_value);
            quote! { Self ( #(#values),* ) }
        }
        Fields::Unit => quote! {{ let _ = rng; Self }},
    };

    let output = quote! {
        impl #impl_generics TestRandom for #name #ty_generics #where_clause {
            fn random_for_test(rng: &mut impl rand::RngCore) -> Self {
                #body
            }
        }
    };

    output.into()
}
