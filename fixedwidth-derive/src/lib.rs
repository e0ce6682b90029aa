//! `#[derive(FixedWidth)]` for the `fixedwidth` crate.
//!
//! Registers each field carrying a `#[fixed = "<start>,<end>[,leftpad]"]`
//! attribute, in declaration order, and generates an `Encode` impl that
//! lays them out with a `LineBuilder`. Fields without the attribute are not
//! registered and need not be encodable.
//!
//! The declaration string is kept as written: a malformed one is skipped at
//! encode time rather than rejected here.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Data, DeriveInput, Expr, ExprLit, Fields, Index, Lit, LitStr, Meta, parse_macro_input};

const USAGE: &str = "expected `#[fixed = \"<start>,<end>[,leftpad]\"]`";

#[proc_macro_derive(FixedWidth, attributes(fixed))]
pub fn derive_fixed_width(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(&input) {
        Ok(expanded) => expanded.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            name,
            "FixedWidth can only be derived for structs",
        ));
    };

    // Generate one `line.field(tag, &self.member)?;` per tagged field
    let mut generated_lines = Vec::new();
    let members: Vec<(&syn::Field, TokenStream2)> = match &data.fields {
        Fields::Named(fields) => fields
            .named
            .iter()
            .map(|f| {
                let ident = f.ident.as_ref();
                (f, quote!(#ident))
            })
            .collect(),
        Fields::Unnamed(fields) => fields
            .unnamed
            .iter()
            .enumerate()
            .map(|(i, f)| {
                let index = Index::from(i);
                (f, quote!(#index))
            })
            .collect(),
        Fields::Unit => Vec::new(),
    };

    for (field, member) in members {
        if let Some(tag) = position_tag(field)? {
            generated_lines.push(quote! {
                line.field(#tag, &self.#member)?;
            });
        }
    }

    Ok(quote! {
        impl #impl_generics ::fixedwidth::Encode for #name #ty_generics #where_clause {
            fn encode(&self) -> ::fixedwidth::Result<::std::vec::Vec<u8>> {
                #[allow(unused_mut)]
                let mut line = ::fixedwidth::LineBuilder::new();
                #(#generated_lines)*
                ::std::result::Result::Ok(line.finish())
            }
        }
    })
}

/// Read the `#[fixed = "..."]` attribute of a field, if any.
fn position_tag(field: &syn::Field) -> syn::Result<Option<LitStr>> {
    let mut tag = None;
    for attr in field.attrs.iter().filter(|a| a.path().is_ident("fixed")) {
        let Meta::NameValue(nv) = &attr.meta else {
            return Err(syn::Error::new_spanned(attr, USAGE));
        };
        let Expr::Lit(ExprLit {
            lit: Lit::Str(lit), ..
        }) = &nv.value
        else {
            return Err(syn::Error::new_spanned(&nv.value, USAGE));
        };
        if tag.is_some() {
            return Err(syn::Error::new_spanned(attr, "duplicate `fixed` attribute"));
        }
        tag = Some(lit.clone());
    }
    Ok(tag)
}
