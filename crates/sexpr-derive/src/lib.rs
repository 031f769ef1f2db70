//! Derive macros for sexpr.
//!
//! `#[derive(Record)]` implements `sexpr::Record` and `sexpr::Encode` for a
//! struct with named fields.
//!
//! - `#[sexp(coding = "alist")]` / `#[sexp(coding = "plist")]` on the struct
//!   picks the rendering mode (alist when absent).
//! - `#[sexp(name = "key")]` on a field overrides its key. Only the text
//!   before the first comma is used.
//! - `#[sexp(skip)]` hides a `pub` field.
//!
//! - `#[sexp(crate = "path")]` on the struct sets the path to the `sexpr`
//!   crate (default `::sexpr`), for renamed dependencies or code inside
//!   `sexpr` itself.
//!
//! Only `pub` fields are rendered. Other fields are ignored entirely and do
//! not need to implement `Encode`. Raw identifiers lose their `r#` prefix:
//! `pub r#type` is keyed `type`.

use proc_macro::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Fields, LitStr, Visibility, parse_macro_input, parse_quote};

#[proc_macro_derive(Record, attributes(sexp))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

struct FieldSpec {
    ident: syn::Ident,
    ty: syn::Type,
    tag: Option<String>,
    exported: bool,
}

fn expand(input: DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;
    let name_str = name.unraw().to_string();
    let StructAttrs { coding, krate } = struct_attrs(&input)?;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => named
                .named
                .iter()
                .map(field_spec)
                .collect::<syn::Result<Vec<_>>>()?,
            Fields::Unit => Vec::new(),
            Fields::Unnamed(_) => {
                return Err(syn::Error::new_spanned(
                    name,
                    "Record can only be derived for structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                name,
                "Record can only be derived for structs",
            ));
        }
    };

    let coding_call = coding.map(|c| quote! { .coding_tag(#c) });
    let field_calls = fields.iter().map(|f| {
        let field_name = f.ident.unraw().to_string();
        match (&f.tag, f.exported) {
            (_, false) => quote! { .private_field(#field_name) },
            (Some(tag), true) => quote! { .field_tagged(#field_name, #tag) },
            (None, true) => quote! { .field(#field_name) },
        }
    });
    let field_arms = fields
        .iter()
        .enumerate()
        .filter(|(_, f)| f.exported)
        .map(|(index, f)| {
            let ident = &f.ident;
            quote! { #index => ::core::option::Option::Some(&self.#ident), }
        });

    // Bound only fields that mention type parameters; bounding concrete
    // types breaks self-referential records.
    let params: Vec<String> = input
        .generics
        .type_params()
        .map(|p| p.ident.to_string())
        .collect();
    let mut generics = input.generics.clone();
    {
        let where_clause = generics.make_where_clause();
        for f in fields.iter().filter(|f| f.exported) {
            let ty = &f.ty;
            if mentions_any(quote!(#ty), &params) {
                where_clause
                    .predicates
                    .push(parse_quote! { #ty: #krate::Encode });
            }
        }
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics #krate::Record for #name #ty_generics #where_clause {
            fn descriptor(&self) -> &#krate::RecordDescriptor {
                static DESCRIPTOR: ::std::sync::OnceLock<#krate::RecordDescriptor> =
                    ::std::sync::OnceLock::new();
                DESCRIPTOR.get_or_init(|| {
                    #krate::RecordDescriptor::builder(#name_str)
                        #coding_call
                        #(#field_calls)*
                        .build()
                })
            }

            fn field(&self, index: usize) -> ::core::option::Option<&dyn #krate::Encode> {
                match index {
                    #(#field_arms)*
                    _ => ::core::option::Option::None,
                }
            }
        }

        impl #impl_generics #krate::Encode for #name #ty_generics #where_clause {
            fn classify(&self) -> #krate::Category<'_> {
                #krate::Category::Record(self)
            }
        }
    })
}

fn mentions_any(tokens: proc_macro2::TokenStream, idents: &[String]) -> bool {
    tokens.into_iter().any(|tree| match tree {
        proc_macro2::TokenTree::Ident(ident) => idents.iter().any(|i| ident == i),
        proc_macro2::TokenTree::Group(group) => mentions_any(group.stream(), idents),
        _ => false,
    })
}

struct StructAttrs {
    coding: Option<String>,
    krate: syn::Path,
}

/// Read `#[sexp(coding = "...", crate = "...")]` from the struct attributes.
fn struct_attrs(input: &DeriveInput) -> syn::Result<StructAttrs> {
    let mut coding = None;
    let mut krate: syn::Path = parse_quote!(::sexpr);
    for attr in input.attrs.iter().filter(|a| a.path().is_ident("sexp")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("coding") {
                let lit: LitStr = meta.value()?.parse()?;
                match lit.value().as_str() {
                    "alist" | "plist" => coding = Some(lit.value()),
                    other => {
                        return Err(syn::Error::new_spanned(
                            &lit,
                            format!("unknown coding `{other}`, expected \"alist\" or \"plist\""),
                        ));
                    }
                }
                Ok(())
            } else if meta.path.is_ident("crate") {
                let lit: LitStr = meta.value()?.parse()?;
                krate = lit.parse()?;
                Ok(())
            } else {
                Err(meta.error("unsupported sexp attribute, expected `coding` or `crate`"))
            }
        })?;
    }
    Ok(StructAttrs { coding, krate })
}

fn field_spec(field: &syn::Field) -> syn::Result<FieldSpec> {
    let mut tag = None;
    let mut skip = false;
    for attr in field.attrs.iter().filter(|a| a.path().is_ident("sexp")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                let lit: LitStr = meta.value()?.parse()?;
                tag = Some(lit.value());
                Ok(())
            } else if meta.path.is_ident("skip") {
                skip = true;
                Ok(())
            } else {
                Err(meta.error("unsupported sexp attribute, expected `name` or `skip`"))
            }
        })?;
    }

    let ident = field
        .ident
        .clone()
        .ok_or_else(|| syn::Error::new_spanned(field, "expected a named field"))?;
    // pub(crate) and friends are not part of the public shape.
    let exported = matches!(field.vis, Visibility::Public(_)) && !skip;

    Ok(FieldSpec {
        ident,
        ty: field.ty.clone(),
        tag,
        exported,
    })
}
