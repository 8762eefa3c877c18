//! Implementation of the #[derive(Decode)] proc macro.

use proc_macro2::{Ident, TokenStream, TokenTree};
use quote::{quote, ToTokens};
use syn::ext::IdentExt;
use syn::{parse2, parse_quote, Attribute, Data, DataStruct, DeriveInput, Fields, LitStr, Type};

/// Per-field `#[bconf(...)]` settings.
#[derive(Default)]
struct FieldAttrs {
    name: Option<String>,
    skip: bool,
}

impl FieldAttrs {
    fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut parsed = Self::default();
        for attr in attrs {
            if !attr.path().is_ident("bconf") {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("name") {
                    let lit: LitStr = meta.value()?.parse()?;
                    if lit.value().is_empty() {
                        return Err(syn::Error::new_spanned(lit, "bconf name must not be empty"));
                    }
                    parsed.name = Some(lit.value());
                } else if meta.path.is_ident("skip") {
                    parsed.skip = true;
                } else {
                    return Err(meta.error("unknown bconf attribute"));
                }
                Ok(())
            })?;
        }
        Ok(parsed)
    }
}

/// Whether `ty` names any of the struct's type parameters.
fn mentions_param(ty: &Type, params: &[Ident]) -> bool {
    fn walk(tokens: TokenStream, params: &[Ident]) -> bool {
        tokens.into_iter().any(|tt| match tt {
            TokenTree::Ident(ident) => params.contains(&ident),
            TokenTree::Group(group) => walk(group.stream(), params),
            _ => false,
        })
    }
    walk(ty.to_token_stream(), params)
}

/// Expand the #[derive(Decode)] macro.
///
/// Generates one `bconf::decode::decode_field` call per field, in declaration
/// order, so a parse failure leaves earlier fields decoded. Field types that
/// use a type parameter get a `FromLeaf` bound on the impl.
pub fn expand(input: TokenStream) -> syn::Result<TokenStream> {
    let input: DeriveInput = parse2(input)?;
    let name = &input.ident;
    let mut generics = input.generics.clone();
    let params: Vec<Ident> = generics.type_params().map(|p| p.ident.clone()).collect();

    let fields = match &input.data {
        Data::Struct(DataStruct {
            fields: Fields::Named(named),
            ..
        }) => &named.named,
        _ => {
            return Err(syn::Error::new_spanned(
                name,
                "Decode can only be derived for structs with named fields",
            ))
        }
    };

    let mut steps = Vec::new();
    let mut bounded: Vec<&Type> = Vec::new();
    for field in fields {
        let attrs = FieldAttrs::parse(&field.attrs)?;
        if attrs.skip {
            continue;
        }
        let Some(ident) = &field.ident else {
            continue;
        };
        let key = attrs
            .name
            .unwrap_or_else(|| ident.unraw().to_string().to_lowercase());
        steps.push(quote! {
            ::bconf::decode::decode_field(node, #key, &mut self.#ident)?;
        });
        if mentions_param(&field.ty, &params) {
            bounded.push(&field.ty);
        }
    }

    if !bounded.is_empty() {
        let where_clause = generics.make_where_clause();
        for ty in bounded {
            where_clause
                .predicates
                .push(parse_quote!(#ty: ::bconf::FromLeaf));
        }
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::bconf::Decode for #name #ty_generics #where_clause {
            #[allow(unused_variables)]
            fn decode_from(&mut self, node: &::bconf::Bconf) -> ::bconf::Result<()> {
                #(#steps)*
                ::core::result::Result::Ok(())
            }
        }
    })
}
