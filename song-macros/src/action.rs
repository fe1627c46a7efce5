//! `#[derive(Action)]` implementation.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{
    DeriveInput, GenericParam, Ident, LitStr, Token, WherePredicate, ext::IdentExt,
    parse::ParseStream, parse_quote,
};

/// Arguments accepted by `#[action(...)]`.
#[derive(Default)]
struct ActionArgs {
    name: Option<LitStr>,
}

impl ActionArgs {
    fn parse_into(&mut self, input: ParseStream) -> syn::Result<()> {
        while !input.is_empty() {
            let ident: Ident = input.parse()?;
            input.parse::<Token![=]>()?;

            match ident.to_string().as_str() {
                "name" => {
                    let lit: LitStr = input.parse()?;
                    if lit.value().is_empty() || lit.value().chars().any(char::is_whitespace) {
                        return Err(syn::Error::new(
                            lit.span(),
                            "action name must be non-empty and contain no whitespace",
                        ));
                    }
                    self.name = Some(lit);
                }
                other => {
                    return Err(syn::Error::new(
                        ident.span(),
                        format!("unknown attribute: {}", other),
                    ));
                }
            }

            if input.peek(Token![,]) {
                input.parse::<Token![,]>()?;
            }
        }
        Ok(())
    }
}

pub fn derive_action_impl(input: TokenStream) -> TokenStream {
    match syn::parse2::<DeriveInput>(input).and_then(expand) {
        Ok(expanded) => expanded,
        Err(err) => err.to_compile_error(),
    }
}

fn expand(input: DeriveInput) -> syn::Result<TokenStream> {
    let ident = &input.ident;

    let mut args = ActionArgs::default();
    for attr in input.attrs.iter().filter(|attr| attr.path().is_ident("action")) {
        attr.parse_args_with(|input: ParseStream| args.parse_into(input))?;
    }

    let name = args
        .name
        .unwrap_or_else(|| LitStr::new(&ident.unraw().to_string(), ident.span()));

    // Actions cross threads and are matched by `TypeId`.
    let mut generics = input.generics.clone();
    let bounds: Vec<WherePredicate> = generics
        .params
        .iter()
        .filter_map(|param| match param {
            GenericParam::Type(ty) => {
                let ty = &ty.ident;
                Some(parse_quote!(#ty: ::core::marker::Send + ::core::marker::Sync + 'static))
            }
            GenericParam::Lifetime(lt) => {
                let lt = &lt.lifetime;
                Some(parse_quote!(#lt: 'static))
            }
            GenericParam::Const(_) => None,
        })
        .collect();
    if !bounds.is_empty() {
        generics.make_where_clause().predicates.extend(bounds);
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::song::Action for #ident #ty_generics #where_clause {
            const NAME: &'static str = #name;
        }
    })
}
