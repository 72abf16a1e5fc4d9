use syn::{DeriveInput, Meta, NestedMeta};
use proc_macro::TokenStream;
use quote::quote;

const PHASES: &[&str] = &["pre_init", "init", "run", "destroy", "injection_complete"];

pub fn impl_system(ast: &DeriveInput) -> TokenStream {
    match capability_calls(ast) {
        Ok(calls) => {
            let name = &ast.ident;
            let (impl_generics, ty_generics, where_clause) = ast.generics.split_for_impl();

            let gen = quote! {
                impl #impl_generics drake_ecs::systems::System for #name #ty_generics #where_clause {
                    fn capabilities(caps: &mut drake_ecs::systems::Capabilities<Self>) {
                        #(#calls)*
                    }
                }
            };
            gen.into()
        },
        Err(error) => error.to_compile_error().into(),
    }
}

fn capability_calls(ast: &DeriveInput) -> syn::Result<Vec<proc_macro2::TokenStream>> {
    let mut calls = Vec::new();

    for attr in ast.attrs.iter().filter(|a| a.path.is_ident("system")) {
        let list = match attr.parse_meta()? {
            Meta::List(list) => list,
            other => return Err(syn::Error::new_spanned(other, "expected #[system(...)]")),
        };

        for nested in list.nested {
            match nested {
                NestedMeta::Meta(Meta::Path(path)) => {
                    let ident = match path.get_ident() {
                        Some(ident) if PHASES.contains(&ident.to_string().as_str()) => ident.clone(),
                        _ => return Err(syn::Error::new_spanned(path, "unknown system capability")),
                    };
                    calls.push(quote! { caps.#ident(); });
                },
                NestedMeta::Meta(Meta::List(inner)) if inner.path.is_ident("inject") => {
                    for ty in inner.nested {
                        match ty {
                            NestedMeta::Meta(Meta::Path(ty)) => calls.push(quote! { caps.inject::<#ty>(); }),
                            other => return Err(syn::Error::new_spanned(other, "expected a type path")),
                        }
                    }
                },
                other => return Err(syn::Error::new_spanned(other, "unknown system capability")),
            }
        }
    }

    Ok(calls)
}
