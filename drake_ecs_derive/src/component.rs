use syn::{Data, DeriveInput, Fields};
use proc_macro::TokenStream;
use quote::quote;

/// Field-less structs are stored as tags, everything else gets a data pool.
fn is_tag(ast: &DeriveInput) -> bool {
    match &ast.data {
        Data::Struct(data) => match &data.fields {
            Fields::Unit => true,
            Fields::Named(fields) => fields.named.is_empty(),
            Fields::Unnamed(fields) => fields.unnamed.is_empty(),
        },
        _ => false,
    }
}

pub fn impl_component(ast: &DeriveInput) -> TokenStream {
    let name = &ast.ident;

    if !ast.generics.params.is_empty() {
        return syn::Error::new_spanned(
            &ast.generics,
            "#[derive(Component)] does not support generic types",
        )
        .to_compile_error()
        .into();
    }

    let storage = match is_tag(ast) {
        true => quote! { drake_ecs::components::TagPool<Self> },
        false => quote! { drake_ecs::components::DataPool<Self> },
    };

    let gen = quote! {
        impl drake_ecs::components::Component for #name {
            type Storage = #storage;

            #[inline(always)]
            fn component_id() -> drake_ecs::components::ComponentId {
                drake_ecs::lazy_static! {
                    static ref ID: drake_ecs::components::ComponentId =
                        drake_ecs::components::ComponentId::register::<#name>();
                }
                *ID
            }
        }
    };
    gen.into()
}
