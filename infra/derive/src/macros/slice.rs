use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::ItemStruct;

pub fn expand(input: ItemStruct) -> TokenStream {
    let handle = &input.ident;
    let vis = &input.vis;
    let fields = &input.fields;
    let attrs = &input.attrs;
    let inner = format_ident!("{handle}Inner");

    let body = match fields {
        syn::Fields::Named(_) => quote! { #fields },
        syn::Fields::Unnamed(_) => quote! { #fields; },
        syn::Fields::Unit => quote! { ; },
    };

    quote! {
        #(#attrs)*
        #[derive(Debug)]
        #vis struct #inner #body

        /// Shared handle to the slice state.
        #[derive(Debug, Clone)]
        #vis struct #handle {
            inner: std::sync::Arc<#inner>,
        }

        impl #handle {
            #[must_use]
            pub fn new(inner: #inner) -> Self {
                Self { inner: std::sync::Arc::new(inner) }
            }
        }

        impl std::ops::Deref for #handle {
            type Target = #inner;

            fn deref(&self) -> &Self::Target {
                &self.inner
            }
        }

        impl ::album_kernel::domain::registry::FeatureSlice for #handle {
            fn name(&self) -> &'static str {
                stringify!(#handle)
            }

            fn as_any(&self) -> &dyn std::any::Any {
                self
            }
        }
    }
}
