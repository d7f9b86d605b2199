#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Attribute macros shared by every crate of the album workspace.
//!
//! * [`macro@album_error`] turns a plain enum into the workspace error type shape.
//! * [`macro@album_slice`] turns a struct into a cheaply cloneable feature slice handle.
//!
//! Examples are `ignore`d here because a proc-macro crate cannot use its own macros;
//! the consuming crates carry the real tests.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, ItemStruct, parse_macro_input};

/// Declares a domain error enum with context support.
///
/// # Generated Items
///
/// * `#[derive(Debug, thiserror::Error)]` unless already derived.
/// * `<ErrorName>Ext` trait with `.context(...)`, implemented for `Result<T, ErrorName>`
///   and for `Result<T, Source>` of every variant that wraps a source error.
/// * `From<Source>` for variants with a `source` field (or a `#[source]`/`#[from]` field).
/// * `From<&'static str>` and `From<String>` when an `Internal` variant exists.
/// * A private `format_context` helper used inside `#[error(...)]` strings.
///
/// # Requirements
///
/// Every variant uses named fields. Variants with a source must also carry
/// `context: Option<Cow<'static, str>>`.
///
/// # Example
///
/// ```rust,ignore
/// use std::borrow::Cow;
///
/// #[album_derive::album_error]
/// pub enum StoreError {
///     #[error("Event error{}: {source}", format_context(.context))]
///     Event { source: EventBusError, context: Option<Cow<'static, str>> },
///
///     #[error("Internal error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn publish(bus: &EventBus) -> Result<(), StoreError> {
///     bus.publish(Changed).context("Publishing change")?;
///     Ok(())
/// }
/// ```
#[proc_macro_attribute]
pub fn album_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand(input).into()
}

/// Declares a feature slice handle.
///
/// The annotated struct becomes `<Name>Inner`; `<Name>` wraps it in an `Arc`,
/// derefs to it and implements `album_kernel::domain::registry::FeatureSlice`.
///
/// # Example
/// ```rust,ignore
/// #[album_derive::album_slice]
/// pub struct Members {
///     pub store: MemberStore,
/// }
///
/// let slice = Members::new(MembersInner { store });
/// ```
#[proc_macro_attribute]
pub fn album_slice(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemStruct);
    macros::slice::expand(input).into()
}
