//! Proc macros for bconf.
//!
//! This crate provides `#[derive(Decode)]`, which implements `bconf::Decode`
//! for a struct with named fields. Use it through the `bconf` crate's
//! `derive` feature rather than depending on it directly.

mod decode;

use proc_macro::TokenStream;

/// Derive macro for implementing the `bconf::Decode` trait.
///
/// Every field is filled from the leaf of the same name, lowercased, unless
/// renamed. Field types must implement `bconf::FromLeaf`.
///
/// # Usage
///
/// ```ignore
/// use bconf::Decode;
///
/// #[derive(Decode, Default)]
/// struct Limits {
///     #[bconf(name = "max-conn")]
///     max_connections: u32,
///     ratio: f64,
///     #[bconf(skip)]
///     cache: Vec<u8>,
/// }
/// ```
///
/// # Attributes
///
/// - `#[bconf(name = "key")]`: look the field up under `key`, exactly as written.
/// - `#[bconf(skip)]`: never touch the field.
#[proc_macro_derive(Decode, attributes(bconf))]
pub fn derive_decode(input: TokenStream) -> TokenStream {
    decode::expand(input.into())
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
