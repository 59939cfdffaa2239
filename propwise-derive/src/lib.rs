//! Procedural macros for propwise.
//!
//! # Macros
//!
//! - [`Properties`] - Derive per-type property registration
//!
//! # Example
//!
//! ```rust,ignore
//! #[derive(Default, propwise::Properties)]
//! #[props(rename_all = "camelCase")]
//! struct OrderQuery {
//!     status: Option<String>,
//!     owner_id: Option<i64>,
//!     #[props(skip)]
//!     page: u32,
//! }
//! ```

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod derive;

/// Derive macro registering the properties of a struct.
///
/// Generates an implementation of `propwise::Properties` backed by a
/// `static` shape, so enumeration never re-derives metadata.
///
/// # Attributes
///
/// ## Struct-level
/// - `#[props(rename_all = "camelCase")]` - Rename every property
///   (`camelCase`, `PascalCase`, `snake_case`, `kebab-case`,
///   `SCREAMING_SNAKE_CASE`)
/// - `#[props(crate = "path")]` - Path to the propwise crate (default `::propwise`)
///
/// ## Field-level
/// - `#[props(skip)]` - Not a property
/// - `#[props(rename = "name")]` - Property name
/// - `#[props(column = "col")]` - Column used by query contexts
/// - `#[props(readonly)]` - Never written by the copier
///
/// Field types must implement `propwise::PropertyType`.
#[proc_macro_derive(Properties, attributes(props))]
pub fn derive_properties(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match derive::derive_properties_impl(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}
