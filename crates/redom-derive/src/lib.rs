//! `#[derive(Model)]` for `redom` entities.
//!
//! ```ignore
//! #[derive(Model)]
//! #[schema(data_structure = "JSON")]
//! struct Person {
//!     #[prop(indexed)]
//!     name: String,
//!
//!     #[prop(type = "number", sortable)]
//!     age: u32,
//!
//!     #[prop(nested, lazy)]
//!     address: Option<Address>,
//! }
//! ```

use proc_macro::TokenStream;

mod args;
mod helper;
mod model;

/// Implement `Model` from `#[schema(...)]` and `#[prop(...)]` attributes.
#[proc_macro_derive(Model, attributes(model, prop, schema))]
pub fn derive_model(input: TokenStream) -> TokenStream {
    model::derive_model(input.into()).into()
}
