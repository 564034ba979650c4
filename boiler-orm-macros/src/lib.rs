use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod attr;
mod quotes;
mod types;

/// Derives the `boiler_orm::Entity` trait for a struct.
///
/// Field declaration order fixes the column order used for every generated
/// statement. Options live under the `boiler_orm` attribute:
/// `table_name = "..."` at the struct level; `primary_key`,
/// `column = "..."` and `skip` at the field level. A field named `id` is
/// the primary key by default.
#[proc_macro_derive(Entity, attributes(boiler_orm))]
pub fn derive_entity(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let attr = attr::Attr::parse(input);

    TokenStream::from(quotes::entity_impl(&attr))
}
