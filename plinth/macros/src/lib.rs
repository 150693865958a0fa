mod derive;
mod event;
mod query;

use proc_macro::TokenStream;

/// Apply the standard set of derives for a message or state type.
///
/// Takes one or both of the arguments `Serde` and `Borsh`, specifying which
/// codecs the type must support; additionally `QueryRequest` for query message
/// enums.
#[proc_macro_attribute]
pub fn derive(attr: TokenStream, input: TokenStream) -> TokenStream {
    derive::process(attr, input)
}

/// Designate a struct as a contract event with the given name.
#[proc_macro_attribute]
pub fn event(attr: TokenStream, input: TokenStream) -> TokenStream {
    event::process(attr, input)
}

/// For each variant of a query message enum, generate a single query request
/// type implementing the `QueryRequest` trait.
#[proc_macro_derive(QueryRequest, attributes(returns))]
pub fn query_request(input: TokenStream) -> TokenStream {
    query::process(input)
}
