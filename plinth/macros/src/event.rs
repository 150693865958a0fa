use {
    proc_macro::TokenStream,
    quote::quote,
    syn::{parse_macro_input, DeriveInput, LitStr},
};

pub fn process(attr: TokenStream, input: TokenStream) -> TokenStream {
    let name = parse_macro_input!(attr as LitStr);
    let input = parse_macro_input!(input as DeriveInput);
    let ident = &input.ident;

    // Conversion into `ContractEvent` is implemented for both `T` and `&T`,
    // so `Response::add_event` takes the struct either by value or by
    // reference.
    quote! {
        #input

        impl ::plinth::EventName for #ident {
            const EVENT_NAME: &'static str = #name;
        }

        impl TryFrom<#ident> for ::plinth::ContractEvent {
            type Error = ::plinth::StdError;

            fn try_from(event: #ident) -> Result<Self, Self::Error> {
                ::plinth::ContractEvent::new(#name, &event)
            }
        }

        impl TryFrom<&#ident> for ::plinth::ContractEvent {
            type Error = ::plinth::StdError;

            fn try_from(event: &#ident) -> Result<Self, Self::Error> {
                ::plinth::ContractEvent::new(#name, event)
            }
        }
    }
    .into()
}
