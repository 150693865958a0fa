use {
    proc_macro::TokenStream,
    proc_macro2::Span,
    quote::{format_ident, quote},
    syn::{parse_macro_input, Data, DeriveInput, Error, Fields, Index, Result, Type},
};

pub fn process(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    expand(input)
        .unwrap_or_else(Error::into_compile_error)
        .into()
}

/// For each variant of the query message enum, emit a standalone request
/// struct implementing `QueryRequest`, plus a `From` impl converting the
/// struct back into the enum.
///
/// A variant such as `#[returns(u128)] Refund { user: Addr }` produces a
/// `QueryRefundRequest` struct with the same fields, whose associated
/// `Response` type is `u128`.
fn expand(input: DeriveInput) -> Result<proc_macro2::TokenStream> {
    let msg = input.ident;

    let Data::Enum(data) = input.data else {
        return Err(Error::new(
            Span::call_site(),
            "query requests can only be derived for enums",
        ));
    };

    let mut out = proc_macro2::TokenStream::new();

    for variant in data.variants {
        let variant_name = &variant.ident;
        let request = format_ident!("Query{}Request", variant_name);

        // The response type comes from the variant's `#[returns(..)]`
        // attribute.
        let response: Type = variant
            .attrs
            .iter()
            .find(|attr| attr.path().is_ident("returns"))
            .ok_or_else(|| {
                Error::new(variant_name.span(), "missing `#[returns(..)]` attribute")
            })?
            .parse_args()?;

        // How the request struct is declared, and how its fields move back
        // into the enum variant, depend on the variant's field kind.
        let (definition, conversion) = match &variant.fields {
            Fields::Named(fields) => {
                let decls = fields.named.iter().map(|field| {
                    let name = &field.ident;
                    let ty = &field.ty;
                    quote! { pub #name: #ty, }
                });
                let moves = fields.named.iter().map(|field| {
                    let name = &field.ident;
                    quote! { #name: req.#name, }
                });

                (
                    quote! {
                        #[plinth::derive(Serde)]
                        pub struct #request {
                            #(#decls)*
                        }
                    },
                    quote! { Self::#variant_name { #(#moves)* } },
                )
            },
            Fields::Unnamed(fields) => {
                let decls = fields.unnamed.iter().map(|field| {
                    let ty = &field.ty;
                    quote! { pub #ty, }
                });
                let moves = (0..fields.unnamed.len()).map(Index::from).map(|idx| {
                    quote! { req.#idx, }
                });

                (
                    quote! {
                        #[plinth::derive(Serde)]
                        pub struct #request(#(#decls)*);
                    },
                    quote! { Self::#variant_name(#(#moves)*) },
                )
            },
            Fields::Unit => (
                quote! {
                    #[plinth::derive(Serde)]
                    pub struct #request;
                },
                quote! { Self::#variant_name },
            ),
        };

        // Unit variants don't touch the request value in the conversion.
        let binding = match &variant.fields {
            Fields::Unit => quote! { _req },
            _ => quote! { req },
        };

        out.extend(quote! {
            #definition

            impl From<#request> for #msg {
                fn from(#binding: #request) -> Self {
                    #conversion
                }
            }

            impl ::plinth::QueryRequest for #request {
                type Message = #msg;
                type Response = #response;
            }
        });
    }

    Ok(out)
}
