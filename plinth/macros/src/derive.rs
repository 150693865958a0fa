use {
    proc_macro::TokenStream,
    proc_macro2::Span,
    quote::quote,
    syn::{
        parse::{Parse, ParseStream},
        parse_macro_input,
        punctuated::Punctuated,
        token::Comma,
        Data, DeriveInput, Error, Ident,
    },
};

struct Args {
    serde: bool,
    borsh: bool,
    query: bool,
}

impl Parse for Args {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut args = Args {
            serde: false,
            borsh: false,
            query: false,
        };

        for ident in Punctuated::<Ident, Comma>::parse_terminated(input)? {
            let flag = match ident.to_string().as_str() {
                "Serde" => &mut args.serde,
                "Borsh" => &mut args.borsh,
                "QueryRequest" => &mut args.query,
                _ => {
                    return Err(Error::new(
                        ident.span(),
                        "unknown argument, expecting `Serde`, `Borsh` or `QueryRequest`",
                    ));
                },
            };

            if *flag {
                return Err(Error::new(ident.span(), format!("`{ident}` given twice")));
            }

            *flag = true;
        }

        Ok(args)
    }
}

pub fn process(attr: TokenStream, input: TokenStream) -> TokenStream {
    let args = parse_macro_input!(attr as Args);
    let input = parse_macro_input!(input as DeriveInput);

    if matches!(input.data, Data::Union(_)) {
        return Error::new(Span::call_site(), "expecting a struct or an enum, got a union")
            .into_compile_error()
            .into();
    }

    // `skip_serializing_none` rewrites the item, so it has to sit above the
    // `derive` attribute; the codec crate-routing attributes have to sit
    // below it.
    let mut above = proc_macro2::TokenStream::new();
    let mut codecs = proc_macro2::TokenStream::new();
    let mut below = proc_macro2::TokenStream::new();

    if args.serde {
        above.extend(quote! {
            #[::plinth::__private::serde_with::skip_serializing_none]
        });
        codecs.extend(quote! {
            ::plinth::__private::serde::Serialize,
            ::plinth::__private::serde::Deserialize,
        });
        below.extend(quote! {
            #[serde(rename_all = "snake_case", crate = "::plinth::__private::serde")]
        });
    }

    if args.borsh {
        codecs.extend(quote! {
            ::plinth::__private::borsh::BorshSerialize,
            ::plinth::__private::borsh::BorshDeserialize,
        });
        below.extend(quote! {
            #[borsh(crate = "::plinth::__private::borsh")]
        });
    }

    if args.query {
        codecs.extend(quote! {
            ::plinth::QueryRequest,
        });
    }

    quote! {
        #above
        #[derive(
            #codecs
            ::std::clone::Clone,
            ::std::fmt::Debug,
            ::std::cmp::PartialEq,
            ::std::cmp::Eq,
        )]
        #below
        #input
    }
    .into()
}
