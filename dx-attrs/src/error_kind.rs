use proc_macro2::TokenStream as TokenStream2;
use quote::{quote, ToTokens};
use syn::{
    parse::{Parse, ParseStream},
    Data,
    DeriveInput,
    Expr,
    Generics,
    Ident,
    Result,
};

/// The arguments that can be passed to the `error` attribute.
#[derive(Debug, Default)]
struct ErrorArgs {
    message: Option<Expr>,
    labels: Option<Expr>,
    help: Option<Expr>,
}

/// The target struct to derive `ErrorKind` for.
#[derive(Debug)]
pub struct ErrorKindTarget {
    name: Ident,
    generics: Generics,
    message: Expr,
    labels: Option<Expr>,
    help: Option<Expr>,
}

impl Parse for ErrorKindTarget {
    fn parse(input: ParseStream) -> Result<Self> {
        let input: DeriveInput = input.parse()?;
        if !matches!(input.data, Data::Struct(_)) {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "`ErrorKind` can only be derived for structs",
            ));
        }

        let mut args = ErrorArgs::default();
        for attr in input.attrs.iter().filter(|attr| attr.path().is_ident("error")) {
            attr.parse_nested_meta(|meta| {
                let slot = if meta.path.is_ident("message") {
                    &mut args.message
                } else if meta.path.is_ident("labels") {
                    &mut args.labels
                } else if meta.path.is_ident("help") {
                    &mut args.help
                } else {
                    return Err(meta.error("unknown tag, expected `message`, `labels` or `help`"));
                };
                *slot = Some(meta.value()?.parse()?);
                Ok(())
            })?;
        }

        let Some(message) = args.message else {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "missing `#[error(message = ...)]` attribute",
            ));
        };

        Ok(Self {
            name: input.ident,
            generics: input.generics,
            message,
            labels: args.labels,
            help: args.help,
        })
    }
}

impl ToTokens for ErrorKindTarget {
    fn to_tokens(&self, tokens: &mut TokenStream2) {
        let name = &self.name;
        let (impl_generics, ty_generics, where_clause) = self.generics.split_for_impl();
        let message = &self.message;
        let labels = self.labels
            .as_ref()
            .map_or_else(|| quote! { ::std::iter::repeat("") }, |labels| quote! { #labels });
        let help = self.help.as_ref().map(|help| quote! { builder.set_help(#help); });

        tokens.extend(quote! {
            impl #impl_generics ErrorKind for #name #ty_generics #where_clause {
                fn as_any(&self) -> &dyn ::std::any::Any {
                    self
                }

                fn message(&self) -> ::std::string::String {
                    ::std::string::ToString::to_string(&(#message))
                }

                fn build_report<'a>(
                    &self,
                    src_id: &'a str,
                    spans: &[::std::ops::Range<usize>],
                ) -> ariadne::Report<(&'a str, ::std::ops::Range<usize>)> {
                    let offset = spans.first().map_or(0, |span| span.start);

                    #[allow(unused_mut)]
                    let mut builder = ariadne::Report::build(ariadne::ReportKind::Error, src_id, offset)
                        .with_message(self.message())
                        .with_labels(
                            spans.iter()
                                .cloned()
                                .zip(#labels)
                                .map(|(span, label_str)| {
                                    let label_str = ::std::string::ToString::to_string(&label_str);
                                    let mut label = ariadne::Label::new((src_id, span))
                                        .with_color(dx_error::EXPR);

                                    if !label_str.is_empty() {
                                        label = label.with_message(label_str);
                                    }

                                    label
                                })
                                .collect::<::std::vec::Vec<_>>()
                        );

                    #help
                    builder.finish()
                }
            }
        });
    }
}
