mod error_kind;

use error_kind::ErrorKindTarget;
use proc_macro::TokenStream;
use quote::ToTokens;
use syn::parse_macro_input;

/// Derives the `ErrorKind` trait from `dx-error` for the given struct.
///
/// The information of the error is customized using the `error` attribute:
/// ```
/// use dx_attrs::ErrorKind;
/// use dx_error::ErrorKind;
///
/// #[derive(Debug, ErrorKind)]
/// #[error(
///     message = "unexpected end of expression",
///     labels = ["add something here"],
///     help = format!("for example: {}", self.example),
/// )]
/// pub struct Foo {
///     example: &'static str,
/// }
/// ```
///
/// The following tags are available:
///
/// | Tag       | Description                                                                  |
/// | --------- | ---------------------------------------------------------------------------- |
/// | `message` | The message displayed at the top of the error. Required.                     |
/// | `labels`  | An iterable of label texts; the `n`-th label is attached to the `n`-th span. |
/// | `help`    | Optional help text, describing what the user can do to fix the error.        |
///
/// Each tag accepts an expression that evaluates to something implementing
/// [`ToString`](std::string::ToString). The expressions are evaluated inside a method of the
/// struct, so its fields are available through `self`. An empty label text produces a label
/// without a message.
///
/// Both the `ErrorKind` trait and the `ariadne` crate must be in scope where the macro is used.
#[proc_macro_derive(ErrorKind, attributes(error))]
pub fn error_kind(item: TokenStream) -> TokenStream {
    let target = parse_macro_input!(item as ErrorKindTarget);
    target.into_token_stream().into()
}
