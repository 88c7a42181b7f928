mod structures;

use proc_macro::TokenStream;
use quote::quote;
use structures::ErrorKindTarget;
use syn::parse_macro_input;

/// Derives the [`ErrorKind`] trait for the given struct.
///
/// This trait can be derived for any struct with named fields or no fields at all.
///
/// The information of the error can be customized using the `error` attribute by adding the
/// corresponding tags to it:
/// ```ignore
/// use mathcheck_attrs::ErrorKind;
///
/// #[derive(Debug, ErrorKind)]
/// #[error(
///     class = Domain,
///     message = "division by zero",
///     labels = ["this divisor evaluates to zero"],
/// )]
/// pub struct DivisionByZero;
/// ```
///
/// The following tags are available:
///
/// | Tag       | Description                                                                    |
/// | --------- | ------------------------------------------------------------------------------ |
/// | `class`   | The [`ErrorClass`] variant of the error. Defaults to `Syntax`.                 |
/// | `message` | The message displayed at the top of the error when it is displayed.            |
/// | `labels`  | An array of label texts, one for each span the error is reported with.        |
/// | `help`    | Optional help text for the error, describing what the user can do to fix it.   |
///
/// Each of `message`, `labels`, and `help` accepts an expression. For structs with named fields,
/// the expression is evaluated with the members of the struct in scope, so they can be used in the
/// expression (tuple structs are not supported).
///
/// [`ErrorKind`]: https://docs.rs/mathcheck-error
/// [`ErrorClass`]: https://docs.rs/mathcheck-error
#[proc_macro_derive(ErrorKind, attributes(error))]
pub fn error_kind(item: TokenStream) -> TokenStream {
    let target = parse_macro_input!(item as ErrorKindTarget);
    let name = &target.name;
    quote! {
        impl mathcheck_error::ErrorKind for #name {
            fn as_any(&self) -> &dyn std::any::Any {
                self
            }

            #target
        }
    }.into()
}
