//! Compile-time warnings for members the derive leaves out.
//!
//! Stable proc macros cannot emit warnings directly. Each warning is a
//! deprecated constant that is referenced right away, so rustc reports the
//! note through the `deprecated` lint at the field's span.

use bracketed_core::Diagnostic;
use proc_macro2::{Span, TokenStream};
use quote::{format_ident, quote_spanned};

pub(crate) fn skipped_member(diagnostic: &Diagnostic, span: Span) -> TokenStream {
    let note = format!("not rendered by `Bracketed`: {}", diagnostic.message);
    let marker = format_ident!("bracketed_skipped_member", span = span);
    quote_spanned! {span=>
        const _: () = {
            #[deprecated(note = #note)]
            #[allow(non_upper_case_globals)]
            const #marker: () = ();
            #marker
        };
    }
}
