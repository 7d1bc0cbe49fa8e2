//! Expansion of the `path!` macro.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{
    Expr, LitStr, Member, Token,
    ext::IdentExt,
    parse::{Parse, ParseStream},
    spanned::Spanned,
};

/// `base, chain` as written inside `path!( .. )`.
struct PathInput {
    base: Expr,
    chain: Expr,
}

impl Parse for PathInput {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let base = input.parse()?;
        input.parse::<Token![,]>()?;
        let chain = input.parse()?;
        // Allow a trailing comma
        if input.peek(Token![,]) {
            input.parse::<Token![,]>()?;
        }
        Ok(Self { base, chain })
    }
}

/// Expand `path!(base, chain)`.
pub(crate) fn expand_path(input: TokenStream) -> syn::Result<TokenStream> {
    let PathInput { base, chain } = syn::parse2(input)?;

    let mut segments = Vec::new();
    collect_segments(&chain, &mut segments)?;

    Ok(quote! {
        (#base)#(.at(#segments))*
    })
}

/// Flatten `a.b[c].d` into one token stream per segment, in access order.
fn collect_segments(expr: &Expr, out: &mut Vec<TokenStream>) -> syn::Result<()> {
    match expr {
        Expr::Path(path) if path.qself.is_none() && path.attrs.is_empty() => {
            let ident = path
                .path
                .get_ident()
                .ok_or_else(|| unsupported(expr))?;
            out.push(name_segment(&ident.unraw().to_string(), ident.span()));
        }
        Expr::Field(field) => {
            collect_segments(&field.base, out)?;
            match &field.member {
                Member::Named(ident) => {
                    out.push(name_segment(&ident.unraw().to_string(), ident.span()));
                }
                Member::Unnamed(index) => {
                    out.push(name_segment(&index.index.to_string(), index.span));
                }
            }
        }
        Expr::Index(index) => {
            collect_segments(&index.expr, out)?;
            // Any expression goes, `["a-b"]` is the segment `a-b`
            let index = &index.index;
            out.push(quote! { #index });
        }
        Expr::Paren(paren) => collect_segments(&paren.expr, out)?,
        _ => return Err(unsupported(expr)),
    }
    Ok(())
}

fn name_segment(name: &str, span: proc_macro2::Span) -> TokenStream {
    let lit = LitStr::new(name, span);
    quote! { #lit }
}

fn unsupported(expr: &Expr) -> syn::Error {
    syn::Error::new(
        expr.span(),
        "expected a path like `people[123].phones`: names, `.member` and `[index]` only",
    )
}

#[cfg(test)]
mod tests {
    use assert2::check;
    use quote::quote;

    use super::*;

    fn expand(input: TokenStream) -> String {
        expand_path(input).expect("expand").to_string()
    }

    fn expected(tokens: TokenStream) -> String {
        tokens.to_string()
    }

    #[test]
    fn names_and_indices() {
        assert_eq!(
            expand(quote! { client.list, people[123].phones }),
            expected(quote! { (client.list).at("people").at(123).at("phones") })
        );
    }

    #[test]
    fn single_name() {
        assert_eq!(
            expand(quote! { proxy, people }),
            expected(quote! { (proxy).at("people") })
        );
    }

    #[test]
    fn raw_identifiers_are_unrawed() {
        assert_eq!(
            expand(quote! { proxy, r#type.r#fn }),
            expected(quote! { (proxy).at("type").at("fn") })
        );
    }

    #[test]
    fn variable_and_string_indices() {
        assert_eq!(
            expand(quote! { proxy, people[id]["x-y"] }),
            expected(quote! { (proxy).at("people").at(id).at("x-y") })
        );
    }

    #[test]
    fn tuple_member() {
        assert_eq!(
            expand(quote! { proxy, versions.0 }),
            expected(quote! { (proxy).at("versions").at("0") })
        );
    }

    #[test]
    fn trailing_comma() {
        assert_eq!(
            expand(quote! { proxy, people, }),
            expected(quote! { (proxy).at("people") })
        );
    }

    #[test]
    fn rejects_calls() {
        check!(expand_path(quote! { proxy, people.list() }).is_err());
    }

    #[test]
    fn rejects_multi_segment_paths() {
        check!(expand_path(quote! { proxy, std::people }).is_err());
    }

    #[test]
    fn requires_a_chain() {
        check!(expand_path(quote! { proxy }).is_err());
    }
}
