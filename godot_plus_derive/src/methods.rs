// #[methods] proc-macro implementation
//
// Keeps the impl block as written and adds a `ClassMethods` impl listing its
// receiver-taking fns. Result counts follow the manifest convention: unit is
// 0, an n-tuple is n, anything else is 1.

use proc_macro2::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::{ImplItem, ItemImpl, LitStr, Result, ReturnType, Type, Visibility};

/// Expands the #[methods] attribute macro.
///
/// Example expansion:
/// ```ignore
/// // Input:
/// #[methods(base = "Node2D")]
/// impl Node2DImpl {
///     pub fn set_position(&mut self, pos: Vector2) { ... }
///     fn helper(&self) -> (i64, bool) { ... }
/// }
///
/// // Output:
/// impl Node2DImpl { ... }
///
/// impl ::godot_plus::ClassMethods for Node2DImpl {
///     fn method_shapes() -> Vec<::godot_plus::MethodShape> {
///         vec![
///             ::godot_plus::MethodShape { name: "set_position".to_string(),
///                 params: 1, returns: 0, exported: true },
///             ::godot_plus::MethodShape { name: "helper".to_string(),
///                 params: 0, returns: 2, exported: false },
///         ]
///     }
/// }
///
/// impl ::godot_plus::BaseClass for Node2DImpl {
///     const CLASS_NAME: &'static str = "Node2D";
/// }
/// ```
pub fn expand_methods(attr: TokenStream, item: ItemImpl) -> Result<TokenStream> {
    if let Some((_, path, _)) = &item.trait_ {
        return Err(syn::Error::new_spanned(
            path,
            "#[methods] must be applied to an inherent impl block",
        ));
    }

    let base = parse_base(attr)?;
    let self_ty = &item.self_ty;
    let (impl_generics, _, where_clause) = item.generics.split_for_impl();

    let shapes = item.items.iter().filter_map(|member| {
        let ImplItem::Fn(func) = member else {
            return None;
        };
        func.sig.receiver()?;

        let name = func.sig.ident.unraw().to_string();
        let params = func
            .sig
            .inputs
            .iter()
            .filter(|arg| matches!(arg, syn::FnArg::Typed(_)))
            .count();
        let returns = result_count(&func.sig.output);
        let exported = matches!(func.vis, Visibility::Public(_));
        Some(quote! {
            ::godot_plus::MethodShape {
                name: #name.to_string(),
                params: #params,
                returns: #returns,
                exported: #exported,
            }
        })
    });

    let base_impl = base.map(|class_name| {
        quote! {
            impl #impl_generics ::godot_plus::BaseClass for #self_ty #where_clause {
                const CLASS_NAME: &'static str = #class_name;
            }
        }
    });

    Ok(quote! {
        #item

        impl #impl_generics ::godot_plus::ClassMethods for #self_ty #where_clause {
            fn method_shapes() -> Vec<::godot_plus::MethodShape> {
                vec![#(#shapes),*]
            }
        }

        #base_impl
    })
}

/// `base = "Node2D"`, or nothing.
fn parse_base(attr: TokenStream) -> Result<Option<LitStr>> {
    if attr.is_empty() {
        return Ok(None);
    }
    let mut base = None;
    let parser = syn::meta::parser(|meta| {
        if meta.path.is_ident("base") {
            base = Some(meta.value()?.parse::<LitStr>()?);
            Ok(())
        } else {
            Err(meta.error("unsupported #[methods] argument"))
        }
    });
    syn::parse::Parser::parse2(parser, attr)?;
    Ok(base)
}

fn result_count(output: &ReturnType) -> usize {
    match output {
        ReturnType::Default => 0,
        ReturnType::Type(_, ty) => type_result_count(ty),
    }
}

fn type_result_count(ty: &Type) -> usize {
    match ty {
        Type::Tuple(tuple) => tuple.elems.len(),
        Type::Paren(inner) => type_result_count(&inner.elem),
        Type::Group(inner) => type_result_count(&inner.elem),
        _ => 1,
    }
}
