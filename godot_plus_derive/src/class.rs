// #[derive(Class)] implementation
//
// Generates `impl godot_plus::Object` whose `class_shape` lists the struct's
// fields in declaration order and takes its method set from the type's
// `ClassMethods` impl. Exported fields whose type is `Signal` are also handed
// to the binder in `bind_signals`.
//
// Example expansion:
// ```ignore
// // Input:
// #[derive(Class)]
// pub struct Mover {
//     #[godot(base)]
//     node: Node2DImpl,
//     #[godot(name = "speed2")]
//     pub speed: i64,
//     secret: String,
//     pub arrived: Signal,
// }
//
// // Output:
// impl ::godot_plus::Object for Mover {
//     fn class_shape(&self) -> ::godot_plus::ClassShape {
//         ::godot_plus::ClassShape {
//             name: "Mover".to_string(),
//             fields: vec![
//                 ::godot_plus::FieldShape::embedded(
//                     "node", <Node2DImpl as ::godot_plus::BaseClass>::base_shape()),
//                 ::godot_plus::FieldShape::exported(
//                     "speed", <i64 as ::godot_plus::Reflect>::type_shape())
//                     .with_tag("name=speed2"),
//                 ::godot_plus::FieldShape::private(
//                     "secret", ::godot_plus::TypeShape::opaque("String")),
//                 ::godot_plus::FieldShape::exported(
//                     "arrived", <Signal as ::godot_plus::Reflect>::type_shape()),
//             ],
//             methods: <Self as ::godot_plus::ClassMethods>::method_shapes(),
//         }
//     }
//
//     fn bind_signals(&mut self, binder: &::godot_plus::SignalBinder<'_>) {
//         binder.bind("arrived", &mut self.arrived);
//     }
// }
// ```

use proc_macro2::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Field, Fields, Result, Type, Visibility};

use crate::tag::parse_field_attrs;

pub fn expand_class(input: DeriveInput) -> Result<TokenStream> {
    if let Some(attr) = input.attrs.iter().find(|a| a.path().is_ident("godot")) {
        return Err(syn::Error::new_spanned(
            attr,
            "#[godot] is only valid on fields",
        ));
    }

    let fields: Vec<&Field> = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => named.named.iter().collect(),
            Fields::Unit => Vec::new(),
            Fields::Unnamed(_) => {
                return Err(syn::Error::new_spanned(
                    &input.ident,
                    "#[derive(Class)] requires named fields",
                ));
            }
        },
        Data::Enum(_) | Data::Union(_) => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "#[derive(Class)] can only be used on structs",
            ));
        }
    };

    let name = &input.ident;
    let class_name = name.unraw().to_string();
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let field_shapes = fields
        .iter()
        .copied()
        .map(field_shape)
        .collect::<Result<Vec<_>>>()?;

    let signal_fields = fields
        .iter()
        .copied()
        .filter(|f| matches!(f.vis, Visibility::Public(_)) && is_signal(&f.ty))
        .filter_map(|f| f.ident.as_ref())
        .collect::<Vec<_>>();
    let signal_names = signal_fields.iter().map(|ident| ident.unraw().to_string());
    let bind_signals = (!signal_fields.is_empty()).then(|| {
        quote! {
            fn bind_signals(&mut self, binder: &::godot_plus::SignalBinder<'_>) {
                #(binder.bind(#signal_names, &mut self.#signal_fields);)*
            }
        }
    });

    Ok(quote! {
        impl #impl_generics ::godot_plus::Object for #name #ty_generics #where_clause {
            fn class_shape(&self) -> ::godot_plus::ClassShape {
                ::godot_plus::ClassShape {
                    name: #class_name.to_string(),
                    fields: vec![#(#field_shapes),*],
                    methods: <Self as ::godot_plus::ClassMethods>::method_shapes(),
                }
            }

            #bind_signals
        }
    })
}

fn field_shape(field: &Field) -> Result<TokenStream> {
    let attrs = parse_field_attrs(&field.attrs)?;
    let ident = field
        .ident
        .as_ref()
        .ok_or_else(|| syn::Error::new_spanned(field, "expected a named field"))?;
    let field_name = ident.unraw().to_string();
    let ty = &field.ty;
    let tag = &attrs.tag;

    if attrs.base {
        return Ok(quote! {
            ::godot_plus::FieldShape::embedded(
                #field_name,
                <#ty as ::godot_plus::BaseClass>::base_shape(),
            )
        });
    }

    if matches!(field.vis, Visibility::Public(_)) {
        Ok(quote! {
            ::godot_plus::FieldShape::exported(
                #field_name,
                <#ty as ::godot_plus::Reflect>::type_shape(),
            )
            .with_tag(#tag)
        })
    } else {
        // Private fields are never bound, so their types need no mapping.
        Ok(quote! {
            ::godot_plus::FieldShape::private(
                #field_name,
                ::godot_plus::TypeShape::opaque(stringify!(#ty)),
            )
            .with_tag(#tag)
        })
    }
}

/// Signal handles are recognized by the last path segment, so both `Signal`
/// and `godot_plus::Signal` qualify.
fn is_signal(ty: &Type) -> bool {
    match ty {
        Type::Path(path) if path.qself.is_none() => path
            .path
            .segments
            .last()
            .is_some_and(|segment| segment.ident == "Signal" && segment.arguments.is_none()),
        Type::Group(inner) => is_signal(&inner.elem),
        _ => false,
    }
}
