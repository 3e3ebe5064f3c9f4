// godot_plus_derive: compile-time class manifests for godot_plus.
//
// Provides:
// - #[derive(Class)] - implements `godot_plus::Object` for a named struct,
//   listing its fields (with `#[godot(...)]` annotations) and the methods
//   its `ClassMethods` impl reports
// - #[methods] - implements `godot_plus::ClassMethods` for an inherent impl
//   block, listing every method that takes `self`
//
// Example:
// ```ignore
// use godot_plus::{Class, Signal, methods};
//
// #[derive(Class, Default)]
// pub struct Player {
//     #[godot(base)]
//     node: Node2DImpl,
//     #[godot(name = "hp", set = "nil")]
//     pub health: i64,
//     #[godot(args = "amount:int")]
//     pub damaged: Signal,
// }
//
// #[methods]
// impl Player {
//     pub fn get_health(&self) -> i64 { self.health }
//     pub fn x_ready(&mut self) {}
// }
// ```

use proc_macro::TokenStream;
use syn::{DeriveInput, ItemImpl, parse_macro_input};

mod class;
mod methods;
mod tag;

/// Derives `godot_plus::Object` for a struct with named fields.
///
/// Field rules:
/// - `pub` fields are exported; all others are recorded as private.
/// - `#[godot(base)]` marks the embedded base capability. Its type must
///   implement `godot_plus::BaseClass`.
/// - `#[godot(name = "...", get = "...", set = "...", args = "...")]`
///   becomes the field's annotation tag (`name=...,get=...`). Values may be
///   string literals or bare identifiers. `#[godot("name=speed2")]` passes a
///   tag string through verbatim.
///
/// Exported non-base field types must implement `godot_plus::Reflect`. The
/// struct must also implement `godot_plus::ClassMethods`, usually through
/// `#[methods]`. Exported `Signal` fields get a generated `bind_signals`
/// so a bound instance can emit them.
#[proc_macro_derive(Class, attributes(godot))]
pub fn derive_class(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    class::expand_class(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

/// Implements `godot_plus::ClassMethods` for an inherent impl block.
///
/// Every fn with a `self` receiver is listed in declaration order; `pub` fns
/// are exported. Associated fns without a receiver are left out.
///
/// `#[methods(base = "Node2D")]` additionally implements
/// `godot_plus::BaseClass` so the type can be embedded with `#[godot(base)]`.
#[proc_macro_attribute]
pub fn methods(attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemImpl);
    methods::expand_methods(attr.into(), input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
