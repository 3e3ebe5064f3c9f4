// `#[godot(...)]` field attribute parsing.
//
// The attribute is flattened into the same `key=value,key=value` tag string
// a hand-written manifest would carry, so the runtime tag parser is the only
// place that interprets keys. Unknown keys are passed through untouched.

use syn::ext::IdentExt;
use syn::{Attribute, Expr, Lit, LitStr, Result};

/// Everything `#[godot(...)]` can say about one field.
#[derive(Default)]
pub struct FieldAttrs {
    pub base: bool,
    pub tag: String,
}

pub fn parse_field_attrs(attrs: &[Attribute]) -> Result<FieldAttrs> {
    let mut out = FieldAttrs::default();
    let mut pairs: Vec<String> = Vec::new();

    for attr in attrs.iter().filter(|a| a.path().is_ident("godot")) {
        // Raw tag string: #[godot("name=speed2,set=nil")]
        if let Ok(raw) = attr.parse_args::<LitStr>() {
            pairs.push(raw.value());
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("base") {
                out.base = true;
                return Ok(());
            }
            let key = meta
                .path
                .get_ident()
                .map(|ident| ident.unraw().to_string())
                .ok_or_else(|| meta.error("expected a simple key"))?;
            let value: Expr = meta.value()?.parse()?;
            pairs.push(format!("{key}={}", tag_value(&value)?));
            Ok(())
        })?;
    }

    out.tag = pairs.join(",");
    Ok(out)
}

fn tag_value(expr: &Expr) -> Result<String> {
    match expr {
        Expr::Lit(lit) => match &lit.lit {
            Lit::Str(s) => Ok(s.value()),
            Lit::Bool(b) => Ok(b.value.to_string()),
            Lit::Int(i) => Ok(i.base10_digits().to_string()),
            other => Err(syn::Error::new_spanned(other, "unsupported value in #[godot]")),
        },
        Expr::Path(path) => path
            .path
            .get_ident()
            .map(|ident| ident.unraw().to_string())
            .ok_or_else(|| syn::Error::new_spanned(path, "expected an identifier")),
        other => Err(syn::Error::new_spanned(
            other,
            "expected a string literal or identifier",
        )),
    }
}
