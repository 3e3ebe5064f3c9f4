// Signal descriptors.
//
// A `Signal`-typed field declares a signal named snake_case(field), or the
// annotation's `name`. Argument shapes cannot be inferred from the field
// type, so they are declared in the annotation:
//
//   args=who:String|count:int|payload
//
// Segments are `|`-separated; `name:type` gives a typed argument, a bare
// `name` an untyped one (`Nil`, i.e. any variant). Empty segments are
// skipped. Without `args` the signal takes no arguments.

use serde::Serialize;

use crate::class_db::SignalParam;
use crate::error::PrepareError;
use crate::shape::{ClassShape, FieldShape};
use crate::variant::{VariantType, variant_from_name};
use crate::wrapper::naming::to_snake;
use crate::wrapper::tag::TagData;

/// Canonical description of one signal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SignalDescriptor {
    pub exposed_name: String,
    /// Declaring field, used to bind an instance's `Signal` handle.
    pub field: String,
    pub args: Vec<SignalParam>,
}

/// Resolve the descriptor for a signal-typed field.
pub fn resolve_signal(
    shape: &ClassShape,
    field: &FieldShape,
    tag: Option<&TagData>,
) -> Result<SignalDescriptor, PrepareError> {
    let exposed_name = tag
        .and_then(|t| t.name.clone())
        .unwrap_or_else(|| to_snake(&field.name));

    let args = match tag.and_then(|t| t.args.as_deref()) {
        Some(decl) => parse_args(decl).map_err(|arg| PrepareError::SignalArgument {
            class: shape.name.clone(),
            signal: exposed_name.clone(),
            arg,
        })?,
        None => Vec::new(),
    };

    Ok(SignalDescriptor {
        exposed_name,
        field: field.name.clone(),
        args,
    })
}

/// Parse an `args` declaration. On failure returns the offending segment.
fn parse_args(decl: &str) -> Result<Vec<SignalParam>, String> {
    decl.split('|')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            let (name, ty) = match segment.split_once(':') {
                Some((name, ty)) => (name.trim(), variant_from_name(ty)),
                None => (segment, Some(VariantType::NIL)),
            };
            match ty {
                Some(ty) if !name.is_empty() => Ok(SignalParam {
                    name: name.to_string(),
                    ty,
                }),
                _ => Err(segment.to_string()),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin::Signal;
    use crate::shape::Reflect;
    use crate::wrapper::tag::parse_tag;

    fn resolve(tag: &str) -> Result<SignalDescriptor, PrepareError> {
        let field = FieldShape::exported("SecretPrinted", Signal::type_shape()).with_tag(tag);
        let shape = ClassShape::new("MyNode2D").field(field.clone());
        let tag = parse_tag(&field.tag);
        resolve_signal(&shape, &field, tag.as_ref())
    }

    #[test]
    fn untagged_signal_has_no_args() {
        let signal = resolve("").unwrap();
        assert_eq!(signal.exposed_name, "secret_printed");
        assert_eq!(signal.field, "SecretPrinted");
        assert!(signal.args.is_empty());
    }

    #[test]
    fn name_override() {
        assert_eq!(resolve("name=leaked").unwrap().exposed_name, "leaked");
    }

    #[test]
    fn typed_and_untyped_args() {
        let signal = resolve("args=printed:bool| who : String |payload|").unwrap();
        assert_eq!(
            signal.args,
            vec![
                SignalParam {
                    name: "printed".into(),
                    ty: VariantType::BOOL
                },
                SignalParam {
                    name: "who".into(),
                    ty: VariantType::STRING
                },
                SignalParam {
                    name: "payload".into(),
                    ty: VariantType::NIL
                },
            ]
        );
    }

    #[test]
    fn unknown_arg_type_names_the_segment() {
        let err = resolve("args=ok:int|bad:Spaceship").unwrap_err();
        assert_eq!(
            err,
            PrepareError::SignalArgument {
                class: "MyNode2D".into(),
                signal: "secret_printed".into(),
                arg: "bad:Spaceship".into(),
            }
        );
    }

    #[test]
    fn missing_arg_name_is_rejected() {
        assert!(resolve("args=:int").is_err());
    }
}
