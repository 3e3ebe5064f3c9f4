// Error types for class preparation, registrar lifecycle and configuration.
//
// Preparation errors are detected while turning a class manifest into a
// `ClassInfo`. They are never fatal to the process: `Extension::load` logs
// them and skips the offending class. Every variant names the class and the
// member at fault so the log line alone is enough to fix the class.

use std::fmt;

/// Which accessor of a property an error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessorRole {
    Getter,
    Setter,
}

impl fmt::Display for AccessorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Getter => f.write_str("getter"),
            Self::Setter => f.write_str("setter"),
        }
    }
}

/// Which descriptor list a duplicate name was found in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MemberKind {
    Property,
    Method,
    Signal,
}

impl fmt::Display for MemberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Property => f.write_str("property"),
            Self::Method => f.write_str("method"),
            Self::Signal => f.write_str("signal"),
        }
    }
}

/// Failure to derive a class descriptor. The first one encountered aborts
/// preparation of that class; no partial descriptor is produced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PrepareError {
    /// The class manifest is not a usable structured record.
    #[error("class {class:?}: {reason}")]
    Shape { class: String, reason: String },

    /// A convention-derived or annotated accessor does not exist.
    #[error("class {class:?}: {role} {accessor:?} not found")]
    MissingAccessor {
        class: String,
        role: AccessorRole,
        accessor: String,
    },

    /// An accessor exists but has the wrong arity or result count.
    #[error(
        "class {class:?}: {role} {accessor:?} has wrong signature \
         (expected {expected}, found {params} argument(s) and {returns} result(s))"
    )]
    SignatureMismatch {
        class: String,
        role: AccessorRole,
        accessor: String,
        expected: &'static str,
        params: usize,
        returns: usize,
    },

    /// A property field's type has no host variant equivalent.
    #[error("class {class:?}: field {field:?} has type {type_name} with no variant equivalent")]
    UnsupportedType {
        class: String,
        field: String,
        type_name: String,
    },

    /// Two members of the same kind resolved to one exposed name.
    #[error("class {class:?}: duplicate {kind} name {name:?}")]
    DuplicateName {
        class: String,
        kind: MemberKind,
        name: String,
    },

    /// A member's exposed name is already claimed by an embedded base.
    #[error("class {class:?}: {name:?} collides with a member of the embedded base")]
    BaseCollision { class: String, name: String },

    /// A signal's declared argument shape could not be understood.
    #[error("class {class:?}: signal {signal:?} has invalid argument {arg:?}")]
    SignalArgument {
        class: String,
        signal: String,
        arg: String,
    },
}

/// Misuse of the registrar's one-shot lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LifecycleError {
    #[error("class {0:?} is already registered")]
    AlreadyInitialized(String),

    #[error("class {0:?} was never registered")]
    NotInitialized(String),

    #[error("class {0:?} has already been terminated")]
    AlreadyTerminated(String),
}

/// Failure to load a `WrapConfig`.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid wrap config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid wrap config: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_class_and_member() {
        let err = PrepareError::SignatureMismatch {
            class: "MyNode2D".into(),
            role: AccessorRole::Getter,
            accessor: "my_direction".into(),
            expected: "0 arguments and 1 result",
            params: 0,
            returns: 2,
        };
        let msg = err.to_string();
        assert!(msg.contains("\"MyNode2D\""), "{msg}");
        assert!(msg.contains("getter \"my_direction\""), "{msg}");
        assert!(msg.contains("2 result(s)"), "{msg}");
    }

    #[test]
    fn missing_accessor_message() {
        let err = PrepareError::MissingAccessor {
            class: "Player".into(),
            role: AccessorRole::Setter,
            accessor: "set_health".into(),
        };
        assert_eq!(
            err.to_string(),
            "class \"Player\": setter \"set_health\" not found"
        );
    }
}
