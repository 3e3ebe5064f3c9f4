// Naming conventions used by the preparation pipeline.
//
// Every string the pipeline derives (accessor names, bridge names, the
// virtual-method marker, the read-only sentinel, the reserved lifecycle
// hooks) comes from `WrapConfig`. The defaults reproduce the conventions
// described in `lib.rs`; an extension can ship a JSON file to override any
// subset of them (missing keys keep their defaults).
//
// Config values feed directly into descriptor names the host stores, so
// changing them between runs renames the exposed API.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::wrapper::naming::to_snake;

/// Conventions for deriving descriptor names from a class manifest.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WrapConfig {
    /// Joined to the snake-cased field name to find the default getter
    /// (`get_` + `speed` matches both `get_speed` and `GetSpeed`). The
    /// prefix is snake-cased first, so `Get` and `get` behave alike.
    pub getter_prefix: String,
    /// Joined to the snake-cased field name to find the default setter.
    pub setter_prefix: String,
    /// Host-facing getter bridge name prefix (`get_property_<exposed>`).
    pub getter_bridge_prefix: String,
    /// Host-facing setter bridge name prefix (`set_property_<exposed>`).
    pub setter_bridge_prefix: String,
    /// Marker on the snake-cased method name that flags a virtual override.
    pub virtual_prefix: String,
    /// `set=<sentinel>` disables a property's setter.
    pub read_only_sentinel: String,
    /// Host lifecycle hooks that are never registered as methods. Compared
    /// against snake-cased method names.
    pub reserved_methods: Vec<String>,
    /// Name of the single setter argument.
    pub setter_arg_name: String,
}

impl Default for WrapConfig {
    fn default() -> Self {
        Self {
            getter_prefix: "get_".into(),
            setter_prefix: "set_".into(),
            getter_bridge_prefix: "get_property_".into(),
            setter_bridge_prefix: "set_property_".into(),
            virtual_prefix: "x_".into(),
            read_only_sentinel: "nil".into(),
            reserved_methods: vec!["destroy".into()],
            setter_arg_name: "value".into(),
        }
    }
}

impl WrapConfig {
    /// Parse a config from JSON. Unknown keys are ignored; prefixes that
    /// would make accessor or bridge names collide are refused.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: WrapConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Default getter name for a snake-cased field name.
    pub fn default_getter(&self, field_snake: &str) -> String {
        join_prefix(&self.getter_prefix, field_snake)
    }

    /// Default setter name for a snake-cased field name.
    pub fn default_setter(&self, field_snake: &str) -> String {
        join_prefix(&self.setter_prefix, field_snake)
    }

    /// Check invariants the pipeline relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.getter_bridge_prefix.is_empty() || self.setter_bridge_prefix.is_empty() {
            return Err(ConfigError::Invalid(
                "bridge prefixes must not be empty".into(),
            ));
        }
        if self.getter_bridge_prefix == self.setter_bridge_prefix {
            return Err(ConfigError::Invalid(
                "getter and setter bridge prefixes must differ".into(),
            ));
        }
        if to_snake(&self.getter_prefix) == to_snake(&self.setter_prefix) {
            return Err(ConfigError::Invalid(
                "getter and setter prefixes must differ".into(),
            ));
        }
        if self.read_only_sentinel.is_empty() {
            return Err(ConfigError::Invalid(
                "read-only sentinel must not be empty".into(),
            ));
        }
        if self.setter_arg_name.is_empty() {
            return Err(ConfigError::Invalid(
                "setter argument name must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// `Get` + `speed` and `get_` + `speed` both give `get_speed`.
fn join_prefix(prefix: &str, field_snake: &str) -> String {
    let stem = to_snake(prefix);
    if stem.is_empty() {
        field_snake.to_string()
    } else {
        format!("{stem}_{field_snake}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = WrapConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let restored = WrapConfig::from_json(&json).unwrap();
        assert_eq!(restored, config);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = WrapConfig::from_json(r#"{"virtual_prefix": "v_"}"#).unwrap();
        assert_eq!(config.virtual_prefix, "v_");
        assert_eq!(config.getter_prefix, "get_");
        assert_eq!(config.reserved_methods, vec!["destroy".to_string()]);
    }

    #[test]
    fn rejects_colliding_bridge_prefixes() {
        let err = WrapConfig::from_json(
            r#"{"getter_bridge_prefix": "prop_", "setter_bridge_prefix": "prop_"}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn camel_case_prefixes_are_snake_cased() {
        let config =
            WrapConfig::from_json(r#"{"getter_prefix": "Get", "setter_prefix": "Set"}"#).unwrap();
        assert_eq!(config.default_getter("speed"), "get_speed");
        assert_eq!(config.default_setter("max_health"), "set_max_health");
        assert_eq!(WrapConfig::default().default_getter("speed"), "get_speed");
    }

    #[test]
    fn empty_prefix_uses_the_bare_field() {
        let config = WrapConfig {
            getter_prefix: String::new(),
            ..WrapConfig::default()
        };
        assert_eq!(config.default_getter("speed"), "speed");
    }

    #[test]
    fn rejects_prefixes_equal_after_snake_casing() {
        let err =
            WrapConfig::from_json(r#"{"getter_prefix": "Get", "setter_prefix": "get_"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_malformed_json() {
        let err = WrapConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }
}
