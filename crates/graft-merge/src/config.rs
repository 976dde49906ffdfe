use serde::{Deserialize, Serialize};

/// Behaviour toggles for a [`Merger`](crate::Merger).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeConfig {
    /// Treat every falsy source property (`null`, `false`, `0`, NaN, `""`,
    /// `0n`, `undefined`) as absent and leave the target untouched.
    ///
    /// When `false`, only `undefined` is skipped; the other falsy values
    /// overwrite like any primitive.
    pub skip_falsy_values: bool,
    /// Replace a destination array wholesale when every source element is a
    /// scalar. When `false`, scalar arrays are merged element by element and
    /// deduplicated against the destination.
    pub replace_primitive_arrays: bool,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            skip_falsy_values: true,
            replace_primitive_arrays: true,
        }
    }
}

impl MergeConfig {
    /// The default rules, falsy skipping included.
    pub fn faithful() -> Self {
        Self::default()
    }

    /// Like the default, but `null`, `false`, `0` and `""` overwrite.
    pub fn strict_values() -> Self {
        Self {
            skip_falsy_values: false,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_skip_falsy_and_replace_arrays() {
        let config = MergeConfig::default();
        assert!(config.skip_falsy_values);
        assert!(config.replace_primitive_arrays);
        assert_eq!(config, MergeConfig::faithful());
    }

    #[test]
    fn strict_values_keeps_array_replacement() {
        let config = MergeConfig::strict_values();
        assert!(!config.skip_falsy_values);
        assert!(config.replace_primitive_arrays);
    }

    #[test]
    fn missing_fields_deserialize_to_defaults() {
        let config: MergeConfig =
            serde_json::from_str(r#"{"skip_falsy_values": false}"#).unwrap();
        assert!(!config.skip_falsy_values);
        assert!(config.replace_primitive_arrays);

        let json = serde_json::to_string(&MergeConfig::default()).unwrap();
        let back: MergeConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, MergeConfig::default());
    }
}
