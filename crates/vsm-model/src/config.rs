//! Model instance configuration.

/// API version presented to the licence server by default.
pub const DEFAULT_API_VERSION: u32 = 110;

/// Instance property that names the device script by default.
pub const DEFAULT_SCRIPT_PROPERTY: &str = "moddll";

/// Settings fixed at model creation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ModelConfig {
    /// Key presented to the licence server.
    pub model_key:       u32,
    pub api_version:     u32,
    /// Instance property read at setup to pick the script.
    pub script_property: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model_key:       0,
            api_version:     DEFAULT_API_VERSION,
            script_property: DEFAULT_SCRIPT_PROPERTY.to_owned(),
        }
    }
}
