use serde::{Deserialize, Serialize};

/// Driver metadata keyed by a human-chosen alias.
///
/// Serialized into the backing file as
/// `{ "alias": ..., "className": ..., "jarFile": ... }`, with `jarFile`
/// omitted when no jar path is set.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DriverRecord {
    /// Human-assigned short name identifying this driver configuration.
    /// Compared case-insensitively everywhere.
    pub alias: String,
    /// Fully-qualified class name of the driver implementation.
    pub class_name: String,
    /// Path to a library archive containing the driver. `None` means the
    /// driver is expected on the application classpath.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jar_file: Option<String>,
}

impl DriverRecord {
    pub fn new(
        alias: impl Into<String>,
        class_name: impl Into<String>,
        jar_file: Option<String>,
    ) -> Self {
        Self {
            alias: alias.into(),
            class_name: class_name.into(),
            jar_file,
        }
    }

    /// Canonical lookup key for this record's alias.
    #[inline]
    pub fn key(&self) -> String {
        normalize_alias(&self.alias)
    }
}

/// Canonical, case-insensitive form of an alias, used as the lookup key for
/// every registry operation.
#[inline]
pub fn normalize_alias(alias: &str) -> String {
    alias.trim().to_lowercase()
}
