use serde::{Deserialize, Serialize};

use crate::error::{HistoryError, HistoryResult};

/// Top-level key of the export document when none is configured.
pub const DEFAULT_EXPORT_KEY: &str = "__REWIND_DEVTOOLS__";

/// Configuration for a [`HistoryStore`](crate::HistoryStore).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Top-level key under which [`export`](crate::HistoryStore::export)
    /// nests the namespaces. External readers look the history up by it.
    pub export_key: String,
    /// Emit a `debug` event for every recorded diff.
    pub log_records: bool,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            export_key: DEFAULT_EXPORT_KEY.to_string(),
            log_records: true,
        }
    }
}

impl HistoryConfig {
    /// Parse a configuration from TOML. Missing fields take their defaults.
    pub fn from_toml_str(text: &str) -> HistoryResult<Self> {
        let config: Self = toml::from_str(text).map_err(|e| HistoryError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_export_key(mut self, key: impl Into<String>) -> Self {
        self.export_key = key.into();
        self
    }

    pub fn with_log_records(mut self, enabled: bool) -> Self {
        self.log_records = enabled;
        self
    }

    /// Reject an empty export key, which no reader could look up.
    pub fn validate(&self) -> HistoryResult<()> {
        if self.export_key.trim().is_empty() {
            return Err(HistoryError::Config("export_key must not be empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let c = HistoryConfig::default();
        assert_eq!(c.export_key, DEFAULT_EXPORT_KEY);
        assert!(c.log_records);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn toml_overrides_fields() {
        let c = HistoryConfig::from_toml_str(
            r#"
            export_key = "__APP_STATE__"
            log_records = false
            "#,
        )
        .unwrap();
        assert_eq!(c.export_key, "__APP_STATE__");
        assert!(!c.log_records);
    }

    #[test]
    fn toml_missing_fields_use_defaults() {
        let c = HistoryConfig::from_toml_str("log_records = false").unwrap();
        assert_eq!(c.export_key, DEFAULT_EXPORT_KEY);
        assert!(!c.log_records);

        assert_eq!(HistoryConfig::from_toml_str("").unwrap(), HistoryConfig::default());
    }

    #[test]
    fn invalid_toml_is_config_error() {
        let err = HistoryConfig::from_toml_str("log_records = \"yes\"").unwrap_err();
        assert!(matches!(err, HistoryError::Config(_)));
    }

    #[test]
    fn empty_export_key_rejected() {
        let err = HistoryConfig::from_toml_str("export_key = \"  \"").unwrap_err();
        assert!(matches!(err, HistoryError::Config(_)));
    }

    #[test]
    fn builder_setters() {
        let c = HistoryConfig::default()
            .with_export_key("k")
            .with_log_records(false);
        assert_eq!(c.export_key, "k");
        assert!(!c.log_records);
    }
}
