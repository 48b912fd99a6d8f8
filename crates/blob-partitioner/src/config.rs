//! Partitioner configuration from environment variables.

use crate::algorithms::parse_topology;
use crate::domain::{ShardError, Topology};
use std::env::{self, VarError};
use std::fmt;

/// Shard list, `account1:key1;account2:key2`.
pub const STORAGES_VAR: &str = "PARTITIONER_STORAGES";

/// Log filter, falls back to `RUST_LOG`.
pub const LOG_LEVEL_VAR: &str = "PARTITIONER_LOG_LEVEL";

/// Emit JSON logs when `true` or `1`.
pub const JSON_LOGS_VAR: &str = "PARTITIONER_JSON_LOGS";

/// Configuration for the partitioner and its logging.
#[derive(Clone)]
pub struct PartitionerConfig {
    /// Shard list; holds account keys.
    pub storages: String,

    /// Log level filter (trace, debug, info, warn, error)
    pub log_level: String,

    /// Whether to emit JSON formatted logs
    pub json_logs: bool,
}

impl Default for PartitionerConfig {
    fn default() -> Self {
        Self {
            storages: String::new(),
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

impl fmt::Debug for PartitionerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PartitionerConfig")
            .field("storages", &"<redacted>")
            .field("log_level", &self.log_level)
            .field("json_logs", &self.json_logs)
            .finish()
    }
}

impl PartitionerConfig {
    /// Create configuration for a shard list with default logging.
    pub fn new(storages: impl Into<String>) -> Self {
        Self {
            storages: storages.into(),
            ..Self::default()
        }
    }

    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `PARTITIONER_STORAGES`: Shard list (required)
    /// - `PARTITIONER_LOG_LEVEL` or `RUST_LOG`: Log level (default: info)
    /// - `PARTITIONER_JSON_LOGS`: Enable JSON logs (default: false)
    pub fn from_env() -> Result<Self, ShardError> {
        Self::from_source(|key| env::var(key))
    }

    /// Create configuration from an arbitrary variable lookup.
    pub fn from_source<F>(lookup: F) -> Result<Self, ShardError>
    where
        F: Fn(&str) -> Result<String, VarError>,
    {
        let storages = match lookup(STORAGES_VAR) {
            Ok(value) => value,
            Err(VarError::NotPresent) => {
                return Err(ShardError::config(format!("{} is not set", STORAGES_VAR)))
            }
            Err(VarError::NotUnicode(_)) => {
                return Err(ShardError::config(format!(
                    "{} must be provided as a string like \"account:accountKey;account2:accountKey2\"",
                    STORAGES_VAR
                )))
            }
        };

        Ok(Self {
            storages,
            log_level: lookup(LOG_LEVEL_VAR)
                .or_else(|_| lookup("RUST_LOG"))
                .unwrap_or_else(|_| "info".to_string()),
            json_logs: lookup(JSON_LOGS_VAR)
                .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
                .unwrap_or(false),
        })
    }

    /// Set the log level.
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Enable or disable JSON logs.
    pub fn with_json_logs(mut self, json_logs: bool) -> Self {
        self.json_logs = json_logs;
        self
    }

    /// Parse the configured shard list.
    pub fn topology(&self) -> Result<Topology, ShardError> {
        parse_topology(&self.storages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::ffi::OsString;

    fn lookup_from(
        vars: &[(&str, &str)],
    ) -> impl Fn(&str) -> Result<String, VarError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned().ok_or(VarError::NotPresent)
    }

    #[test]
    fn test_default_config() {
        let config = PartitionerConfig::default();
        assert_eq!(config.log_level, "info");
        assert!(!config.json_logs);
    }

    #[test]
    fn test_from_source() {
        let config = PartitionerConfig::from_source(lookup_from(&[
            (STORAGES_VAR, "s0:k0;s1:k1"),
            (LOG_LEVEL_VAR, "debug"),
            (JSON_LOGS_VAR, "TRUE"),
        ]))
        .unwrap();

        assert_eq!(config.log_level, "debug");
        assert!(config.json_logs);
        assert_eq!(config.topology().unwrap().len(), 2);
    }

    #[test]
    fn test_rust_log_fallback() {
        let config = PartitionerConfig::from_source(lookup_from(&[
            (STORAGES_VAR, "s0:k0"),
            ("RUST_LOG", "warn"),
        ]))
        .unwrap();
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_missing_storages() {
        let result = PartitionerConfig::from_source(lookup_from(&[]));
        assert!(matches!(result, Err(ShardError::Config(_))));
    }

    #[test]
    fn test_non_unicode_storages() {
        let result = PartitionerConfig::from_source(|_| {
            Err(VarError::NotUnicode(OsString::from("s0:k0")))
        });
        assert!(matches!(result, Err(ShardError::Config(_))));
    }

    #[test]
    fn test_malformed_storages_rejected_on_topology() {
        let config = PartitionerConfig::new("s0:k0;");
        assert!(matches!(config.topology(), Err(ShardError::Config(_))));
    }

    #[test]
    fn test_debug_redacts_storages() {
        let config = PartitionerConfig::new("s0:secretkey");
        assert!(!format!("{:?}", config).contains("secretkey"));
    }

    #[test]
    fn test_builders() {
        let config = PartitionerConfig::new("s0:k0")
            .with_log_level("trace")
            .with_json_logs(true);
        assert_eq!(config.log_level, "trace");
        assert!(config.json_logs);
    }
}
