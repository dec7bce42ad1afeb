//! Host configuration for the bulk-action toolbar.
//!
//! # Design
//! - Every field has a default so hosts only state what they enable.
//! - Validation happens once at load time; flows trust a validated config.

use crate::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Interval between row removals in the publish animation.
pub const DEFAULT_REMOVAL_INTERVAL_MS: u64 = 1500;

/// Host flags and tuning for the bulk-action toolbar.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BulkActionConfig {
    /// Render publish/unpublish controls.
    pub show_publish: bool,
    /// Render the delete control.
    pub show_delete: bool,
    /// Milliseconds between removals while the publish animation runs.
    pub removal_interval_ms: u64,
    /// Attribute shown next to the id in the publish review table.
    pub main_field: Option<String>,
}

impl Default for BulkActionConfig {
    fn default() -> Self {
        Self {
            show_publish: false,
            show_delete: false,
            removal_interval_ms: DEFAULT_REMOVAL_INTERVAL_MS,
            main_field: None,
        }
    }
}

impl BulkActionConfig {
    /// Parse and validate a JSON document.
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] for malformed JSON and [`ConfigError::Invalid`]
    /// when a field fails [`BulkActionConfig::validate`].
    pub fn from_json(raw: &str) -> ConfigResult<Self> {
        let config: Self =
            serde_json::from_str(raw).map_err(|source| ConfigError::Parse { source })?;
        config.validate()?;
        Ok(config)
    }

    /// Check field ranges.
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] for a zero removal interval or a blank main field.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.removal_interval_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "removalIntervalMs",
                reason: "must be greater than zero",
                value: Some(self.removal_interval_ms.to_string()),
            });
        }
        if let Some(field) = &self.main_field
            && field.trim().is_empty()
        {
            return Err(ConfigError::Invalid {
                field: "mainField",
                reason: "must not be blank",
                value: Some(field.clone()),
            });
        }
        Ok(())
    }

    /// Toggle publish/unpublish controls.
    #[must_use]
    pub const fn with_publish(mut self, show: bool) -> Self {
        self.show_publish = show;
        self
    }

    /// Toggle the delete control.
    #[must_use]
    pub const fn with_delete(mut self, show: bool) -> Self {
        self.show_delete = show;
        self
    }

    /// Set the removal animation interval.
    #[must_use]
    pub fn with_removal_interval(mut self, interval: Duration) -> Self {
        self.removal_interval_ms = u64::try_from(interval.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Set the main field column.
    #[must_use]
    pub fn with_main_field(mut self, field: impl Into<String>) -> Self {
        self.main_field = Some(field.into());
        self
    }

    /// Removal animation interval as a duration.
    #[must_use]
    pub const fn removal_interval(&self) -> Duration {
        Duration::from_millis(self.removal_interval_ms)
    }

    /// Main field to render, hidden when unset or when it is the id itself.
    #[must_use]
    pub fn display_main_field(&self) -> Option<&str> {
        self.main_field
            .as_deref()
            .filter(|field| *field != "id")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_hide_every_control() {
        let config = BulkActionConfig::default();
        assert!(!config.show_publish);
        assert!(!config.show_delete);
        assert_eq!(config.removal_interval(), Duration::from_millis(1500));
    }

    #[test]
    fn json_fields_are_camel_case_and_optional() {
        let config =
            BulkActionConfig::from_json(r#"{"showPublish": true, "mainField": "title"}"#).unwrap();
        assert!(config.show_publish);
        assert!(!config.show_delete);
        assert_eq!(config.removal_interval_ms, DEFAULT_REMOVAL_INTERVAL_MS);
        assert_eq!(config.display_main_field(), Some("title"));
    }

    #[test]
    fn zero_interval_is_rejected() {
        let err = BulkActionConfig::from_json(r#"{"removalIntervalMs": 0}"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "removalIntervalMs",
                ..
            }
        ));
    }

    #[test]
    fn blank_main_field_is_rejected_and_malformed_json_reported() {
        let blank = BulkActionConfig::default().with_main_field("  ");
        assert!(matches!(
            blank.validate(),
            Err(ConfigError::Invalid {
                field: "mainField",
                ..
            })
        ));
        assert!(matches!(
            BulkActionConfig::from_json("{"),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn id_main_field_is_not_displayed_twice() {
        let config = BulkActionConfig::default().with_main_field("id");
        assert_eq!(config.display_main_field(), None);
    }
}
