//! Platform-specific configuration types and utilities.
//!
//! Extractor options arrive as a loose JSON `extras` object. This module
//! provides the typed view of that object and a helper for layering several
//! extras sources (defaults, config file, command line) on top of each other.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

/// AfreecaTV platform-specific configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AfreecaConfig {
    /// Override for the player API endpoint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
    /// User agent sent with every API request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl AfreecaConfig {
    /// Reads the typed config out of `extras`.
    ///
    /// Unknown keys are ignored. A value of the wrong type discards the whole
    /// object and falls back to defaults.
    pub fn from_extras(extras: Option<&Value>) -> Self {
        let Some(extras) = extras else {
            return Self::default();
        };
        match serde_json::from_value(extras.clone()) {
            Ok(config) => config,
            Err(e) => {
                warn!(error = %e, "Invalid afreeca extras; using defaults");
                Self::default()
            }
        }
    }
}

/// Merge two JSON objects, with overlay taking precedence.
///
/// This function performs a shallow merge of JSON objects. For nested objects,
/// the overlay completely replaces the base value (no deep merge).
///
/// # Example
/// ```
/// use serde_json::json;
/// use afreeca_parser::extractor::platform_configs::merge_platform_extras;
///
/// let base = Some(json!({"api_url": "http://a", "user_agent": "x"}));
/// let overlay = Some(json!({"user_agent": "y"}));
/// let merged = merge_platform_extras(base, overlay);
/// assert_eq!(merged, Some(json!({"api_url": "http://a", "user_agent": "y"})));
/// ```
pub fn merge_platform_extras(base: Option<Value>, overlay: Option<Value>) -> Option<Value> {
    match (base, overlay) {
        (None, None) => None,
        (Some(b), None) => Some(b),
        (None, Some(o)) => Some(o),
        (Some(Value::Object(mut base_map)), Some(Value::Object(overlay_map))) => {
            for (k, v) in overlay_map {
                // Skip null values - they don't override
                if !v.is_null() {
                    base_map.insert(k, v);
                }
            }
            Some(Value::Object(base_map))
        }
        // If either is not an object, overlay wins
        (_, Some(o)) => Some(o),
    }
}
