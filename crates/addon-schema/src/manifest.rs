//! The addon author's `manifest.json`.
//!
//! Only the fields the release tooling reads are modelled; everything else in
//! the file (options schema, short name, ...) is ignored on parse.

use serde::{Deserialize, Serialize};

/// Top level of an addon `manifest.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// Addon identifier, also the catalog file name.
    pub id: String,
    /// Human readable name.
    pub name: String,
    /// Semantic version of this release.
    pub version: String,
    /// One line description shown in the gateway UI.
    pub description: String,
    /// Author or organisation.
    pub author: String,
    /// Project homepage.
    pub homepage_url: String,
    /// Gateway specific settings block.
    pub gateway_specific_settings: GatewaySpecificSettings,
}

/// `gateway_specific_settings` block of the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewaySpecificSettings {
    /// Settings for the WebThings gateway.
    pub webthings: WebthingsSettings,
}

/// `gateway_specific_settings.webthings` block of the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebthingsSettings {
    /// Launch command template, e.g. `{nodeLoader} {path}` or
    /// `python3 {path}/main.py`.
    pub exec: String,
    /// Lowest compatible gateway version.
    pub strict_min_version: String,
    /// Highest compatible gateway version, unbounded when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strict_max_version: Option<String>,
    /// Primary addon type (`adapter`, `notifier`, `extension`).
    pub primary_type: String,
}

impl Manifest {
    /// Parse a manifest from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not JSON or lacks a required field.
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Shorthand for `gateway_specific_settings.webthings`.
    pub fn webthings(&self) -> &WebthingsSettings {
        &self.gateway_specific_settings.webthings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ignores_unknown_fields() {
        let text = r#"{
            "manifest_version": 1,
            "id": "zwave-adapter",
            "name": "Z-Wave",
            "short_name": "Z-Wave",
            "version": "0.11.0",
            "description": "Z-Wave support",
            "homepage_url": "https://github.com/WebThingsIO/zwave-adapter",
            "license": "MPL-2.0",
            "author": "WebThingsIO",
            "gateway_specific_settings": {
                "webthings": {
                    "exec": "{nodeLoader} {path}",
                    "strict_min_version": "0.10.0",
                    "primary_type": "adapter"
                }
            },
            "options": { "default": {}, "schema": {} }
        }"#;

        let manifest = Manifest::from_json(text).unwrap();
        assert_eq!(manifest.id, "zwave-adapter");
        assert_eq!(manifest.webthings().exec, "{nodeLoader} {path}");
        assert_eq!(manifest.webthings().strict_max_version, None);
    }

    #[test]
    fn test_missing_required_field_fails() {
        assert!(Manifest::from_json(r#"{"id": "foo"}"#).is_err());
    }
}
