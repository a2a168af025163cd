//! The catalog descriptor: one [`Addon`] listing its installable [`Package`]s.

use serde::{Deserialize, Serialize};

use crate::{ANY_GATEWAY_VERSION, Architecture, Language, Sha256Hash};

/// Range of gateway versions a package is compatible with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gateway {
    /// Lowest compatible gateway version (inclusive).
    pub min: String,
    /// Highest compatible gateway version, `*` when unbounded.
    pub max: String,
}

impl Gateway {
    /// Build a range, defaulting a missing upper bound to `*`.
    pub fn new(min: impl Into<String>, max: Option<&str>) -> Self {
        Self {
            min: min.into(),
            max: max.unwrap_or(ANY_GATEWAY_VERSION).to_string(),
        }
    }
}

/// One platform/runtime specific build of an addon, tied to a release asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    /// Platform the build targets.
    pub architecture: Architecture,
    /// Runtime and runtime versions.
    pub language: Language,
    /// The addon's release version (not the asset's own versioning).
    pub version: String,
    /// Download URL of the asset.
    pub url: String,
    /// SHA256 of the asset.
    pub checksum: Sha256Hash,
    /// Compatible gateway versions.
    pub gateway: Gateway,
}

/// Descriptor published to `addons/<id>.json` in the catalog.
///
/// Field order is the serialized key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Addon {
    /// Addon identifier.
    pub id: String,
    /// Human readable name.
    pub name: String,
    /// Short description.
    pub description: String,
    /// Author or organisation.
    pub author: String,
    /// Project homepage.
    pub homepage_url: String,
    /// Raw URL of the project's `LICENSE` file.
    pub license_url: String,
    /// Primary addon type.
    pub primary_type: String,
    /// Installable builds in installer priority order.
    pub packages: Vec<Package>,
}

impl Addon {
    /// Version of the release this descriptor was built from.
    pub fn version(&self) -> Option<&str> {
        self.packages.first().map(|p| p.version.as_str())
    }

    /// Render the descriptor as written to the catalog: JSON with two space
    /// indentation and a trailing newline.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_catalog_json(&self) -> serde_json::Result<String> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> Addon {
        Addon {
            id: "foo".to_string(),
            name: "Foo".to_string(),
            description: "Foo adapter".to_string(),
            author: "Jane".to_string(),
            homepage_url: "https://github.com/jane/foo".to_string(),
            license_url: "https://raw.githubusercontent.com/jane/foo/master/LICENSE".to_string(),
            primary_type: "adapter".to_string(),
            packages: vec![Package {
                architecture: Architecture::LinuxArm,
                language: Language::nodejs(Some(64)),
                version: "1.2.0".to_string(),
                url: "https://example.com/foo-1.2.0-linux-arm-v10.tgz".to_string(),
                checksum: Sha256Hash::new("ab12"),
                gateway: Gateway::new("0.10.0", None),
            }],
        }
    }

    #[test]
    fn test_catalog_json_layout() {
        let expected = r#"{
  "id": "foo",
  "name": "Foo",
  "description": "Foo adapter",
  "author": "Jane",
  "homepage_url": "https://github.com/jane/foo",
  "license_url": "https://raw.githubusercontent.com/jane/foo/master/LICENSE",
  "primary_type": "adapter",
  "packages": [
    {
      "architecture": "linux-arm",
      "language": {
        "name": "nodejs",
        "versions": [
          "64"
        ]
      },
      "version": "1.2.0",
      "url": "https://example.com/foo-1.2.0-linux-arm-v10.tgz",
      "checksum": "ab12",
      "gateway": {
        "min": "0.10.0",
        "max": "*"
      }
    }
  ]
}
"#;
        assert_eq!(sample().to_catalog_json().unwrap(), expected);
    }

    #[test]
    fn test_catalog_json_is_stable() {
        let a = sample().to_catalog_json().unwrap();
        let b = sample().to_catalog_json().unwrap();
        assert_eq!(a, b);

        let reparsed: Addon = serde_json::from_str(&a).unwrap();
        assert_eq!(reparsed, sample());
    }

    #[test]
    fn test_version_from_first_package() {
        assert_eq!(sample().version(), Some("1.2.0"));
    }
}
