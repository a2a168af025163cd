//! Runtime languages and the runtime versions a package was built for.

use serde::{Deserialize, Serialize};

/// Node.js major version to module ABI (`NODE_MODULE_VERSION`) table.
///
/// Order is the installer's preference: older, stable runtimes first.
pub const NODE_ABI_VERSIONS: [(u32, u32); 4] = [(8, 57), (10, 64), (12, 72), (14, 83)];

/// Python minor versions a python addon is declared compatible with.
pub const PYTHON_VERSIONS: [&str; 5] = ["3.5", "3.6", "3.7", "3.8", "3.9"];

/// Sentinel runtime version for language independent packages.
const ANY_VERSION: &str = "any";

/// Runtime an addon package runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LanguageName {
    /// Node.js addon loaded through the gateway's node loader.
    Nodejs,
    /// Python addon.
    Python,
    /// No runtime constraint.
    #[default]
    Any,
}

impl LanguageName {
    /// Catalog token for this language.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Nodejs => "nodejs",
            Self::Python => "python",
            Self::Any => "any",
        }
    }
}

impl std::fmt::Display for LanguageName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Language block of a package: runtime name plus compatible versions.
///
/// For `nodejs` the versions are module ABI numbers encoded as strings, for
/// `python` they are dotted minor versions and for `any` the single
/// sentinel `"any"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    /// Runtime name.
    pub name: LanguageName,
    /// Runtime versions the package supports.
    pub versions: Vec<String>,
}

impl Default for Language {
    fn default() -> Self {
        Self::any()
    }
}

impl Language {
    /// Language independent package.
    pub fn any() -> Self {
        Self {
            name: LanguageName::Any,
            versions: vec![ANY_VERSION.to_string()],
        }
    }

    /// Python package compatible with every supported python version.
    pub fn python() -> Self {
        Self {
            name: LanguageName::Python,
            versions: PYTHON_VERSIONS.iter().map(ToString::to_string).collect(),
        }
    }

    /// Node.js package built against module ABI `abi`, or against no
    /// particular ABI when `None`.
    pub fn nodejs(abi: Option<u32>) -> Self {
        let versions = match abi {
            Some(abi) => vec![abi.to_string()],
            None => vec![ANY_VERSION.to_string()],
        };
        Self {
            name: LanguageName::Nodejs,
            versions,
        }
    }

    /// Position of the first version's ABI in [`NODE_ABI_VERSIONS`].
    pub fn node_abi_rank(&self) -> Option<usize> {
        let abi: u32 = self.versions.first()?.parse().ok()?;
        NODE_ABI_VERSIONS.iter().position(|(_, a)| *a == abi)
    }

    /// Position of the first version in [`PYTHON_VERSIONS`].
    pub fn python_rank(&self) -> Option<usize> {
        let version = self.versions.first()?;
        PYTHON_VERSIONS.iter().position(|v| v == version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_abi_rank() {
        assert_eq!(Language::nodejs(Some(57)).node_abi_rank(), Some(0));
        assert_eq!(Language::nodejs(Some(83)).node_abi_rank(), Some(3));
        assert_eq!(Language::nodejs(Some(93)).node_abi_rank(), None);
        assert_eq!(Language::nodejs(None).node_abi_rank(), None);
    }

    #[test]
    fn test_python_carries_full_list() {
        let lang = Language::python();
        assert_eq!(lang.versions, vec!["3.5", "3.6", "3.7", "3.8", "3.9"]);
        assert_eq!(lang.python_rank(), Some(0));
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_string(&Language::nodejs(Some(72))).unwrap();
        assert_eq!(json, r#"{"name":"nodejs","versions":["72"]}"#);
        let json = serde_json::to_string(&Language::any()).unwrap();
        assert_eq!(json, r#"{"name":"any","versions":["any"]}"#);
    }
}
