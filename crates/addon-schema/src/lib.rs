//! Shared types and wire format for the WebThings addon catalog.
//!
//! The catalog (`WebThingsIO/addon-list`) stores one JSON descriptor per
//! addon under `addons/<id>.json`. The types in this crate serialize to
//! exactly that layout, so field order here is part of the wire format.

pub mod addon;
pub mod arch;
pub mod hash;
pub mod language;
pub mod manifest;

// Re-exports
pub use addon::{Addon, Gateway, Package};
pub use arch::Architecture;
pub use hash::Sha256Hash;
pub use language::{Language, LanguageName, NODE_ABI_VERSIONS, PYTHON_VERSIONS};
pub use manifest::{GatewaySpecificSettings, Manifest, WebthingsSettings};

/// Wildcard used for an open-ended gateway compatibility bound.
pub const ANY_GATEWAY_VERSION: &str = "*";
