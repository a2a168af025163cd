//! Platform architectures understood by the gateway installer.

/// Target platform of a package build.
///
/// The gateway picks the first package whose architecture matches the host,
/// so declaration order doubles as the installer's priority order (see
/// [`Architecture::rank`]).
///
/// # Example
///
/// ```
/// use addon_schema::Architecture;
///
/// let arch = Architecture::detect("https://example.com/foo-1.0.0-linux-arm64-v10.tgz");
/// assert_eq!(arch, Architecture::LinuxArm64);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize, Default,
)]
pub enum Architecture {
    /// 32-bit ARM Linux (Raspberry Pi OS).
    #[serde(rename = "linux-arm")]
    LinuxArm,
    /// 64-bit ARM Linux.
    #[serde(rename = "linux-arm64")]
    LinuxArm64,
    /// `x86_64` Linux.
    #[serde(rename = "linux-x64")]
    LinuxX64,
    /// Intel macOS.
    #[serde(rename = "darwin-x64")]
    DarwinX64,
    /// Platform independent build.
    #[default]
    #[serde(rename = "any")]
    Any,
}

impl Architecture {
    /// Platform specific architectures in installer priority order.
    pub const PLATFORMS: [Self; 4] = [
        Self::LinuxArm,
        Self::LinuxArm64,
        Self::LinuxX64,
        Self::DarwinX64,
    ];

    /// Token used in asset names and in the catalog.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LinuxArm => "linux-arm",
            Self::LinuxArm64 => "linux-arm64",
            Self::LinuxX64 => "linux-x64",
            Self::DarwinX64 => "darwin-x64",
            Self::Any => "any",
        }
    }

    /// Position in [`Self::PLATFORMS`]; `None` for [`Architecture::Any`].
    ///
    /// `None` orders before every platform rank.
    pub fn rank(&self) -> Option<usize> {
        Self::PLATFORMS.iter().position(|a| a == self)
    }

    /// Infer the architecture from an asset URL.
    ///
    /// Every platform token is tested in priority order and the last one
    /// found wins, so `linux-arm64` beats its prefix `linux-arm`.
    pub fn detect(url: &str) -> Self {
        Self::PLATFORMS
            .iter()
            .rev()
            .find(|arch| url.contains(arch.as_str()))
            .copied()
            .unwrap_or(Self::Any)
    }
}

impl std::fmt::Display for Architecture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
