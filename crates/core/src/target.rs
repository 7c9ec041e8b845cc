//! Compilation target identifiers and platform families.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The platform family a compilation target belongs to.
///
/// Families mirror the common multiplatform split: bytecode for a managed
/// runtime, a native binary per OS/architecture, or a web bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformFamily {
    /// JVM bytecode output.
    Jvm,
    /// Native binary output (per OS/architecture).
    Native,
    /// Web bundle output (JS or Wasm).
    Web,
    /// Anything the classifier does not recognize.
    Other,
}

impl PlatformFamily {
    /// Classify a target identifier into its platform family.
    ///
    /// Identifiers follow the usual multiplatform naming: `jvm`,
    /// OS+architecture pairs like `linuxX64` or `macosArm64` for native
    /// binaries, and `js`/`wasm*` for the web.
    #[must_use]
    pub fn classify(target_id: &str) -> Self {
        const NATIVE_PREFIXES: &[&str] = &[
            "linux", "macos", "mingw", "ios", "watchos", "tvos", "android", "native",
        ];

        if target_id == "jvm" {
            return Self::Jvm;
        }
        if target_id == "js" || target_id.starts_with("js-") || target_id.starts_with("wasm") {
            return Self::Web;
        }
        if NATIVE_PREFIXES
            .iter()
            .any(|prefix| target_id.starts_with(prefix))
        {
            return Self::Native;
        }
        Self::Other
    }
}

impl fmt::Display for PlatformFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Jvm => "jvm",
            Self::Native => "native",
            Self::Web => "web",
            Self::Other => "other",
        };
        write!(f, "{s}")
    }
}

/// A distinct compilation output platform declared by a module.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Target {
    /// Target identifier, e.g. `jvm`, `linuxX64`, `js`.
    pub id: String,
    /// Platform family the identifier classifies into.
    pub family: PlatformFamily,
}

impl Target {
    /// Create a target from its identifier, classifying the family.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        let family = PlatformFamily::classify(&id);
        Self { id, family }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}
