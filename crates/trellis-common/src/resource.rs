//! References to external script and stylesheet files.
//!
//! The conversion pipeline treats these as opaque values: the referenced
//! file is never opened, resolved or validated.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Result, require_non_empty};

/// A `{path, bundleable}` record pointing at an external JS or CSS file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ExternalResource {
    path: String,
    bundleable: bool,
}

const fn default_bundleable() -> bool {
    true
}

#[derive(Deserialize)]
struct RawResource {
    path: String,
    #[serde(default = "default_bundleable")]
    bundleable: bool,
}

impl<'de> Deserialize<'de> for ExternalResource {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = RawResource::deserialize(deserializer)?;
        Ok(Self::new(raw.path)
            .map_err(serde::de::Error::custom)?
            .with_bundleable(raw.bundleable))
    }
}

impl ExternalResource {
    /// Create a bundleable reference to `path`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `path` is empty.
    pub fn new(path: impl Into<String>) -> Result<Self> {
        let path = path.into();
        require_non_empty("path", &path)?;
        Ok(Self {
            path,
            bundleable: true,
        })
    }

    /// Mark whether a bundler may merge this file with its neighbours.
    #[must_use]
    pub const fn with_bundleable(mut self, bundleable: bool) -> Self {
        self.bundleable = bundleable;
        self
    }

    /// The path or URL as it will appear in the markup.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Whether the file may be bundled.
    #[must_use]
    pub const fn is_bundleable(&self) -> bool {
        self.bundleable
    }
}
