//! Media locator type passed to the engine at prepare time.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Opaque locator for a playable media item.
///
/// The core never inspects the content behind the locator; it is handed to
/// the engine adapter verbatim at prepare time and is immutable once
/// submitted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Media {
    location: String,
}

impl Media {
    /// Create a media item from an already-formed locator (URI or path).
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
        }
    }

    /// Create a media item from a local filesystem path.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        Self {
            location: path.as_ref().to_string_lossy().into_owned(),
        }
    }

    /// Create a media item from a remote URL.
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            location: url.into(),
        }
    }

    /// The locator as submitted.
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Determine whether the locator points at remote content.
    pub fn is_remote(&self) -> bool {
        match self.location.split_once("://") {
            Some((scheme, _)) => !scheme.eq_ignore_ascii_case("file"),
            None => false,
        }
    }
}

impl std::fmt::Display for Media {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.location)
    }
}
