//! Lazily resolved image references.
//!
//! # Responsibility
//! - Track whether a record's image is absent, a pending asset path, or a
//!   resolved handle.
//! - Resolve asset paths against the packaged-asset base URI on first read.
//!
//! # Invariants
//! - A resolved handle is cached until the reference is reassigned.
//! - Assigning a path always invalidates a previously resolved handle.
//! - Blank paths resolve to no image.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Base URI that relative asset paths are resolved against.
pub const ASSET_BASE_URI: &str = "ms-appx:///";

static URI_SCHEME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*://").expect("valid uri scheme regex")
});

/// Loadable image location handed to the UI layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageHandle {
    uri: String,
}

impl ImageHandle {
    pub fn from_uri(uri: impl Into<String>) -> Self {
        Self { uri: uri.into() }
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }
}

/// Image state of one record.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ImageRef {
    #[default]
    Empty,
    /// Asset path not yet turned into a handle.
    Unresolved(String),
    Resolved(ImageHandle),
}

impl ImageRef {
    /// Builds a pending reference; blank paths yield `Empty`.
    pub fn from_path(path: impl Into<String>) -> Self {
        let path = path.into();
        if path.trim().is_empty() {
            Self::Empty
        } else {
            Self::Unresolved(path)
        }
    }

    /// Returns the handle, resolving a pending path on first call.
    pub fn resolve(&mut self) -> Option<ImageHandle> {
        if let Self::Unresolved(path) = self {
            *self = match resolve_asset_uri(path) {
                Some(uri) => Self::Resolved(ImageHandle::from_uri(uri)),
                None => Self::Empty,
            };
        }
        match self {
            Self::Resolved(handle) => Some(handle.clone()),
            Self::Empty | Self::Unresolved(_) => None,
        }
    }

    /// Pending asset path, if the reference has not been resolved yet.
    pub fn pending_path(&self) -> Option<&str> {
        match self {
            Self::Unresolved(path) => Some(path.as_str()),
            Self::Empty | Self::Resolved(_) => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }
}

/// Joins an asset path onto [`ASSET_BASE_URI`].
///
/// Paths that already carry a URI scheme are returned unchanged. Backslashes
/// are normalized to forward slashes and leading slashes are stripped.
pub fn resolve_asset_uri(path: &str) -> Option<String> {
    let trimmed = path.trim();
    if trimmed.is_empty() {
        return None;
    }
    if URI_SCHEME_RE.is_match(trimmed) {
        return Some(trimmed.to_string());
    }
    let normalized = trimmed.replace('\\', "/");
    let relative = normalized.trim_start_matches('/');
    if relative.is_empty() {
        return None;
    }
    Some(format!("{ASSET_BASE_URI}{relative}"))
}

#[cfg(test)]
mod tests {
    use super::{resolve_asset_uri, ImageHandle, ImageRef};

    #[test]
    fn resolves_relative_paths_against_asset_base() {
        assert_eq!(
            resolve_asset_uri("Assets/DarkGray.png").as_deref(),
            Some("ms-appx:///Assets/DarkGray.png")
        );
        assert_eq!(
            resolve_asset_uri("\\Assets\\HubPage\\HubpageImage2.png").as_deref(),
            Some("ms-appx:///Assets/HubPage/HubpageImage2.png")
        );
    }

    #[test]
    fn keeps_absolute_uris_and_rejects_blank() {
        assert_eq!(
            resolve_asset_uri("https://example.com/a.png").as_deref(),
            Some("https://example.com/a.png")
        );
        assert_eq!(resolve_asset_uri("  "), None);
        assert_eq!(resolve_asset_uri("///"), None);
    }

    #[test]
    fn resolve_transitions_once_and_caches() {
        let mut image = ImageRef::from_path("Assets/Logo.png");
        assert_eq!(image.pending_path(), Some("Assets/Logo.png"));

        let handle = image.resolve().expect("path should resolve");
        assert_eq!(handle, ImageHandle::from_uri("ms-appx:///Assets/Logo.png"));
        assert!(image.is_resolved());
        assert_eq!(image.pending_path(), None);
        assert_eq!(image.resolve(), Some(handle));
    }

    #[test]
    fn blank_path_is_empty() {
        let mut image = ImageRef::from_path(" ");
        assert_eq!(image, ImageRef::Empty);
        assert_eq!(image.resolve(), None);
    }
}
