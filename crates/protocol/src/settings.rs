//! Editor configuration decoded from caller-supplied dynamic data.

use crate::preset::SourceType;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Error raised when a source location is not a usable URL.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid source location '{location}': {reason}")]
pub struct SourceError {
    /// The offending location as supplied by the caller.
    pub location: String,
    /// Why the location was rejected.
    pub reason: String,
}

impl SourceError {
    fn new(location: &str, reason: impl Into<String>) -> Self {
        Self {
            location: location.to_string(),
            reason: reason.into(),
        }
    }
}

/// Content to load into the editor on launch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    /// Where the content lives. Must canonicalize to a URL with a
    /// non-empty scheme and path; rewritten once with the canonical form.
    #[serde(rename = "source")]
    pub location: String,
    /// What kind of content the location points at.
    #[serde(rename = "type")]
    pub kind: SourceType,
}

impl Source {
    /// Creates a source for the given location and content kind.
    pub fn new(location: impl Into<String>, kind: SourceType) -> Self {
        Self {
            location: location.into(),
            kind,
        }
    }

    /// Parses and validates the location without mutating it.
    pub fn canonical_url(&self) -> Result<Url, SourceError> {
        let url = Url::parse(&self.location)
            .map_err(|err| SourceError::new(&self.location, err.to_string()))?;
        if url.path().is_empty() {
            return Err(SourceError::new(&self.location, "missing path"));
        }
        Ok(url)
    }

    /// Canonicalizes the location in place and returns the parsed URL.
    ///
    /// This is the one permitted mutation of a decoded source: the
    /// location is replaced by its canonical textual form.
    pub fn canonicalize(&mut self) -> Result<Url, SourceError> {
        let url = self.canonical_url()?;
        self.location = url.to_string();
        Ok(url)
    }
}

/// Everything the editor needs to operate, decoded once at call time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorSettings {
    /// The license key for the editing engine.
    pub license: String,
    /// Base URI for scene assets referenced through relative paths.
    pub scene_base_uri: String,
    /// Base URI of the default assets in the asset library.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_base_uri: Option<String>,
    /// Unique id tied to the host application's user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Content to load on launch instead of the preset default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<Source>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_settings_decode_camel_case() {
        let settings: EditorSettings = serde_json::from_value(json!({
            "license": "key-123",
            "sceneBaseUri": "https://assets.example.com/scenes",
            "assetBaseUri": "https://assets.example.com/library",
            "userId": "user-1"
        }))
        .unwrap();

        assert_eq!(settings.license, "key-123");
        assert_eq!(settings.scene_base_uri, "https://assets.example.com/scenes");
        assert_eq!(
            settings.asset_base_uri.as_deref(),
            Some("https://assets.example.com/library")
        );
        assert_eq!(settings.user_id.as_deref(), Some("user-1"));
        assert!(settings.source.is_none());
    }

    #[test]
    fn test_settings_decode_requires_license_and_scene_base() {
        let missing_license = json!({"sceneBaseUri": "https://assets.example.com"});
        assert!(serde_json::from_value::<EditorSettings>(missing_license).is_err());

        let missing_base = json!({"license": "key"});
        assert!(serde_json::from_value::<EditorSettings>(missing_base).is_err());
    }

    #[test]
    fn test_settings_decode_nested_source() {
        let settings: EditorSettings = serde_json::from_value(json!({
            "license": "key",
            "sceneBaseUri": "https://assets.example.com",
            "source": {"source": "file:///a.png", "type": "image"}
        }))
        .unwrap();

        let source = settings.source.unwrap();
        assert_eq!(source.location, "file:///a.png");
        assert_eq!(source.kind, SourceType::Image);
    }

    #[test]
    fn test_source_canonicalize_keeps_scheme_and_path() {
        let mut source = Source::new("file:///a.png", SourceType::Image);
        let url = source.canonicalize().unwrap();
        assert_eq!(url.scheme(), "file");
        assert_eq!(url.path(), "/a.png");
        assert_eq!(source.location, "file:///a.png");
    }

    #[test]
    fn test_source_canonicalize_rewrites_once() {
        let mut source = Source::new("HTTPS://Example.COM/scene.doc", SourceType::Scene);
        source.canonicalize().unwrap();
        assert_eq!(source.location, "https://example.com/scene.doc");
    }

    #[test]
    fn test_source_rejects_relative_location() {
        let source = Source::new("not-a-uri", SourceType::Image);
        assert!(source.canonical_url().is_err());
    }

    #[test]
    fn test_source_rejects_empty_path() {
        // Non-special scheme with nothing after the colon has no path.
        let source = Source::new("data:", SourceType::Scene);
        assert!(source.canonical_url().is_err());
    }
}
