//! Closed enumerations shared across the host boundary.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Prebuilt editor configurations selectable by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditorPreset {
    /// Multi-page design editor (default).
    #[default]
    Design,
    /// Single-image photo editor.
    Photo,
    /// Two-sided postcard editor.
    Postcard,
    /// Print-on-garment apparel editor.
    Apparel,
    /// Timeline-based video editor.
    Video,
}

impl EditorPreset {
    /// Every preset with a built-in builder strategy.
    pub const ALL: [EditorPreset; 5] = [
        EditorPreset::Design,
        EditorPreset::Photo,
        EditorPreset::Postcard,
        EditorPreset::Apparel,
        EditorPreset::Video,
    ];

    /// Parses a wire identifier. Unknown identifiers yield `None`; callers
    /// decide the fallback (the entry point falls back to `Design`).
    pub fn from_value(value: &str) -> Option<Self> {
        match value {
            "design" => Some(EditorPreset::Design),
            "photo" => Some(EditorPreset::Photo),
            "postcard" => Some(EditorPreset::Postcard),
            "apparel" => Some(EditorPreset::Apparel),
            "video" => Some(EditorPreset::Video),
            _ => None,
        }
    }

    /// The wire identifier for this preset.
    pub fn as_str(&self) -> &'static str {
        match self {
            EditorPreset::Design => "design",
            EditorPreset::Photo => "photo",
            EditorPreset::Postcard => "postcard",
            EditorPreset::Apparel => "apparel",
            EditorPreset::Video => "video",
        }
    }
}

impl fmt::Display for EditorPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The kind of content a [`crate::Source`] points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    /// A serialized scene document.
    #[default]
    Scene,
    /// An image file, e.g. `.png`.
    Image,
    /// A video file, e.g. `.mp4`.
    Video,
}

impl SourceType {
    /// Parses a wire identifier. Unknown identifiers yield `None`.
    pub fn from_value(value: &str) -> Option<Self> {
        match value {
            "scene" => Some(SourceType::Scene),
            "image" => Some(SourceType::Image),
            "video" => Some(SourceType::Video),
            _ => None,
        }
    }

    /// The wire identifier for this source type.
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceType::Scene => "scene",
            SourceType::Image => "image",
            SourceType::Video => "video",
        }
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Encodings the engine collaborator can export artifacts in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MimeType {
    Png,
    Jpeg,
    Pdf,
    Mp4,
}

impl MimeType {
    /// The canonical mime string.
    pub fn as_str(&self) -> &'static str {
        match self {
            MimeType::Png => "image/png",
            MimeType::Jpeg => "image/jpeg",
            MimeType::Pdf => "application/pdf",
            MimeType::Mp4 => "video/mp4",
        }
    }

    /// File extension used when persisting an artifact of this type.
    pub fn extension(&self) -> &'static str {
        match self {
            MimeType::Png => "png",
            MimeType::Jpeg => "jpg",
            MimeType::Pdf => "pdf",
            MimeType::Mp4 => "mp4",
        }
    }
}

impl fmt::Display for MimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_wire_round_trip() {
        for preset in EditorPreset::ALL {
            assert_eq!(EditorPreset::from_value(preset.as_str()), Some(preset));
        }
    }

    #[test]
    fn test_preset_unknown_is_none() {
        assert_eq!(EditorPreset::from_value("poster"), None);
        assert_eq!(EditorPreset::from_value(""), None);
        assert_eq!(EditorPreset::from_value("Design"), None);
    }

    #[test]
    fn test_preset_default_is_design() {
        assert_eq!(EditorPreset::default(), EditorPreset::Design);
    }

    #[test]
    fn test_preset_serde_lowercase() {
        let json = serde_json::to_string(&EditorPreset::Postcard).unwrap();
        assert_eq!(json, "\"postcard\"");
        let back: EditorPreset = serde_json::from_str("\"video\"").unwrap();
        assert_eq!(back, EditorPreset::Video);
    }

    #[test]
    fn test_source_type_wire_round_trip() {
        for kind in [SourceType::Scene, SourceType::Image, SourceType::Video] {
            assert_eq!(SourceType::from_value(kind.as_str()), Some(kind));
        }
        assert_eq!(SourceType::from_value("audio"), None);
    }

    #[test]
    fn test_mime_type_extension() {
        assert_eq!(MimeType::Png.extension(), "png");
        assert_eq!(MimeType::Mp4.extension(), "mp4");
        assert_eq!(MimeType::Pdf.as_str(), "application/pdf");
    }
}
