//! Result shapes produced by the engine collaborator.

use crate::value::{BoundaryValue, MarshalError, MetadataValue, decode_map, encode_map};
use std::collections::BTreeMap;

/// The raw payload of a successful export, as handed back by the engine
/// side of the boundary.
///
/// Metadata is still in the host container representation; the session
/// coordinator marshals it into the closed union before anything reaches
/// the caller.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EngineExport {
    /// Location of the serialized scene document, if one was saved.
    pub scene: Option<String>,
    /// Location of the exported artifact, e.g. image, video, document.
    pub artifact: Option<String>,
    /// Location of the artifact's thumbnail.
    pub thumbnail: Option<String>,
    /// Collaborator-supplied metadata, not yet marshaled.
    pub metadata: BTreeMap<String, BoundaryValue>,
}

/// A fully marshaled editor result delivered to the caller.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EditorResult {
    /// Location of the serialized scene document.
    pub scene: Option<String>,
    /// Location of the exported artifact.
    pub artifact: Option<String>,
    /// Location of the artifact's thumbnail.
    pub thumbnail: Option<String>,
    /// Metadata associated with the export.
    pub metadata: BTreeMap<String, MetadataValue>,
}

impl EditorResult {
    /// Marshals a raw engine export, all-or-nothing.
    ///
    /// One unsupported metadata value anywhere fails the whole result;
    /// scene/artifact/thumbnail never survive a partial marshal.
    pub fn from_export(export: EngineExport) -> Result<Self, MarshalError> {
        let metadata = decode_map(&export.metadata)?;
        Ok(Self {
            scene: export.scene,
            artifact: export.artifact,
            thumbnail: export.thumbnail,
            metadata,
        })
    }

    /// Encodes the result into the host boundary representation.
    ///
    /// Absent fields encode as explicit nulls so the caller always sees
    /// the same four keys.
    pub fn to_boundary(&self) -> BoundaryValue {
        fn opt(value: &Option<String>) -> BoundaryValue {
            match value {
                Some(s) => BoundaryValue::String(s.clone()),
                None => BoundaryValue::Null,
            }
        }

        let mut map = BTreeMap::new();
        map.insert("scene".to_string(), opt(&self.scene));
        map.insert("artifact".to_string(), opt(&self.artifact));
        map.insert("thumbnail".to_string(), opt(&self.thumbnail));
        map.insert(
            "metadata".to_string(),
            BoundaryValue::Map(encode_map(&self.metadata)),
        );
        BoundaryValue::Map(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_export_marshals_metadata() {
        let mut metadata = BTreeMap::new();
        metadata.insert("pages".to_string(), BoundaryValue::Int(3));
        metadata.insert("title".to_string(), BoundaryValue::String("draft".into()));

        let export = EngineExport {
            scene: Some("file:///tmp/scene".to_string()),
            artifact: Some("file:///tmp/artifact.pdf".to_string()),
            thumbnail: None,
            metadata,
        };

        let result = EditorResult::from_export(export).unwrap();
        assert_eq!(result.metadata["pages"], MetadataValue::Int(3));
        assert_eq!(
            result.metadata["title"],
            MetadataValue::String("draft".to_string())
        );
        assert!(result.thumbnail.is_none());
    }

    #[test]
    fn test_from_export_fails_whole_result_on_blob() {
        let mut metadata = BTreeMap::new();
        metadata.insert("ok".to_string(), BoundaryValue::Bool(true));
        metadata.insert("raw".to_string(), BoundaryValue::Bytes(vec![1, 2]));

        let export = EngineExport {
            scene: Some("file:///tmp/scene".to_string()),
            artifact: Some("file:///tmp/artifact.png".to_string()),
            thumbnail: Some("file:///tmp/thumb.png".to_string()),
            metadata,
        };

        assert!(EditorResult::from_export(export).is_err());
    }

    #[test]
    fn test_to_boundary_always_has_four_keys() {
        let result = EditorResult {
            artifact: Some("file:///tmp/out.png".to_string()),
            ..Default::default()
        };

        let BoundaryValue::Map(map) = result.to_boundary() else {
            panic!("expected a map");
        };
        assert_eq!(map.len(), 4);
        assert_eq!(map["scene"], BoundaryValue::Null);
        assert_eq!(
            map["artifact"],
            BoundaryValue::String("file:///tmp/out.png".to_string())
        );
        assert_eq!(map["metadata"], BoundaryValue::Map(BTreeMap::new()));
    }
}
