//! The host-facing asynchronous entry point.
//!
//! Arguments arrive in the host boundary's dynamic representation; this
//! module validates and decodes them, delegates to the session manager,
//! and maps the outcome back onto the caller's resolve/reject convention
//! with stable error codes.

use crate::error::{BridgeError, BridgeResult};
use std::sync::Arc;
use studio_protocol::{BoundaryValue, EditorPreset, EditorSettings, MetadataMap, decode_map};
use studio_runtime::{BuilderFactory, EditorHost, SessionManager};

/// One bridge per embedding host: validates inbound calls and owns the
/// session manager.
///
/// The manager is an owned value, never ambient state; everything that
/// needs it receives it through this struct.
pub struct EditorBridge {
    manager: SessionManager,
}

impl EditorBridge {
    /// Creates a bridge presenting through `host`.
    pub fn new(host: Arc<dyn EditorHost>) -> Self {
        Self {
            manager: SessionManager::new(host),
        }
    }

    /// Installs or clears the builder override factory.
    pub fn set_builder_override(&self, factory: Option<Arc<dyn BuilderFactory>>) {
        self.manager.set_builder_override(factory);
    }

    /// Direct access to the session manager, for typed callers that skip
    /// the dynamic boundary.
    pub fn manager(&self) -> &SessionManager {
        &self.manager
    }

    /// Opens the creative editor.
    ///
    /// Resolves `Ok(None)` when the user closed the editor without
    /// exporting, `Ok(Some(result))` with the boundary-encoded
    /// `{scene, artifact, thumbnail, metadata}` map on a successful
    /// export, and rejects with a [`BridgeError`] otherwise. The returned
    /// future settles exactly once per call.
    pub async fn open_editor(
        &self,
        settings: Option<BoundaryValue>,
        source: Option<BoundaryValue>,
        preset: Option<&str>,
        metadata: Option<BoundaryValue>,
    ) -> BridgeResult<Option<BoundaryValue>> {
        let Some(settings_raw) = settings else {
            tracing::debug!("open_editor rejected: settings argument missing");
            return Err(BridgeError::missing_arguments("settings"));
        };

        let settings = decode_settings(&settings_raw, source.as_ref())?;
        let preset = preset
            .and_then(EditorPreset::from_value)
            .unwrap_or_default();
        let metadata = decode_metadata(metadata.as_ref())?;

        match self.manager.open_editor(settings, preset, metadata).await {
            Ok(None) => Ok(None),
            Ok(Some(result)) => Ok(Some(result.to_boundary())),
            Err(err) => Err(BridgeError::from(err)),
        }
    }
}

/// Decodes the settings map, merging a separately passed source under the
/// `"source"` key first.
fn decode_settings(
    raw: &BoundaryValue,
    source: Option<&BoundaryValue>,
) -> BridgeResult<EditorSettings> {
    let BoundaryValue::Map(map) = raw else {
        return Err(BridgeError::parsing("settings must be a map"));
    };

    let mut merged = map.clone();
    if let Some(source) = source {
        merged.insert("source".to_string(), source.clone());
    }

    let json = BoundaryValue::Map(merged)
        .to_json()
        .map_err(BridgeError::parsing)?;
    serde_json::from_value(json).map_err(BridgeError::parsing)
}

/// Decodes caller metadata into the closed union, all-or-nothing.
fn decode_metadata(raw: Option<&BoundaryValue>) -> BridgeResult<MetadataMap> {
    let Some(raw) = raw else {
        return Ok(MetadataMap::new());
    };
    let BoundaryValue::Map(map) = raw else {
        return Err(BridgeError::parsing("metadata must be a map"));
    };
    // Marshal failures carry the export-failed code, wherever they occur.
    decode_map(map).map_err(BridgeError::export_failed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use studio_protocol::BoundaryMap;

    fn settings_map() -> BoundaryValue {
        let mut map = BoundaryMap::new();
        map.insert("license".into(), BoundaryValue::String("key".into()));
        map.insert(
            "sceneBaseUri".into(),
            BoundaryValue::String("https://assets.example.com".into()),
        );
        BoundaryValue::Map(map)
    }

    #[test]
    fn test_decode_settings_merges_source() {
        let mut source = BoundaryMap::new();
        source.insert("source".into(), BoundaryValue::String("file:///a.png".into()));
        source.insert("type".into(), BoundaryValue::String("image".into()));

        let settings =
            decode_settings(&settings_map(), Some(&BoundaryValue::Map(source))).unwrap();
        let merged = settings.source.unwrap();
        assert_eq!(merged.location, "file:///a.png");
    }

    #[test]
    fn test_decode_settings_rejects_non_map() {
        let err = decode_settings(&BoundaryValue::Int(1), None).unwrap_err();
        assert_eq!(err.code, ErrorCode::Parsing);
    }

    #[test]
    fn test_decode_settings_rejects_blob_field() {
        let BoundaryValue::Map(mut map) = settings_map() else {
            unreachable!()
        };
        map.insert("license".into(), BoundaryValue::Bytes(vec![1]));
        let err = decode_settings(&BoundaryValue::Map(map), None).unwrap_err();
        assert_eq!(err.code, ErrorCode::Parsing);
    }

    #[test]
    fn test_decode_metadata_defaults_to_empty() {
        assert!(decode_metadata(None).unwrap().is_empty());
    }

    #[test]
    fn test_decode_metadata_shape_vs_marshal_errors() {
        let err = decode_metadata(Some(&BoundaryValue::String("nope".into()))).unwrap_err();
        assert_eq!(err.code, ErrorCode::Parsing);

        let mut map = BoundaryMap::new();
        map.insert("blob".into(), BoundaryValue::Bytes(vec![0xff]));
        let err = decode_metadata(Some(&BoundaryValue::Map(map))).unwrap_err();
        assert_eq!(err.code, ErrorCode::ExportFailed);
    }
}
