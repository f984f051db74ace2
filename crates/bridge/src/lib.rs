//! studio: Embed a full-screen creative editor behind one async call.
//!
//! A host application opens the editor, the user designs and exports, and
//! the returned future settles exactly once with a typed description of
//! what was produced, or `None` when the user simply closed the UI.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use studio::{BoundaryValue, EditorBridge};
//!
//! # async fn example(host: Arc<dyn studio::EditorHost>) -> Result<(), Box<dyn std::error::Error>> {
//! let bridge = EditorBridge::new(host);
//!
//! let mut settings = std::collections::BTreeMap::new();
//! settings.insert("license".to_string(), BoundaryValue::String("my-license".into()));
//! settings.insert(
//!     "sceneBaseUri".to_string(),
//!     BoundaryValue::String("https://assets.example.com/scenes".into()),
//! );
//!
//! match bridge
//!     .open_editor(Some(BoundaryValue::Map(settings)), None, Some("photo"), None)
//!     .await?
//! {
//!     Some(result) => println!("exported: {result:?}"),
//!     None => println!("closed without exporting"),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Layering
//!
//! - [`studio_protocol`]: presets, settings, results, the closed value
//!   union and its marshaler
//! - [`studio_runtime`]: the session manager, builder registry, and the
//!   collaborator traits ([`EditorHost`], [`EditorEngine`])
//! - this crate: dynamic argument decoding and the stable error codes
//!   ([`ErrorCode`]) handed to the host
//!
//! Cancellation is not an error: a dismissed editor resolves `None`.
//! Exactly one of `{E_MISSING_ARGUMENTS, E_PARSING, E_EXPORT_FAILED,
//! E_BUSY}` accompanies every rejection.

mod bridge;
mod error;

pub use bridge::EditorBridge;
pub use error::{BridgeError, BridgeResult, ErrorCode};

// Re-export the data model and collaborator surface for convenience
pub use studio_protocol::{
    BoundaryMap, BoundaryValue, EditorPreset, EditorResult, EditorSettings, EngineExport,
    MarshalError, MetadataMap, MetadataValue, MimeType, Source, SourceType,
};
pub use studio_runtime::{
    BuilderFactory, BuilderStrategy, CustomBuilder, EditorEngine, EditorEvent, EditorHooks,
    EditorHost, EventSink, HostHandle, LaunchSpec, SessionCallback, SessionManager, SessionPhase,
    TerminalEvent, UiHandle,
};

// Re-export the inner crates for callers that need the full surface
pub use studio_protocol;
pub use studio_runtime;
