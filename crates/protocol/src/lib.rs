//! Data model for the studio editor bridge.
//!
//! This crate contains the types that cross the host boundary: editor
//! presets and settings decoded from caller-supplied dynamic data, the
//! result shapes handed back by the editing engine, and the closed value
//! union used to marshal heterogeneous metadata payloads.
//!
//! # Design Philosophy
//!
//! Types in this crate are:
//! - **Pure data**: No behavior beyond validation and marshaling
//! - **Closed**: Every union is a fixed enumeration; values outside it
//!   fail marshaling rather than falling through a default branch
//! - **Stable**: Changes only when the host boundary changes
//!
//! Session coordination and the collaborator surface live in
//! `studio-runtime`; the host-facing entry point lives in `studio-bridge`.

pub mod preset;
pub mod result;
pub mod settings;
pub mod value;

pub use preset::{EditorPreset, MimeType, SourceType};
pub use result::{EditorResult, EngineExport};
pub use settings::{EditorSettings, Source, SourceError};
pub use value::{
    BoundaryMap, BoundaryValue, MarshalError, MetadataMap, MetadataValue, decode, decode_map,
    encode, encode_map,
};
