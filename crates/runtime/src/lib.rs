//! Studio Runtime - Session coordination and the collaborator surface
//!
//! This crate owns the machinery between the host-facing entry point and
//! the external editing UI:
//!
//! - **Session manager**: at most one live session per bridge, with a
//!   single completion slot drained by the first terminal event
//! - **Builder registry**: resolves a preset (or a caller override) to the
//!   strategy that presents the UI
//! - **Collaborator surface**: the engine and host traits plus the two
//!   lifecycle hooks (populate-on-create, produce-on-export) that are the
//!   only way the runtime reaches the editing engine
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │ studio-bridge│  Host entry point (dynamic args, stable error codes)
//! └──────┬───────┘
//!        │ typed open_editor
//! ┌──────▼───────┐
//! │studio-runtime│  This crate
//! │  ┌─────────┐ │
//! │  │ Session │ │  Completion slot, terminal events
//! │  └─────────┘ │
//! │  ┌─────────┐ │
//! │  │ Builder │ │  Preset table + override factory
//! │  └─────────┘ │
//! │  ┌─────────┐ │
//! │  │  Hooks  │ │  Default create/export behavior
//! │  └─────────┘ │
//! └──────┬───────┘
//!        │ EditorHost / EditorEngine traits
//! ┌──────▼───────┐
//! │  host + UI   │  External collaborator (out of scope here)
//! └──────────────┘
//! ```
//!
//! # Decoupling via traits
//!
//! The runtime never talks to a concrete UI or engine. Hosts implement
//! [`EditorHost`] to present the surface and drive the hooks; engines are
//! reached only through [`EditorEngine`]. This keeps the coordination
//! logic testable with scripted doubles (see [`testing`]).

pub mod builder;
pub mod engine;
pub mod error;
pub mod events;
pub mod export;
pub mod hooks;
pub mod host;
pub mod session;
pub mod testing;

// Re-export key types at crate root
pub use builder::{
    BuilderFactory, BuilderRegistry, BuilderStrategy, CustomBuilder, PresetBuilder, default_mime,
};
pub use engine::{DemoAssetKind, EditorEngine, EngineBlob, ProgressFn};
pub use error::{Error, Result};
pub use events::{EditorEvent, EventSink, NullEventSink};
pub use hooks::{
    CreateHook, DEFAULT_ASSET_BASE_URI, DEFAULT_THUMBNAIL_HEIGHT, DefaultCreate, DefaultExport,
    EditorHooks, ExportHook,
};
pub use host::{EditorHost, HostHandle, LaunchSpec, UiHandle};
pub use session::{SessionCallback, SessionManager, SessionPhase, TerminalEvent};
