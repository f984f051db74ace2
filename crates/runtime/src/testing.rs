//! Scripted collaborator doubles for tests and examples.
//!
//! The runtime never touches a real engine or UI, so exercising it
//! end-to-end only needs doubles that honor the collaborator contracts:
//! [`ScriptedEngine`] records every call and returns canned payloads,
//! [`ScriptedHost`] drives the lifecycle hooks the way a platform UI
//! would, and [`RecordingSink`] captures hook feedback events.

use crate::engine::{DemoAssetKind, EditorEngine, EngineBlob, ProgressFn};
use crate::error::{Error, Result};
use crate::events::{EditorEvent, EventSink};
use crate::host::{EditorHost, HostHandle, LaunchSpec, UiHandle};
use crate::session::{SessionCallback, TerminalEvent};
use futures_util::future::BoxFuture;
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use studio_protocol::{
    BoundaryMap, BoundaryValue, EditorPreset, EditorSettings, MetadataMap, MimeType,
};
use url::Url;

/// Engine double: records calls, returns canned payloads.
#[derive(Default)]
pub struct ScriptedEngine {
    calls: Mutex<Vec<String>>,
    export_metadata: Mutex<BoundaryMap>,
    export_failure: Mutex<Option<String>>,
}

impl ScriptedEngine {
    /// Every engine call so far, in order, as `name:detail` strings.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    /// Attaches a metadata entry to subsequent export blobs.
    pub fn set_export_metadata(&self, key: &str, value: BoundaryValue) {
        self.export_metadata.lock().insert(key.to_string(), value);
    }

    /// Makes subsequent exports fail with the given message.
    pub fn fail_export(&self, message: &str) {
        *self.export_failure.lock() = Some(message.to_string());
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().push(call.into());
    }

    fn blob(&self, mime: MimeType) -> Result<EngineBlob> {
        if let Some(message) = self.export_failure.lock().clone() {
            return Err(Error::Engine(message));
        }
        Ok(EngineBlob {
            data: format!("artifact:{mime}").into_bytes(),
            mime,
            metadata: self.export_metadata.lock().clone(),
        })
    }
}

impl EditorEngine for ScriptedEngine {
    fn load_scene<'a>(&'a self, url: &'a Url) -> BoxFuture<'a, Result<()>> {
        self.record(format!("load_scene:{url}"));
        Box::pin(async { Ok(()) })
    }

    fn create_scene_from_image<'a>(&'a self, url: &'a Url) -> BoxFuture<'a, Result<()>> {
        self.record(format!("create_scene_from_image:{url}"));
        Box::pin(async { Ok(()) })
    }

    fn create_scene_from_video<'a>(&'a self, url: &'a Url) -> BoxFuture<'a, Result<()>> {
        self.record(format!("create_scene_from_video:{url}"));
        Box::pin(async { Ok(()) })
    }

    fn create_default_scene(&self, preset: EditorPreset) -> BoxFuture<'_, Result<()>> {
        self.record(format!("create_default_scene:{preset}"));
        Box::pin(async { Ok(()) })
    }

    fn add_default_asset_sources<'a>(&'a self, base: &'a Url) -> BoxFuture<'a, Result<()>> {
        self.record(format!("add_default_asset_sources:{base}"));
        Box::pin(async { Ok(()) })
    }

    fn add_demo_asset_sources<'a>(
        &'a self,
        exclude: &'a [DemoAssetKind],
        with_upload_sources: bool,
    ) -> BoxFuture<'a, Result<()>> {
        self.record(format!(
            "add_demo_asset_sources:{}:{with_upload_sources}",
            exclude.len()
        ));
        Box::pin(async { Ok(()) })
    }

    fn add_text_asset_source(&self) -> BoxFuture<'_, Result<()>> {
        self.record("add_text_asset_source");
        Box::pin(async { Ok(()) })
    }

    fn export(&self, mime: MimeType) -> BoxFuture<'_, Result<EngineBlob>> {
        self.record(format!("export:{mime}"));
        let blob = self.blob(mime);
        Box::pin(async { blob })
    }

    fn export_video(
        &self,
        mime: MimeType,
        on_progress: ProgressFn,
    ) -> BoxFuture<'_, Result<EngineBlob>> {
        self.record(format!("export_video:{mime}"));
        let blob = self.blob(mime);
        Box::pin(async move {
            on_progress(0.5);
            on_progress(1.0);
            blob
        })
    }

    fn save_scene_to_string(&self) -> BoxFuture<'_, Result<String>> {
        self.record("save_scene_to_string");
        Box::pin(async { Ok("scene-document".to_string()) })
    }

    fn render_first_frame(&self, height: u32) -> BoxFuture<'_, Result<Vec<u8>>> {
        self.record(format!("render_first_frame:{height}"));
        Box::pin(async { Ok(vec![0x89, b'P', b'N', b'G']) })
    }
}

/// Event sink double collecting everything a hook sends.
#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<EditorEvent>>,
}

impl RecordingSink {
    /// Every event received so far, in order.
    pub fn events(&self) -> Vec<EditorEvent> {
        self.events.lock().clone()
    }
}

impl EventSink for RecordingSink {
    fn send(&self, event: EditorEvent) {
        self.events.lock().push(event);
    }
}

/// How a [`ScriptedHost`] behaves once presented.
#[derive(Debug, Clone)]
pub enum HostMode {
    /// Run create + export hooks, then deliver the export.
    Export,
    /// Run the create hook, then cancel.
    Cancel,
    /// Deliver the same cancellation twice.
    CancelTwice,
    /// Fail presentation outright, before any hook runs.
    FailCreation(String),
    /// Stay active until [`ScriptedHost::release`] is called.
    Hold,
}

/// Launch parameters captured by the host at presentation time.
#[derive(Debug, Clone)]
pub struct SpecSnapshot {
    pub preset: EditorPreset,
    pub settings: EditorSettings,
    pub metadata: MetadataMap,
}

/// Handle double counting dismissals and aborting the hook task.
#[derive(Default)]
pub struct TaskHandle {
    dismissed: AtomicUsize,
    abort: Mutex<Option<tokio::task::AbortHandle>>,
}

impl TaskHandle {
    fn attach(&self, handle: tokio::task::AbortHandle) {
        *self.abort.lock() = Some(handle);
    }

    /// How many times the surface was dismissed.
    pub fn dismissed(&self) -> usize {
        self.dismissed.load(Ordering::SeqCst)
    }
}

impl HostHandle for TaskHandle {
    fn dismiss(&self) {
        self.dismissed.fetch_add(1, Ordering::SeqCst);
        if let Some(abort) = self.abort.lock().take() {
            abort.abort();
        }
    }
}

/// Host double driving the lifecycle hooks the way a platform UI would.
pub struct ScriptedHost {
    engine: Arc<ScriptedEngine>,
    sink: Arc<RecordingSink>,
    mode: Mutex<HostMode>,
    presented: AtomicUsize,
    surface_id: AtomicUsize,
    last_spec: Mutex<Option<SpecSnapshot>>,
    held: Mutex<Option<SessionCallback>>,
    handles: Mutex<Vec<Arc<TaskHandle>>>,
}

impl ScriptedHost {
    pub fn new(mode: HostMode) -> Arc<Self> {
        Arc::new(Self {
            engine: Arc::new(ScriptedEngine::default()),
            sink: Arc::new(RecordingSink::default()),
            mode: Mutex::new(mode),
            presented: AtomicUsize::new(0),
            surface_id: AtomicUsize::new(0),
            last_spec: Mutex::new(None),
            held: Mutex::new(None),
            handles: Mutex::new(Vec::new()),
        })
    }

    /// The engine double this host drives hooks against.
    pub fn engine(&self) -> Arc<ScriptedEngine> {
        Arc::clone(&self.engine)
    }

    /// The sink hook feedback events land in.
    pub fn sink(&self) -> Arc<RecordingSink> {
        Arc::clone(&self.sink)
    }

    /// Changes the behavior of subsequent presentations.
    pub fn set_mode(&self, mode: HostMode) {
        *self.mode.lock() = mode;
    }

    /// How many surfaces were presented.
    pub fn presented(&self) -> usize {
        self.presented.load(Ordering::SeqCst)
    }

    /// The launch parameters of the most recent presentation.
    pub fn last_spec(&self) -> Option<SpecSnapshot> {
        self.last_spec.lock().clone()
    }

    /// Total dismissals across every surface this host presented.
    pub fn dismissals(&self) -> usize {
        self.handles.lock().iter().map(|h| h.dismissed()).sum()
    }

    /// Delivers a terminal event through the most recent callback.
    ///
    /// Deliberately reusable: calling it after completion exercises the
    /// stale-signal path.
    pub fn release(&self, event: TerminalEvent) {
        if let Some(callback) = self.held.lock().clone() {
            callback.complete(event);
        }
    }
}

impl EditorHost for ScriptedHost {
    fn present(&self, spec: LaunchSpec, callback: SessionCallback) -> Result<UiHandle> {
        let mode = self.mode.lock().clone();
        if let HostMode::FailCreation(message) = &mode {
            return Err(Error::Creation(message.clone()));
        }

        self.presented.fetch_add(1, Ordering::SeqCst);
        *self.last_spec.lock() = Some(SpecSnapshot {
            preset: spec.preset,
            settings: spec.settings.clone(),
            metadata: spec.metadata.clone(),
        });
        *self.held.lock() = Some(callback.clone());

        let handle = Arc::new(TaskHandle::default());
        let guid = format!("surface@{}", self.surface_id.fetch_add(1, Ordering::SeqCst));

        if !matches!(mode, HostMode::Hold) {
            let engine = Arc::clone(&self.engine) as Arc<dyn EditorEngine>;
            let sink = Arc::clone(&self.sink) as Arc<dyn EventSink>;
            let hooks = spec.hooks.clone();
            let join = tokio::spawn(async move {
                if let Err(err) = hooks
                    .on_create
                    .run(Arc::clone(&engine), Arc::clone(&sink))
                    .await
                {
                    callback.complete(TerminalEvent::Failed(err));
                    return;
                }
                match mode {
                    HostMode::Export => match hooks.on_export.run(engine, sink).await {
                        Ok(export) => callback.complete(TerminalEvent::Export(Some(export))),
                        Err(err) => callback.complete(TerminalEvent::Failed(err)),
                    },
                    HostMode::Cancel => callback.complete(TerminalEvent::Cancelled),
                    HostMode::CancelTwice => {
                        callback.complete(TerminalEvent::Cancelled);
                        callback.complete(TerminalEvent::Cancelled);
                    }
                    HostMode::FailCreation(_) | HostMode::Hold => {
                        unreachable!("handled before spawning")
                    }
                }
            });
            handle.attach(join.abort_handle());
        }

        self.handles.lock().push(Arc::clone(&handle));
        Ok(UiHandle::new(guid, handle))
    }
}
