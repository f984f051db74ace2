//! Session coordination: one live editor session per bridge.
//!
//! # Lifecycle
//!
//! ```text
//! Idle → Launching → Active → Completing → Idle
//! ```
//!
//! A session is created when a validated call launches a builder strategy
//! and destroyed as soon as the first terminal event is consumed. Three
//! independent exit paths can end an active session (export success, user
//! cancellation, collaborator failure) and whichever arrives first wins.
//!
//! # The completion slot
//!
//! The slot is the only mutable state shared across asynchronous
//! boundaries: a mutex-guarded `Option<oneshot::Sender>`. It is written
//! once at launch and drained once by the first terminal event; the
//! read-clear-send sequence runs under the lock, so delivery stays
//! at-most-once even when exit paths race from different threads.

use crate::builder::{BuilderFactory, BuilderRegistry};
use crate::error::{Error, Result};
use crate::host::{EditorHost, UiHandle};
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use studio_protocol::{EditorPreset, EditorResult, EditorSettings, EngineExport, MetadataMap};
use tokio::sync::oneshot;

/// A terminal event ending an active session.
#[derive(Debug)]
pub enum TerminalEvent {
    /// The engine produced an export, or the UI closed after finishing
    /// without producing output (`None`).
    Export(Option<EngineExport>),
    /// The user dismissed the UI without exporting.
    Cancelled,
    /// Creation or export failed on the collaborator side.
    Failed(Error),
}

/// Cloneable completion handle handed to the launched UI.
///
/// The first terminal event delivered through any clone wins; every later
/// call is a logged no-op. Platform UI layers are allowed to signal
/// redundantly.
#[derive(Clone)]
pub struct SessionCallback {
    guid: Arc<str>,
    slot: Arc<Mutex<Option<oneshot::Sender<TerminalEvent>>>>,
}

impl SessionCallback {
    fn new(guid: Arc<str>, sender: oneshot::Sender<TerminalEvent>) -> Self {
        Self {
            guid,
            slot: Arc::new(Mutex::new(Some(sender))),
        }
    }

    /// Delivers a terminal event. At most one delivery succeeds.
    pub fn complete(&self, event: TerminalEvent) {
        let sender = self.slot.lock().take();
        match sender {
            Some(tx) => {
                tracing::debug!(session = %self.guid, event = event_kind(&event),
                    "delivering terminal event");
                // The receiver disappears only when the awaiting caller
                // went away; nothing left to notify then.
                let _ = tx.send(event);
            }
            None => {
                tracing::debug!(session = %self.guid, event = event_kind(&event),
                    "duplicate terminal event ignored");
            }
        }
    }

    /// True once a terminal event has been delivered.
    pub fn is_drained(&self) -> bool {
        self.slot.lock().is_none()
    }

    /// The GUID of the session this callback completes.
    pub fn session_guid(&self) -> &str {
        &self.guid
    }
}

fn event_kind(event: &TerminalEvent) -> &'static str {
    match event {
        TerminalEvent::Export(Some(_)) => "export",
        TerminalEvent::Export(None) => "export-empty",
        TerminalEvent::Cancelled => "cancelled",
        TerminalEvent::Failed(_) => "failed",
    }
}

/// Where the single session slot currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// No session; `open_editor` may launch.
    Idle,
    /// A call claimed the slot and is resolving its strategy.
    Launching,
    /// The UI is up; waiting for a terminal event.
    Active,
    /// A terminal event arrived; result marshaling in progress.
    Completing,
}

struct ActiveSession {
    guid: Arc<str>,
    handle: Option<UiHandle>,
}

struct SessionState {
    phase: SessionPhase,
    session: Option<ActiveSession>,
}

/// Owns the one in-flight session and the builder registry.
///
/// Instantiated once per bridge and passed by reference into entry
/// points; there is no ambient global instance.
pub struct SessionManager {
    state: Mutex<SessionState>,
    registry: Mutex<BuilderRegistry>,
    last_id: AtomicU32,
}

impl SessionManager {
    /// Creates a manager presenting through `host`.
    pub fn new(host: Arc<dyn EditorHost>) -> Self {
        Self {
            state: Mutex::new(SessionState {
                phase: SessionPhase::Idle,
                session: None,
            }),
            registry: Mutex::new(BuilderRegistry::new(host)),
            last_id: AtomicU32::new(0),
        }
    }

    /// Installs or clears the builder override factory.
    ///
    /// An installed factory takes precedence over the built-in preset
    /// table for every subsequent launch.
    pub fn set_builder_override(&self, factory: Option<Arc<dyn BuilderFactory>>) {
        self.registry.lock().set_override(factory);
    }

    /// Current phase, mainly for host-side assertions.
    pub fn phase(&self) -> SessionPhase {
        self.state.lock().phase
    }

    /// Opens the editor and waits for its single terminal event.
    ///
    /// Resolves `Ok(None)` on cancellation or an empty export,
    /// `Ok(Some(result))` on a successful export with fully marshaled
    /// metadata, and `Err` on busy, validation, launch, engine, or
    /// marshaling failures. There is no timeout: the session stays active
    /// until the UI produces a terminal event.
    pub async fn open_editor(
        &self,
        mut settings: EditorSettings,
        preset: EditorPreset,
        metadata: MetadataMap,
    ) -> Result<Option<EditorResult>> {
        {
            let mut state = self.state.lock();
            if state.phase != SessionPhase::Idle {
                return Err(Error::SessionBusy);
            }
            state.phase = SessionPhase::Launching;
        }
        // From here on the guard restores Idle on every exit, including
        // the awaiting caller being dropped mid-session.
        let _guard = ResetGuard { manager: self };

        let guid: Arc<str> =
            format!("session@{}", self.last_id.fetch_add(1, Ordering::SeqCst)).into();
        self.state.lock().session = Some(ActiveSession {
            guid: Arc::clone(&guid),
            handle: None,
        });

        // Canonicalize the source before any UI exists; the rewritten
        // location is what the hooks will load.
        if let Some(source) = settings.source.as_mut() {
            source.canonicalize()?;
        }

        let (tx, rx) = oneshot::channel();
        let callback = SessionCallback::new(Arc::clone(&guid), tx);
        let strategy = self.registry.lock().resolve(preset, &metadata);

        tracing::debug!(session = %guid, preset = %preset, "launching editor session");
        let handle = strategy.launch(settings, preset, metadata, callback)?;
        {
            let mut state = self.state.lock();
            state.phase = SessionPhase::Active;
            if let Some(session) = state.session.as_mut() {
                session.handle = Some(handle);
            }
        }

        let event = rx.await.map_err(|_| Error::ChannelClosed)?;

        // First terminal event consumed: tear the surface down before
        // marshaling so workers never outlive the session.
        let handle = {
            let mut state = self.state.lock();
            state.phase = SessionPhase::Completing;
            state.session.take().and_then(|session| session.handle)
        };
        if let Some(handle) = handle {
            handle.dismiss();
        }

        let outcome = match event {
            TerminalEvent::Export(Some(export)) => EditorResult::from_export(export)
                .map(Some)
                .map_err(Error::from),
            TerminalEvent::Export(None) | TerminalEvent::Cancelled => Ok(None),
            TerminalEvent::Failed(err) => Err(err),
        };

        tracing::debug!(session = %guid, success = outcome.is_ok(), "session completed");
        outcome
    }
}

/// Restores the manager to Idle, dismissing any surviving surface.
///
/// Runs on every exit from `open_editor`: normal completion (where the
/// surface is already gone), validation and launch errors, and the caller
/// dropping the future before a terminal event arrived.
struct ResetGuard<'a> {
    manager: &'a SessionManager,
}

impl Drop for ResetGuard<'_> {
    fn drop(&mut self) {
        let handle = {
            let mut state = self.manager.state.lock();
            state.phase = SessionPhase::Idle;
            state.session.take().and_then(|session| session.handle)
        };
        if let Some(handle) = handle {
            tracing::debug!(surface = %handle.guid(), "session abandoned; tearing down surface");
            handle.dismiss();
        }
    }
}
