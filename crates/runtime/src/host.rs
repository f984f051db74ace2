//! Host presentation surface.
//!
//! The full-screen UI belongs to the embedding platform. The runtime hands
//! it a [`LaunchSpec`] and a [`SessionCallback`](crate::SessionCallback),
//! and receives terminal events back; nothing else crosses this seam.

use crate::error::Result;
use crate::hooks::EditorHooks;
use crate::session::SessionCallback;
use downcast_rs::{DowncastSync, impl_downcast};
use std::sync::Arc;
use studio_protocol::{EditorPreset, EditorSettings, MetadataMap};

/// Everything a host needs to present one editor session.
pub struct LaunchSpec {
    /// Decoded, source-canonicalized settings.
    pub settings: EditorSettings,
    /// The preset the session was resolved for.
    pub preset: EditorPreset,
    /// Caller-supplied metadata, already marshaled into the closed union.
    pub metadata: MetadataMap,
    /// The lifecycle hooks the UI must drive.
    pub hooks: EditorHooks,
}

/// Presents the editor UI. Implemented by the embedding platform.
///
/// # Contract
///
/// The host invokes `spec.hooks.on_create` once the surface is up and
/// `spec.hooks.on_export` when the user exports, reporting exactly one
/// terminal event through the callback (duplicates are tolerated and
/// ignored on the runtime side). Dismissal without an export, including
/// dismissal while an export is still encoding, is reported as
/// cancellation and must stop any engine work still in flight.
pub trait EditorHost: Send + Sync {
    fn present(&self, spec: LaunchSpec, callback: SessionCallback) -> Result<UiHandle>;
}

/// Host-side handle behind a [`UiHandle`].
///
/// `dismiss` must tear the surface down and release any worker tasks
/// still running for the session.
pub trait HostHandle: DowncastSync {
    fn dismiss(&self);
}
impl_downcast!(sync HostHandle);

/// Handle to a presented editor surface.
///
/// Held by the session manager for the lifetime of the session and
/// dismissed after the first terminal event is consumed.
pub struct UiHandle {
    guid: Arc<str>,
    inner: Arc<dyn HostHandle>,
}

impl UiHandle {
    /// Wraps a host handle under the given surface GUID.
    pub fn new(guid: impl Into<Arc<str>>, inner: Arc<dyn HostHandle>) -> Self {
        Self {
            guid: guid.into(),
            inner,
        }
    }

    /// The surface GUID assigned by the host.
    pub fn guid(&self) -> &str {
        &self.guid
    }

    /// Dismisses the surface and releases session workers.
    pub fn dismiss(&self) {
        tracing::debug!(surface = %self.guid, "dismissing editor surface");
        self.inner.dismiss();
    }

    /// The host's handle, for downcasting to its concrete type.
    pub fn host_handle(&self) -> &Arc<dyn HostHandle> {
        &self.inner
    }
}

impl std::fmt::Debug for UiHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UiHandle").field("guid", &self.guid).finish()
    }
}
