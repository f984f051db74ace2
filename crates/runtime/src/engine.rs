//! The editing-engine collaborator surface.
//!
//! The engine itself (scene graph, rendering, asset libraries, export
//! encoding) lives outside this workspace. The runtime reaches it through
//! [`EditorEngine`], and only from inside the two lifecycle hooks built on
//! top of it: populate-on-create and produce-on-export. Everything the
//! engine hands back (artifact bytes, scene strings, metadata) is opaque
//! here.

use crate::error::Result;
use futures_util::future::BoxFuture;
use studio_protocol::{BoundaryMap, EditorPreset, MimeType};
use url::Url;

/// Raw artifact bytes handed back by an engine export.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineBlob {
    /// The encoded artifact.
    pub data: Vec<u8>,
    /// Encoding of `data`.
    pub mime: MimeType,
    /// Metadata the engine wants attached to the result, still in the
    /// host container representation.
    pub metadata: BoundaryMap,
}

impl EngineBlob {
    /// Creates a blob with empty metadata.
    pub fn new(data: Vec<u8>, mime: MimeType) -> Self {
        Self {
            data,
            mime,
            metadata: BoundaryMap::new(),
        }
    }
}

/// Demo asset source groups that can be excluded during registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DemoAssetKind {
    Image,
    Video,
    Audio,
    Shape,
    Sticker,
}

/// Callback reporting encoding progress in `0.0..=1.0`.
pub type ProgressFn = Box<dyn Fn(f32) + Send + Sync>;

/// The opaque editing engine, as seen from the lifecycle hooks.
///
/// Every operation may suspend for an arbitrary duration (asset loading
/// and export encoding run on the collaborator's own workers) and is
/// cancelled when the session's UI handle is dismissed.
pub trait EditorEngine: Send + Sync {
    /// Loads a serialized scene document.
    fn load_scene<'a>(&'a self, url: &'a Url) -> BoxFuture<'a, Result<()>>;

    /// Creates a single-page scene filled with the image at `url`.
    fn create_scene_from_image<'a>(&'a self, url: &'a Url) -> BoxFuture<'a, Result<()>>;

    /// Creates a scene with the video at `url` on its first page.
    fn create_scene_from_video<'a>(&'a self, url: &'a Url) -> BoxFuture<'a, Result<()>>;

    /// Creates the engine's built-in starter scene for `preset`.
    fn create_default_scene(&self, preset: EditorPreset) -> BoxFuture<'_, Result<()>>;

    /// Registers the stock asset sources hosted under `base`.
    fn add_default_asset_sources<'a>(&'a self, base: &'a Url) -> BoxFuture<'a, Result<()>>;

    /// Registers demo asset sources, minus the excluded groups.
    fn add_demo_asset_sources<'a>(
        &'a self,
        exclude: &'a [DemoAssetKind],
        with_upload_sources: bool,
    ) -> BoxFuture<'a, Result<()>>;

    /// Registers the text asset source.
    fn add_text_asset_source(&self) -> BoxFuture<'_, Result<()>>;

    /// Encodes the current scene into an artifact of the given mime type.
    fn export(&self, mime: MimeType) -> BoxFuture<'_, Result<EngineBlob>>;

    /// Encodes the current page's timeline, reporting progress along the
    /// way.
    fn export_video(
        &self,
        mime: MimeType,
        on_progress: ProgressFn,
    ) -> BoxFuture<'_, Result<EngineBlob>>;

    /// Serializes the current scene to its string form.
    fn save_scene_to_string(&self) -> BoxFuture<'_, Result<String>>;

    /// Renders the first frame of the first page as PNG bytes, scaled to
    /// `height` pixels.
    fn render_first_frame(&self, height: u32) -> BoxFuture<'_, Result<Vec<u8>>>;
}
