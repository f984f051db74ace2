//! Default lifecycle hook implementations.
//!
//! A launched UI drives exactly two hooks: populate-on-create when the
//! surface appears, and produce-on-export when the user exports. The
//! built-in builder strategies assemble the defaults below; custom
//! builders may substitute their own implementations of the same traits.

use crate::engine::{DemoAssetKind, EditorEngine};
use crate::error::Result;
use crate::events::{EditorEvent, EventSink};
use crate::export;
use futures_util::future::BoxFuture;
use std::sync::Arc;
use studio_protocol::{EditorPreset, EditorSettings, EngineExport, MimeType, SourceType};
use url::Url;

/// Fallback base URI for the stock asset library when the caller supplied
/// none, or an unparsable one.
pub const DEFAULT_ASSET_BASE_URI: &str = "https://cdn.studio-sdk.dev/assets/v3";

/// Height in pixels of the generated result thumbnail.
pub const DEFAULT_THUMBNAIL_HEIGHT: u32 = 100;

/// Populate-on-create: builds the initial scene and registers asset
/// sources.
pub trait CreateHook: Send + Sync {
    fn run(
        &self,
        engine: Arc<dyn EditorEngine>,
        events: Arc<dyn EventSink>,
    ) -> BoxFuture<'_, Result<()>>;
}

/// Produce-on-export: encodes, persists, and describes the artifact.
pub trait ExportHook: Send + Sync {
    fn run(
        &self,
        engine: Arc<dyn EditorEngine>,
        events: Arc<dyn EventSink>,
    ) -> BoxFuture<'_, Result<EngineExport>>;
}

/// The pair of hooks a launched UI drives.
#[derive(Clone)]
pub struct EditorHooks {
    pub on_create: Arc<dyn CreateHook>,
    pub on_export: Arc<dyn ExportHook>,
}

/// Default populate-on-create behavior shared by the built-in presets.
///
/// An explicit source in the settings wins; otherwise the configured
/// default content is used, and failing that the engine's own starter
/// scene for the preset.
pub struct DefaultCreate {
    settings: EditorSettings,
    preset: EditorPreset,
    default_content: Option<(Url, SourceType)>,
}

impl DefaultCreate {
    /// Creates the hook for `preset`, deferring to the engine's built-in
    /// starter when the settings carry no source.
    pub fn new(settings: EditorSettings, preset: EditorPreset) -> Self {
        Self {
            settings,
            preset,
            default_content: None,
        }
    }

    /// Replaces the engine starter with explicit default content.
    pub fn with_default_content(mut self, url: Url, kind: SourceType) -> Self {
        self.default_content = Some((url, kind));
        self
    }

    fn asset_base(&self) -> Url {
        self.settings
            .asset_base_uri
            .as_deref()
            .and_then(|uri| Url::parse(uri).ok())
            .unwrap_or_else(|| {
                Url::parse(DEFAULT_ASSET_BASE_URI).expect("default asset base is a valid URL")
            })
    }
}

impl CreateHook for DefaultCreate {
    fn run(
        &self,
        engine: Arc<dyn EditorEngine>,
        events: Arc<dyn EventSink>,
    ) -> BoxFuture<'_, Result<()>> {
        Box::pin(async move {
            let content = match &self.settings.source {
                Some(source) => Some((source.canonical_url()?, source.kind)),
                None => self.default_content.clone(),
            };

            match content {
                Some((url, SourceType::Image)) => engine.create_scene_from_image(&url).await?,
                Some((url, SourceType::Video)) => engine.create_scene_from_video(&url).await?,
                Some((url, SourceType::Scene)) => engine.load_scene(&url).await?,
                None => engine.create_default_scene(self.preset).await?,
            }

            // Asset registration happens after the scene is in place so
            // the library reflects the scene mode.
            let base = self.asset_base();
            engine.add_default_asset_sources(&base).await?;
            engine
                .add_demo_asset_sources(
                    &[
                        DemoAssetKind::Image,
                        DemoAssetKind::Video,
                        DemoAssetKind::Audio,
                    ],
                    true,
                )
                .await?;
            engine.add_text_asset_source().await?;

            events.send(EditorEvent::HideLoading);
            Ok(())
        })
    }
}

/// Default produce-on-export behavior shared by the built-in presets.
pub struct DefaultExport {
    mime: MimeType,
    thumbnail_height: u32,
    video: bool,
}

impl DefaultExport {
    /// Export hook for still artifacts (images, documents).
    pub fn still(mime: MimeType) -> Self {
        Self {
            mime,
            thumbnail_height: DEFAULT_THUMBNAIL_HEIGHT,
            video: false,
        }
    }

    /// Export hook for timeline artifacts with encoding progress.
    pub fn video(mime: MimeType) -> Self {
        Self {
            mime,
            thumbnail_height: DEFAULT_THUMBNAIL_HEIGHT,
            video: true,
        }
    }

    /// Overrides the generated thumbnail height.
    pub fn with_thumbnail_height(mut self, height: u32) -> Self {
        self.thumbnail_height = height;
        self
    }

    /// The mime type this hook exports.
    pub fn mime(&self) -> MimeType {
        self.mime
    }

    async fn export_still(
        &self,
        engine: Arc<dyn EditorEngine>,
        events: Arc<dyn EventSink>,
    ) -> Result<EngineExport> {
        events.send(EditorEvent::ShowLoading);

        let blob = engine.export(self.mime).await?;
        let artifact = export::save_artifact(&blob).await?;

        let scene = engine.save_scene_to_string().await?;
        let scene_url = export::save_scene(&scene).await?;

        let frame = engine.render_first_frame(self.thumbnail_height).await?;
        let thumbnail = export::save_thumbnail(&frame).await?;

        events.send(EditorEvent::HideLoading);
        Ok(EngineExport {
            scene: Some(scene_url.into()),
            artifact: Some(artifact.into()),
            thumbnail: Some(thumbnail.into()),
            metadata: blob.metadata,
        })
    }

    async fn export_video(
        &self,
        engine: Arc<dyn EditorEngine>,
        events: Arc<dyn EventSink>,
    ) -> Result<EngineExport> {
        events.send(EditorEvent::ExportProgress(0.0));

        // Thumbnail and scene are captured before encoding so they are
        // ready the moment the progress sheet closes.
        let frame = engine.render_first_frame(self.thumbnail_height).await?;
        let thumbnail = export::save_thumbnail(&frame).await?;
        let scene = engine.save_scene_to_string().await?;
        let scene_url = export::save_scene(&scene).await?;

        let progress_events = Arc::clone(&events);
        let blob = engine
            .export_video(
                self.mime,
                Box::new(move |ratio| {
                    progress_events.send(EditorEvent::ExportProgress(ratio));
                }),
            )
            .await?;
        let artifact = export::save_artifact(&blob).await?;

        events.send(EditorEvent::DismissExportSheet);
        Ok(EngineExport {
            scene: Some(scene_url.into()),
            artifact: Some(artifact.into()),
            thumbnail: Some(thumbnail.into()),
            metadata: blob.metadata,
        })
    }
}

impl ExportHook for DefaultExport {
    fn run(
        &self,
        engine: Arc<dyn EditorEngine>,
        events: Arc<dyn EventSink>,
    ) -> BoxFuture<'_, Result<EngineExport>> {
        Box::pin(async move {
            if self.video {
                self.export_video(engine, events).await
            } else {
                self.export_still(engine, events).await
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{RecordingSink, ScriptedEngine};
    use studio_protocol::Source;

    fn settings() -> EditorSettings {
        EditorSettings {
            license: "test-license".to_string(),
            scene_base_uri: "https://assets.example.com/scenes".to_string(),
            asset_base_uri: None,
            user_id: None,
            source: None,
        }
    }

    #[tokio::test]
    async fn test_create_uses_engine_starter_without_source() {
        let engine = Arc::new(ScriptedEngine::default());
        let sink = Arc::new(RecordingSink::default());
        let hook = DefaultCreate::new(settings(), EditorPreset::Postcard);

        hook.run(engine.clone(), sink.clone()).await.unwrap();

        let calls = engine.calls();
        assert_eq!(calls[0], "create_default_scene:postcard");
        assert!(
            calls
                .iter()
                .any(|c| c.starts_with("add_default_asset_sources:"))
        );
        assert!(calls.contains(&"add_text_asset_source".to_string()));
        assert_eq!(sink.events(), vec![EditorEvent::HideLoading]);
    }

    #[tokio::test]
    async fn test_create_prefers_explicit_source() {
        let mut settings = settings();
        settings.source = Some(Source::new("file:///pic.png", SourceType::Image));
        let engine = Arc::new(ScriptedEngine::default());
        let sink = Arc::new(RecordingSink::default());
        let hook = DefaultCreate::new(settings, EditorPreset::Photo);

        hook.run(engine.clone(), sink).await.unwrap();

        assert_eq!(engine.calls()[0], "create_scene_from_image:file:///pic.png");
    }

    #[tokio::test]
    async fn test_create_dispatches_on_source_kind() {
        for (kind, expected) in [
            (SourceType::Scene, "load_scene:file:///d.scene"),
            (SourceType::Video, "create_scene_from_video:file:///d.scene"),
        ] {
            let mut settings = settings();
            settings.source = Some(Source::new("file:///d.scene", kind));
            let engine = Arc::new(ScriptedEngine::default());
            let hook = DefaultCreate::new(settings, EditorPreset::Design);

            hook.run(engine.clone(), Arc::new(RecordingSink::default()))
                .await
                .unwrap();
            assert_eq!(engine.calls()[0], expected);
        }
    }

    #[tokio::test]
    async fn test_create_honors_configured_default_content() {
        let engine = Arc::new(ScriptedEngine::default());
        let hook = DefaultCreate::new(settings(), EditorPreset::Photo).with_default_content(
            Url::parse("file:///starter.png").unwrap(),
            SourceType::Image,
        );

        hook.run(engine.clone(), Arc::new(crate::NullEventSink))
            .await
            .unwrap();

        assert_eq!(
            engine.calls()[0],
            "create_scene_from_image:file:///starter.png"
        );
    }

    #[tokio::test]
    async fn test_create_falls_back_to_stock_asset_base() {
        let mut settings = settings();
        settings.asset_base_uri = Some("not a uri".to_string());
        let engine = Arc::new(ScriptedEngine::default());
        let hook = DefaultCreate::new(settings, EditorPreset::Design);

        hook.run(engine.clone(), Arc::new(RecordingSink::default()))
            .await
            .unwrap();

        let call = engine
            .calls()
            .into_iter()
            .find(|c| c.starts_with("add_default_asset_sources:"))
            .unwrap();
        assert_eq!(
            call,
            format!("add_default_asset_sources:{DEFAULT_ASSET_BASE_URI}")
        );
    }

    #[tokio::test]
    async fn test_create_fails_on_invalid_source() {
        let mut settings = settings();
        settings.source = Some(Source::new("not-a-uri", SourceType::Image));
        let engine = Arc::new(ScriptedEngine::default());
        let hook = DefaultCreate::new(settings, EditorPreset::Design);

        let err = hook
            .run(engine.clone(), Arc::new(RecordingSink::default()))
            .await
            .unwrap_err();
        assert!(matches!(err, crate::Error::InvalidSource(_)));
        assert!(engine.calls().is_empty());
    }

    #[tokio::test]
    async fn test_export_still_persists_all_three_files() {
        let engine = Arc::new(ScriptedEngine::default());
        let sink = Arc::new(RecordingSink::default());
        let hook = DefaultExport::still(MimeType::Png);

        let export = hook.run(engine, sink.clone()).await.unwrap();

        for location in [&export.scene, &export.artifact, &export.thumbnail] {
            let url = Url::parse(location.as_deref().unwrap()).unwrap();
            assert_eq!(url.scheme(), "file");
            let path = url.to_file_path().unwrap();
            assert!(path.exists());
            std::fs::remove_file(path).unwrap();
        }
        assert_eq!(
            sink.events(),
            vec![EditorEvent::ShowLoading, EditorEvent::HideLoading]
        );
    }

    #[tokio::test]
    async fn test_export_video_forwards_progress() {
        let engine = Arc::new(ScriptedEngine::default());
        let sink = Arc::new(RecordingSink::default());
        let hook = DefaultExport::video(MimeType::Mp4);

        let export = hook.run(engine, sink.clone()).await.unwrap();
        assert!(export.artifact.as_deref().unwrap().ends_with(".mp4"));

        let events = sink.events();
        assert_eq!(events[0], EditorEvent::ExportProgress(0.0));
        assert!(events.contains(&EditorEvent::ExportProgress(0.5)));
        assert_eq!(*events.last().unwrap(), EditorEvent::DismissExportSheet);

        for location in [export.scene, export.artifact, export.thumbnail]
            .into_iter()
            .flatten()
        {
            let path = Url::parse(&location).unwrap().to_file_path().unwrap();
            std::fs::remove_file(path).unwrap();
        }
    }

    #[tokio::test]
    async fn test_export_carries_engine_metadata() {
        let engine = Arc::new(ScriptedEngine::default());
        engine.set_export_metadata("pageCount", studio_protocol::BoundaryValue::Int(2));
        let hook = DefaultExport::still(MimeType::Pdf);

        let export = hook
            .run(engine, Arc::new(RecordingSink::default()))
            .await
            .unwrap();
        assert_eq!(
            export.metadata["pageCount"],
            studio_protocol::BoundaryValue::Int(2)
        );

        for location in [export.scene, export.artifact, export.thumbnail]
            .into_iter()
            .flatten()
        {
            let path = Url::parse(&location).unwrap().to_file_path().unwrap();
            std::fs::remove_file(path).unwrap();
        }
    }
}
