//! Builder strategies and the preset registry.
//!
//! Each built-in preset maps to a strategy that assembles the default
//! lifecycle hooks and asks the host to present the UI. A caller-supplied
//! factory, when installed, overrides the table wholesale; its strategy is
//! used unconditionally, even when it differs materially from the built-in
//! set.

use crate::error::Result;
use crate::hooks::{DefaultCreate, DefaultExport, EditorHooks};
use crate::host::{EditorHost, LaunchSpec, UiHandle};
use crate::session::SessionCallback;
use std::collections::HashMap;
use std::sync::Arc;
use studio_protocol::{EditorPreset, EditorSettings, MetadataMap, MimeType};

/// Produces a live editor surface for one session.
///
/// `callback` accepts exactly one terminal event over the strategy's
/// lifetime; redundant deliveries are ignored by the session manager.
pub trait BuilderStrategy: Send + Sync {
    fn launch(
        &self,
        settings: EditorSettings,
        preset: EditorPreset,
        metadata: MetadataMap,
        callback: SessionCallback,
    ) -> Result<UiHandle>;
}

/// Caller-registered factory that takes precedence over the built-in
/// preset table.
pub trait BuilderFactory: Send + Sync {
    fn build(&self, preset: EditorPreset, metadata: &MetadataMap) -> Arc<dyn BuilderStrategy>;
}

/// Default artifact encoding for each built-in preset.
pub fn default_mime(preset: EditorPreset) -> MimeType {
    match preset {
        EditorPreset::Photo => MimeType::Png,
        EditorPreset::Video => MimeType::Mp4,
        EditorPreset::Design | EditorPreset::Postcard | EditorPreset::Apparel => MimeType::Pdf,
    }
}

/// Built-in strategy: default hooks for one preset, presented by the
/// injected host.
pub struct PresetBuilder {
    preset: EditorPreset,
    host: Arc<dyn EditorHost>,
}

impl PresetBuilder {
    pub fn new(preset: EditorPreset, host: Arc<dyn EditorHost>) -> Self {
        Self { preset, host }
    }

    fn hooks(&self, settings: &EditorSettings) -> EditorHooks {
        let mime = default_mime(self.preset);
        let on_export = match self.preset {
            EditorPreset::Video => DefaultExport::video(mime),
            _ => DefaultExport::still(mime),
        };
        EditorHooks {
            on_create: Arc::new(DefaultCreate::new(settings.clone(), self.preset)),
            on_export: Arc::new(on_export),
        }
    }
}

impl BuilderStrategy for PresetBuilder {
    fn launch(
        &self,
        settings: EditorSettings,
        preset: EditorPreset,
        metadata: MetadataMap,
        callback: SessionCallback,
    ) -> Result<UiHandle> {
        let hooks = self.hooks(&settings);
        self.host.present(
            LaunchSpec {
                settings,
                preset,
                metadata,
                hooks,
            },
            callback,
        )
    }
}

/// Adapts a launch closure into a [`BuilderStrategy`].
///
/// The custom counterpart to the built-in table: callers who want full
/// control over presentation and hooks implement the same contract through
/// a closure.
pub struct CustomBuilder<F> {
    launch: F,
}

impl<F> CustomBuilder<F>
where
    F: Fn(EditorSettings, EditorPreset, MetadataMap, SessionCallback) -> Result<UiHandle>
        + Send
        + Sync,
{
    pub fn new(launch: F) -> Self {
        Self { launch }
    }
}

impl<F> BuilderStrategy for CustomBuilder<F>
where
    F: Fn(EditorSettings, EditorPreset, MetadataMap, SessionCallback) -> Result<UiHandle>
        + Send
        + Sync,
{
    fn launch(
        &self,
        settings: EditorSettings,
        preset: EditorPreset,
        metadata: MetadataMap,
        callback: SessionCallback,
    ) -> Result<UiHandle> {
        (self.launch)(settings, preset, metadata, callback)
    }
}

/// The five built-in editors, plus the override hook.
pub struct BuilderRegistry {
    builders: HashMap<EditorPreset, Arc<dyn BuilderStrategy>>,
    fallback: Arc<dyn BuilderStrategy>,
    override_factory: Option<Arc<dyn BuilderFactory>>,
}

impl BuilderRegistry {
    /// Builds the fixed preset table presenting through `host`.
    pub fn new(host: Arc<dyn EditorHost>) -> Self {
        let fallback: Arc<dyn BuilderStrategy> =
            Arc::new(PresetBuilder::new(EditorPreset::Design, Arc::clone(&host)));

        let mut builders: HashMap<EditorPreset, Arc<dyn BuilderStrategy>> = HashMap::new();
        builders.insert(EditorPreset::Design, Arc::clone(&fallback));
        for preset in [
            EditorPreset::Photo,
            EditorPreset::Postcard,
            EditorPreset::Apparel,
            EditorPreset::Video,
        ] {
            builders.insert(
                preset,
                Arc::new(PresetBuilder::new(preset, Arc::clone(&host))),
            );
        }

        Self {
            builders,
            fallback,
            override_factory: None,
        }
    }

    /// Installs or clears the override factory.
    pub fn set_override(&mut self, factory: Option<Arc<dyn BuilderFactory>>) {
        self.override_factory = factory;
    }

    /// Resolves the strategy for `preset`.
    ///
    /// An installed override wins unconditionally; a preset missing from
    /// the table falls back to the design builder.
    pub fn resolve(
        &self,
        preset: EditorPreset,
        metadata: &MetadataMap,
    ) -> Arc<dyn BuilderStrategy> {
        if let Some(factory) = &self.override_factory {
            return factory.build(preset, metadata);
        }
        self.builders
            .get(&preset)
            .cloned()
            .unwrap_or_else(|| Arc::clone(&self.fallback))
    }
}
