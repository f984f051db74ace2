//! UI feedback events emitted by lifecycle hooks.

/// Events a hook can send to the presenting UI layer while it works.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EditorEvent {
    /// Show a blocking progress indicator.
    ShowLoading,
    /// Hide the progress indicator.
    HideLoading,
    /// Video encoding progress in `0.0..=1.0`.
    ExportProgress(f32),
    /// Close the export progress sheet.
    DismissExportSheet,
}

/// Receives [`EditorEvent`]s from hooks. Implemented by the UI layer.
pub trait EventSink: Send + Sync {
    fn send(&self, event: EditorEvent);
}

/// Sink that drops every event, for hosts without a progress UI.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullEventSink;

impl EventSink for NullEventSink {
    fn send(&self, _event: EditorEvent) {}
}
