//! Opens a scripted editor session end-to-end and prints the result.
//!
//! The host and engine are the scripted doubles from
//! `studio_runtime::testing`, so this runs without any real UI attached:
//!
//! ```sh
//! cargo run -p studio-bridge --example open_editor
//! ```

use std::sync::Arc;
use studio::{BoundaryMap, BoundaryValue, EditorBridge, EditorHost};
use studio_runtime::testing::{HostMode, ScriptedHost};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let host = ScriptedHost::new(HostMode::Export);
    host.engine()
        .set_export_metadata("pages", BoundaryValue::Int(1));
    let bridge = EditorBridge::new(Arc::clone(&host) as Arc<dyn EditorHost>);

    let mut settings = BoundaryMap::new();
    settings.insert(
        "license".to_string(),
        BoundaryValue::String("demo-license".to_string()),
    );
    settings.insert(
        "sceneBaseUri".to_string(),
        BoundaryValue::String("https://assets.example.com/scenes".to_string()),
    );

    match bridge
        .open_editor(Some(BoundaryValue::Map(settings)), None, Some("design"), None)
        .await?
    {
        Some(result) => println!("export finished: {result:#?}"),
        None => println!("editor closed without exporting"),
    }

    Ok(())
}
