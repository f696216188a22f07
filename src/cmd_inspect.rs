//! Subcommand handlers.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context};
use tokio::sync::mpsc;
use tracing::{info, warn};

use inspector_config::{Config, ConfigLoader};
use inspector_core::{
    BackgroundHost, CaptureLimits, ChannelLauncher, ContentScript, MemoryPage, PageEvent,
    PageFixture, SnapshotBuilder, Viewer, ViewerState,
};

/// Options of the `inspect` subcommand.
pub(crate) struct InspectArgs {
    pub page: PathBuf,
    pub x: f64,
    pub y: f64,
    pub right_click: bool,
    pub export: Option<Option<PathBuf>>,
}

fn load_page(path: &Path) -> anyhow::Result<MemoryPage> {
    let fixture = PageFixture::load(path)
        .with_context(|| format!("Failed to load page fixture {}", path.display()))?;
    Ok(MemoryPage::from_fixture(&fixture))
}

/// Run the whole select, capture, relay and view flow against a fixture.
pub(crate) async fn inspect(config: &Config, args: InspectArgs) -> anyhow::Result<()> {
    let page = load_page(&args.page)?;

    let (launcher, mut viewers) = ChannelLauncher::new();
    let host = BackgroundHost::spawn_with(Arc::new(launcher), &config.relay);
    let script =
        ContentScript::from_config(page, host.client(config.relay.response_timeout()), config);

    let (tx, rx) = mpsc::unbounded_channel();
    let (x, y) = (args.x, args.y);
    tx.send(PageEvent::ToggleInspect)?;
    if args.right_click {
        tx.send(PageEvent::ContextMenu { x, y })?;
    } else {
        tx.send(PageEvent::Click { x, y })?;
    }
    drop(tx);

    let script = script.run(rx).await;
    for notice in script.page().notices() {
        match &notice.detail {
            Some(detail) => println!("[{:?}] {} - {}", notice.kind, notice.title, detail),
            None => println!("[{:?}] {}", notice.kind, notice.title),
        }
    }

    if viewers.try_recv().is_err() {
        host.shutdown();
        bail!("No element was captured at ({}, {})", args.x, args.y);
    }

    let viewer = Viewer::open(host.client(config.relay.response_timeout())).await?;
    match (viewer.state(), viewer.overview()) {
        (ViewerState::Loaded(_), Some(overview)) => println!("{}", overview),
        _ => println!("No element data available"),
    }

    if let Some(dir) = args.export {
        let dir = dir.unwrap_or_else(|| {
            PathBuf::from(ConfigLoader::expand_path(&config.export.directory))
        });
        let path = viewer
            .export_to(&dir)
            .with_context(|| format!("Failed to export to {}", dir.display()))?;
        println!("Exported to {}", path.display());
    }

    host.shutdown();
    host.join().await;
    Ok(())
}

/// Capture one element directly and print its snapshot.
pub(crate) fn capture(config: &Config, page: &Path, id: &str) -> anyhow::Result<()> {
    let page = load_page(page)?;
    let Some(node) = page.find_by_id(id) else {
        bail!("No element with id \"{}\"", id);
    };

    let builder = SnapshotBuilder::new(CaptureLimits::from(&config.capture));
    let snapshot = builder.capture(&page, node)?;
    if !snapshot.field_errors.is_empty() {
        warn!("Some fields could not be read: {:?}", snapshot.field_errors);
    }
    info!("Captured {}", snapshot.selector_label());

    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}
