use std::sync::Arc;
use std::time::Duration;

use chrono::TimeZone;

use super::*;
use crate::page::{ElementSpec, MemoryPage};
use crate::relay::{BackgroundHost, ChannelLauncher};
use crate::snapshot::SnapshotBuilder;

fn card_snapshot() -> ElementSnapshot {
    let mut page = MemoryPage::new();
    let body = page.body();
    page.append(
        body,
        &ElementSpec::new("section")
            .id("cards")
            .child(
                ElementSpec::new("div")
                    .id("card")
                    .class("card wide")
                    .rect(10.4, 20.6, 300.5, 99.4)
                    .child(ElementSpec::new("h2").text("Title"))
                    .child(ElementSpec::new("p").text("Body")),
            )
            .child(ElementSpec::new("div").class("card")),
    );
    let card = page.find_by_id("card").unwrap();
    SnapshotBuilder::default().capture(&page, card).unwrap()
}

fn host() -> (
    BackgroundHost,
    RelayClient,
    tokio::sync::mpsc::UnboundedReceiver<crate::relay::ViewerRequest>,
) {
    let (launcher, viewers) = ChannelLauncher::new();
    let host = BackgroundHost::spawn(Arc::new(launcher));
    let client = host.client(Duration::from_secs(5));
    (host, client, viewers)
}

#[tokio::test]
async fn test_open_without_data() {
    let (_host, client, _viewers) = host();
    let viewer = Viewer::open(client).await.unwrap();
    assert_eq!(viewer.state(), &ViewerState::NoData);
    assert!(viewer.overview().is_none());
}

#[tokio::test]
async fn test_open_loads_stored_snapshot() {
    let (_host, client, _viewers) = host();
    let snapshot = card_snapshot();
    client.send(snapshot.clone()).await.unwrap();

    let viewer = Viewer::open(client).await.unwrap();
    assert_eq!(viewer.snapshot(), Some(&snapshot));
}

#[tokio::test]
async fn test_refresh_picks_up_newer_snapshot() {
    let (_host, client, _viewers) = host();
    let mut viewer = Viewer::open(client.clone()).await.unwrap();
    assert_eq!(viewer.state(), &ViewerState::NoData);

    client.send(card_snapshot()).await.unwrap();
    let state = viewer.refresh().await.unwrap();
    assert!(matches!(state, ViewerState::Loaded(_)));
}

#[tokio::test]
async fn test_open_fails_when_host_is_gone() {
    let (host, client, _viewers) = host();
    host.shutdown();
    host.join().await;
    assert!(Viewer::open(client).await.is_err());
}

#[test]
fn test_overview() {
    let overview = Overview::from(&card_snapshot());
    assert_eq!(overview.label, "div#card.card.wide");
    assert_eq!((overview.width, overview.height), (301, 99));
    assert_eq!((overview.left, overview.top), (10, 21));
    assert_eq!(overview.child_count, 2);
    assert_eq!(overview.sibling_count, 1);
    assert!(overview.has_parent);
    assert!(overview.property_count >= 20);

    let text = overview.to_string();
    assert!(text.starts_with("div#card.card.wide\n"));
    assert!(text.contains("301x99 at (10, 21)"));
}

#[test]
fn test_export_json_adds_timestamp() {
    let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
    let json = export_json(&card_snapshot(), now).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["exportedAt"], "2024-03-01T12:00:00.000Z");
    assert_eq!(value["element"]["tagName"], "DIV");
    assert!(value["cssProperties"].is_object());
    assert!(json.contains("\n  "));
}

#[test]
fn test_export_file_name() {
    let now = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
    assert_eq!(export_file_name(now), "element-inspector-1700000000123.json");
}

#[tokio::test]
async fn test_export_to_directory() {
    let (_host, client, _viewers) = host();
    client.send(card_snapshot()).await.unwrap();
    let viewer = Viewer::open(client).await.unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = viewer.export_to(&dir.path().join("exports")).unwrap();

    let name = path.file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("element-inspector-"));
    assert!(name.ends_with(".json"));

    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(written["element"]["id"], "card");
}

#[tokio::test]
async fn test_export_without_data_fails() {
    let (_host, client, _viewers) = host();
    let viewer = Viewer::open(client).await.unwrap();
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        viewer.export_to(dir.path()),
        Err(ExportError::NoData)
    ));
}
