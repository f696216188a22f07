//! End-to-end tests: page events in, viewer out.

use std::sync::Arc;
use std::time::Duration;

use inspector_config::ConfigLoader;
use inspector_core::{
    BackgroundHost, ChannelLauncher, ContentScript, KeyEvent, MemoryPage, PageEvent, PageFixture,
    SelectionState, Viewer, ViewerState,
};
use inspector_protocols::{CssAnimation, Cursor, Document, NoticeKind, RelayError};

// ============================================================================
// Test Helpers
// ============================================================================

const FIXTURE: &str = r##"{
    "globals": { "gsap": { "version": "3.12.5" } },
    "body": [
        {
            "tag": "form",
            "attributes": { "id": "settings" },
            "rect": { "x": 0, "y": 0, "width": 800, "height": 200 },
            "children": [
                {
                    "tag": "input",
                    "attributes": { "name": "email", "type": "email" },
                    "rect": { "x": 10, "y": 10, "width": 200, "height": 24 }
                },
                {
                    "tag": "button",
                    "attributes": { "id": "save", "class": "btn primary", "type": "submit" },
                    "rect": { "x": 10, "y": 50, "width": 120, "height": 32 },
                    "style": {
                        "transition-property": "background-color",
                        "transition-duration": "0.3s"
                    },
                    "children": ["Save"]
                },
                {
                    "tag": "button",
                    "attributes": { "id": "cancel", "class": "btn" },
                    "rect": { "x": 140, "y": 50, "width": 120, "height": 32 },
                    "children": ["Cancel"]
                }
            ]
        }
    ]
}"##;

fn fixture_page() -> MemoryPage {
    let fixture = PageFixture::from_json(FIXTURE).unwrap();
    MemoryPage::from_fixture(&fixture)
}

fn nested_page(levels: usize) -> MemoryPage {
    let mut page = MemoryPage::new();
    let mut parent = page.body();
    for level in 0..levels {
        parent = page.append(
            parent,
            &inspector_core::ElementSpec::new("div").id(format!("level-{}", level)),
        );
    }
    page
}

fn depth(node: &inspector_protocols::TreeNode) -> usize {
    1 + node.children.iter().map(depth).max().unwrap_or(0)
}

// ============================================================================
// Scenarios
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_select_capture_and_view() {
    let (launcher, mut viewers) = ChannelLauncher::new();
    let host = BackgroundHost::spawn(Arc::new(launcher));
    let mut script = ContentScript::new(fixture_page(), host.client(Duration::from_secs(5)));
    let (tx, rx) = tokio::sync::mpsc::unbounded_channel();

    script
        .handle_event(PageEvent::Key(KeyEvent::new("I").ctrl().shift()))
        .await;
    assert_eq!(script.state(), SelectionState::InspectArmed);
    assert_eq!(script.page().cursor(), Cursor::Crosshair);

    script.handle_event(PageEvent::Click { x: 50.0, y: 60.0 }).await;
    let save = script.page().find_by_id("save").unwrap();
    assert_eq!(script.state(), SelectionState::Captured);
    assert_eq!(script.machine().selected(), Some(save));
    assert_eq!(script.page().outline(save), Some("3px solid #ff6b35"));
    assert_eq!(script.page().interceptor_count(), 0);
    assert_eq!(script.page().banner_count(), 0);

    drop(tx);
    let script = script.run(rx).await;
    assert_eq!(script.state(), SelectionState::Idle);
    assert_eq!(script.page().outline(save), None);

    assert_eq!(viewers.recv().await.unwrap().sequence, 1);
    let viewer = Viewer::open(host.client(Duration::from_secs(5))).await.unwrap();
    let snapshot = viewer.snapshot().unwrap();

    assert_eq!(snapshot.element.tag_name, "BUTTON");
    assert_eq!(snapshot.element.id, "save");
    assert_eq!(snapshot.element.attributes["class"], "btn primary");
    assert_eq!(snapshot.element.text_content, "Save");
    assert_eq!(snapshot.dom_tree.current.as_ref().unwrap().tag_name, "BUTTON");
    assert_eq!(snapshot.dom_tree.parent.as_ref().unwrap().id, "settings");

    let sibling_tags: Vec<_> = snapshot
        .dom_tree
        .siblings
        .iter()
        .map(|s| s.tag_name.as_str())
        .collect();
    assert_eq!(sibling_tags, vec!["INPUT", "BUTTON"]);
    assert!(snapshot.dom_tree.siblings.iter().all(|s| s.id != "save"));

    assert!(snapshot.animations.css.iter().any(|a| matches!(
        a,
        CssAnimation::Transition { property, .. } if property == "background-color"
    )));
    assert_eq!(snapshot.animations.gsap[0].version, "3.12.5");

    let overview = viewer.overview().unwrap();
    assert_eq!(overview.label, "button#save.btn.primary");
    assert_eq!((overview.width, overview.height), (120, 32));
}

#[tokio::test]
async fn test_viewer_without_capture_shows_no_data() {
    let (launcher, _viewers) = ChannelLauncher::new();
    let host = BackgroundHost::spawn(Arc::new(launcher));
    let viewer = Viewer::open(host.client(Duration::from_secs(5))).await.unwrap();
    assert_eq!(viewer.state(), &ViewerState::NoData);
}

#[tokio::test]
async fn test_fetch_after_send_returns_same_snapshot() {
    let (launcher, _viewers) = ChannelLauncher::new();
    let host = BackgroundHost::spawn(Arc::new(launcher));
    let client = host.client(Duration::from_secs(5));

    let page = fixture_page();
    let save = page.find_by_id("save").unwrap();
    let snapshot = inspector_core::SnapshotBuilder::default()
        .capture(&page, save)
        .unwrap();

    client.send(snapshot.clone()).await.unwrap();
    assert_eq!(client.fetch().await.unwrap(), Some(snapshot));
}

#[tokio::test(start_paused = true)]
async fn test_unreachable_host_warns_without_panicking() {
    let (launcher, _viewers) = ChannelLauncher::new();
    let host = BackgroundHost::spawn(Arc::new(launcher));
    let client = host.client(Duration::from_secs(5));
    host.shutdown();
    host.join().await;

    let mut script = ContentScript::new(fixture_page(), client.clone());
    script.toggle_inspect_mode();
    script.handle_event(PageEvent::Click { x: 50.0, y: 60.0 }).await;
    script.settle().await;

    let notice = script.page().notices().last().unwrap();
    assert_eq!(notice.kind, NoticeKind::Warning);
    assert_eq!(notice.title, "Extension Reloaded");
    assert_eq!(script.state(), SelectionState::Idle);

    assert!(matches!(
        client.fetch().await,
        Err(RelayError::HostUnreachable(_))
    ));
}

#[tokio::test(start_paused = true)]
async fn test_right_click_in_inspect_mode_selects_element_under_pointer() {
    let (launcher, mut viewers) = ChannelLauncher::new();
    let host = BackgroundHost::spawn(Arc::new(launcher));
    let script = ContentScript::new(fixture_page(), host.client(Duration::from_secs(5)));

    let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
    tx.send(PageEvent::ToggleInspect).unwrap();
    tx.send(PageEvent::ContextMenu { x: 50.0, y: 60.0 }).unwrap();
    drop(tx);
    let script = script.run(rx).await;

    assert_eq!(viewers.recv().await.unwrap().sequence, 1);
    let viewer = Viewer::open(host.client(Duration::from_secs(5))).await.unwrap();
    assert_eq!(viewer.snapshot().unwrap().element.id, "save");
    assert_eq!(script.page().interceptor_count(), 0);
    assert_eq!(script.state(), SelectionState::Idle);
}

#[tokio::test]
async fn test_double_toggle_leaves_no_trace() {
    let (launcher, _viewers) = ChannelLauncher::new();
    let host = BackgroundHost::spawn(Arc::new(launcher));
    let mut script = ContentScript::new(fixture_page(), host.client(Duration::from_secs(5)));

    script.handle_event(PageEvent::ToggleInspect).await;
    script.handle_event(PageEvent::ToggleInspect).await;

    assert_eq!(script.state(), SelectionState::Idle);
    assert_eq!(script.machine().selected(), None);
    assert_eq!(script.page().interceptor_count(), 0);
    assert_eq!(script.page().banner_count(), 0);
    assert_eq!(script.page().cursor(), Cursor::Default);
}

#[test]
fn test_deep_nesting_is_bounded() {
    let page = nested_page(10);
    let outer = page.find_by_id("level-0").unwrap();
    let snapshot = inspector_core::SnapshotBuilder::default()
        .capture(&page, outer)
        .unwrap();
    assert_eq!(depth(snapshot.dom_tree.current.as_ref().unwrap()), 3);
    assert!(page.is_connected(outer));
}

#[tokio::test(start_paused = true)]
async fn test_configured_grace_and_budgets() {
    let config = ConfigLoader::load_str(
        r#"
        [inspect]
        click_grace_ms = 50

        [capture]
        text_limit = 2
        "#,
    )
    .unwrap();

    let (launcher, _viewers) = ChannelLauncher::new();
    let host = BackgroundHost::spawn(Arc::new(launcher));
    let client = host.client(config.relay.response_timeout());
    let mut script = ContentScript::from_config(fixture_page(), client.clone(), &config);

    script.toggle_inspect_mode();
    let start = tokio::time::Instant::now();
    script.handle_event(PageEvent::Click { x: 50.0, y: 60.0 }).await;
    script.settle().await;
    let waited = start.elapsed();
    assert!(waited >= Duration::from_millis(50));
    assert!(waited < Duration::from_millis(1000));

    let stored = client.fetch().await.unwrap().unwrap();
    assert_eq!(stored.element.text_content, "Sa");
    assert_eq!(stored.element.truncated, vec!["textContent".to_string()]);
}
