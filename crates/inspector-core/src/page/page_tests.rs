use super::*;

fn toolbar_page() -> (MemoryPage, NodeHandle, NodeHandle) {
    let mut page = MemoryPage::new();
    let body = page.body();
    let toolbar = page.append(
        body,
        &ElementSpec::new("div")
            .class("toolbar")
            .rect(0.0, 0.0, 600.0, 60.0)
            .style("--brand", "#0af")
            .child(
                ElementSpec::new("button")
                    .id("save")
                    .class("btn primary")
                    .rect(10.0, 10.0, 80.0, 30.0)
                    .style("transition-duration", "0.2s")
                    .text("Save"),
            ),
    );
    let save = page.find_by_id("save").unwrap();
    (page, toolbar, save)
}

#[test]
fn test_new_page_structure() {
    let page = MemoryPage::new();
    assert_eq!(page.tag_name(page.root()).as_deref(), Some("HTML"));
    assert_eq!(page.tag_name(page.body()).as_deref(), Some("BODY"));
    assert_eq!(page.parent_element(page.body()), Some(page.root()));
    assert_eq!(page.elements().len(), 2);
}

#[test]
fn test_markup_serialization() {
    let (page, toolbar, save) = toolbar_page();
    assert_eq!(
        page.outer_html(save).unwrap(),
        r#"<button class="btn primary" id="save">Save</button>"#
    );
    assert_eq!(
        page.inner_html(toolbar).unwrap(),
        r#"<button class="btn primary" id="save">Save</button>"#
    );
    assert_eq!(page.text_content(toolbar).unwrap(), "Save");
}

#[test]
fn test_void_elements_have_no_closing_tag() {
    let mut page = MemoryPage::new();
    let body = page.body();
    let img = page.append(body, &ElementSpec::new("img").attr("src", "a.png"));
    assert_eq!(page.outer_html(img).unwrap(), r#"<img src="a.png">"#);
}

#[test]
fn test_text_nodes_are_not_elements() {
    let mut page = MemoryPage::new();
    let body = page.body();
    let text = page.append_text(body, "hello");
    assert!(page.tag_name(text).is_none());
    assert!(matches!(page.id(text), Err(DomError::NotAnElement(_))));
    assert!(page.children(body).is_empty());
}

#[test]
fn test_hit_testing_prefers_deepest_element() {
    let (page, toolbar, save) = toolbar_page();
    assert_eq!(page.element_from_point(20.0, 20.0), Some(save));
    assert_eq!(page.element_from_point(300.0, 20.0), Some(toolbar));
    assert_eq!(page.element_from_point(900.0, 500.0), Some(page.body()));
}

#[test]
fn test_hit_testing_respects_z_index() {
    let (mut page, _, save) = toolbar_page();
    let body = page.body();
    let modal = page.append(
        body,
        &ElementSpec::new("div").rect(0.0, 0.0, 200.0, 200.0).z_index(50),
    );
    assert_eq!(page.element_from_point(20.0, 20.0), Some(modal));
    page.detach(modal);
    assert_eq!(page.element_from_point(20.0, 20.0), Some(save));
}

#[test]
fn test_interceptor_blocks_hit_testing_until_disabled() {
    let (mut page, _, save) = toolbar_page();
    page.install_interceptor();
    let interceptor = page.interceptor().unwrap();
    assert_eq!(page.element_from_point(20.0, 20.0), Some(interceptor));

    page.set_interceptor_pointer_events(false);
    assert_eq!(page.element_from_point(20.0, 20.0), Some(save));

    page.set_interceptor_pointer_events(true);
    page.remove_interceptor();
    assert_eq!(page.interceptor_count(), 0);
    assert_eq!(page.element_from_point(20.0, 20.0), Some(save));
}

#[test]
fn test_install_interceptor_twice_keeps_one() {
    let mut page = MemoryPage::new();
    page.install_interceptor();
    page.install_interceptor();
    assert_eq!(page.interceptor_count(), 1);
}

#[test]
fn test_page_chrome_is_reused_across_toggles() {
    let mut page = MemoryPage::new();
    page.install_interceptor();
    page.show_banner("Inspect Mode Active");
    let interceptor = page.interceptor().unwrap();
    let allocated = page.nodes.len();

    for _ in 0..5 {
        page.set_interceptor_pointer_events(false);
        page.remove_interceptor();
        page.hide_banner();
        assert_eq!(page.interceptor(), None);

        page.install_interceptor();
        page.show_banner("Inspect Mode Active");
    }

    assert_eq!(page.nodes.len(), allocated);
    assert_eq!(page.interceptor(), Some(interceptor));
    assert_eq!(page.interceptor_count(), 1);
    assert_eq!(page.banner_count(), 1);
    assert_eq!(page.element_from_point(20.0, 20.0), Some(interceptor));
}

#[test]
fn test_banner_text_is_replaced_on_reuse() {
    let mut page = MemoryPage::new();
    page.show_banner("first");
    page.hide_banner();
    page.show_banner("second");
    assert_eq!(page.banner_text().as_deref(), Some("second"));
    assert_eq!(page.banner_count(), 1);
}

#[test]
fn test_banner_is_not_hit_testable() {
    let mut page = MemoryPage::new();
    page.show_banner("Inspect Mode Active");
    page.show_banner("Inspect Mode Active");
    assert_eq!(page.banner_count(), 1);
    assert_eq!(page.banner_text().as_deref(), Some("Inspect Mode Active"));

    let banner_center = (page.viewport().right() - 220.0, 40.0);
    assert_eq!(
        page.element_from_point(banner_center.0, banner_center.1),
        Some(page.body())
    );

    page.hide_banner();
    assert_eq!(page.banner_count(), 0);
    assert!(page.banner_text().is_none());
}

#[test]
fn test_detach_disconnects_subtree() {
    let (mut page, toolbar, save) = toolbar_page();
    page.detach(toolbar);
    assert!(!page.is_connected(toolbar));
    assert!(!page.is_connected(save));
    assert!(page.find_by_id("save").is_none());
    assert_eq!(page.bounding_client_rect(save).unwrap(), Rect::default());
    assert!(page.computed_style(save).unwrap().is_empty());
}

#[test]
fn test_computed_style_merges_defaults_and_author_styles() {
    let (page, _, save) = toolbar_page();
    let style: BTreeMap<String, String> = page.computed_style(save).unwrap().into_iter().collect();
    assert_eq!(style["display"], "inline-block");
    assert_eq!(style["transition-duration"], "0.2s");
    assert_eq!(style["width"], "80px");
    assert_eq!(style["--brand"], "#0af");
}

#[test]
fn test_outline_is_reflected_in_computed_style() {
    let (mut page, _, save) = toolbar_page();
    page.set_outline(save, Some("3px solid #ff6b35")).unwrap();
    assert_eq!(page.outline(save), Some("3px solid #ff6b35"));
    let style: BTreeMap<String, String> = page.computed_style(save).unwrap().into_iter().collect();
    assert_eq!(style["outline"], "3px solid #ff6b35");

    page.set_outline(save, None).unwrap();
    assert!(page.outline(save).is_none());
}

#[test]
fn test_failing_field() {
    let (mut page, _, save) = toolbar_page();
    page.fail_field(save, "innerHTML");
    assert!(matches!(
        page.inner_html(save),
        Err(DomError::PropertyUnavailable { .. })
    ));
    assert!(page.outer_html(save).is_ok());
}

#[test]
fn test_globals() {
    let mut page = MemoryPage::new();
    assert_eq!(page.global("gsap").unwrap(), None);
    page.set_global("gsap", serde_json::json!({"version": "3.12.5"}));
    assert_eq!(page.global("gsap").unwrap().unwrap()["version"], "3.12.5");
    page.fail_global("gsap");
    assert!(matches!(page.global("gsap"), Err(DomError::Script(_))));
}

#[test]
fn test_from_fixture() {
    let raw = r#"{
        "viewport": {"x": 0, "y": 0, "width": 800, "height": 600},
        "globals": {"gsap": {"version": "3.11.0"}},
        "body": [
            {"tag": "main", "rect": {"x": 0, "y": 0, "width": 800, "height": 600}, "children": [
                "Intro ",
                {"tag": "a", "attributes": {"href": "/docs", "id": "docs"},
                 "rect": {"x": 5, "y": 5, "width": 40, "height": 12}, "children": ["Docs"]}
            ]}
        ]
    }"#;
    let fixture = PageFixture::from_json(raw).unwrap();
    let page = MemoryPage::from_fixture(&fixture);

    let docs = page.find_by_id("docs").unwrap();
    assert_eq!(page.tag_name(docs).as_deref(), Some("A"));
    assert_eq!(page.viewport().width, 800.0);
    assert_eq!(page.element_from_point(10.0, 10.0), Some(docs));
    let main = page.parent_element(docs).unwrap();
    assert_eq!(page.text_content(main).unwrap(), "Intro Docs");
    assert!(page.global("gsap").unwrap().is_some());
}
