//! In-memory page model.
//!
//! [`MemoryPage`] is an arena DOM with just enough layout (rectangles, z-order,
//! pointer-events) to hit-test, plus a log of the page chrome the inspector
//! draws. It backs the CLI and the test suite.

mod html;
mod spec;

use std::collections::{BTreeMap, BTreeSet};

use serde_json::Value;
use tracing::{debug, warn};

use inspector_protocols::{Cursor, Document, DomError, NodeHandle, Notice, PageSurface, Rect};

pub use spec::{ElementSpec, FixtureError, NodeSpec, PageFixture};

#[cfg(test)]
#[path = "page_tests.rs"]
mod tests;

/// Id of the click interceptor element.
pub const INTERCEPTOR_ID: &str = "element-inspector-click-blocker";

/// Id of the inspect mode banner element.
pub const BANNER_ID: &str = "inspect-mode-indicator";

const INTERCEPTOR_Z: i32 = 9999;
const BANNER_Z: i32 = 10001;

#[derive(Debug, Clone)]
enum NodeKind {
    /// Upper-case tag name.
    Element(String),
    Text(String),
}

#[derive(Debug, Clone)]
struct MemoryNode {
    kind: NodeKind,
    attributes: Vec<(String, String)>,
    rect: Rect,
    z_index: Option<i32>,
    pointer_events: Option<bool>,
    style: BTreeMap<String, String>,
    outline: Option<String>,
    parent: Option<NodeHandle>,
    children: Vec<NodeHandle>,
    /// Fields whose getters throw, for simulating hostile pages.
    failing: BTreeSet<String>,
}

impl MemoryNode {
    fn element(tag: &str) -> Self {
        Self {
            kind: NodeKind::Element(tag.to_ascii_uppercase()),
            attributes: Vec::new(),
            rect: Rect::default(),
            z_index: None,
            pointer_events: None,
            style: BTreeMap::new(),
            outline: None,
            parent: None,
            children: Vec::new(),
            failing: BTreeSet::new(),
        }
    }

    fn text(text: &str) -> Self {
        Self {
            kind: NodeKind::Text(text.to_string()),
            ..Self::element("")
        }
    }

    fn tag(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Element(tag) => Some(tag.as_str()),
            NodeKind::Text(_) => None,
        }
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Arena-backed page implementing [`Document`] and [`PageSurface`].
#[derive(Debug, Clone)]
pub struct MemoryPage {
    nodes: Vec<MemoryNode>,
    root: NodeHandle,
    body: NodeHandle,
    viewport: Rect,
    globals: BTreeMap<String, Value>,
    failing_globals: BTreeSet<String>,
    cursor: Cursor,
    banner: Option<NodeHandle>,
    interceptor: Option<NodeHandle>,
    notices: Vec<Notice>,
}

impl Default for MemoryPage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryPage {
    /// Empty `<html><body></body></html>` with a 1280x720 viewport.
    pub fn new() -> Self {
        Self::with_viewport(Rect::new(0.0, 0.0, 1280.0, 720.0))
    }

    pub fn with_viewport(viewport: Rect) -> Self {
        let mut page = Self {
            nodes: Vec::new(),
            root: NodeHandle(0),
            body: NodeHandle(0),
            viewport,
            globals: BTreeMap::new(),
            failing_globals: BTreeSet::new(),
            cursor: Cursor::Default,
            banner: None,
            interceptor: None,
            notices: Vec::new(),
        };

        let mut html = MemoryNode::element("html");
        html.rect = viewport;
        page.root = page.push(html);

        let mut body = MemoryNode::element("body");
        body.rect = viewport;
        let body = page.push(body);
        page.attach(page.root, body);
        page.body = body;

        page
    }

    pub fn from_fixture(fixture: &PageFixture) -> Self {
        let mut page = match fixture.viewport {
            Some(viewport) => Self::with_viewport(viewport),
            None => Self::new(),
        };
        for (name, value) in &fixture.globals {
            page.set_global(name, value.clone());
        }
        let body = page.body;
        for child in &fixture.body {
            page.append_node(body, child);
        }
        page
    }

    pub fn root(&self) -> NodeHandle {
        self.root
    }

    pub fn body(&self) -> NodeHandle {
        self.body
    }

    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    /// Append an element subtree under `parent`.
    pub fn append(&mut self, parent: NodeHandle, spec: &ElementSpec) -> NodeHandle {
        let mut node = MemoryNode::element(&spec.tag);
        node.attributes = spec
            .attributes
            .iter()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();
        node.rect = spec.rect.unwrap_or_default();
        node.z_index = spec.z_index;
        node.pointer_events = spec.pointer_events;
        node.style = spec.style.clone();

        let handle = self.push(node);
        self.attach(parent, handle);
        for child in &spec.children {
            self.append_node(handle, child);
        }
        handle
    }

    pub fn append_text(&mut self, parent: NodeHandle, text: &str) -> NodeHandle {
        let handle = self.push(MemoryNode::text(text));
        self.attach(parent, handle);
        handle
    }

    fn append_node(&mut self, parent: NodeHandle, spec: &NodeSpec) -> NodeHandle {
        match spec {
            NodeSpec::Text(text) => self.append_text(parent, text),
            NodeSpec::Element(element) => self.append(parent, element),
        }
    }

    pub fn set_attribute(&mut self, node: NodeHandle, name: &str, value: &str) {
        if let Some(n) = self.node_mut(node) {
            match n.attributes.iter_mut().find(|(existing, _)| existing == name) {
                Some(slot) => slot.1 = value.to_string(),
                None => n.attributes.push((name.to_string(), value.to_string())),
            }
        }
    }

    pub fn set_global(&mut self, name: &str, value: Value) {
        self.globals.insert(name.to_string(), value);
    }

    /// Make reads of a global throw.
    pub fn fail_global(&mut self, name: &str) {
        self.failing_globals.insert(name.to_string());
    }

    /// Make a field getter throw (`"innerHTML"`, `"computedStyle"`, ...).
    pub fn fail_field(&mut self, node: NodeHandle, field: &str) {
        if let Some(n) = self.node_mut(node) {
            n.failing.insert(field.to_string());
        }
    }

    /// Remove a subtree from the document. The handle stays valid but detached.
    pub fn detach(&mut self, node: NodeHandle) {
        let Some(parent) = self.node(node).and_then(|n| n.parent) else {
            return;
        };
        if let Some(p) = self.node_mut(parent) {
            p.children.retain(|child| *child != node);
        }
        if let Some(n) = self.node_mut(node) {
            n.parent = None;
        }
    }

    /// First connected element with the given id attribute.
    pub fn find_by_id(&self, id: &str) -> Option<NodeHandle> {
        self.elements()
            .into_iter()
            .find(|h| self.node(*h).and_then(|n| n.attribute("id")) == Some(id))
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Text of the banner currently on the page.
    pub fn banner_text(&self) -> Option<String> {
        let banner = self.banner.filter(|b| self.is_connected(*b))?;
        self.text_content(banner).ok()
    }

    /// Connected elements carrying the banner id.
    pub fn banner_count(&self) -> usize {
        self.count_with_id(BANNER_ID)
    }

    /// Connected elements carrying the interceptor id.
    pub fn interceptor_count(&self) -> usize {
        self.count_with_id(INTERCEPTOR_ID)
    }

    /// The interceptor while it is installed.
    pub fn interceptor(&self) -> Option<NodeHandle> {
        self.interceptor.filter(|i| self.is_connected(*i))
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn outline(&self, node: NodeHandle) -> Option<&str> {
        self.node(node).and_then(|n| n.outline.as_deref())
    }

    fn count_with_id(&self, id: &str) -> usize {
        self.elements()
            .into_iter()
            .filter(|h| self.node(*h).and_then(|n| n.attribute("id")) == Some(id))
            .count()
    }

    fn push(&mut self, node: MemoryNode) -> NodeHandle {
        let handle = NodeHandle(self.nodes.len() as u64);
        self.nodes.push(node);
        handle
    }

    /// Point the first text child of `node` at new text, adding one if missing.
    fn replace_text(&mut self, node: NodeHandle, text: &str) {
        let first = self.node(node).and_then(|n| n.children.first().copied());
        match first.and_then(|child| self.node_mut(child)) {
            Some(child) => child.kind = NodeKind::Text(text.to_string()),
            None => {
                self.append_text(node, text);
            }
        }
    }

    fn attach(&mut self, parent: NodeHandle, child: NodeHandle) {
        if let Some(c) = self.node_mut(child) {
            c.parent = Some(parent);
        }
        if let Some(p) = self.node_mut(parent) {
            p.children.push(child);
        }
    }

    fn node(&self, handle: NodeHandle) -> Option<&MemoryNode> {
        self.nodes.get(handle.0 as usize)
    }

    fn node_mut(&mut self, handle: NodeHandle) -> Option<&mut MemoryNode> {
        self.nodes.get_mut(handle.0 as usize)
    }

    /// Element lookup honoring injected getter failures for `field`.
    fn element_field(&self, handle: NodeHandle, field: &str) -> Result<&MemoryNode, DomError> {
        let node = self.node(handle).ok_or(DomError::Detached(handle))?;
        if node.tag().is_none() {
            return Err(DomError::NotAnElement(handle));
        }
        if node.failing.contains(field) {
            return Err(DomError::unavailable(field, "getter threw"));
        }
        Ok(node)
    }

    fn effective_z(&self, handle: NodeHandle) -> i32 {
        let mut current = Some(handle);
        while let Some(h) = current {
            let Some(node) = self.node(h) else { break };
            if let Some(z) = node.z_index {
                return z;
            }
            current = node.parent;
        }
        0
    }

    fn effective_pointer_events(&self, handle: NodeHandle) -> bool {
        let mut current = Some(handle);
        while let Some(h) = current {
            let Some(node) = self.node(h) else { break };
            if let Some(enabled) = node.pointer_events {
                return enabled;
            }
            current = node.parent;
        }
        true
    }

    fn preorder(&self, handle: NodeHandle, out: &mut Vec<NodeHandle>) {
        let Some(node) = self.node(handle) else {
            return;
        };
        if node.tag().is_some() {
            out.push(handle);
        }
        for child in &node.children {
            self.preorder(*child, out);
        }
    }

    fn collect_text(&self, handle: NodeHandle, out: &mut String) {
        let Some(node) = self.node(handle) else {
            return;
        };
        match &node.kind {
            NodeKind::Text(text) => out.push_str(text),
            NodeKind::Element(_) => {
                for child in &node.children {
                    self.collect_text(*child, out);
                }
            }
        }
    }

    fn serialize(&self, handle: NodeHandle, out: &mut String) {
        let Some(node) = self.node(handle) else {
            return;
        };
        match &node.kind {
            NodeKind::Text(text) => out.push_str(&html::escape_text(text)),
            NodeKind::Element(tag) => {
                out.push_str(&html::open_tag(tag, &node.attributes));
                if html::is_void(tag) {
                    return;
                }
                self.serialize_children(handle, out);
                out.push_str(&html::close_tag(tag));
            }
        }
    }

    fn serialize_children(&self, handle: NodeHandle, out: &mut String) {
        if let Some(node) = self.node(handle) {
            for child in &node.children {
                self.serialize(*child, out);
            }
        }
    }

    /// Custom properties inherited from ancestors, nearest wins.
    fn inherited_custom_properties(&self, handle: NodeHandle) -> BTreeMap<String, String> {
        let mut chain = Vec::new();
        let mut current = self.node(handle).and_then(|n| n.parent);
        while let Some(h) = current {
            chain.push(h);
            current = self.node(h).and_then(|n| n.parent);
        }

        let mut inherited = BTreeMap::new();
        for ancestor in chain.into_iter().rev() {
            if let Some(node) = self.node(ancestor) {
                for (name, value) in &node.style {
                    if name.starts_with("--") {
                        inherited.insert(name.clone(), value.clone());
                    }
                }
            }
        }
        inherited
    }
}

impl Document for MemoryPage {
    fn tag_name(&self, node: NodeHandle) -> Option<String> {
        self.node(node).and_then(|n| n.tag()).map(str::to_string)
    }

    fn id(&self, node: NodeHandle) -> Result<String, DomError> {
        let n = self.element_field(node, "id")?;
        Ok(n.attribute("id").unwrap_or_default().to_string())
    }

    fn class_name(&self, node: NodeHandle) -> Result<String, DomError> {
        let n = self.element_field(node, "className")?;
        Ok(n.attribute("class").unwrap_or_default().to_string())
    }

    fn attributes(&self, node: NodeHandle) -> Result<Vec<(String, String)>, DomError> {
        Ok(self.element_field(node, "attributes")?.attributes.clone())
    }

    fn inner_html(&self, node: NodeHandle) -> Result<String, DomError> {
        self.element_field(node, "innerHTML")?;
        let mut out = String::new();
        self.serialize_children(node, &mut out);
        Ok(out)
    }

    fn outer_html(&self, node: NodeHandle) -> Result<String, DomError> {
        self.element_field(node, "outerHTML")?;
        let mut out = String::new();
        self.serialize(node, &mut out);
        Ok(out)
    }

    fn text_content(&self, node: NodeHandle) -> Result<String, DomError> {
        self.element_field(node, "textContent")?;
        let mut out = String::new();
        self.collect_text(node, &mut out);
        Ok(out)
    }

    fn bounding_client_rect(&self, node: NodeHandle) -> Result<Rect, DomError> {
        let n = self.element_field(node, "boundingClientRect")?;
        if !self.is_connected(node) {
            return Ok(Rect::default());
        }
        Ok(n.rect)
    }

    fn computed_style(&self, node: NodeHandle) -> Result<Vec<(String, String)>, DomError> {
        let n = self.element_field(node, "computedStyle")?;
        if !self.is_connected(node) {
            return Ok(Vec::new());
        }

        let tag = n.tag().unwrap_or_default();
        let mut style = html::user_agent_style(
            tag,
            n.rect,
            n.z_index,
            self.effective_pointer_events(node),
        );
        style.extend(self.inherited_custom_properties(node));
        style.extend(n.style.iter().map(|(k, v)| (k.clone(), v.clone())));
        if let Some(outline) = &n.outline {
            style.insert("outline".to_string(), outline.clone());
        }
        Ok(style.into_iter().collect())
    }

    fn parent_element(&self, node: NodeHandle) -> Option<NodeHandle> {
        let parent = self.node(node)?.parent?;
        self.node(parent)?.tag().map(|_| parent)
    }

    fn children(&self, node: NodeHandle) -> Vec<NodeHandle> {
        self.node(node)
            .map(|n| {
                n.children
                    .iter()
                    .copied()
                    .filter(|c| self.node(*c).is_some_and(|child| child.tag().is_some()))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn is_connected(&self, node: NodeHandle) -> bool {
        let mut current = Some(node);
        while let Some(h) = current {
            if h == self.root {
                return true;
            }
            current = self.node(h).and_then(|n| n.parent);
        }
        false
    }

    fn element_from_point(&self, x: f64, y: f64) -> Option<NodeHandle> {
        self.elements()
            .into_iter()
            .enumerate()
            .filter(|(_, h)| self.effective_pointer_events(*h))
            .filter(|(_, h)| self.node(*h).is_some_and(|n| n.rect.contains(x, y)))
            .max_by_key(|(order, h)| (self.effective_z(*h), *order))
            .map(|(_, h)| h)
    }

    fn elements(&self) -> Vec<NodeHandle> {
        let mut out = Vec::new();
        self.preorder(self.root, &mut out);
        out
    }

    fn global(&self, name: &str) -> Result<Option<Value>, DomError> {
        if self.failing_globals.contains(name) {
            return Err(DomError::Script(format!("access to window.{} threw", name)));
        }
        Ok(self.globals.get(name).cloned())
    }
}

impl PageSurface for MemoryPage {
    fn set_cursor(&mut self, cursor: Cursor) {
        self.cursor = cursor;
    }

    fn show_banner(&mut self, text: &str) {
        if let Some(banner) = self.banner {
            if self.is_connected(banner) {
                warn!("Banner already shown");
                return;
            }
            self.replace_text(banner, text);
            let body = self.body;
            self.attach(body, banner);
            return;
        }
        let spec = ElementSpec::new("div")
            .id(BANNER_ID)
            .rect(self.viewport.right() - 420.0, 20.0, 400.0, 40.0)
            .z_index(BANNER_Z)
            .pointer_events(false)
            .text(text);
        let body = self.body;
        self.banner = Some(self.append(body, &spec));
    }

    fn hide_banner(&mut self) {
        if let Some(banner) = self.banner {
            self.detach(banner);
        }
    }

    fn install_interceptor(&mut self) {
        if let Some(interceptor) = self.interceptor {
            if self.is_connected(interceptor) {
                warn!("Click interceptor already installed");
                return;
            }
            if let Some(node) = self.node_mut(interceptor) {
                node.pointer_events = Some(true);
            }
            let body = self.body;
            self.attach(body, interceptor);
            return;
        }
        let viewport = self.viewport;
        let spec = ElementSpec::new("div")
            .id(INTERCEPTOR_ID)
            .rect(viewport.x, viewport.y, viewport.width, viewport.height)
            .z_index(INTERCEPTOR_Z)
            .pointer_events(true);
        let body = self.body;
        self.interceptor = Some(self.append(body, &spec));
    }

    fn remove_interceptor(&mut self) {
        if let Some(interceptor) = self.interceptor {
            self.detach(interceptor);
        }
    }

    fn set_interceptor_pointer_events(&mut self, enabled: bool) {
        if let Some(interceptor) = self.interceptor {
            if let Some(node) = self.node_mut(interceptor) {
                node.pointer_events = Some(enabled);
            }
        }
    }

    fn set_outline(&mut self, node: NodeHandle, outline: Option<&str>) -> Result<(), DomError> {
        self.element_field(node, "style")?;
        if let Some(n) = self.node_mut(node) {
            n.outline = outline.map(str::to_string);
        }
        Ok(())
    }

    fn show_notice(&mut self, notice: Notice) {
        debug!("Notice ({:?}): {}", notice.kind, notice.title);
        self.notices.push(notice);
    }
}
