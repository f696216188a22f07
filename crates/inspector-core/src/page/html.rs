//! Markup serialization and user-agent style defaults for the in-memory page.

use std::collections::BTreeMap;

use inspector_protocols::Rect;

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

const INLINE_ELEMENTS: &[&str] = &[
    "a", "abbr", "b", "code", "em", "i", "img", "label", "small", "span", "strong", "sub", "sup",
];

const INLINE_BLOCK_ELEMENTS: &[&str] = &["button", "input", "select", "textarea"];

pub(super) fn is_void(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag.to_ascii_lowercase().as_str())
}

pub(super) fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

pub(super) fn escape_attribute(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

pub(super) fn open_tag(tag: &str, attributes: &[(String, String)]) -> String {
    let mut out = format!("<{}", tag.to_ascii_lowercase());
    for (name, value) in attributes {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(&escape_attribute(value));
        out.push('"');
    }
    out.push('>');
    out
}

pub(super) fn close_tag(tag: &str) -> String {
    format!("</{}>", tag.to_ascii_lowercase())
}

fn default_display(tag: &str) -> &'static str {
    let tag = tag.to_ascii_lowercase();
    if INLINE_BLOCK_ELEMENTS.contains(&tag.as_str()) {
        "inline-block"
    } else if INLINE_ELEMENTS.contains(&tag.as_str()) {
        "inline"
    } else if tag == "li" {
        "list-item"
    } else {
        "block"
    }
}

/// Resolved style for an element before author styles are applied.
pub(super) fn user_agent_style(
    tag: &str,
    rect: Rect,
    z_index: Option<i32>,
    pointer_events: bool,
) -> BTreeMap<String, String> {
    let z_index = z_index.map_or_else(|| "auto".to_string(), |z| z.to_string());
    let pointer_events = if pointer_events { "auto" } else { "none" };

    [
        ("display", default_display(tag).to_string()),
        ("position", "static".to_string()),
        ("visibility", "visible".to_string()),
        ("opacity", "1".to_string()),
        ("color", "rgb(0, 0, 0)".to_string()),
        ("background-color", "rgba(0, 0, 0, 0)".to_string()),
        ("width", format!("{}px", rect.width)),
        ("height", format!("{}px", rect.height)),
        ("z-index", z_index),
        ("pointer-events", pointer_events.to_string()),
        ("cursor", "auto".to_string()),
        ("outline", "rgb(0, 0, 0) none 0px".to_string()),
        ("animation-name", "none".to_string()),
        ("animation-duration", "0s".to_string()),
        ("animation-timing-function", "ease".to_string()),
        ("animation-delay", "0s".to_string()),
        ("animation-iteration-count", "1".to_string()),
        ("animation-direction", "normal".to_string()),
        ("animation-fill-mode", "none".to_string()),
        ("transition-property", "all".to_string()),
        ("transition-duration", "0s".to_string()),
        ("transition-timing-function", "ease".to_string()),
        ("transition-delay", "0s".to_string()),
    ]
    .into_iter()
    .map(|(name, value)| (name.to_string(), value))
    .collect()
}
