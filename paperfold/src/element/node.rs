use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::sync::atomic::{AtomicU64, Ordering};

use super::Content;
use crate::transitions::Transitions;

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

pub(crate) fn generate_id(prefix: &str) -> String {
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{id}")
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    // Identity
    pub id: String,
    pub classes: Vec<String>,

    // Content
    pub content: Content,

    // Box
    /// Fixed height in rows. `None` means the content decides.
    pub height: Option<f32>,
    /// Offset of the element's top edge from its containing box.
    pub top: Option<f32>,
    /// Offset of the element's bottom edge from its containing box's bottom.
    pub bottom: Option<f32>,

    // Visual
    pub transitions: Transitions,

    // Custom data storage (ownership markers, etc.)
    pub data: BTreeMap<String, String>,
}

impl Default for Element {
    fn default() -> Self {
        Self {
            id: generate_id("el"),
            classes: Vec::new(),
            content: Content::None,
            height: None,
            top: None,
            bottom: None,
            transitions: Transitions::default(),
            data: BTreeMap::new(),
        }
    }
}

impl Element {
    pub fn box_() -> Self {
        Self {
            id: generate_id("box"),
            ..Default::default()
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self {
            id: generate_id("text"),
            content: Content::Text(content.into()),
            ..Default::default()
        }
    }

    // Identity
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.add_class(class);
        self
    }

    // Box
    pub fn height(mut self, height: f32) -> Self {
        self.height = Some(height);
        self
    }

    pub fn top(mut self, top: f32) -> Self {
        self.top = Some(top);
        self
    }

    pub fn bottom(mut self, bottom: f32) -> Self {
        self.bottom = Some(bottom);
        self
    }

    // Visual
    pub fn transitions(mut self, transitions: Transitions) -> Self {
        self.transitions = transitions;
        self
    }

    // Custom data
    pub fn data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    pub fn get_data(&self, key: &str) -> Option<&String> {
        self.data.get(key)
    }

    // Children
    pub fn child(mut self, child: Element) -> Self {
        match &mut self.content {
            Content::Children(children) => children.push(child),
            _ => self.content = Content::Children(vec![child]),
        }
        self
    }

    pub fn children(mut self, new_children: impl IntoIterator<Item = Element>) -> Self {
        match &mut self.content {
            Content::Children(children) => children.extend(new_children),
            _ => self.content = Content::Children(new_children.into_iter().collect()),
        }
        self
    }

    /// Replace the content wholesale.
    pub fn content(mut self, content: Content) -> Self {
        self.content = content;
        self
    }

    // Class list

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Add a class if not already present.
    pub fn add_class(&mut self, class: impl Into<String>) {
        let class = class.into();
        if !self.has_class(&class) {
            self.classes.push(class);
        }
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    /// Append a child, converting text or empty content into a child list.
    pub fn push_child(&mut self, child: Element) {
        match &mut self.content {
            Content::Children(children) => children.push(child),
            _ => self.content = Content::Children(vec![child]),
        }
    }

    /// Mutable access to the direct children. Empty for text content.
    pub fn children_mut(&mut self) -> &mut [Element] {
        match &mut self.content {
            Content::Children(children) => children,
            _ => &mut [],
        }
    }

    /// Deep copy with this element's id and all descendant ids prefixed.
    pub fn clone_scoped(&self, prefix: &str) -> Element {
        Element {
            id: format!("{prefix}/{}", self.id),
            classes: self.classes.clone(),
            content: self.content.clone_scoped(prefix),
            height: self.height,
            top: self.top,
            bottom: self.bottom,
            transitions: self.transitions.clone(),
            data: self.data.clone(),
        }
    }

    /// Height this element occupies: the fixed height if set, otherwise the
    /// stacked height of its content.
    pub fn measured_height(&self) -> f32 {
        self.height.unwrap_or_else(|| self.content.intrinsic_height())
    }

    /// Serialize the subtree into HTML-like markup.
    ///
    /// Two trees with equal markup render identically and carry the same ids,
    /// classes, offsets and data attributes.
    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        self.write_markup(&mut out);
        out
    }

    fn write_markup(&self, out: &mut String) {
        let _ = write!(out, "<div id=\"{}\"", escape(&self.id));
        if !self.classes.is_empty() {
            let _ = write!(out, " class=\"{}\"", escape(&self.classes.join(" ")));
        }
        for (key, value) in &self.data {
            let _ = write!(out, " data-{}=\"{}\"", escape(key), escape(value));
        }

        let mut style = Vec::new();
        if let Some(height) = self.height {
            style.push(format!("height:{height}"));
        }
        if let Some(top) = self.top {
            style.push(format!("top:{top}"));
        }
        if let Some(bottom) = self.bottom {
            style.push(format!("bottom:{bottom}"));
        }
        if let Some(transition) = self.transitions.to_css() {
            style.push(format!("transition:{transition}"));
        }
        if !style.is_empty() {
            let _ = write!(out, " style=\"{}\"", style.join(";"));
        }
        out.push('>');

        match &self.content {
            Content::None => {}
            Content::Text(text) => out.push_str(&escape(text)),
            Content::Children(children) => {
                for child in children {
                    child.write_markup(out);
                }
            }
        }
        out.push_str("</div>");
    }
}

fn escape(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
