//! Owned render tree produced by the block renderer.
//!
//! The tree never borrows from the blocks it was built from, so it can
//! outlive them and be serialised at leisure.

use std::fmt::Write as _;

use serde::Serialize;

const VOID_ELEMENTS: &[&str] = &["br", "hr", "img"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum RenderNode {
    Element(Element),
    Text { text: String },
    Fragment { children: Vec<RenderNode> },
}

impl RenderNode {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn fragment(children: Vec<RenderNode>) -> Self {
        Self::Fragment { children }
    }

    pub fn empty() -> Self {
        Self::fragment(Vec::new())
    }

    /// True for an empty fragment; elements and text nodes are never empty,
    /// even with no content.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Fragment { children } if children.iter().all(RenderNode::is_empty))
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Serialise the tree to HTML.
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        self.write_html(&mut html);
        html
    }

    pub fn write_html(&self, out: &mut String) {
        match self {
            Self::Element(element) => element.write_html(out),
            Self::Text { text } => out.push_str(&html_escape::encode_text(text)),
            Self::Fragment { children } => {
                for child in children {
                    child.write_html(out);
                }
            }
        }
    }

    /// Concatenated text content of the subtree.
    pub fn text_content(&self) -> String {
        let mut buffer = String::new();
        self.collect_text(&mut buffer);
        buffer
    }

    fn collect_text(&self, buffer: &mut String) {
        match self {
            Self::Element(element) => {
                for child in &element.children {
                    child.collect_text(buffer);
                }
            }
            Self::Text { text } => buffer.push_str(text),
            Self::Fragment { children } => {
                for child in children {
                    child.collect_text(buffer);
                }
            }
        }
    }
}

impl From<Element> for RenderNode {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Element {
    pub tag: &'static str,
    pub attributes: Vec<(&'static str, String)>,
    pub children: Vec<RenderNode>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attributes.push((name, value.into()));
        self
    }

    pub fn class(self, value: impl Into<String>) -> Self {
        self.attr("class", value)
    }

    pub fn child(mut self, child: impl Into<RenderNode>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = RenderNode>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn is_void(&self) -> bool {
        VOID_ELEMENTS.contains(&self.tag)
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(self.tag);
        for (name, value) in &self.attributes {
            let _ = write!(
                out,
                " {name}=\"{}\"",
                html_escape::encode_double_quoted_attribute(value)
            );
        }
        out.push('>');

        if self.is_void() {
            return;
        }

        for child in &self.children {
            child.write_html(out);
        }
        out.push_str("</");
        out.push_str(self.tag);
        out.push('>');
    }
}
