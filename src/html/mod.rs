//! HTML construction
//!
//! A small builder for HTML fragments and documents. Elements own their
//! attributes and children, render through [`std::fmt::Display`], and escape
//! attribute values and text. Use [`Node::Raw`] for markup that is already
//! rendered, such as a stylesheet or a nested table.
//!
//! ```
//! use panql::html::Element;
//!
//! let link = Element::new("a").attr("href", "/about").text("About me");
//! assert_eq!(link.to_string(), r#"<a href="/about">About me</a>"#);
//! ```

pub mod css;
pub mod table;

use std::fmt;

pub use css::Stylesheet;
pub use table::to_html_table;

/// A node in an HTML tree
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    /// Text content, escaped on render
    Text(String),
    /// Pre-rendered markup, written as is
    Raw(String),
}

/// An HTML element with ordered attributes and children
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    tag: String,
    attrs: Vec<(String, String)>,
    children: Vec<Node>,
    void: bool,
}

impl Element {
    /// Create an element rendered as `<tag ...>children</tag>`
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            children: Vec::new(),
            void: false,
        }
    }

    /// Create a self-closing element rendered as `<tag .../>`
    ///
    /// Void elements never render children.
    pub fn void(tag: impl Into<String>) -> Self {
        Self {
            void: true,
            ..Self::new(tag)
        }
    }

    /// Set an attribute. Setting an existing attribute replaces its value in place.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((name, value)),
        }
        self
    }

    pub fn class(self, value: impl Into<String>) -> Self {
        self.attr("class", value)
    }

    pub fn id(self, value: impl Into<String>) -> Self {
        self.attr("id", value)
    }

    /// Append a child node
    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    /// Append several child nodes
    pub fn children<I, N>(mut self, nodes: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
    {
        self.children.extend(nodes.into_iter().map(Into::into));
        self
    }

    /// Append an escaped text node
    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    /// Append raw markup
    pub fn raw(self, markup: impl Into<String>) -> Self {
        self.child(Node::Raw(markup.into()))
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn child_nodes(&self) -> &[Node] {
        &self.children
    }

    pub fn is_void(&self) -> bool {
        self.void
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.tag)?;
        for (name, value) in &self.attrs {
            write!(f, " {}=\"{}\"", name, escape_html(value))?;
        }

        if self.void {
            return f.write_str("/>");
        }

        f.write_str(">")?;
        for (i, child) in self.children.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{}", child)?;
        }
        write!(f, "</{}>", self.tag)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Element(element) => write!(f, "{}", element),
            Node::Text(text) => f.write_str(&escape_html(text)),
            Node::Raw(markup) => f.write_str(markup),
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::Text(text.to_string())
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Node::Text(text)
    }
}

/// Render a complete document: doctype followed by `<html>head body</html>`
pub fn document(head: Element, body: Element) -> String {
    let html = Element::new("html").child(head).child(body);
    format!("<!DOCTYPE html>\n{}", html)
}

/// Escape the characters that are significant in HTML text and attribute values
pub fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<test>"), "&lt;test&gt;");
        assert_eq!(escape_html("AT&T"), "AT&amp;T");
        assert_eq!(escape_html("\"quoted\""), "&quot;quoted&quot;");
    }

    #[test]
    fn test_children_are_newline_separated() {
        let list = Element::new("ul")
            .child(Element::new("li").text("one"))
            .child(Element::new("li").text("two"));
        assert_eq!(list.to_string(), "<ul><li>one</li>\n<li>two</li></ul>");
    }

    #[test]
    fn test_void_element() {
        let meta = Element::void("meta").attr("charset", "utf-8");
        assert_eq!(meta.to_string(), r#"<meta charset="utf-8"/>"#);
        assert!(meta.is_void());
    }

    #[test]
    fn test_attr_replaces_in_place() {
        let div = Element::new("div").id("a").class("x").id("b");
        assert_eq!(div.to_string(), r#"<div id="b" class="x"></div>"#);
        assert_eq!(div.get_attr("id"), Some("b"));
    }

    #[test]
    fn test_text_escaped_raw_verbatim() {
        let p = Element::new("p").text("a < b").raw("<br/>");
        assert_eq!(p.to_string(), "<p>a &lt; b\n<br/></p>");
    }
}
