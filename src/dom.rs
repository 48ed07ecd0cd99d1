// src/dom.rs

//! Owned markup tree standing in for the browser DOM.
//!
//! Pages and template fragments are parsed with `scraper` and converted into
//! this tree so the render pipelines can mutate them freely; the tree
//! serializes back to HTML at the end of a render pass.

use ego_tree::NodeRef;
use scraper::{Html, Node as ParsedNode};

/// Elements serialized without a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// One node of the markup tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
    Comment(String),
    Doctype(String),
    /// Pre-rendered markup injected verbatim, without escaping.
    Raw(String),
}

/// An element node: tag, attributes in source order, children.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    tag: String,
    attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_class(tag: &str, class: &str) -> Self {
        let mut element = Self::new(tag);
        element.set_attr("class", class);
        element
    }

    pub fn with_text(tag: &str, class: &str, text: &str) -> Self {
        let mut element = Self::with_class(tag, class);
        element.set_text(text);
        element
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Set an attribute, replacing any existing value.
    pub fn set_attr(&mut self, name: &str, value: &str) {
        match self.attrs.iter_mut().find(|(key, _)| key == name) {
            Some((_, existing)) => *existing = value.to_string(),
            None => self.attrs.push((name.to_string(), value.to_string())),
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .map(|value| value.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    pub fn push(&mut self, node: Node) {
        self.children.push(node);
    }

    pub fn push_element(&mut self, element: Element) {
        self.children.push(Node::Element(element));
    }

    /// Replace all children with a single text node (empty text clears).
    pub fn set_text(&mut self, text: &str) {
        self.children.clear();
        if !text.is_empty() {
            self.children.push(Node::Text(text.to_string()));
        }
    }

    /// Depth-first search for the first element (self included) carrying the
    /// given class.
    pub fn find_class_mut(&mut self, class: &str) -> Option<&mut Element> {
        if self.has_class(class) {
            return Some(self);
        }
        find_class_in(&mut self.children, class)
    }

    /// Serialize this element alone to HTML.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write(&mut out);
        out
    }

    fn write(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        for (name, value) in &self.attrs {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&escape(value));
            out.push('"');
        }
        out.push('>');

        if VOID_ELEMENTS.contains(&self.tag.as_str()) {
            return;
        }

        // Script and style bodies must round-trip unescaped.
        let raw_text = matches!(self.tag.as_str(), "script" | "style");
        for child in &self.children {
            match child {
                Node::Text(text) if raw_text => out.push_str(text),
                _ => write_node(child, out),
            }
        }

        out.push_str("</");
        out.push_str(&self.tag);
        out.push('>');
    }
}

fn find_class_in<'a>(nodes: &'a mut [Node], class: &str) -> Option<&'a mut Element> {
    for node in nodes.iter_mut() {
        if let Node::Element(element) = node {
            if element.has_class(class) {
                return Some(element);
            }
            if let Some(found) = find_class_in(&mut element.children, class) {
                return Some(found);
            }
        }
    }
    None
}

/// A parsed document: the top-level node list.
#[derive(Debug, Clone, Default)]
pub struct Document {
    pub nodes: Vec<Node>,
}

impl Document {
    /// Parse a full HTML document.
    pub fn parse(html: &str) -> Self {
        let parsed = Html::parse_document(html);
        let nodes = parsed.tree.root().children().filter_map(convert).collect();
        Self { nodes }
    }

    /// Depth-first search for the first element matching the predicate.
    pub fn find_mut(&mut self, pred: &dyn Fn(&Element) -> bool) -> Option<&mut Element> {
        find_in(&mut self.nodes, pred)
    }

    /// Visit every element in document order.
    pub fn for_each_mut(&mut self, f: &mut dyn FnMut(&mut Element)) {
        walk(&mut self.nodes, f);
    }

    /// Serialize back to HTML.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for node in &self.nodes {
            write_node(node, &mut out);
        }
        out
    }
}

fn find_in<'a>(nodes: &'a mut [Node], pred: &dyn Fn(&Element) -> bool) -> Option<&'a mut Element> {
    for node in nodes.iter_mut() {
        if let Node::Element(element) = node {
            if pred(element) {
                return Some(element);
            }
            if let Some(found) = find_in(&mut element.children, pred) {
                return Some(found);
            }
        }
    }
    None
}

fn walk(nodes: &mut [Node], f: &mut dyn FnMut(&mut Element)) {
    for node in nodes.iter_mut() {
        if let Node::Element(element) = node {
            f(element);
            walk(&mut element.children, f);
        }
    }
}

/// Convert one parsed `scraper` node into an owned tree node.
pub(crate) fn convert(node: NodeRef<'_, ParsedNode>) -> Option<Node> {
    match node.value() {
        ParsedNode::Element(element) => {
            let mut out = Element::new(element.name());
            for (name, value) in element.attrs() {
                out.set_attr(name, value);
            }
            for child in node.children() {
                if let Some(converted) = convert(child) {
                    out.push(converted);
                }
            }
            Some(Node::Element(out))
        }
        ParsedNode::Text(text) => Some(Node::Text(text.to_string())),
        ParsedNode::Comment(comment) => Some(Node::Comment(comment.to_string())),
        ParsedNode::Doctype(doctype) => Some(Node::Doctype(doctype.name().to_string())),
        _ => None,
    }
}

fn write_node(node: &Node, out: &mut String) {
    match node {
        Node::Element(element) => element.write(out),
        Node::Text(text) => out.push_str(&escape(text)),
        Node::Comment(comment) => {
            out.push_str("<!--");
            out.push_str(comment);
            out.push_str("-->");
        }
        Node::Doctype(name) => {
            out.push_str("<!DOCTYPE ");
            out.push_str(name);
            out.push('>');
        }
        Node::Raw(markup) => out.push_str(markup),
    }
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_serialize_keeps_structure() {
        let doc = Document::parse("<!DOCTYPE html><html><body><p class=\"x\">hola</p></body></html>");
        let html = doc.to_html();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<p class=\"x\">hola</p>"));
    }

    #[test]
    fn text_and_attributes_are_escaped() {
        let mut element = Element::new("p");
        element.set_attr("title", "a\"b");
        element.set_text("1 < 2 & 3");
        let mut out = String::new();
        super::write_node(&Node::Element(element), &mut out);
        assert_eq!(out, "<p title=\"a&quot;b\">1 &lt; 2 &amp; 3</p>");
    }

    #[test]
    fn raw_nodes_are_not_escaped() {
        let mut element = Element::new("div");
        element.push(Node::Raw("<b>ya rendered</b>".to_string()));
        let mut out = String::new();
        super::write_node(&Node::Element(element), &mut out);
        assert_eq!(out, "<div><b>ya rendered</b></div>");
    }

    #[test]
    fn script_bodies_round_trip_unescaped() {
        let doc = Document::parse("<html><body><script>if (a < b && c) {}</script></body></html>");
        assert!(doc.to_html().contains("<script>if (a < b && c) {}</script>"));
    }

    #[test]
    fn void_elements_have_no_closing_tag() {
        let mut img = Element::new("img");
        img.set_attr("src", "x.png");
        let mut out = String::new();
        super::write_node(&Node::Element(img), &mut out);
        assert_eq!(out, "<img src=\"x.png\">");
    }

    #[test]
    fn find_class_mut_reaches_nested_elements() {
        let mut root = Element::new("article");
        let mut body = Element::with_class("div", "product-body");
        body.push_element(Element::with_class("h4", "product-title"));
        root.push_element(body);

        let slot = root.find_class_mut("product-title").unwrap();
        slot.set_text("Anticucho");
        let mut out = String::new();
        super::write_node(&Node::Element(root), &mut out);
        assert!(out.contains("<h4 class=\"product-title\">Anticucho</h4>"));
    }

    #[test]
    fn has_class_matches_within_class_list() {
        let mut element = Element::new("div");
        element.set_attr("class", "grid product-grid wide");
        assert!(element.has_class("product-grid"));
        assert!(!element.has_class("product"));
    }

    #[test]
    fn find_mut_locates_element_by_id() {
        let mut doc = Document::parse("<html><body><main><section id=\"grid-container\"></section></main></body></html>");
        assert!(doc
            .find_mut(&|el| el.attr("id") == Some("grid-container"))
            .is_some());
        assert!(doc.find_mut(&|el| el.attr("id") == Some("missing")).is_none());
    }
}
