// src/render/section.rs

//! Section construction: titled separator blocks and product grids.

use crate::dom::Element;

/// A built category section. The grid starts detached so the caller can
/// fill it before attaching it to the section.
#[derive(Debug)]
pub struct SectionParts {
    pub section: Element,
    pub grid: Element,
}

/// Build a titled section and its empty product grid.
pub fn build(title: Option<&str>) -> SectionParts {
    let mut section = Element::with_class("section", "category-section");
    section.push_element(separator(title.unwrap_or("")));

    let grid = Element::with_class("div", "product-grid");
    SectionParts { section, grid }
}

/// Build a separator/title block on its own.
pub fn separator(title: &str) -> Element {
    let mut block = Element::with_class("div", "section-separator");
    block.push_element(Element::with_text("h2", "separator-title", title));
    block
}

/// Build a static notice node.
pub fn notice(text: &str) -> Element {
    Element::with_text("div", "notice", text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Node;

    #[test]
    fn section_carries_separator_and_detached_grid() {
        let parts = build(Some("Entradas"));
        assert_eq!(parts.section.tag(), "section");
        assert!(parts.section.has_class("category-section"));
        assert!(parts.grid.has_class("product-grid"));

        match &parts.section.children[0] {
            Node::Element(sep) => {
                assert!(sep.has_class("section-separator"));
                match &sep.children[0] {
                    Node::Element(h) => {
                        assert_eq!(h.tag(), "h2");
                        assert_eq!(h.children, vec![Node::Text("Entradas".to_string())]);
                    }
                    other => panic!("expected heading, got {other:?}"),
                }
            }
            other => panic!("expected separator, got {other:?}"),
        }
    }

    #[test]
    fn missing_title_yields_empty_heading() {
        let parts = build(None);
        match &parts.section.children[0] {
            Node::Element(sep) => match &sep.children[0] {
                Node::Element(h) => assert!(h.children.is_empty()),
                other => panic!("expected heading, got {other:?}"),
            },
            other => panic!("expected separator, got {other:?}"),
        }
    }

    #[test]
    fn notice_is_a_classed_div() {
        let node = notice("Sin contenido.");
        assert!(node.has_class("notice"));
    }
}
