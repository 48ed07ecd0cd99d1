// src/pipeline/placeholder.rs

//! Placeholder pipeline.
//!
//! Elements in the page markup can pre-declare a product source; they are
//! rendered before the manifest runs, in document order, and the consumed
//! source identifiers are handed to the manifest pipeline so the same file
//! is never painted twice.

use std::collections::{HashSet, VecDeque};

use crate::config::RenderConfig;
use crate::dom::{Document, Element, Node};
use crate::fetch::{fetch_json, Fetch};
use crate::locale::Localizer;
use crate::models::Product;
use crate::render::{card, section};

/// Attribute declaring which product list an element renders.
pub const PRODUCT_SOURCE_ATTR: &str = "data-products";

/// Optional attribute declaring the element's separator title.
pub const TITLE_ATTR: &str = "data-title";

/// Render every declared placeholder and return the set of raw
/// (pre-localization) source identifiers successfully consumed.
///
/// Fetches run strictly one after another so the set is complete before the
/// manifest pipeline consults it. A failed fetch leaves its identifier out
/// of the set on purpose: the manifest pipeline must still attempt the file
/// under its own resolved path.
pub async fn run(
    doc: &mut Document,
    fetcher: &dyn Fetch,
    localizer: &Localizer,
    template: Option<&Element>,
    config: &RenderConfig,
) -> HashSet<String> {
    let mut declared = Vec::new();
    declared_sources(&doc.nodes, &mut declared);

    let mut rendered = HashSet::new();
    let mut replacements: VecDeque<Vec<Node>> = VecDeque::new();

    for (file, title) in &declared {
        let mut content: Vec<Node> = Vec::new();
        if let Some(title) = title {
            content.push(Node::Element(section::separator(title)));
        }

        let mut grid = Element::with_class("div", "product-grid");
        match fetch_json::<Vec<Product>>(fetcher, &localizer.resolve(file)).await {
            Ok(products) => {
                card::render_products(&mut grid, &products, template, &config.paths, &config.text);
                content.push(Node::Element(grid));
                rendered.insert(file.clone());
            }
            Err(error) => {
                log::warn!("Failed to load placeholder products from {file}: {error}");
                content.push(Node::Element(grid));
                content.push(Node::Element(section::notice(&config.text.notice_section)));
            }
        }
        replacements.push_back(content);
    }

    splice(&mut doc.nodes, &mut replacements);
    rendered
}

/// Collect declared sources in document order. Descendants of a declared
/// element are not scanned; its content is replaced wholesale.
fn declared_sources(nodes: &[Node], out: &mut Vec<(String, Option<String>)>) {
    for node in nodes {
        if let Node::Element(element) = node {
            match element.attr(PRODUCT_SOURCE_ATTR).filter(|f| !f.is_empty()) {
                Some(file) => out.push((
                    file.to_string(),
                    element.attr(TITLE_ATTR).map(str::to_string),
                )),
                None => declared_sources(&element.children, out),
            }
        }
    }
}

/// Replace each declared element's children with its prepared content, in
/// the same document order the sources were collected.
fn splice(nodes: &mut [Node], replacements: &mut VecDeque<Vec<Node>>) {
    for node in nodes.iter_mut() {
        if let Node::Element(element) = node {
            let declared = element
                .attr(PRODUCT_SOURCE_ATTR)
                .is_some_and(|f| !f.is_empty());
            if declared {
                if let Some(content) = replacements.pop_front() {
                    element.children = content;
                }
            } else {
                splice(&mut element.children, replacements);
            }
        }
    }
}
