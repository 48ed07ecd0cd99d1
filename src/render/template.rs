// src/render/template.rs

//! Card template loading.
//!
//! The card markup lives in its own resource so the site can restyle cards
//! without touching the renderer. Loading happens at most once per render
//! pass; every failure mode degrades to the built-in minimal card exposing
//! the same slot classes.

use scraper::{Html, Selector};

use crate::dom::{self, Element, Node};
use crate::error::{AppError, Result};
use crate::fetch::Fetch;

/// Loads and caches the card prototype for one render pass.
#[derive(Debug, Default)]
pub struct TemplateLoader {
    card: Option<Element>,
}

impl TemplateLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the template once; later calls are no-ops.
    pub async fn ensure(&mut self, fetcher: &dyn Fetch, path: &str) {
        if self.card.is_some() {
            return;
        }
        let card = match Self::load(fetcher, path).await {
            Ok(card) => card,
            Err(error) => {
                log::warn!("Failed to load card template from {path}: {error}. Using built-in fallback.");
                Self::fallback()
            }
        };
        self.card = Some(card);
    }

    /// The installed card prototype, if any.
    pub fn card(&self) -> Option<&Element> {
        self.card.as_ref()
    }

    async fn load(fetcher: &dyn Fetch, path: &str) -> Result<Element> {
        let markup = fetcher.fetch_text(path).await?;
        let fragment = Html::parse_fragment(&markup);
        let selector = Selector::parse("template")
            .map_err(|e| AppError::selector("template", format!("{e:?}")))?;

        let template = fragment
            .select(&selector)
            .next()
            .ok_or_else(|| AppError::Template(path.to_string()))?;

        template
            .children()
            .filter_map(dom::convert)
            .find_map(|node| match node {
                Node::Element(element) => Some(element),
                _ => None,
            })
            .ok_or_else(|| AppError::Template(path.to_string()))
    }

    /// Minimal card compatible with the slot classes the renderer fills.
    fn fallback() -> Element {
        let mut card = Element::with_class("article", "product-card");

        let mut img = Element::with_class("img", "product-img");
        img.set_attr("alt", "Producto");
        img.set_attr("loading", "lazy");
        card.push_element(img);

        let mut body = Element::with_class("div", "product-body");
        body.push_element(Element::with_class("h4", "product-title"));
        body.push_element(Element::with_class("p", "product-desc"));
        body.push_element(Element::with_class("p", "product-note"));
        body.push_element(Element::with_class("p", "product-price"));
        card.push_element(body);

        card
    }
}
