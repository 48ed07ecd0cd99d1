// src/render/card.rs

//! Card instantiation: one template clone per product.

use crate::config::{PathsConfig, TextConfig};
use crate::dom::Element;
use crate::models::Product;
use crate::render::price::format_price;
use crate::utils::encode_uri;

// Slot classes shared with the card template resource.
pub const SLOT_IMAGE: &str = "product-img";
pub const SLOT_TITLE: &str = "product-title";
pub const SLOT_DESC: &str = "product-desc";
pub const SLOT_NOTE: &str = "product-note";
pub const SLOT_PRICE: &str = "product-price";

/// Render one card per product into the grid, preserving order.
///
/// Without an installed template this is a silent no-op, mirroring the
/// original renderer.
pub fn render_products(
    grid: &mut Element,
    products: &[Product],
    template: Option<&Element>,
    paths: &PathsConfig,
    text: &TextConfig,
) {
    let Some(template) = template else {
        return;
    };

    for product in products {
        let mut card = template.clone();

        if let Some(img) = card.find_class_mut(SLOT_IMAGE) {
            let src = product
                .img
                .as_deref()
                .filter(|reference| !reference.is_empty())
                .map(encode_uri)
                .unwrap_or_else(|| paths.placeholder_image.clone());
            img.set_attr("src", &src);
            img.set_attr("alt", product.title.as_deref().unwrap_or(&text.default_alt));
            // Swap to the placeholder when the image fails to load in the
            // browser, like the original's error listener.
            img.set_attr(
                "onerror",
                &format!("this.onerror=null;this.src='{}'", paths.placeholder_image),
            );
        }

        if let Some(slot) = card.find_class_mut(SLOT_TITLE) {
            slot.set_text(product.title.as_deref().unwrap_or(""));
        }
        if let Some(slot) = card.find_class_mut(SLOT_DESC) {
            slot.set_text(product.desc.as_deref().unwrap_or(""));
        }
        if let Some(slot) = card.find_class_mut(SLOT_NOTE) {
            slot.set_text(product.note.as_deref().unwrap_or(""));
        }
        if let Some(slot) = card.find_class_mut(SLOT_PRICE) {
            let formatted = product
                .price
                .as_ref()
                .filter(|price| price.is_present())
                .map(format_price)
                .unwrap_or_default();
            slot.set_text(&formatted);
        }

        grid.push_element(card);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::testing::StaticFetcher;
    use crate::models::Price;
    use crate::render::template::TemplateLoader;

    fn sample(title: &str) -> Product {
        Product {
            title: Some(title.to_string()),
            desc: None,
            note: None,
            price: None,
            img: None,
        }
    }

    async fn render_with_fallback(products: &[Product]) -> Element {
        let fetcher = StaticFetcher::new(&[]);
        let mut loader = TemplateLoader::new();
        loader.ensure(&fetcher, "Componentes/productCard.html").await;

        let mut grid = Element::with_class("div", "product-grid");
        render_products(
            &mut grid,
            products,
            loader.card(),
            &PathsConfig::default(),
            &TextConfig::default(),
        );
        grid
    }

    #[tokio::test]
    async fn cards_preserve_product_order() {
        let grid = render_with_fallback(&[sample("uno"), sample("dos"), sample("tres")]).await;
        assert_eq!(grid.children.len(), 3);

        let html = grid.to_html();
        let uno = html.find("uno").unwrap();
        let dos = html.find("dos").unwrap();
        let tres = html.find("tres").unwrap();
        assert!(uno < dos && dos < tres);
    }

    #[tokio::test]
    async fn missing_image_uses_placeholder() {
        let grid = render_with_fallback(&[sample("sin imagen")]).await;
        assert!(grid.to_html().contains("src=\"Imagenes/placeholder.svg\""));
    }

    #[tokio::test]
    async fn image_with_space_is_percent_escaped() {
        let mut product = sample("con imagen");
        product.img = Some("Imagenes/lomo saltado.jpg".to_string());
        let grid = render_with_fallback(&[product]).await;
        assert!(grid
            .to_html()
            .contains("src=\"Imagenes/lomo%20saltado.jpg\""));
    }

    #[tokio::test]
    async fn price_slot_formats_numbers() {
        let mut product = sample("con precio");
        product.price = Some(Price::Number(1234.5));
        let grid = render_with_fallback(&[product]).await;
        assert!(grid.to_html().contains(">$ 1.234,5</p>"));
    }

    #[tokio::test]
    async fn empty_string_price_renders_empty_slot() {
        let mut product = sample("sin precio");
        product.price = Some(Price::Text(String::new()));
        let grid = render_with_fallback(&[product]).await;
        assert!(grid
            .to_html()
            .contains("<p class=\"product-price\"></p>"));
    }

    #[tokio::test]
    async fn missing_fields_fill_slots_with_empty_text() {
        let product = Product {
            title: None,
            desc: None,
            note: None,
            price: None,
            img: None,
        };
        let grid = render_with_fallback(&[product]).await;
        let html = grid.to_html();
        assert!(html.contains("<h4 class=\"product-title\"></h4>"));
        assert!(html.contains("alt=\"Producto\""));
    }

    #[test]
    fn no_template_is_a_silent_noop() {
        let mut grid = Element::with_class("div", "product-grid");
        render_products(
            &mut grid,
            &[sample("uno")],
            None,
            &PathsConfig::default(),
            &TextConfig::default(),
        );
        assert!(grid.children.is_empty());
    }
}
