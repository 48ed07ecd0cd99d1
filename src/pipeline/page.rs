// src/pipeline/page.rs

//! One full render pass over a page.

use crate::config::{RenderConfig, TextConfig};
use crate::dom::{Document, Element, Node};
use crate::error::Result;
use crate::fetch::{fetch_json, Fetch};
use crate::locale::{self, Localizer, UiStrings};
use crate::pipeline::{manifest, placeholder};
use crate::render::TemplateLoader;

/// Id of the element manifest sections render into.
pub const CONTAINER_ID: &str = "grid-container";

/// Fetch the page, run both pipelines over it, and return the rendered
/// HTML.
///
/// Only an unreachable page markup fails the pass; every resource below it
/// degrades to an on-page notice.
pub async fn render_page(
    fetcher: &dyn Fetch,
    config: &RenderConfig,
    localizer: &Localizer,
    page: &str,
) -> Result<String> {
    let markup = fetcher.fetch_text(page).await?;
    let mut doc = Document::parse(&markup);

    let mut loader = TemplateLoader::new();
    loader.ensure(fetcher, &config.paths.card_template).await;

    let rendered_files =
        placeholder::run(&mut doc, fetcher, localizer, loader.card(), config).await;

    ensure_container(&mut doc, &config.text);
    if let Some(container) = doc.find_mut(&|el| el.attr("id") == Some(CONTAINER_ID)) {
        manifest::run(
            container,
            fetcher,
            localizer,
            loader.card(),
            config,
            &rendered_files,
        )
        .await;
    }

    apply_ui_strings(&mut doc, fetcher, localizer, config).await;

    Ok(doc.to_html())
}

/// Locate the manifest container, creating it under `<main>` (or `<body>`)
/// when the page does not declare one.
fn ensure_container(doc: &mut Document, text: &TextConfig) {
    if doc
        .find_mut(&|el| el.attr("id") == Some(CONTAINER_ID))
        .is_some()
    {
        return;
    }

    let mut container = Element::new("section");
    container.set_attr("id", CONTAINER_ID);
    container.set_attr("aria-label", &text.container_label);
    let node = Node::Element(container);

    if let Some(main) = doc.find_mut(&|el| el.tag() == "main") {
        main.push(node);
        return;
    }
    if let Some(body) = doc.find_mut(&|el| el.tag() == "body") {
        body.push(node);
        return;
    }
    doc.nodes.push(node);
}

/// Apply the UI string table to translation-key elements. The table is an
/// optional layer; a missing resource just leaves the page as authored.
async fn apply_ui_strings(
    doc: &mut Document,
    fetcher: &dyn Fetch,
    localizer: &Localizer,
    config: &RenderConfig,
) {
    let path = localizer.resolve(&config.paths.ui_strings);
    match fetch_json::<UiStrings>(fetcher, &path).await {
        Ok(strings) => locale::apply_ui_strings(doc, &strings),
        Err(error) => log::debug!("No UI string table at {path}: {error}"),
    }
}
