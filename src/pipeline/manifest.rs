// src/pipeline/manifest.rs

//! Manifest pipeline.
//!
//! Loads the category manifest and renders every category the placeholder
//! pipeline has not already painted. Failures are contained per resource;
//! only an unreachable manifest produces the page-level error block, and
//! even then the legacy static grid is attempted as a last resort.

use std::collections::HashSet;

use crate::config::{RenderConfig, TextConfig};
use crate::dom::{Element, Node};
use crate::fetch::{fetch_json, Fetch};
use crate::locale::Localizer;
use crate::models::{CategoryEntry, Manifest, Product, Subcategory};
use crate::render::{card, section};

/// Render the manifest's categories into the container.
pub async fn run(
    container: &mut Element,
    fetcher: &dyn Fetch,
    localizer: &Localizer,
    template: Option<&Element>,
    config: &RenderConfig,
    rendered_files: &HashSet<String>,
) {
    let manifest_path = localizer.resolve(&config.paths.manifest);
    log::debug!("Loading manifest from {manifest_path}");

    let manifest: Manifest = match fetch_json(fetcher, &manifest_path).await {
        Ok(manifest) => manifest,
        Err(error) => {
            log::warn!("Failed to load manifest from {manifest_path}: {error}");
            container.children = error_block(&config.text);

            // Last resort: the pre-rendered static grid, injected verbatim.
            match fetcher.fetch_text(&config.paths.legacy_grid).await {
                Ok(markup) => container.children = vec![Node::Raw(markup)],
                Err(fallback_error) => {
                    log::error!("Legacy grid fallback failed: {fallback_error}");
                }
            }
            return;
        }
    };

    for category in manifest.into_categories() {
        match category.resolve() {
            CategoryEntry::Products { title, file } => {
                if rendered_files.contains(&file) {
                    log::debug!("Skipping {file}: already rendered by a placeholder");
                    continue;
                }
                render_simple(container, fetcher, localizer, template, config, title, &file)
                    .await;
            }
            CategoryEntry::Groups { subcategories, .. } => {
                render_groups(
                    container,
                    fetcher,
                    localizer,
                    template,
                    config,
                    subcategories,
                    rendered_files,
                )
                .await;
            }
            CategoryEntry::Empty { title } => {
                let section::SectionParts { mut section, .. } = section::build(Some(
                    title
                        .as_deref()
                        .unwrap_or(&config.text.default_category_title),
                ));
                section.push_element(section::notice(&config.text.notice_empty));
                container.push_element(section);
            }
        }
    }
}

/// Simple-file category: one titled section, one grid.
async fn render_simple(
    container: &mut Element,
    fetcher: &dyn Fetch,
    localizer: &Localizer,
    template: Option<&Element>,
    config: &RenderConfig,
    title: Option<String>,
    file: &str,
) {
    let section::SectionParts { mut section, mut grid } = section::build(Some(
        title
            .as_deref()
            .unwrap_or(&config.text.default_category_title),
    ));

    match fetch_json::<Vec<Product>>(fetcher, &localizer.resolve(file)).await {
        Ok(products) => {
            card::render_products(&mut grid, &products, template, &config.paths, &config.text);
            section.push_element(grid);
        }
        Err(error) => {
            log::warn!("Failed to load products from {file}: {error}");
            section.push_element(grid);
            section.push_element(section::notice(&config.text.notice_category));
        }
    }
    container.push_element(section);
}

/// Grouped category: one parent section holding a subtitle and grid per
/// subcategory.
async fn render_groups(
    container: &mut Element,
    fetcher: &dyn Fetch,
    localizer: &Localizer,
    template: Option<&Element>,
    config: &RenderConfig,
    subcategories: Vec<Subcategory>,
    rendered_files: &HashSet<String>,
) {
    let mut parent = Element::new("section");

    for sub in subcategories {
        let file = sub.file.as_deref().filter(|f| !f.is_empty());
        if let Some(file) = file {
            if rendered_files.contains(file) {
                log::debug!("Skipping {file}: already rendered by a placeholder");
                continue;
            }
        }

        let sub_title = sub
            .title
            .as_deref()
            .unwrap_or(&config.text.default_subcategory_title);
        let mut heading = Element::new("h3");
        heading.set_text(sub_title);
        parent.push_element(heading);

        let mut grid = Element::with_class("div", "product-grid");
        let fetched = match file {
            Some(file) => fetch_json::<Vec<Product>>(fetcher, &localizer.resolve(file))
                .await
                .map_err(|error| {
                    log::warn!("Failed to load products from {file}: {error}");
                }),
            None => Err(()),
        };

        match fetched {
            Ok(products) => {
                card::render_products(&mut grid, &products, template, &config.paths, &config.text);
                parent.push_element(grid);
            }
            Err(()) => {
                parent.push_element(grid);
                let notice_text = config
                    .text
                    .notice_subcategory
                    .replace("{title}", sub_title);
                parent.push_element(section::notice(&notice_text));
            }
        }
    }

    container.push_element(parent);
}

/// The static page-level error block.
fn error_block(text: &TextConfig) -> Vec<Node> {
    let mut heading = Element::new("h3");
    heading.set_text(&text.error_heading);

    let mut body = Element::new("p");
    body.set_text(&text.error_body);

    let mut actions = Element::new("p");
    actions.set_text(&text.error_actions);

    let mut detail = Element::new("p");
    detail.set_attr("class", "muted");
    detail.set_text(&text.error_detail);

    vec![
        Node::Text(text.error_face.clone()),
        Node::Element(heading),
        Node::Element(body),
        Node::Element(actions),
        Node::Element(detail),
    ]
}
